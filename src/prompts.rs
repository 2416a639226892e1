use regex::Regex;

use crate::error::{ServiceError, ServiceResult};
use crate::types::{RoadmapStep, UserPreferences};

/// Build the generation instruction embedding all four preference fields.
/// The model is asked to answer with nothing but the JSON array so the
/// extraction step below has the best chance of a clean match.
pub fn build_roadmap_prompt(preferences: &UserPreferences) -> String {
    format!(
        r#"Create a personalized learning roadmap for someone who wants to learn: {goal}

Constraints:
- Total timeframe: {timeframe}
- Current experience level: {experience}
- Time they can dedicate: {dedication}

Respond with ONLY a JSON array of 3-4 phase objects, no prose before or after.
Each object must have exactly this shape:
{{"title": string, "description": string, "resources": [{{"title": string, "url": string}}], "timeframe": string, "skills": [string]}}

The "resources" links must be real, working URLs to high-quality free material.
The "timeframe" of each phase should subdivide the total timeframe.
The "skills" array lists the concrete skills acquired in that phase."#,
        goal = preferences.goal.trim(),
        timeframe = preferences.timeframe,
        experience = preferences.experience,
        dedication = preferences.dedication,
    )
}

/// Extract the roadmap from free-form model output: take the first greedy
/// `[...]` substring and parse it as an array of steps. Anything else --
/// no bracketed substring, malformed JSON, wrong shape -- is a parse error.
pub fn extract_roadmap(response: &str) -> ServiceResult<Vec<RoadmapStep>> {
    let array_re = Regex::new(r"\[[\s\S]*\]").unwrap();
    let candidate = array_re
        .find(response)
        .ok_or_else(|| ServiceError::Parse("no JSON array in model response".to_string()))?;

    serde_json::from_str(candidate.as_str())
        .map_err(|e| ServiceError::Parse(format!("model response is not a valid roadmap: {e}")))
}
