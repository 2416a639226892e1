use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How long the user wants to spend on the whole roadmap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Timeframe {
    OneMonth,
    #[default]
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [
        Timeframe::OneMonth,
        Timeframe::ThreeMonths,
        Timeframe::SixMonths,
        Timeframe::OneYear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::OneMonth => "1 month",
            Timeframe::ThreeMonths => "3 months",
            Timeframe::SixMonths => "6 months",
            Timeframe::OneYear => "1 year",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Experience {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Experience {
    pub const ALL: [Experience; 3] = [
        Experience::Beginner,
        Experience::Intermediate,
        Experience::Advanced,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Experience::Beginner => "beginner",
            Experience::Intermediate => "intermediate",
            Experience::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weekly time budget the user is willing to dedicate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Dedication {
    #[default]
    OneHourDaily,
    TwoToThreeHoursDaily,
    FourPlusHoursDaily,
    WeekendsOnly,
}

impl Dedication {
    pub const ALL: [Dedication; 4] = [
        Dedication::OneHourDaily,
        Dedication::TwoToThreeHoursDaily,
        Dedication::FourPlusHoursDaily,
        Dedication::WeekendsOnly,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Dedication::OneHourDaily => "1 hour/day",
            Dedication::TwoToThreeHoursDaily => "2-3 hours/day",
            Dedication::FourPlusHoursDaily => "4+ hours/day",
            Dedication::WeekendsOnly => "weekends only",
        }
    }
}

impl fmt::Display for Dedication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current user input. All fields have defaults; the goal starts empty and
/// is validated only when a generation is requested.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub timeframe: Timeframe,
    #[serde(default)]
    pub experience: Experience,
    #[serde(default)]
    pub dedication: Dedication,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// One phase of a roadmap. Fields are defaulted so a syntactically valid
/// array of objects from the model passes structural validation even when
/// individual members are missing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStep {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub timeframe: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Persisted snapshot pairing the preferences that produced a roadmap with
/// its steps. Append-only; entries are never mutated or deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedRoadmap {
    pub id: String,
    pub preferences: UserPreferences,
    pub steps: Vec<RoadmapStep>,
    pub created_at: String,
}

/// Everything that survives a restart: last-used preferences, the API key,
/// and the saved roadmap list.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StorageData {
    #[serde(default)]
    pub last_preferences: Option<UserPreferences>,
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    #[serde(default)]
    pub saved_roadmaps: Vec<SavedRoadmap>,
}
