use crate::error::{ServiceError, ServiceResult};
use crate::gemini::TextModel;
use crate::prompts::{build_roadmap_prompt, extract_roadmap};
use crate::render::Theme;
use crate::storage::Storage;
use crate::types::{RoadmapStep, SavedRoadmap, UserPreferences};

/// In-memory session state and the orchestration around it. Storage is a
/// side-effect mirror written on specific events, never re-read mid-session.
///
/// State machine: idle -> busy -> idle-with-roadmap | idle-with-error.
pub struct Session {
    pub preferences: UserPreferences,
    pub roadmap: Vec<RoadmapStep>,
    pub last_error: Option<String>,
    pub theme: Theme,
    busy: bool,
    storage: Storage,
}

impl Session {
    /// Seed the session from storage: last-used preferences if any were
    /// persisted, defaults otherwise.
    pub fn new(storage: Storage) -> Self {
        let preferences = storage.last_preferences().unwrap_or_default();
        Self {
            preferences,
            roadmap: Vec::new(),
            last_error: None,
            theme: Theme::Dark,
            busy: false,
            storage,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn api_key(&self) -> Option<String> {
        self.storage
            .api_key()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
    }

    /// Store the credential. Persisted immediately on explicit entry;
    /// blank input is ignored.
    pub fn set_api_key(&mut self, key: &str) -> ServiceResult<()> {
        let key = key.trim();
        if key.is_empty() {
            return Ok(());
        }
        self.storage.set_api_key(key.to_string());
        self.storage.save()?;
        Ok(())
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn saved(&self) -> &[SavedRoadmap] {
        self.storage.saved_roadmaps()
    }

    /// Run one generation. Local validation happens before the remote call;
    /// a generation already in flight is rejected rather than raced. On
    /// success the roadmap is replaced and the preferences snapshot is
    /// persisted; on failure the prior roadmap is left untouched and only
    /// a generic message is surfaced.
    pub fn generate(&mut self, model: &dyn TextModel) -> ServiceResult<()> {
        if self.busy {
            let err = ServiceError::Validation("a generation is already in progress".to_string());
            self.last_error = Some(err.user_message());
            return Err(err);
        }
        if let Err(err) = self.validate_for_generation() {
            self.last_error = Some(err.user_message());
            return Err(err);
        }

        self.busy = true;
        let result = self.run_generation(model);
        self.busy = false;

        match result {
            Ok(steps) => {
                self.roadmap = steps;
                self.last_error = None;
                self.storage.set_last_preferences(self.preferences.clone());
                self.storage.save()?;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "roadmap generation failed");
                self.last_error = Some(err.user_message());
                Err(err)
            }
        }
    }

    fn validate_for_generation(&self) -> ServiceResult<()> {
        if self.api_key().is_none() {
            return Err(ServiceError::Validation(
                "Gemini API key is required".to_string(),
            ));
        }
        if self.preferences.goal.trim().is_empty() {
            return Err(ServiceError::Validation(
                "learning goal is required".to_string(),
            ));
        }
        Ok(())
    }

    fn run_generation(&self, model: &dyn TextModel) -> ServiceResult<Vec<RoadmapStep>> {
        let prompt = build_roadmap_prompt(&self.preferences);
        tracing::debug!(prompt_len = prompt.len(), "requesting roadmap");
        let response = model.complete(&prompt)?;
        tracing::debug!(response_len = response.len(), "model responded");
        extract_roadmap(&response)
    }

    /// Snapshot the current roadmap into the saved list. A no-op when
    /// nothing has been generated yet.
    pub fn save_current(&mut self) -> ServiceResult<Option<SavedRoadmap>> {
        if self.roadmap.is_empty() {
            return Ok(None);
        }
        let saved = self
            .storage
            .append_saved(self.preferences.clone(), self.roadmap.clone());
        self.storage.save()?;
        tracing::info!(id = %saved.id, "roadmap saved");
        Ok(Some(saved))
    }

    /// Replace current preferences and roadmap with a saved entry. The
    /// saved list itself is left untouched.
    pub fn load_saved(&mut self, id: &str) -> ServiceResult<SavedRoadmap> {
        let entry = self.storage.get_saved(id).map_err(|e| {
            ServiceError::Validation(e.to_string())
        })?;
        self.preferences = entry.preferences.clone();
        self.roadmap = entry.steps.clone();
        self.last_error = None;
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Experience, Timeframe};
    use std::cell::{Cell, RefCell};

    /// Canned model that records how often it was invoked.
    struct MockModel {
        response: RefCell<Result<String, String>>,
        calls: Cell<usize>,
    }

    impl MockModel {
        fn replying(text: &str) -> Self {
            Self {
                response: RefCell::new(Ok(text.to_string())),
                calls: Cell::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: RefCell::new(Err(message.to_string())),
                calls: Cell::new(0),
            }
        }
    }

    impl TextModel for MockModel {
        fn complete(&self, _prompt: &str) -> ServiceResult<String> {
            self.calls.set(self.calls.get() + 1);
            match &*self.response.borrow() {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(ServiceError::Network(message.clone())),
            }
        }
    }

    const STEP_JSON: &str = r#"[{"title": "Foundations", "description": "Core concepts",
        "resources": [{"title": "The Book", "url": "https://doc.rust-lang.org/book/"}],
        "timeframe": "weeks 1-4", "skills": ["ownership", "borrowing"]}]"#;

    fn session_with_key(dir: &tempfile::TempDir) -> Session {
        let mut storage = Storage::with_path(dir.path().join("data.json"));
        storage.initialize().unwrap();
        let mut session = Session::new(storage);
        session.set_api_key("test-key").unwrap();
        session.preferences.goal = "rust".to_string();
        session
    }

    #[test]
    fn empty_goal_fails_validation_without_calling_model() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_key(&dir);
        session.preferences.goal = "   ".to_string();

        let model = MockModel::replying(STEP_JSON);
        let err = session.generate(&model).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(model.calls.get(), 0);
        assert_eq!(session.last_error.as_deref(), Some("learning goal is required"));
    }

    #[test]
    fn missing_or_blank_credential_fails_validation_without_calling_model() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = Storage::with_path(dir.path().join("data.json"));
        storage.initialize().unwrap();
        let mut session = Session::new(storage);
        session.preferences.goal = "rust".to_string();

        let model = MockModel::replying(STEP_JSON);
        assert!(session.generate(&model).is_err());
        assert_eq!(model.calls.get(), 0);

        // Whitespace-only keys are ignored on entry, so validation still fails.
        session.set_api_key("   ").unwrap();
        assert!(session.generate(&model).is_err());
        assert_eq!(model.calls.get(), 0);
    }

    #[test]
    fn well_formed_response_replaces_roadmap_and_persists_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_key(&dir);
        session.preferences.timeframe = Timeframe::OneYear;
        session.preferences.experience = Experience::Advanced;

        let model = MockModel::replying(STEP_JSON);
        session.generate(&model).unwrap();
        assert_eq!(model.calls.get(), 1);
        assert_eq!(session.roadmap.len(), 1);
        assert_eq!(session.roadmap[0].title, "Foundations");
        assert_eq!(session.roadmap[0].skills.len(), 2);
        assert!(session.last_error.is_none());

        // The preferences snapshot must be on disk for the next startup.
        let mut reopened = Storage::with_path(dir.path().join("data.json"));
        reopened.initialize().unwrap();
        assert_eq!(reopened.last_preferences(), Some(session.preferences.clone()));
    }

    #[test]
    fn response_without_array_keeps_prior_roadmap() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_key(&dir);

        session.generate(&MockModel::replying(STEP_JSON)).unwrap();
        let before = session.roadmap.clone();

        let err = session
            .generate(&MockModel::replying("I cannot produce a roadmap."))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Parse(_)));
        assert_eq!(session.roadmap, before);
        assert!(session.last_error.is_some());
    }

    #[test]
    fn invalid_json_in_brackets_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_key(&dir);
        let err = session
            .generate(&MockModel::replying("here you go [not json at all]"))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Parse(_)));
        assert!(session.roadmap.is_empty());
    }

    #[test]
    fn network_failure_collapses_to_generic_message() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_key(&dir);
        let err = session
            .generate(&MockModel::failing("connection refused"))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Network(_)));
        let shown = session.last_error.unwrap();
        assert!(!shown.contains("connection refused"));
    }

    #[test]
    fn saving_without_roadmap_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_key(&dir);
        assert!(session.save_current().unwrap().is_none());
        assert!(session.saved().is_empty());
    }

    #[test]
    fn saving_appends_exactly_one_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_key(&dir);
        session.generate(&MockModel::replying(STEP_JSON)).unwrap();

        let saved = session.save_current().unwrap().unwrap();
        assert_eq!(session.saved().len(), 1);
        assert_eq!(saved.steps, session.roadmap);
        assert_eq!(saved.preferences, session.preferences);
    }

    #[test]
    fn loading_replaces_state_and_keeps_saved_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_key(&dir);
        session.generate(&MockModel::replying(STEP_JSON)).unwrap();
        let saved = session.save_current().unwrap().unwrap();

        session.preferences.goal = "something else".to_string();
        session.roadmap.clear();

        session.load_saved(&saved.id).unwrap();
        assert_eq!(session.preferences, saved.preferences);
        assert_eq!(session.roadmap, saved.steps);
        assert_eq!(session.saved().len(), 1);

        let err = session.load_saved("missing-id").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn toggling_theme_twice_restores_original() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_key(&dir);
        let original = session.theme;
        session.toggle_theme();
        assert_ne!(session.theme, original);
        session.toggle_theme();
        assert_eq!(session.theme, original);
    }
}
