use chrono::Utc;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;
use thiserror::Error;
use ulid::Ulid;

use crate::types::{RoadmapStep, SavedRoadmap, StorageData, UserPreferences};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Saved roadmap not found: {0}")]
    RoadmapNotFound(String),
}

/// File-backed mirror of the session's durable state. Loaded once at
/// startup, rewritten in full on specific events; single-process
/// assumption, concurrent writers may silently overwrite each other.
pub struct Storage {
    storage_path: PathBuf,
    data: StorageData,
}

impl Storage {
    pub fn new() -> Self {
        let home = dirs::home_dir().expect("couldn't find home dir");
        let data_dir = home.join(".skillpath");
        let storage_path = data_dir.join("data.json");
        Self {
            storage_path,
            data: StorageData::default(),
        }
    }

    pub fn with_path(storage_path: PathBuf) -> Self {
        Self {
            storage_path,
            data: StorageData::default(),
        }
    }

    pub fn initialize(&mut self) -> Result<(), StorageError> {
        if let Some(data_dir) = self.storage_path.parent() {
            fs::create_dir_all(data_dir)?;
        }

        if self.storage_path.exists() {
            let mut file = File::open(&self.storage_path)?;
            let mut contents = String::new();
            file.read_to_string(&mut contents)?;
            self.data = serde_json::from_str(&contents)?;
        } else {
            self.save()?;
        }

        Ok(())
    }

    /// Persist the current storage content to disk using a temporary file
    /// and an atomic rename to avoid partial writes.
    pub fn save(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.storage_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp = self.storage_path.with_extension("tmp");
        let mut f = File::create(&temp)?;
        let content = serde_json::to_string_pretty(&self.data)?;
        f.write_all(content.as_bytes())?;
        f.sync_all()?;
        fs::rename(temp, &self.storage_path)?;
        Ok(())
    }

    pub fn last_preferences(&self) -> Option<UserPreferences> {
        self.data.last_preferences.clone()
    }

    pub fn set_last_preferences(&mut self, preferences: UserPreferences) {
        // No immediate disk write; callers should call save() to persist changes.
        self.data.last_preferences = Some(preferences);
    }

    pub fn api_key(&self) -> Option<&str> {
        self.data.gemini_api_key.as_deref()
    }

    pub fn set_api_key(&mut self, key: String) {
        // No immediate disk write; callers should call save() to persist changes.
        self.data.gemini_api_key = Some(key);
    }

    pub fn saved_roadmaps(&self) -> &[SavedRoadmap] {
        &self.data.saved_roadmaps
    }

    /// Append a snapshot of the given preferences and steps to the saved
    /// list. Entries get a fresh id and creation timestamp and are never
    /// mutated afterwards.
    pub fn append_saved(
        &mut self,
        preferences: UserPreferences,
        steps: Vec<RoadmapStep>,
    ) -> SavedRoadmap {
        let saved = SavedRoadmap {
            id: Ulid::new().to_string(),
            preferences,
            steps,
            created_at: Utc::now().to_rfc3339(),
        };
        self.data.saved_roadmaps.push(saved.clone());
        // No immediate disk write; callers should call save() to persist changes.
        saved
    }

    pub fn get_saved(&self, id: &str) -> Result<SavedRoadmap, StorageError> {
        self.data
            .saved_roadmaps
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| StorageError::RoadmapNotFound(id.to_string()))
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Experience, Timeframe};

    fn temp_storage(dir: &tempfile::TempDir) -> Storage {
        Storage::with_path(dir.path().join("data.json"))
    }

    #[test]
    fn initialize_creates_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = temp_storage(&dir);
        storage.initialize().unwrap();
        assert!(storage.last_preferences().is_none());
        assert!(storage.api_key().is_none());
        assert!(storage.saved_roadmaps().is_empty());
    }

    #[test]
    fn preferences_round_trip_across_restart() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = UserPreferences {
            goal: "rust systems programming".to_string(),
            timeframe: Timeframe::SixMonths,
            experience: Experience::Intermediate,
            dedication: Default::default(),
        };

        let mut storage = temp_storage(&dir);
        storage.initialize().unwrap();
        storage.set_last_preferences(prefs.clone());
        storage.set_api_key("test-key".to_string());
        storage.save().unwrap();

        let mut reopened = temp_storage(&dir);
        reopened.initialize().unwrap();
        assert_eq!(reopened.last_preferences(), Some(prefs));
        assert_eq!(reopened.api_key(), Some("test-key"));
    }

    #[test]
    fn append_saved_assigns_id_and_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = temp_storage(&dir);
        storage.initialize().unwrap();

        let saved = storage.append_saved(
            UserPreferences::default(),
            vec![RoadmapStep {
                title: "Foundations".to_string(),
                ..Default::default()
            }],
        );
        assert!(!saved.id.is_empty());
        assert!(!saved.created_at.is_empty());
        assert_eq!(storage.saved_roadmaps().len(), 1);

        let found = storage.get_saved(&saved.id).unwrap();
        assert_eq!(found, saved);
        assert!(storage.get_saved("nope").is_err());
    }

    #[test]
    fn saved_list_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = temp_storage(&dir);
        storage.initialize().unwrap();
        storage.append_saved(UserPreferences::default(), vec![]);
        storage.save().unwrap();

        let mut reopened = temp_storage(&dir);
        reopened.initialize().unwrap();
        assert_eq!(reopened.saved_roadmaps().len(), 1);
    }
}
