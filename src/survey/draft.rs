use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::survey::answers::AnswerMap;
use crate::survey::{Result, SurveyError};

/// The persisted work-in-progress: the page the respondent was on plus every
/// answer collected so far. Created on first change, destroyed on successful
/// submission or explicit restart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftRecord {
    pub page: usize,
    pub answers: AnswerMap,
}

/// File-backed key-value persistence for the in-progress survey, the stand-in
/// for the browser's localStorage slot. Loading never fails past this
/// boundary: a missing or unreadable draft is just an empty one.
#[derive(Debug, Clone)]
pub struct DraftStore {
    path: PathBuf,
}

impl DraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the stored draft. Idempotent.
    pub fn save(&self, draft: &DraftRecord) -> Result<()> {
        let json = serde_json::to_string(draft).map_err(SurveyError::DraftEncode)?;
        fs::write(&self.path, json).map_err(SurveyError::DraftIo)?;
        Ok(())
    }

    /// Returns the stored draft, or an empty one if nothing was saved yet or
    /// the stored bytes no longer parse (fails soft).
    pub fn load(&self) -> DraftRecord {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return DraftRecord::default(),
        };

        match serde_json::from_slice(&bytes) {
            Ok(draft) => draft,
            Err(e) => {
                warn!(
                    "Stored draft at {} is unreadable ({}), starting fresh",
                    self.path.display(),
                    e
                );
                DraftRecord::default()
            }
        }
    }

    /// Removes the persisted draft. Called after a confirmed submission or a
    /// user-initiated restart.
    pub fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to clear draft at {}: {}", self.path.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> DraftStore {
        DraftStore::new(dir.path().join("ht_survey_draft.json"))
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut draft = DraftRecord::default();
        draft.page = 2;
        draft.answers.set("full_name", "Jane Doe");
        draft.answers.set("consent", true);
        draft.answers.set("age_group", "adult");

        store.save(&draft).unwrap();
        assert_eq!(store.load(), draft);

        // Overwrite is idempotent.
        store.save(&draft).unwrap();
        assert_eq!(store.load(), draft);
    }

    #[test]
    fn missing_draft_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load(), DraftRecord::default());
    }

    #[test]
    fn corrupt_draft_fails_soft() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), b"{not json").unwrap();
        assert_eq!(store.load(), DraftRecord::default());
    }

    #[test]
    fn clear_removes_the_file_and_tolerates_absence() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&DraftRecord::default()).unwrap();
        assert!(store.path().exists());

        store.clear();
        assert!(!store.path().exists());

        // Clearing twice is fine.
        store.clear();
    }
}
