//! Persistence for the tracked-case list and the last-check timestamp
//!
//! Two independent whole-document JSON files: an array of cases and a single
//! `{ "last_check": ... }` object. Documents are read in full before every
//! mutation and rewritten in full after. There is no locking and no atomic
//! replace; the service is scoped to a single operator.

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::{fs, io};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Case;

/// Trait for case-list and last-check persistence.
///
/// Injected into [`crate::CaseService`] so tests can substitute
/// [`MemoryStore`].
pub trait CaseStore: Send + Sync {
    /// Load the full case list, in storage order. A store that has never been
    /// written reads as empty.
    fn load_cases(&self) -> Result<Vec<Case>>;

    /// Replace the persisted case list with `cases`.
    fn save_cases(&self, cases: &[Case]) -> Result<()>;

    /// Load the last-check timestamp, or `None` if a check-all pass has never
    /// completed.
    fn load_last_check(&self) -> Result<Option<String>>;

    /// Replace the persisted last-check timestamp.
    fn save_last_check(&self, timestamp: &str) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct LastCheckDoc {
    last_check: Option<String>,
}

/// File-backed [`CaseStore`] over two JSON documents.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    cases_path: PathBuf,
    last_check_path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(cases_path: PathBuf, last_check_path: PathBuf) -> Self {
        Self {
            cases_path,
            last_check_path,
        }
    }
}

impl CaseStore for JsonFileStore {
    fn load_cases(&self) -> Result<Vec<Case>> {
        match fs::read_to_string(&self.cases_path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(error) => Err(error.into()),
        }
    }

    fn save_cases(&self, cases: &[Case]) -> Result<()> {
        let raw = serde_json::to_string_pretty(cases)?;
        fs::write(&self.cases_path, raw)?;
        Ok(())
    }

    fn load_last_check(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.last_check_path) {
            Ok(raw) => {
                let doc: LastCheckDoc = serde_json::from_str(&raw)?;
                Ok(doc.last_check)
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn save_last_check(&self, timestamp: &str) -> Result<()> {
        let doc = LastCheckDoc {
            last_check: Some(timestamp.to_string()),
        };
        fs::write(&self.last_check_path, serde_json::to_string(&doc)?)?;
        Ok(())
    }
}

/// In-memory [`CaseStore`] used as the test fake.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cases: Mutex<Vec<Case>>,
    last_check: Mutex<Option<String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with the given cases.
    #[must_use]
    pub fn with_cases(cases: Vec<Case>) -> Self {
        Self {
            cases: Mutex::new(cases),
            last_check: Mutex::new(None),
        }
    }
}

impl CaseStore for MemoryStore {
    fn load_cases(&self) -> Result<Vec<Case>> {
        Ok(self
            .cases
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save_cases(&self, cases: &[Case]) -> Result<()> {
        *self.cases.lock().unwrap_or_else(PoisonError::into_inner) = cases.to_vec();
        Ok(())
    }

    fn load_last_check(&self) -> Result<Option<String>> {
        Ok(self
            .last_check
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save_last_check(&self, timestamp: &str) -> Result<()> {
        *self
            .last_check
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(timestamp.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn case(spisovka: &str, length: usize) -> Case {
        Case {
            spisovka: spisovka.to_string(),
            court_type: "KS".to_string(),
            url: format!("https://example.test/{spisovka}"),
            length,
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> JsonFileStore {
        JsonFileStore::new(
            dir.path().join("cases.json"),
            dir.path().join("last_check.json"),
        )
    }

    #[test]
    fn test_missing_files_read_as_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load_cases().unwrap(), Vec::<Case>::new());
        assert_eq!(store.load_last_check().unwrap(), None);
    }

    #[test]
    fn test_cases_round_trip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let cases = vec![case("3_Co_45_2023", 500), case("1_T_2_2024", 1200)];

        store.save_cases(&cases).unwrap();
        assert_eq!(store.load_cases().unwrap(), cases);
    }

    #[test]
    fn test_cases_file_uses_contract_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save_cases(&[case("3_Co_45_2023", 500)]).unwrap();

        let raw = std::fs::read_to_string(dir.path().join("cases.json")).unwrap();
        assert!(raw.contains("\"typSoudu\""));
        assert!(raw.contains("\"spisovka\""));
    }

    #[test]
    fn test_last_check_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save_last_check("2023-11-02T10:30:00+01:00").unwrap();
        assert_eq!(
            store.load_last_check().unwrap(),
            Some("2023-11-02T10:30:00+01:00".to_string())
        );
    }

    #[test]
    fn test_malformed_cases_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(dir.path().join("cases.json"), "{ not json").unwrap();

        assert!(matches!(
            store.load_cases(),
            Err(crate::Error::Serialization(_))
        ));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        let cases = vec![case("3_Co_45_2023", 500)];

        store.save_cases(&cases).unwrap();
        store.save_last_check("2023-11-02T10:30:00+01:00").unwrap();

        assert_eq!(store.load_cases().unwrap(), cases);
        assert_eq!(
            store.load_last_check().unwrap(),
            Some("2023-11-02T10:30:00+01:00".to_string())
        );
    }
}
