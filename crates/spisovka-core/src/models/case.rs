//! Case model

use serde::{Deserialize, Serialize};

use crate::models::CaseIdentity;

/// A tracked court-case page.
///
/// The serialized field names (`spisovka`, `typSoudu`, `url`, `length`) are the
/// persisted-file and API contract and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    /// Composite identity `{senate}_{caseType}_{caseNumber}_{year}`; primary key
    pub spisovka: String,
    /// Court type (descriptive, not part of the identity)
    #[serde(rename = "typSoudu")]
    pub court_type: String,
    /// The tracked URL, used for all future fetches
    pub url: String,
    /// Most recently observed response-body character count
    pub length: usize,
}

impl Case {
    /// Create a case from a parsed identity, the original URL, and the initial
    /// observed page length.
    #[must_use]
    pub fn new(identity: CaseIdentity, url: impl Into<String>, length: usize) -> Self {
        Self {
            spisovka: identity.spisovka(),
            court_type: identity.court_type,
            url: url.into(),
            length,
        }
    }
}

/// The outcome of re-checking one case during a check-all pass.
///
/// Not persisted; returned to the caller so it can see which cases changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub spisovka: String,
    pub old_length: usize,
    pub new_length: usize,
    pub changed: bool,
}
