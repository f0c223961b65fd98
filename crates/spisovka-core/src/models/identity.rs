//! Case identity parsed from a tracked URL

use std::collections::HashMap;

use url::Url;

use crate::error::{Error, Result};

/// The identity components of a court case, extracted from the query string of
/// a candidate URL.
///
/// Four of the five components form the composite key (see [`Self::spisovka`]);
/// the court type is carried along for display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseIdentity {
    /// Senate number (`cisloSenatu`)
    pub senate: String,
    /// Case type (`druhVec`)
    pub case_type: String,
    /// Case number (`bcVec`)
    pub case_number: String,
    /// Year (`rocnik`)
    pub year: String,
    /// Court type (`typSoudu`)
    pub court_type: String,
}

impl CaseIdentity {
    /// Parse the identity out of a candidate URL.
    ///
    /// All five query parameters must be present with non-empty values. If a
    /// key repeats, the first value wins. An unparseable URL is treated the
    /// same as one missing its parameters.
    pub fn from_url(raw: &str) -> Result<Self> {
        let parsed = Url::parse(raw).map_err(|_| Error::IncompleteUrl)?;

        let mut params: HashMap<String, String> = HashMap::new();
        for (key, value) in parsed.query_pairs() {
            params
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }

        Ok(Self {
            senate: required(&params, "cisloSenatu")?,
            case_type: required(&params, "druhVec")?,
            case_number: required(&params, "bcVec")?,
            year: required(&params, "rocnik")?,
            court_type: required(&params, "typSoudu")?,
        })
    }

    /// The composite key: senate, case type, case number, and year joined with
    /// underscores, in that order.
    #[must_use]
    pub fn spisovka(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.senate, self.case_type, self.case_number, self.year
        )
    }
}

fn required(params: &HashMap<String, String>, key: &str) -> Result<String> {
    params
        .get(key)
        .filter(|value| !value.is_empty())
        .cloned()
        .ok_or(Error::IncompleteUrl)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const REQUIRED_KEYS: [&str; 5] = ["cisloSenatu", "druhVec", "bcVec", "rocnik", "typSoudu"];

    const COMPLETE: &str =
        "https://infosoud.justice.cz/InfoSoud/public/search.do?cisloSenatu=3&druhVec=Co&bcVec=45&rocnik=2023&typSoudu=KS";

    #[test]
    fn test_parse_complete_url() {
        let identity = CaseIdentity::from_url(COMPLETE).unwrap();
        assert_eq!(
            identity,
            CaseIdentity {
                senate: "3".to_string(),
                case_type: "Co".to_string(),
                case_number: "45".to_string(),
                year: "2023".to_string(),
                court_type: "KS".to_string(),
            }
        );
    }

    #[test]
    fn test_spisovka_join_order() {
        let identity = CaseIdentity::from_url(COMPLETE).unwrap();
        assert_eq!(identity.spisovka(), "3_Co_45_2023");
    }

    #[test]
    fn test_each_missing_key_is_rejected() {
        for missing in REQUIRED_KEYS {
            let query: Vec<String> = REQUIRED_KEYS
                .iter()
                .filter(|key| **key != missing)
                .map(|key| format!("{key}=x"))
                .collect();
            let url = format!("https://example.test/search?{}", query.join("&"));
            let err = CaseIdentity::from_url(&url).unwrap_err();
            assert!(
                matches!(err, Error::IncompleteUrl),
                "missing {missing} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_value_is_rejected() {
        let url =
            "https://example.test/search?cisloSenatu=&druhVec=Co&bcVec=45&rocnik=2023&typSoudu=KS";
        assert!(matches!(
            CaseIdentity::from_url(url),
            Err(Error::IncompleteUrl)
        ));
    }

    #[test]
    fn test_repeated_key_first_value_wins() {
        let url = format!("{COMPLETE}&cisloSenatu=99");
        let identity = CaseIdentity::from_url(&url).unwrap();
        assert_eq!(identity.senate, "3");
    }

    #[test]
    fn test_unparseable_url_is_incomplete() {
        assert!(matches!(
            CaseIdentity::from_url("not a url at all"),
            Err(Error::IncompleteUrl)
        ));
    }

    #[test]
    fn test_no_query_is_incomplete() {
        assert!(matches!(
            CaseIdentity::from_url("https://example.test/search"),
            Err(Error::IncompleteUrl)
        ));
    }
}
