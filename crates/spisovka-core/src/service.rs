//! Case service
//!
//! Orchestrates the identity parser, fetcher, store, and clock. All store
//! access is whole-document read-modify-write; the store itself provides no
//! cross-request serialization (single-operator scope).

use std::sync::Arc;

use tracing::info;

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::fetcher::PageFetcher;
use crate::models::{Case, CaseIdentity, CheckReport};
use crate::store::CaseStore;

/// The four tracked-case operations plus the last-check readout.
pub struct CaseService {
    store: Arc<dyn CaseStore>,
    fetcher: Arc<dyn PageFetcher>,
    clock: Arc<dyn Clock>,
}

impl CaseService {
    #[must_use]
    pub fn new(
        store: Arc<dyn CaseStore>,
        fetcher: Arc<dyn PageFetcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            fetcher,
            clock,
        }
    }

    /// All tracked cases, in storage order.
    pub fn list(&self) -> Result<Vec<Case>> {
        self.store.load_cases()
    }

    /// When the last check-all pass completed, or `None` if it never has.
    pub fn last_check(&self) -> Result<Option<String>> {
        self.store.load_last_check()
    }

    /// Start tracking the case identified by `url`.
    ///
    /// The initial page length is fetched before the duplicate check, so a
    /// duplicate add costs one fetch but never mutates the store.
    pub async fn add(&self, url: &str) -> Result<Case> {
        let identity = CaseIdentity::from_url(url)?;
        let spisovka = identity.spisovka();

        let length = self.fetcher.fetch_length(url).await?;

        let mut cases = self.store.load_cases()?;
        if cases.iter().any(|case| case.spisovka == spisovka) {
            return Err(Error::AlreadyTracked(spisovka));
        }

        let case = Case::new(identity, url, length);
        cases.push(case.clone());
        self.store.save_cases(&cases)?;

        info!(spisovka = %case.spisovka, length = case.length, "Tracking new case");
        Ok(case)
    }

    /// Stop tracking the case with the given spisovka.
    pub fn delete(&self, spisovka: &str) -> Result<()> {
        let cases = self.store.load_cases()?;
        let remaining: Vec<Case> = cases
            .iter()
            .filter(|case| case.spisovka != spisovka)
            .cloned()
            .collect();

        if remaining.len() == cases.len() {
            return Err(Error::NotFound(spisovka.to_string()));
        }

        self.store.save_cases(&remaining)?;
        info!(spisovka, "Stopped tracking case");
        Ok(())
    }

    /// Re-fetch every tracked page in storage order and report which changed.
    ///
    /// Fetches run strictly one after another. A single failed fetch aborts
    /// the whole pass; the updated list and the last-check timestamp are only
    /// written once every case has been re-fetched.
    pub async fn check_all(&self) -> Result<Vec<CheckReport>> {
        let mut cases = self.store.load_cases()?;
        let mut reports = Vec::with_capacity(cases.len());

        for case in &mut cases {
            let new_length = self.fetcher.fetch_length(&case.url).await?;
            reports.push(CheckReport {
                spisovka: case.spisovka.clone(),
                old_length: case.length,
                new_length,
                changed: new_length != case.length,
            });
            case.length = new_length;
        }

        self.store.save_cases(&cases)?;
        self.store
            .save_last_check(&self.clock.now().to_rfc3339())?;

        let changed = reports.iter().filter(|report| report.changed).count();
        info!(cases = reports.len(), changed, "Check-all pass completed");
        Ok(reports)
    }
}
