//! spisovka-core - Core library for spisovka-watch
//!
//! This crate contains the shared models, persistence layer, and check logic
//! used by the HTTP API. A "spisovka" is a Czech court case-file identifier,
//! derived here from the query parameters of a tracked infoSoud URL.

pub mod clock;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod service;
pub mod store;

pub use error::{Error, Result};
pub use models::{Case, CaseIdentity, CheckReport};
pub use service::CaseService;
