//! Domain models

mod case;
mod identity;

pub use case::{Case, CheckReport};
pub use identity::CaseIdentity;
