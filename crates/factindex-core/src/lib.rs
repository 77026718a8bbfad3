// Public fallible APIs in this crate share one concrete error contract (`FactIndexError`).
// Repeating per-function `# Errors` boilerplate obscures behavior more than it clarifies.
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod backend;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod facets;
pub mod models;
pub mod overlay;
pub mod pager;
pub mod recommend;
pub mod routing;
pub mod session;
pub mod suggest;

pub use client::{FactIndex, SearchOutcome};
pub use config::AppConfig;
pub use error::{FactIndexError, Result};
pub use facets::{TagCoordinator, TagGroups};
pub use models::{FactRecord, RefinementAttribute, RefinementState, RouteState};
pub use overlay::DeepLinkResolver;
pub use pager::InfinitePager;
pub use session::{SessionContext, create_session};
