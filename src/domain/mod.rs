//! Domain layer for the RepoScout plugin.
//!
//! Core types independent of Zellij-specific APIs.
//!
//! - [`error`]: Error types and result aliases
//! - [`repository`]: Repository search hit model

pub mod error;
pub mod repository;

pub use error::{RepoScoutError, Result};
pub use repository::RepositoryItem;
