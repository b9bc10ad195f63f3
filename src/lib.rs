pub mod commands;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod git;
pub mod reconcile;
pub mod report;
pub mod roster;
pub mod stats;

pub use config::Config;
pub use error::{Error, Result};
pub use roster::Contributor;
