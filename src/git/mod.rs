//! Commit history sources
//!
//! Two backends provide the same records:
//! - `walker::GitRepository` reads history through libgit2
//! - `command::GitCommand` runs `git log` and parses its text output

pub mod command;
pub mod walker;

use crate::error::Result;
use crate::exclusion::ExclusionSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use command::GitCommand;
pub use walker::GitRepository;

/// Author identity of a single commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Full SHA hash
    pub hash: String,
    /// Author email
    pub email: String,
    /// Author name (may be empty)
    pub name: String,
}

/// Author email of a single commit, for counting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthoredCommit {
    pub hash: String,
    pub email: String,
}

/// An (email, name) pair discovered in history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub name: String,
}

impl Identity {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}

/// Common trait for commit history backends
pub trait HistorySource {
    /// Every commit reachable from HEAD, newest first
    fn commits(&self) -> Result<Vec<CommitRecord>>;

    /// Author email of every commit reachable from HEAD, newest first
    fn author_emails(&self) -> Result<Vec<AuthoredCommit>>;

    /// Get the backend name (e.g., "git2", "git-cli")
    fn name(&self) -> &str;
}

/// Distinct emails in discovery order, skipping excluded commits.
///
/// When the same email shows up under several names, the first non-empty
/// one seen wins. The email keeps the position of its first commit.
pub fn discover_identities(records: &[CommitRecord], exclude: &ExclusionSet) -> Vec<Identity> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut identities: Vec<Identity> = Vec::new();

    for record in records {
        if exclude.contains(&record.hash) {
            continue;
        }
        match seen.get(record.email.as_str()) {
            Some(&idx) => {
                if identities[idx].name.is_empty() {
                    identities[idx].name = record.name.clone();
                }
            }
            None => {
                seen.insert(record.email.as_str(), identities.len());
                identities.push(Identity::new(&record.email, &record.name));
            }
        }
    }

    identities
}
