//! Commit ids to leave out of reconciliation and counting.

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    hashes: HashSet<String>,
}

impl ExclusionSet {
    /// Parse newline-separated commit hashes, ignoring surrounding whitespace
    /// and blank lines
    pub fn parse(text: &str) -> Self {
        text.lines().collect()
    }

    /// Load from a file of newline-separated commit hashes
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::file_read(path, e))?;
        Ok(Self::parse(&text))
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.hashes.contains(hash)
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let hashes = iter
            .into_iter()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string)
            .collect();
        Self { hashes }
    }
}
