use crate::error::{ConfigError, Error, Result};
use crate::report::{Filter, SortMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Run configuration. Loaded from an optional TOML file, then overridden
/// by command-line flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Canonical AUTHORS file; `None` starts from an empty roster
    #[serde(default)]
    pub read_authors: Option<PathBuf>,
    /// File of commit hashes to ignore
    #[serde(default)]
    pub exclude_commits: Option<PathBuf>,
    #[serde(default = "default_exclude_pattern")]
    pub exclude_pattern: String,
    /// Skip the name filter entirely
    #[serde(default)]
    pub no_exclude_pattern: bool,
    #[serde(default = "default_min_commits")]
    pub min_commits: usize,
    #[serde(default)]
    pub sort: SortMode,
    /// Count commits from the exclusion list anyway; they are still
    /// left out of identity discovery
    #[serde(default)]
    pub count_excluded_commits: bool,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_repo")]
    pub repo: PathBuf,
    #[serde(default)]
    pub backend: Backend,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// Read history in-process through libgit2
    #[default]
    Git2,
    /// Run the `git` executable
    GitCli,
}

fn default_exclude_pattern() -> String {
    "[bot]".to_string()
}

fn default_min_commits() -> usize {
    1
}

fn default_repo() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            read_authors: None,
            exclude_commits: None,
            exclude_pattern: default_exclude_pattern(),
            no_exclude_pattern: false,
            min_commits: default_min_commits(),
            sort: SortMode::default(),
            count_excluded_commits: false,
            history: HistoryConfig::default(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            repo: default_repo(),
            backend: Backend::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| Error::file_read(path, e))?;
        toml::from_str(&contents).map_err(|e| {
            Error::Config(ConfigError::ParseFailed {
                path: path.display().to_string(),
                source: e.to_string(),
            })
        })
    }

    /// Roster path, treating an empty path as "no roster"
    pub fn roster_path(&self) -> Option<&Path> {
        self.read_authors
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    pub fn exclusion_path(&self) -> Option<&Path> {
        self.exclude_commits
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    pub fn filter(&self) -> Filter {
        Filter {
            min_commits: self.min_commits,
            exclude_pattern: (!self.no_exclude_pattern).then(|| self.exclude_pattern.clone()),
        }
    }
}
