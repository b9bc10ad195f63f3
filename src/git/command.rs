//! `git log` subprocess history reader
//!
//! Runs the `git` executable in the repository directory and parses its
//! line-oriented output. Records that don't split into the expected number
//! of fields are skipped.

use super::{AuthoredCommit, CommitRecord, HistorySource};
use crate::error::{Error, Result};
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, trace};

const IDENTITY_FORMAT: &str = "--format=%H %ae %an";
const EMAIL_FORMAT: &str = "--format=%H %ae";

/// History source shelling out to `git log`
#[derive(Debug, Clone)]
pub struct GitCommand {
    repo_path: PathBuf,
    git_binary: String,
}

impl GitCommand {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
            git_binary: "git".to_string(),
        }
    }

    /// Use a specific git executable instead of the one on PATH
    pub fn with_binary(mut self, git_binary: impl Into<String>) -> Self {
        self.git_binary = git_binary.into();
        self
    }

    /// Run `git log` with the given format and return stdout
    fn log(&self, format: &str) -> Result<String> {
        let operation = format!("git log {}", format);
        debug!("Running {} in {}", operation, self.repo_path.display());

        let output = Command::new(&self.git_binary)
            .arg("log")
            .arg(format)
            .current_dir(&self.repo_path)
            .output()
            .map_err(|e| Error::git(&operation, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::git(
                &operation,
                format!("{}: {}", output.status, stderr.trim()),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl HistorySource for GitCommand {
    fn commits(&self) -> Result<Vec<CommitRecord>> {
        Ok(parse_identity_log(&self.log(IDENTITY_FORMAT)?))
    }

    fn author_emails(&self) -> Result<Vec<AuthoredCommit>> {
        Ok(parse_email_log(&self.log(EMAIL_FORMAT)?))
    }

    fn name(&self) -> &str {
        "git-cli"
    }
}

/// Parse `<hash> <email> <name>` lines. The name is the remainder of the
/// line and may contain spaces or be empty.
pub fn parse_identity_log(output: &str) -> Vec<CommitRecord> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.splitn(3, ' ');
            match (fields.next(), fields.next(), fields.next()) {
                (Some(hash), Some(email), Some(name)) => Some(CommitRecord {
                    hash: hash.to_string(),
                    email: email.to_string(),
                    name: name.to_string(),
                }),
                _ => {
                    trace!("Skipping malformed log record: {:?}", line);
                    None
                }
            }
        })
        .collect()
}

/// Parse `<hash> <email>` lines
pub fn parse_email_log(output: &str) -> Vec<AuthoredCommit> {
    output
        .lines()
        .filter_map(|line| match line.split_once(' ') {
            Some((hash, email)) => Some(AuthoredCommit {
                hash: hash.to_string(),
                email: email.to_string(),
            }),
            None => {
                trace!("Skipping malformed log record: {:?}", line);
                None
            }
        })
        .collect()
}
