//! Error types for git-authors
//!
//! Every failure here aborts the run; the binary reports it through anyhow
//! and exits non-zero:
//! - File I/O (roster and exclusion files)
//! - Git operations (repository access, history walking, `git log` invocation)
//! - Configuration (TOML parsing)
//!
//! Malformed history records are not errors; the readers skip them.

use std::fmt;
use std::io;

/// Result type alias for git-authors operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for git-authors
#[derive(Debug)]
pub enum Error {
    /// Git operation errors
    Git(GitError),
    /// I/O errors
    Io(IoError),
    /// Configuration errors
    Config(ConfigError),
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
    /// Directory is not inside a git repository
    RepositoryNotFound { path: String, source: String },
    /// Underlying git2 call or `git` subprocess failed
    GitCommandFailed { operation: String, source: String },
}

/// File I/O errors
#[derive(Debug)]
pub enum IoError {
    /// Failed to read file
    FileReadFailed { path: String, source: io::Error },
}

/// Configuration file errors
#[derive(Debug)]
pub enum ConfigError {
    /// Config file is not valid TOML or has wrong field types
    ParseFailed { path: String, source: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Git(e) => write!(f, "Git error: {}", e),
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Config(e) => write!(f, "Config error: {}", e),
        }
    }
}

impl fmt::Display for GitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitError::RepositoryNotFound { path, source } => {
                write!(f, "Not a git repository: {}: {}", path, source)
            }
            GitError::GitCommandFailed { operation, source } => {
                write!(f, "Git operation '{}' failed: {}", operation, source)
            }
        }
    }
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoError::FileReadFailed { path, source } => {
                write!(f, "Failed to read {}: {}", path, source)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseFailed { path, source } => {
                write!(f, "Failed to parse config {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(IoError::FileReadFailed { source, .. }) => Some(source),
            _ => None,
        }
    }
}

impl std::error::Error for GitError {}
impl std::error::Error for IoError {}
impl std::error::Error for ConfigError {}

impl Error {
    /// Wrap a read failure with the offending path
    pub fn file_read(path: &std::path::Path, source: io::Error) -> Self {
        Error::Io(IoError::FileReadFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// Wrap a failed git2 call or subprocess with the operation name
    pub fn git(operation: impl Into<String>, source: impl fmt::Display) -> Self {
        Error::Git(GitError::GitCommandFailed {
            operation: operation.into(),
            source: source.to_string(),
        })
    }
}
