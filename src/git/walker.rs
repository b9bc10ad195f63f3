//! libgit2-backed history reader
//!
//! Walks every commit reachable from HEAD by commit date, newest first, and
//! extracts the author identity. Author names and emails are read as raw
//! bytes and decoded lossily so a badly encoded signature never aborts the
//! walk.

use super::{AuthoredCommit, CommitRecord, HistorySource};
use crate::error::{Error, GitError, Result};
use git2::{ErrorCode, Repository, Revwalk, Sort};
use std::path::{Path, PathBuf};
use tracing::debug;

/// History source reading a repository through libgit2
#[derive(Debug, Clone)]
pub struct GitRepository {
    path: PathBuf,
}

impl GitRepository {
    /// Use the repository at `path` (or any of its subdirectories)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn open(&self) -> Result<Repository> {
        let repo = Repository::discover(&self.path).map_err(|e| {
            Error::Git(GitError::RepositoryNotFound {
                path: self.path.display().to_string(),
                source: e.message().to_string(),
            })
        })?;
        debug!("Opened git repository at {}", repo.path().display());
        Ok(repo)
    }
}

impl HistorySource for GitRepository {
    fn commits(&self) -> Result<Vec<CommitRecord>> {
        walk_commits(&self.path, &self.open()?)
    }

    fn author_emails(&self) -> Result<Vec<AuthoredCommit>> {
        let commits = self.commits()?;
        Ok(commits
            .into_iter()
            .map(|c| AuthoredCommit {
                hash: c.hash,
                email: c.email,
            })
            .collect())
    }

    fn name(&self) -> &str {
        "git2"
    }
}

/// Walk repository commits from HEAD and extract author identities
fn walk_commits(path: &Path, repo: &Repository) -> Result<Vec<CommitRecord>> {
    let Some(revwalk) = setup_revwalk(repo)? else {
        debug!("Repository at {} has no commits", path.display());
        return Ok(Vec::new());
    };

    let mut commits = Vec::new();
    for oid_result in revwalk {
        let oid = oid_result.map_err(|e| Error::git("revwalk", e))?;
        let commit = repo
            .find_commit(oid)
            .map_err(|e| Error::git(format!("find commit {}", oid), e))?;

        let author = commit.author();
        commits.push(CommitRecord {
            hash: oid.to_string(),
            email: String::from_utf8_lossy(author.email_bytes()).into_owned(),
            name: String::from_utf8_lossy(author.name_bytes()).into_owned(),
        });
    }

    debug!("Walked {} commits", commits.len());
    Ok(commits)
}

/// Set up a newest-first revision walker starting at HEAD.
///
/// Commits come out by commit date alone, the same order as a plain
/// `git log`. Returns `None` for a repository whose HEAD is unborn.
fn setup_revwalk(repo: &Repository) -> Result<Option<Revwalk<'_>>> {
    match repo.head() {
        Ok(_) => {}
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(Error::git("resolve HEAD", e)),
    }

    let mut revwalk = repo
        .revwalk()
        .map_err(|e| Error::git("create revision walker", e))?;
    revwalk
        .set_sorting(Sort::TIME)
        .map_err(|e| Error::git("set revwalk sorting", e))?;
    revwalk
        .push_head()
        .map_err(|e| Error::git("push HEAD to revwalk", e))?;

    Ok(Some(revwalk))
}
