//! Commit sources
//!
//! A [`CommitSource`] answers one question: which commits, with which pull
//! requests, make up a release range. Everything downstream works on the
//! returned records and never calls back into the source.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use herald_core::error::SourceError;
use herald_core::Result;

use crate::pulls::associated_pull_requests;
use crate::repository::GitRepo;
use crate::types::{CommitRange, SourcedCommit};

/// Trait for commit providers
pub trait CommitSource {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Commits in the range, newest first, with their pull requests
    fn commits(&self, range: &CommitRange) -> Result<Vec<SourcedCommit>>;
}

/// Reads commits from a local repository
pub struct GitCommitSource<'a> {
    repo: &'a GitRepo,
    web_url: Option<String>,
}

impl<'a> GitCommitSource<'a> {
    /// Create a source over a repository. Commit and pull request links are
    /// only produced when a web URL is given.
    pub fn new(repo: &'a GitRepo, web_url: Option<String>) -> Self {
        Self { repo, web_url }
    }
}

impl CommitSource for GitCommitSource<'_> {
    fn name(&self) -> &'static str {
        "git"
    }

    #[instrument(skip(self), fields(range = %range))]
    fn commits(&self, range: &CommitRange) -> Result<Vec<SourcedCommit>> {
        let commits = self.repo.commits_between(range, self.web_url.as_deref())?;

        let sourced: Vec<SourcedCommit> = commits
            .into_iter()
            .map(|commit| {
                let pull_requests = self
                    .web_url
                    .as_deref()
                    .map(|url| associated_pull_requests(&commit.message, url))
                    .unwrap_or_default();
                SourcedCommit::new(commit).with_pull_requests(pull_requests)
            })
            .collect();

        info!(
            count = sourced.len(),
            with_pull_requests = sourced.iter().filter(|c| !c.pull_requests.is_empty()).count(),
            "read commits from repository"
        );
        Ok(sourced)
    }
}

/// Reads commits exported from the hosting service as a JSON array of
/// `{ "commit": {...}, "pull_requests": [...] }` records.
///
/// The export already covers the requested range; the range is only logged.
pub struct JsonCommitSource {
    path: PathBuf,
}

impl JsonCommitSource {
    /// Create a source reading from `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CommitSource for JsonCommitSource {
    fn name(&self) -> &'static str {
        "json"
    }

    #[instrument(skip(self), fields(path = %self.path.display(), range = %range))]
    fn commits(&self, range: &CommitRange) -> Result<Vec<SourcedCommit>> {
        if !self.path.exists() {
            return Err(SourceError::InputNotFound(self.path.clone()).into());
        }

        let content = std::fs::read_to_string(&self.path).map_err(SourceError::Io)?;
        let commits: Vec<SourcedCommit> =
            serde_json::from_str(&content).map_err(|e| SourceError::InvalidInput {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        debug!(count = commits.len(), "read commits from export");
        Ok(commits)
    }
}
