//! Commit history operations

use chrono::{TimeZone, Utc};
use git2::Sort;
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::{CommitIdentity, CommitRange, RawCommit};

impl GitRepo {
    /// Get the commits reachable from `range.to` but not from `range.from`,
    /// newest first.
    ///
    /// Commit URLs are built as `<web_url>/commit/<sha>`; without a web URL
    /// the full hash stands in for the link target.
    #[instrument(skip(self), fields(range = %range))]
    pub fn commits_between(
        &self,
        range: &CommitRange,
        web_url: Option<&str>,
    ) -> Result<Vec<RawCommit>> {
        let to = self.resolve_commit(&range.to)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(to)?;

        if let Some(from) = &range.from {
            revwalk.hide(self.resolve_commit(from)?)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            commits.push(commit_to_raw(&commit, web_url));
        }

        debug!(count = commits.len(), "collected commits");
        Ok(commits)
    }
}

/// Convert a git2 Commit to RawCommit
fn commit_to_raw(commit: &git2::Commit<'_>, web_url: Option<&str>) -> RawCommit {
    let sha = commit.id().to_string();
    let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();

    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    let url = match web_url {
        Some(base) => format!("{}/commit/{}", base.trim_end_matches('/'), sha),
        None => sha.clone(),
    };

    let mut raw = RawCommit::new(sha, message, timestamp, url);
    if let Some(author) = identity(&commit.author()) {
        raw = raw.with_author(author);
    }
    if let Some(committer) = identity(&commit.committer()) {
        raw = raw.with_committer(committer);
    }
    raw
}

fn identity(signature: &git2::Signature<'_>) -> Option<CommitIdentity> {
    let name = signature.name()?.trim();
    if name.is_empty() {
        return None;
    }
    Some(CommitIdentity::new(name, signature.email().unwrap_or_default()))
}
