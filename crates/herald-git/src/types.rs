//! Commit source types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person attached to a commit, as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitIdentity {
    /// Display name
    pub name: String,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Account handle on the hosting service, when known
    #[serde(default, alias = "login")]
    pub username: Option<String>,
}

impl CommitIdentity {
    /// Create a new identity without an account handle
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            username: None,
        }
    }
}

/// A commit as reported by the source-control host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCommit {
    /// Full commit hash
    pub sha: String,
    /// Full commit message (header, body and footer)
    pub message: String,
    /// Author, absent when the host could not attribute the commit
    #[serde(default)]
    pub author: Option<CommitIdentity>,
    /// Committer
    #[serde(default)]
    pub committer: Option<CommitIdentity>,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
    /// Web URL of the commit
    pub url: String,
}

impl RawCommit {
    /// Create a new RawCommit
    pub fn new(
        sha: impl Into<String>,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            sha: sha.into(),
            message: message.into(),
            author: None,
            committer: None,
            timestamp,
            url: url.into(),
        }
    }

    /// Set the author
    pub fn with_author(mut self, author: CommitIdentity) -> Self {
        self.author = Some(author);
        self
    }

    /// Set the committer
    pub fn with_committer(mut self, committer: CommitIdentity) -> Self {
        self.committer = Some(committer);
        self
    }

    /// First line of the message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}

/// A pull request associated with a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Pull request number
    pub number: u64,
    /// Web URL of the pull request
    #[serde(alias = "html_url")]
    pub url: String,
}

impl PullRequest {
    /// Create a new PullRequest
    pub fn new(number: u64, url: impl Into<String>) -> Self {
        Self {
            number,
            url: url.into(),
        }
    }
}

/// A commit together with the pull requests it came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcedCommit {
    /// The commit
    pub commit: RawCommit,
    /// Associated pull requests, in host order
    #[serde(default, alias = "pullRequests")]
    pub pull_requests: Vec<PullRequest>,
}

impl SourcedCommit {
    /// Wrap a commit without pull requests
    pub fn new(commit: RawCommit) -> Self {
        Self {
            commit,
            pull_requests: Vec::new(),
        }
    }

    /// Set the associated pull requests
    pub fn with_pull_requests(mut self, pull_requests: Vec<PullRequest>) -> Self {
        self.pull_requests = pull_requests;
        self
    }
}

/// The commits between two release points: `from` (exclusive) to `to`
/// (inclusive). Without `from` the whole history up to `to` is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRange {
    /// Previous release point
    pub from: Option<String>,
    /// Current release point
    pub to: String,
}

impl CommitRange {
    /// Create a range ending at `to`
    pub fn new(from: Option<String>, to: impl Into<String>) -> Self {
        Self {
            from,
            to: to.into(),
        }
    }
}

impl std::fmt::Display for CommitRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.from {
            Some(from) => write!(f, "{}..{}", from, self.to),
            None => write!(f, "{}", self.to),
        }
    }
}

/// Information about a git tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name
    pub name: String,
    /// Commit hash the tag points to
    pub commit_hash: String,
    /// Extracted version from tag name
    pub version: Option<String>,
}

impl TagInfo {
    /// Create a new TagInfo
    pub fn new(name: impl Into<String>, commit_hash: impl Into<String>) -> Self {
        let name = name.into();
        let version = extract_version(&name);

        Self {
            name,
            commit_hash: commit_hash.into(),
            version,
        }
    }
}

/// Extract version from a tag name
fn extract_version(tag: &str) -> Option<String> {
    // v1.0.0, 1.0.0, package@1.0.0, package-v1.0.0
    let tag = tag.strip_prefix('v').unwrap_or(tag);

    if let Some(pos) = tag.rfind('@') {
        let version_part = &tag[pos + 1..];
        let version = version_part.strip_prefix('v').unwrap_or(version_part);
        if looks_like_version(version) {
            return Some(version.to_string());
        }
    }

    if let Some(pos) = tag.rfind("-v") {
        let version = &tag[pos + 2..];
        if looks_like_version(version) {
            return Some(version.to_string());
        }
    }

    if looks_like_version(tag) {
        return Some(tag.to_string());
    }

    None
}

fn looks_like_version(s: &str) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    if parts.len() < 2 {
        return false;
    }

    parts[0].parse::<u64>().is_ok()
}
