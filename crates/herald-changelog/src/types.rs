//! Changelog types

use herald_git::{PullRequest, RawCommit};
use serde::{Deserialize, Serialize};

/// Footer keyword that marks a breaking change note
pub const BREAKING_CHANGE_KEYWORD: &str = "BREAKING CHANGE";

/// A conventional commit type and the title of its changelog section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CommitType {
    /// Header key (e.g. `feat`)
    pub key: &'static str,
    /// Section title (e.g. `Features`)
    pub title: &'static str,
}

/// Known commit types. The order is the order of sections in a changelog.
pub static COMMIT_TYPES: [CommitType; 11] = [
    CommitType { key: "feat", title: "Features" },
    CommitType { key: "fix", title: "Bug Fixes" },
    CommitType { key: "docs", title: "Documentation" },
    CommitType { key: "style", title: "Styles" },
    CommitType { key: "refactor", title: "Code Refactoring" },
    CommitType { key: "perf", title: "Performance Improvements" },
    CommitType { key: "test", title: "Tests" },
    CommitType { key: "build", title: "Build System" },
    CommitType { key: "ci", title: "Continuous Integration" },
    CommitType { key: "chore", title: "Chores" },
    CommitType { key: "revert", title: "Reverts" },
];

impl CommitType {
    /// Look up a known type by its exact key
    pub fn find(key: &str) -> Option<&'static CommitType> {
        COMMIT_TYPES.iter().find(|t| t.key == key)
    }
}

/// A footer note (e.g. `BREAKING CHANGE: drop v1 endpoints`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Note keyword
    pub title: String,
    /// Note text, continuation lines included
    pub text: String,
}

/// An issue or pull request reference found in a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Closing action (`closes`, `fixes`, ...) when present
    pub action: Option<String>,
    /// Repository owner for cross-repository references
    pub owner: Option<String>,
    /// Repository name for cross-repository references
    pub repository: Option<String>,
    /// Issue number
    pub issue: String,
    /// Matched text
    pub raw: String,
}

/// Fields captured from a `Merge pull request #N from branch` header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeInfo {
    /// Pull request number
    pub id: Option<String>,
    /// Source branch
    pub source: Option<String>,
}

/// Fields captured from a revert message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevertInfo {
    /// Header of the reverted commit
    pub header: Option<String>,
    /// Hash of the reverted commit
    pub hash: Option<String>,
}

/// Host data attached to a parsed commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitExtra {
    /// The commit as reported by the host
    pub commit: RawCommit,
    /// Associated pull requests, in host order
    pub pull_requests: Vec<PullRequest>,
    /// Whether this is a breaking change; decided once at classification
    pub breaking_change: bool,
}

/// A classified commit, the unit the changelog is rendered from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedCommit {
    /// Commit type; absent when the header is not conventional
    #[serde(rename = "type")]
    pub commit_type: Option<String>,
    /// Scope
    pub scope: Option<String>,
    /// Subject (description)
    pub subject: Option<String>,
    /// Header line
    pub header: String,
    /// Body
    pub body: Option<String>,
    /// Footer
    pub footer: Option<String>,
    /// Footer notes
    pub notes: Vec<Note>,
    /// Issue references
    pub references: Vec<Reference>,
    /// `@` mentions
    pub mentions: Vec<String>,
    /// Merge header fields
    pub merge: Option<MergeInfo>,
    /// Revert fields
    pub revert: Option<RevertInfo>,
    /// Host data
    pub extra: CommitExtra,
}

impl ParsedCommit {
    /// The commit type, if it is one of [`COMMIT_TYPES`]
    pub fn known_type(&self) -> Option<&'static CommitType> {
        self.commit_type.as_deref().and_then(CommitType::find)
    }

    /// Whether this commit is a breaking change
    pub fn is_breaking(&self) -> bool {
        self.extra.breaking_change
    }

    /// Text shown for the commit: the subject, or the whole header when the
    /// header was not conventional
    pub fn display_subject(&self) -> &str {
        self.subject.as_deref().unwrap_or(&self.header)
    }
}
