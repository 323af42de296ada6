//! Section membership and ordering
//!
//! Every section is a predicate over a single commit. Sections are not a
//! partition: a breaking commit belongs to "Breaking Changes" and to the
//! section of its type.

use serde::Serialize;

use crate::types::{CommitType, ParsedCommit, COMMIT_TYPES};

/// Title of the breaking changes section
pub const BREAKING_CHANGES_TITLE: &str = "Breaking Changes";

/// Title of the catch-all section for unknown types
pub const OTHER_COMMITS_TITLE: &str = "Commits";

/// Kinds of changelog sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Commits flagged as breaking changes
    BreakingChanges,
    /// Commits of one known type
    Type(&'static CommitType),
    /// Commits whose type is unknown or absent
    Other,
}

impl SectionKind {
    /// All section kinds, in document order
    pub fn ordered() -> Vec<SectionKind> {
        std::iter::once(SectionKind::BreakingChanges)
            .chain(COMMIT_TYPES.iter().map(SectionKind::Type))
            .chain(std::iter::once(SectionKind::Other))
            .collect()
    }

    /// Section title
    pub fn title(&self) -> &'static str {
        match self {
            Self::BreakingChanges => BREAKING_CHANGES_TITLE,
            Self::Type(commit_type) => commit_type.title,
            Self::Other => OTHER_COMMITS_TITLE,
        }
    }

    /// Whether a commit belongs to this section
    pub fn contains(&self, commit: &ParsedCommit) -> bool {
        match self {
            Self::BreakingChanges => commit.extra.breaking_change,
            Self::Type(commit_type) => commit.commit_type.as_deref() == Some(commit_type.key),
            Self::Other => commit.known_type().is_none(),
        }
    }
}

/// A changelog section with the commits that belong to it, in input order
#[derive(Debug, Clone, Serialize)]
pub struct Section<'a> {
    /// Section kind
    pub kind: SectionKind,
    /// Section title
    pub title: &'static str,
    /// Member commits
    pub commits: Vec<&'a ParsedCommit>,
}

impl Section<'_> {
    /// Check if section is empty
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// Group commits into the non-empty sections of a changelog, in document
/// order. Commits keep the order they were given in.
pub fn group_commits(commits: &[ParsedCommit]) -> Vec<Section<'_>> {
    SectionKind::ordered()
        .into_iter()
        .map(|kind| Section {
            kind,
            title: kind.title(),
            commits: commits.iter().filter(|c| kind.contains(c)).collect(),
        })
        .filter(|section| !section.is_empty())
        .collect()
}
