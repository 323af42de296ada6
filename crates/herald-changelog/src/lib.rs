//! Herald Changelog - commit classification and changelog rendering
//!
//! Commits are tokenized with a fixed conventional-commit configuration,
//! classified (type, scope, breaking change, pull requests) and rendered
//! into Markdown grouped by section: breaking changes first, then each known
//! commit type in a fixed order, then everything else.

pub mod classifier;
pub mod formatter;
pub mod generator;
pub mod parser;
pub mod sections;
pub mod types;

pub use classifier::{classify, is_breaking_change, short_sha};
pub use formatter::{format_entry, generate_changelog, ChangelogFormatter, MarkdownFormatter};
pub use generator::{Changelog, ChangelogGenerator};
pub use parser::{CommitParser, ConventionalParser, ParsedMessage, ParserConfig};
pub use sections::{group_commits, Section, SectionKind};
pub use types::{CommitExtra, CommitType, ParsedCommit, COMMIT_TYPES};
