//! Changelog formatters

mod markdown;

pub use markdown::{format_entry, generate_changelog, MarkdownFormatter, UNKNOWN_AUTHOR};

use crate::types::ParsedCommit;

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Render classified commits into a changelog document
    fn format(&self, commits: &[ParsedCommit]) -> String;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;
}
