//! Markdown changelog formatter

use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::sections::{group_commits, Section};
use crate::types::ParsedCommit;

/// Author shown when the host did not attribute the commit
pub const UNKNOWN_AUTHOR: &str = "<unknown author>";

/// Render one commit as a Markdown list line:
///
/// `- **scope**: subject [#1](url1),[#2](url2) ([author](commit-url))`
///
/// The scope and pull request parts are left out when absent.
pub fn format_entry(commit: &ParsedCommit) -> String {
    let pull_requests = commit
        .extra
        .pull_requests
        .iter()
        .map(|pr| format!("[#{}]({})", pr.number, pr.url))
        .collect::<Vec<_>>()
        .join(",");

    let raw = &commit.extra.commit;
    let author = raw
        .author
        .as_ref()
        .map(|a| a.name.as_str())
        .unwrap_or(UNKNOWN_AUTHOR);

    let mut entry = String::from("- ");
    if let Some(scope) = &commit.scope {
        entry.push_str(&format!("**{}**: ", scope));
    }
    entry.push_str(commit.display_subject());
    if !pull_requests.is_empty() {
        entry.push(' ');
        entry.push_str(&pull_requests);
    }
    entry.push_str(&format!(" ([{}]({}))", author, raw.url));
    entry
}

fn format_section(section: &Section<'_>) -> String {
    let body = section
        .commits
        .iter()
        .map(|commit| format_entry(commit))
        .collect::<Vec<_>>()
        .join("\n");

    format!("## {}\n\n{}", section.title, body.trim())
}

/// Render classified commits into a Markdown changelog.
///
/// Sections come in a fixed order (Breaking Changes, each known type,
/// Commits) and only when non-empty; they are separated by a blank line.
/// Empty input renders as an empty string.
#[instrument(skip(commits), fields(commit_count = commits.len()))]
pub fn generate_changelog(commits: &[ParsedCommit]) -> String {
    let sections = group_commits(commits);

    let output = sections
        .iter()
        .map(format_section)
        .collect::<Vec<_>>()
        .join("\n\n")
        .trim()
        .to_string();

    debug!(
        section_count = sections.len(),
        output_len = output.len(),
        "markdown changelog formatted"
    );
    output
}

/// Markdown changelog formatter
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    fn format(&self, commits: &[ParsedCommit]) -> String {
        generate_changelog(commits)
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}
