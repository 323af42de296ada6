//! Changelog generation

use herald_core::config::ChangelogConfig;
use herald_git::SourcedCommit;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::classifier::classify;
use crate::formatter::{ChangelogFormatter, MarkdownFormatter};
use crate::parser::{CommitParser, ConventionalParser};
use crate::sections::{group_commits, Section};
use crate::types::ParsedCommit;

/// Classified commits of one release, ready to render
#[derive(Debug, Clone, Default, Serialize)]
pub struct Changelog {
    /// Commits, in the order they were sourced
    pub commits: Vec<ParsedCommit>,
}

impl Changelog {
    /// Non-empty sections in document order
    pub fn sections(&self) -> Vec<Section<'_>> {
        group_commits(&self.commits)
    }

    /// Number of breaking commits
    pub fn breaking_count(&self) -> usize {
        self.commits.iter().filter(|c| c.is_breaking()).count()
    }

    /// Check if there is anything to render
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// Changelog generator
pub struct ChangelogGenerator {
    parser: Box<dyn CommitParser>,
    formatter: Box<dyn ChangelogFormatter>,
    config: ChangelogConfig,
}

impl ChangelogGenerator {
    /// Create a new generator with default parser and formatter
    pub fn new(config: ChangelogConfig) -> Self {
        Self {
            parser: Box::new(ConventionalParser::new()),
            formatter: Box::new(MarkdownFormatter::new()),
            config,
        }
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Use a custom formatter
    pub fn with_formatter<F: ChangelogFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Check if a classified commit should be included in the changelog
    fn should_include(&self, commit: &ParsedCommit) -> bool {
        match commit.commit_type.as_deref() {
            Some(commit_type) => !self.config.is_excluded(commit_type),
            None => self.config.include_invalid,
        }
    }

    /// Classify sourced commits, dropping excluded types and, if configured,
    /// commits that do not follow the convention
    #[instrument(skip(self, commits), fields(commit_count = commits.len()))]
    pub fn generate(&self, commits: Vec<SourcedCommit>) -> Changelog {
        info!(commit_count = commits.len(), "generating changelog");
        let total = commits.len();

        let commits: Vec<ParsedCommit> = commits
            .into_iter()
            .map(|c| classify(self.parser.as_ref(), c))
            .filter(|c| self.should_include(c))
            .collect();

        let changelog = Changelog { commits };
        debug!(
            included = changelog.commits.len(),
            skipped = total - changelog.commits.len(),
            breaking = changelog.breaking_count(),
            "commits classified"
        );
        changelog
    }

    /// Format a changelog to string
    pub fn format(&self, changelog: &Changelog) -> String {
        self.formatter.format(&changelog.commits)
    }

    /// Generate and format in one step
    #[instrument(skip(self, commits), fields(commit_count = commits.len()))]
    pub fn generate_formatted(&self, commits: Vec<SourcedCommit>) -> String {
        let changelog = self.generate(commits);
        let output = self.format(&changelog);
        debug!(output_len = output.len(), "changelog formatted");
        output
    }
}
