//! Classify command

use clap::Args;
use serde::Serialize;
use tracing::info;

use herald_changelog::{classify, format_entry, ConventionalParser, ParsedCommit, SectionKind};
use herald_git::{RawCommit, SourcedCommit};

use crate::cli::{output, Cli, OutputFormat};

/// Classify a single commit message
#[derive(Debug, Args)]
pub struct ClassifyCommand {
    /// Full commit message (header, body and footer)
    pub message: String,
}

#[derive(Serialize)]
struct ClassifyReport {
    sections: Vec<&'static str>,
    entry: String,
    commit: ParsedCommit,
}

impl ClassifyCommand {
    /// Execute the classify command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(len = self.message.len(), "executing classify command");
        let report = classify_message(&self.message);

        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => {
                let commit = &report.commit;
                let none = "-";
                println!("{}", output::key_value("type", commit.commit_type.as_deref().unwrap_or(none)));
                println!("{}", output::key_value("scope", commit.scope.as_deref().unwrap_or(none)));
                println!("{}", output::key_value("subject", commit.display_subject()));
                println!("{}", output::key_value("breaking", &commit.is_breaking().to_string()));
                println!("{}", output::key_value("sections", &report.sections.join(", ")));
                if !cli.quiet {
                    println!();
                    println!("{}", report.entry);
                }
            }
        }

        Ok(())
    }
}

fn classify_message(message: &str) -> ClassifyReport {
    let raw = RawCommit::new("", message, chrono::Utc::now(), "");
    let commit = classify(&ConventionalParser::new(), SourcedCommit::new(raw));
    let sections = SectionKind::ordered()
        .into_iter()
        .filter(|kind| kind.contains(&commit))
        .map(|kind| kind.title())
        .collect();

    ClassifyReport {
        sections,
        entry: format_entry(&commit),
        commit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_breaking_feature() {
        let report = classify_message("feat(api)!: drop v1");
        assert_eq!(report.sections, vec!["Breaking Changes", "Features"]);
        assert_eq!(report.commit.scope.as_deref(), Some("api"));
        assert!(report.commit.is_breaking());
    }

    #[test]
    fn test_classify_unknown_type() {
        let report = classify_message("Update README");
        assert_eq!(report.sections, vec!["Commits"]);
        assert!(report.commit.commit_type.is_none());
        assert_eq!(report.entry, "- Update README ([<unknown author>]())");
    }

    #[test]
    fn test_classify_footer_breaking() {
        let report = classify_message("fix: patch\n\nBREAKING CHANGE: config moved");
        assert_eq!(report.sections, vec!["Breaking Changes", "Bug Fixes"]);
    }
}
