//! Changelog command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info, warn};

use herald_changelog::{Changelog, ChangelogGenerator, Section};
use herald_core::config::{load_config_or_default, Config};
use herald_core::{scrub_type_list, tag_from_ref, HeraldError};
use herald_git::{
    CommitRange, CommitSource, GitCommitSource, GitRepo, JsonCommitSource, SourcedCommit,
};

use crate::cli::{output, Cli, OutputFormat};

/// Generate the changelog for a release range
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Release tag or ref (e.g. `v1.2.0` or `refs/tags/v1.2.0`)
    #[arg(long)]
    pub tag: Option<String>,

    /// Previous release point (default: the release tag before `--tag`,
    /// or the latest release tag)
    #[arg(long)]
    pub from: Option<String>,

    /// Current release point (default: `--tag` once it exists, otherwise HEAD)
    #[arg(long)]
    pub to: Option<String>,

    /// Read commits exported from the hosting service instead of git
    #[arg(long, value_name = "JSON")]
    pub input: Option<PathBuf>,

    /// Commit types to leave out, comma separated
    #[arg(long, value_name = "TYPES")]
    pub exclude_types: Option<String>,

    /// Write to file (default: print to stdout)
    #[arg(short, long)]
    pub write: bool,

    /// Output file (defaults to configured changelog file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
struct ChangelogReport<'a> {
    range: &'a CommitRange,
    breaking_count: usize,
    sections: Vec<Section<'a>>,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(tag = ?self.tag, from = ?self.from, to = ?self.to, write = self.write, "executing changelog command");
        let cwd = std::env::current_dir()?;
        let (mut config, _) = load_config_or_default(&cwd)?;

        if let Some(raw) = &self.exclude_types {
            for commit_type in scrub_type_list(raw) {
                if !config.changelog.is_excluded(&commit_type) {
                    config.changelog.exclude_types.push(commit_type);
                }
            }
        }

        let tag = self.tag.as_deref().map(tag_from_ref);
        let (range, commits) = match &self.input {
            Some(path) => {
                let to = self.to.clone().or_else(|| tag.clone()).unwrap_or_else(|| "HEAD".to_string());
                let range = CommitRange::new(self.from.clone(), to);
                let commits = read_commits(&JsonCommitSource::new(path), &range)?;
                (range, commits)
            }
            None => self.read_git(&cwd, &config, tag.as_deref())?,
        };

        if cli.verbose {
            output::info(&format!("{} commits in {}", commits.len(), range));
        }

        let generator = ChangelogGenerator::new(config.changelog.clone());
        let changelog = generator.generate(commits);

        if changelog.is_empty() {
            if !cli.quiet {
                output::warning("No commits found for this release.");
            }
            return Ok(());
        }

        let markdown = generator.format(&changelog);

        if self.write {
            let output_path = self
                .output
                .clone()
                .unwrap_or_else(|| cwd.join(&config.changelog.file));
            write_changelog(&output_path, &markdown)?;

            if !cli.quiet {
                output::success(&format!(
                    "Changelog written to {}",
                    style(output_path.display()).cyan()
                ));
            }
            return Ok(());
        }

        match cli.format {
            OutputFormat::Json => println!("{}", render_json(&range, &changelog)?),
            OutputFormat::Text => println!("{}", markdown),
        }

        Ok(())
    }

    fn read_git(
        &self,
        cwd: &Path,
        config: &Config,
        tag: Option<&str>,
    ) -> anyhow::Result<(CommitRange, Vec<SourcedCommit>)> {
        let repo = GitRepo::discover(cwd).map_err(HeraldError::from)?;
        let pattern = config.git.tag_pattern.as_deref();

        let to = match &self.to {
            Some(to) => to.clone(),
            None => release_end(&repo, tag)?,
        };

        let from = match &self.from {
            Some(from) => Some(from.clone()),
            None => {
                let previous = match tag {
                    Some(tag) => repo.previous_tag(tag, pattern),
                    None => repo.find_latest_tag(pattern),
                }
                .map_err(HeraldError::from)?;
                previous.map(|t| t.name)
            }
        };

        let web_url = match &config.repository.url {
            Some(url) => Some(url.trim_end_matches('/').to_string()),
            None => match repo.web_url(&config.repository.remote) {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!(error = %e, "no repository web URL, links will use commit hashes");
                    None
                }
            },
        };

        let range = CommitRange::new(from, to);
        debug!(repo = %repo.path().display(), range = %range, "resolved release range");
        let commits = read_commits(&GitCommitSource::new(&repo, web_url), &range)?;
        Ok((range, commits))
    }
}

/// Last revision of the release. A tag that does not exist yet (notes are
/// usually written before tagging) ends the release at HEAD.
fn release_end(repo: &GitRepo, tag: Option<&str>) -> anyhow::Result<String> {
    let Some(tag) = tag else {
        return Ok("HEAD".to_string());
    };

    match repo.find_tag(tag).map_err(HeraldError::from)? {
        Some(found) => Ok(found.name),
        None => {
            info!(tag, "tag not created yet, reading up to HEAD");
            Ok("HEAD".to_string())
        }
    }
}

fn read_commits(
    source: &dyn CommitSource,
    range: &CommitRange,
) -> anyhow::Result<Vec<SourcedCommit>> {
    let commits = source.commits(range)?;
    info!(source = source.name(), range = %range, count = commits.len(), "commits read");
    Ok(commits)
}

fn render_json(range: &CommitRange, changelog: &Changelog) -> serde_json::Result<String> {
    let report = ChangelogReport {
        range,
        breaking_count: changelog.breaking_count(),
        sections: changelog.sections(),
    };
    serde_json::to_string_pretty(&report)
}

/// Write the changelog, creating parent directories. An existing file is
/// replaced.
fn write_changelog(path: &Path, markdown: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, format!("{}\n", markdown))?;
    info!(path = %path.display(), bytes = markdown.len(), "changelog written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::config::ChangelogConfig;
    use git2::{Repository, Signature};
    use herald_git::{CommitIdentity, RawCommit};
    use tempfile::TempDir;

    fn repo_with_tag(tag: &str) -> (TempDir, GitRepo) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let tree = repo
            .find_tree(repo.index().unwrap().write_tree().unwrap())
            .unwrap();
        let oid = repo
            .commit(Some("HEAD"), &sig, &sig, "feat: first", &tree, &[])
            .unwrap();
        let commit = repo.find_commit(oid).unwrap();
        repo.tag_lightweight(tag, commit.as_object(), false).unwrap();

        let git_repo = GitRepo::open(temp.path()).unwrap();
        (temp, git_repo)
    }

    fn changelog(messages: &[&str]) -> Changelog {
        let commits = messages
            .iter()
            .map(|m| {
                SourcedCommit::new(
                    RawCommit::new("abcdef0123456", *m, chrono::Utc::now(), "https://x/commit/abcdef0")
                        .with_author(CommitIdentity::new("Jane", "jane@example.com")),
                )
            })
            .collect();
        ChangelogGenerator::new(ChangelogConfig::default()).generate(commits)
    }

    #[test]
    fn test_render_json() {
        let range = CommitRange::new(Some("v1.0.0".to_string()), "v1.1.0");
        let json = render_json(&range, &changelog(&["feat!: a", "fix: b"])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["range"]["from"], "v1.0.0");
        assert_eq!(value["breaking_count"], 1);
        assert_eq!(value["sections"][0]["title"], "Breaking Changes");
        assert_eq!(value["sections"][1]["title"], "Features");
        assert_eq!(value["sections"][2]["commits"][0]["subject"], "b");
    }

    #[test]
    fn test_release_end() {
        let (_temp, repo) = repo_with_tag("v1.0.0");
        assert_eq!(release_end(&repo, Some("v1.0.0")).unwrap(), "v1.0.0");
        assert_eq!(release_end(&repo, Some("v1.1.0")).unwrap(), "HEAD");
        assert_eq!(release_end(&repo, None).unwrap(), "HEAD");
    }

    #[test]
    fn test_read_commits_from_export() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("commits.json");
        std::fs::write(
            &path,
            r#"[{"commit": {"sha": "abc", "message": "fix: x", "timestamp": "2024-01-01T00:00:00Z", "url": "u"}}]"#,
        )
        .unwrap();

        let range = CommitRange::new(None, "HEAD");
        let commits = read_commits(&JsonCommitSource::new(&path), &range).unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].commit.message, "fix: x");
    }

    #[test]
    fn test_write_changelog() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docs").join("CHANGELOG.md");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "old content").unwrap();

        write_changelog(&path, "## Features\n\n- x").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "## Features\n\n- x\n");
    }

    #[test]
    fn test_write_changelog_creates_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("CHANGES.md");
        write_changelog(&path, "## Chores\n\n- y").unwrap();
        assert!(path.exists());
    }
}
