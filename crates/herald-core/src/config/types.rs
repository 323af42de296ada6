//! Configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository link configuration
    pub repository: RepositoryConfig,

    /// Git configuration
    pub git: GitConfig,

    /// Changelog configuration
    pub changelog: ChangelogConfig,
}

/// Where commit and pull request links point to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Web URL of the repository (e.g. `https://github.com/owner/repo`).
    /// Derived from the remote URL when absent.
    pub url: Option<String>,

    /// Remote used to derive the web URL
    pub remote: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            url: None,
            remote: "origin".to_string(),
        }
    }
}

/// Git configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Regex a tag name must match to count as a release point
    pub tag_pattern: Option<String>,
}

/// Changelog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path
    pub file: PathBuf,

    /// Commit types left out of the changelog
    pub exclude_types: Vec<String>,

    /// Keep commits whose header does not follow the convention
    pub include_invalid: bool,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("CHANGELOG.md"),
            exclude_types: Vec::new(),
            include_invalid: true,
        }
    }
}

impl ChangelogConfig {
    /// Check whether a commit type is excluded
    pub fn is_excluded(&self, commit_type: &str) -> bool {
        self.exclude_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(commit_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.repository.remote, "origin");
        assert!(config.repository.url.is_none());
        assert_eq!(config.changelog.file, PathBuf::from("CHANGELOG.md"));
        assert!(config.changelog.include_invalid);
        assert!(config.git.tag_pattern.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[changelog]\nexclude_types = [\"chore\"]").unwrap();
        assert_eq!(config.changelog.exclude_types, vec!["chore"]);
        assert!(config.changelog.include_invalid);
        assert_eq!(config.repository.remote, "origin");
    }

    #[test]
    fn test_is_excluded() {
        let config = ChangelogConfig {
            exclude_types: vec!["chore".to_string()],
            ..Default::default()
        };
        assert!(config.is_excluded("chore"));
        assert!(config.is_excluded("CHORE"));
        assert!(!config.is_excluded("feat"));
    }
}
