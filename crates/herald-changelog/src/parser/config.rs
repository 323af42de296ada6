//! Tokenizer configuration

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::types::BREAKING_CHANGE_KEYWORD;

/// Patterns and capture-group correspondences used to tokenize messages.
///
/// Each pattern's capture groups are named by its correspondence list, in
/// group order: group 1 is the first name, group 2 the second, and so on.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Header pattern
    pub header_pattern: Regex,
    /// Names of the header capture groups
    pub header_correspondence: Vec<String>,
    /// Merge header pattern
    pub merge_pattern: Regex,
    /// Names of the merge capture groups
    pub merge_correspondence: Vec<String>,
    /// Revert pattern, applied to the whole message
    pub revert_pattern: Regex,
    /// Names of the revert capture groups
    pub revert_correspondence: Vec<String>,
    /// Footer keywords that start a note
    pub note_keywords: Vec<String>,
}

/// The configuration every commit is tokenized with
pub static DEFAULT_PARSER_CONFIG: LazyLock<ParserConfig> = LazyLock::new(|| ParserConfig {
    header_pattern: Regex::new(r"^(\w+)(?:\(([^()]*)\))?!?: (.*)$").expect("Invalid regex"),
    header_correspondence: names(&["type", "scope", "subject"]),
    merge_pattern: Regex::new(r"^Merge pull request #(\d+) from (.*)$").expect("Invalid regex"),
    merge_correspondence: names(&["id", "source"]),
    revert_pattern: Regex::new(
        r#"(?i)^(?:Revert|revert:)\s"?([\s\S]+?)"?\s*This reverts commit ([0-9a-f]{7,40})\b"#,
    )
    .expect("Invalid regex"),
    revert_correspondence: names(&["header", "hash"]),
    note_keywords: names(&[BREAKING_CHANGE_KEYWORD]),
});

fn names(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

impl Default for ParserConfig {
    fn default() -> Self {
        DEFAULT_PARSER_CONFIG.clone()
    }
}

impl ParserConfig {
    /// Add a note keyword
    pub fn with_note_keyword(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        if !self.note_keywords.contains(&keyword) {
            self.note_keywords.push(keyword);
        }
        self
    }
}

/// Read the capture group a correspondence list names `field`.
///
/// Empty captures count as absent.
pub(crate) fn corresponding(
    caps: &Captures<'_>,
    correspondence: &[String],
    field: &str,
) -> Option<String> {
    let index = correspondence.iter().position(|f| f == field)?;
    caps.get(index + 1)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_pattern() {
        let config = ParserConfig::default();
        let caps = config.header_pattern.captures("feat(api): add endpoint").unwrap();
        let c = &config.header_correspondence;
        assert_eq!(corresponding(&caps, c, "type").as_deref(), Some("feat"));
        assert_eq!(corresponding(&caps, c, "scope").as_deref(), Some("api"));
        assert_eq!(corresponding(&caps, c, "subject").as_deref(), Some("add endpoint"));

        assert!(config.header_pattern.is_match("refactor(core)!: drop api"));
        assert!(!config.header_pattern.is_match("Update README"));
        assert!(!config.header_pattern.is_match("feat:missing space"));
    }

    #[test]
    fn test_merge_pattern() {
        let config = ParserConfig::default();
        let caps = config
            .merge_pattern
            .captures("Merge pull request #42 from owner/feature-x")
            .unwrap();
        let c = &config.merge_correspondence;
        assert_eq!(corresponding(&caps, c, "id").as_deref(), Some("42"));
        assert_eq!(corresponding(&caps, c, "source").as_deref(), Some("owner/feature-x"));
    }

    #[test]
    fn test_revert_pattern() {
        let config = ParserConfig::default();
        let message = "Revert \"feat: add thing\"\n\nThis reverts commit abcdef1234567.";
        let caps = config.revert_pattern.captures(message).unwrap();
        let c = &config.revert_correspondence;
        assert_eq!(corresponding(&caps, c, "header").as_deref(), Some("feat: add thing"));
        assert_eq!(corresponding(&caps, c, "hash").as_deref(), Some("abcdef1234567"));

        assert!(config
            .revert_pattern
            .is_match("REVERT \"x\" this reverts commit ABCDEF1"));
        assert!(!config
            .revert_pattern
            .is_match("Revert \"x\" This reverts commit abc12"));
    }

    #[test]
    fn test_unknown_field() {
        let config = ParserConfig::default();
        let caps = config.header_pattern.captures("fix: x").unwrap();
        assert!(corresponding(&caps, &config.header_correspondence, "nope").is_none());
        assert!(corresponding(&caps, &config.header_correspondence, "scope").is_none());
    }

    #[test]
    fn test_note_keywords() {
        let config = ParserConfig::default();
        assert_eq!(config.note_keywords, vec!["BREAKING CHANGE"]);

        let config = config
            .with_note_keyword("DEPRECATED")
            .with_note_keyword("DEPRECATED");
        assert_eq!(config.note_keywords.len(), 2);
    }
}
