//! Conventional Commits tokenizer
//!
//! Splits commits following the Conventional Commits specification
//! (https://www.conventionalcommits.org/) into header fields, body, footer,
//! notes, references and mentions.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::trace;

use super::config::{corresponding, ParserConfig};
use super::CommitParser;
use crate::types::{MergeInfo, Note, Reference, RevertInfo};

/// `#12`, `owner/repo#12`, optionally preceded by a closing action
static REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\b(?P<action>close[sd]?|fix(?:e[sd])?|resolve[sd]?)\s+)?(?:(?P<owner>[\w.-]+)/(?P<repository>[\w.-]+))?#(?P<issue>\d+)",
    )
    .expect("Invalid regex")
});

static MENTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\B@(?P<handle>[\w-]+)").expect("Invalid regex"));

/// Detects the `!` breaking marker in an otherwise conventional header
static BREAKING_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+(?:\([^()]*\))?!: ").expect("Invalid regex"));

/// The tokenizer output for one commit message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedMessage {
    /// Commit type
    #[serde(rename = "type")]
    pub commit_type: Option<String>,
    /// Scope
    pub scope: Option<String>,
    /// Subject
    pub subject: Option<String>,
    /// Whether the header carried the `!` marker
    pub breaking_marker: bool,
    /// Header line
    pub header: String,
    /// Body, without the footer
    pub body: Option<String>,
    /// Footer, starting at the first note or closing reference
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
}

/// Tokenizer for Conventional Commits messages
pub struct ConventionalParser {
    config: ParserConfig,
    note_regex: Option<Regex>,
}

impl ConventionalParser {
    /// Create a new parser with the default configuration
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a parser with custom configuration
    pub fn with_config(config: ParserConfig) -> Self {
        let note_regex = if config.note_keywords.is_empty() {
            None
        } else {
            let keywords: Vec<String> = config
                .note_keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect();
            let pattern = format!(r"^[\s|*]*(?P<title>{})[:\s]+(?P<text>.*)$", keywords.join("|"));
            Some(Regex::new(&pattern).expect("note pattern is built from escaped keywords"))
        };

        Self { config, note_regex }
    }

    fn parse_header(&self, header: &str, parsed: &mut ParsedMessage) {
        if let Some(caps) = self.config.header_pattern.captures(header) {
            let c = &self.config.header_correspondence;
            parsed.commit_type = corresponding(&caps, c, "type");
            parsed.scope = corresponding(&caps, c, "scope");
            parsed.subject = corresponding(&caps, c, "subject");
            parsed.breaking_marker = BREAKING_MARKER_REGEX.is_match(header);
        }
    }

    /// Split the lines after the header into body and footer, collecting
    /// notes on the way
    fn parse_rest(&self, lines: &[&str], parsed: &mut ParsedMessage) {
        let mut body_lines = Vec::new();
        let mut footer_lines = Vec::new();
        let mut in_footer = false;
        let mut current_note: Option<Note> = None;

        for line in lines {
            let note = self.note_regex.as_ref().and_then(|r| r.captures(line));

            if let Some(caps) = note {
                in_footer = true;
                if let Some(done) = current_note.take() {
                    parsed.notes.push(finish_note(done));
                }
                current_note = Some(Note {
                    title: caps["title"].to_string(),
                    text: caps["text"].to_string(),
                });
                footer_lines.push(*line);
                continue;
            }

            if !in_footer && starts_footer(line) {
                in_footer = true;
            }

            if in_footer {
                if let Some(note) = current_note.as_mut() {
                    note.text.push('\n');
                    note.text.push_str(line);
                }
                footer_lines.push(*line);
            } else {
                body_lines.push(*line);
            }
        }

        if let Some(done) = current_note.take() {
            parsed.notes.push(finish_note(done));
        }

        parsed.body = join_trimmed(&body_lines);
        parsed.footer = join_trimmed(&footer_lines);
    }
}

impl Default for ConventionalParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitParser for ConventionalParser {
    fn parse(&self, message: &str) -> ParsedMessage {
        let mut parsed = ParsedMessage::default();
        let lines: Vec<&str> = message.trim().lines().collect();

        let mut rest = match lines.split_first() {
            Some((first, rest)) => {
                parsed.header = first.trim().to_string();
                rest
            }
            None => &[][..],
        };

        // A merge header names the pull request; the real header follows it
        if let Some(caps) = self.config.merge_pattern.captures(&parsed.header) {
            let c = &self.config.merge_correspondence;
            parsed.merge = Some(MergeInfo {
                id: corresponding(&caps, c, "id"),
                source: corresponding(&caps, c, "source"),
            });

            if let Some(pos) = rest.iter().position(|l| !l.trim().is_empty()) {
                parsed.header = rest[pos].trim().to_string();
                rest = &rest[pos + 1..];
            }
        }

        let header = parsed.header.clone();
        self.parse_header(&header, &mut parsed);
        self.parse_rest(rest, &mut parsed);

        parsed.references = references(message);
        parsed.mentions = mentions(message);

        if let Some(caps) = self.config.revert_pattern.captures(message.trim()) {
            let c = &self.config.revert_correspondence;
            parsed.revert = Some(RevertInfo {
                header: corresponding(&caps, c, "header"),
                hash: corresponding(&caps, c, "hash"),
            });
        }

        trace!(
            commit_type = ?parsed.commit_type,
            notes = parsed.notes.len(),
            references = parsed.references.len(),
            "tokenized message"
        );
        parsed
    }
}

/// A closing reference (`Closes #12`) starts the footer
fn starts_footer(line: &str) -> bool {
    REFERENCE_REGEX
        .captures_iter(line)
        .any(|caps| caps.name("action").is_some())
}

fn finish_note(mut note: Note) -> Note {
    note.text = note.text.trim().to_string();
    note
}

fn join_trimmed(lines: &[&str]) -> Option<String> {
    let text = lines.join("\n");
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn references(message: &str) -> Vec<Reference> {
    REFERENCE_REGEX
        .captures_iter(message)
        .map(|caps| Reference {
            action: caps.name("action").map(|m| m.as_str().to_lowercase()),
            owner: caps.name("owner").map(|m| m.as_str().to_string()),
            repository: caps.name("repository").map(|m| m.as_str().to_string()),
            issue: caps["issue"].to_string(),
            raw: caps[0].to_string(),
        })
        .collect()
}

fn mentions(message: &str) -> Vec<String> {
    let mut handles: Vec<String> = Vec::new();
    for caps in MENTION_REGEX.captures_iter(message) {
        let handle = caps["handle"].to_string();
        if !handles.contains(&handle) {
            handles.push(handle);
        }
    }
    handles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(message: &str) -> ParsedMessage {
        ConventionalParser::new().parse(message)
    }

    #[test]
    fn test_parse_simple_feat() {
        let parsed = parse("feat: add new feature");

        assert_eq!(parsed.commit_type.as_deref(), Some("feat"));
        assert_eq!(parsed.subject.as_deref(), Some("add new feature"));
        assert_eq!(parsed.header, "feat: add new feature");
        assert!(parsed.scope.is_none());
        assert!(parsed.body.is_none());
        assert!(parsed.footer.is_none());
        assert!(!parsed.breaking_marker);
    }

    #[test]
    fn test_parse_with_scope() {
        let parsed = parse("fix(parser): handle edge case");

        assert_eq!(parsed.commit_type.as_deref(), Some("fix"));
        assert_eq!(parsed.scope.as_deref(), Some("parser"));
        assert_eq!(parsed.subject.as_deref(), Some("handle edge case"));
    }

    #[test]
    fn test_type_is_kept_verbatim() {
        let parsed = parse("Feat: shout");
        assert_eq!(parsed.commit_type.as_deref(), Some("Feat"));
    }

    #[test]
    fn test_parse_breaking_marker() {
        let parsed = parse("refactor(core)!: major refactoring");

        assert_eq!(parsed.commit_type.as_deref(), Some("refactor"));
        assert_eq!(parsed.scope.as_deref(), Some("core"));
        assert!(parsed.breaking_marker);
    }

    #[test]
    fn test_parse_non_conventional() {
        let parsed = parse("Just a regular commit message");

        assert!(parsed.commit_type.is_none());
        assert!(parsed.subject.is_none());
        assert_eq!(parsed.header, "Just a regular commit message");
    }

    #[test]
    fn test_parse_empty_message() {
        let parsed = parse("");
        assert_eq!(parsed, ParsedMessage::default());
    }

    #[test]
    fn test_parse_body() {
        let parsed = parse("feat: add feature\n\nThis is the body\n\nWith multiple paragraphs.\n");

        assert_eq!(
            parsed.body.as_deref(),
            Some("This is the body\n\nWith multiple paragraphs.")
        );
        assert!(parsed.footer.is_none());
    }

    #[test]
    fn test_breaking_change_note() {
        let parsed = parse(
            "feat: new config\n\nReworks loading.\n\nBREAKING CHANGE: the `path` key is gone\nuse `file` instead\n",
        );

        assert_eq!(parsed.body.as_deref(), Some("Reworks loading."));
        assert_eq!(
            parsed.footer.as_deref(),
            Some("BREAKING CHANGE: the `path` key is gone\nuse `file` instead")
        );
        assert_eq!(
            parsed.notes,
            vec![Note {
                title: "BREAKING CHANGE".to_string(),
                text: "the `path` key is gone\nuse `file` instead".to_string(),
            }]
        );
    }

    #[test]
    fn test_plural_keyword_is_not_a_note() {
        let parsed = parse("feat: x\n\nBREAKING CHANGES: lots");
        assert!(parsed.notes.is_empty());
        assert_eq!(parsed.body.as_deref(), Some("BREAKING CHANGES: lots"));
    }

    #[test]
    fn test_closing_reference_starts_footer() {
        let parsed = parse("fix: crash on start\n\nGuard the null.\n\nCloses #12\nRefs owner/repo#3");

        assert_eq!(parsed.body.as_deref(), Some("Guard the null."));
        assert_eq!(parsed.footer.as_deref(), Some("Closes #12\nRefs owner/repo#3"));
        assert_eq!(parsed.references.len(), 2);
        assert_eq!(parsed.references[0].action.as_deref(), Some("closes"));
        assert_eq!(parsed.references[0].issue, "12");
        assert_eq!(parsed.references[1].action, None);
        assert_eq!(parsed.references[1].owner.as_deref(), Some("owner"));
        assert_eq!(parsed.references[1].repository.as_deref(), Some("repo"));
    }

    #[test]
    fn test_header_references() {
        let parsed = parse("fix(api): handle nulls (#7)");
        assert_eq!(parsed.references.len(), 1);
        assert_eq!(parsed.references[0].issue, "7");
        assert_eq!(parsed.subject.as_deref(), Some("handle nulls (#7)"));
    }

    #[test]
    fn test_mentions() {
        let parsed = parse("docs: thanks @jane and @bob-smith\n\nmail jane@example.com, cc @jane");
        assert_eq!(parsed.mentions, vec!["jane", "bob-smith"]);
    }

    #[test]
    fn test_merge_commit() {
        let parsed =
            parse("Merge pull request #42 from owner/feature\n\nfeat(ui): dark mode\n\nAdds a toggle.");

        assert_eq!(
            parsed.merge,
            Some(MergeInfo {
                id: Some("42".to_string()),
                source: Some("owner/feature".to_string()),
            })
        );
        assert_eq!(parsed.header, "feat(ui): dark mode");
        assert_eq!(parsed.commit_type.as_deref(), Some("feat"));
        assert_eq!(parsed.body.as_deref(), Some("Adds a toggle."));
    }

    #[test]
    fn test_merge_commit_without_title() {
        let parsed = parse("Merge pull request #42 from owner/feature");
        assert!(parsed.merge.is_some());
        assert_eq!(parsed.header, "Merge pull request #42 from owner/feature");
        assert!(parsed.commit_type.is_none());
    }

    #[test]
    fn test_revert() {
        let parsed = parse("Revert \"feat: add thing\"\n\nThis reverts commit 1234567890abcdef.");
        assert_eq!(
            parsed.revert,
            Some(RevertInfo {
                header: Some("feat: add thing".to_string()),
                hash: Some("1234567890abcdef".to_string()),
            })
        );

        let parsed = parse("revert: feat: add thing\n\nThis reverts commit 1234567.");
        assert_eq!(parsed.commit_type.as_deref(), Some("revert"));
        assert_eq!(parsed.revert.unwrap().hash.as_deref(), Some("1234567"));
    }

    #[test]
    fn test_custom_note_keyword() {
        let parser =
            ConventionalParser::with_config(ParserConfig::default().with_note_keyword("DEPRECATED"));
        let parsed = parser.parse("feat: x\n\nDEPRECATED: old flag");
        assert_eq!(parsed.notes[0].title, "DEPRECATED");
        assert_eq!(parsed.notes[0].text, "old flag");
    }

    #[test]
    fn test_no_note_keywords() {
        let config = ParserConfig {
            note_keywords: Vec::new(),
            ..ParserConfig::default()
        };
        let parsed = ConventionalParser::with_config(config).parse("feat: x\n\nBREAKING CHANGE: y");
        assert!(parsed.notes.is_empty());
        assert_eq!(parsed.body.as_deref(), Some("BREAKING CHANGE: y"));
    }
}
