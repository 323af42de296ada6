//! Commit classification
//!
//! Combines the tokenizer output with host data into a [`ParsedCommit`],
//! deciding once whether the commit is a breaking change.

use std::sync::LazyLock;

use herald_git::SourcedCommit;
use regex::Regex;
use tracing::trace;

use crate::parser::CommitParser;
use crate::types::{CommitExtra, ParsedCommit, BREAKING_CHANGE_KEYWORD};

static BREAKING_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^BREAKING CHANGES?:?\s+").expect("Invalid regex"));

/// Whether a body or footer, independently, opens with a `BREAKING CHANGE`
/// (or `BREAKING CHANGES`) marker followed by whitespace, with or without a
/// colon. Absent texts never match.
pub fn is_breaking_change(body: Option<&str>, footer: Option<&str>) -> bool {
    [body, footer]
        .into_iter()
        .any(|text| BREAKING_PREFIX_REGEX.is_match(text.unwrap_or_default()))
}

/// First seven characters of a commit hash, or the whole hash when shorter
pub fn short_sha(hash: &str) -> &str {
    match hash.char_indices().nth(7) {
        Some((end, _)) => &hash[..end],
        None => hash,
    }
}

/// Classify one commit.
///
/// The commit is breaking when any signal says so: a breaking-change note,
/// a body or footer opening with the breaking marker, or `!` in the header.
/// Each signal is enough on its own, so `feat!: drop v1` lands under
/// Breaking Changes even without a footer.
pub fn classify(parser: &dyn CommitParser, sourced: SourcedCommit) -> ParsedCommit {
    let SourcedCommit {
        commit,
        pull_requests,
    } = sourced;
    let parsed = parser.parse(&commit.message);

    let breaking_note = parsed
        .notes
        .iter()
        .any(|note| note.title == BREAKING_CHANGE_KEYWORD);
    let breaking_prefix = is_breaking_change(parsed.body.as_deref(), parsed.footer.as_deref());
    let breaking_change = breaking_note || breaking_prefix || parsed.breaking_marker;

    trace!(
        sha = short_sha(&commit.sha),
        commit_type = ?parsed.commit_type,
        breaking_change,
        pull_requests = pull_requests.len(),
        "classified commit"
    );

    ParsedCommit {
        commit_type: parsed.commit_type,
        scope: parsed.scope,
        subject: parsed.subject,
        header: parsed.header,
        body: parsed.body,
        footer: parsed.footer,
        notes: parsed.notes,
        references: parsed.references,
        mentions: parsed.mentions,
        merge: parsed.merge,
        revert: parsed.revert,
        extra: CommitExtra {
            commit,
            pull_requests,
            breaking_change,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ConventionalParser;
    use chrono::Utc;
    use herald_git::{CommitIdentity, PullRequest, RawCommit};

    fn sourced(message: &str) -> SourcedCommit {
        SourcedCommit::new(
            RawCommit::new(
                "abc1234567890",
                message,
                Utc::now(),
                "https://x/commit/abc1234567890",
            )
            .with_author(CommitIdentity::new("Jane", "jane@example.com")),
        )
    }

    #[test]
    fn test_short_sha() {
        assert_eq!(short_sha("abc1234567890"), "abc1234");
        assert_eq!(short_sha("abc1234"), "abc1234");
        assert_eq!(short_sha("abc"), "abc");
        assert_eq!(short_sha(""), "");
    }

    #[test]
    fn test_short_sha_is_a_prefix() {
        for hash in ["0123456789abcdef0123456789abcdef01234567", "12345678", "a"] {
            let short = short_sha(hash);
            assert_eq!(short.len(), hash.len().min(7));
            assert!(hash.starts_with(short));
        }
    }

    #[test]
    fn test_breaking_prefix_variants() {
        assert!(is_breaking_change(Some("BREAKING CHANGE: gone"), None));
        assert!(is_breaking_change(Some("BREAKING CHANGES: gone"), None));
        assert!(is_breaking_change(Some("BREAKING CHANGE gone"), None));
        assert!(is_breaking_change(Some("BREAKING CHANGES\tgone"), None));
        assert!(is_breaking_change(None, Some("BREAKING CHANGE:\nnext line")));
    }

    #[test]
    fn test_breaking_prefix_rejections() {
        assert!(!is_breaking_change(None, None));
        assert!(!is_breaking_change(Some(""), Some("")));
        assert!(!is_breaking_change(Some("breaking change: lower"), None));
        assert!(!is_breaking_change(Some("BREAKING CHANGE:gone"), None));
        assert!(!is_breaking_change(Some("BREAKING CHANGE"), None));
        assert!(!is_breaking_change(Some("Note: BREAKING CHANGE: later"), None));
        assert!(!is_breaking_change(Some(" BREAKING CHANGE: indented"), None));
    }

    #[test]
    fn test_body_and_footer_are_independent() {
        assert!(is_breaking_change(Some("plain body"), Some("BREAKING CHANGE: x")));
        assert!(is_breaking_change(Some("BREAKING CHANGE: x"), Some("Closes #1")));
    }

    #[test]
    fn test_classify_plain_commit() {
        let parser = ConventionalParser::new();
        let commit = classify(&parser, sourced("feat(api): add endpoint"));

        assert_eq!(commit.commit_type.as_deref(), Some("feat"));
        assert_eq!(commit.scope.as_deref(), Some("api"));
        assert_eq!(commit.subject.as_deref(), Some("add endpoint"));
        assert!(!commit.extra.breaking_change);
        assert!(commit.extra.pull_requests.is_empty());
        assert_eq!(commit.extra.commit.sha, "abc1234567890");
    }

    #[test]
    fn test_classify_breaking_note() {
        let parser = ConventionalParser::new();
        let commit = classify(&parser, sourced("feat: x\n\nBREAKING CHANGE: y"));
        assert!(commit.is_breaking());
        assert_eq!(commit.notes.len(), 1);
    }

    #[test]
    fn test_classify_breaking_note_alone() {
        let parser = ConventionalParser::new();
        let commit = classify(&parser, sourced("feat: x\n\nCloses #1\nBREAKING CHANGE: y"));

        assert!(!is_breaking_change(commit.body.as_deref(), commit.footer.as_deref()));
        assert_eq!(commit.notes.len(), 1);
        assert_eq!(commit.notes[0].title, "BREAKING CHANGE");
        assert!(commit.extra.breaking_change);
    }

    #[test]
    fn test_classify_breaking_marker_without_footer() {
        let parser = ConventionalParser::new();
        let commit = classify(&parser, sourced("feat!: drop v1"));

        assert!(commit.body.is_none());
        assert!(commit.footer.is_none());
        assert!(commit.notes.is_empty());
        assert!(commit.extra.breaking_change);
    }

    #[test]
    fn test_classify_breaking_plural_body() {
        let parser = ConventionalParser::new();
        let commit = classify(&parser, sourced("fix: x\n\nBREAKING CHANGES: many"));
        assert!(commit.notes.is_empty());
        assert!(commit.is_breaking());
    }

    #[test]
    fn test_classify_breaking_marker() {
        let parser = ConventionalParser::new();
        let commit = classify(&parser, sourced("refactor!: drop v1"));
        assert!(commit.is_breaking());
    }

    #[test]
    fn test_classify_keeps_pull_requests() {
        let parser = ConventionalParser::new();
        let prs = vec![
            PullRequest::new(2, "https://x/pull/2"),
            PullRequest::new(1, "https://x/pull/1"),
        ];
        let commit = classify(&parser, sourced("fix: y").with_pull_requests(prs.clone()));
        assert_eq!(commit.extra.pull_requests, prs);
    }

    #[test]
    fn test_classify_non_conventional() {
        let parser = ConventionalParser::new();
        let commit = classify(&parser, sourced("Update README"));
        assert!(commit.commit_type.is_none());
        assert_eq!(commit.display_subject(), "Update README");
        assert!(!commit.is_breaking());
    }
}
