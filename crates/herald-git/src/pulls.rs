//! Pull request association for commits read from a local repository
//!
//! Hosting services record which pull request a commit came from; a local
//! clone only has the commit message. Merge commits name the pull request in
//! their header, squash merges append `(#N)` to the subject.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::PullRequest;

static MERGE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Merge pull request #(?P<number>\d+) from ").expect("Invalid regex"));

static SQUASH_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(#(?P<number>\d+)\)").expect("Invalid regex"));

/// Pull request numbers named by a commit message header, in order of
/// appearance and without duplicates.
pub fn pull_request_numbers(message: &str) -> Vec<u64> {
    let header = message.lines().next().unwrap_or_default();

    let mut numbers: Vec<u64> = Vec::new();
    let captures = MERGE_HEADER
        .captures(header)
        .into_iter()
        .chain(SQUASH_SUFFIX.captures_iter(header));

    for caps in captures {
        if let Some(number) = caps.name("number").and_then(|m| m.as_str().parse().ok()) {
            if !numbers.contains(&number) {
                numbers.push(number);
            }
        }
    }
    numbers
}

/// Pull requests named by a commit message, linked under `web_url`
pub fn associated_pull_requests(message: &str, web_url: &str) -> Vec<PullRequest> {
    let base = web_url.trim_end_matches('/');
    pull_request_numbers(message)
        .into_iter()
        .map(|n| PullRequest::new(n, format!("{}/pull/{}", base, n)))
        .collect()
}
