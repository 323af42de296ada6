//! Herald Git - commit sources for changelog generation
//!
//! This crate turns a release range into raw commit records with their
//! associated pull requests, either by walking a local git repository or by
//! reading a payload exported from the hosting service.

mod commits;
pub mod pulls;
mod remote;
mod repository;
pub mod source;
mod tags;
pub mod types;

pub use remote::web_url_from_remote;
pub use repository::{GitRepo, Result};
pub use source::{CommitSource, GitCommitSource, JsonCommitSource};
pub use types::{CommitIdentity, CommitRange, PullRequest, RawCommit, SourcedCommit, TagInfo};
