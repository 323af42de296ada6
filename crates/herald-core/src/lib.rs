//! Herald Core - shared foundation for changelog generation
//!
//! This crate provides the error types, configuration loading and the input
//! scrubbing helpers used by the git, changelog and CLI crates.

pub mod config;
pub mod error;
pub mod inputs;

pub use error::{ConfigError, GitError, HeraldError, Result, SourceError};
pub use inputs::{scrub_type_list, tag_from_ref};
