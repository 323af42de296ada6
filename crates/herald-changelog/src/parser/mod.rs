//! Commit message tokenizing

mod config;
mod conventional;

pub use config::{ParserConfig, DEFAULT_PARSER_CONFIG};
pub use conventional::{ConventionalParser, ParsedMessage};

/// Trait for commit message tokenizers
pub trait CommitParser: Send + Sync {
    /// Split a full commit message into its conventional parts.
    ///
    /// Tokenizing never fails: a message that does not follow the
    /// convention yields a [`ParsedMessage`] without type, scope or subject.
    fn parse(&self, message: &str) -> ParsedMessage;
}
