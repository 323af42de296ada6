//! CLI commands

mod changelog;
mod classify;
mod init;

pub use changelog::ChangelogCommand;
pub use classify::ClassifyCommand;
pub use init::InitCommand;
