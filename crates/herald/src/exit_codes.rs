//! Exit codes for the CLI

use herald_core::{GitError, HeraldError};

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// Commit input error
pub const INPUT_ERROR: i32 = 4;

/// Map an error to the exit code reported to the calling workflow
pub fn for_error(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<GitError>().is_some() {
        return GIT_ERROR;
    }

    match err.downcast_ref::<HeraldError>() {
        Some(HeraldError::Config(_)) => CONFIG_ERROR,
        Some(HeraldError::Git(_)) => GIT_ERROR,
        Some(HeraldError::Source(_)) | Some(HeraldError::Json(_)) => INPUT_ERROR,
        _ => ERROR,
    }
}
