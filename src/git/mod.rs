//! Git staging, commit and push through the git executable.
//!
//! Every operation checks the working directory first and spawns nothing
//! if it is missing. Steps run one after another, each to completion with
//! stdout and stderr fully captured, and their output is logged as it
//! finishes.

mod args;
mod session;

pub use session::{Report, Session};

use thiserror::Error;

/// Errors that abort a git operation
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Invalid working directory.")]
    InvalidWorkingDirectory,

    #[error("{failed} of {total} git step(s) failed")]
    StepsFailed { failed: usize, total: usize },
}
