//! Command-line interface module.

mod args;
pub mod git;
pub mod init;

pub use args::{Cli, Commands, CommitArgs, PushArgs};
