//! Configuration section definitions.
//!
//! Each module corresponds to a section in `cpush.toml`:
//!
//! | Module   | TOML Section | Purpose                              |
//! |----------|--------------|--------------------------------------|
//! | `git`    | `[git]`      | Executable and failure policy        |
//! | `commit` | `[commit]`   | Default message and file filter      |
//! | `push`   | `[push]`     | Remote, branch, force, pty           |
//! | `log`    | `[log]`      | Output line filtering                |

mod commit;
pub mod git;
mod log;
mod push;

pub use commit::{CommitConfig, DEFAULT_MESSAGE};
pub use git::{GIT_ENV, GitConfig, StderrPolicy};
pub use log::LogConfig;
pub use push::PushConfig;
