//! `[commit]` section configuration.
//!
//! ```toml
//! [commit]
//! message = "Your commit message"
//! files = ""                  # empty: stage everything
//! ```

use serde::{Deserialize, Serialize};

/// Message used when neither `--message` nor `[commit] message` is given.
pub const DEFAULT_MESSAGE: &str = "Your commit message";

/// Commit defaults, overridden per invocation by `--message` / `--files`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitConfig {
    /// Commit message.
    pub message: String,

    /// Files to stage, space separated. Empty stages all changes.
    pub files: String,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            files: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_commit_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.commit.message, "Your commit message");
        assert!(config.commit.files.is_empty());
    }

    #[test]
    fn test_commit_config_custom() {
        let config =
            test_parse_config("[commit]\nmessage = \"wip\"\nfiles = \"Assets/a.cs Assets/b.cs\"");
        assert_eq!(config.commit.message, "wip");
        assert_eq!(config.commit.files, "Assets/a.cs Assets/b.cs");
    }
}
