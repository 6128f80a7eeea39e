//! `[push]` section configuration.
//!
//! ```toml
//! [push]
//! remote = ""     # empty: the branch's configured upstream
//! branch = ""
//! force = false   # push with --force-with-lease
//! pty = false     # run on a pseudo-terminal so credential prompts work
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    /// Remote name. Empty lets git pick the upstream.
    pub remote: String,

    /// Branch to push. Requires `remote`.
    pub branch: String,

    /// Push with `--force-with-lease`.
    pub force: bool,

    /// Run `git push` on a pseudo-terminal.
    pub pty: bool,
}

impl PushConfig {
    pub const BRANCH: FieldPath = FieldPath::new("push.branch");

    /// `branch` alone is meaningless to `git push`.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.branch.trim().is_empty() && self.remote.trim().is_empty() {
            diag.error_with_hint(
                Self::BRANCH,
                "branch is set but remote is empty",
                "set push.remote (e.g. \"origin\")",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_push_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.push, PushConfig::default());
        assert!(!config.push.force);
        assert!(!config.push.pty);
    }

    #[test]
    fn test_push_config_custom() {
        let config = test_parse_config(
            "[push]\nremote = \"origin\"\nbranch = \"main\"\nforce = true\npty = true",
        );
        assert_eq!(config.push.remote, "origin");
        assert_eq!(config.push.branch, "main");
        assert!(config.push.force);
        assert!(config.push.pty);
    }

    #[test]
    fn test_branch_without_remote() {
        let push = PushConfig {
            branch: "main".to_string(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        push.validate(&mut diag);
        assert!(diag.has_errors());

        let push = PushConfig {
            remote: "origin".to_string(),
            branch: "main".to_string(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        push.validate(&mut diag);
        assert!(!diag.has_errors());
    }
}
