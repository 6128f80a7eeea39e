//! `[git]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [git]
//! executable = "git"          # bare name (searched in PATH) or a path
//! stderr_policy = "stderr"    # stderr | exit-code
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Environment variable overriding `[git] executable`.
pub const GIT_ENV: &str = "CPUSH_GIT";

/// Git executable settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Git executable: a bare name resolved through `PATH`, or a path.
    pub executable: PathBuf,

    /// What counts as a failed git step.
    pub stderr_policy: StderrPolicy,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("git"),
            stderr_policy: StderrPolicy::default(),
        }
    }
}

impl GitConfig {
    pub const EXECUTABLE: FieldPath = FieldPath::new("git.executable");

    /// Check that the (already resolved) executable exists.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let path = &self.executable;
        if is_bare_name(path) {
            diag.error_with_hint(
                Self::EXECUTABLE,
                format!("`{}` not found in PATH", path.display()),
                format!(
                    "install git, or point {}, `{GIT_ENV}` or `--git` at it",
                    Self::EXECUTABLE.as_str()
                ),
            );
        } else if !path.exists() {
            diag.error(
                Self::EXECUTABLE,
                format!("executable not found: {}", path.display()),
            );
        } else if !path.is_file() {
            diag.error(
                Self::EXECUTABLE,
                format!("executable is not a file: {}", path.display()),
            );
        }
    }
}

/// Whether a path is a bare program name (no directory component).
pub fn is_bare_name(path: &Path) -> bool {
    let mut components = path.components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// How a git step's outcome is judged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StderrPolicy {
    /// Any stderr text is reported as an error (exit status ignored).
    #[default]
    Stderr,
    /// Only a non-zero exit status is a failure; stderr is informational.
    ExitCode,
}
