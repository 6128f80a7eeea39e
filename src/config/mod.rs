//! Configuration management for `cpush.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── git        # [git]
//! │   ├── commit     # [commit]
//! │   ├── push       # [push]
//! │   └── log        # [log]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # CpushConfig (this file)
//! ```
//!
//! The file is optional. Values resolve in this order, first wins:
//!
//! | Setting           | CLI     | Environment | Config              | Fallback          |
//! |-------------------|---------|-------------|---------------------|-------------------|
//! | git executable    | `--git` | `CPUSH_GIT` | `[git] executable`  | `git` (PATH)      |
//! | working directory | `--dir` | `CPUSH_DIR` | config file's dir   | current directory |

pub mod section;
pub mod types;
mod util;

use util::{expand_path, find_config_file, pick_source};

pub use section::{
    CommitConfig, DEFAULT_MESSAGE, GIT_ENV, GitConfig, LogConfig, PushConfig, StderrPolicy,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands, CommitArgs, PushArgs},
    debug, log,
    utils::path::normalize_path,
};
use anyhow::{Context, Result, bail};
use section::git::is_bare_name;
use serde::{Deserialize, Serialize};
use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

/// Default config filename
pub const CONFIG_FILE: &str = "cpush.toml";

/// Environment variable overriding the working directory.
pub const DIR_ENV: &str = "CPUSH_DIR";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing cpush.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CpushConfig {
    /// Path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Working directory git runs in (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Git executable settings
    #[serde(default)]
    pub git: GitConfig,

    /// Commit defaults
    #[serde(default)]
    pub commit: CommitConfig,

    /// Push settings
    #[serde(default)]
    pub push: PushConfig,

    /// Output filtering
    #[serde(default)]
    pub log: LogConfig,
}

impl CpushConfig {
    /// Load configuration for the parsed command line.
    ///
    /// Searches upward from cwd for the config file; a missing file means
    /// defaults, unless `--config` named a non-default file.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        Self::load_from(
            cli,
            &cwd,
            std::env::var_os(GIT_ENV),
            std::env::var_os(DIR_ENV),
        )
    }

    /// [`load`](Self::load) with the process environment passed in.
    pub fn load_from(
        cli: &Cli,
        cwd: &Path,
        env_git: Option<OsString>,
        env_dir: Option<OsString>,
    ) -> Result<Self> {
        let config_path = find_config_file(&cli.config, cwd);

        let mut config = match &config_path {
            Some(path) => Self::from_path(path)?,
            None if cli.config != Path::new(CONFIG_FILE) => {
                bail!("Config file '{}' not found", cli.config.display());
            }
            None => {
                debug!("config"; "no {} found, using defaults", CONFIG_FILE);
                Self::default()
            }
        };
        config.config_path = config_path;

        config.apply_command_options(cli);
        config.resolve_root(cli.dir.as_deref(), env_dir, cwd);
        config.resolve_executable(cli.git.as_deref(), env_git, cwd);

        debug!("config"; "working directory: {}", config.root.display());
        debug!("config"; "git executable: {}", config.git.executable.display());

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("Failed to parse '{}'", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    pub(crate) fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            log!("warning"; "- {}", field);
        }
    }

    /// Directory containing the config file, if any.
    pub fn config_dir(&self) -> Option<&Path> {
        self.config_path.as_deref().and_then(Path::parent)
    }

    /// Working directory git runs in.
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Commit { commit } => self.apply_commit_args(commit),
            Commands::Push { push } => self.apply_push_args(push),
            Commands::Sync { commit, push } => {
                self.apply_commit_args(commit);
                self.apply_push_args(push);
            }
            Commands::Run { .. } | Commands::Init { .. } => {}
        }
    }

    fn apply_commit_args(&mut self, args: &CommitArgs) {
        Self::update_option(&mut self.commit.message, args.message.as_ref());
        Self::update_option(&mut self.commit.files, args.files.as_ref());
    }

    fn apply_push_args(&mut self, args: &PushArgs) {
        Self::update_option(&mut self.push.remote, args.remote.as_ref());
        Self::update_option(&mut self.push.branch, args.branch.as_ref());
        Self::update_option(&mut self.push.force, args.force.as_ref());
        Self::update_option(&mut self.push.pty, args.pty.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path resolution
    // ========================================================================

    /// Resolve the working directory.
    ///
    /// An explicitly empty value stays empty so the pre-flight check
    /// rejects it instead of silently running in cwd.
    fn resolve_root(&mut self, cli: Option<&Path>, env: Option<OsString>, cwd: &Path) {
        self.root = match pick_source(cli, env, None) {
            Some(dir) if dir.as_os_str().is_empty() => PathBuf::new(),
            Some(dir) => normalize_path(&expand_path(&dir, cwd)),
            None => self.config_dir().unwrap_or(cwd).to_path_buf(),
        };
    }

    /// Resolve the git executable to an absolute path where possible.
    ///
    /// Relative paths from the config file are relative to that file;
    /// relative paths from the CLI or environment are relative to cwd.
    fn resolve_executable(&mut self, cli: Option<&Path>, env: Option<OsString>, cwd: &Path) {
        let from_config = cli.is_none() && env.as_ref().is_none_or(|v| v.is_empty());
        let base = if from_config {
            self.config_dir().unwrap_or(cwd).to_path_buf()
        } else {
            cwd.to_path_buf()
        };

        if let Some(program) = pick_source(cli, env, Some(&self.git.executable)) {
            self.git.executable = resolve_program(&program, &base);
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once. The working
    /// directory is checked later, right before git would run.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.git.validate(&mut diag);
        self.push.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

/// Resolve a program: bare names through `PATH`, paths against `base`.
///
/// An unresolvable bare name is returned unchanged for validation to report.
pub fn resolve_program(program: &Path, base: &Path) -> PathBuf {
    if is_bare_name(program) {
        which::which(program).unwrap_or_else(|_| program.to_path_buf())
    } else {
        normalize_path(&expand_path(program, base))
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config TOML.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> CpushConfig {
    let (parsed, ignored) = CpushConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
