//! Configuration file generation.
//!
//! Creates cpush.toml with every section at its default value.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::{fs, path::Path};

use crate::{
    config::{CommitConfig, GitConfig, LogConfig, PushConfig},
    log,
};

/// Generate cpush.toml content with comments
pub fn generate_config_template() -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!(
        "# cpush configuration file (v{})\n",
        env!("CARGO_PKG_VERSION")
    ));
    out.push_str("# CLI flags override these; CPUSH_GIT and CPUSH_DIR override the file.\n\n");

    push_section(
        &mut out,
        "git",
        &[
            "executable: a name looked up in PATH, or a path to git",
            "stderr_policy: \"stderr\" reports any stderr text as an error,",
            "               \"exit-code\" only a non-zero exit status",
        ],
        &GitConfig::default(),
    )?;
    push_section(
        &mut out,
        "commit",
        &[
            "message: default commit message",
            "files: paths to stage, space separated; empty stages everything",
        ],
        &CommitConfig::default(),
    )?;
    push_section(
        &mut out,
        "push",
        &[
            "remote/branch: empty pushes the current branch to its upstream",
            "force: push with --force-with-lease",
            "pty: run push on a pseudo-terminal (credential prompts)",
        ],
        &PushConfig::default(),
    )?;
    push_section(
        &mut out,
        "log",
        &["skip_prefixes: output lines starting with these are not logged"],
        &LogConfig::default(),
    )?;

    Ok(out)
}

fn push_section<T: Serialize>(
    out: &mut String,
    header: &str,
    docs: &[&str],
    value: &T,
) -> Result<()> {
    for line in docs {
        out.push_str("# ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&format!("[{header}]\n"));
    out.push_str(&toml::to_string(value).with_context(|| format!("Failed to render [{header}]"))?);
    out.push('\n');
    Ok(())
}

/// Write the default config to `path`, or print it when `dry_run`.
pub fn write_config(path: &Path, dry_run: bool, force: bool) -> Result<()> {
    let content = generate_config_template()?;

    if dry_run {
        print!("{content}");
        return Ok(());
    }

    if path.exists() && !force {
        bail!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        );
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;

    log!("init"; "wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CpushConfig, DEFAULT_MESSAGE, StderrPolicy};

    #[test]
    fn test_template_parses_to_defaults() {
        let template = generate_config_template().unwrap();
        let (config, ignored) = CpushConfig::parse_with_ignored(&template).unwrap();

        assert!(ignored.is_empty(), "unknown fields: {ignored:?}");
        assert_eq!(config.git, GitConfig::default());
        assert_eq!(config.git.stderr_policy, StderrPolicy::Stderr);
        assert_eq!(config.commit.message, DEFAULT_MESSAGE);
        assert_eq!(config.push, PushConfig::default());
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_template_has_every_section() {
        let template = generate_config_template().unwrap();
        for header in ["[git]", "[commit]", "[push]", "[log]"] {
            assert!(template.contains(header), "missing {header}");
        }
        assert!(template.contains("stderr_policy = \"stderr\""));
    }

    #[test]
    fn test_write_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpush.toml");

        write_config(&path, false, false).unwrap();
        assert!(path.is_file());

        fs::write(&path, "# mine").unwrap();
        assert!(write_config(&path, false, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine");

        write_config(&path, false, true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("[git]"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpush.toml");
        write_config(&path, true, false).unwrap();
        assert!(!path.exists());
    }
}
