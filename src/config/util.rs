//! Configuration utility functions.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`.
/// Returns the path to the config file if found.
///
/// # Example
/// ```text
/// /home/user/game/Assets/Scripts/  ← start
/// /home/user/game/cpush.toml       ← found!
/// ```
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.is_file().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

/// Expand a leading `~` and make the path absolute against `base`.
pub fn expand_path(path: &Path, base: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    let path = PathBuf::from(expanded);
    if path.is_relative() {
        base.join(path)
    } else {
        path
    }
}

/// Pick the first value present: CLI flag, then environment, then config.
///
/// Empty environment values count as unset.
pub fn pick_source(
    cli: Option<&Path>,
    env: Option<OsString>,
    config: Option<&Path>,
) -> Option<PathBuf> {
    cli.map(Path::to_path_buf)
        .or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .or_else(|| config.map(Path::to_path_buf))
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_config_file_upward() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let nested = root.join("Assets/Scripts");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.join("cpush.toml"), "").unwrap();

        let found = find_config_file(Path::new("cpush.toml"), &nested).unwrap();
        assert_eq!(found, root.join("cpush.toml"));
    }

    #[test]
    fn test_find_config_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let name = Path::new("cpush-test-surely-absent.toml");
        assert!(find_config_file(name, dir.path()).is_none());
    }

    #[test]
    fn test_find_config_file_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        assert!(find_config_file(&path, Path::new("/")).is_none());
        fs::write(&path, "").unwrap();
        assert_eq!(find_config_file(&path, Path::new("/")), Some(path));
    }

    #[test]
    fn test_expand_path_relative() {
        let expanded = expand_path(Path::new("repo"), Path::new("/work"));
        assert_eq!(expanded, PathBuf::from("/work/repo"));
    }

    #[test]
    fn test_expand_path_absolute() {
        let expanded = expand_path(Path::new("/opt/git/bin/git"), Path::new("/work"));
        assert_eq!(expanded, PathBuf::from("/opt/git/bin/git"));
    }

    #[test]
    fn test_expand_path_tilde() {
        let expanded = expand_path(Path::new("~/repo"), Path::new("/work"));
        assert!(!expanded.starts_with("~"));
        assert!(expanded.ends_with("repo"));
    }

    #[test]
    fn test_pick_source_precedence() {
        let cli = Path::new("/cli/git");
        let cfg = Path::new("/cfg/git");

        assert_eq!(
            pick_source(Some(cli), Some("/env/git".into()), Some(cfg)),
            Some(PathBuf::from("/cli/git"))
        );
        assert_eq!(
            pick_source(None, Some("/env/git".into()), Some(cfg)),
            Some(PathBuf::from("/env/git"))
        );
        assert_eq!(
            pick_source(None, Some(OsString::new()), Some(cfg)),
            Some(PathBuf::from("/cfg/git"))
        );
        assert_eq!(pick_source(None, None, None), None);
    }
}
