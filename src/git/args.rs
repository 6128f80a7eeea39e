//! Argument lists for each git step.
//!
//! Pure functions, so the exact argv git receives is testable without
//! spawning anything.

use crate::config::PushConfig;

/// Arguments for the staging step.
///
/// A blank filter stages everything (`add .`). Otherwise the filter is
/// split into words the way a command line would be, so
/// `"Assets/a.cs \"My Scene.unity\""` stages two paths.
pub fn stage_args(files: &str) -> Vec<String> {
    let words = split_words(files);
    if words.is_empty() {
        return vec!["add".to_string(), ".".to_string()];
    }
    std::iter::once("add".to_string()).chain(words).collect()
}

/// Arguments for the commit step. The message is passed through untouched
/// as a single argument.
pub fn commit_args(message: &str) -> Vec<String> {
    vec!["commit".to_string(), "-m".to_string(), message.to_string()]
}

/// Arguments for the push step.
///
/// Bare `push` uses the branch's upstream; `remote` and `branch` are only
/// added when configured.
pub fn push_args(push: &PushConfig) -> Vec<String> {
    let mut args = vec!["push".to_string()];
    if push.force {
        args.push("--force-with-lease".to_string());
    }
    let remote = push.remote.trim();
    if !remote.is_empty() {
        args.push(remote.to_string());
        let branch = push.branch.trim();
        if !branch.is_empty() {
            args.push(branch.to_string());
        }
    }
    args
}

/// Human-readable label for the staging step.
pub fn stage_label(files: &str) -> String {
    if files.trim().is_empty() {
        "Staging all changes".to_string()
    } else {
        format!("Staging {}", files.trim())
    }
}

/// Split a command-line fragment into words.
///
/// Whitespace separates words and double quotes group text (the quotes
/// themselves are removed). A single quote is an ordinary character, so
/// `Bob's.cs` stays intact. An unterminated quote runs to the end.
pub fn split_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut in_word = false;

    for c in text.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if in_word {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_filter_stages_all() {
        assert_eq!(stage_args(""), strings(&["add", "."]));
        assert_eq!(stage_args("   "), strings(&["add", "."]));
        assert_eq!(stage_label(""), "Staging all changes");
    }

    #[test]
    fn test_filter_passed_as_given() {
        assert_eq!(stage_args("README.md"), strings(&["add", "README.md"]));
        assert_eq!(
            stage_args("Assets/a.cs Assets/b.cs"),
            strings(&["add", "Assets/a.cs", "Assets/b.cs"])
        );
        assert_eq!(stage_args("*.cs"), strings(&["add", "*.cs"]));
        assert_eq!(stage_label("Assets/a.cs"), "Staging Assets/a.cs");
    }

    #[test]
    fn test_filter_quotes_group_words() {
        assert_eq!(
            stage_args("\"My Scene.unity\" \"Other File.txt\" plain"),
            strings(&["add", "My Scene.unity", "Other File.txt", "plain"])
        );
    }

    #[test]
    fn test_filter_keeps_apostrophes() {
        assert_eq!(
            stage_args("Assets/Bob's.cs Assets/x.cs"),
            strings(&["add", "Assets/Bob's.cs", "Assets/x.cs"])
        );
        assert_eq!(
            stage_args("'single' \"Bob's Level.unity\""),
            strings(&["add", "'single'", "Bob's Level.unity"])
        );
    }

    #[test]
    fn test_commit_message_untouched() {
        let message = "Fix \"jump\" height; it's  two  spaces\nsecond line";
        let args = commit_args(message);
        assert_eq!(args.len(), 3);
        assert_eq!(args[0], "commit");
        assert_eq!(args[1], "-m");
        assert_eq!(args[2], message);
        assert_eq!(commit_args("")[2], "");
    }

    #[test]
    fn test_push_args() {
        assert_eq!(push_args(&PushConfig::default()), strings(&["push"]));

        let push = PushConfig {
            remote: "origin".to_string(),
            branch: "main".to_string(),
            force: true,
            pty: false,
        };
        assert_eq!(
            push_args(&push),
            strings(&["push", "--force-with-lease", "origin", "main"])
        );
    }

    #[test]
    fn test_push_branch_needs_remote() {
        let push = PushConfig {
            branch: "main".to_string(),
            ..Default::default()
        };
        assert_eq!(push_args(&push), strings(&["push"]));
    }

    #[test]
    fn test_split_words_edge_cases() {
        assert!(split_words("").is_empty());
        assert_eq!(split_words("a\t b\n c"), strings(&["a", "b", "c"]));
        assert_eq!(split_words("\"\""), strings(&[""]));
        assert_eq!(split_words("pre\"fix suf\"x"), strings(&["prefix sufx"]));
        assert_eq!(split_words("\"unterminated rest"), strings(&["unterminated rest"]));
        assert_eq!(split_words("\"it's\""), strings(&["it's"]));
        assert_eq!(split_words("it's"), strings(&["it's"]));
    }
}
