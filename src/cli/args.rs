//! Command-line interface definitions.

use clap::{
    ColorChoice, Parser, Subcommand,
    builder::{OsStringValueParser, TypedValueParser},
};
use std::path::PathBuf;

/// Stage, commit and push through your git executable
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: cpush.toml, searched upward)
    #[arg(short = 'C', long, global = true, default_value = "cpush.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Working directory git runs in [env: CPUSH_DIR]
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath,
          value_parser = OsStringValueParser::new().map(PathBuf::from))]
    pub dir: Option<PathBuf>,

    /// Git executable, a name in PATH or a path [env: CPUSH_GIT]
    #[arg(short, long, global = true, value_hint = clap::ValueHint::ExecutablePath)]
    pub git: Option<PathBuf>,

    /// Print every git command line and exit status
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Stage changes and commit them
    #[command(visible_alias = "c")]
    Commit {
        #[command(flatten)]
        commit: CommitArgs,
    },

    /// Push the current branch to its remote
    #[command(visible_alias = "p")]
    Push {
        #[command(flatten)]
        push: PushArgs,
    },

    /// Commit, then push
    #[command(visible_alias = "s")]
    Sync {
        #[command(flatten)]
        commit: CommitArgs,

        #[command(flatten)]
        push: PushArgs,
    },

    /// Run git with arbitrary arguments (e.g. `cpush run -- status -s`)
    #[command(visible_alias = "r")]
    Run {
        /// Arguments passed to git as-is
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Write a default cpush.toml to the current directory
    #[command(visible_alias = "i")]
    Init {
        /// Print the config template instead of writing it
        #[arg(long)]
        dry: bool,

        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

/// Commit arguments (override `[commit]`).
#[derive(clap::Args, Debug, Clone)]
pub struct CommitArgs {
    /// Commit message
    #[arg(short, long)]
    pub message: Option<String>,

    /// Files to stage, space separated (quote paths with spaces). Empty stages everything.
    #[arg(short, long)]
    pub files: Option<String>,
}

/// Push arguments (override `[push]`).
#[derive(clap::Args, Debug, Clone)]
pub struct PushArgs {
    /// Remote to push to (default: the branch's upstream)
    #[arg(long)]
    pub remote: Option<String>,

    /// Branch to push (requires --remote or push.remote)
    #[arg(long)]
    pub branch: Option<String>,

    /// Push with --force-with-lease
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub force: Option<bool>,

    /// Run push on a pseudo-terminal so credential prompts reach you
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub pty: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cpush").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_commit_args() {
        let cli = parse(&["commit", "-m", "hello world", "-f", "a.txt b.txt"]);
        match cli.command {
            Commands::Commit { commit } => {
                assert_eq!(commit.message.as_deref(), Some("hello world"));
                assert_eq!(commit.files.as_deref(), Some("a.txt b.txt"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = parse(&["push", "--dir", "/work", "--git", "/opt/git", "-v"]);
        assert_eq!(cli.dir, Some(PathBuf::from("/work")));
        assert_eq!(cli.git, Some(PathBuf::from("/opt/git")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_empty_dir_accepted() {
        let cli = parse(&["--dir", "", "push"]);
        assert_eq!(cli.dir, Some(PathBuf::new()));
    }

    #[test]
    fn test_sync_flags() {
        let cli = parse(&["s", "-m", "msg", "--force", "--remote", "origin"]);
        match cli.command {
            Commands::Sync { commit, push } => {
                assert_eq!(commit.message.as_deref(), Some("msg"));
                assert!(commit.files.is_none());
                assert_eq!(push.force, Some(true));
                assert_eq!(push.remote.as_deref(), Some("origin"));
                assert!(push.pty.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_run_passes_hyphen_args() {
        let cli = parse(&["run", "--", "log", "--oneline", "-n", "3"]);
        match cli.command {
            Commands::Run { args } => assert_eq!(args, ["log", "--oneline", "-n", "3"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_run_requires_args() {
        let result = Cli::try_parse_from(["cpush", "run"]);
        assert!(result.is_err());
    }
}
