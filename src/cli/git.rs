//! `commit`, `push`, `sync` and `run` commands.

use anyhow::Result;

use crate::{
    cli::Commands,
    config::{CpushConfig, StderrPolicy},
    git::{GitError, Report, Session},
};

/// Run a git command against the configured working directory.
pub fn run_git_command(command: &Commands, config: &CpushConfig) -> Result<()> {
    let session = Session::new(config);
    let commit = &config.commit;

    let reports = match command {
        Commands::Commit { .. } => session.commit(&commit.message, &commit.files)?,
        Commands::Push { .. } => session.push(&config.push)?,
        Commands::Sync { .. } => {
            session.commit_and_push(&commit.message, &commit.files, &config.push)?
        }
        Commands::Run { args } => session.run_args(args)?,
        Commands::Init { .. } => return Ok(()),
    };

    check_outcome(&session, &reports)
}

/// Turn failed steps into an error when the policy trusts exit codes.
///
/// Under the `stderr` policy failures are reported in the log only.
fn check_outcome(session: &Session, reports: &[Report]) -> Result<()> {
    if session.policy() != StderrPolicy::ExitCode {
        return Ok(());
    }

    let failed = session.failures(reports).len();
    if failed > 0 {
        return Err(GitError::StepsFailed {
            failed,
            total: reports.len(),
        }
        .into());
    }
    Ok(())
}
