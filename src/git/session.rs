//! Working-directory session: runs git steps and logs their output.

use anyhow::Result;
use std::{
    path::{Path, PathBuf},
    process::{ExitStatus, Output},
};

use super::{
    GitError,
    args::{commit_args, push_args, stage_args, stage_label},
};
use crate::{
    config::{CpushConfig, PushConfig, StderrPolicy},
    debug, log,
    logger::{status_error, status_success},
    utils::exec::{Cmd, FilterRule},
};

/// Captured result of one git step.
#[derive(Debug, Clone)]
pub struct Report {
    /// Action label (`Committing changes`).
    pub label: String,
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl Report {
    fn from_output(label: &str, output: Output) -> Self {
        Self {
            label: label.to_string(),
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Exit status was zero.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Any stderr text at all.
    pub fn has_stderr(&self) -> bool {
        !self.stderr.is_empty()
    }

    /// Whether this step counts as failed under `policy`.
    pub fn is_failure(&self, policy: StderrPolicy) -> bool {
        match policy {
            StderrPolicy::Stderr => self.has_stderr(),
            StderrPolicy::ExitCode => !self.success(),
        }
    }
}

/// Git invocations against one working directory.
#[derive(Debug, Clone)]
pub struct Session {
    executable: PathBuf,
    root: PathBuf,
    policy: StderrPolicy,
    filter: FilterRule,
}

impl Session {
    pub fn new(config: &CpushConfig) -> Self {
        Self {
            executable: config.git.executable.clone(),
            root: config.get_root().to_path_buf(),
            policy: config.git.stderr_policy,
            filter: config.log.filter(),
        }
    }

    pub fn policy(&self) -> StderrPolicy {
        self.policy
    }

    /// Pre-flight: the working directory must be non-empty and exist.
    pub fn check_root(&self) -> Result<(), GitError> {
        if self.root.as_os_str().is_empty() || !self.root.is_dir() {
            debug!("git"; "not a directory: '{}'", self.root.display());
            return Err(GitError::InvalidWorkingDirectory);
        }
        Ok(())
    }

    /// Stage (everything, or `files`) then commit with `message`.
    pub fn commit(&self, message: &str, files: &str) -> Result<Vec<Report>> {
        self.check_root()?;

        let reports = vec![
            self.run_step(&stage_label(files), &stage_args(files), false)?,
            self.run_step("Committing changes", &commit_args(message), false)?,
        ];

        self.report_completion("commit", &reports);
        Ok(reports)
    }

    /// Push the current branch (or the configured remote/branch).
    pub fn push(&self, push: &PushConfig) -> Result<Vec<Report>> {
        self.check_root()?;

        let reports = vec![self.run_step("Pushing to remote", &push_args(push), push.pty)?];

        self.report_completion("push", &reports);
        Ok(reports)
    }

    /// Commit, then push.
    ///
    /// The push runs whatever the commit steps wrote to stderr.
    pub fn commit_and_push(
        &self,
        message: &str,
        files: &str,
        push: &PushConfig,
    ) -> Result<Vec<Report>> {
        let mut reports = self.commit(message, files)?;
        reports.extend(self.push(push)?);
        Ok(reports)
    }

    /// Run git with arbitrary arguments.
    pub fn run_args(&self, args: &[String]) -> Result<Vec<Report>> {
        self.check_root()?;
        let label = format!("git {}", args.join(" "));
        Ok(vec![self.run_step(&label, args, false)?])
    }

    /// Steps that failed under the session's policy.
    pub fn failures<'a>(&self, reports: &'a [Report]) -> Vec<&'a Report> {
        reports
            .iter()
            .filter(|r| r.is_failure(self.policy))
            .collect()
    }

    /// Run one step to completion, then log everything it printed.
    ///
    /// PTY output is already on the terminal when the step ends, so only the
    /// header (printed first) and the outcome are logged for it.
    fn run_step(&self, label: &str, args: &[String], pty: bool) -> Result<Report> {
        let cmd = Cmd::new(&self.executable)
            .args(args)
            .cwd(&self.root)
            .pty(pty);
        debug!("exec"; "{} (in {})", cmd.display(), self.root.display());

        if pty {
            log!("git"; "--- {} ---", label);
        }
        let report = Report::from_output(label, cmd.output()?);
        debug!("exec"; "{} exited with {}", label, report.status);

        self.log_report(&report, pty);
        Ok(report)
    }

    fn log_report(&self, report: &Report, streamed: bool) {
        if !streamed {
            log!("git"; "--- {} ---", report.label);
            self.filter.log("git", &report.stdout);
        }

        if report.has_stderr() {
            let module = match self.policy {
                StderrPolicy::Stderr => "error",
                StderrPolicy::ExitCode => "git",
            };
            self.filter.log(module, &report.stderr);
        }

        if self.policy == StderrPolicy::ExitCode && !report.success() {
            log!("error"; "{} failed ({})", report.label, report.status);
        }
    }

    /// Steps that turn the completion line into an error.
    ///
    /// Under `stderr` the per-step errors are already logged and the action
    /// still reports completion; under `exit-code` a non-zero exit does not.
    fn incomplete<'a>(&self, reports: &'a [Report]) -> Vec<&'a Report> {
        match self.policy {
            StderrPolicy::Stderr => Vec::new(),
            StderrPolicy::ExitCode => self.failures(reports),
        }
    }

    fn report_completion(&self, action: &str, reports: &[Report]) {
        let failed = self.incomplete(reports);
        if failed.is_empty() {
            status_success(&format!("{action} complete"));
        } else {
            let steps: Vec<_> = failed.iter().map(|r| r.label.as_str()).collect();
            status_error(&format!("{action} finished with errors"), &steps.join("\n"));
        }
    }
}
