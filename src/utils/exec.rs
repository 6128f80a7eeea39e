//! External command execution utilities.
//!
//! Provides a Builder-based API for running a command to completion with
//! both output streams captured, optionally on a pseudo-terminal.
//!
//! # Examples
//!
//! ```ignore
//! use crate::utils::exec::Cmd;
//!
//! // Captured stdout/stderr
//! let output = Cmd::new("git").args(["status", "-s"]).cwd(root).output()?;
//!
//! // PTY (credential prompts reach the user)
//! let output = Cmd::new("git").args(["push"]).cwd(root).pty(true).output()?;
//! ```

use anyhow::{Context, Result};
use portable_pty::{CommandBuilder, NativePtySystem, PtySize, PtySystem};
use regex::Regex;
use std::{
    borrow::Cow,
    ffi::{OsStr, OsString},
    io::{ErrorKind, IsTerminal, Read, Write},
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Output},
    sync::OnceLock,
};

// ============================================================================
// Builder API
// ============================================================================

/// Command builder for external process execution.
#[derive(Debug, Default)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    use_pty: bool,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            ..Default::default()
        }
    }

    /// Add arguments.
    ///
    /// Empty arguments are kept: `commit -m ""` must reach the process as-is.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_owned()));
        self
    }

    /// Set working directory.
    pub fn cwd<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_owned());
        self
    }

    /// Enable PTY (pseudo-terminal) mode.
    ///
    /// stdout and stderr arrive merged on the terminal stream and are echoed
    /// live; the returned `Output` carries all of it in `stdout`.
    pub fn pty(mut self, enable: bool) -> Self {
        self.use_pty = enable;
        self
    }

    /// Command line for display (`git commit -m msg`).
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run to completion and return the captured output.
    ///
    /// A non-zero exit status is not an error here; callers decide what
    /// failure means. Errors are spawn/wait failures only.
    pub fn output(self) -> Result<Output> {
        if self.use_pty {
            self.run_with_pty()
        } else {
            self.run_piped()
        }
    }

    /// Get the program name for error messages.
    fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    /// Piped execution.
    ///
    /// `Command::output` reads stdout and stderr concurrently until EOF, so
    /// a child filling one pipe while we wait on the other cannot deadlock.
    fn run_piped(self) -> Result<Output> {
        let name = self.program_name();
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        cmd.output()
            .with_context(|| format!("Failed to execute `{name}`"))
    }

    /// Execution with PTY support.
    ///
    /// The user's stdin feeds the terminal and output is echoed as it
    /// arrives, so prompts (`Username for ...`) can be answered. When stdin
    /// is a terminal it is switched to raw mode for the duration, letting
    /// the child control echo (password prompts stay hidden).
    fn run_with_pty(self) -> Result<Output> {
        let _raw = std::io::stdin()
            .is_terminal()
            .then(RawModeGuard::enable)
            .flatten();
        self.run_pty_with(std::io::stdin(), std::io::stdout())
    }

    /// PTY execution with explicit input and echo streams.
    ///
    /// The input thread is detached: a blocking read on it may outlive the
    /// child.
    fn run_pty_with<R, W>(self, mut input: R, mut echo: W) -> Result<Output>
    where
        R: Read + Send + 'static,
        W: Write + Send + 'static,
    {
        let name = self.program_name();

        let mut cmd_builder = CommandBuilder::new(&self.program);
        cmd_builder.args(&self.args);

        if let Some(dir) = &self.cwd {
            cmd_builder.cwd(dir);
        }

        let pty_system = NativePtySystem::default();
        let pair = pty_system
            .openpty(PtySize {
                rows: 24,
                cols: 80,
                pixel_width: 0,
                pixel_height: 0,
            })
            .with_context(|| format!("Failed to open a pty for `{name}`"))?;

        let mut child = pair
            .slave
            .spawn_command(cmd_builder)
            .with_context(|| format!("Failed to execute `{name}`"))?;
        drop(pair.slave);

        // Forward input to the terminal until either side closes
        let mut writer = pair.master.take_writer()?;
        std::thread::spawn(move || {
            let mut buf = [0u8; 1024];
            loop {
                match input.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        if writer.write_all(&buf[..n]).and_then(|()| writer.flush()).is_err() {
                            break;
                        }
                    }
                    Err(e) if e.kind() == ErrorKind::Interrupted => {}
                    Err(_) => break,
                }
            }
        });

        // Read output in separate thread (PTY blocks until EOF)
        let mut reader = pair.master.try_clone_reader()?;
        let output_handle = std::thread::spawn(move || {
            let mut output = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        echo.write_all(&buf[..n]).and_then(|()| echo.flush()).ok();
                        output.extend_from_slice(&buf[..n]);
                    }
                    Err(e) if e.kind() == ErrorKind::Interrupted => {}
                    // EIO once the child side is closed
                    Err(_) => break,
                }
            }
            output
        });

        let status = child
            .wait()
            .with_context(|| format!("Failed to wait for `{name}`"))?;
        drop(pair.master);

        let stdout = output_handle
            .join()
            .map_err(|_| anyhow::anyhow!("Failed to join output reader thread"))?;

        Ok(Output {
            status: exit_status_from_code(status.exit_code()),
            stdout,
            stderr: Vec::new(),
        })
    }
}

/// Raw terminal mode, restored on drop.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Option<Self> {
        crossterm::terminal::enable_raw_mode().ok().map(|()| Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        crossterm::terminal::disable_raw_mode().ok();
    }
}

/// Convert a PTY exit code to `std::process::ExitStatus`.
#[cfg(unix)]
#[allow(clippy::cast_possible_wrap)]
fn exit_status_from_code(code: u32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw((code as i32) << 8)
}

#[cfg(windows)]
fn exit_status_from_code(code: u32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code)
}

// ============================================================================
// Output Filtering
// ============================================================================

/// Filter rule for command output logging.
///
/// Used to reduce noise by skipping known hints or irrelevant messages.
#[derive(Debug, Clone, Default)]
pub struct FilterRule {
    /// Prefixes to skip when logging output.
    pub skip_prefixes: Vec<String>,
}

impl FilterRule {
    /// Create a new filter rule.
    pub fn new<I, S>(skip_prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skip_prefixes: skip_prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if a line should be skipped.
    fn should_skip(&self, line: &str) -> bool {
        self.skip_prefixes
            .iter()
            .any(|p| !p.is_empty() && line.starts_with(p.as_str()))
    }

    /// Lines of `output` that pass the filter, ANSI escapes removed.
    ///
    /// Interior blank lines survive; leading and trailing ones do not.
    pub fn apply(&self, output: &str) -> String {
        let lines: Vec<_> = output
            .lines()
            .map(strip_ansi)
            .filter(|line| !self.should_skip(line.trim_start()))
            .collect();
        lines.join("\n").trim_matches('\n').trim_end().to_string()
    }

    /// Log output lines that pass the filter.
    pub fn log(&self, module: &str, output: &str) {
        let text = self.apply(output);
        if !text.is_empty() {
            crate::log!(module; "{}", text);
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Strip ANSI escape codes (and PTY carriage returns) from a line.
fn strip_ansi(s: &str) -> Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"\x1b\[[0-9;?]*[a-zA-Z]|\r").expect("static regex is valid")
    });
    re.replace_all(s, "")
}

// ============================================================================
// Tests
// ============================================================================
