//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output shown only with `--verbose`
//! - `status_success` / `status_error` for step outcome lines
//!
//! # Example
//!
//! ```ignore
//! log!("git"; "--- {} ---", label);
//! debug!("exec"; "{} {}", program, args);
//! status_success("commit complete");
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Stream, Style};
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
///
/// Multi-line messages keep the prefix on the first line only, so captured
/// process output reads the way the process printed it.
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply a style when stdout supports color (honors `--color`).
#[inline]
fn paint(text: &str, style: Style) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.style(style))
        .to_string()
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    let style = match module_lower {
        "git" | "run" => Style::new().bright_blue().bold(),
        "commit" | "push" => Style::new().bright_green().bold(),
        "error" => Style::new().bright_red().bold(),
        _ => Style::new().bright_yellow().bold(),
    };
    paint(&prefix, style)
}

// ============================================================================
// Step Status
// ============================================================================

/// Format a success line (✓ prefix, green).
fn format_success(message: &str) -> String {
    format!("{} {message}", paint("✓", Style::new().green()))
}

/// Format an error line (✗ prefix, red) with optional detail.
fn format_error(summary: &str, detail: &str) -> String {
    if detail.is_empty() {
        format!("{} {summary}", paint("✗", Style::new().red()))
    } else {
        format!("{} {summary}\n{detail}", paint("✗", Style::new().red()))
    }
}

fn print_status(line: &str) {
    let mut stdout = stdout().lock();
    writeln!(stdout, "{line}").ok();
    stdout.flush().ok();
}

/// Print a step success line.
pub fn status_success(message: &str) {
    print_status(&format_success(message));
}

/// Print a step failure line.
pub fn status_error(summary: &str, detail: &str) {
    print_status(&format_error(summary, detail));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_toggle() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }

    #[test]
    fn test_prefix_contains_module() {
        owo_colors::set_override(false);
        assert_eq!(colorize_prefix("git", "git"), "[git]");
        assert_eq!(colorize_prefix("Error", "error"), "[Error]");
    }

    #[test]
    fn test_error_line_with_detail() {
        owo_colors::set_override(false);
        assert_eq!(format_error("push failed", ""), "✗ push failed");
        assert_eq!(
            format_error("push failed", "rejected"),
            "✗ push failed\nrejected"
        );
        assert_eq!(format_success("commit complete"), "✓ commit complete");
    }
}
