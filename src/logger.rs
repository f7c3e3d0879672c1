//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output that only shows up with `--verbose`
//! - `notice` for user-facing warnings that must not be missed
//!
//! # Example
//!
//! ```ignore
//! log!("sync"; "{} new assets", count);
//! debug!("scan"; "skipping {}", path.display());
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Stream, Style};
use std::{
    io::{Write, stderr, stdout},
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
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Print a notice to stderr with a warning prefix and an indented detail block.
///
/// Used where the host application would pop up an info dialog.
pub fn notice(summary: &str, detail: &str) {
    let prefix = colorize_prefix_for("warning", "warning", Stream::Stderr);

    let mut stderr = stderr().lock();
    writeln!(stderr, "{prefix} {summary}").ok();
    for line in detail.lines() {
        writeln!(stderr, "  {}", paint(line, Style::new().dimmed(), Stream::Stderr)).ok();
    }
    stderr.flush().ok();
}

/// Apply `style` to `text` if `stream` supports color (or `--color` forces it).
pub fn paint(text: &str, style: Style, stream: Stream) -> String {
    text.if_supports_color(stream, |t| t.style(style))
        .to_string()
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    colorize_prefix_for(module, module_lower, Stream::Stdout)
}

fn colorize_prefix_for(module: &str, module_lower: &str, stream: Stream) -> String {
    let style = match module_lower {
        "sync" => Style::new().bright_blue(),
        "toggle" => Style::new().bright_green(),
        "error" => Style::new().bright_red(),
        "warning" => Style::new().bright_magenta(),
        _ => Style::new().bright_yellow(),
    };
    paint(&format!("[{module}]"), style.bold(), stream)
}

// ============================================================================
// Tests
// ============================================================================
