//! Logging utilities with colored output and a per-page console.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `Console` which records diagnostics for one page and optionally echoes them
//!
//! # Example
//!
//! ```ignore
//! // Simple logging
//! log!("loader"; "mounted {} into #{}", name, mount);
//!
//! // Page diagnostics (recorded, echoed when enabled)
//! page.console.error("loader", format!("failed to load {url}: {err}"));
//! ```

use colored::{ColoredString, Colorize};
use crossterm::{
    execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{Write, stderr},
    sync::OnceLock,
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Length of brackets around module name: "[]"
const BRACKET_LEN: usize = 2;
/// Space after prefix: "[module] " <- this space
const SPACE_AFTER_PREFIX: usize = 1;

/// Calculate total prefix length for a module name.
///
/// Returns: `module.len() + 3` (for `[`, `]`, and trailing space)
#[inline]
const fn calc_prefix_len(module_len: usize) -> usize {
    module_len + BRACKET_LEN + SPACE_AFTER_PREFIX
}

/// Get terminal width, cached after first call.
/// Falls back to 120 columns if detection fails.
fn get_terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120))
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix.
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

/// Log a message with a colored module prefix.
///
/// Automatically truncates long single-line messages to fit terminal width.
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);
    let width = get_terminal_width() as usize;

    let mut out = stderr().lock();
    execute!(out, Clear(ClearType::UntilNewLine)).ok();

    if message.contains('\n') {
        writeln!(out, "{prefix} {message}").ok();
    } else {
        let max_msg_len = width.saturating_sub(calc_prefix_len(module.len()));
        writeln!(out, "{prefix} {}", truncate_str(message, max_msg_len)).ok();
    }

    out.flush().ok();
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module_lower {
        "loader" | "transition" => prefix.bright_blue().bold(),
        "runtime" => prefix.bright_green().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Truncate a string to fit within `max_len` bytes.
///
/// Ensures the result is valid UTF-8 by finding the nearest character boundary.
#[inline]
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ============================================================================
// Page Console
// ============================================================================

/// Severity of a console entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// One recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Level,
    pub module: String,
    pub message: String,
}

impl LogEntry {
    /// Module prefix and text the entry is echoed with.
    fn echo_line(&self) -> (&str, String) {
        match self.level {
            Level::Info => (&self.module, self.message.clone()),
            Level::Error => ("error", format!("{}: {}", self.module, self.message)),
        }
    }
}

/// Diagnostic channel of a single page.
///
/// Entries are always recorded. When `echo` is set they are also written
/// through [`log`], errors under a red `[error]` prefix.
#[derive(Debug, Default)]
pub struct Console {
    entries: Vec<LogEntry>,
    echo: bool,
}

impl Console {
    pub const fn new(echo: bool) -> Self {
        Self {
            entries: Vec::new(),
            echo,
        }
    }

    pub fn info(&mut self, module: &str, message: impl Into<String>) {
        self.push(Level::Info, module, message.into());
    }

    pub fn error(&mut self, module: &str, message: impl Into<String>) {
        self.push(Level::Error, module, message.into());
    }

    fn push(&mut self, level: Level, module: &str, message: String) {
        let entry = LogEntry {
            level,
            module: module.to_owned(),
            message,
        };
        if self.echo {
            let (prefix, line) = entry.echo_line();
            log!(prefix; "{line}");
        }
        self.entries.push(entry);
    }

    pub const fn echoes(&self) -> bool {
        self.echo
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn errors(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(|e| e.level == Level::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

// ============================================================================
// Tests
// ============================================================================
