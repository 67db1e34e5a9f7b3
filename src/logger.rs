//! Terminal output.
//!
//! `log!` prints one line tagged with a colored `[module]` prefix. `debug!`
//! and `debug_do!` do the same only under `--verbose`. While serving, the
//! outcome of each refresh goes through the status block instead, which
//! redraws in place so a stale error never lingers above a later success.
//!
//! ```ignore
//! log!("build"; "wrote {}", path.display());
//! status_success("refreshed: style.css");
//! ```

use std::io::{Write, stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{AnsiColors, OwoColorize};
use parking_lot::Mutex;

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Toggle `debug!` output.
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

// ============================================================================
// Macros
// ============================================================================

/// `log!("module"; "format {}", args)`
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like `log!`, but silent unless `--verbose`.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// Run a block only under `--verbose`, for diagnostics that cost
/// something to gather.
#[macro_export]
macro_rules! debug_do {
    ($($body:tt)*) => {{
        if $crate::logger::is_verbose() {
            $($body)*
        }
    }};
}

// ============================================================================
// Tagged lines
// ============================================================================

pub fn log(module: &str, message: &str) {
    let tag = format!("[{module}]");
    let tag = tag.color(module_color(module));
    let tag = tag.bold();

    let mut out = stdout().lock();
    execute!(out, Clear(ClearType::UntilNewLine)).ok();
    writeln!(out, "{tag} {message}").ok();
    out.flush().ok();
}

fn module_color(module: &str) -> AnsiColors {
    match module.to_ascii_lowercase().as_str() {
        "serve" | "ws" => AnsiColors::BrightBlue,
        "watch" => AnsiColors::BrightGreen,
        "preview" | "build" | "init" => AnsiColors::BrightCyan,
        "error" => AnsiColors::BrightRed,
        _ => AnsiColors::BrightYellow,
    }
}

// ============================================================================
// Status block
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Ok,
    Failed,
    Warn,
}

impl Level {
    const fn symbol(self) -> &'static str {
        match self {
            Self::Ok => "✓",
            Self::Failed => "✗",
            Self::Warn => "⚠",
        }
    }

    const fn color(self) -> AnsiColors {
        match self {
            Self::Ok => AnsiColors::Green,
            Self::Failed => AnsiColors::Red,
            Self::Warn => AnsiColors::Yellow,
        }
    }
}

/// Number of terminal lines the last status occupied.
static STATUS_LINES: Mutex<usize> = Mutex::new(0);

fn show_status(level: Level, text: &str) {
    let mut shown = STATUS_LINES.lock();
    let mut out = stdout().lock();

    if let Ok(lines) = u16::try_from(*shown)
        && lines > 0
    {
        execute!(out, cursor::MoveUp(lines), Clear(ClearType::FromCursorDown)).ok();
    }

    let stamp = format!("[{}]", wall_clock(unix_secs()));
    writeln!(
        out,
        "{} {} {text}",
        stamp.dimmed(),
        level.symbol().color(level.color())
    )
    .ok();
    out.flush().ok();

    *shown = line_count(text);
}

fn line_count(text: &str) -> usize {
    text.lines().count().max(1)
}

fn unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// `HH:MM:SS` of a UTC timestamp.
fn wall_clock(secs: u64) -> String {
    let day = secs % 86_400;
    format!("{:02}:{:02}:{:02}", day / 3600, day / 60 % 60, day % 60)
}

pub fn status_success(message: &str) {
    show_status(Level::Ok, message);
}

/// Show a failure; a non-empty `detail` goes on the lines below `summary`.
pub fn status_error(summary: &str, detail: &str) {
    if detail.is_empty() {
        show_status(Level::Failed, summary);
    } else {
        show_status(Level::Failed, &format!("{summary}\n{detail}"));
    }
}

pub fn status_warning(detail: &str) {
    show_status(Level::Warn, detail);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_clock_wraps_at_midnight() {
        assert_eq!(wall_clock(0), "00:00:00");
        assert_eq!(wall_clock(3661), "01:01:01");
        assert_eq!(wall_clock(86_400 + 59), "00:00:59");
    }

    #[test]
    fn test_log_and_status_print() {
        log("watch", "tagged line");
        crate::debug!("watch"; "only with --verbose");
        status_error("error in style.css", "no such file");
        status_success("refreshed: style.css");
    }

    #[test]
    fn test_module_color_is_case_insensitive() {
        assert_eq!(module_color("WATCH"), module_color("watch"));
        assert_eq!(module_color("whatever"), AnsiColors::BrightYellow);
    }

    #[test]
    fn test_line_count_of_multiline_error() {
        assert_eq!(line_count(""), 1);
        assert_eq!(line_count("refresh failed"), 1);
        assert_eq!(line_count("error in style.css\nno such file"), 2);
    }
}
