//! Terminal output for playpen.
//!
//! `log!` prints a line with a colored `[module]` prefix; `debug!` does the
//! same only under `--verbose`. Render results and preview console problems
//! go through a single status line that rewrites itself, so a long editing
//! session does not flood the scrollback.
//!
//! ```ignore
//! log!("serve"; "http://{}", addr);
//! debug!("refresh"; "pending, deadline in {:?}", wait);
//! logger::status_success("rendered index.html (aggregate)");
//! ```

use std::io::{Write, stdout};
use std::sync::LazyLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// `log!("module"; "format {}", args)`
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like `log!`, printed only with `--verbose`.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

pub fn log(module: &str, message: &str) {
    let prefix = prefix(module);
    let mut out = stdout().lock();
    execute!(out, Clear(ClearType::UntilNewLine)).ok();
    writeln!(out, "{prefix} {message}").ok();
    out.flush().ok();
}

fn prefix(module: &str) -> String {
    let tag = format!("[{module}]");
    match module {
        "serve" => tag.bright_blue().bold().to_string(),
        "render" => tag.bright_green().bold().to_string(),
        "console" => tag.bright_magenta().bold().to_string(),
        "error" => tag.bright_red().bold().to_string(),
        _ => tag.bright_yellow().bold().to_string(),
    }
}

/// `HH:MM:SS`, UTC.
fn clock() -> String {
    let secs = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());
    format!(
        "{:02}:{:02}:{:02}",
        (secs / 3600) % 24,
        (secs / 60) % 60,
        secs % 60
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Ok,
    Warn,
    Fail,
}

impl Outcome {
    fn symbol(self) -> String {
        match self {
            Self::Ok => "✓".green().to_string(),
            Self::Warn => "⚠".yellow().to_string(),
            Self::Fail => "✗".red().to_string(),
        }
    }
}

/// The self-rewriting status line of `playpen serve`.
///
/// Each entry replaces the previous one. An entry identical to the last
/// gets a repeat counter instead of a new timestamped line.
struct StatusLine {
    /// Terminal lines the previous entry occupied.
    height: usize,
    last: Option<(Outcome, String)>,
    repeats: usize,
}

static STATUS: LazyLock<Mutex<StatusLine>> = LazyLock::new(|| Mutex::new(StatusLine::new()));

impl StatusLine {
    const fn new() -> Self {
        Self {
            height: 0,
            last: None,
            repeats: 0,
        }
    }

    /// Record an entry and return the text to print.
    fn push(&mut self, outcome: Outcome, message: String) -> String {
        let repeated = self
            .last
            .as_ref()
            .is_some_and(|(o, m)| *o == outcome && *m == message);
        self.repeats = if repeated { self.repeats + 1 } else { 1 };

        let text = if self.repeats > 1 {
            format!("{message} (x{})", self.repeats)
        } else {
            message.clone()
        };
        self.last = Some((outcome, message));
        text
    }

    fn show(&mut self, outcome: Outcome, message: String) {
        let text = self.push(outcome, message);
        let mut out = stdout().lock();

        if self.height > 0 {
            #[allow(clippy::cast_possible_truncation)]
            execute!(out, cursor::MoveUp(self.height as u16)).ok();
            execute!(out, Clear(ClearType::FromCursorDown)).ok();
        }

        let time = format!("[{}]", clock()).dimmed().to_string();
        writeln!(out, "{time} {} {text}", outcome.symbol()).ok();
        out.flush().ok();

        self.height = height(&text);
    }
}

fn height(text: &str) -> usize {
    text.lines().count().max(1)
}

pub fn status_success(message: &str) {
    STATUS.lock().show(Outcome::Ok, message.to_string());
}

/// `summary` on the status line, `detail` (if any) underneath.
pub fn status_error(summary: &str, detail: &str) {
    let message = if detail.is_empty() {
        summary.to_string()
    } else {
        format!("{summary}\n{detail}")
    };
    STATUS.lock().show(Outcome::Fail, message);
}

pub fn status_warning(detail: &str) {
    STATUS.lock().show(Outcome::Warn, detail.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_entry_counts() {
        let mut line = StatusLine::new();
        assert_eq!(line.push(Outcome::Ok, "rendered a.html".into()), "rendered a.html");
        assert_eq!(
            line.push(Outcome::Ok, "rendered a.html".into()),
            "rendered a.html (x2)"
        );
        assert_eq!(
            line.push(Outcome::Ok, "rendered a.html".into()),
            "rendered a.html (x3)"
        );
    }

    #[test]
    fn test_different_entry_resets_count() {
        let mut line = StatusLine::new();
        line.push(Outcome::Ok, "rendered a.html".into());
        line.push(Outcome::Ok, "rendered a.html".into());
        assert_eq!(line.push(Outcome::Warn, "rendered a.html".into()), "rendered a.html");
        assert_eq!(line.push(Outcome::Ok, "rendered b.md".into()), "rendered b.md");
    }

    #[test]
    fn test_height() {
        assert_eq!(height("rendered index.html"), 1);
        assert_eq!(height("console error\nboom"), 2);
        assert_eq!(height(""), 1);
    }

    #[test]
    fn test_verbose_toggle() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
