//! Structured console logger with dry-run awareness and summary collection.
//!
//! Every message is also appended to a persistent log file at
//! `$XDG_CACHE_HOME/skills/install.log` (default `~/.cache/skills/install.log`)
//! with timestamps and ANSI codes stripped, regardless of the verbose flag.

use std::fs;
use std::io::Write as _;
use std::path::PathBuf;

/// Task execution result recorded for the end-of-run summary.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Task name as shown in the summary.
    pub name: String,
    /// How the task finished.
    pub status: TaskStatus,
    /// Optional detail (skip reason, error message).
    pub message: Option<String>,
}

/// Status of a completed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Ran to completion.
    Ok,
    /// Not applicable for the current settings.
    NotApplicable,
    /// Deliberately skipped.
    Skipped,
    /// Previewed only.
    DryRun,
    /// Failed with an error.
    Failed,
}

/// Console logger used by all commands.
pub struct Logger {
    verbose: bool,
    tasks: std::cell::RefCell<Vec<TaskEntry>>,
    log_file: Option<PathBuf>,
}

/// Log file path under `$XDG_CACHE_HOME/skills/` (or `~/.cache/skills/`).
fn log_file_path() -> Option<PathBuf> {
    let cache_dir = std::env::var("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".cache")
        });
    let dir = cache_dir.join("skills");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join("install.log"))
}

/// Strip ANSI SGR escape sequences from a string.
fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for inner in chars.by_ref() {
                if inner == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

impl Logger {
    /// Create a logger, truncating the persistent log file for a fresh run.
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        let log_file = log_file_path();

        if let Some(ref path) = log_file {
            let version =
                option_env!("SKILLS_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
            let header = format!(
                "skills {version} {}\n",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            );
            let _ = fs::write(path, header);
        }

        Self {
            verbose,
            tasks: std::cell::RefCell::new(Vec::new()),
            log_file,
        }
    }

    /// Create a logger with an explicit log file, or no file at all.
    ///
    /// Tests use this so file output stays inside their own temp
    /// directories instead of truncating the shared cache path.
    #[must_use]
    pub const fn with_log_file(verbose: bool, log_file: Option<PathBuf>) -> Self {
        Self {
            verbose,
            tasks: std::cell::RefCell::new(Vec::new()),
            log_file,
        }
    }

    fn write_to_file(&self, level: &str, msg: &str) {
        if let Some(ref path) = self.log_file
            && let Ok(mut f) = fs::OpenOptions::new().create(true).append(true).open(path)
        {
            let ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            let clean = strip_ansi(msg);
            let _ = writeln!(f, "{ts} {level} {clean}");
        }
    }

    /// Log an error line.
    pub fn error(&self, msg: &str) {
        eprintln!("\x1b[31mERROR\x1b[0m {msg}");
        self.write_to_file("ERR", msg);
    }

    /// Log a warning line.
    pub fn warn(&self, msg: &str) {
        eprintln!("\x1b[33mWARN\x1b[0m  {msg}");
        self.write_to_file("WRN", msg);
    }

    /// Log a stage header.
    pub fn stage(&self, msg: &str) {
        println!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m");
        self.write_to_file("STG", msg);
    }

    /// Log an informational line.
    pub fn info(&self, msg: &str) {
        println!("  {msg}");
        self.write_to_file("INF", msg);
    }

    /// Log a debug line. Shown on the terminal only when verbose, always
    /// written to the log file.
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            println!("  \x1b[2m{msg}\x1b[0m");
        }
        self.write_to_file("DBG", msg);
    }

    /// Log a dry-run preview line.
    pub fn dry_run(&self, msg: &str) {
        println!("  \x1b[33m[DRY RUN]\x1b[0m {msg}");
        self.write_to_file("DRY", msg);
    }

    /// Record a task result for the summary.
    pub fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        self.tasks.borrow_mut().push(TaskEntry {
            name: name.to_string(),
            status,
            message: message.map(String::from),
        });
    }

    /// Number of recorded tasks that failed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.tasks
            .borrow()
            .iter()
            .filter(|t| t.status == TaskStatus::Failed)
            .count()
    }

    /// Print the summary of all recorded tasks.
    pub fn print_summary(&self) {
        let tasks = self.tasks.borrow();
        if tasks.is_empty() {
            return;
        }

        println!();
        self.stage("Summary");

        let mut counts = [0u32; 5];
        for task in tasks.iter() {
            let (slot, icon, color) = match task.status {
                TaskStatus::Ok => (0, "ok", "\x1b[32m"),
                TaskStatus::NotApplicable => (1, "--", "\x1b[2m"),
                TaskStatus::Skipped => (2, "..", "\x1b[33m"),
                TaskStatus::DryRun => (3, "??", "\x1b[33m"),
                TaskStatus::Failed => (4, "!!", "\x1b[31m"),
            };
            counts[slot] += 1;

            let suffix = task
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));
            let line = format!("{icon} {}{suffix}", task.name);
            println!("  {color}{line}\x1b[0m");
            self.write_to_file("INF", &line);
        }

        let [ok, not_applicable, skipped, dry, failed] = counts;
        let total: u32 = counts.iter().sum();
        let totals = format!(
            "{total} tasks: {ok} ok, {not_applicable} n/a, {skipped} skipped, {dry} dry-run, {failed} failed"
        );
        println!("  {totals}");
        self.write_to_file("INF", &totals);

        if let Some(path) = &self.log_file {
            println!("  \x1b[2mlog: {}\x1b[0m", path.display());
        }
    }
}
