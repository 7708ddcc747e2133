//! Named tasks that reconcile one unit kind against its destination root.
//!
//! Tasks run sequentially; the unit count is small and the work is
//! filesystem metadata calls, so there is no scheduler. A failing task never
//! stops the remaining tasks — each kind is reconciled independently.
pub mod links;

use anyhow::Result;

use crate::config::Settings;
use crate::logging::{Logger, TaskStatus};

/// Shared state handed to every task.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    /// Resolved settings for this invocation.
    pub settings: &'a Settings,
    /// Logger for per-unit lines and task status recording.
    pub log: &'a Logger,
    /// Preview mutations instead of performing them.
    pub dry_run: bool,
}

/// Result of a completed task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Task ran to completion.
    Ok,
    /// Task did not run, with a reason.
    Skipped(String),
    /// Task previewed its changes without applying them.
    DryRun,
}

/// Per-unit outcome tallies for one task run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    /// Symlinks newly created (or that would be, in a dry run).
    pub created: u32,
    /// Stale symlinks replaced.
    pub updated: u32,
    /// Units already correctly linked. Reported once, in aggregate.
    pub unchanged: u32,
    /// Units skipped because the destination is a foreign entry.
    pub skipped: u32,
    /// Units whose symlink operation failed. Reported per unit, non-fatal.
    pub failed: u32,
    /// Symlinks removed by an unlink task.
    pub removed: u32,
}

/// A named, executable task.
pub trait Task {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Whether this task is applicable for the current settings.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error only for kind-level failures (discovery or the
    /// destination root itself); per-unit problems are logged and tallied.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// The complete set of tasks run by the install command.
#[must_use]
pub fn all_install_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(links::LinkUnits::new(crate::units::UnitKind::Skill)),
        Box::new(links::LinkUnits::new(crate::units::UnitKind::Command)),
    ]
}

/// The complete set of tasks run by the uninstall command.
#[must_use]
pub fn all_uninstall_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(links::UnlinkUnits::new(crate::units::UnitKind::Skill)),
        Box::new(links::UnlinkUnits::new(crate::units::UnitKind::Command)),
    ]
}

/// Execute a task, recording the result in the logger.
pub fn execute(task: &dyn Task, ctx: &Context) {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return;
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_task(task.name(), TaskStatus::DryRun, None);
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::Path;

    fn settings_for(root: &Path) -> Settings {
        Settings {
            source_root: root.to_path_buf(),
            manifest_name: "SKILL.md".to_string(),
            commands_dir: "commands".to_string(),
            command_ext: "md".to_string(),
            skills_dest: root.join("dest-skills"),
            commands_dest: root.join("dest-commands"),
        }
    }

    struct MockTask {
        name: &'static str,
        should_run: bool,
        result: Result<TaskResult, String>,
    }

    impl Task for MockTask {
        fn name(&self) -> &str {
            self.name
        }
        fn should_run(&self, _ctx: &Context) -> bool {
            self.should_run
        }
        fn run(&self, _ctx: &Context) -> Result<TaskResult> {
            self.result.clone().map_err(|s| anyhow::anyhow!("{s}"))
        }
    }

    fn run_mock(task: &MockTask) -> Logger {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_for(dir.path());
        let log = Logger::with_log_file(false, None);
        let ctx = Context {
            settings: &settings,
            log: &log,
            dry_run: false,
        };
        execute(task, &ctx);
        log
    }

    #[test]
    fn execute_skips_non_applicable_task() {
        let log = run_mock(&MockTask {
            name: "na-task",
            should_run: false,
            result: Ok(TaskResult::Ok),
        });
        assert_eq!(log.failure_count(), 0);
    }

    #[test]
    fn execute_records_ok_task() {
        let log = run_mock(&MockTask {
            name: "ok-task",
            should_run: true,
            result: Ok(TaskResult::Ok),
        });
        assert_eq!(log.failure_count(), 0);
    }

    #[test]
    fn execute_records_failed_task() {
        let log = run_mock(&MockTask {
            name: "fail-task",
            should_run: true,
            result: Err("kaboom".to_string()),
        });
        assert_eq!(log.failure_count(), 1);
    }

    #[test]
    fn execute_records_skipped_task() {
        let log = run_mock(&MockTask {
            name: "skip-task",
            should_run: true,
            result: Ok(TaskResult::Skipped("nothing to do".to_string())),
        });
        assert_eq!(log.failure_count(), 0);
    }

    #[test]
    fn install_task_list_covers_both_kinds() {
        let tasks = all_install_tasks();
        let names: Vec<&str> = tasks.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["Link skills", "Link commands"]);
    }

    #[test]
    fn uninstall_task_list_covers_both_kinds() {
        let tasks = all_uninstall_tasks();
        let names: Vec<&str> = tasks.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["Unlink skills", "Unlink commands"]);
    }
}
