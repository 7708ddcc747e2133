//! Top-level subcommand orchestration.
pub mod install;
pub mod status;
pub mod uninstall;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::Settings;
use crate::logging::Logger;
use crate::tasks::{self, Context, Task};

/// Shared state produced by the common command setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    /// Resolved settings for this invocation.
    pub settings: Settings,
}

impl CommandSetup {
    /// Resolve the source root and settings, logging what was found.
    ///
    /// Runs before any mutation, so a missing source root aborts the whole
    /// command with nothing changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the source root cannot be determined or
    /// `linker.toml` fails to parse.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        log.stage("Resolving source root");
        let settings = Settings::resolve(global.source.as_deref())?;
        log.info(&format!("source: {}", settings.source_root.display()));
        log.debug(&format!("skills dest: {}", settings.skills_dest.display()));
        log.debug(&format!(
            "commands dest: {}",
            settings.commands_dest.display()
        ));
        Ok(Self { settings })
    }
}

/// Execute every task in order, print the summary, and bail if any task
/// recorded a failure.
///
/// # Errors
///
/// Returns an error if one or more tasks recorded a failure.
pub fn run_tasks_to_completion<'a>(
    tasks: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &Context,
    log: &Logger,
) -> Result<()> {
    for task in tasks {
        tasks::execute(task, ctx);
    }

    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} task(s) failed");
    }
    Ok(())
}
