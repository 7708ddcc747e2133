//! Install command implementation.
use anyhow::Result;

use crate::cli::{GlobalOpts, InstallOpts};
use crate::logging::Logger;
use crate::tasks::{self, Context, Task};

use super::CommandSetup;

/// Run the install command.
///
/// # Errors
///
/// Returns an error if the source root cannot be resolved or a kind-level
/// task failure was recorded (per-unit skips are warnings, not failures).
pub fn run(global: &GlobalOpts, opts: &InstallOpts, log: &Logger) -> Result<()> {
    let version = option_env!("SKILLS_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("skills {version}"));

    let setup = CommandSetup::init(global, log)?;
    let ctx = Context {
        settings: &setup.settings,
        log,
        dry_run: global.dry_run,
    };

    let all_tasks = tasks::all_install_tasks();
    let tasks_to_run: Vec<&dyn Task> = all_tasks
        .iter()
        .filter(|t| selected(t.name(), opts))
        .map(std::convert::AsRef::as_ref)
        .collect();

    super::run_tasks_to_completion(tasks_to_run, &ctx, log)
}

/// Apply `--only` and `--skip` filters to a task name.
fn selected(name: &str, opts: &InstallOpts) -> bool {
    let name = name.to_lowercase();
    if !opts.only.is_empty() {
        return opts.only.iter().any(|o| name.contains(&o.to_lowercase()));
    }
    if !opts.skip.is_empty() {
        return !opts.skip.iter().any(|s| name.contains(&s.to_lowercase()));
    }
    true
}
