//! Uninstall command implementation.
use anyhow::Result;

use crate::cli::{GlobalOpts, UninstallOpts};
use crate::logging::Logger;
use crate::tasks::{self, Context};

use super::CommandSetup;

/// Run the uninstall command.
///
/// Re-discovers the same unit set as install would, so only units still
/// present in the source root have their symlinks removed.
///
/// # Errors
///
/// Returns an error if the source root cannot be resolved or a kind-level
/// task failure was recorded.
pub fn run(global: &GlobalOpts, _opts: &UninstallOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let ctx = Context {
        settings: &setup.settings,
        log,
        dry_run: global.dry_run,
    };

    let all_tasks = tasks::all_uninstall_tasks();
    super::run_tasks_to_completion(all_tasks.iter().map(std::convert::AsRef::as_ref), &ctx, log)
}
