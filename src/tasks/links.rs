//! Link and unlink tasks, one instance per unit kind.
use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult, TaskStats};
use crate::resources::symlink::SymlinkResource;
use crate::resources::{LinkChange, LinkState, Resource as _};
use crate::units::{self, UnitKind};

/// Ensure every discovered unit of one kind is linked into its destination
/// root.
pub struct LinkUnits {
    kind: UnitKind,
}

impl LinkUnits {
    /// Create the link task for the given unit kind.
    #[must_use]
    pub const fn new(kind: UnitKind) -> Self {
        Self { kind }
    }
}

impl Task for LinkUnits {
    fn name(&self) -> &str {
        match self.kind {
            UnitKind::Skill => "Link skills",
            UnitKind::Command => "Link commands",
        }
    }

    fn should_run(&self, ctx: &Context) -> bool {
        match self.kind {
            UnitKind::Skill => true,
            UnitKind::Command => ctx.settings.commands_source_dir().is_dir(),
        }
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        link_units(ctx, self.kind)?;
        if ctx.dry_run {
            Ok(TaskResult::DryRun)
        } else {
            Ok(TaskResult::Ok)
        }
    }
}

/// Remove the symlinks a previous link run created for one kind.
pub struct UnlinkUnits {
    kind: UnitKind,
}

impl UnlinkUnits {
    /// Create the unlink task for the given unit kind.
    #[must_use]
    pub const fn new(kind: UnitKind) -> Self {
        Self { kind }
    }
}

impl Task for UnlinkUnits {
    fn name(&self) -> &str {
        match self.kind {
            UnitKind::Skill => "Unlink skills",
            UnitKind::Command => "Unlink commands",
        }
    }

    fn should_run(&self, ctx: &Context) -> bool {
        // Nothing to discover without the destination root.
        ctx.settings.dest_root(self.kind).is_dir()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        unlink_units(ctx, self.kind)?;
        if ctx.dry_run {
            Ok(TaskResult::DryRun)
        } else {
            Ok(TaskResult::Ok)
        }
    }
}

/// Reconcile the destination root for one kind against the discovered units.
///
/// Per-unit problems (occupied destination, failed symlink call) are logged
/// and tallied but never abort the batch. Units already correctly linked
/// produce no per-unit output; they surface once in the aggregate tally.
///
/// # Errors
///
/// Returns an error if discovery fails or the destination root cannot be
/// created — fatal for this kind only.
pub fn link_units(ctx: &Context, kind: UnitKind) -> Result<TaskStats> {
    let units = units::discover(ctx.settings, kind)?;
    let dest_root = ctx.settings.dest_root(kind);
    let mut stats = TaskStats::default();

    if !ctx.dry_run {
        std::fs::create_dir_all(dest_root)
            .with_context(|| format!("create destination root: {}", dest_root.display()))?;
    }

    for unit in &units {
        let link = SymlinkResource::new(unit.source.clone(), dest_root.join(&unit.name));

        if ctx.dry_run {
            match link.current_state()? {
                LinkState::Missing => {
                    ctx.log.dry_run(&format!(
                        "would link {} -> {}",
                        link.target.display(),
                        link.source.display()
                    ));
                    stats.created += 1;
                }
                LinkState::WrongTarget { current } => {
                    ctx.log.dry_run(&format!(
                        "would update {} (points to {})",
                        link.target.display(),
                        current.display()
                    ));
                    stats.updated += 1;
                }
                LinkState::Correct => stats.unchanged += 1,
                LinkState::Occupied => {
                    ctx.log.debug(&format!(
                        "would skip {}: occupied by existing non-symlink entry",
                        unit.name
                    ));
                    stats.skipped += 1;
                }
            }
            continue;
        }

        match link.apply() {
            Ok(LinkChange::Created) => {
                ctx.log.info(&format!("linked: {}", unit.name));
                stats.created += 1;
            }
            Ok(LinkChange::Updated) => {
                ctx.log.info(&format!("updated: {}", unit.name));
                stats.updated += 1;
            }
            Ok(LinkChange::Unchanged) => stats.unchanged += 1,
            Ok(LinkChange::Skipped { reason }) => {
                ctx.log.warn(&format!("skipped {}: {reason}", unit.name));
                stats.skipped += 1;
            }
            Err(e) => {
                ctx.log.warn(&format!("{}: {e:#}", unit.name));
                stats.failed += 1;
            }
        }
    }

    if ctx.dry_run {
        ctx.log.info(&format!(
            "{} would change, {} already installed, {} skipped",
            stats.created + stats.updated,
            stats.unchanged,
            stats.skipped
        ));
    } else {
        let mut line = format!(
            "{} linked, {} updated, {} already installed, {} skipped",
            stats.created, stats.updated, stats.unchanged, stats.skipped
        );
        if stats.failed > 0 {
            line.push_str(&format!(", {} failed", stats.failed));
        }
        ctx.log.info(&line);
    }

    Ok(stats)
}

/// Remove the symlink for every discovered unit of one kind, skipping
/// silently anything that is absent, a foreign entry, or a symlink pointing
/// somewhere other than the unit source.
///
/// Units deleted from the source root are not rediscovered, so their
/// symlinks are left behind — re-running install and uninstall after a
/// source change is the supported cleanup path.
///
/// # Errors
///
/// Returns an error if discovery fails.
pub fn unlink_units(ctx: &Context, kind: UnitKind) -> Result<TaskStats> {
    let units = units::discover(ctx.settings, kind)?;
    let dest_root = ctx.settings.dest_root(kind);
    let mut stats = TaskStats::default();

    for unit in &units {
        let link = SymlinkResource::new(unit.source.clone(), dest_root.join(&unit.name));

        if ctx.dry_run {
            if link.current_state()? == LinkState::Correct {
                ctx.log
                    .dry_run(&format!("remove symlink: {}", link.target.display()));
                stats.removed += 1;
            }
            continue;
        }

        match link.remove() {
            Ok(true) => {
                ctx.log.info(&format!("removed: {}", link.target.display()));
                stats.removed += 1;
            }
            Ok(false) => {}
            Err(e) => {
                ctx.log.warn(&format!("{}: {e:#}", unit.name));
                stats.failed += 1;
            }
        }
    }

    if ctx.dry_run {
        ctx.log.info(&format!("{} would remove", stats.removed));
    } else {
        ctx.log.info(&format!("{} removed", stats.removed));
    }

    Ok(stats)
}
