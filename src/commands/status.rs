//! Status command implementation: read-only link-state report.
use anyhow::Result;

use crate::cli::{GlobalOpts, StatusOpts};
use crate::config::Settings;
use crate::logging::Logger;
use crate::resources::symlink::SymlinkResource;
use crate::resources::{LinkState, Resource as _};
use crate::units::{self, UnitKind};

use super::CommandSetup;

/// Run the status command. Never mutates anything.
///
/// # Errors
///
/// Returns an error if the source root cannot be resolved or discovery
/// fails.
pub fn run(global: &GlobalOpts, _opts: &StatusOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    report(&setup.settings, log)
}

/// Report the link state of every discovered unit, per kind.
///
/// # Errors
///
/// Returns an error if discovery or a state check fails.
pub fn report(settings: &Settings, log: &Logger) -> Result<()> {
    for kind in [UnitKind::Skill, UnitKind::Command] {
        let heading = match kind {
            UnitKind::Skill => "Skills",
            UnitKind::Command => "Commands",
        };
        log.stage(heading);

        let units = units::discover(settings, kind)?;
        if units.is_empty() {
            log.info(&format!("no {}s found", kind.noun()));
            continue;
        }

        let mut linked = 0u32;
        for unit in &units {
            let link =
                SymlinkResource::new(unit.source.clone(), settings.dest_root(kind).join(&unit.name));
            match link.current_state()? {
                LinkState::Correct => {
                    linked += 1;
                    log.debug(&format!("linked: {}", link.description()));
                }
                LinkState::Missing => log.info(&format!("not linked: {}", unit.name)),
                LinkState::WrongTarget { current } => log.info(&format!(
                    "linked elsewhere: {} (points to {})",
                    unit.name,
                    current.display()
                )),
                LinkState::Occupied => log.warn(&format!(
                    "blocked: {} (existing entry is not a symlink)",
                    unit.name
                )),
            }
        }
        log.info(&format!("{linked} of {} linked", units.len()));
    }
    Ok(())
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
            skills_dest: root.join("dest").join("skills"),
            commands_dest: root.join("dest").join("commands"),
        }
    }

    #[test]
    fn report_never_creates_destination_roots() {
        let dir = tempfile::tempdir().unwrap();
        let skill = dir.path().join("alpha");
        std::fs::create_dir(&skill).unwrap();
        std::fs::write(skill.join("SKILL.md"), "").unwrap();

        let settings = settings_for(dir.path());
        let log = Logger::with_log_file(false, None);
        report(&settings, &log).unwrap();

        assert!(!settings.skills_dest.exists());
        assert!(!settings.commands_dest.exists());
    }

    #[test]
    fn report_handles_empty_source() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_for(dir.path());
        let log = Logger::with_log_file(false, None);
        assert!(report(&settings, &log).is_ok());
    }
}
