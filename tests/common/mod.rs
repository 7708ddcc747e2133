// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed source tree plus isolated
// destination roots, so each integration test can exercise the full
// link/unlink path without touching the real home directory.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use skills_cli::config::Settings;
use skills_cli::logging::Logger;
use skills_cli::tasks::{self, Context, TaskStats};
use skills_cli::units::UnitKind;

/// An isolated source tree and destination base backed by temp directories.
///
/// Both directories are deleted on drop via the underlying
/// [`tempfile::TempDir`].
pub struct TestRepo {
    /// Source root holding skill directories and the commands folder.
    pub source: tempfile::TempDir,
    /// Base directory containing the per-kind destination roots.
    pub dest: tempfile::TempDir,
}

impl TestRepo {
    /// Create an empty source tree and destination base.
    pub fn new() -> Self {
        Self {
            source: tempfile::tempdir().expect("create source temp dir"),
            dest: tempfile::tempdir().expect("create dest temp dir"),
        }
    }

    /// Settings pointing at this repo with the default layout names.
    pub fn settings(&self) -> Settings {
        Settings {
            source_root: std::fs::canonicalize(self.source.path())
                .expect("canonicalize source root"),
            manifest_name: "SKILL.md".to_string(),
            commands_dir: "commands".to_string(),
            command_ext: "md".to_string(),
            skills_dest: self.dest.path().join("skills"),
            commands_dest: self.dest.path().join("commands"),
        }
    }

    /// Create a skill directory carrying the sentinel manifest.
    pub fn add_skill(&self, name: &str) -> PathBuf {
        let dir = self.source.path().join(name);
        std::fs::create_dir_all(&dir).expect("create skill dir");
        std::fs::write(dir.join("SKILL.md"), "---\nname: test\n---\n").expect("write manifest");
        dir
    }

    /// Create a directory without the manifest (must stay invisible).
    pub fn add_bare_dir(&self, name: &str) -> PathBuf {
        let dir = self.source.path().join(name);
        std::fs::create_dir_all(&dir).expect("create bare dir");
        dir
    }

    /// Create a command document inside the commands folder.
    pub fn add_command(&self, file_name: &str) -> PathBuf {
        let dir = self.source.path().join("commands");
        std::fs::create_dir_all(&dir).expect("create commands dir");
        let path = dir.join(file_name);
        std::fs::write(&path, "do the thing\n").expect("write command file");
        path
    }

    /// Delete a skill from the source tree (for orphan-link tests).
    pub fn remove_skill(&self, name: &str) {
        std::fs::remove_dir_all(self.source.path().join(name)).expect("remove skill dir");
    }
}

/// Run the link task for one kind, returning its tallies.
pub fn link(settings: &Settings, kind: UnitKind) -> TaskStats {
    let log = Logger::with_log_file(false, None);
    let ctx = Context {
        settings,
        log: &log,
        dry_run: false,
    };
    tasks::links::link_units(&ctx, kind).expect("link units")
}

/// Run the unlink task for one kind, returning its tallies.
pub fn unlink(settings: &Settings, kind: UnitKind) -> TaskStats {
    let log = Logger::with_log_file(false, None);
    let ctx = Context {
        settings,
        log: &log,
        dry_run: false,
    };
    tasks::links::unlink_units(&ctx, kind).expect("unlink units")
}

/// Run the full install task list through the task executor.
pub fn install_all(settings: &Settings) -> Logger {
    let log = Logger::with_log_file(false, None);
    let ctx = Context {
        settings,
        log: &log,
        dry_run: false,
    };
    for task in tasks::all_install_tasks() {
        tasks::execute(task.as_ref(), &ctx);
    }
    log
}

/// Run the full uninstall task list through the task executor.
pub fn uninstall_all(settings: &Settings) -> Logger {
    let log = Logger::with_log_file(false, None);
    let ctx = Context {
        settings,
        log: &log,
        dry_run: false,
    };
    for task in tasks::all_uninstall_tasks() {
        tasks::execute(task.as_ref(), &ctx);
    }
    log
}

/// All symlinks directly under `root` (empty if `root` does not exist).
pub fn symlinks_under(root: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(root) else {
        return Vec::new();
    };
    entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            p.symlink_metadata()
                .map(|m| m.is_symlink())
                .unwrap_or(false)
        })
        .collect()
}
