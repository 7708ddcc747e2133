//! Discovery of linkable units under the source root.
//!
//! Units are discovered fresh on every invocation; nothing is persisted.
//! Hidden entries (leading `.`) are never units, and the commands subfolder
//! is explicitly excluded from skill discovery even when it happens to
//! contain a manifest file.

use std::path::PathBuf;

use crate::config::Settings;
use crate::error::DiscoveryError;

/// The two kinds of linkable unit. A closed set — new kinds are a code
/// change, not configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// A subdirectory of the source root carrying the sentinel manifest.
    Skill,
    /// A file with the designated extension inside the commands subfolder.
    Command,
}

impl UnitKind {
    /// Lowercase singular noun for log messages.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Skill => "skill",
            Self::Command => "command",
        }
    }
}

/// A named, linkable item discovered under the source root.
#[derive(Debug, Clone)]
pub struct Unit {
    /// Identity of the unit: directory name, or file name including the
    /// extension. Doubles as the link name under the destination root.
    pub name: String,
    /// Absolute path of the unit inside the source root.
    pub source: PathBuf,
    /// Which kind of unit this is.
    pub kind: UnitKind,
}

/// Enumerate the units of the given kind, sorted by name.
///
/// A missing commands subfolder yields an empty list, not an error; a
/// source root that cannot be enumerated is an error.
///
/// # Errors
///
/// Returns [`DiscoveryError::Unreadable`] if a directory listing fails.
pub fn discover(settings: &Settings, kind: UnitKind) -> Result<Vec<Unit>, DiscoveryError> {
    let mut units = match kind {
        UnitKind::Skill => discover_skills(settings)?,
        UnitKind::Command => discover_commands(settings)?,
    };
    units.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(units)
}

fn discover_skills(settings: &Settings) -> Result<Vec<Unit>, DiscoveryError> {
    let mut units = Vec::new();
    for entry in read_dir(&settings.source_root)? {
        let entry = entry.map_err(|source| unreadable(&settings.source_root, source))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || name == settings.commands_dir {
            continue;
        }
        let path = entry.path();
        if !path.is_dir() || !path.join(&settings.manifest_name).is_file() {
            continue;
        }
        units.push(Unit {
            name,
            source: path,
            kind: UnitKind::Skill,
        });
    }
    Ok(units)
}

fn discover_commands(settings: &Settings) -> Result<Vec<Unit>, DiscoveryError> {
    let dir = settings.commands_source_dir();
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut units = Vec::new();
    for entry in read_dir(&dir)? {
        let entry = entry.map_err(|source| unreadable(&dir, source))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(settings.command_ext.as_str()) {
            continue;
        }
        units.push(Unit {
            name,
            source: path,
            kind: UnitKind::Command,
        });
    }
    Ok(units)
}

fn read_dir(path: &std::path::Path) -> Result<std::fs::ReadDir, DiscoveryError> {
    std::fs::read_dir(path).map_err(|source| unreadable(path, source))
}

fn unreadable(path: &std::path::Path, source: std::io::Error) -> DiscoveryError {
    DiscoveryError::Unreadable {
        path: path.display().to_string(),
        source,
    }
}
