//! Settings resolution: where units come from and where their links go.
//!
//! Defaults are compiled in; an optional `linker.toml` at the source root
//! can rename the manifest file, the commands subfolder, the command
//! extension, and the two destination roots. The manifest itself is never
//! parsed — only its presence matters (see [`crate::units`]).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::units::UnitKind;

/// Sentinel file whose presence marks a directory as a skill unit.
pub const DEFAULT_MANIFEST: &str = "SKILL.md";

/// Subfolder of the source root holding command documents.
pub const DEFAULT_COMMANDS_DIR: &str = "commands";

/// Extension command documents must carry.
pub const DEFAULT_COMMAND_EXT: &str = "md";

/// Optional override file read from the source root.
pub const OVERRIDE_FILE: &str = "linker.toml";

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Canonicalized directory containing the linkable units.
    pub source_root: PathBuf,
    /// Name of the sentinel manifest file marking skill directories.
    pub manifest_name: String,
    /// Name of the subfolder holding command documents.
    pub commands_dir: String,
    /// Extension (without dot) command documents must carry.
    pub command_ext: String,
    /// Destination root for skill symlinks.
    pub skills_dest: PathBuf,
    /// Destination root for command symlinks.
    pub commands_dest: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Overrides {
    layout: LayoutOverrides,
    destinations: DestinationOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
struct LayoutOverrides {
    manifest: Option<String>,
    commands_dir: Option<String>,
    command_ext: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DestinationOverrides {
    skills: Option<String>,
    commands: Option<String>,
}

impl Settings {
    /// Resolve settings for this invocation.
    ///
    /// The source root comes from `source_override`, the `SKILLS_ROOT`
    /// environment variable, a directory adjacent to the running binary, or
    /// the current directory, in that order. Destination roots default to
    /// `~/.agent/skills` and `~/.agent/commands` unless overridden.
    ///
    /// # Errors
    ///
    /// Returns an error if no source root can be found, the home directory
    /// cannot be determined, or `linker.toml` exists but fails to parse.
    pub fn resolve(source_override: Option<&Path>) -> Result<Self, ConfigError> {
        let source_root = resolve_source_root(source_override)?;
        let overrides = load_overrides(&source_root)?;
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;

        let skills_dest = overrides.destinations.skills.as_deref().map_or_else(
            || home.join(".agent").join("skills"),
            |p| expand_tilde(p, &home),
        );
        let commands_dest = overrides.destinations.commands.as_deref().map_or_else(
            || home.join(".agent").join("commands"),
            |p| expand_tilde(p, &home),
        );

        Ok(Self {
            source_root,
            manifest_name: overrides
                .layout
                .manifest
                .unwrap_or_else(|| DEFAULT_MANIFEST.to_string()),
            commands_dir: overrides
                .layout
                .commands_dir
                .unwrap_or_else(|| DEFAULT_COMMANDS_DIR.to_string()),
            command_ext: overrides
                .layout
                .command_ext
                .unwrap_or_else(|| DEFAULT_COMMAND_EXT.to_string()),
            skills_dest,
            commands_dest,
        })
    }

    /// Destination root for the given unit kind.
    #[must_use]
    pub fn dest_root(&self, kind: UnitKind) -> &Path {
        match kind {
            UnitKind::Skill => &self.skills_dest,
            UnitKind::Command => &self.commands_dest,
        }
    }

    /// Source directory holding command documents.
    #[must_use]
    pub fn commands_source_dir(&self) -> PathBuf {
        self.source_root.join(&self.commands_dir)
    }
}

/// Resolve the source root: explicit flag, `SKILLS_ROOT` env var,
/// binary-adjacent detection, or the current directory.
fn resolve_source_root(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(root) = explicit {
        return canonical_existing(root);
    }

    if let Ok(root) = std::env::var("SKILLS_ROOT") {
        return canonical_existing(Path::new(&root));
    }

    // The installer usually lives inside the repository it links from.
    if let Ok(exe) = std::env::current_exe()
        && let Some(parent) = exe.parent()
    {
        for candidate in [parent.to_path_buf(), parent.join("..")] {
            if looks_like_source_root(&candidate) {
                return canonical_existing(&candidate);
            }
        }
    }

    if let Ok(cwd) = std::env::current_dir()
        && looks_like_source_root(&cwd)
    {
        return canonical_existing(&cwd);
    }

    Err(ConfigError::SourceRootNotFound)
}

/// Check existence and canonicalize so symlink targets are absolute.
fn canonical_existing(path: &Path) -> Result<PathBuf, ConfigError> {
    if !path.is_dir() {
        return Err(ConfigError::SourceRootMissing(path.display().to_string()));
    }
    std::fs::canonicalize(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Heuristic for auto-detection: an override file, a commands folder, or at
/// least one immediate child directory carrying the default manifest.
fn looks_like_source_root(path: &Path) -> bool {
    if path.join(OVERRIDE_FILE).is_file() || path.join(DEFAULT_COMMANDS_DIR).is_dir() {
        return true;
    }
    std::fs::read_dir(path).is_ok_and(|entries| {
        entries
            .flatten()
            .any(|e| e.path().join(DEFAULT_MANIFEST).is_file())
    })
}

/// Load `linker.toml` from the source root, or defaults if absent.
fn load_overrides(source_root: &Path) -> Result<Overrides, ConfigError> {
    let path = source_root.join(OVERRIDE_FILE);
    if !path.is_file() {
        return Ok(Overrides::default());
    }
    let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::InvalidSyntax {
        file: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Expand a leading `~/` against the home directory.
fn expand_tilde(raw: &str, home: &Path) -> PathBuf {
    raw.strip_prefix("~/")
        .map_or_else(|| PathBuf::from(raw), |rest| home.join(rest))
}
