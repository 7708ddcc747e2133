//! Symlink resource: one destination entry reconciled against one unit.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::{LinkChange, LinkState, Resource};

/// A symlink from a destination root back into the source root.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// The unit source (what the symlink points to).
    pub source: PathBuf,
    /// The destination path (where the symlink lives).
    pub target: PathBuf,
}

impl SymlinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }
}

impl Resource for SymlinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    fn current_state(&self) -> Result<LinkState> {
        let Ok(meta) = self.target.symlink_metadata() else {
            return Ok(LinkState::Missing);
        };
        if !meta.is_symlink() {
            return Ok(LinkState::Occupied);
        }
        let existing = std::fs::read_link(&self.target)
            .with_context(|| format!("read link: {}", self.target.display()))?;
        if paths_equal(&existing, &self.source) {
            Ok(LinkState::Correct)
        } else {
            Ok(LinkState::WrongTarget { current: existing })
        }
    }

    fn apply(&self) -> Result<LinkChange> {
        match self.current_state()? {
            LinkState::Correct => Ok(LinkChange::Unchanged),
            LinkState::Occupied => Ok(LinkChange::Skipped {
                reason: "occupied by existing non-symlink entry".to_string(),
            }),
            LinkState::WrongTarget { .. } => {
                remove_symlink(&self.target)
                    .with_context(|| format!("remove stale link: {}", self.target.display()))?;
                create_symlink(&self.source, &self.target)
                    .with_context(|| format!("create link: {}", self.target.display()))?;
                Ok(LinkChange::Updated)
            }
            LinkState::Missing => {
                if let Some(parent) = self.target.parent() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("create parent: {}", parent.display()))?;
                }
                create_symlink(&self.source, &self.target)
                    .with_context(|| format!("create link: {}", self.target.display()))?;
                Ok(LinkChange::Created)
            }
        }
    }

    fn remove(&self) -> Result<bool> {
        // Only symlinks still pointing at our source are ours to remove.
        // A symlink the user repointed elsewhere is a foreign entry.
        if self.current_state()? != LinkState::Correct {
            return Ok(false);
        }
        remove_symlink(&self.target)
            .with_context(|| format!("remove link: {}", self.target.display()))?;
        Ok(true)
    }
}

/// Compare two paths, normalising the `\\?\` prefix that Windows
/// `read_link` prepends to extended-length paths.
fn paths_equal(a: &Path, b: &Path) -> bool {
    strip_win_prefix(a) == strip_win_prefix(b)
}

fn strip_win_prefix(p: &Path) -> PathBuf {
    let s = p.to_string_lossy();
    if let Some(rest) = s.strip_prefix(r"\\?\") {
        PathBuf::from(rest)
    } else {
        p.to_path_buf()
    }
}

/// Create a symlink (platform-specific).
///
/// On Windows, if symlink creation fails with "Access is denied" (OS error 5),
/// falls back to junctions for directories and hard links for files.
fn create_symlink(source: &Path, target: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(source, target)?;
    }

    #[cfg(windows)]
    {
        let result = if source.is_dir() {
            std::os::windows::fs::symlink_dir(source, target)
        } else {
            std::os::windows::fs::symlink_file(source, target)
        };
        match result {
            Ok(()) => {}
            Err(e) if e.raw_os_error() == Some(5) => {
                create_symlink_fallback(source, target)?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// Fallback for Windows when symlinks are not permitted.
/// Uses junctions for directories and hard links for files.
#[cfg(windows)]
fn create_symlink_fallback(source: &Path, target: &Path) -> Result<()> {
    if source.is_dir() {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x0800_0000;
        let output = std::process::Command::new("cmd")
            .arg("/c")
            .arg(format!(
                "mklink /J \"{}\" \"{}\"",
                target.display(),
                source.display()
            ))
            .creation_flags(CREATE_NO_WINDOW)
            .output()
            .context("failed to run mklink /J")?;
        if !output.status.success() {
            anyhow::bail!(
                "Cannot create symlink or junction for '{}'.\n\
                 Enable Developer Mode (Settings > System > For developers) \
                 or run as Administrator.\n\
                 mklink error: {}",
                target.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
    } else {
        std::fs::hard_link(source, target).with_context(|| {
            format!(
                "Cannot create symlink or hard link for '{}'.\n\
                 Enable Developer Mode (Settings > System > For developers) \
                 or run as Administrator.",
                target.display()
            )
        })?;
    }
    Ok(())
}

/// Remove a symlink, handling platform differences.
///
/// On Windows, directory symlinks must be removed with `remove_dir` (not
/// `remove_file`). Rust's `symlink_metadata().is_dir()` returns `false` for
/// symlinks, so the raw `FILE_ATTRIBUTE_DIRECTORY` flag is checked instead.
fn remove_symlink(path: &Path) -> Result<()> {
    let meta = std::fs::symlink_metadata(path)?;
    if is_dir_like(&meta) {
        std::fs::remove_dir(path)?;
    } else {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
    }
    #[cfg(not(windows))]
    {
        meta.is_dir()
    }
}
