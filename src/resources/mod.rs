//! Idempotent link primitives (check + apply pattern).
pub mod symlink;

use anyhow::Result;
use std::path::PathBuf;

/// Observed state of a destination entry relative to its unit source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// Nothing exists at the destination path.
    Missing,
    /// A symlink pointing at the unit source.
    Correct,
    /// A symlink pointing somewhere else.
    WrongTarget {
        /// Where the existing symlink currently points.
        current: PathBuf,
    },
    /// A real file or directory. Foreign — never owned by the installer.
    Occupied,
}

/// Result of reconciling one destination entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkChange {
    /// A new symlink was created.
    Created,
    /// A stale symlink was replaced.
    Updated,
    /// Already correct; nothing to do.
    Unchanged,
    /// Left untouched because the entry is not ours to change.
    Skipped {
        /// Reason the entry was skipped.
        reason: String,
    },
}

/// Unified interface for link resources that can be checked, applied, and
/// removed.
pub trait Resource {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Check the current state of the destination entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined due to I/O
    /// failures or permission issues.
    fn current_state(&self) -> Result<LinkState>;

    /// Reconcile the destination entry with the unit source.
    ///
    /// # Errors
    ///
    /// Returns an error if a symlink cannot be created or a stale symlink
    /// cannot be removed.
    fn apply(&self) -> Result<LinkChange>;

    /// Undo a previous `apply()`. Returns `true` if a symlink was removed.
    ///
    /// Only removes the entry when it is a symlink still pointing at the
    /// unit source; anything else is left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if an owned symlink cannot be removed.
    fn remove(&self) -> Result<bool>;

    /// Whether `apply()` would change anything.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Resource::current_state`].
    fn needs_change(&self) -> Result<bool> {
        Ok(matches!(
            self.current_state()?,
            LinkState::Missing | LinkState::WrongTarget { .. }
        ))
    }
}
