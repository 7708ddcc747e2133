//! Declarative symlink installer for agent skill and command documents.
//!
//! Reconciles a per-user destination tree against the linkable units found
//! under a source root: skill directories (marked by a `SKILL.md` manifest)
//! and command documents (Markdown files in a `commands/` subfolder). Each
//! unit is installed as a symlink pointing back at its source; entries the
//! installer does not own are never touched.
//!
//! The crate is organised into four layers:
//!
//! - **[`config`]** — settings resolution (source root, destination roots,
//!   layout names, optional `linker.toml` overrides)
//! - **[`units`]** — discovery of linkable units under the source root
//! - **[`resources`]** — the idempotent `check + apply` symlink primitive
//! - **[`tasks`]** / **[`commands`]** — per-kind link/unlink work units and
//!   top-level subcommand orchestration (`install`, `uninstall`, `status`)
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod resources;
pub mod tasks;
pub mod units;
