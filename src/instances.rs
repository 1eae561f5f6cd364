//! Instance-directory resolution and scanning.
//!
//! Resolution order for the instance directory:
//!   1. positional `DIR` CLI argument
//!   2. `RPP_SCRIPTGEN_INSTANCES` environment variable
//!   3. built-in default `Instancias_RPP/URPP`
//!
//! The scan is a single `read_dir` pass. Entries whose names start with the
//! `._` metadata-shadow prefix are filtered out; entries that cannot be read
//! or whose names are not valid UTF-8 are counted in `skipped`. Files and
//! subdirectories qualify alike.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default instance directory, relative to the working directory.
pub const DEFAULT_INSTANCES_DIR: &str = "Instancias_RPP/URPP";

/// Prefix used by some filesystems for hidden metadata shadow files.
const SHADOW_PREFIX: &str = "._";

/// Sentinel error type to distinguish "instance directory unreadable" from
/// other I/O errors. Used by callers to emit
/// `error.code = "instances_dir_unreadable"` instead of `internal_error`.
#[derive(Debug)]
pub struct InstancesDirUnreadable(pub String);

impl std::fmt::Display for InstancesDirUnreadable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "instance directory unreadable: {}", self.0)
    }
}

impl std::error::Error for InstancesDirUnreadable {}

/// Resolve the instance directory following the priority chain.
pub fn resolve_instances_dir(cli_dir: Option<&str>) -> PathBuf {
    // 1. CLI argument
    if let Some(dir) = cli_dir {
        return PathBuf::from(dir);
    }

    // 2. Environment variable
    if let Ok(dir) = std::env::var("RPP_SCRIPTGEN_INSTANCES")
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }

    // 3. Default
    PathBuf::from(DEFAULT_INSTANCES_DIR)
}

/// Result of one scan pass over the instance directory.
#[derive(Debug)]
pub struct InstanceScan {
    /// Qualifying instance names, sorted ascending.
    pub instances: Vec<String>,
    /// Entries skipped because they could not be read or decoded.
    pub skipped: u64,
}

/// Scan `dir` once and return the qualifying instance names.
///
/// Returns `Err` wrapping [`InstancesDirUnreadable`] when the directory
/// cannot be listed (missing, not a directory, or permission denied), so
/// callers can report a stable error code. Per-entry failures are never
/// fatal: they are logged at debug level and counted in `skipped`.
pub fn scan_instances(dir: &Path) -> Result<InstanceScan> {
    let read_dir = std::fs::read_dir(dir).map_err(|e| {
        anyhow::Error::new(InstancesDirUnreadable(format!("{}: {e}", dir.display())))
    })?;

    let mut instances: Vec<String> = Vec::new();
    let mut skipped: u64 = 0;

    for entry in read_dir {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!(error = %e, "failed to read directory entry; skipping");
                skipped += 1;
                continue;
            }
        };

        let name = match entry.file_name().into_string() {
            Ok(n) => n,
            Err(raw) => {
                debug!(name = ?raw, "entry name is not valid UTF-8; skipping");
                skipped += 1;
                continue;
            }
        };

        if name.starts_with(SHADOW_PREFIX) {
            // Expected metadata shadow, not an anomaly: filter without counting.
            debug!(name = %name, "filtering metadata shadow entry");
            continue;
        }

        instances.push(name);
    }

    // Directory listing order is filesystem-dependent; sort so that repeated
    // runs against an unchanged directory produce identical output.
    instances.sort_unstable();

    debug!(
        dir = %dir.display(),
        count = instances.len(),
        skipped,
        "scan complete"
    );

    Ok(InstanceScan { instances, skipped })
}

// ---------- Unit tests ----------
