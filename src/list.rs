//! Implementation of the `list` sub-command.
//!
//! Scans the instance directory the same way `gen` does and emits a JSON
//! envelope instead of invocation lines: the resolved directory, the sorted
//! qualifying names, and the count of entries that could not be read or
//! decoded. Intended for machine consumption (e.g. checking what `gen`
//! would cover without generating anything).

use anyhow::Result;
use tracing::debug;

use crate::instances::{resolve_instances_dir, scan_instances};
use crate::schema::{ListData, Response};

/// Options for the `list` sub-command.
#[derive(Debug)]
pub struct ListOpts<'a> {
    /// Override for the instance directory.
    pub dir: Option<&'a str>,
}

/// Execute `list`: scan the instance directory and emit JSON.
pub fn execute(opts: ListOpts) -> Result<()> {
    let dir = resolve_instances_dir(opts.dir);
    let scan = scan_instances(&dir)?;

    debug!(
        dir = %dir.display(),
        count = scan.instances.len(),
        skipped = scan.skipped,
        "list complete"
    );

    let response = Response::new(
        "list",
        ListData {
            root: dir.display().to_string(),
            instances: scan.instances,
            skipped: scan.skipped,
        },
    );
    response.print();
    Ok(())
}
