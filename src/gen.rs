//! Implementation of the `gen` sub-command.
//!
//! Scans the instance directory and emits, for every qualifying instance,
//! one solver invocation line per matching mode:
//!
//! ```text
//! ./runHeurRPP.sh a <instance>
//! ./runHeurRPP.sh v <instance>
//! ```
//!
//! Lines go to stdout by default; with `--output` the rendered script is
//! written to a file atomically (temp file + rename) so a concurrent reader
//! never observes a half-written script.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use crate::instances::{resolve_instances_dir, scan_instances};

/// Solver script each emitted line invokes. Fixed by the output contract;
/// only the instance directory is configurable.
pub const SOLVER_SCRIPT: &str = "./runHeurRPP.sh";

/// Matching strategy the solver script is asked to run with.
///
/// The flag letters are the solver script's own mode tags: `a` selects the
/// greedy perfect matching, `v` the vertex-scan matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Greedy,
    VertexScan,
}

impl Mode {
    /// Emission order per instance: greedy first, then vertex-scan.
    pub const ALL: [Mode; 2] = [Mode::Greedy, Mode::VertexScan];

    pub fn flag(&self) -> &'static str {
        match self {
            Mode::Greedy => "a",
            Mode::VertexScan => "v",
        }
    }
}

/// Options for the `gen` sub-command.
#[derive(Debug, Default)]
pub struct GenOpts<'a> {
    /// Override for the instance directory.
    pub dir: Option<&'a str>,
    /// Write the rendered script here instead of stdout.
    pub output: Option<&'a str>,
}

/// Render one invocation line (without trailing newline).
fn render_line(mode: Mode, instance: &str) -> String {
    format!("{SOLVER_SCRIPT} {} {instance}", mode.flag())
}

/// Render the full script text: two newline-terminated lines per instance,
/// in instance order. Empty input renders as the empty string.
pub fn render_script(instances: &[String]) -> String {
    let mut out = String::new();
    for instance in instances {
        for mode in Mode::ALL {
            out.push_str(&render_line(mode, instance));
            out.push('\n');
        }
    }
    out
}

/// Execute `gen`: scan the instance directory and emit invocation lines.
pub fn execute(opts: GenOpts) -> Result<()> {
    let dir = resolve_instances_dir(opts.dir);
    let scan = scan_instances(&dir)?;

    if scan.skipped > 0 {
        debug!(skipped = scan.skipped, "some entries were not decodable");
    }

    let script = render_script(&scan.instances);

    match opts.output {
        Some(target) => {
            write_atomic(Path::new(target), script.as_bytes())?;
            info!(
                output = %target,
                instances = scan.instances.len(),
                lines = scan.instances.len() * Mode::ALL.len(),
                "script written"
            );
        }
        None => {
            // stdout carries the invocation lines and nothing else.
            print!("{script}");
            info!(
                instances = scan.instances.len(),
                lines = scan.instances.len() * Mode::ALL.len(),
                "script emitted"
            );
        }
    }

    Ok(())
}

/// Write `contents` to `target` atomically by writing to a temp file in the
/// same directory and then renaming. This prevents readers from observing a
/// partially-written file.
fn write_atomic(target: &Path, contents: &[u8]) -> Result<()> {
    use std::io::Write;

    let dir = match target.parent() {
        Some(p) if p != Path::new("") => p,
        _ => Path::new("."),
    };

    // Create a named temporary file in the same directory so that rename is
    // always on the same filesystem (required for atomic rename on POSIX).
    let mut tmp = tempfile::Builder::new()
        .prefix(".tmp-")
        .tempfile_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;

    tmp.write_all(contents)
        .with_context(|| format!("write temp file for {}", target.display()))?;

    // Persist moves the temp file to the target path atomically.
    tmp.persist(target)
        .map_err(|e| e.error)
        .with_context(|| format!("rename temp file to {}", target.display()))?;

    Ok(())
}

// ---------- Unit tests ----------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_flags_are_stable() {
        assert_eq!(Mode::Greedy.flag(), "a");
        assert_eq!(Mode::VertexScan.flag(), "v");
    }

    #[test]
    fn renders_two_lines_per_instance_greedy_first() {
        let instances = vec!["inst1.txt".to_string()];
        assert_eq!(
            render_script(&instances),
            "./runHeurRPP.sh a inst1.txt\n./runHeurRPP.sh v inst1.txt\n"
        );
    }

    #[test]
    fn renders_instances_in_given_order() {
        let instances = vec!["a.txt".to_string(), "b.txt".to_string()];
        let script = render_script(&instances);
        let lines: Vec<&str> = script.lines().collect();
        assert_eq!(
            lines,
            vec![
                "./runHeurRPP.sh a a.txt",
                "./runHeurRPP.sh v a.txt",
                "./runHeurRPP.sh a b.txt",
                "./runHeurRPP.sh v b.txt",
            ]
        );
    }

    #[test]
    fn renders_empty_input_as_empty_string() {
        assert_eq!(render_script(&[]), "");
    }

    #[test]
    fn write_atomic_creates_target_with_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("run_all.sh");
        write_atomic(&target, b"./runHeurRPP.sh a x\n").unwrap();
        let read = std::fs::read_to_string(&target).unwrap();
        assert_eq!(read, "./runHeurRPP.sh a x\n");
    }

    #[test]
    fn write_atomic_replaces_existing_target() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("run_all.sh");
        std::fs::write(&target, b"old").unwrap();
        write_atomic(&target, b"new\n").unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new\n");
    }
}
