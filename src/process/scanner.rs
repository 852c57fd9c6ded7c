//! Process discovery under a `/proc`-style root.
//!
//! This module finds the numeric process directories that carry a status
//! record and reads each of them into a flat list of entities.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::debug;

use crate::error::{ProcTreeError, Result};
use crate::process::entity::ProcessEntity;
use crate::process::reader::{read_process, STATUS_FILE};

/// Process entry representing a directory in the proc filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcEntry {
    pub pid: String,
    pub proc_path: PathBuf,
}

impl ProcEntry {
    pub fn stat_path(&self) -> PathBuf {
        self.proc_path.join(STATUS_FILE)
    }
}

fn is_pid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}

/// Scans `root` for directories with all-digit names containing a status record.
///
/// Entries are sorted numerically by PID rather than left in `read_dir` order
/// (or the lexicographic order of a glob, where `10` precedes `9`), so the
/// order of attached children is the same on every filesystem.
pub fn collect_proc_entries(root: &Path) -> Result<Vec<ProcEntry>> {
    let discovery_err = |source: std::io::Error| ProcTreeError::Discovery {
        path: root.to_path_buf(),
        source,
    };

    let mut out = Vec::new();
    for entry in fs::read_dir(root).map_err(discovery_err)? {
        let entry = entry.map_err(discovery_err)?;
        let p = entry.path();
        let name = match p.file_name().and_then(|s| s.to_str()) {
            Some(v) => v,
            None => continue,
        };
        if !is_pid_name(name) {
            continue;
        }
        if !p.join(STATUS_FILE).exists() {
            continue;
        }
        out.push(ProcEntry {
            pid: name.to_string(),
            proc_path: p,
        });
    }

    // Digit-only names compare numerically by (length, text)
    out.sort_by(|a, b| a.pid.len().cmp(&b.pid.len()).then_with(|| a.pid.cmp(&b.pid)));
    Ok(out)
}

/// Reads every discovered process under `root`.
///
/// The first unreadable record aborts the whole collection.
pub fn collect_processes(root: &Path) -> Result<Vec<ProcessEntity>> {
    let start = Instant::now();
    let entries = collect_proc_entries(root)?;
    debug!(
        "Discovered {} process entries under {}",
        entries.len(),
        root.display()
    );

    let processes = entries
        .iter()
        .map(|entry| read_process(&entry.stat_path()))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Read {} processes in {:.2?}",
        processes.len(),
        start.elapsed()
    );
    Ok(processes)
}
