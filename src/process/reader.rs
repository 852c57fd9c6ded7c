//! Record reader for `/proc/<pid>/stat` and `/proc/<pid>/cmdline`.
//!
//! Each call reads exactly the two files of one process directory and turns
//! them into a [`ProcessEntity`]. Nothing is cached between calls.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{ProcTreeError, Result};
use crate::process::entity::ProcessEntity;

/// Name of the single-line status record inside a process directory.
pub const STATUS_FILE: &str = "stat";

/// Name of the NUL-delimited argument vector inside a process directory.
pub const CMDLINE_FILE: &str = "cmdline";

/// Fields of interest from a status line, borrowed from the line itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFields<'a> {
    pub pid: &'a str,
    pub status: &'a str,
    pub ppid: &'a str,
}

/// Splits a status line into pid (field 0), status (field 2) and ppid (field 3).
///
/// The kernel wraps the comm field in parentheses and does not escape spaces
/// inside it, so when field 1 starts with `(` the positional split resumes
/// after the last `)`. Other lines are split purely positionally.
pub fn parse_status_line(line: &str) -> Option<StatusFields<'_>> {
    let line = line.trim_end();

    if let Some((pid, rest)) = line.split_once(' ') {
        if rest.starts_with('(') {
            let close = rest.rfind(')')?;
            let mut fields = rest[close + 1..].trim_start().split(' ');
            let status = fields.next().filter(|s| !s.is_empty())?;
            let ppid = fields.next()?;
            return Some(StatusFields { pid, status, ppid });
        }
    }

    let mut fields = line.split(' ');
    let pid = fields.next()?;
    let _comm = fields.next()?;
    let status = fields.next()?;
    let ppid = fields.next()?;
    Some(StatusFields { pid, status, ppid })
}

/// Joins NUL-separated argument fragments with single spaces and trims the result.
pub fn parse_cmdline(bytes: &[u8]) -> String {
    let raw = String::from_utf8_lossy(bytes);
    raw.split('\0').collect::<Vec<_>>().join(" ").trim().to_string()
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| ProcTreeError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads the command line of the process directory `proc_dir`.
pub fn read_command(proc_dir: &Path) -> Result<String> {
    let bytes = read_file(&proc_dir.join(CMDLINE_FILE))?;
    Ok(parse_cmdline(&bytes))
}

/// Reads one process from its status record path (e.g. `/proc/42/stat`).
///
/// The directory containing `stat_path` is treated as the process directory
/// and its `cmdline` is read alongside.
pub fn read_process(stat_path: &Path) -> Result<ProcessEntity> {
    let proc_dir = stat_path.parent().map(Path::to_path_buf).unwrap_or_else(PathBuf::new);

    let raw = read_file(stat_path)?;
    let line = String::from_utf8_lossy(&raw);
    let fields = parse_status_line(&line).ok_or_else(|| ProcTreeError::MalformedRecord {
        path: stat_path.to_path_buf(),
        line: line.trim_end().to_string(),
    })?;

    let command = read_command(&proc_dir)?;
    trace!(
        "Read pid={} ppid={} status={} from {}",
        fields.pid,
        fields.ppid,
        fields.status,
        stat_path.display()
    );

    Ok(ProcessEntity::new(
        fields.pid,
        command,
        fields.status,
        fields.ppid,
    ))
}
