//! JSON rendering of a process subtree.
//!
//! Entities are serialized straight out of the snapshot arena through a
//! borrowed view, so no owned tree is ever materialized.

use serde::ser::{Error as _, SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::error::Result;
use crate::process::snapshot::ProcessSnapshot;

/// Borrowed view of one entity and, recursively, everything attached below it.
///
/// Serializes as `{"pid","command","status","ppid","children"}` in that order.
#[derive(Clone, Copy)]
pub struct ProcessView<'a> {
    snapshot: &'a ProcessSnapshot,
    index: usize,
    depth: usize,
}

impl<'a> ProcessView<'a> {
    pub fn new(snapshot: &'a ProcessSnapshot, index: usize) -> Self {
        Self {
            snapshot,
            index,
            depth: 0,
        }
    }
}

struct ChildrenView<'a> {
    parent: ProcessView<'a>,
}

impl Serialize for ProcessView<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let process = &self.snapshot.processes()[self.index];

        // An acyclic forest is never deeper than the number of processes
        if self.depth > self.snapshot.len() {
            return Err(S::Error::custom(format!(
                "parent/child cycle detected at pid {}",
                process.pid
            )));
        }

        let mut state = serializer.serialize_struct("Process", 5)?;
        state.serialize_field("pid", &process.pid)?;
        state.serialize_field("command", &process.command)?;
        state.serialize_field("status", &process.status)?;
        state.serialize_field("ppid", &process.ppid)?;
        state.serialize_field("children", &ChildrenView { parent: *self })?;
        state.end()
    }
}

impl Serialize for ChildrenView<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let children = self.parent.snapshot.processes()[self.parent.index].children();
        let mut seq = serializer.serialize_seq(Some(children.len()))?;
        for &index in children {
            seq.serialize_element(&ProcessView {
                snapshot: self.parent.snapshot,
                index,
                depth: self.parent.depth + 1,
            })?;
        }
        seq.end()
    }
}

/// Finds `pid` in the flat list and renders it with its subtree as compact JSON.
///
/// Only the top level of the snapshot is searched; nested processes are found
/// there too because every process lives in the flat list. A missing PID is
/// `Ok(None)`, not an error.
pub fn find_and_render(snapshot: &ProcessSnapshot, pid: &str) -> Result<Option<String>> {
    let Some(index) = snapshot.find(pid) else {
        warn!("pid {} not found in snapshot of {} processes", pid, snapshot.len());
        return Ok(None);
    };

    let output = serde_json::to_string(&ProcessView::new(snapshot, index))?;
    debug!("Rendered subtree for pid {} ({} bytes)", pid, output.len());
    Ok(Some(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcTreeError;
    use crate::process::entity::ProcessEntity;

    fn snapshot(records: &[(&str, &str, &str)]) -> ProcessSnapshot {
        ProcessSnapshot::from_processes(
            records
                .iter()
                .map(|(pid, ppid, command)| ProcessEntity::new(*pid, *command, "S", *ppid))
                .collect(),
        )
    }

    #[test]
    fn test_render_leaf() {
        let snap = snapshot(&[("1", "0", "init"), ("14", "1", "sleep 1000")]);
        let output = find_and_render(&snap, "14").expect("render should succeed");
        assert_eq!(
            output.as_deref(),
            Some(r#"{"pid":"14","command":"sleep 1000","status":"S","ppid":"1","children":[]}"#)
        );
    }

    #[test]
    fn test_render_nested_children() {
        let snap = snapshot(&[("1", "0", "init"), ("2", "1", "a"), ("3", "2", "b")]);
        let output = find_and_render(&snap, "1")
            .expect("render should succeed")
            .expect("pid 1 exists");
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
        assert_eq!(value["children"][0]["pid"], "2");
        assert_eq!(value["children"][0]["children"][0]["pid"], "3");
        assert_eq!(value["children"][0]["children"][0]["children"], serde_json::json!([]));
    }

    #[test]
    fn test_render_escapes_command() {
        let snap = snapshot(&[("1", "0", r#"sh -c "echo hi""#)]);
        let output = find_and_render(&snap, "1")
            .expect("render should succeed")
            .expect("pid 1 exists");
        assert!(output.contains(r#""command":"sh -c \"echo hi\"""#));
    }

    #[test]
    fn test_render_absent_pid() {
        let snap = snapshot(&[("1", "0", "init")]);
        assert_eq!(find_and_render(&snap, "100").expect("not an error"), None);
    }

    #[test]
    fn test_render_first_match_wins() {
        let snap = snapshot(&[("7", "0", "first"), ("7", "0", "second")]);
        let output = find_and_render(&snap, "7")
            .expect("render should succeed")
            .expect("pid 7 exists");
        assert!(output.contains("first"));
    }

    #[test]
    fn test_render_cycle_is_error() {
        let snap = snapshot(&[("5", "6", "a"), ("6", "5", "b")]);
        let err = find_and_render(&snap, "5").expect_err("cycle must not render");
        assert!(matches!(err, ProcTreeError::Serialization(_)));
        assert!(err.to_string().contains("cycle"));
    }
}
