//! Point-in-time snapshot of the process table.

use std::path::Path;

use crate::error::Result;
use crate::process::entity::ProcessEntity;
use crate::process::render::find_and_render;
use crate::process::scanner::collect_processes;
use crate::process::tree::build_tree;

/// Default root of the process filesystem.
pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Arena owning every process of one snapshot, already wired into a forest.
///
/// The association pass runs inside the constructors, so a snapshot can never
/// be wired twice.
#[derive(Debug, Clone, Default)]
pub struct ProcessSnapshot {
    processes: Vec<ProcessEntity>,
}

impl ProcessSnapshot {
    /// Reads every process under `root` and wires the parent/child forest.
    pub fn capture(root: &Path) -> Result<Self> {
        Ok(Self::from_processes(collect_processes(root)?))
    }

    /// Wires an already collected flat list. Any pre-existing children are discarded.
    pub fn from_processes(mut processes: Vec<ProcessEntity>) -> Self {
        for process in &mut processes {
            process.children.clear();
        }
        build_tree(&mut processes);
        Self { processes }
    }

    /// The flat list in collection order.
    pub fn processes(&self) -> &[ProcessEntity] {
        &self.processes
    }

    pub fn get(&self, index: usize) -> Option<&ProcessEntity> {
        self.processes.get(index)
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Index of the first process with `pid`, scanning only the flat list.
    pub fn find(&self, pid: &str) -> Option<usize> {
        self.processes.iter().position(|p| p.pid == pid)
    }

    /// Direct children of the process at `index`.
    pub fn children_of(&self, index: usize) -> impl Iterator<Item = &ProcessEntity> + '_ {
        self.processes
            .get(index)
            .map(|p| p.children())
            .unwrap_or_default()
            .iter()
            .map(move |&i| &self.processes[i])
    }

    /// Renders the subtree rooted at `pid`; `None` when the PID is absent.
    pub fn render(&self, pid: &str) -> Result<Option<String>> {
        find_and_render(self, pid)
    }
}
