//! Parent/child association over the flat process list.
//!
//! Children are recorded as indices into the same slice, so a process that is
//! attached under its parent is still the very slot the flat list holds.

use tracing::{debug, trace, Level};

use crate::process::entity::ProcessEntity;

/// Attaches to `processes[index]` every process whose `ppid` matches its `pid`,
/// then descends into each attached child.
///
/// Every level rescans the whole slice, so records may appear in any order.
/// `associated` marks entities whose children are already wired; they are
/// skipped, which keeps each child under its parent exactly once no matter
/// how many times the entity is reached.
pub fn associate(processes: &mut [ProcessEntity], index: usize, associated: &mut [bool]) {
    if associated[index] {
        return;
    }
    associated[index] = true;

    let pid = &processes[index].pid;
    let found: Vec<usize> = processes
        .iter()
        .enumerate()
        .filter(|(_, candidate)| candidate.ppid == *pid)
        .map(|(i, _)| i)
        .collect();

    if !found.is_empty() {
        trace!("pid {} has {} children", pid, found.len());
    }
    processes[index].children.extend_from_slice(&found);

    for child in found {
        associate(processes, child, associated);
    }
}

/// Wires the whole forest, treating every process as a potential parent.
///
/// Must run once per snapshot; [`ProcessSnapshot`](super::ProcessSnapshot) is
/// the only caller outside of tests.
pub(crate) fn build_tree(processes: &mut [ProcessEntity]) {
    let mut associated = vec![false; processes.len()];
    for index in 0..processes.len() {
        associate(processes, index, &mut associated);
    }

    if tracing::enabled!(Level::DEBUG) {
        let roots = processes
            .iter()
            .filter(|p| !processes.iter().any(|parent| parent.pid == p.ppid))
            .count();
        debug!(
            "Built process tree: {} processes, {} roots",
            processes.len(),
            roots
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proc(pid: &str, ppid: &str) -> ProcessEntity {
        ProcessEntity::new(pid, "sleep 1000", "S", ppid)
    }

    fn child_pids<'a>(processes: &'a [ProcessEntity], index: usize) -> Vec<&'a str> {
        processes[index]
            .children()
            .iter()
            .map(|&i| processes[i].pid.as_str())
            .collect()
    }

    #[test]
    fn test_build_tree_basic() {
        let mut processes = vec![proc("1", "0"), proc("14", "1"), proc("22", "1"), proc("45", "22")];
        build_tree(&mut processes);

        assert_eq!(child_pids(&processes, 0), vec!["14", "22"]);
        assert!(child_pids(&processes, 1).is_empty());
        assert_eq!(child_pids(&processes, 2), vec!["45"]);
        assert!(child_pids(&processes, 3).is_empty());
    }

    #[test]
    fn test_build_tree_children_attached_once() {
        // 22 is reached from 1's recursion and again from the top-level loop
        let mut processes = vec![proc("1", "0"), proc("22", "1"), proc("45", "22"), proc("46", "22")];
        build_tree(&mut processes);

        for (parent_index, parent) in processes.iter().enumerate() {
            for (child_index, child) in processes.iter().enumerate() {
                let hits = parent.children().iter().filter(|&&i| i == child_index).count();
                let expected = usize::from(child.ppid == parent.pid);
                assert_eq!(hits, expected, "parent {parent_index} child {child_index}");
            }
        }
    }

    #[test]
    fn test_build_tree_out_of_order() {
        // Grandchild listed before its parent, parent before the root
        let mut processes = vec![proc("900", "300"), proc("300", "7"), proc("7", "1")];
        build_tree(&mut processes);

        assert_eq!(child_pids(&processes, 2), vec!["300"]);
        assert_eq!(child_pids(&processes, 1), vec!["900"]);
        assert!(child_pids(&processes, 0).is_empty());
    }

    #[test]
    fn test_build_tree_forest() {
        let mut processes = vec![proc("1", "0"), proc("2", "0"), proc("3", "2"), proc("10", "1")];
        build_tree(&mut processes);

        assert_eq!(child_pids(&processes, 0), vec!["10"]);
        assert_eq!(child_pids(&processes, 1), vec!["3"]);
    }

    #[test]
    fn test_associate_single_entity_descends() {
        let mut processes = vec![proc("1", "0"), proc("14", "1"), proc("45", "14")];
        let mut associated = vec![false; processes.len()];
        associate(&mut processes, 0, &mut associated);

        assert_eq!(child_pids(&processes, 0), vec!["14"]);
        assert_eq!(child_pids(&processes, 1), vec!["45"]);
        assert!(associated.iter().all(|&a| a));
    }

    #[test]
    fn test_associate_cycle_terminates() {
        let mut processes = vec![proc("5", "6"), proc("6", "5")];
        build_tree(&mut processes);

        assert_eq!(child_pids(&processes, 0), vec!["6"]);
        assert_eq!(child_pids(&processes, 1), vec!["5"]);
    }

    #[test]
    fn test_build_tree_with_debug_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .finish();
        let mut processes = vec![proc("1", "0"), proc("2", "0"), proc("3", "2")];
        tracing::subscriber::with_default(subscriber, || build_tree(&mut processes));

        assert_eq!(child_pids(&processes, 1), vec!["3"]);
        assert!(child_pids(&processes, 0).is_empty());
    }

    #[test]
    fn test_build_tree_empty() {
        let mut processes: Vec<ProcessEntity> = Vec::new();
        build_tree(&mut processes);
        assert!(processes.is_empty());
    }
}
