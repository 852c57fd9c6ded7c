//! In-memory representation of a single process record.

/// One process from the snapshot.
///
/// `children` holds indices into the owning [`ProcessSnapshot`](super::ProcessSnapshot)
/// arena rather than owned values, so a child is the same slot wherever it is reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntity {
    pub pid: String,
    pub command: String,
    pub status: String,
    pub ppid: String,
    pub(crate) children: Vec<usize>,
}

impl ProcessEntity {
    pub fn new(
        pid: impl Into<String>,
        command: impl Into<String>,
        status: impl Into<String>,
        ppid: impl Into<String>,
    ) -> Self {
        Self {
            pid: pid.into(),
            command: command.into(),
            status: status.into(),
            ppid: ppid.into(),
            children: Vec::new(),
        }
    }

    /// Arena indices of the directly attached children, in attachment order.
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entity_has_no_children() {
        let entity = ProcessEntity::new("14", "sleep 1000", "S", "1");
        assert_eq!(entity.pid, "14");
        assert_eq!(entity.ppid, "1");
        assert!(entity.is_leaf());
        assert!(entity.children().is_empty());
    }
}
