//! Process snapshot modules.
//!
//! This module provides:
//! - `reader`: Parsing of `/proc/<pid>/stat` and `/proc/<pid>/cmdline`
//! - `scanner`: Process discovery and collection
//! - `tree`: Parent/child association
//! - `render`: Subtree lookup and JSON rendering
//! - `snapshot`: The arena tying these together

pub mod entity;
pub mod reader;
pub mod render;
pub mod scanner;
pub mod snapshot;
pub mod tree;

// Re-export commonly used types
pub use entity::ProcessEntity;
pub use reader::{parse_cmdline, parse_status_line, read_command, read_process, StatusFields};
pub use render::{find_and_render, ProcessView};
pub use scanner::{collect_proc_entries, collect_processes, ProcEntry};
pub use snapshot::{ProcessSnapshot, DEFAULT_PROC_ROOT};
pub use tree::associate;
