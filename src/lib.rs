//! Herakles Process Tree Library
//!
//! This library takes a point-in-time snapshot of the Linux process table
//! from `/proc`, wires it into a parent/child forest and renders the subtree
//! of a single PID as JSON.
//!
//! # Features
//!
//! - **Record Parsing**: `stat` and `cmdline` per process, tolerant of spaces in the comm field
//! - **Arena Tree**: children are indices into the flat process list, never copies
//! - **Flat Lookup**: any PID, root or nested, is found with its full subtree attached
//! - **Stable JSON**: keys `pid`, `command`, `status`, `ppid`, `children` in that order
//!
//! # Usage
//!
//! ```rust,no_run
//! use herakles_proc_tree::ProcessSnapshot;
//! use std::path::Path;
//!
//! let snapshot = ProcessSnapshot::capture(Path::new("/proc"))?;
//!
//! match snapshot.render("1")? {
//!     Some(json) => println!("{json}"),
//!     None => println!("pid 1 not found"),
//! }
//! # Ok::<(), herakles_proc_tree::ProcTreeError>(())
//! ```

pub mod error;
pub mod process;

// Re-export main types for convenience
pub use error::{ProcTreeError, Result};
pub use process::{find_and_render, ProcessEntity, ProcessSnapshot, DEFAULT_PROC_ROOT};
