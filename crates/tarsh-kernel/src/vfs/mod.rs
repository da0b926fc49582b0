//! Virtual filesystem for tarsh.
//!
//! The tree is materialized once at startup from the archive source and is
//! structurally immutable afterwards: no command creates, deletes, or renames
//! entries. The only mutable attribute is each node's `owner`.
//!
//! ```text
//! /                      # synthetic root, always a directory
//! ├── documents/
//! │   └── file1.txt
//! └── images/
//!     └── photo1.png
//! ```

mod node;
mod tree;

pub use node::{Node, NodeKind, DEFAULT_OWNER};
pub use tree::VfsTree;
