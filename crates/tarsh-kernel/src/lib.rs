//! tarsh kernel — the core of a shell over a tar-materialized virtual
//! filesystem.
//!
//! The tree is built once at startup from the archive source and never
//! rebuilt; commands navigate it, list it, and mutate per-node ownership,
//! nothing else. The pieces:
//!
//! - [`vfs`] — the node/tree model and lookup
//! - [`resolve`] — lexical path canonicalization (no tree access)
//! - [`session`] — working-directory stack and start time
//! - [`interpreter`] — verb dispatch, one atomic transition per line
//! - [`archive`], [`config`], [`journal`] — the external collaborators:
//!   entry source, startup configuration, and the action log sink
//!
//! Everything is single-threaded and strictly sequential; each command
//! handler runs to completion before the next prompt.

pub mod archive;
pub mod config;
pub mod interpreter;
pub mod journal;
pub mod resolve;
pub mod session;
pub mod vfs;

pub use config::{Config, ConfigError};
pub use interpreter::{ExecResult, Interpreter, Outcome};
pub use journal::ActionJournal;
pub use resolve::resolve;
pub use session::Session;
pub use vfs::{Node, NodeKind, VfsTree};
