//! Hierarchical store for the virtual filesystem
//!
//! This module defines the in-memory directory tree and the operations the
//! editor performs on it:
//!
//! - **[`DirEntry`]**: one tree node, holding child directories, text files,
//!   and binary-reference entries in three disjoint namespaces
//! - **[`Tree`]**: the mutable tree with trace/create/delete primitives and
//!   the public exists/read/write/copy/rename/remove operations
//! - **[`travel`]**: deterministic depth-first traversal, the engine behind
//!   recursive directory copy
//!
//! # Architecture
//!
//! A tree is a plain owned structure:
//! ```text
//! Tree --root--> DirEntry
//!                   |
//!          +--------+--------+
//!          |        |        |
//!        dirs     files    bins
//!          |        |        |
//!      DirEntry   String  ContentRef  (pool holds the bytes)
//! ```
//!
//! Every slot is an owned value reached through explicit lookup-then-write;
//! there is no shared mutable aliasing, and traversal accumulators are plain
//! parameters. Expected absence is reported through `Option`/`bool` rather
//! than errors.

mod node;
mod tree;
mod walk;

pub use node::{DirEntry, EntryKind};
pub use tree::Tree;
pub use walk::travel;
