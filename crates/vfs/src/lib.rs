/**
 * Undo/redo change tracking over a persisted value.
 *  Pause/resume/commit batching folds multi-step
 *  operations into single history entries.
 */
pub mod history;
/**
 * Path key codec. Parses, normalizes, and re-serializes
 *  the slash-delimited keys that address every location
 *  in the tree, including the embedded sub-key form.
 */
pub mod path;
/**
 * Content-addressable storage for binary payloads.
 *  The tree holds opaque refs; the pool holds the bytes.
 */
pub mod pool;
/**
 * The hierarchical store: directory tree nodes, the
 *  operations on them, and the deterministic traversal
 *  engine behind recursive copy.
 */
pub mod store;
/**
 * The editor-facing workspace handle: one tree plus the
 *  active-path selection, every mutation routed through
 *  the history.
 */
pub mod workspace;

pub mod prelude {
    pub use crate::history::History;
    pub use crate::path::{PathKey, TreePath};
    pub use crate::pool::{ContentPool, ContentRef, MemoryPool};
    pub use crate::store::{DirEntry, Tree};
    pub use crate::workspace::{Workspace, WorkspaceError, WorkspaceState};
}
