use std::ops::{Deref, DerefMut};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::history::History;
use crate::path::{PathKey, TreePath};
use crate::pool::{ContentPool, ContentRef};
use crate::store::{DirEntry, Tree};

/// Everything the history tracks as one value: the tree plus the currently
/// active/selected path. Undoing a step reverts both together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceState {
    pub tree: Tree,
    #[serde(default)]
    pub active: Option<PathKey>,
}

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("default error: {0}")]
    Default(#[from] anyhow::Error),
    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

/// The editor-facing handle over one virtual filesystem.
///
/// A workspace couples a [`Tree`] and the active-path selection under one
/// [`History`]; every mutation routes through the history so it is
/// undoable. Construct as many independent workspaces as needed; there is
/// no process-wide instance.
#[derive(Debug, Clone)]
pub struct Workspace {
    state: History<WorkspaceState>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self::from_state(WorkspaceState::default())
    }

    pub fn from_state(state: WorkspaceState) -> Self {
        Self {
            state: History::new(state),
        }
    }

    /// Read-only view of the live tree.
    pub fn tree(&self) -> &Tree {
        &self.state.now().tree
    }

    // ---- exists / read ----

    pub fn exists_dir(&self, path: impl Into<TreePath>) -> bool {
        self.tree().exists_dir(path)
    }

    pub fn exists_file(&self, path: impl Into<TreePath>) -> bool {
        self.tree().exists_file(path)
    }

    pub fn exists_binary(&self, path: impl Into<TreePath>) -> bool {
        self.tree().exists_binary(path)
    }

    pub fn read_dir(
        &self,
        path: impl Into<TreePath>,
    ) -> Option<(Vec<String>, Vec<String>, Vec<String>)> {
        self.tree().read_dir(path)
    }

    pub fn read_file(&self, path: impl Into<TreePath>) -> Option<String> {
        self.tree().read_file(path).map(|s| s.to_string())
    }

    pub fn read_binary(&self, path: impl Into<TreePath>) -> Option<ContentRef> {
        self.tree().read_binary(path).cloned()
    }

    // ---- write / touch ----

    pub fn write_file(
        &mut self,
        path: impl Into<TreePath>,
        content: impl Into<String>,
    ) -> bool {
        let (path, content) = (path.into(), content.into());
        self.state.change(|s| s.tree.write_file(path, content))
    }

    pub fn write_binary(&mut self, path: impl Into<TreePath>, r: ContentRef) -> bool {
        let path = path.into();
        self.state.change(|s| s.tree.write_binary(path, r))
    }

    pub fn touch_dir(&mut self, path: impl Into<TreePath>) {
        let path = path.into();
        self.state.change(|s| s.tree.touch_dir(path))
    }

    pub fn touch_file(&mut self, path: impl Into<TreePath>) {
        let path = path.into();
        self.state.change(|s| s.tree.touch_file(path))
    }

    pub fn touch_binary(&mut self, path: impl Into<TreePath>) {
        let path = path.into();
        self.state.change(|s| s.tree.touch_binary(path))
    }

    // ---- remove / rename / copy ----

    pub fn remove_dir(&mut self, path: impl Into<TreePath>) -> Option<DirEntry> {
        let path = path.into();
        self.state.change(|s| s.tree.remove_dir(path))
    }

    pub fn remove_file(&mut self, path: impl Into<TreePath>) -> Option<String> {
        let path = path.into();
        self.state.change(|s| s.tree.remove_file(path))
    }

    pub fn remove_binary(&mut self, path: impl Into<TreePath>) -> Option<ContentRef> {
        let path = path.into();
        self.state.change(|s| s.tree.remove_binary(path))
    }

    pub fn rename_dir(&mut self, from: impl Into<TreePath>, to: impl Into<TreePath>) -> bool {
        let (from, to) = (from.into(), to.into());
        self.state.change(|s| s.tree.rename_dir(from, to))
    }

    pub fn rename_file(&mut self, from: impl Into<TreePath>, to: impl Into<TreePath>) -> bool {
        let (from, to) = (from.into(), to.into());
        self.state.change(|s| s.tree.rename_file(from, to))
    }

    pub fn rename_binary(&mut self, from: impl Into<TreePath>, to: impl Into<TreePath>) -> bool {
        let (from, to) = (from.into(), to.into());
        self.state.change(|s| s.tree.rename_binary(from, to))
    }

    pub fn copy_file(&mut self, from: impl Into<TreePath>, to: impl Into<TreePath>) -> bool {
        let (from, to) = (from.into(), to.into());
        self.state.change(|s| s.tree.copy_file(from, to))
    }

    pub fn copy_binary(&mut self, from: impl Into<TreePath>, to: impl Into<TreePath>) -> bool {
        let (from, to) = (from.into(), to.into());
        self.state.change(|s| s.tree.copy_binary(from, to))
    }

    pub fn copy_dir(&mut self, from: impl Into<TreePath>, to: impl Into<TreePath>) -> bool {
        let (from, to) = (from.into(), to.into());
        self.state.change(|s| s.tree.copy_dir(from, to))
    }

    /// Empty the tree and clear the selection, as one undoable step.
    pub fn reset(&mut self) {
        self.state.change(|s| {
            s.tree.reset();
            s.active = None;
        })
    }

    // ---- selection ----

    pub fn active(&self) -> Option<&PathKey> {
        self.state.now().active.as_ref()
    }

    pub fn set_active(&mut self, key: impl Into<PathKey>) {
        let key = key.into();
        self.state.change(|s| s.active = Some(key))
    }

    pub fn clear_active(&mut self) {
        self.state.change(|s| s.active = None)
    }

    // ---- content pool glue ----

    /// Stash a binary payload in the pool and record its ref at `path`.
    /// The parent directory must already exist.
    pub fn add(
        &mut self,
        path: impl Into<TreePath>,
        data: Bytes,
        pool: &mut impl ContentPool,
    ) -> bool {
        let r = pool.put(data);
        self.write_binary(path, r)
    }

    /// Resolve the binary at `path` back to its payload bytes.
    pub fn cat(&self, path: impl Into<TreePath>, pool: &impl ContentPool) -> Option<Bytes> {
        let r = self.tree().read_binary(path)?;
        pool.get(r)
    }

    // ---- history ----

    pub fn undo(&mut self) -> bool {
        self.state.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.state.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.state.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.can_redo()
    }

    /// Number of committed steps behind the current state.
    pub fn version(&self) -> usize {
        self.state.version()
    }

    pub fn pause(&mut self) {
        self.state.pause()
    }

    pub fn resume(&mut self) {
        self.state.resume()
    }

    pub fn commit(&mut self) {
        self.state.commit()
    }

    /// Open a batch: every mutation until the guard drops folds into one
    /// undo step. The guard dereferences to the workspace, so the full
    /// operation surface is available through it.
    pub fn batch(&mut self) -> WorkspaceBatch<'_> {
        self.state.pause();
        WorkspaceBatch { workspace: self }
    }

    // ---- persistence collaborator boundary ----

    /// Serialize the live state (tree plus selection) as a plain nested
    /// mapping. The storage format beyond that is the collaborator's.
    pub fn dehydrate(&self) -> Result<serde_json::Value, WorkspaceError> {
        Ok(serde_json::to_value(self.state.now())?)
    }

    /// Rebuild a workspace from a previously dehydrated mapping. History
    /// starts fresh at the restored state.
    pub fn hydrate(value: serde_json::Value) -> Result<Self, WorkspaceError> {
        let state: WorkspaceState = serde_json::from_value(value)?;
        Ok(Self::from_state(state))
    }
}

/// Scoped batch over a [`Workspace`]; resumes and commits on drop, on every
/// exit path.
pub struct WorkspaceBatch<'a> {
    workspace: &'a mut Workspace,
}

impl Deref for WorkspaceBatch<'_> {
    type Target = Workspace;

    fn deref(&self) -> &Workspace {
        self.workspace
    }
}

impl DerefMut for WorkspaceBatch<'_> {
    fn deref_mut(&mut self) -> &mut Workspace {
        self.workspace
    }
}

impl Drop for WorkspaceBatch<'_> {
    fn drop(&mut self) {
        self.workspace.state.resume();
        self.workspace.state.commit();
    }
}
