use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::path::{self, TreePath};
use crate::pool::ContentRef;

use super::node::{DirEntry, EntryKind};
use super::walk::travel;

/// The mutable directory tree.
///
/// All operations accept any [`TreePath`] representation and normalize it
/// through the path codec before touching nodes. Expected absence is never
/// an error: lookups return `None`, mutations report `bool`, and callers
/// check return values. The root node is never deleted, only reset to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    root: DirEntry,
}

enum CopyOp {
    Dir(Vec<String>),
    File(Vec<String>, String, String),
    Bin(Vec<String>, String, ContentRef),
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &DirEntry {
        &self.root
    }

    /// Drop every entry; the root itself survives.
    pub fn reset(&mut self) {
        self.root = DirEntry::default();
    }

    // ---- trace primitives ----

    /// Walk segment-by-segment from the root without creating anything.
    fn trace_dir(&self, segs: &[String]) -> Option<&DirEntry> {
        let mut now = &self.root;
        for seg in segs {
            now = now.dir(seg)?;
        }
        Some(now)
    }

    /// Walk segment-by-segment from the root, creating missing directory
    /// nodes only when `create` is true. Creation refuses to displace a
    /// file or binary holding the same name.
    fn trace_dir_mut(&mut self, segs: &[String], create: bool) -> Option<&mut DirEntry> {
        let mut now = &mut self.root;
        for seg in segs {
            if now.dir(seg).is_none() {
                if !(create && now.admits(EntryKind::Dir, seg)) {
                    return None;
                }
                now.insert_dir(seg.clone(), DirEntry::new());
            }
            now = now.dir_mut(seg)?;
        }
        Some(now)
    }

    /// True iff every segment of `segs` either resolves to a directory or
    /// can be created as one without displacing another entry kind.
    fn dir_chain_admits(&self, segs: &[String]) -> bool {
        let mut now = &self.root;
        for seg in segs {
            match now.dir(seg) {
                Some(child) => now = child,
                // everything deeper would be created fresh
                None => return now.admits(EntryKind::Dir, seg),
            }
        }
        true
    }

    // ---- exists ----

    pub fn exists_dir(&self, path: impl Into<TreePath>) -> bool {
        self.trace_dir(&path::to_seg(&path.into())).is_some()
    }

    pub fn exists_file(&self, path: impl Into<TreePath>) -> bool {
        let (dir, name, _) = path::divide(&path.into());
        self.trace_dir(&dir)
            .map(|e| e.file(&name).is_some())
            .unwrap_or(false)
    }

    pub fn exists_binary(&self, path: impl Into<TreePath>) -> bool {
        let (dir, name, _) = path::divide(&path.into());
        self.trace_dir(&dir)
            .map(|e| e.bin(&name).is_some())
            .unwrap_or(false)
    }

    // ---- read ----

    /// Sorted name lists for subdirectories, files, and binaries, or `None`
    /// if the path does not resolve to a directory.
    pub fn read_dir(
        &self,
        path: impl Into<TreePath>,
    ) -> Option<(Vec<String>, Vec<String>, Vec<String>)> {
        let entry = self.trace_dir(&path::to_seg(&path.into()))?;
        Some((entry.dir_names(), entry.file_names(), entry.bin_names()))
    }

    pub fn read_file(&self, path: impl Into<TreePath>) -> Option<&str> {
        let (dir, name, _) = path::divide(&path.into());
        self.trace_dir(&dir)?.file(&name).map(|s| s.as_str())
    }

    pub fn read_binary(&self, path: impl Into<TreePath>) -> Option<&ContentRef> {
        let (dir, name, _) = path::divide(&path.into());
        self.trace_dir(&dir)?.bin(&name)
    }

    // ---- write ----

    /// Create or overwrite a text file. The parent directory must already
    /// exist; writes never create parents.
    pub fn write_file(&mut self, path: impl Into<TreePath>, content: impl Into<String>) -> bool {
        let (dir, name, _) = path::divide(&path.into());
        if name.is_empty() {
            return false;
        }
        let Some(entry) = self.trace_dir_mut(&dir, false) else {
            return false;
        };
        if !entry.admits(EntryKind::File, &name) {
            return false;
        }
        entry.insert_file(name, content.into());
        true
    }

    /// Create or overwrite a binary entry. Same parent rule as
    /// [`write_file`](Self::write_file).
    pub fn write_binary(&mut self, path: impl Into<TreePath>, r: ContentRef) -> bool {
        let (dir, name, _) = path::divide(&path.into());
        if name.is_empty() {
            return false;
        }
        let Some(entry) = self.trace_dir_mut(&dir, false) else {
            return false;
        };
        if !entry.admits(EntryKind::Binary, &name) {
            return false;
        }
        entry.insert_bin(name, r);
        true
    }

    // ---- touch ----

    /// Create the directory chain if absent. Idempotent.
    pub fn touch_dir(&mut self, path: impl Into<TreePath>) {
        self.trace_dir_mut(&path::to_seg(&path.into()), true);
    }

    /// Create an empty file if absent. Idempotent; the parent must exist.
    pub fn touch_file(&mut self, path: impl Into<TreePath>) {
        let (dir, name, _) = path::divide(&path.into());
        if name.is_empty() {
            return;
        }
        if let Some(entry) = self.trace_dir_mut(&dir, false) {
            if entry.file(&name).is_none() && entry.admits(EntryKind::File, &name) {
                entry.insert_file(name, String::new());
            }
        }
    }

    /// Create a binary entry with the empty ref if absent. Idempotent; the
    /// parent must exist.
    pub fn touch_binary(&mut self, path: impl Into<TreePath>) {
        let (dir, name, _) = path::divide(&path.into());
        if name.is_empty() {
            return;
        }
        if let Some(entry) = self.trace_dir_mut(&dir, false) {
            if entry.bin(&name).is_none() && entry.admits(EntryKind::Binary, &name) {
                entry.insert_bin(name, ContentRef::default());
            }
        }
    }

    // ---- remove ----

    /// Detach and return the subtree, or `None` if absent (a no-op, not an
    /// error).
    pub fn remove_dir(&mut self, path: impl Into<TreePath>) -> Option<DirEntry> {
        let (dir, name, _) = path::divide(&path.into());
        if name.is_empty() {
            return None;
        }
        self.trace_dir_mut(&dir, false)?.del_dir(&name)
    }

    pub fn remove_file(&mut self, path: impl Into<TreePath>) -> Option<String> {
        let (dir, name, _) = path::divide(&path.into());
        self.trace_dir_mut(&dir, false)?.del_file(&name)
    }

    pub fn remove_binary(&mut self, path: impl Into<TreePath>) -> Option<ContentRef> {
        let (dir, name, _) = path::divide(&path.into());
        self.trace_dir_mut(&dir, false)?.del_bin(&name)
    }

    // ---- rename ----

    /// Detach the subtree at `from` and reattach it at `to`, creating
    /// intermediate directories as needed. Any existing subtree at `to` is
    /// replaced wholesale. Returns false if `from` does not exist or the
    /// destination chain is blocked by a file or binary; the detach only
    /// happens once the destination is known to be valid.
    pub fn rename_dir(&mut self, from: impl Into<TreePath>, to: impl Into<TreePath>) -> bool {
        let from = from.into();
        let (fdir, fname, _) = path::divide(&from);
        if fname.is_empty() {
            return false;
        }
        let src_exists = self
            .trace_dir(&fdir)
            .map(|e| e.dir(&fname).is_some())
            .unwrap_or(false);
        if !src_exists {
            return false;
        }
        let tsegs = path::to_seg(&to.into());
        if !self.dir_chain_admits(&tsegs) {
            tracing::debug!("rename_dir: destination chain blocked at /{}", tsegs.join("/"));
            return false;
        }
        let Some(detached) = self
            .trace_dir_mut(&fdir, false)
            .and_then(|e| e.del_dir(&fname))
        else {
            return false;
        };
        match tsegs.split_last() {
            Some((last, parents)) => match self.trace_dir_mut(parents, true) {
                Some(parent) => {
                    parent.insert_dir(last.clone(), detached);
                    true
                }
                None => false,
            },
            // renaming onto the root key replaces the whole tree
            None => {
                self.root = detached;
                true
            }
        }
    }

    /// Move a text file. The destination parent must already exist and the
    /// destination name must not be held by a directory or binary; both are
    /// validated before the source is detached, so a failed rename leaves
    /// the source in place. Embedded-hash endpoints are refused: rename
    /// operates on whole files only.
    pub fn rename_file(&mut self, from: impl Into<TreePath>, to: impl Into<TreePath>) -> bool {
        let (fdir, fname, fhash) = path::divide(&from.into());
        let (tdir, tname, thash) = path::divide(&to.into());
        if fhash.is_some() || thash.is_some() {
            return false;
        }
        if fname.is_empty() || tname.is_empty() {
            return false;
        }
        let dest_ok = self
            .trace_dir(&tdir)
            .map(|e| e.admits(EntryKind::File, &tname))
            .unwrap_or(false);
        if !dest_ok {
            tracing::debug!("rename_file: destination parent missing or name taken");
            return false;
        }
        let Some(content) = self
            .trace_dir_mut(&fdir, false)
            .and_then(|e| e.del_file(&fname))
        else {
            return false;
        };
        match self.trace_dir_mut(&tdir, false) {
            Some(entry) => {
                entry.insert_file(tname, content);
                true
            }
            // detaching a file cannot remove a directory, so the validated
            // destination parent is still there
            None => false,
        }
    }

    /// Move a binary entry. Same contract as [`rename_file`](Self::rename_file).
    pub fn rename_binary(&mut self, from: impl Into<TreePath>, to: impl Into<TreePath>) -> bool {
        let (fdir, fname, fhash) = path::divide(&from.into());
        let (tdir, tname, thash) = path::divide(&to.into());
        if fhash.is_some() || thash.is_some() {
            return false;
        }
        if fname.is_empty() || tname.is_empty() {
            return false;
        }
        let dest_ok = self
            .trace_dir(&tdir)
            .map(|e| e.admits(EntryKind::Binary, &tname))
            .unwrap_or(false);
        if !dest_ok {
            tracing::debug!("rename_binary: destination parent missing or name taken");
            return false;
        }
        let Some(r) = self
            .trace_dir_mut(&fdir, false)
            .and_then(|e| e.del_bin(&fname))
        else {
            return false;
        };
        match self.trace_dir_mut(&tdir, false) {
            Some(entry) => {
                entry.insert_bin(tname, r);
                true
            }
            None => false,
        }
    }

    // ---- copy ----

    /// Shallow value copy of a text file. Refuses embedded-hash endpoints:
    /// copy operates on whole files only.
    pub fn copy_file(&mut self, from: impl Into<TreePath>, to: impl Into<TreePath>) -> bool {
        let (fdir, fname, fhash) = path::divide(&from.into());
        let (tdir, tname, thash) = path::divide(&to.into());
        if fhash.is_some() || thash.is_some() {
            return false;
        }
        if fname.is_empty() || tname.is_empty() {
            return false;
        }
        let Some(content) = self.trace_dir(&fdir).and_then(|e| e.file(&fname)).cloned() else {
            return false;
        };
        let Some(dest) = self.trace_dir_mut(&tdir, false) else {
            return false;
        };
        if !dest.admits(EntryKind::File, &tname) {
            return false;
        }
        dest.insert_file(tname, content);
        true
    }

    /// Shallow copy of a binary entry's content reference.
    pub fn copy_binary(&mut self, from: impl Into<TreePath>, to: impl Into<TreePath>) -> bool {
        let (fdir, fname, fhash) = path::divide(&from.into());
        let (tdir, tname, thash) = path::divide(&to.into());
        if fhash.is_some() || thash.is_some() {
            return false;
        }
        if fname.is_empty() || tname.is_empty() {
            return false;
        }
        let Some(r) = self.trace_dir(&fdir).and_then(|e| e.bin(&fname)).cloned() else {
            return false;
        };
        let Some(dest) = self.trace_dir_mut(&tdir, false) else {
            return false;
        };
        if !dest.admits(EntryKind::Binary, &tname) {
            return false;
        }
        dest.insert_bin(tname, r);
        true
    }

    /// Deep copy of a whole subtree into `to`/`<source leaf name>`.
    ///
    /// The walk recreates every descendant directory and duplicates every
    /// file and binary value, so mutating the destination afterwards never
    /// affects the source. Returns false if the source directory is missing
    /// or the destination chain is blocked.
    pub fn copy_dir(&mut self, from: impl Into<TreePath>, to: impl Into<TreePath>) -> bool {
        let from = from.into();
        let (_, name, _) = path::divide(&from);
        if name.is_empty() {
            return false;
        }
        let Some(src) = self.trace_dir(&path::to_seg(&from)) else {
            return false;
        };
        // walk a detached clone so source iteration stays independent of
        // destination mutation, even when the destination lands inside the
        // source subtree
        let src = src.clone();
        let mut dest_segs = path::to_seg(&to.into());
        dest_segs.push(name);
        if !self.dir_chain_admits(&dest_segs) {
            tracing::debug!("copy_dir: destination chain blocked at /{}", dest_segs.join("/"));
            return false;
        }
        if self.trace_dir_mut(&dest_segs, true).is_none() {
            return false;
        }

        let ops = RefCell::new(Vec::new());
        travel(
            &src,
            &mut |_, name, dest: &Vec<String>| {
                let mut d = dest.clone();
                d.push(name.to_string());
                ops.borrow_mut().push(CopyOp::Dir(d.clone()));
                d
            },
            &mut |_, name, content, dest| {
                ops.borrow_mut().push(CopyOp::File(
                    dest.clone(),
                    name.to_string(),
                    content.to_string(),
                ));
            },
            &mut |_, name, r, dest| {
                ops.borrow_mut()
                    .push(CopyOp::Bin(dest.clone(), name.to_string(), r.clone()));
            },
            &dest_segs,
        );

        for op in ops.into_inner() {
            match op {
                CopyOp::Dir(segs) => {
                    self.trace_dir_mut(&segs, true);
                }
                CopyOp::File(dir, name, content) => {
                    if let Some(entry) = self.trace_dir_mut(&dir, false) {
                        if entry.admits(EntryKind::File, &name) {
                            entry.insert_file(name, content);
                        }
                    }
                }
                CopyOp::Bin(dir, name, r) => {
                    if let Some(entry) = self.trace_dir_mut(&dir, false) {
                        if entry.admits(EntryKind::Binary, &name) {
                            entry.insert_bin(name, r);
                        }
                    }
                }
            }
        }
        true
    }
}
