use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pool::ContentRef;

/**
 * DirEntry
 * ========
 * A single node in the tree: three mappings, each keyed by one path
 * segment, unique within the node.
 *  - `dirs`: child directories, owned recursively
 *  - `files`: text contents, owned strings
 *  - `bins`: references into the content pool (the node never owns
 *    blob bytes, only the handle)
 * A name may appear in at most one of the three maps within the same
 * parent; directories, text files, and binaries share one namespace
 * per directory. BTreeMap keys give lexicographic enumeration for free.
 */
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirEntry {
    dirs: BTreeMap<String, DirEntry>,
    files: BTreeMap<String, String>,
    bins: BTreeMap<String, ContentRef>,
}

/// Which of a directory's three namespaced maps an entry lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
    Binary,
}

impl DirEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dirs(&self) -> &BTreeMap<String, DirEntry> {
        &self.dirs
    }

    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }

    pub fn bins(&self) -> &BTreeMap<String, ContentRef> {
        &self.bins
    }

    /// Which kind of entry, if any, occupies `name` in this directory.
    pub fn kind_of(&self, name: &str) -> Option<EntryKind> {
        if self.dirs.contains_key(name) {
            Some(EntryKind::Dir)
        } else if self.files.contains_key(name) {
            Some(EntryKind::File)
        } else if self.bins.contains_key(name) {
            Some(EntryKind::Binary)
        } else {
            None
        }
    }

    /// True iff `name` is free or already held by an entry of `kind`.
    ///
    /// Creation paths use this to uphold the one-namespace invariant: a
    /// write never displaces an entry of a different kind.
    pub fn admits(&self, kind: EntryKind, name: &str) -> bool {
        match self.kind_of(name) {
            None => true,
            Some(k) => k == kind,
        }
    }

    pub fn dir(&self, name: &str) -> Option<&DirEntry> {
        self.dirs.get(name)
    }

    pub fn dir_mut(&mut self, name: &str) -> Option<&mut DirEntry> {
        self.dirs.get_mut(name)
    }

    pub fn insert_dir(&mut self, name: String, entry: DirEntry) -> Option<DirEntry> {
        self.dirs.insert(name, entry)
    }

    pub fn del_dir(&mut self, name: &str) -> Option<DirEntry> {
        self.dirs.remove(name)
    }

    pub fn file(&self, name: &str) -> Option<&String> {
        self.files.get(name)
    }

    pub fn file_mut(&mut self, name: &str) -> Option<&mut String> {
        self.files.get_mut(name)
    }

    pub fn insert_file(&mut self, name: String, content: String) -> Option<String> {
        self.files.insert(name, content)
    }

    pub fn del_file(&mut self, name: &str) -> Option<String> {
        self.files.remove(name)
    }

    pub fn bin(&self, name: &str) -> Option<&ContentRef> {
        self.bins.get(name)
    }

    pub fn insert_bin(&mut self, name: String, r: ContentRef) -> Option<ContentRef> {
        self.bins.insert(name, r)
    }

    pub fn del_bin(&mut self, name: &str) -> Option<ContentRef> {
        self.bins.remove(name)
    }

    /// Sorted child-directory names.
    pub fn dir_names(&self) -> Vec<String> {
        self.dirs.keys().cloned().collect()
    }

    /// Sorted file names.
    pub fn file_names(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    /// Sorted binary names.
    pub fn bin_names(&self) -> Vec<String> {
        self.bins.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.dirs.len() + self.files.len() + self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.files.is_empty() && self.bins.is_empty()
    }
}
