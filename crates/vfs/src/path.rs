//! Path key codec for the virtual filesystem
//!
//! Every location in the tree is addressed by a slash-delimited key. The
//! codec is purely syntactic: it splits, normalizes, and re-serializes keys
//! without ever consulting the tree.
//!
//! Key shapes:
//! - `/`: the root directory
//! - `/notes/drafts/`: a directory (trailing separator)
//! - `/notes/todo.json`: a file or binary (no trailing separator)
//! - `/notes/todo.json#1f2e3d`: an entry *inside* a file's JSON content,
//!   identified by an embedded hash. This is a logical addressing extension;
//!   the tree never materializes a node for the sub-key.

use serde::{Deserialize, Serialize};

/// Segment separator in canonical keys.
pub const SEP: char = '/';

/// Delimiter between a file key and an embedded sub-key.
pub const HASH_SEP: char = '#';

/// Canonical slash-delimited key addressing one location in the tree.
///
/// Directory keys carry a trailing separator (or are the literal root `/`);
/// file and binary keys do not.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathKey(String);

impl PathKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True iff this key addresses a directory (trailing separator or root).
    pub fn is_dir(&self) -> bool {
        key_is_dir(&self.0)
    }
}

impl std::fmt::Display for PathKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PathKey {
    fn from(s: String) -> Self {
        PathKey(s)
    }
}

impl From<&str> for PathKey {
    fn from(s: &str) -> Self {
        PathKey(s.to_string())
    }
}

/// Ordered path components, the decomposed form used for tree traversal.
pub type PathSegments = Vec<String>;

/// The loosely-typed union accepted by every store operation.
///
/// Callers may hand over a canonical key, a pre-split segment list, or a
/// (segments, optional hash suffix) pair; all are normalized through the
/// codec before touching the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreePath {
    Key(PathKey),
    Segments(PathSegments),
    Zip(PathSegments, Option<String>),
}

impl From<PathKey> for TreePath {
    fn from(k: PathKey) -> Self {
        TreePath::Key(k)
    }
}

impl From<&PathKey> for TreePath {
    fn from(k: &PathKey) -> Self {
        TreePath::Key(k.clone())
    }
}

impl From<&str> for TreePath {
    fn from(s: &str) -> Self {
        TreePath::Key(PathKey::from(s))
    }
}

impl From<String> for TreePath {
    fn from(s: String) -> Self {
        TreePath::Key(PathKey::from(s))
    }
}

impl From<PathSegments> for TreePath {
    fn from(segs: PathSegments) -> Self {
        TreePath::Segments(segs)
    }
}

impl From<&[&str]> for TreePath {
    fn from(segs: &[&str]) -> Self {
        TreePath::Segments(segs.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for TreePath {
    fn from(segs: [&str; N]) -> Self {
        TreePath::Segments(segs.iter().map(|s| s.to_string()).collect())
    }
}

impl From<(PathSegments, Option<String>)> for TreePath {
    fn from((segs, hash): (PathSegments, Option<String>)) -> Self {
        TreePath::Zip(segs, hash)
    }
}

/// Split a raw key into its segment string and optional embedded sub-key.
fn split_hash(key: &str) -> (&str, Option<&str>) {
    match key.split_once(HASH_SEP) {
        Some((head, tail)) => (head, Some(tail)),
        None => (key, None),
    }
}

/// Normalize any accepted path form to an ordered segment list.
///
/// Empty segments from repeated or leading/trailing separators are dropped,
/// as is any embedded sub-key.
pub fn to_seg(path: &TreePath) -> PathSegments {
    match path {
        TreePath::Key(key) => {
            let (head, _) = split_hash(key.as_str());
            head.split(SEP)
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect()
        }
        TreePath::Segments(segs) => segs.clone(),
        TreePath::Zip(segs, _) => segs.clone(),
    }
}

/// Split any path representation into its directory prefix, terminal name,
/// and optional embedded sub-key.
///
/// The root key divides into `([], "", None)`; callers reject empty leaf
/// names where one is required.
pub fn divide(path: &TreePath) -> (PathSegments, String, Option<String>) {
    let (mut segs, hash) = match path {
        TreePath::Key(key) => {
            let (head, hash) = split_hash(key.as_str());
            let segs: PathSegments = head
                .split(SEP)
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect();
            (segs, hash.map(|h| h.to_string()))
        }
        TreePath::Segments(segs) => (segs.clone(), None),
        TreePath::Zip(segs, hash) => (segs.clone(), hash.clone()),
    };
    let name = segs.pop().unwrap_or_default();
    (segs, name, hash)
}

/// Append one segment to a base path and re-serialize as a file-shaped key.
pub fn join(base: &TreePath, name: &str) -> PathKey {
    let mut segs = to_seg(base);
    segs.push(name.to_string());
    join_key(&segs, None)
}

/// Compose directory segments plus an optional sub-key into a canonical
/// file-shaped key. Joining onto the root never doubles the separator.
pub fn join_key(segs: &[String], hash: Option<&str>) -> PathKey {
    let mut key = String::new();
    for seg in segs {
        key.push(SEP);
        key.push_str(seg);
    }
    if key.is_empty() {
        key.push(SEP);
    }
    if let Some(hash) = hash {
        key.push(HASH_SEP);
        key.push_str(hash);
    }
    PathKey(key)
}

/// Serialize directory segments as a canonical directory key.
pub fn dir_key(segs: &[String]) -> PathKey {
    if segs.is_empty() {
        return PathKey(SEP.to_string());
    }
    let mut key = String::new();
    for seg in segs {
        key.push(SEP);
        key.push_str(seg);
    }
    key.push(SEP);
    PathKey(key)
}

/// Classify a key as directory-shaped by the trailing-separator convention.
pub fn key_is_dir(key: &str) -> bool {
    key == "/" || key.ends_with(SEP)
}
