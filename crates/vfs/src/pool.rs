//! Content-addressable storage for binary payloads
//!
//! The tree never owns blob bytes. Binary entries hold an opaque
//! [`ContentRef`] handed out by a [`ContentPool`]; resolving the ref back to
//! bytes is the pool's job. [`MemoryPool`] is the in-process implementation:
//! refs are derived from the BLAKE3 hash of the payload, so identical
//! payloads deduplicate to one stored blob.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Opaque, stable handle to a stored binary payload.
///
/// The store treats this as a plain string-like value and never inspects or
/// hashes it itself. The default ref is the empty ref, used as the initial
/// value for touched-but-unwritten binary entries.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ContentRef(String);

impl ContentRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ContentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ContentRef {
    fn from(s: String) -> Self {
        ContentRef(s)
    }
}

impl From<&str> for ContentRef {
    fn from(s: &str) -> Self {
        ContentRef(s.to_string())
    }
}

/// Storage service the tree delegates binary payloads to.
pub trait ContentPool {
    /// Store a payload and return a stable, content-derived reference.
    fn put(&mut self, bytes: Bytes) -> ContentRef;

    /// Retrieve a previously stored payload, or `None` for an unknown ref.
    fn get(&self, r: &ContentRef) -> Option<Bytes>;
}

/// In-memory, deduplicating content pool.
#[derive(Debug, Clone, Default)]
pub struct MemoryPool {
    blobs: BTreeMap<ContentRef, Bytes>,
}

impl MemoryPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, r: &ContentRef) -> bool {
        self.blobs.contains_key(r)
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl ContentPool for MemoryPool {
    fn put(&mut self, bytes: Bytes) -> ContentRef {
        let hash = blake3::hash(&bytes);
        let r = ContentRef(hex::encode(hash.as_bytes()));
        tracing::trace!("pool put: {} bytes at {}", bytes.len(), r);
        self.blobs.insert(r.clone(), bytes);
        r
    }

    fn get(&self, r: &ContentRef) -> Option<Bytes> {
        self.blobs.get(r).cloned()
    }
}
