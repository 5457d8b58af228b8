//! Shared test utilities for workspace integration tests
#![allow(dead_code)]

use bytes::Bytes;
use vfs::pool::{ContentPool, ContentRef, MemoryPool};
use vfs::workspace::Workspace;

/// Set up a test environment with a fresh workspace and content pool
pub fn setup_workspace() -> (Workspace, MemoryPool) {
    init_tracing();
    (Workspace::new(), MemoryPool::new())
}

/// Initialize test logging; filtered by RUST_LOG, safe to call repeatedly
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Stash raw bytes in the pool and return the ref
pub fn put(pool: &mut MemoryPool, data: &[u8]) -> ContentRef {
    pool.put(Bytes::copy_from_slice(data))
}
