//! Deterministic depth-first traversal over a subtree
//!
//! At each directory the walk visits child directories first (pre-order, in
//! lexicographic name order), then files, then binaries, both in
//! lexicographic order. The directory callback produces an accumulator value
//! that is threaded to that directory's own descendants as a plain
//! parameter. The fixed ordering makes every export, diff, and copy built on
//! the walk reproducible.

use crate::pool::ContentRef;

use super::node::DirEntry;

/// Walk `node` depth-first, invoking `on_dir` pre-order for each child
/// directory and `on_file`/`on_binary` for each leaf.
///
/// `prefix` passed to the callbacks is the segment path of the directory
/// being enumerated, relative to the walk root. The value returned by
/// `on_dir` becomes the `param` seen by that directory's descendants.
pub fn travel<T, D, F, B>(
    node: &DirEntry,
    on_dir: &mut D,
    on_file: &mut F,
    on_binary: &mut B,
    param: &T,
) where
    D: FnMut(&[String], &str, &T) -> T,
    F: FnMut(&[String], &str, &str, &T),
    B: FnMut(&[String], &str, &ContentRef, &T),
{
    let mut prefix = Vec::new();
    travel_inner(node, on_dir, on_file, on_binary, param, &mut prefix);
}

fn travel_inner<T, D, F, B>(
    node: &DirEntry,
    on_dir: &mut D,
    on_file: &mut F,
    on_binary: &mut B,
    param: &T,
    prefix: &mut Vec<String>,
) where
    D: FnMut(&[String], &str, &T) -> T,
    F: FnMut(&[String], &str, &str, &T),
    B: FnMut(&[String], &str, &ContentRef, &T),
{
    // BTreeMap iteration is already lexicographic by key.
    for (name, child) in node.dirs() {
        let next = on_dir(prefix, name, param);
        prefix.push(name.clone());
        travel_inner(child, on_dir, on_file, on_binary, &next, prefix);
        prefix.pop();
    }
    for (name, content) in node.files() {
        on_file(prefix, name, content, param);
    }
    for (name, r) in node.bins() {
        on_binary(prefix, name, r, param);
    }
}
