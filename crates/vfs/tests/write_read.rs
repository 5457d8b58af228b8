//! Integration tests for write/read/touch/exists operations

mod common;

use bytes::Bytes;

#[test]
fn test_write_then_read_returns_value() {
    let (mut ws, _) = common::setup_workspace();

    assert!(ws.write_file("/tasks.json", "{}"));
    assert_eq!(ws.read_file("/tasks.json").as_deref(), Some("{}"));

    ws.touch_dir("/notes/");
    assert!(ws.write_file("/notes/draft.md", "# hi"));
    assert_eq!(ws.read_file("/notes/draft.md").as_deref(), Some("# hi"));
}

#[test]
fn test_write_overwrites_in_place() {
    let (mut ws, _) = common::setup_workspace();

    assert!(ws.write_file("/f.txt", "one"));
    assert!(ws.write_file("/f.txt", "two"));
    assert_eq!(ws.read_file("/f.txt").as_deref(), Some("two"));
}

#[test]
fn test_write_does_not_create_parents() {
    let (mut ws, _) = common::setup_workspace();

    assert!(!ws.write_file("/missing/f.txt", "x"));
    assert!(!ws.exists_dir("/missing/"));
    assert!(ws.read_file("/missing/f.txt").is_none());
}

#[test]
fn test_write_read_binary() {
    let (mut ws, mut pool) = common::setup_workspace();
    let r = common::put(&mut pool, b"\x89PNG");

    ws.touch_dir("/images/");
    assert!(ws.write_binary("/images/a.png", r.clone()));
    assert_eq!(ws.read_binary("/images/a.png"), Some(r));
}

#[test]
fn test_add_and_cat_round_trip_through_pool() {
    let (mut ws, mut pool) = common::setup_workspace();

    ws.touch_dir("/images/");
    assert!(ws.add("/images/a.png", Bytes::from_static(b"pixels"), &mut pool));
    assert_eq!(
        ws.cat("/images/a.png", &pool),
        Some(Bytes::from_static(b"pixels"))
    );
    assert!(ws.cat("/images/missing.png", &pool).is_none());
}

#[test]
fn test_touch_is_idempotent() {
    let (mut ws, _) = common::setup_workspace();

    ws.touch_dir("/a/b/");
    ws.touch_file("/a/f.txt");
    ws.touch_binary("/a/blob.bin");
    let snapshot = ws.dehydrate().unwrap();
    let version = ws.version();

    ws.touch_dir("/a/b/");
    ws.touch_file("/a/f.txt");
    ws.touch_binary("/a/blob.bin");
    assert_eq!(ws.dehydrate().unwrap(), snapshot);
    assert_eq!(ws.version(), version);
}

#[test]
fn test_touch_file_leaves_existing_content() {
    let (mut ws, _) = common::setup_workspace();

    assert!(ws.write_file("/f.txt", "content"));
    ws.touch_file("/f.txt");
    assert_eq!(ws.read_file("/f.txt").as_deref(), Some("content"));
}

#[test]
fn test_exists_never_creates() {
    let (mut ws, _) = common::setup_workspace();

    assert!(ws.exists_dir("/"));
    assert!(!ws.exists_dir("/a/"));
    assert!(!ws.exists_file("/a/f.txt"));
    assert!(!ws.exists_binary("/a/b.bin"));
    // probing for a missing path must not materialize it
    assert!(!ws.exists_dir("/a/"));

    ws.touch_dir("/a/");
    assert!(ws.exists_dir("/a/"));
}

#[test]
fn test_read_dir_lists_sorted_names() {
    let (mut ws, mut pool) = common::setup_workspace();

    ws.touch_dir("/proj/zeta/");
    ws.touch_dir("/proj/alpha/");
    ws.write_file("/proj/b.txt", "b");
    ws.write_file("/proj/a.txt", "a");
    let r = common::put(&mut pool, b"blob");
    ws.write_binary("/proj/img.png", r);

    let (dirs, files, bins) = ws.read_dir("/proj/").unwrap();
    assert_eq!(dirs, vec!["alpha", "zeta"]);
    assert_eq!(files, vec!["a.txt", "b.txt"]);
    assert_eq!(bins, vec!["img.png"]);
}

#[test]
fn test_read_dir_of_missing_path_is_none() {
    let (ws, _) = common::setup_workspace();
    assert!(ws.read_dir("/nope/").is_none());
}
