//! Integration tests for copy operations

mod common;

#[test]
fn test_copy_file_is_value_copy() {
    let (mut ws, _) = common::setup_workspace();

    assert!(ws.write_file("/a.txt", "original"));
    assert!(ws.copy_file("/a.txt", "/b.txt"));
    assert_eq!(ws.read_file("/b.txt").as_deref(), Some("original"));

    // mutating the copy leaves the source alone
    assert!(ws.write_file("/b.txt", "changed"));
    assert_eq!(ws.read_file("/a.txt").as_deref(), Some("original"));
}

#[test]
fn test_copy_file_missing_source_or_parent() {
    let (mut ws, _) = common::setup_workspace();

    assert!(!ws.copy_file("/nope.txt", "/b.txt"));
    assert!(ws.write_file("/a.txt", "x"));
    assert!(!ws.copy_file("/a.txt", "/missing/b.txt"));
}

#[test]
fn test_copy_refuses_embedded_hash_endpoints() {
    let (mut ws, _) = common::setup_workspace();

    assert!(ws.write_file("/a.json", "{}"));
    assert!(!ws.copy_file("/a.json#beef", "/b.json"));
    assert!(!ws.copy_file("/a.json", "/b.json#beef"));
    assert!(!ws.exists_file("/b.json"));
}

#[test]
fn test_copy_binary_duplicates_ref() {
    let (mut ws, mut pool) = common::setup_workspace();
    let r = common::put(&mut pool, b"blob");

    assert!(ws.write_binary("/a.png", r.clone()));
    assert!(ws.copy_binary("/a.png", "/b.png"));
    assert_eq!(ws.read_binary("/a.png"), Some(r.clone()));
    assert_eq!(ws.read_binary("/b.png"), Some(r));
}

#[test]
fn test_copy_dir_images_into_backup() {
    let (mut ws, mut pool) = common::setup_workspace();
    let r1 = common::put(&mut pool, b"png-bytes");

    ws.touch_dir("/images/");
    assert!(ws.write_binary("/images/a.png", r1.clone()));

    assert!(ws.copy_dir("/images", "/backup"));
    let (_, _, bins) = ws.read_dir("/backup/images/").unwrap();
    assert_eq!(bins, vec!["a.png"]);
    assert_eq!(ws.read_binary("/backup/images/a.png"), Some(r1));
}

#[test]
fn test_copy_dir_recreates_structure_recursively() {
    let (mut ws, mut pool) = common::setup_workspace();
    let r = common::put(&mut pool, b"blob");

    ws.touch_dir("/src/sub/deeper/");
    ws.write_file("/src/top.txt", "t");
    ws.write_file("/src/sub/mid.txt", "m");
    ws.write_binary("/src/sub/deeper/leaf.bin", r);

    assert!(ws.copy_dir("/src", "/dst"));

    // every level of the destination lists the same names as the source
    let mut stack = vec![Vec::<String>::new()];
    while let Some(rel) = stack.pop() {
        let rel_key = rel.iter().fold(String::new(), |acc, s| acc + "/" + s) + "/";
        let src = ws.read_dir(format!("/src{rel_key}")).unwrap();
        let dst = ws.read_dir(format!("/dst/src{rel_key}")).unwrap();
        assert_eq!(src, dst);
        for d in &src.0 {
            let mut next = rel.clone();
            next.push(d.clone());
            stack.push(next);
        }
    }
}

#[test]
fn test_copy_dir_destination_is_independent() {
    let (mut ws, _) = common::setup_workspace();

    ws.touch_dir("/src/");
    ws.write_file("/src/f.txt", "original");

    assert!(ws.copy_dir("/src", "/dst"));
    assert!(ws.write_file("/dst/src/f.txt", "changed"));
    assert!(ws.remove_file("/dst/src/f.txt").is_some());
    assert_eq!(ws.read_file("/src/f.txt").as_deref(), Some("original"));
}

#[test]
fn test_copy_dir_missing_source() {
    let (mut ws, _) = common::setup_workspace();
    assert!(!ws.copy_dir("/nope", "/dst"));
    assert!(!ws.exists_dir("/dst/"));
}
