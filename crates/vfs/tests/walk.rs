//! Integration tests for deterministic traversal over a populated workspace

mod common;

use std::cell::RefCell;

use vfs::store::travel;

#[test]
fn test_export_listing_is_reproducible() {
    let (mut ws, mut pool) = common::setup_workspace();
    let r = common::put(&mut pool, b"blob");

    // populate in deliberately unsorted order
    ws.touch_dir("/zoo/");
    ws.touch_dir("/app/src/");
    ws.write_file("/zoo/keeper.txt", "k");
    ws.write_file("/app/readme.md", "r");
    ws.write_file("/app/src/main.rs", "m");
    ws.write_binary("/app/logo.png", r);

    let listing = RefCell::new(Vec::new());
    travel(
        ws.tree().root(),
        &mut |prefix, name, _: &()| {
            listing.borrow_mut().push(format!("dir  /{}{name}/", join_prefix(prefix)));
        },
        &mut |prefix, name, _, _| {
            listing.borrow_mut().push(format!("file /{}{name}", join_prefix(prefix)));
        },
        &mut |prefix, name, _, _| {
            listing.borrow_mut().push(format!("bin  /{}{name}", join_prefix(prefix)));
        },
        &(),
    );

    // dirs pre-order, then files, then binaries, lexicographic at every level
    assert_eq!(
        listing.into_inner(),
        vec![
            "dir  /app/",
            "dir  /app/src/",
            "file /app/src/main.rs",
            "file /app/readme.md",
            "bin  /app/logo.png",
            "dir  /zoo/",
            "file /zoo/keeper.txt",
        ]
    );
}

fn join_prefix(prefix: &[String]) -> String {
    prefix
        .iter()
        .map(|s| format!("{s}/"))
        .collect::<String>()
}
