use super::*;

use std::{
    collections::BTreeSet,
    fs::{create_dir, write},
    path::PathBuf,
};

fn by_extension(exts: &'static [&'static str]) -> impl Fn(&FileEntry) -> bool {
    move |e: &FileEntry| {
        e.path
            .extension()
            .and_then(|x| x.to_str())
            .map(|x| exts.contains(&x))
            .unwrap_or(false)
    }
}

fn rel_set(found: &[FileEntry], root: &Path) -> BTreeSet<PathBuf> {
    found
        .iter()
        .map(|e| e.path.strip_prefix(root).unwrap().to_path_buf())
        .collect()
}

// root/
//   a.avi
//   notes.txt
//   sub/
//     b.mkv
//     deeper/
//       c.avi
fn build_tree(root: &Path) {
    write(root.join("a.avi"), b"aaaa").expect("write a.avi");
    write(root.join("notes.txt"), b"n").expect("write notes.txt");
    create_dir(root.join("sub")).expect("create sub");
    write(root.join("sub").join("b.mkv"), b"bb").expect("write b.mkv");
    create_dir(root.join("sub").join("deeper")).expect("create deeper");
    write(root.join("sub").join("deeper").join("c.avi"), b"c").expect("write c.avi");
}

#[test]
fn observe_classifies_files_dirs_and_missing_paths() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    write(root.join("f.avi"), b"12345").expect("write file");

    let file = FileEntry::observe(root.join("f.avi"));
    assert!(file.is_file);
    assert!(!file.is_dir);
    assert_eq!(file.len, 5);
    assert_eq!(file.stem(), "f");

    let dir = FileEntry::observe(root);
    assert!(dir.is_dir);
    assert_eq!(dir.len, 0);

    let missing = FileEntry::observe(root.join("nope"));
    assert!(!missing.is_file && !missing.is_dir);
    assert!(missing.canonical().is_err());
}

#[test]
fn stem_strips_only_last_extension() {
    let cases: &[(&str, &str)] = &[
        ("video.avi", "video"),
        ("this.is.the.filename.avi", "this.is.the.filename"),
        ("noext", "noext"),
        ("film4 test.mov", "film4 test"),
    ];

    for (name, expected) in cases {
        let entry = FileEntry::observe(PathBuf::from("/nonexistent").join(name));
        assert_eq!(entry.stem(), *expected, "name: {:?}", name);
    }
}

#[test]
fn discover_all_recursive_filters_by_extension() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    build_tree(root);

    let roots = vec![FileEntry::observe(root)];
    let found = discover_all(&roots, true, &by_extension(&["avi", "mkv"]));

    let expected: BTreeSet<PathBuf> = [
        PathBuf::from("a.avi"),
        PathBuf::from("sub/b.mkv"),
        PathBuf::from("sub/deeper/c.avi"),
    ]
    .into_iter()
    .collect();
    assert_eq!(rel_set(&found, root), expected);
}

#[test]
fn discover_all_non_recursive_descends_one_level() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    build_tree(root);

    let roots = vec![FileEntry::observe(root)];
    let found = discover_all_unfiltered(&roots, false);

    let expected: BTreeSet<PathBuf> = [PathBuf::from("a.avi"), PathBuf::from("notes.txt")]
        .into_iter()
        .collect();
    assert_eq!(rel_set(&found, root), expected);
}

#[test]
fn file_roots_are_tested_directly() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    build_tree(root);

    let roots = vec![
        FileEntry::observe(root.join("a.avi")),
        FileEntry::observe(root.join("notes.txt")),
    ];
    let found = discover_all(&roots, true, &by_extension(&["avi"]));

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].path, root.join("a.avi"));
}

#[test]
fn directories_are_never_offered_to_the_filter() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    build_tree(root);

    let roots = vec![FileEntry::observe(root)];
    let found = discover_all(&roots, true, &|e: &FileEntry| {
        assert!(!e.is_dir, "filter saw directory {:?}", e.path);
        true
    });
    assert_eq!(found.len(), 4);
}

#[test]
fn missing_roots_and_empty_input_yield_nothing() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let roots = vec![FileEntry::observe(tmp.path().join("does-not-exist"))];

    assert!(discover_all_unfiltered(&roots, true).is_empty());
    assert!(discover_all_unfiltered(&[], true).is_empty());
}

#[test]
fn incremental_skips_known_roots() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    build_tree(root);
    create_dir(root.join("later")).expect("create later");
    write(root.join("later").join("d.avi"), b"d").expect("write d.avi");

    let mut crawler = Crawler::new();
    let sub = FileEntry::observe(root.join("sub"));
    let later = FileEntry::observe(root.join("later"));

    let first = crawler.discover_incremental(std::slice::from_ref(&sub), true, &AcceptAll);
    assert_eq!(first.len(), 2);
    assert!(crawler.is_known(&sub.path));

    let second = crawler.discover_incremental(&[sub.clone(), later.clone()], true, &AcceptAll);
    let expected: BTreeSet<PathBuf> = [PathBuf::from("later/d.avi")].into_iter().collect();
    assert_eq!(rel_set(&second, root), expected);
    assert_eq!(crawler.known_roots().len(), 2);

    assert!(crawler.forget(&sub.path));
    assert!(!crawler.forget(&sub.path));
    let third = crawler.discover_incremental(&[sub, later], true, &AcceptAll);
    assert_eq!(third.len(), 2, "forgotten root is crawled again");

    crawler.reset();
    assert!(crawler.known_roots().is_empty());
}

#[test]
fn incremental_deduplicates_roots_within_one_call() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    build_tree(root);

    let mut crawler = Crawler::new();
    let a = FileEntry::observe(root.join("a.avi"));
    let found = crawler.discover_incremental(&[a.clone(), a], false, &AcceptAll);

    assert_eq!(found.len(), 1);
    assert_eq!(crawler.known_roots().len(), 1);
}

#[test]
fn revalidate_is_unsupported() {
    let mut crawler = Crawler::new();
    let err = crawler
        .revalidate(true, &AcceptAll)
        .expect_err("re-validation has no implementation");
    assert!(matches!(err, CrawlError::Unsupported(_)));
}

#[cfg(unix)]
#[test]
fn unreadable_directory_does_not_stop_siblings() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    build_tree(root);

    let locked = root.join("locked");
    create_dir(&locked).expect("create locked");
    write(locked.join("hidden.avi"), b"h").expect("write hidden.avi");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000))
        .expect("lock directory");

    let roots = vec![FileEntry::observe(root)];
    let found = discover_all(&roots, true, &by_extension(&["avi", "mkv"]));

    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755))
        .expect("unlock directory");

    let rel = rel_set(&found, root);
    assert!(rel.contains(&PathBuf::from("a.avi")));
    assert!(rel.contains(&PathBuf::from("sub/deeper/c.avi")));
}

#[cfg(unix)]
#[test]
fn recursive_crawl_follows_directory_links() {
    use std::os::unix::fs::symlink;

    let tmp = tempfile::tempdir().expect("create temp dir");
    let library = tmp.path().join("library");
    let external = tmp.path().join("external");
    create_dir(&library).expect("create library");
    create_dir(&external).expect("create external");
    write(external.join("movie.avi"), b"m").expect("write movie.avi");
    symlink(&external, library.join("linked")).expect("link external");

    let linked = FileEntry::observe(library.join("linked"));
    assert!(linked.is_dir && linked.is_symlink);

    let found = discover_all(&[FileEntry::observe(&library)], true, &AcceptAll);
    let expected: BTreeSet<PathBuf> = [PathBuf::from("linked/movie.avi")].into_iter().collect();
    assert_eq!(rel_set(&found, &library), expected);
}

#[cfg(unix)]
#[test]
fn link_cycles_are_walked_once() {
    use std::os::unix::fs::symlink;

    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    build_tree(root);
    symlink(root, root.join("sub").join("back")).expect("link back to root");
    symlink(root.join("sub"), root.join("sub").join("deeper").join("up"))
        .expect("link up to sub");

    let found = discover_all(&[FileEntry::observe(root)], true, &by_extension(&["avi", "mkv"]));

    let expected: BTreeSet<PathBuf> = [
        PathBuf::from("a.avi"),
        PathBuf::from("sub/b.mkv"),
        PathBuf::from("sub/deeper/c.avi"),
    ]
    .into_iter()
    .collect();
    assert_eq!(rel_set(&found, root), expected);
    assert_eq!(found.len(), 3);
}
