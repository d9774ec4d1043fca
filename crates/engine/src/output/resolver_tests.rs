use super::*;

use std::fs::{create_dir, write};

#[test]
fn rename_pattern_in_source_folder() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let src = tmp.path().join("video.avi");
    write(&src, b"v").expect("write source");
    let entry = FileEntry::observe(&src);

    let got = resolve_one(&entry, &OutputPolicy::in_place("{name}-change"), "mkv");

    let parent = tmp.path().canonicalize().expect("canonical temp dir");
    assert_eq!(got, parent.join("video-change.mkv").to_string_lossy());
}

#[test]
fn rename_pattern_cases() {
    let cases: &[(&str, &str, &str)] = &[
        ("video.avi", "{name}-conv", "video-conv.mkv"),
        ("video.avi", "{name}", "video.mkv"),
        ("video.avi", "fixed", "fixed.mkv"),
        ("a.b.avi", "{name}_{name}", "a.b_a.b.mkv"),
        ("noext", "{name}-x", "noext-x.mkv"),
        ("cost$1.avi", "{name}", "cost$1.mkv"),
    ];

    for (name, pattern, expected) in cases {
        let entry = FileEntry::observe(PathBuf::from("/nonexistent/dir").join(name));
        let got = resolve_one(&entry, &OutputPolicy::in_place(*pattern), "mkv");
        let want = PathBuf::from("/nonexistent/dir").join(expected);
        assert_eq!(got, want.to_string_lossy(), "name {:?} pattern {:?}", name, pattern);
    }
}

#[test]
fn specific_folder_flatten_and_preserve() {
    let entry = FileEntry::observe("/home/movies/test/video.avi");

    let flat = resolve_one(
        &entry,
        &OutputPolicy::specific_folder("/home/movies/output", false),
        "mkv",
    );
    assert_eq!(flat, "/home/movies/output/video.mkv");

    let nested = resolve_one(
        &entry,
        &OutputPolicy::specific_folder("/home/movies/output", true),
        "mkv",
    );
    assert_eq!(nested, "/home/movies/output/home/movies/test/video.mkv");
}

#[test]
fn preserve_strips_drive_separators() {
    let cases: &[(&str, &str)] = &[
        ("/home/movies/test", "home/movies/test"),
        ("C:\\videos\\in", "C\\videos\\in"),
        ("/", ""),
    ];
    for (parent, expected) in cases {
        assert_eq!(
            relative_mirror(Path::new(parent)),
            PathBuf::from(expected),
            "parent: {:?}",
            parent
        );
    }
}

#[test]
fn existing_output_folder_is_canonicalised() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let out = tmp.path().join("out");
    create_dir(&out).expect("create out");
    let src = tmp.path().join("clip.mov");
    write(&src, b"c").expect("write source");

    let policy = OutputPolicy::specific_folder(out.join("..").join("out"), false);
    let got = resolve_one(&FileEntry::observe(&src), &policy, "mp4");

    let want = out.canonicalize().expect("canonical out").join("clip.mp4");
    assert_eq!(got, want.to_string_lossy());
}

#[test]
fn resolve_maps_every_file() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let files: Vec<FileEntry> = ["a.avi", "b.mkv"]
        .iter()
        .map(|n| {
            let p = tmp.path().join(n);
            write(&p, b"x").expect("write source");
            FileEntry::observe(p)
        })
        .collect();

    let mapping = resolve(&files, &OutputPolicy::in_place("{name}-conv"), "mkv");
    assert_eq!(mapping.len(), 2);

    let root = tmp.path().canonicalize().expect("canonical temp dir");
    assert_eq!(
        mapping.get(&files[0]),
        Some(&*root.join("a-conv.mkv").to_string_lossy())
    );
    assert_eq!(
        mapping.get(&files[1]),
        Some(&*root.join("b-conv.mkv").to_string_lossy())
    );
    assert_eq!(mapping.get_path(Path::new("/elsewhere/c.avi")), None);

    assert!(resolve(&[], &OutputPolicy::default(), "mkv").is_empty());
}

#[test]
fn relative_output_folder_becomes_absolute() {
    let entry = FileEntry::observe("/home/movies/test/video.avi");
    let cwd = std::env::current_dir()
        .expect("current dir")
        .canonicalize()
        .expect("canonical current dir");
    let out = "vbatch-not-created-out";

    let flat = resolve_one(&entry, &OutputPolicy::specific_folder(out, false), "mkv");
    assert_eq!(flat, cwd.join(out).join("video.mkv").to_string_lossy());

    let nested = resolve_one(&entry, &OutputPolicy::specific_folder(out, true), "mkv");
    assert_eq!(
        nested,
        cwd.join(out)
            .join("home/movies/test/video.mkv")
            .to_string_lossy()
    );
    assert!(Path::new(&nested).is_absolute());
}

#[test]
fn missing_output_folder_is_cleaned_below_existing_ancestor() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let src = tmp.path().join("clip.mov");
    write(&src, b"c").expect("write source");
    let real_tmp = tmp.path().canonicalize().expect("canonical temp dir");

    let cases: &[(PathBuf, PathBuf)] = &[
        (
            tmp.path().join("nope").join("..").join("out"),
            real_tmp.join("out"),
        ),
        (
            tmp.path().join("a").join(".").join("b").join("..").join("c"),
            real_tmp.join("a").join("c"),
        ),
        (tmp.path().join("new").join("deep"), real_tmp.join("new").join("deep")),
    ];
    for (folder, want) in cases {
        let got = resolve_one(
            &FileEntry::observe(&src),
            &OutputPolicy::specific_folder(folder, false),
            "mp4",
        );
        assert_eq!(got, want.join("clip.mp4").to_string_lossy(), "folder {:?}", folder);
        assert!(!got.contains(".."), "folder {:?}", folder);
    }
}

#[test]
fn lexical_clean_cases() {
    let cases: &[(&str, &str)] = &[
        ("/a/./b/../c", "/a/c"),
        ("/../x", "/x"),
        ("/a/b/..", "/a"),
        ("/", "/"),
    ];
    for (input, expected) in cases {
        assert_eq!(
            lexical_clean(Path::new(input)),
            PathBuf::from(expected),
            "input: {:?}",
            input
        );
    }
}
