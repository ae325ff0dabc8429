use std::fs;
use tempfile::tempdir;

mod wav;

#[test]
fn report_prints_census_buckets_without_touching_files() {
    let tmp = tempdir().expect("tempdir");
    let tree = tmp.path().join("collection");
    fs::create_dir_all(&tree).unwrap();
    for name in ["one.wav", "two.wav"] {
        fs::write(
            tree.join(name),
            wav::tagged_wav(44_100, 16, "Song", "Artist", "Album"),
        )
        .unwrap();
    }

    assert_cmd::Command::cargo_bin("trackcull")
        .expect("binary")
        .current_dir(tmp.path())
        .arg("report")
        .arg(&tree)
        .assert()
        .success()
        .stdout(predicates::str::contains("scanned 2 audio file(s)"))
        .stdout(predicates::str::contains("uncompressed/priority 10: 2 file(s)"))
        .stdout(predicates::str::contains(".wav: 2 file(s)"));

    assert!(tree.join("one.wav").exists());
    assert!(tree.join("two.wav").exists());
}

#[test]
fn report_flags_unreadable_files_as_issues() {
    let tmp = tempdir().expect("tempdir");
    let tree = tmp.path().join("collection");
    fs::create_dir_all(&tree).unwrap();
    fs::write(
        tree.join("good.wav"),
        wav::tagged_wav(44_100, 16, "Song", "Artist", "Album"),
    )
    .unwrap();
    fs::write(tree.join("bad.mp3"), b"garbage bytes").unwrap();

    assert_cmd::Command::cargo_bin("trackcull")
        .expect("binary")
        .current_dir(tmp.path())
        .arg("report")
        .arg(&tree)
        .assert()
        .failure()
        .stdout(predicates::str::contains("failed"))
        .stderr(predicates::str::contains("1 file(s) could not be read"));

    // A census never mutates the tree, readable or not.
    assert!(tree.join("bad.mp3").exists());
}

#[test]
fn report_on_a_missing_directory_fails_cleanly() {
    let tmp = tempdir().expect("tempdir");
    assert_cmd::Command::cargo_bin("trackcull")
        .expect("binary")
        .arg("report")
        .arg(tmp.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicates::str::contains("not a directory"));
}
