//! Discovery against real directory trees.

use assert_fs::prelude::*;
use multibuild_core::{locator, AllowedRepoNames, Repository, RepositoryError};

fn allowed() -> AllowedRepoNames {
    AllowedRepoNames::new(["proj.a", "proj.b", "proj.c"])
}

#[test]
fn returns_only_allowed_directories_in_sorted_order() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child("proj.c").create_dir_all().expect("mkdir");
    root.child("proj.a").create_dir_all().expect("mkdir");
    root.child("unrelated").create_dir_all().expect("mkdir");
    root.child("proj.b").touch().expect("file, not a directory");

    let paths = locator::fetch_repo_paths(Some(root.path()), &allowed()).expect("fetch");
    assert_eq!(
        paths,
        vec![root.path().join("proj.a"), root.path().join("proj.c")]
    );
}

#[test]
fn nested_checkouts_are_not_scanned() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child("group").child("proj.a").create_dir_all().expect("mkdir");

    let err = locator::fetch_repo_paths(Some(root.path()), &allowed()).unwrap_err();
    assert!(matches!(err, RepositoryError::NoRepositoriesFound { .. }), "got: {err}");
}

#[test]
fn empty_root_reports_no_repositories_with_hint() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let err = locator::fetch_repo_paths(Some(root.path()), &allowed()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("cloned"), "message should tell the user to clone: {msg}");
}

#[test]
fn missing_root_is_invalid_directory() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let err =
        locator::fetch_repo_paths(Some(&root.path().join("nope")), &allowed()).unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidDirectory { .. }), "got: {err}");
}

#[test]
fn discovered_paths_become_labelled_repositories() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    for name in ["proj.a", "proj.b", "proj.c"] {
        root.child(name).create_dir_all().expect("mkdir");
    }

    let labels: Vec<String> = locator::fetch_repo_paths(Some(root.path()), &allowed())
        .expect("fetch")
        .into_iter()
        .map(|p| Repository::from_path(p).expect("repo").label().to_string())
        .collect();
    assert_eq!(labels, ["A", "B", "C"]);
}
