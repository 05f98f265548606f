// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Artifact store tests

use enhance_detect_node::config::ServiceConfig;
use enhance_detect_node::storage::{sanitize_filename, ArtifactStore, StorageError};

#[test]
fn test_ensure_dirs_creates_layout() {
    let tmp = tempfile::tempdir().unwrap();
    let store = ArtifactStore::rooted_at(tmp.path().join("data"));

    store.ensure_dirs().unwrap();
    assert!(tmp.path().join("data/uploads").is_dir());
    assert!(tmp.path().join("data/enhanced").is_dir());
    assert!(tmp.path().join("data/results").is_dir());

    // Idempotent
    store.ensure_dirs().unwrap();
}

#[test]
fn test_from_config_uses_configured_dirs() {
    let tmp = tempfile::tempdir().unwrap();
    let config = ServiceConfig {
        upload_dir: tmp.path().join("in"),
        enhanced_dir: tmp.path().join("mid"),
        result_dir: tmp.path().join("out"),
        ..ServiceConfig::default()
    };

    let store = ArtifactStore::from_config(&config);
    assert_eq!(store.upload_dir(), tmp.path().join("in"));
    assert_eq!(
        store.enhanced_path("x.png").unwrap(),
        tmp.path().join("mid/enh_x.png")
    );
    assert_eq!(
        store.result_path("x.png").unwrap(),
        tmp.path().join("out/result_x.png")
    );
}

#[test]
fn test_default_config_layout() {
    let store = ArtifactStore::from_config(&ServiceConfig::default());
    assert!(store.upload_dir().ends_with("uploads"));
    assert!(store.enhanced_dir().ends_with("enhanced"));
    assert!(store.result_dir().ends_with("results"));
}

#[test]
fn test_same_name_shares_paths() {
    let tmp = tempfile::tempdir().unwrap();
    let store = ArtifactStore::rooted_at(tmp.path());
    store.ensure_dirs().unwrap();

    let a = store.save_upload("same.png", b"one").unwrap();
    let b = store.save_upload("same.png", b"two").unwrap();
    assert_eq!(a, b);
    assert_eq!(store.read(&a).unwrap(), b"two");
}

#[test]
fn test_traversal_names_stay_inside() {
    let tmp = tempfile::tempdir().unwrap();
    let store = ArtifactStore::rooted_at(tmp.path());
    store.ensure_dirs().unwrap();

    let path = store.save_upload("../../../tmp/evil.png", b"x").unwrap();
    assert_eq!(path, tmp.path().join("uploads/evil.png"));
    assert_eq!(sanitize_filename("a/b/../c.jpg").unwrap(), "c.jpg");
}

#[test]
fn test_empty_filename_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let store = ArtifactStore::rooted_at(tmp.path());
    store.ensure_dirs().unwrap();

    let err = store.save_upload("", b"x").unwrap_err();
    assert!(matches!(err, StorageError::InvalidFilename(_)));
    assert!(store.enhanced_path("..").is_err());
}
