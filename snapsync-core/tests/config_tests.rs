//! Config loading against real files: absence, overrides, parse errors.

use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;
use snapsync_core::{config, CoreError, SnapConfig};

#[test]
fn missing_file_yields_defaults() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let cfg = config::load_at(root.path()).expect("load");
    assert_eq!(cfg, SnapConfig::default());
    root.child("snapsync.yaml").assert(predicate::path::missing());
}

#[test]
fn file_values_override_defaults() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child("snapsync.yaml")
        .write_str(
            "data:\n  backup_dir: snapshots\n  include: [data, .env]\ncode:\n  remote: mirror\n",
        )
        .expect("write");

    let cfg = config::load_at(root.path()).expect("load");
    assert_eq!(cfg.data.backup_dir, "snapshots");
    assert_eq!(cfg.data.include, vec!["data", ".env"]);
    assert_eq!(cfg.data.prefix, "backup");
    assert_eq!(cfg.code.remote, "mirror");
    assert_eq!(cfg.code.branch, "main");
}

#[test]
fn empty_file_yields_defaults() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child("snapsync.yaml").write_str("\n").expect("write");
    assert_eq!(config::load_at(root.path()).unwrap(), SnapConfig::default());
}

#[test]
fn corrupt_yaml_returns_parse_error_with_path() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child("snapsync.yaml")
        .write_str("data: [unclosed\n")
        .expect("write");

    let err = config::load_at(root.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigParse { .. }), "got: {err}");
    assert!(err.to_string().contains("snapsync.yaml"));
}

#[test]
fn explicit_missing_file_is_an_error() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let err = config::load_file(&root.path().join("custom.yaml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[rstest]
#[case("data:\n  backup_dir: /abs\n")]
#[case("data:\n  backup_dir: ../up\n")]
#[case("data:\n  prefix: ''\n")]
#[case("data:\n  include: []\n")]
#[case("code:\n  branch: ''\n")]
fn invalid_values_are_rejected(#[case] yaml: &str) {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child("snapsync.yaml").write_str(yaml).expect("write");
    let cfg = config::load_at(root.path()).expect("loading does not validate");
    let err = cfg.data.validate().and(cfg.code.validate()).unwrap_err();
    assert!(matches!(err, CoreError::InvalidConfig(_)), "got: {err}");
}

#[test]
fn invalid_section_does_not_block_the_other() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child("snapsync.yaml")
        .write_str("data:
  include: []
code:
  branch: ''
")
        .expect("write");

    let mut cfg = config::load_at(root.path()).expect("load");
    assert!(cfg.code.validate().is_err());
    assert!(cfg.data.validate().is_err());

    cfg.data.include = vec!["data".to_string()];
    cfg.data.validate().expect("override fixes the data section");
}
