use std::fs;

use filekind::{canonicalize_or_current, load_config, sha256_file};
use tempfile::tempdir;

#[test]
fn canonicalize_or_current_returns_cwd_for_dot() {
    let original = std::env::current_dir().expect("cwd");
    let tmp = tempdir().expect("tempdir");
    std::env::set_current_dir(tmp.path()).expect("chdir tmp");

    let result = canonicalize_or_current(".").expect("canonicalize").canonicalize().expect("canon");
    let expected = tmp.path().canonicalize().expect("canon tmp");
    assert_eq!(result, expected);

    std::env::set_current_dir(original).expect("restore cwd");
}

#[test]
fn canonicalize_or_current_resolves_existing_absolute_path() {
    let tmp = tempdir().expect("tempdir");
    let subdir = tmp.path().join("nested");
    fs::create_dir_all(&subdir).expect("create nested");

    let result = canonicalize_or_current(&subdir.to_string_lossy()).expect("canonicalize nested");
    assert_eq!(result, subdir.canonicalize().expect("canonicalize subdir"));
}

#[test]
fn sha256_file_matches_known_hash() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("abc.txt");
    fs::write(&path, b"abc").unwrap();

    let expected = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
    assert_eq!(sha256_file(&path).unwrap(), expected);
}

#[test]
fn sha256_file_errors_for_missing_file() {
    let tmp = tempdir().unwrap();
    let err = sha256_file(&tmp.path().join("missing")).unwrap_err();
    assert!(err.to_string().contains("Failed to open file for hashing"));
}

#[test]
fn load_config_defaults_without_path_and_reads_file_with_one() {
    let defaults = load_config(None).unwrap();
    assert!(defaults.skip_hidden);

    let tmp = tempdir().unwrap();
    let path = tmp.path().join("filekind.yaml");
    fs::write(&path, "max_json_bytes: 10\n").unwrap();
    let loaded = load_config(path.to_str()).unwrap();
    assert_eq!(loaded.max_json_bytes, 10);
}
