use clap::Parser;
use dejavu::cli::Cli;
use dejavu::duplicates::FinderError;
use dejavu::error::ExitCode;
use dejavu::run_app;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_run_app_deletes_duplicates() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"hello").unwrap();
    fs::write(dir.path().join("b.txt"), b"hello").unwrap();
    fs::write(dir.path().join("c.txt"), b"world").unwrap();

    let cli = Cli::parse_from(["dejavu", "-q", "--no-color", dir.path().to_str().unwrap()]);
    let code = run_app(cli).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(!dir.path().join("a.txt").exists());
    assert!(dir.path().join("b.txt").exists());
    assert!(dir.path().join("c.txt").exists());
}

#[test]
fn test_run_app_dry_run_json() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"same").unwrap();
    fs::write(dir.path().join("b"), b"same").unwrap();

    let cli = Cli::parse_from([
        "dejavu",
        "-q",
        "--dry-run",
        "--output",
        "json",
        dir.path().to_str().unwrap(),
    ]);
    let code = run_app(cli).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(dir.path().join("a").exists());
    assert!(dir.path().join("b").exists());
}

#[test]
fn test_run_app_missing_path() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");

    let cli = Cli::parse_from(["dejavu", "-q", missing.to_str().unwrap()]);
    let err = run_app(cli).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<FinderError>(),
        Some(FinderError::PathNotFound(_))
    ));
    assert!(!missing.exists());
}

#[test]
fn test_run_app_unknown_algorithm_touches_nothing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"same").unwrap();
    fs::write(dir.path().join("b"), b"same").unwrap();

    let cli = Cli::parse_from([
        "dejavu",
        "-q",
        "--algorithm",
        "rot13",
        dir.path().to_str().unwrap(),
    ]);
    let err = run_app(cli).unwrap_err();

    assert!(err.to_string().contains("rot13"));
    assert!(dir.path().join("a").exists());
    assert!(dir.path().join("b").exists());
}
