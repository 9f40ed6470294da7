//! Integration tests for abort behavior on the shard-size ceiling, with and
//! without staged output.

use qdtestgen::cli::{GenerateOverrides, RunContext};
use qdtestgen::config::QdTestGenConfig;
use qdtestgen::error::GenError;
use std::fs;
use tempfile::TempDir;

fn oversized_config(staged: bool) -> QdTestGenConfig {
    let mut config = QdTestGenConfig::default();
    config.generator.max_chunk = 64;
    config.generator.hard_ceiling = 50;
    config.generator.staged = staged;
    config
}

/// Direct mode: files are already truncated when the ceiling trips
#[test]
fn test_direct_mode_abort_leaves_partial_output() {
    let temp = TempDir::new().unwrap();
    let good = RunContext::with_config(temp.path().to_path_buf(), QdTestGenConfig::default());
    let report = good.generate(&GenerateOverrides::default()).unwrap();
    let before = fs::read_to_string(&report.files[7]).unwrap();
    assert!(before.contains("GeneratedTypes7;"));

    let bad = RunContext::with_config(temp.path().to_path_buf(), oversized_config(false));
    let err = bad.generate(&GenerateOverrides::default()).unwrap_err();
    assert!(matches!(err, GenError::ShardTooLarge { .. }));

    // StandardLocks, BufferQueue and EntryQueue fit; the dual buffer list trips the ceiling
    assert!(fs::read_to_string(&report.files[0])
        .unwrap()
        .contains("GeneratedTypes0;"));
    let after = fs::read_to_string(&report.files[7]).unwrap();
    assert!(!after.contains("GeneratedTypes"));
}

/// Staged mode: a failing run leaves the previous outputs untouched
#[test]
fn test_staged_mode_abort_keeps_previous_output() {
    let temp = TempDir::new().unwrap();
    let good = RunContext::with_config(temp.path().to_path_buf(), QdTestGenConfig::default());
    let report = good.generate(&GenerateOverrides::default()).unwrap();
    let before: Vec<String> = report
        .files
        .iter()
        .map(|p| fs::read_to_string(p).unwrap())
        .collect();

    let bad = RunContext::with_config(temp.path().to_path_buf(), oversized_config(true));
    let err = bad.generate(&GenerateOverrides::default()).unwrap_err();
    assert!(err.is_configuration());

    let after: Vec<String> = report
        .files
        .iter()
        .map(|p| fs::read_to_string(p).unwrap())
        .collect();
    assert_eq!(before, after);
}

/// Staged and direct modes write the same bytes
#[test]
fn test_staged_matches_direct() {
    let direct = TempDir::new().unwrap();
    let staged = TempDir::new().unwrap();

    let a = RunContext::with_config(direct.path().to_path_buf(), QdTestGenConfig::default())
        .generate(&GenerateOverrides::default())
        .unwrap();
    let b = RunContext::with_config(staged.path().to_path_buf(), QdTestGenConfig::default())
        .generate(&GenerateOverrides {
            staged: true,
            ..GenerateOverrides::default()
        })
        .unwrap();

    for (x, y) in a.files.iter().zip(&b.files) {
        assert_eq!(fs::read(x).unwrap(), fs::read(y).unwrap());
    }
}

fn blocked_output_config(staged: bool) -> QdTestGenConfig {
    let mut config = QdTestGenConfig::default();
    config.generator.output_dir = "blocker/out".into();
    config.generator.staged = staged;
    config
}

fn expect_io_path(err: GenError) -> std::path::PathBuf {
    match err {
        GenError::Io { path, .. } => path,
        other => panic!("expected Io error, got {:?}", other),
    }
}

/// An output directory below a regular file fails before any file is written
#[test]
fn test_output_dir_under_regular_file_reports_path() {
    for staged in [false, true] {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("blocker"), "not a directory").unwrap();

        let ctx = RunContext::with_config(temp.path().to_path_buf(), blocked_output_config(staged));
        let err = ctx.generate(&GenerateOverrides::default()).unwrap_err();
        assert!(!err.is_configuration());
        assert_eq!(expect_io_path(err), temp.path().join("blocker/out"));
        assert_eq!(
            fs::read_to_string(temp.path().join("blocker")).unwrap(),
            "not a directory"
        );
    }
}

/// Direct mode stops at the first output that cannot be created
#[test]
fn test_direct_mode_stops_at_unwritable_output() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("generated_test3.cpp")).unwrap();

    let ctx = RunContext::with_config(temp.path().to_path_buf(), QdTestGenConfig::default());
    let err = ctx.generate(&GenerateOverrides::default()).unwrap_err();
    assert_eq!(expect_io_path(err), temp.path().join("generated_test3.cpp"));

    assert!(temp.path().join("generated_test2.cpp").is_file());
    for index in 4..8 {
        assert!(!temp.path().join(format!("generated_test{}.cpp", index)).exists());
    }
}

/// Staged mode never replaces an output when a temp file cannot be written
#[test]
fn test_staged_mode_temp_failure_keeps_previous_output() {
    let temp = TempDir::new().unwrap();
    let good = RunContext::with_config(temp.path().to_path_buf(), QdTestGenConfig::default());
    let report = good.generate(&GenerateOverrides::default()).unwrap();
    let before: Vec<Vec<u8>> = report.files.iter().map(|p| fs::read(p).unwrap()).collect();

    let blocked = temp.path().join(".generated_test5.cpp.tmp");
    fs::create_dir(&blocked).unwrap();

    let mut config = QdTestGenConfig::default();
    config.generator.staged = true;
    config.preamble.library_namespace = "other".to_string();
    let ctx = RunContext::with_config(temp.path().to_path_buf(), config);
    let err = ctx.generate(&GenerateOverrides::default()).unwrap_err();
    assert_eq!(expect_io_path(err), blocked);

    let after: Vec<Vec<u8>> = report.files.iter().map(|p| fs::read(p).unwrap()).collect();
    assert_eq!(before, after);
}
