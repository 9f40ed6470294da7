//! Integration tests for byte-identical regeneration

use super::test_utils::{output_files, read_bytes};
use qdtestgen::cli::{GenerateOverrides, RunContext};
use qdtestgen::config::QdTestGenConfig;
use std::fs;
use tempfile::TempDir;

fn context(root: &std::path::Path) -> RunContext {
    RunContext::with_config(root.to_path_buf(), QdTestGenConfig::default())
}

/// Two runs over the same catalog produce identical files
#[test]
fn test_two_runs_byte_identical() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    let report_a = context(first.path())
        .generate(&GenerateOverrides::default())
        .unwrap();
    let report_b = context(second.path())
        .generate(&GenerateOverrides::default())
        .unwrap();

    assert_eq!(report_a.files.len(), 8);
    assert_eq!(read_bytes(&report_a.files), read_bytes(&report_b.files));
    assert_eq!(report_a.shards, report_b.shards);
}

/// Regenerating in place truncates instead of appending
#[test]
fn test_rerun_in_place_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let ctx = context(temp.path());

    let report = ctx.generate(&GenerateOverrides::default()).unwrap();
    let before = read_bytes(&report.files);
    ctx.generate(&GenerateOverrides::default()).unwrap();
    assert_eq!(read_bytes(&report.files), before);
}

/// Stale content in an output file does not survive a run
#[test]
fn test_stale_output_replaced() {
    let temp = TempDir::new().unwrap();
    let files = output_files(temp.path(), "generated_test", 8);
    fs::write(&files[5], "// stale\n").unwrap();

    context(temp.path())
        .generate(&GenerateOverrides::default())
        .unwrap();

    let contents = fs::read_to_string(&files[5]).unwrap();
    assert!(!contents.contains("stale"));
    assert!(contents.starts_with("#include <lock.hpp>\nusing namespace qd::locks;\n"));
}

/// Every file starts with the same preamble, even ones with no shards
#[test]
fn test_every_file_has_preamble() {
    let temp = TempDir::new().unwrap();
    let overrides = GenerateOverrides {
        file_limit: Some(32),
        ..GenerateOverrides::default()
    };
    let report = context(temp.path()).generate(&overrides).unwrap();
    assert_eq!(report.files.len(), 32);
    let preamble = "#include <lock.hpp>\n\
                    using namespace qd::locks;\n\
                    using namespace qd::queues;\n\
                    using namespace qd;\n";
    for path in &report.files {
        assert!(fs::read_to_string(path).unwrap().starts_with(preamble));
    }
    // 15 shards over 32 files: the tail holds only the preamble
    assert_eq!(fs::read_to_string(&report.files[31]).unwrap(), preamble);
}
