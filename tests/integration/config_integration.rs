//! Integration tests for layered configuration loading

use super::test_utils::{isolated_env, output_files};
use qdtestgen::cli::{GenerateOverrides, RunContext};
use qdtestgen::config::ConfigLoader;
use std::fs;
use tempfile::TempDir;

fn write_workspace_config(root: &std::path::Path, name: &str, body: &str) {
    let dir = root.join("config");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), body).unwrap();
}

#[test]
fn test_defaults_without_any_file() {
    let _env = isolated_env();
    let temp = TempDir::new().unwrap();
    let config = ConfigLoader::load(temp.path()).unwrap();
    assert_eq!(config.generator.file_limit, 8);
    assert_eq!(config.generator.prefix, "generated_test");
    assert_eq!(config.catalog.locks.len(), 7);
    assert!(config.validate().is_ok());
}

#[test]
fn test_workspace_file_then_env_file() {
    let _env = isolated_env();
    let temp = TempDir::new().unwrap();
    write_workspace_config(
        temp.path(),
        "config.toml",
        "[generator]\nfile_limit = 4\nprefix = \"base_\"\n",
    );
    write_workspace_config(temp.path(), "ci.toml", "[generator]\nprefix = \"ci_\"\n");
    std::env::set_var("QDTESTGEN_ENV", "ci");

    let config = ConfigLoader::load(temp.path()).unwrap();
    assert_eq!(config.generator.file_limit, 4);
    assert_eq!(config.generator.prefix, "ci_");
}

#[test]
fn test_global_file_below_workspace_file() {
    let _env = isolated_env();
    let temp = TempDir::new().unwrap();
    let global = ConfigLoader::global_config_path().unwrap();
    fs::create_dir_all(global.parent().unwrap()).unwrap();
    fs::write(
        &global,
        "[generator]\nfile_limit = 2\nprefix = \"global_\"\n",
    )
    .unwrap();
    write_workspace_config(temp.path(), "config.toml", "[generator]\nprefix = \"ws_\"\n");

    let config = ConfigLoader::load(temp.path()).unwrap();
    assert_eq!(config.generator.file_limit, 2);
    assert_eq!(config.generator.prefix, "ws_");
}

#[test]
fn test_environment_overrides_files() {
    let _env = isolated_env();
    let temp = TempDir::new().unwrap();
    write_workspace_config(temp.path(), "config.toml", "[generator]\nfile_limit = 4\n");
    std::env::set_var("QDTESTGEN__GENERATOR__FILE_LIMIT", "3");

    let config = ConfigLoader::load(temp.path()).unwrap();
    assert_eq!(config.generator.file_limit, 3);
}

#[test]
fn test_catalog_override_drives_generation() {
    let _env = isolated_env();
    let temp = TempDir::new().unwrap();
    write_workspace_config(
        temp.path(),
        "config.toml",
        r#"
[generator]
output_dir = "gen"
file_limit = 2

[catalog]
locks = ["mcs_lock"]
starvation_policies = ["starvation_policy_t::may_starve"]

[catalog.buffer_queue]
sizes = [1024]

[catalog.entry_queue]
entries = []

[[catalog.dual_buffer_queue.shapes]]
size = 4096
chunk = 32
"#,
    );

    let ctx = RunContext::new(temp.path().to_path_buf(), None).unwrap();
    let report = ctx.generate(&GenerateOverrides::default()).unwrap();

    assert_eq!(
        report.files,
        output_files(&temp.path().join("gen"), "generated_test", 2)
    );
    // 1 lock, 1 buffer queue, no entry queue, 1 shape x 2 atomic policies
    assert_eq!(report.total_types, 1 + 1 + 2);
    let names: Vec<&str> = report.shards.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["StandardLocks", "BufferQueue", "DualBufferQueue"]);

    let second = fs::read_to_string(&report.files[1]).unwrap();
    assert!(second.contains(
        "qdlock_impl<mcs_lock, buffer_queue<1024>, starvation_policy_t::may_starve>"
    ));
}

#[test]
fn test_invalid_config_rejected_before_writing() {
    let _env = isolated_env();
    let temp = TempDir::new().unwrap();
    write_workspace_config(temp.path(), "config.toml", "[generator]\nfile_limit = 0\n");

    let ctx = RunContext::new(temp.path().to_path_buf(), None).unwrap();
    let err = ctx.generate(&GenerateOverrides::default()).unwrap_err();
    assert!(err.to_string().contains("file_limit"));
    assert!(!temp.path().join("generated_test0.cpp").exists());
}
