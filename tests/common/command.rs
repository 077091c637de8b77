use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn workspace_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

pub fn run_domdiff(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("domdiff").expect("Failed to find domdiff binary");
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Runs a command expected to succeed and parses its stdout as JSON
pub fn run_domdiff_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let output = run_domdiff(dir, args).assert().success().get_output().clone();
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}
