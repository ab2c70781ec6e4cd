use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let p = dir.path().join(name);
    std::fs::write(&p, body).unwrap();
    p
}

fn report_augment(dir: &TempDir, args: &[&OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_report-augment"))
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn run_prints_one_confirmation_line() {
    let dir = TempDir::new().unwrap();
    let summary = write(&dir, "summary.json", r#"{"other_algo": {"score": 1}}"#);
    let meta = write(&dir, "train_meta.json", r#"{"total_steps": 75000}"#);

    let out = report_augment(
        &dir,
        &[
            OsStr::new("run"),
            OsStr::new("--summary"),
            summary.as_os_str(),
            OsStr::new("--metadata"),
            meta.as_os_str(),
        ],
    );

    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "Summary updated with DQN training metadata.\n"
    );
    let got: serde_json::Value = serde_json::from_slice(&std::fs::read(&summary).unwrap()).unwrap();
    assert_eq!(got["DQN_training"]["training_steps"], serde_json::json!(75000));
}

#[test]
fn failed_run_exits_nonzero_without_confirmation() {
    let dir = TempDir::new().unwrap();
    let summary = write(&dir, "summary.json", "{}");
    let meta = write(&dir, "train_meta.json", "not json");

    let out = report_augment(
        &dir,
        &[
            OsStr::new("run"),
            OsStr::new("--summary"),
            summary.as_os_str(),
            OsStr::new("--metadata"),
            meta.as_os_str(),
        ],
    );

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert_eq!(std::fs::read_to_string(&summary).unwrap(), "{}");
}
