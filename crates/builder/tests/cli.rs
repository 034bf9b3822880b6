//! End-to-end runs of the `builder` binary with unreachable tools.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn builder(dir: &Path, args: &[&str]) -> Output {
    builder_with_log(dir, args, "info")
}

fn builder_with_log(dir: &Path, args: &[&str], rust_log: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_builder"))
        .current_dir(dir)
        .args(args)
        .env("KNOWBOY_CMAKE", "knowboy-missing-cmake")
        .env("KNOWBOY_MSBUILD", "knowboy-missing-msbuild")
        .env("KNOWBOY_INSTALL_PATH", dir.join("cores/knowboy_libretro.dll"))
        .env("RUST_LOG", rust_log)
        .output()
        .unwrap()
}

#[test]
fn test_failing_steps_still_exit_successfully() {
    let tmp = TempDir::new().unwrap();

    let out = builder(tmp.path(), &["libretro"]);

    assert!(out.status.success());
    assert!(tmp.path().join("build").is_dir());

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error occurred while executing: knowboy-missing-cmake .."));
    assert!(stderr.contains("Error occurred while executing: knowboy-missing-msbuild"));
    assert!(stderr.contains("libretro: 0/3 steps succeeded"));
}

#[test]
fn test_strict_reports_failure() {
    let tmp = TempDir::new().unwrap();

    let out = builder(tmp.path(), &["sdl", "--strict"]);

    assert!(!out.status.success());
    assert!(tmp.path().join("build").is_dir());
}

#[test]
fn test_json_report() {
    let tmp = TempDir::new().unwrap();

    let out = builder(tmp.path(), &["sdl", "--json"]);
    assert!(out.status.success());

    let reports: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(reports[0]["target"], "sdl");
    assert_eq!(
        reports[0]["steps"][0]["command"],
        "knowboy-missing-cmake -Bbuild -H."
    );
    assert_eq!(reports[0]["steps"][1]["success"], false);
}

#[cfg(unix)]
#[test]
fn test_json_report_survives_tool_output() {
    let tmp = TempDir::new().unwrap();

    let out = builder(tmp.path(), &["sdl", "--json", "--cmake", "echo", "--msbuild", "echo"]);
    assert!(out.status.success());

    let reports: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(reports[0]["steps"][0]["success"], true);
    assert_eq!(reports[0]["steps"][1]["success"], true);

    // Tool output goes to stderr instead
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("-Bbuild -H."));
}

#[test]
fn test_failures_are_printed_with_logging_off() {
    let tmp = TempDir::new().unwrap();

    let out = builder_with_log(tmp.path(), &["sdl"], "off");

    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error occurred while executing: knowboy-missing-cmake -Bbuild -H."));
    assert!(stderr.contains("Error details: Spawning knowboy-missing-cmake"));
    assert!(stderr.contains("Error occurred while executing: knowboy-missing-msbuild"));
    assert!(!stderr.contains("steps succeeded"));
}

#[cfg(unix)]
#[test]
fn test_relative_install_path_lands_in_invoking_dir() {
    let tmp = TempDir::new().unwrap();
    let artifact = tmp.path().join("build/bin/Release/knowboy_libretro.dll");
    std::fs::create_dir_all(artifact.parent().unwrap()).unwrap();
    std::fs::write(&artifact, "core").unwrap();

    let args = [
        "libretro",
        "--cmake",
        "true",
        "--msbuild",
        "true",
        "--install-path",
        "knowboy.dll",
    ];
    let out = builder(tmp.path(), &args);

    assert!(out.status.success());
    assert!(tmp.path().join("knowboy.dll").is_file());
    assert!(!tmp.path().join("build/knowboy.dll").exists());
}

#[test]
fn test_directory_failure_is_fatal() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("blocker"), "").unwrap();

    let out = builder(tmp.path(), &["sdl", "--build-dir", "blocker/build"]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Creating build directory"));
}

#[test]
fn test_plan_creates_nothing() {
    let tmp = TempDir::new().unwrap();

    let out = builder(tmp.path(), &["plan", "libretro"]);

    assert!(out.status.success());
    assert!(!tmp.path().join("build").exists());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("knowboy-missing-cmake .."));
    assert!(stdout.contains("/p:Configuration=Release"));
}

#[test]
fn test_clean_removes_build_dir() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("build/bin/Release")).unwrap();

    let out = builder(tmp.path(), &["clean"]);

    assert!(out.status.success());
    assert!(!tmp.path().join("build").exists());
}
