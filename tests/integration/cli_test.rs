use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_bnb"))
}

fn write_matrix(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write matrix file");
    path
}

fn run(args: &[&str], files: &[&Path]) -> Output {
    Command::new(get_binary_path())
        .args(args)
        .args(files)
        .output()
        .expect("Failed to execute bnb")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "Command failed with status: {:?}\nstderr: {}\nstdout: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr),
            String::from_utf8_lossy(&output.stdout)
        );
    }
}

const TRIANGLE: &str = "3\n0 100 100\n100 0 100\n100 100 0\n";

#[test]
fn test_solve_prints_solution() {
    let dir = tempfile::tempdir().unwrap();
    let triangle = write_matrix(dir.path(), "triangle.txt", TRIANGLE);

    let output = run(&["solve", "--algorithm", "task-parallel", "-j", "2"], &[&triangle]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("== triangle.txt (3 vertices, 3 edges)"));
    assert!(stdout.contains("Weight sum = 200"), "stdout: {}", stdout);
    assert!(stdout.contains("Algorithm: task-parallel"));
}

#[test]
fn test_solve_json_output() {
    let dir = tempfile::tempdir().unwrap();
    // four-cycle: 0-1, 1-2, 2-3, 0-3; the 60 entries fall outside the window
    let cycle = write_matrix(
        dir.path(),
        "cycle.txt",
        "4\n0 100 60 85\n100 0 90 60\n60 90 0 110\n85 60 110 0\n",
    );

    let output = run(&["solve", "--json"], &[&cycle]);
    assert_success(&output);

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(report["file"], "cycle.txt");
    assert_eq!(report["edges"], 4);
    assert_eq!(report["solution"]["cost"], 385);
    assert_eq!(report["statistics"]["solved_up_front"], true);
    assert_eq!(report["statistics"]["algorithm"], "sequential");
}

#[test]
fn test_check_runs_every_explorer() {
    let dir = tempfile::tempdir().unwrap();
    let triangle = write_matrix(dir.path(), "triangle.txt", TRIANGLE);

    let output = run(&["check", "-j", "2", "--workers", "2"], &[&triangle]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["sequential", "task-parallel", "frontier", "distributed"] {
        assert!(stdout.contains(name), "missing {} in: {}", name, stdout);
    }
    assert!(stdout.contains("ok"));
}

#[test]
fn test_malformed_matrix_fails() {
    let dir = tempfile::tempdir().unwrap();
    let broken = write_matrix(dir.path(), "broken.txt", "3\n0 100\n");

    let output = run(&["solve"], &[&broken]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("broken.txt"), "stderr: {}", stderr);
}

#[test]
fn test_negative_min_weight_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let triangle = write_matrix(dir.path(), "triangle.txt", TRIANGLE);

    let output = run(&["solve", "--min-weight=-10"], &[&triangle]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--min-weight must not be negative"), "stderr: {}", stderr);
}
