use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn stride_cmd() -> Command {
    let mut cmd = Command::cargo_bin("stride").expect("Failed to find stride binary");
    cmd.arg("--no-color");
    cmd
}

/// Writes a two-week plan document and returns its path.
fn write_plan_document(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("plan.json");
    std::fs::write(
        &path,
        r#"{
            "overview": "Learn the guitar",
            "totalWeeks": 2,
            "weeks": [
                {
                    "weekNumber": 1,
                    "focus": "Chords",
                    "tasks": [
                        {"title": "Practice open chords", "priority": "high", "estimatedHours": 2.0},
                        {"title": "Learn a strumming pattern"}
                    ]
                },
                {
                    "weekNumber": 2,
                    "focus": "First song",
                    "tasks": [
                        {"title": "Play along with a recording"}
                    ]
                }
            ]
        }"#,
    )
    .expect("Failed to write plan document");
    path
}

#[test]
fn test_cli_adopt_plan_success() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let plan_path = write_plan_document(temp_dir.path());

    stride_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "plan",
            "adopt",
            plan_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Adopted plan"))
        .stdout(predicate::str::contains("Learn the guitar"));
}

#[test]
fn test_cli_adopt_rejects_invalid_document() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let plan_path = temp_dir.path().join("bad.json");
    std::fs::write(&plan_path, "{\"overview\": \"broken\"").unwrap();

    stride_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "plan",
            "adopt",
            plan_path.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid plan document"));
}

#[test]
fn test_cli_show_without_plan() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    stride_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "plan", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No plan found"));
}

#[test]
fn test_cli_show_plan_with_week_states() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();
    let plan_path = write_plan_document(temp_dir.path());

    stride_cmd()
        .args(["--database-file", db_arg, "plan", "adopt", plan_path.to_str().unwrap()])
        .assert()
        .success();

    stride_cmd()
        .args(["--database-file", db_arg, "plan", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Learn the guitar"))
        .stdout(predicate::str::contains("Practice open chords"))
        .stdout(predicate::str::contains("Week 1: active"))
        .stdout(predicate::str::contains("Week 2: locked"));
}

#[test]
fn test_cli_task_workflow() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();
    let plan_path = write_plan_document(temp_dir.path());

    stride_cmd()
        .args(["--database-file", db_arg, "plan", "adopt", plan_path.to_str().unwrap()])
        .assert()
        .success();

    stride_cmd()
        .args(["--database-file", db_arg, "task", "start", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Started 'Practice open chords'"));

    // Starting a second task while one runs is rejected with the title.
    stride_cmd()
        .args(["--database-file", db_arg, "task", "start", "1", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Practice open chords"));

    stride_cmd()
        .args(["--database-file", db_arg, "task", "complete", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed 'Practice open chords'"));

    // Completing the rest of the week fires the celebration.
    stride_cmd()
        .args(["--database-file", db_arg, "task", "complete", "1", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Week 1 complete"));

    stride_cmd()
        .args(["--database-file", db_arg, "plan", "progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2/3 tasks done (67%)"));
}

#[test]
fn test_cli_move_into_locked_week_rejected() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();
    let plan_path = write_plan_document(temp_dir.path());

    stride_cmd()
        .args(["--database-file", db_arg, "plan", "adopt", plan_path.to_str().unwrap()])
        .assert()
        .success();

    stride_cmd()
        .args([
            "--database-file",
            db_arg,
            "task",
            "move",
            "1",
            "1",
            "--to-week",
            "2",
            "--to-position",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("locked"));
}

#[test]
fn test_cli_today_and_streak() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();
    let plan_path = write_plan_document(temp_dir.path());

    stride_cmd()
        .args(["--database-file", db_arg, "plan", "adopt", plan_path.to_str().unwrap()])
        .assert()
        .success();

    // Nothing scheduled: Today falls back to the active week's tasks.
    stride_cmd()
        .args(["--database-file", db_arg, "today"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Today"))
        .stdout(predicate::str::contains("Practice open chords"));

    stride_cmd()
        .args(["--database-file", db_arg, "streak"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No streak yet"));

    stride_cmd()
        .args(["--database-file", db_arg, "task", "complete", "1", "1"])
        .assert()
        .success();

    stride_cmd()
        .args(["--database-file", db_arg, "streak"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Streak: 1 day"));
}

#[test]
fn test_cli_delete_requires_confirm_and_archives() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();
    let plan_path = write_plan_document(temp_dir.path());

    stride_cmd()
        .args(["--database-file", db_arg, "plan", "adopt", plan_path.to_str().unwrap()])
        .assert()
        .success();

    stride_cmd()
        .args(["--database-file", db_arg, "plan", "delete"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--confirm"));

    stride_cmd()
        .args(["--database-file", db_arg, "plan", "delete", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("archived"));

    stride_cmd()
        .args(["--database-file", db_arg, "plan", "history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Learn the guitar"));
}

#[test]
fn test_cli_rejects_zero_position() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    stride_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "task", "start", "0", "1"])
        .assert()
        .failure();
}
