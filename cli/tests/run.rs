#![cfg(unix)]

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const METRICS: &str = "printf '5023\\n8110\\n0.8312\\n421\\n' >&2";

/// Workspace whose subject is `/bin/sh`: every `<case>.data` is a script.
fn workspace(cases: &[(&str, i64)]) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let mut toml = String::from(
        r#"
[build]
enabled = false
compiler = "g++"
source = "main.cpp"
output = "/bin/sh"

[test]
data_dir = "data"
time_limit_ms = 10000
"#,
    );
    for (name, answer) in cases {
        toml.push_str(&format!(
            "\n[[testcase]]\nname = \"{}\"\nanswer = {}\n",
            name, answer
        ));
    }
    std::fs::write(dir.path().join("simjudge.toml"), toml).unwrap();
    std::fs::create_dir(dir.path().join("data")).unwrap();
    dir
}

fn write_case(dir: &Path, name: &str, script: &str) {
    std::fs::write(dir.join("data").join(format!("{}.data", name)), script).unwrap();
}

fn answer(n: i64) -> String {
    format!("echo {}\n{}\n", n, METRICS)
}

fn simjudge(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_simjudge"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("SIMJUDGE_DATA_DIR")
        .env_remove("SIMJUDGE_SOURCE")
        .env_remove("SIMJUDGE_COMPILER")
        .env_remove("SIMJUDGE_TIME_LIMIT_MS")
        .output()
        .expect("simjudge should be spawned")
}

fn stdout_of(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn all_cases_pass_and_completion_is_announced_once() {
    let dir = workspace(&[("gcd", 178), ("hanoi", 20)]);
    write_case(dir.path(), "gcd", &answer(178));
    write_case(dir.path(), "hanoi", &answer(20));

    let out = simjudge(dir.path(), &["test"]);
    let stdout = stdout_of(&out);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        stdout,
        "run test case gcd\n\
         judge result: 178\n\
         commit number: 5023\n\
         cycles: 8110\n\
         accuracy: 0.8312 among 421\n\
         run test case hanoi\n\
         judge result: 20\n\
         commit number: 5023\n\
         cycles: 8110\n\
         accuracy: 0.8312 among 421\n\
         execute done\n"
    );
    assert_eq!(stdout.matches("execute done").count(), 1);
}

#[test]
fn repeated_runs_print_identical_metrics() {
    let dir = workspace(&[("gcd", 178)]);
    write_case(dir.path(), "gcd", &answer(178));

    let first = simjudge(dir.path(), &["test"]);
    let second = simjudge(dir.path(), &["test"]);
    assert_eq!(stdout_of(&first), stdout_of(&second));
}

#[test]
fn wrong_answer_halts_with_its_own_exit_code() {
    let dir = workspace(&[("tak", 186), ("array_test1", 123)]);
    write_case(dir.path(), "tak", &answer(185));
    write_case(dir.path(), "array_test1", &answer(123));

    let out = simjudge(dir.path(), &["t"]);
    let stdout = stdout_of(&out);

    assert_eq!(out.status.code(), Some(4));
    assert!(stdout.contains("Wrong Answer on 'tak' (expected 186, got 185)"));
    assert!(!stdout.contains("run test case array_test1"));
    assert!(!stdout.contains("execute done"));
}

#[test]
fn missing_input_halts_before_spawning() {
    let dir = workspace(&[("gcd", 178), ("hanoi", 20), ("tak", 186)]);
    write_case(dir.path(), "gcd", &answer(178));
    write_case(dir.path(), "tak", &answer(186));

    let out = simjudge(dir.path(), &["test"]);
    let stdout = stdout_of(&out);

    assert_eq!(out.status.code(), Some(3));
    assert!(stdout.contains("run test case hanoi\ninput not found: "));
    assert!(!stdout.contains("run test case tak"));
}

#[test]
fn short_stderr_is_classified_as_malformed_output() {
    let dir = workspace(&[("gcd", 178)]);
    write_case(dir.path(), "gcd", "echo 178\nprintf '1\\n2\\n3\\n' >&2\n");

    let out = simjudge(dir.path(), &["test"]);

    assert_eq!(out.status.code(), Some(5));
    assert!(stdout_of(&out).contains("stderr has 3 lines (expected 4)"));
}

#[test]
fn hung_subject_times_out() {
    let dir = workspace(&[("superloop", 134)]);
    write_case(dir.path(), "superloop", "sleep 10\n");

    let out = simjudge(dir.path(), &["test", "--time-limit", "200"]);

    assert_eq!(out.status.code(), Some(7));
    assert!(stdout_of(&out).contains("time limit exceeded (200ms)"));
}

#[test]
fn failed_build_is_surfaced_immediately() {
    let dir = workspace(&[("gcd", 178)]);
    write_case(dir.path(), "gcd", &answer(178));

    let out = Command::new(env!("CARGO_BIN_EXE_simjudge"))
        .args(["test", "--source", "missing.cpp"])
        .current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env("SIMJUDGE_COMPILER", "false")
        .output()
        .unwrap();
    // enabled = false in the file; the compiler override alone must not build
    assert_eq!(out.status.code(), Some(0));

    let toml_path = dir.path().join("simjudge.toml");
    let toml = std::fs::read_to_string(&toml_path)
        .unwrap()
        .replace("enabled = false", "enabled = true");
    std::fs::write(&toml_path, toml).unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_simjudge"))
        .arg("test")
        .current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env("SIMJUDGE_COMPILER", "false")
        .output()
        .unwrap();
    let stdout = stdout_of(&out);

    assert_eq!(out.status.code(), Some(6));
    assert!(stdout.contains("compile error"));
    assert!(!stdout.contains("run test case"));
}

#[test]
fn list_marks_missing_inputs() {
    let dir = workspace(&[("gcd", 178), ("hanoi", 20)]);
    write_case(dir.path(), "gcd", &answer(178));

    let out = simjudge(dir.path(), &["list"]);
    let stdout = stdout_of(&out);
    let lines: Vec<_> = stdout.lines().collect();

    assert!(out.status.success());
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("gcd") && !lines[0].ends_with("(missing)"));
    assert!(lines[1].starts_with("hanoi") && lines[1].ends_with("(missing)"));
}

#[test]
fn init_writes_builtin_config_once() {
    let dir = tempfile::tempdir().unwrap();

    let out = simjudge(dir.path(), &["init"]);
    assert!(out.status.success());
    let written = std::fs::read_to_string(dir.path().join("simjudge.toml")).unwrap();
    assert!(written.contains("name = \"tak\""));

    let out = simjudge(dir.path(), &["init"]);
    assert_eq!(out.status.code(), Some(1));
}
