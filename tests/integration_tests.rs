//! Integration Tests
//!
//! Drives the jsh binary through stdin and asserts on its report lines and
//! exit codes.

use assert_cli::Assert;
use tempdir::TempDir;

#[test]
fn rejects_unknown_arguments() {
    Assert::main_binary()
        .with_args(&["--bogus"])
        .fails_with(255)
        .unwrap();

    Assert::main_binary()
        .with_args(&["extra-positional"])
        .fails_with(255)
        .unwrap();
}

#[test]
fn reports_version() {
    Assert::main_binary()
        .with_args(&["--version"])
        .stdout()
        .contains("jsh version")
        .unwrap();
}

#[test]
fn foreground_command_reports_exit() {
    Assert::main_binary()
        .stdin("echo hello\nexit\n")
        .succeeds()
        .stdout()
        .contains("hello")
        .stdout()
        .contains("] echo Exited 0")
        .unwrap();
}

#[test]
fn pid_builtins_report_shell_identity() {
    Assert::main_binary()
        .stdin("pid\nppid\nexit\n")
        .succeeds()
        .stdout()
        .contains("Shell pid: ")
        .stdout()
        .contains("Shell's Parent pid: ")
        .unwrap();
}

#[test]
fn failed_cd_leaves_directory_unchanged() {
    let dir = TempDir::new("jsh-cd-test").unwrap();
    // `Assert::main_binary()` invokes `cargo run`, which cannot locate the
    // manifest when run from the temp dir; invoke the built binary directly.
    Assert::command(&[env!("CARGO_BIN_EXE_jsh")])
        .current_dir(dir.path())
        .stdin("cd /jsh-definitely-missing\npwd\nexit\n")
        .succeeds()
        .stderr()
        .contains("cd: ")
        .stdout()
        .contains(dir.path().to_str().unwrap())
        .unwrap();
}

#[test]
fn exec_failure_is_an_ordinary_termination() {
    // the child exits with the exec-failure code; the shell itself is fine
    Assert::main_binary()
        .stdin("jsh-no-such-program\nexit\n")
        .succeeds()
        .stderr()
        .contains("Command Not Found")
        .stdout()
        .contains("Exited 252")
        .unwrap();
}

#[test]
fn parse_failure_sets_exit_status() {
    Assert::main_binary()
        .stdin("echo \x07\nexit\n")
        .fails_with(254)
        .stderr()
        .contains("could not parse command")
        .unwrap();
}

#[test]
fn background_job_is_listed_then_reaped() {
    // `jobs` runs in the cycle right after registration, before the child
    // can have been reaped away
    Assert::main_binary()
        .stdin("sleep 5 &\njobs\nexit\n")
        .succeeds()
        .stdout()
        .contains("] sleep")
        .unwrap();

    // a quick background exit is reported by a later iteration's reap step
    Assert::main_binary()
        .stdin("true &\nsleep 1\nexit\n")
        .succeeds()
        .stdout()
        .contains("] true Exited 0")
        .unwrap();
}
