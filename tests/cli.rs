use assert_cmd::prelude::*;
use predicates::str::contains;
use std::process::Command;

#[test]
fn invalid_thread_count_fails() {
    Command::cargo_bin("webserver")
        .unwrap()
        .args(["--threads", "0"])
        .assert()
        .failure()
        .stderr(contains("invalid thread count"));
}

#[test]
fn invalid_queue_size_fails() {
    Command::cargo_bin("webserver")
        .unwrap()
        .args(["--queue-size", "0"])
        .assert()
        .failure()
        .stderr(contains("invalid queue size"));
}

#[test]
fn help_describes_the_server() {
    Command::cargo_bin("webserver")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("static file server"));
}
