//! Integration tests for `ty undo` and the backup chain.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_undo_restores_previous_state() {
    let env = TestEnv::new();
    env.ty().args(["add", "buy", "milk"]).assert().success();
    env.ty().args(["add", "call", "mom"]).assert().success();
    assert_eq!(env.read_list(), "- call mom\n- buy milk");

    env.ty()
        .arg("undo")
        .assert()
        .success()
        .stdout(predicate::str::contains("buy milk"));
    assert_eq!(env.read_list(), "- buy milk");
}

#[test]
fn test_undo_chains_back_through_history() {
    let env = TestEnv::new();
    env.ty().args(["add", "first"]).assert().success();
    env.ty().args(["add", "second"]).assert().success();
    env.ty().args(["add", "third"]).assert().success();

    env.ty().arg("undo").assert().success();
    assert_eq!(env.read_list(), "- second\n- first");
    env.ty().arg("undo").assert().success();
    assert_eq!(env.read_list(), "- first");
    env.ty().arg("undo").assert().success();
    assert_eq!(env.read_list(), "");
}

#[test]
fn test_undo_without_backups_fails() {
    let env = TestEnv::new();
    env.write_list("- a task");
    env.ty()
        .arg("undo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no backups available"));
    assert_eq!(env.read_list(), "- a task");
}

#[test]
fn test_undo_after_flush_brings_tasks_back() {
    let env = TestEnv::new();
    env.write_list("+ keep\nx gone");
    env.ty().arg("flush").assert().success();
    assert_eq!(env.read_list(), "+ keep");

    env.ty().arg("undo").assert().success();
    assert_eq!(env.read_list(), "+ keep\nx gone");
}

#[test]
fn test_rotation_bound_from_config() {
    let env = TestEnv::new();
    env.write_config("backup-bound = 2\n");

    for word in ["one", "two", "three", "four"] {
        env.ty().args(["add", word]).assert().success();
    }

    let backups = env.sibling_files("-backup-");
    assert_eq!(backups, vec!["todo-backup-1.txt", "todo-backup-2.txt"]);
}

#[test]
fn test_failed_command_takes_no_backup() {
    let env = TestEnv::new();
    env.write_list("- only task");
    env.ty().arg("9x").assert().failure();
    assert!(env.sibling_files("-backup-").is_empty());
}
