//! Integration tests for the bare status-change patterns (`3x`, `x3`,
//! `3 done`).

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_mark_suffix_pattern() {
    let env = TestEnv::new();
    env.write_list("+ call mom\n- buy milk");
    env.ty().arg("2x").assert().success();
    assert_eq!(env.read_list(), "+ call mom\nx buy milk");
}

#[test]
fn test_mark_prefix_pattern() {
    let env = TestEnv::new();
    env.write_list("+ call mom\n- buy milk");
    env.ty().arg("x2").assert().success();
    assert_eq!(env.read_list(), "+ call mom\nx buy milk");
}

#[test]
fn test_mark_promotes_and_resorts() {
    let env = TestEnv::new();
    env.write_list("- buy milk\n- water plants");
    env.ty().arg("+2").assert().success();
    assert_eq!(env.read_list(), "+ water plants\n- buy milk");
}

#[test]
fn test_mark_with_instruction_word() {
    let env = TestEnv::new();
    env.write_list("- buy milk\n- water plants");
    env.ty().args(["2", "done"]).assert().success();
    assert_eq!(env.read_list(), "- buy milk\nx water plants");
}

#[test]
fn test_mark_back_to_later() {
    let env = TestEnv::new();
    env.write_list("+ call mom\n- buy milk");
    env.ty().args(["1", "later"]).assert().success();
    assert_eq!(env.read_list(), "- call mom\n- buy milk");
}

#[test]
fn test_mark_out_of_range_leaves_file_untouched() {
    let env = TestEnv::new();
    env.write_list("- only task");
    env.ty()
        .arg("9x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no task with index 9"));
    assert_eq!(env.read_list(), "- only task");
}

#[test]
fn test_mark_bare_index_needs_instruction() {
    let env = TestEnv::new();
    env.write_list("- a\n- b");
    env.ty()
        .arg("2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("instruction for task 2"));
    assert_eq!(env.read_list(), "- a\n- b");
}

#[test]
fn test_mark_unknown_instruction_fails() {
    let env = TestEnv::new();
    env.write_list("- a");
    env.ty()
        .args(["1", "someday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown command"));
}

#[test]
fn test_mark_indices_refer_to_displayed_order() {
    let env = TestEnv::new();
    // File order differs from display order; index 1 must be the active task.
    env.write_list("- buy milk\n+ call mom");
    env.ty().arg("1x").assert().success();
    assert_eq!(env.read_list(), "- buy milk\nx call mom");
}
