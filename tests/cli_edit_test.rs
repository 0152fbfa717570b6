//! Integration tests for `ty edit` (editor shell-out).

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[cfg(unix)]
fn write_fake_editor(env: &TestEnv, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = env.home.path().join("fake-editor.sh");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

#[test]
#[cfg(unix)]
fn test_edit_reloads_editor_changes() {
    let env = TestEnv::new();
    env.write_list("- before");
    let editor = write_fake_editor(&env, "printf '+ after' > \"$1\"");

    env.ty()
        .arg("edit")
        .env("EDITOR", &editor)
        .assert()
        .success()
        .stdout(predicate::str::contains("after"));
    assert_eq!(env.read_list(), "+ after");
}

#[test]
#[cfg(unix)]
fn test_vi_alias() {
    let env = TestEnv::new();
    env.write_list("- unchanged");
    let editor = write_fake_editor(&env, "exit 0");

    env.ty()
        .arg("vi")
        .env("EDITOR", &editor)
        .assert()
        .success()
        .stdout(predicate::str::contains("unchanged"));
}

#[test]
#[cfg(unix)]
fn test_edit_failure_propagates() {
    let env = TestEnv::new();
    env.write_list("- unchanged");
    let editor = write_fake_editor(&env, "exit 3");

    env.ty()
        .arg("edit")
        .env("EDITOR", &editor)
        .assert()
        .failure()
        .stderr(predicate::str::contains("editor exited"));
    assert_eq!(env.read_list(), "- unchanged");
}

#[test]
#[cfg(unix)]
fn test_configured_editor_beats_env() {
    let env = TestEnv::new();
    env.write_list("- before");
    let configured = write_fake_editor(&env, "printf '%s' '- from config editor' > \"$1\"");
    env.write_config(&format!("editor = \"{}\"\n", configured.display()));

    env.ty()
        .arg("edit")
        .env("EDITOR", "false")
        .assert()
        .success();
    assert_eq!(env.read_list(), "- from config editor");
}
