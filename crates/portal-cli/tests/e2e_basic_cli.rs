//! E2E integration tests for the `portal` binary in interactive mode.
//!
//! Tests the binary's stdin/stdout interface by spawning real subprocesses.

mod common;

use common::portal_cmd;
use predicates::str::contains;

// ─── Startup / Shutdown ────────────────────────────────────────────

#[test]
fn quit_immediately() {
    let (mut cmd, _guard) = portal_cmd();
    cmd.write_stdin("q\n")
        .assert()
        .success()
        .stdout(contains("Interactive mode started"))
        .stdout(contains("Quit requested"));
}

#[test]
fn empty_stdin_exits_gracefully() {
    let (mut cmd, _guard) = portal_cmd();
    cmd.write_stdin("").assert().success();
}

#[test]
fn version_flag() {
    let (mut cmd, _guard) = portal_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

// ─── Session ───────────────────────────────────────────────────────

#[test]
fn prompt_follows_view() {
    let (mut cmd, _guard) = portal_cmd();
    cmd.write_stdin("login admin@company.com pw\ngo settings\nq\n")
        .assert()
        .success()
        .stdout(contains("portal> "))
        .stdout(contains("settings> "));
}

#[test]
fn errors_do_not_end_the_session() {
    let (mut cmd, _guard) = portal_cmd();
    cmd.write_stdin("login estagiario@company.com pw\ngo legal\nwhoami\nq\n")
        .assert()
        .success()
        .stderr(contains("AUTH_FORBIDDEN"))
        .stdout(contains("Patricia Costa"));
}

#[test]
fn cancelled_step_up_keeps_legal_closed() {
    let (mut cmd, _guard) = portal_cmd();
    cmd.write_stdin("login juridico@company.com pw\ngo legal\ncancel\ndocs\nq\n")
        .assert()
        .success()
        .stdout(contains("Identity confirmation cancelled."))
        .stderr(contains("AUTH_NEEDS_STEP_UP"));
}

#[test]
fn logout_resets_legal_access() {
    let (mut cmd, _guard) = portal_cmd();
    cmd.write_stdin(
        "login juridico@company.com pw\ngo legal\nverify pw\nlogout\n\
         login juridico@company.com pw\ndocs\nq\n",
    )
    .assert()
    .success()
    .stdout(contains("Logged out."))
    .stderr(contains("AUTH_NEEDS_STEP_UP"));
}
