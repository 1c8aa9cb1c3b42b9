//! E2E tests for non-interactive command mode (`portal <command...>`).
//!
//! Commands are `;`-separated; the exit code is non-zero if any failed.
//! Command output goes to stdout, errors and logs to stderr.

mod common;

use common::portal_cmd;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

// ─── Basic Command Mode ──────────────────────────────────────────

#[test]
fn help_lists_commands() {
    let (mut cmd, _guard) = portal_cmd();
    cmd.arg("help")
        .assert()
        .success()
        .stdout(contains("login <email> <password>"))
        .stdout(contains("verify <password>"));
}

#[test]
fn unknown_command_fails() {
    let (mut cmd, _guard) = portal_cmd();
    cmd.arg("frobnicate")
        .assert()
        .failure()
        .stderr(contains("APP_UNKNOWN_COMMAND"));
}

#[test]
fn login_then_whoami() {
    let (mut cmd, _guard) = portal_cmd();
    cmd.args(["login", "gestor@company.com", "pw;", "whoami"])
        .assert()
        .success()
        .stdout(contains("Carlos Santos"))
        .stdout(contains("Role:        Manager"));
}

#[test]
fn invalid_login_is_generic() {
    let (mut cmd, _guard) = portal_cmd();
    cmd.args(["login", "nobody@company.com", "pw"])
        .assert()
        .failure()
        .stderr(contains("AUTH_INVALID_IDENTITY"))
        .stderr(contains("invalid email or password"));
}

// ─── Access Control ──────────────────────────────────────────────

#[test]
fn legal_step_up_flow() {
    let (mut cmd, _guard) = portal_cmd();
    cmd.args([
        "login juridico@company.com pw;",
        "go legal;",
        "verify s3cret;",
        "docs;",
        "open 4;",
        "audit",
    ])
    .assert()
    .success()
    .stdout(contains("requires identity confirmation"))
    .stdout(contains("Identity confirmed. Now viewing: legal"))
    .stdout(contains("Non-Disclosure Agreement"))
    .stdout(contains("#4 Power of Attorney"))
    .stdout(contains("Access log:"));
}

#[test]
fn collaborator_is_forbidden_from_legal() {
    let (mut cmd, _guard) = portal_cmd();
    cmd.args(["login colaborador@company.com pw; go legal; whoami"])
        .assert()
        .failure()
        .stderr(contains("AUTH_FORBIDDEN"))
        .stdout(contains("requires identity confirmation").not())
        .stdout(contains("View:        dashboard"));
}

#[test]
fn documents_need_step_up() {
    let (mut cmd, _guard) = portal_cmd();
    cmd.args(["login admin@company.com pw; docs"])
        .assert()
        .failure()
        .stderr(contains("AUTH_NEEDS_STEP_UP"));
}

#[test]
fn admin_panel_only_for_admin() {
    let (mut cmd, _guard) = portal_cmd();
    cmd.args(["login admin@company.com pw; go admin"])
        .assert()
        .success()
        .stdout(contains("Now viewing: admin"));

    let (mut cmd, _guard) = portal_cmd();
    cmd.args(["login gestor@company.com pw; go admin"])
        .assert()
        .failure()
        .stderr(contains("AUTH_FORBIDDEN"));
}

#[test]
fn admin_panel_commands() {
    let (mut cmd, _guard) = portal_cmd();
    cmd.args(["login admin@company.com pw; users lima; roles; log modify"])
        .assert()
        .success()
        .stdout(contains("roberto.lima@company.com"))
        .stdout(contains("inactive"))
        .stdout(contains("DESCRIPTION"))
        .stdout(contains("Changed settings"))
        .stdout(contains("Exported").not());

    let (mut cmd, _guard) = portal_cmd();
    cmd.args(["login juridico@company.com pw; users"])
        .assert()
        .failure()
        .stderr(contains("AUTH_FORBIDDEN"))
        .stdout(contains("ana.silva@company.com").not());
}

#[test]
fn document_filters_and_upload() {
    let (mut cmd, guard) = portal_cmd();
    let file = guard.path().join("vendor-nda.docx");
    std::fs::write(&file, vec![0u8; 4096]).expect("write upload file");

    cmd.arg(format!(
        "login juridico@company.com pw; go legal; verify pw; \
         docs --dept operations --category licenses; \
         upload Vendor NDA --dept Sales --category Contracts --version v2.0 --file {}; \
         docs nda --dept sales; audit",
        file.display()
    ))
    .assert()
    .success()
    .stdout(contains("Environmental License"))
    .stdout(contains("Uploaded #9 Vendor NDA (DOCX, 4 KB) to Sales / Contracts."))
    .stdout(contains("Vendor NDA"))
    .stdout(contains("upload"));
}

#[test]
fn upload_refused_before_step_up() {
    let (mut cmd, guard) = portal_cmd();
    let file = guard.path().join("policy.pdf");
    std::fs::write(&file, b"%PDF").expect("write upload file");

    cmd.arg(format!(
        "login admin@company.com pw; upload Policy --dept HR --category Policies --file {}",
        file.display()
    ))
    .assert()
    .failure()
    .stderr(contains("AUTH_NEEDS_STEP_UP"));
}

#[test]
fn chat_refuses_legal_topics_for_collaborator() {
    let (mut cmd, _guard) = portal_cmd();
    cmd.args(["login colaborador@company.com pw; chat where is the NDA contract?"])
        .assert()
        .success()
        .stdout(contains("not authorized to access legal center"));
}

// ─── Configuration ───────────────────────────────────────────────

#[test]
fn invalid_env_var_is_a_config_error() {
    let (mut cmd, _guard) = portal_cmd();
    cmd.env("PORTAL_STEP_UP_LATENCY_MS", "soon")
        .arg("help")
        .assert()
        .failure()
        .stderr(contains("Config error"));
}

#[test]
fn step_up_timeout_flag_applies() {
    let (mut cmd, _guard) = portal_cmd();
    cmd.args([
        "--step-up-latency-ms",
        "5000",
        "--step-up-timeout-ms",
        "50",
        "login juridico@company.com pw; go legal; verify pw; whoami",
    ])
    .assert()
    .failure()
    .stderr(contains("AUTH_VERIFICATION_TIMED_OUT"))
    .stdout(contains("Identity:    waiting for password"));
}
