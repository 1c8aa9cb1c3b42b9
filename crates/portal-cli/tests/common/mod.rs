//! Shared E2E test helpers for `portal` binary tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::time::Duration;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Environment variables that would leak host configuration into tests.
const PORTAL_ENV_VARS: &[&str] = &[
    "PORTAL_DEBUG",
    "PORTAL_VERBOSE",
    "PORTAL_STEP_UP_LATENCY_MS",
    "PORTAL_STEP_UP_TIMEOUT_MS",
    "PORTAL_CHAT_LATENCY_MS",
    "RUST_LOG",
];

/// Build a Command for the `portal` binary in an isolated project.
///
/// The tempdir is both the project root and the home of the (absent)
/// global config, and carries a project config with zero latencies.
/// Returns (command, _guard); keep the guard alive for the test's duration.
pub fn portal_cmd() -> (assert_cmd::Command, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("create temp project dir");
    let config_dir = tmp.path().join(".portal");
    std::fs::create_dir_all(&config_dir).expect("create .portal dir");
    std::fs::write(
        config_dir.join("config.toml"),
        "[step_up]\nverify_latency_ms = 0\n\n[chat]\nreply_latency_ms = 0\n",
    )
    .expect("write project config");

    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("portal");
    cmd.timeout(TIMEOUT_BASIC);
    for var in PORTAL_ENV_VARS {
        cmd.env_remove(var);
    }
    let root = tmp.path().to_str().expect("valid utf8");
    cmd.args(["-C", root]);
    cmd.args([
        "--config",
        tmp.path().join("global.toml").to_str().expect("valid utf8"),
    ]);
    (cmd, tmp)
}
