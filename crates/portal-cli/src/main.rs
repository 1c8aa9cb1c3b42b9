//! Portal CLI - access-controlled corporate portal in the terminal
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`PORTAL_*`)
//! 3. Project config (`.portal/config.toml` in the project root)
//! 4. Global config (`~/.portal/config.toml`, or `--config <file>`)
//! 5. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `PORTAL_DEBUG`: Enable debug mode (`true`/`false`)
//! - `PORTAL_VERBOSE`: Enable verbose output
//! - `PORTAL_STEP_UP_LATENCY_MS`: Simulated identity-confirmation latency
//! - `PORTAL_STEP_UP_TIMEOUT_MS`: Identity-confirmation timeout
//! - `PORTAL_CHAT_LATENCY_MS`: Simulated assistant reply latency

use anyhow::Result;
use clap::Parser;
use portal_app::{CliOverrides, ConfigError, ConfigLoader, PortalApp, PortalConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Portal CLI - access-controlled corporate portal in the terminal
#[derive(Parser, Debug)]
#[command(name = "portal")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Project root directory (defaults to current directory)
    #[arg(short = 'C', long)]
    project: Option<PathBuf>,

    /// Global config file (defaults to ~/.portal/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Simulated identity-confirmation latency in milliseconds
    /// (also: PORTAL_STEP_UP_LATENCY_MS)
    #[arg(long, value_name = "MS")]
    step_up_latency_ms: Option<u64>,

    /// Identity-confirmation timeout in milliseconds
    /// (also: PORTAL_STEP_UP_TIMEOUT_MS)
    #[arg(long, value_name = "MS")]
    step_up_timeout_ms: Option<u64>,

    /// Simulated assistant reply latency in milliseconds
    /// (also: PORTAL_CHAT_LATENCY_MS)
    #[arg(long, value_name = "MS")]
    chat_latency_ms: Option<u64>,

    /// Commands to execute, `;`-separated (interactive mode if omitted)
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

/// Merges file/env config via [`ConfigLoader`] and applies CLI argument
/// overrides as the highest-priority layer.
struct CliConfigResolver {
    project_root: PathBuf,
    global_config: Option<PathBuf>,
    overrides: CliOverrides,
}

impl CliConfigResolver {
    fn from_args(args: &Args) -> Self {
        let project_root = args.project.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to get current directory, using '.'");
                PathBuf::from(".")
            })
        });

        let overrides = CliOverrides::from_switches(args.debug, args.verbose)
            .with_verify_latency(args.step_up_latency_ms.map(Duration::from_millis))
            .with_verify_timeout(args.step_up_timeout_ms.map(Duration::from_millis))
            .with_chat_latency(args.chat_latency_ms.map(Duration::from_millis));

        Self {
            project_root,
            global_config: args.config.clone(),
            overrides,
        }
    }

    fn resolve(&self) -> Result<PortalConfig, ConfigError> {
        let mut loader = ConfigLoader::new().with_project_root(&self.project_root);
        if let Some(ref path) = self.global_config {
            loader = loader.with_global_config(path);
        }

        let mut config = loader.load()?;
        self.overrides.apply(&mut config);
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Terminal filter: --debug > --verbose > RUST_LOG env > default "warn".
    // Logs go to stderr so command output on stdout stays clean.
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();

    let resolver = CliConfigResolver::from_args(&args);
    let config = resolver
        .resolve()
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    info!(
        path = %resolver.project_root.display(),
        "Project root"
    );

    let app = PortalApp::builder(config).build();

    info!(
        "Application initialized (debug={}, verbose={})",
        app.config().debug,
        app.config().ui.verbose
    );

    if args.command.is_empty() {
        println!("Portal CLI v{}", env!("CARGO_PKG_VERSION"));
        app.run_interactive().await?;
    } else {
        let cmd = args.command.join(" ");
        let exit_code = app.run_command(&cmd).await?;
        if exit_code != 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver_in(dir: &std::path::Path, overrides: CliOverrides) -> CliConfigResolver {
        CliConfigResolver {
            project_root: dir.to_path_buf(),
            global_config: Some(dir.join("global.toml")),
            overrides,
        }
    }

    fn write_project_config(dir: &std::path::Path, content: &str) {
        let config_dir = dir.join(".portal");
        std::fs::create_dir_all(&config_dir).expect("create .portal dir");
        std::fs::write(config_dir.join("config.toml"), content).expect("write project config");
    }

    #[test]
    fn args_parse_trailing_command() {
        let args = Args::parse_from(["portal", "-C", "/tmp/p", "login", "a@b", "pw;", "whoami"]);
        assert_eq!(args.project, Some(PathBuf::from("/tmp/p")));
        assert_eq!(args.command.join(" "), "login a@b pw; whoami");
        assert!(!args.debug);
    }

    #[test]
    fn args_map_timing_flags_to_overrides() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let args = Args::parse_from([
            "portal",
            "--step-up-timeout-ms",
            "250",
            "--chat-latency-ms",
            "0",
            "whoami",
        ]);
        let mut resolver = CliConfigResolver::from_args(&args);
        resolver.project_root = dir.path().to_path_buf();
        resolver.global_config = Some(dir.path().join("global.toml"));

        let config = resolver.resolve().expect("resolve");
        assert_eq!(config.step_up.verify_timeout_ms, 250);
        assert_eq!(config.chat.reply_latency_ms, 0);
        assert!(!config.debug);
    }

    #[test]
    fn resolve_defaults_no_overrides() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = resolver_in(dir.path(), CliOverrides::default())
            .resolve()
            .expect("resolve");

        assert!(!config.debug);
        assert!(!config.ui.verbose);
    }

    #[test]
    fn resolve_reads_project_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_project_config(dir.path(), "[step_up]\nverify_latency_ms = 5\n");

        let config = resolver_in(dir.path(), CliOverrides::default())
            .resolve()
            .expect("resolve");

        assert_eq!(config.step_up.verify_latency_ms, 5);
    }

    #[test]
    fn cli_overrides_win_over_files() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_project_config(dir.path(), "[step_up]\nverify_latency_ms = 5\n");

        let overrides = CliOverrides::from_switches(true, false)
            .with_verify_latency(Some(Duration::from_millis(1)));
        let config = resolver_in(dir.path(), overrides)
            .resolve()
            .expect("resolve");

        assert!(config.debug);
        assert_eq!(config.step_up.verify_latency_ms, 1);
    }

    #[test]
    fn broken_project_config_fails() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_project_config(dir.path(), "this is not toml = = =");

        assert!(resolver_in(dir.path(), CliOverrides::default()).resolve().is_err());
    }
}
