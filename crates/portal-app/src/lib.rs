//! Portal Application Layer.
//!
//! This crate provides the application layer that sits between the
//! CLI frontend and the runtime.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Frontend Layer                           │
//! │  portal-cli (binary): clap, tracing-subscriber              │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Application Layer (THIS CRATE)              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  PortalApp     : command execution, text rendering          │
//! │  CliOverrides  : highest-priority config layer              │
//! │  AppError      : unified error type                         │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Runtime Layer                           │
//! │  portal-runtime : SessionController, router, config, io     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Error Handling Strategy
//!
//! ```text
//! AuthError ──────┐
//!                 │
//! ConfigError ────┼──► AppError ──► CLI (stderr + exit code)
//!                 │
//! io::Error ──────┘
//! ```
//!
//! Error codes pass through unchanged: an `AuthError::Forbidden` surfaces
//! as `AUTH_FORBIDDEN`, not as an `APP_` code.
//!
//! # Example
//!
//! ```
//! use portal_app::PortalApp;
//! use portal_runtime::PortalConfig;
//!
//! # let rt = tokio::runtime::Runtime::new().unwrap();
//! # rt.block_on(async {
//! let mut config = PortalConfig::default();
//! config.step_up.verify_latency_ms = 0;
//! let app = PortalApp::builder(config).build();
//!
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = app
//!     .run_command_with(
//!         "login juridico@company.com pw; go legal; verify pw; docs",
//!         &mut out,
//!         &mut err,
//!     )
//!     .await
//!     .unwrap();
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("LGPD Policy"));
//! # });
//! ```

mod app;
mod cli_overrides;
mod error;

pub use app::{PortalApp, PortalAppBuilder, Reply};
pub use cli_overrides::CliOverrides;
pub use error::AppError;

// Re-export for CLI convenience
pub use portal_runtime::{ConfigError, ConfigLoader, PortalConfig};
