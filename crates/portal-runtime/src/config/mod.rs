//! Configuration management with hierarchical layering.
//!
//! # Architecture
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌───────────────────────────────────────────┐
//! │  1. Environment Variables (PORTAL_*)      │  Runtime override
//! ├───────────────────────────────────────────┤
//! │  2. Project Config (.portal/config.toml)  │  Deployment-specific
//! ├───────────────────────────────────────────┤
//! │  3. Global Config (~/.portal/config.toml) │  User defaults
//! ├───────────────────────────────────────────┤
//! │  4. Default Values (compile-time)         │  Fallback
//! └───────────────────────────────────────────┘
//! ```
//!
//! Configuration only tunes the mock providers and output. Nothing here can
//! widen what a role is allowed to see: the capability table is compiled in.
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `PORTAL_DEBUG` | `debug` | bool |
//! | `PORTAL_VERBOSE` | `ui.verbose` | bool |
//! | `PORTAL_STEP_UP_LATENCY_MS` | `step_up.verify_latency_ms` | u64 |
//! | `PORTAL_STEP_UP_TIMEOUT_MS` | `step_up.verify_timeout_ms` | u64 |
//! | `PORTAL_CHAT_LATENCY_MS` | `chat.reply_latency_ms` | u64 |
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.portal/config.toml
//! debug = false
//!
//! [step_up]
//! verify_latency_ms = 1000
//! verify_timeout_ms = 10000
//!
//! [chat]
//! reply_latency_ms = 1500
//!
//! [[directory.users]]
//! pattern = "admin"
//! name = "Ana Silva"
//! role = "admin"
//!
//! [ui]
//! verbose = false
//! ```

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::{ChatConfig, DirectoryConfig, DirectoryUser, PortalConfig, StepUpConfig, UiConfig};

/// Default global config directory.
#[must_use]
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".portal")
}

/// Default global config file path.
#[must_use]
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join("config.toml")
}

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".portal";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";
