//! Configuration types.
//!
//! All types implement [`Default`] for compile-time fallback values.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure.
///
/// This is the unified configuration after merging all layers.
///
/// # Example
///
/// ```
/// use portal_runtime::config::PortalConfig;
///
/// let config = PortalConfig::default();
/// assert!(!config.debug);
/// assert_eq!(config.step_up.verify_latency_ms, 1000);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PortalConfig {
    /// Enable debug mode (verbose logging).
    pub debug: bool,

    /// Step-up verification settings.
    pub step_up: StepUpConfig,

    /// Chat assistant settings.
    pub chat: ChatConfig,

    /// Mock identity directory.
    pub directory: DirectoryConfig,

    /// UI settings.
    pub ui: UiConfig,
}

impl PortalConfig {
    /// Creates a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes to TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Merges another config into this one.
    ///
    /// Values from `other` override values in `self` only if they
    /// differ from the default.
    pub fn merge(&mut self, other: &Self) {
        if other.debug {
            self.debug = true;
        }

        self.step_up.merge(&other.step_up);
        self.chat.merge(&other.chat);
        self.directory.merge(&other.directory);
        self.ui.merge(&other.ui);
    }
}

/// Step-up verification configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StepUpConfig {
    /// Simulated latency of the mock verifier (ms).
    pub verify_latency_ms: u64,

    /// Upper bound on a verification call before it is abandoned (ms).
    pub verify_timeout_ms: u64,
}

impl Default for StepUpConfig {
    fn default() -> Self {
        Self {
            verify_latency_ms: 1000,
            verify_timeout_ms: 10_000,
        }
    }
}

impl StepUpConfig {
    fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.verify_latency_ms != default.verify_latency_ms {
            self.verify_latency_ms = other.verify_latency_ms;
        }
        if other.verify_timeout_ms != default.verify_timeout_ms {
            self.verify_timeout_ms = other.verify_timeout_ms;
        }
    }

    /// Verifier latency as a [`Duration`].
    #[must_use]
    pub fn verify_latency(&self) -> Duration {
        Duration::from_millis(self.verify_latency_ms)
    }

    /// Verification timeout as a [`Duration`].
    #[must_use]
    pub fn verify_timeout(&self) -> Duration {
        Duration::from_millis(self.verify_timeout_ms)
    }
}

/// Chat assistant configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChatConfig {
    /// Simulated latency of the scripted responder (ms).
    pub reply_latency_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_latency_ms: 1500,
        }
    }
}

impl ChatConfig {
    fn merge(&mut self, other: &Self) {
        if other.reply_latency_ms != Self::default().reply_latency_ms {
            self.reply_latency_ms = other.reply_latency_ms;
        }
    }

    /// Reply latency as a [`Duration`].
    #[must_use]
    pub fn reply_latency(&self) -> Duration {
        Duration::from_millis(self.reply_latency_ms)
    }
}

/// Mock identity directory.
///
/// An empty `users` list means the built-in demo directory.
///
/// ```toml
/// [[directory.users]]
/// pattern = "ana"
/// name = "Ana Silva"
/// role = "admin"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Directory entries, matched in order.
    pub users: Vec<DirectoryUser>,
}

impl DirectoryConfig {
    fn merge(&mut self, other: &Self) {
        if !other.users.is_empty() {
            self.users.clone_from(&other.users);
        }
    }
}

/// One mock directory entry.
///
/// `role` is kept as a label so that an unknown role surfaces as
/// `InvalidRole` at login, not as a config parse failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryUser {
    /// Substring of the email that selects this entry.
    pub pattern: String,
    /// Display name.
    pub name: String,
    /// Role label.
    pub role: String,
}

/// UI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Verbose output.
    pub verbose: bool,
}

impl UiConfig {
    fn merge(&mut self, other: &Self) {
        if other.verbose {
            self.verbose = true;
        }
    }
}
