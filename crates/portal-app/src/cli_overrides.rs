//! Command-line overrides: the last configuration layer.
//!
//! The binary only has switches that turn something on (`--debug`,
//! `--verbose`) and millisecond values for the simulated providers. An
//! absent switch therefore never lowers a value that files or `PORTAL_*`
//! variables already set.

use portal_runtime::PortalConfig;
use std::time::Duration;

/// Overrides taken from command-line arguments.
///
/// # Example
///
/// ```
/// use portal_app::CliOverrides;
/// use portal_runtime::PortalConfig;
/// use std::time::Duration;
///
/// let mut config = PortalConfig::default();
/// config.debug = true; // e.g. from PORTAL_DEBUG
///
/// CliOverrides::from_switches(false, true)
///     .with_verify_latency(Some(Duration::from_millis(50)))
///     .apply(&mut config);
///
/// assert!(config.debug, "no --debug keeps the environment value");
/// assert!(config.ui.verbose);
/// assert_eq!(config.step_up.verify_latency_ms, 50);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliOverrides {
    debug: bool,
    verbose: bool,
    verify_latency: Option<Duration>,
    verify_timeout: Option<Duration>,
    chat_latency: Option<Duration>,
}

impl CliOverrides {
    /// Overrides from the `--debug` and `--verbose` switches.
    #[must_use]
    pub fn from_switches(debug: bool, verbose: bool) -> Self {
        Self {
            debug,
            verbose,
            ..Self::default()
        }
    }

    /// Simulated identity-confirmation latency (`--step-up-latency-ms`).
    #[must_use]
    pub fn with_verify_latency(mut self, latency: Option<Duration>) -> Self {
        self.verify_latency = latency.or(self.verify_latency);
        self
    }

    /// Identity-confirmation timeout (`--step-up-timeout-ms`).
    #[must_use]
    pub fn with_verify_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.verify_timeout = timeout.or(self.verify_timeout);
        self
    }

    /// Simulated assistant reply latency (`--chat-latency-ms`).
    #[must_use]
    pub fn with_chat_latency(mut self, latency: Option<Duration>) -> Self {
        self.chat_latency = latency.or(self.chat_latency);
        self
    }

    /// Returns `true` if applying would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Writes the overrides into `config`.
    pub fn apply(&self, config: &mut PortalConfig) {
        config.debug |= self.debug;
        config.ui.verbose |= self.verbose;

        if let Some(latency) = self.verify_latency {
            config.step_up.verify_latency_ms = millis(latency);
        }
        if let Some(timeout) = self.verify_timeout {
            config.step_up.verify_timeout_ms = millis(timeout);
        }
        if let Some(latency) = self.chat_latency {
            config.chat.reply_latency_ms = millis(latency);
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
