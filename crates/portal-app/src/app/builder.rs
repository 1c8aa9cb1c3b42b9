//! Builder for [`PortalApp`].

use super::PortalApp;
use portal_runtime::{PortalConfig, SessionController};
use tracing::debug;

/// Builder for [`PortalApp`].
///
/// Takes the already resolved configuration (files, env, CLI overrides).
/// The session controller is built from it unless one is supplied.
///
/// # Example
///
/// ```
/// use portal_app::PortalApp;
/// use portal_runtime::{PortalConfig, SessionController};
///
/// let app = PortalApp::builder(PortalConfig::default())
///     .with_controller(SessionController::builder().build())
///     .build();
/// assert!(!app.controller().is_authenticated());
/// ```
#[derive(Debug)]
pub struct PortalAppBuilder {
    config: PortalConfig,
    controller: Option<SessionController>,
}

impl PortalAppBuilder {
    /// Creates a builder for `config`.
    #[must_use]
    pub fn new(config: PortalConfig) -> Self {
        Self {
            config,
            controller: None,
        }
    }

    /// Uses `controller` instead of one built from the configuration.
    #[must_use]
    pub fn with_controller(mut self, controller: SessionController) -> Self {
        self.controller = Some(controller);
        self
    }

    /// Builds the application.
    #[must_use]
    pub fn build(self) -> PortalApp {
        let controller = match self.controller {
            Some(controller) => controller,
            None => {
                debug!(
                    verify_latency_ms = self.config.step_up.verify_latency_ms,
                    verify_timeout_ms = self.config.step_up.verify_timeout_ms,
                    directory_users = self.config.directory.users.len(),
                    "building session controller from config"
                );
                SessionController::from_config(&self.config)
            }
        };

        PortalApp {
            config: self.config,
            controller,
        }
    }
}
