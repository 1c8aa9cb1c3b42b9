//! Top-level portal views.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A top-level screen of the portal.
///
/// Not every view is reachable by every role. Reachability is decided by
/// the view router in `portal-runtime`; this type only names the screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Department dashboards. Initial view of every session.
    #[default]
    Dashboard,
    /// Personal settings (department subscriptions).
    Settings,
    /// Administration panel.
    Admin,
    /// Restricted legal document center.
    Legal,
}

impl View {
    /// Every view, in navigation order.
    pub const ALL: [View; 4] = [View::Dashboard, View::Settings, View::Admin, View::Legal];

    /// Returns the canonical identifier string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Settings => "settings",
            Self::Admin => "admin",
            Self::Legal => "legal",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A view name that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown view: '{0}'")]
pub struct UnknownView(pub String);

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" | "home" => Ok(Self::Dashboard),
            "settings" => Ok(Self::Settings),
            "admin" => Ok(Self::Admin),
            "legal" => Ok(Self::Legal),
            _ => Err(UnknownView(s.to_string())),
        }
    }
}
