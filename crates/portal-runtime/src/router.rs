//! View router: decides whether a requested view renders.
//!
//! # Decision Order
//!
//! ```text
//! target == admin ∧ ¬ADMIN_PANEL   ──► Forbidden
//! target == legal ∧ ¬LEGAL_CENTER  ──► Forbidden
//! target == legal ∧ ¬legal_access  ──► NeedsStepUp
//! otherwise                        ──► Allowed(target)
//! ```
//!
//! The order matters: a role that is not legal-eligible gets `Forbidden`
//! and never a step-up dialog, whatever its flag says. The role check runs
//! on every decision, so a verified step-up alone never opens the legal
//! center.

use crate::session::Session;
use portal_auth::{capabilities, AuthError};
use portal_types::{Role, View};
use serde::Serialize;
use tracing::{debug, warn};

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "route", content = "view")]
pub enum Route {
    /// The view renders.
    Allowed(View),
    /// Open the step-up challenge; the view does not change yet.
    NeedsStepUp,
    /// The role may never see the view; stay where you are.
    Forbidden,
}

impl Route {
    /// Returns the target view if allowed.
    #[must_use]
    pub fn allowed_view(&self) -> Option<View> {
        match self {
            Self::Allowed(view) => Some(*view),
            Self::NeedsStepUp | Self::Forbidden => None,
        }
    }

    /// Converts to the error taxonomy: `NeedsStepUp` and `Forbidden`
    /// become [`AuthError`]s naming `target`.
    ///
    /// # Errors
    ///
    /// [`AuthError::NeedsStepUp`] or [`AuthError::Forbidden`].
    pub fn into_result(self, target: View) -> Result<View, AuthError> {
        match self {
            Self::Allowed(view) => Ok(view),
            Self::NeedsStepUp => Err(AuthError::NeedsStepUp),
            Self::Forbidden => Err(AuthError::Forbidden { view: target }),
        }
    }
}

/// Pure routing decision over role and legal-access flag.
///
/// # Example
///
/// ```
/// use portal_runtime::router::{decide, Route};
/// use portal_types::{Role, View};
///
/// assert_eq!(decide(Role::Manager, false, View::Admin), Route::Forbidden);
/// assert_eq!(decide(Role::Legal, false, View::Legal), Route::NeedsStepUp);
/// assert_eq!(decide(Role::Legal, true, View::Legal), Route::Allowed(View::Legal));
/// ```
#[must_use]
pub fn decide(role: Role, legal_access: bool, target: View) -> Route {
    let caps = capabilities(role);
    match target {
        View::Admin if !caps.can_view_admin_panel() => Route::Forbidden,
        View::Legal if !caps.can_view_legal_center() => Route::Forbidden,
        View::Legal if !legal_access => Route::NeedsStepUp,
        _ => Route::Allowed(target),
    }
}

/// Routes a request for `target` from `session`, with audit logging.
///
/// Does not mutate the session; the controller applies the outcome.
#[must_use]
pub fn navigate(session: &Session, target: View) -> Route {
    let role = session.role();
    let route = decide(role, session.legal_access(), target);

    match route {
        Route::Allowed(view) => {
            debug!(
                session_id = %session.id(),
                role = %role,
                from = %session.view(),
                to = %view,
                "navigation allowed"
            );
        }
        Route::NeedsStepUp => {
            debug!(
                session_id = %session.id(),
                role = %role,
                target = %target,
                "navigation needs step-up"
            );
        }
        Route::Forbidden => {
            warn!(
                session_id = %session.id(),
                role = %role,
                target = %target,
                "navigation forbidden"
            );
        }
    }

    route
}

/// A navigation menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    /// Target view.
    pub view: View,
    /// Entry requires step-up before it renders.
    pub restricted: bool,
}

/// Views a role can navigate to, in menu order.
///
/// Forbidden views are omitted. The legal center is listed for eligible
/// roles and flagged `restricted`, since entering it still needs step-up.
#[must_use]
pub fn reachable_views(role: Role) -> Vec<NavEntry> {
    View::ALL
        .into_iter()
        .filter(|view| decide(role, true, *view) != Route::Forbidden)
        .map(|view| NavEntry {
            view,
            restricted: view == View::Legal,
        })
        .collect()
}
