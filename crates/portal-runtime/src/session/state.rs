//! Per-login session state.

use chrono::{DateTime, Utc};
use portal_auth::{StepUpPhase, StepUpState};
use portal_types::{DepartmentId, DepartmentSet, Role, UserIdentity, View};
use serde::Serialize;
use uuid::Uuid;

/// One authenticated interaction.
///
/// Created on successful login and dropped on logout. Fields are only
/// mutated through [`SessionController`](super::SessionController)
/// operations; rendering code receives a [`SessionSnapshot`].
///
/// # Legal Access
///
/// There is no stored legal-access flag. [`legal_access`](Self::legal_access)
/// reads the step-up state, so the flag cannot drift from the state
/// machine and starts `false` in every session.
///
/// # Why No Default?
///
/// **DO NOT implement `Default` for Session.**
///
/// A session requires a resolved [`UserIdentity`]. There is no sensible
/// default identity. Always construct with [`Session::new`].
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    identity: UserIdentity,
    view: View,
    subscriptions: DepartmentSet,
    step_up: StepUpState,
    started_at: DateTime<Utc>,
}

impl Session {
    /// Creates a fresh session: dashboard view, default subscriptions,
    /// unchallenged step-up.
    #[must_use]
    pub fn new(identity: UserIdentity) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity,
            view: View::default(),
            subscriptions: DepartmentSet::DEFAULT_SUBSCRIPTIONS,
            step_up: StepUpState::default(),
            started_at: Utc::now(),
        }
    }

    /// Session id (fresh per login).
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Who is logged in.
    #[must_use]
    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    /// Shorthand for `identity().role()`.
    #[must_use]
    pub fn role(&self) -> Role {
        self.identity.role()
    }

    /// Current view.
    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    /// Department subscriptions.
    #[must_use]
    pub fn subscriptions(&self) -> DepartmentSet {
        self.subscriptions
    }

    /// Step-up state.
    #[must_use]
    pub fn step_up(&self) -> &StepUpState {
        &self.step_up
    }

    /// `true` only after a successful step-up in this session.
    #[must_use]
    pub fn legal_access(&self) -> bool {
        self.step_up.is_verified()
    }

    /// Login time.
    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub(crate) fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub(crate) fn subscriptions_mut(&mut self) -> &mut DepartmentSet {
        &mut self.subscriptions
    }

    pub(crate) fn step_up_mut(&mut self) -> &mut StepUpState {
        &mut self.step_up
    }

    /// Read-only copy for presentation.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            name: self.identity.name().to_string(),
            email: self.identity.email().to_string(),
            role: self.role(),
            view: self.view,
            subscriptions: self.subscriptions.departments().collect(),
            step_up: self.step_up.phase(),
            legal_access: self.legal_access(),
            started_at: self.started_at,
        }
    }
}

/// Read-only view of a [`Session`] handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// Session id.
    pub session_id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Role.
    pub role: Role,
    /// Current view.
    pub view: View,
    /// Subscribed departments, in catalog order.
    pub subscriptions: Vec<DepartmentId>,
    /// Step-up phase.
    pub step_up: StepUpPhase,
    /// Legal-access flag.
    pub legal_access: bool,
    /// Login time.
    pub started_at: DateTime<Utc>,
}
