//! Access-control primitives for the Work On portal.
//!
//! This crate decides *who may see what*. It holds no session and performs
//! no I/O; `portal-runtime` owns the session and drives the state machine.
//!
//! # Layered Access Model
//!
//! ```text
//! Visible = Role capability (CEILING) ∩ Department scope (WHICH) ∩ Step-up (WHEN)
//! ```
//!
//! | Layer | Type | Controls |
//! |-------|------|----------|
//! | [`Capability`] | Bitflags | Static grants per role (admin panel, legal center, financials, full metrics) |
//! | [`DepartmentScope`] | Enum | Which departments a role sees: all, subscribed only, none |
//! | [`StepUpState`] | State machine | Whether the session re-authenticated for the legal center |
//!
//! All layers must permit access. Deny wins.
//!
//! # Crate Architecture
//!
//! ```text
//! portal-types (Role, DepartmentId, View, UserIdentity)
//!     ↑
//! portal-auth  ◄── THIS CRATE
//!     (capabilities, visibility, StepUpState, IdentityResolver, SecretVerifier)
//!     ↑
//! portal-runtime (SessionController, router, DirectoryResolver, DelayedSecretVerifier)
//! ```
//!
//! # Design Principles
//!
//! - **Trait definitions here, implementations in consumers**: identity
//!   resolution and secret verification are [`IdentityResolver`] and
//!   [`SecretVerifier`]; the runtime ships mock implementations that a real
//!   identity provider replaces without touching the state machine.
//! - **Table, not branches**: every role difference is a row of the
//!   [`capabilities`] table.
//! - **Fail closed**: no error path ever widens what a session can see.

pub mod capability;
pub mod error;
pub mod provider;
pub mod step_up;
pub mod visibility;

pub use capability::{capabilities, Capability, DepartmentScope, RoleCapabilities};
pub use error::AuthError;
pub use provider::{IdentityResolver, SecretVerifier};
pub use step_up::{ChallengeId, StepUpPhase, StepUpState};
pub use visibility::{
    department_access, is_department_visible, is_financial_data_visible, is_metric_detail_visible,
    DepartmentAccess,
};

pub use portal_types::{DepartmentId, DepartmentSet, Role, UserIdentity, View};
