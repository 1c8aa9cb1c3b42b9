//! Portal Runtime - session ownership and access enforcement.
//!
//! `portal-auth` says *who may see what*; this crate holds the session and
//! enforces it on every operation.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  portal-types : Role, DepartmentId, View, UserIdentity      │
//! │  portal-auth  : capabilities, visibility, StepUpState,      │
//! │                 IdentityResolver, SecretVerifier            │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Runtime Layer (THIS CRATE)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  session/   : Session, SessionController                    │
//! │  router     : navigate → Allowed | NeedsStepUp | Forbidden  │
//! │  dashboard  : per-department panel projection               │
//! │  legal/     : DocumentStore, AuditSink                      │
//! │  admin      : user directory, role matrix, activity log     │
//! │  chat       : ChatResponder gate                            │
//! │  providers  : mock identity + step-up providers             │
//! │  config/    : layered TOML configuration                    │
//! │  io/        : text command parser                           │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │  portal-app (PortalApp, AppError) → portal-cli (binary)     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Control Flow
//!
//! A view change enters [`SessionController::navigate`], which asks the
//! [`router`] for a decision against the current session. `NeedsStepUp`
//! opens a challenge; [`SessionController::submit_secret`] resolves it
//! through the configured [`SecretVerifier`](portal_auth::SecretVerifier).
//! Once a view is allowed, presentation asks for a
//! [`DashboardLayout`](dashboard::DashboardLayout) instead of evaluating
//! role rules itself.
//!
//! # Example
//!
//! ```
//! use portal_runtime::{Route, SessionController};
//! use portal_types::View;
//!
//! # let rt = tokio::runtime::Runtime::new().unwrap();
//! # rt.block_on(async {
//! let controller = SessionController::builder().build();
//! controller.login("juridico@company.com", "pw").await.unwrap();
//!
//! assert_eq!(controller.navigate(View::Legal), Ok(Route::NeedsStepUp));
//! assert_eq!(controller.submit_secret("pw").await, Ok(View::Legal));
//! assert_eq!(controller.navigate(View::Legal), Ok(Route::Allowed(View::Legal)));
//! # });
//! ```

pub mod admin;
pub mod chat;
pub mod config;
pub mod dashboard;
pub mod io;
pub mod legal;
pub mod providers;
pub mod router;
pub mod session;

pub use admin::{
    AccountStatus, AdminDirectory, EventKind, InMemoryAdminDirectory, RoleSummary, SystemEvent,
    UserRecord,
};
pub use chat::{ChatResponder, ScriptedResponder};
pub use config::{ConfigError, ConfigLoader, PortalConfig};
pub use dashboard::{DashboardLayout, DepartmentPanel};
pub use io::{InputCommand, InputParser};
pub use legal::{
    AuditAction, AuditEntry, AuditSink, Document, DocumentFilter, DocumentStatus, DocumentStore,
    InMemoryAuditLog, InMemoryDocumentStore, NewDocument,
};
pub use providers::{DelayedSecretVerifier, DirectoryResolver};
pub use router::{NavEntry, Route};
pub use session::{Session, SessionController, SessionControllerBuilder, SessionSnapshot};
