//! Core identity types for the Work On portal.
//!
//! This crate holds the closed vocabularies every other portal crate speaks:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Role`] | Fixed identity category, ceiling of a session's permissions |
//! | [`DepartmentId`] | Business unit identifier from a closed catalog |
//! | [`DepartmentSet`] | Duplicate-free set of departments (subscriptions) |
//! | [`View`] | Top-level screen of the portal |
//! | [`UserIdentity`] | Resolved identity (name, email, role) |
//! | [`ErrorCode`] | Unified error code interface |
//!
//! # Crate Architecture
//!
//! ```text
//! portal-types  ◄── THIS CRATE (Role, DepartmentId, View, UserIdentity)
//!     ↑
//! portal-auth   (capabilities, visibility, step-up, provider traits)
//!     ↑
//! portal-runtime (session controller, router, legal center, config)
//!     ↑
//! portal-app → portal-cli
//! ```
//!
//! No permission logic lives here. Which role may see what is decided in
//! `portal-auth`.

pub mod department;
pub mod error;
pub mod identity;
pub mod role;
pub mod view;

pub use department::{Department, DepartmentId, DepartmentSet, UnknownDepartment, CATALOG};
pub use error::{assert_error_code, ErrorCode};
pub use identity::UserIdentity;
pub use role::{Role, UnknownRole};
pub use view::{UnknownView, View};
