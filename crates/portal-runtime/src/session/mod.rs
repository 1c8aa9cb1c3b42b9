//! Session state and its controller.
//!
//! ```text
//! SessionController ── owns ──► Option<Session>
//!        │                        ├── identity (role immutable)
//!        │                        ├── view
//!        │                        ├── subscriptions
//!        │                        └── step_up ──► legal_access()
//!        │
//!        └── snapshot() ──► SessionSnapshot (read-only, presentation)
//! ```

mod controller;
mod state;

pub use controller::{SessionController, SessionControllerBuilder};
pub use state::{Session, SessionSnapshot};
