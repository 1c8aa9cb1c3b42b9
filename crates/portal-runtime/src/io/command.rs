//! Parsed user commands.

use crate::admin::EventKind;
use portal_types::{DepartmentId, View};

/// A command from the text surface.
///
/// Produced by [`InputParser`](super::InputParser); executed by the
/// application layer against a session controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Log in with credentials.
    Login {
        /// Login email.
        email: String,
        /// Password (rest of line).
        password: String,
    },

    /// End the session.
    Logout,

    /// Navigate to a view.
    Go {
        /// Target view.
        view: View,
    },

    /// Submit a step-up secret.
    Verify {
        /// Secret (rest of line, may be blank).
        secret: String,
    },

    /// Cancel the step-up challenge.
    Cancel,

    /// Toggle one department subscription.
    Toggle {
        /// Department to flip.
        department: DepartmentId,
    },

    /// Replace all subscriptions.
    Subscribe {
        /// New subscription list. Empty clears every subscription.
        departments: Vec<DepartmentId>,
    },

    /// Show the session.
    WhoAmI,

    /// Show the dashboard.
    Dashboard,

    /// Show the navigation menu.
    Nav,

    /// List legal documents.
    Docs {
        /// Optional search term.
        search: Option<String>,
        /// Owning unit (`--dept`).
        department: Option<String>,
        /// Category (`--category`).
        category: Option<String>,
    },

    /// View a legal document.
    Open {
        /// Document id.
        id: u32,
    },

    /// Download a legal document.
    Download {
        /// Document id.
        id: u32,
    },

    /// Upload a file to the legal center.
    Upload {
        /// Document title.
        name: String,
        /// Owning unit.
        department: String,
        /// Category.
        category: String,
        /// Version label, if given.
        version: Option<String>,
        /// Path of the file to upload.
        file: String,
    },

    /// Show the legal-center audit trail.
    Audit,

    /// List directory accounts (admin panel).
    Users {
        /// Optional name or email search.
        search: Option<String>,
    },

    /// Show the permission matrix (admin panel).
    Roles,

    /// Show the system activity log (admin panel).
    Log {
        /// Only this kind; all when `None`.
        kind: Option<EventKind>,
    },

    /// Send a chat message.
    Chat {
        /// Message text.
        message: String,
    },

    /// Show help.
    Help,

    /// Leave the interactive loop.
    Quit,

    /// Empty input (blank line).
    ///
    /// Distinct from Unknown - indicates user pressed Enter without input.
    Empty,

    /// Known command with bad or missing arguments.
    Invalid {
        /// The original input line.
        input: String,
        /// What was wrong.
        reason: String,
    },

    /// Unknown command.
    Unknown {
        /// The original input line.
        input: String,
    },
}

impl InputCommand {
    /// Returns `true` for [`InputCommand::Quit`].
    #[must_use]
    pub fn is_quit(&self) -> bool {
        matches!(self, Self::Quit)
    }

    /// Returns `true` if the command carries a credential.
    ///
    /// Such commands must not be echoed or logged verbatim.
    #[must_use]
    pub fn carries_secret(&self) -> bool {
        matches!(self, Self::Login { .. } | Self::Verify { .. })
    }
}
