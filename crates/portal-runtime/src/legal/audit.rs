//! Legal-center access audit trail.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use portal_auth::AuthError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;
use uuid::Uuid;

/// What was done to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    /// Opened for reading.
    View,
    /// Downloaded.
    Download,
    /// Added to the center.
    Upload,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::View => "view",
            Self::Download => "download",
            Self::Upload => "upload",
        })
    }
}

/// One recorded access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Session that performed the access.
    pub session_id: Uuid,
    /// Display name of the user.
    pub user: String,
    /// Login email of the user.
    pub email: String,
    /// Document id.
    pub document_id: u32,
    /// Document title at access time.
    pub document_name: String,
    /// Action.
    pub action: AuditAction,
    /// When it happened.
    pub at: DateTime<Utc>,
}

/// Receives access records.
///
/// A failed `record_access` must fail the access itself: the controller
/// never returns a document whose access was not recorded.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Records one access.
    async fn record_access(&self, entry: &AuditEntry) -> Result<(), AuthError>;

    /// Recorded entries, oldest first.
    async fn entries(&self) -> Result<Vec<AuditEntry>, AuthError>;
}

/// Audit sink that keeps entries in memory.
///
/// Every entry is also emitted as an `info` event so it reaches the log.
#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    entries: Mutex<Vec<AuditEntry>>,
}

impl InMemoryAuditLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[async_trait]
impl AuditSink for InMemoryAuditLog {
    async fn record_access(&self, entry: &AuditEntry) -> Result<(), AuthError> {
        info!(
            session_id = %entry.session_id,
            user = %entry.email,
            document_id = entry.document_id,
            action = %entry.action,
            "legal document access"
        );
        self.entries.lock().push(entry.clone());
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<AuditEntry>, AuthError> {
        Ok(self.entries.lock().clone())
    }
}
