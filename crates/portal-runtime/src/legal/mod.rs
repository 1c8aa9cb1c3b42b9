//! Legal document center.
//!
//! # Access
//!
//! ```text
//! SessionController::view_document(id)
//!   │
//!   ├── role not legal-eligible ───► Forbidden
//!   ├── step-up not Verified ──────► NeedsStepUp
//!   │
//!   ├── DocumentStore::document(id)
//!   ├── AuditSink::record_access(entry)   <- before the document is returned
//!   └── Ok(document)
//! ```
//!
//! Uploads pass the same gate, are validated ([`NewDocument::validate`]),
//! stored, and recorded as [`AuditAction::Upload`].
//!
//! Stores and sinks are traits so a real document service and audit
//! backend can replace the in-memory ones.

mod audit;
mod document;

pub use audit::{AuditAction, AuditEntry, AuditSink, InMemoryAuditLog};
pub use document::{
    Document, DocumentFilter, DocumentStatus, DocumentStore, InMemoryDocumentStore, NewDocument,
    MAX_UPLOAD_BYTES, UPLOAD_CATEGORIES, UPLOAD_DEPARTMENTS, UPLOAD_FILE_TYPES,
};
