//! Legal documents and the document store.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use portal_auth::AuthError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::info;

/// Owning units an upload may be filed under.
pub const UPLOAD_DEPARTMENTS: &[&str] = &[
    "HR",
    "Finance",
    "Sales",
    "Operations",
    "Legal",
    "Compliance",
];

/// Categories an upload may be filed under.
pub const UPLOAD_CATEGORIES: &[&str] =
    &["Contracts", "Policies", "Powers of Attorney", "Licenses"];

/// Accepted file types, matched against the file extension.
pub const UPLOAD_FILE_TYPES: &[&str] = &["PDF", "DOCX", "XLSX"];

/// Largest accepted upload (10 MB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const DEFAULT_UPLOAD_VERSION: &str = "v1.0";

/// Lifecycle status of a legal document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// In force.
    Active,
    /// Superseded, kept for the record.
    Archived,
    /// Being revised.
    Review,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Review => "review",
        })
    }
}

/// A document in the legal center.
///
/// `department` is the owning business unit as written on the document
/// (e.g. "Compliance"), not a dashboard department id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Store id.
    pub id: u32,
    /// Title.
    pub name: String,
    /// Owning unit.
    pub department: String,
    /// Category (contracts, policies, ...).
    pub category: String,
    /// Version label.
    pub version: String,
    /// Upload date.
    pub uploaded_on: NaiveDate,
    /// Uploader display name.
    pub uploaded_by: String,
    /// Human-readable size.
    pub size: String,
    /// Lifecycle status.
    pub status: DocumentStatus,
    /// File type label (PDF, DOCX).
    pub file_type: String,
}

/// Document listing filter.
///
/// `None` fields match everything. An empty search matches everything.
///
/// # Example
///
/// ```
/// use portal_runtime::legal::DocumentFilter;
///
/// let filter = DocumentFilter::default()
///     .with_search("contract")
///     .with_category("Contracts");
/// assert_eq!(filter.search.as_deref(), Some("contract"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFilter {
    /// Case-insensitive substring of name or category.
    pub search: Option<String>,
    /// Exact owning unit (case-insensitive).
    pub department: Option<String>,
    /// Exact category (case-insensitive).
    pub category: Option<String>,
}

impl DocumentFilter {
    /// Sets the search term.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Restricts to one owning unit.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Restricts to one category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Returns `true` if `doc` passes every criterion.
    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        let search_ok = self.search.as_deref().map_or(true, |term| {
            let term = term.trim().to_lowercase();
            term.is_empty()
                || doc.name.to_lowercase().contains(&term)
                || doc.category.to_lowercase().contains(&term)
        });
        let department_ok = self
            .department
            .as_deref()
            .map_or(true, |d| d.eq_ignore_ascii_case(&doc.department));
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |c| c.eq_ignore_ascii_case(&doc.category));

        search_ok && department_ok && category_ok
    }
}

/// A document submitted for upload.
///
/// Department and category must name one of [`UPLOAD_DEPARTMENTS`] and
/// [`UPLOAD_CATEGORIES`] (case-insensitive); they are stored in their
/// canonical spelling. The file type comes from the extension of
/// `file_name`.
///
/// # Example
///
/// ```
/// use portal_runtime::legal::NewDocument;
///
/// let upload = NewDocument::new("Travel Policy", "compliance", "policies", "travel.pdf", 2048)
///     .with_version("v2.0");
/// assert!(upload.validate().is_ok());
/// assert_eq!(upload.file_type(), Some("PDF"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocument {
    /// Title.
    pub name: String,
    /// Owning unit.
    pub department: String,
    /// Category.
    pub category: String,
    /// Version label; `v1.0` when absent or blank.
    pub version: Option<String>,
    /// Original file name.
    pub file_name: String,
    /// File size in bytes.
    pub size_bytes: u64,
}

impl NewDocument {
    /// Creates an upload without a version label.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        department: impl Into<String>,
        category: impl Into<String>,
        file_name: impl Into<String>,
        size_bytes: u64,
    ) -> Self {
        Self {
            name: name.into(),
            department: department.into(),
            category: category.into(),
            version: None,
            file_name: file_name.into(),
            size_bytes,
        }
    }

    /// Sets the version label.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// File type label from the extension, `None` if not accepted.
    #[must_use]
    pub fn file_type(&self) -> Option<&'static str> {
        let ext = Path::new(&self.file_name).extension()?.to_str()?;
        canonical(UPLOAD_FILE_TYPES, ext)
    }

    /// Checks the upload without storing it.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidDocument`] naming the first bad field.
    pub fn validate(&self) -> Result<(), AuthError> {
        self.checked().map(|_| ())
    }

    /// Builds the stored document, active from `uploaded_on`.
    ///
    /// # Errors
    ///
    /// As [`validate`](Self::validate).
    pub fn into_document(
        self,
        id: u32,
        uploaded_by: impl Into<String>,
        uploaded_on: NaiveDate,
    ) -> Result<Document, AuthError> {
        let (department, category, file_type) = self.checked()?;
        let version = self
            .version
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_UPLOAD_VERSION.to_string());

        Ok(Document {
            id,
            name: self.name.trim().to_string(),
            department: department.to_string(),
            category: category.to_string(),
            version,
            uploaded_on,
            uploaded_by: uploaded_by.into(),
            size: format_size(self.size_bytes),
            status: DocumentStatus::Active,
            file_type: file_type.to_string(),
        })
    }

    fn checked(&self) -> Result<(&'static str, &'static str, &'static str), AuthError> {
        let invalid = |reason: String| AuthError::InvalidDocument(reason);

        if self.name.trim().is_empty() {
            return Err(invalid("a document name is required".into()));
        }
        let department = canonical(UPLOAD_DEPARTMENTS, &self.department)
            .ok_or_else(|| invalid(format!("unknown department '{}'", self.department.trim())))?;
        let category = canonical(UPLOAD_CATEGORIES, &self.category)
            .ok_or_else(|| invalid(format!("unknown category '{}'", self.category.trim())))?;
        let file_type = self.file_type().ok_or_else(|| {
            invalid(format!("'{}' is not a PDF, DOCX or XLSX file", self.file_name))
        })?;
        if self.size_bytes > MAX_UPLOAD_BYTES {
            return Err(invalid(format!("'{}' is larger than 10 MB", self.file_name)));
        }
        Ok((department, category, file_type))
    }
}

fn canonical(options: &[&'static str], value: &str) -> Option<&'static str> {
    let value = value.trim();
    options.iter().copied().find(|o| o.eq_ignore_ascii_case(value))
}

/// Formats a byte count the way the catalog shows sizes (`245 KB`, `1.2 MB`).
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    match bytes {
        b if b < KB => format!("{b} B"),
        b if b < MB => format!("{} KB", (b + KB / 2) / KB),
        b => format!("{:.1} MB", b as f64 / MB as f64),
    }
}

/// Source of legal documents.
///
/// The session controller only calls a store after the access check has
/// passed; stores do no access control of their own.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Documents matching `filter`, in store order.
    async fn list_documents(&self, filter: &DocumentFilter) -> Result<Vec<Document>, AuthError>;

    /// One document by id, `None` if absent.
    async fn document(&self, id: u32) -> Result<Option<Document>, AuthError>;

    /// Stores an upload under a new id and returns it.
    ///
    /// Read-only stores keep the default, which refuses every upload.
    async fn upload_document(
        &self,
        upload: NewDocument,
        _uploaded_by: &str,
        _uploaded_on: NaiveDate,
    ) -> Result<Document, AuthError> {
        Err(AuthError::Provider(format!(
            "document store does not accept uploads ('{}')",
            upload.name
        )))
    }
}

/// In-memory document store. Uploads get the next free id.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: Mutex<Vec<Document>>,
}

impl InMemoryDocumentStore {
    /// Store over the given documents.
    #[must_use]
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents: Mutex::new(documents),
        }
    }

    /// Store with the eight demo documents.
    #[must_use]
    pub fn seeded() -> Self {
        let documents = SEED
            .iter()
            .map(|s| Document {
                id: s.id,
                name: s.name.to_string(),
                department: s.department.to_string(),
                category: s.category.to_string(),
                version: s.version.to_string(),
                uploaded_on: NaiveDate::from_ymd_opt(s.date.0, s.date.1, s.date.2)
                    .unwrap_or_default(),
                uploaded_by: s.uploaded_by.to_string(),
                size: s.size.to_string(),
                status: s.status,
                file_type: s.file_type.to_string(),
            })
            .collect();
        Self::new(documents)
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.lock().len()
    }

    /// Returns `true` if the store holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.lock().is_empty()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn list_documents(&self, filter: &DocumentFilter) -> Result<Vec<Document>, AuthError> {
        Ok(self
            .documents
            .lock()
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect())
    }

    async fn document(&self, id: u32) -> Result<Option<Document>, AuthError> {
        Ok(self.documents.lock().iter().find(|d| d.id == id).cloned())
    }

    async fn upload_document(
        &self,
        upload: NewDocument,
        uploaded_by: &str,
        uploaded_on: NaiveDate,
    ) -> Result<Document, AuthError> {
        let mut documents = self.documents.lock();
        let id = documents.iter().map(|d| d.id).max().unwrap_or(0) + 1;
        let document = upload.into_document(id, uploaded_by, uploaded_on)?;
        info!(
            document_id = document.id,
            department = %document.department,
            category = %document.category,
            "document stored"
        );
        documents.push(document.clone());
        Ok(document)
    }
}

struct Seed {
    id: u32,
    name: &'static str,
    department: &'static str,
    category: &'static str,
    version: &'static str,
    date: (i32, u32, u32),
    uploaded_by: &'static str,
    size: &'static str,
    status: DocumentStatus,
    file_type: &'static str,
}

const SEED: &[Seed] = &[
    Seed {
        id: 1,
        name: "Employment Contract - 2025 Template",
        department: "HR",
        category: "Contracts",
        version: "v3.2",
        date: (2025, 11, 1),
        uploaded_by: "Dr. Ricardo Alves",
        size: "245 KB",
        status: DocumentStatus::Active,
        file_type: "PDF",
    },
    Seed {
        id: 2,
        name: "LGPD Policy - Personal Data Processing",
        department: "Compliance",
        category: "Policies",
        version: "v2.1",
        date: (2025, 10, 15),
        uploaded_by: "Dra. Marina Costa",
        size: "1.2 MB",
        status: DocumentStatus::Active,
        file_type: "PDF",
    },
    Seed {
        id: 3,
        name: "Supply Agreement - TechSupply Ltda",
        department: "Finance",
        category: "Contracts",
        version: "v1.5",
        date: (2025, 10, 20),
        uploaded_by: "Dr. Ricardo Alves",
        size: "512 KB",
        status: DocumentStatus::Active,
        file_type: "DOCX",
    },
    Seed {
        id: 4,
        name: "Power of Attorney - Legal Representation",
        department: "Legal",
        category: "Powers of Attorney",
        version: "v1.0",
        date: (2025, 9, 30),
        uploaded_by: "Dra. Marina Costa",
        size: "180 KB",
        status: DocumentStatus::Active,
        file_type: "PDF",
    },
    Seed {
        id: 5,
        name: "Environmental License - Headquarters",
        department: "Operations",
        category: "Licenses",
        version: "v4.0",
        date: (2025, 8, 10),
        uploaded_by: "Dr. Ricardo Alves",
        size: "3.5 MB",
        status: DocumentStatus::Active,
        file_type: "PDF",
    },
    Seed {
        id: 6,
        name: "Code of Conduct and Ethics",
        department: "Compliance",
        category: "Policies",
        version: "v5.1",
        date: (2025, 7, 22),
        uploaded_by: "Dra. Marina Costa",
        size: "890 KB",
        status: DocumentStatus::Active,
        file_type: "PDF",
    },
    Seed {
        id: 7,
        name: "Non-Disclosure Agreement - Partners",
        department: "Sales",
        category: "Contracts",
        version: "v2.3",
        date: (2025, 10, 5),
        uploaded_by: "Dr. Ricardo Alves",
        size: "320 KB",
        status: DocumentStatus::Active,
        file_type: "PDF",
    },
    Seed {
        id: 8,
        name: "Operating Permit 2024",
        department: "Operations",
        category: "Licenses",
        version: "v1.0",
        date: (2025, 1, 15),
        uploaded_by: "Dr. Ricardo Alves",
        size: "450 KB",
        status: DocumentStatus::Archived,
        file_type: "PDF",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    async fn list(filter: DocumentFilter) -> Vec<u32> {
        InMemoryDocumentStore::seeded()
            .list_documents(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect()
    }

    #[tokio::test]
    async fn seeded_store_has_eight_documents() {
        let store = InMemoryDocumentStore::seeded();
        assert_eq!(store.len(), 8);
        assert_eq!(list(DocumentFilter::default()).await, (1..=8).collect::<Vec<_>>());

        let permit = store.document(8).await.unwrap().unwrap();
        assert_eq!(permit.status, DocumentStatus::Archived);
        assert_eq!(permit.uploaded_on, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert!(store.document(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn search_matches_name_or_category() {
        assert_eq!(list(DocumentFilter::default().with_search("AGREEMENT")).await, vec![3, 7]);
        // "policies" only appears as a category
        assert_eq!(list(DocumentFilter::default().with_search("policies")).await, vec![2, 6]);
        assert_eq!(list(DocumentFilter::default().with_search("   ")).await.len(), 8);
    }

    #[tokio::test]
    async fn department_and_category_filters_combine() {
        assert_eq!(
            list(DocumentFilter::default().with_department("compliance")).await,
            vec![2, 6]
        );
        assert_eq!(
            list(
                DocumentFilter::default()
                    .with_department("Operations")
                    .with_category("Licenses")
                    .with_search("permit")
            )
            .await,
            vec![8]
        );
        assert!(list(DocumentFilter::default().with_category("Memos")).await.is_empty());
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 7).unwrap()
    }

    #[tokio::test]
    async fn upload_gets_next_id_and_canonical_labels() {
        let store = InMemoryDocumentStore::seeded();
        let upload = NewDocument::new(
            " Travel Policy ",
            "COMPLIANCE",
            "policies",
            "travel.Pdf",
            250_880,
        )
        .with_version("v2.0");

        let doc = store
            .upload_document(upload, "Dr. Ricardo Alves", today())
            .await
            .unwrap();

        assert_eq!(doc.id, 9);
        assert_eq!(doc.name, "Travel Policy");
        assert_eq!(doc.department, "Compliance");
        assert_eq!(doc.category, "Policies");
        assert_eq!(doc.version, "v2.0");
        assert_eq!(doc.file_type, "PDF");
        assert_eq!(doc.size, "245 KB");
        assert_eq!(doc.status, DocumentStatus::Active);
        assert_eq!(doc.uploaded_on, today());
        assert_eq!(store.len(), 9);

        // Visible to the department filter right away
        let compliance = store
            .list_documents(&DocumentFilter::default().with_department("compliance"))
            .await
            .unwrap();
        assert_eq!(compliance.iter().map(|d| d.id).collect::<Vec<_>>(), vec![2, 6, 9]);
    }

    #[tokio::test]
    async fn upload_defaults_version_and_formats_megabytes() {
        let store = InMemoryDocumentStore::new(Vec::new());
        let doc = store
            .upload_document(
                NewDocument::new("Budget", "finance", "contracts", "budget.xlsx", 1_258_291)
                    .with_version("  "),
                "Ana Silva",
                today(),
            )
            .await
            .unwrap();

        assert_eq!(doc.id, 1);
        assert_eq!(doc.version, "v1.0");
        assert_eq!(doc.size, "1.2 MB");
        assert_eq!(doc.file_type, "XLSX");
    }

    #[tokio::test]
    async fn rejected_upload_leaves_store_unchanged() {
        let store = InMemoryDocumentStore::seeded();
        let cases = [
            NewDocument::new("  ", "HR", "Contracts", "a.pdf", 1),
            NewDocument::new("Memo", "Marketing", "Contracts", "a.pdf", 1),
            NewDocument::new("Memo", "HR", "Memos", "a.pdf", 1),
            NewDocument::new("Memo", "HR", "Contracts", "a.exe", 1),
            NewDocument::new("Memo", "HR", "Contracts", "no-extension", 1),
            NewDocument::new("Memo", "HR", "Contracts", "a.pdf", MAX_UPLOAD_BYTES + 1),
        ];

        for upload in cases {
            let result = store.upload_document(upload.clone(), "Ana", today()).await;
            assert!(
                matches!(result, Err(AuthError::InvalidDocument(_))),
                "{upload:?} gave {result:?}"
            );
        }
        assert_eq!(store.len(), 8);
    }

    #[test]
    fn size_formatting() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(184_320), "180 KB");
        assert_eq!(format_size(MAX_UPLOAD_BYTES), "10.0 MB");
    }
}
