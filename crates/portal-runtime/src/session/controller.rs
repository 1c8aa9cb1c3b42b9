//! The session controller: sole owner of session state.

use super::{Session, SessionSnapshot};
use crate::admin::{
    self, AdminDirectory, EventKind, InMemoryAdminDirectory, RoleSummary, SystemEvent, UserRecord,
};
use crate::chat::{ChatResponder, ScriptedResponder};
use crate::config::PortalConfig;
use crate::dashboard::DashboardLayout;
use crate::legal::{
    AuditAction, AuditEntry, AuditSink, Document, DocumentFilter, DocumentStore, InMemoryAuditLog,
    InMemoryDocumentStore, NewDocument,
};
use crate::providers::{DelayedSecretVerifier, DirectoryResolver};
use crate::router::{self, Route};
use chrono::Utc;
use parking_lot::Mutex;
use portal_auth::{capabilities, AuthError, ChallengeId, IdentityResolver, SecretVerifier};
use portal_types::{DepartmentId, DepartmentSet, UserIdentity, View};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

const DEFAULT_VERIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Owns the current [`Session`] and applies every transition on it.
///
/// Cheap to clone; clones share the same session. At most one session is
/// active at a time.
///
/// # Locking
///
/// Session state sits behind a `parking_lot::Mutex` that is only taken
/// inside synchronous sections and never held across an `.await`. Provider
/// calls (identity, verification, documents, audit, chat) run unlocked.
///
/// # Step-up Single-flight
///
/// [`submit_secret`](Self::submit_secret) marks the challenge in flight
/// before awaiting the verifier. A second submission in that window fails
/// with [`AuthError::VerificationInFlight`]. When the verifier answers, the
/// result is applied only if the same session still holds the same
/// challenge; after logout it is discarded. If the submitting future is
/// dropped before the verifier answers, the in-flight marker is cleared so
/// the challenge can be retried or cancelled.
///
/// # Pending Calls
///
/// Operations that await a provider (documents, admin directory, chat)
/// check after the await that the session they started in is still the
/// active one, and fail with [`AuthError::NotAuthenticated`] otherwise.
///
/// # Example
///
/// ```
/// use portal_runtime::{Route, SessionController};
/// use portal_types::{Role, UserIdentity, View};
///
/// let controller = SessionController::builder().build();
/// controller.login_identity(UserIdentity::new("Ana", "admin@company.com", Role::Admin));
///
/// assert_eq!(controller.navigate(View::Admin), Ok(Route::Allowed(View::Admin)));
/// assert_eq!(controller.navigate(View::Legal), Ok(Route::NeedsStepUp));
/// ```
#[derive(Clone)]
pub struct SessionController {
    inner: Arc<Inner>,
}

struct Inner {
    session: Mutex<Option<Session>>,
    resolver: Arc<dyn IdentityResolver>,
    verifier: Arc<dyn SecretVerifier>,
    documents: Arc<dyn DocumentStore>,
    audit: Arc<dyn AuditSink>,
    admin: Arc<dyn AdminDirectory>,
    chat: Arc<dyn ChatResponder>,
    /// FIFO lane for chat replies. tokio's mutex queues waiters fairly.
    chat_lane: tokio::sync::Mutex<()>,
    verify_timeout: Duration,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("session", &self.inner.session.lock().as_ref().map(Session::id))
            .field("verify_timeout", &self.inner.verify_timeout)
            .finish_non_exhaustive()
    }
}

impl SessionController {
    /// Returns a builder with mock providers.
    #[must_use]
    pub fn builder() -> SessionControllerBuilder {
        SessionControllerBuilder::default()
    }

    /// Builds a controller whose mock providers follow `config`.
    #[must_use]
    pub fn from_config(config: &PortalConfig) -> Self {
        Self::builder()
            .with_resolver(Arc::new(DirectoryResolver::from_users(
                &config.directory.users,
            )))
            .with_verifier(Arc::new(DelayedSecretVerifier::new(
                config.step_up.verify_latency(),
            )))
            .with_chat(Arc::new(ScriptedResponder::new(config.chat.reply_latency())))
            .with_verify_timeout(config.step_up.verify_timeout())
            .build()
    }

    // === Session lifecycle ===

    /// Resolves credentials and starts a session.
    ///
    /// Any active session is replaced.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidIdentity`] or [`AuthError::InvalidRole`] from the
    /// resolver. No session is created on error; an active session is left
    /// as it was.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionSnapshot, AuthError> {
        match self.inner.resolver.resolve_identity(email, password).await {
            Ok(identity) => Ok(self.login_identity(identity)),
            Err(e) => {
                warn!(error = %e, "login rejected");
                Err(e)
            }
        }
    }

    /// Starts a session for an already resolved identity.
    pub fn login_identity(&self, identity: UserIdentity) -> SessionSnapshot {
        let session = Session::new(identity);
        let snapshot = session.snapshot();

        let previous = self.inner.session.lock().replace(session);
        if let Some(prev) = previous {
            info!(session_id = %prev.id(), "previous session replaced");
        }
        info!(
            session_id = %snapshot.session_id,
            role = %snapshot.role,
            email = %snapshot.email,
            "session started"
        );
        snapshot
    }

    /// Ends the session. Returns `false` if none was active.
    ///
    /// Nothing survives: the next login starts on the dashboard with default
    /// subscriptions and no legal access. A verification still in flight is
    /// discarded when it returns.
    pub fn logout(&self) -> bool {
        match self.inner.session.lock().take() {
            Some(session) => {
                info!(session_id = %session.id(), "session ended");
                true
            }
            None => false,
        }
    }

    /// `true` while a session is active.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.session.lock().is_some()
    }

    /// Read-only copy of the active session.
    #[must_use]
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.inner.session.lock().as_ref().map(Session::snapshot)
    }

    // === Navigation ===

    /// Requests a view change.
    ///
    /// - `Allowed(view)`: the session is now on `view`
    /// - `NeedsStepUp`: a challenge is open; the view is unchanged
    /// - `Forbidden`: nothing changed
    ///
    /// # Errors
    ///
    /// [`AuthError::NotAuthenticated`] without a session.
    pub fn navigate(&self, target: View) -> Result<Route, AuthError> {
        self.with_session(|session| {
            let route = router::navigate(session, target);
            match route {
                Route::Allowed(view) => session.set_view(view),
                Route::NeedsStepUp => {
                    if session.step_up_mut().open_challenge() {
                        info!(session_id = %session.id(), "step-up challenge opened");
                    }
                }
                Route::Forbidden => {}
            }
            Ok(route)
        })
    }

    /// Requests the legal center. Same as `navigate(View::Legal)`.
    ///
    /// # Errors
    ///
    /// [`AuthError::NotAuthenticated`] without a session.
    pub fn request_restricted_view(&self) -> Result<Route, AuthError> {
        self.navigate(View::Legal)
    }

    // === Step-up ===

    /// Verifies a step-up secret for the open challenge.
    ///
    /// On success the session is verified for the rest of its life and
    /// moves to the legal center, which is returned.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NoChallenge`]: no challenge open, or the session that
    ///   opened it is gone
    /// - [`AuthError::VerificationInFlight`]: a submission is pending
    /// - [`AuthError::InvalidSecret`]: blank or rejected; the challenge
    ///   stays open with no lockout
    /// - [`AuthError::VerificationTimedOut`]: the verifier did not answer
    ///   in time; the challenge stays open
    /// - [`AuthError::NotAuthenticated`]: no session
    pub async fn submit_secret(&self, secret: &str) -> Result<View, AuthError> {
        let (session_id, challenge, identity) = self.with_session(|session| {
            let challenge = session.step_up_mut().begin_verification(secret).map_err(|e| {
                warn!(session_id = %session.id(), error = %e, "step-up submission rejected");
                e
            })?;
            debug!(session_id = %session.id(), %challenge, "step-up verification started");
            Ok((session.id(), challenge, session.identity().clone()))
        })?;
        let mut pending = PendingVerification {
            inner: &self.inner,
            session_id,
            challenge,
            armed: true,
        };

        let outcome = tokio::time::timeout(
            self.inner.verify_timeout,
            self.inner.verifier.verify_secret(&identity, secret),
        )
        .await;
        // From here on the result is applied below, under the lock.
        pending.disarm();

        let mut slot = self.inner.session.lock();
        let session = match slot.as_mut() {
            Some(session) if session.id() == session_id => session,
            _ => {
                debug!(%session_id, %challenge, "verification result discarded: session gone");
                return Err(AuthError::NoChallenge);
            }
        };

        match outcome {
            Ok(Ok(accepted)) => {
                session
                    .step_up_mut()
                    .finish_verification(challenge, accepted)
                    .map_err(|e| {
                        warn!(session_id = %session_id, error = %e, "step-up failed");
                        e
                    })?;
                info!(session_id = %session_id, role = %session.role(), "step-up verified");

                // Role is checked again even though only eligible roles can
                // open a challenge.
                let route = router::navigate(session, View::Legal);
                let view = route.into_result(View::Legal)?;
                session.set_view(view);
                Ok(view)
            }
            Ok(Err(e)) => {
                session.step_up_mut().abort_verification(challenge);
                warn!(session_id = %session_id, error = %e, "step-up provider error");
                Err(e)
            }
            Err(_elapsed) => {
                session.step_up_mut().abort_verification(challenge);
                warn!(
                    session_id = %session_id,
                    timeout_ms = self.inner.verify_timeout.as_millis() as u64,
                    "step-up verification timed out"
                );
                Err(AuthError::VerificationTimedOut)
            }
        }
    }

    /// Closes the open challenge. The view does not change.
    ///
    /// # Errors
    ///
    /// [`AuthError::NoChallenge`], [`AuthError::VerificationInFlight`],
    /// [`AuthError::NotAuthenticated`].
    pub fn cancel_step_up(&self) -> Result<(), AuthError> {
        self.with_session(|session| {
            session.step_up_mut().cancel()?;
            debug!(session_id = %session.id(), "step-up challenge cancelled");
            Ok(())
        })
    }

    // === Subscriptions ===

    /// Flips one department subscription and returns the new set.
    ///
    /// # Errors
    ///
    /// [`AuthError::NotAuthenticated`] without a session.
    pub fn toggle_department(&self, department: DepartmentId) -> Result<DepartmentSet, AuthError> {
        self.with_session(|session| {
            session.subscriptions_mut().toggle_department(department);
            let subs = session.subscriptions();
            debug!(
                session_id = %session.id(),
                department = %department,
                subscribed = subs.contains_department(department),
                "subscription toggled"
            );
            Ok(subs)
        })
    }

    /// Replaces the whole subscription set and returns it.
    ///
    /// # Errors
    ///
    /// [`AuthError::NotAuthenticated`] without a session.
    pub fn replace_subscriptions<I>(&self, departments: I) -> Result<DepartmentSet, AuthError>
    where
        I: IntoIterator<Item = DepartmentId>,
    {
        let subs = DepartmentSet::from_departments(departments);
        self.with_session(|session| {
            *session.subscriptions_mut() = subs;
            debug!(session_id = %session.id(), count = subs.len(), "subscriptions replaced");
            Ok(subs)
        })
    }

    /// Dashboard projection for the active session.
    ///
    /// # Errors
    ///
    /// [`AuthError::NotAuthenticated`] without a session.
    pub fn dashboard(&self) -> Result<DashboardLayout, AuthError> {
        self.with_session(|session| {
            Ok(DashboardLayout::for_session(
                session.role(),
                session.subscriptions(),
            ))
        })
    }

    // === Legal center ===

    /// Lists legal documents.
    ///
    /// # Errors
    ///
    /// [`AuthError::Forbidden`] for roles that are not legal-eligible,
    /// [`AuthError::NeedsStepUp`] before step-up, store errors.
    pub async fn list_documents(&self, filter: &DocumentFilter) -> Result<Vec<Document>, AuthError> {
        let (session_id, _) = self.authorize_legal()?;
        let documents = self.inner.documents.list_documents(filter).await?;
        self.ensure_session(session_id)?;
        Ok(documents)
    }

    /// Opens a document and records the view.
    ///
    /// # Errors
    ///
    /// As [`list_documents`](Self::list_documents), plus
    /// [`AuthError::UnknownDocument`] and audit sink errors.
    pub async fn view_document(&self, id: u32) -> Result<Document, AuthError> {
        self.access_document(id, AuditAction::View).await
    }

    /// Downloads a document and records the download.
    ///
    /// # Errors
    ///
    /// As [`view_document`](Self::view_document).
    pub async fn download_document(&self, id: u32) -> Result<Document, AuthError> {
        self.access_document(id, AuditAction::Download).await
    }

    /// Recorded legal-center accesses, oldest first.
    ///
    /// # Errors
    ///
    /// As [`list_documents`](Self::list_documents).
    pub async fn audit_entries(&self) -> Result<Vec<AuditEntry>, AuthError> {
        let (session_id, _) = self.authorize_legal()?;
        let entries = self.inner.audit.entries().await?;
        self.ensure_session(session_id)?;
        Ok(entries)
    }

    /// Adds a document to the center and records the upload.
    ///
    /// The uploader is the session's user; the document is active from
    /// today.
    ///
    /// # Errors
    ///
    /// As [`list_documents`](Self::list_documents), plus
    /// [`AuthError::InvalidDocument`] (nothing is stored) and audit sink
    /// errors.
    pub async fn upload_document(&self, upload: NewDocument) -> Result<Document, AuthError> {
        let (session_id, identity) = self.authorize_legal()?;
        upload.validate()?;

        let document = self
            .inner
            .documents
            .upload_document(upload, identity.name(), Utc::now().date_naive())
            .await?;

        // Stored: the upload is recorded even if the session ended meanwhile.
        let entry = audit_entry(session_id, &identity, &document, AuditAction::Upload);
        self.inner.audit.record_access(&entry).await?;
        info!(
            session_id = %session_id,
            document_id = document.id,
            "document uploaded"
        );

        self.ensure_session(session_id)?;
        Ok(document)
    }

    async fn access_document(&self, id: u32, action: AuditAction) -> Result<Document, AuthError> {
        let (session_id, identity) = self.authorize_legal()?;

        let document = self
            .inner
            .documents
            .document(id)
            .await?
            .ok_or(AuthError::UnknownDocument(id))?;
        self.ensure_session(session_id)?;

        let entry = audit_entry(session_id, &identity, &document, action);
        self.inner.audit.record_access(&entry).await?;
        self.ensure_session(session_id)?;

        Ok(document)
    }

    /// Legal-center gate: eligible role AND verified step-up.
    fn authorize_legal(&self) -> Result<(Uuid, UserIdentity), AuthError> {
        self.with_session(|session| {
            if !capabilities(session.role()).can_view_legal_center() {
                warn!(
                    session_id = %session.id(),
                    role = %session.role(),
                    "legal center access forbidden"
                );
                return Err(AuthError::Forbidden { view: View::Legal });
            }
            if !session.legal_access() {
                warn!(session_id = %session.id(), "legal center access before step-up");
                return Err(AuthError::NeedsStepUp);
            }
            Ok((session.id(), session.identity().clone()))
        })
    }

    // === Admin panel ===

    /// Directory accounts whose name or email contains `search`.
    ///
    /// # Errors
    ///
    /// [`AuthError::Forbidden`] for roles without the admin panel,
    /// [`AuthError::NotAuthenticated`], directory errors.
    pub async fn admin_users(&self, search: Option<&str>) -> Result<Vec<UserRecord>, AuthError> {
        let session_id = self.authorize_admin()?;
        let users = self.inner.admin.users(search).await?;
        self.ensure_session(session_id)?;
        Ok(users)
    }

    /// The permission matrix, read from the role registry.
    ///
    /// # Errors
    ///
    /// As [`admin_users`](Self::admin_users).
    pub fn role_matrix(&self) -> Result<Vec<RoleSummary>, AuthError> {
        self.authorize_admin()?;
        Ok(admin::role_matrix())
    }

    /// System activity log, newest first, optionally of one kind.
    ///
    /// # Errors
    ///
    /// As [`admin_users`](Self::admin_users).
    pub async fn system_log(&self, kind: Option<EventKind>) -> Result<Vec<SystemEvent>, AuthError> {
        let session_id = self.authorize_admin()?;
        let events = self.inner.admin.system_events(kind).await?;
        self.ensure_session(session_id)?;
        Ok(events)
    }

    /// Admin-panel gate: the role capability alone, no step-up.
    fn authorize_admin(&self) -> Result<Uuid, AuthError> {
        self.with_session(|session| {
            if !capabilities(session.role()).can_view_admin_panel() {
                warn!(
                    session_id = %session.id(),
                    role = %session.role(),
                    "admin panel access forbidden"
                );
                return Err(AuthError::Forbidden { view: View::Admin });
            }
            Ok(session.id())
        })
    }

    // === Chat ===

    /// Sends a chat message and waits for the reply.
    ///
    /// Blank messages are ignored (`Ok(None)`). The responder is told
    /// whether the role may see legal information; the step-up state plays
    /// no part. Replies are produced one at a time, in submission order.
    ///
    /// # Errors
    ///
    /// [`AuthError::NotAuthenticated`] without a session, responder errors.
    pub async fn send_chat(&self, message: &str) -> Result<Option<String>, AuthError> {
        if message.trim().is_empty() {
            return Ok(None);
        }

        let (session_id, role) = self.with_session(|session| Ok((session.id(), session.role())))?;
        let has_legal_access = capabilities(role).can_view_legal_center();

        let _lane = self.inner.chat_lane.lock().await;
        debug!(role = %role, has_legal_access, "chat message dispatched");
        let reply = self
            .inner
            .chat
            .generate_reply(message.trim(), has_legal_access)
            .await?;
        self.ensure_session(session_id)?;
        Ok(Some(reply))
    }

    // === Internal ===

    fn with_session<T>(
        &self,
        f: impl FnOnce(&mut Session) -> Result<T, AuthError>,
    ) -> Result<T, AuthError> {
        let mut guard = self.inner.session.lock();
        let session = guard.as_mut().ok_or(AuthError::NotAuthenticated)?;
        f(session)
    }

    /// Fails unless `session_id` is still the active session.
    fn ensure_session(&self, session_id: Uuid) -> Result<(), AuthError> {
        match self.inner.session.lock().as_ref() {
            Some(session) if session.id() == session_id => Ok(()),
            _ => {
                debug!(%session_id, "result discarded: session ended while pending");
                Err(AuthError::NotAuthenticated)
            }
        }
    }
}

fn audit_entry(
    session_id: Uuid,
    identity: &UserIdentity,
    document: &Document,
    action: AuditAction,
) -> AuditEntry {
    AuditEntry {
        session_id,
        user: identity.name().to_string(),
        email: identity.email().to_string(),
        document_id: document.id,
        document_name: document.name.clone(),
        action,
        at: Utc::now(),
    }
}

/// Releases an in-flight step-up challenge if `submit_secret` is dropped
/// while awaiting the verifier.
struct PendingVerification<'a> {
    inner: &'a Inner,
    session_id: Uuid,
    challenge: ChallengeId,
    armed: bool,
}

impl PendingVerification<'_> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for PendingVerification<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(session) = self.inner.session.lock().as_mut() {
            if session.id() == self.session_id
                && session.step_up_mut().abort_verification(self.challenge)
            {
                debug!(
                    session_id = %self.session_id,
                    challenge = %self.challenge,
                    "step-up submission dropped; challenge released"
                );
            }
        }
    }
}

/// Builder for [`SessionController`].
///
/// Every provider defaults to its in-memory mock.
pub struct SessionControllerBuilder {
    resolver: Arc<dyn IdentityResolver>,
    verifier: Arc<dyn SecretVerifier>,
    documents: Arc<dyn DocumentStore>,
    audit: Arc<dyn AuditSink>,
    admin: Arc<dyn AdminDirectory>,
    chat: Arc<dyn ChatResponder>,
    verify_timeout: Duration,
}

impl Default for SessionControllerBuilder {
    fn default() -> Self {
        Self {
            resolver: Arc::new(DirectoryResolver::demo()),
            verifier: Arc::new(DelayedSecretVerifier::new(Duration::ZERO)),
            documents: Arc::new(InMemoryDocumentStore::seeded()),
            audit: Arc::new(InMemoryAuditLog::new()),
            admin: Arc::new(InMemoryAdminDirectory::seeded()),
            chat: Arc::new(ScriptedResponder::new(Duration::ZERO)),
            verify_timeout: DEFAULT_VERIFY_TIMEOUT,
        }
    }
}

impl SessionControllerBuilder {
    /// Sets the identity resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn IdentityResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Sets the step-up verifier.
    #[must_use]
    pub fn with_verifier(mut self, verifier: Arc<dyn SecretVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    /// Sets the document store.
    #[must_use]
    pub fn with_documents(mut self, documents: Arc<dyn DocumentStore>) -> Self {
        self.documents = documents;
        self
    }

    /// Sets the audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Sets the admin-panel directory.
    #[must_use]
    pub fn with_admin_directory(mut self, admin: Arc<dyn AdminDirectory>) -> Self {
        self.admin = admin;
        self
    }

    /// Sets the chat responder.
    #[must_use]
    pub fn with_chat(mut self, chat: Arc<dyn ChatResponder>) -> Self {
        self.chat = chat;
        self
    }

    /// Sets the verification timeout.
    #[must_use]
    pub fn with_verify_timeout(mut self, timeout: Duration) -> Self {
        self.verify_timeout = timeout;
        self
    }

    /// Builds the controller with no active session.
    #[must_use]
    pub fn build(self) -> SessionController {
        SessionController {
            inner: Arc::new(Inner {
                session: Mutex::new(None),
                resolver: self.resolver,
                verifier: self.verifier,
                documents: self.documents,
                audit: self.audit,
                admin: self.admin,
                chat: self.chat,
                chat_lane: tokio::sync::Mutex::new(()),
                verify_timeout: self.verify_timeout,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_types::Role;

    fn logged_in(role: Role) -> SessionController {
        let controller = SessionController::builder().build();
        controller.login_identity(UserIdentity::new("Test", "test@company.com", role));
        controller
    }

    #[test]
    fn operations_require_session() {
        let controller = SessionController::builder().build();
        assert_eq!(
            controller.navigate(View::Settings),
            Err(AuthError::NotAuthenticated)
        );
        assert_eq!(controller.cancel_step_up(), Err(AuthError::NotAuthenticated));
        assert_eq!(
            controller.toggle_department(DepartmentId::It),
            Err(AuthError::NotAuthenticated)
        );
        assert!(controller.snapshot().is_none());
        assert!(!controller.logout());
    }

    #[test]
    fn forbidden_leaves_view_unchanged() {
        let controller = logged_in(Role::Manager);
        controller.navigate(View::Settings).unwrap();

        assert_eq!(controller.navigate(View::Admin), Ok(Route::Forbidden));
        assert_eq!(controller.snapshot().unwrap().view, View::Settings);
    }

    #[test]
    fn needs_step_up_opens_challenge_without_moving() {
        let controller = logged_in(Role::Legal);
        assert_eq!(controller.navigate(View::Legal), Ok(Route::NeedsStepUp));

        let snap = controller.snapshot().unwrap();
        assert_eq!(snap.view, View::Dashboard);
        assert_eq!(snap.step_up, portal_auth::StepUpPhase::Challenged);
    }

    #[tokio::test]
    async fn blank_secret_fails_without_calling_verifier() {
        let controller = logged_in(Role::Admin);
        controller.request_restricted_view().unwrap();

        assert_eq!(
            controller.submit_secret("").await,
            Err(AuthError::InvalidSecret)
        );
        assert!(!controller.snapshot().unwrap().legal_access);
    }

    #[test]
    fn replace_subscriptions_collapses_duplicates() {
        let controller = logged_in(Role::Collaborator);
        let subs = controller
            .replace_subscriptions([DepartmentId::It, DepartmentId::It, DepartmentId::Finance])
            .unwrap();
        assert_eq!(subs, DepartmentSet::IT | DepartmentSet::FINANCE);
        assert_eq!(subs.len(), 2);
    }

    #[tokio::test]
    async fn admin_panel_is_admin_only() {
        let admin = logged_in(Role::Admin);
        assert_eq!(admin.role_matrix().unwrap().len(), Role::ALL.len());
        assert_eq!(admin.admin_users(None).await.unwrap().len(), 7);
        assert_eq!(
            admin.system_log(Some(EventKind::Modify)).await.unwrap().len(),
            1
        );

        for role in [Role::Legal, Role::Manager, Role::Collaborator, Role::Intern] {
            let controller = logged_in(role);
            let forbidden = AuthError::Forbidden { view: View::Admin };
            assert_eq!(controller.role_matrix().unwrap_err(), forbidden, "{role:?}");
            assert_eq!(
                controller.admin_users(Some("ana")).await.unwrap_err(),
                forbidden
            );
            assert_eq!(controller.system_log(None).await.unwrap_err(), forbidden);
        }
    }

    #[tokio::test]
    async fn invalid_upload_is_rejected_after_gate() {
        let manager = logged_in(Role::Manager);
        let upload = NewDocument::new("", "HR", "Contracts", "x.pdf", 1);
        // Role gate comes before field validation
        assert_eq!(
            manager.upload_document(upload.clone()).await,
            Err(AuthError::Forbidden { view: View::Legal })
        );

        let legal = logged_in(Role::Legal);
        legal.request_restricted_view().unwrap();
        legal.submit_secret("pw").await.unwrap();
        assert!(matches!(
            legal.upload_document(upload).await,
            Err(AuthError::InvalidDocument(_))
        ));
    }

    #[tokio::test]
    async fn blank_chat_is_ignored() {
        let controller = logged_in(Role::Intern);
        assert_eq!(controller.send_chat("   ").await, Ok(None));
    }
}
