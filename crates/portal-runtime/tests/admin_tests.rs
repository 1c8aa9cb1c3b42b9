//! Integration tests for the administration panel.

use async_trait::async_trait;
use portal_auth::AuthError;
use portal_runtime::{
    AccountStatus, AdminDirectory, EventKind, InMemoryAdminDirectory, Route, SessionController,
    SystemEvent, UserRecord,
};
use portal_types::{Role, UserIdentity, View};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

// =============================================================================
// Test Fixtures
// =============================================================================

fn identity(role: Role) -> UserIdentity {
    UserIdentity::new("Ana Silva", "admin@company.com", role)
}

/// Directory whose user listing blocks until released.
struct GatedDirectory {
    inner: InMemoryAdminDirectory,
    gate: Notify,
    entered: AtomicBool,
}

#[async_trait]
impl AdminDirectory for GatedDirectory {
    async fn users(&self, search: Option<&str>) -> Result<Vec<UserRecord>, AuthError> {
        self.entered.store(true, Ordering::SeqCst);
        self.gate.notified().await;
        self.inner.users(search).await
    }

    async fn system_events(
        &self,
        kind: Option<EventKind>,
    ) -> Result<Vec<SystemEvent>, AuthError> {
        self.inner.system_events(kind).await
    }
}

// =============================================================================
// Gate
// =============================================================================

#[tokio::test]
async fn admin_reads_panel_without_step_up() {
    let c = SessionController::builder().build();
    c.login_identity(identity(Role::Admin));

    assert_eq!(c.navigate(View::Admin), Ok(Route::Allowed(View::Admin)));
    let users = c.admin_users(None).await.unwrap();
    assert_eq!(users.len(), 7);
    assert!(!c.snapshot().unwrap().legal_access);
}

#[tokio::test]
async fn every_other_role_is_refused() {
    for role in [Role::Legal, Role::Manager, Role::Collaborator, Role::Intern] {
        let c = SessionController::builder().build();
        c.login_identity(identity(role));

        let forbidden = AuthError::Forbidden { view: View::Admin };
        assert_eq!(c.admin_users(None).await.unwrap_err(), forbidden, "{role}");
        assert_eq!(c.role_matrix().unwrap_err(), forbidden, "{role}");
        assert_eq!(
            c.system_log(Some(EventKind::Access)).await.unwrap_err(),
            forbidden,
            "{role}"
        );
    }
}

#[tokio::test]
async fn legal_step_up_does_not_open_admin_panel() {
    let c = SessionController::builder().build();
    c.login_identity(identity(Role::Legal));
    c.navigate(View::Legal).unwrap();
    c.submit_secret("x").await.unwrap();

    assert_eq!(
        c.role_matrix().unwrap_err(),
        AuthError::Forbidden { view: View::Admin }
    );
}

#[tokio::test]
async fn no_session_is_not_authenticated() {
    let c = SessionController::builder().build();
    assert_eq!(c.role_matrix().unwrap_err(), AuthError::NotAuthenticated);
    assert_eq!(
        c.admin_users(None).await.unwrap_err(),
        AuthError::NotAuthenticated
    );
}

// =============================================================================
// Content
// =============================================================================

#[tokio::test]
async fn matrix_matches_registry_rows() {
    let c = SessionController::builder().build();
    c.login_identity(identity(Role::Admin));

    let matrix = c.role_matrix().unwrap();
    let roles: Vec<_> = matrix.iter().map(|r| r.role).collect();
    assert_eq!(roles, Role::ALL.to_vec());

    for row in &matrix {
        assert_eq!(row.capabilities, portal_auth::capabilities(row.role));
        assert!(!row.description.is_empty());
    }
}

#[tokio::test]
async fn search_and_log_filters() {
    let c = SessionController::builder().build();
    c.login_identity(identity(Role::Admin));

    let santos = c.admin_users(Some("SANTOS")).await.unwrap();
    assert_eq!(santos.len(), 1);
    assert_eq!(santos[0].role, Role::Manager);

    let lima = c.admin_users(Some("lima")).await.unwrap();
    assert_eq!(lima.len(), 1);
    assert_eq!(lima[0].status, AccountStatus::Inactive);

    let exports = c.system_log(Some(EventKind::Export)).await.unwrap();
    assert_eq!(exports.len(), 1);
    assert_eq!(exports[0].user, "Carlos Santos");

    let all = c.system_log(None).await.unwrap();
    assert!(all.windows(2).all(|w| w[0].at >= w[1].at));
}

#[tokio::test]
async fn injected_directory_is_used() {
    let user = UserRecord {
        id: 1,
        name: "Only User".into(),
        email: "only@company.com".into(),
        role: Role::Intern,
        status: AccountStatus::Active,
        last_access: "Today, 08:00".into(),
    };
    let c = SessionController::builder()
        .with_admin_directory(Arc::new(InMemoryAdminDirectory::new(
            vec![user.clone()],
            Vec::new(),
        )))
        .build();
    c.login_identity(identity(Role::Admin));

    assert_eq!(c.admin_users(None).await.unwrap(), vec![user]);
    assert!(c.system_log(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn logout_during_listing_withholds_users() {
    let directory = Arc::new(GatedDirectory {
        inner: InMemoryAdminDirectory::seeded(),
        gate: Notify::new(),
        entered: AtomicBool::new(false),
    });
    let c = SessionController::builder()
        .with_admin_directory(directory.clone())
        .build();
    c.login_identity(identity(Role::Admin));

    let pending = tokio::spawn({
        let c = c.clone();
        async move { c.admin_users(None).await }
    });
    while !directory.entered.load(Ordering::SeqCst) {
        tokio::task::yield_now().await;
    }
    c.logout();
    directory.gate.notify_one();

    assert_eq!(pending.await.unwrap(), Err(AuthError::NotAuthenticated));
}
