//! Dashboard projection of the visibility policy.
//!
//! Presentation asks for a [`DashboardLayout`] and renders it; it never
//! evaluates role rules itself.

use crate::router::{reachable_views, NavEntry};
use portal_auth::{department_access, is_metric_detail_visible, DepartmentAccess};
use portal_types::{Department, DepartmentId, DepartmentSet, Role};
use serde::Serialize;

/// One department panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentPanel {
    /// Catalog entry.
    pub department: &'static Department,
    /// How the panel renders.
    pub access: DepartmentAccess,
}

/// What the dashboard renders for a role and subscription set.
///
/// # Example
///
/// ```
/// use portal_runtime::dashboard::DashboardLayout;
/// use portal_types::{DepartmentSet, Role};
///
/// let layout = DashboardLayout::for_session(Role::Intern, DepartmentSet::empty());
/// assert!(layout.is_empty());
/// assert!(!layout.metric_detail);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardLayout {
    /// Every catalog department, in catalog order.
    pub panels: Vec<DepartmentPanel>,
    /// Detail breakdowns render (vs. headline numbers only).
    pub metric_detail: bool,
    /// Navigation menu.
    pub navigation: Vec<NavEntry>,
}

impl DashboardLayout {
    /// Projects the visibility policy for one session.
    #[must_use]
    pub fn for_session(role: Role, subscriptions: DepartmentSet) -> Self {
        let panels = DepartmentId::ALL
            .into_iter()
            .map(|id| DepartmentPanel {
                department: id.metadata(),
                access: department_access(role, subscriptions, id),
            })
            .collect();

        Self {
            panels,
            metric_detail: is_metric_detail_visible(role),
            navigation: reachable_views(role),
        }
    }

    /// Panels that are not hidden.
    pub fn shown(&self) -> impl Iterator<Item = &DepartmentPanel> {
        self.panels
            .iter()
            .filter(|p| p.access != DepartmentAccess::Hidden)
    }

    /// `true` when no department panel shows: the "no departments
    /// selected" state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shown().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn access_of(layout: &DashboardLayout, id: DepartmentId) -> DepartmentAccess {
        layout
            .panels
            .iter()
            .find(|p| p.department.id == id)
            .map(|p| p.access)
            .unwrap()
    }

    #[test]
    fn manager_sees_everything_without_subscribing() {
        let layout = DashboardLayout::for_session(Role::Manager, DepartmentSet::empty());
        assert!(layout.panels.iter().all(|p| p.access.is_visible()));
        assert!(layout.metric_detail);
        assert!(!layout.is_empty());
    }

    #[test]
    fn collaborator_finance_is_restricted() {
        let subs = DepartmentSet::FINANCE | DepartmentSet::IT;
        let layout = DashboardLayout::for_session(Role::Collaborator, subs);

        assert_eq!(
            access_of(&layout, DepartmentId::Finance),
            DepartmentAccess::Restricted
        );
        assert_eq!(access_of(&layout, DepartmentId::It), DepartmentAccess::Visible);
        assert_eq!(access_of(&layout, DepartmentId::Hr), DepartmentAccess::Hidden);
        assert_eq!(layout.shown().count(), 2);
    }

    #[test]
    fn legal_dashboard_is_empty() {
        let layout = DashboardLayout::for_session(Role::Legal, DepartmentSet::all());
        assert!(layout.is_empty());
        assert!(layout.metric_detail);
    }

    #[test]
    fn intern_limited_metrics() {
        let layout =
            DashboardLayout::for_session(Role::Intern, DepartmentSet::DEFAULT_SUBSCRIPTIONS);
        assert!(!layout.metric_detail);
        assert_eq!(layout.shown().count(), 2);
    }
}
