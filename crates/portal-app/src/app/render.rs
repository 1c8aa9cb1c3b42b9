//! Plain-text rendering of runtime values.
//!
//! Every function is pure: it formats what the runtime already decided and
//! never evaluates role rules itself.

use portal_auth::{DepartmentAccess, StepUpPhase};
use portal_runtime::admin::scope_label;
use portal_runtime::{
    AccountStatus, AuditEntry, DashboardLayout, Document, NavEntry, RoleSummary, SessionSnapshot,
    SystemEvent, UserRecord,
};
use portal_types::DepartmentId;
use std::fmt::Write as _;

/// Help text for the interactive prompt and `help` command.
pub(crate) const HELP: &str = "\
Session:
  login <email> <password>   Log in
  logout                     End the session
  whoami                     Show the current session

Navigation:
  go <view>                  Open dashboard | settings | admin | legal
  nav                        List the views you can open
  verify <password>          Confirm your identity for the legal center
  cancel                     Cancel identity confirmation

Dashboard:
  dashboard                  Show department panels
  toggle <department>        Flip one subscription
  subscribe <dept,...|none>  Replace all subscriptions

Legal center:
  docs [search] [--dept <unit>] [--category <category>]
                             List legal documents
  open <id>                  View a document
  download <id>              Download a document
  upload <name> --dept <unit> --category <category> --file <path> [--version <v>]
                             Add a PDF, DOCX or XLSX file (max 10 MB)
  audit                      Show the access log

Admin panel:
  users [search]             List accounts by name or email
  roles                      Show the permission matrix
  log [access|export|modify] Show system activity

Other:
  chat <message>             Ask the assistant
  help                       Show this help
  q, quit                    Quit";

pub(crate) fn step_up_phase(phase: StepUpPhase) -> &'static str {
    match phase {
        StepUpPhase::Unchallenged => "not confirmed",
        StepUpPhase::Challenged => "waiting for password",
        StepUpPhase::Verifying => "verifying",
        StepUpPhase::Verified => "confirmed",
    }
}

pub(crate) fn department_list(departments: &[DepartmentId]) -> String {
    if departments.is_empty() {
        return "(none)".to_string();
    }
    departments
        .iter()
        .map(|d| d.metadata().name)
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn session(snapshot: &SessionSnapshot) -> String {
    format!(
        "User:        {} <{}>\n\
         Role:        {}\n\
         View:        {}\n\
         Departments: {}\n\
         Identity:    {}\n\
         Session:     {} (since {})",
        snapshot.name,
        snapshot.email,
        snapshot.role,
        snapshot.view,
        department_list(&snapshot.subscriptions),
        step_up_phase(snapshot.step_up),
        snapshot.session_id,
        snapshot.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

pub(crate) fn dashboard(layout: &DashboardLayout) -> String {
    if layout.is_empty() {
        return "No departments selected. Use 'toggle <department>' to subscribe.".to_string();
    }

    let mut out = String::from("Dashboard");
    if !layout.metric_detail {
        out.push_str(" (headline figures only)");
    }
    for panel in layout.shown() {
        let state = match panel.access {
            DepartmentAccess::Visible => panel.department.description,
            DepartmentAccess::Restricted => "restricted: financial data requires authorization",
            DepartmentAccess::Hidden => continue,
        };
        let _ = write!(out, "\n  [{}] {}: {}", panel.department.id, panel.department.name, state);
    }
    out
}

pub(crate) fn navigation(entries: &[NavEntry]) -> String {
    let mut out = String::from("Views:");
    for entry in entries {
        let _ = write!(out, "\n  {}", entry.view);
        if entry.restricted {
            out.push_str(" (identity confirmation required)");
        }
    }
    out
}

pub(crate) fn documents(docs: &[Document]) -> String {
    if docs.is_empty() {
        return "No documents found.".to_string();
    }

    let mut out = format!("{:>3}  {:<44} {:<20} {:<8} {}", "ID", "NAME", "CATEGORY", "STATUS", "VERSION");
    for doc in docs {
        let _ = write!(
            out,
            "\n{:>3}  {:<44} {:<20} {:<8} {}",
            doc.id,
            doc.name,
            doc.category,
            doc.status.to_string(),
            doc.version
        );
    }
    out
}

pub(crate) fn document(doc: &Document) -> String {
    format!(
        "#{} {}\n  Department: {}\n  Category:   {}\n  Version:    {}\n  Uploaded:   {} by {}\n  File:       {} ({})\n  Status:     {}",
        doc.id,
        doc.name,
        doc.department,
        doc.category,
        doc.version,
        doc.uploaded_on,
        doc.uploaded_by,
        doc.file_type,
        doc.size,
        doc.status,
    )
}

pub(crate) fn audit(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No document access recorded.".to_string();
    }

    let mut out = String::from("Access log:");
    for entry in entries {
        let _ = write!(
            out,
            "\n  {} {} {:<8} #{} {}",
            entry.at.format("%H:%M:%S"),
            entry.email,
            entry.action.to_string(),
            entry.document_id,
            entry.document_name
        );
    }
    out
}

pub(crate) fn users(users: &[UserRecord]) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }

    let active = users
        .iter()
        .filter(|u| u.status == AccountStatus::Active)
        .count();
    let mut out = format!("{} users, {} active", users.len(), active);
    for user in users {
        let _ = write!(
            out,
            "\n{:>3}  {:<20} {:<28} {:<13} {:<9} {}",
            user.id,
            user.name,
            user.email,
            user.role.label(),
            user.status.to_string(),
            user.last_access
        );
    }
    out
}

pub(crate) fn role_matrix(rows: &[RoleSummary]) -> String {
    let mark = |granted: bool| if granted { "yes" } else { "-" };

    let mut out = format!(
        "{:<13} {:<11} {:<6} {:<6} {:<10} {:<8} {}",
        "ROLE", "DEPARTMENTS", "ADMIN", "LEGAL", "FINANCIAL", "METRICS", "DESCRIPTION"
    );
    for row in rows {
        let caps = &row.capabilities;
        let _ = write!(
            out,
            "\n{:<13} {:<11} {:<6} {:<6} {:<10} {:<8} {}",
            row.role.label(),
            scope_label(caps.departments()),
            mark(caps.can_view_admin_panel()),
            mark(caps.can_view_legal_center()),
            mark(caps.can_view_financials()),
            if caps.can_see_full_metrics() { "full" } else { "summary" },
            row.description
        );
    }
    out
}

pub(crate) fn system_log(events: &[SystemEvent]) -> String {
    if events.is_empty() {
        return "No activity recorded.".to_string();
    }

    let mut out = String::from("System activity:");
    for event in events {
        let _ = write!(
            out,
            "\n  {} {:<16} {:<7} {:<30} {}",
            event.at.format("%Y-%m-%d %H:%M:%S"),
            event.user,
            event.kind.to_string(),
            event.action,
            event.ip
        );
    }
    out
}
