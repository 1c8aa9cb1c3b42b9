//! Portal application.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                         PortalApp                          │
//! │                                                            │
//! │   line ──► InputParser::parse ──► execute(InputCommand)    │
//! │                                        │                   │
//! │                                        ▼                   │
//! │                              SessionController             │
//! │                                        │                   │
//! │                     Reply::Text ◄──────┴──────► AppError   │
//! │                         │                          │       │
//! │                         ▼                          ▼       │
//! │                       stdout                    stderr     │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two modes share [`PortalApp::execute`]:
//!
//! - Command mode ([`PortalApp::run_command`]): one line of
//!   `;`-separated commands, exit code `1` if any failed.
//! - Interactive mode ([`PortalApp::run_interactive`]): stdin line by
//!   line until `q` or end of input.

mod builder;
mod render;

pub use builder::PortalAppBuilder;

use crate::AppError;
use portal_auth::AuthError;
use portal_runtime::{
    DocumentFilter, InputCommand, InputParser, NewDocument, PortalConfig, Route, SessionController,
};
use portal_types::ErrorCode;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::debug;

const STEP_UP_PROMPT: &str =
    "The legal center requires identity confirmation. Enter 'verify <password>' or 'cancel'.";

/// Result of one executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text for stdout.
    Text(String),
    /// Nothing to print.
    Nothing,
    /// Leave the loop.
    Quit,
}

/// The portal application.
///
/// Owns the resolved configuration and the session controller.
///
/// # Example
///
/// ```
/// use portal_app::{PortalApp, Reply};
/// use portal_runtime::{InputParser, PortalConfig};
///
/// # let rt = tokio::runtime::Runtime::new().unwrap();
/// # rt.block_on(async {
/// let app = PortalApp::builder(PortalConfig::default()).build();
///
/// let reply = app.execute(InputParser::parse("help")).await.unwrap();
/// assert!(matches!(reply, Reply::Text(_)));
/// # });
/// ```
#[derive(Debug)]
pub struct PortalApp {
    config: PortalConfig,
    controller: SessionController,
}

impl PortalApp {
    /// Returns a builder for `config`.
    #[must_use]
    pub fn builder(config: PortalConfig) -> PortalAppBuilder {
        PortalAppBuilder::new(config)
    }

    /// Resolved configuration.
    #[must_use]
    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// Session controller.
    #[must_use]
    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// Executes one `;`-separated command line against stdout/stderr.
    ///
    /// Returns the process exit code: `0` if every command succeeded,
    /// `1` otherwise. A failed command does not stop the ones after it;
    /// `quit` does.
    ///
    /// # Errors
    ///
    /// [`AppError::Io`] if stdout or stderr cannot be written.
    pub async fn run_command(&self, line: &str) -> Result<i32, AppError> {
        let mut stdout = tokio::io::stdout();
        let mut stderr = tokio::io::stderr();
        self.run_command_with(line, &mut stdout, &mut stderr).await
    }

    /// [`run_command`](Self::run_command) with explicit writers.
    ///
    /// # Errors
    ///
    /// [`AppError::Io`] if a writer fails.
    pub async fn run_command_with<O, E>(
        &self,
        line: &str,
        out: &mut O,
        err: &mut E,
    ) -> Result<i32, AppError>
    where
        O: AsyncWrite + Unpin,
        E: AsyncWrite + Unpin,
    {
        let mut exit_code = 0;

        for part in line.split(';') {
            match self.execute(InputParser::parse(part)).await {
                Ok(Reply::Text(text)) => write_line(out, &text).await?,
                Ok(Reply::Nothing) => {}
                Ok(Reply::Quit) => break,
                Err(e) => {
                    write_line(err, &format_error(&e)).await?;
                    exit_code = 1;
                }
            }
        }

        out.flush().await?;
        err.flush().await?;
        Ok(exit_code)
    }

    /// Reads commands from stdin until `q` or end of input.
    ///
    /// # Errors
    ///
    /// [`AppError::Io`] if stdin cannot be read or stdout/stderr written.
    pub async fn run_interactive(&self) -> Result<(), AppError> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        let mut stderr = tokio::io::stderr();
        self.run_interactive_with(stdin, &mut stdout, &mut stderr)
            .await
    }

    /// [`run_interactive`](Self::run_interactive) over explicit streams.
    ///
    /// # Errors
    ///
    /// [`AppError::Io`] if a stream fails.
    pub async fn run_interactive_with<R, O, E>(
        &self,
        input: R,
        out: &mut O,
        err: &mut E,
    ) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
        E: AsyncWrite + Unpin,
    {
        write_line(
            out,
            "Interactive mode started. Type 'q' to quit, 'help' for commands.",
        )
        .await?;

        let mut lines = input.lines();
        loop {
            out.write_all(self.prompt().as_bytes()).await?;
            out.flush().await?;

            let Some(line) = lines.next_line().await? else {
                debug!("end of input");
                break;
            };

            match self.execute(InputParser::parse(&line)).await {
                Ok(Reply::Text(text)) => write_line(out, &text).await?,
                Ok(Reply::Nothing) => {}
                Ok(Reply::Quit) => {
                    write_line(out, "Quit requested.").await?;
                    break;
                }
                Err(e) => {
                    write_line(err, &format_error(&e)).await?;
                    err.flush().await?;
                }
            }
        }

        out.flush().await?;
        Ok(())
    }

    /// Executes one parsed command.
    ///
    /// Every access decision is made by the session controller; this
    /// method only maps outcomes to text.
    ///
    /// # Errors
    ///
    /// - [`AppError::Auth`]: the controller refused the operation,
    ///   including [`AuthError::Forbidden`] for a forbidden route
    /// - [`AppError::InvalidCommand`], [`AppError::UnknownCommand`]:
    ///   the input was not a usable command
    pub async fn execute(&self, cmd: InputCommand) -> Result<Reply, AppError> {
        if !cmd.carries_secret() {
            debug!(?cmd, "executing command");
        }

        let ctl = &self.controller;
        let reply = match cmd {
            InputCommand::Login { email, password } => {
                let snapshot = ctl.login(&email, &password).await?;
                Reply::Text(format!(
                    "Welcome, {} ({}). Now viewing: {}",
                    snapshot.name, snapshot.role, snapshot.view
                ))
            }

            InputCommand::Logout => {
                if ctl.logout() {
                    Reply::Text("Logged out.".to_string())
                } else {
                    Reply::Text("Not logged in.".to_string())
                }
            }

            InputCommand::Go { view } => match ctl.navigate(view)? {
                Route::Allowed(view) => Reply::Text(format!("Now viewing: {view}")),
                Route::NeedsStepUp => Reply::Text(STEP_UP_PROMPT.to_string()),
                Route::Forbidden => return Err(AuthError::Forbidden { view }.into()),
            },

            InputCommand::Verify { secret } => {
                let view = ctl.submit_secret(&secret).await?;
                Reply::Text(format!("Identity confirmed. Now viewing: {view}"))
            }

            InputCommand::Cancel => {
                ctl.cancel_step_up()?;
                Reply::Text("Identity confirmation cancelled.".to_string())
            }

            InputCommand::Toggle { department } => {
                let subs = ctl.toggle_department(department)?;
                let verb = if subs.contains_department(department) {
                    "Subscribed to"
                } else {
                    "Unsubscribed from"
                };
                Reply::Text(format!("{verb} {}.", department.metadata().name))
            }

            InputCommand::Subscribe { departments } => {
                let subs = ctl.replace_subscriptions(departments)?;
                let list: Vec<_> = subs.departments().collect();
                Reply::Text(format!("Subscriptions: {}", render::department_list(&list)))
            }

            InputCommand::WhoAmI => {
                let snapshot = ctl.snapshot().ok_or(AuthError::NotAuthenticated)?;
                Reply::Text(render::session(&snapshot))
            }

            InputCommand::Dashboard => {
                let layout = ctl.dashboard()?;
                Reply::Text(render::dashboard(&layout))
            }

            InputCommand::Nav => {
                let layout = ctl.dashboard()?;
                Reply::Text(render::navigation(&layout.navigation))
            }

            InputCommand::Docs {
                search,
                department,
                category,
            } => {
                let filter = DocumentFilter {
                    search,
                    department,
                    category,
                };
                let docs = ctl.list_documents(&filter).await?;
                Reply::Text(render::documents(&docs))
            }

            InputCommand::Open { id } => {
                let doc = ctl.view_document(id).await?;
                Reply::Text(render::document(&doc))
            }

            InputCommand::Download { id } => {
                let doc = ctl.download_document(id).await?;
                Reply::Text(format!(
                    "Downloading {} ({}, {})",
                    doc.name, doc.file_type, doc.size
                ))
            }

            InputCommand::Upload {
                name,
                department,
                category,
                version,
                file,
            } => {
                let upload = read_upload(name, department, category, version, &file).await?;
                let doc = ctl.upload_document(upload).await?;
                Reply::Text(format!(
                    "Uploaded #{} {} ({}, {}) to {} / {}.",
                    doc.id, doc.name, doc.file_type, doc.size, doc.department, doc.category
                ))
            }

            InputCommand::Audit => {
                let entries = ctl.audit_entries().await?;
                Reply::Text(render::audit(&entries))
            }

            InputCommand::Users { search } => {
                let users = ctl.admin_users(search.as_deref()).await?;
                Reply::Text(render::users(&users))
            }

            InputCommand::Roles => {
                let matrix = ctl.role_matrix()?;
                Reply::Text(render::role_matrix(&matrix))
            }

            InputCommand::Log { kind } => {
                let events = ctl.system_log(kind).await?;
                Reply::Text(render::system_log(&events))
            }

            InputCommand::Chat { message } => match ctl.send_chat(&message).await? {
                Some(reply) => Reply::Text(format!("assistant: {reply}")),
                None => Reply::Nothing,
            },

            InputCommand::Help => Reply::Text(render::HELP.to_string()),
            InputCommand::Quit => Reply::Quit,
            InputCommand::Empty => Reply::Nothing,

            InputCommand::Invalid { input, reason } => {
                return Err(AppError::InvalidCommand { input, reason })
            }
            InputCommand::Unknown { input } => return Err(AppError::UnknownCommand(input)),
        };

        Ok(reply)
    }

    /// Prompt showing the current view, or `portal` without a session.
    fn prompt(&self) -> String {
        match self.controller.snapshot() {
            Some(snapshot) => format!("{}> ", snapshot.view),
            None => "portal> ".to_string(),
        }
    }
}

/// Builds an upload from a local file. Only the name and size are read;
/// the portal stores metadata, not content.
async fn read_upload(
    name: String,
    department: String,
    category: String,
    version: Option<String>,
    file: &str,
) -> Result<NewDocument, AppError> {
    let metadata = tokio::fs::metadata(file).await?;
    if !metadata.is_file() {
        return Err(AppError::InvalidCommand {
            input: file.to_string(),
            reason: "not a regular file".to_string(),
        });
    }
    let file_name = Path::new(file)
        .file_name()
        .map_or_else(|| file.to_string(), |n| n.to_string_lossy().into_owned());

    let upload = NewDocument::new(name, department, category, file_name, metadata.len());
    Ok(match version {
        Some(version) => upload.with_version(version),
        None => upload,
    })
}

fn format_error(e: &AppError) -> String {
    format!("Error [{}]: {e}", e.code())
}

async fn write_line<W: AsyncWrite + Unpin>(w: &mut W, text: &str) -> std::io::Result<()> {
    w.write_all(text.as_bytes()).await?;
    w.write_all(b"\n").await
}
