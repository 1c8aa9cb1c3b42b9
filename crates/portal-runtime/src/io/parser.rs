//! Stateless input parser.
//!
//! Pure function for parsing user input into [`InputCommand`].
//!
//! # Example
//!
//! ```
//! use portal_runtime::io::{InputCommand, InputParser};
//! use portal_types::View;
//!
//! let cmd = InputParser::parse("go legal");
//! assert_eq!(cmd, InputCommand::Go { view: View::Legal });
//!
//! let cmd = InputParser::parse("verify my secret phrase");
//! assert!(matches!(cmd, InputCommand::Verify { ref secret } if secret == "my secret phrase"));
//! ```

use super::InputCommand;
use crate::admin::EventKind;
use portal_types::DepartmentId;

const UPLOAD_USAGE: &str =
    "usage: upload <name> --dept <unit> --category <category> --file <path> [--version <label>]";

/// Stateless input parser.
///
/// Converts raw text input into [`InputCommand`].
/// This is a pure function with no internal state.
pub struct InputParser;

impl InputParser {
    /// Parses a line of input into a command.
    ///
    /// # Input Format
    ///
    /// | Input | Command |
    /// |-------|---------|
    /// | `login <email> <password>` | Login |
    /// | `logout` | Logout |
    /// | `go <view>` | Go (`dashboard`, `settings`, `admin`, `legal`) |
    /// | `verify <secret>` | Verify |
    /// | `cancel` | Cancel |
    /// | `toggle <dept>` | Toggle |
    /// | `subscribe [dept,...]` | Subscribe (no argument clears) |
    /// | `whoami` | WhoAmI |
    /// | `dashboard` | Dashboard |
    /// | `nav` | Nav |
    /// | `docs [search] [--dept <unit>] [--category <category>]` | Docs |
    /// | `open <id>` / `download <id>` | Open / Download |
    /// | `upload <name> --dept <unit> --category <category> --file <path> [--version <label>]` | Upload |
    /// | `audit` | Audit |
    /// | `users [search]` | Users |
    /// | `roles` | Roles |
    /// | `log [access\|export\|modify]` | Log |
    /// | `chat <message>` | Chat |
    /// | `help` / `?` | Help |
    /// | `q` / `quit` / `exit` | Quit |
    ///
    /// Option values (`--dept Human Resources`) run until the next option,
    /// so they may contain spaces.
    #[must_use]
    pub fn parse(line: &str) -> InputCommand {
        let line = line.trim();

        if line.is_empty() {
            return InputCommand::Empty;
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };
        let invalid = |reason: &str| InputCommand::Invalid {
            input: line.to_string(),
            reason: reason.to_string(),
        };

        match head.to_lowercase().as_str() {
            "login" => match rest.split_once(char::is_whitespace) {
                Some((email, password)) => InputCommand::Login {
                    email: email.to_string(),
                    password: password.trim().to_string(),
                },
                None => invalid("usage: login <email> <password>"),
            },

            "logout" => InputCommand::Logout,

            "go" => match rest.parse() {
                Ok(view) => InputCommand::Go { view },
                Err(_) if rest.is_empty() => invalid("usage: go <view>"),
                Err(e) => invalid(&e.to_string()),
            },

            "verify" => InputCommand::Verify {
                secret: rest.to_string(),
            },

            "cancel" => InputCommand::Cancel,

            "toggle" => match rest.parse() {
                Ok(department) => InputCommand::Toggle { department },
                Err(_) if rest.is_empty() => invalid("usage: toggle <department>"),
                Err(e) => invalid(&e.to_string()),
            },

            "subscribe" => match parse_departments(rest) {
                Ok(departments) => InputCommand::Subscribe { departments },
                Err(reason) => invalid(&reason),
            },

            "whoami" => InputCommand::WhoAmI,
            "dashboard" => InputCommand::Dashboard,
            "nav" => InputCommand::Nav,

            "docs" => match Options::parse(rest, &["dept", "category"]) {
                Ok(opts) => InputCommand::Docs {
                    search: opts.positional(),
                    department: opts.get("dept"),
                    category: opts.get("category"),
                },
                Err(reason) => invalid(&reason),
            },

            "upload" => match Options::parse(rest, &["dept", "category", "version", "file"]) {
                Ok(opts) => match (
                    opts.positional(),
                    opts.get("dept"),
                    opts.get("category"),
                    opts.get("file"),
                ) {
                    (Some(name), Some(department), Some(category), Some(file)) => {
                        InputCommand::Upload {
                            name,
                            department,
                            category,
                            version: opts.get("version"),
                            file,
                        }
                    }
                    _ => invalid(UPLOAD_USAGE),
                },
                Err(reason) => invalid(&reason),
            },

            "open" | "download" => match rest.parse::<u32>() {
                Ok(id) if head.eq_ignore_ascii_case("open") => InputCommand::Open { id },
                Ok(id) => InputCommand::Download { id },
                Err(_) => invalid("expected a document id"),
            },

            "audit" => InputCommand::Audit,

            // Admin panel
            "users" => InputCommand::Users {
                search: (!rest.is_empty()).then(|| rest.to_string()),
            },
            "roles" => InputCommand::Roles,
            "log" if rest.is_empty() || rest.eq_ignore_ascii_case("all") => {
                InputCommand::Log { kind: None }
            }
            "log" => match rest.parse::<EventKind>() {
                Ok(kind) => InputCommand::Log { kind: Some(kind) },
                Err(e) => invalid(&e.to_string()),
            },

            // Chat (rest of line is the message, may be blank)
            "chat" => InputCommand::Chat {
                message: rest.to_string(),
            },

            "help" | "?" => InputCommand::Help,

            "q" | "quit" | "exit" => InputCommand::Quit,

            _ => InputCommand::Unknown {
                input: line.to_string(),
            },
        }
    }
}

/// Leading words plus `--name value...` options.
struct Options {
    positional: Vec<String>,
    values: Vec<(String, String)>,
}

impl Options {
    /// Splits `rest` on `--name` markers. `--name=value` is also accepted.
    ///
    /// Unknown, repeated, or empty options are errors.
    fn parse(rest: &str, allowed: &[&str]) -> Result<Self, String> {
        let mut positional = Vec::new();
        let mut options: Vec<(String, Vec<&str>)> = Vec::new();

        for token in rest.split_whitespace() {
            if let Some(flag) = token.strip_prefix("--") {
                let (name, inline) = match flag.split_once('=') {
                    Some((name, value)) => (name.to_lowercase(), Some(value)),
                    None => (flag.to_lowercase(), None),
                };
                if !allowed.contains(&name.as_str()) {
                    return Err(format!("unknown option '--{name}'"));
                }
                if options.iter().any(|(n, _)| *n == name) {
                    return Err(format!("option '--{name}' given twice"));
                }
                options.push((name, inline.filter(|v| !v.is_empty()).into_iter().collect()));
            } else if let Some((_, words)) = options.last_mut() {
                words.push(token);
            } else {
                positional.push(token.to_string());
            }
        }

        let values = options
            .into_iter()
            .map(|(name, words)| {
                if words.is_empty() {
                    Err(format!("option '--{name}' needs a value"))
                } else {
                    Ok((name, words.join(" ")))
                }
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { positional, values })
    }

    /// Leading words joined by single spaces, `None` if there were none.
    fn positional(&self) -> Option<String> {
        (!self.positional.is_empty()).then(|| self.positional.join(" "))
    }

    fn get(&self, name: &str) -> Option<String> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }
}

/// Parses `hr,sales` or `hr sales`. `none` or nothing is the empty list.
fn parse_departments(list: &str) -> Result<Vec<DepartmentId>, String> {
    if list.eq_ignore_ascii_case("none") {
        return Ok(Vec::new());
    }
    list.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<DepartmentId>().map_err(|e| e.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_types::View;

    #[test]
    fn parse_empty() {
        assert_eq!(InputParser::parse(""), InputCommand::Empty);
        assert_eq!(InputParser::parse("   "), InputCommand::Empty);
    }

    #[test]
    fn parse_login() {
        assert_eq!(
            InputParser::parse("login admin@company.com pass word"),
            InputCommand::Login {
                email: "admin@company.com".into(),
                password: "pass word".into(),
            }
        );
        assert!(matches!(
            InputParser::parse("login admin@company.com"),
            InputCommand::Invalid { .. }
        ));
    }

    #[test]
    fn parse_go() {
        assert_eq!(
            InputParser::parse("GO Admin"),
            InputCommand::Go { view: View::Admin }
        );
        assert!(matches!(
            InputParser::parse("go reports"),
            InputCommand::Invalid { ref reason, .. } if reason.contains("reports")
        ));
        assert!(matches!(InputParser::parse("go"), InputCommand::Invalid { .. }));
    }

    #[test]
    fn parse_verify_keeps_blank_secret() {
        assert_eq!(
            InputParser::parse("verify"),
            InputCommand::Verify {
                secret: String::new()
            }
        );
        assert!(InputParser::parse("verify x").carries_secret());
    }

    #[test]
    fn parse_toggle_accepts_portuguese_ids() {
        assert_eq!(
            InputParser::parse("toggle financeiro"),
            InputCommand::Toggle {
                department: DepartmentId::Finance
            }
        );
    }

    #[test]
    fn parse_subscribe_lists() {
        assert_eq!(
            InputParser::parse("subscribe it, finance hr"),
            InputCommand::Subscribe {
                departments: vec![DepartmentId::It, DepartmentId::Finance, DepartmentId::Hr]
            }
        );
        assert_eq!(
            InputParser::parse("subscribe none"),
            InputCommand::Subscribe {
                departments: vec![]
            }
        );
        assert!(matches!(
            InputParser::parse("subscribe hr,legal"),
            InputCommand::Invalid { .. }
        ));
    }

    fn docs(
        search: Option<&str>,
        department: Option<&str>,
        category: Option<&str>,
    ) -> InputCommand {
        InputCommand::Docs {
            search: search.map(Into::into),
            department: department.map(Into::into),
            category: category.map(Into::into),
        }
    }

    #[test]
    fn parse_documents() {
        assert_eq!(InputParser::parse("docs"), docs(None, None, None));
        assert_eq!(
            InputParser::parse("docs nda contract"),
            docs(Some("nda contract"), None, None)
        );
        assert_eq!(InputParser::parse("open 3"), InputCommand::Open { id: 3 });
        assert_eq!(
            InputParser::parse("download 8"),
            InputCommand::Download { id: 8 }
        );
        assert!(matches!(
            InputParser::parse("open three"),
            InputCommand::Invalid { .. }
        ));
    }

    #[test]
    fn parse_document_filters() {
        assert_eq!(
            InputParser::parse("docs --dept compliance"),
            docs(None, Some("compliance"), None)
        );
        assert_eq!(
            InputParser::parse("docs permit --category=Licenses --DEPT Operations"),
            docs(Some("permit"), Some("Operations"), Some("Licenses"))
        );
        // Values run until the next option
        assert_eq!(
            InputParser::parse("docs --category Powers of Attorney --dept Legal"),
            docs(None, Some("Legal"), Some("Powers of Attorney"))
        );

        for bad in ["docs --owner hr", "docs --dept", "docs --dept hr --dept it"] {
            assert!(
                matches!(InputParser::parse(bad), InputCommand::Invalid { .. }),
                "{bad}"
            );
        }
    }

    #[test]
    fn parse_upload() {
        assert_eq!(
            InputParser::parse(
                "upload Travel Policy --dept Compliance --category Policies --file ./travel policy.pdf"
            ),
            InputCommand::Upload {
                name: "Travel Policy".into(),
                department: "Compliance".into(),
                category: "Policies".into(),
                version: None,
                file: "./travel policy.pdf".into(),
            }
        );
        assert!(matches!(
            InputParser::parse("upload NDA --file a.pdf --version v2 --category Contracts --dept HR"),
            InputCommand::Upload { version: Some(ref v), .. } if v == "v2"
        ));

        // Name, department, category and file are all required
        for bad in [
            "upload",
            "upload --dept HR --category Contracts --file a.pdf",
            "upload NDA --category Contracts --file a.pdf",
            "upload NDA --dept HR --category Contracts",
        ] {
            assert!(
                matches!(
                    InputParser::parse(bad),
                    InputCommand::Invalid { ref reason, .. } if reason.starts_with("usage: upload")
                ),
                "{bad}"
            );
        }
    }

    #[test]
    fn parse_admin_commands() {
        assert_eq!(InputParser::parse("users"), InputCommand::Users { search: None });
        assert_eq!(
            InputParser::parse("users ana silva"),
            InputCommand::Users {
                search: Some("ana silva".into())
            }
        );
        assert_eq!(InputParser::parse("ROLES"), InputCommand::Roles);
        assert_eq!(InputParser::parse("log"), InputCommand::Log { kind: None });
        assert_eq!(InputParser::parse("log all"), InputCommand::Log { kind: None });
        assert_eq!(
            InputParser::parse("log Export"),
            InputCommand::Log {
                kind: Some(EventKind::Export)
            }
        );
        assert!(matches!(
            InputParser::parse("log deletes"),
            InputCommand::Invalid { ref reason, .. } if reason.contains("deletes")
        ));
    }

    #[test]
    fn parse_chat_rest_of_line() {
        assert_eq!(
            InputParser::parse("chat  where is the  LGPD policy?"),
            InputCommand::Chat {
                message: "where is the  LGPD policy?".into()
            }
        );
    }

    #[test]
    fn parse_simple_commands() {
        assert_eq!(InputParser::parse("logout"), InputCommand::Logout);
        assert_eq!(InputParser::parse("cancel"), InputCommand::Cancel);
        assert_eq!(InputParser::parse("whoami"), InputCommand::WhoAmI);
        assert_eq!(InputParser::parse("dashboard"), InputCommand::Dashboard);
        assert_eq!(InputParser::parse("nav"), InputCommand::Nav);
        assert_eq!(InputParser::parse("audit"), InputCommand::Audit);
        assert_eq!(InputParser::parse("?"), InputCommand::Help);
        assert!(InputParser::parse("exit").is_quit());
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            InputParser::parse("sudo rm -rf"),
            InputCommand::Unknown {
                input: "sudo rm -rf".into()
            }
        );
    }
}
