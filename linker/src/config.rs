//! Run settings and credential resolution.

use crate::dispatch::{DispatchOptions, DEFAULT_LINK_TYPE};
use crate::error::{LinkerError, LinkerResult};
use release_linker_tracker::IssueKey;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Environment variable holding the tracker user name.
pub const USER_ENV: &str = "JIRA_USER";
/// Environment variable holding the tracker password.
pub const PASSWORD_ENV: &str = "JIRA_PASS";

/// Immutable settings for one linking run.
#[derive(Debug, Clone)]
pub struct LinkerSettings {
    /// Tag whose predecessor bounds the scanned history.
    pub tag: String,
    /// Ticket that receives the links.
    pub release_ticket: IssueKey,
    pub repo_path: PathBuf,
    pub link_type: String,
    pub dry_run: bool,
}

impl LinkerSettings {
    pub fn new(
        tag: impl Into<String>,
        release_ticket: IssueKey,
        repo_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            tag: tag.into(),
            release_ticket,
            repo_path: repo_path.into(),
            link_type: DEFAULT_LINK_TYPE.to_string(),
            dry_run: false,
        }
    }

    /// Validate a release ticket reference given on the command line.
    pub fn parse_release_ticket(raw: &str) -> LinkerResult<IssueKey> {
        let trimmed = raw.trim();
        IssueKey::parse(trimmed).map_err(|_| LinkerError::InvalidTicketReference(raw.to_string()))
    }

    pub fn dispatch_options(&self) -> DispatchOptions {
        DispatchOptions {
            release_ticket: self.release_ticket.clone(),
            link_type: self.link_type.clone(),
            dry_run: self.dry_run,
        }
    }
}

/// Tracker login.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Fill in whatever the command line and environment did not provide by
    /// asking `prompt`. The password is always read without echo.
    pub fn resolve(
        username: Option<String>,
        password: Option<String>,
        prompt: &mut impl Prompt,
    ) -> LinkerResult<Self> {
        let username = match non_empty(username) {
            Some(value) => value,
            None => required("jirauser", prompt.ask("jirauser"))?,
        };
        let password = match non_empty(password) {
            Some(value) => value,
            None => required("jirapass", prompt.ask_hidden("jirapass"))?,
        };

        Ok(Self { username, password })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(label: &str, answer: io::Result<String>) -> LinkerResult<String> {
    let value =
        answer.map_err(|e| LinkerError::Config(format!("failed to read {}: {}", label, e)))?;
    if value.trim().is_empty() {
        return Err(LinkerError::Config(format!("{} is required", label)));
    }
    Ok(value)
}

/// Interactive source for missing credentials.
pub trait Prompt {
    /// Ask for a value that may be shown while typed.
    fn ask(&mut self, label: &str) -> io::Result<String>;

    /// Ask for a value without echoing it.
    fn ask_hidden(&mut self, label: &str) -> io::Result<String>;
}

/// Prompts on stderr and reads stdin; hidden answers are read from the
/// terminal with echo turned off.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&mut self, label: &str) -> io::Result<String> {
        StreamPrompt::new(io::stdin().lock(), io::stderr()).ask(label)
    }

    fn ask_hidden(&mut self, label: &str) -> io::Result<String> {
        rpassword::prompt_password(format!("{}: ", label))
    }
}

/// Prompts written to `output`, answers read line by line from `input`.
pub struct StreamPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StreamPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn label(&mut self, label: &str) -> io::Result<()> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> Prompt for StreamPrompt<R, W> {
    fn ask(&mut self, label: &str) -> io::Result<String> {
        self.label(label)?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn ask_hidden(&mut self, label: &str) -> io::Result<String> {
        self.label(label)?;
        rpassword::read_password_from_bufread(&mut self.input)
    }
}
