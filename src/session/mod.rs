//! MySQL query sessions.
//!
//! A [`Session`] owns one set of connection parameters and runs each query
//! as a single invocation of the mysql client through an injected
//! [`CommandExecutor`]. Missing credentials are looked up once, while the
//! session is being built; a session that still lacks a user or password
//! afterwards is disabled and rejects every query.

mod credentials;
mod params;
mod result;

pub use credentials::{
    parse_option_file, read_command, resolve_fallback, Credentials, DEBIAN_CREDENTIALS_PATH,
};
pub use params::{ConnectionParams, DEFAULT_HOST};
pub use result::{
    Lines, OutputClassifier, QueryResult, CONNECT_FAILURE_PATTERN, ERROR_LINE_PATTERN,
};

use crate::command::{shell_escape, CommandBuilder, EscapeMode};
use crate::error::{Result, SessionError};
use crate::exec::{CommandExecutor, ExecOptions};
use crate::platform::Platform;
use regex::Regex;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Hides the password in logged mysql command lines.
pub const PASSWORD_REDACT_PATTERN: &str = r"(mysql -u\w+ -p).+(\s-(h|S).*)";

/// Whether a session can run queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Credentials are present.
    Ready,
    /// No usable credentials were found; every query fails.
    Disabled,
}

/// A credentialed handle that runs one-shot queries via the mysql client.
pub struct Session {
    params: ConnectionParams,
    state: SessionState,
    escape_mode: EscapeMode,
    executor: Arc<dyn CommandExecutor>,
    classifier: OutputClassifier,
    redact_pattern: Regex,
}

impl Session {
    /// Creates a session, resolving missing credentials first.
    pub fn new(
        params: ConnectionParams,
        executor: Arc<dyn CommandExecutor>,
        platform: &dyn Platform,
    ) -> Self {
        Self::with_escape_mode(params, EscapeMode::default(), executor, platform)
    }

    /// Creates a session that escapes queries with `escape_mode`.
    pub fn with_escape_mode(
        params: ConnectionParams,
        escape_mode: EscapeMode,
        executor: Arc<dyn CommandExecutor>,
        platform: &dyn Platform,
    ) -> Self {
        let params = resolve_params(params, executor.as_ref(), platform);
        let state = if params.has_credentials() {
            SessionState::Ready
        } else {
            warn!("{}", SessionError::MissingAuthentication);
            SessionState::Disabled
        };

        Self {
            params,
            state,
            escape_mode,
            executor,
            classifier: OutputClassifier::new(),
            redact_pattern: Regex::new(PASSWORD_REDACT_PATTERN)
                .expect("password redaction pattern is valid"),
        }
    }

    /// Starts building a session.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Runs `query` without selecting a database.
    pub fn query(&self, query: &str) -> Result<QueryResult> {
        self.query_in(query, "")
    }

    /// Runs `query` against `database` (empty for none).
    ///
    /// A query the server rejects is returned as a failed [`QueryResult`];
    /// `Err` means the session is disabled or the client could not be run.
    pub fn query_in(&self, query: &str, database: &str) -> Result<QueryResult> {
        if self.state == SessionState::Disabled {
            return Err(SessionError::MissingAuthentication);
        }

        let command = self.command_line(query, database);
        let options = self.exec_options();
        let output = self.executor.execute(&command, &options)?;
        let result = self.classifier.classify(query, &output);
        info!(
            succeeded = result.succeeded,
            exit_code = output.exit_code,
            "{}",
            result.description
        );
        Ok(result)
    }

    /// Returns the command line that would run `query`.
    pub fn command_line(&self, query: &str, database: &str) -> String {
        CommandBuilder::new(&self.params)
            .escape_mode(self.escape_mode)
            .build(query, database)
    }

    /// Returns the command line for `query` with the password hidden.
    pub fn redacted_command_line(&self, query: &str, database: &str) -> String {
        let command = self.command_line(query, database);
        self.exec_options().loggable(&command).into_owned()
    }

    /// Redaction is only requested when there is a password to hide.
    ///
    /// The escaped `-p` token is masked as well, since the pattern misses
    /// user names outside `\w` and passwords spanning lines.
    fn exec_options(&self) -> ExecOptions {
        match &self.params.password {
            Some(password) => ExecOptions::redacting(self.redact_pattern.clone())
                .masking(" -p", shell_escape(password)),
            None => ExecOptions::default(),
        }
    }

    /// The resolved connection parameters.
    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    /// The current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns true if the session rejects all queries.
    pub fn is_disabled(&self) -> bool {
        self.state == SessionState::Disabled
    }

    /// The query escaping mode in use.
    pub fn escape_mode(&self) -> EscapeMode {
        self.escape_mode
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MySQL Session")
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("params", &self.params)
            .field("state", &self.state)
            .field("escape_mode", &self.escape_mode)
            .finish_non_exhaustive()
    }
}

/// Fills in missing credentials from the fallback source.
///
/// Only a complete pair is adopted; otherwise `params` comes back unchanged.
fn resolve_params(
    mut params: ConnectionParams,
    executor: &dyn CommandExecutor,
    platform: &dyn Platform,
) -> ConnectionParams {
    if params.has_credentials() {
        return params;
    }
    if let Some(credentials) = resolve_fallback(executor, platform) {
        params.user = Some(credentials.user);
        params.password = Some(credentials.password);
    }
    params
}

/// Builder for [`Session`].
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    params: ConnectionParams,
    escape_mode: EscapeMode,
}

impl SessionBuilder {
    /// Sets the login user.
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.params.user = Some(user.into());
        self
    }

    /// Sets the login password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.params.password = Some(password.into());
        self
    }

    /// Sets the server host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.params.host = host.into();
        self
    }

    /// Sets the server port.
    pub fn port(mut self, port: u16) -> Self {
        self.params.port = Some(port);
        self
    }

    /// Sets the unix socket path.
    pub fn socket(mut self, socket: impl Into<String>) -> Self {
        self.params.socket = Some(socket.into());
        self
    }

    /// Replaces all connection parameters.
    pub fn params(mut self, params: ConnectionParams) -> Self {
        self.params = params;
        self
    }

    /// Sets the query escaping mode.
    pub fn escape_mode(mut self, mode: EscapeMode) -> Self {
        self.escape_mode = mode;
        self
    }

    /// Builds the session, resolving missing credentials first.
    pub fn build(self, executor: Arc<dyn CommandExecutor>, platform: &dyn Platform) -> Session {
        Session::with_escape_mode(self.params, self.escape_mode, executor, platform)
    }
}
