//! Command line construction for the mysql client.
//!
//! Turns connection parameters plus a raw query into a single string that is
//! handed to a shell. Credentials are escaped as shell words; the query text
//! only gets the narrow legacy escaping unless [`EscapeMode::Strict`] is
//! selected.

use crate::session::ConnectionParams;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the client binary every command starts with.
pub const CLIENT_BINARY: &str = "mysql";

/// How query text is embedded in the `-e` argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapeMode {
    /// Escape only `\`, `"` and `$`, then wrap the query in double quotes.
    ///
    /// Backticks and other shell metacharacters pass through untouched, so
    /// this does not protect against shell injection.
    #[default]
    Legacy,
    /// Escape the whole query as a single shell word.
    Strict,
}

impl EscapeMode {
    /// Returns the mode as a string for config files and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for EscapeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EscapeMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "strict" => Ok(Self::Strict),
            _ => Err(format!(
                "Invalid escape mode: {s}. Expected: legacy or strict"
            )),
        }
    }
}

/// Builds mysql client invocations for one set of connection parameters.
#[derive(Debug, Clone, Copy)]
pub struct CommandBuilder<'a> {
    params: &'a ConnectionParams,
    escape_mode: EscapeMode,
}

impl<'a> CommandBuilder<'a> {
    /// Creates a builder using legacy query escaping.
    pub fn new(params: &'a ConnectionParams) -> Self {
        Self {
            params,
            escape_mode: EscapeMode::Legacy,
        }
    }

    /// Sets the query escaping mode.
    pub fn escape_mode(mut self, mode: EscapeMode) -> Self {
        self.escape_mode = mode;
        self
    }

    /// Builds the command line for `query`, optionally selecting `database`.
    ///
    /// Clause order: client, `-u`, `-p`, `-S` or `-h`, `--port`, database,
    /// then `-s -e`. Absent values drop their clause; nothing here fails.
    pub fn build(&self, query: &str, database: &str) -> String {
        let mut command = String::from(CLIENT_BINARY);

        if let Some(user) = &self.params.user {
            command.push_str(" -u");
            command.push_str(&shell_escape(user));
        }
        if let Some(password) = &self.params.password {
            command.push_str(" -p");
            command.push_str(&shell_escape(password));
        }

        match &self.params.socket {
            Some(socket) => {
                command.push_str(" -S ");
                command.push_str(socket);
            }
            None => {
                command.push_str(" -h ");
                command.push_str(&self.params.host);
            }
        }

        if let Some(port) = self.params.port {
            command.push_str(" --port ");
            command.push_str(&port.to_string());
        }

        if !database.is_empty() {
            command.push(' ');
            command.push_str(database);
        }

        match self.escape_mode {
            EscapeMode::Legacy => {
                command.push_str(" -s -e \"");
                command.push_str(&escape_query(query));
                command.push('"');
            }
            EscapeMode::Strict => {
                command.push_str(" -s -e ");
                command.push_str(&shell_escape(query));
            }
        }

        command
    }
}

/// Escapes backslash, double quote and dollar for use inside double quotes.
///
/// Backslashes go first so the ones added for `"` and `$` are not doubled.
pub fn escape_query(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "\\$")
}

/// Escapes a string so a POSIX shell reads it back as exactly one word.
///
/// Every character outside `[A-Za-z0-9_-.,:+/@]` is prefixed with a
/// backslash, a newline is wrapped as `'\n'` and the empty string becomes
/// `''`.
pub fn shell_escape(word: &str) -> String {
    if word.is_empty() {
        return "''".to_string();
    }

    let mut escaped = String::with_capacity(word.len() * 2);
    for ch in word.chars() {
        match ch {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '_' | '-' | '.' | ',' | ':' | '+' | '/' | '@' => {
                escaped.push(ch)
            }
            '\n' => escaped.push_str("'\n'"),
            _ => {
                escaped.push('\\');
                escaped.push(ch);
            }
        }
    }
    escaped
}
