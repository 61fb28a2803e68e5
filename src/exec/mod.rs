//! Command execution abstraction.
//!
//! Sessions never spawn processes themselves. They hand a finished command
//! line to a [`CommandExecutor`], which runs it through a shell and reports
//! what happened. A nonzero exit status is part of the normal output, not an
//! error.

mod mock;
mod redact;
mod shell;

pub use mock::{MockExecutor, RecordedCommand};
pub use redact::{mask_token, redact, REDACTED};
pub use shell::ShellExecutor;

use crate::error::Result;
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;

/// Captured result of running one command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    /// Everything the command wrote to stdout.
    pub stdout: String,

    /// Everything the command wrote to stderr.
    pub stderr: String,

    /// Process exit code; `-1` when the process was killed by a signal.
    pub exit_code: i32,
}

impl CommandOutput {
    /// Creates an output from its three parts.
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, exit_code: i32) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    /// Shorthand for a successful run that only wrote to stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self::new(stdout, "", 0)
    }
}

/// Per-call execution options.
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    /// Pattern whose matches must be hidden before the command is logged.
    pub redact_pattern: Option<Regex>,

    /// Literal `(prefix, secret)` tokens masked after the pattern runs.
    pub masked_tokens: Vec<(String, String)>,
}

impl ExecOptions {
    /// Options that redact matches of `pattern` from logs.
    pub fn redacting(pattern: Regex) -> Self {
        Self {
            redact_pattern: Some(pattern),
            masked_tokens: Vec::new(),
        }
    }

    /// Also masks every `prefix` + `secret` token in logged commands.
    pub fn masking(mut self, prefix: impl Into<String>, secret: impl Into<String>) -> Self {
        self.masked_tokens.push((prefix.into(), secret.into()));
        self
    }

    /// Returns `command` with the redaction pattern and masked tokens applied.
    pub fn loggable<'a>(&self, command: &'a str) -> Cow<'a, str> {
        let mut text = match &self.redact_pattern {
            Some(pattern) => redact(pattern, command),
            None => Cow::Borrowed(command),
        };
        for (prefix, secret) in &self.masked_tokens {
            if let Cow::Owned(masked) = mask_token(&text, prefix, secret) {
                text = Cow::Owned(masked);
            }
        }
        text
    }
}

/// Runs shell command lines and captures their output.
pub trait CommandExecutor: Send + Sync {
    /// Runs `command` to completion.
    ///
    /// Returns an error only when the command could not be started at all.
    fn execute(&self, command: &str, options: &ExecOptions) -> Result<CommandOutput>;
}
