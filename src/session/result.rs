//! Query results and output classification.
//!
//! The mysql client happily exits 0 after failing to connect or
//! authenticate, so the exit code alone cannot tell success from failure.
//! [`OutputClassifier`] also looks for the failure phrasings the client is
//! known to print.

use crate::exec::CommandOutput;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Matches the client's connection failure message.
pub const CONNECT_FAILURE_PATTERN: &str = r"Can't connect to .* MySQL server";

/// Matches a line starting with `error:` in lower-cased output.
pub const ERROR_LINE_PATTERN: &str = r"(?m)^error:.*";

/// Outcome of one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    /// Trimmed stdout on success; `stdout + "\n" + stderr` on failure.
    pub raw_output: String,

    /// Human readable label, e.g. `MySQL query: show databases;`.
    pub description: String,

    /// Whether the query was classified as successful.
    pub succeeded: bool,
}

impl QueryResult {
    /// Builds a successful result from the client's stdout.
    pub fn success(query: &str, stdout: &str) -> Self {
        Self {
            raw_output: stdout.trim().to_string(),
            description: format!("MySQL query: {query}"),
            succeeded: true,
        }
    }

    /// Builds a failed result from both output streams.
    pub fn failure(query: &str, stdout: &str, stderr: &str) -> Self {
        Self {
            raw_output: format!("{stdout}\n{stderr}"),
            description: format!("MySQL query with errors: {query}"),
            succeeded: false,
        }
    }

    /// Returns a line-oriented view of the output.
    pub fn as_lines(&self) -> Lines<'_> {
        Lines::new(&self.raw_output, &self.description)
    }

    /// Returns the output split into lines.
    pub fn lines(&self) -> Vec<&str> {
        self.as_lines().lines()
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Read-only view over query output as a sequence of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lines<'a> {
    output: &'a str,
    description: &'a str,
}

impl<'a> Lines<'a> {
    /// Wraps `output` with a descriptive label.
    pub fn new(output: &'a str, description: &'a str) -> Self {
        Self {
            output,
            description,
        }
    }

    /// The full output text.
    pub fn output(&self) -> &'a str {
        self.output
    }

    /// The descriptive label.
    pub fn description(&self) -> &'a str {
        self.description
    }

    /// Splits the output on `\n`, dropping trailing empty lines.
    pub fn lines(&self) -> Vec<&'a str> {
        let mut lines: Vec<&str> = self.output.split('\n').collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        lines
    }
}

impl fmt::Display for Lines<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description)
    }
}

/// Decides whether client output describes a failed query.
#[derive(Debug, Clone)]
pub struct OutputClassifier {
    connect_failure: Regex,
    error_line: Regex,
}

impl Default for OutputClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputClassifier {
    /// Compiles the failure patterns.
    pub fn new() -> Self {
        Self {
            connect_failure: Regex::new(CONNECT_FAILURE_PATTERN)
                .expect("connect failure pattern is valid"),
            error_line: Regex::new(ERROR_LINE_PATTERN).expect("error line pattern is valid"),
        }
    }

    /// Returns true if the output must be treated as a failure.
    ///
    /// Checked in order: nonzero exit code, connection failure message,
    /// any line starting with `error:` (case-insensitive).
    pub fn is_failure(&self, output: &CommandOutput) -> bool {
        if output.exit_code != 0 {
            return true;
        }
        let combined = format!("{}\n{}", output.stdout, output.stderr);
        self.connect_failure.is_match(&combined)
            || self.error_line.is_match(&combined.to_lowercase())
    }

    /// Classifies the output of running `query`.
    pub fn classify(&self, query: &str, output: &CommandOutput) -> QueryResult {
        if self.is_failure(output) {
            QueryResult::failure(query, &output.stdout, &output.stderr)
        } else {
            QueryResult::success(query, &output.stdout)
        }
    }
}
