//! Mock executor for testing.
//!
//! Replays scripted outputs in order and records every command line it was
//! asked to run, so tests can assert on both sides of the exchange.

use super::{CommandExecutor, CommandOutput, ExecOptions};
use crate::error::Result;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A command observed by [`MockExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    /// The command line exactly as handed to the executor.
    pub command: String,
    /// The command line after applying the redaction pattern.
    pub logged: String,
    /// Whether a redaction pattern was supplied.
    pub redacted: bool,
}

/// An executor that returns predefined outputs.
///
/// Once the script runs out every further call returns an empty successful
/// output.
#[derive(Debug, Default)]
pub struct MockExecutor {
    outputs: Mutex<VecDeque<CommandOutput>>,
    calls: Mutex<Vec<RecordedCommand>>,
}

impl MockExecutor {
    /// Creates a mock with no scripted outputs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock that replays `outputs` in order.
    pub fn with_outputs(outputs: impl IntoIterator<Item = CommandOutput>) -> Self {
        Self {
            outputs: Mutex::new(outputs.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Appends an output to the script.
    pub fn push_output(&self, output: CommandOutput) {
        lock(&self.outputs).push_back(output);
    }

    /// Returns every command run so far.
    pub fn calls(&self) -> Vec<RecordedCommand> {
        lock(&self.calls).clone()
    }

    /// Returns how many commands have been run.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl CommandExecutor for MockExecutor {
    fn execute(&self, command: &str, options: &ExecOptions) -> Result<CommandOutput> {
        lock(&self.calls).push(RecordedCommand {
            command: command.to_string(),
            logged: options.loggable(command).into_owned(),
            redacted: options.redact_pattern.is_some(),
        });

        Ok(lock(&self.outputs).pop_front().unwrap_or_default())
    }
}
