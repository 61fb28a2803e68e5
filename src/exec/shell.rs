//! Executor backed by the host shell.

use super::{CommandExecutor, CommandOutput, ExecOptions};
use crate::error::{Result, SessionError};
use std::process::Command;
use std::time::Instant;
use tracing::debug;

/// Runs command lines through `sh -c` (or `cmd /C` on Windows).
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor {
    shell: Option<String>,
}

impl ShellExecutor {
    /// Creates an executor using the platform's default shell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an executor that runs commands with `shell -c`.
    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: Some(shell.into()),
        }
    }

    fn command_for(&self, command: &str) -> Command {
        if let Some(shell) = &self.shell {
            let mut cmd = Command::new(shell);
            cmd.arg("-c").arg(command);
            return cmd;
        }

        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        }
    }
}

impl CommandExecutor for ShellExecutor {
    fn execute(&self, command: &str, options: &ExecOptions) -> Result<CommandOutput> {
        let loggable = options.loggable(command);
        debug!("Running: {}", loggable);

        let start = Instant::now();
        let output = self
            .command_for(command)
            .output()
            .map_err(|e| SessionError::execution(format!("Failed to run `{loggable}`: {e}")))?;

        let exit_code = output.status.code().unwrap_or(-1);
        debug!(
            "Finished in {:?} with exit code {}",
            start.elapsed(),
            exit_code
        );

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code,
        })
    }
}
