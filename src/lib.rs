//! mysql-session - one-shot MySQL queries through the mysql command-line client.
//!
//! This library exposes the core modules for use by the binary and in
//! integration tests.

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod session;

pub use command::{CommandBuilder, EscapeMode};
pub use error::{Result, SessionError};
pub use exec::{CommandExecutor, CommandOutput, ExecOptions, MockExecutor, ShellExecutor};
pub use platform::{FixedPlatform, HostPlatform, Platform};
pub use session::{ConnectionParams, Lines, QueryResult, Session, SessionBuilder};
