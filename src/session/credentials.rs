//! Fallback credential resolution.
//!
//! Debian-based MySQL packages ship an administrative login in
//! `/etc/mysql/debian.cnf`. When a session is created without a user or
//! password, that file is read (through the executor, so it works on remote
//! targets too) and its `user`/`password` pair is adopted if both are there.

use crate::exec::{CommandExecutor, ExecOptions};
use crate::platform::Platform;
use regex::Regex;
use tracing::{debug, warn};

/// Location of the Debian maintenance credentials.
pub const DEBIAN_CREDENTIALS_PATH: &str = "/etc/mysql/debian.cnf";

/// Platform family on which fallback resolution is skipped.
const SKIPPED_FAMILY: &str = "windows";

/// A user/password pair found in a credentials file.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Returns the shell command that prints the credentials file if present.
pub fn read_command(path: &str) -> String {
    format!("test -f {path} && cat {path}")
}

/// Extracts `user = ...` and `password = ...` from an option file.
///
/// Values are single tokens; a line whose value contains a space does not
/// match. The first matching line wins. Returns `None` unless both keys are
/// found.
pub fn parse_option_file(content: &str) -> Option<Credentials> {
    let user = option_value(content, "user")?;
    let password = option_value(content, "password")?;
    Some(Credentials { user, password })
}

fn option_value(content: &str, key: &str) -> Option<String> {
    let pattern = format!(r"(?m)^\s*{key}\s*=\s*(\S*)\s*$");
    let re = Regex::new(&pattern).ok()?;
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Looks up fallback credentials through `executor`.
///
/// Returns `None` on Windows-family platforms, when the file is missing or
/// empty, when it lacks either key, or when the command cannot be run.
pub fn resolve_fallback(
    executor: &dyn CommandExecutor,
    platform: &dyn Platform,
) -> Option<Credentials> {
    if platform.in_family(SKIPPED_FAMILY) {
        debug!("Skipping fallback credentials on {SKIPPED_FAMILY}");
        return None;
    }

    let command = read_command(DEBIAN_CREDENTIALS_PATH);
    let output = match executor.execute(&command, &ExecOptions::default()) {
        Ok(output) => output,
        Err(e) => {
            warn!("Could not read fallback credentials: {e}");
            return None;
        }
    };

    if output.stdout.is_empty() {
        debug!("No fallback credentials at {DEBIAN_CREDENTIALS_PATH}");
        return None;
    }

    let credentials = parse_option_file(&output.stdout);
    match &credentials {
        Some(found) => debug!(
            "Using fallback credentials for user '{}' from {DEBIAN_CREDENTIALS_PATH}",
            found.user
        ),
        None => debug!("Incomplete credentials in {DEBIAN_CREDENTIALS_PATH}, ignoring"),
    }
    credentials
}
