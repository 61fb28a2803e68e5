//! Connection parameters for a session.

use std::fmt;

/// Host used when none is given.
pub const DEFAULT_HOST: &str = "localhost";

/// Everything the mysql client needs to know to reach a server.
///
/// When `socket` is set it wins over `host` in the built command.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    /// Login user.
    pub user: Option<String>,

    /// Login password.
    pub password: Option<String>,

    /// Server host.
    pub host: String,

    /// Server port; the client default applies when absent.
    pub port: Option<u16>,

    /// Unix socket path.
    pub socket: Option<String>,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            user: None,
            password: None,
            host: DEFAULT_HOST.to_string(),
            port: None,
            socket: None,
        }
    }
}

impl ConnectionParams {
    /// Creates parameters for `host` with no credentials.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    /// Returns true if both user and password are present.
    pub fn has_credentials(&self) -> bool {
        self.user.is_some() && self.password.is_some()
    }

    /// Returns a display-safe string (no password) for logs.
    pub fn display_string(&self) -> String {
        let user = self.user.as_deref().unwrap_or("<none>");
        match (&self.socket, self.port) {
            (Some(socket), _) => format!("{user} @ {socket}"),
            (None, Some(port)) => format!("{user} @ {}:{port}", self.host),
            (None, None) => format!("{user} @ {}", self.host),
        }
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("socket", &self.socket)
            .finish()
    }
}
