//! Configuration management for mysql-session.
//!
//! Handles loading configuration from TOML files and environment variables,
//! with support for named connections.

use crate::command::EscapeMode;
use crate::error::{Result, SessionError};
use crate::session::{ConnectionParams, DEFAULT_HOST};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Settings that apply to every connection.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named connections.
    #[serde(default)]
    pub connections: HashMap<String, ConnectionConfig>,
}

/// Settings shared by all connections.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Defaults {
    /// How query text is escaped.
    #[serde(default)]
    pub escape_mode: EscapeMode,
}

/// Connection configuration as read from a file, CLI or environment.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Server host.
    pub host: Option<String>,

    /// Server port.
    pub port: Option<u16>,

    /// Unix socket path.
    pub socket: Option<String>,

    /// Database selected for queries.
    pub database: Option<String>,

    /// Login user.
    pub user: Option<String>,

    /// Login password (not recommended to store in config).
    pub password: Option<String>,
}

impl ConnectionConfig {
    /// Merges another config into this one, with the other taking precedence.
    pub fn merge(&mut self, other: &ConnectionConfig) {
        if other.host.is_some() {
            self.host = other.host.clone();
        }
        if other.port.is_some() {
            self.port = other.port;
        }
        if other.socket.is_some() {
            self.socket = other.socket.clone();
        }
        if other.database.is_some() {
            self.database = other.database.clone();
        }
        if other.user.is_some() {
            self.user = other.user.clone();
        }
        if other.password.is_some() {
            self.password = other.password.clone();
        }
    }

    /// Applies the mysql client's environment variables as defaults.
    pub fn apply_env_defaults(&mut self) {
        self.apply_defaults_from(|key| std::env::var(key).ok());
    }

    fn apply_defaults_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.host.is_none() {
            self.host = lookup("MYSQL_HOST");
        }
        if self.port.is_none() {
            self.port = lookup("MYSQL_TCP_PORT").and_then(|p| p.parse().ok());
        }
        if self.socket.is_none() {
            self.socket = lookup("MYSQL_UNIX_PORT");
        }
        if self.user.is_none() {
            self.user = lookup("MYSQL_USER");
        }
        if self.password.is_none() {
            self.password = lookup("MYSQL_PWD");
        }
    }

    /// Returns a display-safe string (no password) for logs.
    pub fn display_string(&self) -> String {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let database = self.database.as_deref().unwrap_or("(none)");
        match (&self.socket, self.port) {
            (Some(socket), _) => format!("{database} @ {socket}"),
            (None, Some(port)) => format!("{database} @ {host}:{port}"),
            (None, None) => format!("{database} @ {host}"),
        }
    }

    /// Converts to session parameters, defaulting the host.
    pub fn to_params(&self) -> ConnectionParams {
        ConnectionParams {
            user: self.user.clone(),
            password: self.password.clone(),
            host: self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.port,
            socket: self.socket.clone(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mysql-session")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| SessionError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            SessionError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Gets a named connection, or the default connection if name is None.
    pub fn get_connection(&self, name: Option<&str>) -> Option<&ConnectionConfig> {
        let key = name.unwrap_or("default");
        self.connections.get(key)
    }
}
