//! Command-line argument parsing for mysql-session.

use crate::command::EscapeMode;
use crate::config::ConnectionConfig;
use clap::Parser;
use std::path::PathBuf;

/// How query results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Output lines as the client printed them.
    #[default]
    Text,
    /// The full result as a JSON object.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s}. Expected: text or json")),
        }
    }
}

/// Run a query through the mysql client and report whether it succeeded.
#[derive(Parser, Debug)]
#[command(name = "mysql-session")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQL to run
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Database user
    #[arg(short = 'u', long, value_name = "USER")]
    pub user: Option<String>,

    /// Database password
    #[arg(short = 'p', long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Database host
    #[arg(short = 'H', long, value_name = "HOST")]
    pub host: Option<String>,

    /// Database port
    #[arg(short = 'P', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Unix socket path (takes precedence over host)
    #[arg(short = 'S', long, value_name = "PATH")]
    pub socket: Option<String>,

    /// Database to run the query in
    #[arg(short = 'd', long, value_name = "DATABASE")]
    pub database: Option<String>,

    /// Use named connection from config
    #[arg(short = 'c', long, value_name = "NAME")]
    pub connection: Option<String>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Escape the whole query as one shell word
    #[arg(long)]
    pub strict_escaping: bool,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: OutputFormat,

    /// Print the command line (password redacted) instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Converts CLI arguments to a ConnectionConfig.
    ///
    /// Only flags that were given are set, so the result can be merged over
    /// file config.
    pub fn to_connection_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            host: self.host.clone(),
            port: self.port,
            socket: self.socket.clone(),
            database: self.database.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
        }
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }

    /// Returns the named connection to use, if specified.
    pub fn connection_name(&self) -> Option<&str> {
        self.connection.as_deref()
    }

    /// Returns the escape mode forced by flags, if any.
    pub fn escape_mode_override(&self) -> Option<EscapeMode> {
        self.strict_escaping.then_some(EscapeMode::Strict)
    }
}
