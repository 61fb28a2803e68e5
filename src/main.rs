//! mysql-session - one-shot MySQL queries through the mysql command-line client.

use mysql_session::cli::{Cli, OutputFormat};
use mysql_session::config::{Config, ConnectionConfig};
use mysql_session::error::{Result, SessionError};
use mysql_session::{logging, HostPlatform, QueryResult, Session, ShellExecutor};
use std::sync::Arc;
use tracing::{error, info};

/// Exit code when the query ran but was classified as failed.
const EXIT_QUERY_FAILED: i32 = 1;

/// Exit code when no session could be established.
const EXIT_NO_SESSION: i32 = 2;

fn main() {
    let cli = Cli::parse_args();
    logging::init_stderr_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{}: {}", e.category(), e);
            let code = if e.is_missing_authentication() {
                EXIT_NO_SESSION
            } else {
                EXIT_QUERY_FAILED
            };
            std::process::exit(code);
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let connection = resolve_connection(cli, &config)?;
    info!("Connection: {}", connection.display_string());

    let escape_mode = cli
        .escape_mode_override()
        .unwrap_or(config.defaults.escape_mode);
    let session = Session::builder()
        .params(connection.to_params())
        .escape_mode(escape_mode)
        .build(Arc::new(ShellExecutor::new()), &HostPlatform);

    let database = connection.database.as_deref().unwrap_or("");

    if cli.dry_run {
        println!("{}", session.redacted_command_line(&cli.query, database));
        return Ok(0);
    }

    let result = session.query_in(&cli.query, database)?;
    print_result(&result, cli.format)?;

    Ok(if result.succeeded { 0 } else { EXIT_QUERY_FAILED })
}

/// Resolves the final connection configuration from CLI args, config file, and environment.
///
/// Precedence: CLI arguments, then the named (or default) connection from
/// the config file, then the mysql client's environment variables.
fn resolve_connection(cli: &Cli, config: &Config) -> Result<ConnectionConfig> {
    let mut connection = match cli.connection_name() {
        Some(name) => config.get_connection(Some(name)).cloned().ok_or_else(|| {
            SessionError::config(format!("Connection '{}' not found in config file", name))
        })?,
        None => config.get_connection(None).cloned().unwrap_or_default(),
    };

    connection.merge(&cli.to_connection_config());
    connection.apply_env_defaults();

    Ok(connection)
}

fn print_result(result: &QueryResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for line in result.lines() {
                println!("{line}");
            }
            if !result.succeeded {
                eprintln!("{result}");
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(result)
                .map_err(|e| SessionError::internal(format!("Failed to serialize result: {e}")))?;
            println!("{json}");
        }
    }
    Ok(())
}
