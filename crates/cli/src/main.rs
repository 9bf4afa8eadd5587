//! PawHaven CLI - pet adoption and lost-and-found from the terminal

mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::Commands;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{Level, debug, error};

#[derive(Parser)]
#[command(name = "pawhaven")]
#[command(about = "Browse pets, report lost animals and manage your PawHaven account")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Configuration file (defaults to ./pawhaven.toml if present)
    #[arg(short = 'c', long, global = true, env = "PAWHAVEN_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for stored credentials and logs
    #[arg(short = 'd', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Timeout for the whole command in seconds (0 = no timeout)
    #[arg(short = 't', long, global = true, default_value = "30")]
    timeout: u64,

    /// Disable file logging (only log to stderr)
    #[arg(long, global = true)]
    no_file_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.into(), cli.data_dir.clone(), cli.no_file_log)?;

    let settings = config::load(cli.config.as_deref(), cli.data_dir.as_deref())?;
    debug!(base_url = %settings.api.base_url, "Loaded configuration");

    let run = cli.command.execute(settings);
    let outcome = if cli.timeout == 0 {
        run.await
    } else {
        match tokio::time::timeout(Duration::from_secs(cli.timeout), run).await {
            Ok(result) => result,
            Err(_) => {
                error!("Command timed out after {} seconds", cli.timeout);
                std::process::exit(1);
            }
        }
    };

    if let Err(e) = outcome {
        error!("Command failed: {e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_nested_subcommands_with_globals() {
        let cli = Cli::try_parse_from([
            "pawhaven",
            "pets",
            "list",
            "--page",
            "3",
            "--species",
            "cat",
            "--no-file-log",
            "-t",
            "0",
        ])
        .unwrap();
        assert!(cli.no_file_log);
        assert_eq!(cli.timeout, 0);
        assert!(matches!(cli.command, Commands::Pets { .. }));
    }

    #[test]
    fn login_captcha_needs_uid() {
        let result = Cli::try_parse_from(["pawhaven", "login", "-u", "ola", "--captcha", "x7k2"]);
        assert!(result.is_err());
    }
}
