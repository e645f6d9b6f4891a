//! logroute CLI
//!
//! Thin wrapper around logroute-core for configuring loggers from the shell.
//!
//! ## Usage
//!
//! ```bash
//! # Log one error through the primary logger (to stderr)
//! logroute emit error "upstream unreachable"
//!
//! # Log through a module logger into <folder>/logroute.log
//! logroute --folder /var/log/app --level debug emit --logger routing info "route added"
//!
//! # Show what a configuration file resolves to
//! logroute check-config logging.json
//!
//! # List level words, most severe first
//! logroute levels
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use logroute_core::{LogLevel, LoggingConfig, LoggingContext, DEFAULT_PRIMARY_LOGGER};

/// Program name used for the log file (`<folder>/logroute.log`)
const PROGRAM: &str = "logroute";

/// logroute - named loggers routed to console or file sinks
#[derive(Parser)]
#[command(name = "logroute")]
#[command(version = "0.1.0")]
#[command(about = "logroute - named loggers routed to console or file sinks")]
struct Cli {
    /// Increase verbosity of internal diagnostics (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Logging configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for the log file (overrides the configuration)
    #[arg(short, long, global = true)]
    folder: Option<PathBuf>,

    /// Default logger level (overrides the configuration)
    #[arg(short, long, global = true)]
    level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log one message
    Emit {
        /// Logger to log through (default: the primary logger)
        #[arg(long)]
        logger: Option<String>,

        /// Record level: fatal, error, warning, info or debug
        record_level: LogLevel,

        /// Message text (words are joined with spaces)
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Parse a configuration file and print the resolved settings
    CheckConfig {
        /// Configuration file (JSON)
        file: PathBuf,
    },

    /// List level words, most severe first
    Levels,
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// Load the configuration file (if any) and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<LoggingConfig> {
    let mut config = match &cli.config {
        Some(path) => LoggingConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => LoggingConfig::default(),
    };

    if let Some(folder) = &cli.folder {
        config.folder = Some(folder.clone());
    }
    if let Some(level) = cli.level {
        config.level = level;
    }

    Ok(config)
}

fn print_config(config: &LoggingConfig) {
    println!("Level: {}", config.level);
    match config.log_file(PROGRAM) {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: stderr"),
    }

    let mut names = vec![DEFAULT_PRIMARY_LOGGER.to_string()];
    names.extend(
        config
            .loggers
            .iter()
            .filter(|name| name.as_str() != DEFAULT_PRIMARY_LOGGER)
            .cloned(),
    );

    println!("Loggers:");
    for name in names {
        println!("  {}: {}", name, config.level_for(&name));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match &cli.command {
        Commands::Emit {
            logger,
            record_level,
            message,
        } => {
            if *record_level == LogLevel::NotSet {
                bail!("NOTSET is a threshold, not a record level");
            }

            let mut config = load_config(&cli)?;
            let name = logger.as_deref().unwrap_or(DEFAULT_PRIMARY_LOGGER);
            if name != DEFAULT_PRIMARY_LOGGER && !config.loggers.iter().any(|l| l == name) {
                config.loggers.push(name.to_string());
            }

            let ctx = LoggingContext::new(DEFAULT_PRIMARY_LOGGER);
            config
                .apply(&ctx, PROGRAM)
                .context("Failed to set up logging")?;

            let target = ctx
                .get_logger(name)
                .with_context(|| format!("Logger '{}' was not created", name))?;

            tracing::debug!(logger = name, level = %record_level, "emitting record");
            target
                .log(*record_level, format_args!("{}", message.join(" ")))
                .context("Failed to write log record")?;
        }

        Commands::CheckConfig { file } => {
            let config = LoggingConfig::from_file(file)
                .with_context(|| format!("Invalid configuration {}", file.display()))?;
            config
                .check_overrides(DEFAULT_PRIMARY_LOGGER)
                .with_context(|| format!("Invalid configuration {}", file.display()))?;
            print_config(&config);
        }

        Commands::Levels => {
            for level in LogLevel::RECORD_LEVELS {
                println!("{}", level);
            }
            println!("{}", LogLevel::NotSet);
        }
    }

    Ok(())
}
