//! # repoman CLI
//!
//! Git repository and license management from the command line.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Load configuration (defaults + file + env).
//! 3. Initialise the tracing subscriber (logging), optionally to a file.
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                        |
//! |------|--------------------------------|
//! |  0   | Success                        |
//! |  1   | Internal / git failure         |
//! |  2   | User / input error             |
//! |  3   | Resource not found             |
//! |  4   | Configuration error            |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Load .env before anything else, including config and tracing.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here and must exit 0.
            let _ = e.print();
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    // ── 2. Load configuration ─────────────────────────────────────────────
    // Loaded before logging so that `log_file` from the file takes effect;
    // a failure is reported once the subscriber is up.
    let config = AppConfig::load(cli.global.config.as_deref());

    // ── 3. Initialise tracing ─────────────────────────────────────────────
    let log_file = cli
        .global
        .log_file
        .clone()
        .or_else(|| config.as_ref().ok().and_then(|c| c.log_file.clone()));
    let _log_guard = match init_logging(&cli.global, log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e:#}");
            return ExitCode::from(1);
        }
    };

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        repo = %cli.global.repo.display(),
        "CLI started"
    );

    let report = ErrorReport {
        verbose: cli.global.verbose > 0,
        color: !cli.global.no_color && std::io::IsTerminal::is_terminal(&std::io::stderr()),
    };
    let config = match config {
        Ok(cfg) => cfg,
        Err(e) => {
            return handle_error(
                CliError::ConfigError {
                    message: format!("{e:#}"),
                    source: Some(e.into()),
                },
                report,
            );
        }
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(cli, config, output) {
        Ok(()) => {
            info!("repoman completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, report),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let global = cli.global;
    match cli.command {
        Commands::Init => commands::init::execute(global, config, output),
        Commands::Add(args) => commands::files::add(args, global, config, output),
        Commands::Commit(args) => commands::files::commit(args, global, config, output),
        Commands::Push(args) => commands::remote::push(args, global, config, output),
        Commands::Pull(args) => commands::remote::pull(args, global, config, output),
        Commands::Branch(args) => commands::branch::create(args, global, config, output),
        Commands::Merge(args) => commands::branch::merge(args, global, config, output),
        Commands::Checkout(args) => commands::branch::checkout(args, global, config, output),
        Commands::Branches => commands::branch::list(global, config, output),
        Commands::Status => commands::status::execute(global, config, output),
        Commands::License(cmd) => commands::license::execute(cmd, global, config, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

/// How a failure is rendered on stderr.
#[derive(Debug, Clone, Copy)]
struct ErrorReport {
    verbose: bool,
    color: bool,
}

/// Translate a `CliError` into a user message and an appropriate exit code.
fn handle_error(err: CliError, report: ErrorReport) -> ExitCode {
    err.log();

    // Written to stderr so the message appears even when stdout is redirected.
    let msg = if report.color {
        err.format_colored(report.verbose)
    } else {
        err.format_plain(report.verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
