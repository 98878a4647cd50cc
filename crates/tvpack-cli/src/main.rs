//! # tvpack CLI
//!
//! Packages web applications for Samsung Orsay and LG webOS TVs.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults + file + env).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                    |
//! |------|----------------------------|
//! |  0   | Success                    |
//! |  1   | Internal / system error    |
//! |  2   | User / input error         |
//! |  3   | Resource not found         |
//! |  4   | Configuration error        |
//! |  5   | External tool failed       |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    commands::pack::Operation,
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
mod prompt;

fn main() -> ExitCode {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version come through here too
            let _ = e.print();
            return ExitCode::from(if e.use_stderr() { 2 } else { 0 });
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        non_interactive = cli.global.non_interactive,
        "CLI started"
    );

    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            let err = CliError::ConfigError {
                message: format!("{e:#}"),
                source: None,
            };
            return handle_error(err, &cli);
        }
    };

    let output = OutputManager::new(&cli.global, &config);

    match run(&cli, config, output) {
        Ok(()) => {
            info!("tvpack completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, &cli),
    }
}

#[instrument(skip_all)]
fn run(cli: &Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let global = &cli.global;
    match &cli.command {
        Commands::Prepare(args) => {
            commands::pack::execute(Operation::Prepare, args, global, config, output)
        }
        Commands::Build(args) => {
            commands::pack::execute(Operation::Build, args, global, config, output)
        }
        Commands::Package(args) => {
            commands::pack::execute(Operation::Package, args, global, config, output)
        }
        Commands::Init(args) => commands::init::execute(args, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => {
            commands::config::execute(cmd, global.config.as_deref(), config, output)
        }
    }
}

/// Print `err` with suggestions and map it to an exit code.
fn handle_error(err: CliError, cli: &Cli) -> ExitCode {
    err.log();

    let verbose = cli.global.verbose > 0;
    let msg = if !cli.global.no_color && std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}
