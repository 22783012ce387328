//! CLI entry point and dispatch logic
//!
//! This module owns the `run()` function which:
//! - Parses CLI arguments
//! - Builds CliArgs and discovers Config
//! - Installs the tracing subscriber
//! - Dispatches to command handlers
//! - Handles all error output

use clap::Parser;

use super::args::{Cli, Commands};
use super::commands;

// Stable public API imports from crate root
use crate::{CliArgs, Config, ExitCode, PackCalcError};

// Internal module imports (not part of stable public API)
use crate::logging::init_tracing;

/// Main CLI execution function.
///
/// This function handles ALL output including errors. It returns `Result<(), ExitCode>`:
/// - On success: returns `Ok(())` after printing any output
/// - On error: prints the user-facing report to stderr, returns `Err(ExitCode)`
///
/// main.rs only calls `std::process::exit(code.as_i32())` on error - it does NOT print.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();
    let cli_args = cli_args_from(&cli);

    // Discover and load configuration
    let config = match Config::discover(&cli_args) {
        Ok(config) => config,
        Err(err) => {
            let err = PackCalcError::from(err);
            eprint!("{}", err.display_for_user());
            return Err(err.to_exit_code());
        }
    };

    if let Err(e) = init_tracing(config.logging.verbose, config.logging.format) {
        eprintln!("✗ Failed to initialize logging: {e}");
        return Err(ExitCode::INTERNAL);
    }

    let result = match cli.command {
        Commands::Calc { quantity, json } => {
            commands::execute_calc_command(&quantity, json, &config)
        }
        Commands::Serve { .. } => commands::execute_serve_command(&config),
        Commands::Config { json } => commands::execute_config_command(json, &config),
    };

    if let Err(error) = result {
        if let Some(packcalc_error) = error.downcast_ref::<PackCalcError>() {
            eprint!("{}", packcalc_error.display_for_user());
            return Err(packcalc_error.to_exit_code());
        }

        eprintln!("✗ Unexpected error: {error:#}");
        eprintln!("\n  General troubleshooting:");
        eprintln!("    - Run with --verbose for more detailed output");
        eprintln!("    - Set RUST_LOG=debug to see every log event");
        return Err(ExitCode::INTERNAL);
    }

    Ok(())
}

/// Collect the configuration-relevant flags for [`Config::discover`].
///
/// Server flags only exist on `serve`; other subcommands leave them unset.
pub(crate) fn cli_args_from(cli: &Cli) -> CliArgs {
    let (bind, max_quantity, allowed_origin) = match &cli.command {
        Commands::Serve {
            bind,
            max_quantity,
            allowed_origin,
        } => (bind.clone(), *max_quantity, allowed_origin.clone()),
        Commands::Calc { .. } | Commands::Config { .. } => (None, None, None),
    };

    CliArgs {
        config_path: cli.config.clone(),
        pack_sizes: cli.pack_sizes.clone(),
        bind,
        max_quantity,
        allowed_origin,
        verbose: Some(cli.verbose),
        log_format: cli.log_format,
    }
}
