//! Starport CLI - Portfolio Presentation Engine
//!
//! Command-line interface for the Starport presentation engine.

use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use starport::cli::{commands, Cli, Commands};
use starport::Result;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Starport v{}", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Starport v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("[{}] {}", err.error_code(), err);
            eprintln!("Error: {}", err.friendly_message());
            ExitCode::FAILURE
        }
    }
}

fn handle_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Cues => commands::list_cues(),
        Commands::Render {
            sound,
            out,
            sample_rate,
            bit_depth,
        } => commands::render(&sound, &out, sample_rate, bit_depth),
        Commands::Simulate {
            script,
            layout,
            config,
            prefs,
            seed,
            wav,
        } => commands::simulate(
            &script,
            layout.as_deref(),
            config.as_deref(),
            prefs.as_deref(),
            seed,
            wav.as_deref(),
        ),
        Commands::Tour { seed, wav } => commands::tour(seed, wav.as_deref()),
    }
}
