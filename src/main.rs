//! Cheapcart - find the cheapest store for a shopping basket
//!
//! Main entry point for the cheapcart CLI application.

use std::process::ExitCode;

use console::style;
use tracing_subscriber::EnvFilter;

use cheapcart::cli::{self, Cli, Commands, Context};
use cheapcart::error::Result;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Set up logging based on CLI arguments and the configured level
fn setup_logging(cli: &Cli, configured: &str) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        configured
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Main application logic
fn run(cli: Cli) -> Result<()> {
    let ctx = Context::from_cli(&cli)?;

    // Set up logging
    setup_logging(&cli, &ctx.config.logging.level);

    if !ctx.config.output.color {
        console::set_colors_enabled(false);
    }

    // Set number of parallel jobs
    if let Some(jobs) = ctx.config.general.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    match cli.command {
        Commands::Compare(ref args) => cli::execute_compare(&ctx, args),
        Commands::Stores(ref args) => cli::execute_stores(&ctx, args),
        Commands::Suggest(ref args) => cli::execute_suggest(&ctx, args),
        Commands::Config(ref args) => cli::execute_config(&ctx, args),
    }
}
