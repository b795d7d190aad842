//! Command-line interface for cheapcart

mod commands;

pub use commands::*;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::matcher::{Matcher, SimilarityKind};

/// Cheapcart - find the cheapest store for your shopping basket
///
/// Prices a basket against every store catalog in the data directory,
/// matching product names approximately where stores name things
/// differently, and recommends the cheapest store that has everything.
#[derive(Parser, Debug)]
#[command(name = "cheapcart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CHEAPCART_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory with store catalog JSON files
    #[arg(short, long, global = true, env = "CHEAPCART_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Number of parallel jobs (default: number of CPUs)
    #[arg(short, long, global = true)]
    pub jobs: Option<usize>,

    /// Minimum similarity (0-1) for an approximate product match
    #[arg(short, long, global = true)]
    pub threshold: Option<f64>,

    /// Similarity strategy (sequence-ratio, levenshtein, jaro-winkler)
    #[arg(short, long, global = true)]
    pub strategy: Option<SimilarityKind>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price a basket at every store and recommend the cheapest
    Compare(CompareArgs),

    /// List loaded stores
    Stores(StoresArgs),

    /// Suggest product names for a partial name
    Suggest(SuggestArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Arguments for the compare command
#[derive(Parser, Debug, Clone)]
pub struct CompareArgs {
    /// Basket items as `name=qty` (or just `name` for one unit)
    pub items: Vec<String>,

    /// JSON basket file: `[{"item": "piim", "qty": 2}, ...]`
    #[arg(short, long)]
    pub basket: Option<PathBuf>,

    /// Show every store, not only the recommendation
    #[arg(short, long)]
    pub all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

/// Arguments for the stores command
#[derive(Parser, Debug)]
pub struct StoresArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

/// Arguments for the suggest command
#[derive(Parser, Debug)]
pub struct SuggestArgs {
    /// Partial product name
    #[arg(required = true)]
    pub query: String,

    /// Maximum suggestions to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable pretty output
    Pretty,
    /// JSON output
    Json,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Configuration subcommand
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Reset configuration to defaults
    Reset,
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Configuration with command-line overrides applied
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration
    pub config: Config,
    /// Where the configuration file lives
    pub config_path: PathBuf,
}

impl Context {
    /// Load the configuration file and apply global flags on top.
    ///
    /// For `config` subcommands an unreadable or out-of-range file falls
    /// back to defaults, so `config reset`, `config init --force` and
    /// `config set` can repair it.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config_path = Config::resolve_path(cli.config.as_deref())?;
        let repairing = matches!(cli.command, Commands::Config(_));

        // config subcommands must still run when the file is broken
        let mut config = if repairing {
            Config::load_unchecked(&config_path).unwrap_or_default()
        } else {
            Config::load_from(&config_path)?
        };

        if let Some(ref data_dir) = cli.data_dir {
            config.general.data_dir = Some(data_dir.clone());
        }
        if let Some(jobs) = cli.jobs {
            config.general.jobs = Some(jobs);
        }
        if let Some(threshold) = cli.threshold {
            config.matching.threshold = threshold;
        }
        if let Some(strategy) = cli.strategy {
            config.matching.strategy = strategy;
        }
        if cli.no_color {
            config.output.color = false;
        }
        if !repairing {
            config.validate()?;
        }

        Ok(Self { config, config_path })
    }

    /// Matcher for this run
    pub fn matcher(&self) -> Result<Matcher> {
        self.config.matcher()
    }
}
