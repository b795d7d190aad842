//! Command execution handlers

use console::style;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{CompareArgs, ConfigArgs, ConfigCommands, Context, OutputFormat, StoresArgs, SuggestArgs};
use crate::config::Config;
use crate::error::{CheapcartError, Result};
use crate::models::{Basket, Catalog, PricingResult};
use crate::parsers::{load_basket_file, parse_basket_entry, CatalogLoader};
use crate::ranker::Recommendation;
use crate::suggest::Suggester;

/// Load every catalog from the configured data directory
fn load_catalogs(ctx: &Context) -> Result<Vec<Catalog>> {
    CatalogLoader::new(ctx.config.data_dir()).load_all()
}

/// Build the basket from the optional file plus command-line items
pub fn build_basket(args: &CompareArgs) -> Result<Basket> {
    let mut basket = match args.basket {
        Some(ref path) => load_basket_file(path)?,
        None => Basket::new(),
    };

    for entry in &args.items {
        let (name, quantity) = parse_basket_entry(entry)?;
        basket.add(&name, quantity);
    }

    if basket.is_empty() {
        return Err(CheapcartError::EmptyBasket);
    }
    Ok(basket)
}

/// Execute the compare command
pub fn execute_compare(ctx: &Context, args: &CompareArgs) -> Result<()> {
    let basket = build_basket(args)?;
    let catalogs = load_catalogs(ctx)?;
    let matcher = ctx.matcher()?;

    debug!(
        "Pricing {} items at {} stores with {:?}",
        basket.len(),
        catalogs.len(),
        matcher
    );
    let ranked = crate::compare(&catalogs, &basket, &matcher);
    for result in ranked.iter().filter(|r| r.total.is_saturated()) {
        warn!("Total at {} exceeds the largest representable price", result.store_name);
    }
    let show_all = args.all || ctx.config.output.show_all;

    match args.format {
        OutputFormat::Pretty => {
            let Some(recommendation) = Recommendation::from_ranked(ranked) else {
                return Err(CheapcartError::NoCatalogs(ctx.config.data_dir()));
            };
            print_recommendation(&recommendation, show_all);
        }
        OutputFormat::Json => {
            if show_all {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&ranked.first())?);
            }
        }
    }

    Ok(())
}

fn print_recommendation(recommendation: &Recommendation, show_all: bool) {
    let best = &recommendation.best;

    if recommendation.is_partial() {
        println!(
            "{} Cheapest (partial basket): {} - {} €",
            style("⚠").yellow().bold(),
            style(&best.store_name).bold(),
            best.total
        );
        println!("  Missing here: {}", style(best.missing.join(", ")).yellow());
    } else {
        println!(
            "{} Cheapest store: {} - {} €",
            style("✓").green().bold(),
            style(&best.store_name).bold(),
            best.total
        );
        println!("  Every item is available here.");
    }

    print_substitutions(best);

    if show_all && !recommendation.runners_up.is_empty() {
        println!();
        println!("{}", style("All stores").bold().underlined());
        let all = std::iter::once(best).chain(recommendation.runners_up.iter());
        for (rank, result) in all.enumerate() {
            print_store_line(rank + 1, result);
        }
    }
}

fn print_substitutions(result: &PricingResult) {
    let substitutions: Vec<_> = result.substitutions().collect();
    if substitutions.is_empty() {
        return;
    }

    println!("  {}", style("Matched approximately:").dim());
    for line in substitutions {
        println!(
            "    {} → {} ({} × {} €)",
            line.requested,
            style(&line.matched_key).cyan(),
            line.quantity,
            line.unit_price
        );
    }
}

fn print_store_line(rank: usize, result: &PricingResult) {
    let badge = if result.is_complete() {
        style("[complete]").green()
    } else {
        style("[partial]").yellow()
    };

    println!(
        "  {:>2}. {:<20} {:>10} € {}",
        rank,
        result.store_name,
        result.total.to_string(),
        badge
    );
    if !result.is_complete() {
        println!("      missing: {}", result.missing.join(", "));
    }
}

#[derive(Serialize)]
struct StoreSummary<'a> {
    name: &'a str,
    products: usize,
}

/// Execute the stores command
pub fn execute_stores(ctx: &Context, args: &StoresArgs) -> Result<()> {
    let catalogs = load_catalogs(ctx)?;

    match args.format {
        OutputFormat::Pretty => {
            println!("Stores in {}\n", style(ctx.config.data_dir().display()).cyan());
            for catalog in &catalogs {
                println!("  {} ({} products)", style(catalog.name()).bold(), catalog.len());
            }
        }
        OutputFormat::Json => {
            let summaries: Vec<_> = catalogs
                .iter()
                .map(|c| StoreSummary {
                    name: c.name(),
                    products: c.len(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
    }

    Ok(())
}

/// Execute the suggest command
pub fn execute_suggest(ctx: &Context, args: &SuggestArgs) -> Result<()> {
    let catalogs = load_catalogs(ctx)?;
    let suggester = Suggester::new(&catalogs);
    let limit = args.limit.unwrap_or(ctx.config.output.suggestion_limit);

    let suggestions = suggester.suggest(&args.query, limit);
    if suggestions.is_empty() {
        println!("No products found matching '{}'", args.query);
    } else {
        for name in suggestions {
            println!("{}", name);
        }
    }

    Ok(())
}

/// Execute the config command
pub fn execute_config(ctx: &Context, args: &ConfigArgs) -> Result<()> {
    let path = &ctx.config_path;

    match &args.command {
        ConfigCommands::Show => {
            let config = Config::load_from(path)?;
            println!(
                "{}",
                toml::to_string_pretty(&config).map_err(|e| CheapcartError::Other(e.to_string()))?
            );
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
        }
        ConfigCommands::Reset => {
            Config::reset(path)?;
            info!("Configuration reset to defaults");
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_unchecked(path)?;
            config.set(key, value)?;
            config.save_to(path)?;
            println!("Set {} = {}", key, value);
        }
        ConfigCommands::Get { key } => {
            let config = Config::load_from(path)?;
            if let Some(value) = config.get(key) {
                println!("{}", value);
            } else {
                println!("Key '{}' not found", key);
            }
        }
        ConfigCommands::Init { force } => {
            Config::init(path, *force)?;
            info!("Configuration initialized at {}", path.display());
        }
    }

    Ok(())
}
