//! Fabrication Planner
//!
//! Works out how many fabricators of which kind a crafting-game factory needs
//! to sustain a set of target output rates.

mod builtin;
mod calculator;
mod catalog;
mod db;
mod error;
mod extract;
mod models;
mod rates;
mod report;
mod resolver;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rusqlite::Connection;

use crate::catalog::Catalog;
use crate::models::Goals;
use crate::rates::{resolve_fabricator_name, FabricatorSelection};

const DEFAULT_DATABASE: &str = "fab_planner.db";

#[derive(Parser)]
#[command(name = "fab-planner")]
#[command(about = "Fabricator and ingredient throughput planner for crafting games")]
struct Cli {
    /// SQLite catalog to plan against (the built-in dataset when omitted)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Diagnostics written to stderr at this level and above
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the fabricators needed for one or more goals
    Plan {
        /// Goals as "item=rate" in units per minute (e.g. "electronic circuit=30")
        #[arg(required = true, value_parser = parse_goal)]
        goals: Vec<(String, f64)>,

        /// Fabricator to use for a class, as "class=fabricator"
        #[arg(long, value_parser = parse_preference)]
        prefer: Vec<(String, String)>,

        /// Fabricator to use for the assembler class
        #[arg(long)]
        fastest_assembler: Option<String>,

        /// Emit a Graphviz digraph instead of the listing
        #[arg(long)]
        graphviz: bool,

        /// Also show the ingredient table of each goal
        #[arg(short, long)]
        verbose: bool,
    },

    /// List all items in the catalog
    ListItems,

    /// Show details for a specific item
    Item {
        /// Item name
        name: String,
    },

    /// Check the catalog for unknown ingredients and cycles
    Check,

    /// Initialize empty database with schema
    Init,

    /// Write the built-in dataset into the database
    LoadBuiltin,

    /// Import recipe definition files (*.recipes)
    Import {
        /// Directory searched recursively for recipe files
        source_dir: PathBuf,

        /// Clear existing data before import
        #[arg(long)]
        clear: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Plan {
            goals,
            prefer,
            fastest_assembler,
            graphviz,
            verbose,
        } => {
            let catalog = active_catalog(cli.database.as_deref())?;

            let mut selection = FabricatorSelection::new();
            for (class, fabricator) in prefer {
                selection = selection.prefer(class, fabricator);
            }
            if let Some(fabricator) = fastest_assembler {
                selection = selection.fastest_assembler(fabricator);
            }

            let goals: Goals = goals.into_iter().collect();
            let plan = calculator::plan(&catalog, &goals, &selection)?;

            if graphviz {
                print!("{}", report::to_graphviz(&plan, &catalog)?);
                return Ok(());
            }

            if verbose {
                println!("Ingredients per goal:\n");
                println!("{}", report::format_goal_breakdown(&plan));
            }
            print!("{}", plan);
        }

        Commands::ListItems => {
            let catalog = active_catalog(cli.database.as_deref())?;
            if catalog.is_empty() {
                println!("No items in catalog. Run 'import' or 'load-builtin' first.");
            } else {
                println!("{:<32} {:<16} {:<16}", "Item", "Made in", "Fabricator of");
                println!("{}", "-".repeat(64));
                for item in catalog.items() {
                    println!(
                        "{:<32} {:<16} {:<16}",
                        item.name,
                        item.fabricator_class(),
                        item.kind.as_deref().unwrap_or("")
                    );
                }
            }
        }

        Commands::Item { name } => {
            let catalog = active_catalog(cli.database.as_deref())?;
            print_item(&catalog, &name)?;
        }

        Commands::Check => {
            let catalog = active_catalog(cli.database.as_deref())?;
            catalog.validate()?;
            println!("Catalog OK: {} items", catalog.len());
        }

        Commands::Init => {
            let path = database_path(cli.database.as_deref());
            open_database(path)?;
            println!("Database initialized at: {}", path.display());
        }

        Commands::LoadBuiltin => {
            let mut conn = open_database(database_path(cli.database.as_deref()))?;
            db::clear_catalog(&conn)?;
            let count = db::store_catalog(&mut conn, &builtin::catalog())?;
            println!("Loaded {} built-in items", count);
        }

        Commands::Import { source_dir, clear } => {
            let conn = open_database(database_path(cli.database.as_deref()))?;
            if clear {
                println!("Clearing existing data...");
                db::clear_catalog(&conn)?;
            }

            let stats = extract::import_to_database(&conn, &source_dir)?;
            println!("\n{}", stats);
            println!("Database now holds {} items", db::list_item_names(&conn)?.len());
        }
    }

    Ok(())
}

fn database_path(database: Option<&Path>) -> &Path {
    database.unwrap_or(Path::new(DEFAULT_DATABASE))
}

fn open_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;
    db::init_schema(&conn)?;
    Ok(conn)
}

fn active_catalog(database: Option<&Path>) -> Result<Catalog> {
    match database {
        Some(path) => db::load_catalog(&open_database(path)?),
        None => Ok(builtin::catalog()),
    }
}

fn print_item(catalog: &Catalog, name: &str) -> Result<()> {
    let item = catalog.get_recipe(name)?;

    println!("Item: {}", item.name);
    println!("  Short name: {}", report::derive_short_name(item));
    println!("  Made in: {}", item.fabricator_class());
    if let Some(excluding) = item.made_in.as_ref().and_then(|m| m.excluding.as_deref()) {
        println!("  Excluding: {}", excluding);
    }
    match resolve_fabricator_name(catalog, name, &FabricatorSelection::new()) {
        Ok(Some(fabricator)) => println!("  Default fabricator: {}", fabricator),
        Ok(None) => {}
        Err(e) => println!("  Default fabricator: unavailable ({})", e),
    }
    println!("  Time: {}s", item.recipe_fab_time());
    println!("  Yield: {}", item.recipe_yield());

    if !item.ingredients.is_empty() {
        println!("  Ingredients:");
        for (ingredient, quantity) in &item.ingredients {
            println!("    {} x {}", quantity, ingredient);
        }
    }

    if let Some(kind) = &item.kind {
        let stats = catalog.get_fabricator_stats(name)?;
        println!("  Fabricator of: {}", kind);
        if let Some(speed) = stats.speed_multiplier {
            println!("    Crafting speed: {}", speed);
        }
        if let Some(rate) = stats.yield_per_second {
            println!("    Yield per second: {}", rate);
        }
        if let Some(kw) = item.electric_kw {
            println!("    Electric: {} kW", kw);
        }
        if let Some(kw) = item.fuel_kw {
            println!("    Fuel: {} kW", kw);
        }
    }

    Ok(())
}

/// Parse "item=rate"; the item name may itself contain '='
fn parse_goal(arg: &str) -> Result<(String, f64)> {
    let Some((name, rate)) = arg.rsplit_once('=') else {
        bail!("expected item=rate, got '{}'", arg);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("missing item name in '{}'", arg);
    }
    let rate: f64 = rate
        .trim()
        .parse()
        .with_context(|| format!("invalid rate in '{}'", arg))?;
    Ok((name.to_string(), rate))
}

/// Parse "class=fabricator"
fn parse_preference(arg: &str) -> Result<(String, String)> {
    match arg.split_once('=') {
        Some((class, fabricator)) if !class.trim().is_empty() && !fabricator.trim().is_empty() => {
            Ok((class.trim().to_string(), fabricator.trim().to_string()))
        }
        _ => bail!("expected class=fabricator, got '{}'", arg),
    }
}
