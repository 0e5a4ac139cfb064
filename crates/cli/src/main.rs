//! # depot
//!
//! Drives the warehouse state store from the command line. Every command
//! prints JSON to stdout; logs go to stderr.
//!
//! ## Commands
//!
//! - `depot snapshot` - warehouses with used weight, goods, category sets, used features
//! - `depot add-good|create-category-set|assign|mark-feature` - mutations
//! - `depot features|totals|expiry|groups|goods` - derived views
//! - `depot tool <name> --args <json>` - the assistant tool surface, verbatim
//! - `depot tools` - tool registration metadata

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use depot_infra::{DEFAULT_STORAGE_KEY, StoreConfig};

mod commands;

/// Warehouse capacity and goods inventory
#[derive(Parser)]
#[command(name = "depot")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Directory holding the state file
    #[arg(long, global = true, env = "DEPOT_DATA_DIR", value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Storage key (file name without `.json`)
    #[arg(long, global = true, env = "DEPOT_STORAGE_KEY", default_value = DEFAULT_STORAGE_KEY)]
    storage_key: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the full app data snapshot
    Snapshot,

    /// Add a good to a warehouse (merges into a matching line)
    #[command(name = "add-good")]
    AddGood {
        #[arg(long, short = 'w')]
        warehouse: String,
        #[arg(long, short = 'n')]
        name: String,
        #[arg(long, short = 'q')]
        quantity: f64,
        /// Weight of one unit in kilograms
        #[arg(long)]
        unit_weight_kg: f64,
        /// YYYY-MM-DD
        #[arg(long, short = 'e')]
        expiry_date: String,
        #[arg(long)]
        tickets: Option<f64>,
    },

    /// Create a category set with 1 to 3 categories
    #[command(name = "create-category-set")]
    CreateCategorySet {
        #[arg(long, short = 'n')]
        name: String,
        /// Repeat for each category
        #[arg(long = "category", short = 'c', required = true)]
        categories: Vec<String>,
    },

    /// Assign goods to categories of one set
    Assign {
        /// Category set id
        #[arg(long = "set", short = 's')]
        set_id: String,
        /// GOOD_ID=CATEGORY, repeatable
        #[arg(value_name = "GOOD_ID=CATEGORY", required = true)]
        pairs: Vec<String>,
    },

    /// Record a feature as used
    #[command(name = "mark-feature")]
    MarkFeature { feature_id: String },

    /// Feature catalogue split into used and unused
    Features,

    /// Totals per good type across all warehouses
    Totals,

    /// Goods ordered by expiry date
    Expiry {
        /// close or far
        #[arg(long, default_value = "close")]
        order: depot_inventory::ExpiryOrder,
    },

    /// Good names grouped by the categories of one set
    Groups { set_id: String },

    /// Goods stored in one warehouse
    Goods { warehouse: String },

    /// Invoke a named assistant tool with JSON arguments
    Tool {
        name: String,
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// List assistant tool definitions
    Tools,
}

fn main() -> ExitCode {
    depot_observability::init();

    let cli = Cli::parse();
    let mut config = StoreConfig::from_env().with_storage_key(cli.storage_key);
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }

    match commands::run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
