//! Stock Dashboard - command line front end
//!
//! Each invocation is one dashboard interaction: the inventory is loaded,
//! the chosen action applied and the full dashboard printed.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stock_dashboard::{report::format_audit, Config, Dashboard, Interaction, Store};

/// Inventory dashboard over a CSV inventory file
#[derive(Parser, Debug)]
#[command(name = "stock_dashboard")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding inventory.csv, audit_log.csv and low_stock_report.csv
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Inventory file (overrides the data directory default)
    #[arg(long)]
    inventory: Option<PathBuf>,

    /// Audit log file (overrides the data directory default)
    #[arg(long)]
    audit_log: Option<PathBuf>,

    /// Low stock report file (overrides the data directory default)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print the dashboard as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the dashboard (default)
    Show,
    /// Replace the inventory with a CSV or spreadsheet file
    Import {
        /// File to upload (.csv, otherwise read as a spreadsheet)
        file: PathBuf,
    },
    /// Set the stock level of one product
    Update {
        /// Product to update
        #[arg(short, long)]
        product: String,
        /// New stock level
        #[arg(short, long)]
        stock: u64,
    },
    /// Export the low stock items to the report file
    Export,
    /// Print the most recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value_t = stock_dashboard::dashboard::AUDIT_TAIL_LEN)]
        limit: usize,
    },
}

fn main() {
    // Initialize logger. Set RUST_LOG environment variable to control log level.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        log::error!("Interaction failed: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> stock_dashboard::Result<()> {
    let config = Config::in_dir(&args.data_dir)
        .with_inventory_path(args.inventory)
        .with_audit_path(args.audit_log)
        .with_report_path(args.report);
    log::debug!("Inventory path: {}", config.inventory_path.display());

    let dashboard = Dashboard::new(Store::new(config));

    let interaction = match args.command.unwrap_or(Command::Show) {
        Command::Show => Interaction::View,
        Command::Import { file } => Interaction::Import(file),
        Command::Update { product, stock } => Interaction::Update { product, stock },
        Command::Export => Interaction::ExportLowStock,
        Command::Audit { limit } => {
            let entries = dashboard.audit_tail(limit);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                match entries {
                    Some(entries) => print!("{}", format_audit(&entries)),
                    None => println!("No audit log yet."),
                }
            }
            return Ok(());
        }
    };

    let view = dashboard.run(interaction)?;
    if args.json {
        println!("{}", view.to_json()?);
    } else {
        print!("{view}");
    }

    Ok(())
}
