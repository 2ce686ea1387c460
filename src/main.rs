use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use signal_audit::types::TradeRecord;
use signal_audit::{dataset, extremes, impact, summary};

/// Filename the backtest exporter writes next to the terminal.
const DEFAULT_EXPORT: &str = "20250101_000000_H1_XAUUSD_TradeSignals.json";

#[derive(Parser, Debug)]
#[command(name = "signal-audit")]
#[command(about = "Statistical audit reports for trade-signal backtest exports")]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Print verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dataset win/loss totals and MTF+PA combination statistics
    Summary {
        /// Path to the TradeSignals JSON export
        #[arg(short, long, default_value = DEFAULT_EXPORT)]
        input: PathBuf,
    },

    /// Extreme-condition frequency and thin-confirmation overlap analysis
    Extremes {
        /// Path to the TradeSignals JSON export
        #[arg(short, long, default_value = DEFAULT_EXPORT)]
        input: PathBuf,
    },

    /// Hypothetical impact of the extreme-condition filter on past results
    Impact {
        /// Path to the TradeSignals JSON export
        #[arg(short, long, default_value = DEFAULT_EXPORT)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Commands::Summary { input } => {
            let trades = load_export(&input)?;
            summary::print_report(&summary::summarize(&trades));
        }
        Commands::Extremes { input } => {
            let trades = load_export(&input)?;
            extremes::print_report(&extremes::analyze(&trades));
        }
        Commands::Impact { input } => {
            let trades = load_export(&input)?;
            impact::print_report(&impact::measure_impact(&trades));
        }
    }

    Ok(())
}

fn load_export(path: &Path) -> Result<Vec<TradeRecord>> {
    info!("Loading export: {:?}", path);
    let trades = dataset::load(path)?;
    info!("Loaded {} trades", trades.len());
    Ok(trades)
}
