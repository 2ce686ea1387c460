//! Loading the TradeSignals JSON export into memory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::types::TradeRecord;

/// Top-level document shape. Only the `trades` array is consumed; a document
/// without it yields an empty dataset rather than an error.
#[derive(Debug, Deserialize)]
struct SignalExport {
    #[serde(default)]
    trades: Vec<TradeRecord>,
}

/// Load all trades from a TradeSignals JSON export.
///
/// A missing file or malformed document is fatal; the dataset is read once
/// and never written back.
pub fn load(path: &Path) -> Result<Vec<TradeRecord>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open export file: {:?}", path))?;
    let reader = BufReader::new(file);

    let export: SignalExport = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse export file: {:?}", path))?;

    tracing::debug!("Parsed {} trades from {:?}", export.trades.len(), path);
    Ok(export.trades)
}
