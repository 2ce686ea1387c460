//! Data model for the TradeSignals backtest export.
//!
//! The export is one JSON document with a top-level `trades` array. Each trade
//! carries its execution metadata, the market-indicator readings at entry, and
//! the per-strategy vote tally that triggered the signal. Optional fields fall
//! back to neutral defaults so partial exports still load.

use serde::Deserialize;

/// Trade direction, derived from the `direction` string in the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Long,
    Short,
}

/// The seven voting strategies of the signal engine, in fixed slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    CandlePatterns,
    ChartPatterns,
    PriceAction,
    Indicators,
    SupportResistance,
    VolumeAnalysis,
    MultiTimeframe,
}

impl Strategy {
    /// All strategies in slot order.
    pub const ALL: [Strategy; 7] = [
        Strategy::CandlePatterns,
        Strategy::ChartPatterns,
        Strategy::PriceAction,
        Strategy::Indicators,
        Strategy::SupportResistance,
        Strategy::VolumeAnalysis,
        Strategy::MultiTimeframe,
    ];

    /// Slot index used for the vote table.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Map an export strategy name to its slot. Unknown names are ignored.
    pub fn from_name(name: &str) -> Option<Strategy> {
        match name {
            "CandlePatterns" => Some(Strategy::CandlePatterns),
            "ChartPatterns" => Some(Strategy::ChartPatterns),
            "PriceAction" => Some(Strategy::PriceAction),
            "Indicators" => Some(Strategy::Indicators),
            "SupportResistance" => Some(Strategy::SupportResistance),
            "VolumeAnalysis" => Some(Strategy::VolumeAnalysis),
            "MultiTimeframe" => Some(Strategy::MultiTimeframe),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::CandlePatterns => "CandlePatterns",
            Strategy::ChartPatterns => "ChartPatterns",
            Strategy::PriceAction => "PriceAction",
            Strategy::Indicators => "Indicators",
            Strategy::SupportResistance => "SupportResistance",
            Strategy::VolumeAnalysis => "VolumeAnalysis",
            Strategy::MultiTimeframe => "MultiTimeframe",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Vote direction cast by one strategy. Unknown strings behave as NONE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Vote {
    Buy,
    Sell,
    #[default]
    #[serde(other)]
    None,
}

/// One strategy's vote on one trade, as stored in the export.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct StrategyVote {
    #[serde(default)]
    pub strategy: String,
    #[serde(default)]
    pub vote: Vote,
    #[serde(default)]
    pub vote_count: u32,
}

impl StrategyVote {
    /// Signed magnitude: +count for BUY, -count for SELL, 0 for NONE.
    pub fn signed(&self) -> i64 {
        match self.vote {
            Vote::Buy => i64::from(self.vote_count),
            Vote::Sell => -i64::from(self.vote_count),
            Vote::None => 0,
        }
    }
}

/// Execution metadata of one historical trade.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TradeMetadata {
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub profit_usd: f64,
    /// Opaque timestamp string, display-only.
    #[serde(default)]
    pub entry_time: String,
}

fn default_rsi() -> f64 {
    50.0
}

fn default_adx() -> f64 {
    25.0
}

/// Market-indicator readings at trade entry. The defaults sit in the middle
/// of each indicator's normal range and never cross an extreme threshold.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketContext {
    #[serde(default = "default_rsi")]
    pub rsi_value: f64,
    #[serde(default = "default_adx")]
    pub adx_value: f64,
    #[serde(default)]
    pub macd_value: f64,
}

impl Default for MarketContext {
    fn default() -> Self {
        Self {
            rsi_value: default_rsi(),
            adx_value: default_adx(),
            macd_value: 0.0,
        }
    }
}

/// One historical executed trade from the export.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TradeRecord {
    #[serde(default)]
    pub trade_metadata: TradeMetadata,
    #[serde(default)]
    pub market_context: MarketContext,
    #[serde(default)]
    pub strategy_votes: Vec<StrategyVote>,
}

impl TradeRecord {
    /// LONG if the export says so; any other direction string trades short.
    pub fn direction(&self) -> Direction {
        if self.trade_metadata.direction == "LONG" {
            Direction::Long
        } else {
            Direction::Short
        }
    }

    pub fn profit_usd(&self) -> f64 {
        self.trade_metadata.profit_usd
    }

    pub fn is_loss(&self) -> bool {
        self.profit_usd() < 0.0
    }
}
