//! Extreme-condition / thin-confirmation trade filter.
//!
//! Flags trades entered while a market indicator sat in an extreme zone with
//! only the MultiTimeframe and PriceAction strategies voting and no
//! corroboration from Indicators, SupportResistance or VolumeAnalysis.

use crate::types::{Direction, Strategy, TradeRecord};

/// RSI above this on longs counts as extreme (strict).
pub const RSI_OVERBOUGHT: f64 = 65.0;
/// RSI below this on shorts counts as extreme (strict).
pub const RSI_OVERSOLD: f64 = 35.0;
/// ADX above this counts as extreme (strict).
pub const ADX_EXTREME: f64 = 45.0;
/// |MACD| above this counts as extreme (strict).
pub const MACD_EXTREME: f64 = 15.0;

/// Which indicator zones a trade's entry readings crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtremeFlags {
    pub rsi: bool,
    pub adx: bool,
    pub macd: bool,
}

impl ExtremeFlags {
    pub fn any(self) -> bool {
        self.rsi || self.adx || self.macd
    }
}

/// Classify a trade's entry readings against the extreme zones.
///
/// All comparisons are strict, so readings sitting exactly on a threshold do
/// not flag, and neither do the neutral defaults for absent readings.
pub fn classify_extreme(trade: &TradeRecord) -> ExtremeFlags {
    let ctx = &trade.market_context;

    let rsi = match trade.direction() {
        Direction::Long => ctx.rsi_value > RSI_OVERBOUGHT,
        Direction::Short => ctx.rsi_value < RSI_OVERSOLD,
    };

    ExtremeFlags {
        rsi,
        adx: ctx.adx_value > ADX_EXTREME,
        macd: ctx.macd_value > MACD_EXTREME || ctx.macd_value < -MACD_EXTREME,
    }
}

/// Signed vote per strategy slot for one trade. Zero means the strategy did
/// not vote (absent from the export, or an explicit NONE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteProfile {
    votes: [i64; Strategy::ALL.len()],
}

impl VoteProfile {
    pub fn signed_vote(&self, strategy: Strategy) -> i64 {
        self.votes[strategy.index()]
    }

    pub fn voted(&self, strategy: Strategy) -> bool {
        self.signed_vote(strategy) != 0
    }

    pub fn has_mtf(&self) -> bool {
        self.voted(Strategy::MultiTimeframe)
    }

    pub fn has_pa(&self) -> bool {
        self.voted(Strategy::PriceAction)
    }

    /// Corroboration beyond the two directional-confirmation strategies.
    pub fn has_additional(&self) -> bool {
        self.voted(Strategy::Indicators)
            || self.voted(Strategy::SupportResistance)
            || self.voted(Strategy::VolumeAnalysis)
    }

    /// Number of strategies that cast a nonzero vote.
    pub fn voting_count(&self) -> usize {
        self.votes.iter().filter(|v| **v != 0).count()
    }

    /// Strategies that cast a nonzero vote, in slot order.
    pub fn voting_strategies(&self) -> Vec<Strategy> {
        Strategy::ALL
            .iter()
            .copied()
            .filter(|s| self.voted(*s))
            .collect()
    }
}

/// Tally signed votes into the fixed strategy slots.
///
/// Unknown strategy names and NONE votes leave their slot at zero. A repeated
/// strategy entry overwrites the earlier one, matching the export semantics
/// of one vote row per strategy.
pub fn classify_votes(trade: &TradeRecord) -> VoteProfile {
    let mut profile = VoteProfile::default();
    for vote in &trade.strategy_votes {
        if let Some(strategy) = Strategy::from_name(&vote.strategy) {
            profile.votes[strategy.index()] = vote.signed();
        }
    }
    profile
}

/// The filter rule applied to already-classified inputs: extreme conditions,
/// at most two strategies voting, both MTF and PA among them, and no
/// additional confirmation.
pub fn filter_matches(flags: ExtremeFlags, votes: &VoteProfile) -> bool {
    flags.any()
        && votes.voting_count() <= 2
        && votes.has_mtf()
        && votes.has_pa()
        && !votes.has_additional()
}

/// Would the extreme-condition filter have excluded this trade?
pub fn is_filtered(trade: &TradeRecord) -> bool {
    filter_matches(classify_extreme(trade), &classify_votes(trade))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MarketContext, StrategyVote, TradeMetadata, TradeRecord, Vote};

    fn trade(direction: &str, rsi: f64, adx: f64, macd: f64) -> TradeRecord {
        TradeRecord {
            trade_metadata: TradeMetadata {
                direction: direction.into(),
                ..Default::default()
            },
            market_context: MarketContext {
                rsi_value: rsi,
                adx_value: adx,
                macd_value: macd,
            },
            strategy_votes: Vec::new(),
        }
    }

    fn vote(strategy: &str, vote: Vote, count: u32) -> StrategyVote {
        StrategyVote {
            strategy: strategy.into(),
            vote,
            vote_count: count,
        }
    }

    #[test]
    fn test_rsi_extreme_long_boundary() {
        assert!(classify_extreme(&trade("LONG", 66.0, 25.0, 0.0)).rsi);
        assert!(!classify_extreme(&trade("LONG", 65.0, 25.0, 0.0)).rsi);
        // Overbought RSI is not extreme for shorts
        assert!(!classify_extreme(&trade("SHORT", 66.0, 25.0, 0.0)).rsi);
    }

    #[test]
    fn test_rsi_extreme_short_boundary() {
        assert!(classify_extreme(&trade("SHORT", 34.0, 25.0, 0.0)).rsi);
        assert!(!classify_extreme(&trade("SHORT", 35.0, 25.0, 0.0)).rsi);
        assert!(!classify_extreme(&trade("LONG", 34.0, 25.0, 0.0)).rsi);
    }

    #[test]
    fn test_adx_extreme_boundary() {
        assert!(!classify_extreme(&trade("LONG", 50.0, 45.0, 0.0)).adx);
        assert!(classify_extreme(&trade("LONG", 50.0, 45.1, 0.0)).adx);
    }

    #[test]
    fn test_macd_extreme_boundary() {
        assert!(!classify_extreme(&trade("LONG", 50.0, 25.0, 15.0)).macd);
        assert!(!classify_extreme(&trade("LONG", 50.0, 25.0, -15.0)).macd);
        assert!(classify_extreme(&trade("LONG", 50.0, 25.0, 15.1)).macd);
        assert!(classify_extreme(&trade("SHORT", 50.0, 25.0, -15.1)).macd);
    }

    #[test]
    fn test_defaults_never_flag_extreme() {
        let flags = classify_extreme(&TradeRecord::default());
        assert!(!flags.any());
    }

    #[test]
    fn test_vote_profile_counts_and_sides() {
        let mut t = trade("LONG", 50.0, 25.0, 0.0);
        t.strategy_votes = vec![
            vote("MultiTimeframe", Vote::Buy, 2),
            vote("PriceAction", Vote::Sell, 1),
            vote("CandlePatterns", Vote::None, 4),
            vote("SomethingElse", Vote::Buy, 9),
        ];

        let profile = classify_votes(&t);
        assert_eq!(profile.signed_vote(Strategy::MultiTimeframe), 2);
        assert_eq!(profile.signed_vote(Strategy::PriceAction), -1);
        assert_eq!(profile.signed_vote(Strategy::CandlePatterns), 0);
        assert_eq!(profile.voting_count(), 2);
        assert!(profile.has_mtf());
        assert!(profile.has_pa());
        assert!(!profile.has_additional());
        assert_eq!(
            profile.voting_strategies(),
            vec![Strategy::PriceAction, Strategy::MultiTimeframe]
        );
    }

    #[test]
    fn test_filter_matches_mtf_pa_only_under_extreme_adx() {
        let mut t = trade("LONG", 50.0, 50.0, 0.0);
        t.strategy_votes = vec![
            vote("MultiTimeframe", Vote::Buy, 2),
            vote("PriceAction", Vote::Buy, 1),
        ];
        assert!(is_filtered(&t));
    }

    #[test]
    fn test_additional_confirmation_defeats_filter() {
        let mut t = trade("LONG", 50.0, 50.0, 0.0);
        t.strategy_votes = vec![
            vote("MultiTimeframe", Vote::Buy, 2),
            vote("PriceAction", Vote::Buy, 1),
            vote("Indicators", Vote::Buy, 1),
        ];
        assert!(!is_filtered(&t));
    }

    #[test]
    fn test_no_extreme_defeats_filter() {
        let mut t = trade("LONG", 50.0, 25.0, 0.0);
        t.strategy_votes = vec![
            vote("MultiTimeframe", Vote::Buy, 2),
            vote("PriceAction", Vote::Buy, 1),
        ];
        assert!(!is_filtered(&t));
    }

    #[test]
    fn test_missing_pa_defeats_filter() {
        let mut t = trade("LONG", 50.0, 50.0, 0.0);
        t.strategy_votes = vec![
            vote("MultiTimeframe", Vote::Buy, 2),
            vote("ChartPatterns", Vote::Buy, 1),
        ];
        assert!(!is_filtered(&t));
    }
}
