//! Frequency analysis of extreme entry conditions and of the
//! thin-confirmation MTF+PA-only strategy combination.

use crate::filter::{self, ExtremeFlags};
use crate::types::{Direction, TradeRecord};

/// How many MTF+PA-only-with-extreme trades are kept for display.
const SAMPLE_LIMIT: usize = 5;

/// Aggregates for one extreme-condition bucket.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConditionBucket {
    pub count: usize,
    pub loss_count: usize,
    pub loss_amount: f64,
    /// Trades in the bucket that also had a vote from Indicators,
    /// SupportResistance or VolumeAnalysis.
    pub with_additional: usize,
}

impl ConditionBucket {
    fn add(&mut self, profit: f64, has_additional: bool) {
        self.count += 1;
        if profit < 0.0 {
            self.loss_count += 1;
            self.loss_amount += profit;
        }
        if has_additional {
            self.with_additional += 1;
        }
    }

    /// Share of the bucket with additional confirmation, 0 when empty.
    pub fn additional_pct(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.with_additional as f64 / self.count as f64 * 100.0
        }
    }
}

/// Trades where exactly MultiTimeframe and PriceAction voted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThinConfirmationStats {
    pub count: usize,
    pub loss_count: usize,
    pub loss_amount: f64,
    /// How many of these coincided with any extreme condition.
    pub with_extreme: usize,
}

impl ThinConfirmationStats {
    /// Share that coincided with an extreme condition, 0 when empty.
    pub fn extreme_pct(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.with_extreme as f64 / self.count as f64 * 100.0
        }
    }
}

/// One MTF+PA-only trade that coincided with an extreme condition.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapSample {
    pub trade: TradeRecord,
    pub flags: ExtremeFlags,
}

/// The MTF+PA-only trades that the filter would actually catch: those taken
/// during extreme conditions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtremeOverlap {
    pub count: usize,
    pub loss_count: usize,
    pub loss_amount: f64,
    pub rsi_count: usize,
    pub adx_count: usize,
    pub macd_count: usize,
    /// First matches in dataset order, capped for display.
    pub samples: Vec<OverlapSample>,
}

impl ExtremeOverlap {
    /// Average losing amount, 0 when there are no losses.
    pub fn average_loss(&self) -> f64 {
        if self.loss_count == 0 {
            0.0
        } else {
            self.loss_amount / self.loss_count as f64
        }
    }
}

/// Full extremes report for one dataset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtremesReport {
    pub total_trades: usize,
    pub rsi_long: ConditionBucket,
    pub rsi_short: ConditionBucket,
    pub adx: ConditionBucket,
    pub macd: ConditionBucket,
    pub mtf_pa_only: ThinConfirmationStats,
    pub overlap: ExtremeOverlap,
}

/// Single pass over the dataset, tallying every extreme-condition bucket and
/// the MTF+PA-only combination. A trade lands in every bucket whose condition
/// it meets.
pub fn analyze(trades: &[TradeRecord]) -> ExtremesReport {
    let mut report = ExtremesReport {
        total_trades: trades.len(),
        ..Default::default()
    };

    for trade in trades {
        let profit = trade.profit_usd();
        let flags = filter::classify_extreme(trade);
        let votes = filter::classify_votes(trade);
        let additional = votes.has_additional();

        if flags.rsi {
            match trade.direction() {
                Direction::Long => report.rsi_long.add(profit, additional),
                Direction::Short => report.rsi_short.add(profit, additional),
            }
        }
        if flags.adx {
            report.adx.add(profit, additional);
        }
        if flags.macd {
            report.macd.add(profit, additional);
        }

        if votes.has_mtf() && votes.has_pa() && votes.voting_count() == 2 {
            report.mtf_pa_only.count += 1;
            if profit < 0.0 {
                report.mtf_pa_only.loss_count += 1;
                report.mtf_pa_only.loss_amount += profit;
            }

            if flags.any() {
                report.mtf_pa_only.with_extreme += 1;
                report.overlap.count += 1;
                if profit < 0.0 {
                    report.overlap.loss_count += 1;
                    report.overlap.loss_amount += profit;
                }
                if flags.rsi {
                    report.overlap.rsi_count += 1;
                }
                if flags.adx {
                    report.overlap.adx_count += 1;
                }
                if flags.macd {
                    report.overlap.macd_count += 1;
                }
                if report.overlap.samples.len() < SAMPLE_LIMIT {
                    report.overlap.samples.push(OverlapSample {
                        trade: trade.clone(),
                        flags,
                    });
                }
            }
        }
    }

    report
}

/// Print the extremes report in a formatted table.
pub fn print_report(report: &ExtremesReport) {
    let separator = "═".repeat(80);
    let rule = "─".repeat(80);

    println!();
    println!("{}", separator);
    println!("        EXTREME CONDITIONS & STRATEGY COMBINATIONS ANALYSIS");
    println!("{}", separator);
    println!();

    println!("Extreme Conditions Frequency:");
    println!("{}", rule);
    println!("  Total Trades:                {}", report.total_trades);
    println!();
    print_bucket("RSI > 65 (LONG)", &report.rsi_long);
    print_bucket("RSI < 35 (SHORT)", &report.rsi_short);
    print_bucket("ADX > 45", &report.adx);
    print_bucket("MACD > 15 or < -15", &report.macd);

    println!("MTF + PA Only Combinations:");
    println!("{}", rule);
    println!(
        "  Total MTF+PA only trades:    {}",
        report.mtf_pa_only.count
    );
    if report.mtf_pa_only.count > 0 {
        println!(
            "    Losses:                    {} (${:.2})",
            report.mtf_pa_only.loss_count, report.mtf_pa_only.loss_amount
        );
        println!(
            "    With extreme conditions:   {} ({:.1}%)",
            report.mtf_pa_only.with_extreme,
            report.mtf_pa_only.extreme_pct()
        );
    }
    println!();

    println!(
        "  MTF+PA only WITH extreme:    {}",
        report.overlap.count
    );
    if report.overlap.count > 0 {
        println!(
            "    Losses:                    {} (${:.2})",
            report.overlap.loss_count, report.overlap.loss_amount
        );
        println!(
            "    Average loss:              ${:.2}",
            report.overlap.average_loss()
        );
        println!();
        println!("    Breakdown by extreme type:");
        println!("      RSI extreme:             {}", report.overlap.rsi_count);
        println!("      ADX extreme:             {}", report.overlap.adx_count);
        println!("      MACD extreme:            {}", report.overlap.macd_count);

        println!();
        println!("    Sample trades (first {}):", report.overlap.samples.len());
        for (i, sample) in report.overlap.samples.iter().enumerate() {
            let meta = &sample.trade.trade_metadata;
            let ctx = &sample.trade.market_context;
            println!(
                "      {}. {} - Profit: ${:.2}",
                i + 1,
                if meta.direction.is_empty() {
                    "N/A"
                } else {
                    meta.direction.as_str()
                },
                meta.profit_usd
            );
            println!(
                "         RSI: {:.2}{}",
                ctx.rsi_value,
                if sample.flags.rsi { " [EXTREME]" } else { "" }
            );
            println!(
                "         ADX: {:.2}{}",
                ctx.adx_value,
                if sample.flags.adx { " [EXTREME]" } else { "" }
            );
            println!(
                "         MACD: {:.2}{}",
                ctx.macd_value,
                if sample.flags.macd { " [EXTREME]" } else { "" }
            );
        }
    }
    println!();

    println!("{}", separator);
    println!("CONCLUSION");
    println!("{}", separator);
    if report.overlap.count == 0 {
        println!("No trades found with MTF+PA only during extreme conditions.");
        println!();
        println!("Either other strategies also voted whenever conditions were extreme,");
        println!("or MTF and PA never voted alone during them. The filter simply does");
        println!("not trigger on this dataset; it still guards future trades that");
        println!("meet its conditions.");
    } else {
        println!(
            "Found {} trades with MTF+PA only during extreme conditions.",
            report.overlap.count
        );
        if report.overlap.loss_count > 0 {
            println!(
                "These resulted in {} losses totaling ${:.2}, which the filter",
                report.overlap.loss_count, report.overlap.loss_amount
            );
            println!("would have prevented.");
        }
    }
    println!("{}", separator);
}

fn print_bucket(label: &str, bucket: &ConditionBucket) {
    println!("  {}:  {} trades", label, bucket.count);
    if bucket.count > 0 {
        println!(
            "    Losses:                    {} (${:.2})",
            bucket.loss_count, bucket.loss_amount
        );
        println!(
            "    With additional confirm.:  {} ({:.1}%)",
            bucket.with_additional,
            bucket.additional_pct()
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MarketContext, StrategyVote, TradeMetadata, TradeRecord, Vote};

    fn trade(direction: &str, profit: f64, rsi: f64, adx: f64, macd: f64) -> TradeRecord {
        TradeRecord {
            trade_metadata: TradeMetadata {
                direction: direction.into(),
                profit_usd: profit,
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

    fn vote(strategy: &str, side: Vote, count: u32) -> StrategyVote {
        StrategyVote {
            strategy: strategy.into(),
            vote: side,
            vote_count: count,
        }
    }

    #[test]
    fn test_empty_dataset() {
        let report = analyze(&[]);
        assert_eq!(report.total_trades, 0);
        assert_eq!(report.rsi_long.additional_pct(), 0.0);
        assert_eq!(report.mtf_pa_only.extreme_pct(), 0.0);
        assert_eq!(report.overlap.average_loss(), 0.0);
    }

    #[test]
    fn test_rsi_buckets_split_by_direction() {
        let trades = vec![
            trade("LONG", -20.0, 70.0, 25.0, 0.0),
            trade("SHORT", 15.0, 30.0, 25.0, 0.0),
            trade("LONG", 5.0, 60.0, 25.0, 0.0),
        ];
        let report = analyze(&trades);
        assert_eq!(report.rsi_long.count, 1);
        assert_eq!(report.rsi_long.loss_count, 1);
        assert_eq!(report.rsi_long.loss_amount, -20.0);
        assert_eq!(report.rsi_short.count, 1);
        assert_eq!(report.rsi_short.loss_count, 0);
    }

    #[test]
    fn test_one_trade_can_land_in_several_buckets() {
        let trades = vec![trade("LONG", -10.0, 70.0, 50.0, 20.0)];
        let report = analyze(&trades);
        assert_eq!(report.rsi_long.count, 1);
        assert_eq!(report.adx.count, 1);
        assert_eq!(report.macd.count, 1);
    }

    #[test]
    fn test_additional_confirmation_share() {
        let mut corroborated = trade("LONG", 8.0, 70.0, 25.0, 0.0);
        corroborated.strategy_votes = vec![
            vote("MultiTimeframe", Vote::Buy, 2),
            vote("Indicators", Vote::Buy, 1),
        ];
        let bare = trade("LONG", -4.0, 70.0, 25.0, 0.0);

        let report = analyze(&[corroborated, bare]);
        assert_eq!(report.rsi_long.count, 2);
        assert_eq!(report.rsi_long.with_additional, 1);
        assert_eq!(report.rsi_long.additional_pct(), 50.0);
    }

    #[test]
    fn test_mtf_pa_only_overlap_and_samples() {
        let mut overlap = trade("LONG", -30.0, 50.0, 50.0, 0.0);
        overlap.strategy_votes = vec![
            vote("MultiTimeframe", Vote::Buy, 2),
            vote("PriceAction", Vote::Buy, 1),
        ];
        let mut calm = trade("LONG", 12.0, 50.0, 25.0, 0.0);
        calm.strategy_votes = overlap.strategy_votes.clone();
        let mut crowded = trade("LONG", -7.0, 50.0, 50.0, 0.0);
        crowded.strategy_votes = vec![
            vote("MultiTimeframe", Vote::Buy, 2),
            vote("PriceAction", Vote::Buy, 1),
            vote("VolumeAnalysis", Vote::Buy, 1),
        ];

        let report = analyze(&[overlap, calm, crowded]);
        assert_eq!(report.mtf_pa_only.count, 2);
        assert_eq!(report.mtf_pa_only.with_extreme, 1);
        assert_eq!(report.mtf_pa_only.extreme_pct(), 50.0);
        assert_eq!(report.overlap.count, 1);
        assert_eq!(report.overlap.loss_count, 1);
        assert_eq!(report.overlap.loss_amount, -30.0);
        assert_eq!(report.overlap.average_loss(), -30.0);
        assert_eq!(report.overlap.adx_count, 1);
        assert_eq!(report.overlap.rsi_count, 0);
        assert_eq!(report.overlap.samples.len(), 1);
        assert!(report.overlap.samples[0].flags.adx);
    }
}
