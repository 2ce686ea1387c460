//! Hypothetical impact of applying the extreme-condition filter to a
//! historical result set: what it would have excluded, and at what net
//! cost or benefit.

use crate::filter::{self, ExtremeFlags, VoteProfile};
use crate::types::TradeRecord;

/// How many filtered losing trades are kept for the sample listing.
const SAMPLE_LIMIT: usize = 10;

/// Loss tally attributed to one extreme-condition type. A filtered loss can
/// count toward several types when multiple indicators flagged at once.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConditionLosses {
    pub count: usize,
    pub amount: f64,
}

impl ConditionLosses {
    fn add(&mut self, profit: f64) {
        self.count += 1;
        self.amount += profit;
    }
}

/// One trade the filter would have excluded, kept for display.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredTrade {
    pub trade: TradeRecord,
    pub flags: ExtremeFlags,
    pub votes: VoteProfile,
}

/// Aggregate effect of retroactively excluding filtered trades.
///
/// All amounts are signed sums of `profit_usd`; loss amounts are negative.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImpactReport {
    pub total_trades: usize,
    pub total_losses: usize,
    pub total_loss_amount: f64,
    pub filtered_count: usize,
    pub filtered_loss_count: usize,
    pub filtered_loss_amount: f64,
    pub filtered_win_count: usize,
    pub filtered_win_amount: f64,
    pub rsi_losses: ConditionLosses,
    pub adx_losses: ConditionLosses,
    pub macd_losses: ConditionLosses,
    /// First filtered losing trades in dataset order, capped for display.
    pub sample_losses: Vec<FilteredTrade>,
}

impl ImpactReport {
    /// Signed sum of everything the filter would have excluded. Positive
    /// means the filter saves money, negative means it costs money.
    pub fn net_impact(&self) -> f64 {
        self.filtered_loss_amount + self.filtered_win_amount
    }

    /// Filtered trades as a share of the whole dataset, 0 when empty.
    pub fn filtered_share_pct(&self) -> f64 {
        if self.total_trades == 0 {
            0.0
        } else {
            self.filtered_count as f64 / self.total_trades as f64 * 100.0
        }
    }

    pub fn average_filtered_loss(&self) -> f64 {
        if self.filtered_loss_count == 0 {
            0.0
        } else {
            self.filtered_loss_amount / self.filtered_loss_count as f64
        }
    }

    pub fn average_filtered_win(&self) -> f64 {
        if self.filtered_win_count == 0 {
            0.0
        } else {
            self.filtered_win_amount / self.filtered_win_count as f64
        }
    }

    /// Share of losing trades the filter would have prevented.
    /// None when the dataset has no losing trades.
    pub fn loss_prevention_rate(&self) -> Option<f64> {
        (self.total_losses > 0)
            .then(|| self.filtered_loss_count as f64 / self.total_losses as f64 * 100.0)
    }

    /// Share of the total loss amount the filter would have prevented.
    /// None when the dataset lost no money.
    pub fn amount_prevention_rate(&self) -> Option<f64> {
        (self.total_loss_amount != 0.0)
            .then(|| self.filtered_loss_amount.abs() / self.total_loss_amount.abs() * 100.0)
    }
}

/// Single pass over the dataset, partitioning trades by the filter rule and
/// filtered trades by sign of profit. Pure and order-independent on the
/// aggregates; only `sample_losses` depends on dataset order.
pub fn measure_impact(trades: &[TradeRecord]) -> ImpactReport {
    let mut report = ImpactReport {
        total_trades: trades.len(),
        ..Default::default()
    };

    for trade in trades {
        let profit = trade.profit_usd();
        if trade.is_loss() {
            report.total_losses += 1;
            report.total_loss_amount += profit;
        }

        let flags = filter::classify_extreme(trade);
        let votes = filter::classify_votes(trade);
        if !filter::filter_matches(flags, &votes) {
            continue;
        }

        report.filtered_count += 1;
        if trade.is_loss() {
            report.filtered_loss_count += 1;
            report.filtered_loss_amount += profit;

            if flags.rsi {
                report.rsi_losses.add(profit);
            }
            if flags.adx {
                report.adx_losses.add(profit);
            }
            if flags.macd {
                report.macd_losses.add(profit);
            }

            if report.sample_losses.len() < SAMPLE_LIMIT {
                report.sample_losses.push(FilteredTrade {
                    trade: trade.clone(),
                    flags,
                    votes,
                });
            }
        } else {
            report.filtered_win_count += 1;
            report.filtered_win_amount += profit;
        }
    }

    report
}

/// Print the impact report in a formatted table.
pub fn print_report(report: &ImpactReport) {
    let separator = "═".repeat(80);
    let rule = "─".repeat(80);

    println!();
    println!("{}", separator);
    println!("        EXTREME MARKET CONDITIONS FILTER - IMPACT ANALYSIS");
    println!("{}", separator);
    println!();

    println!("Overall Statistics:");
    println!("{}", rule);
    println!("  Total Trades:                {}", report.total_trades);
    if report.total_trades > 0 {
        println!(
            "  Total Losses:                {} ({:.1}%)",
            report.total_losses,
            report.total_losses as f64 / report.total_trades as f64 * 100.0
        );
    } else {
        println!("  Total Losses:                0");
    }
    println!(
        "  Total Loss Amount:           ${:.2}",
        report.total_loss_amount
    );
    println!();

    println!("Filter Impact:");
    println!("{}", rule);
    println!(
        "  Trades That Would Be Filtered:  {} ({:.1}% of all trades)",
        report.filtered_count,
        report.filtered_share_pct()
    );
    println!();
    println!("  Filtered Losses:             {}", report.filtered_loss_count);
    println!(
        "  Filtered Loss Amount:        ${:.2}",
        report.filtered_loss_amount
    );
    println!(
        "  Average Filtered Loss:       ${:.2}",
        report.average_filtered_loss()
    );
    println!();
    println!("  Filtered Wins:               {}", report.filtered_win_count);
    println!(
        "  Filtered Win Amount:         ${:.2}",
        report.filtered_win_amount
    );
    println!(
        "  Average Filtered Win:        ${:.2}",
        report.average_filtered_win()
    );
    println!();

    let net = report.net_impact();
    println!("  NET IMPACT:                  ${:.2}", net);
    if net > 0.0 {
        println!("  POSITIVE - filtering saves money");
    } else {
        println!("  NEGATIVE - filtering costs money");
    }
    println!();

    if let (Some(loss_rate), Some(amount_rate)) = (
        report.loss_prevention_rate(),
        report.amount_prevention_rate(),
    ) {
        println!("Loss Prevention:");
        println!("{}", rule);
        println!(
            "  Losses Prevented:            {}/{} ({:.1}%)",
            report.filtered_loss_count, report.total_losses, loss_rate
        );
        println!(
            "  Loss Amount Prevented:       ${:.2} / ${:.2} ({:.1}%)",
            report.filtered_loss_amount.abs(),
            report.total_loss_amount.abs(),
            amount_rate
        );
        println!();
    }

    println!("Filtered Losses by Extreme Condition Type:");
    println!("{}", rule);
    println!(
        "  RSI Extreme:                 {} losses, ${:.2}",
        report.rsi_losses.count, report.rsi_losses.amount
    );
    println!(
        "  ADX Extreme:                 {} losses, ${:.2}",
        report.adx_losses.count, report.adx_losses.amount
    );
    println!(
        "  MACD Extreme:                {} losses, ${:.2}",
        report.macd_losses.count, report.macd_losses.amount
    );
    println!();

    if !report.sample_losses.is_empty() {
        println!(
            "Sample Filtered Losing Trades (first {}):",
            report.sample_losses.len()
        );
        println!("{}", rule);
        for (i, sample) in report.sample_losses.iter().enumerate() {
            let meta = &sample.trade.trade_metadata;
            let ctx = &sample.trade.market_context;
            println!();
            println!(
                "  {}. {} - Profit: ${:.2}",
                i + 1,
                if meta.direction.is_empty() {
                    "N/A"
                } else {
                    meta.direction.as_str()
                },
                meta.profit_usd
            );
            println!(
                "     Entry: {}",
                if meta.entry_time.is_empty() {
                    "N/A"
                } else {
                    meta.entry_time.as_str()
                }
            );
            println!(
                "     RSI: {:.2}{}",
                ctx.rsi_value,
                if sample.flags.rsi { " [EXTREME]" } else { "" }
            );
            println!(
                "     ADX: {:.2}{}",
                ctx.adx_value,
                if sample.flags.adx { " [EXTREME]" } else { "" }
            );
            println!(
                "     MACD: {:.2}{}",
                ctx.macd_value,
                if sample.flags.macd { " [EXTREME]" } else { "" }
            );

            let names: Vec<&str> = sample
                .votes
                .voting_strategies()
                .into_iter()
                .map(|s| s.name())
                .collect();
            println!("     Strategies: {}", names.join(", "));
        }
        println!();
    }

    println!("{}", separator);
    println!("CONCLUSION");
    println!("{}", separator);
    if net > 0.0 {
        println!(
            "The filter would have IMPROVED performance by ${:.2}:",
            net
        );
        println!(
            "  - Prevented {} losing trades (${:.2})",
            report.filtered_loss_count,
            report.filtered_loss_amount.abs()
        );
        println!(
            "  - Sacrificed {} winning trades (${:.2})",
            report.filtered_win_count, report.filtered_win_amount
        );
        if let Some(amount_rate) = report.amount_prevention_rate() {
            println!(
                "  - A {:.1}% reduction in total losses",
                amount_rate
            );
        }
    } else if report.filtered_count == 0 {
        println!("The filter matches no trades in this dataset; it would have no effect.");
    } else {
        println!(
            "The filter would have REDUCED performance by ${:.2}:",
            net.abs()
        );
        println!(
            "  - The filtered wins (${:.2}) exceed the filtered losses (${:.2})",
            report.filtered_win_amount,
            report.filtered_loss_amount.abs()
        );
        println!("  - Consider adjusting the extreme zone thresholds");
    }
    println!("{}", separator);
}
