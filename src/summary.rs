//! Dataset-level win/loss statistics and MTF+PA combination analysis.

use crate::filter;
use crate::types::TradeRecord;

/// Aggregates for one strategy-combination bucket.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CombinationStats {
    pub count: usize,
    pub loss_count: usize,
    pub loss_amount: f64,
}

impl CombinationStats {
    fn add(&mut self, profit: f64) {
        self.count += 1;
        if profit < 0.0 {
            self.loss_count += 1;
            self.loss_amount += profit;
        }
    }
}

/// Win/loss totals for one dataset. Zero-profit trades count as neither win
/// nor loss, matching the export's own accounting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SummaryReport {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    /// Sum of positive profits.
    pub total_profit: f64,
    /// Sum of negative profits (itself negative).
    pub total_loss: f64,
    /// Trades where both MultiTimeframe and PriceAction voted.
    pub mtf_pa: CombinationStats,
    /// The subset where nothing else voted.
    pub mtf_pa_only: CombinationStats,
}

impl SummaryReport {
    pub fn net_profit(&self) -> f64 {
        self.total_profit + self.total_loss
    }

    /// Win percentage, 0 for an empty dataset.
    pub fn win_pct(&self) -> f64 {
        if self.total_trades == 0 {
            0.0
        } else {
            self.wins as f64 / self.total_trades as f64 * 100.0
        }
    }

    /// Loss percentage, 0 for an empty dataset.
    pub fn loss_pct(&self) -> f64 {
        if self.total_trades == 0 {
            0.0
        } else {
            self.losses as f64 / self.total_trades as f64 * 100.0
        }
    }
}

/// Single pass over the dataset computing win/loss totals and the MTF+PA
/// combination buckets.
pub fn summarize(trades: &[TradeRecord]) -> SummaryReport {
    let mut report = SummaryReport {
        total_trades: trades.len(),
        ..Default::default()
    };

    for trade in trades {
        let profit = trade.profit_usd();
        if profit > 0.0 {
            report.wins += 1;
            report.total_profit += profit;
        } else if profit < 0.0 {
            report.losses += 1;
            report.total_loss += profit;
        }

        let votes = filter::classify_votes(trade);
        if votes.has_mtf() && votes.has_pa() {
            report.mtf_pa.add(profit);
            if votes.voting_count() == 2 {
                report.mtf_pa_only.add(profit);
            }
        }
    }

    report
}

/// Print the summary report in a formatted table.
pub fn print_report(report: &SummaryReport) {
    let separator = "═".repeat(80);
    let rule = "─".repeat(80);

    println!();
    println!("{}", separator);
    println!("        DATASET STATISTICS");
    println!("{}", separator);
    println!();

    println!("Win/Loss Totals:");
    println!("{}", rule);
    println!("  Total Trades:                {}", report.total_trades);
    println!(
        "  Wins:                        {} ({:.1}%)",
        report.wins,
        report.win_pct()
    );
    println!(
        "  Losses:                      {} ({:.1}%)",
        report.losses,
        report.loss_pct()
    );
    println!("  Total Profit:                ${:.2}", report.total_profit);
    println!("  Total Loss:                  ${:.2}", report.total_loss);
    println!("  Net Profit:                  ${:.2}", report.net_profit());
    println!();

    println!("MTF+PA Analysis:");
    println!("{}", rule);
    println!("  Total MTF+PA trades:         {}", report.mtf_pa.count);
    println!(
        "    Losses:                    {} (${:.2})",
        report.mtf_pa.loss_count, report.mtf_pa.loss_amount
    );
    println!();
    println!("  MTF+PA only (no other strategies):");
    println!("    Total:                     {}", report.mtf_pa_only.count);
    println!(
        "    Losses:                    {} (${:.2})",
        report.mtf_pa_only.loss_count, report.mtf_pa_only.loss_amount
    );
    println!("{}", separator);
}
