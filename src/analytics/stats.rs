use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::profit::trade_profit;
use crate::models::{Settings, Trade};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeStats {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub break_even_trades: usize,
    pub win_rate: f64,
    pub loss_rate: f64,
    pub break_even_rate: f64,

    pub average_r_multiple: f64,
    pub total_profit: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub profit_factor: f64,
    pub average_win: f64,
    pub average_loss: f64,
    pub expectancy: f64,
    pub best_trade: f64,
    pub worst_trade: f64,

    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub max_consecutive_wins: usize,
    pub max_consecutive_losses: usize,
}

impl TradeStats {
    pub fn summary(&self) -> String {
        format!(
            "Trades: {} (W: {}, L: {}, BE: {})\n\
             Win Rate: {:.1}%\n\
             Profit Factor: {:.2}\n\
             Expectancy: {:.2}\n\
             Avg R: {:.2}\n\
             Total Profit: {:.2}\n\
             Max Drawdown: {:.2}\n\
             Sharpe Ratio: {:.2}\n\
             Sortino Ratio: {:.2}",
            self.total_trades,
            self.winning_trades,
            self.losing_trades,
            self.break_even_trades,
            self.win_rate,
            self.profit_factor,
            self.expectancy,
            self.average_r_multiple,
            self.total_profit,
            self.max_drawdown,
            self.sharpe_ratio,
            self.sortino_ratio,
        )
    }
}

/// Aggregate statistics with default settings.
///
/// Every trade given is counted; strip placeholders first
/// (`ingest::without_placeholders`).
pub fn compute_stats(trades: &[Trade]) -> TradeStats {
    compute_stats_with(trades, &Settings::default())
}

pub fn compute_stats_with(trades: &[Trade], settings: &Settings) -> TradeStats {
    let total = trades.len();
    if total == 0 {
        return TradeStats::default();
    }

    let profits: Vec<f64> = trades.iter().map(trade_profit).collect();
    let returns: Vec<f64> = trades.iter().map(|t| finite_or_zero(t.r_multiple)).collect();
    let band = settings.breakeven_threshold;

    let mut winning_trades = 0;
    let mut losing_trades = 0;
    let mut gross_profit = 0.0;
    let mut gross_loss = 0.0;
    for &profit in &profits {
        if profit > band {
            winning_trades += 1;
            gross_profit += profit;
        } else if profit < -band {
            losing_trades += 1;
            gross_loss += profit.abs();
        }
    }
    let break_even_trades = total - winning_trades - losing_trades;
    // Sums of extreme finite profits can overflow
    let gross_profit = finite_or_zero(gross_profit);
    let gross_loss = finite_or_zero(gross_loss);

    let n = total as f64;
    let win_rate = winning_trades as f64 / n * 100.0;
    let loss_rate = losing_trades as f64 / n * 100.0;
    let break_even_rate = break_even_trades as f64 / n * 100.0;

    let average_win = if winning_trades > 0 {
        gross_profit / winning_trades as f64
    } else {
        0.0
    };
    let average_loss = if losing_trades > 0 {
        gross_loss / losing_trades as f64
    } else {
        0.0
    };
    let expectancy = finite_or_zero(
        (win_rate / 100.0) * average_win - (1.0 - win_rate / 100.0) * average_loss,
    );

    // A loss-free record reports gross profit as its factor
    let profit_factor = if gross_loss == 0.0 {
        gross_profit
    } else {
        finite_or_zero(gross_profit / gross_loss)
    };

    let chronological = chronological_order(trades);
    let ordered_profits: Vec<f64> = chronological.iter().map(|&i| profits[i]).collect();
    let (max_consecutive_wins, max_consecutive_losses) = streaks(&ordered_profits, band);

    let stats = TradeStats {
        total_trades: total,
        winning_trades,
        losing_trades,
        break_even_trades,
        win_rate,
        loss_rate,
        break_even_rate,
        average_r_multiple: finite_or_zero(mean(&returns)),
        total_profit: finite_or_zero(profits.iter().sum()),
        gross_profit,
        gross_loss,
        profit_factor,
        average_win,
        average_loss,
        expectancy,
        best_trade: profits.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        worst_trade: profits.iter().copied().fold(f64::INFINITY, f64::min),
        max_drawdown: finite_or_zero(max_drawdown(&ordered_profits)),
        sharpe_ratio: finite_or_zero(sharpe_ratio(&returns)),
        sortino_ratio: finite_or_zero(sortino_ratio(&returns, settings.sortino_ceiling)),
        max_consecutive_wins,
        max_consecutive_losses,
    };

    log::debug!(
        "Computed stats over {} trades: win rate {:.1}%, total profit {:.2}",
        total,
        stats.win_rate,
        stats.total_profit
    );

    stats
}

pub fn stats_by_strategy(trades: &[Trade]) -> BTreeMap<String, TradeStats> {
    grouped_stats(trades, |t| t.strategy_id.clone())
}

pub fn stats_by_instrument(trades: &[Trade]) -> BTreeMap<String, TradeStats> {
    grouped_stats(trades, |t| t.instrument.clone())
}

fn grouped_stats<F>(trades: &[Trade], key: F) -> BTreeMap<String, TradeStats>
where
    F: Fn(&Trade) -> String,
{
    let mut groups: BTreeMap<String, Vec<Trade>> = BTreeMap::new();
    for trade in trades {
        groups.entry(key(trade)).or_default().push(trade.clone());
    }

    groups
        .into_iter()
        .map(|(k, group)| (k, compute_stats(&group)))
        .collect()
}

/// Indices sorted by entry date, stable for ties; undated trades come first.
fn chronological_order(trades: &[Trade]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..trades.len()).collect();
    order.sort_by_key(|&i| trades[i].entry_date);
    order
}

/// Largest peak-to-trough fall of cumulative profit, starting from a flat equity of 0.
fn max_drawdown(ordered_profits: &[f64]) -> f64 {
    let mut cumulative = 0.0;
    let mut peak = 0.0_f64;
    let mut max_dd = 0.0_f64;

    for &profit in ordered_profits {
        cumulative += profit;
        peak = peak.max(cumulative);
        max_dd = max_dd.max(peak - cumulative);
    }

    max_dd
}

fn streaks(ordered_profits: &[f64], band: f64) -> (usize, usize) {
    let (mut wins, mut losses) = (0, 0);
    let (mut max_wins, mut max_losses) = (0, 0);

    for &profit in ordered_profits {
        if profit > band {
            wins += 1;
            losses = 0;
        } else if profit < -band {
            losses += 1;
            wins = 0;
        } else {
            wins = 0;
            losses = 0;
        }
        max_wins = max_wins.max(wins);
        max_losses = max_losses.max(losses);
    }

    (max_wins, max_losses)
}

fn sharpe_ratio(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    let sd = std_dev(returns);
    if sd == 0.0 {
        return 0.0;
    }
    mean(returns) / sd
}

fn sortino_ratio(returns: &[f64], ceiling: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }

    let downside: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
    if downside.is_empty() {
        return ceiling;
    }

    let downside_dev = (downside.iter().map(|r| r * r).sum::<f64>() / downside.len() as f64).sqrt();
    if downside_dev == 0.0 {
        return ceiling;
    }
    mean(returns) / downside_dev
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
fn std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
