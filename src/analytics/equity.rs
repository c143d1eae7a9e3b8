use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::profit::trade_profit;
use crate::models::Trade;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityCurvePoint {
    pub date: String, // YYYY-MM-DD
    pub daily_profit: f64,
    pub cumulative_profit: f64,
    pub trade_count: usize,
}

/// Daily cumulative profit, keyed by the UTC day a trade closed (or opened,
/// when it has no exit date). Undated and placeholder trades are skipped.
pub fn equity_curve(trades: &[Trade]) -> Vec<EquityCurvePoint> {
    let mut daily: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();

    for trade in trades.iter().filter(|t| !t.is_placeholder) {
        let Some(date) = trade.exit_date.or(trade.entry_date) else {
            continue;
        };
        let entry = daily.entry(date.date_naive()).or_insert((0.0, 0));
        entry.0 += trade_profit(trade);
        entry.1 += 1;
    }

    let mut cumulative_profit = 0.0;
    daily
        .into_iter()
        .map(|(date, (daily_profit, trade_count))| {
            cumulative_profit += daily_profit;
            EquityCurvePoint {
                date: date.format("%Y-%m-%d").to_string(),
                daily_profit,
                cumulative_profit,
                trade_count,
            }
        })
        .collect()
}
