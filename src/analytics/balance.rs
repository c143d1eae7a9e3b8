use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::profit::trade_profit;
use crate::models::{Trade, TradingAccount};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub account_id: String,
    pub currency: String,
    pub initial_balance: f64,
    pub current_balance: f64,
    pub total_profit: f64,
    pub profit_percentage: f64,
    pub trade_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioBalance {
    pub accounts: Vec<AccountBalance>,
    pub initial_balance: f64,
    pub current_balance: f64,
    pub total_profit: f64,
    pub profit_percentage: f64,
}

/// Balance of one account from the trades the caller associates with it.
///
/// Placeholder trades are skipped. Currencies are not converted.
pub fn account_balance(account: &TradingAccount, account_trades: &[Trade]) -> AccountBalance {
    let counted: Vec<&Trade> = account_trades.iter().filter(|t| !t.is_placeholder).collect();
    let total_profit: f64 = counted.iter().map(|t| trade_profit(t)).sum();

    AccountBalance {
        account_id: account.id.clone(),
        currency: account.currency.clone(),
        initial_balance: account.initial_balance,
        current_balance: account.initial_balance + total_profit,
        total_profit,
        profit_percentage: percentage(total_profit, account.initial_balance),
        trade_count: counted.len(),
    }
}

/// Sum of per-account balances. Trades are partitioned by `account_id`;
/// trades without a matching account are left out.
pub fn portfolio_balance(accounts: &[TradingAccount], all_trades: &[Trade]) -> PortfolioBalance {
    let mut by_account: HashMap<&str, Vec<Trade>> = HashMap::new();
    let mut unassigned = 0usize;

    for trade in all_trades {
        match trade.account_id.as_deref() {
            Some(id) if accounts.iter().any(|a| a.id == id) => {
                by_account.entry(id).or_default().push(trade.clone());
            }
            _ => unassigned += 1,
        }
    }

    if unassigned > 0 {
        log::debug!("Portfolio balance skipped {} trades without a matching account", unassigned);
    }

    let rows: Vec<AccountBalance> = accounts
        .iter()
        .map(|account| {
            let trades = by_account.get(account.id.as_str()).map(Vec::as_slice).unwrap_or(&[]);
            account_balance(account, trades)
        })
        .collect();

    let initial_balance: f64 = rows.iter().map(|r| r.initial_balance).sum();
    let total_profit: f64 = rows.iter().map(|r| r.total_profit).sum();

    PortfolioBalance {
        initial_balance,
        current_balance: rows.iter().map(|r| r.current_balance).sum(),
        total_profit,
        profit_percentage: percentage(total_profit, initial_balance),
        accounts: rows,
    }
}

fn percentage(profit: f64, base: f64) -> f64 {
    let pct = profit / base * 100.0;
    if pct.is_finite() { pct } else { 0.0 }
}
