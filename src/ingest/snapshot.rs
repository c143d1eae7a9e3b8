use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::JournalError;
use crate::models::{Settings, Trade, TradingAccount};

pub const SNAPSHOT_VERSION: u32 = 1;

/// Full journal export: settings, accounts and trades, with a checksum over
/// the accounts and trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalSnapshot {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    #[serde(default)]
    pub settings: Settings,
    pub accounts: Vec<TradingAccount>,
    pub trades: Vec<Trade>,
    pub checksum: String,
}

impl JournalSnapshot {
    pub fn new(
        settings: Settings,
        accounts: Vec<TradingAccount>,
        trades: Vec<Trade>,
    ) -> Result<Self, JournalError> {
        // JSON has no NaN or infinity; store what an import would read back
        let accounts: Vec<TradingAccount> = accounts.into_iter().map(finite_account).collect();
        let trades: Vec<Trade> = trades.into_iter().map(finite_trade).collect();

        let checksum = checksum(&accounts, &trades)?;
        Ok(JournalSnapshot {
            version: SNAPSHOT_VERSION,
            exported_at: Utc::now(),
            settings,
            accounts,
            trades,
            checksum,
        })
    }

    pub fn to_json(&self) -> Result<String, JournalError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and verify a snapshot.
    pub fn from_json(json: &str) -> Result<Self, JournalError> {
        let snapshot: JournalSnapshot = serde_json::from_str(json)?;

        if snapshot.version == 0 || snapshot.version > SNAPSHOT_VERSION {
            return Err(JournalError::UnsupportedVersion(snapshot.version));
        }

        let actual = checksum(&snapshot.accounts, &snapshot.trades)?;
        if actual != snapshot.checksum {
            log::warn!("Snapshot from {} failed checksum verification", snapshot.exported_at);
            return Err(JournalError::ChecksumMismatch {
                expected: snapshot.checksum,
                actual,
            });
        }

        log::info!(
            "Loaded snapshot: {} accounts, {} trades",
            snapshot.accounts.len(),
            snapshot.trades.len()
        );
        Ok(snapshot)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), JournalError> {
        fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Wrote snapshot to {:?}", path.as_ref());
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, JournalError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

fn finite_account(account: TradingAccount) -> TradingAccount {
    TradingAccount {
        initial_balance: finite_or_zero(account.initial_balance),
        balance: finite_or_zero(account.balance),
        ..account
    }
}

fn finite_trade(trade: Trade) -> Trade {
    let finite = |v: Option<f64>| v.filter(|n| n.is_finite());
    Trade {
        entry_price: finite(trade.entry_price),
        exit_price: finite(trade.exit_price),
        stop_loss: finite(trade.stop_loss),
        profit: finite(trade.profit),
        risk_amount: finite(trade.risk_amount),
        r_multiple: finite_or_zero(trade.r_multiple),
        take_profits: trade.take_profits.into_iter().filter(|n| n.is_finite()).collect(),
        ..trade
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn checksum(accounts: &[TradingAccount], trades: &[Trade]) -> Result<String, JournalError> {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(accounts)?);
    hasher.update(serde_json::to_vec(trades)?);
    Ok(format!("{:x}", hasher.finalize()))
}
