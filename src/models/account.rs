use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::analytics::trade_profit;
use crate::error::JournalError;
use crate::models::{Settings, Trade};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingAccount {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub initial_balance: f64,
    pub balance: f64, // Cached, see with_recomputed_balance
    pub created_at: i64,
    pub updated_at: i64,
}

/// Input for creating a trading account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountInput {
    pub name: String,
    pub currency: String,
    pub initial_balance: f64,
}

impl TradingAccount {
    pub fn create(input: CreateAccountInput) -> Result<Self, JournalError> {
        Self::create_with(input, &Settings::default())
    }

    /// Create an account, taking the currency from `settings` when the input
    /// leaves it blank.
    pub fn create_with(
        input: CreateAccountInput,
        settings: &Settings,
    ) -> Result<Self, JournalError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(JournalError::invalid("name", "account name cannot be empty"));
        }

        let currency = if input.currency.trim().is_empty() {
            normalize_currency(&settings.currency)?
        } else {
            normalize_currency(&input.currency)?
        };

        if !input.initial_balance.is_finite() || input.initial_balance < 0.0 {
            return Err(JournalError::invalid(
                "initialBalance",
                format!("must be a finite, non-negative amount, got {}", input.initial_balance),
            ));
        }

        let now = Utc::now();
        let id = format!("ACCOUNT-{}-{}", now.timestamp_millis(), uuid::Uuid::new_v4());

        log::debug!("Created account {} ({} {})", id, input.initial_balance, currency);

        Ok(TradingAccount {
            id,
            name: name.to_string(),
            currency,
            initial_balance: input.initial_balance,
            balance: input.initial_balance,
            created_at: now.timestamp(),
            updated_at: now.timestamp(),
        })
    }

    /// Return a copy whose cached `balance` reflects the given trades.
    ///
    /// Only trades owned by this account count, and placeholders never do.
    pub fn with_recomputed_balance(&self, trades: &[Trade]) -> TradingAccount {
        let total: f64 = trades
            .iter()
            .filter(|t| !t.is_placeholder && t.account_id.as_deref() == Some(self.id.as_str()))
            .map(trade_profit)
            .sum();

        TradingAccount {
            balance: self.initial_balance + total,
            updated_at: Utc::now().timestamp(),
            ..self.clone()
        }
    }
}

fn normalize_currency(raw: &str) -> Result<String, JournalError> {
    let code = raw.trim().to_ascii_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(JournalError::invalid(
            "currency",
            format!("expected a 3-letter code, got {:?}", raw),
        ));
    }
    Ok(code)
}
