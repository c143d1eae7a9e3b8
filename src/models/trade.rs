use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::analytics::trade_profit;
use crate::error::JournalError;

pub const TAG_BACKTEST: &str = "backtest";
pub const TAG_ACCOUNT: &str = "account";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Long,
    Short,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "long",
            Direction::Short => "short",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" => Ok(Direction::Long),
            "short" => Ok(Direction::Short),
            other => Err(JournalError::invalid(
                "direction",
                format!("expected long or short, got {:?}", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Breakeven,
}

/// Canonical trade record. Alternate field spellings are resolved at ingestion
/// (see `ingest::map_record_to_trade`), so every field here has one meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_id: Option<String>,

    pub instrument: String,
    pub direction: Direction,
    #[serde(default)]
    pub strategy_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,

    #[serde(default)]
    pub entry_price: Option<f64>,
    #[serde(default)]
    pub exit_price: Option<f64>,
    #[serde(default)]
    pub stop_loss: Option<f64>,
    #[serde(default)]
    pub take_profits: Vec<f64>,

    #[serde(default, deserialize_with = "null_as_zero")]
    pub r_multiple: f64,
    #[serde(default)]
    pub profit: Option<f64>,
    #[serde(default)]
    pub risk_amount: Option<f64>,

    #[serde(default)]
    pub entry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub exit_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default)]
    pub is_placeholder: bool,
}

impl Trade {
    pub fn new(id: impl Into<String>, instrument: impl Into<String>, direction: Direction) -> Self {
        Trade {
            id: id.into(),
            instrument: instrument.into(),
            direction,
            ..Default::default()
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_backtest(&self) -> bool {
        self.has_tag(TAG_BACKTEST)
    }

    /// Win/loss/breakeven by the sign of the computed profit.
    pub fn outcome(&self) -> Outcome {
        let profit = trade_profit(self);
        if profit > 0.0 {
            Outcome::Win
        } else if profit < 0.0 {
            Outcome::Loss
        } else {
            Outcome::Breakeven
        }
    }
}

// serde_json writes non-finite floats as null
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}
