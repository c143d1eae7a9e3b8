use serde::Deserialize;
use serde_json::Value;

/// Trade record as persisted by the browser journal.
///
/// Numeric fields arrive as numbers, numeric strings, empty strings or null,
/// so they are kept as raw JSON values until mapping.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTradeRecord {
    pub id: Option<Value>,
    pub trade_id: Option<Value>,

    pub instrument: Option<String>,
    pub pair: Option<String>, // Older records
    pub direction: Option<String>,
    pub strategy_id: Option<String>,
    pub account_id: Option<String>,
    pub tags: Option<Value>, // Array of strings, or a comma-separated string

    pub entry_price: Option<Value>,
    pub exit_price: Option<Value>,
    pub sl_price: Option<Value>,
    pub stop_loss: Option<Value>,
    pub take_profit: Option<Value>,
    #[serde(rename = "takeProfit2")]
    pub take_profit_2: Option<Value>,
    #[serde(rename = "takeProfit3")]
    pub take_profit_3: Option<Value>,
    pub take_profits: Option<Vec<Value>>,

    pub r_multiple: Option<Value>,
    pub profit: Option<Value>,
    pub risk_amount: Option<Value>,

    pub entry_date: Option<Value>,
    pub exit_date: Option<Value>,
    pub session: Option<String>,
    pub entry_type: Option<String>,
    pub entry_timeframe: Option<String>,
    pub timeframe: Option<String>,
    pub notes: Option<String>,

    pub is_placeholder: Option<bool>,
}
