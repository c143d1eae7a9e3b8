use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use super::types::RawTradeRecord;
use crate::error::JournalError;
use crate::models::{Direction, Trade};

/// Map a loosely typed record to the canonical `Trade`.
///
/// Malformed numbers and dates degrade to absent values; only a missing id or an
/// unknown direction is an error.
pub fn map_record_to_trade(record: &RawTradeRecord) -> Result<Trade, JournalError> {
    let id = record
        .id
        .as_ref()
        .and_then(value_to_string)
        .ok_or_else(|| JournalError::invalid("id", "trade record has no id"))?;

    let is_placeholder = record.is_placeholder.unwrap_or(false);

    // Placeholders stand in for empty strategies and may carry no direction
    let direction = match non_empty(&record.direction) {
        Some(d) => d.parse::<Direction>()?,
        None if is_placeholder => Direction::default(),
        None => {
            return Err(JournalError::invalid(
                "direction",
                format!("trade {} has no direction", id),
            ));
        }
    };

    let instrument = non_empty(&record.instrument)
        .or_else(|| non_empty(&record.pair))
        .unwrap_or_default()
        .to_string();

    let take_profits = match &record.take_profits {
        Some(levels) => levels.iter().filter_map(parse_number).collect(),
        None => [&record.take_profit, &record.take_profit_2, &record.take_profit_3]
            .into_iter()
            .filter_map(|v| v.as_ref().and_then(parse_number))
            .collect(),
    };

    Ok(Trade {
        id,
        trade_id: record.trade_id.as_ref().and_then(value_to_string),
        instrument,
        direction,
        strategy_id: non_empty(&record.strategy_id).unwrap_or_default().to_string(),
        account_id: non_empty(&record.account_id).map(str::to_string),
        tags: parse_tags(record.tags.as_ref()),
        entry_price: number(&record.entry_price),
        exit_price: number(&record.exit_price),
        stop_loss: number(&record.sl_price).or_else(|| number(&record.stop_loss)),
        take_profits,
        r_multiple: number(&record.r_multiple).unwrap_or(0.0),
        profit: number(&record.profit),
        risk_amount: number(&record.risk_amount),
        entry_date: record.entry_date.as_ref().and_then(parse_date),
        exit_date: record.exit_date.as_ref().and_then(parse_date),
        session: non_empty(&record.session).map(str::to_string),
        entry_type: non_empty(&record.entry_type).map(str::to_string),
        timeframe: non_empty(&record.entry_timeframe)
            .or_else(|| non_empty(&record.timeframe))
            .map(str::to_string),
        notes: record.notes.clone().filter(|n| !n.is_empty()),
        is_placeholder,
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn number(value: &Option<Value>) -> Option<f64> {
    value.as_ref().and_then(parse_number)
}

/// Finite number from a JSON number or numeric string.
pub fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// ISO-8601 date in any of the shapes the journal has written over time,
/// or epoch milliseconds.
pub fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    let raw = match value {
        Value::String(s) => s.trim(),
        Value::Number(n) => return n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => return None,
    };

    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_tags(value: Option<&Value>) -> BTreeSet<String> {
    let tags: Vec<&str> = match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(Value::String(s)) => s.split(',').collect(),
        _ => return BTreeSet::new(),
    };

    tags.into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::trade_profit;
    use serde_json::json;

    fn record(value: Value) -> RawTradeRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_map_full_record() {
        let raw = record(json!({
            "id": "abc",
            "tradeId": 17,
            "pair": "EURUSD",
            "direction": "Long",
            "strategyId": "london-breakout",
            "accountId": "ACCOUNT-1",
            "tags": ["account", " live "],
            "entryPrice": "1.0850",
            "exitPrice": 1.0900,
            "stopLoss": "1.0820",
            "takeProfit": 1.09,
            "takeProfit2": "1.095",
            "rMultiple": "1.6",
            "riskAmount": "50",
            "entryDate": "2024-01-15T08:30:00.000Z",
            "exitDate": "2024-01-15T11:00:00Z",
            "session": "London",
            "entryTimeframe": "5m",
            "timeframe": "1h"
        }));

        let trade = map_record_to_trade(&raw).unwrap();
        assert_eq!(trade.id, "abc");
        assert_eq!(trade.trade_id.as_deref(), Some("17"));
        assert_eq!(trade.instrument, "EURUSD");
        assert_eq!(trade.direction, Direction::Long);
        assert_eq!(trade.stop_loss, Some(1.082));
        assert_eq!(trade.take_profits, vec![1.09, 1.095]);
        assert_eq!(trade.timeframe.as_deref(), Some("5m"));
        assert!(trade.has_tag("live"));
        assert_eq!(trade.risk_amount, Some(50.0));
        assert_eq!(trade.entry_date, Some("2024-01-15T08:30:00Z".parse().unwrap()));
        assert_eq!(trade.profit, None);
    }

    #[test]
    fn test_string_risk_amount_feeds_profit() {
        let raw = record(json!({
            "id": "1",
            "direction": "long",
            "riskAmount": "50",
            "rMultiple": 2
        }));
        assert_eq!(trade_profit(&map_record_to_trade(&raw).unwrap()), 100.0);
    }

    #[test]
    fn test_unparsable_numbers_degrade() {
        let raw = record(json!({
            "id": "1",
            "direction": "short",
            "riskAmount": "n/a",
            "profit": "",
            "rMultiple": null,
            "entryPrice": {"bad": true}
        }));
        let trade = map_record_to_trade(&raw).unwrap();
        assert_eq!(trade.risk_amount, None);
        assert_eq!(trade.profit, None);
        assert_eq!(trade.r_multiple, 0.0);
        assert_eq!(trade.entry_price, None);
        assert_eq!(trade_profit(&trade), 0.0);
    }

    #[test]
    fn test_instrument_preferred_over_pair() {
        let raw = record(json!({
            "id": "1",
            "direction": "long",
            "instrument": "XAUUSD",
            "pair": "EURUSD"
        }));
        assert_eq!(map_record_to_trade(&raw).unwrap().instrument, "XAUUSD");

        let blank = record(json!({
            "id": "1",
            "direction": "long",
            "instrument": "",
            "pair": "EURUSD",
            "slPrice": 2
        }));
        let trade = map_record_to_trade(&blank).unwrap();
        assert_eq!(trade.instrument, "EURUSD");
        assert_eq!(trade.stop_loss, Some(2.0));
    }

    #[test]
    fn test_missing_id_or_bad_direction_is_an_error() {
        assert!(map_record_to_trade(&record(json!({"direction": "long"}))).is_err());
        assert!(map_record_to_trade(&record(json!({"id": "1", "direction": "sideways"}))).is_err());
        assert!(map_record_to_trade(&record(json!({"id": "1"}))).is_err());
    }

    #[test]
    fn test_placeholder_without_direction() {
        let raw = record(json!({"id": "p1", "strategyId": "new-idea", "isPlaceholder": true}));
        let trade = map_record_to_trade(&raw).unwrap();
        assert!(trade.is_placeholder);
        assert_eq!(trade.strategy_id, "new-idea");
    }

    #[test]
    fn test_parse_date_shapes() {
        let expected: DateTime<Utc> = "2024-03-05T09:15:00Z".parse().unwrap();
        assert_eq!(parse_date(&json!("2024-03-05T09:15:00Z")), Some(expected));
        assert_eq!(parse_date(&json!("2024-03-05T10:15:00+01:00")), Some(expected));
        assert_eq!(parse_date(&json!("2024-03-05T09:15")), Some(expected));
        assert_eq!(parse_date(&json!("2024-03-05 09:15:00")), Some(expected));
        assert_eq!(parse_date(&json!(expected.timestamp_millis())), Some(expected));
        assert_eq!(
            parse_date(&json!("2024-03-05")),
            Some("2024-03-05T00:00:00Z".parse().unwrap())
        );
        assert_eq!(parse_date(&json!("not a date")), None);
        assert_eq!(parse_date(&json!("")), None);
    }

    #[test]
    fn test_tags_from_comma_string() {
        let raw = record(json!({"id": "1", "direction": "long", "tags": "backtest, scalp,,"}));
        let trade = map_record_to_trade(&raw).unwrap();
        assert!(trade.is_backtest());
        assert_eq!(trade.tags.len(), 2);
    }
}
