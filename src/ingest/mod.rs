pub mod mapper;
pub mod snapshot;
pub mod types;

pub use mapper::*;
pub use snapshot::*;
pub use types::*;

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::error::JournalError;
use crate::models::Trade;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    pub trades: Vec<Trade>,
    pub duplicates: usize,
    pub errors: Vec<String>,
}

/// Parse a JSON array of stored trade records into canonical trades.
///
/// Records that cannot be mapped are skipped and reported; repeated ids keep
/// the first occurrence. Only a document that is not a JSON array fails.
pub fn ingest_trades(json: &str) -> Result<IngestReport, JournalError> {
    let records: Vec<Value> = serde_json::from_str(json)?;
    let mut report = IngestReport::default();
    let mut seen = HashSet::new();

    for (index, value) in records.into_iter().enumerate() {
        let mapped = serde_json::from_value::<RawTradeRecord>(value)
            .map_err(JournalError::from)
            .and_then(|record| map_record_to_trade(&record));

        match mapped {
            Ok(trade) => {
                if !seen.insert(trade.id.clone()) {
                    report.duplicates += 1;
                    continue;
                }
                report.trades.push(trade);
            }
            Err(e) => {
                log::warn!("Skipping trade record {}: {}", index, e);
                report.errors.push(format!("Record {}: {}", index, e));
            }
        }
    }

    log::info!(
        "Ingested {} trades ({} duplicates, {} errors)",
        report.trades.len(),
        report.duplicates,
        report.errors.len()
    );

    Ok(report)
}

/// Drop placeholder trades so they cannot reach any aggregate.
pub fn without_placeholders(trades: &[Trade]) -> Vec<Trade> {
    trades.iter().filter(|t| !t.is_placeholder).cloned().collect()
}
