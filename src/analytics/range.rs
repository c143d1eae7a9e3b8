use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::JournalError;
use crate::models::DateRange;

/// Dashboard date-range shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateRangePreset {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "year")]
    Year,
    #[serde(rename = "all")]
    All,
}

impl DateRangePreset {
    /// Window ending now (open-ended) relative to `now`.
    pub fn to_range(self, now: DateTime<Utc>) -> DateRange {
        let start = match self {
            DateRangePreset::Today => now
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .map(|midnight| midnight.and_utc()),
            DateRangePreset::Week => Some(now - Duration::days(7)),
            DateRangePreset::Month => Some(now - Duration::days(30)),
            DateRangePreset::ThreeMonths => Some(now - Duration::days(90)),
            DateRangePreset::SixMonths => Some(now - Duration::days(180)),
            DateRangePreset::Year => Some(now - Duration::days(365)),
            DateRangePreset::All => None,
        };
        DateRange::new(start, None)
    }
}

impl FromStr for DateRangePreset {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(DateRangePreset::Today),
            "week" => Ok(DateRangePreset::Week),
            "month" => Ok(DateRangePreset::Month),
            "3months" => Ok(DateRangePreset::ThreeMonths),
            "6months" => Ok(DateRangePreset::SixMonths),
            "year" => Ok(DateRangePreset::Year),
            "all" => Ok(DateRangePreset::All),
            other => Err(JournalError::invalid("dateRange", format!("unknown preset {:?}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_relative_to_now() {
        let now: DateTime<Utc> = "2024-06-15T13:45:00Z".parse().unwrap();

        let week = DateRangePreset::Week.to_range(now);
        assert_eq!(week.start, Some(now - Duration::days(7)));
        assert_eq!(week.end, None);

        let today = DateRangePreset::Today.to_range(now);
        assert_eq!(today.start, Some("2024-06-15T00:00:00Z".parse().unwrap()));

        let year = DateRangePreset::Year.to_range(now);
        assert_eq!(year.start, Some("2023-06-16T13:45:00Z".parse().unwrap()));

        assert!(DateRangePreset::All.to_range(now).is_unbounded());
    }

    #[test]
    fn test_parse_presets() {
        assert_eq!("3months".parse::<DateRangePreset>().unwrap(), DateRangePreset::ThreeMonths);
        assert_eq!("6months".parse::<DateRangePreset>().unwrap(), DateRangePreset::SixMonths);
        assert!("fortnight".parse::<DateRangePreset>().is_err());

        let preset: DateRangePreset = serde_json::from_str("\"month\"").unwrap();
        assert_eq!(preset, DateRangePreset::Month);
    }
}
