use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyType {
    Live,
    Backtest,
}

/// Inclusive date window; an unset bound is open on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        DateRange { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// Declarative trade filters. Every field is optional and an unset field
/// imposes no constraint; `""` and `"all"` count as unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default)]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub timeframe: Option<String>,
    #[serde(default)]
    pub instrument: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub strategy_type: Option<StrategyType>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

impl FilterCriteria {
    /// Field-wise overlay: fields set on `other` replace those on `self`.
    pub fn merge(&self, other: &FilterCriteria) -> FilterCriteria {
        FilterCriteria {
            direction: other.direction.clone().or_else(|| self.direction.clone()),
            session: other.session.clone().or_else(|| self.session.clone()),
            entry_type: other.entry_type.clone().or_else(|| self.entry_type.clone()),
            timeframe: other.timeframe.clone().or_else(|| self.timeframe.clone()),
            instrument: other.instrument.clone().or_else(|| self.instrument.clone()),
            strategy: other.strategy.clone().or_else(|| self.strategy.clone()),
            strategy_type: other.strategy_type.or(self.strategy_type),
            date_range: other.date_range.or(self.date_range),
        }
    }

    pub fn is_empty(&self) -> bool {
        active(&self.direction).is_none()
            && active(&self.session).is_none()
            && active(&self.entry_type).is_none()
            && active(&self.timeframe).is_none()
            && active(&self.instrument).is_none()
            && active(&self.strategy).is_none()
            && self.strategy_type.is_none()
            && self.date_range.is_none_or(|r| r.is_unbounded())
    }
}

/// The value of a string criterion, or `None` when it imposes no constraint.
pub(crate) fn active(value: &Option<String>) -> Option<&str> {
    match value.as_deref() {
        None | Some("") => None,
        Some(v) if v.eq_ignore_ascii_case("all") => None,
        Some(v) => Some(v),
    }
}
