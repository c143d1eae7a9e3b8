use crate::models::filters::active;
use crate::models::{FilterCriteria, StrategyType, Trade, TAG_ACCOUNT, TAG_BACKTEST};

/// Keep the trades that satisfy every set criterion, in input order.
pub fn apply_filters(trades: &[Trade], criteria: &FilterCriteria) -> Vec<Trade> {
    if criteria.is_empty() {
        return trades.to_vec();
    }

    let filtered: Vec<Trade> = trades.iter().filter(|t| criteria.matches(t)).cloned().collect();
    log::trace!("Filters kept {} of {} trades", filtered.len(), trades.len());
    filtered
}

impl FilterCriteria {
    pub fn matches(&self, trade: &Trade) -> bool {
        if let Some(direction) = active(&self.direction) {
            if !trade.direction.as_str().eq_ignore_ascii_case(direction) {
                return false;
            }
        }

        if !matches_exact(&self.session, trade.session.as_deref())
            || !matches_exact(&self.entry_type, trade.entry_type.as_deref())
            || !matches_exact(&self.timeframe, trade.timeframe.as_deref())
            || !matches_exact(&self.instrument, Some(trade.instrument.as_str()))
            || !matches_exact(&self.strategy, Some(trade.strategy_id.as_str()))
        {
            return false;
        }

        match self.strategy_type {
            Some(StrategyType::Backtest) if !trade.has_tag(TAG_BACKTEST) => return false,
            Some(StrategyType::Live)
                if trade.has_tag(TAG_BACKTEST) && !trade.has_tag(TAG_ACCOUNT) =>
            {
                return false;
            }
            _ => {}
        }

        if let Some(range) = self.date_range.filter(|r| !r.is_unbounded()) {
            // Undated trades cannot fall inside a bounded window
            match trade.entry_date {
                Some(date) if range.contains(date) => {}
                _ => return false,
            }
        }

        true
    }
}

fn matches_exact(criterion: &Option<String>, value: Option<&str>) -> bool {
    match active(criterion) {
        None => true,
        Some(expected) => value == Some(expected),
    }
}
