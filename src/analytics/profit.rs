use crate::models::{Settings, Trade};

/// Monetary profit of a single trade.
///
/// An explicit finite `profit` wins; otherwise `risk_amount * r_multiple` when
/// both are finite; otherwise 0. Never returns a non-finite value.
pub fn trade_profit(trade: &Trade) -> f64 {
    if let Some(profit) = trade.profit.filter(|p| p.is_finite()) {
        return profit;
    }

    if let Some(risk) = trade.risk_amount.filter(|r| r.is_finite()) {
        if trade.r_multiple.is_finite() {
            let derived = risk * trade.r_multiple;
            if derived.is_finite() {
                return derived;
            }
        }
    }

    0.0
}

/// Profit as a percentage of `initial_balance`, or 0 when that is not positive.
pub fn trade_profit_percentage(trade: &Trade, initial_balance: f64) -> f64 {
    if initial_balance.is_nan() || initial_balance <= 0.0 {
        return 0.0;
    }
    let pct = trade_profit(trade) / initial_balance * 100.0;
    if pct.is_finite() { pct } else { 0.0 }
}

/// [`trade_profit_percentage`] against the configured starting balance.
pub fn trade_profit_percentage_with(trade: &Trade, settings: &Settings) -> f64 {
    trade_profit_percentage(trade, settings.initial_balance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;

    fn trade(profit: Option<f64>, risk_amount: Option<f64>, r_multiple: f64) -> Trade {
        Trade {
            profit,
            risk_amount,
            r_multiple,
            ..Trade::new("t", "ES", Direction::Long)
        }
    }

    #[test]
    fn test_explicit_profit_wins() {
        assert_eq!(trade_profit(&trade(Some(42.0), Some(100.0), 3.0)), 42.0);
        assert_eq!(trade_profit(&trade(Some(-7.5), None, 0.0)), -7.5);
    }

    #[test]
    fn test_falls_back_to_risk_times_r() {
        assert_eq!(trade_profit(&trade(None, Some(50.0), 2.0)), 100.0);
        assert_eq!(trade_profit(&trade(None, Some(100.0), -0.5)), -50.0);
    }

    #[test]
    fn test_insufficient_data_is_zero() {
        assert_eq!(trade_profit(&trade(None, None, 2.0)), 0.0);
    }

    #[test]
    fn test_non_finite_values_fall_through() {
        assert_eq!(trade_profit(&trade(Some(f64::INFINITY), Some(50.0), 2.0)), 100.0);
        assert_eq!(trade_profit(&trade(Some(f64::NAN), None, 2.0)), 0.0);
        assert_eq!(trade_profit(&trade(None, Some(50.0), f64::NAN)), 0.0);
        assert_eq!(trade_profit(&trade(None, Some(f64::NEG_INFINITY), 1.0)), 0.0);
        // Finite operands whose product overflows
        assert_eq!(trade_profit(&trade(None, Some(f64::MAX), 2.0)), 0.0);
    }

    #[test]
    fn test_profit_percentage() {
        let t = trade(Some(250.0), None, 0.0);
        assert!((trade_profit_percentage(&t, 10000.0) - 2.5).abs() < 1e-12);
        assert_eq!(trade_profit_percentage(&t, 0.0), 0.0);
        assert_eq!(trade_profit_percentage(&t, -100.0), 0.0);
        assert_eq!(trade_profit_percentage(&t, f64::NAN), 0.0);
        assert_eq!(trade_profit_percentage(&t, f64::MIN_POSITIVE / 1e10), 0.0);
    }

    #[test]
    fn test_profit_percentage_uses_settings_balance() {
        let t = trade(Some(250.0), None, 0.0);
        assert!((trade_profit_percentage_with(&t, &Settings::default()) - 2.5).abs() < 1e-12);

        let custom = Settings {
            initial_balance: 50000.0,
            ..Settings::default()
        };
        assert!((trade_profit_percentage_with(&t, &custom) - 0.5).abs() < 1e-12);

        let unfunded = Settings {
            initial_balance: 0.0,
            ..Settings::default()
        };
        assert_eq!(trade_profit_percentage_with(&t, &unfunded), 0.0);
    }
}
