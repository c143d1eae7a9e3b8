use serde::{Deserialize, Serialize};

use crate::error::JournalError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub currency: String,
    pub initial_balance: f64,
    /// Sortino value reported when no trade has a negative return.
    pub sortino_ceiling: f64,
    /// Absolute profit band counted as break-even (0 = exact zero only).
    pub breakeven_threshold: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency: "USD".to_string(),
            initial_balance: 10000.0,
            sortino_ceiling: 10.0,
            breakeven_threshold: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsInput {
    pub currency: Option<String>,
    pub initial_balance: Option<f64>,
    pub sortino_ceiling: Option<f64>,
    pub breakeven_threshold: Option<f64>,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, JournalError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply the provided overrides, leaving unset fields untouched.
    pub fn apply(&self, input: UpdateSettingsInput) -> Result<Settings, JournalError> {
        let mut updated = self.clone();

        if let Some(val) = input.currency {
            updated.currency = val.trim().to_ascii_uppercase();
        }
        if let Some(val) = input.initial_balance {
            updated.initial_balance = val;
        }
        if let Some(val) = input.sortino_ceiling {
            updated.sortino_ceiling = val;
        }
        if let Some(val) = input.breakeven_threshold {
            updated.breakeven_threshold = val;
        }

        updated.validate()?;
        Ok(updated)
    }

    fn validate(&self) -> Result<(), JournalError> {
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(JournalError::invalid(
                "currency",
                format!("expected a 3-letter code, got {:?}", self.currency),
            ));
        }
        if !self.initial_balance.is_finite() || self.initial_balance < 0.0 {
            return Err(JournalError::invalid("initialBalance", "must be finite and non-negative"));
        }
        if !self.sortino_ceiling.is_finite() {
            return Err(JournalError::invalid("sortinoCeiling", "must be finite"));
        }
        if !self.breakeven_threshold.is_finite() || self.breakeven_threshold < 0.0 {
            return Err(JournalError::invalid(
                "breakevenThreshold",
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }
}
