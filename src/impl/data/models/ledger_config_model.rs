use crate::entities::LedgerConfig;

/// RON representation of the ledger configuration. Missing fields fall back
/// to the defaults.
#[derive(Debug, serde_derive::Deserialize)]
#[serde(default)]
pub(crate) struct LedgerConfigModel {
    default_interest_rate: f64,
    default_term_days: u32,
    amount_decimal_places: u32,
    recent_loans_limit: usize,
}

impl Default for LedgerConfigModel {
    fn default() -> Self {
        let LedgerConfig {
            default_interest_rate,
            default_term_days,
            amount_decimal_places,
            recent_loans_limit,
        } = LedgerConfig::default();
        Self {
            default_interest_rate,
            default_term_days,
            amount_decimal_places,
            recent_loans_limit,
        }
    }
}

impl Into<LedgerConfig> for LedgerConfigModel {
    fn into(self) -> LedgerConfig {
        LedgerConfig {
            default_interest_rate: self.default_interest_rate,
            default_term_days: self.default_term_days,
            amount_decimal_places: self.amount_decimal_places,
            recent_loans_limit: self.recent_loans_limit,
        }
    }
}
