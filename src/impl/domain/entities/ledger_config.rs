use fractic_server_error::ServerError;

use crate::{domain::logic::utils::minor_unit_factor, errors::InvalidConfig};

use super::{client::ClientId, loan_request::LoanRequest, schedule::ScheduleParams};

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    /// Percent applied when a request does not specify a rate.
    pub default_interest_rate: f64,
    pub default_term_days: u32,
    /// Installment amounts are rounded to this many decimals; the last
    /// installment absorbs the remainder.
    pub amount_decimal_places: u32,
    pub recent_loans_limit: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_interest_rate: 20.0,
            default_term_days: 30,
            amount_decimal_places: 2,
            recent_loans_limit: 5,
        }
    }
}

impl LedgerConfig {
    /// Single-payment request using the configured default rate and term.
    pub fn default_request(&self, client_id: ClientId, principal: f64) -> LoanRequest {
        LoanRequest::new(
            client_id,
            principal,
            self.default_interest_rate,
            ScheduleParams::single(self.default_term_days),
        )
    }

    /// Rejects values the ledger cannot work with.
    pub fn validate(&self) -> Result<(), ServerError> {
        minor_unit_factor(self.amount_decimal_places)?;
        if !self.default_interest_rate.is_finite() || self.default_interest_rate < 0.0 {
            return Err(InvalidConfig::new(
                "default_interest_rate must be zero or positive",
            ));
        }
        if self.default_term_days == 0 {
            return Err(InvalidConfig::new("default_term_days must be at least one"));
        }
        Ok(())
    }
}
