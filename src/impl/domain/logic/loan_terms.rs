use fractic_server_error::ServerError;

use crate::{
    entities::{LoanQuote, LoanTerms},
    errors::{InvalidInterestRate, InvalidPrincipal, InvalidScheduleDays},
};

impl LoanTerms {
    /// Computes profit and total owing for the given principal and one-time
    /// interest rate (percent).
    pub fn compute(principal: f64, interest_rate: f64) -> Result<Self, ServerError> {
        if !principal.is_finite() || principal <= 0.0 {
            return Err(InvalidPrincipal::new(principal));
        }
        if !interest_rate.is_finite() || interest_rate < 0.0 {
            return Err(InvalidInterestRate::new(interest_rate));
        }
        let profit = principal * interest_rate / 100.0;
        Ok(Self {
            principal,
            interest_rate,
            profit,
            total_owing: principal + profit,
        })
    }
}

impl LoanQuote {
    pub fn compute(principal: f64, interest_rate: f64, term_days: u32) -> Result<Self, ServerError> {
        if term_days == 0 {
            return Err(InvalidScheduleDays::new("term must be at least one day"));
        }
        let terms = LoanTerms::compute(principal, interest_rate)?;
        Ok(Self {
            terms,
            term_days,
            daily_cost: terms.total_owing / term_days as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_owing_is_principal_plus_one_time_interest() {
        for (principal, rate) in [(1000.0, 20.0), (250.5, 0.0), (0.01, 7.5), (99_999.0, 150.0)] {
            let terms = LoanTerms::compute(principal, rate).unwrap();
            let expected_profit = principal * rate / 100.0;
            assert!((terms.profit - expected_profit).abs() < 1e-6);
            assert!((terms.total_owing - (principal + expected_profit)).abs() < 1e-6);
        }
    }

    #[test]
    fn rejects_non_positive_principal_and_negative_rate() {
        assert!(LoanTerms::compute(0.0, 20.0).is_err());
        assert!(LoanTerms::compute(-10.0, 20.0).is_err());
        assert!(LoanTerms::compute(f64::NAN, 20.0).is_err());
        assert!(LoanTerms::compute(100.0, -1.0).is_err());
        assert!(LoanTerms::compute(100.0, f64::INFINITY).is_err());
    }

    #[test]
    fn quote_spreads_total_over_term() {
        let quote = LoanQuote::compute(1000.0, 20.0, 30).unwrap();
        assert_eq!(quote.terms.total_owing, 1200.0);
        assert_eq!(quote.terms.profit, 200.0);
        assert!((quote.daily_cost - 40.0).abs() < 1e-9);
        assert!(LoanQuote::compute(1000.0, 20.0, 0).is_err());
    }
}
