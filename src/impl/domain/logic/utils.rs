use chrono::{Days, NaiveDate};
use fractic_server_error::{CriticalError, ServerError};

use crate::errors::InvalidDecimalPlaces;

/// Largest supported number of decimal places for amounts.
pub(crate) const MAX_DECIMAL_PLACES: u32 = 10;

/// Returns the date `days` days after `date`.
pub(crate) fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate, ServerError> {
    date.checked_add_days(Days::new(days)).ok_or_else(|| {
        CriticalError::with_debug(
            "due date calculation overflowed the supported calendar range",
            &format!("date: {}, days: {}", date, days),
        )
    })
}

/// Number of minor units in one unit of currency, e.g. 100 for two decimal
/// places.
pub(crate) fn minor_unit_factor(decimal_places: u32) -> Result<f64, ServerError> {
    if decimal_places > MAX_DECIMAL_PLACES {
        return Err(InvalidDecimalPlaces::new(decimal_places, MAX_DECIMAL_PLACES));
    }
    let exponent = i32::try_from(decimal_places)
        .map_err(|e| InvalidDecimalPlaces::with_debug(decimal_places, MAX_DECIMAL_PLACES, &e))?;
    Ok(10_f64.powi(exponent))
}
