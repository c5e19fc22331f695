//! Utility functions for the Option-Delta-Hedger library.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use optionstratlib::ExpirationDate;

/// Formats an `ExpirationDate` as a string in `YYYYMMDD` format.
///
/// # Arguments
///
/// * `expiration` - The expiration date to format
///
/// # Returns
///
/// A string in `YYYYMMDD` format (e.g., "20240119")
///
/// # Errors
///
/// Returns `Error::InvalidExpiration` if the date cannot be retrieved from the
/// `ExpirationDate`.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use option_delta_hedger::utils::format_expiration_yyyymmdd;
/// use optionstratlib::ExpirationDate;
///
/// let expiration = ExpirationDate::DateTime(Utc.with_ymd_and_hms(2024, 1, 19, 21, 0, 0).unwrap());
/// assert_eq!(format_expiration_yyyymmdd(&expiration).unwrap(), "20240119");
/// ```
pub fn format_expiration_yyyymmdd(expiration: &ExpirationDate) -> Result<String> {
    let date = expiration
        .get_date()
        .map_err(|e| Error::invalid_expiration(e.to_string()))?;
    Ok(date.format("%Y%m%d").to_string())
}

/// Returns true if `code` is a calendar-valid `YYYYMMDD` expiry date or a
/// `YYYYMM` contract month.
///
/// Broker option definitions use both forms for the last trade date field.
#[must_use]
pub fn is_valid_date_code(code: &str) -> bool {
    if !code.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match code.len() {
        8 => NaiveDate::parse_from_str(code, "%Y%m%d").is_ok(),
        6 => NaiveDate::parse_from_str(&format!("{code}01"), "%Y%m%d").is_ok(),
        _ => false,
    }
}
