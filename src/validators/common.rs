//! Common validation utilities and helpers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use validator::ValidationErrors;

use crate::errors::ApiError;
use crate::mcom::ErrorCode;
use crate::utils::decimal::{decimal_from_f64, parse_decimal};

/// Convert validator errors to ApiError::Validation.
///
/// # Example
/// ```ignore
/// body.validate().map_err(validation_errors_to_api_error)?;
/// ```
pub fn validation_errors_to_api_error(e: ValidationErrors) -> ApiError {
    let mut errors: Vec<String> = e
        .field_errors()
        .iter()
        .flat_map(|(_, errs)| {
            errs.iter()
                .map(|e| e.message.clone().unwrap_or_default().to_string())
        })
        .collect();
    errors.sort();
    ApiError::Validation(errors)
}

/// Parses a decimal request field; INVALID_NUMBER `invalid_number=<value>` otherwise.
pub fn require_decimal(value: &str) -> Result<Decimal, ApiError> {
    parse_decimal(value)
        .ok_or_else(|| ApiError::mcom(ErrorCode::InvalidNumber, format!("invalid_number={}", value)))
}

/// Parses every value; INVALID_NUMBER `invalid_numbers=[..]` listing all of them
/// when any fails.
pub fn require_decimals(values: &[String]) -> Result<Vec<Decimal>, ApiError> {
    values
        .iter()
        .map(|v| parse_decimal(v))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| {
            ApiError::mcom(
                ErrorCode::InvalidNumber,
                format!("invalid_numbers=[{}]", values.join(" ")),
            )
        })
}

/// Converts a JSON float quantity.
pub fn require_float_decimal(value: f64) -> Result<Decimal, ApiError> {
    decimal_from_f64(value)
        .ok_or_else(|| ApiError::mcom(ErrorCode::InvalidNumber, format!("invalid_number={}", value)))
}

/// Parses a `YYYY-MM-DD` path segment; BAD_REQUEST `invalid date=<value>` otherwise.
pub fn require_date(value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiError::mcom(ErrorCode::BadRequest, format!("invalid date={}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_decimal() {
        assert_eq!(require_decimal("3.5").unwrap(), Decimal::new(35, 1));
        match require_decimal("x1") {
            Err(ApiError::Mcom(e)) => {
                assert_eq!(e.code, ErrorCode::InvalidNumber);
                assert_eq!(e.details, "invalid_number=x1");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_require_decimals_lists_all_values() {
        let values = vec!["1".to_string(), "bad".to_string()];
        match require_decimals(&values) {
            Err(ApiError::Mcom(e)) => assert_eq!(e.details, "invalid_numbers=[1 bad]"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(require_decimals(&["2".to_string()]).unwrap(), vec![Decimal::new(2, 0)]);
    }

    #[test]
    fn test_require_date() {
        assert_eq!(require_date("2024-02-29").unwrap(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(matches!(require_date("2024/02/29"), Err(ApiError::Mcom(e)) if e.code == ErrorCode::BadRequest));
    }
}
