//! Conversions between decimals and their request/response forms.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parses plain (`"12.5"`) or scientific (`"1.25e1"`) notation.
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let value = value.trim();
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

/// Shortest decimal equal to a JSON float. Non-finite values have no decimal form.
pub fn decimal_from_f64(value: f64) -> Option<Decimal> {
    Decimal::try_from(value).ok().map(|d| d.normalize())
}

pub fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_string().parse().unwrap_or_default()
}

/// Empty when the value is absent.
pub fn optional_decimal_string(value: Option<Decimal>) -> String {
    value.map(|d| d.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("12.50"), Some(Decimal::new(1250, 2)));
        assert_eq!(parse_decimal("1.25e1"), Some(Decimal::new(125, 1)));
        assert_eq!(parse_decimal("twelve"), None);
        assert_eq!(parse_decimal(""), None);
    }

    #[test]
    fn test_float_conversion() {
        assert_eq!(decimal_from_f64(0.1), Some(Decimal::new(1, 1)));
        assert_eq!(decimal_from_f64(20.0).map(|d| d.to_string()), Some("20".to_string()));
        assert_eq!(decimal_from_f64(f64::NAN), None);
        assert_eq!(decimal_to_f64(Decimal::new(125, 1)), 12.5);
    }

    #[test]
    fn test_optional_string() {
        assert_eq!(optional_decimal_string(None), "");
        assert_eq!(optional_decimal_string(Some(Decimal::new(3, 0))), "3");
    }
}
