//! Display formatting for cell values.
//!
//! The engine renders values with their type's default format: integral
//! numbers drop the decimal point, fractional numbers use their natural
//! decimal string, date serials become ISO calendar dates, booleans render
//! as TRUE/FALSE.

use crate::types::CellValue;

/// Day-serial offset between the 1899-12-30 spreadsheet epoch and 1970-01-01.
const UNIX_EPOCH_SERIAL: i64 = 25569;

/// Format a cell value for display. Empty cells yield `None`.
pub fn format_value(value: &CellValue) -> Option<String> {
    match value {
        CellValue::Empty => None,
        CellValue::Text(s) => Some(s.clone()),
        CellValue::Number(n) => Some(format_number(*n)),
        CellValue::Date(serial) => Some(format_date_serial(*serial)),
        CellValue::Boolean(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
    }
}

/// Format a number: integral values render without a decimal point,
/// everything else uses the natural decimal string.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.007_199_254_740_992e15 {
        // Exactly representable as an integer
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Format a day serial (1899-12-30 epoch) as an ISO `YYYY-MM-DD` date.
pub fn format_date_serial(serial: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let days = serial.floor() as i64 - UNIX_EPOCH_SERIAL;
    let (year, month, day) = civil_from_days(days);
    format!("{year:04}-{month:02}-{day:02}")
}

/// Convert days since 1970-01-01 to a (year, month, day) civil date.
///
/// Days-from-civil inversion over 400-year eras; valid across the whole
/// proleptic Gregorian calendar.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097; // [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365; // [0, 399]
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
    let m = if mp < 10 { mp + 3 } else { mp - 9 }; // [1, 12]
    (if m <= 2 { y + 1 } else { y }, m as u32, d as u32)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(42.0, "42"; "integral renders without decimals")]
    #[test_case(-7.0, "-7"; "negative integral")]
    #[test_case(0.0, "0"; "zero")]
    #[test_case(3.25, "3.25"; "fractional keeps natural decimals")]
    #[test_case(0.5, "0.5"; "sub one fraction")]
    fn number_formatting(value: f64, expected: &str) {
        assert_eq!(format_number(value), expected);
    }

    #[test]
    fn date_serial_epoch_reference() {
        // Serial 25569 is 1970-01-01 in the 1899-12-30 epoch.
        assert_eq!(format_date_serial(25569.0), "1970-01-01");
    }

    #[test_case(1.0, "1899-12-31")]
    #[test_case(60.0, "1900-02-28"; "before the leap quirk cutoff")]
    #[test_case(44927.0, "2023-01-01")]
    #[test_case(45292.0, "2024-01-01")]
    fn date_serials(serial: f64, expected: &str) {
        assert_eq!(format_date_serial(serial), expected);
    }

    #[test]
    fn time_fraction_is_ignored() {
        assert_eq!(format_date_serial(44927.75), "2023-01-01");
    }

    #[test]
    fn value_formatting() {
        assert_eq!(format_value(&CellValue::Empty), None);
        assert_eq!(
            format_value(&CellValue::Text("hi".into())),
            Some("hi".to_string())
        );
        assert_eq!(
            format_value(&CellValue::Number(12.0)),
            Some("12".to_string())
        );
        assert_eq!(
            format_value(&CellValue::Boolean(true)),
            Some("TRUE".to_string())
        );
        assert_eq!(
            format_value(&CellValue::Date(45292.0)),
            Some("2024-01-01".to_string())
        );
    }
}
