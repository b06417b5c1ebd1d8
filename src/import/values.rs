//! Cell value parsing.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::core::InvoiceError;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%d-%b-%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a date in any of the accepted spreadsheet formats.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, InvoiceError> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .ok_or_else(|| InvoiceError::field(field, format!("unrecognized date '{value}'")))
}

/// Parse a decimal amount. Thousands separators, a currency marker and a
/// trailing percent sign are tolerated.
pub fn parse_decimal(field: &str, value: &str) -> Result<Decimal, InvoiceError> {
    let cleaned: String = value
        .trim()
        .trim_start_matches('₹')
        .trim_start_matches("Rs.")
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| InvoiceError::field(field, format!("not a number: '{}'", value.trim())))
}

/// Invoice numbers exported from spreadsheets often arrive as floats
/// ("42.0"). Strip the zero fraction from purely numeric values.
pub fn normalize_invoice_number(value: &str) -> String {
    let value = value.trim();
    match value.split_once('.') {
        Some((int, frac))
            if !int.is_empty()
                && int.chars().all(|c| c.is_ascii_digit())
                && !frac.is_empty()
                && frac.chars().all(|c| c == '0') =>
        {
            int.to_string()
        }
        _ => value.to_string(),
    }
}
