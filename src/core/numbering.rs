use chrono::{Datelike, NaiveDate};

use super::error::InvoiceError;

/// Formats the printed invoice number.
///
/// Produces `{prefix}/{financial_year}/{number}`, e.g. "URBN/AI/25-26/42".
/// The financial year runs April to March and is derived from the issue date
/// unless a fixed label is set. An empty prefix prints the bare number.
#[derive(Debug, Clone)]
pub struct InvoiceNumberFormat {
    prefix: String,
    fixed_year: Option<String>,
}

impl InvoiceNumberFormat {
    /// Create a format with the given prefix (trailing `/` is optional).
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            prefix: prefix.trim().trim_end_matches('/').to_string(),
            fixed_year: None,
        }
    }

    /// Print this label instead of the derived financial year.
    pub fn with_fixed_year(mut self, label: impl Into<String>) -> Self {
        self.fixed_year = Some(label.into());
        self
    }

    /// Format the display number for a raw number and issue date.
    pub fn format(&self, number: &str, issue_date: NaiveDate) -> Result<String, InvoiceError> {
        let number = number.trim();
        if number.is_empty() {
            return Err(InvoiceError::Numbering(
                "invoice number must not be empty".into(),
            ));
        }
        if self.prefix.is_empty() {
            return Ok(number.to_string());
        }
        let year = match &self.fixed_year {
            Some(label) => label.clone(),
            None => financial_year_label(issue_date),
        };
        Ok(format!("{}/{}/{}", self.prefix, year, number))
    }
}

impl Default for InvoiceNumberFormat {
    fn default() -> Self {
        Self::new("")
    }
}

/// Start year of the April to March financial year containing `date`.
pub fn financial_year_start(date: NaiveDate) -> i32 {
    if date.month() >= 4 {
        date.year()
    } else {
        date.year() - 1
    }
}

/// Two-digit label of the financial year containing `date`, e.g. "25-26".
pub fn financial_year_label(date: NaiveDate) -> String {
    let start = financial_year_start(date);
    format!(
        "{:02}-{:02}",
        start.rem_euclid(100),
        (start + 1).rem_euclid(100)
    )
}
