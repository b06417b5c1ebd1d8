use thiserror::Error;

/// Errors that can occur while loading, computing or rendering an invoice.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// One or more validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// A record field was missing or could not be parsed.
    #[error("field '{field}': {message}")]
    Field { field: String, message: String },

    /// Invoice number formatting error.
    #[error("numbering error: {0}")]
    Numbering(String),

    /// PDF assembly error.
    #[error("render error: {0}")]
    Render(String),

    /// Reading the record source failed.
    #[error("import error: {0}")]
    Import(String),

    /// Configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InvoiceError {
    /// Shorthand for a [`InvoiceError::Field`] error.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Field {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// One failed check against a billing record.
///
/// `rule` names the check that failed. The ids group by concern:
///
/// | id             | checks                                                |
/// |----------------|-------------------------------------------------------|
/// | `REQ-NUMBER`   | the invoice number is present                         |
/// | `REQ-PARTY`    | both parties have a name and GSTIN, the seller an address |
/// | `REQ-ITEM`     | the primary line item has a description               |
/// | `AMT-ITEM`     | primary item amounts are not negative                 |
/// | `AMT-EXTRA`    | the extra charge has a description and no negatives   |
/// | `AMT-DISCOUNT` | the discount is not negative and not above the base   |
/// | `AMT-RANGE`    | an amount stays below the supported maximum           |
/// | `AMT-TOTAL`    | a stated grand total is in range and matches the sum  |
/// | `TAX-RATE`     | each tax rate lies in 0..=100 percent                 |
/// | `GSTIN-FORMAT` | a GSTIN has the 15-character GST shape (warning only) |
/// | `TAX-MIX`      | IGST is not combined with CGST or SGST (warning only) |
///
/// Warnings come from [`lint_record`](super::lint_record) and never stop a
/// record from rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Record path of the offending value, e.g. `buyer.gstin` or `extra.quantity`.
    pub field: String,
    pub message: String,
    pub rule: &'static str,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.rule, self.field, self.message)
    }
}

impl ValidationError {
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: &'static str,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_names_the_field() {
        let err = InvoiceError::field("Seller Name", "is required");
        assert_eq!(err.to_string(), "field 'Seller Name': is required");
    }

    #[test]
    fn validation_error_display_leads_with_rule() {
        let err = ValidationError::with_rule("seller.gstin", "must not be empty", "REQ-PARTY");
        assert_eq!(err.to_string(), "[REQ-PARTY] seller.gstin: must not be empty");
    }
}
