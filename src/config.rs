//! Run configuration, loaded from TOML.
//!
//! Every key is optional; a missing file section falls back to
//! [`InvoiceConfig::default`].
//!
//! ```toml
//! output_dir = "Invoices"
//! logo_path = "logo.jpg"
//! invoice_prefix = "URBN/AI"
//! payment_method = "UPI / Bank Transfer"
//! bank_details = """
//! Online Transfer Details:
//! Account Number: 000000000000
//! """
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{InvoiceError, InvoiceNumberFormat};

const DEFAULT_BANK_DETAILS: &str = "
Cheque to be drawn in favour of the seller

Online Transfer Details:
Account Name: -
Account Number: -
IFSC Code: -
Bank: -
Branch: -
";

/// Settings shared by every invoice of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InvoiceConfig {
    /// Directory receiving the PDFs. Created if absent.
    pub output_dir: PathBuf,
    /// Logo image (JPEG or PNG). Missing or unreadable logos are skipped.
    pub logo_path: Option<PathBuf>,
    /// Prefix of the printed invoice number, e.g. "URBN/AI".
    pub invoice_prefix: String,
    /// Fixed financial-year label ("25-26") instead of deriving it.
    pub financial_year: Option<String>,
    /// Document title.
    pub title: String,
    /// Text after "Payment Method:".
    pub payment_method: String,
    /// Bank details block, printed line by line.
    pub bank_details: String,
    /// Footer line.
    pub footer: String,
    /// Maximum address line length, in characters.
    pub address_width: usize,
    /// Print the buyer address under the buyer name.
    pub wrap_buyer_address: bool,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("Invoices"),
            logo_path: None,
            invoice_prefix: String::new(),
            financial_year: None,
            title: "INVOICE".into(),
            payment_method: "UPI / Bank Transfer".into(),
            bank_details: DEFAULT_BANK_DETAILS.into(),
            footer: "Thank you for believing in us!".into(),
            address_width: 50,
            wrap_buyer_address: true,
        }
    }
}

impl InvoiceConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, InvoiceError> {
        let config: Self =
            toml::from_str(text).map_err(|e| InvoiceError::Config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InvoiceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            InvoiceError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Invoice number format derived from the prefix and year settings.
    pub fn number_format(&self) -> InvoiceNumberFormat {
        let format = InvoiceNumberFormat::new(self.invoice_prefix.as_str());
        match &self.financial_year {
            Some(label) => format.with_fixed_year(label.as_str()),
            None => format,
        }
    }

    /// Bank details block trimmed as a whole and per line. Interior blank
    /// lines are kept.
    pub fn bank_lines(&self) -> Vec<&str> {
        self.bank_details.trim().lines().map(str::trim).collect()
    }

    fn check(&self) -> Result<(), InvoiceError> {
        if self.address_width == 0 {
            return Err(InvoiceError::Config(
                "address_width must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
