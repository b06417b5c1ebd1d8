use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the billing source; the input to exactly one invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingRecord {
    /// Raw invoice number as it appears in the source (e.g. "42").
    pub number: String,
    /// Invoice issue date.
    pub issue_date: NaiveDate,
    /// Issuing party.
    pub seller: Party,
    /// Billed party.
    pub buyer: Party,
    /// The primary billable item.
    pub item: LineItem,
    /// Secondary billable item added to the base amount.
    pub extra: Option<ExtraItem>,
    /// Flat reduction applied after the extra and before tax.
    pub discount: Option<Decimal>,
    /// Tax rate percentages per category.
    pub taxes: TaxRates,
    /// Grand total as supplied by the source, if any. Only used as a
    /// cross-check against the computed total.
    pub stated_grand_total: Option<Decimal>,
}

/// Seller or buyer identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    /// Free-text postal address, wrapped at render time.
    pub address: Option<String>,
    /// GST identification number.
    pub gstin: String,
}

/// The primary line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// Line amount before extras, discount and tax. Normally
    /// `quantity * unit_price`, but taken verbatim from the source.
    pub base_amount: Decimal,
}

/// Optional secondary item (e.g. extra seats, parking).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraItem {
    pub label: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

impl ExtraItem {
    /// Label used when the source leaves it blank.
    pub const DEFAULT_LABEL: &'static str = "Extra";

    /// `quantity * unit_price`, unrounded.
    pub fn amount(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// GST tax categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaxCategory {
    /// Central GST (intra-state, paired with SGST).
    Cgst,
    /// State GST (intra-state, paired with CGST).
    Sgst,
    /// Integrated GST (inter-state, single rate).
    Igst,
}

impl TaxCategory {
    /// Order in which tax rows are computed and printed.
    pub const ALL: [TaxCategory; 3] = [TaxCategory::Cgst, TaxCategory::Sgst, TaxCategory::Igst];

    /// Row label and source column name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cgst => "CGST",
            Self::Sgst => "SGST",
            Self::Igst => "IGST",
        }
    }

    /// Parse from a label, case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "CGST" => Some(Self::Cgst),
            "SGST" => Some(Self::Sgst),
            "IGST" => Some(Self::Igst),
            _ => None,
        }
    }
}

/// Percentage rates per category. `None` means the source had no value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRates {
    pub cgst: Option<Decimal>,
    pub sgst: Option<Decimal>,
    pub igst: Option<Decimal>,
}

impl TaxRates {
    pub fn get(&self, category: TaxCategory) -> Option<Decimal> {
        match category {
            TaxCategory::Cgst => self.cgst,
            TaxCategory::Sgst => self.sgst,
            TaxCategory::Igst => self.igst,
        }
    }

    pub fn set(&mut self, category: TaxCategory, rate: Option<Decimal>) {
        match category {
            TaxCategory::Cgst => self.cgst = rate,
            TaxCategory::Sgst => self.sgst = rate,
            TaxCategory::Igst => self.igst = rate,
        }
    }

    /// Categories with a strictly positive rate, in print order.
    pub fn applied(&self) -> impl Iterator<Item = (TaxCategory, Decimal)> + '_ {
        TaxCategory::ALL.into_iter().filter_map(|category| {
            self.get(category)
                .filter(|rate| *rate > Decimal::ZERO)
                .map(|rate| (category, rate))
        })
    }
}
