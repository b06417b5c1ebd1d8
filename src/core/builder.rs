use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::InvoiceError;
use super::types::*;
use super::validation;

/// Builder for billing records.
///
/// ```
/// use gst_invoice::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let record = BillingRecordBuilder::new("42", NaiveDate::from_ymd_opt(2025, 5, 1).unwrap())
///     .seller(PartyBuilder::new("Urban Leaf Space LLP", "27AAAAA0000A1Z5")
///         .address("Pancard Club Road, Baner, Pune")
///         .build())
///     .buyer(PartyBuilder::new("Kodesk Labs", "27BBBBB1111B1Z6").build())
///     .item(LineItemBuilder::new("Dedicated Desk", dec!(4), dec!(250)).build())
///     .tax(TaxCategory::Cgst, dec!(9))
///     .tax(TaxCategory::Sgst, dec!(9))
///     .build()
///     .unwrap();
///
/// assert_eq!(compute(&record).totals.grand_total, dec!(1180));
/// ```
pub struct BillingRecordBuilder {
    number: String,
    issue_date: NaiveDate,
    seller: Option<Party>,
    buyer: Option<Party>,
    item: Option<LineItem>,
    extra: Option<ExtraItem>,
    discount: Option<Decimal>,
    taxes: TaxRates,
    stated_grand_total: Option<Decimal>,
}

impl BillingRecordBuilder {
    pub fn new(number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            issue_date,
            seller: None,
            buyer: None,
            item: None,
            extra: None,
            discount: None,
            taxes: TaxRates::default(),
            stated_grand_total: None,
        }
    }

    pub fn seller(mut self, party: Party) -> Self {
        self.seller = Some(party);
        self
    }

    pub fn buyer(mut self, party: Party) -> Self {
        self.buyer = Some(party);
        self
    }

    pub fn item(mut self, item: LineItem) -> Self {
        self.item = Some(item);
        self
    }

    pub fn extra(mut self, label: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        self.extra = Some(ExtraItem {
            label: label.into(),
            quantity,
            unit_price,
        });
        self
    }

    pub fn discount(mut self, amount: Decimal) -> Self {
        self.discount = Some(amount);
        self
    }

    pub fn tax(mut self, category: TaxCategory, rate: Decimal) -> Self {
        self.taxes.set(category, Some(rate));
        self
    }

    pub fn stated_grand_total(mut self, amount: Decimal) -> Self {
        self.stated_grand_total = Some(amount);
        self
    }

    /// Build the record and run validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<BillingRecord, InvoiceError> {
        let record = self.build_unchecked()?;

        let errors = validation::validate_record(&record);
        if !errors.is_empty() {
            let msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(InvoiceError::Validation(msg));
        }

        Ok(record)
    }

    /// Build without validation. Only missing parts are rejected.
    pub fn build_unchecked(self) -> Result<BillingRecord, InvoiceError> {
        let seller = self
            .seller
            .ok_or_else(|| InvoiceError::Builder("seller is required".into()))?;
        let buyer = self
            .buyer
            .ok_or_else(|| InvoiceError::Builder("buyer is required".into()))?;
        let item = self
            .item
            .ok_or_else(|| InvoiceError::Builder("primary line item is required".into()))?;

        if self.number.len() > 200 {
            return Err(InvoiceError::Builder(
                "invoice number cannot exceed 200 characters".into(),
            ));
        }

        Ok(BillingRecord {
            number: self.number,
            issue_date: self.issue_date,
            seller,
            buyer,
            item,
            extra: self.extra,
            discount: self.discount,
            taxes: self.taxes,
            stated_grand_total: self.stated_grand_total,
        })
    }
}

/// Builder for Party (seller/buyer).
pub struct PartyBuilder {
    name: String,
    address: Option<String>,
    gstin: String,
}

impl PartyBuilder {
    pub fn new(name: impl Into<String>, gstin: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            gstin: gstin.into(),
        }
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn build(self) -> Party {
        Party {
            name: self.name,
            address: self.address,
            gstin: self.gstin,
        }
    }
}

/// Builder for the primary LineItem.
pub struct LineItemBuilder {
    name: String,
    quantity: Decimal,
    unit_price: Decimal,
    base_amount: Option<Decimal>,
}

impl LineItemBuilder {
    /// The base amount defaults to `quantity * unit_price`.
    pub fn new(name: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
            base_amount: None,
        }
    }

    /// Use a base amount other than `quantity * unit_price`.
    pub fn base_amount(mut self, amount: Decimal) -> Self {
        self.base_amount = Some(amount);
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            base_amount: self
                .base_amount
                .unwrap_or(self.quantity * self.unit_price),
            name: self.name,
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
    }

    fn seller() -> Party {
        PartyBuilder::new("Urban Leaf Space LLP", "27AAAAA0000A1Z5")
            .address("Baner, Pune")
            .build()
    }

    fn buyer() -> Party {
        PartyBuilder::new("Kodesk Labs", "27BBBBB1111B1Z6").build()
    }

    #[test]
    fn base_amount_defaults_to_qty_times_price() {
        let item = LineItemBuilder::new("Desk", dec!(3), dec!(250.50)).build();
        assert_eq!(item.base_amount, dec!(751.50));
        let item = LineItemBuilder::new("Desk", dec!(3), dec!(250.50))
            .base_amount(dec!(700))
            .build();
        assert_eq!(item.base_amount, dec!(700));
    }

    #[test]
    fn missing_seller_is_builder_error() {
        let err = BillingRecordBuilder::new("1", date())
            .buyer(buyer())
            .item(LineItemBuilder::new("Desk", dec!(1), dec!(1)).build())
            .build()
            .unwrap_err();
        assert!(matches!(err, InvoiceError::Builder(_)));
        assert!(err.to_string().contains("seller"));
    }

    #[test]
    fn validation_errors_are_joined() {
        let err = BillingRecordBuilder::new("", date())
            .seller(PartyBuilder::new("", "").address("x").build())
            .buyer(buyer())
            .item(LineItemBuilder::new("Desk", dec!(1), dec!(1)).build())
            .build()
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("number"));
        assert!(msg.contains("seller.name"));
        assert!(msg.contains("seller.gstin"));
    }

    #[test]
    fn taxes_and_extras_are_recorded() {
        let record = BillingRecordBuilder::new("1", date())
            .seller(seller())
            .buyer(buyer())
            .item(LineItemBuilder::new("Desk", dec!(1), dec!(1000)).build())
            .extra("Parking", dec!(2), dec!(50))
            .discount(dec!(50))
            .tax(TaxCategory::Igst, dec!(18))
            .build()
            .unwrap();
        assert_eq!(record.taxes.igst, Some(dec!(18)));
        assert_eq!(record.extra.unwrap().amount(), dec!(100));
        assert_eq!(record.discount, Some(dec!(50)));
    }
}
