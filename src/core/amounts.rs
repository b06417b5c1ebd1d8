use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::types::*;

/// What a computed table row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    /// The primary line item.
    Item,
    /// The optional extra line item.
    Extra,
    /// Pre-discount subtotal, present only together with a discount.
    BasePrice,
    /// The flat discount.
    Discount,
    /// Post-extra, post-discount taxable base.
    FinalBase,
    /// One applied tax category.
    Tax(TaxCategory),
    /// Final payable amount.
    GrandTotal,
}

impl RowKind {
    /// Whether this row depends on optional record content. Used by the
    /// layout to shift everything below the table.
    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            Self::Extra | Self::BasePrice | Self::Discount | Self::Tax(_)
        )
    }
}

/// One row of the line-item table, already formatted for printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRow {
    pub kind: RowKind,
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub amount: String,
}

impl InvoiceRow {
    fn new(
        kind: RowKind,
        description: impl Into<String>,
        quantity: impl Into<String>,
        unit_price: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            description: description.into(),
            quantity: quantity.into(),
            unit_price: unit_price.into(),
            amount: amount.into(),
        }
    }

    /// The four cells in column order.
    pub fn cells(&self) -> [&str; 4] {
        [
            &self.description,
            &self.quantity,
            &self.unit_price,
            &self.amount,
        ]
    }
}

/// One applied tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLine {
    pub category: TaxCategory,
    /// Percentage, as supplied.
    pub rate: Decimal,
    /// `final_base * rate / 100`, unrounded.
    pub amount: Decimal,
}

/// Unrounded monetary results for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Primary base amount plus the extra, before discount.
    pub base_price: Decimal,
    /// Extra amount (`qty * price`) when an extra is present.
    pub extra_amount: Option<Decimal>,
    /// Discount when one is present.
    pub discount: Option<Decimal>,
    /// Taxable base after extra and discount.
    pub final_base: Decimal,
    /// Applied taxes, in category order.
    pub taxes: Vec<TaxLine>,
    /// `final_base + Σ taxes`.
    pub grand_total: Decimal,
}

impl Totals {
    /// Sum of all applied tax amounts.
    pub fn tax_total(&self) -> Decimal {
        self.taxes.iter().map(|t| t.amount).sum()
    }
}

/// Computed amounts plus the printable rows, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Computation {
    pub totals: Totals,
    pub rows: Vec<InvoiceRow>,
}

impl Computation {
    /// Kinds of the optional rows that are present, in table order.
    pub fn optional_rows(&self) -> impl Iterator<Item = RowKind> + '_ {
        self.rows.iter().map(|r| r.kind).filter(RowKind::is_optional)
    }
}

/// Compute the line-item table for a record.
///
/// Extra is added first, a "Base Price" subtotal is shown only when a discount
/// follows it, the discount is subtracted before tax, and every tax category
/// with a positive rate is applied to the same post-discount base. Nothing is
/// rounded until formatting.
pub fn compute(record: &BillingRecord) -> Computation {
    let item = &record.item;
    let mut rows = vec![InvoiceRow::new(
        RowKind::Item,
        item.name.clone(),
        format_quantity(item.quantity),
        format_money(item.unit_price),
        format_money(item.base_amount),
    )];

    let mut running_base = item.base_amount;

    let extra = record.extra.as_ref().filter(|e| e.quantity > Decimal::ZERO);
    let extra_amount = extra.map(|extra| {
        let amount = extra.amount();
        rows.push(InvoiceRow::new(
            RowKind::Extra,
            extra.label.clone(),
            format_quantity(extra.quantity),
            format_money(extra.unit_price),
            format_money(amount),
        ));
        running_base += amount;
        amount
    });

    let base_price = running_base;

    let discount = record.discount.filter(|d| *d > Decimal::ZERO);
    if let Some(discount) = discount {
        rows.push(InvoiceRow::new(
            RowKind::BasePrice,
            "Base Price",
            "",
            "",
            format_money(running_base),
        ));
        rows.push(InvoiceRow::new(
            RowKind::Discount,
            "Discount",
            "1",
            format_money(discount),
            format_money(-discount),
        ));
        running_base -= discount;
    }

    let final_base = running_base;
    rows.push(InvoiceRow::new(
        RowKind::FinalBase,
        "Final Base Price",
        "",
        "",
        format_money(final_base),
    ));

    let mut grand_total = final_base;
    let mut taxes = Vec::new();
    for (category, rate) in record.taxes.applied() {
        let amount = final_base * rate / Decimal::ONE_HUNDRED;
        rows.push(InvoiceRow::new(
            RowKind::Tax(category),
            category.label(),
            "1",
            format!("{}%", rate.normalize()),
            format_money(amount),
        ));
        grand_total += amount;
        taxes.push(TaxLine {
            category,
            rate,
            amount,
        });
    }

    rows.push(InvoiceRow::new(
        RowKind::GrandTotal,
        "Grand Total",
        "",
        "",
        format_money(grand_total),
    ));

    Computation {
        totals: Totals {
            base_price,
            extra_amount,
            discount,
            final_base,
            taxes,
            grand_total,
        },
        rows,
    }
}

/// Format a monetary value with exactly two decimals, half away from zero.
pub fn format_money(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let mut out = format!("{:.2}", rounded);
    // -0.004 rounds to zero but keeps its sign
    if out == "-0.00" {
        out.remove(0);
    }
    out
}

/// Format a quantity without trailing zeros ("2", "1.5").
pub fn format_quantity(value: Decimal) -> String {
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn record() -> BillingRecord {
        BillingRecord {
            number: "42".into(),
            issue_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            seller: Party {
                name: "Urban Leaf Space LLP".into(),
                address: Some("Baner, Pune".into()),
                gstin: "27AAAAA0000A1Z5".into(),
            },
            buyer: Party {
                name: "Kodesk Labs".into(),
                address: None,
                gstin: "27BBBBB1111B1Z6".into(),
            },
            item: LineItem {
                name: "Dedicated Desk".into(),
                quantity: dec!(1),
                unit_price: dec!(1000),
                base_amount: dec!(1000),
            },
            extra: None,
            discount: None,
            taxes: TaxRates::default(),
            stated_grand_total: None,
        }
    }

    fn descriptions(c: &Computation) -> Vec<&str> {
        c.rows.iter().map(|r| r.description.as_str()).collect()
    }

    #[test]
    fn plain_record_has_minimal_rows() {
        let c = compute(&record());
        assert_eq!(
            descriptions(&c),
            vec!["Dedicated Desk", "Final Base Price", "Grand Total"]
        );
        assert_eq!(c.totals.grand_total, dec!(1000));
        assert_eq!(c.optional_rows().count(), 0);
    }

    #[test]
    fn base_price_row_only_with_discount() {
        let mut r = record();
        r.extra = Some(ExtraItem {
            label: "Parking".into(),
            quantity: dec!(2),
            unit_price: dec!(50),
        });
        let c = compute(&r);
        assert!(!c.rows.iter().any(|row| row.kind == RowKind::BasePrice));

        r.discount = Some(dec!(25));
        let c = compute(&r);
        let base = c.rows.iter().find(|row| row.kind == RowKind::BasePrice).unwrap();
        assert_eq!(base.amount, "1100.00");
    }

    #[test]
    fn discount_row_is_negative() {
        let mut r = record();
        r.discount = Some(dec!(50));
        let c = compute(&r);
        let row = c.rows.iter().find(|row| row.kind == RowKind::Discount).unwrap();
        assert_eq!(row.cells(), ["Discount", "1", "50.00", "-50.00"]);
        assert_eq!(c.totals.final_base, dec!(950));
    }

    #[test]
    fn zero_extra_quantity_is_absent() {
        let mut r = record();
        r.extra = Some(ExtraItem {
            label: "Parking".into(),
            quantity: dec!(0),
            unit_price: dec!(50),
        });
        let c = compute(&r);
        assert_eq!(c.totals.extra_amount, None);
        assert!(!c.rows.iter().any(|row| row.kind == RowKind::Extra));
    }

    #[test]
    fn tax_rows_use_full_precision() {
        let mut r = record();
        r.item.base_amount = dec!(333.33);
        r.taxes.cgst = Some(dec!(2.5));
        r.taxes.sgst = Some(dec!(2.5));
        let c = compute(&r);
        // 333.33 * 2.5% = 8.33325 per category, summed before rounding
        assert_eq!(c.totals.tax_total(), dec!(16.66650));
        assert_eq!(c.totals.grand_total, dec!(349.99650));
        let grand = c.rows.last().unwrap();
        assert_eq!(grand.amount, "350.00");
        let cgst = &c.rows[2];
        assert_eq!(cgst.cells(), ["CGST", "1", "2.5%", "8.33"]);
    }

    #[test]
    fn worked_example() {
        let mut r = record();
        r.extra = Some(ExtraItem {
            label: "Extra Seat".into(),
            quantity: dec!(2),
            unit_price: dec!(50.00),
        });
        r.discount = Some(dec!(50.00));
        r.taxes.cgst = Some(dec!(9));
        r.taxes.sgst = Some(dec!(9));
        let c = compute(&r);
        assert_eq!(c.totals.final_base, dec!(1050));
        assert_eq!(c.totals.grand_total, dec!(1239.00));
        assert_eq!(
            descriptions(&c),
            vec![
                "Dedicated Desk",
                "Extra Seat",
                "Base Price",
                "Discount",
                "Final Base Price",
                "CGST",
                "SGST",
                "Grand Total"
            ]
        );
        assert_eq!(c.rows[5].amount, "94.50");
        assert_eq!(c.rows[7].amount, "1239.00");
        assert_eq!(c.optional_rows().count(), 5);
    }

    #[test]
    fn money_formatting() {
        assert_eq!(format_money(dec!(94.5)), "94.50");
        assert_eq!(format_money(dec!(0.125)), "0.13");
        assert_eq!(format_money(dec!(-0.125)), "-0.13");
        assert_eq!(format_money(dec!(-0.001)), "0.00");
        assert_eq!(format_money(dec!(1239)), "1239.00");
    }

    #[test]
    fn quantity_formatting() {
        assert_eq!(format_quantity(dec!(2.000)), "2");
        assert_eq!(format_quantity(dec!(1.50)), "1.5");
    }
}
