use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::amounts::Totals;
use super::error::ValidationError;
use super::types::*;

/// Largest accepted tax rate, in percent.
const MAX_TAX_RATE: Decimal = dec!(100);

/// Tolerance between a supplied and a computed grand total.
pub const GRAND_TOTAL_TOLERANCE: Decimal = dec!(0.01);

/// Upper bound for any single amount or quantity. Keeps every product and
/// sum in the computation far from `Decimal` overflow.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Validate a record before rendering.
/// Returns all validation errors found (not just the first). Any error is
/// fatal for the record.
pub fn validate_record(record: &BillingRecord) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if record.number.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "number",
            "invoice number must not be empty",
            "REQ-NUMBER",
        ));
    }

    validate_party(&record.seller, "seller", true, &mut errors);
    validate_party(&record.buyer, "buyer", false, &mut errors);
    validate_item(&record.item, &mut errors);

    if let Some(extra) = &record.extra {
        validate_extra(extra, &mut errors);
    }

    if let Some(discount) = record.discount {
        if discount < Decimal::ZERO {
            errors.push(ValidationError::with_rule(
                "discount",
                format!("discount {discount} must not be negative"),
                "AMT-DISCOUNT",
            ));
        } else if discount > MAX_AMOUNT {
            errors.push(out_of_range("discount", discount));
        } else {
            let extra = record
                .extra
                .as_ref()
                .filter(|e| e.quantity > Decimal::ZERO)
                .map_or(Some(Decimal::ZERO), |e| e.quantity.checked_mul(e.unit_price));
            let base_price = extra.and_then(|extra| record.item.base_amount.checked_add(extra));
            if let Some(base_price) = base_price.filter(|base| discount > *base) {
                errors.push(ValidationError::with_rule(
                    "discount",
                    format!("discount {discount} exceeds base price {base_price}"),
                    "AMT-DISCOUNT",
                ));
            }
        }
    }

    if let Some(total) = record.stated_grand_total {
        if total < Decimal::ZERO {
            errors.push(ValidationError::with_rule(
                "grand_total",
                format!("stated grand total {total} must not be negative"),
                "AMT-TOTAL",
            ));
        } else if total > MAX_AMOUNT {
            errors.push(ValidationError::with_rule(
                "grand_total",
                format!("stated grand total {total} exceeds the maximum of {MAX_AMOUNT}"),
                "AMT-TOTAL",
            ));
        }
    }

    for category in TaxCategory::ALL {
        let Some(rate) = record.taxes.get(category) else {
            continue;
        };
        if rate < Decimal::ZERO || rate > MAX_TAX_RATE {
            errors.push(ValidationError::with_rule(
                format!("taxes.{}", category.label().to_ascii_lowercase()),
                format!("rate {rate}% must be between 0 and {MAX_TAX_RATE}"),
                "TAX-RATE",
            ));
        }
    }

    errors
}

/// Non-fatal findings worth a warning: GSTIN format and tax mix.
pub fn lint_record(record: &BillingRecord) -> Vec<ValidationError> {
    let mut findings = Vec::new();

    for (party, prefix) in [(&record.seller, "seller"), (&record.buyer, "buyer")] {
        let gstin = party.gstin.trim();
        if !gstin.is_empty() && !is_plausible_gstin(gstin) {
            findings.push(ValidationError::with_rule(
                format!("{prefix}.gstin"),
                format!("'{gstin}' does not look like a 15-character GSTIN"),
                "GSTIN-FORMAT",
            ));
        }
    }

    let applied: Vec<_> = record.taxes.applied().map(|(c, _)| c).collect();
    if applied.contains(&TaxCategory::Igst)
        && (applied.contains(&TaxCategory::Cgst) || applied.contains(&TaxCategory::Sgst))
    {
        findings.push(ValidationError::with_rule(
            "taxes",
            "IGST is applied together with CGST/SGST",
            "TAX-MIX",
        ));
    }

    findings
}

/// Compare a supplied grand total with the computed one.
pub fn check_stated_total(record: &BillingRecord, totals: &Totals) -> Option<ValidationError> {
    let stated = record.stated_grand_total?;
    let within_tolerance = stated
        .checked_sub(totals.grand_total)
        .is_some_and(|diff| diff.abs() <= GRAND_TOTAL_TOLERANCE);
    if !within_tolerance {
        Some(ValidationError::with_rule(
            "grand_total",
            format!(
                "stated grand total {stated} differs from computed {}",
                totals.grand_total.round_dp(2)
            ),
            "AMT-TOTAL",
        ))
    } else {
        None
    }
}

/// Loose GSTIN shape check: 15 ASCII alphanumerics starting with a
/// two-digit state code.
pub fn is_plausible_gstin(gstin: &str) -> bool {
    gstin.len() == 15
        && gstin.chars().all(|c| c.is_ascii_alphanumeric())
        && gstin[..2].chars().all(|c| c.is_ascii_digit())
}

fn validate_party(
    party: &Party,
    prefix: &str,
    address_required: bool,
    errors: &mut Vec<ValidationError>,
) {
    if party.name.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.name"),
            "name must not be empty",
            "REQ-PARTY",
        ));
    }

    if address_required
        && party
            .address
            .as_deref()
            .is_none_or(|a| a.trim().is_empty())
    {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.address"),
            "address must not be empty",
            "REQ-PARTY",
        ));
    }

    if party.gstin.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.gstin"),
            "GSTIN must not be empty",
            "REQ-PARTY",
        ));
    }
}

fn validate_item(item: &LineItem, errors: &mut Vec<ValidationError>) {
    if item.name.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "item.name",
            "item name must not be empty",
            "REQ-ITEM",
        ));
    }

    for (field, value) in [
        ("item.quantity", item.quantity),
        ("item.unit_price", item.unit_price),
        ("item.base_amount", item.base_amount),
    ] {
        if value < Decimal::ZERO {
            errors.push(ValidationError::with_rule(
                field,
                format!("{value} must not be negative"),
                "AMT-ITEM",
            ));
        } else if value > MAX_AMOUNT {
            errors.push(out_of_range(field, value));
        }
    }
}

fn out_of_range(field: &str, value: Decimal) -> ValidationError {
    ValidationError::with_rule(
        field,
        format!("{value} exceeds the maximum of {MAX_AMOUNT}"),
        "AMT-RANGE",
    )
}

fn validate_extra(extra: &ExtraItem, errors: &mut Vec<ValidationError>) {
    if extra.quantity < Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            "extra.quantity",
            format!("{} must not be negative", extra.quantity),
            "AMT-EXTRA",
        ));
    }
    if extra.unit_price < Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            "extra.unit_price",
            format!("{} must not be negative", extra.unit_price),
            "AMT-EXTRA",
        ));
    }
    for (field, value) in [
        ("extra.quantity", extra.quantity),
        ("extra.unit_price", extra.unit_price),
    ] {
        if value > MAX_AMOUNT {
            errors.push(out_of_range(field, value));
        }
    }
    if extra.quantity > Decimal::ZERO && extra.label.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "extra.label",
            "extra label must not be empty",
            "AMT-EXTRA",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::amounts::compute;
    use chrono::NaiveDate;

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

    fn fields(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn valid_record_passes() {
        assert!(validate_record(&record()).is_empty());
        assert!(lint_record(&record()).is_empty());
    }

    #[test]
    fn reports_all_missing_fields() {
        let mut r = record();
        r.seller.name = " ".into();
        r.seller.address = None;
        r.buyer.gstin = String::new();
        let errors = validate_record(&r);
        assert_eq!(
            fields(&errors),
            vec!["seller.name", "seller.address", "buyer.gstin"]
        );
    }

    #[test]
    fn buyer_address_is_optional() {
        let mut r = record();
        r.buyer.address = None;
        assert!(validate_record(&r).is_empty());
    }

    #[test]
    fn negative_amounts_rejected() {
        let mut r = record();
        r.item.base_amount = dec!(-1);
        r.extra = Some(ExtraItem {
            label: "Parking".into(),
            quantity: dec!(1),
            unit_price: dec!(-5),
        });
        let errors = validate_record(&r);
        assert_eq!(fields(&errors), vec!["item.base_amount", "extra.unit_price"]);
    }

    #[test]
    fn discount_larger_than_base_rejected() {
        let mut r = record();
        r.extra = Some(ExtraItem {
            label: "Parking".into(),
            quantity: dec!(1),
            unit_price: dec!(100),
        });
        r.discount = Some(dec!(1100));
        assert!(validate_record(&r).is_empty());
        r.discount = Some(dec!(1100.01));
        let errors = validate_record(&r);
        assert_eq!(fields(&errors), vec!["discount"]);
    }

    #[test]
    fn huge_amounts_rejected_without_overflow() {
        let mut r = record();
        r.item.base_amount = Decimal::MAX;
        r.extra = Some(ExtraItem {
            label: "Seats".into(),
            quantity: Decimal::MAX,
            unit_price: Decimal::MAX,
        });
        r.discount = Some(dec!(1));
        assert_eq!(
            fields(&validate_record(&r)),
            vec!["item.base_amount", "extra.quantity", "extra.unit_price"]
        );
    }

    #[test]
    fn rate_out_of_range_rejected() {
        let mut r = record();
        r.taxes.igst = Some(dec!(118));
        let errors = validate_record(&r);
        assert_eq!(fields(&errors), vec!["taxes.igst"]);
    }

    #[test]
    fn lint_flags_gstin_and_tax_mix() {
        let mut r = record();
        r.buyer.gstin = "N/A".into();
        r.taxes.cgst = Some(dec!(9));
        r.taxes.igst = Some(dec!(18));
        let findings = lint_record(&r);
        assert_eq!(fields(&findings), vec!["buyer.gstin", "taxes"]);
    }

    #[test]
    fn stated_total_within_tolerance() {
        let mut r = record();
        r.taxes.igst = Some(dec!(18));
        let totals = compute(&r).totals;
        r.stated_grand_total = Some(dec!(1180.00));
        assert!(check_stated_total(&r, &totals).is_none());
        r.stated_grand_total = Some(dec!(1180.01));
        assert!(check_stated_total(&r, &totals).is_none());
        r.stated_grand_total = Some(dec!(1170));
        let err = check_stated_total(&r, &totals).unwrap();
        assert!(err.message.contains("1180"));
    }

    #[test]
    fn extreme_stated_total_is_a_mismatch_not_a_panic() {
        let mut r = record();
        let totals = compute(&r).totals;
        r.stated_grand_total = Some(Decimal::MIN);
        let finding = check_stated_total(&r, &totals).unwrap();
        assert_eq!(finding.rule, "AMT-TOTAL");
        r.stated_grand_total = Some(Decimal::MAX);
        assert!(check_stated_total(&r, &totals).is_some());
    }

    #[test]
    fn stated_total_out_of_range_rejected() {
        let mut r = record();
        r.stated_grand_total = Some(dec!(-1));
        assert_eq!(fields(&validate_record(&r)), vec!["grand_total"]);
        r.stated_grand_total = Some(Decimal::MIN);
        assert_eq!(fields(&validate_record(&r)), vec!["grand_total"]);
        r.stated_grand_total = Some(MAX_AMOUNT + Decimal::ONE);
        assert_eq!(fields(&validate_record(&r)), vec!["grand_total"]);
        r.stated_grand_total = Some(dec!(1000));
        assert!(validate_record(&r).is_empty());
    }
}
