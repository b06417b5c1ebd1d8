//! Render a single invoice to the current directory.
//!
//! Run with: `cargo run --example render_one`

use chrono::NaiveDate;
use gst_invoice::config::InvoiceConfig;
use gst_invoice::core::*;
use gst_invoice::pdf::render_invoice;
use rust_decimal_macros::dec;

fn main() -> Result<(), InvoiceError> {
    let record = BillingRecordBuilder::new("42", NaiveDate::from_ymd_opt(2025, 5, 1).unwrap())
        .seller(
            PartyBuilder::new("Urban Leaf Space LLP", "27AAAAA0000A1Z5")
                .address("Office 12, Pancard Club Road, Baner, Pune, Maharashtra 411045")
                .build(),
        )
        .buyer(
            PartyBuilder::new("Kodesk Labs", "29BBBBB1111B1Z6")
                .address("80 Feet Road, Koramangala, Bengaluru 560034")
                .build(),
        )
        .item(LineItemBuilder::new("Dedicated Desk", dec!(1), dec!(1000)).build())
        .extra("Parking", dec!(2), dec!(50))
        .discount(dec!(50))
        .tax(TaxCategory::Igst, dec!(18))
        .build()?;

    let config = InvoiceConfig {
        invoice_prefix: "URBN/AI".into(),
        ..InvoiceConfig::default()
    };
    let rendered = render_invoice(&record, &config, None)?;
    std::fs::write(&rendered.filename, &rendered.bytes)?;

    println!(
        "{} ({}): grand total {}",
        rendered.filename,
        rendered.display_number,
        format_money(rendered.computation.totals.grand_total)
    );
    Ok(())
}
