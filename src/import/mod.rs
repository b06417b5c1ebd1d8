//! Billing records from CSV.
//!
//! The whole file is read before any record is rendered. Each data row
//! becomes an [`ImportedRow`]. A row that cannot be turned into a
//! [`BillingRecord`] carries its error instead, so one bad row never stops
//! the others from being imported.

mod columns;
mod values;

use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use rust_decimal::Decimal;

pub use columns::{ColumnMap, header};
pub use values::{normalize_invoice_number, parse_date, parse_decimal};

use crate::core::{
    BillingRecord, BillingRecordBuilder, ExtraItem, InvoiceError, LineItemBuilder, PartyBuilder,
    TaxCategory,
};

/// One data row of the source.
#[derive(Debug)]
pub struct ImportedRow {
    /// Spreadsheet row number; the header is row 1.
    pub row: usize,
    /// Invoice number, if the row has one.
    pub invoice_number: Option<String>,
    pub record: Result<BillingRecord, InvoiceError>,
}

/// Read every row of a CSV file.
///
/// Fails only when the file cannot be read or is not CSV at all. Problems
/// inside a row are reported per row.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<ImportedRow>, InvoiceError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| InvoiceError::Import(format!("cannot open {}: {e}", path.display())))?;
    read_records_from(file)
}

/// Read every row from any CSV source.
pub fn read_records_from<R: Read>(reader: R) -> Result<Vec<ImportedRow>, InvoiceError> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv
        .headers()
        .map_err(|e| InvoiceError::Import(format!("cannot read header row: {e}")))?
        .clone();
    let columns = ColumnMap::new(&headers);
    if !columns.contains(header::INVOICE_NUMBER) {
        tracing::warn!("no '{}' column; every row will fail", header::INVOICE_NUMBER);
    }

    let mut rows = Vec::new();
    for (i, result) in csv.records().enumerate() {
        let row = i + 2;
        let imported = match result {
            Ok(record) => ImportedRow {
                row,
                invoice_number: columns
                    .get(&record, header::INVOICE_NUMBER)
                    .map(normalize_invoice_number),
                record: record_from_row(&columns, &record),
            },
            Err(e) => ImportedRow {
                row,
                invoice_number: None,
                record: Err(InvoiceError::Import(format!("malformed row: {e}"))),
            },
        };
        rows.push(imported);
    }

    tracing::debug!(rows = rows.len(), "billing records read");
    Ok(rows)
}

/// Map one CSV row to a billing record.
pub fn record_from_row(
    columns: &ColumnMap,
    row: &StringRecord,
) -> Result<BillingRecord, InvoiceError> {
    let cell = |name: &str| columns.get(row, name);
    let required = |name: &str| cell(name).ok_or_else(|| InvoiceError::field(name, "missing value"));
    let decimal = |name: &str| -> Result<Option<Decimal>, InvoiceError> {
        cell(name).map(|v| parse_decimal(name, v)).transpose()
    };
    let required_decimal = |name: &str| parse_decimal(name, required(name)?);

    let number = normalize_invoice_number(required(header::INVOICE_NUMBER)?);
    let issue_date = parse_date(header::INVOICE_DATE, required(header::INVOICE_DATE)?)?;

    let mut seller = PartyBuilder::new(
        required(header::SELLER_NAME)?,
        required(header::SELLER_GSTIN)?,
    );
    if let Some(address) = cell(header::SELLER_ADDRESS) {
        seller = seller.address(address);
    }
    let mut buyer = PartyBuilder::new(
        required(header::BUYER_NAME)?,
        required(header::BUYER_GSTIN)?,
    );
    if let Some(address) = cell(header::BUYER_ADDRESS) {
        buyer = buyer.address(address);
    }

    let item = LineItemBuilder::new(
        required(header::ITEM_NAME)?,
        required_decimal(header::QUANTITY)?,
        required_decimal(header::UNIT_PRICE)?,
    )
    .base_amount(required_decimal(header::BASE_AMOUNT)?);

    let mut builder = BillingRecordBuilder::new(number, issue_date)
        .seller(seller.build())
        .buyer(buyer.build())
        .item(item.build());

    if let Some(qty) = decimal(header::EXTRA_QTY)?.filter(|q| !q.is_zero()) {
        let price = required_decimal(header::EXTRA_PRICE)?;
        let label = columns
            .get_any(row, &[header::EXTRA_LABEL, header::EXTRA_LABEL_SHORT])
            .unwrap_or(ExtraItem::DEFAULT_LABEL);
        builder = builder.extra(label, qty, price);
    }
    if let Some(discount) = decimal(header::DISCOUNT)? {
        builder = builder.discount(discount);
    }
    for (category, name) in [
        (TaxCategory::Cgst, header::CGST),
        (TaxCategory::Sgst, header::SGST),
        (TaxCategory::Igst, header::IGST),
    ] {
        if let Some(rate) = decimal(name)? {
            builder = builder.tax(category, rate);
        }
    }
    if let Some(total) = decimal(header::GRAND_TOTAL)? {
        builder = builder.stated_grand_total(total);
    }

    builder.build_unchecked()
}
