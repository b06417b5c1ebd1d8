//! Single-page invoice layout.
//!
//! Positions are absolute, measured down from the top edge of an A4 page.
//! The line-item table is placed by its bottom edge at
//! `TABLE_BASE_OFFSET + ROW_OFFSET_STEP * n` below the top, where `n` is the
//! number of optional rows present. When a long seller or buyer address
//! pushes its GSTIN line further down, the table moves down with it so its
//! top stays `PARTY_GAP` below the lower GSTIN baseline. Payment and bank
//! details follow at fixed distances from the final offset.

use crate::config::InvoiceConfig;
use crate::core::{BillingRecord, Computation, RowKind, wrap_text};

use super::canvas::Page;
use super::fonts::Font;
use super::table::{RowStyle, Table};

/// A4 width in points.
pub const PAGE_WIDTH: f32 = 595.2756;
/// A4 height in points.
pub const PAGE_HEIGHT: f32 = 841.8898;

/// Table bottom offset when no optional rows are present.
pub const TABLE_BASE_OFFSET: f32 = 360.0;
/// Added to the offset for every optional row.
pub const ROW_OFFSET_STEP: f32 = 20.0;

/// Table column widths: description, quantity, unit price, amount.
pub const COLUMN_WIDTHS: [f32; 4] = [200.0, 80.0, 100.0, 100.0];

const LEFT: f32 = 50.0;
const BUYER_X: f32 = 300.0;
const META_X: f32 = 400.0;
const LINE_STEP: f32 = 20.0;
const BANK_LINE_STEP: f32 = 15.0;
/// Minimum space between the lower GSTIN baseline and the table top.
pub const PARTY_GAP: f32 = 15.0;

const LOGO_BOX: (f32, f32) = (100.0, 50.0);

/// Offset (from the top edge) of the table's bottom edge for the given
/// optional rows.
pub fn table_offset(optional_rows: impl IntoIterator<Item = RowKind>) -> f32 {
    let count = optional_rows
        .into_iter()
        .filter(RowKind::is_optional)
        .count();
    TABLE_BASE_OFFSET + ROW_OFFSET_STEP * count as f32
}

/// Smallest table bottom offset that keeps a table of `table_height` at
/// least `PARTY_GAP` below a GSTIN baseline at `party_offset`.
pub fn clear_of_parties(party_offset: f32, table_height: f32) -> f32 {
    party_offset + PARTY_GAP + table_height
}

/// Everything the layout needs besides the record itself.
#[derive(Debug, Clone, Copy)]
pub struct LayoutInput<'a> {
    pub record: &'a BillingRecord,
    pub computation: &'a Computation,
    pub display_number: &'a str,
    pub config: &'a InvoiceConfig,
    pub with_logo: bool,
}

/// Lay out the whole invoice page.
pub fn layout_invoice(input: &LayoutInput<'_>) -> Page {
    let mut page = Page::new(PAGE_WIDTH, PAGE_HEIGHT);
    let top = |offset: f32| PAGE_HEIGHT - offset;
    let record = input.record;
    let config = input.config;

    if input.with_logo {
        page.image(LEFT, top(80.0), LOGO_BOX.0, LOGO_BOX.1);
    }

    page.text(230.0, top(60.0), Font::Bold, 18.0, config.title.as_str());
    page.text(
        META_X,
        top(100.0),
        Font::Regular,
        10.0,
        format!("Date: {}", record.issue_date.format("%d-%b-%Y")),
    );
    page.text(
        META_X,
        top(120.0),
        Font::Regular,
        10.0,
        format!("Invoice No: {}", input.display_number),
    );

    // Seller
    page.text(LEFT, top(140.0), Font::Bold, 12.0, "From:");
    page.text(LEFT, top(160.0), Font::Regular, 10.0, record.seller.name.as_str());
    let mut seller_y = top(180.0);
    for line in wrap_text(
        record.seller.address.as_deref().unwrap_or(""),
        config.address_width,
    ) {
        page.text(LEFT, seller_y, Font::Regular, 10.0, line);
        seller_y -= LINE_STEP;
    }
    page.text(
        LEFT,
        seller_y,
        Font::Regular,
        10.0,
        format!("GSTIN: {}", record.seller.gstin),
    );

    // Buyer
    page.text(BUYER_X, top(140.0), Font::Bold, 12.0, "Billed To:");
    page.text(BUYER_X, top(160.0), Font::Regular, 10.0, record.buyer.name.as_str());
    let mut buyer_y = top(180.0);
    if config.wrap_buyer_address {
        if let Some(address) = record.buyer.address.as_deref() {
            for line in wrap_text(address, config.address_width) {
                page.text(BUYER_X, buyer_y, Font::Regular, 10.0, line);
                buyer_y -= LINE_STEP;
            }
        }
    }
    page.text(
        BUYER_X,
        buyer_y,
        Font::Regular,
        10.0,
        format!("GSTIN: {}", record.buyer.gstin),
    );

    // Line items
    let table = line_item_table(input.computation);
    let offset = table_offset(input.computation.optional_rows()).max(clear_of_parties(
        PAGE_HEIGHT - seller_y.min(buyer_y),
        table.height(),
    ));
    table.draw(&mut page, LEFT, top(offset));

    // Payment and bank details
    page.text(LEFT, top(offset + 30.0), Font::Bold, 12.0, "Payment Method:");
    page.text(
        200.0,
        top(offset + 30.0),
        Font::Regular,
        10.0,
        config.payment_method.as_str(),
    );
    page.text(
        LEFT,
        top(offset + 45.0),
        Font::Bold,
        12.0,
        "Bank Account Details:",
    );
    let mut y = top(offset + 60.0);
    for line in config.bank_lines() {
        page.text(LEFT, y, Font::Regular, 10.0, line);
        y -= BANK_LINE_STEP;
    }

    page.text(200.0, 70.0, Font::Bold, 15.0, config.footer.as_str());

    page
}

/// Build the line-item table: header, computed rows, bold grand total.
pub fn line_item_table(computation: &Computation) -> Table {
    let mut table = Table::new(COLUMN_WIDTHS.to_vec());
    table.push_row(
        &["Item", "Quantity", "Unit Price", "Total Amount"],
        RowStyle::header(),
    );
    for row in &computation.rows {
        let style = match row.kind {
            RowKind::GrandTotal => RowStyle::emphasis(),
            _ => RowStyle::body(),
        };
        table.push_row(&row.cells(), style);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TaxCategory;

    #[test]
    fn offset_without_optional_rows() {
        assert_eq!(table_offset([RowKind::Item, RowKind::FinalBase, RowKind::GrandTotal]), 360.0);
    }

    #[test]
    fn offset_grows_per_optional_row() {
        assert_eq!(table_offset([RowKind::Extra]), 380.0);
        assert_eq!(
            table_offset([RowKind::BasePrice, RowKind::Discount]),
            400.0
        );
        assert_eq!(
            table_offset([
                RowKind::Extra,
                RowKind::BasePrice,
                RowKind::Discount,
                RowKind::Tax(TaxCategory::Cgst),
                RowKind::Tax(TaxCategory::Sgst),
            ]),
            460.0
        );
    }

    #[test]
    fn short_addresses_leave_offset_alone() {
        // GSTIN at 200 with a bare four-row table
        let offset = table_offset([RowKind::Item, RowKind::FinalBase, RowKind::GrandTotal]);
        assert!(clear_of_parties(200.0, 88.0) < offset);
    }

    #[test]
    fn deep_party_block_pushes_table() {
        // six address lines put the GSTIN at 300
        assert_eq!(clear_of_parties(300.0, 88.0), 403.0);
    }
}
