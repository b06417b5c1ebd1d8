//! PDF rendering of a single invoice.
//!
//! Rendering is split in two stages. [`layout_invoice`] turns a record and
//! its [`Computation`] into a [`Page`] display list, and [`write_pdf`]
//! serializes that list with `lopdf`. Tests inspect the display list
//! directly.

mod canvas;
mod fonts;
mod layout;
mod logo;
mod table;
mod writer;

pub use canvas::{Color, Mark, Page, Stroke};
pub use fonts::{Font, encode_win_ansi};
pub use layout::{
    COLUMN_WIDTHS, LayoutInput, PAGE_HEIGHT, PAGE_WIDTH, PARTY_GAP, ROW_OFFSET_STEP,
    TABLE_BASE_OFFSET, clear_of_parties, layout_invoice, line_item_table, table_offset,
};
pub use logo::{Logo, load_logo_or_skip};
pub use table::{BODY_ROW_HEIGHT, HEADER_ROW_HEIGHT, RowStyle, Table};
pub use writer::write_pdf;

use crate::config::InvoiceConfig;
use crate::core::{
    BillingRecord, Computation, InvoiceError, compute, invoice_filename, validate_record,
};

/// One rendered invoice, not yet written to disk.
#[derive(Debug, Clone)]
pub struct RenderedInvoice {
    /// `Invoice_{number}_{Mon}_{Year}_{buyer}.pdf`
    pub filename: String,
    /// Invoice number as printed on the page.
    pub display_number: String,
    pub computation: Computation,
    pub page: Page,
    pub bytes: Vec<u8>,
}

/// Validate, compute, lay out and serialize one record.
pub fn render_invoice(
    record: &BillingRecord,
    config: &InvoiceConfig,
    logo: Option<&Logo>,
) -> Result<RenderedInvoice, InvoiceError> {
    let errors = validate_record(record);
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(InvoiceError::Validation(messages.join("; ")));
    }

    let computation = compute(record);
    let display_number = config
        .number_format()
        .format(&record.number, record.issue_date)?;

    let page = layout_invoice(&LayoutInput {
        record,
        computation: &computation,
        display_number: &display_number,
        config,
        with_logo: logo.is_some(),
    });
    let bytes = write_pdf(&page, logo, &format!("Invoice {display_number}"))?;

    Ok(RenderedInvoice {
        filename: invoice_filename(&record.number, record.issue_date, &record.buyer.name),
        display_number,
        computation,
        page,
        bytes,
    })
}
