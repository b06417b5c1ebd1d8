//! # gst-invoice
//!
//! Batch renderer for Indian GST invoices. Billing records come in as CSV
//! rows; each becomes a single-page A4 PDF with the line items, the applied
//! CGST/SGST/IGST and the grand total.
//!
//! All monetary values use [`rust_decimal::Decimal`] and are rounded half
//! away from zero to two places only when printed.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gst_invoice::core::*;
//! use rust_decimal_macros::dec;
//!
//! let record = BillingRecordBuilder::new("7", NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
//!     .seller(PartyBuilder::new("Urban Leaf Space LLP", "27AAAAA0000A1Z5")
//!         .address("Pancard Club Road, Baner, Pune").build())
//!     .buyer(PartyBuilder::new("Kodesk Labs", "29BBBBB1111B1Z6").build())
//!     .item(LineItemBuilder::new("Dedicated Desk", dec!(1), dec!(1000)).build())
//!     .extra("Parking", dec!(2), dec!(50))
//!     .discount(dec!(50))
//!     .tax(TaxCategory::Cgst, dec!(9))
//!     .tax(TaxCategory::Sgst, dec!(9))
//!     .build()
//!     .unwrap();
//!
//! let totals = compute(&record).totals;
//! assert_eq!(totals.final_base, dec!(1050));
//! assert_eq!(format_money(totals.grand_total), "1239.00");
//! assert_eq!(
//!     invoice_filename(&record.number, record.issue_date, &record.buyer.name),
//!     "Invoice_7_Jun_2025_Kodesk_Labs.pdf"
//! );
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Record types, amount computation, validation, numbering, configuration |
//! | `pdf` | Page layout and PDF output |
//! | `import` | CSV record import |
//! | `cli` (default) | Batch driver and the `gst-invoice` binary |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod config;

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "import")]
pub mod import;

#[cfg(all(feature = "pdf", feature = "import"))]
pub mod batch;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
