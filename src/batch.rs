//! Sequential batch rendering.
//!
//! Records are rendered one at a time. A record that fails is logged and
//! recorded in the [`BatchReport`]; the run carries on with the next one.
//! Only problems that affect every record (unreadable input, an output
//! directory that cannot be created) abort the run.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::InvoiceConfig;
use crate::core::{BillingRecord, InvoiceError, check_stated_total, lint_record};
use crate::import::{ImportedRow, read_records};
use crate::pdf::{Logo, load_logo_or_skip, render_invoice};

/// A record that produced no invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    /// Spreadsheet row number; the header is row 1.
    pub row: usize,
    pub invoice_number: Option<String>,
    pub reason: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Paths of the invoices written, in input order.
    pub generated: Vec<PathBuf>,
    pub failures: Vec<RecordFailure>,
}

impl BatchReport {
    /// Every record produced an invoice.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total(&self) -> usize {
        self.generated.len() + self.failures.len()
    }
}

/// Read `input` and render every record into `config.output_dir`.
pub fn run_file(
    input: impl AsRef<Path>,
    config: &InvoiceConfig,
) -> Result<BatchReport, InvoiceError> {
    let rows = read_records(input)?;
    run_batch(rows, config)
}

/// Render already imported rows into `config.output_dir`.
pub fn run_batch(
    rows: impl IntoIterator<Item = ImportedRow>,
    config: &InvoiceConfig,
) -> Result<BatchReport, InvoiceError> {
    fs::create_dir_all(&config.output_dir).map_err(|e| {
        InvoiceError::Io(std::io::Error::new(
            e.kind(),
            format!(
                "cannot create output directory {}: {e}",
                config.output_dir.display()
            ),
        ))
    })?;

    let logo = load_logo_or_skip(config.logo_path.as_deref());
    let mut report = BatchReport::default();
    let mut written = HashSet::new();

    for imported in rows {
        let result = imported
            .record
            .and_then(|record| render_to_dir(&record, config, logo.as_ref()));
        match result {
            Ok(path) => {
                if !written.insert(path.clone()) {
                    tracing::warn!(
                        row = imported.row,
                        path = %path.display(),
                        "invoice overwrote one written earlier in this run"
                    );
                }
                tracing::info!(row = imported.row, path = %path.display(), "invoice generated");
                report.generated.push(path);
            }
            Err(e) => {
                tracing::error!(
                    row = imported.row,
                    invoice = imported.invoice_number.as_deref().unwrap_or("-"),
                    error = %e,
                    "invoice not generated"
                );
                report.failures.push(RecordFailure {
                    row: imported.row,
                    invoice_number: imported.invoice_number,
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        generated = report.generated.len(),
        failed = report.failures.len(),
        "batch finished"
    );
    Ok(report)
}

/// Render one record and write it into the output directory.
pub fn render_to_dir(
    record: &BillingRecord,
    config: &InvoiceConfig,
    logo: Option<&Logo>,
) -> Result<PathBuf, InvoiceError> {
    for finding in lint_record(record) {
        tracing::warn!(invoice = %record.number, %finding, "suspicious value");
    }

    let rendered = render_invoice(record, config, logo)?;
    if let Some(mismatch) = check_stated_total(record, &rendered.computation.totals) {
        tracing::warn!(invoice = %record.number, %mismatch, "rendering computed grand total");
    }
    let path = config.output_dir.join(&rendered.filename);
    write_atomic(&path, &rendered.bytes)?;
    Ok(path)
}

/// Write to a hidden sibling, then rename over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), InvoiceError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| InvoiceError::Render(format!("not a file path: {}", path.display())))?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    let result = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result.map_err(InvoiceError::from)
}
