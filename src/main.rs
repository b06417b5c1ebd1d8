use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use gst_invoice::batch::{BatchReport, run_file};
use gst_invoice::config::InvoiceConfig;
use tracing_subscriber::EnvFilter;

/// Render one PDF invoice per row of a billing CSV.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Billing records (CSV with a header row)
    input: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the generated PDFs (overrides the config file)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Logo image, JPEG or PNG (overrides the config file)
    #[arg(short, long)]
    logo: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_json);

    match run(&args) {
        Ok(report) if report.is_complete() => ExitCode::SUCCESS,
        Ok(report) => {
            for failure in &report.failures {
                eprintln!(
                    "row {} (invoice {}): {}",
                    failure.row,
                    failure.invoice_number.as_deref().unwrap_or("-"),
                    failure.reason
                );
            }
            eprintln!(
                "{} of {} invoices generated",
                report.generated.len(),
                report.total()
            );
            ExitCode::from(2)
        }
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<BatchReport> {
    let mut config = match &args.config {
        Some(path) => InvoiceConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => InvoiceConfig::default(),
    };
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(logo) = &args.logo {
        config.logo_path = Some(logo.clone());
    }

    tracing::info!(
        input = %args.input.display(),
        output_dir = %config.output_dir.display(),
        "rendering invoices"
    );
    run_file(&args.input, &config)
        .with_context(|| format!("processing {}", args.input.display()))
}

/// Logs go to stderr; `RUST_LOG` overrides the default `info` level.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
