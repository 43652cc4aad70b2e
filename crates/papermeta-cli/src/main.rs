use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use papermeta_reporting::{ExportFormat, export_records};

mod output;
mod settings;

use output::ColorMode;
use settings::{Overrides, Settings};

/// Extract author, year and DOI from the first page of academic paper PDFs
#[derive(Parser, Debug)]
#[command(name = "papermeta", version, about, long_about = None)]
struct Cli {
    /// Folder containing the PDFs to scan [default: data_jurnal]
    folder: Option<PathBuf>,

    /// Path of the JSON metadata dump
    #[arg(long)]
    json_out: Option<PathBuf>,

    /// Path of the generated TypeScript module
    #[arg(long)]
    ts_out: Option<PathBuf>,

    /// Per-document extraction timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Base URL written in front of each filename as `pdfUrl`
    #[arg(long)]
    pdf_base: Option<String>,

    /// Print extracted records without writing any files
    #[arg(long)]
    dry_run: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Resolve configuration: CLI flags > env vars > config file > defaults
    let settings = Settings::resolve(
        Overrides {
            folder: cli.folder,
            json_out: cli.json_out,
            ts_out: cli.ts_out,
            timeout_secs: cli.timeout,
            pdf_base_url: cli.pdf_base,
        },
        |key| std::env::var(key).ok(),
        papermeta_core::config_file::load_config(),
    )?;
    tracing::debug!(?settings, "resolved settings");

    let color = ColorMode(!cli.no_color && std::env::var_os("NO_COLOR").is_none());
    run(settings, cli.dry_run, color).await
}

async fn run(settings: Settings, dry_run: bool, color: ColorMode) -> anyhow::Result<()> {
    let backend =
        papermeta_ingest::default_backend(settings.header_exclusion, settings.footer_exclusion)
            .map_err(|e| {
                anyhow::anyhow!(
                    "{e}\nReinstall with PDF support: cargo install papermeta-cli --features pdf"
                )
            })?;

    let mut out = std::io::stdout();
    output::print_banner(&mut out, &settings.input_dir, color)?;

    let progress_cb = move |event: papermeta_core::ProgressEvent| {
        let mut w = std::io::stdout().lock();
        let _ = output::print_progress(&mut w, &event, color);
        let _ = w.flush();
    };

    let result = papermeta_ingest::process_folder(&settings.batch_config(), backend, progress_cb)
        .await
        .with_context(|| format!("scanning {}", settings.input_dir.display()))?;

    if result.records.is_empty() {
        output::print_no_documents(&mut out, &settings.input_dir, color)?;
    }
    output::print_summary(&mut out, &result.stats, color)?;

    if dry_run {
        output::print_dry_run(&mut out, &result.records, color)?;
        return Ok(());
    }

    let generated_at = chrono::Local::now().naive_local();
    writeln!(out)?;
    for format in ExportFormat::all() {
        let path = match format {
            ExportFormat::Json => &settings.json_path,
            ExportFormat::TypeScript => &settings.typescript_path,
        };
        export_records(&result.records, *format, path, generated_at)
            .with_context(|| format!("writing {} export", format.label()))?;
        output::print_written(&mut out, format.label(), path, color)?;
    }

    output::print_next_steps(&mut out, &settings.json_path)?;
    Ok(())
}
