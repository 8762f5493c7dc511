use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sheetlineage_core::{extract_report, reader};
use std::path::PathBuf;

mod formatter;

#[derive(Parser)]
#[command(name = "lineagecli")]
#[command(about = "Extract metric lineage from workbook named ranges", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the workbook file (.xlsx)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Report skipped named ranges on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// JSON array of lineage records
    Json,
    /// Markdown report
    Markdown,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let workbook = reader::read_workbook(&cli.file)
        .with_context(|| format!("Failed to read file: {}", cli.file.display()))?;
    let report = extract_report(&workbook);

    if cli.verbose {
        formatter::print_skipped(&report.skipped);
    }

    match cli.format {
        OutputFormat::Json => println!("{}", formatter::render_json(&report.lineages)?),
        OutputFormat::Markdown => print!("{}", formatter::render_markdown(&report.lineages)),
    }

    Ok(())
}
