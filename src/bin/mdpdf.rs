//! mdpdf - convert a markdown file into a single-page PDF
//!
//! Usage:
//!   mdpdf notes.md
//!   mdpdf notes.md -o report.pdf --author "A. Student" --student-id S123 --verify
//!
//! Set `RUST_LOG=debug` to see object offsets as they are written.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use mdpdf::{MarkdownParser, PdfWriter};

/// File name used when no output path is given.
const DEFAULT_OUTPUT_NAME: &str = "Output.pdf";

#[derive(Parser)]
#[command(name = "mdpdf")]
#[command(author, version, about = "Convert simplified markdown to a one-page PDF", long_about = None)]
struct Cli {
    /// Input markdown file
    input: PathBuf,

    /// Output PDF file (defaults to Output.pdf next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Author shown under the title
    #[arg(long, default_value = "Your Name")]
    author: String,

    /// Student ID shown under the author
    #[arg(long, default_value = "Your Student ID")]
    student_id: String,

    /// Re-read the written file and check its structure
    #[arg(long)]
    verify: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let input = &cli.input;
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let doc = MarkdownParser::parse_file(input, &cli.author, &cli.student_id)
        .with_context(|| format!("Failed to read markdown file: {}", input.display()))?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(input));

    PdfWriter::new()
        .save(&doc, &output)
        .with_context(|| format!("Failed to write PDF file: {}", output.display()))?;

    if cli.verify {
        let bytes = fs::read(&output)
            .with_context(|| format!("Failed to re-read PDF file: {}", output.display()))?;
        let report = mdpdf::verify(&bytes)
            .with_context(|| format!("Structure check failed: {}", output.display()))?;
        println!(
            "Verified {} objects, xref at byte {}",
            report.object_count(),
            report.xref_offset
        );
    }

    println!("PDF generated: {}", output.display());
    Ok(())
}

/// `Output.pdf` in the input's directory.
fn default_output(input: &Path) -> PathBuf {
    match input.parent() {
        Some(dir) => dir.join(DEFAULT_OUTPUT_NAME),
        None => PathBuf::from(DEFAULT_OUTPUT_NAME),
    }
}
