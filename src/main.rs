use anyhow::Result;
use clap::Parser;
use persona_sections::config::{Config, DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_PDF_DIR};
use persona_sections::PdfProcessor;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rank persona-relevant sections across a PDF collection", long_about = None)]
struct Args {
    /// Input JSON describing the persona, task and documents
    #[arg(long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Directory containing the listed PDFs
    #[arg(long, default_value = DEFAULT_PDF_DIR)]
    pdfs: PathBuf,

    /// Where to write the output JSON
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::new(args.input, args.pdfs, args.output);

    PdfProcessor::process_pdf_collection(&config)
}
