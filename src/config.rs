use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use tracing::info;

use crate::models::{InputJson, OutputJson};
use crate::utils::ensure_directory_exists;

pub const DEFAULT_INPUT: &str = "challenge1b_input.json";
pub const DEFAULT_PDF_DIR: &str = "PDFs/";
pub const DEFAULT_OUTPUT: &str = "challenge1b_output.json";

/// Where one run reads its request and PDFs from, and where it writes results.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_path: PathBuf,
    pub pdf_dir: PathBuf,
    pub output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            pdf_dir: PathBuf::from(DEFAULT_PDF_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Config {
    pub fn new(
        input_path: impl Into<PathBuf>,
        pdf_dir: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            pdf_dir: pdf_dir.into(),
            output_path: output_path.into(),
        }
    }

    pub fn load_input(&self) -> Result<InputJson> {
        load_input(&self.input_path)
    }

    pub fn write_output(&self, output: &OutputJson) -> Result<()> {
        write_output(&self.output_path, output)
    }
}

pub fn load_input(path: &Path) -> Result<InputJson> {
    let input_json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input JSON at {}", path.display()))?;
    let input: InputJson = serde_json::from_str(&input_json)
        .with_context(|| format!("Failed to parse input JSON at {}", path.display()))?;
    if let Some(challenge) = &input.challenge_info {
        info!(challenge_id = %challenge.challenge_id, test_case = %challenge.test_case_name, "loaded input");
    }
    Ok(input)
}

pub fn write_output(path: &Path, output: &OutputJson) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_directory_exists(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(output)
        .with_context(|| "Failed to serialize output JSON")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write output to {}", path.display()))?;
    Ok(())
}
