use anyhow::{anyhow, Context, Result};
use pdf::content::{Content, Op, TextDrawAdjusted};
use pdf::file::FileOptions;
use pdf::object::Resolve;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info, warn};

use crate::utils::preview;

// TJ spacing is in thousandths of text space; wider gaps than this read as a word break.
const WORD_GAP: f32 = 200.0;

/// Source of per-page plain text for one document.
///
/// Returns one string per page in page order; a page with no extractable text
/// is an empty string, not a missing entry.
pub trait TextExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>>;
}

/// Reads page text out of PDF content streams, falling back to `pdftotext`
/// when the file cannot be parsed or contains no text.
#[derive(Debug, Clone)]
pub struct PdfTextExtractor {
    pdftotext_fallback: bool,
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self {
            pdftotext_fallback: true,
        }
    }

    pub fn without_fallback() -> Self {
        Self {
            pdftotext_fallback: false,
        }
    }

    fn extract_native(path: &Path) -> Result<Vec<String>> {
        let file = FileOptions::cached()
            .open(path)
            .with_context(|| format!("Failed to parse PDF at {}", path.display()))?;
        let resolver = &file;

        let total_pages = file.num_pages();
        debug!(path = %path.display(), total_pages, "opened PDF");

        let mut pages = Vec::with_capacity(total_pages as usize);
        for page_index in 0..total_pages {
            let page_number = page_index + 1;
            let text = match file.get_page(page_index) {
                Ok(page) => match &page.contents {
                    Some(content) => page_text(resolver, content).unwrap_or_else(|e| {
                        warn!(page_number, "failed to read page content: {:#}", e);
                        String::new()
                    }),
                    None => String::new(),
                },
                Err(e) => {
                    warn!(page_number, "failed to load page: {}", e);
                    String::new()
                }
            };
            debug!(page_number, chars = text.chars().count(), preview = %preview(&text, 100), "page text");
            pages.push(text);
        }
        Ok(pages)
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        if !path.exists() {
            return Err(anyhow!("PDF not found at: {}", path.display()));
        }

        let native = std::panic::catch_unwind(|| Self::extract_native(path))
            .unwrap_or_else(|_| Err(anyhow!("PDF parser panicked on {}", path.display())));
        let needs_fallback = match &native {
            Ok(pages) => !has_text(pages),
            Err(e) => {
                warn!(path = %path.display(), "native PDF parsing failed: {:#}", e);
                true
            }
        };
        if !needs_fallback || !self.pdftotext_fallback {
            return native;
        }

        info!(path = %path.display(), "trying pdftotext fallback");
        match extract_with_pdftotext(path) {
            Ok(pages) => Ok(pages),
            Err(e) => {
                warn!(path = %path.display(), "pdftotext fallback failed: {:#}", e);
                native
            }
        }
    }
}

fn has_text(pages: &[String]) -> bool {
    pages.iter().any(|p| !p.trim().is_empty())
}

fn push_line_break(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

fn push_word_gap(text: &mut String) {
    if !text.is_empty() && !text.ends_with(char::is_whitespace) {
        text.push(' ');
    }
}

fn page_text(resolver: &impl Resolve, content: &Content) -> Result<String> {
    let mut text = String::new();
    for op in content.operations(resolver)? {
        match op {
            Op::BeginText | Op::TextNewline | Op::SetTextMatrix { .. } => push_line_break(&mut text),
            Op::TextDraw { text: s } => text.push_str(&s.to_string_lossy()),
            Op::TextDrawAdjusted { array } => {
                for item in array {
                    match item {
                        TextDrawAdjusted::Text(s) => text.push_str(&s.to_string_lossy()),
                        TextDrawAdjusted::Spacing(gap) => {
                            if gap < -WORD_GAP {
                                push_word_gap(&mut text);
                            }
                        }
                    }
                }
            }
            Op::MoveTextPosition { translation } => {
                if translation.y.abs() > 0.1 {
                    push_line_break(&mut text);
                } else if translation.x > 0.0 {
                    push_word_gap(&mut text);
                }
            }
            _ => {}
        }
    }
    Ok(text)
}

fn extract_with_pdftotext(path: &Path) -> Result<Vec<String>> {
    let output = Command::new("pdftotext")
        .arg("-layout")
        .arg("-enc")
        .arg("UTF-8")
        .arg(path)
        .arg("-")
        .output()
        .with_context(|| "Failed to execute pdftotext. Is poppler-utils installed?")?;

    if !output.status.success() {
        return Err(anyhow!(
            "pdftotext failed with status: {}\nError: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let text = String::from_utf8(output.stdout).with_context(|| "pdftotext output not valid UTF-8")?;
    Ok(split_form_feeds(&text))
}

/// pdftotext ends every page, including the last, with a form feed.
fn split_form_feeds(text: &str) -> Vec<String> {
    let mut pages: Vec<String> = text.split('\x0c').map(str::to_string).collect();
    if pages.last().is_some_and(|p| p.is_empty()) {
        pages.pop();
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_form_feeds() {
        assert_eq!(split_form_feeds("one\x0ctwo\x0c"), vec!["one", "two"]);
        assert_eq!(split_form_feeds("one\x0c\x0cthree\x0c"), vec!["one", "", "three"]);
        assert_eq!(split_form_feeds("no trailing feed"), vec!["no trailing feed"]);
        assert!(split_form_feeds("").is_empty());
    }

    #[test]
    fn test_line_and_word_breaks() {
        let mut text = String::new();
        push_line_break(&mut text);
        push_word_gap(&mut text);
        assert!(text.is_empty());

        text.push_str("HOTELS");
        push_line_break(&mut text);
        push_line_break(&mut text);
        text.push_str("cheap");
        push_word_gap(&mut text);
        push_word_gap(&mut text);
        text.push_str("rooms");
        assert_eq!(text, "HOTELS\ncheap rooms");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let missing = Path::new("definitely/not/here.pdf");
        assert!(PdfTextExtractor::without_fallback().extract_pages(missing).is_err());
        assert!(PdfTextExtractor::new().extract_pages(missing).is_err());
    }

    #[test]
    fn test_garbage_file_is_an_error_without_fallback() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf")?;
        assert!(PdfTextExtractor::without_fallback().extract_pages(&path).is_err());
        Ok(())
    }
}
