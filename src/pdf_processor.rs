use crate::config::Config;
use crate::extract::{PdfTextExtractor, TextExtractor};
use crate::keywords::extract_keywords;
use crate::models::{Document, ExtractedSection, InputJson, Metadata, OutputJson, Section, SubsectionAnalysis};
use crate::scoring::score_section;
use crate::sections::split_into_sections;
use crate::utils::{preview, truncate_chars};
use anyhow::Result;
use std::path::Path;
use tracing::{debug, info, warn};

/// Sections kept per document.
pub const TOP_SECTIONS: usize = 3;
/// Characters of section text quoted in the subsection analysis.
pub const EXCERPT_CHARS: usize = 500;
pub const EXCERPT_MARKER: char = '…';

pub struct PdfProcessor<E = PdfTextExtractor> {
    extractor: E,
}

impl PdfProcessor<PdfTextExtractor> {
    pub fn process_pdf_collection(config: &Config) -> Result<()> {
        PdfProcessor::new(PdfTextExtractor::new()).process_collection(config)
    }
}

impl<E: TextExtractor> PdfProcessor<E> {
    pub fn new(extractor: E) -> Self {
        Self { extractor }
    }

    /// Loads the request, analyzes every listed PDF and writes the result.
    pub fn process_collection(&self, config: &Config) -> Result<()> {
        let input = config.load_input()?;
        let output = self.analyze(&input, &config.pdf_dir);
        config.write_output(&output)?;
        info!(
            path = %config.output_path.display(),
            sections = output.extracted_sections.len(),
            "wrote output"
        );
        Ok(())
    }

    /// Ranks each document's sections independently and concatenates the
    /// per-document selections in input order.
    pub fn analyze(&self, input: &InputJson, pdf_dir: &Path) -> OutputJson {
        let keywords = extract_keywords(&input.persona.role, &input.job_to_be_done.task);
        info!(
            documents = input.documents.len(),
            keywords = keywords.len(),
            persona = %input.persona.role,
            "starting analysis"
        );

        let mut extracted_sections = Vec::new();
        let mut subsection_analysis = Vec::new();

        for doc in &input.documents {
            let (pages, sections) = self.collect_sections(doc, pdf_dir, &keywords);
            let found = sections.len();
            let top = select_top(sections, TOP_SECTIONS);
            info!(document = %doc.filename, pages, found, selected = top.len(), "ranked sections");

            for (rank, section) in top.into_iter().enumerate() {
                extracted_sections.push(ExtractedSection {
                    document: section.document.clone(),
                    section_title: section.section_title.clone(),
                    importance_rank: (rank + 1) as u32,
                    page_number: section.page_number,
                });
                subsection_analysis.push(SubsectionAnalysis {
                    document: section.document,
                    refined_text: excerpt(&section.text),
                    page_number: section.page_number,
                });
            }
        }

        OutputJson {
            metadata: Metadata {
                input_documents: input.documents.iter().map(|d| d.filename.clone()).collect(),
                persona: input.persona.role.clone(),
                job_to_be_done: input.job_to_be_done.task.clone(),
            },
            extracted_sections,
            subsection_analysis,
        }
    }

    /// Page count and every non-empty, scored section of one document in
    /// discovery order. A document whose text cannot be extracted has no pages.
    pub fn collect_sections(&self, doc: &Document, pdf_dir: &Path, keywords: &[String]) -> (usize, Vec<Section>) {
        let pdf_path = pdf_dir.join(&doc.filename);
        let pages = match self.extractor.extract_pages(&pdf_path) {
            Ok(pages) => pages,
            Err(e) => {
                warn!(document = %doc.filename, "skipping document, text extraction failed: {:#}", e);
                return (0, Vec::new());
            }
        };

        let mut sections = Vec::new();
        for (index, page) in pages.iter().enumerate() {
            let page_number = (index + 1) as u32;
            let found = split_into_sections(page);
            debug!(document = %doc.filename, page_number, sections = found.len(), "split page");
            for page_section in found {
                let score = score_section(&page_section.text, keywords);
                debug!(
                    title = %page_section.section_title,
                    score,
                    preview = %preview(&page_section.text, 80),
                    "scored section"
                );
                sections.push(Section::new(&doc.filename, page_number, page_section, score));
            }
        }
        (pages.len(), sections)
    }
}

/// Highest scores first; equal scores keep discovery order.
pub fn select_top(mut sections: Vec<Section>, limit: usize) -> Vec<Section> {
    sections.sort_by(|a, b| b.score.cmp(&a.score));
    sections.truncate(limit);
    sections
}

/// Leading slice of the section text, always closed with the excerpt marker.
pub fn excerpt(text: &str) -> String {
    let mut refined = truncate_chars(text, EXCERPT_CHARS).to_string();
    refined.push(EXCERPT_MARKER);
    refined
}
