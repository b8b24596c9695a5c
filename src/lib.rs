pub mod config;
pub mod extract;
pub mod keywords;
pub mod models;
pub mod pdf_processor;
pub mod scoring;
pub mod sections;
pub mod utils;

pub use config::Config;
pub use extract::{PdfTextExtractor, TextExtractor};
pub use models::OutputJson;
pub use pdf_processor::PdfProcessor;
