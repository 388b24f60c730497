//! Heading and title inference for PDFs
//!
//! PDFs rarely carry their structure explicitly. This crate infers a title
//! and an H1/H2/H3 outline from the typography of text runs:
//! - Extraction of positioned spans using lopdf
//! - Filtering of decorative and header/footer runs
//! - Per-document ranking of bold font sizes into heading levels
//! - Reassembly of headings split across several runs

pub mod batch;
pub mod builder;
pub mod extractor;
pub mod filter;
pub mod levels;
pub mod normalize;
pub mod outline;
pub mod sections;
pub mod thresholds;

pub use batch::{process_directory, process_file, process_files, BatchSummary, FileOutcome};
pub use extractor::{extract_pages, extract_pages_mem, is_bold_font, Page, Span};
pub use filter::{filter_spans, is_decorative};
pub use levels::{map_sizes_to_levels, HeadingLevel, LevelMap};
pub use normalize::{normalize, AdjustedSpan};
pub use outline::{
    extract, extract_from_spans, to_json, DocumentOutline, OutlineConfig, OutlineEntry,
};
pub use thresholds::{infer_thresholds, Thresholds};

use std::path::{Path, PathBuf};

/// Extract the outline of a PDF file
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<DocumentOutline, OutlineError> {
    extract_outline_with_config(path, &OutlineConfig::default())
}

/// Extract the outline of a PDF file with custom configuration
pub fn extract_outline_with_config<P: AsRef<Path>>(
    path: P,
    config: &OutlineConfig,
) -> Result<DocumentOutline, OutlineError> {
    let pages = extract_pages(path)?;
    Ok(extract(&pages, config))
}

/// Extract the outline of a PDF held in memory
pub fn extract_outline_mem(
    buffer: &[u8],
    config: &OutlineConfig,
) -> Result<DocumentOutline, OutlineError> {
    let pages = extract_pages_mem(buffer)?;
    Ok(extract(&pages, config))
}

#[derive(Debug, thiserror::Error)]
pub enum OutlineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF parsing error: {0}")]
    Parse(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Output encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("File does not exist: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Not a PDF file: {}", .0.display())]
    NotPdf(PathBuf),
}

impl From<lopdf::Error> for OutlineError {
    fn from(e: lopdf::Error) -> Self {
        OutlineError::Parse(e.to_string())
    }
}
