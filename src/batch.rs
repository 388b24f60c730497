//! Batch outline extraction over many PDFs
//!
//! Documents share no state, so files are processed in parallel. A failing
//! file is reported in its outcome and never stops the others.

use crate::outline::{to_json, DocumentOutline, OutlineConfig};
use crate::{extract_outline_with_config, OutlineError};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Result of processing one file
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    /// Where the JSON was (or would have been) written
    pub output: PathBuf,
    pub result: Result<DocumentOutline, OutlineError>,
    pub processing_time_ms: u64,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a batch run
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<FileOutcome>,
    pub total_time_ms: u64,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Check the extension is `.pdf`, ignoring case
pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// JSON output path for a PDF: same stem, in `output_dir` or next to the input
pub fn output_path_for(pdf: &Path, output_dir: Option<&Path>) -> PathBuf {
    let file_name = Path::new(pdf.file_name().unwrap_or(pdf.as_os_str())).with_extension("json");
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => pdf.with_extension("json"),
    }
}

/// Write an outline as JSON
pub fn write_outline(outline: &DocumentOutline, path: &Path) -> Result<(), OutlineError> {
    fs::write(path, to_json(outline)?)?;
    Ok(())
}

fn extract_checked(input: &Path, config: &OutlineConfig) -> Result<DocumentOutline, OutlineError> {
    if !input.exists() {
        return Err(OutlineError::NotFound(input.to_path_buf()));
    }
    if !is_pdf_path(input) {
        return Err(OutlineError::NotPdf(input.to_path_buf()));
    }
    extract_outline_with_config(input, config)
}

/// Extract one PDF and write its JSON outline
pub fn process_file(
    input: &Path,
    output_dir: Option<&Path>,
    config: &OutlineConfig,
) -> FileOutcome {
    let start = Instant::now();
    let output = output_path_for(input, output_dir);

    log::info!("Processing: {}", input.display());
    let result = extract_checked(input, config).and_then(|outline| {
        write_outline(&outline, &output)?;
        Ok(outline)
    });

    match &result {
        Ok(outline) => log::info!(
            "Saved to: {} ({} headings)",
            output.display(),
            outline.outline.len()
        ),
        Err(e) => log::error!("Failed: {} - {}", input.display(), e),
    }

    FileOutcome {
        input: input.to_path_buf(),
        output,
        result,
        processing_time_ms: start.elapsed().as_millis() as u64,
    }
}

/// Process files in parallel, keeping input order in the outcomes
///
/// `output_dir` is created when missing.
pub fn process_files(
    inputs: &[PathBuf],
    output_dir: Option<&Path>,
    config: &OutlineConfig,
) -> BatchSummary {
    let start = Instant::now();
    if let Some(dir) = output_dir {
        // A failure here resurfaces as an Io error on each file's write
        if let Err(e) = fs::create_dir_all(dir) {
            log::error!("Cannot create {}: {}", dir.display(), e);
        }
    }
    let outcomes: Vec<FileOutcome> = inputs
        .par_iter()
        .map(|input| process_file(input, output_dir, config))
        .collect();

    BatchSummary {
        outcomes,
        total_time_ms: start.elapsed().as_millis() as u64,
    }
}

/// PDF files directly inside a directory, sorted by name
pub fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>, OutlineError> {
    let mut pdfs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_pdf_path(&path) {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}

/// Process every PDF in `input_dir`, writing outlines into `output_dir`
pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    config: &OutlineConfig,
) -> Result<BatchSummary, OutlineError> {
    fs::create_dir_all(output_dir)?;
    let inputs = list_pdfs(input_dir)?;
    log::info!("{} PDF files in {}", inputs.len(), input_dir.display());

    let summary = process_files(&inputs, Some(output_dir), config);
    log::info!(
        "Batch complete: {}/{} files processed in {}ms",
        summary.succeeded(),
        summary.outcomes.len(),
        summary.total_time_ms
    );
    Ok(summary)
}
