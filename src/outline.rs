//! Outline extraction pipeline
//!
//! Composes the stages in a fixed order:
//! filter -> normalize -> thresholds -> level map -> builder.
//! Every stage is total; an empty or text-free document yields an empty
//! title and outline.

use crate::builder::build_outline;
use crate::extractor::{Page, Span};
use crate::filter::{bold_candidates, content_spans, is_noise, DEFAULT_MARGIN_RATIO};
use crate::levels::{map_sizes_to_levels, HeadingLevel};
use crate::normalize::{normalize, DEFAULT_BOLD_BONUS};
use crate::sections::attach_section_text;
use crate::thresholds::infer_thresholds;
use crate::OutlineError;
use serde::{Deserialize, Serialize};

/// Options for outline extraction
#[derive(Debug, Clone)]
pub struct OutlineConfig {
    /// Size bonus given to bold spans
    pub bold_bonus: f32,
    /// Header/footer band as a fraction of page height
    pub margin_ratio: f32,
    /// Maximum vertical step between merged heading fragments
    pub merge_max_dy: f32,
    /// Maximum horizontal offset of a fragment from the heading's start
    pub merge_max_dx: f32,
    /// Attach the body text under each heading
    pub include_text: bool,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            bold_bonus: DEFAULT_BOLD_BONUS,
            margin_ratio: DEFAULT_MARGIN_RATIO,
            merge_max_dy: 10.0,
            merge_max_dx: 5.0,
            include_text: false,
        }
    }
}

/// One heading of the outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    pub page: u32,
    /// Body text under the heading, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
}

/// Title and headings of a document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutline {
    pub title: String,
    pub outline: Vec<OutlineEntry>,
}

impl DocumentOutline {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.outline.is_empty()
    }

    /// Render as an indented tree, one heading per line
    pub fn to_tree(&self) -> String {
        let mut output = format!("Title: {}\n", self.title);
        for (i, entry) in self.outline.iter().enumerate() {
            let indent = "  ".repeat(entry.level.depth() - 1);
            output.push_str(&format!(
                "{:2}. {}{}: {} (Page {})\n",
                i + 1,
                indent,
                entry.level,
                entry.text,
                entry.page
            ));
        }
        output
    }
}

/// Infer the title and outline of a document from its pages
pub fn extract(pages: &[Page], config: &OutlineConfig) -> DocumentOutline {
    let content = content_spans(pages, config.margin_ratio);
    outline_from_content(&content, config)
}

/// Infer the title and outline from spans already cleared of headers and footers
pub fn extract_from_spans(spans: &[Span], config: &OutlineConfig) -> DocumentOutline {
    let content: Vec<Span> = spans.iter().filter(|s| !is_noise(s)).cloned().collect();
    outline_from_content(&content, config)
}

fn outline_from_content(content: &[Span], config: &OutlineConfig) -> DocumentOutline {
    let candidates = bold_candidates(content);
    let adjusted = normalize(candidates, config.bold_bonus);
    let thresholds = infer_thresholds(&adjusted);
    let levels = map_sizes_to_levels(&adjusted);

    log::debug!(
        "{} content spans, {} candidates, {} size tiers, thresholds {:?}",
        content.len(),
        adjusted.len(),
        levels.len(),
        thresholds
    );

    let mut built = build_outline(&adjusted, &levels, &thresholds, config);
    if config.include_text {
        attach_section_text(content, &mut built.headings);
    }

    DocumentOutline {
        title: built.title,
        outline: built.headings.into_iter().map(|h| h.entry).collect(),
    }
}

/// Serialize an outline as pretty JSON with 4-space indentation
pub fn to_json(outline: &DocumentOutline) -> Result<String, OutlineError> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    outline.serialize(&mut serializer)?;
    Ok(String::from_utf8(buffer)?)
}
