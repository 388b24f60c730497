//! Span extraction from PDF using lopdf
//!
//! This module walks page content streams and yields one [`Span`] per
//! text-showing operator, positioned in top-left page space.

use crate::OutlineError;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::BTreeMap;
use std::path::Path;

/// Page height used when a page carries no MediaBox (US Letter)
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// A run of same-styled text with its position
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    /// The text content, trimmed
    pub text: String,
    /// Nominal font size in points
    pub size: f32,
    /// Font name (BaseFont without subset tag)
    pub font: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Whether the font name carries a bold marker
    pub is_bold: bool,
    /// Left edge in page space
    pub x: f32,
    /// Top edge in page space (origin at top-left, growing downward)
    pub y: f32,
}

impl Span {
    /// Create a span, deriving boldness from the font name
    pub fn new(text: &str, size: f32, font: &str, page: u32, x: f32, y: f32) -> Self {
        Self {
            text: text.trim().to_string(),
            size,
            font: font.to_string(),
            page,
            is_bold: is_bold_font(font),
            x,
            y,
        }
    }
}

/// All spans of one page, in content-stream order
#[derive(Debug, Clone)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,
    /// Page height in points
    pub height: f32,
    pub spans: Vec<Span>,
}

/// Check if a font name marks a bold face
pub fn is_bold_font(font: &str) -> bool {
    font.contains("Bold")
}

/// Extract spans from PDF file
pub fn extract_pages<P: AsRef<Path>>(path: P) -> Result<Vec<Page>, OutlineError> {
    let doc = Document::load(path)?;
    extract_pages_from_doc(&doc)
}

/// Extract spans from memory buffer
pub fn extract_pages_mem(buffer: &[u8]) -> Result<Vec<Page>, OutlineError> {
    let doc = Document::load_mem(buffer)?;
    extract_pages_from_doc(&doc)
}

fn extract_pages_from_doc(doc: &Document) -> Result<Vec<Page>, OutlineError> {
    let pages = doc.get_pages();
    let mut result = Vec::with_capacity(pages.len());

    for (&page_num, &page_id) in pages.iter() {
        let (height, top) = page_geometry(doc, page_id);
        let spans = extract_page_spans(doc, page_id, page_num, top)?;
        log::debug!("page {}: {} spans, height {:.1}", page_num, spans.len(), height);
        result.push(Page {
            number: page_num,
            height,
            spans,
        });
    }

    Ok(result)
}

/// Multiply two 2D transformation matrices
/// Matrix format: [a, b, c, d, e, f] representing:
/// | a  b  0 |
/// | c  d  0 |
/// | e  f  1 |
fn multiply_matrices(m1: &[f32; 6], m2: &[f32; 6]) -> [f32; 6] {
    [
        m1[0] * m2[0] + m1[1] * m2[2],
        m1[0] * m2[1] + m1[1] * m2[3],
        m1[2] * m2[0] + m1[3] * m2[2],
        m1[2] * m2[1] + m1[3] * m2[3],
        m1[4] * m2[0] + m1[5] * m2[2] + m2[4],
        m1[4] * m2[1] + m1[5] * m2[3] + m2[5],
    ]
}

/// Bounds of the page's MediaBox as (bottom, top), following Parent links
fn media_box_bounds(doc: &Document, page_id: ObjectId) -> Option<(f32, f32)> {
    let mut dict = doc.get_dictionary(page_id).ok()?;

    // Parent chains are shallow; the cap guards against reference cycles
    for _ in 0..32 {
        if let Ok(media_box) = dict.get(b"MediaBox") {
            let media_box = match media_box {
                Object::Reference(id) => doc.get_object(*id).ok()?,
                other => other,
            };
            let values: Vec<f32> = media_box
                .as_array()
                .ok()?
                .iter()
                .filter_map(get_number)
                .collect();
            if values.len() == 4 {
                let bottom = values[1].min(values[3]);
                let top = values[1].max(values[3]);
                return Some((bottom, top));
            }
            return None;
        }
        let parent = dict.get(b"Parent").ok()?.as_reference().ok()?;
        dict = doc.get_dictionary(parent).ok()?;
    }

    None
}

/// Height and top edge of a page in points
fn page_geometry(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let bounds = media_box_bounds(doc, page_id);
    let height = bounds
        .map(|(bottom, top)| top - bottom)
        .filter(|h| *h > 0.0)
        .unwrap_or(DEFAULT_PAGE_HEIGHT);
    let top = bounds.map(|(_, top)| top).unwrap_or(height);
    (height, top)
}

/// Strip a subset tag such as `ABCDEF+` from a BaseFont name
fn strip_subset_tag(name: &str) -> &str {
    match name.split_once('+') {
        Some((tag, rest)) if tag.len() == 6 && tag.chars().all(|c| c.is_ascii_uppercase()) => {
            rest
        }
        _ => name,
    }
}

/// Resolve the display name of a font resource
fn font_display_name(fonts: &BTreeMap<Vec<u8>, &Dictionary>, resource: &str) -> String {
    fonts
        .get(resource.as_bytes())
        .and_then(|dict| dict.get(b"BaseFont").ok())
        .and_then(|obj| obj.as_name().ok())
        .map(|name| strip_subset_tag(&String::from_utf8_lossy(name)).to_string())
        .unwrap_or_else(|| resource.to_string())
}

/// Text state while walking a content stream
struct TextState {
    ctm: [f32; 6],
    ctm_stack: Vec<[f32; 6]>,
    font_resource: String,
    font_name: String,
    font_size: f32,
    leading: Option<f32>,
    text_matrix: [f32; 6],
    line_matrix: [f32; 6],
    in_text_block: bool,
}

impl TextState {
    fn new() -> Self {
        Self {
            ctm: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            ctm_stack: Vec::new(),
            font_resource: String::new(),
            font_name: String::new(),
            font_size: 12.0,
            leading: None,
            text_matrix: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            line_matrix: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            in_text_block: false,
        }
    }

    /// Move the line start by an offset given in text space
    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = multiply_matrices(&[1.0, 0.0, 0.0, 1.0, tx, ty], &self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        let leading = self.leading.unwrap_or(self.font_size * 1.2);
        self.move_line(0.0, -leading);
    }
}

/// Extract spans from a single page
fn extract_page_spans(
    doc: &Document,
    page_id: ObjectId,
    page_num: u32,
    page_top: f32,
) -> Result<Vec<Span>, OutlineError> {
    use lopdf::content::Content;

    let mut spans = Vec::new();

    let fonts = doc.get_page_fonts(page_id).unwrap_or_default();

    let content_data = doc
        .get_page_content(page_id)
        .map_err(|e| OutlineError::Parse(e.to_string()))?;

    let content = Content::decode(&content_data).map_err(|e| OutlineError::Parse(e.to_string()))?;

    let mut state = TextState::new();

    for op in &content.operations {
        let shown: Option<String> = match op.operator.as_str() {
            "q" => {
                state.ctm_stack.push(state.ctm);
                None
            }
            "Q" => {
                if let Some(saved) = state.ctm_stack.pop() {
                    state.ctm = saved;
                }
                None
            }
            "cm" => {
                if op.operands.len() >= 6 {
                    let new_matrix = [
                        get_number(&op.operands[0]).unwrap_or(1.0),
                        get_number(&op.operands[1]).unwrap_or(0.0),
                        get_number(&op.operands[2]).unwrap_or(0.0),
                        get_number(&op.operands[3]).unwrap_or(1.0),
                        get_number(&op.operands[4]).unwrap_or(0.0),
                        get_number(&op.operands[5]).unwrap_or(0.0),
                    ];
                    state.ctm = multiply_matrices(&new_matrix, &state.ctm);
                }
                None
            }
            "BT" => {
                state.in_text_block = true;
                state.text_matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
                state.line_matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
                None
            }
            "ET" => {
                state.in_text_block = false;
                None
            }
            "Tf" => {
                if op.operands.len() >= 2 {
                    if let Ok(name) = op.operands[0].as_name() {
                        state.font_resource = String::from_utf8_lossy(name).to_string();
                        state.font_name = font_display_name(&fonts, &state.font_resource);
                    }
                    if let Some(size) = get_number(&op.operands[1]) {
                        state.font_size = size;
                    }
                }
                None
            }
            "TL" => {
                state.leading = op.operands.first().and_then(get_number);
                None
            }
            "Td" | "TD" => {
                if op.operands.len() >= 2 {
                    let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                    let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                    if op.operator == "TD" {
                        state.leading = Some(-ty);
                    }
                    state.move_line(tx, ty);
                }
                None
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    for (i, operand) in op.operands.iter().take(6).enumerate() {
                        state.text_matrix[i] = get_number(operand)
                            .unwrap_or(if i == 0 || i == 3 { 1.0 } else { 0.0 });
                    }
                    state.line_matrix = state.text_matrix;
                }
                None
            }
            "T*" => {
                state.next_line();
                None
            }
            "Tj" if state.in_text_block => op
                .operands
                .first()
                .and_then(|o| extract_text_from_operand(o, doc, &fonts, &state.font_resource)),
            "TJ" if state.in_text_block => op.operands.first().and_then(|o| o.as_array().ok()).map(
                |array| {
                    array
                        .iter()
                        .filter_map(|item| {
                            extract_text_from_operand(item, doc, &fonts, &state.font_resource)
                        })
                        .collect::<String>()
                },
            ),
            "'" if state.in_text_block => {
                state.next_line();
                op.operands
                    .first()
                    .and_then(|o| extract_text_from_operand(o, doc, &fonts, &state.font_resource))
            }
            "\"" if state.in_text_block => {
                state.next_line();
                op.operands
                    .get(2)
                    .and_then(|o| extract_text_from_operand(o, doc, &fonts, &state.font_resource))
            }
            _ => None,
        };

        let Some(text) = shown else { continue };
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        let rendered_size = effective_font_size(state.font_size, &state.text_matrix);
        let combined = multiply_matrices(&state.text_matrix, &state.ctm);
        let (x, baseline) = (combined[4], combined[5]);
        let font = if state.font_name.is_empty() {
            state.font_resource.clone()
        } else {
            state.font_name.clone()
        };

        spans.push(Span {
            text: text.to_string(),
            size: (rendered_size * 10.0).round() / 10.0,
            is_bold: is_bold_font(&font),
            font,
            page: page_num,
            x,
            y: page_top - (baseline + rendered_size),
        });
    }

    Ok(spans)
}

/// Helper to get f32 from Object
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Compute effective font size from base size and text matrix
fn effective_font_size(base_size: f32, text_matrix: &[f32; 6]) -> f32 {
    let scale_x = (text_matrix[0].powi(2) + text_matrix[1].powi(2)).sqrt();
    let scale_y = (text_matrix[2].powi(2) + text_matrix[3].powi(2)).sqrt();
    base_size * scale_x.max(scale_y)
}

/// Extract text from a text operand, handling encoding
fn extract_text_from_operand(
    obj: &Object,
    doc: &Document,
    fonts: &BTreeMap<Vec<u8>, &Dictionary>,
    current_font: &str,
) -> Option<String> {
    let Object::String(bytes, _) = obj else {
        return None;
    };

    if let Some(font_dict) = fonts.get(current_font.as_bytes()) {
        if let Ok(encoding) = font_dict.get_font_encoding(doc) {
            if let Ok(text) = Document::decode_text(&encoding, bytes) {
                return Some(text);
            }
        }
    }

    // Fallback: try UTF-16BE then Latin-1
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect();
        return Some(String::from_utf16_lossy(&utf16));
    }

    Some(bytes.iter().map(|&b| b as char).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_bold_font() {
        assert!(is_bold_font("Helvetica-Bold"));
        assert!(is_bold_font("Arial-BoldMT"));
        assert!(is_bold_font("TimesNewRoman,BoldItalic"));
        assert!(!is_bold_font("Helvetica"));
        assert!(!is_bold_font("Helvetica-Oblique"));
    }

    #[test]
    fn test_strip_subset_tag() {
        assert_eq!(strip_subset_tag("ABCDEF+Arial-BoldMT"), "Arial-BoldMT");
        assert_eq!(strip_subset_tag("Arial-BoldMT"), "Arial-BoldMT");
        assert_eq!(strip_subset_tag("abc+Font"), "abc+Font");
    }

    #[test]
    fn test_span_new_trims_and_detects_bold() {
        let span = Span::new("  Introduction ", 14.0, "Helvetica-Bold", 1, 72.0, 100.0);
        assert_eq!(span.text, "Introduction");
        assert!(span.is_bold);
    }

    #[test]
    fn test_multiply_identity() {
        let identity = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
        let translate = [1.0, 0.0, 0.0, 1.0, 10.0, 20.0];
        assert_eq!(multiply_matrices(&translate, &identity), translate);
    }

    #[test]
    fn test_move_line_scales_by_line_matrix() {
        let mut state = TextState::new();
        state.line_matrix = [14.0, 0.0, 0.0, 14.0, 72.0, 700.0];
        state.move_line(0.0, -1.5);
        assert_eq!(state.line_matrix[4], 72.0);
        assert!((state.line_matrix[5] - 679.0).abs() < 0.001);
        assert_eq!(state.text_matrix, state.line_matrix);
    }

    #[test]
    fn test_next_line_uses_leading_in_text_space() {
        let mut state = TextState::new();
        state.line_matrix = [2.0, 0.0, 0.0, 2.0, 50.0, 500.0];
        state.leading = Some(10.0);
        state.next_line();
        assert!((state.line_matrix[5] - 480.0).abs() < 0.001);
    }

    #[test]
    fn test_effective_font_size_scaled() {
        let matrix = [2.0, 0.0, 0.0, 2.0, 0.0, 0.0];
        assert!((effective_font_size(12.0, &matrix) - 24.0).abs() < 0.001);
    }
}
