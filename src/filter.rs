//! Noise and margin filtering of raw spans
//!
//! Drops decorative runs (rules, dot leaders, near-empty text) and spans
//! in the header/footer bands, then keeps only bold spans as heading
//! candidates.

use crate::extractor::{Page, Span};
use once_cell::sync::Lazy;
use regex::Regex;

/// Fraction of the page height treated as header/footer at each edge
pub const DEFAULT_MARGIN_RATIO: f32 = 0.05;

/// Runs of leader/rule characters
static LEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[.\-_\s]{5,}$").unwrap());

/// Check if text is filler rather than content
///
/// Empty or whitespace-only text is always decorative.
pub fn is_decorative(text: &str) -> bool {
    let trimmed = text.trim();

    if LEADER_RE.is_match(trimmed) {
        return true;
    }

    let mut visible = trimmed.chars().filter(|c| !c.is_whitespace());
    if let Some(first) = visible.next() {
        if visible.all(|c| c == first) {
            return true;
        }
    }

    if trimmed.chars().count() < 3 {
        return true;
    }

    text.chars().filter(|c| c.is_alphabetic()).count() < 3
}

/// Check if a top-edge y position falls in the header or footer band
pub fn in_page_margin(y: f32, page_height: f32, margin_ratio: f32) -> bool {
    y < margin_ratio * page_height || y > (1.0 - margin_ratio) * page_height
}

/// Check if a span carries no usable text
pub fn is_noise(span: &Span) -> bool {
    span.text.trim().is_empty() || is_decorative(&span.text)
}

/// Spans that survive noise and margin filtering, bold or not
///
/// Page order and in-page order are preserved.
pub fn content_spans(pages: &[Page], margin_ratio: f32) -> Vec<Span> {
    pages
        .iter()
        .flat_map(|page| {
            page.spans.iter().filter(move |span| {
                !is_noise(span) && !in_page_margin(span.y, page.height, margin_ratio)
            })
        })
        .cloned()
        .collect()
}

/// Bold spans among the content spans
pub fn bold_candidates(content: &[Span]) -> Vec<&Span> {
    content.iter().filter(|span| span.is_bold).collect()
}

/// Heading candidates: content spans that are bold
pub fn filter_spans(pages: &[Page], margin_ratio: f32) -> Vec<Span> {
    content_spans(pages, margin_ratio)
        .into_iter()
        .filter(|span| span.is_bold)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: u32, spans: Vec<Span>) -> Page {
        Page {
            number,
            height: 800.0,
            spans,
        }
    }

    #[test]
    fn test_is_decorative_known_cases() {
        assert!(!is_decorative("Hello World"));
        assert!(is_decorative("..."));
        assert!(is_decorative("---"));
        assert!(is_decorative("A"));
        assert!(is_decorative(""));
        assert!(is_decorative("   "));
    }

    #[test]
    fn test_is_decorative_leaders_and_repeats() {
        assert!(is_decorative("....  ....."));
        assert!(is_decorative("_____"));
        assert!(is_decorative("aaaa"));
        assert!(is_decorative("a a a"));
        assert!(is_decorative("1.2.3"));
        assert!(is_decorative("Q4 2"));
        assert!(!is_decorative("Abc"));
        assert!(!is_decorative("1. Introduction"));
    }

    #[test]
    fn test_is_decorative_is_stable() {
        for text in ["Hello World", "...", "x y", "Résumé", "  --  "] {
            assert_eq!(is_decorative(text), is_decorative(text));
        }
    }

    #[test]
    fn test_in_page_margin() {
        assert!(in_page_margin(10.0, 800.0, 0.05));
        assert!(in_page_margin(780.0, 800.0, 0.05));
        assert!(!in_page_margin(45.0, 800.0, 0.05));
        assert!(!in_page_margin(750.0, 800.0, 0.05));
        assert!(!in_page_margin(400.0, 800.0, 0.05));
    }

    #[test]
    fn test_filter_keeps_bold_body_spans_in_order() {
        let pages = vec![
            page(
                1,
                vec![
                    Span::new("Running Header", 9.0, "Helvetica-Bold", 1, 72.0, 20.0),
                    Span::new("Introduction", 16.0, "Helvetica-Bold", 1, 72.0, 100.0),
                    Span::new("Plain body text", 11.0, "Helvetica", 1, 72.0, 130.0),
                    Span::new("........", 11.0, "Helvetica-Bold", 1, 72.0, 150.0),
                    Span::new("Page Footer", 9.0, "Helvetica-Bold", 1, 72.0, 790.0),
                ],
            ),
            page(
                2,
                vec![Span::new("Background", 14.0, "Helvetica-Bold", 2, 72.0, 100.0)],
            ),
        ];

        let content = content_spans(&pages, DEFAULT_MARGIN_RATIO);
        assert_eq!(content.len(), 3);

        let kept = filter_spans(&pages, DEFAULT_MARGIN_RATIO);
        let texts: Vec<&str> = kept.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Introduction", "Background"]);
        assert_eq!(bold_candidates(&content).len(), 2);
    }
}
