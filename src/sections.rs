//! Body text under each heading
//!
//! Headings are located in the full content stream by identity of their
//! first and last fragments; everything between one heading's last
//! fragment and the next heading's first fragment is that heading's text.

use crate::builder::Heading;
use crate::extractor::Span;
use std::ptr;

/// Fill `text_content` of every heading from the content spans
///
/// `content` must be the stream the headings' fragments borrow from.
/// Text before the first heading is dropped.
pub fn attach_section_text(content: &[Span], headings: &mut [Heading<'_>]) {
    let mut sections: Vec<Vec<&str>> = vec![Vec::new(); headings.len()];
    let mut next = 0;
    let mut current: Option<usize> = None;
    let mut inside_heading = false;

    for span in content {
        if let Some(heading) = headings.get(next) {
            if ptr::eq(span, heading.first) {
                current = Some(next);
                next += 1;
                inside_heading = !ptr::eq(span, heading.last);
                continue;
            }
        }

        if inside_heading {
            if let Some(idx) = current {
                if ptr::eq(span, headings[idx].last) {
                    inside_heading = false;
                }
            }
            continue;
        }

        if let Some(idx) = current {
            sections[idx].push(span.text.as_str());
        }
    }

    for (heading, parts) in headings.iter_mut().zip(sections) {
        heading.entry.text_content = Some(parts.join(" "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_outline;
    use crate::filter::bold_candidates;
    use crate::levels::map_sizes_to_levels;
    use crate::normalize::{normalize, DEFAULT_BOLD_BONUS};
    use crate::outline::OutlineConfig;
    use crate::thresholds::infer_thresholds;

    #[test]
    fn test_text_between_headings() {
        let content = vec![
            Span::new("Preamble text", 11.0, "Helvetica", 1, 72.0, 60.0),
            Span::new("Introduction", 16.0, "Helvetica-Bold", 1, 72.0, 100.0),
            Span::new("First paragraph.", 11.0, "Helvetica", 1, 72.0, 130.0),
            Span::new("Second paragraph.", 11.0, "Helvetica", 1, 72.0, 150.0),
            Span::new("Related", 16.0, "Helvetica-Bold", 2, 72.0, 100.0),
            Span::new("Work", 16.0, "Helvetica-Bold", 2, 72.0, 105.0),
            Span::new("Prior results.", 11.0, "Helvetica", 2, 72.0, 130.0),
        ];
        let candidates = bold_candidates(&content);
        let adjusted = normalize(candidates, DEFAULT_BOLD_BONUS);
        let levels = map_sizes_to_levels(&adjusted);
        let thresholds = infer_thresholds(&adjusted);
        let mut built = build_outline(&adjusted, &levels, &thresholds, &OutlineConfig::default());

        attach_section_text(&content, &mut built.headings);

        assert_eq!(built.headings.len(), 2);
        assert_eq!(built.headings[1].entry.text, "Related Work");
        assert_eq!(
            built.headings[0].entry.text_content.as_deref(),
            Some("First paragraph. Second paragraph.")
        );
        assert_eq!(
            built.headings[1].entry.text_content.as_deref(),
            Some("Prior results.")
        );
    }

    #[test]
    fn test_no_headings_is_noop() {
        let content = vec![Span::new("Body only", 11.0, "Helvetica", 1, 72.0, 100.0)];
        attach_section_text(&content, &mut []);
    }
}
