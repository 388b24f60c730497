//! Outline reconstruction from ranked candidate spans
//!
//! Walks the candidates once in reading order. Each span either starts a
//! heading, which greedily absorbs the fragments that follow it, or is
//! skipped. Absorbed fragments are never revisited.

use crate::extractor::Span;
use crate::levels::{HeadingLevel, LevelMap};
use crate::normalize::AdjustedSpan;
use crate::outline::{OutlineConfig, OutlineEntry};
use crate::thresholds::Thresholds;

/// A detected heading with the first and last fragment it was built from
#[derive(Debug, Clone)]
pub struct Heading<'a> {
    pub entry: OutlineEntry,
    pub first: &'a Span,
    pub last: &'a Span,
}

/// Title and headings of one document, in reading order
#[derive(Debug, Clone, Default)]
pub struct BuiltOutline<'a> {
    pub title: String,
    pub headings: Vec<Heading<'a>>,
}

/// Level of a span from its size tier, or from indentation
///
/// Bold text without a size tier that sits at least `indent_delta` right of
/// the leftmost same-size span on its page becomes H2.
fn resolve_level(
    spans: &[AdjustedSpan<'_>],
    current: &AdjustedSpan<'_>,
    levels: &LevelMap,
    thresholds: &Thresholds,
) -> Option<HeadingLevel> {
    if let Some(level) = levels.level_for(current.adjusted_size) {
        return Some(level);
    }
    if !current.span.is_bold {
        return None;
    }

    let key = current.size_key();
    let baseline_x = spans
        .iter()
        .filter(|s| s.span.page == current.span.page && s.size_key() == key)
        .map(|s| s.span.x)
        .fold(current.span.x, f32::min);

    (current.span.x - baseline_x >= thresholds.indent_delta).then_some(HeadingLevel::H2)
}

/// End (exclusive) of the fragment run starting at `start`
///
/// A following span joins while it shares page, adjusted size and font and
/// sits close to the run's anchor. The anchor's y follows each absorbed
/// fragment; its x stays at the first fragment.
fn fragment_run_end(spans: &[AdjustedSpan<'_>], start: usize, config: &OutlineConfig) -> usize {
    let head = &spans[start];
    let anchor_x = head.span.x;
    let mut anchor_y = head.span.y;
    let mut end = start + 1;

    while let Some(next) = spans.get(end) {
        let joins = next.span.page == head.span.page
            && next.size_key() == head.size_key()
            && (next.span.y - anchor_y).abs() < config.merge_max_dy
            && (next.span.x - anchor_x).abs() < config.merge_max_dx
            && next.span.font == head.span.font;
        if !joins {
            break;
        }
        anchor_y = next.span.y;
        end += 1;
    }

    end
}

/// Build the outline and title from normalized candidates
pub fn build_outline<'a>(
    spans: &[AdjustedSpan<'a>],
    levels: &LevelMap,
    thresholds: &Thresholds,
    config: &OutlineConfig,
) -> BuiltOutline<'a> {
    let mut title: Option<String> = None;
    let mut headings = Vec::new();
    let mut cursor = 0;

    while cursor < spans.len() {
        let current = &spans[cursor];
        let Some(level) = resolve_level(spans, current, levels, thresholds) else {
            cursor += 1;
            continue;
        };

        let end = fragment_run_end(spans, cursor, config);
        let text = spans[cursor..end]
            .iter()
            .map(|s| s.span.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        if title.is_none() && current.span.page == 1 && level == HeadingLevel::H1 {
            title = Some(text.clone());
        }

        if end - cursor > 1 {
            log::trace!("merged {} fragments into {:?}", end - cursor, text);
        }

        headings.push(Heading {
            entry: OutlineEntry {
                level,
                text: text.trim().to_string(),
                page: current.span.page,
                text_content: None,
            },
            first: current.span,
            last: spans[end - 1].span,
        });
        cursor = end;
    }

    BuiltOutline {
        title: title.map(|t| t.trim().to_string()).unwrap_or_default(),
        headings,
    }
}
