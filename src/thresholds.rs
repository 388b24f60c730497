//! Per-document geometric thresholds
//!
//! Left-margin baseline, indentation step and vertical spacing are all
//! inferred from the candidate spans themselves.

use crate::normalize::AdjustedSpan;

/// Indentation step when no span sits right of the baseline
pub const DEFAULT_INDENT_DELTA: f32 = 20.0;

/// Vertical merge tolerance when no same-size neighbours exist
pub const DEFAULT_MERGE_TOLERANCE: f32 = 15.0;

/// Thresholds used for a document without any candidate spans
pub const FALLBACK_THRESHOLDS: Thresholds = Thresholds {
    base_x: 50.0,
    indent_delta: DEFAULT_INDENT_DELTA,
    merge_tolerance: 10.0,
};

/// Geometric constants of one document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Leftmost x among candidate spans
    pub base_x: f32,
    /// Median positive offset from `base_x`
    pub indent_delta: f32,
    /// Median vertical gap between neighbouring same-size spans.
    /// Not consulted by the outline builder.
    pub merge_tolerance: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        FALLBACK_THRESHOLDS
    }
}

/// Median of a list of values, averaging the middle pair for even counts
pub fn median(mut values: Vec<f32>) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Infer thresholds from spans in reading order
pub fn infer_thresholds(spans: &[AdjustedSpan<'_>]) -> Thresholds {
    if spans.is_empty() {
        return FALLBACK_THRESHOLDS;
    }

    let base_x = spans.iter().map(|s| s.span.x).fold(f32::INFINITY, f32::min);

    let offsets: Vec<f32> = spans
        .iter()
        .map(|s| s.span.x - base_x)
        .filter(|offset| *offset > 0.0)
        .collect();
    let indent_delta = median(offsets).unwrap_or(DEFAULT_INDENT_DELTA);

    let gaps: Vec<f32> = spans
        .windows(2)
        .filter(|pair| {
            pair[0].span.page == pair[1].span.page && pair[0].size_key() == pair[1].size_key()
        })
        .map(|pair| (pair[1].span.y - pair[0].span.y).abs())
        .collect();
    let merge_tolerance = median(gaps).unwrap_or(DEFAULT_MERGE_TOLERANCE);

    Thresholds {
        base_x,
        indent_delta,
        merge_tolerance,
    }
}
