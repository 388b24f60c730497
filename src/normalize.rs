//! Emphasis-adjusted font sizes
//!
//! Bold runs get a fixed bonus so weight and size rank on one axis.

use crate::extractor::Span;

/// Bonus added to the size of bold spans
pub const DEFAULT_BOLD_BONUS: f32 = 4.0;

/// A span paired with its emphasis-adjusted size
#[derive(Debug, Clone, Copy)]
pub struct AdjustedSpan<'a> {
    pub span: &'a Span,
    /// `size` plus the bold bonus, rounded to 2 decimals
    pub adjusted_size: f32,
}

impl AdjustedSpan<'_> {
    /// Hashable key for the adjusted size
    pub fn size_key(&self) -> i32 {
        size_key(self.adjusted_size)
    }
}

/// Integer key for an adjusted size (hundredths of a point)
///
/// Adjusted sizes are rounded to 2 decimals, so two sizes are equal
/// exactly when their keys are.
pub fn size_key(size: f32) -> i32 {
    (size * 100.0).round() as i32
}

/// Round to 2 decimal places
fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Attach an adjusted size to every span, preserving order
pub fn normalize<'a, I>(spans: I, bold_bonus: f32) -> Vec<AdjustedSpan<'a>>
where
    I: IntoIterator<Item = &'a Span>,
{
    spans
        .into_iter()
        .map(|span| {
            let bonus = if span.is_bold { bold_bonus } else { 0.0 };
            AdjustedSpan {
                span,
                adjusted_size: round2(span.size + bonus),
            }
        })
        .collect()
}
