//! Mapping of adjusted sizes to heading levels

use crate::normalize::{size_key, AdjustedSpan};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading level of an outline entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Levels in rank order, largest size first
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];

    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }

    /// Nesting depth, 1 for H1
    pub fn depth(&self) -> usize {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distinct adjusted sizes assigned to H1..H3, largest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelMap {
    /// (size key, adjusted size, level), descending by size
    tiers: Vec<(i32, f32, HeadingLevel)>,
}

impl LevelMap {
    /// Rank the distinct adjusted sizes and label the top three
    ///
    /// Sizes below the third tier get no level.
    pub fn from_spans(spans: &[AdjustedSpan<'_>]) -> Self {
        let mut sizes: Vec<(i32, f32)> = spans
            .iter()
            .map(|s| (s.size_key(), s.adjusted_size))
            .collect();
        sizes.sort_by(|a, b| b.0.cmp(&a.0));
        sizes.dedup_by_key(|(key, _)| *key);

        let tiers = sizes
            .into_iter()
            .zip(HeadingLevel::ALL)
            .map(|((key, size), level)| (key, size, level))
            .collect();

        Self { tiers }
    }

    /// Level for an adjusted size, if it is one of the top tiers
    pub fn level_for(&self, adjusted_size: f32) -> Option<HeadingLevel> {
        let key = size_key(adjusted_size);
        self.tiers
            .iter()
            .find(|(k, _, _)| *k == key)
            .map(|(_, _, level)| *level)
    }

    /// Adjusted size labelled with a level
    pub fn size_for(&self, level: HeadingLevel) -> Option<f32> {
        self.tiers
            .iter()
            .find(|(_, _, l)| *l == level)
            .map(|(_, size, _)| *size)
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

/// Build the level map for a span list
pub fn map_sizes_to_levels(spans: &[AdjustedSpan<'_>]) -> LevelMap {
    LevelMap::from_spans(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::Span;
    use crate::normalize::{normalize, DEFAULT_BOLD_BONUS};

    fn sized(sizes: &[f32]) -> Vec<Span> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| {
                Span::new("Heading text", size, "Arial-Bold", 1, 72.0, i as f32 * 30.0)
            })
            .collect()
    }

    #[test]
    fn test_top_three_descending() {
        let spans = sized(&[12.0, 20.0, 16.0, 14.0, 20.0]);
        let adjusted = normalize(&spans, DEFAULT_BOLD_BONUS);
        let map = map_sizes_to_levels(&adjusted);

        assert_eq!(map.len(), 3);
        assert_eq!(map.level_for(24.0), Some(HeadingLevel::H1));
        assert_eq!(map.level_for(20.0), Some(HeadingLevel::H2));
        assert_eq!(map.level_for(18.0), Some(HeadingLevel::H3));
        assert_eq!(map.level_for(16.0), None);
    }

    #[test]
    fn test_fewer_than_three_tiers() {
        let spans = sized(&[14.0, 14.0]);
        let adjusted = normalize(&spans, DEFAULT_BOLD_BONUS);
        let map = map_sizes_to_levels(&adjusted);

        assert_eq!(map.len(), 1);
        assert_eq!(map.size_for(HeadingLevel::H1), Some(18.0));
        assert_eq!(map.size_for(HeadingLevel::H2), None);
    }

    #[test]
    fn test_empty_map() {
        let map = map_sizes_to_levels(&[]);
        assert!(map.is_empty());
        assert_eq!(map.level_for(12.0), None);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(HeadingLevel::H2.to_string(), "H2");
        assert_eq!(HeadingLevel::H3.depth(), 3);
    }
}
