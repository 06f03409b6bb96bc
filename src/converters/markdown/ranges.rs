// src/converters/markdown/ranges.rs

use crate::definitions::{StyleEffect, StyleRange};

/// Splits possibly overlapping ranges at every boundary so that no two output
/// ranges overlap. `raw` must be in the order the ranges were opened: where
/// ranges overlap, the later (inner) one wins on conflicting fields.
///
/// Adjacent pieces with equal effects are merged and empty effects dropped.
/// The output is sorted by `start`.
pub fn normalize(raw: &[StyleRange], text_len: usize) -> Vec<StyleRange> {
    let mut boundaries: Vec<usize> = raw
        .iter()
        .filter(|range| range.start < range.end)
        .flat_map(|range| [range.start.min(text_len), range.end.min(text_len)])
        .collect();
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut normalized: Vec<StyleRange> = Vec::new();
    for window in boundaries.windows(2) {
        let (start, end) = (window[0], window[1]);
        let mut style = StyleEffect::default();
        for range in raw {
            if range.start <= start && range.end >= end {
                style.apply(&range.style);
            }
        }
        if style.is_empty() {
            continue;
        }
        match normalized.last_mut() {
            Some(previous) if previous.end == start && previous.style == style => {
                previous.end = end;
            }
            _ => normalized.push(StyleRange { start, end, style }),
        }
    }
    normalized
}
