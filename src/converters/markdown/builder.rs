// src/converters/markdown/builder.rs

use super::ranges::normalize;
use crate::definitions::{utf16_len, ListKind, ListRange, StyleEffect, StyleRange, TextDefinition};

/// What opened a style range. Closing events pop the most recent range of the
/// same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeKey {
    Emphasis,
    Strong,
    Strikethrough,
    Code,
    Link,
    /// An inline HTML element, by tag name.
    Html(String),
    /// Formatting over a whole block (body headings, code blocks, header cells).
    Block,
}

#[derive(Debug)]
struct OpenRange {
    key: RangeKey,
    start: usize,
    style: StyleEffect,
    order: usize,
}

#[derive(Debug)]
struct OpenList {
    kind: ListKind,
    depth: usize,
    start: usize,
    /// Nested lists of the parent's kind are covered by the parent's range.
    owns_range: bool,
}

/// Accumulates the text of one text container while tracking open style
/// ranges and list nesting. Offsets are UTF-16 code units.
#[derive(Debug, Default)]
pub struct TextBuilder {
    text: String,
    len: usize,
    open: Vec<OpenRange>,
    closed: Vec<(usize, StyleRange)>,
    opened: usize,
    lists: Vec<OpenList>,
    list_ranges: Vec<ListRange>,
    /// Paragraphs seen in the innermost open list item.
    item_paragraphs: Vec<usize>,
    big: bool,
}

impl TextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no visible text has been added.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn set_big(&mut self) {
        self.big = true;
    }

    pub fn push_str(&mut self, text: &str) {
        self.len += utf16_len(text);
        self.text.push_str(text);
    }

    pub fn push_char(&mut self, c: char) {
        self.len += c.len_utf16();
        self.text.push(c);
    }

    /// Ends the current paragraph unless one was just ended.
    pub fn ensure_newline(&mut self) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.push_char('\n');
        }
    }

    pub fn open(&mut self, key: RangeKey, style: StyleEffect) {
        self.open.push(OpenRange {
            key,
            start: self.len,
            style,
            order: self.opened,
        });
        self.opened += 1;
    }

    /// Closes the most recently opened range with `key`. Unmatched closes
    /// are ignored.
    pub fn close(&mut self, key: &RangeKey) {
        let Some(position) = self.open.iter().rposition(|open| open.key == *key) else {
            return;
        };
        let open = self.open.remove(position);
        if open.start < self.len {
            self.closed.push((
                open.order,
                StyleRange {
                    start: open.start,
                    end: self.len,
                    style: open.style,
                },
            ));
        }
    }

    pub fn in_list_item(&self) -> bool {
        !self.item_paragraphs.is_empty()
    }

    pub fn start_list(&mut self, kind: ListKind) {
        self.ensure_newline();
        let depth = self.lists.len();
        let owns_range = self.lists.last().map_or(true, |parent| parent.kind != kind);
        self.lists.push(OpenList {
            kind,
            depth,
            start: self.len,
            owns_range,
        });
    }

    pub fn end_list(&mut self) {
        let Some(list) = self.lists.pop() else {
            return;
        };
        self.ensure_newline();
        if list.owns_range && list.start < self.len {
            self.list_ranges.push(ListRange {
                start: list.start,
                end: self.len,
                kind: list.kind,
                nesting_depth: list.depth,
            });
        }
    }

    /// Starts a list item: a new paragraph indented one tab per nesting level.
    pub fn start_item(&mut self) {
        self.ensure_newline();
        let indent = self.lists.len().saturating_sub(1);
        for _ in 0..indent {
            self.push_char('\t');
        }
        self.item_paragraphs.push(0);
    }

    pub fn end_item(&mut self) {
        self.item_paragraphs.pop();
        self.ensure_newline();
    }

    /// Called before each paragraph. Inside a list item, paragraphs after the
    /// first continue the item on a new line of the same bullet.
    pub fn start_paragraph(&mut self) {
        let Some(count) = self.item_paragraphs.last().copied() else {
            self.ensure_newline();
            return;
        };
        if count > 0 && !self.text.ends_with('\n') {
            self.push_char('\u{b}');
        }
        if let Some(count) = self.item_paragraphs.last_mut() {
            *count += 1;
        }
    }

    pub fn end_paragraph(&mut self) {
        if !self.in_list_item() {
            self.ensure_newline();
        }
    }

    /// Finalizes the text: trailing newlines are trimmed, unclosed ranges end
    /// at the end of the text and style ranges are normalized.
    pub fn finish(mut self) -> TextDefinition {
        while self.lists.last().is_some() {
            self.end_list();
        }
        while let Some(open) = self.open.pop() {
            if open.start < self.len {
                self.closed.push((
                    open.order,
                    StyleRange {
                        start: open.start,
                        end: self.len,
                        style: open.style,
                    },
                ));
            }
        }

        let trimmed = self.text.trim_end_matches('\n').len();
        self.text.truncate(trimmed);
        let len = utf16_len(&self.text);

        self.closed.sort_by_key(|(order, _)| *order);
        let raw: Vec<StyleRange> = self.closed.into_iter().map(|(_, range)| range).collect();
        let text_runs = normalize(&raw, len);

        let mut list_markers: Vec<ListRange> = self
            .list_ranges
            .into_iter()
            .filter(|range| range.start < len)
            .map(|mut range| {
                range.end = range.end.min(len);
                range
            })
            .collect();
        list_markers.sort_by_key(|range| (range.start, range.nesting_depth));

        TextDefinition {
            raw_text: self.text,
            text_runs,
            list_markers,
            big: self.big,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_use_whole_block_offsets() {
        let mut builder = TextBuilder::new();
        builder.start_paragraph();
        builder.push_str("Intro");
        builder.end_paragraph();
        builder.start_list(ListKind::Unordered);
        builder.start_item();
        builder.start_paragraph();
        builder.open(RangeKey::Strong, StyleEffect::bold());
        builder.push_str("one");
        builder.close(&RangeKey::Strong);
        builder.end_paragraph();
        builder.end_item();
        builder.end_list();

        let text = builder.finish();
        assert_eq!(text.raw_text, "Intro\none");
        assert_eq!(text.text_runs.len(), 1);
        assert_eq!((text.text_runs[0].start, text.text_runs[0].end), (6, 9));
        assert_eq!(text.list_markers.len(), 1);
        assert_eq!((text.list_markers[0].start, text.list_markers[0].end), (6, 9));
    }

    #[test]
    fn test_nested_items_are_tab_indented() {
        let mut builder = TextBuilder::new();
        builder.start_list(ListKind::Unordered);
        builder.start_item();
        builder.start_paragraph();
        builder.push_str("a");
        builder.end_paragraph();
        builder.start_list(ListKind::Unordered);
        builder.start_item();
        builder.start_paragraph();
        builder.push_str("b");
        builder.end_paragraph();
        builder.end_item();
        builder.end_list();
        builder.end_item();
        builder.start_item();
        builder.start_paragraph();
        builder.push_str("c");
        builder.end_paragraph();
        builder.end_item();
        builder.end_list();

        let text = builder.finish();
        assert_eq!(text.raw_text, "a\n\tb\nc");
        assert_eq!(text.list_markers.len(), 1);
        assert_eq!(text.list_markers[0].end, 6);
    }

    #[test]
    fn test_mixed_kind_nested_list_gets_own_range() {
        let mut builder = TextBuilder::new();
        builder.start_list(ListKind::Ordered);
        builder.start_item();
        builder.push_str("a");
        builder.start_list(ListKind::Unordered);
        builder.start_item();
        builder.push_str("b");
        builder.end_item();
        builder.end_list();
        builder.end_item();
        builder.end_list();

        let text = builder.finish();
        assert_eq!(text.list_markers.len(), 2);
        assert_eq!(text.list_markers[0].kind, ListKind::Ordered);
        assert_eq!(text.list_markers[1].nesting_depth, 1);
    }

    #[test]
    fn test_second_item_paragraph_uses_line_break() {
        let mut builder = TextBuilder::new();
        builder.start_list(ListKind::Unordered);
        builder.start_item();
        builder.start_paragraph();
        builder.push_str("first");
        builder.end_paragraph();
        builder.start_paragraph();
        builder.push_str("second");
        builder.end_paragraph();
        builder.end_item();
        builder.end_list();
        assert_eq!(builder.finish().raw_text, "first\u{b}second");
    }

    #[test]
    fn test_third_item_paragraph_and_next_item() {
        let mut builder = TextBuilder::new();
        builder.start_list(ListKind::Unordered);
        builder.start_item();
        for part in ["a", "b", "c"] {
            builder.start_paragraph();
            builder.push_str(part);
            builder.end_paragraph();
        }
        builder.end_item();
        builder.start_item();
        builder.start_paragraph();
        builder.push_str("d");
        builder.end_paragraph();
        builder.end_item();
        builder.end_list();

        let text = builder.finish();
        assert_eq!(text.raw_text, "a\u{b}b\u{b}c\nd");
        assert_eq!(text.list_markers.len(), 1);
        assert_eq!((text.list_markers[0].start, text.list_markers[0].end), (0, 7));
    }

    #[test]
    fn test_unclosed_ranges_end_at_text_end() {
        let mut builder = TextBuilder::new();
        builder.push_str("ab");
        builder.open(RangeKey::Html("span".to_string()), StyleEffect::italic());
        builder.push_str("cd\n");
        builder.close(&RangeKey::Emphasis);
        let text = builder.finish();
        assert_eq!(text.text_runs.len(), 1);
        assert_eq!((text.text_runs[0].start, text.text_runs[0].end), (2, 4));
    }
}
