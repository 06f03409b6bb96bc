// src/converters/markdown/events.rs

//! Markdown string -> Comrak AST -> flat, owned event list.
//!
//! The extractor never touches the arena: everything it needs is copied into
//! [`Event`]s here, in document order.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, Options};
use once_cell::sync::Lazy;
use regex::Regex;

use super::attributes::Attributes;
use crate::definitions::ListKind;

/// Opening line of a `$$$ svg` … `$$$` block, rewritten into a fence before
/// parsing.
static GENERATED_IMAGE_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\$\$\$[ \t]*([\w-]+)[ \t]*$").expect("valid generated image open regex")
});

static GENERATED_IMAGE_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$\$\$[ \t]*$").expect("valid generated image close regex"));

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {0,3}(`{3,}|~{3,})").expect("valid code fence regex"));

static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^<>]+>").expect("valid html tag regex"));

static NOTES_COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*<!--\s*notes\s*:(.*?)-->\s*$").expect("valid notes comment regex")
});

/// Info string prefix marking a fence whose body is rendered to an image.
pub const GENERATED_IMAGE_PREFIX: &str = "$$$";

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StartHeading(u8),
    EndHeading,
    StartParagraph,
    EndParagraph,
    StartBlockQuote,
    EndBlockQuote,
    StartList(ListKind),
    EndList,
    StartItem,
    EndItem,
    StartTable,
    EndTable,
    StartRow { header: bool },
    EndRow,
    StartCell,
    EndCell,
    CodeBlock { info: String, literal: String },
    Rule,
    /// Contents of a `<style>` block.
    StyleSheet(String),
    /// Text of a `<!-- notes: … -->` comment.
    Notes(String),
    /// Attributes of the enclosing block, emitted right after its start event,
    /// or of the preceding image/video.
    Attributes(Attributes),
    Text(String),
    Code(String),
    InlineMath(String),
    DisplayMath(String),
    InlineHtml(String),
    SoftBreak,
    LineBreak,
    StartEmphasis,
    EndEmphasis,
    StartStrong,
    EndStrong,
    StartStrikethrough,
    EndStrikethrough,
    StartLink(String),
    EndLink,
    Image(String),
    Video(String),
}

impl Event {
    /// True for events that close a block holding inline content.
    pub fn ends_inline_block(&self) -> bool {
        matches!(self, Event::EndHeading | Event::EndParagraph | Event::EndCell)
    }
}

fn comrak_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.math_dollars = true;
    options
}

/// Parses `markdown` into a flat event list.
pub fn parse_events(markdown: &str) -> Vec<Event> {
    let source = rewrite_generated_images(markdown);
    let arena = Arena::new();
    let root = parse_document(&arena, &source, &comrak_options());
    let mut events = Vec::new();
    for child in root.children() {
        collect_block(child, &mut events);
    }
    events
}

/// Turns `$$$ type` blocks into `~~~~~~ $$$ type` fences. Blocks inside
/// existing code fences are left alone.
fn rewrite_generated_images(markdown: &str) -> String {
    let lines: Vec<&str> = markdown.split_inclusive('\n').collect();
    let mut output = String::with_capacity(markdown.len());
    // Fence character and length of the open code fence.
    let mut fence: Option<(char, usize)> = None;
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let content = line.trim_end_matches(['\n', '\r']);

        if let Some((marker, length)) = fence {
            let closes = content
                .trim_start_matches(' ')
                .strip_prefix(&marker.to_string().repeat(length))
                .is_some_and(|rest| rest.trim_start_matches(marker).trim().is_empty());
            if closes {
                fence = None;
            }
            output.push_str(line);
            i += 1;
            continue;
        }

        if let Some(captures) = CODE_FENCE.captures(content) {
            let run = &captures[1];
            let marker = run.chars().next().unwrap_or('`');
            fence = Some((marker, run.len()));
            output.push_str(line);
            i += 1;
            continue;
        }

        let close = GENERATED_IMAGE_OPEN.captures(content).and_then(|captures| {
            let end = (i + 1..lines.len()).find(|&j| {
                GENERATED_IMAGE_CLOSE.is_match(lines[j].trim_end_matches(['\n', '\r']))
            })?;
            Some((captures[1].to_string(), end))
        });
        match close {
            Some((kind, end)) => {
                output.push_str(&format!("~~~~~~ {GENERATED_IMAGE_PREFIX} {kind}\n"));
                for body in &lines[i + 1..end] {
                    output.push_str(body);
                }
                output.push_str("~~~~~~");
                if lines[end].ends_with('\n') {
                    output.push('\n');
                }
                i = end + 1;
            }
            None => {
                output.push_str(line);
                i += 1;
            }
        }
    }
    output
}

fn collect_block<'a>(node: &'a AstNode<'a>, events: &mut Vec<Event>) {
    let node_data = node.data.borrow();

    match &node_data.value {
        NodeValue::Heading(heading) => {
            collect_inline_block(node, Event::StartHeading(heading.level), Event::EndHeading, events);
        }

        NodeValue::Paragraph => {
            collect_inline_block(node, Event::StartParagraph, Event::EndParagraph, events);
        }

        NodeValue::BlockQuote => {
            events.push(Event::StartBlockQuote);
            for child in node.children() {
                collect_block(child, events);
            }
            events.push(Event::EndBlockQuote);
        }

        NodeValue::List(list) => {
            let kind = match list.list_type {
                ListType::Ordered => ListKind::Ordered,
                ListType::Bullet => ListKind::Unordered,
            };
            events.push(Event::StartList(kind));
            for child in node.children() {
                collect_block(child, events);
            }
            events.push(Event::EndList);
        }

        NodeValue::Item(_) => {
            events.push(Event::StartItem);
            for child in node.children() {
                collect_block(child, events);
            }
            events.push(Event::EndItem);
        }

        NodeValue::CodeBlock(code_block) => {
            events.push(Event::CodeBlock {
                info: code_block.info.trim().to_string(),
                literal: code_block.literal.clone(),
            });
        }

        NodeValue::Table(_) => {
            events.push(Event::StartTable);
            for child in node.children() {
                collect_block(child, events);
            }
            events.push(Event::EndTable);
        }

        NodeValue::TableRow(header) => {
            events.push(Event::StartRow { header: *header });
            for child in node.children() {
                collect_block(child, events);
            }
            events.push(Event::EndRow);
        }

        NodeValue::TableCell => {
            collect_inline_block(node, Event::StartCell, Event::EndCell, events);
        }

        NodeValue::ThematicBreak => events.push(Event::Rule),

        NodeValue::HtmlBlock(html) => collect_html_block(&html.literal, events),

        _ => {
            // Front matter, footnotes and other extensions are not enabled.
        }
    }
}

fn collect_html_block(literal: &str, events: &mut Vec<Event>) {
    let trimmed = literal.trim();
    if let Some(notes) = notes_comment(trimmed) {
        events.push(Event::Notes(notes));
        return;
    }
    if trimmed.starts_with("<!--") {
        return;
    }
    if let Some(css) = trimmed
        .strip_prefix("<style>")
        .and_then(|rest| rest.strip_suffix("</style>"))
    {
        events.push(Event::StyleSheet(css.to_string()));
        return;
    }
    // Any other HTML is treated as a paragraph of inline markup.
    events.push(Event::StartParagraph);
    let mut inlines = Vec::new();
    tokenize_html(trimmed, &mut inlines);
    events.extend(inlines);
    events.push(Event::EndParagraph);
}

/// Text of a `<!-- notes: … -->` comment, if `html` is one.
fn notes_comment(html: &str) -> Option<String> {
    NOTES_COMMENT
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Splits raw HTML into tag and text events.
fn tokenize_html(html: &str, events: &mut Vec<Event>) {
    let mut last = 0;
    for tag in HTML_TAG.find_iter(html) {
        push_text(events, &html[last..tag.start()]);
        events.push(Event::InlineHtml(tag.as_str().to_string()));
        last = tag.end();
    }
    push_text(events, &html[last..]);
}

/// Emits `start`, the block's attributes, its inline content and `end`.
/// Notes comments found inline are emitted after `end`.
fn collect_inline_block<'a>(node: &'a AstNode<'a>, start: Event, end: Event, events: &mut Vec<Event>) {
    let mut inlines = Vec::new();
    let mut hoisted = Vec::new();
    for child in node.children() {
        collect_inline(child, &mut inlines, &mut hoisted);
    }

    let attributes = match inlines.last_mut() {
        Some(Event::Text(text)) => match Attributes::split_trailing(text) {
            Some((rest, attributes)) => {
                *text = rest.to_string();
                Some(attributes)
            }
            None => None,
        },
        _ => None,
    };
    if matches!(inlines.last(), Some(Event::Text(text)) if text.is_empty()) {
        inlines.pop();
    }

    events.push(start);
    if let Some(attributes) = attributes {
        events.push(Event::Attributes(attributes));
    }
    events.extend(inlines);
    events.push(end);
    events.extend(hoisted);
}

fn collect_inline<'a>(node: &'a AstNode<'a>, events: &mut Vec<Event>, hoisted: &mut Vec<Event>) {
    let node_data = node.data.borrow();

    match &node_data.value {
        NodeValue::Text(text) => {
            if matches!(events.last(), Some(Event::Image(_)) | Some(Event::Video(_))) {
                if let Some((attributes, rest)) = Attributes::split_leading(text) {
                    events.push(Event::Attributes(attributes));
                    push_text(events, rest);
                    return;
                }
            }
            push_text(events, text);
        }

        NodeValue::Strong => collect_span(node, Event::StartStrong, Event::EndStrong, events, hoisted),

        NodeValue::Emph => collect_span(node, Event::StartEmphasis, Event::EndEmphasis, events, hoisted),

        NodeValue::Strikethrough => collect_span(
            node,
            Event::StartStrikethrough,
            Event::EndStrikethrough,
            events,
            hoisted,
        ),

        NodeValue::Code(code) => events.push(Event::Code(code.literal.clone())),

        NodeValue::Math(math) => {
            if math.display_math {
                events.push(Event::DisplayMath(math.literal.clone()));
            } else {
                events.push(Event::InlineMath(math.literal.clone()));
            }
        }

        NodeValue::Link(link) => {
            // `@[youtube](id)` embeds a video.
            if plain_text(node).eq_ignore_ascii_case("youtube") && strip_video_marker(events) {
                events.push(Event::Video(link.url.clone()));
                return;
            }
            collect_span(node, Event::StartLink(link.url.clone()), Event::EndLink, events, hoisted);
        }

        NodeValue::Image(link) => events.push(Event::Image(link.url.clone())),

        NodeValue::HtmlInline(html) => match notes_comment(html) {
            Some(notes) => hoisted.push(Event::Notes(notes)),
            None if html.trim_start().starts_with("<!--") => {}
            None => events.push(Event::InlineHtml(html.clone())),
        },

        NodeValue::SoftBreak => events.push(Event::SoftBreak),

        NodeValue::LineBreak => events.push(Event::LineBreak),

        _ => {
            // Unknown inline types keep their text.
            for child in node.children() {
                collect_inline(child, events, hoisted);
            }
        }
    }
}

fn collect_span<'a>(
    node: &'a AstNode<'a>,
    start: Event,
    end: Event,
    events: &mut Vec<Event>,
    hoisted: &mut Vec<Event>,
) {
    events.push(start);
    for child in node.children() {
        collect_inline(child, events, hoisted);
    }
    events.push(end);
}

/// Appends text, merging with a preceding text event.
fn push_text(events: &mut Vec<Event>, text: &str) {
    if text.is_empty() {
        return;
    }
    match events.last_mut() {
        Some(Event::Text(last)) => last.push_str(text),
        _ => events.push(Event::Text(text.to_string())),
    }
}

/// Removes the `@` in front of a `[youtube](…)` link. Returns false when there
/// is none, in which case the link is an ordinary link.
fn strip_video_marker(events: &mut Vec<Event>) -> bool {
    let Some(Event::Text(text)) = events.last_mut() else {
        return false;
    };
    if !text.ends_with('@') {
        return false;
    }
    text.pop();
    if text.is_empty() {
        events.pop();
    }
    true
}

fn plain_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for descendant in node.descendants() {
        if let NodeValue::Text(t) = &descendant.data.borrow().value {
            text.push_str(t);
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_paragraph_events() {
        let events = parse_events("# Title\n\nSome **bold** text");
        assert_eq!(
            events,
            vec![
                Event::StartHeading(1),
                Event::Text("Title".to_string()),
                Event::EndHeading,
                Event::StartParagraph,
                Event::Text("Some ".to_string()),
                Event::StartStrong,
                Event::Text("bold".to_string()),
                Event::EndStrong,
                Event::Text(" text".to_string()),
                Event::EndParagraph,
            ]
        );
    }

    #[test]
    fn test_trailing_block_attributes() {
        let events = parse_events("# Big idea {.big}");
        assert_eq!(events[0], Event::StartHeading(1));
        match &events[1] {
            Event::Attributes(attributes) => assert!(attributes.has_class("big")),
            other => panic!("expected attributes, got {other:?}"),
        }
        assert_eq!(events[2], Event::Text("Big idea".to_string()));
    }

    #[test]
    fn test_image_attributes_and_video() {
        let events = parse_events("![](https://example.com/a.png){width=100}\n\n@[youtube](abc123)");
        assert_eq!(events[1], Event::Image("https://example.com/a.png".to_string()));
        assert!(matches!(&events[2], Event::Attributes(a) if a.get("width") == Some("100")));
        assert!(events.contains(&Event::Video("abc123".to_string())));
        assert!(!events.iter().any(|e| matches!(e, Event::Text(t) if t.contains('@'))));
    }

    #[test]
    fn test_thematic_break_and_lists() {
        let events = parse_events("- one\n- two\n\n---\n\n1. first");
        assert!(events.contains(&Event::StartList(ListKind::Unordered)));
        assert!(events.contains(&Event::Rule));
        assert!(events.contains(&Event::StartList(ListKind::Ordered)));
        assert_eq!(events.iter().filter(|e| **e == Event::StartItem).count(), 3);
    }

    #[test]
    fn test_html_blocks() {
        let events = parse_events("<style>\n.hot { color: red }\n</style>\n\n<!-- notes: say hi -->\n");
        assert!(matches!(&events[0], Event::StyleSheet(css) if css.contains(".hot")));
        assert_eq!(events[1], Event::Notes("say hi".to_string()));
    }

    #[test]
    fn test_generated_image_block_becomes_fence() {
        let events = parse_events("$$$ svg\n<svg></svg>\n$$$\n");
        assert_eq!(
            events,
            vec![Event::CodeBlock {
                info: "$$$ svg".to_string(),
                literal: "<svg></svg>\n".to_string(),
            }]
        );
    }

    #[test]
    fn test_generated_image_syntax_inside_fence_stays_code() {
        let source = "```markdown\n$$$ svg\n<svg></svg>\n$$$\n```\n";
        let events = parse_events(source);
        assert_eq!(
            events,
            vec![Event::CodeBlock {
                info: "markdown".to_string(),
                literal: "$$$ svg\n<svg></svg>\n$$$\n".to_string(),
            }]
        );
        assert_eq!(rewrite_generated_images(source), source);
    }

    #[test]
    fn test_table_rows() {
        let events = parse_events("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert_eq!(events[0], Event::StartTable);
        assert_eq!(events[1], Event::StartRow { header: true });
        assert_eq!(
            events.iter().filter(|e| **e == Event::StartCell).count(),
            4
        );
    }
}
