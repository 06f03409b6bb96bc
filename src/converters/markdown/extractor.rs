// src/converters/markdown/extractor.rs

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::attributes::Attributes;
use super::builder::{RangeKey, TextBuilder};
use super::events::{parse_events, Event, GENERATED_IMAGE_PREFIX};
use crate::converters::style::{parse_style, StyleSheet};
use crate::definitions::{
    BodyDefinition, ImageDefinition, ListKind, Placement, SlideDefinition, SourceKind, StyleEffect,
    TableDefinition, VideoDefinition,
};
use crate::options::{ConversionOptions, SlideSeparator};

static HTML_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<\s*(/)?\s*([A-Za-z][\w-]*)([^>]*?)(/)?\s*>$").expect("valid html tag regex")
});

static HTML_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_:][\w:.-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("valid html attribute regex")
});

/// Which text container inline content is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Title,
    Subtitle,
    Body,
    Notes,
    Cell,
}

#[derive(Debug, Default)]
struct BodyState {
    text: TextBuilder,
    images: Vec<ImageDefinition>,
    videos: Vec<VideoDefinition>,
}

impl BodyState {
    fn is_empty(&self) -> bool {
        self.text.is_blank() && self.images.is_empty() && self.videos.is_empty()
    }

    fn finish(self) -> BodyDefinition {
        let text = (!self.text.is_blank()).then(|| self.text.finish());
        BodyDefinition {
            images: self.images,
            videos: self.videos,
            text,
        }
    }
}

/// The slide being accumulated.
#[derive(Debug, Default)]
struct SlideState {
    layout: Option<String>,
    title: Option<TextBuilder>,
    subtitle: Option<TextBuilder>,
    notes: TextBuilder,
    finished_bodies: Vec<BodyState>,
    body: BodyState,
    cell: TextBuilder,
    tables: Vec<TableDefinition>,
    background_image: Option<ImageDefinition>,
}

impl SlideState {
    fn builder(&mut self, target: Target) -> &mut TextBuilder {
        match target {
            Target::Title => self.title.get_or_insert_with(TextBuilder::new),
            Target::Subtitle => self.subtitle.get_or_insert_with(TextBuilder::new),
            Target::Body => &mut self.body.text,
            Target::Notes => &mut self.notes,
            Target::Cell => &mut self.cell,
        }
    }

    fn has_content(&self) -> bool {
        !self.body.is_empty()
            || self.finished_bodies.iter().any(|body| !body.is_empty())
            || !self.tables.is_empty()
    }

    /// True once anything visible has been added to the slide. Notes alone
    /// wait for the slide that follows.
    fn has_visible(&self) -> bool {
        self.title.is_some()
            || self.subtitle.is_some()
            || self.has_content()
            || self.background_image.is_some()
    }

    /// True once anything at all has been added to the slide.
    fn has_started(&self) -> bool {
        self.has_visible() || !self.notes.is_blank()
    }

    fn accepts_subtitle(&self) -> bool {
        self.title.is_some() && self.subtitle.is_none() && !self.has_content()
    }

    /// Starts a new body column. No-op while the current column is empty.
    fn new_column(&mut self) {
        if self.body.is_empty() {
            return;
        }
        let body = std::mem::take(&mut self.body);
        self.finished_bodies.push(body);
    }

    fn append_notes(&mut self, text: &str) {
        self.notes.ensure_newline();
        self.notes.push_str(text);
    }

    fn finish(self, object_id: String, index: usize) -> SlideDefinition {
        let finish_text = |builder: Option<TextBuilder>| {
            builder
                .filter(|builder| !builder.is_blank())
                .map(TextBuilder::finish)
        };
        let bodies = self
            .finished_bodies
            .into_iter()
            .chain(std::iter::once(self.body))
            .filter(|body| !body.is_empty())
            .map(BodyState::finish)
            .collect();
        SlideDefinition {
            object_id,
            index,
            layout: self.layout,
            title: finish_text(self.title),
            subtitle: finish_text(self.subtitle),
            notes: finish_text(Some(self.notes)),
            bodies,
            tables: self.tables,
            background_image: self.background_image,
        }
    }
}

/// Lazily turns a Markdown document into slides, one per call to `next`.
///
/// Parsing happens up front; slide boundaries are found while iterating. The
/// iterator cannot be restarted: extract again to read the slides again.
pub struct SlideExtractor {
    events: Vec<Event>,
    position: usize,
    separator: SlideSeparator,
    id_prefix: String,
    code_font: String,
    style_sheet: StyleSheet,
    next_index: usize,
}

impl SlideExtractor {
    pub fn new(markdown: &str, options: &ConversionOptions) -> Self {
        SlideExtractor {
            events: parse_events(markdown),
            position: 0,
            separator: options.separator,
            id_prefix: options.id_prefix.clone(),
            code_font: options.code_font.clone(),
            style_sheet: StyleSheet::default(),
            next_index: 0,
        }
    }

    fn peek(&self) -> Option<&Event> {
        self.events.get(self.position)
    }

    fn bump(&mut self) -> Option<Event> {
        let event = self.events.get(self.position)?.clone();
        self.position += 1;
        Some(event)
    }

    fn next_is(&self, expected: &Event) -> bool {
        self.peek() == Some(expected)
    }

    fn read_slide(&mut self) -> SlideState {
        let mut state = SlideState::default();
        while let Some(event) = self.peek() {
            match event {
                Event::StartHeading(1) => {
                    let boundary = match self.separator {
                        SlideSeparator::Heading => state.has_visible(),
                        SlideSeparator::Rule => state.title.is_some() || state.has_content(),
                    };
                    if boundary {
                        break;
                    }
                    self.bump();
                    state.builder(Target::Title);
                    self.block_attributes(&mut state, Target::Title);
                    self.inline_content(&mut state, Target::Title);
                }
                Event::StartHeading(2) if state.accepts_subtitle() => {
                    self.bump();
                    state.builder(Target::Subtitle);
                    self.block_attributes(&mut state, Target::Subtitle);
                    self.inline_content(&mut state, Target::Subtitle);
                }
                Event::Rule => {
                    self.bump();
                    match self.separator {
                        SlideSeparator::Rule => {
                            if state.has_started() {
                                break;
                            }
                        }
                        SlideSeparator::Heading => {
                            let more_in_slide = self
                                .peek()
                                .is_some_and(|next| *next != Event::StartHeading(1));
                            if !state.body.is_empty() && more_in_slide {
                                state.new_column();
                            }
                        }
                    }
                }
                _ => self.block(&mut state, Target::Body),
            }
        }
        state
    }

    /// Consumes one block and writes it to `target`.
    fn block(&mut self, state: &mut SlideState, target: Target) {
        let Some(event) = self.bump() else {
            return;
        };
        match event {
            Event::StartHeading(_) => {
                self.block_attributes(state, target);
                let builder = state.builder(target);
                builder.start_paragraph();
                builder.open(RangeKey::Block, StyleEffect::bold());
                self.inline_content(state, target);
                let builder = state.builder(target);
                builder.close(&RangeKey::Block);
                builder.end_paragraph();
            }
            Event::StartParagraph => {
                self.block_attributes(state, target);
                state.builder(target).start_paragraph();
                self.inline_content(state, target);
                state.builder(target).end_paragraph();
            }
            Event::StartList(kind) => self.list(state, target, kind),
            Event::StartItem => {
                state.builder(target).start_item();
                self.blocks_until(state, target, &Event::EndItem);
                state.builder(target).end_item();
            }
            Event::StartBlockQuote => {
                state.notes.ensure_newline();
                self.blocks_until(state, Target::Notes, &Event::EndBlockQuote);
            }
            Event::StartTable => self.table(state),
            Event::CodeBlock { info, literal } => self.code_block(state, target, &info, &literal),
            Event::Notes(text) => state.append_notes(&text),
            Event::StyleSheet(css) => self.style_sheet.add_rules(&css),
            Event::Rule => debug!("Ignoring nested thematic break"),
            other => debug!("Skipping unexpected event {:?}", other),
        }
    }

    fn blocks_until(&mut self, state: &mut SlideState, target: Target, end: &Event) {
        while self.peek().is_some() {
            if self.next_is(end) {
                self.bump();
                return;
            }
            self.block(state, target);
        }
    }

    fn list(&mut self, state: &mut SlideState, target: Target, kind: ListKind) {
        state.builder(target).start_list(kind);
        self.blocks_until(state, target, &Event::EndList);
        state.builder(target).end_list();
    }

    /// Applies the attributes of the block just opened, if any.
    fn block_attributes(&mut self, state: &mut SlideState, target: Target) {
        let Some(attributes) = self.take_attributes() else {
            return;
        };
        if let Some(layout) = attributes.get("layout") {
            state.layout = Some(layout.to_string());
        }
        if attributes.has_class("column") && target == Target::Body {
            state.new_column();
        }
        if attributes.has_class("big") {
            state.builder(target).set_big();
        }
    }

    fn take_attributes(&mut self) -> Option<Attributes> {
        if !matches!(self.peek(), Some(Event::Attributes(_))) {
            return None;
        }
        match self.bump() {
            Some(Event::Attributes(attributes)) => Some(attributes),
            _ => None,
        }
    }

    /// Consumes inline events up to and including the end of the block.
    fn inline_content(&mut self, state: &mut SlideState, target: Target) {
        while let Some(event) = self.bump() {
            if event.ends_inline_block() {
                return;
            }
            match event {
                Event::Image(url) => self.image(state, &url),
                Event::Video(id) => self.video(state, &id),
                Event::DisplayMath(source) => state
                    .body
                    .images
                    .push(ImageDefinition::deferred(SourceKind::Math, source)),
                other => self.inline(other, state.builder(target)),
            }
        }
    }

    fn inline(&self, event: Event, builder: &mut TextBuilder) {
        match event {
            Event::Text(text) => builder.push_str(&text),
            Event::Code(code) | Event::InlineMath(code) => {
                builder.open(RangeKey::Code, StyleEffect::font_family(&self.code_font));
                builder.push_str(&code);
                builder.close(&RangeKey::Code);
            }
            Event::SoftBreak => builder.push_char(' '),
            Event::LineBreak => builder.push_char('\u{b}'),
            Event::StartEmphasis => builder.open(RangeKey::Emphasis, StyleEffect::italic()),
            Event::EndEmphasis => builder.close(&RangeKey::Emphasis),
            Event::StartStrong => builder.open(RangeKey::Strong, StyleEffect::bold()),
            Event::EndStrong => builder.close(&RangeKey::Strong),
            Event::StartStrikethrough => {
                builder.open(RangeKey::Strikethrough, StyleEffect::strikethrough())
            }
            Event::EndStrikethrough => builder.close(&RangeKey::Strikethrough),
            Event::StartLink(href) => builder.open(RangeKey::Link, StyleEffect::link(href)),
            Event::EndLink => builder.close(&RangeKey::Link),
            Event::InlineHtml(tag) => self.html_tag(&tag, builder),
            Event::Attributes(_) => {}
            other => debug!("Skipping unexpected inline event {:?}", other),
        }
    }

    /// Inline HTML: formatting tags open and close style ranges, `<span>`
    /// takes `style` and `class` attributes. Unknown tags add no formatting.
    fn html_tag(&self, tag: &str, builder: &mut TextBuilder) {
        let Some(captures) = HTML_TAG.captures(tag.trim()) else {
            debug!("Unrecognized inline html '{}'", tag);
            return;
        };
        let closing = captures.get(1).is_some();
        let name = captures
            .get(2)
            .map_or(String::new(), |m| m.as_str().to_ascii_lowercase());
        let self_closing = captures.get(4).is_some();

        if name == "br" {
            builder.push_char('\u{b}');
            return;
        }
        if closing {
            builder.close(&RangeKey::Html(name));
            return;
        }
        if self_closing {
            return;
        }

        let mut style = match name.as_str() {
            "b" | "strong" => StyleEffect::bold(),
            "i" | "em" => StyleEffect::italic(),
            "u" | "ins" => StyleEffect::underline(),
            "s" | "strike" | "del" => StyleEffect::strikethrough(),
            "code" | "kbd" | "tt" => StyleEffect::font_family(&self.code_font),
            "small" => StyleEffect {
                small_caps: Some(true),
                ..Default::default()
            },
            _ => StyleEffect::default(),
        };
        let attributes = captures.get(3).map_or("", |m| m.as_str());
        for attribute in HTML_ATTRIBUTE.captures_iter(attributes) {
            let key = attribute.get(1).map_or("", |m| m.as_str());
            let value = attribute
                .get(2)
                .or_else(|| attribute.get(3))
                .or_else(|| attribute.get(4))
                .map_or("", |m| m.as_str());
            match key.to_ascii_lowercase().as_str() {
                "class" => style.apply(&self.style_sheet.resolve_classes(value)),
                "style" => style.apply(&parse_style(value)),
                _ => {}
            }
        }
        builder.open(RangeKey::Html(name), style);
    }

    fn image(&mut self, state: &mut SlideState, url: &str) {
        let attributes = self.take_attributes();
        let Some(mut image) = classify_image_url(url) else {
            return;
        };
        let mut background = false;
        if let Some(attributes) = attributes {
            attributes.apply_placement(&mut image.placement);
            background = attributes.has_class("background");
        }
        if background {
            if state.background_image.is_some() {
                debug!("Replacing background image with '{}'", url);
            }
            state.background_image = Some(image);
        } else {
            state.body.images.push(image);
        }
    }

    fn video(&mut self, state: &mut SlideState, reference: &str) {
        let attributes = self.take_attributes();
        let Some(id) = youtube_id(reference) else {
            warn!("Dropping video with unusable id '{}'", reference);
            return;
        };
        let mut placement = Placement::default();
        if let Some(attributes) = attributes {
            attributes.apply_placement(&mut placement);
        }
        state.body.videos.push(VideoDefinition { id, placement });
    }

    fn code_block(&mut self, state: &mut SlideState, target: Target, info: &str, literal: &str) {
        if let Some(kind) = info.strip_prefix(GENERATED_IMAGE_PREFIX) {
            state
                .body
                .images
                .push(ImageDefinition::deferred(SourceKind::from_name(kind), literal));
            return;
        }
        let code = literal.trim_end_matches('\n');
        let builder = state.builder(target);
        builder.start_paragraph();
        builder.open(RangeKey::Block, StyleEffect::font_family(&self.code_font));
        if builder.in_list_item() {
            // Newlines would start new bullets.
            builder.push_str(&code.replace('\n', "\u{b}"));
        } else {
            builder.push_str(code);
        }
        builder.close(&RangeKey::Block);
        builder.end_paragraph();
    }

    fn table(&mut self, state: &mut SlideState) {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut header = false;
        while let Some(event) = self.bump() {
            match event {
                Event::EndTable => break,
                Event::StartRow { header: is_header } => {
                    header = is_header;
                    row.clear();
                }
                Event::EndRow => rows.push(std::mem::take(&mut row)),
                Event::StartCell => {
                    state.cell = TextBuilder::new();
                    if header {
                        state.cell.open(RangeKey::Block, StyleEffect::bold());
                    }
                    self.inline_content(state, Target::Cell);
                    row.push(std::mem::take(&mut state.cell).finish());
                }
                other => debug!("Skipping unexpected table event {:?}", other),
            }
        }
        state.tables.push(TableDefinition::new(rows));
    }
}

impl Iterator for SlideExtractor {
    type Item = SlideDefinition;

    fn next(&mut self) -> Option<SlideDefinition> {
        while self.peek().is_some() {
            let state = self.read_slide();
            let index = self.next_index;
            let object_id = format!("{}-{}", self.id_prefix, index + 1);
            let slide = state.finish(object_id, index);
            if slide.is_empty() && slide.notes.is_none() {
                debug!("Skipping empty slide");
                continue;
            }
            self.next_index += 1;
            return Some(slide);
        }
        None
    }
}

/// Sorts an image reference into a ready URL or a local file to upload.
/// References that can be neither are dropped with a warning.
fn classify_image_url(reference: &str) -> Option<ImageDefinition> {
    let reference = reference.trim();
    if reference.is_empty() {
        warn!("Dropping image with an empty URL");
        return None;
    }
    match Url::parse(reference) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Some(ImageDefinition::from_url(reference)),
            "file" => Some(ImageDefinition::deferred(SourceKind::Local, url.path())),
            scheme => {
                warn!("Dropping image '{}': unsupported scheme '{}'", reference, scheme);
                None
            }
        },
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Some(ImageDefinition::deferred(SourceKind::Local, reference))
        }
        Err(e) => {
            warn!("Dropping image '{}': {}", reference, e);
            None
        }
    }
}

/// Accepts a bare video id or a YouTube watch/share URL.
fn youtube_id(reference: &str) -> Option<String> {
    let reference = reference.trim();
    let Ok(url) = Url::parse(reference) else {
        let bare = !reference.is_empty()
            && reference
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        return bare.then(|| reference.to_string());
    };
    let host = url.host_str().unwrap_or_default();
    if host.ends_with("youtu.be") {
        return url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .filter(|id| !id.is_empty())
            .map(str::to_string);
    }
    if host.ends_with("youtube.com") {
        return url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, id)| id.into_owned());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(markdown: &str) -> Vec<SlideDefinition> {
        SlideExtractor::new(markdown, &ConversionOptions::default()).collect()
    }

    fn extract_with(markdown: &str, separator: SlideSeparator) -> Vec<SlideDefinition> {
        let options = ConversionOptions {
            separator,
            ..Default::default()
        };
        SlideExtractor::new(markdown, &options).collect()
    }

    fn body_text(slide: &SlideDefinition, column: usize) -> &str {
        slide.bodies[column]
            .text
            .as_ref()
            .map_or("", |text| text.raw_text.as_str())
    }

    #[test]
    fn test_title_and_subtitle() {
        let slides = extract("# Title\n## Subtitle");
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title.as_ref().unwrap().raw_text, "Title");
        assert_eq!(slides[0].subtitle.as_ref().unwrap().raw_text, "Subtitle");
        assert!(slides[0].bodies.is_empty());
        assert_eq!(slides[0].object_id, "slide-1");
    }

    #[test]
    fn test_h1_starts_new_slides() {
        let slides = extract("# One\n\ntext\n\n# Two\n\nmore");
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[1].index, 1);
        assert_eq!(slides[1].object_id, "slide-2");
        assert_eq!(body_text(&slides[1], 0), "more");
    }

    #[test]
    fn test_subtitle_only_directly_after_title() {
        let slides = extract("# Title\n\nbody\n\n## Section");
        assert!(slides[0].subtitle.is_none());
        let body = slides[0].bodies[0].text.as_ref().unwrap();
        assert_eq!(body.raw_text, "body\nSection");
        assert_eq!(body.text_runs[0].start, 5);
        assert_eq!(body.text_runs[0].style.bold, Some(true));
    }

    #[test]
    fn test_rule_between_paragraphs_makes_columns() {
        let slides = extract("para one\n\n---\n\npara two");
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].bodies.len(), 2);
        assert_eq!(body_text(&slides[0], 1), "para two");
    }

    #[test]
    fn test_rule_without_effect() {
        // Before any body content, and right before a new slide.
        let slides = extract("# A\n\n---\n\ntext\n\n---\n\n# B\n\nb");
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].bodies.len(), 1);
        // At the end of the document.
        let slides = extract("text\n\n---\n");
        assert_eq!(slides[0].bodies.len(), 1);
    }

    #[test]
    fn test_rule_separator_mode() {
        let slides = extract_with("para one\n\n---\n\npara two", SlideSeparator::Rule);
        assert_eq!(slides.len(), 2);

        let slides = extract_with("---\n\n# Title\n\nbody\n\n# Other", SlideSeparator::Rule);
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].title.as_ref().unwrap().raw_text, "Title");
        assert_eq!(slides[1].title.as_ref().unwrap().raw_text, "Other");
    }

    #[test]
    fn test_column_attribute() {
        let slides = extract("left\n\n{.column}\n\nright");
        assert_eq!(slides[0].bodies.len(), 2);
        assert_eq!(body_text(&slides[0], 0), "left");
    }

    #[test]
    fn test_inline_formatting_ranges() {
        let slides = extract("**Bold** text and *it* `code`");
        let body = slides[0].bodies[0].text.as_ref().unwrap();
        assert_eq!(body.raw_text, "Bold text and it code");
        assert_eq!(body.text_runs.len(), 3);
        assert_eq!((body.text_runs[0].start, body.text_runs[0].end), (0, 4));
        assert_eq!(body.text_runs[0].style, StyleEffect::bold());
        assert_eq!(body.text_runs[1].style, StyleEffect::italic());
        assert_eq!(
            body.text_runs[2].style.font_family.as_deref(),
            Some("Courier New")
        );
    }

    #[test]
    fn test_lists_and_nesting() {
        let slides = extract("- one\n- two\n  - nested\n\n1. first");
        let body = slides[0].bodies[0].text.as_ref().unwrap();
        assert_eq!(body.raw_text, "one\ntwo\n\tnested\nfirst");
        assert_eq!(body.list_markers.len(), 2);
        assert_eq!(body.list_markers[0].kind, ListKind::Unordered);
        assert_eq!(body.list_markers[0].end, 16);
        assert_eq!(body.list_markers[1].kind, ListKind::Ordered);
        assert_eq!(body.list_markers[1].start, 16);
    }

    #[test]
    fn test_blockquote_and_comment_become_notes() {
        let slides = extract("# T\n\n> remember this\n\n<!-- notes: and this -->\n");
        let notes = slides[0].notes.as_ref().unwrap();
        assert_eq!(notes.raw_text, "remember this\nand this");
        assert!(slides[0].bodies.is_empty());
    }

    #[test]
    fn test_leading_notes_attach_to_first_slide() {
        let slides = extract("<!-- notes: hi -->\n\n# Title\n\nbody");
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title.as_ref().unwrap().raw_text, "Title");
        assert_eq!(slides[0].notes.as_ref().unwrap().raw_text, "hi");
    }

    #[test]
    fn test_code_block_in_list_item_stays_one_bullet() {
        let slides = extract("- item\n\n  ```\n  l1\n  l2\n  ```\n- next");
        let body = slides[0].bodies[0].text.as_ref().unwrap();
        assert_eq!(body.raw_text, "item\u{b}l1\u{b}l2\nnext");
        assert_eq!(body.list_markers.len(), 1);
        assert_eq!(
            (body.list_markers[0].start, body.list_markers[0].end),
            (0, 15)
        );
        let code = &body.text_runs[0];
        assert_eq!((code.start, code.end), (5, 10));
    }

    #[test]
    fn test_table_definition() {
        let slides = extract("| a | b |\n|---|---|\n| 1 | 2 |\n| 3 |\n");
        let table = &slides[0].tables[0];
        assert_eq!((table.rows, table.columns), (3, 2));
        assert_eq!(table.cells[0][0].text_runs[0].style.bold, Some(true));
        assert_eq!(table.cells[2][0].raw_text, "3");
        assert_eq!(table.cells[2][1].raw_text, "");
    }

    #[test]
    fn test_media_contributes_no_text() {
        let slides = extract("before ![](https://example.com/a.png){width=200} after\n\n@[youtube](abc)");
        let body = &slides[0].bodies[0];
        assert_eq!(body.text.as_ref().unwrap().raw_text, "before  after");
        assert_eq!(body.images[0].url.as_deref(), Some("https://example.com/a.png"));
        assert_eq!(body.images[0].placement.width, Some(200.0));
        assert_eq!(body.videos[0].id, "abc");
    }

    #[test]
    fn test_background_and_deferred_images() {
        let slides = extract(
            "# T\n\n![](bg.png){.background}\n\n$$$ svg\n<svg></svg>\n$$$\n\n![](data:image/png;base64,AA)",
        );
        let slide = &slides[0];
        let background = slide.background_image.as_ref().unwrap();
        assert_eq!(
            background.deferred.as_ref().map(|d| d.kind.clone()),
            Some(SourceKind::Local)
        );
        assert_eq!(slide.bodies[0].images.len(), 1);
        assert_eq!(
            slide.bodies[0].images[0].deferred.as_ref().map(|d| d.kind.clone()),
            Some(SourceKind::Svg)
        );
    }

    #[test]
    fn test_inline_html_styles() {
        let slides = extract(
            "<style>\n.hot { color: #ff0000 }\n</style>\n\nA <span class=\"hot\" style=\"font-weight: bold\">warm</span> day",
        );
        let body = slides[0].bodies[0].text.as_ref().unwrap();
        assert_eq!(body.raw_text, "A warm day");
        let run = &body.text_runs[0];
        assert_eq!((run.start, run.end), (2, 6));
        assert_eq!(run.style.bold, Some(true));
        assert!(run.style.foreground_color.is_some());
    }

    #[test]
    fn test_big_and_layout_attributes() {
        let slides = extract("# Huge {.big}\n\n# Other {layout=TITLE_ONLY}");
        assert!(slides[0].title.as_ref().unwrap().big);
        assert_eq!(slides[1].layout.as_deref(), Some("TITLE_ONLY"));
    }

    #[test]
    fn test_youtube_id_forms() {
        assert_eq!(youtube_id("dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(
            youtube_id("https://www.youtube.com/watch?v=abc").as_deref(),
            Some("abc")
        );
        assert_eq!(youtube_id("https://youtu.be/xyz").as_deref(), Some("xyz"));
        assert_eq!(youtube_id("not an id"), None);
    }

    #[test]
    fn test_iterator_is_lazy_and_finite() {
        let mut extractor = SlideExtractor::new("# A\n\n# B", &ConversionOptions::default());
        assert!(extractor.next().is_some());
        assert!(extractor.next().is_some());
        assert!(extractor.next().is_none());
        assert!(extractor.next().is_none());
    }
}
