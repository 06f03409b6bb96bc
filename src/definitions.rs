// src/definitions.rs

//! The intermediate representation between Markdown and request batches.
//!
//! All text offsets are UTF-16 code units, the index unit of the Slides API.

use serde::Serialize;

use crate::models::colors::RgbColor;
use crate::models::common::Dimension;
use crate::models::link::Link;
use crate::models::properties::TextStyle;

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// A set of formatting effects. `None` means "leave as inherited".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleEffect {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_caps: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<RgbColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<RgbColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl StyleEffect {
    pub fn bold() -> Self {
        StyleEffect {
            bold: Some(true),
            ..Default::default()
        }
    }

    pub fn italic() -> Self {
        StyleEffect {
            italic: Some(true),
            ..Default::default()
        }
    }

    pub fn strikethrough() -> Self {
        StyleEffect {
            strikethrough: Some(true),
            ..Default::default()
        }
    }

    pub fn underline() -> Self {
        StyleEffect {
            underline: Some(true),
            ..Default::default()
        }
    }

    pub fn font_family(family: impl Into<String>) -> Self {
        StyleEffect {
            font_family: Some(family.into()),
            ..Default::default()
        }
    }

    pub fn link(href: impl Into<String>) -> Self {
        StyleEffect {
            link: Some(href.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == StyleEffect::default()
    }

    /// Overlays every field set on `other` onto `self`.
    pub fn apply(&mut self, other: &StyleEffect) {
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field.clone();
                })*
            };
        }
        overlay!(
            bold,
            italic,
            underline,
            strikethrough,
            small_caps,
            font_family,
            font_size,
            foreground_color,
            background_color,
            link
        );
    }

    /// The wire form of this effect.
    pub fn to_text_style(&self) -> TextStyle {
        TextStyle {
            background_color: self.background_color.map(Into::into),
            foreground_color: self.foreground_color.map(Into::into),
            font_family: self.font_family.clone(),
            font_size: self.font_size.map(Dimension::pt),
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            strikethrough: self.strikethrough,
            small_caps: self.small_caps,
            link: self.link.as_deref().map(Link::from_href),
        }
    }
}

/// A span `[start, end)` of text with one fixed set of effects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRange {
    pub start: usize,
    pub end: usize,
    pub style: StyleEffect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// A run of list items of one kind. Covers the items' trailing newlines and
/// any tab-indented nested items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRange {
    pub start: usize,
    pub end: usize,
    pub kind: ListKind,
    pub nesting_depth: usize,
}

/// A block of text with its formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDefinition {
    pub raw_text: String,
    pub text_runs: Vec<StyleRange>,
    pub list_markers: Vec<ListRange>,
    /// Emphasis-sized text, e.g. a lone `{.big}` heading.
    pub big: bool,
}

impl TextDefinition {
    /// Unstyled text.
    pub fn plain(text: impl Into<String>) -> Self {
        TextDefinition {
            raw_text: text.into(),
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        utf16_len(&self.raw_text)
    }

    /// True when there is nothing visible to insert.
    pub fn is_empty(&self) -> bool {
        self.raw_text.trim().is_empty()
    }
}

/// Where a deferred image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A file on disk that must be uploaded somewhere reachable.
    Local,
    /// Inline SVG markup.
    Svg,
    /// A TeX math expression.
    Math,
    /// Any other `$$$ <type>` fence, passed through to the renderer.
    Other(String),
}

impl SourceKind {
    /// Maps a fence or math type name to a kind.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "svg" => SourceKind::Svg,
            "math" | "tex" | "latex" => SourceKind::Math,
            "local" | "file" => SourceKind::Local,
            other => SourceKind::Other(other.to_string()),
        }
    }
}

/// Content that has to be rendered into an image before it can be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeferredSource {
    pub kind: SourceKind,
    pub source: String,
}

/// Position and size hints for media, in points.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub padding: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDefinition {
    /// Set once the image is reachable by the presentation service.
    pub url: Option<String>,
    /// Set when the image must be rendered or uploaded first.
    pub deferred: Option<DeferredSource>,
    pub placement: Placement,
}

impl ImageDefinition {
    pub fn from_url(url: impl Into<String>) -> Self {
        ImageDefinition {
            url: Some(url.into()),
            deferred: None,
            placement: Placement::default(),
        }
    }

    pub fn deferred(kind: SourceKind, source: impl Into<String>) -> Self {
        ImageDefinition {
            url: None,
            deferred: Some(DeferredSource {
                kind,
                source: source.into(),
            }),
            placement: Placement::default(),
        }
    }

    pub fn needs_rendering(&self) -> bool {
        self.url.is_none() && self.deferred.is_some()
    }
}

/// An embedded YouTube video.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDefinition {
    pub id: String,
    pub placement: Placement,
}

/// One column of slide content.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyDefinition {
    pub images: Vec<ImageDefinition>,
    pub videos: Vec<VideoDefinition>,
    pub text: Option<TextDefinition>,
}

impl BodyDefinition {
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
            && self.videos.is_empty()
            && self.text.as_ref().map_or(true, TextDefinition::is_empty)
    }

    pub fn has_text(&self) -> bool {
        self.text.as_ref().is_some_and(|text| !text.is_empty())
    }
}

/// A table with a fixed shape: `cells.len() == rows` and each row has
/// `columns` cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDefinition {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<Vec<TextDefinition>>,
}

impl TableDefinition {
    /// Builds a table from ragged rows. The first row decides the column
    /// count; shorter rows are padded with empty cells and longer ones cut.
    pub fn new(mut cells: Vec<Vec<TextDefinition>>) -> Self {
        let columns = cells.first().map_or(0, Vec::len);
        for row in &mut cells {
            row.resize_with(columns, TextDefinition::default);
        }
        TableDefinition {
            rows: cells.len(),
            columns,
            cells,
        }
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&TextDefinition> {
        self.cells.get(row)?.get(column)
    }
}

/// Everything one slide shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDefinition {
    pub object_id: String,
    /// Position of the slide in the document, from 0.
    pub index: usize,
    /// Layout requested with `{layout=NAME}`.
    pub layout: Option<String>,
    pub title: Option<TextDefinition>,
    pub subtitle: Option<TextDefinition>,
    pub notes: Option<TextDefinition>,
    pub bodies: Vec<BodyDefinition>,
    pub tables: Vec<TableDefinition>,
    pub background_image: Option<ImageDefinition>,
}

impl SlideDefinition {
    pub fn new(object_id: impl Into<String>, index: usize) -> Self {
        SlideDefinition {
            object_id: object_id.into(),
            index,
            ..Default::default()
        }
    }

    /// Identifier of the shape holding body column `column` (from 0).
    pub fn body_element_id(&self, column: usize) -> String {
        if column == 0 {
            format!("{}-element", self.object_id)
        } else {
            format!("{}-element-{}", self.object_id, column + 1)
        }
    }

    pub fn title_element_id(&self) -> String {
        format!("{}-title", self.object_id)
    }

    pub fn subtitle_element_id(&self) -> String {
        format!("{}-subtitle", self.object_id)
    }

    /// Bodies that carry visible content.
    pub fn content_bodies(&self) -> impl Iterator<Item = &BodyDefinition> {
        self.bodies.iter().filter(|body| !body.is_empty())
    }

    pub fn has_body_text(&self) -> bool {
        self.bodies.iter().any(BodyDefinition::has_text)
    }

    pub fn has_title(&self) -> bool {
        self.title.as_ref().is_some_and(|t| !t.is_empty())
    }

    pub fn has_subtitle(&self) -> bool {
        self.subtitle.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// True when the slide would render as a blank page.
    pub fn is_empty(&self) -> bool {
        !self.has_title()
            && !self.has_subtitle()
            && self.content_bodies().next().is_none()
            && self.tables.is_empty()
            && self.background_image.is_none()
    }

    /// Every image on the slide, the background included.
    pub fn images_mut(&mut self) -> impl Iterator<Item = &mut ImageDefinition> {
        self.bodies
            .iter_mut()
            .flat_map(|body| body.images.iter_mut())
            .chain(self.background_image.iter_mut())
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageDefinition> {
        self.bodies
            .iter()
            .flat_map(|body| body.images.iter())
            .chain(self.background_image.iter())
    }

    /// Drops images that still have no URL. Returns how many were dropped.
    pub fn prune_unresolved_images(&mut self) -> usize {
        let mut dropped = 0;
        for body in &mut self.bodies {
            let before = body.images.len();
            body.images.retain(|image| image.url.is_some());
            dropped += before - body.images.len();
        }
        if self
            .background_image
            .as_ref()
            .is_some_and(|image| image.url.is_none())
        {
            self.background_image = None;
            dropped += 1;
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf16_len_counts_surrogate_pairs() {
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len("é"), 1);
        assert_eq!(utf16_len("😀"), 2);
    }

    #[test]
    fn test_style_apply_overlays_set_fields() {
        let mut base = StyleEffect::bold();
        base.apply(&StyleEffect {
            bold: Some(false),
            italic: Some(true),
            ..Default::default()
        });
        assert_eq!(base.bold, Some(false));
        assert_eq!(base.italic, Some(true));
        assert!(StyleEffect::default().is_empty());
    }

    #[test]
    fn test_to_text_style_sets_points_and_links() {
        let effect = StyleEffect {
            font_size: Some(24.0),
            link: Some("#next".to_string()),
            ..Default::default()
        };
        let style = effect.to_text_style();
        assert_eq!(style.field_mask(), "fontSize,link");
        assert_eq!(style.font_size, Some(Dimension::pt(24.0)));
    }

    #[test]
    fn test_table_pads_and_truncates_rows() {
        let table = TableDefinition::new(vec![
            vec![TextDefinition::plain("a"), TextDefinition::plain("b")],
            vec![TextDefinition::plain("c")],
            vec![
                TextDefinition::plain("d"),
                TextDefinition::plain("e"),
                TextDefinition::plain("f"),
            ],
        ]);
        assert_eq!((table.rows, table.columns), (3, 2));
        assert!(table.cells.iter().all(|row| row.len() == 2));
        assert_eq!(table.cell(1, 1), Some(&TextDefinition::default()));
    }

    #[test]
    fn test_body_element_ids() {
        let slide = SlideDefinition::new("slide-3", 2);
        assert_eq!(slide.body_element_id(0), "slide-3-element");
        assert_eq!(slide.body_element_id(1), "slide-3-element-2");
        assert_eq!(slide.title_element_id(), "slide-3-title");
    }

    #[test]
    fn test_prune_unresolved_images() {
        let mut slide = SlideDefinition::new("s", 0);
        slide.bodies.push(BodyDefinition {
            images: vec![
                ImageDefinition::from_url("https://example.com/a.png"),
                ImageDefinition::deferred(SourceKind::Svg, "<svg/>"),
            ],
            ..Default::default()
        });
        slide.background_image = Some(ImageDefinition::deferred(SourceKind::Local, "bg.png"));
        assert_eq!(slide.images().filter(|i| i.needs_rendering()).count(), 2);
        assert_eq!(slide.prune_unresolved_images(), 2);
        assert_eq!(slide.images().count(), 1);
    }
}
