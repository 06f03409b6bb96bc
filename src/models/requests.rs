// src/models/requests.rs

//! Mutation requests sent to `presentations.batchUpdate`.
//!
//! Each `Request` variant serializes under its camelCase key, so a
//! `Vec<Request>` is the `requests` array of a batch as-is:
//! `{"createSlide": {...}}`, `{"insertText": {...}}`, ...
//!
//! Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations/request

use serde::{Deserialize, Serialize};

use crate::models::common::{AffineTransform, Size};
use crate::models::page_properties::PageProperties;
use crate::models::placeholder::Placeholder;
use crate::models::properties::TextStyle;
use crate::models::shape::ShapeType;

/// The predefined layouts every master can supply.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations/request#PredefinedLayout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredefinedLayout {
    Blank,
    CaptionOnly,
    Title,
    TitleAndBody,
    TitleAndTwoColumns,
    TitleOnly,
    SectionHeader,
    SectionTitleAndDescription,
    OneColumnText,
    MainPoint,
    BigNumber,
}

impl PredefinedLayout {
    /// The name the layout carries in `LayoutProperties.name`.
    pub fn as_str(self) -> &'static str {
        match self {
            PredefinedLayout::Blank => "BLANK",
            PredefinedLayout::CaptionOnly => "CAPTION_ONLY",
            PredefinedLayout::Title => "TITLE",
            PredefinedLayout::TitleAndBody => "TITLE_AND_BODY",
            PredefinedLayout::TitleAndTwoColumns => "TITLE_AND_TWO_COLUMNS",
            PredefinedLayout::TitleOnly => "TITLE_ONLY",
            PredefinedLayout::SectionHeader => "SECTION_HEADER",
            PredefinedLayout::SectionTitleAndDescription => "SECTION_TITLE_AND_DESCRIPTION",
            PredefinedLayout::OneColumnText => "ONE_COLUMN_TEXT",
            PredefinedLayout::MainPoint => "MAIN_POINT",
            PredefinedLayout::BigNumber => "BIG_NUMBER",
        }
    }
}

/// Which layout a new slide is based on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutReference {
    /// A layout page id from the presentation.
    LayoutId(String),
    /// Resolved by the service against the presentation's master.
    PredefinedLayout(PredefinedLayout),
}

/// Assigns an object id to a placeholder instantiated from the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPlaceholderIdMapping {
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_placeholder: Option<Placeholder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_placeholder_object_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlideRequest {
    pub object_id: String,
    /// Omitted: the slide is appended after the existing ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insertion_index: Option<u32>,
    #[serde(rename = "slideLayoutReference")]
    pub slide_layout_reference: LayoutReference,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub placeholder_id_mappings: Vec<LayoutPlaceholderIdMapping>,
}

/// Where a new page element goes and how big it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElementProperties {
    pub page_object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<AffineTransform>,
}

impl PageElementProperties {
    /// A box at `(x, y)` with the given size, all in EMU.
    pub fn emu_box(page_object_id: &str, x: f64, y: f64, width: f64, height: f64) -> Self {
        PageElementProperties {
            page_object_id: page_object_id.to_string(),
            size: Some(Size::emu(width, height)),
            transform: Some(AffineTransform::translate_emu(x, y)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShapeRequest {
    pub object_id: String,
    pub shape_type: ShapeType,
    pub element_properties: PageElementProperties,
}

/// A cell of a table, for requests that target table text.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/tables#TableCellLocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellLocation {
    pub row_index: u32,
    pub column_index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertTextRequest {
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<TableCellLocation>,
    pub text: String,
    pub insertion_index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RangeType {
    FixedRange,
    FromStartIndex,
    All,
}

/// A text range in UTF-16 code units. Derived from: .../request#Range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRange {
    #[serde(rename = "type")]
    pub range_type: RangeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_index: Option<u32>,
}

impl TextRange {
    pub fn fixed(start: usize, end: usize) -> Self {
        TextRange {
            range_type: RangeType::FixedRange,
            start_index: Some(start as u32),
            end_index: Some(end as u32),
        }
    }

    pub fn all() -> Self {
        TextRange {
            range_type: RangeType::All,
            start_index: None,
            end_index: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextStyleRequest {
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<TableCellLocation>,
    pub style: TextStyle,
    pub text_range: TextRange,
    pub fields: String,
}

/// Bullet glyph presets. Derived from: .../request#BulletGlyphPreset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BulletGlyphPreset {
    BulletDiscCircleSquare,
    NumberedDigitAlphaRoman,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParagraphBulletsRequest {
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<TableCellLocation>,
    pub text_range: TextRange,
    pub bullet_preset: BulletGlyphPreset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageRequest {
    pub object_id: String,
    pub url: String,
    pub element_properties: PageElementProperties,
}

/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/videos#Source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoSource {
    SourceUnspecified,
    Youtube,
    Drive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    pub object_id: String,
    pub element_properties: PageElementProperties,
    pub source: VideoSource,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
    pub object_id: String,
    pub element_properties: PageElementProperties,
    pub rows: u32,
    pub columns: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePagePropertiesRequest {
    pub object_id: String,
    pub page_properties: PageProperties,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteObjectRequest {
    pub object_id: String,
}

/// One mutation in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    CreateSlide(CreateSlideRequest),
    CreateShape(CreateShapeRequest),
    InsertText(InsertTextRequest),
    UpdateTextStyle(UpdateTextStyleRequest),
    CreateParagraphBullets(CreateParagraphBulletsRequest),
    CreateImage(CreateImageRequest),
    CreateVideo(CreateVideoRequest),
    CreateTable(CreateTableRequest),
    UpdatePageProperties(UpdatePagePropertiesRequest),
    DeleteObject(DeleteObjectRequest),
}

impl Request {
    /// The object ids this request creates. A `createSlide` also creates the
    /// placeholders named in its id mappings.
    pub fn created_object_ids(&self) -> Vec<&str> {
        match self {
            Request::CreateSlide(r) => std::iter::once(r.object_id.as_str())
                .chain(r.placeholder_id_mappings.iter().map(|m| m.object_id.as_str()))
                .collect(),
            Request::CreateShape(r) => vec![r.object_id.as_str()],
            Request::CreateImage(r) => vec![r.object_id.as_str()],
            Request::CreateVideo(r) => vec![r.object_id.as_str()],
            Request::CreateTable(r) => vec![r.object_id.as_str()],
            _ => Vec::new(),
        }
    }

    /// Every object id this request refers to without creating it.
    pub fn referenced_object_ids(&self) -> Vec<&str> {
        match self {
            Request::CreateSlide(_) => Vec::new(),
            Request::CreateShape(r) => vec![r.element_properties.page_object_id.as_str()],
            Request::CreateImage(r) => vec![r.element_properties.page_object_id.as_str()],
            Request::CreateVideo(r) => vec![r.element_properties.page_object_id.as_str()],
            Request::CreateTable(r) => vec![r.element_properties.page_object_id.as_str()],
            Request::InsertText(r) => vec![r.object_id.as_str()],
            Request::UpdateTextStyle(r) => vec![r.object_id.as_str()],
            Request::CreateParagraphBullets(r) => vec![r.object_id.as_str()],
            Request::UpdatePageProperties(r) => vec![r.object_id.as_str()],
            Request::DeleteObject(r) => vec![r.object_id.as_str()],
        }
    }
}

/// Body of `presentations.batchUpdate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateRequest<'a> {
    pub requests: &'a [Request],
}

/// Response of `presentations.batchUpdate`. Replies are kept as raw JSON; only
/// their count is inspected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateResponse {
    pub presentation_id: String,
    #[serde(default)]
    pub replies: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_slide_json_shape() {
        let request = Request::CreateSlide(CreateSlideRequest {
            object_id: "slide-1".to_string(),
            insertion_index: None,
            slide_layout_reference: LayoutReference::PredefinedLayout(PredefinedLayout::TitleAndBody),
            placeholder_id_mappings: vec![LayoutPlaceholderIdMapping {
                object_id: "slide-1-title".to_string(),
                layout_placeholder: None,
                layout_placeholder_object_id: Some("p2_i0".to_string()),
            }],
        });
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "createSlide": {
                    "objectId": "slide-1",
                    "slideLayoutReference": {"predefinedLayout": "TITLE_AND_BODY"},
                    "placeholderIdMappings": [
                        {"objectId": "slide-1-title", "layoutPlaceholderObjectId": "p2_i0"}
                    ]
                }
            })
        );
    }

    #[test]
    fn test_update_text_style_json_shape() {
        let request = Request::UpdateTextStyle(UpdateTextStyleRequest {
            object_id: "slide-1-element".to_string(),
            cell_location: Some(TableCellLocation {
                row_index: 1,
                column_index: 0,
            }),
            style: TextStyle {
                bold: Some(true),
                ..Default::default()
            },
            text_range: TextRange::fixed(0, 4),
            fields: "bold".to_string(),
        });
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["updateTextStyle"]["textRange"],
            serde_json::json!({"type": "FIXED_RANGE", "startIndex": 0, "endIndex": 4})
        );
        assert_eq!(
            json["updateTextStyle"]["cellLocation"],
            serde_json::json!({"rowIndex": 1, "columnIndex": 0})
        );
        assert_eq!(json["updateTextStyle"]["style"], serde_json::json!({"bold": true}));
    }

    #[test]
    fn test_created_and_referenced_ids() {
        let request = Request::CreateImage(CreateImageRequest {
            object_id: "slide-1-image-1".to_string(),
            url: "https://example.com/a.png".to_string(),
            element_properties: PageElementProperties::emu_box("slide-1", 0.0, 0.0, 10.0, 10.0),
        });
        assert_eq!(request.created_object_ids(), vec!["slide-1-image-1"]);
        assert_eq!(request.referenced_object_ids(), vec!["slide-1"]);
    }
}
