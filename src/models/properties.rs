// src/models/properties.rs

use serde::{Deserialize, Serialize};

use crate::models::colors::OptionalColor;
use crate::models::common::Dimension;
use crate::models::link::Link;
use crate::models::page::Page;

/// Styling applied to a run of text. Unset fields are inherited when read and
/// left untouched when written (together with the request's `fields` mask).
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/text#TextStyle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<OptionalColor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<OptionalColor>,

    /// Unrecognized families render as Arial.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    /// Always specified in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,

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

    /// Links are not inherited from parent text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

impl TextStyle {
    /// The field mask naming every property set on this style, in the form
    /// `updateTextStyle` expects (`"bold,fontSize"`).
    pub fn field_mask(&self) -> String {
        let fields = [
            ("bold", self.bold.is_some()),
            ("italic", self.italic.is_some()),
            ("underline", self.underline.is_some()),
            ("strikethrough", self.strikethrough.is_some()),
            ("smallCaps", self.small_caps.is_some()),
            ("fontFamily", self.font_family.is_some()),
            ("fontSize", self.font_size.is_some()),
            ("foregroundColor", self.foreground_color.is_some()),
            ("backgroundColor", self.background_color.is_some()),
            ("link", self.link.is_some()),
        ];
        fields
            .iter()
            .filter(|(_, set)| *set)
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#SlideProperties
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideProperties {
    pub layout_object_id: Option<String>,

    pub master_object_id: Option<String>,

    /// Boxed: `Page` -> `SlideProperties` -> `Page`.
    pub notes_page: Option<Box<Page>>,
}

/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#LayoutProperties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutProperties {
    pub master_object_id: Option<String>,
    /// Predefined layouts use their enum name here, e.g. `TITLE_AND_BODY`.
    pub name: Option<String>,
    /// Human-readable name, e.g. "Title and body".
    pub display_name: Option<String>,
}

/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#NotesProperties
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesProperties {
    /// The shape holding the speaker notes. It may not exist until text is inserted.
    pub speaker_notes_object_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_mask_lists_only_set_fields() {
        let style = TextStyle {
            bold: Some(true),
            font_size: Some(Dimension::pt(18.0)),
            ..Default::default()
        };
        assert_eq!(style.field_mask(), "bold,fontSize");
        assert_eq!(TextStyle::default().field_mask(), "");
    }
}
