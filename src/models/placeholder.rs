use serde::{Deserialize, Serialize};

/// The type of placeholder a shape represents on a layout, master or slide.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#Type_4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaceholderType {
    None,
    Body,
    Chart,
    ClipArt,
    CenteredTitle,
    Diagram,
    DateAndTime,
    Footer,
    Header,
    Media,
    Object,
    Picture,
    SlideNumber,
    Subtitle,
    Table,
    Title,
    SlideImage,
    /// Placeholder types added to the API after this list was written.
    #[serde(other)]
    Unknown,
}

impl PlaceholderType {
    pub fn is_title(self) -> bool {
        matches!(self, PlaceholderType::Title | PlaceholderType::CenteredTitle)
    }

    /// Placeholders that accept free body text.
    pub fn is_body(self) -> bool {
        matches!(self, PlaceholderType::Body | PlaceholderType::Object)
    }
}

/// Identifies a placeholder shape and the layout/master shape it inherits from.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#Placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_type: Option<PlaceholderType>,
    /// Distinguishes placeholders of the same type on one page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_object_id: Option<String>,
}
