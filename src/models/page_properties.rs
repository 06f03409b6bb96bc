use serde::{Deserialize, Serialize};

use crate::models::common::Size;

/// Whether a property is rendered, hidden or inherited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyState {
    Rendered,
    NotRendered,
    #[default]
    Inherit,
}

/// The page or element is filled entirely with a picture, stretched to fit.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#StretchedPictureFill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StretchedPictureFill {
    /// When writing, the URL the picture is fetched from once at insertion
    /// time. PNG, JPEG and GIF only, at most 2 kB of URL.
    pub content_url: String,

    /// Read-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

/// The background fill of a page.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#PageBackgroundFill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBackgroundFill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_state: Option<PropertyState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stretched_picture_fill: Option<StretchedPictureFill>,
}

/// The properties of a page. Unset fields are inherited.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#PageProperties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_background_fill: Option<PageBackgroundFill>,
}

impl PageProperties {
    /// Properties that stretch the picture at `url` over the whole page.
    pub fn background_picture(url: impl Into<String>) -> Self {
        PageProperties {
            page_background_fill: Some(PageBackgroundFill {
                property_state: None,
                stretched_picture_fill: Some(StretchedPictureFill {
                    content_url: url.into(),
                    size: None,
                }),
            }),
        }
    }
}
