// src/models/page.rs

use serde::{Deserialize, Serialize};

use crate::models::elements::PageElement;
use crate::models::page_properties::PageProperties;
use crate::models::properties::{LayoutProperties, NotesProperties, SlideProperties};

/// The type of the page.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#PageType
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageType {
    #[default]
    PageTypeUnspecified,
    Slide,
    Master,
    Layout,
    Notes,
    NotesMaster,
}

/// A page in a presentation.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#Page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub object_id: String,

    /// Omitted for top-level slides in some responses.
    #[serde(default)]
    pub page_type: Option<PageType>,

    pub page_elements: Option<Vec<PageElement>>,

    pub page_properties: Option<PageProperties>,

    /// Only set if page_type = SLIDE.
    pub slide_properties: Option<SlideProperties>,

    /// Only set if page_type = LAYOUT.
    pub layout_properties: Option<LayoutProperties>,

    /// Only set if page_type = NOTES.
    pub notes_properties: Option<NotesProperties>,
}

impl Page {
    /// All elements of the page including grouped children, in document order.
    pub fn all_elements(&self) -> Vec<&PageElement> {
        let mut collected = Vec::new();
        if let Some(elements) = &self.page_elements {
            for element in elements {
                element.walk(&mut |e| collected.push(e));
            }
        }
        collected
    }

    /// The speaker notes shape id of a slide, read from its notes page.
    pub fn speaker_notes_object_id(&self) -> Option<&str> {
        self.slide_properties
            .as_ref()?
            .notes_page
            .as_ref()?
            .notes_properties
            .as_ref()?
            .speaker_notes_object_id
            .as_deref()
    }
}
