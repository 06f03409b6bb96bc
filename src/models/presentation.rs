use serde::{Deserialize, Serialize};

use crate::models::common::Size;
use crate::models::page::Page;

/// Default 16:9 page, used when a presentation does not report its size.
pub const DEFAULT_PAGE_WIDTH_EMU: f64 = 9_144_000.0;
pub const DEFAULT_PAGE_HEIGHT_EMU: f64 = 5_143_500.0;

/// A Google Slides presentation, as read before generating requests.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub presentation_id: String,

    pub page_size: Option<Size>,

    pub slides: Option<Vec<Page>>,

    pub title: Option<String>,

    /// The layouts slides can be created from. This is the layout catalog.
    pub layouts: Option<Vec<Page>>,

    pub locale: Option<String>,

    /// Opaque; lets a batch assert the revision has not changed since read.
    pub revision_id: Option<String>,
}

impl Presentation {
    /// Page `(width, height)` in EMU.
    pub fn page_size_emu(&self) -> (f64, f64) {
        self.page_size
            .as_ref()
            .and_then(Size::to_emu)
            .unwrap_or((DEFAULT_PAGE_WIDTH_EMU, DEFAULT_PAGE_HEIGHT_EMU))
    }

    pub fn slide_ids(&self) -> Vec<String> {
        self.slides
            .iter()
            .flatten()
            .map(|slide| slide.object_id.clone())
            .collect()
    }

    pub fn slide(&self, object_id: &str) -> Option<&Page> {
        self.slides
            .iter()
            .flatten()
            .find(|slide| slide.object_id == object_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_shape_lookup() {
        let presentation: Presentation = serde_json::from_value(serde_json::json!({
            "presentationId": "abc",
            "slides": [{
                "objectId": "s1",
                "slideProperties": {
                    "layoutObjectId": "l1",
                    "notesPage": {
                        "objectId": "s1-notes",
                        "pageType": "NOTES",
                        "notesProperties": {"speakerNotesObjectId": "s1-notes-body"}
                    }
                }
            }]
        }))
        .unwrap();
        assert_eq!(presentation.slide_ids(), vec!["s1".to_string()]);
        let slide = presentation.slide("s1").unwrap();
        assert_eq!(slide.speaker_notes_object_id(), Some("s1-notes-body"));
        assert_eq!(
            presentation.page_size_emu(),
            (DEFAULT_PAGE_WIDTH_EMU, DEFAULT_PAGE_HEIGHT_EMU)
        );
    }
}
