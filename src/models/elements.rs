// src/models/elements.rs

use serde::{Deserialize, Serialize};

use crate::models::common::{AffineTransform, Size};
use crate::models::placeholder::Placeholder;
use crate::models::shape::Shape;

/// A joined collection of page elements.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#Group
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub children: Vec<PageElement>,
}

/// A visual element rendered on a page.
///
/// Only shapes and groups are modelled: layout matching needs placeholder
/// shapes and their geometry, nothing else. Other element kinds deserialize
/// with both fields unset.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#PageElement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    /// Page and page element ids share the same namespace.
    pub object_id: String,

    pub size: Option<Size>,

    pub transform: Option<AffineTransform>,

    pub shape: Option<Shape>,

    pub element_group: Option<Group>,
}

impl PageElement {
    /// The placeholder info of this element when it is a placeholder shape.
    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.shape.as_ref().and_then(|shape| shape.placeholder.as_ref())
    }

    /// Rendered width and height in EMU, taking the transform scale into account.
    pub fn rendered_size_emu(&self) -> Option<(f64, f64)> {
        let (width, height) = self.size.as_ref()?.to_emu()?;
        let (scale_x, scale_y) = self
            .transform
            .as_ref()
            .map(|t| (t.scale_x.unwrap_or(1.0), t.scale_y.unwrap_or(1.0)))
            .unwrap_or((1.0, 1.0));
        Some((width * scale_x, height * scale_y))
    }

    /// Visits this element and every element nested in groups, depth first.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a PageElement)) {
        visit(self);
        if let Some(group) = &self.element_group {
            for child in &group.children {
                child.walk(visit);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_size_applies_scale() {
        let element: PageElement = serde_json::from_value(serde_json::json!({
            "objectId": "p1_i0",
            "size": {
                "width": {"magnitude": 3000000, "unit": "EMU"},
                "height": {"magnitude": 100, "unit": "PT"}
            },
            "transform": {"scaleX": 2.0, "scaleY": 0.5, "unit": "EMU"},
            "shape": {"shapeType": "TEXT_BOX", "placeholder": {"type": "BODY"}}
        }))
        .unwrap();
        assert_eq!(element.rendered_size_emu(), Some((6000000.0, 635000.0)));
        assert!(element.placeholder().is_some());
    }

    #[test]
    fn test_unmodelled_element_kinds_deserialize() {
        let element: PageElement = serde_json::from_value(serde_json::json!({
            "objectId": "line_1",
            "line": {"lineType": "STRAIGHT_LINE"}
        }))
        .unwrap();
        assert!(element.shape.is_none());
        assert!(element.placeholder().is_none());
    }
}
