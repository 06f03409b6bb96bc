use serde::{Deserialize, Serialize};

use crate::models::placeholder::Placeholder;

/// The type of a shape. Only the shapes this crate creates or inspects are
/// named; every other geometry reads as `Other`.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/shapes#Type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeType {
    TypeUnspecified,
    TextBox,
    Rectangle,
    RoundRectangle,
    Ellipse,
    #[serde(other)]
    Other,
}

/// A shape page element. Text content and shape properties are not read.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#Shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub shape_type: Option<ShapeType>,

    /// Set when the shape is a placeholder inherited from a layout or master.
    pub placeholder: Option<Placeholder>,
}
