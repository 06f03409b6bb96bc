use serde::{Deserialize, Serialize};

/// English Metric Units per point. The Slides API reports geometry in EMU.
pub const EMU_PER_PT: f64 = 12700.0;

/// Specifies a unit of length.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/Dimension#Unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    /// Unknown unit. Treated as EMU when read back.
    #[serde(rename = "UNIT_UNSPECIFIED")]
    UnitUnspecified,
    /// An English Metric Unit (EMU). 1 EMU = 1/914400 inch.
    Emu,
    /// A point (pt). 1 pt = 1/72 inch.
    Pt,
}

/// A magnitude in a specific unit.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/Dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

impl Dimension {
    pub fn emu(magnitude: f64) -> Self {
        Dimension {
            magnitude: Some(magnitude),
            unit: Some(Unit::Emu),
        }
    }

    pub fn pt(magnitude: f64) -> Self {
        Dimension {
            magnitude: Some(magnitude),
            unit: Some(Unit::Pt),
        }
    }

    /// Returns the magnitude in EMU. Missing magnitudes read as zero.
    pub fn to_emu(&self) -> f64 {
        let magnitude = self.magnitude.unwrap_or(0.0);
        match self.unit {
            Some(Unit::Pt) => magnitude * EMU_PER_PT,
            _ => magnitude,
        }
    }
}

/// A width and height.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/Size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
}

impl Size {
    pub fn emu(width: f64, height: f64) -> Self {
        Size {
            width: Some(Dimension::emu(width)),
            height: Some(Dimension::emu(height)),
        }
    }

    /// `(width, height)` in EMU, or `None` when either side is missing.
    pub fn to_emu(&self) -> Option<(f64, f64)> {
        match (&self.width, &self.height) {
            (Some(w), Some(h)) => Some((w.to_emu(), h.to_emu())),
            _ => None,
        }
    }
}

/// AffineTransform uses a 3x3 matrix with an implied last row of [ 0 0 1 ].
///
/// x' = scaleX * x + shearX * y + translateX;
/// y' = shearY * x + scaleY * y + translateY;
///
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/AffineTransform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffineTransform {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shear_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shear_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

impl AffineTransform {
    /// An unscaled translation, in EMU.
    pub fn translate_emu(x: f64, y: f64) -> Self {
        AffineTransform {
            scale_x: Some(1.0),
            scale_y: Some(1.0),
            shear_x: None,
            shear_y: None,
            translate_x: Some(x),
            translate_y: Some(y),
            unit: Some(Unit::Emu),
        }
    }

    fn factor(&self) -> f64 {
        match self.unit {
            Some(Unit::Pt) => EMU_PER_PT,
            _ => 1.0,
        }
    }

    pub fn translate_x_emu(&self) -> f64 {
        self.translate_x.unwrap_or(0.0) * self.factor()
    }

    pub fn translate_y_emu(&self) -> f64 {
        self.translate_y.unwrap_or(0.0) * self.factor()
    }
}
