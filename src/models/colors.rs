use serde::{Deserialize, Serialize};

/// An RGB color with channels in `[0, 1]`. The API omits zero channels, so
/// missing fields deserialize as `0.0`.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#RgbColor
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RgbColor {
    #[serde(default)]
    pub red: f64,
    #[serde(default)]
    pub green: f64,
    #[serde(default)]
    pub blue: f64,
}

impl RgbColor {
    /// Builds a color from 8-bit channels.
    pub fn from_u8(red: u8, green: u8, blue: u8) -> Self {
        RgbColor {
            red: f64::from(red) / 255.0,
            green: f64::from(green) / 255.0,
            blue: f64::from(blue) / 255.0,
        }
    }
}

/// Theme color types, resolved through the page's color scheme.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#ThemeColorType
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThemeColorType {
    ThemeColorTypeUnspecified,
    Dark1,
    Light1,
    Dark2,
    Light2,
    Accent1,
    Accent2,
    Accent3,
    Accent4,
    Accent5,
    Accent6,
    Hyperlink,
    FollowedHyperlink,
    Text1,
    Background1,
    Text2,
    Background2,
}

/// Either an RGB or a theme color. The JSON key selects the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OpaqueColorContent {
    RgbColor(RgbColor),
    ThemeColor(ThemeColorType),
}

/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#OpaqueColor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpaqueColor {
    #[serde(flatten)]
    pub color_kind: OpaqueColorContent,
}

/// A color that is opaque when `opaque_color` is set and transparent otherwise.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#OptionalColor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalColor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opaque_color: Option<OpaqueColor>,
}

impl From<RgbColor> for OptionalColor {
    fn from(rgb: RgbColor) -> Self {
        OptionalColor {
            opaque_color: Some(OpaqueColor {
                color_kind: OpaqueColorContent::RgbColor(rgb),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_serialization_uses_fractions() {
        let color: OptionalColor = RgbColor::from_u8(255, 0, 51).into();
        let json = serde_json::to_value(&color).unwrap();
        assert_eq!(json["opaqueColor"]["rgbColor"]["red"], 1.0);
        assert_eq!(json["opaqueColor"]["rgbColor"]["green"], 0.0);
        assert_eq!(json["opaqueColor"]["rgbColor"]["blue"], 0.2);
    }

    #[test]
    fn test_missing_channels_default_to_zero() {
        let rgb: RgbColor = serde_json::from_str(r#"{"red": 0.5}"#).unwrap();
        assert_eq!(rgb, RgbColor { red: 0.5, green: 0.0, blue: 0.0 });
    }
}
