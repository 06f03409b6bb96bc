// src/converters/style.rs

//! CSS-like declarations (`color: red; font-weight: bold`) to [`StyleEffect`].
//!
//! Unknown properties and values never fail a conversion: they are logged and
//! skipped.

use indexmap::IndexMap;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::definitions::StyleEffect;
use crate::models::colors::RgbColor;

static FONT_SIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)(pt|px|em)?$").expect("valid font size regex")
});

static RGB_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*[\d.]+\s*)?\)$")
        .expect("valid rgb regex")
});

static RULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\.([A-Za-z_][\w-]*)\s*\{([^}]*)\}").expect("valid rule regex")
});

/// Point size of `1em`.
const EM_PT: f64 = 11.0;
/// CSS pixels are 3/4 of a point.
const PX_PT: f64 = 0.75;

/// Parses a declaration list into a style effect.
pub fn parse_style(declarations: &str) -> StyleEffect {
    let mut effect = StyleEffect::default();
    for declaration in declarations.split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            if !declaration.trim().is_empty() {
                debug!("Ignoring malformed style declaration '{}'", declaration.trim());
            }
            continue;
        };
        let property = property.trim().to_ascii_lowercase();
        let value = value.trim();
        apply_declaration(&mut effect, &property, value);
    }
    effect
}

fn apply_declaration(effect: &mut StyleEffect, property: &str, value: &str) {
    let lowered = value.to_ascii_lowercase();
    match property {
        "color" => match parse_color(value) {
            Some(color) => effect.foreground_color = Some(color),
            None => debug!("Unresolvable color '{}'", value),
        },
        "background-color" | "background" => match parse_color(value) {
            Some(color) => effect.background_color = Some(color),
            None => debug!("Unresolvable background color '{}'", value),
        },
        "font-weight" => {
            let bold = match lowered.as_str() {
                "bold" | "bolder" => true,
                numeric => numeric.parse::<u32>().is_ok_and(|weight| weight >= 700),
            };
            if bold {
                effect.bold = Some(true);
            }
        }
        "font-style" | "text-decoration" | "text-decoration-line" => {
            for token in lowered.split_whitespace() {
                match token {
                    "italic" | "oblique" => effect.italic = Some(true),
                    "underline" => effect.underline = Some(true),
                    "line-through" => effect.strikethrough = Some(true),
                    other => debug!("Ignoring {} value '{}'", property, other),
                }
            }
        }
        "font-family" => {
            let family = value
                .split(',')
                .next()
                .unwrap_or_default()
                .trim()
                .trim_matches(|c| c == '"' || c == '\'');
            if !family.is_empty() {
                effect.font_family = Some(family.to_string());
            }
        }
        "font-variant" => {
            if lowered == "small-caps" {
                effect.small_caps = Some(true);
            }
        }
        "font-size" => match parse_font_size(&lowered) {
            Some(size) => effect.font_size = Some(size),
            None => debug!("Ignoring font size '{}'", value),
        },
        other => debug!("Ignoring unsupported style property '{}'", other),
    }
}

/// Font size in points.
fn parse_font_size(value: &str) -> Option<f64> {
    let captures = FONT_SIZE.captures(value)?;
    let magnitude: f64 = captures.get(1)?.as_str().parse().ok()?;
    let factor = match captures.get(2).map(|m| m.as_str()) {
        Some("px") => PX_PT,
        Some("em") => EM_PT,
        _ => 1.0,
    };
    Some(magnitude * factor)
}

/// Parses a CSS color into `[0, 1]` channels.
///
/// Supports:
/// - Hex: "#FF0000" or "#f00"
/// - Functional: "rgb(255, 0, 0)" (alpha is ignored)
/// - Named colors
pub fn parse_color(color_str: &str) -> Option<RgbColor> {
    let lower = color_str.trim().to_ascii_lowercase();

    if let Some(hex) = lower.strip_prefix('#') {
        return parse_hex(hex);
    }

    if let Some(captures) = RGB_FUNCTION.captures(&lower) {
        let channel = |i: usize| -> Option<u8> { captures.get(i)?.as_str().parse().ok() };
        return Some(RgbColor::from_u8(channel(1)?, channel(2)?, channel(3)?));
    }

    named_color(&lower).and_then(parse_hex)
}

fn parse_hex(hex: &str) -> Option<RgbColor> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => Some(RgbColor::from_u8(
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        3 => {
            // Short form: #fff -> #ffffff
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
            Some(RgbColor::from_u8(digit(0)?, digit(1)?, digit(2)?))
        }
        _ => None,
    }
}

fn named_color(name: &str) -> Option<&'static str> {
    let hex = match name {
        "black" => "000000",
        "white" => "ffffff",
        "red" => "ff0000",
        "lime" => "00ff00",
        "green" => "008000",
        "blue" => "0000ff",
        "yellow" => "ffff00",
        "cyan" | "aqua" => "00ffff",
        "magenta" | "fuchsia" => "ff00ff",
        "gray" | "grey" => "808080",
        "silver" => "c0c0c0",
        "maroon" => "800000",
        "olive" => "808000",
        "navy" => "000080",
        "purple" => "800080",
        "teal" => "008080",
        "orange" => "ffa500",
        "pink" => "ffc0cb",
        "brown" => "a52a2a",
        "gold" => "ffd700",
        "indigo" => "4b0082",
        "violet" => "ee82ee",
        "darkgray" | "darkgrey" => "a9a9a9",
        "lightgray" | "lightgrey" => "d3d3d3",
        "darkred" => "8b0000",
        "darkgreen" => "006400",
        "darkblue" => "00008b",
        "lightblue" => "add8e6",
        "lightgreen" => "90ee90",
        "crimson" => "dc143c",
        "tomato" => "ff6347",
        "coral" => "ff7f50",
        "salmon" => "fa8072",
        "khaki" => "f0e68c",
        "beige" => "f5f5dc",
        "ivory" => "fffff0",
        "tan" => "d2b48c",
        "chocolate" => "d2691e",
        "steelblue" => "4682b4",
        "skyblue" => "87ceeb",
        "royalblue" => "4169e1",
        "slategray" | "slategrey" => "708090",
        "turquoise" => "40e0d0",
        "orchid" => "da70d6",
        "plum" => "dda0dd",
        "lavender" => "e6e6fa",
        "mintcream" => "f5fffa",
        "whitesmoke" => "f5f5f5",
        "gainsboro" => "dcdcdc",
        _ => return None,
    };
    Some(hex)
}

/// Class rules collected from `<style>` blocks, looked up by
/// `<span class="…">` and `{.class}` attributes.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    classes: IndexMap<String, StyleEffect>,
}

impl StyleSheet {
    /// Adds every `.class { … }` rule in `css`. Later rules for the same class
    /// overlay earlier ones; other selectors are ignored.
    pub fn add_rules(&mut self, css: &str) {
        for captures in RULE.captures_iter(css) {
            let (Some(name), Some(body)) = (captures.get(1), captures.get(2)) else {
                continue;
            };
            let effect = parse_style(body.as_str());
            self.classes
                .entry(name.as_str().to_string())
                .or_default()
                .apply(&effect);
        }
    }

    pub fn class(&self, name: &str) -> Option<&StyleEffect> {
        self.classes.get(name)
    }

    /// The combined effect of a space separated class list.
    pub fn resolve_classes(&self, class_list: &str) -> StyleEffect {
        let mut effect = StyleEffect::default();
        for name in class_list.split_whitespace() {
            match self.classes.get(name) {
                Some(class) => effect.apply(class),
                None => debug!("No style rule for class '{}'", name),
            }
        }
        effect
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_forms() {
        assert_eq!(parse_color("#ff0000"), Some(RgbColor::from_u8(255, 0, 0)));
        assert_eq!(parse_color("#0F0"), Some(RgbColor::from_u8(0, 255, 0)));
        assert_eq!(
            parse_color("rgb(0, 0, 255)"),
            Some(RgbColor::from_u8(0, 0, 255))
        );
        assert_eq!(parse_color("Navy"), Some(RgbColor::from_u8(0, 0, 128)));
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("notacolor"), None);
        assert_eq!(parse_color("#ééé"), None);
    }

    #[test]
    fn test_parse_style_recognized_properties() {
        let effect = parse_style(
            "color: #ffffff; background-color: black; font-weight: bold; \
             font-style: italic; font-family: 'Roboto Mono', monospace; \
             font-variant: small-caps; font-size: 24pt",
        );
        assert_eq!(effect.foreground_color, Some(RgbColor::from_u8(255, 255, 255)));
        assert_eq!(effect.background_color, Some(RgbColor::from_u8(0, 0, 0)));
        assert_eq!(effect.bold, Some(true));
        assert_eq!(effect.italic, Some(true));
        assert_eq!(effect.font_family.as_deref(), Some("Roboto Mono"));
        assert_eq!(effect.small_caps, Some(true));
        assert_eq!(effect.font_size, Some(24.0));
    }

    #[test]
    fn test_font_size_units() {
        assert_eq!(parse_style("font-size: 16px").font_size, Some(12.0));
        assert_eq!(parse_style("font-size: 2em").font_size, Some(22.0));
        assert_eq!(parse_style("font-size: 18").font_size, Some(18.0));
        assert_eq!(parse_style("font-size: large").font_size, None);
    }

    #[test]
    fn test_unknown_and_unresolvable_values_are_ignored() {
        let effect = parse_style("color: nope; float: left; garbage; font-weight: 400");
        assert!(effect.is_empty());
    }

    #[test]
    fn test_text_decoration_maps_underline_and_strikethrough() {
        let effect = parse_style("text-decoration: underline line-through");
        assert_eq!(effect.underline, Some(true));
        assert_eq!(effect.strikethrough, Some(true));
    }

    #[test]
    fn test_style_sheet_classes() {
        let mut sheet = StyleSheet::default();
        sheet.add_rules(".hot { color: red; } .big-text { font-size: 40pt }\np { color: blue }");
        assert_eq!(
            sheet.class("hot").and_then(|e| e.foreground_color),
            Some(RgbColor::from_u8(255, 0, 0))
        );
        let combined = sheet.resolve_classes("hot big-text missing");
        assert_eq!(combined.font_size, Some(40.0));
        assert!(combined.foreground_color.is_some());
        assert!(sheet.class("p").is_none());
    }
}
