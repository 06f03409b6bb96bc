// src/converters/markdown/attributes.rs

//! `{.class key=value}` attribute blocks.
//!
//! A block is only recognized when every token inside the braces is a class,
//! an id or a key/value pair; anything else stays literal text.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::definitions::Placement;

static TRAILING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]*)\}\s*$").expect("valid trailing attribute regex"));

static LEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\{([^{}]*)\}").expect("valid leading attribute regex"));

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\.([\w-]+)|#([\w-]+)|([\w-]+)=(?:"([^"]*)"|'([^']*)'|([^\s"']+))"#)
        .expect("valid attribute token regex")
});

/// Parsed attribute block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    pub classes: Vec<String>,
    pub id: Option<String>,
    pub values: IndexMap<String, String>,
}

impl Attributes {
    /// Parses the inside of a `{…}` block.
    pub fn parse(inner: &str) -> Option<Self> {
        let mut attributes = Attributes::default();
        let mut consumed = 0;
        for captures in TOKEN.captures_iter(inner) {
            let whole = captures.get(0)?;
            if !inner[consumed..whole.start()].trim().is_empty() {
                return None;
            }
            consumed = whole.end();
            if let Some(class) = captures.get(1) {
                attributes.classes.push(class.as_str().to_string());
            } else if let Some(id) = captures.get(2) {
                attributes.id = Some(id.as_str().to_string());
            } else if let Some(key) = captures.get(3) {
                let value = captures
                    .get(4)
                    .or_else(|| captures.get(5))
                    .or_else(|| captures.get(6))
                    .map_or("", |m| m.as_str());
                attributes
                    .values
                    .insert(key.as_str().to_ascii_lowercase(), value.to_string());
            }
        }
        if !inner[consumed..].trim().is_empty() || attributes.is_empty() {
            return None;
        }
        Some(attributes)
    }

    /// Splits an attribute block off the end of `text`.
    pub fn split_trailing(text: &str) -> Option<(&str, Attributes)> {
        let captures = TRAILING.captures(text)?;
        let whole = captures.get(0)?;
        let attributes = Attributes::parse(captures.get(1)?.as_str())?;
        Some((text[..whole.start()].trim_end(), attributes))
    }

    /// Splits an attribute block off the start of `text`.
    pub fn split_leading(text: &str) -> Option<(Attributes, &str)> {
        let captures = LEADING.captures(text)?;
        let whole = captures.get(0)?;
        let attributes = Attributes::parse(captures.get(1)?.as_str())?;
        Some((attributes, &text[whole.end()..]))
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.id.is_none() && self.values.is_empty()
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|class| class == name)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// A length in points. Accepts a bare number or a `pt`/`px` suffix.
    pub fn length(&self, key: &str) -> Option<f64> {
        let raw = self.get(key)?.trim();
        if let Some(px) = raw.strip_suffix("px") {
            return px.trim().parse::<f64>().ok().map(|v| v * 0.75);
        }
        raw.trim_end_matches("pt").trim().parse().ok()
    }

    /// Overlays size and position hints onto `placement`.
    pub fn apply_placement(&self, placement: &mut Placement) {
        if let Some(width) = self.length("width") {
            placement.width = Some(width);
        }
        if let Some(height) = self.length("height") {
            placement.height = Some(height);
        }
        if let Some(padding) = self.length("pad").or_else(|| self.length("padding")) {
            placement.padding = padding;
        }
        if let Some(x) = self.length("offset-x") {
            placement.offset_x = x;
        }
        if let Some(y) = self.length("offset-y") {
            placement.offset_y = y;
        }
    }
}
