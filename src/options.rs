// src/options.rs

//! Conversion settings, set by the caller and overridden per document by
//! YAML front matter.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// How slides are cut from the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideSeparator {
    /// Every `# Heading` starts a slide; `---` between content splits columns.
    #[default]
    Heading,
    /// `---` separates slides.
    Rule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConversionOptions {
    pub separator: SlideSeparator,
    /// Presentation to copy as the theme of a new deck.
    pub theme: Option<String>,
    /// Title of a newly created presentation.
    pub title: Option<String>,
    /// Keep the existing slides of the target presentation.
    pub append: bool,
    /// Prefix of generated slide ids.
    pub id_prefix: String,
    /// Plan slides on the rayon pool.
    pub parallel: bool,
    pub code_font: String,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        ConversionOptions {
            separator: SlideSeparator::default(),
            theme: None,
            title: None,
            append: false,
            id_prefix: "slide".to_string(),
            parallel: true,
            code_font: "Courier New".to_string(),
        }
    }
}

/// Front matter keys. Anything absent keeps the caller's value.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct FrontMatter {
    separator: Option<SlideSeparator>,
    theme: Option<String>,
    title: Option<String>,
    append: Option<bool>,
    id_prefix: Option<String>,
    parallel: Option<bool>,
    code_font: Option<String>,
}

impl ConversionOptions {
    /// Overlays the keys set in `front_matter`. Malformed YAML is logged and
    /// leaves the options unchanged.
    pub fn merge_front_matter(self, front_matter: &str) -> Self {
        match parse_front_matter(front_matter) {
            Some(parsed) => self.merge(parsed),
            None => self,
        }
    }

    /// Splits front matter off `source` and merges it over `self`. Returns
    /// the options and the Markdown body. A leading block that is not a YAML
    /// mapping stays part of the body.
    pub fn apply_document(self, source: &str) -> (Self, &str) {
        let (Some(front_matter), body) = split_front_matter(source) else {
            return (self, source);
        };
        match parse_front_matter(front_matter) {
            Some(parsed) => (self.merge(parsed), body),
            None => (self, source),
        }
    }

    fn merge(mut self, parsed: FrontMatter) -> Self {
        self.separator = parsed.separator.unwrap_or(self.separator);
        self.theme = parsed.theme.or(self.theme);
        self.title = parsed.title.or(self.title);
        self.append = parsed.append.unwrap_or(self.append);
        self.id_prefix = parsed.id_prefix.unwrap_or(self.id_prefix);
        self.parallel = parsed.parallel.unwrap_or(self.parallel);
        self.code_font = parsed.code_font.unwrap_or(self.code_font);
        self
    }
}

/// Reads a front matter block. Only a YAML mapping, or an empty block, counts
/// as front matter; anything else (a block of `# Heading` lines parses as a
/// comment) is left to the Markdown.
fn parse_front_matter(front_matter: &str) -> Option<FrontMatter> {
    let value = match serde_yaml::from_str::<serde_yaml::Value>(front_matter) {
        Ok(value) => value,
        Err(e) => {
            warn!("Ignoring malformed front matter: {e}");
            return None;
        }
    };
    match value {
        serde_yaml::Value::Null if front_matter.trim().is_empty() => Some(FrontMatter::default()),
        serde_yaml::Value::Mapping(mapping) if !mapping.is_empty() => {
            match serde_yaml::from_value::<FrontMatter>(serde_yaml::Value::Mapping(mapping)) {
                Ok(parsed) => {
                    debug!("Front matter: {parsed:?}");
                    Some(parsed)
                }
                Err(e) => {
                    warn!("Ignoring malformed front matter: {e}");
                    None
                }
            }
        }
        _ => {
            debug!("Leading block is not a YAML mapping, keeping it as Markdown");
            None
        }
    }
}

/// Splits a leading `---` delimited YAML block from `source`.
pub fn split_front_matter(source: &str) -> (Option<&str>, &str) {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let Some(rest) = source
        .strip_prefix("---\n")
        .or_else(|| source.strip_prefix("---\r\n"))
    else {
        return (None, source);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            let front_matter = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(front_matter), body);
        }
        offset += line.len();
    }
    // Unterminated: a leading thematic break, not front matter.
    (None, source)
}
