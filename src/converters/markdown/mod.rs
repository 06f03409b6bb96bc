// src/converters/markdown/mod.rs

//! Reads Markdown into slide definitions.
//!
//! The comrak AST is flattened into a linear [`events::Event`] stream, which
//! [`SlideExtractor`] scans in document order to cut slides and accumulate
//! their text, formatting, lists, tables and media.

pub mod attributes;
mod builder;
pub mod events;
mod extractor;
mod ranges;

pub use extractor::SlideExtractor;

use crate::options::ConversionOptions;

/// Lazily extracts the slides of `markdown`. Front matter must already be
/// stripped; see
/// [`crate::options::ConversionOptions::apply_document`].
pub fn extract_slides(markdown: &str, options: &ConversionOptions) -> SlideExtractor {
    SlideExtractor::new(markdown, options)
}
