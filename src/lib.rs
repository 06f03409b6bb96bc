//! Markdown to Google Slides.
//!
//! A document is read into [`definitions::SlideDefinition`]s, each slide is
//! matched to a layout of the target deck, and the result is an ordered batch
//! of [`models::requests::Request`]s for `presentations.batchUpdate`.

pub mod client;
pub mod converters;
pub mod definitions;
pub mod errors;
pub mod images;
pub mod models;
pub mod options;
pub mod slide_generator;
pub mod wasm;

pub use client::{PresentationService, SlidesClient};
pub use converters::layout::{plan_requests, LayoutCatalog};
pub use converters::markdown::{extract_slides, SlideExtractor};
pub use definitions::SlideDefinition;
pub use errors::{Result, SlidesApiError};
pub use images::{ImageRenderer, NoRenderer};
pub use models::presentation::Presentation;
pub use models::requests::Request;
pub use options::{ConversionOptions, SlideSeparator};
pub use slide_generator::{plan_markdown, GenerationReport, SlideGenerator, Target};
