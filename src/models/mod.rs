//! Serde models of the Google Slides REST resources this crate reads
//! (presentations, layouts, placeholders) and the batch requests it writes.

pub mod colors;
pub mod common;
pub mod elements;
pub mod link;
pub mod page;
pub mod page_properties;
pub mod placeholder;
pub mod presentation;
pub mod properties;
pub mod requests;
pub mod shape;
