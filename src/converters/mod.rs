// src/converters/mod.rs

pub mod layout;
pub mod markdown;
pub mod style;
