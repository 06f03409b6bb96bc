// src/converters/layout/mod.rs

//! Matches slide definitions to template layouts and generates the request
//! batch that builds them.

pub mod catalog;
pub mod constants;
pub mod generator;
pub mod geometry;
pub mod matcher;

pub use catalog::{LayoutCatalog, LayoutTemplate};
pub use generator::{generate_notes_requests, generate_slide_requests};
pub use matcher::{bind_speaker_notes, match_layout, BindingStatus, BoundLayout, PlaceholderRole};

use log::debug;
use rayon::prelude::*;

use crate::definitions::SlideDefinition;
use crate::models::requests::Request;

/// Minimum number of slides before matching runs on the rayon pool.
const PARALLEL_THRESHOLD: usize = 10;

/// Matches and generates every slide, concatenated in slide order.
pub fn plan_requests(
    slides: &[SlideDefinition],
    catalog: &LayoutCatalog,
    parallel: bool,
) -> Vec<Request> {
    let plan = |slide: &SlideDefinition| {
        let bound = match_layout(slide, catalog);
        generate_slide_requests(&bound, slide)
    };

    let per_slide: Vec<Vec<Request>> = if parallel && slides.len() >= PARALLEL_THRESHOLD {
        debug!("Planning {} slides in parallel", slides.len());
        slides.par_iter().map(plan).collect()
    } else {
        slides.iter().map(plan).collect()
    };
    per_slide.into_iter().flatten().collect()
}
