// src/wasm.rs

//! JavaScript entry point. The host page owns authorization and submission;
//! this side turns Markdown into a request batch.

use std::sync::Once;

use wasm_bindgen::prelude::*;

use crate::converters::layout::LayoutCatalog;
use crate::models::presentation::{Presentation, DEFAULT_PAGE_HEIGHT_EMU, DEFAULT_PAGE_WIDTH_EMU};
use crate::options::ConversionOptions;
use crate::slide_generator::plan_markdown;

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(|| {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
        // Fails only if another logger is installed, which is fine.
        let _ = console_log::init_with_level(log::Level::Info);
    });
}

/// Converts `markdown` into the JSON `requests` array of a batchUpdate.
///
/// `presentation_json` is the target presentation as returned by
/// `presentations.get`; its layouts are matched against. Pass an empty string
/// to lay everything out on blank slides. Images that need rendering are
/// dropped.
#[wasm_bindgen]
pub fn markdown_to_requests(markdown: &str, presentation_json: &str) -> Result<String, JsValue> {
    init_logging();

    let catalog = if presentation_json.trim().is_empty() {
        LayoutCatalog::empty((DEFAULT_PAGE_WIDTH_EMU, DEFAULT_PAGE_HEIGHT_EMU))
    } else {
        let presentation: Presentation = serde_json::from_str(presentation_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid presentation JSON: {e}")))?;
        LayoutCatalog::from_presentation(&presentation)
    };

    let plan = plan_markdown(markdown, &catalog, ConversionOptions::default());
    log::info!(
        "Planned {} slides, {} requests",
        plan.slides.len(),
        plan.requests.len()
    );
    serde_json::to_string(&plan.requests).map_err(|e| JsValue::from_str(&e.to_string()))
}
