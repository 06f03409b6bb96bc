//! Prints the request batch for a Markdown file without calling the API.
//!
//! Usage: cargo run --example plan_requests -- <FILE.md> [PRESENTATION.json]
//!
//! With a presentation JSON (as saved from `presentations.get`) slides are
//! matched against its layouts; otherwise everything lands on blank slides.

use std::fs;

use anyhow::Context;
use md2gslides::converters::layout::matcher::match_layout;
use md2gslides::models::presentation::{DEFAULT_PAGE_HEIGHT_EMU, DEFAULT_PAGE_WIDTH_EMU};
use md2gslides::{plan_markdown, ConversionOptions, LayoutCatalog, Presentation};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo run --example plan_requests -- <FILE.md> [PRESENTATION.json]");
        return Ok(());
    }

    let markdown =
        fs::read_to_string(&args[1]).with_context(|| format!("reading {}", args[1]))?;
    let catalog = match args.get(2) {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            let presentation: Presentation =
                serde_json::from_str(&json).context("parsing presentation JSON")?;
            LayoutCatalog::from_presentation(&presentation)
        }
        None => LayoutCatalog::empty((DEFAULT_PAGE_WIDTH_EMU, DEFAULT_PAGE_HEIGHT_EMU)),
    };

    let plan = plan_markdown(&markdown, &catalog, ConversionOptions::default());
    for slide in &plan.slides {
        let bound = match_layout(slide, &catalog);
        log::info!(
            "{}: {} ({:?})",
            slide.object_id,
            bound.layout_name,
            bound.status
        );
    }
    println!("{}", serde_json::to_string_pretty(&plan.requests)?);
    Ok(())
}
