//! Property tests: every extracted text range stays inside its text, style
//! ranges never overlap, and planned batches create ids before using them.

use std::collections::HashSet;

use md2gslides::definitions::TextDefinition;
use md2gslides::models::presentation::{DEFAULT_PAGE_HEIGHT_EMU, DEFAULT_PAGE_WIDTH_EMU};
use md2gslides::{extract_slides, plan_markdown, ConversionOptions, LayoutCatalog, SlideDefinition};
use proptest::prelude::*;

fn word_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9]{1,8}",
        Just("😀".to_string()),
        Just("🎉🎉".to_string()),
        Just("café".to_string()),
        Just("日本語".to_string()),
        "[a-z]{1,5}".prop_map(|code| format!("`{code}`")),
    ]
}

/// Inline Markdown with nested emphasis, links and HTML spans.
fn inline_strategy() -> impl Strategy<Value = String> {
    let leaf = prop::collection::vec(word_strategy(), 1..4).prop_map(|words| words.join(" "));
    leaf.prop_recursive(3, 24, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|text| format!("*{text}*")),
            inner.clone().prop_map(|text| format!("**{text}**")),
            inner.clone().prop_map(|text| format!("~~{text}~~")),
            inner.clone().prop_map(|text| format!("[{text}](https://example.com)")),
            inner
                .clone()
                .prop_map(|text| format!("<span style=\"color: red; font-weight: bold\">{text}</span>")),
            inner.clone().prop_map(|text| format!("<b>{text}</b>")),
            inner.clone().prop_map(|text| format!("<u>{text}</u>")),
            prop::collection::vec(inner, 2..4).prop_map(|parts| parts.join(" ")),
        ]
    })
}

fn block_strategy() -> impl Strategy<Value = String> {
    let inline = inline_strategy;
    prop_oneof![
        inline(),
        inline().prop_map(|text| format!("# {text}")),
        inline().prop_map(|text| format!("## {text}")),
        inline().prop_map(|text| format!("> {text}")),
        Just("---".to_string()),
        prop::collection::vec((inline(), any::<bool>()), 1..5).prop_map(|items| {
            items
                .into_iter()
                .enumerate()
                .map(|(i, (text, nested))| {
                    if nested && i > 0 {
                        format!("  - {text}")
                    } else {
                        format!("- {text}")
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")
        }),
        prop::collection::vec(inline(), 1..4).prop_map(|items| {
            items
                .iter()
                .enumerate()
                .map(|(i, text)| format!("{}. {text}", i + 1))
                .collect::<Vec<_>>()
                .join("\n")
        }),
        (inline(), inline(), inline(), inline())
            .prop_map(|(a, b, c, d)| format!("| {a} | {b} |\n|---|---|\n| {c} | {d} |")),
        "[a-z ]{1,20}".prop_map(|code| format!("```\n{code}\n{code}\n```")),
    ]
}

fn document_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(block_strategy(), 1..10).prop_map(|blocks| blocks.join("\n\n"))
}

fn texts(slide: &SlideDefinition) -> Vec<&TextDefinition> {
    let mut texts: Vec<&TextDefinition> = slide
        .title
        .iter()
        .chain(slide.subtitle.iter())
        .chain(slide.notes.iter())
        .chain(slide.bodies.iter().filter_map(|body| body.text.as_ref()))
        .collect();
    for table in &slide.tables {
        texts.extend(table.cells.iter().flatten());
    }
    texts
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn test_ranges_stay_in_bounds(markdown in document_strategy()) {
            let slides: Vec<SlideDefinition> =
                extract_slides(&markdown, &ConversionOptions::default()).collect();
            for slide in &slides {
                for text in texts(slide) {
                    let len = text.len();
                    for run in &text.text_runs {
                        prop_assert!(run.start < run.end && run.end <= len, "{:?} in {}", run, len);
                    }
                    for list in &text.list_markers {
                        prop_assert!(list.start < list.end && list.end <= len, "{:?} in {}", list, len);
                    }
                    let mut runs = text.text_runs.clone();
                    runs.sort_by_key(|run| run.start);
                    for pair in runs.windows(2) {
                        prop_assert!(pair[0].end <= pair[1].start, "{:?} overlap", pair);
                    }
                }
            }
        }

        #[test]
        fn test_ids_created_before_use(markdown in document_strategy()) {
            let catalog = LayoutCatalog::empty((DEFAULT_PAGE_WIDTH_EMU, DEFAULT_PAGE_HEIGHT_EMU));
            let plan = plan_markdown(&markdown, &catalog, ConversionOptions::default());
            let mut created: HashSet<&str> = HashSet::new();
            for request in &plan.requests {
                for id in request.referenced_object_ids() {
                    prop_assert!(created.contains(id), "{} referenced before creation", id);
                }
                created.extend(request.created_object_ids());
            }
        }
    }
}
