// src/converters/layout/catalog.rs

use indexmap::IndexMap;
use log::debug;

use super::geometry::Bounds;
use crate::models::page::Page;
use crate::models::placeholder::PlaceholderType;
use crate::models::presentation::Presentation;

/// A placeholder shape on a layout page.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplatePlaceholder {
    pub object_id: String,
    pub placeholder_type: PlaceholderType,
    pub index: i32,
    pub bounds: Option<Bounds>,
}

/// A layout page slides can be created from.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutTemplate {
    pub object_id: String,
    /// `TITLE_AND_BODY` for predefined layouts, or a custom name.
    pub name: String,
    pub display_name: Option<String>,
    pub placeholders: Vec<TemplatePlaceholder>,
}

impl LayoutTemplate {
    /// Reads a layout page. `None` when the page carries no layout name.
    pub fn from_page(page: &Page) -> Option<Self> {
        let properties = page.layout_properties.as_ref()?;
        let name = properties.name.clone()?;
        let mut placeholders: Vec<TemplatePlaceholder> = page
            .all_elements()
            .into_iter()
            .filter_map(|element| {
                let placeholder = element.placeholder()?;
                Some(TemplatePlaceholder {
                    object_id: element.object_id.clone(),
                    placeholder_type: placeholder.placeholder_type?,
                    index: placeholder.index.unwrap_or(0),
                    bounds: Bounds::of_element(element),
                })
            })
            .collect();
        // Left to right, so BODY placeholders come out in column order.
        placeholders.sort_by(|a, b| {
            let ax = a.bounds.map_or(0.0, |bounds| bounds.x);
            let bx = b.bounds.map_or(0.0, |bounds| bounds.x);
            ax.total_cmp(&bx).then(a.index.cmp(&b.index))
        });
        Some(LayoutTemplate {
            object_id: page.object_id.clone(),
            name,
            display_name: properties.display_name.clone(),
            placeholders,
        })
    }

    pub fn title(&self) -> Option<&TemplatePlaceholder> {
        self.placeholders
            .iter()
            .find(|p| p.placeholder_type.is_title())
    }

    pub fn subtitle(&self) -> Option<&TemplatePlaceholder> {
        self.placeholders
            .iter()
            .find(|p| p.placeholder_type == PlaceholderType::Subtitle)
    }

    /// Body placeholders in column order.
    pub fn bodies(&self) -> Vec<&TemplatePlaceholder> {
        self.placeholders
            .iter()
            .filter(|p| p.placeholder_type.is_body())
            .collect()
    }
}

/// The layouts of a presentation, keyed by name. Read once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutCatalog {
    layouts: IndexMap<String, LayoutTemplate>,
    page_size: (f64, f64),
}

impl LayoutCatalog {
    pub fn from_presentation(presentation: &Presentation) -> Self {
        let mut layouts = IndexMap::new();
        for page in presentation.layouts.iter().flatten() {
            let Some(template) = LayoutTemplate::from_page(page) else {
                debug!("Skipping unnamed layout {}", page.object_id);
                continue;
            };
            // With several masters the first master's layouts win.
            layouts.entry(template.name.clone()).or_insert(template);
        }
        debug!("Layout catalog: {:?}", layouts.keys().collect::<Vec<_>>());
        LayoutCatalog {
            layouts,
            page_size: presentation.page_size_emu(),
        }
    }

    /// A catalog without templates. Every slide falls back to generated boxes.
    pub fn empty(page_size: (f64, f64)) -> Self {
        LayoutCatalog {
            layouts: IndexMap::new(),
            page_size,
        }
    }

    /// Looks a layout up by name, then by display name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&LayoutTemplate> {
        if let Some(template) = self.layouts.get(name) {
            return Some(template);
        }
        self.layouts.values().find(|template| {
            template.name.eq_ignore_ascii_case(name)
                || template
                    .display_name
                    .as_deref()
                    .is_some_and(|display| display.eq_ignore_ascii_case(name))
        })
    }

    pub fn page_size(&self) -> (f64, f64) {
        self.page_size
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layouts.keys().map(String::as_str)
    }
}
