// src/converters/layout/matcher.rs

use std::fmt;

use log::debug;

use super::catalog::{LayoutCatalog, LayoutTemplate, TemplatePlaceholder};
use super::constants::*;
use super::geometry::Bounds;
use crate::definitions::SlideDefinition;
use crate::models::page::Page;
use crate::models::requests::{LayoutPlaceholderIdMapping, LayoutReference, PredefinedLayout};

/// A logical slot on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderRole {
    Title,
    Subtitle,
    /// Body column, from 0.
    Body(usize),
    SpeakerNotes,
}

impl fmt::Display for PlaceholderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceholderRole::Title => write!(f, "TITLE"),
            PlaceholderRole::Subtitle => write!(f, "SUBTITLE"),
            PlaceholderRole::Body(0) => write!(f, "BODY"),
            PlaceholderRole::Body(column) => write!(f, "BODY-{}", column + 1),
            PlaceholderRole::SpeakerNotes => write!(f, "SPEAKER-NOTES"),
        }
    }
}

/// How well the chosen template fits the slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingStatus {
    /// Every role with content has a template placeholder.
    Bound,
    /// The template exists but lacks these roles; they get generated text boxes.
    PartiallyBound(Vec<PlaceholderRole>),
    /// The preferred template is missing; everything is laid out on a blank page.
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BindingSource {
    /// Instantiated from this layout placeholder when the slide is created.
    Placeholder { layout_object_id: String },
    /// A text box created after the slide.
    Generated,
    /// A shape the service created with the slide, such as its notes body.
    Existing,
}

/// A role tied to the object id its content is written to.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub role: PlaceholderRole,
    pub object_id: String,
    pub source: BindingSource,
    pub bounds: Bounds,
}

impl Binding {
    pub fn is_generated(&self) -> bool {
        self.source == BindingSource::Generated
    }
}

/// The result of matching one slide against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundLayout {
    pub slide_id: String,
    /// Name of the layout the slide is created from.
    pub layout_name: String,
    pub layout: LayoutReference,
    pub placeholder_mappings: Vec<LayoutPlaceholderIdMapping>,
    /// Roles with text to write.
    pub bindings: Vec<Binding>,
    /// Ids of mapped placeholders nothing is written to.
    pub unused: Vec<String>,
    /// Area of each body column, used for its media.
    pub body_areas: Vec<Bounds>,
    /// Area stacked tables are placed in.
    pub table_area: Bounds,
    pub status: BindingStatus,
}

impl BoundLayout {
    pub fn binding(&self, role: PlaceholderRole) -> Option<&Binding> {
        self.bindings.iter().find(|binding| binding.role == role)
    }

    pub fn generated(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter().filter(|binding| binding.is_generated())
    }
}

/// Picks the layout name for a slide by the shape of its content.
pub fn preferred_layout(slide: &SlideDefinition, catalog: &LayoutCatalog) -> String {
    if let Some(name) = slide.layout.as_deref() {
        if let Some(template) = catalog.get(name) {
            return template.name.clone();
        }
        debug!("{}: layout {name} not in catalog, matching by content", slide.object_id);
    }

    let has_title = slide.has_title();
    let has_subtitle = slide.has_subtitle();
    let has_text = slide.has_body_text();
    let columns = slide.content_bodies().count();
    let title_is_big = slide.title.as_ref().is_some_and(|title| title.big);

    let name = if !slide.tables.is_empty() {
        if has_title {
            LAYOUT_TITLE_ONLY
        } else {
            LAYOUT_BLANK
        }
    } else if slide.background_image.is_some() && !has_title && !has_subtitle && !has_text {
        LAYOUT_BLANK
    } else if columns >= 2 {
        LAYOUT_TITLE_AND_TWO_COLUMNS
    } else if has_title && has_subtitle && columns == 0 {
        LAYOUT_TITLE
    } else if has_title && !has_subtitle && columns == 0 {
        if title_is_big {
            LAYOUT_MAIN_POINT
        } else {
            LAYOUT_SECTION_HEADER
        }
    } else if has_title && has_subtitle {
        LAYOUT_SECTION_TITLE_AND_DESCRIPTION
    } else {
        LAYOUT_TITLE_AND_BODY
    };
    name.to_string()
}

/// Matches `slide` to a layout and binds its roles to object ids. Never
/// fails: missing templates degrade to generated text boxes on a blank page.
pub fn match_layout(slide: &SlideDefinition, catalog: &LayoutCatalog) -> BoundLayout {
    let preferred = preferred_layout(slide, catalog);
    let (template, fallback) = match catalog.get(&preferred) {
        Some(template) => (Some(template), false),
        None => {
            debug!(
                "{}: layout {preferred} missing, falling back to {LAYOUT_BLANK}",
                slide.object_id
            );
            (catalog.get(LAYOUT_BLANK), true)
        }
    };

    let mut binder = Binder::new(slide, catalog.page_size(), template);
    binder.bind_text_roles();
    binder.bind_bodies();
    binder.finish(fallback)
}

/// Binds the speaker notes shape of a created slide.
pub fn bind_speaker_notes(page: &Page) -> Option<Binding> {
    let object_id = page.speaker_notes_object_id()?;
    Some(Binding {
        role: PlaceholderRole::SpeakerNotes,
        object_id: object_id.to_string(),
        source: BindingSource::Existing,
        bounds: Bounds::new(0.0, 0.0, 0.0, 0.0),
    })
}

struct Binder<'a> {
    slide: &'a SlideDefinition,
    page: (f64, f64),
    template: Option<&'a LayoutTemplate>,
    mappings: Vec<LayoutPlaceholderIdMapping>,
    bindings: Vec<Binding>,
    unused: Vec<String>,
    missing: Vec<PlaceholderRole>,
    body_areas: Vec<Bounds>,
}

impl<'a> Binder<'a> {
    fn new(slide: &'a SlideDefinition, page: (f64, f64), template: Option<&'a LayoutTemplate>) -> Self {
        Binder {
            slide,
            page,
            template,
            mappings: Vec::new(),
            bindings: Vec::new(),
            unused: Vec::new(),
            missing: Vec::new(),
            body_areas: Vec::new(),
        }
    }

    fn fraction(&self, (x, y, width, height): (f64, f64, f64, f64)) -> Bounds {
        Bounds::page_fraction(self.page, x, y, width, height)
    }

    /// Where body content goes when the template does not say.
    fn default_content_area(&self) -> Bounds {
        if self.slide.has_subtitle() {
            self.fraction(BODY_BELOW_SUBTITLE_BOX)
        } else if self.slide.has_title() {
            self.fraction(BODY_BOX)
        } else {
            self.fraction(FULL_PAGE_BOX)
        }
    }

    /// Maps a template placeholder to `object_id`. Returns its bounds.
    fn map(&mut self, placeholder: &TemplatePlaceholder, object_id: &str) -> Option<Bounds> {
        self.mappings.push(LayoutPlaceholderIdMapping {
            object_id: object_id.to_string(),
            layout_placeholder: None,
            layout_placeholder_object_id: Some(placeholder.object_id.clone()),
        });
        placeholder.bounds
    }

    fn bind(
        &mut self,
        role: PlaceholderRole,
        object_id: String,
        placeholder: Option<&TemplatePlaceholder>,
        wanted: bool,
        default_bounds: Bounds,
    ) {
        match placeholder {
            Some(placeholder) => {
                let bounds = self.map(placeholder, &object_id).unwrap_or(default_bounds);
                if wanted {
                    self.bindings.push(Binding {
                        role,
                        object_id,
                        source: BindingSource::Placeholder {
                            layout_object_id: placeholder.object_id.clone(),
                        },
                        bounds,
                    });
                } else {
                    self.unused.push(object_id);
                }
            }
            None if wanted => {
                self.missing.push(role);
                self.bindings.push(Binding {
                    role,
                    object_id,
                    source: BindingSource::Generated,
                    bounds: default_bounds,
                });
            }
            None => {}
        }
    }

    fn bind_text_roles(&mut self) {
        let template = self.template;
        let title_bounds = self.fraction(TITLE_BOX);
        let subtitle_bounds = if self.slide.has_title() {
            self.fraction(SUBTITLE_BOX)
        } else {
            title_bounds
        };
        self.bind(
            PlaceholderRole::Title,
            self.slide.title_element_id(),
            template.and_then(LayoutTemplate::title),
            self.slide.has_title(),
            title_bounds,
        );
        self.bind(
            PlaceholderRole::Subtitle,
            self.slide.subtitle_element_id(),
            template.and_then(LayoutTemplate::subtitle),
            self.slide.has_subtitle(),
            subtitle_bounds,
        );
    }

    fn bind_bodies(&mut self) {
        let template = self.template;
        let placeholders = template.map(LayoutTemplate::bodies).unwrap_or_default();
        let columns = self.slide.bodies.len();
        let generated_columns = self.default_content_area().columns(columns, GAP_EMU);

        for (column, body) in self.slide.bodies.iter().enumerate() {
            let object_id = self.slide.body_element_id(column);
            let placeholder = placeholders.get(column).copied();
            let default_bounds = generated_columns[column];
            self.bind(
                PlaceholderRole::Body(column),
                object_id,
                placeholder,
                body.has_text(),
                default_bounds,
            );
            let area = placeholder
                .and_then(|placeholder| placeholder.bounds)
                .unwrap_or(default_bounds);
            self.body_areas.push(area);
        }

        // Body placeholders beyond the slide's columns are mapped so they can
        // be deleted by id.
        for (column, placeholder) in placeholders.iter().enumerate().skip(columns) {
            let object_id = self.slide.body_element_id(column);
            self.map(placeholder, &object_id);
            self.unused.push(object_id);
        }
    }

    fn finish(self, fallback: bool) -> BoundLayout {
        let (layout_name, layout) = match self.template {
            Some(template) => (
                template.name.clone(),
                LayoutReference::LayoutId(template.object_id.clone()),
            ),
            None => (
                LAYOUT_BLANK.to_string(),
                LayoutReference::PredefinedLayout(PredefinedLayout::Blank),
            ),
        };
        let content_area = self.default_content_area();
        let table_area = if self.slide.has_body_text() {
            content_area.lower_half()
        } else {
            content_area
        };
        let status = if fallback {
            BindingStatus::Fallback
        } else if self.missing.is_empty() {
            BindingStatus::Bound
        } else {
            BindingStatus::PartiallyBound(self.missing)
        };

        debug!(
            "{}: layout {layout_name}, status {status:?}",
            self.slide.object_id
        );
        BoundLayout {
            slide_id: self.slide.object_id.clone(),
            layout_name,
            layout,
            placeholder_mappings: self.mappings,
            bindings: self.bindings,
            unused: self.unused,
            body_areas: self.body_areas,
            table_area,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::layout::catalog::tests::sample_presentation;
    use crate::definitions::{BodyDefinition, ImageDefinition, TableDefinition, TextDefinition};
    use crate::models::presentation::{DEFAULT_PAGE_HEIGHT_EMU, DEFAULT_PAGE_WIDTH_EMU};

    fn catalog() -> LayoutCatalog {
        LayoutCatalog::from_presentation(&sample_presentation())
    }

    fn body(text: &str) -> BodyDefinition {
        BodyDefinition {
            text: Some(TextDefinition::plain(text)),
            ..Default::default()
        }
    }

    fn slide() -> SlideDefinition {
        SlideDefinition::new("slide-1", 0)
    }

    #[test]
    fn test_layout_priority() {
        let catalog = catalog();

        let mut title_only = slide();
        title_only.title = Some(TextDefinition::plain("Section"));
        assert_eq!(preferred_layout(&title_only, &catalog), LAYOUT_SECTION_HEADER);

        title_only.title.as_mut().unwrap().big = true;
        assert_eq!(preferred_layout(&title_only, &catalog), LAYOUT_MAIN_POINT);

        let mut cover = slide();
        cover.title = Some(TextDefinition::plain("Deck"));
        cover.subtitle = Some(TextDefinition::plain("Sub"));
        assert_eq!(preferred_layout(&cover, &catalog), LAYOUT_TITLE);
        cover.bodies.push(body("text"));
        assert_eq!(
            preferred_layout(&cover, &catalog),
            LAYOUT_SECTION_TITLE_AND_DESCRIPTION
        );

        let mut columns = slide();
        columns.bodies = vec![body("a"), body("b")];
        assert_eq!(preferred_layout(&columns, &catalog), LAYOUT_TITLE_AND_TWO_COLUMNS);

        let mut table = slide();
        table.tables.push(TableDefinition::new(vec![vec![TextDefinition::plain("x")]]));
        assert_eq!(preferred_layout(&table, &catalog), LAYOUT_BLANK);

        let mut background = slide();
        background.background_image = Some(ImageDefinition::from_url("https://example.com/a.png"));
        assert_eq!(preferred_layout(&background, &catalog), LAYOUT_BLANK);

        let mut plain = slide();
        plain.bodies.push(body("text"));
        assert_eq!(preferred_layout(&plain, &catalog), LAYOUT_TITLE_AND_BODY);
    }

    #[test]
    fn test_explicit_layout_wins_when_known() {
        let catalog = catalog();
        let mut explicit = slide();
        explicit.layout = Some("main_point".to_string());
        explicit.bodies.push(body("text"));
        assert_eq!(preferred_layout(&explicit, &catalog), LAYOUT_MAIN_POINT);

        explicit.layout = Some("NO_SUCH_LAYOUT".to_string());
        assert_eq!(preferred_layout(&explicit, &catalog), LAYOUT_TITLE_AND_BODY);
    }

    #[test]
    fn test_bound_title_and_body() {
        let mut definition = slide();
        definition.title = Some(TextDefinition::plain("Title"));
        definition.bodies.push(body("text"));
        let bound = match_layout(&definition, &catalog());

        assert_eq!(bound.status, BindingStatus::Bound);
        assert_eq!(bound.layout, LayoutReference::LayoutId("l-body".to_string()));
        let ids: Vec<&str> = bound
            .placeholder_mappings
            .iter()
            .map(|m| m.object_id.as_str())
            .collect();
        assert_eq!(ids, vec!["slide-1-title", "slide-1-element"]);
        assert!(bound.unused.is_empty());
        assert!(bound.generated().next().is_none());
    }

    #[test]
    fn test_unused_placeholders_are_listed() {
        let mut definition = slide();
        definition.bodies.push(body("only body"));
        let bound = match_layout(&definition, &catalog());
        assert_eq!(bound.layout_name, LAYOUT_TITLE_AND_BODY);
        assert_eq!(bound.unused, vec!["slide-1-title".to_string()]);
    }

    #[test]
    fn test_missing_roles_are_generated() {
        let mut definition = slide();
        definition.layout = Some("TITLE_ONLY".to_string());
        definition.title = Some(TextDefinition::plain("Title"));
        definition.bodies.push(body("text"));
        let bound = match_layout(&definition, &catalog());

        assert_eq!(
            bound.status,
            BindingStatus::PartiallyBound(vec![PlaceholderRole::Body(0)])
        );
        let generated: Vec<&str> = bound.generated().map(|b| b.object_id.as_str()).collect();
        assert_eq!(generated, vec!["slide-1-element"]);
    }

    #[test]
    fn test_empty_catalog_falls_back_to_predefined_blank() {
        let catalog = LayoutCatalog::empty((DEFAULT_PAGE_WIDTH_EMU, DEFAULT_PAGE_HEIGHT_EMU));
        let mut definition = slide();
        definition.title = Some(TextDefinition::plain("Title"));
        definition.bodies = vec![body("a"), body("b")];
        let bound = match_layout(&definition, &catalog);

        assert_eq!(bound.status, BindingStatus::Fallback);
        assert_eq!(
            bound.layout,
            LayoutReference::PredefinedLayout(PredefinedLayout::Blank)
        );
        assert!(bound.placeholder_mappings.is_empty());
        let generated: Vec<&str> = bound.generated().map(|b| b.object_id.as_str()).collect();
        assert_eq!(
            generated,
            vec!["slide-1-title", "slide-1-element", "slide-1-element-2"]
        );
        assert!(bound.body_areas[0].x < bound.body_areas[1].x);
    }

    #[test]
    fn test_matching_is_idempotent() {
        let catalog = catalog();
        let mut definition = slide();
        definition.title = Some(TextDefinition::plain("Title"));
        definition.bodies = vec![body("a"), body("b")];
        assert_eq!(
            match_layout(&definition, &catalog),
            match_layout(&definition, &catalog)
        );
    }

    #[test]
    fn test_role_names() {
        assert_eq!(PlaceholderRole::Body(0).to_string(), "BODY");
        assert_eq!(PlaceholderRole::Body(1).to_string(), "BODY-2");
        assert_eq!(PlaceholderRole::SpeakerNotes.to_string(), "SPEAKER-NOTES");
    }
}
