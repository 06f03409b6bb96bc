// src/slide_generator.rs

//! Runs a whole conversion against a presentation service.

use log::{debug, info};

use crate::client::PresentationService;
use crate::converters::layout::{
    bind_speaker_notes, generate_notes_requests, plan_requests, LayoutCatalog,
};
use crate::converters::markdown::extract_slides;
use crate::definitions::SlideDefinition;
use crate::errors::{Result, SlidesApiError};
use crate::images::{resolve_and_prune, ImageRenderer};
use crate::models::presentation::Presentation;
use crate::models::requests::{DeleteObjectRequest, Request};
use crate::options::ConversionOptions;

const DEFAULT_TITLE: &str = "Untitled presentation";

/// Which deck to write to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// An existing presentation, by id.
    Existing(String),
    /// A new presentation, copied from the theme deck when one is configured.
    New,
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub presentation_id: String,
    pub slides: usize,
    pub requests: usize,
}

impl GenerationReport {
    pub fn edit_url(&self) -> String {
        format!(
            "https://docs.google.com/presentation/d/{}/edit",
            self.presentation_id
        )
    }
}

/// Converts Markdown and submits the result through `service`.
pub struct SlideGenerator<S> {
    service: S,
    options: ConversionOptions,
}

impl<S: PresentationService> SlideGenerator<S> {
    pub fn new(service: S, options: ConversionOptions) -> Self {
        SlideGenerator { service, options }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Opens or creates the target deck, erases its slides unless appending,
    /// then writes the slides of `markdown` and their speaker notes.
    pub async fn generate<R: ImageRenderer + ?Sized>(
        &self,
        markdown: &str,
        target: Target,
        renderer: &R,
    ) -> Result<GenerationReport> {
        let (mut options, body) = self.options.clone().apply_document(markdown);
        options.id_prefix = format!("{}-{}", options.id_prefix, random_suffix()?);

        let presentation = self.open(&target, &options).await?;
        let presentation_id = presentation.presentation_id.clone();
        info!(
            "Writing to presentation {presentation_id} ({} existing slides)",
            presentation.slide_ids().len()
        );

        let mut slides: Vec<SlideDefinition> = extract_slides(body, &options).collect();
        resolve_and_prune(&mut slides, renderer);

        let mut requests = Vec::new();
        if !options.append {
            requests.extend(erase_slides(&presentation));
        }
        let catalog = LayoutCatalog::from_presentation(&presentation);
        requests.extend(plan_requests(&slides, &catalog, options.parallel));

        let mut submitted = requests.len();
        if !requests.is_empty() {
            let response = self.service.batch_update(&presentation_id, &requests).await?;
            debug!("Batch applied with {} replies", response.replies.len());
        }

        if slides.iter().any(|slide| slide.notes.is_some()) {
            submitted += self.write_notes(&presentation_id, &slides).await?;
        }

        Ok(GenerationReport {
            presentation_id,
            slides: slides.len(),
            requests: submitted,
        })
    }

    async fn open(&self, target: &Target, options: &ConversionOptions) -> Result<Presentation> {
        match target {
            Target::Existing(presentation_id) => self.service.get_presentation(presentation_id).await,
            Target::New => {
                let title = options.title.as_deref().unwrap_or(DEFAULT_TITLE);
                match &options.theme {
                    Some(theme) => {
                        let copy_id = self.service.copy_presentation(theme, title).await?;
                        self.service.get_presentation(&copy_id).await
                    }
                    None => self.service.create_presentation(title).await,
                }
            }
        }
    }

    /// Notes shapes only exist once slides are created, so notes go in a
    /// second batch after re-reading the deck.
    async fn write_notes(&self, presentation_id: &str, slides: &[SlideDefinition]) -> Result<usize> {
        let presentation = self.service.get_presentation(presentation_id).await?;
        let mut requests = Vec::new();
        for slide in slides {
            let Some(notes) = &slide.notes else {
                continue;
            };
            let Some(binding) = presentation.slide(&slide.object_id).and_then(bind_speaker_notes)
            else {
                debug!("{}: no speaker notes shape, notes skipped", slide.object_id);
                continue;
            };
            requests.extend(generate_notes_requests(&binding.object_id, notes));
        }
        if !requests.is_empty() {
            self.service.batch_update(presentation_id, &requests).await?;
        }
        Ok(requests.len())
    }
}

/// The offline half of a run: slides and the requests that build them,
/// without touching a service. Deferred images are dropped.
#[derive(Debug, Clone)]
pub struct Plan {
    pub options: ConversionOptions,
    pub slides: Vec<SlideDefinition>,
    pub requests: Vec<Request>,
}

/// Extracts and plans `markdown` against `catalog`. Front matter in the
/// document overrides `options`.
pub fn plan_markdown(markdown: &str, catalog: &LayoutCatalog, options: ConversionOptions) -> Plan {
    let (options, body) = options.apply_document(markdown);
    let mut slides: Vec<SlideDefinition> = extract_slides(body, &options).collect();
    let dropped: usize = slides
        .iter_mut()
        .map(SlideDefinition::prune_unresolved_images)
        .sum();
    if dropped > 0 {
        debug!("Dropped {dropped} images that need rendering");
    }
    let requests = plan_requests(&slides, catalog, options.parallel);
    Plan {
        options,
        slides,
        requests,
    }
}

fn erase_slides(presentation: &Presentation) -> Vec<Request> {
    presentation
        .slide_ids()
        .into_iter()
        .map(|object_id| Request::DeleteObject(DeleteObjectRequest { object_id }))
        .collect()
}

/// Eight hex digits keeping this run's object ids apart from earlier runs.
fn random_suffix() -> Result<String> {
    let mut bytes = [0u8; 4];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| SlidesApiError::Unknown(format!("No randomness available: {e}")))?;
    Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
}
