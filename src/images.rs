// src/images.rs

//! Resolves deferred images into URLs the Slides service can fetch.
//!
//! Rendering SVG or math and hosting local files is left to an
//! [`ImageRenderer`]. Resolution runs as its own phase before request
//! generation; images that fail are dropped with a warning.

use log::{debug, warn};
use rayon::prelude::*;
use thiserror::Error;
use url::Url;

use crate::definitions::{ImageDefinition, SlideDefinition, SourceKind};

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("No renderer for {0:?} images")]
    Unsupported(SourceKind),

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Invalid image URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns a deferred image into a publicly reachable URL.
pub trait ImageRenderer: Sync {
    fn render(&self, image: &ImageDefinition) -> Result<String, ImageError>;
}

/// Renders nothing. Every deferred image is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRenderer;

impl ImageRenderer for NoRenderer {
    fn render(&self, image: &ImageDefinition) -> Result<String, ImageError> {
        let kind = image
            .deferred
            .as_ref()
            .map_or(SourceKind::Local, |deferred| deferred.kind.clone());
        Err(ImageError::Unsupported(kind))
    }
}

/// Serves local images from a directory already published at `base_url`,
/// e.g. a bucket synced with the Markdown's image folder.
#[derive(Debug, Clone)]
pub struct HostedFileRenderer {
    base_url: Url,
}

impl HostedFileRenderer {
    pub fn new(base_url: &str) -> Result<Self, ImageError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(HostedFileRenderer { base_url })
    }
}

impl ImageRenderer for HostedFileRenderer {
    fn render(&self, image: &ImageDefinition) -> Result<String, ImageError> {
        match &image.deferred {
            Some(deferred) if deferred.kind == SourceKind::Local => {
                let relative = deferred.source.trim_start_matches("./").trim_start_matches('/');
                Ok(self.base_url.join(relative)?.to_string())
            }
            Some(deferred) => Err(ImageError::Unsupported(deferred.kind.clone())),
            None => Err(ImageError::Render("nothing to render".to_string())),
        }
    }
}

/// Renders every deferred image across `slides` on the rayon pool. Failed
/// images keep no URL; returns how many were resolved.
pub fn resolve_images<R: ImageRenderer + ?Sized>(slides: &mut [SlideDefinition], renderer: &R) -> usize {
    let pending: Vec<&mut ImageDefinition> = slides
        .iter_mut()
        .flat_map(SlideDefinition::images_mut)
        .filter(|image| image.needs_rendering())
        .collect();
    if pending.is_empty() {
        return 0;
    }
    debug!("Rendering {} deferred images", pending.len());

    pending
        .into_par_iter()
        .map(|image| match renderer.render(image) {
            Ok(url) => {
                image.url = Some(url);
                1
            }
            Err(e) => {
                warn!("Dropping image: {e}");
                0
            }
        })
        .sum()
}

/// Resolves, then removes images that still have no URL.
pub fn resolve_and_prune<R: ImageRenderer + ?Sized>(slides: &mut [SlideDefinition], renderer: &R) {
    let resolved = resolve_images(slides, renderer);
    let dropped: usize = slides
        .iter_mut()
        .map(SlideDefinition::prune_unresolved_images)
        .sum();
    if resolved > 0 || dropped > 0 {
        debug!("Images: {resolved} resolved, {dropped} dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::BodyDefinition;

    fn slide_with(images: Vec<ImageDefinition>) -> SlideDefinition {
        let mut slide = SlideDefinition::new("s", 0);
        slide.bodies.push(BodyDefinition {
            images,
            ..Default::default()
        });
        slide
    }

    #[test]
    fn test_hosted_file_renderer_joins_base() {
        let renderer = HostedFileRenderer::new("https://cdn.example.com/deck").unwrap();
        let image = ImageDefinition::deferred(SourceKind::Local, "./img/cat.png");
        assert_eq!(
            renderer.render(&image).unwrap(),
            "https://cdn.example.com/deck/img/cat.png"
        );
        let svg = ImageDefinition::deferred(SourceKind::Svg, "<svg/>");
        assert!(matches!(renderer.render(&svg), Err(ImageError::Unsupported(SourceKind::Svg))));
    }

    #[test]
    fn test_failed_images_are_pruned() {
        let mut slides = vec![slide_with(vec![
            ImageDefinition::from_url("https://example.com/a.png"),
            ImageDefinition::deferred(SourceKind::Math, "x^2"),
            ImageDefinition::deferred(SourceKind::Local, "b.png"),
        ])];
        let renderer = HostedFileRenderer::new("https://cdn.example.com/").unwrap();
        resolve_and_prune(&mut slides, &renderer);

        let urls: Vec<&str> = slides[0]
            .images()
            .filter_map(|image| image.url.as_deref())
            .collect();
        assert_eq!(
            urls,
            vec!["https://example.com/a.png", "https://cdn.example.com/b.png"]
        );
    }

    #[test]
    fn test_no_renderer_drops_everything_deferred() {
        let mut slides = vec![slide_with(vec![ImageDefinition::deferred(
            SourceKind::Svg,
            "<svg/>",
        )])];
        assert_eq!(resolve_images(&mut slides, &NoRenderer), 0);
        assert_eq!(slides[0].prune_unresolved_images(), 1);
    }
}
