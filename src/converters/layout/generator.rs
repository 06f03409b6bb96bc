// src/converters/layout/generator.rs

//! Turns matched slides into ordered `batchUpdate` requests.

use log::{debug, warn};

use super::constants::{BIG_TEXT_PT, GAP_EMU, LAYOUT_MAIN_POINT};
use super::geometry::Bounds;
use super::matcher::{BoundLayout, PlaceholderRole};
use crate::definitions::{
    BodyDefinition, ListKind, Placement, SlideDefinition, TableDefinition, TextDefinition,
};
use crate::models::common::{Dimension, EMU_PER_PT};
use crate::models::page_properties::PageProperties;
use crate::models::properties::TextStyle;
use crate::models::requests::{
    BulletGlyphPreset, CreateImageRequest, CreateParagraphBulletsRequest, CreateShapeRequest,
    CreateSlideRequest, CreateTableRequest, CreateVideoRequest, DeleteObjectRequest,
    InsertTextRequest, PageElementProperties, Request, TableCellLocation, TextRange,
    UpdatePagePropertiesRequest, UpdateTextStyleRequest, VideoSource,
};
use crate::models::shape::ShapeType;

const BACKGROUND_FIELDS: &str = "pageBackgroundFill.stretchedPictureFill.contentUrl";

/// A bullet range after index shifting, ready to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulletRange {
    pub start: usize,
    pub end: usize,
    pub kind: ListKind,
}

/// Requests that build one slide, in an order the service accepts: the page,
/// placeholder cleanup, generated boxes, the background, then each text
/// container's insert, styles and bullets, then tables and media.
pub fn generate_slide_requests(bound: &BoundLayout, slide: &SlideDefinition) -> Vec<Request> {
    let mut requests = vec![Request::CreateSlide(CreateSlideRequest {
        object_id: bound.slide_id.clone(),
        insertion_index: None,
        slide_layout_reference: bound.layout.clone(),
        placeholder_id_mappings: bound.placeholder_mappings.clone(),
    })];

    for object_id in &bound.unused {
        requests.push(Request::DeleteObject(DeleteObjectRequest {
            object_id: object_id.clone(),
        }));
    }

    for binding in bound.generated() {
        let Bounds {
            x,
            y,
            width,
            height,
        } = binding.bounds;
        requests.push(Request::CreateShape(CreateShapeRequest {
            object_id: binding.object_id.clone(),
            shape_type: ShapeType::TextBox,
            element_properties: PageElementProperties::emu_box(&bound.slide_id, x, y, width, height),
        }));
    }

    if let Some(background) = &slide.background_image {
        match &background.url {
            Some(url) => requests.push(Request::UpdatePageProperties(UpdatePagePropertiesRequest {
                object_id: bound.slide_id.clone(),
                page_properties: PageProperties::background_picture(url.clone()),
                fields: BACKGROUND_FIELDS.to_string(),
            })),
            None => warn!("{}: background image has no URL, skipped", slide.object_id),
        }
    }

    // MAIN_POINT already renders its text large.
    let enlarge = bound.layout_name != LAYOUT_MAIN_POINT;
    let containers = [
        (PlaceholderRole::Title, slide.title.as_ref()),
        (PlaceholderRole::Subtitle, slide.subtitle.as_ref()),
    ]
    .into_iter()
    .chain(
        slide
            .bodies
            .iter()
            .enumerate()
            .map(|(column, body)| (PlaceholderRole::Body(column), body.text.as_ref())),
    );
    for (role, text) in containers {
        let Some(text) = text.filter(|text| !text.is_empty()) else {
            continue;
        };
        let Some(binding) = bound.binding(role) else {
            debug!("{}: no binding for {role}, text dropped", slide.object_id);
            continue;
        };
        requests.extend(text_requests(&binding.object_id, None, text, enlarge));
    }

    let table_slots = bound.table_area.rows(slide.tables.len(), GAP_EMU);
    for (index, (table, slot)) in slide.tables.iter().zip(table_slots).enumerate() {
        let table_id = format!("{}-table-{}", bound.slide_id, index + 1);
        requests.extend(table_requests(&bound.slide_id, &table_id, table, slot));
    }

    let mut media = MediaCounter::default();
    for (column, body) in slide.bodies.iter().enumerate() {
        let area = bound
            .body_areas
            .get(column)
            .copied()
            .unwrap_or(bound.table_area);
        let area = if body.has_text() { area.lower_half() } else { area };
        requests.extend(media_requests(&bound.slide_id, body, area, &mut media));
    }

    requests
}

/// Requests that write `notes` into a slide's speaker notes shape.
pub fn generate_notes_requests(notes_object_id: &str, notes: &TextDefinition) -> Vec<Request> {
    if notes.is_empty() {
        return Vec::new();
    }
    text_requests(notes_object_id, None, notes, false)
}

/// Insert, then styles, then bullets, for one text container.
fn text_requests(
    object_id: &str,
    cell_location: Option<TableCellLocation>,
    text: &TextDefinition,
    enlarge: bool,
) -> Vec<Request> {
    let mut requests = vec![Request::InsertText(InsertTextRequest {
        object_id: object_id.to_string(),
        cell_location,
        text: text.raw_text.clone(),
        insertion_index: 0,
    })];

    if text.big && enlarge {
        requests.push(Request::UpdateTextStyle(UpdateTextStyleRequest {
            object_id: object_id.to_string(),
            cell_location,
            style: TextStyle {
                font_size: Some(Dimension::pt(BIG_TEXT_PT)),
                ..Default::default()
            },
            text_range: TextRange::all(),
            fields: "fontSize".to_string(),
        }));
    }

    for run in &text.text_runs {
        let style = run.style.to_text_style();
        let fields = style.field_mask();
        if fields.is_empty() {
            continue;
        }
        requests.push(Request::UpdateTextStyle(UpdateTextStyleRequest {
            object_id: object_id.to_string(),
            cell_location,
            style,
            text_range: TextRange::fixed(run.start, run.end),
            fields,
        }));
    }

    for bullet in bullet_ranges(text) {
        let bullet_preset = match bullet.kind {
            ListKind::Ordered => BulletGlyphPreset::NumberedDigitAlphaRoman,
            ListKind::Unordered => BulletGlyphPreset::BulletDiscCircleSquare,
        };
        requests.push(Request::CreateParagraphBullets(CreateParagraphBulletsRequest {
            object_id: object_id.to_string(),
            cell_location,
            text_range: TextRange::fixed(bullet.start, bullet.end),
            bullet_preset,
        }));
    }

    requests
}

/// The outermost list ranges of `text`, shifted left by the leading tabs the
/// service removes when earlier ranges get their bullets.
pub fn bullet_ranges(text: &TextDefinition) -> Vec<BulletRange> {
    let tab_offsets = leading_tab_offsets(&text.raw_text);
    let mut ranges = Vec::new();
    let mut covered_until = 0;
    let mut removed = 0;
    for list in &text.list_markers {
        // Nested ranges are bulleted with their parent.
        if list.start < covered_until {
            continue;
        }
        covered_until = list.end;
        ranges.push(BulletRange {
            start: list.start - removed,
            end: list.end - removed,
            kind: list.kind,
        });
        removed += tab_offsets
            .iter()
            .filter(|offset| (list.start..list.end).contains(*offset))
            .count();
    }
    ranges
}

/// UTF-16 offsets of tabs that indent a paragraph.
fn leading_tab_offsets(text: &str) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut offset = 0;
    let mut line_start = true;
    for c in text.chars() {
        match c {
            '\n' => line_start = true,
            '\t' if line_start => offsets.push(offset),
            _ => line_start = false,
        }
        offset += c.len_utf16();
    }
    offsets
}

fn table_requests(
    page_id: &str,
    table_id: &str,
    table: &TableDefinition,
    slot: Bounds,
) -> Vec<Request> {
    if table.rows == 0 || table.columns == 0 {
        return Vec::new();
    }
    let mut requests = vec![Request::CreateTable(CreateTableRequest {
        object_id: table_id.to_string(),
        element_properties: PageElementProperties::emu_box(
            page_id,
            slot.x,
            slot.y,
            slot.width,
            slot.height,
        ),
        rows: table.rows as u32,
        columns: table.columns as u32,
    })];
    for (row, cells) in table.cells.iter().enumerate() {
        for (column, cell) in cells.iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            let location = TableCellLocation {
                row_index: row as u32,
                column_index: column as u32,
            };
            requests.extend(text_requests(table_id, Some(location), cell, false));
        }
    }
    requests
}

#[derive(Debug, Default)]
struct MediaCounter {
    images: usize,
    videos: usize,
}

/// Images then videos of one body, stacked in `area`.
fn media_requests(
    page_id: &str,
    body: &BodyDefinition,
    area: Bounds,
    counter: &mut MediaCounter,
) -> Vec<Request> {
    let images: Vec<_> = body
        .images
        .iter()
        .filter_map(|image| match &image.url {
            Some(url) => Some((url, &image.placement)),
            None => {
                warn!("{page_id}: image without URL skipped");
                None
            }
        })
        .collect();
    let slots = area.rows(images.len() + body.videos.len(), GAP_EMU);
    let mut slots = slots.into_iter();
    let mut requests = Vec::new();

    for ((url, placement), slot) in images.into_iter().zip(slots.by_ref()) {
        counter.images += 1;
        requests.push(Request::CreateImage(CreateImageRequest {
            object_id: format!("{page_id}-image-{}", counter.images),
            url: url.clone(),
            element_properties: place(page_id, slot, placement),
        }));
    }
    for (video, slot) in body.videos.iter().zip(slots) {
        counter.videos += 1;
        requests.push(Request::CreateVideo(CreateVideoRequest {
            object_id: format!("{page_id}-video-{}", counter.videos),
            element_properties: place(page_id, slot, &video.placement),
            source: VideoSource::Youtube,
            id: video.id.clone(),
        }));
    }
    requests
}

/// Fits media into `slot` honouring its size, padding and offset hints.
fn place(page_id: &str, slot: Bounds, placement: &Placement) -> PageElementProperties {
    let slot = slot.inset_pt(placement.padding);
    let width = placement.width.map_or(slot.width, |w| w * EMU_PER_PT);
    let height = placement.height.map_or(slot.height, |h| h * EMU_PER_PT);
    let fitted = slot
        .fit(width, height)
        .offset_pt(placement.offset_x, placement.offset_y);
    PageElementProperties::emu_box(page_id, fitted.x, fitted.y, fitted.width, fitted.height)
}
