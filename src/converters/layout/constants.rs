//! Layout names and the default geometry used when a template gives none.

use crate::models::common::EMU_PER_PT;

pub const LAYOUT_BLANK: &str = "BLANK";
pub const LAYOUT_TITLE: &str = "TITLE";
pub const LAYOUT_TITLE_AND_BODY: &str = "TITLE_AND_BODY";
pub const LAYOUT_TITLE_AND_TWO_COLUMNS: &str = "TITLE_AND_TWO_COLUMNS";
pub const LAYOUT_TITLE_ONLY: &str = "TITLE_ONLY";
pub const LAYOUT_SECTION_HEADER: &str = "SECTION_HEADER";
pub const LAYOUT_SECTION_TITLE_AND_DESCRIPTION: &str = "SECTION_TITLE_AND_DESCRIPTION";
pub const LAYOUT_MAIN_POINT: &str = "MAIN_POINT";

/// Font size for `{.big}` text outside a MAIN_POINT layout.
pub const BIG_TEXT_PT: f64 = 60.0;

/// Space between generated columns and stacked tables.
pub const GAP_EMU: f64 = 12.0 * EMU_PER_PT;

// Default boxes as (x, y, width, height) fractions of the page.
pub const TITLE_BOX: (f64, f64, f64, f64) = (0.05, 0.05, 0.9, 0.15);
pub const SUBTITLE_BOX: (f64, f64, f64, f64) = (0.05, 0.2, 0.9, 0.1);
pub const BODY_BOX: (f64, f64, f64, f64) = (0.05, 0.25, 0.9, 0.68);
pub const BODY_BELOW_SUBTITLE_BOX: (f64, f64, f64, f64) = (0.05, 0.32, 0.9, 0.61);
pub const FULL_PAGE_BOX: (f64, f64, f64, f64) = (0.05, 0.05, 0.9, 0.9);
