// src/converters/layout/geometry.rs

use crate::models::common::EMU_PER_PT;
use crate::models::elements::PageElement;

/// An axis-aligned box on the page, in EMU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Bounds {
            x,
            y,
            width,
            height,
        }
    }

    /// A box given as fractions of the page size.
    pub fn page_fraction(page: (f64, f64), x: f64, y: f64, width: f64, height: f64) -> Self {
        let (page_width, page_height) = page;
        Bounds::new(
            page_width * x,
            page_height * y,
            page_width * width,
            page_height * height,
        )
    }

    /// Where `element` renders on its page. `None` when it has no size.
    pub fn of_element(element: &PageElement) -> Option<Self> {
        let (width, height) = element.rendered_size_emu()?;
        let (x, y) = element
            .transform
            .as_ref()
            .map_or((0.0, 0.0), |t| (t.translate_x_emu(), t.translate_y_emu()));
        Some(Bounds::new(x, y, width, height))
    }

    /// Shrinks the box by `padding` points on every side.
    pub fn inset_pt(&self, padding: f64) -> Self {
        let padding = padding * EMU_PER_PT;
        let width = (self.width - 2.0 * padding).max(0.0);
        let height = (self.height - 2.0 * padding).max(0.0);
        Bounds::new(self.x + padding, self.y + padding, width, height)
    }

    /// Moves the box by `(dx, dy)` points.
    pub fn offset_pt(&self, dx: f64, dy: f64) -> Self {
        Bounds::new(
            self.x + dx * EMU_PER_PT,
            self.y + dy * EMU_PER_PT,
            self.width,
            self.height,
        )
    }

    /// Splits the box into `count` side by side columns separated by `gap` EMU.
    pub fn columns(&self, count: usize, gap: f64) -> Vec<Bounds> {
        if count == 0 {
            return Vec::new();
        }
        let gaps = gap * (count - 1) as f64;
        let width = ((self.width - gaps) / count as f64).max(0.0);
        (0..count)
            .map(|i| {
                Bounds::new(
                    self.x + i as f64 * (width + gap),
                    self.y,
                    width,
                    self.height,
                )
            })
            .collect()
    }

    /// Splits the box into `count` stacked rows separated by `gap` EMU.
    pub fn rows(&self, count: usize, gap: f64) -> Vec<Bounds> {
        if count == 0 {
            return Vec::new();
        }
        let gaps = gap * (count - 1) as f64;
        let height = ((self.height - gaps) / count as f64).max(0.0);
        (0..count)
            .map(|i| {
                Bounds::new(
                    self.x,
                    self.y + i as f64 * (height + gap),
                    self.width,
                    height,
                )
            })
            .collect()
    }

    /// The lower half of the box.
    pub fn lower_half(&self) -> Self {
        Bounds::new(
            self.x,
            self.y + self.height / 2.0,
            self.width,
            self.height / 2.0,
        )
    }

    /// A box of `width` x `height` EMU centred in this one, scaled down with
    /// its aspect ratio kept if it does not fit.
    pub fn fit(&self, width: f64, height: f64) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return *self;
        }
        let scale = (self.width / width).min(self.height / height).min(1.0);
        let (width, height) = (width * scale, height * scale);
        Bounds::new(
            self.x + (self.width - width) / 2.0,
            self.y + (self.height - height) / 2.0,
            width,
            height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_share_width_with_gaps() {
        let area = Bounds::new(0.0, 0.0, 1000.0, 500.0);
        let columns = area.columns(2, 100.0);
        assert_eq!(columns[0], Bounds::new(0.0, 0.0, 450.0, 500.0));
        assert_eq!(columns[1], Bounds::new(550.0, 0.0, 450.0, 500.0));
        assert!(area.columns(0, 10.0).is_empty());
    }

    #[test]
    fn test_rows_stack() {
        let rows = Bounds::new(0.0, 100.0, 10.0, 300.0).rows(3, 0.0);
        assert_eq!(rows[2].y, 300.0);
        assert_eq!(rows[2].height, 100.0);
    }

    #[test]
    fn test_fit_keeps_aspect_and_centres() {
        let area = Bounds::new(0.0, 0.0, 400.0, 200.0);
        let fitted = area.fit(800.0, 200.0);
        assert_eq!(fitted, Bounds::new(0.0, 50.0, 400.0, 100.0));
        let small = area.fit(100.0, 100.0);
        assert_eq!(small, Bounds::new(150.0, 50.0, 100.0, 100.0));
    }

    #[test]
    fn test_inset_and_offset_in_points() {
        let area = Bounds::new(0.0, 0.0, 127000.0, 127000.0);
        let inset = area.inset_pt(1.0);
        assert_eq!(inset, Bounds::new(12700.0, 12700.0, 101600.0, 101600.0));
        assert_eq!(area.offset_pt(2.0, 0.0).x, 25400.0);
    }
}
