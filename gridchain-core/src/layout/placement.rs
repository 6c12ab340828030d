use crate::chain::driver::{Chain, Level};
use crate::foundation::core::{Rect, Rgb8, Vec2};
use crate::foundation::error::{GridError, GridResult};

/// Geometry knobs for placing a built chain on a plane (y grows downwards).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutOpts {
    /// Uniform factor applied to every coordinate.
    pub scale: f64,
    /// Height of one note, in the same unit as note widths.
    pub note_height: f64,
    /// Distance between the tops of consecutive note rows, in note heights.
    pub row_gap: f64,
    /// Distance between the centers of consecutive images, in first-image widths.
    pub image_stride: f64,
    /// Note rows with at least this many notes are drawn without outlines.
    pub note_outline_limit: u32,
    /// Images with at least this many pixels along either axis are drawn without outlines.
    pub pixel_outline_limit: u32,
}

impl Default for LayoutOpts {
    fn default() -> Self {
        Self {
            scale: 1.0,
            note_height: 1.0,
            row_gap: 1.5,
            image_stride: 1.25,
            note_outline_limit: 500,
            pixel_outline_limit: 100,
        }
    }
}

impl LayoutOpts {
    fn validate(&self) -> GridResult<()> {
        for (name, v) in [
            ("scale", self.scale),
            ("note_height", self.note_height),
            ("row_gap", self.row_gap),
            ("image_stride", self.image_stride),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(GridError::validation(format!(
                    "layout {name} must be finite and > 0, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// One cell of one level, positioned on the plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedCell {
    /// Index of the level the cell belongs to.
    pub level: usize,
    /// Scaled cell rectangle.
    pub rect: Rect,
    /// Fill color.
    pub color: Rgb8,
    /// Whether the rasterizer draws a border around it.
    pub outline: bool,
}

/// Every cell of a chain placed on the plane, plus the union of their rectangles.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainLayout {
    /// Cells in level order, row-major within a level.
    pub cells: Vec<PlacedCell>,
    /// Union of every cell rectangle; [`Rect::ZERO`] when empty.
    pub bounds: Rect,
}

impl ChainLayout {
    fn from_cells(cells: Vec<PlacedCell>) -> Self {
        let bounds = cells
            .iter()
            .map(|c| c.rect)
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::ZERO);
        Self { cells, bounds }
    }

    /// No cells were placed.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Union of the rectangles of one level, or `None` if it has no cells.
    pub fn level_bounds(&self, level: usize) -> Option<Rect> {
        self.cells
            .iter()
            .filter(|c| c.level == level)
            .map(|c| c.rect)
            .reduce(|a, b| a.union(b))
    }
}

/// Stack note rows top to bottom, each centered on `x = 0`.
pub fn layout_notes(chain: &Chain<1>, opts: &LayoutOpts) -> GridResult<ChainLayout> {
    opts.validate()?;
    let mut cells = Vec::new();
    for level in chain.levels() {
        let width = level.cell_size[0].to_f64();
        let [count] = level.resolution;
        let origin = Vec2::new(
            -width * f64::from(count) / 2.0,
            level.index as f64 * opts.row_gap * opts.note_height,
        );
        let outline = count < opts.note_outline_limit;
        for (j, &color) in level.grid.cells().iter().enumerate() {
            let x0 = origin.x + width * j as f64;
            let rect = Rect::new(x0, origin.y, x0 + width, origin.y + opts.note_height);
            cells.push(place(level, rect, color, outline, opts.scale));
        }
    }
    Ok(ChainLayout::from_cells(cells))
}

/// Place images left to right; row 0 of every image is its top row.
pub fn layout_pixels(chain: &Chain<2>, opts: &LayoutOpts) -> GridResult<ChainLayout> {
    opts.validate()?;
    let Some(first) = chain.levels().first() else {
        return Ok(ChainLayout::from_cells(Vec::new()));
    };
    let stride = extent(first).x * opts.image_stride;

    let mut cells = Vec::new();
    for level in chain.levels() {
        let size = extent(level);
        let origin = Vec2::new(level.index as f64 * stride - size.x / 2.0, -size.y / 2.0);
        let cw = level.cell_size[0].to_f64();
        let ch = level.cell_size[1].to_f64();
        let [w, h] = level.resolution;
        let outline = w < opts.pixel_outline_limit && h < opts.pixel_outline_limit;
        for (y, row) in level.grid.rows().enumerate() {
            for (x, &color) in row.iter().enumerate() {
                let x0 = origin.x + cw * x as f64;
                let y0 = origin.y + ch * y as f64;
                let rect = Rect::new(x0, y0, x0 + cw, y0 + ch);
                cells.push(place(level, rect, color, outline, opts.scale));
            }
        }
    }
    Ok(ChainLayout::from_cells(cells))
}

fn extent(level: &Level<2>) -> Vec2 {
    Vec2::new(
        level.cell_size[0].to_f64() * f64::from(level.resolution[0]),
        level.cell_size[1].to_f64() * f64::from(level.resolution[1]),
    )
}

fn place<const N: usize>(
    level: &Level<N>,
    rect: Rect,
    color: Rgb8,
    outline: bool,
    scale: f64,
) -> PlacedCell {
    PlacedCell {
        level: level.index,
        rect: Rect::new(
            rect.x0 * scale,
            rect.y0 * scale,
            rect.x1 * scale,
            rect.y1 * scale,
        ),
        color,
        outline,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/placement.rs"]
mod tests;
