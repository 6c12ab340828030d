use crate::foundation::core::{Rect, Rgb8};
use crate::foundation::error::{GridError, GridResult};
use crate::layout::placement::ChainLayout;

/// Output settings for [`rasterize`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RasterOpts {
    /// Output pixels per layout unit.
    pub pixels_per_unit: f64,
    /// Blank border around the layout bounds, in output pixels.
    pub margin: u32,
    /// Fill of everything outside the placed cells.
    pub background: Rgb8,
    /// Color of the 1px cell border.
    pub outline: Rgb8,
    /// Largest accepted width or height.
    pub max_dimension: u32,
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            pixels_per_unit: 32.0,
            margin: 8,
            background: Rgb8::from_u32(0x2b2b2b),
            outline: Rgb8::BLACK,
            max_dimension: 16_384,
        }
    }
}

/// Straight (non-premultiplied) RGBA8, row-major, opaque.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
}

impl RasterImage {
    fn filled(width: u32, height: u32, color: Rgb8) -> Self {
        let rgba = color.to_rgba8();
        let mut data = vec![0u8; (width as usize) * (height as usize) * 4];
        for px in data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// RGBA bytes at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.data[idx..idx + 4]);
        Some(out)
    }

    fn put(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data[idx..idx + 4].copy_from_slice(&rgba);
    }
}

/// Fill every placed cell into a fresh image; later cells paint over earlier ones.
#[tracing::instrument(skip(layout, opts), fields(cells = layout.cells.len()))]
pub fn rasterize(layout: &ChainLayout, opts: &RasterOpts) -> GridResult<RasterImage> {
    if !opts.pixels_per_unit.is_finite() || opts.pixels_per_unit <= 0.0 {
        return Err(GridError::validation(format!(
            "pixels_per_unit must be finite and > 0, got {}",
            opts.pixels_per_unit
        )));
    }
    let bounds = layout.bounds;
    let width = dimension(bounds.width(), opts)?;
    let height = dimension(bounds.height(), opts)?;
    tracing::debug!(width, height, "rasterizing chain layout");

    let mut image = RasterImage::filled(width, height, opts.background);
    let outline = opts.outline.to_rgba8();
    for cell in &layout.cells {
        let Some((x0, y0, x1, y1)) = pixel_span(cell.rect, bounds, opts, width, height) else {
            continue;
        };
        let fill = cell.color.to_rgba8();
        let edged = cell.outline && x1 - x0 >= 2 && y1 - y0 >= 2;
        for y in y0..y1 {
            for x in x0..x1 {
                let on_edge = x == x0 || x + 1 == x1 || y == y0 || y + 1 == y1;
                image.put(x, y, if edged && on_edge { outline } else { fill });
            }
        }
    }
    Ok(image)
}

fn dimension(extent: f64, opts: &RasterOpts) -> GridResult<u32> {
    let px = (extent * opts.pixels_per_unit).ceil() + 2.0 * f64::from(opts.margin);
    if !px.is_finite() || px < 1.0 || px > f64::from(opts.max_dimension) {
        return Err(GridError::validation(format!(
            "raster dimension {px} is outside 1..={}",
            opts.max_dimension
        )));
    }
    Ok(px as u32)
}

fn pixel_span(
    rect: Rect,
    bounds: Rect,
    opts: &RasterOpts,
    width: u32,
    height: u32,
) -> Option<(u32, u32, u32, u32)> {
    let map = |v: f64, origin: f64, limit: u32| -> u32 {
        let px = ((v - origin) * opts.pixels_per_unit).round() + f64::from(opts.margin);
        px.clamp(0.0, f64::from(limit)) as u32
    };
    let x0 = map(rect.x0, bounds.x0, width);
    let x1 = map(rect.x1, bounds.x0, width);
    let y0 = map(rect.y0, bounds.y0, height);
    let y1 = map(rect.y1, bounds.y0, height);
    (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
