use crate::foundation::core::Rgb8;
use crate::foundation::error::{GridError, GridResult};

/// Row-major color grid over `N` axes.
///
/// Axis 0 is horizontal (columns) and varies fastest; axis 1 is vertical (rows). A 1-D grid is
/// a row of notes, a 2-D grid a rectangle of pixels whose row 0 is the first row supplied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorGrid<const N: usize> {
    dims: [u32; N],
    cells: Vec<Rgb8>,
}

/// A row of notes.
pub type NoteRow = ColorGrid<1>;
/// A rectangle of pixels.
pub type PixelGrid = ColorGrid<2>;

impl<const N: usize> ColorGrid<N> {
    /// Grid from row-major `cells`. Every axis must be non-empty and `cells` must fill `dims`.
    pub fn from_cells(dims: [u32; N], cells: Vec<Rgb8>) -> GridResult<Self> {
        if N == 0 {
            return Err(GridError::validation("color grid needs at least one axis"));
        }
        if let Some(axis) = dims.iter().position(|&d| d == 0) {
            return Err(GridError::validation(format!(
                "color grid axis {axis} has zero cells"
            )));
        }
        let expected = cell_count(dims);
        if cells.len() != expected {
            return Err(GridError::validation(format!(
                "color grid {dims:?} expects {expected} cells, got {}",
                cells.len()
            )));
        }
        Ok(Self { dims, cells })
    }

    /// Grid with every cell set to `color`.
    pub fn uniform(dims: [u32; N], color: Rgb8) -> GridResult<Self> {
        Self::from_cells(dims, vec![color; cell_count(dims)])
    }

    /// Cells per axis.
    pub fn dims(&self) -> [u32; N] {
        self.dims
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false` for a validated grid.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major cell colors.
    pub fn cells(&self) -> &[Rgb8] {
        &self.cells
    }

    /// Color at a per-axis index, or `None` when any axis is out of bounds.
    pub fn get(&self, index: [usize; N]) -> Option<Rgb8> {
        let mut flat = 0usize;
        let mut stride = 1usize;
        for (axis, &i) in index.iter().enumerate() {
            let dim = self.dims[axis] as usize;
            if i >= dim {
                return None;
            }
            flat += i * stride;
            stride *= dim;
        }
        self.cells.get(flat).copied()
    }

    /// Number of cells equal to `color`.
    pub fn count(&self, color: Rgb8) -> usize {
        self.cells.iter().filter(|&&c| c == color).count()
    }

    /// Per-axis index of a flat, row-major position.
    pub fn unflatten(dims: [u32; N], mut flat: usize) -> [usize; N] {
        let mut index = [0usize; N];
        for (axis, slot) in index.iter_mut().enumerate() {
            let dim = dims[axis] as usize;
            *slot = flat % dim;
            flat /= dim;
        }
        index
    }
}

impl ColorGrid<1> {
    /// Note row from colors, left to right.
    pub fn from_colors(colors: Vec<Rgb8>) -> GridResult<Self> {
        let len = u32::try_from(colors.len())
            .map_err(|_| GridError::validation("note row is too long"))?;
        Self::from_cells([len], colors)
    }
}

impl ColorGrid<2> {
    /// Build from rows (top to bottom); every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<Rgb8>>) -> GridResult<Self> {
        let height = u32::try_from(rows.len())
            .map_err(|_| GridError::validation("pixel grid has too many rows"))?;
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if let Some(bad) = rows.iter().position(|r| r.len() != width) {
            return Err(GridError::validation(format!(
                "pixel grid row {bad} has {} cells, expected {width}",
                rows[bad].len()
            )));
        }
        let width = u32::try_from(width)
            .map_err(|_| GridError::validation("pixel grid rows are too long"))?;
        Self::from_cells([width, height], rows.into_iter().flatten().collect())
    }

    /// Pixels per row.
    pub fn width(&self) -> u32 {
        self.dims[0]
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.dims[1]
    }

    /// Rows, top first.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb8]> {
        self.cells.chunks_exact(self.dims[0] as usize)
    }

    /// Owned copy of [`Self::rows`].
    pub fn to_rows(&self) -> Vec<Vec<Rgb8>> {
        self.rows().map(<[Rgb8]>::to_vec).collect()
    }
}

pub(crate) fn cell_count<const N: usize>(dims: [u32; N]) -> usize {
    dims.iter().map(|&d| d as usize).product()
}

#[cfg(test)]
#[path = "../../tests/unit/grid/model.rs"]
mod tests;
