use std::sync::Arc;

use crate::exact::decimal::{DecimalContext, ExactCoordinate};
use crate::foundation::core::Rgb8;
use crate::foundation::error::{GridError, GridResult};
use crate::grid::model::ColorGrid;

/// The externally produced starting grid and the native size of its cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainSeed<const N: usize> {
    grid: Arc<ColorGrid<N>>,
    cell_size: [ExactCoordinate; N],
}

impl<const N: usize> ChainSeed<N> {
    /// Seed from a grid and its cell size; every cell size must be positive.
    pub fn new(grid: ColorGrid<N>, cell_size: [ExactCoordinate; N]) -> GridResult<Self> {
        if let Some(axis) = cell_size.iter().position(|c| !c.is_positive()) {
            return Err(GridError::validation(format!(
                "seed cell size on axis {axis} must be positive, got {}",
                cell_size[axis]
            )));
        }
        Ok(Self {
            grid: Arc::new(grid),
            cell_size,
        })
    }

    /// The seed grid, shared with the first level's reader.
    pub fn grid(&self) -> &Arc<ColorGrid<N>> {
        &self.grid
    }

    /// Native cell size per axis.
    pub fn cell_size(&self) -> &[ExactCoordinate; N] {
        &self.cell_size
    }

    /// Cells per axis of the seed grid.
    pub fn resolution(&self) -> [u32; N] {
        self.grid.dims()
    }

    /// Total extent per axis: `cell_size × resolution`.
    pub fn extent(&self, ctx: &DecimalContext) -> [ExactCoordinate; N] {
        let dims = self.grid.dims();
        std::array::from_fn(|a| ctx.mul_int(&self.cell_size[a], u64::from(dims[a])))
    }
}

impl ChainSeed<1> {
    /// A row of note colors, each `cell_size` wide.
    pub fn notes(colors: Vec<Rgb8>, cell_size: ExactCoordinate) -> GridResult<Self> {
        Self::new(ColorGrid::from_colors(colors)?, [cell_size])
    }
}

impl ChainSeed<2> {
    /// Rows of pixel colors (top to bottom), each pixel `cell_width × cell_height`.
    pub fn pixels(
        rows: Vec<Vec<Rgb8>>,
        cell_width: ExactCoordinate,
        cell_height: ExactCoordinate,
    ) -> GridResult<Self> {
        Self::new(ColorGrid::from_rows(rows)?, [cell_width, cell_height])
    }
}
