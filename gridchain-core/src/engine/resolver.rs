use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::exact::decimal::{DecimalContext, ExactCoordinate};
use crate::foundation::core::Rgb8;
use crate::foundation::error::GridResult;
use crate::grid::model::ColorGrid;

/// Fixed colors used in place of inherited ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Sentinels {
    /// Color of a cell whose center sits on a previous grid line.
    pub boundary: Rgb8,
    /// Color of a cell whose inherited index falls outside the previous grid.
    pub out_of_range: Rgb8,
}

impl Sentinels {
    /// Note rows: boundary notes are blanked to white.
    pub const NOTES: Self = Self {
        boundary: Rgb8::WHITE,
        out_of_range: Rgb8::RED,
    };

    /// Pixel grids: boundary pixels are blanked to black.
    pub const PIXELS: Self = Self {
        boundary: Rgb8::BLACK,
        out_of_range: Rgb8::RED,
    };
}

impl Default for Sentinels {
    fn default() -> Self {
        Self::NOTES
    }
}

/// How a cell obtained its color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellOutcome {
    /// Copied from the previous cell containing the center.
    Inherited,
    /// Center on a previous grid line on some axis.
    Boundary,
    /// Index past the previous grid.
    OutOfRange,
}

/// Index of the previous cell containing `center`: `floor(center / previous_cell_size)`.
///
/// Returns `None` when the index is negative or does not fit a `usize`.
pub fn color_index(
    ctx: &DecimalContext,
    center: &ExactCoordinate,
    previous_cell_size: &ExactCoordinate,
) -> GridResult<Option<usize>> {
    let index: BigInt = ctx.div_floor(center, previous_cell_size)?;
    Ok(index.to_usize())
}

/// Pick the color of one cell.
///
/// Never panics: an index outside `previous` resolves to [`Sentinels::out_of_range`].
pub fn resolve_cell<const N: usize>(
    on_boundary: bool,
    indices: &[Option<usize>; N],
    previous: &ColorGrid<N>,
    sentinels: &Sentinels,
) -> (Rgb8, CellOutcome) {
    if on_boundary {
        return (sentinels.boundary, CellOutcome::Boundary);
    }
    let mut index = [0usize; N];
    for (slot, i) in index.iter_mut().zip(indices) {
        match i {
            Some(i) => *slot = *i,
            None => return (sentinels.out_of_range, CellOutcome::OutOfRange),
        }
    }
    match previous.get(index) {
        Some(color) => (color, CellOutcome::Inherited),
        None => (sentinels.out_of_range, CellOutcome::OutOfRange),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/resolver.rs"]
mod tests;
