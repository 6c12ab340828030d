use crate::exact::decimal::{DecimalContext, ExactCoordinate};
use crate::foundation::error::{GridError, GridResult};

/// Result of testing one axis of a cell center against the previous grid lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxisAlignment {
    /// `center mod previous_cell_size`, Euclidean.
    pub residue: ExactCoordinate,
    /// The center sits exactly on a previous grid line.
    pub on_boundary: bool,
}

/// Test whether `center` falls exactly on a grid line spaced `previous_cell_size` apart.
///
/// A residue equal to the divisor itself also counts as a boundary.
pub fn test_axis(
    ctx: &DecimalContext,
    center: &ExactCoordinate,
    previous_cell_size: &ExactCoordinate,
) -> GridResult<AxisAlignment> {
    if !previous_cell_size.is_positive() {
        return Err(GridError::arithmetic(format!(
            "previous cell size must be positive, got {previous_cell_size}"
        )));
    }
    let residue = ctx.rem_euclid(center, previous_cell_size)?;
    let on_boundary = residue.is_zero() || &residue == previous_cell_size;
    Ok(AxisAlignment {
        residue,
        on_boundary,
    })
}

/// A cell is discarded when any one of its axes lines up with a previous boundary.
pub fn any_axis_on_boundary<'a>(axes: impl IntoIterator<Item = &'a AxisAlignment>) -> bool {
    axes.into_iter().any(|a| a.on_boundary)
}

#[cfg(test)]
#[path = "../../tests/unit/engine/alignment.rs"]
mod tests;
