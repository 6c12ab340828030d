use crate::engine::alignment::{AxisAlignment, any_axis_on_boundary, test_axis};
use crate::engine::resolver::{CellOutcome, Sentinels, color_index, resolve_cell};
use crate::exact::decimal::{DecimalContext, ExactCoordinate};
use crate::foundation::core::Rgb8;
use crate::foundation::error::{GridError, GridResult};
use crate::grid::model::{ColorGrid, cell_count};
use crate::grid::resolution::format_resolution;

/// Everything one level needs from its predecessor.
#[derive(Clone, Copy, Debug)]
pub struct LevelSpec<'a, const N: usize> {
    /// Cells per axis of the new level.
    pub resolution: [u32; N],
    /// Cell size of the new level.
    pub cell_size: &'a [ExactCoordinate; N],
    /// Cell size of the grid being read.
    pub previous_cell_size: &'a [ExactCoordinate; N],
    /// Grid being read.
    pub previous_grid: &'a ColorGrid<N>,
}

/// Per-outcome cell counts of one level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct LevelStats {
    /// See [`CellOutcome::Inherited`].
    pub inherited: u64,
    /// See [`CellOutcome::Boundary`].
    pub boundary: u64,
    /// See [`CellOutcome::OutOfRange`].
    pub out_of_range: u64,
}

impl LevelStats {
    fn record(&mut self, outcome: CellOutcome) {
        match outcome {
            CellOutcome::Inherited => self.inherited += 1,
            CellOutcome::Boundary => self.boundary += 1,
            CellOutcome::OutOfRange => self.out_of_range += 1,
        }
    }

    /// Number of cells in the level.
    pub fn total(&self) -> u64 {
        self.inherited + self.boundary + self.out_of_range
    }
}

/// Output of [`build_level`]: a freshly allocated grid plus its statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltLevel<const N: usize> {
    /// The level's colors.
    pub grid: ColorGrid<N>,
    /// Outcome counts.
    pub stats: LevelStats,
}

/// Full derivation record of one cell.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CellProbe {
    /// Per-axis position of the cell, x first.
    pub position: Vec<u32>,
    /// Per-axis center coordinate.
    pub centers: Vec<ExactCoordinate>,
    /// Per-axis residue against the previous cell size.
    pub residues: Vec<ExactCoordinate>,
    /// Per-axis index into the previous grid; `None` when negative or unrepresentable.
    pub indices: Vec<Option<usize>>,
    /// How the color was chosen.
    pub outcome: CellOutcome,
    /// Resulting color.
    pub color: Rgb8,
}

struct AxisCell {
    center: ExactCoordinate,
    alignment: AxisAlignment,
    index: Option<usize>,
}

/// Build one level's grid from the previous level.
///
/// The previous grid is only read; the returned grid is always a new allocation.
pub fn build_level<const N: usize>(
    ctx: &DecimalContext,
    spec: &LevelSpec<'_, N>,
    sentinels: &Sentinels,
) -> GridResult<BuiltLevel<N>> {
    let mut cells = Vec::with_capacity(cell_count(spec.resolution));
    let mut stats = LevelStats::default();
    walk_level(ctx, spec, sentinels, |position, _, color, outcome| {
        tracing::trace!(?position, %color, ?outcome, "cell resolved");
        stats.record(outcome);
        cells.push(color);
    })?;
    let grid = ColorGrid::from_cells(spec.resolution, cells)?;
    Ok(BuiltLevel { grid, stats })
}

/// Same walk as [`build_level`], but keeping every intermediate value per cell.
pub fn probe_level<const N: usize>(
    ctx: &DecimalContext,
    spec: &LevelSpec<'_, N>,
    sentinels: &Sentinels,
) -> GridResult<Vec<CellProbe>> {
    let mut probes = Vec::with_capacity(cell_count(spec.resolution));
    walk_level(ctx, spec, sentinels, |position, axes, color, outcome| {
        probes.push(CellProbe {
            position: position.iter().map(|&p| p as u32).collect(),
            centers: axes.iter().map(|a| a.center.clone()).collect(),
            residues: axes.iter().map(|a| a.alignment.residue.clone()).collect(),
            indices: axes.iter().map(|a| a.index).collect(),
            outcome,
            color,
        });
    })?;
    Ok(probes)
}

fn walk_level<const N: usize, F>(
    ctx: &DecimalContext,
    spec: &LevelSpec<'_, N>,
    sentinels: &Sentinels,
    mut visit: F,
) -> GridResult<()>
where
    F: FnMut(&[usize; N], &[&AxisCell; N], Rgb8, CellOutcome),
{
    if spec.resolution.contains(&0) {
        return Err(GridError::invalid_resolution(
            0,
            format_resolution(&spec.resolution),
        ));
    }

    // Axes are independent, so each axis is probed once instead of once per cell.
    let axes = (0..N)
        .map(|a| {
            axis_cells(
                ctx,
                spec.resolution[a],
                &spec.cell_size[a],
                &spec.previous_cell_size[a],
            )
        })
        .collect::<GridResult<Vec<_>>>()?;

    for flat in 0..cell_count(spec.resolution) {
        let position = ColorGrid::<N>::unflatten(spec.resolution, flat);
        let cell: [&AxisCell; N] = std::array::from_fn(|a| &axes[a][position[a]]);
        let indices: [Option<usize>; N] = std::array::from_fn(|a| cell[a].index);
        let (color, outcome) = resolve_cell(
            any_axis_on_boundary(cell.iter().map(|c| &c.alignment)),
            &indices,
            spec.previous_grid,
            sentinels,
        );
        visit(&position, &cell, color, outcome);
    }
    Ok(())
}

fn axis_cells(
    ctx: &DecimalContext,
    resolution: u32,
    cell_size: &ExactCoordinate,
    previous_cell_size: &ExactCoordinate,
) -> GridResult<Vec<AxisCell>> {
    if !cell_size.is_positive() {
        return Err(GridError::arithmetic(format!(
            "cell size must be positive, got {cell_size}"
        )));
    }
    let half = ctx.div(cell_size, &ExactCoordinate::from_integer(2))?;
    (0..resolution)
        .map(|j| {
            let start = ctx.mul_int(cell_size, u64::from(j));
            let center = ctx.add(&start, &half);
            let alignment = test_axis(ctx, &center, previous_cell_size)?;
            let index = color_index(ctx, &center, previous_cell_size)?;
            Ok(AxisCell {
                center,
                alignment,
                index,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/engine/level.rs"]
mod tests;
