use std::sync::Arc;

use crate::chain::fingerprint::{ChainFingerprint, fingerprint_grids};
use crate::chain::opts::{ChainOpts, ExtentPolicy};
use crate::chain::seed::ChainSeed;
use crate::engine::level::{CellProbe, LevelSpec, LevelStats, build_level, probe_level};
use crate::exact::decimal::{DecimalContext, ExactCoordinate};
use crate::foundation::error::{GridError, GridResult};
use crate::grid::model::ColorGrid;
use crate::grid::resolution::{format_resolution, validate_resolutions};

/// One built resolution step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level<const N: usize> {
    /// Position in the resolution list.
    pub index: usize,
    /// Cells per axis.
    pub resolution: [u32; N],
    /// `extent / resolution` per axis.
    pub cell_size: [ExactCoordinate; N],
    /// Cell size of the seed or level this one was derived from.
    pub previous_cell_size: [ExactCoordinate; N],
    /// Shared and immutable; the next level reads it while callers may still hold it.
    pub grid: Arc<ColorGrid<N>>,
    /// Outcome counts.
    pub stats: LevelStats,
}

/// Every level of one build, in resolution-list order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain<const N: usize> {
    opts: ChainOpts,
    levels: Vec<Level<N>>,
}

impl<const N: usize> Chain<N> {
    /// Options the chain was built with.
    pub fn opts(&self) -> &ChainOpts {
        &self.opts
    }

    /// Levels in build order.
    pub fn levels(&self) -> &[Level<N>] {
        &self.levels
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// `true` only for a chain built from no resolutions, which the driver never produces.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The final level.
    pub fn last(&self) -> Option<&Level<N>> {
        self.levels.last()
    }

    /// Take ownership of the levels.
    pub fn into_levels(self) -> Vec<Level<N>> {
        self.levels
    }

    /// Fingerprint of every level grid, in order.
    pub fn fingerprint(&self) -> ChainFingerprint {
        fingerprint_grids(self.levels.iter().map(|l| l.grid.as_ref()))
    }
}

/// Lazily builds levels one after another from a seed.
///
/// The whole resolution list is validated up front, so a driver that was created never yields
/// an invalid-resolution error. It stops after the first arithmetic error.
#[derive(Debug)]
pub struct ChainDriver<'a, const N: usize> {
    ctx: DecimalContext,
    opts: ChainOpts,
    resolutions: std::iter::Enumerate<std::slice::Iter<'a, [u32; N]>>,
    fixed_extent: [ExactCoordinate; N],
    previous_grid: Arc<ColorGrid<N>>,
    previous_cell_size: [ExactCoordinate; N],
    previous_resolution: [u32; N],
    failed: bool,
}

impl<'a, const N: usize> ChainDriver<'a, N> {
    /// Validate `resolutions` and prepare to build them starting from `seed`.
    ///
    /// Fails with [`GridError::EmptyResolutionList`] or [`GridError::InvalidResolution`].
    pub fn new(
        seed: &ChainSeed<N>,
        resolutions: &'a [[u32; N]],
        opts: ChainOpts,
    ) -> GridResult<Self> {
        validate_resolutions(resolutions)?;
        let ctx = DecimalContext::new(opts.precision);
        Ok(Self {
            ctx,
            opts,
            resolutions: resolutions.iter().enumerate(),
            fixed_extent: seed.extent(&ctx),
            previous_grid: Arc::clone(seed.grid()),
            previous_cell_size: seed.cell_size().clone(),
            previous_resolution: seed.resolution(),
            failed: false,
        })
    }

    /// Probe the next level cell by cell without advancing the driver.
    pub fn probe_next(&self) -> Option<GridResult<Vec<CellProbe>>> {
        let (_, resolution) = self.resolutions.clone().next()?;
        let probes = self.cell_size_for(resolution).and_then(|cell_size| {
            let spec = self.spec(*resolution, &cell_size);
            probe_level(&self.ctx, &spec, &self.opts.sentinels)
        });
        Some(probes)
    }

    fn spec<'s>(
        &'s self,
        resolution: [u32; N],
        cell_size: &'s [ExactCoordinate; N],
    ) -> LevelSpec<'s, N> {
        LevelSpec {
            resolution,
            cell_size,
            previous_cell_size: &self.previous_cell_size,
            previous_grid: &self.previous_grid,
        }
    }

    fn cell_size_for(&self, resolution: &[u32; N]) -> GridResult<[ExactCoordinate; N]> {
        let sizes = (0..N)
            .map(|a| {
                let extent = match self.opts.extent {
                    ExtentPolicy::Carried => self.ctx.mul_int(
                        &self.previous_cell_size[a],
                        u64::from(self.previous_resolution[a]),
                    ),
                    ExtentPolicy::Fixed => self.fixed_extent[a].clone(),
                };
                self.ctx
                    .div(&extent, &ExactCoordinate::from(resolution[a]))
            })
            .collect::<GridResult<Vec<_>>>()?;
        <[ExactCoordinate; N]>::try_from(sizes)
            .map_err(|_| GridError::validation("cell size does not match the grid axes"))
    }

    fn build_next(&mut self, index: usize, resolution: [u32; N]) -> GridResult<Level<N>> {
        let cell_size = self.cell_size_for(&resolution)?;
        let built = build_level(
            &self.ctx,
            &self.spec(resolution, &cell_size),
            &self.opts.sentinels,
        )?;
        tracing::debug!(
            level = index,
            resolution = %format_resolution(&resolution),
            cell_size = %join(&cell_size),
            inherited = built.stats.inherited,
            boundary = built.stats.boundary,
            out_of_range = built.stats.out_of_range,
            "level built"
        );

        let grid = Arc::new(built.grid);
        let previous_cell_size = std::mem::replace(&mut self.previous_cell_size, cell_size.clone());
        self.previous_grid = Arc::clone(&grid);
        self.previous_resolution = resolution;
        Ok(Level {
            index,
            resolution,
            cell_size,
            previous_cell_size,
            grid,
            stats: built.stats,
        })
    }
}

impl<const N: usize> Iterator for ChainDriver<'_, N> {
    type Item = GridResult<Level<N>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let (index, resolution) = self.resolutions.next()?;
        let level = self.build_next(index, *resolution);
        self.failed = level.is_err();
        Some(level)
    }
}

/// Build every level of a chain, or nothing at all.
#[tracing::instrument(
    skip(seed, resolutions, opts),
    fields(
        axes = N,
        levels = resolutions.len(),
        precision = opts.precision.digits(),
        extent = ?opts.extent
    )
)]
pub fn build_chain<const N: usize>(
    seed: &ChainSeed<N>,
    resolutions: &[[u32; N]],
    opts: ChainOpts,
) -> GridResult<Chain<N>> {
    let levels = ChainDriver::new(seed, resolutions, opts)?.collect::<GridResult<Vec<_>>>()?;
    Ok(Chain { opts, levels })
}

/// Build a note chain from a plain list of note counts.
pub fn build_note_chain(
    seed: &ChainSeed<1>,
    resolutions: &[u32],
    opts: ChainOpts,
) -> GridResult<Chain<1>> {
    let resolutions: Vec<[u32; 1]> = resolutions.iter().map(|&r| [r]).collect();
    build_chain(seed, &resolutions, opts)
}

/// Probe one level of a chain: every earlier level is built, then `level` is probed.
#[tracing::instrument(skip(seed, resolutions, opts))]
pub fn probe_chain_level<const N: usize>(
    seed: &ChainSeed<N>,
    resolutions: &[[u32; N]],
    opts: ChainOpts,
    level: usize,
) -> GridResult<Vec<CellProbe>> {
    if level >= resolutions.len() {
        return Err(GridError::validation(format!(
            "level {level} does not exist in a chain of {} levels",
            resolutions.len()
        )));
    }
    let mut driver = ChainDriver::new(seed, resolutions, opts)?;
    for _ in 0..level {
        if let Some(built) = driver.next() {
            built?;
        }
    }
    driver
        .probe_next()
        .unwrap_or_else(|| Err(GridError::validation(format!("level {level} is missing"))))
}

fn join(sizes: &[ExactCoordinate]) -> String {
    sizes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("x")
}

#[cfg(test)]
#[path = "../../tests/unit/chain/driver.rs"]
mod tests;
