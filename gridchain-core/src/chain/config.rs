use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::value::RawValue;

use crate::chain::opts::{ChainOpts, ExtentPolicy};
use crate::chain::seed::ChainSeed;
use crate::engine::resolver::Sentinels;
use crate::exact::decimal::{ExactCoordinate, Precision};
use crate::foundation::core::Rgb8;
use crate::foundation::error::{GridError, GridResult};
use crate::grid::resolution::resolution_entry_from_json;
use crate::layout::placement::LayoutOpts;
use crate::render::raster::RasterOpts;

/// Which kind of grid a chain document describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainMode {
    /// One-axis note rows.
    Notes,
    /// Two-axis pixel grids.
    Pixels,
}

/// Seed section of a chain document. Notes use `colors`, pixels use `rows` (top row first).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedDef {
    /// Note colors, left to right.
    #[serde(default)]
    pub colors: Option<Vec<Rgb8>>,
    /// Pixel rows, top first.
    #[serde(default)]
    pub rows: Option<Vec<Vec<Rgb8>>>,
    /// One entry per axis; defaults to `1` on every axis.
    #[serde(default)]
    pub cell_size: Option<Vec<ExactCoordinate>>,
}

/// JSON document describing one chain build.
///
/// Resolutions are kept as raw JSON text so that zero, negative and fractional entries (even ones
/// that round to an integer as `f64`) are reported as [`GridError::InvalidResolution`] with their
/// position rather than as a parse failure.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainConfig {
    /// Grid shape; selects the option preset.
    pub mode: ChainMode,
    /// Counts (notes) or `[width, height]` pairs (pixels), unparsed.
    #[serde(default)]
    pub resolutions: Vec<Box<RawValue>>,
    /// Overrides the preset precision.
    #[serde(default)]
    pub precision: Option<Precision>,
    /// Overrides the preset extent policy.
    #[serde(default)]
    pub extent: Option<ExtentPolicy>,
    /// Overrides the preset sentinels.
    #[serde(default)]
    pub sentinels: Option<Sentinels>,
    /// Uniform layout scale factor.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Starting grid; the caller supplies one when absent.
    #[serde(default)]
    pub seed: Option<SeedDef>,
    /// Rasterizer settings.
    #[serde(default)]
    pub raster: RasterOpts,
}

fn default_scale() -> f64 {
    1.0
}

impl ChainConfig {
    /// Parse a document from any reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> GridResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| GridError::serde(format!("parse chain config JSON: {e}")))
    }

    /// Open and parse the document at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> GridResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GridError::validation(format!("open chain config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse a document held in memory.
    pub fn from_json_str(s: &str) -> GridResult<Self> {
        serde_json::from_str(s).map_err(|e| GridError::serde(format!("parse chain config JSON: {e}")))
    }

    /// Resolutions as note counts. Fails unless the document is in notes mode.
    pub fn note_resolutions(&self) -> GridResult<Vec<[u32; 1]>> {
        self.expect_mode(ChainMode::Notes)?;
        self.resolutions::<1>()
    }

    /// Resolutions as `[width, height]` pairs. Fails unless the document is in pixels mode.
    pub fn pixel_resolutions(&self) -> GridResult<Vec<[u32; 2]>> {
        self.expect_mode(ChainMode::Pixels)?;
        self.resolutions::<2>()
    }

    fn resolutions<const N: usize>(&self) -> GridResult<Vec<[u32; N]>> {
        self.resolutions
            .iter()
            .enumerate()
            .map(|(position, v)| resolution_entry_from_json::<N>(position, v))
            .collect()
    }

    /// Mode preset with the document's overrides applied.
    pub fn chain_opts(&self) -> ChainOpts {
        let mut opts = match self.mode {
            ChainMode::Notes => ChainOpts::notes(),
            ChainMode::Pixels => ChainOpts::pixels(),
        };
        if let Some(precision) = self.precision {
            opts.precision = precision;
        }
        if let Some(extent) = self.extent {
            opts.extent = extent;
        }
        if let Some(sentinels) = self.sentinels {
            opts.sentinels = sentinels;
        }
        opts
    }

    /// Default layout with the document's scale.
    pub fn layout_opts(&self) -> LayoutOpts {
        LayoutOpts {
            scale: self.scale,
            ..LayoutOpts::default()
        }
    }

    /// The declared note seed, or `None` when the document leaves it to the caller.
    pub fn note_seed(&self) -> GridResult<Option<ChainSeed<1>>> {
        self.expect_mode(ChainMode::Notes)?;
        let Some(seed) = &self.seed else {
            return Ok(None);
        };
        if seed.rows.is_some() {
            return Err(GridError::validation("notes seed takes `colors`, not `rows`"));
        }
        let Some(colors) = &seed.colors else {
            return Ok(None);
        };
        let [cell] = cell_size::<1>(seed)?;
        ChainSeed::notes(colors.clone(), cell).map(Some)
    }

    /// The declared pixel seed, or `None` when the document leaves it to the caller.
    pub fn pixel_seed(&self) -> GridResult<Option<ChainSeed<2>>> {
        self.expect_mode(ChainMode::Pixels)?;
        let Some(seed) = &self.seed else {
            return Ok(None);
        };
        if seed.colors.is_some() {
            return Err(GridError::validation("pixels seed takes `rows`, not `colors`"));
        }
        let Some(rows) = &seed.rows else {
            return Ok(None);
        };
        let [w, h] = cell_size::<2>(seed)?;
        ChainSeed::pixels(rows.clone(), w, h).map(Some)
    }

    fn expect_mode(&self, mode: ChainMode) -> GridResult<()> {
        if self.mode != mode {
            return Err(GridError::validation(format!(
                "chain config is in {:?} mode, not {mode:?}",
                self.mode
            )));
        }
        Ok(())
    }
}

fn cell_size<const N: usize>(seed: &SeedDef) -> GridResult<[ExactCoordinate; N]> {
    match &seed.cell_size {
        None => Ok(std::array::from_fn(|_| ExactCoordinate::from(1u32))),
        Some(sizes) => <[ExactCoordinate; N]>::try_from(sizes.clone()).map_err(|v| {
            GridError::validation(format!(
                "seed cell_size needs {N} entries, got {}",
                v.len()
            ))
        }),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chain/config.rs"]
mod tests;
