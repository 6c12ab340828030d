use crate::engine::resolver::Sentinels;
use crate::exact::decimal::Precision;

/// How each level's total extent is derived, and from it the level's cell size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtentPolicy {
    /// `previous_cell_size × previous_resolution`, recomputed at every level (note rows).
    #[default]
    Carried,
    /// The seed's total extent, kept constant across the chain (pixel grids).
    Fixed,
}

/// Per-build options. A change to any of these requires a full rebuild from the seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChainOpts {
    /// Significant digits of every coordinate operation.
    #[serde(default)]
    pub precision: Precision,
    /// Extent derivation.
    #[serde(default)]
    pub extent: ExtentPolicy,
    /// Colors of blanked and out-of-range cells.
    #[serde(default)]
    pub sentinels: Sentinels,
}

impl Default for ChainOpts {
    fn default() -> Self {
        Self::notes()
    }
}

impl ChainOpts {
    /// Note rows: carried extent, boundaries blanked to white.
    pub fn notes() -> Self {
        Self {
            precision: Precision::default(),
            extent: ExtentPolicy::Carried,
            sentinels: Sentinels::NOTES,
        }
    }

    /// Pixel grids: fixed canvas extent, boundaries blanked to black.
    pub fn pixels() -> Self {
        Self {
            precision: Precision::default(),
            extent: ExtentPolicy::Fixed,
            sentinels: Sentinels::PIXELS,
        }
    }

    /// Replace the precision.
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Replace the extent policy.
    pub fn with_extent(mut self, extent: ExtentPolicy) -> Self {
        self.extent = extent;
        self
    }
}
