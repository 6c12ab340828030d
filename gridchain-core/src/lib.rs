//! gridchain derives a chain of color grids at successive resolutions from one seed grid.
//!
//! Every level re-samples the level before it: each new cell looks at its own center point,
//! finds the previous cell that contains it and inherits that color. When the center lands
//! exactly on a line between two previous cells the inheritance is ambiguous, and the cell is
//! blanked to a sentinel color instead.
//!
//! Two shapes are supported through one generic engine:
//!
//! - **Notes** ([`NoteRow`], `N = 1`): a horizontal row; blanks are white.
//! - **Pixels** ([`PixelGrid`], `N = 2`): a rectangle; blanks are black, and a pixel is blank
//!   when either axis is on a line.
//!
//! # Pipeline overview
//!
//! 1. **Seed**: [`ChainSeed`] holds the starting grid and its native cell size.
//! 2. **Drive**: [`ChainDriver`] / [`build_chain`] walk the resolution list and build a
//!    [`Level`] per entry with [`build_level`].
//! 3. **Place** (optional): [`layout_notes`] / [`layout_pixels`] put every cell on a plane.
//! 4. **Rasterize** (optional): [`rasterize`] fills the placed cells into an RGBA8 image.
//!
//! All coordinate arithmetic is done in [`ExactCoordinate`] with a per-build
//! [`DecimalContext`], so the boundary test is an exact decimal comparison and a build is fully
//! deterministic for its inputs.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod chain;
mod engine;
mod exact;
mod foundation;
mod grid;
mod layout;
mod render;

pub use chain::config::{ChainConfig, ChainMode, SeedDef};
pub use chain::driver::{
    Chain, ChainDriver, Level, build_chain, build_note_chain, probe_chain_level,
};
pub use chain::fingerprint::{ChainFingerprint, fingerprint_grids};
pub use chain::opts::{ChainOpts, ExtentPolicy};
pub use chain::seed::ChainSeed;
pub use engine::alignment::{AxisAlignment, any_axis_on_boundary, test_axis};
pub use engine::level::{BuiltLevel, CellProbe, LevelSpec, LevelStats, build_level, probe_level};
pub use engine::resolver::{CellOutcome, Sentinels, color_index, resolve_cell};
pub use exact::decimal::{DecimalContext, ExactCoordinate, Precision};
pub use foundation::core::{Rect, Rgb8, Vec2};
pub use foundation::error::{GridError, GridResult};
pub use grid::model::{ColorGrid, NoteRow, PixelGrid};
pub use grid::resolution::{
    parse_resolution_list, resolution_entry_from_json, resolution_from_f64, resolution_from_text,
    validate_resolutions,
};
pub use layout::placement::{ChainLayout, LayoutOpts, PlacedCell, layout_notes, layout_pixels};
pub use render::raster::{RasterImage, RasterOpts, rasterize};
