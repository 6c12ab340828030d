use super::*;
use crate::chain::driver::build_note_chain;
use crate::chain::opts::ChainOpts;
use crate::chain::seed::ChainSeed;
use crate::exact::decimal::ExactCoordinate;
use crate::layout::placement::{LayoutOpts, layout_notes};

const A: Rgb8 = Rgb8::from_u32(0x009fe3);
const B: Rgb8 = Rgb8::from_u32(0xea5e00);

fn layout(opts: &LayoutOpts) -> ChainLayout {
    let seed = ChainSeed::notes(vec![A, B, A, B], ExactCoordinate::from(1u32)).unwrap();
    let chain = build_note_chain(&seed, &[4], ChainOpts::notes()).unwrap();
    layout_notes(&chain, opts).unwrap()
}

fn opts() -> RasterOpts {
    RasterOpts {
        pixels_per_unit: 10.0,
        margin: 0,
        ..RasterOpts::default()
    }
}

#[test]
fn fills_cells_with_outlines() {
    let img = rasterize(&layout(&LayoutOpts::default()), &opts()).unwrap();
    assert_eq!((img.width, img.height), (40, 10));
    assert_eq!(img.data.len(), 40 * 10 * 4);
    assert_eq!(img.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(img.pixel(5, 5), Some(A.to_rgba8()));
    assert_eq!(img.pixel(15, 5), Some(B.to_rgba8()));
    assert_eq!(img.pixel(39, 9), Some([0, 0, 0, 255]));
    assert_eq!(img.pixel(40, 0), None);
}

#[test]
fn outline_free_layouts_fill_edges() {
    let lo = LayoutOpts {
        note_outline_limit: 1,
        ..LayoutOpts::default()
    };
    let img = rasterize(&layout(&lo), &opts()).unwrap();
    assert_eq!(img.pixel(0, 0), Some(A.to_rgba8()));
}

#[test]
fn margin_shows_background() {
    let ro = RasterOpts {
        margin: 2,
        ..opts()
    };
    let img = rasterize(&layout(&LayoutOpts::default()), &ro).unwrap();
    assert_eq!((img.width, img.height), (44, 14));
    assert_eq!(img.pixel(0, 0), Some(ro.background.to_rgba8()));
    assert_eq!(img.pixel(7, 7), Some(A.to_rgba8()));
}

#[test]
fn rejects_oversized_or_degenerate_output() {
    let huge = RasterOpts {
        pixels_per_unit: 1e9,
        ..opts()
    };
    assert!(rasterize(&layout(&LayoutOpts::default()), &huge).is_err());
    let zero = RasterOpts {
        pixels_per_unit: 0.0,
        ..opts()
    };
    assert!(rasterize(&layout(&LayoutOpts::default()), &zero).is_err());
}
