use super::*;
use crate::engine::resolver::CellOutcome;
use crate::exact::decimal::Precision;
use crate::foundation::core::Rgb8;

const A: Rgb8 = Rgb8::from_u32(0x009fe3);
const B: Rgb8 = Rgb8::from_u32(0xea5e00);
const C: Rgb8 = Rgb8::from_u32(0xd32b51);
const D: Rgb8 = Rgb8::from_u32(0xb74083);
const BLANK: Rgb8 = Rgb8::WHITE;

fn d(s: &str) -> ExactCoordinate {
    ExactCoordinate::parse(s).unwrap()
}

fn note_seed() -> ChainSeed<1> {
    ChainSeed::notes(vec![A, B, C, D], d("1")).unwrap()
}

fn pixel_seed() -> ChainSeed<2> {
    ChainSeed::pixels(vec![vec![A, B], vec![C, D]], d("1"), d("1")).unwrap()
}

#[test]
fn halving_a_four_note_row_blanks_both_notes() {
    let chain = build_note_chain(&note_seed(), &[4, 2], ChainOpts::notes()).unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain.levels()[0].grid.cells(), &[A, B, C, D]);
    assert_eq!(chain.levels()[0].cell_size, [d("1")]);
    assert_eq!(chain.levels()[1].cell_size, [d("2")]);
    assert_eq!(chain.levels()[1].grid.cells(), &[BLANK, BLANK]);
}

#[test]
fn thirds_of_a_four_note_row_keep_the_outer_notes() {
    let chain = build_note_chain(&note_seed(), &[4, 3], ChainOpts::notes()).unwrap();
    let last = chain.last().unwrap();
    assert_eq!(last.cell_size, [d("1.333333333333333")]);
    assert_eq!(last.previous_cell_size, [d("1")]);
    assert_eq!(last.grid.cells(), &[A, BLANK, D]);
    assert_eq!(last.stats.boundary, 1);
}

#[test]
fn refining_and_returning_reproduces_the_seed() {
    let seed = note_seed();
    let chain = build_note_chain(&seed, &[4, 12, 4], ChainOpts::notes()).unwrap();
    assert_eq!(
        chain.levels()[1].grid.cells(),
        &[A, A, A, B, B, B, C, C, C, D, D, D]
    );
    assert_eq!(chain.levels()[2].grid.as_ref(), seed.grid().as_ref());

    let seed = pixel_seed();
    for opts in [
        ChainOpts::pixels(),
        ChainOpts::pixels().with_extent(ExtentPolicy::Carried),
    ] {
        let chain = build_chain(&seed, &[[2, 2], [6, 6], [2, 2]], opts).unwrap();
        assert_eq!(chain.levels()[2].grid.as_ref(), seed.grid().as_ref());
    }
}

#[test]
fn pixel_chain_blanks_boundaries_black() {
    let chain = build_chain(&pixel_seed(), &[[2, 2], [1, 2]], ChainOpts::pixels()).unwrap();
    let last = chain.last().unwrap();
    assert_eq!(last.cell_size, [d("2"), d("1")]);
    // Every x center lands on the line between the two seed columns.
    assert_eq!(last.grid.cells(), &[Rgb8::BLACK, Rgb8::BLACK]);
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

#[test]
fn builds_are_deterministic() {
    init_tracing();
    let seed = note_seed();
    let a = build_note_chain(&seed, &[4, 7, 3, 5], ChainOpts::notes()).unwrap();
    let b = build_note_chain(&seed, &[4, 7, 3, 5], ChainOpts::notes()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.fingerprint(), b.fingerprint());
}

#[test]
fn invalid_resolution_rejects_the_whole_chain() {
    let err = build_note_chain(&note_seed(), &[4, 0, 3], ChainOpts::notes()).unwrap_err();
    assert!(matches!(err, GridError::InvalidResolution { position: 1, .. }));

    let err = build_chain::<1>(&note_seed(), &[], ChainOpts::notes()).unwrap_err();
    assert!(matches!(err, GridError::EmptyResolutionList));

    assert!(ChainDriver::new(&pixel_seed(), &[[2, 2], [0, 1]], ChainOpts::pixels()).is_err());
}

#[test]
fn precision_is_scoped_to_one_build() {
    let seed = note_seed();
    let coarse = ChainOpts::notes().with_precision(Precision::new(1).unwrap());
    let a = build_note_chain(&seed, &[4, 3], coarse).unwrap();
    let b = build_note_chain(&seed, &[4, 3], ChainOpts::notes()).unwrap();
    assert_eq!(a.last().unwrap().grid.cells(), &[A, BLANK, BLANK]);
    assert_eq!(b.last().unwrap().grid.cells(), &[A, BLANK, D]);
    assert_eq!(a.opts().precision.digits(), 1);
}

#[test]
fn extent_policies_are_not_interchangeable() {
    let seed = note_seed();
    let carried = build_note_chain(&seed, &[3, 6], ChainOpts::notes()).unwrap();
    let fixed = build_note_chain(
        &seed,
        &[3, 6],
        ChainOpts::notes().with_extent(ExtentPolicy::Fixed),
    )
    .unwrap();
    assert_eq!(carried.levels()[1].cell_size, [d("0.6666666666666665")]);
    assert_eq!(fixed.levels()[1].cell_size, [d("0.6666666666666667")]);
}

#[test]
fn driver_yields_levels_lazily_and_shares_grids() {
    let seed = note_seed();
    let resolutions = [[4], [3], [5]];
    let mut driver = ChainDriver::new(&seed, &resolutions, ChainOpts::notes()).unwrap();
    let first = driver.next().unwrap().unwrap();
    assert_eq!(first.index, 0);
    let second = driver.next().unwrap().unwrap();
    assert_eq!(second.previous_cell_size, first.cell_size);
    // The first grid is still readable after the driver moved on.
    assert_eq!(first.grid.cells(), &[A, B, C, D]);
    assert!(driver.next().is_some());
    assert!(driver.next().is_none());
}

#[test]
fn probing_a_level_reports_each_cell() {
    let probes =
        probe_chain_level(&note_seed(), &[[4], [3]], ChainOpts::notes(), 1).unwrap();
    let outcomes: Vec<_> = probes.iter().map(|p| p.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            CellOutcome::Inherited,
            CellOutcome::Boundary,
            CellOutcome::Inherited
        ]
    );
    assert_eq!(probes[2].indices, vec![Some(3)]);

    assert!(probe_chain_level(&note_seed(), &[[4]], ChainOpts::notes(), 1).is_err());
}

#[test]
fn seed_rejects_non_positive_cell_sizes() {
    assert!(ChainSeed::notes(vec![A], d("0")).is_err());
    assert!(ChainSeed::pixels(vec![vec![A]], d("1"), d("-2")).is_err());
}
