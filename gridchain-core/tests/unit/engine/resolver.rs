use super::*;
use crate::grid::model::{NoteRow, PixelGrid};

const A: Rgb8 = Rgb8::from_u32(0x009fe3);
const B: Rgb8 = Rgb8::from_u32(0xea5e00);
const C: Rgb8 = Rgb8::from_u32(0xd32b51);

fn d(s: &str) -> ExactCoordinate {
    ExactCoordinate::parse(s).unwrap()
}

#[test]
fn boundary_wins_over_any_index() {
    let prev = NoteRow::from_colors(vec![A, B]).unwrap();
    let (c, o) = resolve_cell(true, &[Some(0)], &prev, &Sentinels::NOTES);
    assert_eq!((c, o), (Rgb8::WHITE, CellOutcome::Boundary));
    let (c, _) = resolve_cell(true, &[Some(0)], &prev, &Sentinels::PIXELS);
    assert_eq!(c, Rgb8::BLACK);
}

#[test]
fn inherited_colors_come_from_the_indexed_cell() {
    let prev = PixelGrid::from_rows(vec![vec![A, B], vec![C, A]]).unwrap();
    let (c, o) = resolve_cell(false, &[Some(0), Some(1)], &prev, &Sentinels::PIXELS);
    assert_eq!((c, o), (C, CellOutcome::Inherited));
    let (c, _) = resolve_cell(false, &[Some(1), Some(0)], &prev, &Sentinels::PIXELS);
    assert_eq!(c, B);
}

#[test]
fn indices_past_the_previous_grid_fall_back() {
    let prev = NoteRow::from_colors(vec![A, B, C]).unwrap();
    let (c, o) = resolve_cell(false, &[Some(3)], &prev, &Sentinels::NOTES);
    assert_eq!((c, o), (Rgb8::RED, CellOutcome::OutOfRange));
    let (c, o) = resolve_cell(false, &[None], &prev, &Sentinels::NOTES);
    assert_eq!((c, o), (Rgb8::RED, CellOutcome::OutOfRange));

    let prev = PixelGrid::from_rows(vec![vec![A, B]]).unwrap();
    let (c, _) = resolve_cell(false, &[Some(1), Some(1)], &prev, &Sentinels::PIXELS);
    assert_eq!(c, Rgb8::RED);
}

#[test]
fn color_index_floors_the_quotient() {
    let ctx = DecimalContext::default();
    assert_eq!(color_index(&ctx, &d("0.667"), &d("1")).unwrap(), Some(0));
    assert_eq!(color_index(&ctx, &d("3.333"), &d("1")).unwrap(), Some(3));
    assert_eq!(color_index(&ctx, &d("1.9"), &d("0.5")).unwrap(), Some(3));
    assert_eq!(color_index(&ctx, &d("-0.5"), &d("1")).unwrap(), None);
    assert!(color_index(&ctx, &d("1"), &d("0")).is_err());
}

#[test]
fn index_is_constant_across_one_previous_cell() {
    let ctx = DecimalContext::default();
    let prev_size = d("1.5");
    let mut last = None;
    for center in ["1.5001", "1.75", "2", "2.25", "2.9999"] {
        let i = color_index(&ctx, &d(center), &prev_size).unwrap();
        assert_eq!(i, Some(1));
        if let Some(prev) = last {
            assert_eq!(prev, i);
        }
        last = Some(i);
    }
}
