use super::*;

const A: Rgb8 = Rgb8::from_u32(0x009fe3);
const B: Rgb8 = Rgb8::from_u32(0xea5e00);
const C: Rgb8 = Rgb8::from_u32(0xd32b51);
const D: Rgb8 = Rgb8::from_u32(0xb74083);

#[test]
fn note_row_indexes_along_its_only_axis() {
    let row = NoteRow::from_colors(vec![A, B, C]).unwrap();
    assert_eq!(row.dims(), [3]);
    assert_eq!(row.get([0]), Some(A));
    assert_eq!(row.get([2]), Some(C));
    assert_eq!(row.get([3]), None);
}

#[test]
fn pixel_grid_is_row_major_with_x_fastest() {
    let grid = PixelGrid::from_rows(vec![vec![A, B, C], vec![D, A, B]]).unwrap();
    assert_eq!(grid.dims(), [3, 2]);
    assert_eq!(grid.width(), 3);
    assert_eq!(grid.height(), 2);
    assert_eq!(grid.get([2, 0]), Some(C));
    assert_eq!(grid.get([0, 1]), Some(D));
    assert_eq!(grid.get([3, 0]), None);
    assert_eq!(grid.get([0, 2]), None);
    assert_eq!(grid.cells(), &[A, B, C, D, A, B]);
    assert_eq!(grid.to_rows(), vec![vec![A, B, C], vec![D, A, B]]);
}

#[test]
fn ragged_or_empty_grids_are_rejected() {
    assert!(PixelGrid::from_rows(vec![vec![A, B], vec![C]]).is_err());
    assert!(PixelGrid::from_rows(vec![]).is_err());
    assert!(NoteRow::from_colors(vec![]).is_err());
    assert!(ColorGrid::<2>::from_cells([2, 2], vec![A; 3]).is_err());
}

#[test]
fn unflatten_inverts_row_major_order() {
    assert_eq!(ColorGrid::<2>::unflatten([3, 2], 0), [0, 0]);
    assert_eq!(ColorGrid::<2>::unflatten([3, 2], 2), [2, 0]);
    assert_eq!(ColorGrid::<2>::unflatten([3, 2], 4), [1, 1]);
    assert_eq!(ColorGrid::<1>::unflatten([5], 4), [4]);
}

#[test]
fn uniform_and_count_agree() {
    let grid = PixelGrid::uniform([4, 3], Rgb8::BLACK).unwrap();
    assert_eq!(grid.len(), 12);
    assert_eq!(grid.count(Rgb8::BLACK), 12);
    assert_eq!(grid.count(Rgb8::WHITE), 0);
}
