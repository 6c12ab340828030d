use super::*;

fn d(s: &str) -> ExactCoordinate {
    ExactCoordinate::parse(s).unwrap()
}

#[test]
fn centers_on_grid_lines_are_boundaries() {
    let ctx = DecimalContext::default();
    for center in ["0", "1", "2", "3.0", "7"] {
        let a = test_axis(&ctx, &d(center), &d("1")).unwrap();
        assert!(a.on_boundary, "{center} should sit on a boundary");
        assert!(a.residue.is_zero());
    }
}

#[test]
fn centers_between_grid_lines_keep_their_residue() {
    let ctx = DecimalContext::default();
    let a = test_axis(&ctx, &d("0.6666666666666667"), &d("1")).unwrap();
    assert!(!a.on_boundary);
    assert_eq!(a.residue, d("0.6666666666666667"));

    let a = test_axis(&ctx, &d("3.75"), &d("1.5")).unwrap();
    assert!(!a.on_boundary);
    assert_eq!(a.residue, d("0.75"));
}

#[test]
fn non_positive_previous_size_is_rejected() {
    let ctx = DecimalContext::default();
    assert!(test_axis(&ctx, &d("1"), &d("0")).is_err());
    assert!(test_axis(&ctx, &d("1"), &d("-1")).is_err());
}

#[test]
fn either_axis_voids_the_cell() {
    let ctx = DecimalContext::default();
    let on = test_axis(&ctx, &d("2"), &d("1")).unwrap();
    let off = test_axis(&ctx, &d("2.5"), &d("1")).unwrap();
    assert!(any_axis_on_boundary(&[on.clone(), off.clone()]));
    assert!(any_axis_on_boundary(&[off.clone(), on]));
    assert!(!any_axis_on_boundary(&[off.clone(), off]));
}

#[test]
fn residue_rounded_up_to_the_divisor_counts_as_boundary() {
    let ctx = DecimalContext::new(crate::exact::decimal::Precision::new(3).unwrap());
    let a = test_axis(&ctx, &d("2.9996"), &d("1")).unwrap();
    assert_eq!(a.residue, d("1"));
    assert!(a.on_boundary);
}
