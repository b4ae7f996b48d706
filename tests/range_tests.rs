use chart3d_rs::core::Range;

#[test]
fn fresh_range_is_empty_until_adjusted() {
    let mut range = Range::new();
    assert!(range.is_empty());

    range.adjust(None);
    range.adjust(Some(f64::NAN));
    range.adjust(Some(f64::INFINITY));
    assert!(range.is_empty());

    range.adjust(Some(4.0));
    assert!(!range.is_empty());
    assert_eq!((range.min(), range.max()), (4.0, 4.0));
}

#[test]
fn adjust_widens_to_cover_every_value() {
    let mut range = Range::new();
    for value in [3.0, 1.0, 2.0, -7.5, 12.0] {
        range.adjust(Some(value));
    }
    assert_eq!(range.min(), -7.5);
    assert_eq!(range.max(), 12.0);
    assert_eq!(range.range(), 19.5);
    assert_eq!(range.center(), 2.25);
    assert!(range.contains(0.0));
    assert!(!range.contains(12.5));
}

#[test]
fn expand_moves_both_bounds() {
    let mut range = Range::from_bounds(1.0, 3.0);
    range.expand(0.5);
    assert_eq!((range.min(), range.max()), (0.5, 3.5));
}

#[test]
fn expand_leaves_empty_range_empty() {
    let mut range = Range::new();
    range.expand(2.0);
    assert!(range.is_empty());
}

#[test]
fn defaults_override_computed_bounds() {
    let mut range = Range::new();
    range.adjust(Some(1.0));
    range.adjust(Some(3.0));

    range.apply_defaults(Some(-5.0), None);
    assert_eq!((range.min(), range.max()), (-5.0, 3.0));

    range.apply_defaults(None, Some(40.0));
    assert_eq!((range.min(), range.max()), (-5.0, 40.0));
}

#[test]
fn single_value_collapses_to_unit_span() {
    let mut range = Range::new();
    range.adjust(Some(4.0));
    range.apply_defaults(None, None);
    assert_eq!((range.min(), range.max()), (4.0, 5.0));
}

#[test]
fn inverted_or_equal_defaults_are_corrected() {
    let mut inverted = Range::new();
    inverted.adjust(Some(0.0));
    inverted.apply_defaults(Some(10.0), Some(2.0));
    assert_eq!((inverted.min(), inverted.max()), (10.0, 11.0));

    let mut equal = Range::new();
    equal.apply_defaults(Some(3.0), Some(3.0));
    assert_eq!((equal.min(), equal.max()), (3.0, 4.0));
}

#[test]
fn empty_range_normalizes_around_available_defaults() {
    let mut bare = Range::new();
    bare.apply_defaults(None, None);
    assert_eq!((bare.min(), bare.max()), (0.0, 1.0));

    let mut max_only = Range::new();
    max_only.apply_defaults(None, Some(5.0));
    assert_eq!((max_only.min(), max_only.max()), (4.0, 5.0));

    let mut min_only = Range::new();
    min_only.apply_defaults(Some(-2.0), None);
    assert_eq!((min_only.min(), min_only.max()), (-2.0, -1.0));
}

#[test]
fn range_serializes_bounds() {
    let range = Range::from_bounds(-1.0, 2.0);
    let json = serde_json::to_string(&range).expect("serialize");
    assert_eq!(json, r#"{"min":-1.0,"max":2.0}"#);
}
