use std::collections::BTreeSet;

use ordered_float::OrderedFloat;

use crate::core::{Range, Row};

/// Distinct coordinate values of `column`, sorted ascending.
///
/// Missing and non-numeric cells count as `0`.
#[must_use]
pub fn distinct_values<R: AsRef<Row>>(rows: &[R], column: &str) -> Vec<f64> {
    rows.iter()
        .map(|row| OrderedFloat(row.as_ref().value_or_zero(column)))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(OrderedFloat::into_inner)
        .collect()
}

/// Smallest difference between adjacent distinct values of `column`.
///
/// Returns `None` when fewer than two distinct values exist.
#[must_use]
pub fn smallest_gap<R: AsRef<Row>>(rows: &[R], column: &str) -> Option<f64> {
    distinct_values(rows, column)
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .min_by(f64::total_cmp)
}

/// Min/max over the numeric cells of `column`. Missing cells are skipped.
#[must_use]
pub fn column_range<R: AsRef<Row>>(rows: &[R], column: &str) -> Range {
    let mut range = Range::new();
    for row in rows {
        range.adjust(row.as_ref().get(column));
    }
    range
}
