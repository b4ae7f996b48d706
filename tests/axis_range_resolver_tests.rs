use approx::assert_relative_eq;
use chart3d_rs::ChartError;
use chart3d_rs::api::DataGroupSettings;
use chart3d_rs::core::{
    Axis, AxisRangeResolver, AxisSettings, ChartStyle, Row, ValueAxisSettings, ValueColumn,
};

fn sample_rows() -> Vec<Row> {
    let mut rows = Vec::new();
    for (i, x) in [0.0, 1.0, 2.0].into_iter().enumerate() {
        for y in [0.0, 10.0] {
            rows.push(Row::xyz(x, y, 5.0 + 5.0 * i as f64));
        }
    }
    rows
}

#[test]
fn dot_style_uses_raw_column_ranges() {
    let resolver = AxisRangeResolver::default();
    let axes = resolver
        .resolve_all(&sample_rows(), ChartStyle::Dot)
        .expect("resolve");

    assert_eq!((axes.x.range.min(), axes.x.range.max()), (0.0, 2.0));
    assert_eq!((axes.y.range.min(), axes.y.range.max()), (0.0, 10.0));
    assert_eq!((axes.z.range.min(), axes.z.range.max()), (5.0, 15.0));
    assert_relative_eq!(axes.x.step, 0.4);
    assert_relative_eq!(axes.y.step, 2.0);
    assert_relative_eq!(axes.z.step, 2.0);
    assert_eq!(axes.x.bar_width, None);
}

#[test]
fn bar_style_expands_horizontal_axes_by_half_bar_width() {
    let resolver = AxisRangeResolver::default();
    let axes = resolver
        .resolve_all(&sample_rows(), ChartStyle::Bar)
        .expect("resolve");

    assert_eq!(axes.x.bar_width, Some(1.0));
    assert_eq!((axes.x.range.min(), axes.x.range.max()), (-0.5, 2.5));
    assert_eq!(axes.y.bar_width, Some(10.0));
    assert_eq!((axes.y.range.min(), axes.y.range.max()), (-5.0, 15.0));

    // z never gets a bar margin.
    assert_eq!(axes.z.bar_width, None);
    assert_eq!((axes.z.range.min(), axes.z.range.max()), (5.0, 15.0));
}

#[test]
fn bar_width_override_wins_over_data_gap() {
    let settings = DataGroupSettings::new().with_bar_width(Axis::X, 4.0);
    let axes = settings
        .resolver()
        .resolve_all(&sample_rows(), ChartStyle::BarColor)
        .expect("resolve");

    assert_eq!(axes.x.bar_width, Some(4.0));
    assert_eq!((axes.x.range.min(), axes.x.range.max()), (-2.0, 4.0));
}

#[test]
fn single_distinct_value_falls_back_to_unit_bar_width() {
    let rows = vec![Row::xyz(2.0, 3.0, 1.0), Row::xyz(2.0, 3.0, 4.0)];
    let resolver = AxisRangeResolver::default();

    assert_eq!(resolver.bar_width(&rows, Axis::X), 1.0);
    let x = resolver.resolve_axis(&rows, Axis::X, true).expect("x axis");
    assert_eq!((x.range.min(), x.range.max()), (1.5, 2.5));
}

#[test]
fn min_max_and_step_overrides_replace_computed_values() {
    let settings = DataGroupSettings::new()
        .with_axis_bounds(Axis::Z, Some(0.0), Some(100.0))
        .with_axis_step(Axis::Z, 25.0);
    let axes = settings
        .resolver()
        .resolve_all(&sample_rows(), ChartStyle::Surface)
        .expect("resolve");

    assert_eq!((axes.z.range.min(), axes.z.range.max()), (0.0, 100.0));
    assert_eq!(axes.z.step, 25.0);
}

#[test]
fn step_follows_corrected_degenerate_range() {
    let rows = vec![Row::xyz(1.0, 1.0, 7.0)];
    let z = AxisRangeResolver::default()
        .resolve_axis(&rows, Axis::Z, false)
        .expect("z axis");

    assert_eq!((z.range.min(), z.range.max()), (7.0, 8.0));
    assert_relative_eq!(z.step, 0.2);
}

#[test]
fn resolving_unknown_column_is_rejected() {
    let resolver = AxisRangeResolver::default();
    let err = resolver
        .resolve_column(&sample_rows(), "style", false)
        .expect_err("style is not a spatial axis");
    assert!(matches!(err, ChartError::InvalidColumn(column) if column == "style"));

    let y = resolver
        .resolve_column(&sample_rows(), "y", false)
        .expect("y is valid");
    assert_eq!(y.range.max(), 10.0);
}

#[test]
fn value_axis_aliases_z_without_style_column() {
    let axes = AxisRangeResolver::default()
        .resolve_all(&sample_rows(), ChartStyle::DotColor)
        .expect("resolve");

    assert_eq!(axes.value.column, ValueColumn::Z);
    assert_eq!(axes.value.range, axes.z.range);
}

#[test]
fn style_column_gets_independent_value_range() {
    let rows: Vec<Row> = (1..=3)
        .map(|i| Row::xyz(f64::from(i), 0.0, 0.0).with("style", f64::from(i)))
        .collect();
    let settings = DataGroupSettings::new().with_value_bounds(None, Some(10.0));
    let axes = settings
        .resolver()
        .resolve_all(&rows, ChartStyle::DotSize)
        .expect("resolve");

    assert_eq!(axes.value.column, ValueColumn::Style);
    assert_eq!((axes.value.range.min(), axes.value.range.max()), (1.0, 10.0));
    assert_eq!((axes.z.range.min(), axes.z.range.max()), (0.0, 1.0));
}

#[test]
fn invalid_overrides_are_rejected_before_resolution() {
    let resolver = AxisRangeResolver::new(
        AxisSettings {
            step: Some(0.0),
            ..AxisSettings::default()
        },
        AxisSettings::default(),
        AxisSettings::default(),
        ValueAxisSettings::default(),
    );
    let err = resolver
        .resolve_axis(&sample_rows(), Axis::X, false)
        .expect_err("zero step");
    assert!(matches!(err, ChartError::InvalidSettings(_)));

    let resolver = AxisRangeResolver::new(
        AxisSettings::default(),
        AxisSettings::default(),
        AxisSettings::default(),
        ValueAxisSettings {
            min: Some(f64::NAN),
            max: None,
        },
    );
    let rows = vec![Row::xyz(0.0, 0.0, 0.0).with("style", 1.0)];
    assert!(resolver.resolve_all(&rows, ChartStyle::Dot).is_err());
}
