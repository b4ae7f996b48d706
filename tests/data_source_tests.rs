use std::cell::Cell;
use std::rc::Rc;

use chart3d_rs::ChartError;
use chart3d_rs::api::{DataSource, DataTable, ObservableTable};
use chart3d_rs::core::Row;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::json;

#[test]
fn json_array_of_objects_becomes_rows() {
    let source = DataSource::from_json(&json!([
        {"x": 1, "y": 2.5, "z": true},
        {"x": "n/a", "y": null, "filter": false}
    ]))
    .expect("valid source");
    assert!(!source.is_observable());

    let rows = source.snapshot();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("x"), Some(1.0));
    assert_eq!(rows[0].get("z"), Some(1.0));
    assert!(rows[1].has_column("x"));
    assert_eq!(rows[1].get("x"), None);
    assert_eq!(rows[1].value_or_zero("y"), 0.0);
    assert_eq!(rows[1].get("filter"), Some(0.0));
}

#[test]
fn non_sequence_sources_are_rejected() {
    let err = DataSource::from_json(&json!({"x": 1})).expect_err("object is not a sequence");
    assert!(matches!(err, ChartError::InvalidSource(_)));

    let err = DataSource::from_json(&json!([{"x": 1}, 7])).expect_err("non-object item");
    assert!(matches!(err, ChartError::InvalidSource(_)));

    let err = DataSource::from_json_str("[{").expect_err("malformed json");
    assert!(matches!(err, ChartError::InvalidSource(_)));
}

#[test]
fn row_helpers_map_time_and_decimals_to_numbers() {
    let time = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid time");
    let row = Row::new()
        .with_time("x", time)
        .with_decimal("z", Decimal::new(1234, 2))
        .expect("decimal fits");

    assert_eq!(row.get("x"), Some(1_704_067_200.0));
    assert_eq!(row.get("z"), Some(12.34));
    assert_eq!(row.columns().collect::<Vec<_>>(), vec!["x", "z"]);
}

#[test]
fn table_mutations_notify_each_subscriber() {
    let table = DataTable::new(vec![Row::xyz(0.0, 0.0, 0.0)]);
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    let subscription = table.subscribe(Rc::new(move || counter.set(counter.get() + 1)));

    table.push(Row::xyz(1.0, 0.0, 0.0));
    table
        .update(0, Row::xyz(5.0, 0.0, 0.0))
        .expect("update first row");
    let removed = table.remove(1).expect("remove second row");
    assert_eq!(removed.get("x"), Some(1.0));
    assert_eq!(hits.get(), 3);
    assert_eq!(table.get()[0].get("x"), Some(5.0));

    subscription.cancel();
    table.clear();
    assert_eq!(hits.get(), 3);
    assert_eq!(table.subscriber_count(), 0);
    assert!(table.is_empty());
}

#[test]
fn out_of_bounds_edits_fail_without_notifying() {
    let table = DataTable::new(Vec::new());
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    let _subscription = table.subscribe(Rc::new(move || counter.set(counter.get() + 1)));

    assert!(matches!(
        table.update(0, Row::new()),
        Err(ChartError::InvalidData(_))
    ));
    assert!(table.remove(3).is_err());
    assert_eq!(hits.get(), 0);
}

#[test]
fn dropped_subscription_detaches() {
    let table = DataTable::default();
    {
        let _first = table.subscribe(Rc::new(|| {}));
        let _second = table.subscribe(Rc::new(|| {}));
        assert_eq!(table.subscriber_count(), 2);
    }
    assert_eq!(table.subscriber_count(), 0);
}

#[test]
fn rows_with_non_numeric_cells_survive_a_serde_round_trip() {
    let row = Row::from_json(&json!({"x": 1.5, "label": "north", "gap": null})).expect("row");
    let json = serde_json::to_string(&row).expect("serialize");
    assert_eq!(json, r#"{"gap":null,"label":null,"x":1.5}"#);

    let back: Row = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back.columns().collect::<Vec<_>>(), vec!["gap", "label", "x"]);
    assert_eq!(back.get("x"), Some(1.5));
    assert!(back.has_column("label"));
    assert_eq!(back.get("label"), None);

    let err = serde_json::from_str::<Row>("[1, 2]").expect_err("not an object");
    assert!(err.to_string().contains("JSON objects"));
}
