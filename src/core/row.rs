use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ChartError, ChartResult};

/// One record of the input table: column name to numeric cell.
///
/// Categorical columns must be mapped to numbers by the caller. A cell that is
/// present but not numeric (JSON strings, `null`) is kept as `NaN`, so
/// [`Row::has_column`] still reports it while [`Row::get`] does not. Such cells
/// serialize as `null` and deserialize back through [`Row::from_json`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Row {
    cells: IndexMap<String, f64>,
}

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for the common `x`/`y`/`z` shape.
    #[must_use]
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self::new().with("x", x).with("y", y).with("z", z)
    }

    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: f64) -> Self {
        self.set(column, value);
        self
    }

    /// Stores `time` as fractional unix seconds.
    #[must_use]
    pub fn with_time(self, column: impl Into<String>, time: DateTime<Utc>) -> Self {
        self.with(column, time.timestamp_millis() as f64 / 1000.0)
    }

    pub fn with_decimal(self, column: impl Into<String>, value: Decimal) -> ChartResult<Self> {
        let column = column.into();
        let number = value.to_f64().ok_or_else(|| {
            ChartError::InvalidData(format!("decimal cell `{column}` does not fit in f64"))
        })?;
        Ok(self.with(column, number))
    }

    pub fn set(&mut self, column: impl Into<String>, value: f64) {
        self.cells.insert(column.into(), value);
    }

    /// Builds a row from a JSON object.
    ///
    /// Numbers are taken as-is and booleans map to `1`/`0`; every other value
    /// is recorded as a non-numeric cell.
    pub fn from_json(value: &Value) -> ChartResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            ChartError::InvalidSource("rows must be JSON objects".to_owned())
        })?;

        let cells = object
            .iter()
            .map(|(column, cell)| {
                let number = match cell {
                    Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
                    Value::Bool(b) => f64::from(u8::from(*b)),
                    _ => f64::NAN,
                };
                (column.clone(), number)
            })
            .collect();
        Ok(Self { cells })
    }

    /// Numeric value of `column`; `None` when missing or non-numeric.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<f64> {
        self.cells.get(column).copied().filter(|v| v.is_finite())
    }

    /// Coordinate value of `column`; missing or non-numeric cells become `0`.
    #[must_use]
    pub fn value_or_zero(&self, column: &str) -> f64 {
        // -0 collapses to 0 so both land in the same grid cell.
        match self.get(column) {
            Some(v) if v != 0.0 => v,
            _ => 0.0,
        }
    }

    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl AsRef<Row> for Row {
    fn as_ref(&self) -> &Row {
        self
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}
