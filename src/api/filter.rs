use std::fmt;
use std::rc::Rc;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Row, distinct_values};
use crate::error::{ChartError, ChartResult};

/// Column that switches on filtering when present in the data.
pub const FILTER_COLUMN: &str = "filter";

/// Label/value pair describing the active filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSummary {
    pub label: String,
    pub value: f64,
}

impl fmt::Display for FilterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Listener for filter selection changes.
pub type FilterListener = Box<dyn FnMut(&FilterSummary)>;

/// Secondary row filter keyed on a single column.
pub trait FilterAdapter {
    fn column(&self) -> &str;

    fn label(&self) -> &str;

    /// Selectable values, sorted ascending.
    fn values(&self) -> &[f64];

    fn selected_index(&self) -> Option<usize>;

    fn selected_value(&self) -> Option<f64> {
        self.selected_index()
            .and_then(|index| self.values().get(index).copied())
    }

    /// Changes the selection. Returns the new summary when the selection
    /// moved; the change listener is left to the caller.
    fn select_index(&mut self, index: usize) -> ChartResult<Option<FilterSummary>>;

    /// Advances to the next value, wrapping around at the end.
    fn select_next(&mut self) -> ChartResult<Option<FilterSummary>> {
        let count = self.values().len();
        if count == 0 {
            return Ok(None);
        }
        let next = self.selected_index().map_or(0, |index| (index + 1) % count);
        self.select_index(next)
    }

    /// Selects `index` and runs the change listener if the selection moved.
    fn select_and_notify(&mut self, index: usize) -> ChartResult<()> {
        let Some(summary) = self.select_index(index)? else {
            return Ok(());
        };
        if let Some(mut listener) = self.take_on_change() {
            listener(&summary);
            if !self.has_on_change() {
                self.set_on_change(listener);
            }
        }
        Ok(())
    }

    /// Re-reads the selectable values from a new snapshot.
    fn refresh(&mut self, rows: &[Rc<Row>]);

    /// Rows matching the current selection, in input order.
    fn filter_rows(&self, rows: &[Rc<Row>]) -> Vec<Rc<Row>>;

    fn set_on_change(&mut self, listener: FilterListener);

    /// Detaches the change listener so it can run without the filter borrowed.
    fn take_on_change(&mut self) -> Option<FilterListener>;

    fn has_on_change(&self) -> bool;

    fn summary(&self) -> Option<FilterSummary> {
        self.selected_value().map(|value| FilterSummary {
            label: self.label().to_owned(),
            value,
        })
    }
}

/// Keeps rows whose filter cell equals the selected distinct value.
pub struct ValueFilter {
    column: String,
    label: String,
    values: Vec<f64>,
    selected: usize,
    on_change: Option<FilterListener>,
}

impl ValueFilter {
    #[must_use]
    pub fn new(column: impl Into<String>, label: Option<String>, rows: &[Rc<Row>]) -> Self {
        let column = column.into();
        let label = label.unwrap_or_else(|| column.clone());
        let values = distinct_values(rows, &column);
        Self {
            column,
            label,
            values,
            selected: 0,
            on_change: None,
        }
    }
}

impl FilterAdapter for ValueFilter {
    fn column(&self) -> &str {
        &self.column
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn values(&self) -> &[f64] {
        &self.values
    }

    fn selected_index(&self) -> Option<usize> {
        (self.selected < self.values.len()).then_some(self.selected)
    }

    fn select_index(&mut self, index: usize) -> ChartResult<Option<FilterSummary>> {
        if index >= self.values.len() {
            return Err(ChartError::InvalidData(format!(
                "filter index {index} out of range ({} values)",
                self.values.len()
            )));
        }
        if index == self.selected {
            return Ok(None);
        }
        self.selected = index;
        debug!(
            column = %self.column,
            index,
            value = self.values[index],
            "filter selection changed"
        );
        Ok(self.summary())
    }

    fn refresh(&mut self, rows: &[Rc<Row>]) {
        let previous = self.selected_value();
        self.values = distinct_values(rows, &self.column);
        self.selected = previous
            .and_then(|value| {
                self.values
                    .binary_search_by(|probe| OrderedFloat(*probe).cmp(&OrderedFloat(value)))
                    .ok()
            })
            .unwrap_or(0);
    }

    fn filter_rows(&self, rows: &[Rc<Row>]) -> Vec<Rc<Row>> {
        let Some(selected) = self.selected_value() else {
            return Vec::new();
        };
        rows.iter()
            .filter(|row| row.value_or_zero(&self.column) == selected)
            .cloned()
            .collect()
    }

    fn set_on_change(&mut self, listener: FilterListener) {
        self.on_change = Some(listener);
    }

    fn take_on_change(&mut self) -> Option<FilterListener> {
        self.on_change.take()
    }

    fn has_on_change(&self) -> bool {
        self.on_change.is_some()
    }
}

impl fmt::Debug for ValueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueFilter")
            .field("column", &self.column)
            .field("label", &self.label)
            .field("values", &self.values)
            .field("selected", &self.selected)
            .finish()
    }
}
