use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::trace;

use crate::core::Row;
use crate::error::{ChartError, ChartResult};

/// Callback invoked when an observable table changes.
pub type ChangeCallback = Rc<dyn Fn()>;

/// External table that can hand out row snapshots and report changes.
pub trait ObservableTable {
    /// Materializes the current rows.
    fn get(&self) -> Vec<Row>;

    /// Registers `callback` for change notifications until the returned
    /// subscription is cancelled or dropped.
    fn subscribe(&self, callback: ChangeCallback) -> Subscription;
}

/// Handle to an active change subscription.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    #[must_use]
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to detach.
    #[must_use]
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    pub fn cancel(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Input accepted by `DataGroup::initialize`.
#[derive(Clone)]
pub enum DataSource {
    /// A fixed, ordered row sequence.
    Rows(Vec<Row>),
    /// A live table; the group follows its change notifications.
    Table(Rc<dyn ObservableTable>),
}

impl DataSource {
    /// Parses a JSON array of row objects.
    pub fn from_json(value: &Value) -> ChartResult<Self> {
        let items = value.as_array().ok_or_else(|| {
            ChartError::InvalidSource("expected an array of row objects".to_owned())
        })?;
        let rows = items.iter().map(Row::from_json).collect::<ChartResult<_>>()?;
        Ok(Self::Rows(rows))
    }

    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|err| ChartError::InvalidSource(err.to_string()))?;
        Self::from_json(&value)
    }

    #[must_use]
    pub fn table(table: &DataTable) -> Self {
        Self::Table(Rc::new(table.clone()))
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Row> {
        match self {
            Self::Rows(rows) => rows.clone(),
            Self::Table(table) => table.get(),
        }
    }

    #[must_use]
    pub fn is_observable(&self) -> bool {
        matches!(self, Self::Table(_))
    }
}

impl From<Vec<Row>> for DataSource {
    fn from(rows: Vec<Row>) -> Self {
        Self::Rows(rows)
    }
}

impl fmt::Debug for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rows(rows) => f.debug_tuple("Rows").field(&rows.len()).finish(),
            Self::Table(_) => f.write_str("Table(..)"),
        }
    }
}

#[derive(Default)]
struct TableState {
    rows: RefCell<Vec<Row>>,
    subscribers: RefCell<IndexMap<u64, ChangeCallback>>,
    next_id: Cell<u64>,
}

/// In-memory observable table.
///
/// Clones share the same rows and subscribers. Every mutation notifies the
/// subscribers once, after the rows have been updated.
#[derive(Clone, Default)]
pub struct DataTable {
    state: Rc<TableState>,
}

impl DataTable {
    #[must_use]
    pub fn new(rows: Vec<Row>) -> Self {
        let table = Self::default();
        *table.state.rows.borrow_mut() = rows;
        table
    }

    pub fn set_rows(&self, rows: Vec<Row>) {
        *self.state.rows.borrow_mut() = rows;
        self.notify();
    }

    pub fn push(&self, row: Row) {
        self.state.rows.borrow_mut().push(row);
        self.notify();
    }

    pub fn update(&self, index: usize, row: Row) -> ChartResult<()> {
        {
            let mut rows = self.state.rows.borrow_mut();
            let len = rows.len();
            let slot = rows.get_mut(index).ok_or_else(|| {
                ChartError::InvalidData(format!("row index {index} out of bounds ({len} rows)"))
            })?;
            *slot = row;
        }
        self.notify();
        Ok(())
    }

    pub fn remove(&self, index: usize) -> ChartResult<Row> {
        let removed = {
            let mut rows = self.state.rows.borrow_mut();
            if index >= rows.len() {
                return Err(ChartError::InvalidData(format!(
                    "row index {index} out of bounds ({} rows)",
                    rows.len()
                )));
            }
            rows.remove(index)
        };
        self.notify();
        Ok(removed)
    }

    pub fn clear(&self) {
        self.state.rows.borrow_mut().clear();
        self.notify();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.rows.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.subscribers.borrow().len()
    }

    fn notify(&self) {
        // Snapshot the callbacks so they may subscribe or cancel re-entrantly.
        let callbacks: Vec<ChangeCallback> =
            self.state.subscribers.borrow().values().cloned().collect();
        trace!(subscribers = callbacks.len(), "notify table change");
        for callback in callbacks {
            callback();
        }
    }
}

impl ObservableTable for DataTable {
    fn get(&self) -> Vec<Row> {
        self.state.rows.borrow().clone()
    }

    fn subscribe(&self, callback: ChangeCallback) -> Subscription {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        self.state.subscribers.borrow_mut().insert(id, callback);

        let state: Weak<TableState> = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                state.subscribers.borrow_mut().shift_remove(&id);
            }
        })
    }
}

impl fmt::Debug for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("rows", &self.len())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
