use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use crate::core::{
    ChartStyle, ColumnAssignment, PointSet, ResolvedAxes, Row, build_point_set,
};
use crate::error::ChartResult;

use super::filter::{FILTER_COLUMN, FilterAdapter, FilterListener, FilterSummary, ValueFilter};
use super::settings::DataGroupSettings;
use super::source::{ChangeCallback, DataSource, Subscription};

/// Hook invoked after reloads the caller did not start itself: table change
/// notifications and filter selection changes.
pub type ReloadListener = Box<dyn FnMut(Option<&PointSet>)>;

struct Prepared {
    axes: ResolvedAxes,
    points: Rc<PointSet>,
}

struct GroupState {
    settings: DataGroupSettings,
    style: ChartStyle,
    source: Option<DataSource>,
    rows: Vec<Rc<Row>>,
    subscription: Option<Subscription>,
    filter: Option<Box<dyn FilterAdapter>>,
    prepared: Option<Prepared>,
    on_reloaded: Option<ReloadListener>,
}

/// Coordinator for all data of one 3D chart.
///
/// `DataGroup` holds the row snapshot, resolves the axes, owns the optional
/// filter and builds the point set for the configured style. When initialized
/// from an observable table it follows the table's change notifications and
/// re-runs the whole pipeline on each one.
pub struct DataGroup {
    state: Rc<RefCell<GroupState>>,
    pending: Rc<Cell<bool>>,
}

impl DataGroup {
    pub fn new(settings: DataGroupSettings) -> ChartResult<Self> {
        settings.validate()?;
        Ok(Self {
            state: Rc::new(RefCell::new(GroupState {
                settings,
                style: ChartStyle::default(),
                source: None,
                rows: Vec::new(),
                subscription: None,
                filter: None,
                prepared: None,
                on_reloaded: None,
            })),
            pending: Rc::new(Cell::new(false)),
        })
    }

    /// Loads `source` and runs the pipeline for `style`.
    ///
    /// Any previous subscription is cancelled first; an observable source is
    /// subscribed again even when currently empty. An empty snapshot clears
    /// the prepared output and returns `None`.
    pub fn initialize(
        &self,
        source: DataSource,
        style: ChartStyle,
    ) -> ChartResult<Option<Rc<PointSet>>> {
        let snapshot = source.snapshot();
        let result = {
            let mut state = self.state.borrow_mut();
            state.subscription = None;
            state.style = style;
            if let DataSource::Table(table) = &source {
                state.subscription = Some(table.subscribe(self.change_callback()));
            }
            state.source = Some(source);
            state.set_rows(snapshot);
            debug!(rows = state.rows.len(), style = %style, "initialize data group");
            state.run_if_loaded()
        };
        self.drain_pending();
        result
    }

    /// Re-runs the pipeline on the held snapshot without re-reading the
    /// source. Returns `None` when nothing is loaded.
    pub fn reload(&self) -> ChartResult<Option<Rc<PointSet>>> {
        let result = self.state.borrow_mut().run_if_loaded();
        self.drain_pending();
        result
    }

    /// Points of the last pipeline run; the grid index lives on the set.
    #[must_use]
    pub fn point_set(&self) -> Option<Rc<PointSet>> {
        self.state
            .borrow()
            .prepared
            .as_ref()
            .map(|prepared| Rc::clone(&prepared.points))
    }

    #[must_use]
    pub fn axes(&self) -> Option<ResolvedAxes> {
        self.state.borrow().prepared.as_ref().map(|prepared| prepared.axes)
    }

    #[must_use]
    pub fn style(&self) -> ChartStyle {
        self.state.borrow().style
    }

    /// Number of rows in the unfiltered snapshot.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.state.borrow().rows.len()
    }

    #[must_use]
    pub fn has_subscription(&self) -> bool {
        self.state.borrow().subscription.is_some()
    }

    #[must_use]
    pub fn has_filter(&self) -> bool {
        self.state.borrow().filter.is_some()
    }

    /// Selectable filter values; empty without a filter column.
    #[must_use]
    pub fn filter_values(&self) -> Vec<f64> {
        self.state
            .borrow()
            .filter
            .as_ref()
            .map(|filter| filter.values().to_vec())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn active_filter_summary(&self) -> Option<FilterSummary> {
        self.state.borrow().filter.as_ref()?.summary()
    }

    /// Selects the filter value at `index` and rebuilds the points.
    ///
    /// Axis ranges stay those of the unfiltered snapshot. Does nothing when
    /// no filter is configured or the selection is unchanged.
    pub fn select_filter_index(&self, index: usize) -> ChartResult<()> {
        self.update_filter(|filter| filter.select_index(index))
    }

    /// Advances the filter to its next value, wrapping around.
    pub fn next_filter_value(&self) -> ChartResult<()> {
        self.update_filter(|filter| filter.select_next())
    }

    /// Attaches `listener` to the current filter. Returns `false` when the
    /// data has no filter column.
    pub fn set_on_filter_change(&self, listener: FilterListener) -> bool {
        match self.state.borrow_mut().filter.as_mut() {
            Some(filter) => {
                filter.set_on_change(listener);
                true
            }
            None => false,
        }
    }

    pub fn set_on_reloaded(&self, listener: ReloadListener) {
        self.state.borrow_mut().on_reloaded = Some(listener);
    }

    fn update_filter(
        &self,
        change: impl FnOnce(&mut dyn FilterAdapter) -> ChartResult<Option<FilterSummary>>,
    ) -> ChartResult<()> {
        let (summary, listener) = {
            let mut state = self.state.borrow_mut();
            let Some(filter) = state.filter.as_mut() else {
                return Ok(());
            };
            let Some(summary) = change(filter.as_mut())? else {
                return Ok(());
            };
            let listener = filter.take_on_change();
            state.rebuild_points();
            (summary, listener)
        };

        // Listeners run unborrowed so they may read the group back.
        if let Some(mut listener) = listener {
            listener(&summary);
            let mut state = self.state.borrow_mut();
            if let Some(filter) = state.filter.as_mut() {
                if !filter.has_on_change() {
                    filter.set_on_change(listener);
                }
            }
        }
        notify_reloaded(&self.state);
        self.drain_pending();
        Ok(())
    }

    fn change_callback(&self) -> ChangeCallback {
        let state: Weak<RefCell<GroupState>> = Rc::downgrade(&self.state);
        let pending = Rc::clone(&self.pending);
        Rc::new(move || {
            let Some(state) = state.upgrade() else {
                return;
            };
            if state.try_borrow_mut().is_err() {
                trace!("data group busy, queueing reload");
                pending.set(true);
                return;
            }
            reload_from_source(&state);
            while pending.replace(false) {
                reload_from_source(&state);
            }
        })
    }

    fn drain_pending(&self) {
        while self.pending.replace(false) {
            reload_from_source(&self.state);
        }
    }
}

fn reload_from_source(state: &Rc<RefCell<GroupState>>) {
    state.borrow_mut().reload_from_source();
    notify_reloaded(state);
}

fn notify_reloaded(state: &Rc<RefCell<GroupState>>) {
    let (listener, points) = {
        let mut guard = state.borrow_mut();
        let points = guard
            .prepared
            .as_ref()
            .map(|prepared| Rc::clone(&prepared.points));
        (guard.on_reloaded.take(), points)
    };
    let Some(mut listener) = listener else {
        return;
    };

    listener(points.as_deref());

    let mut guard = state.borrow_mut();
    if guard.on_reloaded.is_none() {
        guard.on_reloaded = Some(listener);
    }
}

impl GroupState {
    fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows.into_iter().map(Rc::new).collect();
    }

    fn run_if_loaded(&mut self) -> ChartResult<Option<Rc<PointSet>>> {
        if self.rows.is_empty() {
            self.prepared = None;
            return Ok(None);
        }
        self.run_pipeline().map(Some)
    }

    fn run_pipeline(&mut self) -> ChartResult<Rc<PointSet>> {
        self.prepared = None;
        let axes = self
            .settings
            .resolver()
            .resolve_all(&self.rows, self.style)?;
        debug!(
            x_min = axes.x.range.min(),
            x_max = axes.x.range.max(),
            y_min = axes.y.range.min(),
            y_max = axes.y.range.max(),
            z_min = axes.z.range.min(),
            z_max = axes.z.range.max(),
            value_column = axes.value.column.column(),
            "resolved axes"
        );

        self.sync_filter();
        let points = self.build_points(&axes);
        self.prepared = Some(Prepared {
            axes,
            points: Rc::clone(&points),
        });
        Ok(points)
    }

    /// Creates the filter on first sight of a filter column and keeps it
    /// across reloads so the selection survives.
    fn sync_filter(&mut self) {
        let has_filter_column = self
            .rows
            .first()
            .is_some_and(|row| row.has_column(FILTER_COLUMN));
        if !has_filter_column {
            self.filter = None;
            return;
        }

        match self.filter.as_mut() {
            Some(filter) => filter.refresh(&self.rows),
            None => {
                let label = self.settings.filter_label.clone();
                self.filter = Some(Box::new(ValueFilter::new(FILTER_COLUMN, label, &self.rows)));
            }
        }
    }

    fn build_points(&self, axes: &ResolvedAxes) -> Rc<PointSet> {
        let filtered;
        let rows: &[Rc<Row>] = match &self.filter {
            Some(filter) => {
                filtered = filter.filter_rows(&self.rows);
                &filtered
            }
            None => &self.rows,
        };
        Rc::new(build_point_set(
            rows,
            ColumnAssignment::for_axes(axes),
            self.style,
            axes.z.range.min(),
        ))
    }

    fn rebuild_points(&mut self) {
        let Some(axes) = self.prepared.as_ref().map(|prepared| prepared.axes) else {
            return;
        };
        let points = self.build_points(&axes);
        self.prepared = Some(Prepared { axes, points });
    }

    fn reload_from_source(&mut self) {
        let Some(source) = self.source.as_ref() else {
            return;
        };
        let snapshot = source.snapshot();
        self.set_rows(snapshot);
        debug!(rows = self.rows.len(), "reload after source change");
        if let Err(err) = self.run_if_loaded() {
            warn!(error = %err, "skipping reload after source change");
        }
    }
}
