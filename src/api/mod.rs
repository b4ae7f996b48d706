//! Host-facing surface: settings, data sources, filtering and the
//! [`DataGroup`] coordinator.

mod data_group;
mod filter;
mod settings;
mod source;

pub use data_group::{DataGroup, ReloadListener};
pub use filter::{FILTER_COLUMN, FilterAdapter, FilterListener, FilterSummary, ValueFilter};
pub use settings::DataGroupSettings;
pub use source::{ChangeCallback, DataSource, DataTable, ObservableTable, Subscription};
