//! chart3d-rs: data preparation for 3D charts.
//!
//! The crate turns a tabular, possibly live-updating dataset into resolved
//! axis ranges and renderer-facing point collections (scatter, line-linked
//! or grid-linked meshes). Rendering itself is left to the host.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{DataGroup, DataGroupSettings, DataSource, DataTable};
pub use crate::core::{ChartStyle, PointSet, Range, Row};
pub use error::{ChartError, ChartResult};
