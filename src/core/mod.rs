pub mod axis;
pub mod column;
pub mod point;
pub mod point_set;
pub mod range;
pub mod row;
pub mod style;

pub use axis::{
    Axis, AxisRangeResolver, AxisSettings, ResolvedAxes, ResolvedAxis, ValueAxis,
    ValueAxisSettings, ValueColumn,
};
pub use column::{column_range, distinct_values, smallest_gap};
pub use point::{PlotPoint, Point, Point3d, PointId};
pub use point_set::{ColumnAssignment, GridIndex, PointSet, build_point_set};
pub use range::Range;
pub use row::Row;
pub use style::ChartStyle;
