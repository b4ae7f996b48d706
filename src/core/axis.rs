use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::column::{column_range, smallest_gap};
use crate::core::{ChartStyle, Range, Row};
use crate::error::{ChartError, ChartResult};

/// Tick subdivision used when no explicit step is configured.
pub const DEFAULT_STEP_COUNT: f64 = 5.0;

/// Bar width used when neither an override nor the data determines one.
pub const FALLBACK_BAR_WIDTH: f64 = 1.0;

/// Column carrying the optional color/height value.
pub const STYLE_COLUMN: &str = "style";

/// Spatial axis of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Data column backing the axis.
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }

    pub fn from_column(column: &str) -> ChartResult<Self> {
        Self::ALL
            .into_iter()
            .find(|axis| axis.column() == column)
            .ok_or_else(|| ChartError::InvalidColumn(column.to_owned()))
    }

    /// Only the horizontal axes get bar margins.
    #[must_use]
    pub fn takes_bar_width(self) -> bool {
        self != Self::Z
    }
}

/// Per-axis overrides. A present field replaces the computed quantity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisSettings {
    pub bar_width: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

impl AxisSettings {
    pub fn validate(&self, axis: Axis) -> ChartResult<()> {
        for (name, value) in [("min", self.min), ("max", self.max)] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(ChartError::InvalidSettings(format!(
                    "{} axis {name} must be finite",
                    axis.column()
                )));
            }
        }
        for (name, value) in [("step", self.step), ("bar width", self.bar_width)] {
            if value.is_some_and(|v| !v.is_finite() || v <= 0.0) {
                return Err(ChartError::InvalidSettings(format!(
                    "{} axis {name} must be finite and > 0",
                    axis.column()
                )));
            }
        }
        Ok(())
    }
}

/// Overrides for the value axis, which has neither step nor bar width.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueAxisSettings {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ValueAxisSettings {
    pub fn validate(&self) -> ChartResult<()> {
        if self.min.is_some_and(|v| !v.is_finite()) || self.max.is_some_and(|v| !v.is_finite()) {
            return Err(ChartError::InvalidSettings(
                "value axis bounds must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAxis {
    pub range: Range,
    pub step: f64,
    /// Set for bar styles on x and y.
    pub bar_width: Option<f64>,
}

/// Source of point values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueColumn {
    /// The `style` column, with its own range.
    Style,
    /// No `style` column: values alias `z`.
    Z,
}

impl ValueColumn {
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Self::Style => STYLE_COLUMN,
            Self::Z => Axis::Z.column(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueAxis {
    pub column: ValueColumn,
    pub range: Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAxes {
    pub x: ResolvedAxis,
    pub y: ResolvedAxis,
    pub z: ResolvedAxis,
    pub value: ValueAxis,
}

impl ResolvedAxes {
    #[must_use]
    pub fn axis(&self, axis: Axis) -> &ResolvedAxis {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

/// Resolves axis ranges and steps from data plus caller overrides.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisRangeResolver {
    x: AxisSettings,
    y: AxisSettings,
    z: AxisSettings,
    value: ValueAxisSettings,
}

impl AxisRangeResolver {
    #[must_use]
    pub fn new(
        x: AxisSettings,
        y: AxisSettings,
        z: AxisSettings,
        value: ValueAxisSettings,
    ) -> Self {
        Self { x, y, z, value }
    }

    #[must_use]
    pub fn settings(&self, axis: Axis) -> &AxisSettings {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    #[must_use]
    pub fn value_settings(&self) -> &ValueAxisSettings {
        &self.value
    }

    /// Bar width for `axis`: override, else the smallest data gap, else `1`.
    #[must_use]
    pub fn bar_width<R: AsRef<Row>>(&self, rows: &[R], axis: Axis) -> f64 {
        self.settings(axis)
            .bar_width
            .or_else(|| smallest_gap(rows, axis.column()))
            .unwrap_or(FALLBACK_BAR_WIDTH)
    }

    pub fn resolve_axis<R: AsRef<Row>>(
        &self,
        rows: &[R],
        axis: Axis,
        with_bars: bool,
    ) -> ChartResult<ResolvedAxis> {
        let settings = self.settings(axis);
        settings.validate(axis)?;

        let mut range = column_range(rows, axis.column());
        let bar_width = (with_bars && axis.takes_bar_width()).then(|| self.bar_width(rows, axis));
        if let Some(width) = bar_width {
            range.expand(width / 2.0);
        }

        range.apply_defaults(settings.min, settings.max);
        let step = settings
            .step
            .unwrap_or_else(|| range.range() / DEFAULT_STEP_COUNT);

        trace!(
            axis = axis.column(),
            min = range.min(),
            max = range.max(),
            step,
            ?bar_width,
            "resolved axis"
        );
        Ok(ResolvedAxis {
            range,
            step,
            bar_width,
        })
    }

    /// Same as [`Self::resolve_axis`] for a column given by name.
    pub fn resolve_column<R: AsRef<Row>>(
        &self,
        rows: &[R],
        column: &str,
        with_bars: bool,
    ) -> ChartResult<ResolvedAxis> {
        self.resolve_axis(rows, Axis::from_column(column)?, with_bars)
    }

    /// Value axis: the `style` column when the first row carries one,
    /// otherwise an alias of `z`.
    pub fn resolve_value_axis<R: AsRef<Row>>(
        &self,
        rows: &[R],
        z: &ResolvedAxis,
    ) -> ChartResult<ValueAxis> {
        let has_style = rows
            .first()
            .is_some_and(|row| row.as_ref().has_column(STYLE_COLUMN));
        if !has_style {
            return Ok(ValueAxis {
                column: ValueColumn::Z,
                range: z.range,
            });
        }

        self.value.validate()?;
        let mut range = column_range(rows, STYLE_COLUMN);
        range.apply_defaults(self.value.min, self.value.max);
        trace!(min = range.min(), max = range.max(), "resolved value axis");
        Ok(ValueAxis {
            column: ValueColumn::Style,
            range,
        })
    }

    pub fn resolve_all<R: AsRef<Row>>(
        &self,
        rows: &[R],
        style: ChartStyle,
    ) -> ChartResult<ResolvedAxes> {
        let with_bars = style.has_bars();
        let x = self.resolve_axis(rows, Axis::X, with_bars)?;
        let y = self.resolve_axis(rows, Axis::Y, with_bars)?;
        let z = self.resolve_axis(rows, Axis::Z, with_bars)?;
        let value = self.resolve_value_axis(rows, &z)?;
        Ok(ResolvedAxes { x, y, z, value })
    }
}
