use serde::{Deserialize, Serialize};

use crate::core::{Axis, AxisRangeResolver, AxisSettings, ValueAxisSettings};
use crate::error::{ChartError, ChartResult};

/// Caller overrides for a data group.
///
/// Serialized as the flat key set hosts already use (`defaultXMin`,
/// `defaultYBarWidth`, ...). Every key is optional and independent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DataGroupSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_x_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_x_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_x_step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_y_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_y_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_y_step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_z_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_z_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_z_step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_x_bar_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_y_bar_width: Option<f64>,
    /// Label shown for the filter column; defaults to the column name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_label: Option<String>,
}

impl DataGroupSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|err| ChartError::InvalidSettings(err.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        serde_json::to_string(self).map_err(|err| ChartError::InvalidSettings(err.to_string()))
    }

    pub fn validate(&self) -> ChartResult<()> {
        for axis in Axis::ALL {
            self.axis(axis).validate(axis)?;
        }
        self.value_axis().validate()
    }

    /// Overrides for one spatial axis. The z axis never has a bar width.
    #[must_use]
    pub fn axis(&self, axis: Axis) -> AxisSettings {
        match axis {
            Axis::X => AxisSettings {
                bar_width: self.default_x_bar_width,
                min: self.default_x_min,
                max: self.default_x_max,
                step: self.default_x_step,
            },
            Axis::Y => AxisSettings {
                bar_width: self.default_y_bar_width,
                min: self.default_y_min,
                max: self.default_y_max,
                step: self.default_y_step,
            },
            Axis::Z => AxisSettings {
                bar_width: None,
                min: self.default_z_min,
                max: self.default_z_max,
                step: self.default_z_step,
            },
        }
    }

    #[must_use]
    pub fn value_axis(&self) -> ValueAxisSettings {
        ValueAxisSettings {
            min: self.default_value_min,
            max: self.default_value_max,
        }
    }

    #[must_use]
    pub fn resolver(&self) -> AxisRangeResolver {
        AxisRangeResolver::new(
            self.axis(Axis::X),
            self.axis(Axis::Y),
            self.axis(Axis::Z),
            self.value_axis(),
        )
    }

    /// Sets min/max overrides for one spatial axis.
    #[must_use]
    pub fn with_axis_bounds(mut self, axis: Axis, min: Option<f64>, max: Option<f64>) -> Self {
        match axis {
            Axis::X => {
                self.default_x_min = min;
                self.default_x_max = max;
            }
            Axis::Y => {
                self.default_y_min = min;
                self.default_y_max = max;
            }
            Axis::Z => {
                self.default_z_min = min;
                self.default_z_max = max;
            }
        }
        self
    }

    #[must_use]
    pub fn with_axis_step(mut self, axis: Axis, step: f64) -> Self {
        match axis {
            Axis::X => self.default_x_step = Some(step),
            Axis::Y => self.default_y_step = Some(step),
            Axis::Z => self.default_z_step = Some(step),
        }
        self
    }

    /// Sets the bar width of x or y. Ignored for z.
    #[must_use]
    pub fn with_bar_width(mut self, axis: Axis, width: f64) -> Self {
        match axis {
            Axis::X => self.default_x_bar_width = Some(width),
            Axis::Y => self.default_y_bar_width = Some(width),
            Axis::Z => {}
        }
        self
    }

    #[must_use]
    pub fn with_value_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.default_value_min = min;
        self.default_value_max = max;
        self
    }

    #[must_use]
    pub fn with_filter_label(mut self, label: impl Into<String>) -> Self {
        self.filter_label = Some(label.into());
        self
    }
}
