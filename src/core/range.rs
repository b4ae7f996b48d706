use serde::{Deserialize, Serialize};

/// Min/max accumulator for one axis.
///
/// A fresh range is empty. [`Range::adjust`] grows it over numeric input and
/// [`Range::apply_defaults`] finalizes it so that `max > min` always holds
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    min: f64,
    max: f64,
}

impl Default for Range {
    fn default() -> Self {
        Self::new()
    }
}

impl Range {
    #[must_use]
    pub fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Creates a finalized range from explicit bounds.
    #[must_use]
    pub fn from_bounds(min: f64, max: f64) -> Self {
        let mut range = Self { min, max };
        range.apply_defaults(None, None);
        range
    }

    /// Widens the range to include `value`. Non-numeric input is ignored.
    pub fn adjust(&mut self, value: Option<f64>) {
        let Some(value) = value.filter(|v| v.is_finite()) else {
            return;
        };

        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Moves both bounds outward by `margin`.
    pub fn expand(&mut self, margin: f64) {
        if self.is_empty() || !margin.is_finite() {
            return;
        }
        self.min -= margin;
        self.max += margin;
    }

    /// Overwrites the bounds with the provided defaults and restores
    /// `max > min`.
    pub fn apply_defaults(&mut self, default_min: Option<f64>, default_max: Option<f64>) {
        if let Some(min) = default_min {
            self.min = min;
        }
        if let Some(max) = default_max {
            self.max = max;
        }

        if !self.min.is_finite() {
            self.min = if self.max.is_finite() {
                self.max - 1.0
            } else {
                0.0
            };
        }
        if !self.max.is_finite() || self.max <= self.min {
            self.max = self.min + 1.0;
        }
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// `true` until the first numeric value (or default) lands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    #[must_use]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}
