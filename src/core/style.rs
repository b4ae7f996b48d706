use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Chart style tag. Decides bar-width handling and the point-set shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ChartStyle {
    Bar,
    BarColor,
    BarSize,
    #[default]
    Dot,
    DotLine,
    DotColor,
    DotSize,
    Line,
    Grid,
    Surface,
}

impl ChartStyle {
    pub const ALL: [ChartStyle; 10] = [
        ChartStyle::Bar,
        ChartStyle::BarColor,
        ChartStyle::BarSize,
        ChartStyle::Dot,
        ChartStyle::DotLine,
        ChartStyle::DotColor,
        ChartStyle::DotSize,
        ChartStyle::Line,
        ChartStyle::Grid,
        ChartStyle::Surface,
    ];

    /// Bar styles expand the x/y ranges by half a bar width.
    #[must_use]
    pub fn has_bars(self) -> bool {
        matches!(self, Self::Bar | Self::BarColor | Self::BarSize)
    }

    /// Grid and surface charts need the neighbor-linked mesh.
    #[must_use]
    pub fn is_mesh(self) -> bool {
        matches!(self, Self::Grid | Self::Surface)
    }

    #[must_use]
    pub fn links_sequentially(self) -> bool {
        self == Self::Line
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::BarColor => "bar-color",
            Self::BarSize => "bar-size",
            Self::Dot => "dot",
            Self::DotLine => "dot-line",
            Self::DotColor => "dot-color",
            Self::DotSize => "dot-size",
            Self::Line => "line",
            Self::Grid => "grid",
            Self::Surface => "surface",
        }
    }
}

impl fmt::Display for ChartStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartStyle {
    type Err = ChartError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let normalized = tag.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == normalized)
            .ok_or_else(|| ChartError::InvalidStyle(tag.to_owned()))
    }
}
