use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::Row;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3d {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Index of a [`PlotPoint`] inside its owning `PointSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(pub(crate) usize);

impl PointId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Spatial sample with its color/height value and the row it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub position: Point3d,
    pub value: f64,
    pub payload: Rc<Row>,
}

/// Renderer-facing point.
///
/// Neighbor fields are relations to siblings in the same `PointSet`, never
/// ownership.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    pub point: Point,
    /// `point` projected onto the bottom of the z range.
    pub bottom: Point3d,
    pub right: Option<PointId>,
    pub top: Option<PointId>,
    pub cross: Option<PointId>,
    pub next: Option<PointId>,
}

impl PlotPoint {
    #[must_use]
    pub fn new(point: Point, z_floor: f64) -> Self {
        let bottom = Point3d::new(point.position.x, point.position.y, z_floor);
        Self {
            point,
            bottom,
            right: None,
            top: None,
            cross: None,
            next: None,
        }
    }

    #[must_use]
    pub fn position(&self) -> Point3d {
        self.point.position
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.point.value
    }

    #[must_use]
    pub fn payload(&self) -> &Row {
        &self.point.payload
    }
}
