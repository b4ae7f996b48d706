use std::rc::Rc;

use ordered_float::OrderedFloat;
use serde::Serialize;
use tracing::debug;

use crate::core::axis::{Axis, ResolvedAxes};
use crate::core::column::distinct_values;
use crate::core::{ChartStyle, PlotPoint, Point, Point3d, PointId, Row};

/// Columns feeding each coordinate of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnAssignment {
    pub x: &'static str,
    pub y: &'static str,
    pub z: &'static str,
    pub value: &'static str,
}

impl Default for ColumnAssignment {
    fn default() -> Self {
        Self {
            x: Axis::X.column(),
            y: Axis::Y.column(),
            z: Axis::Z.column(),
            value: Axis::Z.column(),
        }
    }
}

impl ColumnAssignment {
    #[must_use]
    pub fn for_axes(axes: &ResolvedAxes) -> Self {
        Self {
            value: axes.value.column.column(),
            ..Self::default()
        }
    }
}

/// Dense `(x index, y index)` lookup over the distinct x/y values.
///
/// Absent cells are `None`; a complete grid has every cell occupied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridIndex {
    x_values: Vec<f64>,
    y_values: Vec<f64>,
    cells: Vec<Option<PointId>>,
}

impl GridIndex {
    fn new(x_values: Vec<f64>, y_values: Vec<f64>) -> Self {
        let cells = vec![None; x_values.len() * y_values.len()];
        Self {
            x_values,
            y_values,
            cells,
        }
    }

    /// `(columns along x, rows along y)`.
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.x_values.len(), self.y_values.len())
    }

    #[must_use]
    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    #[must_use]
    pub fn y_values(&self) -> &[f64] {
        &self.y_values
    }

    #[must_use]
    pub fn cell(&self, x_index: usize, y_index: usize) -> Option<PointId> {
        if x_index >= self.x_values.len() || y_index >= self.y_values.len() {
            return None;
        }
        self.cells[self.offset(x_index, y_index)]
    }

    /// Cell coordinates of an `(x, y)` position, if both values are indexed.
    #[must_use]
    pub fn locate(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        Some((search(&self.x_values, x)?, search(&self.y_values, y)?))
    }

    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    fn offset(&self, x_index: usize, y_index: usize) -> usize {
        x_index * self.y_values.len() + y_index
    }

    fn insert(&mut self, x_index: usize, y_index: usize, id: PointId) {
        let offset = self.offset(x_index, y_index);
        self.cells[offset] = Some(id);
    }
}

fn search(values: &[f64], needle: f64) -> Option<usize> {
    values
        .binary_search_by(|probe| OrderedFloat(*probe).cmp(&OrderedFloat(needle)))
        .ok()
}

/// Renderer-facing output: points in input order plus the grid for mesh
/// styles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointSet {
    points: Vec<PlotPoint>,
    grid: Option<GridIndex>,
}

impl PointSet {
    #[must_use]
    pub fn points(&self) -> &[PlotPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: PointId) -> Option<&PlotPoint> {
        self.points.get(id.0)
    }

    /// The grid index; only present for grid and surface styles.
    #[must_use]
    pub fn grid(&self) -> Option<&GridIndex> {
        self.grid.as_ref()
    }

    #[must_use]
    pub fn right_of(&self, id: PointId) -> Option<&PlotPoint> {
        self.get(id)?.right.and_then(|n| self.get(n))
    }

    #[must_use]
    pub fn top_of(&self, id: PointId) -> Option<&PlotPoint> {
        self.get(id)?.top.and_then(|n| self.get(n))
    }

    #[must_use]
    pub fn cross_of(&self, id: PointId) -> Option<&PlotPoint> {
        self.get(id)?.cross.and_then(|n| self.get(n))
    }

    #[must_use]
    pub fn next_of(&self, id: PointId) -> Option<&PlotPoint> {
        self.get(id)?.next.and_then(|n| self.get(n))
    }

    /// Point occupying the grid cell at `(x, y)`.
    #[must_use]
    pub fn at(&self, x: f64, y: f64) -> Option<PointId> {
        let grid = self.grid.as_ref()?;
        let (xi, yi) = grid.locate(x, y)?;
        grid.cell(xi, yi)
    }
}

/// Builds the point set for `style` from a row snapshot.
///
/// Points keep input order. `line` links each point to its successor; `grid`
/// and `surface` link every cell occupant to its right, top and diagonal
/// neighbors. When two rows share a cell the later one wins and the earlier
/// one is left unlinked.
#[must_use]
pub fn build_point_set(
    rows: &[Rc<Row>],
    columns: ColumnAssignment,
    style: ChartStyle,
    z_floor: f64,
) -> PointSet {
    let mut points: Vec<PlotPoint> = rows
        .iter()
        .map(|row| {
            let point = Point {
                position: Point3d::new(
                    row.value_or_zero(columns.x),
                    row.value_or_zero(columns.y),
                    row.value_or_zero(columns.z),
                ),
                value: row.value_or_zero(columns.value),
                payload: Rc::clone(row),
            };
            PlotPoint::new(point, z_floor)
        })
        .collect();

    let mut grid = None;
    if style.is_mesh() {
        grid = Some(stitch_grid(rows, columns, &mut points));
    } else if style.links_sequentially() {
        link_sequence(&mut points);
    }

    debug!(
        style = %style,
        rows = rows.len(),
        points = points.len(),
        grid_cells = ?grid.as_ref().map(GridIndex::occupied_cells),
        "built point set"
    );
    PointSet { points, grid }
}

fn link_sequence(points: &mut [PlotPoint]) {
    let count = points.len();
    for (index, point) in points.iter_mut().enumerate() {
        point.next = (index + 1 < count).then_some(PointId(index + 1));
    }
}

fn stitch_grid(
    rows: &[Rc<Row>],
    columns: ColumnAssignment,
    points: &mut [PlotPoint],
) -> GridIndex {
    let mut grid = GridIndex::new(
        distinct_values(rows, columns.x),
        distinct_values(rows, columns.y),
    );

    for (index, plot) in points.iter().enumerate() {
        let position = plot.position();
        if let Some((xi, yi)) = grid.locate(position.x, position.y) {
            grid.insert(xi, yi, PointId(index));
        }
    }

    let (nx, ny) = grid.dimensions();
    for xi in 0..nx {
        for yi in 0..ny {
            let Some(id) = grid.cell(xi, yi) else {
                continue;
            };
            let has_right = xi + 1 < nx;
            let has_top = yi + 1 < ny;
            let plot = &mut points[id.0];
            plot.right = if has_right { grid.cell(xi + 1, yi) } else { None };
            plot.top = if has_top { grid.cell(xi, yi + 1) } else { None };
            plot.cross = if has_right && has_top {
                grid.cell(xi + 1, yi + 1)
            } else {
                None
            };
        }
    }

    grid
}
