//! The grid descriptor value type.

use crate::bounds::{Footprint, GeoBounds};
use crate::longitude::{lon_distance, lon_offset, row_width, wrap_lon, LonInterval};
use crate::reconcile::{reconcile, GridFields, Reconcile};
use crate::{GridResult, EPS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metadata of a regular, axis-aligned lon/lat grid.
///
/// Bounds refer to cell centers: `(xmin, ymax)` is the center of the
/// north-west cell, row 0 is the northern row and column 0 the western
/// column. The fields always satisfy
/// `nx = round(row_width(xmin, xmax, nx) / dx) + 1` and
/// `ny = round((ymax - ymin) / dy) + 1`.
///
/// A descriptor never changes after construction; every geometric
/// operation returns a new one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "GridFields", into = "GridFields")]
pub struct GridDescriptor {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
    dx: f64,
    dy: f64,
    nx: usize,
    ny: usize,
}

/// How fractional indices are turned into whole ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexRounding {
    /// Nearest cell.
    #[default]
    Round,
    /// Toward the north-west.
    Floor,
    /// Toward the south-east.
    Ceil,
}

impl IndexRounding {
    fn apply(&self, value: f64) -> isize {
        let rounded = match self {
            Self::Round => value.round(),
            Self::Floor => value.floor(),
            Self::Ceil => value.ceil(),
        };
        rounded as isize
    }
}

impl GridDescriptor {
    /// Tolerance for every floating-point consistency and equality check.
    pub const EPS: f64 = EPS;

    /// Build a descriptor from raw fields, reconciling them with `mode`.
    pub fn new(fields: GridFields, mode: Reconcile) -> GridResult<Self> {
        let f = reconcile(fields, mode)?;
        Ok(Self::from_reconciled(f))
    }

    /// Build a descriptor from a JSON object holding the eight fields.
    pub fn from_value(value: &serde_json::Value, mode: Reconcile) -> GridResult<Self> {
        Self::new(GridFields::from_value(value)?, mode)
    }

    /// Build a descriptor from JSON text holding the eight fields.
    pub fn from_json(text: &str, mode: Reconcile) -> GridResult<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Self::from_value(&value, mode)
    }

    /// Build from a corner, resolution and dimensions that are consistent by
    /// construction (the `bounds` reconciliation without validation).
    pub(crate) fn from_corner(
        xmin: f64,
        ymax: f64,
        dx: f64,
        dy: f64,
        nx: usize,
        ny: usize,
    ) -> Self {
        Self {
            xmin,
            xmax: wrap_lon(xmin + dx * (nx - 1) as f64),
            ymin: ymax - dy * (ny - 1) as f64,
            ymax,
            dx,
            dy,
            nx,
            ny,
        }
    }

    fn from_reconciled(f: GridFields) -> Self {
        Self {
            xmin: f.xmin,
            xmax: f.xmax,
            ymin: f.ymin,
            ymax: f.ymax,
            dx: f.dx,
            dy: f.dy,
            nx: f.nx,
            ny: f.ny,
        }
    }

    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn dy(&self) -> f64 {
        self.dy
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Cell-center bounds as a rectangle.
    pub fn bounds(&self) -> GeoBounds {
        GeoBounds::new(self.xmin, self.xmax, self.ymin, self.ymax)
    }

    /// Resolution as `(dx, dy)`.
    pub fn deltas(&self) -> (f64, f64) {
        (self.dx, self.dy)
    }

    /// Dimensions as `(rows, columns)`, the shape of the matching pixel array.
    pub fn shape(&self) -> (usize, usize) {
        (self.ny, self.nx)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    /// A reconciled grid always has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Eastward width of the cell-center span, unwrapped.
    pub fn width(&self) -> f64 {
        row_width(self.xmin, self.xmax, self.nx)
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn crosses_antimeridian(&self) -> bool {
        self.xmin > self.xmax
    }

    /// Whether the cells cover every longitude.
    ///
    /// Cell centers of a global grid stop one cell short of a full turn, and
    /// header rounding can shave a little more, so half a cell of slack is
    /// allowed.
    pub fn is_global(&self) -> bool {
        self.nx as f64 * self.dx >= 360.0 - self.dx / 2.0
    }

    /// Raw fields of this descriptor.
    pub fn to_fields(&self) -> GridFields {
        GridFields {
            xmin: self.xmin,
            xmax: self.xmax,
            ymin: self.ymin,
            ymax: self.ymax,
            dx: self.dx,
            dy: self.dy,
            nx: self.nx,
            ny: self.ny,
        }
    }

    /// Latitude/longitude of the center of cell `(row, col)`.
    ///
    /// Rows count south from `ymax`, columns count east from `xmin` and wrap
    /// past the antimeridian. Indices are not checked against the grid size.
    pub fn to_lat_lon(&self, row: isize, col: isize) -> (f64, f64) {
        self.fractional_lat_lon(row as f64, col as f64)
    }

    /// Latitude/longitude at fractional cell indices.
    pub fn fractional_lat_lon(&self, row: f64, col: f64) -> (f64, f64) {
        let lat = self.ymax - row * self.dy;
        let lon = wrap_lon(self.xmin + col * self.dx);
        (lat, lon)
    }

    /// Nearest `(row, col)` to a point.
    ///
    /// Points outside the grid give negative or too-large indices rather than
    /// an error; callers decide what counts as outside.
    pub fn to_row_col(&self, lat: f64, lon: f64) -> (isize, isize) {
        self.to_row_col_with(lat, lon, IndexRounding::Round)
    }

    /// `(row, col)` for a point, rounded with `rounding`.
    pub fn to_row_col_with(&self, lat: f64, lon: f64, rounding: IndexRounding) -> (isize, isize) {
        let (row, col) = self.to_row_col_float(lat, lon);
        (rounding.apply(row), rounding.apply(col))
    }

    /// Unrounded `(row, col)` for a point.
    pub fn to_row_col_float(&self, lat: f64, lon: f64) -> (f64, f64) {
        let row = (self.ymax - lat) / self.dy;
        let col = lon_offset(lon, self.xmin, self.width()) / self.dx;
        (row, col)
    }

    /// Whether a point is inside the cell-center rectangle.
    pub fn contains_point(&self, lat: f64, lon: f64) -> bool {
        self.footprint().contains_point(lat, lon)
    }

    pub(crate) fn lon_interval(&self) -> LonInterval {
        LonInterval {
            west: self.xmin,
            width: self.width(),
            global: self.is_global(),
        }
    }

    pub(crate) fn footprint(&self) -> Footprint {
        Footprint {
            lon: self.lon_interval(),
            south: self.ymin,
            north: self.ymax,
        }
    }

    /// Field-wise comparison: counts exactly, floats within `EPS`.
    ///
    /// Longitudes are compared on the circle, so `180` equals `-180`.
    pub fn approx_eq(&self, other: &GridDescriptor) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() <= EPS;
        let close_lon = |a: f64, b: f64| lon_distance(a, b).min(lon_distance(b, a)) <= EPS;
        self.nx == other.nx
            && self.ny == other.ny
            && close_lon(self.xmin, other.xmin)
            && close_lon(self.xmax, other.xmax)
            && close(self.ymin, other.ymin)
            && close(self.ymax, other.ymax)
            && close(self.dx, other.dx)
            && close(self.dy, other.dy)
    }
}

impl PartialEq for GridDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl TryFrom<GridFields> for GridDescriptor {
    type Error = crate::GridError;

    fn try_from(fields: GridFields) -> Result<Self, Self::Error> {
        Self::new(fields, Reconcile::None)
    }
}

impl From<GridDescriptor> for GridFields {
    fn from(grid: GridDescriptor) -> Self {
        grid.to_fields()
    }
}

impl fmt::Display for GridDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Bounds: ({:.4}, {:.4}, {:.4}, {:.4})",
            self.xmin, self.xmax, self.ymin, self.ymax
        )?;
        writeln!(f, "Res: ({:.4}, {:.4})", self.dx, self.dy)?;
        write!(f, "Dims: ({}, {})", self.nx, self.ny)
    }
}

/// `cells` as a whole count plus one, if it fits in `usize`.
///
/// Very small spacings make cell counts infinite or too large to index.
pub(crate) fn cell_count(cells: f64) -> Option<usize> {
    if !cells.is_finite() || cells < 0.0 || cells >= usize::MAX as f64 {
        return None;
    }
    (cells as usize).checked_add(1)
}
