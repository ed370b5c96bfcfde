//! Alignment, intersection and containment between grids.

use crate::bounds::{Footprint, GeoBounds};
use crate::descriptor::cell_count;
use crate::longitude::{lon_distance, lon_offset};
use crate::{GridDescriptor, GridError, GridResult, EPS};

/// Allowed distance between an offset and a grid line, in cells of `step`.
fn line_tolerance(step: f64) -> f64 {
    EPS / step
}

/// Whether `offset` degrees from the grid origin falls on a grid line.
fn on_grid_line(offset: f64, step: f64) -> bool {
    let cells = offset / step;
    (cells - cells.round()).abs() <= line_tolerance(step)
}

/// First and last grid line inside `[low, high]` (offsets in degrees).
fn snap_inward(low: f64, high: f64, step: f64) -> (i64, i64) {
    let first = (low / step - line_tolerance(step)).ceil() as i64;
    let last = (high / step + line_tolerance(step)).floor() as i64;
    (first, last)
}

/// Cell count of a snapped range, if it holds at least two cells.
fn span_cells(first: i64, last: i64) -> Option<usize> {
    let n = last.checked_sub(first)?.checked_add(1)?;
    (n >= 2).then_some(n as usize)
}

impl GridDescriptor {
    /// Whether every edge of `other` lies on one of this grid's cell lines.
    ///
    /// Only the phase is compared; `other` may have a different resolution.
    pub fn is_aligned(&self, other: &GridDescriptor) -> bool {
        let west = lon_distance(other.xmin(), self.xmin());
        let east = west + other.width();
        let top = self.ymax() - other.ymax();
        let bottom = self.ymax() - other.ymin();

        on_grid_line(west, self.dx())
            && on_grid_line(east, self.dx())
            && on_grid_line(top, self.dy())
            && on_grid_line(bottom, self.dy())
    }

    /// Whether the two grids overlap by a non-empty area.
    pub fn intersects(&self, other: &GridDescriptor) -> bool {
        self.footprint().intersects(&other.footprint())
    }

    /// Whether `other` lies entirely inside this grid.
    pub fn contains(&self, other: &GridDescriptor) -> bool {
        self.footprint().contains(&other.footprint())
    }

    /// Whether no part of `other`, not even an edge, lies inside this grid.
    ///
    /// Grids that only touch along an edge neither intersect nor satisfy this.
    pub fn does_not_contain(&self, other: &GridDescriptor) -> bool {
        self.footprint().is_disjoint(&other.footprint())
    }

    /// The overlap of two grids, tiled at the finer resolution.
    ///
    /// On each axis the grid with the smaller spacing provides both the
    /// resolution and the cell lines; the overlap is snapped inward onto
    /// them.
    pub fn intersection(&self, other: &GridDescriptor) -> GridResult<GridDescriptor> {
        let overlap = self.overlap_with(&other.footprint())?;

        let xref = if other.dx() < self.dx() { other } else { self };
        let yref = if other.dy() < self.dy() { other } else { self };

        let west = lon_distance(overlap.lon.west, xref.xmin());
        let (c0, c1) = snap_inward(west, west + overlap.lon.width, xref.dx());
        let (r0, r1) = snap_inward(
            yref.ymax() - overlap.north,
            yref.ymax() - overlap.south,
            yref.dy(),
        );
        let (nx, ny) = match (span_cells(c0, c1), span_cells(r0, r1)) {
            (Some(nx), Some(ny)) => (nx, ny),
            _ => {
                return Err(GridError::no_intersection(format!(
                    "overlap of {} and {} is smaller than two cells",
                    self.bounds(),
                    other.bounds()
                )))
            }
        };

        tracing::debug!(
            cols = ?(c0, c1),
            rows = ?(r0, r1),
            dx = xref.dx(),
            dy = yref.dy(),
            "Snapped grid intersection"
        );

        let (_, xmin) = xref.fractional_lat_lon(0.0, c0 as f64);
        let (ymax, _) = yref.fractional_lat_lon(r0 as f64, 0.0);
        Ok(GridDescriptor::from_corner(
            xmin,
            ymax,
            xref.dx(),
            yref.dy(),
            nx,
            ny,
        ))
    }

    /// The overlap of two grids, tiled at `(dx, dy)` from its north-west corner.
    pub fn intersection_with_resolution(
        &self,
        other: &GridDescriptor,
        dx: f64,
        dy: f64,
    ) -> GridResult<GridDescriptor> {
        if !(dx > 0.0 && dy > 0.0 && dx.is_finite() && dy.is_finite()) {
            return Err(GridError::invalid_argument(format!(
                "resolution must be positive, got dx={} dy={}",
                dx, dy
            )));
        }
        let overlap = self.overlap_with(&other.footprint())?;
        let height = overlap.north - overlap.south;
        if cell_count(overlap.lon.width / dx).is_none() || cell_count(height / dy).is_none() {
            return Err(GridError::invalid_argument(format!(
                "resolution ({}, {}) is too fine to tile the overlap of {} and {}",
                dx,
                dy,
                self.bounds(),
                other.bounds()
            )));
        }

        let (_, c1) = snap_inward(0.0, overlap.lon.width, dx);
        let (_, r1) = snap_inward(0.0, height, dy);
        let (nx, ny) = match (span_cells(0, c1), span_cells(0, r1)) {
            (Some(nx), Some(ny)) => (nx, ny),
            _ => {
                return Err(GridError::no_intersection(format!(
                    "overlap of {} and {} is smaller than two cells at ({}, {})",
                    self.bounds(),
                    other.bounds(),
                    dx,
                    dy
                )))
            }
        };

        Ok(GridDescriptor::from_corner(
            overlap.lon.west,
            overlap.north,
            dx,
            dy,
            nx,
            ny,
        ))
    }

    /// The largest sub-grid of this grid that fits inside `sample`.
    ///
    /// The result keeps this grid's resolution and is aligned with it: the
    /// overlap's west and south edges move east/north to the next cell line,
    /// its east and north edges move west/south.
    pub fn bounds_within(&self, sample: &GridDescriptor) -> GridResult<GridDescriptor> {
        self.snap_within(&sample.footprint())
    }

    /// Like [`bounds_within`](Self::bounds_within) for a bare rectangle.
    pub fn bounds_within_box(&self, sample: &GeoBounds) -> GridResult<GridDescriptor> {
        self.snap_within(&sample.footprint())
    }

    /// `sample` moved onto this grid's cell lines at this grid's resolution.
    ///
    /// Each edge goes to the nearest line, so the result can be larger than
    /// `sample` on one side and smaller on another, and it need not lie
    /// inside this grid.
    pub fn aligned(&self, sample: &GridDescriptor) -> GridDescriptor {
        let west = lon_offset(sample.xmin(), self.xmin(), self.width());
        let east = west + sample.width();
        let c0 = (west / self.dx()).round() as i64;
        let c1 = (east / self.dx()).round() as i64;
        let r0 = ((self.ymax() - sample.ymax()) / self.dy()).round() as i64;
        let r1 = ((self.ymax() - sample.ymin()) / self.dy()).round() as i64;

        tracing::debug!(
            cols = ?(c0, c1),
            rows = ?(r0, r1),
            "Aligned sample to host grid"
        );

        let (ymax, xmin) = self.fractional_lat_lon(r0 as f64, c0 as f64);
        GridDescriptor::from_corner(
            xmin,
            ymax,
            self.dx(),
            self.dy(),
            c1.saturating_sub(c0).max(0) as usize + 1,
            r1.saturating_sub(r0).max(0) as usize + 1,
        )
    }

    fn overlap_with(&self, other: &Footprint) -> GridResult<Footprint> {
        let mine = self.footprint();
        if !mine.intersects(other) {
            return Err(GridError::no_intersection(format!(
                "{} does not overlap {}",
                self.bounds(),
                other.to_bounds()
            )));
        }
        mine.overlap(other).ok_or_else(|| {
            GridError::no_intersection(format!(
                "{} does not overlap {}",
                self.bounds(),
                other.to_bounds()
            ))
        })
    }

    fn snap_within(&self, sample: &Footprint) -> GridResult<GridDescriptor> {
        let overlap = self.overlap_with(sample)?;

        let west = lon_distance(overlap.lon.west, self.xmin());
        let (c0, c1) = snap_inward(west, west + overlap.lon.width, self.dx());
        let (r0, r1) = snap_inward(
            self.ymax() - overlap.north,
            self.ymax() - overlap.south,
            self.dy(),
        );

        tracing::debug!(
            cols = ?(c0, c1),
            rows = ?(r0, r1),
            "Snapped sample bounds inside host grid"
        );

        let (nx, ny) = match (span_cells(c0, c1), span_cells(r0, r1)) {
            (Some(nx), Some(ny)) => (nx, ny),
            _ => {
                return Err(GridError::no_intersection(format!(
                    "no two cells of {} fit inside {}",
                    self.bounds(),
                    sample.to_bounds()
                )))
            }
        };

        let (ymax, xmin) = self.fractional_lat_lon(r0 as f64, c0 as f64);
        Ok(GridDescriptor::from_corner(
            xmin,
            ymax,
            self.dx(),
            self.dy(),
            nx,
            ny,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reconcile;
    use serde_json::json;

    fn grid(value: serde_json::Value) -> GridDescriptor {
        GridDescriptor::from_value(&value, Reconcile::None).unwrap()
    }

    fn square(xmin: f64, n: usize) -> GridDescriptor {
        let xmax = xmin + (n - 1) as f64;
        grid(json!({
            "xmin": xmin, "xmax": xmax, "ymin": xmin, "ymax": xmax,
            "dx": 1.0, "dy": 1.0, "nx": n, "ny": n
        }))
    }

    #[test]
    fn test_on_grid_line() {
        assert!(on_grid_line(3.0, 1.0));
        assert!(on_grid_line(3.0 - 1e-13, 1.0));
        assert!(!on_grid_line(2.5, 1.0));
        assert!(on_grid_line(-2.0, 1.0));
        // the tolerance is absolute, far from the origin too
        assert!(!on_grid_line(359.0 + 5e-9, 1.0 / 120.0));
        assert!(on_grid_line(359.0 + 1e-13, 1.0 / 120.0));
    }

    #[test]
    fn test_span_cells() {
        assert_eq!(span_cells(3, 7), Some(5));
        assert_eq!(span_cells(3, 3), None);
        assert_eq!(span_cells(i64::MIN, i64::MAX), None);
    }

    #[test]
    fn test_snap_inward() {
        assert_eq!(snap_inward(105.0, 225.0, 30.0), (4, 7));
        assert_eq!(snap_inward(90.0, 210.0, 30.0), (3, 7));
        // float noise on a line stays on that line
        assert_eq!(snap_inward(90.0 + 1e-13, 210.0 - 1e-13, 30.0), (3, 7));
    }

    #[test]
    fn test_is_aligned() {
        let gd = square(0.5, 4);
        assert!(gd.is_aligned(&gd));
        assert!(gd.is_aligned(&square(1.5, 2)));
        assert!(!gd.is_aligned(&square(2.0, 2)));
    }

    #[test]
    fn test_aligned_with_coarser_phase_match() {
        let fine = square(0.0, 11);
        let coarse = grid(json!({
            "xmin": 2.0, "xmax": 6.0, "ymin": 2.0, "ymax": 6.0,
            "dx": 2.0, "dy": 2.0, "nx": 3, "ny": 3
        }));
        assert!(fine.is_aligned(&coarse));
        assert!(!coarse.is_aligned(&square(3.0, 2)));
    }

    #[test]
    fn test_intersects_and_containment() {
        let gd1 = square(0.5, 4);
        let gd2 = square(2.5, 4);
        let gd3 = square(4.5, 4);
        let gd4 = square(1.5, 2);

        assert!(gd1.intersects(&gd2));
        assert!(gd2.intersects(&gd1));
        assert!(!gd1.intersects(&gd3));

        assert!(gd1.does_not_contain(&gd3));
        assert!(!gd1.does_not_contain(&gd4));
        assert!(!gd1.does_not_contain(&gd2));

        assert!(gd1.contains(&gd4));
        assert!(!gd1.contains(&gd3));
        assert!(!gd1.contains(&gd2));
    }

    #[test]
    fn test_touching_grids() {
        let a = square(0.0, 4);
        let b = square(3.0, 4);
        assert!(!a.intersects(&b));
        assert!(!a.does_not_contain(&b));
        assert!(matches!(
            a.intersection(&b),
            Err(GridError::NoIntersection(_))
        ));
    }

    #[test]
    fn test_intersection_same_resolution() {
        let a = grid(json!({
            "xmin": 0.5, "xmax": 6.5, "ymin": 0.5, "ymax": 8.5,
            "dx": 1.0, "dy": 1.0, "nx": 7, "ny": 9
        }));
        let b = grid(json!({
            "xmin": 3.0, "xmax": 8.0, "ymin": 5.0, "ymax": 10.0,
            "dx": 1.0, "dy": 1.0, "nx": 6, "ny": 6
        }));
        // same spacing: the first grid's lines win
        let inter = a.intersection(&b).unwrap();
        let expected = grid(json!({
            "xmin": 3.5, "xmax": 6.5, "ymin": 5.5, "ymax": 8.5,
            "dx": 1.0, "dy": 1.0, "nx": 4, "ny": 4
        }));
        assert_eq!(inter, expected);
        assert!(a.is_aligned(&inter));
    }

    #[test]
    fn test_intersection_with_resolution() {
        let a = square(0.0, 11);
        let b = square(4.0, 11);
        let inter = a.intersection_with_resolution(&b, 0.5, 2.0).unwrap();
        assert_eq!(inter.xmin(), 4.0);
        assert_eq!(inter.ymax(), 10.0);
        assert_eq!(inter.nx(), 13);
        assert_eq!(inter.ny(), 4);
        assert_eq!(inter.xmax(), 10.0);
        assert_eq!(inter.ymin(), 4.0);

        assert!(matches!(
            a.intersection_with_resolution(&b, 0.0, 1.0),
            Err(GridError::InvalidArgument(_))
        ));
        assert!(matches!(
            a.intersection_with_resolution(&b, 7.0, 1.0),
            Err(GridError::NoIntersection(_))
        ));
        assert!(matches!(
            a.intersection_with_resolution(&b, 1e-320, 1.0),
            Err(GridError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_bounds_within_collapses() {
        let host = square(0.0, 11);
        let sliver = grid(json!({
            "xmin": 2.2, "xmax": 3.7, "ymin": 2.0, "ymax": 8.0,
            "dx": 0.5, "dy": 1.0, "nx": 4, "ny": 7
        }));
        assert!(matches!(
            host.bounds_within(&sliver),
            Err(GridError::NoIntersection(_))
        ));
        assert!(matches!(
            host.bounds_within(&square(20.0, 3)),
            Err(GridError::NoIntersection(_))
        ));
    }

    #[test]
    fn test_bounds_within_box() {
        let host = square(0.0, 11);
        let inside = host
            .bounds_within_box(&GeoBounds::new(1.5, 7.2, -3.0, 4.9))
            .unwrap();
        assert_eq!(inside.xmin(), 2.0);
        assert_eq!(inside.xmax(), 7.0);
        assert_eq!(inside.ymin(), 0.0);
        assert_eq!(inside.ymax(), 4.0);
        assert_eq!((inside.nx(), inside.ny()), (6, 5));
    }

    #[test]
    fn test_aligned_grows_and_shrinks() {
        let host = square(0.0, 11);
        let sample = grid(json!({
            "xmin": 2.4, "xmax": 5.4, "ymin": 3.6, "ymax": 6.6,
            "dx": 0.5, "dy": 0.5, "nx": 7, "ny": 7
        }));
        let aligned = host.aligned(&sample);
        // west edge moved west (grew), east edge moved west (shrank)
        assert_eq!(aligned.xmin(), 2.0);
        assert_eq!(aligned.xmax(), 5.0);
        // north edge moved north (grew), south edge moved north (shrank)
        assert_eq!(aligned.ymax(), 7.0);
        assert_eq!(aligned.ymin(), 4.0);
        assert_eq!(aligned.deltas(), (1.0, 1.0));
        assert!(host.is_aligned(&aligned));
    }

    #[test]
    fn test_aligned_outside_host() {
        let host = square(0.0, 5);
        let sample = square(10.2, 3);
        let aligned = host.aligned(&sample);
        assert_eq!(aligned.xmin(), 10.0);
        assert_eq!(aligned.nx(), 3);
        assert!(host.is_aligned(&aligned));
        assert!(!host.contains(&aligned));
    }
}
