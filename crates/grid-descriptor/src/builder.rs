//! Construction of grids from a box or a center point.

use crate::descriptor::cell_count;
use crate::longitude::{lon_width, wrap_lon};
use crate::{GridDescriptor, GridError, GridResult, EPS};

impl GridDescriptor {
    /// A grid at `(dx, dy)` covering the box `[xmin, xmax] × [ymin, ymax]`.
    ///
    /// The grid is anchored on `(xmin, ymax)`. With `inside == false` the cell
    /// counts are rounded up, so the eastern and southern edges land on or
    /// beyond the box; with `inside == true` they are rounded down and the grid
    /// fits within the box.
    pub fn from_box(
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
        dx: f64,
        dy: f64,
        inside: bool,
    ) -> GridResult<Self> {
        check_box(xmin, xmax, ymin, ymax)?;
        if !(dx > 0.0 && dy > 0.0 && dx.is_finite() && dy.is_finite()) {
            return Err(GridError::invalid_argument(format!(
                "resolution must be positive, got dx={} dy={}",
                dx, dy
            )));
        }

        let width = lon_width(xmin, xmax);
        let height = ymax - ymin;
        let (nx, ny) = if inside {
            (fitting_cells(width, dx), fitting_cells(height, dy))
        } else {
            (covering_cells(width, dx), covering_cells(height, dy))
        };
        let (nx, ny) = match (nx, ny) {
            (Some(nx), Some(ny)) => (nx, ny),
            _ => {
                return Err(GridError::invalid_argument(format!(
                    "resolution ({}, {}) is too fine to tile a {} by {} degree box",
                    dx, dy, width, height
                )))
            }
        };

        tracing::debug!(width, height, nx, ny, inside, "Sized grid from box");

        Ok(Self::from_corner(xmin, ymax, dx, dy, nx, ny))
    }

    /// A grid at `(dx, dy)` spanning `xspan × yspan` degrees around `(cx, cy)`.
    pub fn from_center(
        cx: f64,
        cy: f64,
        dx: f64,
        dy: f64,
        xspan: f64,
        yspan: f64,
    ) -> GridResult<Self> {
        if !(0.0..360.0).contains(&xspan) || !(yspan >= 0.0 && yspan.is_finite()) {
            return Err(GridError::invalid_argument(format!(
                "spans must be non-negative and under a full turn, got xspan={} yspan={}",
                xspan, yspan
            )));
        }

        let xmin = wrap_lon(cx - xspan / 2.0);
        let xmax = wrap_lon(cx + xspan / 2.0);
        let ymin = cy - yspan / 2.0;
        let ymax = cy + yspan / 2.0;
        Self::from_box(xmin, xmax, ymin, ymax, dx, dy, false)
    }
}

fn check_box(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> GridResult<()> {
    if ![xmin, xmax, ymin, ymax].iter().all(|v| v.is_finite()) {
        return Err(GridError::invalid_argument(format!(
            "box edges must be finite, got ({}, {}, {}, {})",
            xmin, xmax, ymin, ymax
        )));
    }
    if ymin > ymax {
        return Err(GridError::invalid_argument(format!(
            "ymin {} is north of ymax {}",
            ymin, ymax
        )));
    }
    Ok(())
}

/// Fewest cells whose span reaches `span`.
fn covering_cells(span: f64, step: f64) -> Option<usize> {
    cell_count(((span - EPS) / step).ceil().max(0.0))
}

/// Most cells whose span stays within `span`.
fn fitting_cells(span: f64, step: f64) -> Option<usize> {
    cell_count(((span + EPS) / step).floor())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_counts() {
        assert_eq!(covering_cells(10.0, 1.0), Some(11));
        assert_eq!(fitting_cells(10.0, 1.0), Some(11));
        assert_eq!(covering_cells(10.5, 1.0), Some(12));
        assert_eq!(fitting_cells(10.5, 1.0), Some(11));
        assert_eq!(covering_cells(0.0, 1.0), Some(1));
        assert_eq!(covering_cells(10.0, 1e-320), None);
        assert_eq!(fitting_cells(10.0, 1e-320), None);
    }

    #[test]
    fn test_from_box_rejects_denormal_resolution() {
        for inside in [false, true] {
            assert!(matches!(
                GridDescriptor::from_box(0.0, 10.0, 0.0, 10.0, 1e-320, 1.0, inside),
                Err(GridError::InvalidArgument(_))
            ));
            assert!(matches!(
                GridDescriptor::from_box(0.0, 10.0, 0.0, 10.0, 1.0, 1e-320, inside),
                Err(GridError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_from_box_ending_on_antimeridian() {
        let gd = GridDescriptor::from_box(170.0, 180.0, 0.0, 10.0, 1.0, 1.0, false).unwrap();
        assert_eq!(gd.nx(), 11);
        assert_eq!(gd.xmax(), -180.0);
        assert_eq!(gd.width(), 10.0);
    }

    #[test]
    fn test_from_box_outside_and_inside() {
        let outside = GridDescriptor::from_box(0.0, 10.5, 0.0, 5.5, 1.0, 1.0, false).unwrap();
        assert_eq!(outside.xmax(), 11.0);
        assert_eq!(outside.ymin(), -0.5);

        let inside = GridDescriptor::from_box(0.0, 10.5, 0.0, 5.5, 1.0, 1.0, true).unwrap();
        assert_eq!(inside.xmax(), 10.0);
        assert_eq!(inside.ymin(), 0.5);
    }

    #[test]
    fn test_from_box_exact_fit() {
        let a = GridDescriptor::from_box(0.0, 10.0, 0.0, 5.0, 1.0, 1.0, false).unwrap();
        let b = GridDescriptor::from_box(0.0, 10.0, 0.0, 5.0, 1.0, 1.0, true).unwrap();
        assert_eq!(a, b);
        assert_eq!((a.nx(), a.ny()), (11, 6));
    }

    #[test]
    fn test_from_box_across_antimeridian() {
        let gd = GridDescriptor::from_box(170.0, -175.5, 0.0, 10.0, 1.0, 1.0, false).unwrap();
        assert_eq!(gd.nx(), 16);
        assert_eq!(gd.xmax(), -175.0);
        assert!(gd.crosses_antimeridian());
    }

    #[test]
    fn test_from_box_rejects_bad_input() {
        assert!(matches!(
            GridDescriptor::from_box(0.0, 1.0, 0.0, 1.0, 0.0, 1.0, false),
            Err(GridError::InvalidArgument(_))
        ));
        assert!(matches!(
            GridDescriptor::from_box(0.0, 1.0, 2.0, 1.0, 1.0, 1.0, false),
            Err(GridError::InvalidArgument(_))
        ));
        assert!(matches!(
            GridDescriptor::from_box(f64::NAN, 1.0, 0.0, 1.0, 1.0, 1.0, false),
            Err(GridError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_from_center() {
        let gd = GridDescriptor::from_center(179.0, 0.0, 0.5, 0.5, 4.0, 2.0).unwrap();
        assert_eq!(gd.xmin(), 177.0);
        assert_eq!(gd.xmax(), -179.0);
        assert_eq!(gd.ymax(), 1.0);
        assert_eq!(gd.ymin(), -1.0);
        assert_eq!((gd.nx(), gd.ny()), (9, 5));

        assert!(GridDescriptor::from_center(0.0, 0.0, 1.0, 1.0, 360.0, 1.0).is_err());
        assert!(GridDescriptor::from_center(0.0, 0.0, 1.0, 1.0, 10.0, -1.0).is_err());
    }
}
