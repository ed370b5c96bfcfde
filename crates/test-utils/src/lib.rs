//! Shared test utilities for the grid-descriptor workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Grid header fixtures from real raster products
//! - Approximate float assertions
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_approx_eq, fixtures};
//! ```

pub mod fixtures;

/// Assert that two degree values differ by at most `epsilon`.
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(gd.xmin(), 178.3125, 1e-9);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right, epsilon): (f64, f64, f64) = ($left, $right, $epsilon);
        let diff = (left - right).abs();
        if diff > epsilon || diff.is_nan() {
            panic!(
                "assertion failed: {:?} and {:?} differ by {:?}, more than {:?}",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Assert that two `(lat, lon)` pairs agree component-wise within `epsilon`.
///
/// ```ignore
/// use test_utils::assert_coords_approx_eq;
///
/// assert_coords_approx_eq!((lat, lon), (gd.ymax(), gd.xmin()), EPS);
/// ```
#[macro_export]
macro_rules! assert_coords_approx_eq {
    (($x1:expr, $y1:expr), ($x2:expr, $y2:expr), $epsilon:expr) => {{
        $crate::assert_approx_eq!($x1, $x2, $epsilon);
        $crate::assert_approx_eq!($y1, $y2, $epsilon);
    }};
}
