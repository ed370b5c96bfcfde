//! Metadata for regular lon/lat raster grids.
//!
//! A [`GridDescriptor`] holds the bounds, resolution and dimensions of a
//! grid and keeps them consistent with each other. It converts between cell
//! indices and coordinates, and answers alignment, intersection and
//! containment questions between grids, including grids that cross the
//! antimeridian. Pixel data never passes through this crate.

pub mod bounds;
pub mod builder;
pub mod descriptor;
pub mod error;
pub mod geometry;
pub mod longitude;
pub mod reconcile;

pub use bounds::GeoBounds;
pub use descriptor::{GridDescriptor, IndexRounding};
pub use error::{GridError, GridResult};
pub use longitude::{lon_distance, lon_width, row_width, wrap_lon, LonInterval};
pub use reconcile::{GridFields, Reconcile};

/// Tolerance for floating-point consistency and equality checks, in degrees.
pub const EPS: f64 = 1e-12;
