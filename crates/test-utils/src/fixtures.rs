//! Grid header fixtures taken from real raster products.
//!
//! Each fixture is the raw field mapping a header parser would hand over,
//! with the rounding those headers actually carry.

use serde_json::{json, Value};

/// Common rectangles as `(xmin, xmax, ymin, ymax)`.
pub mod bbox {
    /// Whole globe
    pub const GLOBAL: (f64, f64, f64, f64) = (-180.0, 180.0, -90.0, 90.0);

    /// Southern California
    pub const SOCAL: (f64, f64, f64, f64) = (
        -121.05333277776235,
        -116.03833388890432,
        32.138334444506171,
        36.286665555493826,
    );

    /// Crosses the antimeridian (Pacific-centric)
    pub const PACIFIC: (f64, f64, f64, f64) = (160.0, -140.0, -50.0, 50.0);
}

/// ShakeMap grid header for an Alaska event, 0.025° cells.
pub fn shakemap_alaska() -> Value {
    json!({
        "xmin": -160.340600, "xmax": -146.340600,
        "ymin": 54.104700, "ymax": 65.104700,
        "dx": 0.025000, "dy": 0.025000,
        "nx": 561, "ny": 441
    })
}

/// ShakeMap grid header for a Kamchatka event. Resolution is rounded too
/// coarsely for strict validation; build it with `res` reconciliation.
pub fn shakemap_kamchatka() -> Value {
    json!({
        "xmin": 155.506400, "xmax": 161.506400,
        "ymin": 52.243000, "ymax": 55.771000,
        "dx": 0.016667, "dy": 0.016642,
        "nx": 361, "ny": 213
    })
}

/// ShakeMap grid header for an Aleutian event straddling the antimeridian.
pub fn shakemap_aleutians() -> Value {
    json!({
        "xmin": 178.311, "xmax": -179.189,
        "ymin": 50.616, "ymax": 52.176,
        "dx": 0.025, "dy": 0.02516129032258068,
        "nx": 101, "ny": 63
    })
}

/// Landscan population grid header, 30 arc-second cells, nearly global.
pub fn landscan_global() -> Value {
    json!({
        "xmin": -179.99583333333334, "xmax": 179.99583333318935,
        "ymin": -89.99583333333334, "ymax": 83.99583333326376,
        "dx": 0.00833333333333, "dy": 0.00833333333333,
        "nx": 43200, "ny": 20880
    })
}

/// A 30 arc-second global grid with one column of overlap at the antimeridian.
pub fn global_wrapped() -> Value {
    json!({
        "xmin": -179.99583333333334, "xmax": -179.99583333347732,
        "ymin": -89.99583333326461, "ymax": 83.62083333333263,
        "dx": 0.00833333333333, "dy": 0.00833333333333,
        "nx": 43201, "ny": 20835
    })
}

/// A 30 arc-second global grid written with full double precision spacing.
pub fn global_fine() -> Value {
    json!({
        "xmin": -179.99583333333334, "xmax": 179.99583333333192,
        "ymin": -89.99583333333331, "ymax": 83.99583333333266,
        "dx": 0.0083333333333333, "dy": 0.0083333333333333,
        "nx": 43200, "ny": 20880
    })
}

/// A coarse global grid: 30° by 45° cells, cell centers from -180 to 150.
pub fn coarse_global() -> Value {
    json!({
        "xmin": -180.0, "xmax": 150.0,
        "ymin": -90.0, "ymax": 90.0,
        "dx": 30.0, "dy": 45.0,
        "nx": 12, "ny": 5
    })
}

/// A coarse grid whose eastern column sits on the antimeridian, written as `180`.
pub fn antimeridian_edge() -> Value {
    json!({
        "xmin": 0.0, "xmax": 180.0,
        "ymin": -45.0, "ymax": 45.0,
        "dx": 30.0, "dy": 45.0,
        "nx": 7, "ny": 3
    })
}

/// A single row of four one-degree cells along latitude 5.
pub fn single_row() -> Value {
    json!({
        "xmin": 2.0, "xmax": 5.0,
        "ymin": 5.0, "ymax": 5.0,
        "dx": 1.0, "dy": 1.0,
        "nx": 4, "ny": 1
    })
}

/// A single column of five one-degree cells along longitude 3.
pub fn single_column() -> Value {
    json!({
        "xmin": 3.0, "xmax": 3.0,
        "ymin": 2.0, "ymax": 6.0,
        "dx": 1.0, "dy": 1.0,
        "nx": 1, "ny": 5
    })
}

/// A small grid with `n` one-degree cells per side, starting at `(origin, origin)`.
pub fn unit_square(origin: f64, n: usize) -> Value {
    let far = origin + (n - 1) as f64;
    json!({
        "xmin": origin, "xmax": far,
        "ymin": origin, "ymax": far,
        "dx": 1.0, "dy": 1.0,
        "nx": n, "ny": n
    })
}
