//! Meridian-aware longitude arithmetic.
//!
//! Longitude is circular: an interval whose western edge is greater than its
//! eastern edge crosses the antimeridian and covers `[west, 180] ∪ [-180, east]`.
//! Every geometric predicate in this crate goes through the helpers here
//! instead of doing its own wrap handling.

use crate::EPS;

/// Shift a longitude by whole turns into `[-180, 180)`.
///
/// The antimeridian is always `-180`: `180` and `540` both wrap to it.
pub fn wrap_lon(lon: f64) -> f64 {
    if (-180.0..180.0).contains(&lon) {
        return lon;
    }
    lon - 360.0 * ((lon + 180.0) / 360.0).floor()
}

/// Eastward width of `[xmin, xmax]`, unwrapping across the antimeridian.
pub fn lon_width(xmin: f64, xmax: f64) -> f64 {
    if xmax >= xmin {
        xmax - xmin
    } else {
        (xmax + 360.0) - xmin
    }
}

/// Eastward width of a row of `n` cell centers running from `xmin` to `xmax`.
///
/// Unlike [`lon_width`], a row of several cells whose ends meet goes all the
/// way round instead of having no width.
pub fn row_width(xmin: f64, xmax: f64, n: usize) -> f64 {
    let width = lon_width(xmin, xmax);
    if n > 1 && width <= EPS {
        width + 360.0
    } else {
        width
    }
}

/// Eastward distance from `xmin` to `lon`, normalized into `[0, 360)`.
///
/// A distance within `EPS` of a full turn is treated as zero: it comes from a
/// longitude that sits on `xmin` but was rounded a hair to the west.
pub fn lon_distance(lon: f64, xmin: f64) -> f64 {
    let d = (lon - xmin).rem_euclid(360.0);
    if d >= 360.0 - EPS {
        0.0
    } else {
        d
    }
}

/// Signed eastward offset of `lon` from `xmin` for an interval of `width`.
///
/// Picks the representative of `lon - xmin (mod 360)` closest to the middle
/// of the interval, so longitudes just west of `xmin` give small negative
/// offsets instead of values near 360.
pub fn lon_offset(lon: f64, xmin: f64, width: f64) -> f64 {
    let low = width / 2.0 - 180.0;
    let d = lon - xmin;
    if d >= low && d < low + 360.0 {
        d
    } else {
        d - 360.0 * ((d - low) / 360.0).floor()
    }
}

/// A possibly wrapping longitude interval.
///
/// `global` marks an interval that stands for the whole circle even though
/// its `width` is the span actually covered (e.g. cell centers of a global
/// raster run from -179.5 to 179.5, one cell short of a full turn).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonInterval {
    /// Western edge in degrees.
    pub west: f64,
    /// Eastward width in degrees, `0..=360`.
    pub width: f64,
    /// Whether the interval covers every longitude.
    pub global: bool,
}

impl LonInterval {
    /// Interval from `west` eastward to `east`.
    pub fn new(west: f64, east: f64) -> Self {
        Self {
            west,
            width: lon_width(west, east),
            global: false,
        }
    }

    /// Mark the interval as covering the whole circle.
    pub fn with_global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }

    /// Eastern edge, wrapped into `[-180, 180)`.
    pub fn east(&self) -> f64 {
        wrap_lon(self.west + self.width)
    }

    /// Whether the interval crosses the antimeridian.
    pub fn crosses_antimeridian(&self) -> bool {
        self.west + self.width > 180.0
    }

    /// Whether `lon` falls inside the interval (edges included, within `EPS`).
    pub fn contains_lon(&self, lon: f64) -> bool {
        self.global || lon_distance(lon, self.west) <= self.width + EPS
    }

    /// Whether `other` lies entirely inside this interval.
    pub fn contains(&self, other: &LonInterval) -> bool {
        if self.global {
            return true;
        }
        if other.global {
            return false;
        }
        lon_distance(other.west, self.west) + other.width <= self.width + EPS
    }

    /// Overlapping pieces of two intervals.
    ///
    /// Two intervals that both wrap far enough can meet at both ends, so the
    /// result holds zero, one or two pieces. Pieces of zero width mean the
    /// intervals only touch. A global interval overlaps the other one in
    /// exactly the other one.
    pub fn overlap(&self, other: &LonInterval) -> Vec<LonInterval> {
        if other.global {
            return vec![*self];
        }
        if self.global {
            return vec![*other];
        }

        let mut pieces = Vec::with_capacity(2);

        let o = lon_distance(other.west, self.west);
        if o <= self.width + EPS {
            pieces.push(LonInterval {
                west: other.west,
                width: (self.width - o).min(other.width).max(0.0),
                global: false,
            });
        }

        let p = lon_distance(self.west, other.west);
        if p > EPS && p <= other.width + EPS {
            pieces.push(LonInterval {
                west: self.west,
                width: (other.width - p).min(self.width).max(0.0),
                global: false,
            });
        }

        pieces
    }

    /// The widest overlapping piece, if any.
    pub fn widest_overlap(&self, other: &LonInterval) -> Option<LonInterval> {
        self.overlap(other)
            .into_iter()
            .max_by(|a, b| a.width.total_cmp(&b.width))
    }

    /// Whether the intervals overlap.
    ///
    /// Two intervals of positive width must share more than a line. When
    /// either one is a single meridian, sharing that meridian is enough.
    pub fn intersects(&self, other: &LonInterval) -> bool {
        if self.is_line() || other.is_line() {
            return !self.is_disjoint(other);
        }
        self.overlap(other).iter().any(|piece| piece.width > EPS)
    }

    fn is_line(&self) -> bool {
        !self.global && self.width <= EPS
    }

    /// Whether the intervals share no longitude at all.
    pub fn is_disjoint(&self, other: &LonInterval) -> bool {
        self.overlap(other).is_empty()
    }
}
