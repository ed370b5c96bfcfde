//! Geographic bounding rectangles with antimeridian support.

use crate::longitude::{lon_width, LonInterval};
use crate::{GridError, EPS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A lon/lat rectangle in degrees.
///
/// `xmin > xmax` means the rectangle crosses the antimeridian. Latitude never
/// wraps, so `ymin <= ymax` always.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl GeoBounds {
    /// Create a new rectangle from its edges.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    /// Eastward width in degrees, unwrapped across the antimeridian.
    pub fn width(&self) -> f64 {
        lon_width(self.xmin, self.xmax)
    }

    /// Height in degrees.
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Whether the rectangle crosses the antimeridian.
    pub fn crosses_antimeridian(&self) -> bool {
        self.xmin > self.xmax
    }

    /// Longitude extent as an interval. A rectangle spanning a full turn is global.
    pub fn lon_interval(&self) -> LonInterval {
        let interval = LonInterval::new(self.xmin, self.xmax);
        let global = interval.width >= 360.0 - EPS;
        interval.with_global(global)
    }

    /// Check if this rectangle overlaps another by a non-empty area.
    pub fn intersects(&self, other: &GeoBounds) -> bool {
        self.footprint().intersects(&other.footprint())
    }

    /// Compute the overlap of two rectangles.
    ///
    /// When both rectangles wrap far enough to meet at both ends, the wider of
    /// the two overlapping pieces is returned.
    pub fn intersection(&self, other: &GeoBounds) -> Option<GeoBounds> {
        if !self.intersects(other) {
            return None;
        }
        self.footprint()
            .overlap(&other.footprint())
            .map(|f| f.to_bounds())
    }

    /// Check if `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &GeoBounds) -> bool {
        self.footprint().contains(&other.footprint())
    }

    /// Check if a point is inside this rectangle (edges included).
    pub fn contains_point(&self, lat: f64, lon: f64) -> bool {
        self.footprint().contains_point(lat, lon)
    }

    pub(crate) fn footprint(&self) -> Footprint {
        Footprint {
            lon: self.lon_interval(),
            south: self.ymin,
            north: self.ymax,
        }
    }
}

impl FromStr for GeoBounds {
    type Err = GridError;

    /// Parse `"xmin,xmax,ymin,ymax"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(GridError::invalid_argument(format!(
                "invalid bounds '{}', expected 'xmin,xmax,ymin,ymax'",
                s
            )));
        }

        let mut values = [0.0; 4];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part.parse().map_err(|_| {
                GridError::invalid_argument(format!("invalid number in bounds: {}", part))
            })?;
        }

        let bounds = GeoBounds::new(values[0], values[1], values[2], values[3]);
        if bounds.ymin > bounds.ymax {
            return Err(GridError::invalid_argument(format!(
                "ymin {} is north of ymax {}",
                bounds.ymin, bounds.ymax
            )));
        }
        Ok(bounds)
    }
}

impl fmt::Display for GeoBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.xmin, self.xmax, self.ymin, self.ymax
        )
    }
}

/// A wrap-aware longitude interval plus a latitude range.
///
/// Rectangles and grids both reduce to this for every overlap and
/// containment question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Footprint {
    pub lon: LonInterval,
    pub south: f64,
    pub north: f64,
}

impl Footprint {
    /// Overlap along both axes.
    ///
    /// Extents of positive size must share more than an edge; a single row
    /// or column only has to touch the other footprint.
    pub fn intersects(&self, other: &Footprint) -> bool {
        let shared = self.north.min(other.north) - self.south.max(other.south);
        let lat_overlap = if self.north - self.south <= EPS || other.north - other.south <= EPS {
            shared >= -EPS
        } else {
            shared > EPS
        };
        lat_overlap && self.lon.intersects(&other.lon)
    }

    /// No shared point at all, not even an edge.
    pub fn is_disjoint(&self, other: &Footprint) -> bool {
        self.lon.is_disjoint(&other.lon)
            || self.north.min(other.north) - self.south.max(other.south) < -EPS
    }

    pub fn contains(&self, other: &Footprint) -> bool {
        self.lon.contains(&other.lon)
            && other.south >= self.south - EPS
            && other.north <= self.north + EPS
    }

    pub fn contains_point(&self, lat: f64, lon: f64) -> bool {
        self.lon.contains_lon(lon) && lat >= self.south - EPS && lat <= self.north + EPS
    }

    /// Overlapping rectangle, using the widest longitude piece.
    pub fn overlap(&self, other: &Footprint) -> Option<Footprint> {
        let south = self.south.max(other.south);
        let north = self.north.min(other.north);
        if north < south - EPS {
            return None;
        }
        let lon = self.lon.widest_overlap(&other.lon)?;
        Some(Footprint {
            lon,
            south: south.min(north),
            north,
        })
    }

    pub fn to_bounds(&self) -> GeoBounds {
        GeoBounds::new(self.lon.west, self.lon.east(), self.south, self.north)
    }
}
