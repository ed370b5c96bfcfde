//! Reconciliation of over-determined grid fields.
//!
//! Eight numbers describe a grid with six degrees of freedom. Headers round
//! each of them independently, so they rarely agree exactly; the caller picks
//! which of them to trust with an explicit [`Reconcile`] mode.

use crate::descriptor::cell_count;
use crate::longitude::{row_width, wrap_lon};
use crate::{GridError, GridResult, EPS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Keys every input mapping must carry.
pub const REQUIRED_KEYS: [&str; 8] = ["xmin", "xmax", "ymin", "ymax", "dx", "dy", "nx", "ny"];

/// Policy for resolving inconsistent input fields.
///
/// Defaults to [`Reconcile::None`], the only mode that never changes a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reconcile {
    /// Trust nothing; fail if the fields disagree beyond tolerance.
    #[default]
    None,
    /// Trust bounds and dimensions; recompute the resolution.
    Res,
    /// Trust the north-west corner, resolution and dimensions; recompute the
    /// eastern and southern edges.
    Bounds,
}

impl Reconcile {
    /// Get the mode name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Res => "res",
            Self::Bounds => "bounds",
        }
    }
}

impl FromStr for Reconcile {
    type Err = GridError;

    /// Parse from string (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "res" => Ok(Self::Res),
            "bounds" => Ok(Self::Bounds),
            _ => Err(GridError::invalid_argument(format!(
                "unknown reconciliation mode '{}', expected one of none, res, bounds",
                s
            ))),
        }
    }
}

impl fmt::Display for Reconcile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw grid fields as they come out of a header.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridFields {
    /// Longitude of the western column of cell centers
    pub xmin: f64,
    /// Longitude of the eastern column of cell centers
    pub xmax: f64,
    /// Latitude of the southern row of cell centers
    pub ymin: f64,
    /// Latitude of the northern row of cell centers
    pub ymax: f64,
    /// Cell spacing in longitude degrees
    pub dx: f64,
    /// Cell spacing in latitude degrees
    pub dy: f64,
    /// Number of columns
    pub nx: usize,
    /// Number of rows
    pub ny: usize,
}

impl GridFields {
    /// Read the eight fields out of a JSON object.
    ///
    /// Counts may be written as floats (`561.0`) but must be whole and positive.
    pub fn from_value(value: &serde_json::Value) -> GridResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| GridError::invalid_argument("grid mapping must be an object"))?;

        let mut numbers = [0.0; 8];
        for (number, key) in numbers.iter_mut().zip(REQUIRED_KEYS) {
            let field = object.get(key).ok_or_else(|| {
                GridError::invalid_argument(format!("missing required key '{}'", key))
            })?;
            *number = field.as_f64().ok_or_else(|| {
                GridError::invalid_argument(format!("key '{}' is not numeric: {}", key, field))
            })?;
        }

        let [xmin, xmax, ymin, ymax, dx, dy, nx, ny] = numbers;
        Ok(Self {
            xmin,
            xmax,
            ymin,
            ymax,
            dx,
            dy,
            nx: count("nx", nx)?,
            ny: count("ny", ny)?,
        })
    }

    fn check_finite(&self) -> GridResult<()> {
        let named = [
            ("xmin", self.xmin),
            ("xmax", self.xmax),
            ("ymin", self.ymin),
            ("ymax", self.ymax),
            ("dx", self.dx),
            ("dy", self.dy),
        ];
        for (key, value) in named {
            if !value.is_finite() {
                return Err(GridError::invalid_argument(format!(
                    "{} must be finite, got {}",
                    key, value
                )));
            }
        }
        if self.nx == 0 || self.ny == 0 {
            return Err(GridError::invalid_argument(format!(
                "grid dimensions must be at least 1, got nx={} ny={}",
                self.nx, self.ny
            )));
        }
        Ok(())
    }

    fn check_resolution(&self) -> GridResult<()> {
        if self.dx <= 0.0 || self.dy <= 0.0 {
            return Err(GridError::invalid_argument(format!(
                "resolution must be positive, got dx={} dy={}",
                self.dx, self.dy
            )));
        }
        Ok(())
    }
}

fn count(key: &str, value: f64) -> GridResult<usize> {
    if !value.is_finite() || value < 1.0 || (value - value.round()).abs() > EPS {
        return Err(GridError::invalid_argument(format!(
            "{} must be a positive whole number, got {}",
            key, value
        )));
    }
    Ok(value.round() as usize)
}

/// Apply `mode` to `fields`, returning a set that satisfies the grid invariants.
pub fn reconcile(fields: GridFields, mode: Reconcile) -> GridResult<GridFields> {
    fields.check_finite()?;

    let reconciled = match mode {
        Reconcile::None => {
            fields.check_resolution()?;
            check_latitude_order(&fields)?;
            check_axis("x", row_width(fields.xmin, fields.xmax, fields.nx), fields.dx, fields.nx)?;
            check_axis("y", fields.ymax - fields.ymin, fields.dy, fields.ny)?;
            fields
        }
        Reconcile::Res => {
            check_latitude_order(&fields)?;
            if fields.nx < 2 || fields.ny < 2 {
                return Err(GridError::invalid_argument(format!(
                    "cannot derive resolution from nx={} ny={}, need at least 2 cells per axis",
                    fields.nx, fields.ny
                )));
            }
            let dx = row_width(fields.xmin, fields.xmax, fields.nx) / (fields.nx - 1) as f64;
            let dy = (fields.ymax - fields.ymin) / (fields.ny - 1) as f64;

            tracing::debug!(
                supplied_dx = fields.dx,
                supplied_dy = fields.dy,
                dx,
                dy,
                "Recomputed grid resolution from bounds"
            );

            let out = GridFields { dx, dy, ..fields };
            out.check_resolution()?;
            out
        }
        Reconcile::Bounds => {
            fields.check_resolution()?;
            let xmax = wrap_lon(fields.xmin + fields.dx * (fields.nx - 1) as f64);
            let ymin = fields.ymax - fields.dy * (fields.ny - 1) as f64;

            tracing::debug!(
                supplied_xmax = fields.xmax,
                supplied_ymin = fields.ymin,
                xmax,
                ymin,
                "Recomputed grid corner from resolution"
            );

            GridFields {
                xmax,
                ymin,
                ..fields
            }
        }
    };

    Ok(reconciled)
}

fn check_latitude_order(fields: &GridFields) -> GridResult<()> {
    if fields.ymin > fields.ymax {
        return Err(GridError::invalid_argument(format!(
            "ymin {} is north of ymax {}",
            fields.ymin, fields.ymax
        )));
    }
    Ok(())
}

fn check_axis(axis: &str, span: f64, step: f64, n: usize) -> GridResult<()> {
    if n == 1 {
        if span > EPS {
            return Err(GridError::inconsistent(format!(
                "{} span {} is not zero for a single cell",
                axis, span
            )));
        }
        return Ok(());
    }

    let implied_n = cell_count((span / step).round()).ok_or_else(|| {
        GridError::inconsistent(format!(
            "{} bounds span {} at resolution {} implies too many cells, header says {}",
            axis, span, step, n
        ))
    })?;
    if implied_n != n {
        return Err(GridError::inconsistent(format!(
            "{} bounds span {} at resolution {} implies {} cells, header says {}",
            axis, span, step, implied_n, n
        )));
    }

    let implied_step = span / (n - 1) as f64;
    if (implied_step - step).abs() > EPS {
        return Err(GridError::inconsistent(format!(
            "{} resolution {} does not match bounds and {} cells (implied {})",
            axis, step, n, implied_step
        )));
    }

    Ok(())
}
