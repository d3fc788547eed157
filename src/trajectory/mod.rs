//! Well Trajectory Module - Directional survey geometry
//!
//! A `Trajectory` holds the station arrays of one well's directional survey
//! and derives one representation from another.
//!
//! ## Arrays
//!
//! - `MD`: measured depth along the borehole, strictly increasing
//! - `TVD`: true vertical depth, positive downward
//! - `DX` / `DY`: east / north offsets from the tie-in point
//! - `INC` / `AZI`: inclination and azimuth in degrees (0° = vertical / north)
//!
//! Any array may be absent. Methods needing an absent array fail with
//! `TrajectoryError::Missing` naming it.
//!
//! ## Construction paths
//!
//! ```ignore
//! let vertical = Trajectory::from_md_tvd(md, tvd)?;
//! let deviated = Trajectory::from_md_inc_azi(md, inc, azi, TieIn::default())?;
//! let explicit = Trajectory::from_md_xyz(md, dx, dy, tvd)?;
//! let generic  = Trajectory::from_record(TrajectoryRecord { md: Some(md), ..Default::default() })?;
//! ```
//!
//! A `Trajectory` is immutable once built; every derivation returns new arrays.

mod downsample;
mod geometry;
mod interpolation;
mod planning;

pub use downsample::downsample_indices;
pub use geometry::{inc_to_tvd, minimum_curvature, off_to_tvd, Positions};
pub use planning::{solve_straight_to_target, Direction, Point3};

use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrajectoryError {
    #[error("{array} is not available in this trajectory")]
    Missing { array: ArrayName },

    #[error("{array} is empty")]
    Empty { array: ArrayName },

    #[error("{array} has {found} stations but {reference} has {expected}")]
    LengthMismatch {
        array: ArrayName,
        expected: usize,
        found: usize,
        reference: ArrayName,
    },

    #[error("{array} must be strictly increasing (stations {} and {index})", .index - 1)]
    NotStrictlyIncreasing { array: ArrayName, index: usize },

    #[error(
        "Query values [{query_min:.6}, {query_max:.6}] are outside the {array} range [{valid_min:.6}, {valid_max:.6}]"
    )]
    OutOfRange {
        array: ArrayName,
        query_min: f64,
        query_max: f64,
        valid_min: f64,
        valid_max: f64,
    },

    #[error("max_points must be >= 2, got {0}")]
    InvalidMaxPoints(usize),

    #[error("md_end ({md_end}) must be greater than md_start ({md_start})")]
    InvalidMdSpan { md_start: f64, md_end: f64 },
}

impl TrajectoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrajectoryError::OutOfRange { .. } => ErrorKind::Range,
            _ => ErrorKind::Validation,
        }
    }
}

// ============================================================================
// Array identity & tie-in
// ============================================================================

/// Name of one station array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrayName {
    #[serde(rename = "MD")]
    Md,
    #[serde(rename = "TVD")]
    Tvd,
    #[serde(rename = "DX")]
    Dx,
    #[serde(rename = "DY")]
    Dy,
    #[serde(rename = "INC")]
    Inc,
    #[serde(rename = "AZI")]
    Azi,
}

impl ArrayName {
    pub const ALL: [ArrayName; 6] = [
        ArrayName::Md,
        ArrayName::Tvd,
        ArrayName::Dx,
        ArrayName::Dy,
        ArrayName::Inc,
        ArrayName::Azi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArrayName::Md => "MD",
            ArrayName::Tvd => "TVD",
            ArrayName::Dx => "DX",
            ArrayName::Dy => "DY",
            ArrayName::Inc => "INC",
            ArrayName::Azi => "AZI",
        }
    }
}

impl std::fmt::Display for ArrayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed reference point anchoring station 0 (Easting, Northing, TVD).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TieIn {
    pub xhead: f64,
    pub yhead: f64,
    pub datum: f64,
}

impl TieIn {
    pub fn new(xhead: f64, yhead: f64, datum: f64) -> Self {
        Self { xhead, yhead, datum }
    }
}

// ============================================================================
// Columnar record (generic input / persisted form)
// ============================================================================

/// Flat columnar form of a trajectory. Any subset of the arrays may be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    #[serde(rename = "MD", default, skip_serializing_if = "Option::is_none")]
    pub md: Option<Vec<f64>>,
    #[serde(rename = "TVD", default, skip_serializing_if = "Option::is_none")]
    pub tvd: Option<Vec<f64>>,
    #[serde(rename = "DX", default, skip_serializing_if = "Option::is_none")]
    pub dx: Option<Vec<f64>>,
    #[serde(rename = "DY", default, skip_serializing_if = "Option::is_none")]
    pub dy: Option<Vec<f64>>,
    #[serde(rename = "INC", default, skip_serializing_if = "Option::is_none")]
    pub inc: Option<Vec<f64>>,
    #[serde(rename = "AZI", default, skip_serializing_if = "Option::is_none")]
    pub azi: Option<Vec<f64>>,
    #[serde(default)]
    pub xhead: f64,
    #[serde(default)]
    pub yhead: f64,
    #[serde(default)]
    pub datum: f64,
}

// ============================================================================
// Trajectory
// ============================================================================

/// One well's directional survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TrajectoryRecord", into = "TrajectoryRecord")]
pub struct Trajectory {
    md: Option<Vec<f64>>,
    tvd: Option<Vec<f64>>,
    dx: Option<Vec<f64>>,
    dy: Option<Vec<f64>>,
    inc: Option<Vec<f64>>,
    azi: Option<Vec<f64>>,
    tie_in: TieIn,
}

impl Trajectory {
    /// Schema field names, in persisted order.
    pub const FIELDS: [&'static str; 9] = [
        "MD", "TVD", "DX", "DY", "INC", "AZI", "xhead", "yhead", "datum",
    ];

    /// Generic constructor: any subset of the six arrays, validated post-hoc.
    pub fn from_record(record: TrajectoryRecord) -> Result<Self, TrajectoryError> {
        let trajectory = Self {
            md: record.md,
            tvd: record.tvd,
            dx: record.dx,
            dy: record.dy,
            inc: record.inc,
            azi: record.azi,
            tie_in: TieIn::new(record.xhead, record.yhead, record.datum),
        };
        trajectory.validate()?;
        Ok(trajectory)
    }

    /// Vertical-profile-only trajectory.
    pub fn from_md_tvd(md: Vec<f64>, tvd: Vec<f64>) -> Result<Self, TrajectoryError> {
        Self::from_record(TrajectoryRecord {
            md: Some(md),
            tvd: Some(tvd),
            ..Default::default()
        })
    }

    /// Derives `DX`, `DY`, `TVD` by the minimum curvature method, using the
    /// configured small-angle threshold.
    pub fn from_md_inc_azi(
        md: Vec<f64>,
        inc: Vec<f64>,
        azi: Vec<f64>,
        tie_in: TieIn,
    ) -> Result<Self, TrajectoryError> {
        let positions = minimum_curvature(&md, &inc, &azi, tie_in, cfg_small_angle_rad())?;
        Self::from_record(TrajectoryRecord {
            md: Some(md),
            tvd: Some(positions.tvd),
            dx: Some(positions.dx),
            dy: Some(positions.dy),
            inc: Some(inc),
            azi: Some(azi),
            xhead: tie_in.xhead,
            yhead: tie_in.yhead,
            datum: tie_in.datum,
        })
    }

    /// Fully specified trajectory; nothing is derived.
    pub fn from_md_xyz(
        md: Vec<f64>,
        dx: Vec<f64>,
        dy: Vec<f64>,
        tvd: Vec<f64>,
    ) -> Result<Self, TrajectoryError> {
        Self::from_record(TrajectoryRecord {
            md: Some(md),
            tvd: Some(tvd),
            dx: Some(dx),
            dy: Some(dy),
            ..Default::default()
        })
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn md(&self) -> Option<&[f64]> {
        self.md.as_deref()
    }

    pub fn tvd(&self) -> Option<&[f64]> {
        self.tvd.as_deref()
    }

    pub fn dx(&self) -> Option<&[f64]> {
        self.dx.as_deref()
    }

    pub fn dy(&self) -> Option<&[f64]> {
        self.dy.as_deref()
    }

    pub fn inc(&self) -> Option<&[f64]> {
        self.inc.as_deref()
    }

    pub fn azi(&self) -> Option<&[f64]> {
        self.azi.as_deref()
    }

    pub fn tie_in(&self) -> TieIn {
        self.tie_in
    }

    /// Array by name, if present.
    pub fn array(&self, name: ArrayName) -> Option<&[f64]> {
        match name {
            ArrayName::Md => self.md(),
            ArrayName::Tvd => self.tvd(),
            ArrayName::Dx => self.dx(),
            ArrayName::Dy => self.dy(),
            ArrayName::Inc => self.inc(),
            ArrayName::Azi => self.azi(),
        }
    }

    pub fn has(&self, name: ArrayName) -> bool {
        self.array(name).is_some()
    }

    /// Number of stations (0 when no array is present).
    pub fn len(&self) -> usize {
        self.present().next().map_or(0, |(_, a)| a.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Array by name, or `Missing` naming it.
    pub fn require(&self, name: ArrayName) -> Result<&[f64], TrajectoryError> {
        self.array(name)
            .ok_or(TrajectoryError::Missing { array: name })
    }

    /// `(DX, DY)` for a plan view.
    pub fn view_plan(&self) -> Result<(&[f64], &[f64]), TrajectoryError> {
        Ok((self.require(ArrayName::Dx)?, self.require(ArrayName::Dy)?))
    }

    /// `(MD, TVD)` for a section view.
    pub fn view_section(&self) -> Result<(&[f64], &[f64]), TrajectoryError> {
        Ok((self.require(ArrayName::Md)?, self.require(ArrayName::Tvd)?))
    }

    /// Present arrays in canonical order.
    pub(crate) fn present(&self) -> impl Iterator<Item = (ArrayName, &[f64])> + '_ {
        ArrayName::ALL
            .into_iter()
            .filter_map(move |name| self.array(name).map(|a| (name, a)))
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    fn validate(&self) -> Result<(), TrajectoryError> {
        let mut present = self.present();
        if let Some((reference, first)) = present.next() {
            let expected = first.len();
            for (array, values) in present {
                if values.len() != expected {
                    return Err(TrajectoryError::LengthMismatch {
                        array,
                        expected,
                        found: values.len(),
                        reference,
                    });
                }
            }
        }

        if let Some(md) = self.md() {
            require_strictly_increasing(md, ArrayName::Md)?;
        }
        Ok(())
    }
}

impl TryFrom<TrajectoryRecord> for Trajectory {
    type Error = TrajectoryError;

    fn try_from(record: TrajectoryRecord) -> Result<Self, Self::Error> {
        Self::from_record(record)
    }
}

impl From<Trajectory> for TrajectoryRecord {
    fn from(t: Trajectory) -> Self {
        Self {
            md: t.md,
            tvd: t.tvd,
            dx: t.dx,
            dy: t.dy,
            inc: t.inc,
            azi: t.azi,
            xhead: t.tie_in.xhead,
            yhead: t.tie_in.yhead,
            datum: t.tie_in.datum,
        }
    }
}

// ============================================================================
// Shared checks
// ============================================================================

/// Fails at the first station not strictly greater than its predecessor.
/// NaN never compares greater, so it is rejected too.
pub(crate) fn require_strictly_increasing(
    values: &[f64],
    array: ArrayName,
) -> Result<(), TrajectoryError> {
    match values.windows(2).position(|w| !(w[1] > w[0])) {
        Some(i) => Err(TrajectoryError::NotStrictlyIncreasing {
            array,
            index: i + 1,
        }),
        None => Ok(()),
    }
}

pub(crate) fn require_same_length(
    reference: (ArrayName, &[f64]),
    other: (ArrayName, &[f64]),
) -> Result<(), TrajectoryError> {
    if reference.1.len() == other.1.len() {
        Ok(())
    } else {
        Err(TrajectoryError::LengthMismatch {
            array: other.0,
            expected: reference.1.len(),
            found: other.1.len(),
            reference: reference.0,
        })
    }
}

fn cfg_small_angle_rad() -> f64 {
    if crate::config::is_initialized() {
        crate::config::get().min_curvature.small_angle_rad
    } else {
        crate::config::defaults::SMALL_ANGLE_RAD
    }
}

// ============================================================================
// Tests
// ============================================================================
