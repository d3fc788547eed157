//! Single-segment inverse planning
//!
//! Back-solves the constant inclination/azimuth of a straight segment between
//! two known points. A planning heuristic only: it does not reconcile the MD
//! span with the 3D distance, and chaining segments is up to the caller.

use super::TrajectoryError;
use serde::{Deserialize, Serialize};

/// A point in well coordinates: Easting, Northing, TVD (positive down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub east: f64,
    pub north: f64,
    pub tvd: f64,
}

impl Point3 {
    pub fn new(east: f64, north: f64, tvd: f64) -> Self {
        Self { east, north, tvd }
    }
}

/// Constant segment direction in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    /// 0° = straight down, 90° = horizontal
    pub inc_deg: f64,
    /// 0° = north, 90° = east, in [0, 360)
    pub azi_deg: f64,
}

/// Constant INC/AZI connecting `origin` to `target` over `[md_start, md_end]`.
///
/// When the two points are closer than the configured target epsilon the
/// direction is undefined and `(0, 0)` is returned. That placeholder does not
/// mean the segment was validated as vertical.
pub fn solve_straight_to_target(
    target: Point3,
    origin: Point3,
    md_start: f64,
    md_end: f64,
) -> Result<Direction, TrajectoryError> {
    if !(md_end > md_start) {
        return Err(TrajectoryError::InvalidMdSpan { md_start, md_end });
    }

    let eps = cfg_target_epsilon();
    let d_east = target.east - origin.east;
    let d_north = target.north - origin.north;
    let d_down = target.tvd - origin.tvd;
    let horizontal = d_east.hypot(d_north);
    let distance = horizontal.hypot(d_down);

    if distance < eps {
        return Ok(Direction::default());
    }

    let vertical = if d_down == 0.0 { eps } else { d_down };
    let inc_deg = horizontal.atan2(vertical).to_degrees();
    let azi_deg = (d_east.atan2(d_north).to_degrees() + 360.0) % 360.0;

    Ok(Direction { inc_deg, azi_deg })
}

fn cfg_target_epsilon() -> f64 {
    if crate::config::is_initialized() {
        crate::config::get().planning.target_epsilon
    } else {
        crate::config::defaults::TARGET_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_segment() {
        let d = solve_straight_to_target(
            Point3::new(0.0, 0.0, 100.0),
            Point3::default(),
            0.0,
            100.0,
        )
        .unwrap();
        assert!(d.inc_deg.abs() < 1e-6);
        assert!(d.azi_deg.abs() < 1e-6);
    }

    #[test]
    fn test_horizontal_east() {
        let d = solve_straight_to_target(
            Point3::new(50.0, 0.0, 1000.0),
            Point3::new(0.0, 0.0, 1000.0),
            1000.0,
            1050.0,
        )
        .unwrap();
        assert!((d.inc_deg - 90.0).abs() < 1e-6);
        assert!((d.azi_deg - 90.0).abs() < 1e-6);
    }

    #[test]
    fn test_azimuth_wraps_into_positive_range() {
        // South-west, 45° down
        let d = solve_straight_to_target(
            Point3::new(-10.0, -10.0, 200.0_f64.sqrt()),
            Point3::default(),
            0.0,
            20.0,
        )
        .unwrap();
        assert!((d.inc_deg - 45.0).abs() < 1e-6);
        assert!((d.azi_deg - 225.0).abs() < 1e-6);
    }

    #[test]
    fn test_coincident_points_give_placeholder() {
        let p = Point3::new(5.0, 5.0, 5.0);
        assert_eq!(
            solve_straight_to_target(p, p, 0.0, 10.0).unwrap(),
            Direction { inc_deg: 0.0, azi_deg: 0.0 }
        );
    }

    #[test]
    fn test_md_span_must_be_positive() {
        let p = Point3::default();
        assert_eq!(
            solve_straight_to_target(p, p, 10.0, 10.0).unwrap_err(),
            TrajectoryError::InvalidMdSpan { md_start: 10.0, md_end: 10.0 }
        );
        assert!(solve_straight_to_target(p, p, 10.0, 5.0).is_err());
    }

    #[test]
    fn test_span_mismatch_is_not_an_error() {
        // 100 m apart over a 10 m MD span: still answered
        let d = solve_straight_to_target(
            Point3::new(0.0, 100.0, 0.0),
            Point3::default(),
            0.0,
            10.0,
        )
        .unwrap();
        assert!((d.inc_deg - 90.0).abs() < 1e-6);
        assert!(d.azi_deg.abs() < 1e-6);
    }
}
