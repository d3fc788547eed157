//! Trajectory Integration Tests
//!
//! Exercises the public trajectory surface end to end: construction paths,
//! interpolation round trips, minimum curvature against closed-form
//! geometry, downsampling and the straight-segment solver.

use wellpath::trajectory::{
    inc_to_tvd, minimum_curvature, off_to_tvd, solve_straight_to_target, Point3,
};
use wellpath::{ArrayName, ErrorKind, TieIn, Trajectory, TrajectoryError, TrajectoryRecord};

const TOL: f64 = 1e-9;

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "length differs");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < TOL, "station {i}: expected {e}, got {a}");
    }
}

/// A J-shaped well: vertical to 500, build 3°/30 m to 45° heading NE, hold.
fn j_well() -> Trajectory {
    let mut md = Vec::new();
    let mut inc = Vec::new();
    for i in 0..=50 {
        let m = i as f64 * 30.0;
        md.push(m);
        let build = if m <= 500.0 { 0.0 } else { ((m - 500.0) / 10.0).min(45.0) };
        inc.push(build);
    }
    let azi = vec![45.0; md.len()];
    Trajectory::from_md_inc_azi(md, inc, azi, TieIn::new(1000.0, 2000.0, 25.0)).unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn non_increasing_md_rejected_for_every_length() {
    for n in 2..8 {
        let mut md: Vec<f64> = (0..n).map(|i| i as f64 * 10.0).collect();
        md[n - 1] = md[n - 2];
        let tvd = md.clone();
        let err = Trajectory::from_md_tvd(md, tvd).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err,
            TrajectoryError::NotStrictlyIncreasing { array: ArrayName::Md, index: n - 1 }
        );
    }
}

#[test]
fn fully_specified_trajectory_keeps_arrays() {
    let t = Trajectory::from_md_xyz(
        vec![0.0, 10.0, 20.0],
        vec![0.0, 1.0, 2.0],
        vec![0.0, 0.5, 1.0],
        vec![0.0, 9.9, 19.8],
    )
    .unwrap();
    assert_eq!(t.dx().unwrap(), &[0.0, 1.0, 2.0]);
    assert!(t.inc().is_none());
}

#[test]
fn generic_constructor_checks_every_present_array() {
    let err = Trajectory::from_record(TrajectoryRecord {
        md: Some(vec![0.0, 10.0, 20.0]),
        inc: Some(vec![0.0, 1.0, 2.0]),
        azi: Some(vec![0.0, 1.0]),
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(
        err,
        TrajectoryError::LengthMismatch { array: ArrayName::Azi, expected: 3, found: 2, .. }
    ));
}

// ============================================================================
// Interpolation
// ============================================================================

#[test]
fn interpolation_round_trip_inside_range() {
    let t = j_well();
    let md = t.md().unwrap();
    let (first, last) = (md[0], md[md.len() - 1]);
    let queries: Vec<f64> = (0..=100).map(|k| first + (last - first) * k as f64 / 100.0).collect();

    let tvd = t.md_to_tvd(&queries).unwrap();
    let back = t.tvd_to_md(&tvd).unwrap();
    for (q, b) in queries.iter().zip(&back) {
        assert!((q - b).abs() < 1e-6, "{q} came back as {b}");
    }
}

#[test]
fn interpolation_never_extrapolates() {
    let t = j_well();
    let md = t.md().unwrap();
    let last = md[md.len() - 1];
    for q in [-0.001, last + 0.001, f64::INFINITY] {
        let err = t.md_to_tvd(&[q]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }
    let tvd = t.tvd().unwrap();
    assert!(matches!(
        t.tvd_to_md(&[tvd[0] - 1.0]),
        Err(TrajectoryError::OutOfRange { array: ArrayName::Tvd, .. })
    ));
}

// ============================================================================
// Minimum curvature
// ============================================================================

#[test]
fn end_to_end_vertical_scenario() {
    let md = [0.0, 10.0, 20.0, 30.0];
    let zeros = [0.0; 4];
    let p = minimum_curvature(&md, &zeros, &zeros, TieIn::default(), 1e-8).unwrap();
    assert_close(&p.dx, &[0.0; 4]);
    assert_close(&p.dy, &[0.0; 4]);
    assert_close(&p.tvd, &[0.0, 10.0, 20.0, 30.0]);
}

#[test]
fn vertical_path_advances_tvd_by_md() {
    let md: Vec<f64> = vec![12.0, 40.0, 41.5, 100.0, 333.3];
    let zeros = vec![0.0; md.len()];
    let azi: Vec<f64> = vec![10.0, 200.0, 0.0, 359.0, 90.0];
    let p = minimum_curvature(&md, &zeros, &azi, TieIn::new(7.0, -3.0, 2.0), 1e-8).unwrap();
    for i in 1..md.len() {
        assert!((p.tvd[i] - p.tvd[i - 1] - (md[i] - md[i - 1])).abs() < TOL);
        assert!((p.dx[i] - 7.0).abs() < TOL);
        assert!((p.dy[i] + 3.0).abs() < TOL);
    }
}

#[test]
fn j_well_hold_section_heads_north_east() {
    let t = j_well();
    let dx = t.dx().unwrap();
    let dy = t.dy().unwrap();
    let n = dx.len();
    // Azimuth 45°: equal east and north displacement from the tie-in
    assert!((dx[n - 1] - 1000.0 - (dy[n - 1] - 2000.0)).abs() < 1e-6);
    assert!(dx[n - 1] > 1000.0);
    // Vertical section untouched
    assert!((t.md_to_tvd_at(480.0).unwrap() - (480.0 + 25.0)).abs() < 1e-9);
}

#[test]
fn tangential_and_minimum_curvature_differ_on_build() {
    let md = [0.0, 100.0, 200.0];
    let inc = [0.0, 20.0, 40.0];
    let tangential = inc_to_tvd(&md, &inc).unwrap();
    let mc = minimum_curvature(&md, &inc, &[0.0; 3], TieIn::default(), 1e-8).unwrap();
    // Tangential uses the lower station's (larger) inclination, so it is shallower
    assert!(tangential[2] < mc.tvd[2]);
}

#[test]
fn offsets_recover_straight_hole_tvd() {
    // 3-4-5 triangles: 5 along hole, 3 east, 4 down
    let md = [0.0, 5.0, 10.0];
    let tvd = off_to_tvd(&md, &[0.0, 3.0, 6.0], &[0.0; 3]).unwrap();
    assert_close(&tvd, &[0.0, 4.0, 8.0]);
}

// ============================================================================
// Downsampling & planning
// ============================================================================

#[test]
fn downsample_preserves_endpoints_for_every_budget() {
    let t = j_well();
    let n = t.len();
    for max_points in 2..=n + 3 {
        let d = t.downsample(max_points).unwrap();
        assert_eq!(d.len(), max_points.min(n));
        for name in ArrayName::ALL {
            let (orig, reduced) = (t.array(name).unwrap(), d.array(name).unwrap());
            assert_eq!(reduced[0], orig[0]);
            assert_eq!(reduced[reduced.len() - 1], orig[n - 1]);
        }
        assert_eq!(d.tie_in(), t.tie_in());
    }
}

#[test]
fn planner_recovers_hold_direction() {
    let t = j_well();
    let n = t.len();
    let (dx, dy, tvd, md) = (t.dx().unwrap(), t.dy().unwrap(), t.tvd().unwrap(), t.md().unwrap());
    let origin = Point3::new(dx[n - 3], dy[n - 3], tvd[n - 3]);
    let target = Point3::new(dx[n - 1], dy[n - 1], tvd[n - 1]);
    let d = solve_straight_to_target(target, origin, md[n - 3], md[n - 1]).unwrap();
    assert!((d.inc_deg - 45.0).abs() < 1e-6, "inc {}", d.inc_deg);
    assert!((d.azi_deg - 45.0).abs() < 1e-6, "azi {}", d.azi_deg);
}
