//! MD ↔ TVD piecewise-linear interpolation
//!
//! No extrapolation: every query must lie inside the indexing array's
//! `[first, last]` range or the whole call fails with `OutOfRange`.

use super::{require_strictly_increasing, ArrayName, Trajectory, TrajectoryError};

impl Trajectory {
    /// Interpolate `TVD` at the given measured depths.
    pub fn md_to_tvd(&self, values: &[f64]) -> Result<Vec<f64>, TrajectoryError> {
        let md = self.require(ArrayName::Md)?;
        let tvd = self.require(ArrayName::Tvd)?;
        check_in_range(values, md, ArrayName::Md)?;
        Ok(values.iter().map(|&q| interp(q, md, tvd)).collect())
    }

    /// Interpolate `MD` at the given true vertical depths.
    ///
    /// `TVD` is re-checked for strict monotonicity on every call; a trajectory
    /// may be valid and still not be invertible in this direction.
    pub fn tvd_to_md(&self, values: &[f64]) -> Result<Vec<f64>, TrajectoryError> {
        let md = self.require(ArrayName::Md)?;
        let tvd = self.require(ArrayName::Tvd)?;
        require_strictly_increasing(tvd, ArrayName::Tvd)?;
        check_in_range(values, tvd, ArrayName::Tvd)?;
        Ok(values.iter().map(|&q| interp(q, tvd, md)).collect())
    }

    pub fn md_to_tvd_at(&self, md: f64) -> Result<f64, TrajectoryError> {
        Ok(self.md_to_tvd(&[md])?[0])
    }

    pub fn tvd_to_md_at(&self, tvd: f64) -> Result<f64, TrajectoryError> {
        Ok(self.tvd_to_md(&[tvd])?[0])
    }
}

/// Linear interpolation of `ys` over increasing `xs`. Caller guarantees
/// `xs[0] <= q <= xs[last]` and equal, non-zero lengths.
pub(crate) fn interp(q: f64, xs: &[f64], ys: &[f64]) -> f64 {
    let j = xs.partition_point(|&x| x <= q);
    if j >= xs.len() {
        return ys[xs.len() - 1];
    }
    if j == 0 {
        return ys[0];
    }
    let i = j - 1;
    let t = (q - xs[i]) / (xs[j] - xs[i]);
    ys[i] + t * (ys[j] - ys[i])
}

fn check_in_range(query: &[f64], base: &[f64], array: ArrayName) -> Result<(), TrajectoryError> {
    if query.is_empty() {
        return Ok(());
    }
    let (Some(&valid_min), Some(&valid_max)) = (base.first(), base.last()) else {
        return Err(TrajectoryError::Empty { array });
    };

    let query_min = query.iter().copied().fold(f64::INFINITY, f64::min);
    let query_max = query.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let all_inside = query.iter().all(|&q| q >= valid_min && q <= valid_max);

    if all_inside {
        Ok(())
    } else {
        Err(TrajectoryError::OutOfRange {
            array,
            query_min,
            query_max,
            valid_min,
            valid_max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn sample() -> Trajectory {
        Trajectory::from_md_tvd(vec![0.0, 10.0, 20.0, 30.0], vec![0.0, 8.0, 18.0, 27.0]).unwrap()
    }

    #[test]
    fn test_md_to_tvd_linear_between_stations() {
        let t = sample();
        let tvd = t.md_to_tvd(&[5.0, 15.0, 25.0]).unwrap();
        assert!(approx(tvd[0], 4.0));
        assert!(approx(tvd[1], 13.0));
        assert!(approx(tvd[2], 22.5));
    }

    #[test]
    fn test_md_to_tvd_exact_at_endpoints() {
        let t = sample();
        assert_eq!(t.md_to_tvd_at(0.0).unwrap(), 0.0);
        assert_eq!(t.md_to_tvd_at(30.0).unwrap(), 27.0);
        assert_eq!(t.md_to_tvd_at(10.0).unwrap(), 8.0);
    }

    #[test]
    fn test_round_trip() {
        let t = sample();
        let q = [5.0, 15.0, 25.0];
        let back = t.tvd_to_md(&t.md_to_tvd(&q).unwrap()).unwrap();
        for (a, b) in back.iter().zip(q.iter()) {
            assert!(approx(*a, *b));
        }
    }

    #[test]
    fn test_out_of_range_reports_bounds() {
        let t = Trajectory::from_md_tvd(vec![0.0, 10.0, 20.0], vec![0.0, 9.0, 18.0]).unwrap();
        let err = t.md_to_tvd(&[-1.0, 5.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        match err {
            TrajectoryError::OutOfRange { array, query_min, query_max, valid_min, valid_max } => {
                assert_eq!(array, ArrayName::Md);
                assert_eq!(query_min, -1.0);
                assert_eq!(query_max, 5.0);
                assert_eq!(valid_min, 0.0);
                assert_eq!(valid_max, 20.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(t.md_to_tvd(&[5.0, 25.0]).is_err());
    }

    #[test]
    fn test_nan_query_rejected() {
        let t = sample();
        assert!(matches!(
            t.md_to_tvd(&[f64::NAN]),
            Err(TrajectoryError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_tvd_to_md_requires_increasing_tvd() {
        let t = Trajectory::from_md_tvd(vec![0.0, 10.0, 20.0], vec![0.0, 0.0, 5.0]).unwrap();
        let err = t.tvd_to_md(&[1.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            TrajectoryError::NotStrictlyIncreasing { array: ArrayName::Tvd, index: 1 }
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_missing_tvd() {
        let t = Trajectory::from_record(super::super::TrajectoryRecord {
            md: Some(vec![0.0, 1.0]),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            t.md_to_tvd(&[0.5]).unwrap_err(),
            TrajectoryError::Missing { array: ArrayName::Tvd }
        );
    }

    #[test]
    fn test_empty_query_is_ok() {
        assert!(sample().md_to_tvd(&[]).unwrap().is_empty());
    }
}
