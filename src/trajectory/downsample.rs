//! Endpoint-preserving, reproducible downsampling for display layers.

use super::{ArrayName, Trajectory, TrajectoryError};

/// Evenly spaced station indices over `[0, n-1]`, rounded half-to-even and
/// deduplicated. Always contains `0` and `n-1` when `n > 0`.
pub fn downsample_indices(n: usize, max_points: usize) -> Result<Vec<usize>, TrajectoryError> {
    if max_points < 2 {
        return Err(TrajectoryError::InvalidMaxPoints(max_points));
    }
    if n <= max_points {
        return Ok((0..n).collect());
    }

    let last = (n - 1) as f64;
    let step = last / (max_points - 1) as f64;
    let mut indices: Vec<usize> = (0..max_points)
        .map(|k| {
            let x = if k == max_points - 1 { last } else { k as f64 * step };
            x.round_ties_even() as usize
        })
        .collect();
    indices.dedup();
    Ok(indices)
}

impl Trajectory {
    /// Reduce every present array to at most `max_points` stations, keeping
    /// the first and last station exactly. Requires `MD`.
    pub fn downsample(&self, max_points: usize) -> Result<Trajectory, TrajectoryError> {
        let n = self.require(ArrayName::Md)?.len();
        let indices = downsample_indices(n, max_points)?;
        if indices.len() == n {
            return Ok(self.clone());
        }

        let pick = |a: &Option<Vec<f64>>| {
            a.as_ref()
                .map(|values| indices.iter().map(|&i| values[i]).collect::<Vec<f64>>())
        };

        // A subsequence of a strictly increasing MD stays strictly increasing
        Ok(Trajectory {
            md: pick(&self.md),
            tvd: pick(&self.tvd),
            dx: pick(&self.dx),
            dy: pick(&self.dy),
            inc: pick(&self.inc),
            azi: pick(&self.azi),
            tie_in: self.tie_in,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::TieIn;

    fn linear(n: usize) -> Trajectory {
        let md: Vec<f64> = (0..n).map(|i| i as f64).collect();
        Trajectory::from_md_tvd(md.clone(), md).unwrap()
    }

    #[test]
    fn test_indices_even_spacing() {
        assert_eq!(downsample_indices(101, 5).unwrap(), vec![0, 25, 50, 75, 100]);
        assert_eq!(downsample_indices(10, 4).unwrap(), vec![0, 3, 6, 9]);
    }

    #[test]
    fn test_indices_round_half_to_even() {
        // step 1.5 → 0, 1.5, 3.0, 4.5, 6.0 → 0, 2, 3, 4, 6
        assert_eq!(downsample_indices(7, 5).unwrap(), vec![0, 2, 3, 4, 6]);
    }

    #[test]
    fn test_downsample_keeps_endpoints_and_length() {
        let t = linear(101);
        let d = t.downsample(5).unwrap();
        let (md, tvd) = d.view_section().unwrap();
        assert_eq!(md.len(), 5);
        assert_eq!(tvd.len(), 5);
        assert_eq!(md[0], 0.0);
        assert_eq!(md[4], 100.0);
        assert_eq!(tvd[4], 100.0);
    }

    #[test]
    fn test_downsample_no_upsampling() {
        let t = linear(3);
        assert_eq!(t.downsample(10).unwrap(), t);
        assert_eq!(t.downsample(3).unwrap(), t);
    }

    #[test]
    fn test_downsample_rejects_tiny_budget() {
        let t = linear(2);
        assert_eq!(t.downsample(1).unwrap_err(), TrajectoryError::InvalidMaxPoints(1));
        assert_eq!(t.downsample(0).unwrap_err(), TrajectoryError::InvalidMaxPoints(0));
    }

    #[test]
    fn test_downsample_is_reproducible_and_keeps_absent_arrays_absent() {
        let md: Vec<f64> = (0..50).map(|i| i as f64 * 10.0).collect();
        let inc: Vec<f64> = (0..50).map(|i| i as f64).collect();
        let azi = vec![45.0; 50];
        let t = Trajectory::from_md_inc_azi(md, inc, azi, TieIn::default()).unwrap();

        let a = t.downsample(7).unwrap();
        let b = t.downsample(7).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 7);
        assert_eq!(a.inc().unwrap()[6], 49.0);

        let profile = linear(50).downsample(7).unwrap();
        assert!(profile.dx().is_none());
        assert!(profile.inc().is_none());
    }
}
