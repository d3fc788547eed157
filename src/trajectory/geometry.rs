//! Station-to-station position derivations
//!
//! Three independent algorithms, kept apart on purpose because they give
//! different numbers:
//! - `minimum_curvature`: authoritative DX/DY/TVD from MD/INC/AZI
//! - `inc_to_tvd`: tangential approximation of TVD from MD/INC only
//! - `off_to_tvd`: TVD recovered from horizontal offsets (Pythagorean)

use super::{require_same_length, require_strictly_increasing, ArrayName, TieIn, TrajectoryError};
use serde::{Deserialize, Serialize};

/// Easting, northing and vertical positions for every station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Positions {
    pub dx: Vec<f64>,
    pub dy: Vec<f64>,
    pub tvd: Vec<f64>,
}

// ============================================================================
// Minimum Curvature
// ============================================================================

/// Compute `(DX, DY, TVD)` from MD/INC/AZI by the minimum curvature method.
///
/// For each station pair the dogleg angle is
///
/// `dl = acos(cos I1·cos I2 + sin I1·sin I2·cos(A2 - A1))`
///
/// (argument clipped to [-1, 1]) and the ratio factor is `(2/dl)·tan(dl/2)`,
/// or exactly 1 when `dl < small_angle_rad` so near-straight segments avoid
/// the 0/0. Increments are `0.5·dMD·RF·(f(1) + f(2))` for north, east and down.
///
/// Angles in degrees; azimuth 0° = north, 90° = east. Station 0 takes the
/// tie-in position.
pub fn minimum_curvature(
    md: &[f64],
    inc_deg: &[f64],
    azi_deg: &[f64],
    tie_in: TieIn,
    small_angle_rad: f64,
) -> Result<Positions, TrajectoryError> {
    require_same_length((ArrayName::Md, md), (ArrayName::Inc, inc_deg))?;
    require_same_length((ArrayName::Md, md), (ArrayName::Azi, azi_deg))?;
    require_strictly_increasing(md, ArrayName::Md)?;

    let n = md.len();
    if n == 0 {
        return Ok(Positions::default());
    }

    let inc: Vec<f64> = inc_deg.iter().map(|d| d.to_radians()).collect();
    let azi: Vec<f64> = azi_deg.iter().map(|d| d.to_radians()).collect();

    let mut dx = Vec::with_capacity(n);
    let mut dy = Vec::with_capacity(n);
    let mut tvd = Vec::with_capacity(n);
    dx.push(tie_in.xhead);
    dy.push(tie_in.yhead);
    tvd.push(tie_in.datum);

    for i in 1..n {
        let dmd = md[i] - md[i - 1];
        let (i1, a1) = (inc[i - 1], azi[i - 1]);
        let (i2, a2) = (inc[i], azi[i]);

        let cos_dl = (i1.cos() * i2.cos() + i1.sin() * i2.sin() * (a2 - a1).cos()).clamp(-1.0, 1.0);
        let dl = cos_dl.acos();
        let rf = if dl < small_angle_rad {
            1.0
        } else {
            (2.0 / dl) * (dl / 2.0).tan()
        };

        let half = 0.5 * dmd * rf;
        let d_north = half * (i1.sin() * a1.cos() + i2.sin() * a2.cos());
        let d_east = half * (i1.sin() * a1.sin() + i2.sin() * a2.sin());
        let d_down = half * (i1.cos() + i2.cos());

        dy.push(dy[i - 1] + d_north);
        dx.push(dx[i - 1] + d_east);
        tvd.push(tvd[i - 1] + d_down);
    }

    Ok(Positions { dx, dy, tvd })
}

// ============================================================================
// Tangential approximation
// ============================================================================

/// Fast tangential TVD: `TVD[i] = TVD[i-1] + dMD·cos(INC[i])`, seeded with
/// `TVD[0] = MD[0]`.
///
/// Only the inclination at the lower station of each step is used; nothing is
/// averaged and azimuth is ignored. This is a lower-fidelity shortcut, not an
/// alternative to `minimum_curvature` (nor to the average-angle method).
pub fn inc_to_tvd(md: &[f64], inc_deg: &[f64]) -> Result<Vec<f64>, TrajectoryError> {
    require_same_length((ArrayName::Md, md), (ArrayName::Inc, inc_deg))?;
    require_strictly_increasing(md, ArrayName::Md)?;

    let Some(&first) = md.first() else {
        return Ok(Vec::new());
    };
    let mut tvd = Vec::with_capacity(md.len());
    tvd.push(first);
    for i in 1..md.len() {
        let step = (md[i] - md[i - 1]) * inc_deg[i].to_radians().cos();
        tvd.push(tvd[i - 1] + step);
    }
    Ok(tvd)
}

// ============================================================================
// Offset-based recovery
// ============================================================================

/// Recover cumulative TVD (from 0) out of horizontal offsets:
/// `dTVD = sqrt(max(0, dMD² - dDX² - dDY²))`.
///
/// When the offsets imply more lateral travel than the MD step allows, the
/// segment contributes zero vertical progress. This clamp is silent.
pub fn off_to_tvd(md: &[f64], dx: &[f64], dy: &[f64]) -> Result<Vec<f64>, TrajectoryError> {
    require_same_length((ArrayName::Md, md), (ArrayName::Dx, dx))?;
    require_same_length((ArrayName::Md, md), (ArrayName::Dy, dy))?;
    require_strictly_increasing(md, ArrayName::Md)?;

    if md.is_empty() {
        return Ok(Vec::new());
    }
    let mut tvd = Vec::with_capacity(md.len());
    tvd.push(0.0);
    for i in 1..md.len() {
        let dmd = md[i] - md[i - 1];
        let ddx = dx[i] - dx[i - 1];
        let ddy = dy[i] - dy[i - 1];
        let step = (dmd * dmd - ddx * ddx - ddy * ddy).max(0.0).sqrt();
        tvd.push(tvd[i - 1] + step);
    }
    Ok(tvd)
}
