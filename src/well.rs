//! Well - caller-side composition of a trajectory and its formation tops
//!
//! Neither component knows about the other. `Well::validate` performs the
//! cross-check a caller owes them: every formation top must lie inside the
//! survey's `[MD.first, MD.last]` range.

use crate::error::ErrorKind;
use crate::tops::FormationTops;
use crate::trajectory::{ArrayName, Trajectory, TrajectoryError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WellError {
    #[error(
        "Formation '{formation}' top {depth} lies outside the survey MD range [{md_min}, {md_max}]"
    )]
    TopOutsideSurvey {
        formation: String,
        depth: f64,
        md_min: f64,
        md_max: f64,
    },

    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),
}

impl WellError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WellError::TopOutsideSurvey { .. } => ErrorKind::Validation,
            WellError::Trajectory(e) => e.kind(),
        }
    }
}

/// A named well with optional survey and tops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Well {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trajectory: Option<Trajectory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tops: Option<FormationTops>,
}

impl Well {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_trajectory(mut self, trajectory: Trajectory) -> Self {
        self.trajectory = Some(trajectory);
        self
    }

    pub fn with_tops(mut self, tops: FormationTops) -> Self {
        self.tops = Some(tops);
        self
    }

    /// Cross-check tops against the survey MD range. Passes trivially when
    /// either part is missing.
    pub fn validate(&self) -> Result<(), WellError> {
        let (Some(trajectory), Some(tops)) = (&self.trajectory, &self.tops) else {
            debug!(well = %self.name, "Nothing to cross-check");
            return Ok(());
        };

        let md = trajectory.require(ArrayName::Md)?;
        let (Some(&md_min), Some(&md_max)) = (md.first(), md.last()) else {
            return Err(TrajectoryError::Empty { array: ArrayName::Md }.into());
        };

        for top in tops {
            if top.depth < md_min || top.depth > md_max {
                warn!(
                    well = %self.name,
                    formation = %top.name,
                    depth = top.depth,
                    "Formation top outside survey range"
                );
                return Err(WellError::TopOutsideSurvey {
                    formation: top.name.clone(),
                    depth: top.depth,
                    md_min,
                    md_max,
                });
            }
        }
        Ok(())
    }

    /// TVD of every formation top, shallow→deep.
    pub fn tops_tvd(&self) -> Result<Vec<(String, f64)>, WellError> {
        let (Some(trajectory), Some(tops)) = (&self.trajectory, &self.tops) else {
            return Ok(Vec::new());
        };
        let tvd = trajectory.md_to_tvd(&tops.depths())?;
        Ok(tops.iter().map(|t| t.name.clone()).zip(tvd).collect())
    }
}
