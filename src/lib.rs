//! wellpath: Well Trajectory Geometry & Formation Tops
//!
//! Numerical core for a well's spatial path and its named depth intervals.
//!
//! ## Architecture
//!
//! - **Trajectory**: station arrays (MD, TVD, DX, DY, INC, AZI) with
//!   interpolation, minimum curvature, offset recovery, downsampling and
//!   single-segment inverse planning
//! - **Formation Tops**: sorted named depth markers with half-open interval queries
//! - **Survey / Tops loaders**: CSV and TOML import at the I/O edge
//! - **Well**: caller-side composition that cross-checks tops against a survey
//!
//! Trajectory and tops never reference each other; composition happens at
//! the call site.

pub mod config;
pub mod error;
pub mod survey;
pub mod tops;
pub mod trajectory;
pub mod well;

// Re-export configuration
pub use config::EngineConfig;

// Re-export error taxonomy
pub use error::{ErrorKind, LoadError};

// Re-export trajectory types
pub use trajectory::{
    ArrayName, Direction, Point3, Positions, TieIn, Trajectory, TrajectoryError, TrajectoryRecord,
};

// Re-export formation tops
pub use tops::{FormationInterval, FormationTop, FormationTops, TopsError, TopsRecord};

// Re-export well composition
pub use well::{Well, WellError};
