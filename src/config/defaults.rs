//! Built-in default constants.
//!
//! Used directly when no `EngineConfig` is installed, and as the serde
//! defaults of `EngineConfig`.

// ============================================================================
// Minimum Curvature
// ============================================================================

/// Dogleg angle (radians) below which a segment is treated as straight and
/// the ratio factor is taken as exactly 1.
pub const SMALL_ANGLE_RAD: f64 = 1e-8;

// ============================================================================
// Planning
// ============================================================================

/// Distance below which target and origin are considered coincident.
/// Also stands in for a zero vertical component in the inclination atan2.
pub const TARGET_EPSILON: f64 = 1e-12;

// ============================================================================
// Display
// ============================================================================

/// Default station budget when downsampling for plots.
pub const DEFAULT_MAX_POINTS: usize = 500;
