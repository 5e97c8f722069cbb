//! Planner configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Preferred direction for rectangle merging.
///
/// `Vertical` merges along shared horizontal edges (extending height);
/// `Horizontal` merges along shared vertical edges (extending width).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MergeDirection {
    #[default]
    Vertical,
    Horizontal,
}

impl MergeDirection {
    /// The other direction.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }
}

/// Configuration for the region planner.
///
/// Constructed once and passed explicitly into each pipeline stage; the
/// tolerances govern correctness, not performance.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Rotation angle of the simulation area in radians. All geometry is
    /// de-rotated by this angle before processing and rotated back after.
    pub rotation_angle_rad: f64,

    /// Tolerance for geometric coincidence (vertex/edge matching and the
    /// overlap predicate's relative-area threshold).
    pub coincidence_tol: f64,

    /// Minimum per-axis overlap for two candidate cells to count as
    /// overlapping, and the minimum extent of a non-degenerate cell.
    pub cell_overlap_tol: f64,

    /// Looseness ratio for cluster consolidation: a cluster is replaced by
    /// its bounding box iff `bbox_area <= (1 + area_looseness) * sum_area`.
    pub area_looseness: f64,

    /// Preferred merge direction for the fallback rectangle merger.
    pub merge_direction: MergeDirection,

    /// Identifier prefix selecting turbine-owned cells during merging.
    pub turbine_prefix: String,

    /// Identifier prefix selecting pure wake cells during merging.
    pub wake_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rotation_angle_rad: 0.0,
            coincidence_tol: 1e-9,
            cell_overlap_tol: 1e-3,
            area_looseness: 0.8,
            merge_direction: MergeDirection::default(),
            turbine_prefix: "Turbine".to_string(),
            wake_prefix: "Wake".to_string(),
        }
    }
}

impl Config {
    /// Creates a configuration with default tolerances and no rotation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the simulation-area rotation angle in radians.
    pub fn with_rotation_angle(mut self, radians: f64) -> Self {
        self.rotation_angle_rad = radians;
        self
    }

    /// Sets the coincidence tolerance.
    pub fn with_coincidence_tol(mut self, tol: f64) -> Self {
        self.coincidence_tol = tol;
        self
    }

    /// Sets the cell overlap tolerance.
    pub fn with_cell_overlap_tol(mut self, tol: f64) -> Self {
        self.cell_overlap_tol = tol;
        self
    }

    /// Sets the consolidation looseness ratio.
    pub fn with_area_looseness(mut self, ratio: f64) -> Self {
        self.area_looseness = ratio;
        self
    }

    /// Sets the preferred merge direction.
    pub fn with_merge_direction(mut self, direction: MergeDirection) -> Self {
        self.merge_direction = direction;
        self
    }

    /// Sets the identifier prefix for turbine-owned cells.
    pub fn with_turbine_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.turbine_prefix = prefix.into();
        self
    }

    /// Sets the identifier prefix for wake cells.
    pub fn with_wake_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.wake_prefix = prefix.into();
        self
    }
}
