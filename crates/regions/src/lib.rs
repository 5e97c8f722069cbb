//! # Wake-Refine Regions
//!
//! Wake-region overlap resolution for offshore wind-farm mesh refinement.
//!
//! Users author one rectangular wake region per turbine; neighboring
//! rectangles frequently overlap, but the downstream mesh tooling requires
//! disjoint, uniquely-named cell sets. This crate resolves the overlaps:
//!
//! - **Overlap graph & clustering**: pairwise bounding-box overlap tests and
//!   connected-component clustering ([`OverlapGraph`])
//! - **Consolidation**: a cluster collapses into its bounding box when the
//!   box is tight enough ([`try_consolidate`])
//! - **Fallback subdivision**: overlapping regions are cut into a grid of
//!   non-overlapping candidate cells ([`subdivide`])
//! - **Turbine tagging**: cells containing a turbine take its identifier
//!   ([`tag_cells`])
//! - **Rectangle merging**: greedy edge-adjacent merging grows turbine-owned
//!   rectangles back into large refinement zones ([`merge_cells`])
//!
//! [`RegionPlanner`] orchestrates the pipeline under the simulation area's
//! rotation: everything is de-rotated into an axis-aligned working frame and
//! rotated back on the way out.
//!
//! ## Quick Start
//!
//! ```rust
//! use wake_refine_regions::{Config, RegionPlanner, Turbine, WakeRegion};
//!
//! let regions = vec![
//!     WakeRegion::rectangle("Wake_1", 0.0, 0.0, 400.0, 2000.0),
//!     WakeRegion::rectangle("Wake_2", 350.0, 0.0, 750.0, 2000.0),
//! ];
//! let turbines = vec![
//!     Turbine::new("Turbine_1", 200.0, 100.0).with_hub_height(90.0),
//!     Turbine::new("Turbine_2", 550.0, 100.0).with_hub_height(90.0),
//! ];
//!
//! let planner = RegionPlanner::new(Config::new().with_rotation_angle(0.0));
//! let resolved = planner.plan(&regions, &turbines).unwrap();
//!
//! for region in &resolved {
//!     println!("{}: {:?}", region.id, region.bbox());
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod consolidate;
pub mod merge;
pub mod overlap;
pub mod planner;
pub mod region;
pub mod subdivide;
pub mod tag;

// Re-exports
pub use consolidate::try_consolidate;
pub use merge::merge_cells;
pub use overlap::{overlaps, overlaps_directed, OverlapGraph};
pub use planner::RegionPlanner;
pub use region::{Cell, Center, RegionId, Turbine, WakeRegion};
pub use subdivide::{generate_candidate_cells, split_by_overlap, subdivide};
pub use tag::tag_cells;
pub use wake_refine_core::{Aabb2, Config, Error, MergeDirection, Result};
