//! # Wake-Refine Core
//!
//! Core primitives for the wake-refine mesh preparation engine.
//!
//! This crate provides the foundational pieces shared by the region
//! partitioning pipeline:
//!
//! - **Tolerant geometry**: shoelace area, bounding boxes, and a
//!   point-in-polygon test that treats boundary points as interior
//! - **Transforms**: rotation between the simulation frame and the
//!   axis-aligned working frame ([`rotate_ring`], [`rotate_point`])
//! - **Configuration**: [`Config`] with the numeric tolerances governing
//!   overlap detection, consolidation, and merging
//! - **Errors**: [`Error`] and the crate-wide [`Result`] alias
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod config;
pub mod error;
pub mod geometry;
pub mod transform;

// Re-exports
pub use config::{Config, MergeDirection};
pub use error::{Error, Result};
pub use geometry::{point_in_ring, ring_area, ring_bbox};
pub use transform::{rotate_point, rotate_ring, Aabb2};
