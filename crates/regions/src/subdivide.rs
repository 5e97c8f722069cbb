//! Fallback grid subdivision.
//!
//! When consolidation is rejected, every overlapping region is cut into a
//! candidate grid built from its own vertex coordinates plus the vertices of
//! other overlapping regions that fall inside it. Grid cells whose center
//! lies inside the source region are accepted first-come, in
//! region-then-grid (x-major) order, unless they overlap an already-accepted
//! cell. Isolated regions pass through unchanged.

use rstar::{RTree, RTreeObject, AABB};
use wake_refine_core::{point_in_ring, Aabb2};

use crate::overlap::OverlapGraph;
use crate::region::{Cell, WakeRegion};

/// Accepted-cell footprint kept in the broad-phase index.
struct AcceptedCell {
    bounds: Aabb2,
}

impl RTreeObject for AcceptedCell {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.min_x, self.bounds.min_y],
            [self.bounds.max_x, self.bounds.max_y],
        )
    }
}

/// Splits regions into those participating in at least one pairwise overlap
/// and those isolated from all others.
pub fn split_by_overlap<'a>(
    regions: &'a [WakeRegion],
    graph: &OverlapGraph,
) -> (Vec<&'a WakeRegion>, Vec<&'a WakeRegion>) {
    let mut overlapping = Vec::new();
    let mut isolated = Vec::new();
    for (index, region) in regions.iter().enumerate() {
        if graph.has_neighbors(index) {
            overlapping.push(region);
        } else {
            isolated.push(region);
        }
    }
    (overlapping, isolated)
}

/// Generates the candidate cells for the overlapping regions.
///
/// `coincidence_tol` governs the point-in-polygon tests; `cell_tol` is the
/// minimum cell extent and the per-axis overlap threshold for rejecting a
/// candidate against already-accepted cells.
pub fn generate_candidate_cells(
    overlapping: &[&WakeRegion],
    coincidence_tol: f64,
    cell_tol: f64,
) -> Vec<Cell> {
    let mut cells = Vec::new();
    let mut accepted = RTree::new();

    for (i, region) in overlapping.iter().enumerate() {
        let mut grid_x: Vec<f64> = region.ring.iter().map(|p| p.0).collect();
        let mut grid_y: Vec<f64> = region.ring.iter().map(|p| p.1).collect();

        for (j, other) in overlapping.iter().enumerate() {
            if i == j {
                continue;
            }
            for &(x, y) in &other.ring {
                if point_in_ring(x, y, &region.ring, coincidence_tol) {
                    grid_x.push(x);
                    grid_y.push(y);
                }
            }
        }

        grid_x.sort_by(|a, b| a.total_cmp(b));
        grid_x.dedup();
        grid_y.sort_by(|a, b| a.total_cmp(b));
        grid_y.dedup();

        for k in 0..grid_x.len().saturating_sub(1) {
            for l in 0..grid_y.len().saturating_sub(1) {
                let bounds = Aabb2::new(grid_x[k], grid_y[l], grid_x[k + 1], grid_y[l + 1]);
                let (cx, cy) = bounds.center();

                if !point_in_ring(cx, cy, &region.ring, coincidence_tol) {
                    continue;
                }
                if bounds.width() <= cell_tol || bounds.height() <= cell_tol {
                    continue;
                }
                if overlaps_accepted(&accepted, &bounds, cell_tol) {
                    continue;
                }

                cells.push(Cell::from_bounds(region.id.clone(), bounds));
                accepted.insert(AcceptedCell { bounds });
            }
        }
    }
    cells
}

/// True if the candidate bounds overlap any accepted cell by more than
/// `cell_tol` on both axes.
fn overlaps_accepted(accepted: &RTree<AcceptedCell>, bounds: &Aabb2, cell_tol: f64) -> bool {
    let envelope = AABB::from_corners([bounds.min_x, bounds.min_y], [bounds.max_x, bounds.max_y]);
    accepted
        .locate_in_envelope_intersecting(&envelope)
        .any(|existing| {
            let (x_overlap, y_overlap) = existing.bounds.overlap_extents(bounds);
            x_overlap > cell_tol && y_overlap > cell_tol
        })
}

/// Runs the full fallback subdivision: candidate cells for overlapping
/// regions, then the isolated regions appended as pass-through cells.
pub fn subdivide(
    regions: &[WakeRegion],
    graph: &OverlapGraph,
    coincidence_tol: f64,
    cell_tol: f64,
) -> Vec<Cell> {
    let (overlapping, isolated) = split_by_overlap(regions, graph);
    log::debug!(
        "subdividing {} overlapping regions ({} isolated pass through)",
        overlapping.len(),
        isolated.len()
    );

    let mut cells = generate_candidate_cells(&overlapping, coincidence_tol, cell_tol);
    cells.extend(isolated.into_iter().map(Cell::from_region));
    cells
}
