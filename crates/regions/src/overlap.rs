//! Pairwise overlap detection and connected-component clustering.
//!
//! Overlap is decided on bounding boxes: two regions overlap when the
//! intersection area of their boxes exceeds a tolerance scaled by a region's
//! own area. The base test is asymmetric in its denominator; the public
//! predicate takes the disjunction of both orderings, a deliberate widening
//! that makes the relation symmetric.

use rayon::prelude::*;
use wake_refine_core::ring_bbox;

use crate::region::WakeRegion;

/// Asymmetric overlap test: bbox intersection area measured against
/// `tol * area(a)`.
pub fn overlaps_directed(a: &WakeRegion, b: &WakeRegion, tol: f64) -> bool {
    let intersection = ring_bbox(&a.ring).intersection_area(&ring_bbox(&b.ring));
    intersection > tol * a.area()
}

/// Symmetric overlap predicate: true if the directed test holds in either
/// ordering.
pub fn overlaps(a: &WakeRegion, b: &WakeRegion, tol: f64) -> bool {
    overlaps_directed(a, b, tol) || overlaps_directed(b, a, tol)
}

/// Undirected graph over regions with an edge per overlapping pair.
#[derive(Debug)]
pub struct OverlapGraph {
    adjacency: Vec<Vec<usize>>,
}

impl OverlapGraph {
    /// Builds the graph by testing every unordered pair of regions.
    ///
    /// Pair tests run in parallel; the order-preserving collect keeps the
    /// adjacency lists deterministic for a given input order.
    pub fn build(regions: &[WakeRegion], tol: f64) -> Self {
        let n = regions.len();
        let edges: Vec<(usize, usize)> = (0..n)
            .into_par_iter()
            .flat_map_iter(|i| {
                (i + 1..n)
                    .filter(move |&j| overlaps(&regions[i], &regions[j], tol))
                    .map(move |j| (i, j))
            })
            .collect();

        let mut adjacency = vec![Vec::new(); n];
        for (i, j) in edges {
            adjacency[i].push(j);
            adjacency[j].push(i);
        }
        Self { adjacency }
    }

    /// Neighbors of a region.
    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.adjacency[index]
    }

    /// True if a region overlaps at least one other region.
    pub fn has_neighbors(&self, index: usize) -> bool {
        !self.adjacency[index].is_empty()
    }

    /// Connected components in discovery order, found with an explicit-stack
    /// depth-first traversal (no recursion, so large farms cannot overflow
    /// the stack).
    pub fn components(&self) -> Vec<Vec<usize>> {
        let n = self.adjacency.len();
        let mut visited = vec![false; n];
        let mut components = Vec::new();

        for start in 0..n {
            if visited[start] {
                continue;
            }
            let mut component = Vec::new();
            let mut stack = vec![start];
            visited[start] = true;
            while let Some(index) = stack.pop() {
                component.push(index);
                for &neighbor in &self.adjacency[index] {
                    if !visited[neighbor] {
                        visited[neighbor] = true;
                        stack.push(neighbor);
                    }
                }
            }
            components.push(component);
        }
        components
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_disjoint_rectangles_do_not_overlap() {
        let a = WakeRegion::rectangle("a", 0.0, 0.0, 1.0, 1.0);
        let b = WakeRegion::rectangle("b", 2.0, 2.0, 3.0, 3.0);
        assert!(!overlaps(&a, &b, TOL));
        assert!(!overlaps_directed(&a, &b, TOL));
        assert!(!overlaps_directed(&b, &a, TOL));
    }

    #[test]
    fn test_offset_rectangles_overlap_both_ways() {
        let a = WakeRegion::rectangle("a", 0.0, 0.0, 1.0, 1.0);
        let b = WakeRegion::rectangle("b", 0.1, 0.0, 1.1, 1.0);
        assert!(overlaps(&a, &b, TOL));
        assert!(overlaps(&b, &a, TOL));
    }

    #[test]
    fn test_edge_adjacent_rectangles_do_not_overlap() {
        // Zero intersection area along the shared edge.
        let a = WakeRegion::rectangle("a", 0.0, 0.0, 1.0, 1.0);
        let b = WakeRegion::rectangle("b", 1.0, 0.0, 2.0, 1.0);
        assert!(!overlaps(&a, &b, TOL));
    }

    #[test]
    fn test_components_transitive_chain() {
        // a overlaps b, b overlaps c, a and c are apart: one component.
        let regions = vec![
            WakeRegion::rectangle("a", 0.0, 0.0, 1.0, 1.0),
            WakeRegion::rectangle("b", 0.5, 0.0, 1.5, 1.0),
            WakeRegion::rectangle("c", 1.2, 0.0, 2.2, 1.0),
            WakeRegion::rectangle("d", 5.0, 5.0, 6.0, 6.0),
        ];
        let graph = OverlapGraph::build(&regions, TOL);
        // b touches both ends of the chain; a and c only touch b.
        assert_eq!(graph.neighbors(0), &[1]);
        assert_eq!(graph.neighbors(1), &[0, 2]);
        assert_eq!(graph.neighbors(2), &[1]);
        assert!(graph.neighbors(3).is_empty());

        let components = graph.components();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].len(), 3);
        assert_eq!(components[1], vec![3]);
    }

    #[test]
    fn test_isolated_regions_have_no_neighbors() {
        let regions = vec![
            WakeRegion::rectangle("a", 0.0, 0.0, 1.0, 1.0),
            WakeRegion::rectangle("b", 3.0, 0.0, 4.0, 1.0),
        ];
        let graph = OverlapGraph::build(&regions, TOL);
        assert!(!graph.has_neighbors(0));
        assert!(!graph.has_neighbors(1));
        assert_eq!(graph.components().len(), 2);
    }
}
