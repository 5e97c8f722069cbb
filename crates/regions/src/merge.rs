//! Greedy rectangle merging.
//!
//! Merging grows "master" rectangles by absorbing "slave" rectangles along
//! shared edges. Two rectangles merge vertically when their x-extents match
//! within tolerance and they touch along a horizontal edge; horizontally with
//! the axes swapped. The merged rectangle always keeps the master's
//! identifier.
//!
//! The merger never fails: geometry that cannot be merged is returned as-is,
//! degrading to more, smaller output regions.

use wake_refine_core::{point_in_ring, Aabb2, MergeDirection};

use crate::region::Cell;

/// Which pass of the cross-group loop a merge attempt belongs to. Only the
/// direct pass may resolve the degenerate both-directions-possible case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Direct,
    Adjacency,
}

/// Attempts to merge `slave` into `master` along `direction`.
fn try_merge(
    master: &Cell,
    slave: &Cell,
    direction: MergeDirection,
    phase: Phase,
    tol: f64,
) -> Option<Cell> {
    let m = master.bounds();
    let s = slave.bounds();

    let vertical_possible = (m.min_x - s.min_x).abs() < tol
        && (m.max_x - s.max_x).abs() < tol
        && ((m.max_y - s.min_y).abs() < tol || (m.min_y - s.max_y).abs() < tol);
    let horizontal_possible = (m.min_y - s.min_y).abs() < tol
        && (m.max_y - s.max_y).abs() < tol
        && ((m.max_x - s.min_x).abs() < tol || (m.min_x - s.max_x).abs() < tol);

    let merge_vertical = || {
        Cell::from_bounds(
            master.id.clone(),
            Aabb2::new(m.min_x, m.min_y.min(s.min_y), m.max_x, m.max_y.max(s.max_y)),
        )
    };
    let merge_horizontal = || {
        Cell::from_bounds(
            master.id.clone(),
            Aabb2::new(m.min_x.min(s.min_x), m.min_y, m.max_x.max(s.max_x), m.max_y),
        )
    };

    if vertical_possible && horizontal_possible && phase == Phase::Direct {
        Some(merge_vertical())
    } else if vertical_possible && direction == MergeDirection::Vertical {
        Some(merge_vertical())
    } else if horizontal_possible && direction == MergeDirection::Horizontal {
        Some(merge_horizontal())
    } else {
        None
    }
}

/// Number of the slave's corner points lying inside the master (boundary
/// points count, so a fully shared edge contributes 2).
fn corner_contacts(slave: &Cell, master: &Cell, tol: f64) -> usize {
    slave
        .ring
        .iter()
        .filter(|&&(x, y)| point_in_ring(x, y, &master.ring, tol))
        .count()
}

/// Merges cells selected by identifier prefix.
///
/// With equal prefixes every selected cell may merge with every other
/// (same-group mode); with differing prefixes, `master_prefix` cells grow by
/// absorbing `slave_prefix` cells (cross-group mode). Cells matching neither
/// prefix pass through unchanged.
pub fn merge_cells(
    cells: &[Cell],
    master_prefix: &str,
    slave_prefix: &str,
    direction: MergeDirection,
    tol: f64,
) -> Vec<Cell> {
    if master_prefix == slave_prefix {
        merge_same_group(cells, master_prefix, direction, tol)
    } else {
        merge_cross_group(cells, master_prefix, slave_prefix, direction, tol)
    }
}

/// Fixpoint scan merging cells within one group: each pass lets every
/// not-yet-consumed cell absorb all later mergeable cells, looping until a
/// full pass produces no merge.
fn merge_same_group(
    cells: &[Cell],
    prefix: &str,
    direction: MergeDirection,
    tol: f64,
) -> Vec<Cell> {
    let (mut group, others): (Vec<Cell>, Vec<Cell>) = cells
        .iter()
        .cloned()
        .partition(|cell| cell.id.starts_with(prefix));

    let mut changed = true;
    while changed {
        changed = false;
        let mut next = Vec::with_capacity(group.len());
        let mut used = vec![false; group.len()];
        for i in 0..group.len() {
            if used[i] {
                continue;
            }
            let mut master = group[i].clone();
            for j in i + 1..group.len() {
                if used[j] {
                    continue;
                }
                if let Some(merged) = try_merge(&master, &group[j], direction, Phase::Direct, tol) {
                    master = merged;
                    used[j] = true;
                    changed = true;
                }
            }
            next.push(master);
        }
        group = next;
    }

    let mut result = others;
    result.extend(group);
    result
}

/// Cross-group loop: a direct pass merging (master, slave) pairs in
/// ascending-area order, then, once direct merges are exhausted, a compound
/// pass pre-merging two adjacent slaves along the opposite direction before
/// absorbing them into a master.
fn merge_cross_group(
    cells: &[Cell],
    master_prefix: &str,
    slave_prefix: &str,
    direction: MergeDirection,
    tol: f64,
) -> Vec<Cell> {
    let mut masters: Vec<Cell> = cells
        .iter()
        .filter(|c| c.id.starts_with(master_prefix))
        .cloned()
        .collect();
    let mut slaves: Vec<Cell> = cells
        .iter()
        .filter(|c| c.id.starts_with(slave_prefix))
        .cloned()
        .collect();
    let mut others: Vec<Cell> = cells
        .iter()
        .filter(|c| !c.id.starts_with(master_prefix) && !c.id.starts_with(slave_prefix))
        .cloned()
        .collect();

    loop {
        masters.sort_by(|a, b| a.area().total_cmp(&b.area()));
        slaves.sort_by(|a, b| a.area().total_cmp(&b.area()));

        if direct_pass(&mut masters, &mut slaves, direction, tol) {
            continue;
        }
        if adjacency_pass(&mut masters, &mut slaves, direction, tol) {
            continue;
        }
        break;
    }

    log::debug!(
        "merge finished with {} masters and {} unmerged slaves",
        masters.len(),
        slaves.len()
    );

    others.extend(masters);
    others.extend(slaves);
    others
}

/// Merges the first (master, slave) pair adjacent along the preferred
/// direction. Returns true if a merge happened.
fn direct_pass(
    masters: &mut [Cell],
    slaves: &mut Vec<Cell>,
    direction: MergeDirection,
    tol: f64,
) -> bool {
    for m_idx in 0..masters.len() {
        for s_idx in 0..slaves.len() {
            if let Some(merged) =
                try_merge(&masters[m_idx], &slaves[s_idx], direction, Phase::Direct, tol)
            {
                masters[m_idx] = merged;
                slaves.remove(s_idx);
                return true;
            }
        }
    }
    false
}

/// Compound merge: for the first master with at least two slaves sharing
/// two or more corner points, pre-merge the smallest mergeable slave pair
/// along the opposite direction, then absorb the result into the master
/// along the preferred direction. Returns true if a merge happened.
fn adjacency_pass(
    masters: &mut [Cell],
    slaves: &mut Vec<Cell>,
    direction: MergeDirection,
    tol: f64,
) -> bool {
    let opposite = direction.opposite();

    for m_idx in 0..masters.len() {
        let master = &masters[m_idx];

        let mut adjacent: Vec<usize> = (0..slaves.len())
            .filter(|&s_idx| corner_contacts(&slaves[s_idx], master, tol) >= 2)
            .collect();
        if adjacent.len() < 2 {
            continue;
        }
        adjacent.sort_by(|&a, &b| slaves[a].area().total_cmp(&slaves[b].area()));

        // First mergeable pair in ascending-area order.
        let mut pair: Option<(usize, usize, Cell)> = None;
        'pairs: for i in 0..adjacent.len() {
            for j in i + 1..adjacent.len() {
                if let Some(merged) = try_merge(
                    &slaves[adjacent[i]],
                    &slaves[adjacent[j]],
                    opposite,
                    Phase::Adjacency,
                    tol,
                ) {
                    pair = Some((adjacent[i], adjacent[j], merged));
                    break 'pairs;
                }
            }
        }

        if let Some((a, b, pre_merged)) = pair {
            if let Some(merged) =
                try_merge(&masters[m_idx], &pre_merged, direction, Phase::Adjacency, tol)
            {
                masters[m_idx] = merged;
                // Remove exactly the two consumed slaves, higher index first.
                let (hi, lo) = if a > b { (a, b) } else { (b, a) };
                slaves.remove(hi);
                slaves.remove(lo);
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cell(id: &str, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Cell {
        Cell::from_bounds(id, Aabb2::new(min_x, min_y, max_x, max_y))
    }

    const TOL: f64 = 1e-9;

    #[test]
    fn test_try_merge_vertical_stack() {
        let bottom = cell("Wake_1", 0.0, 0.0, 1.0, 1.0);
        let top = cell("Wake_1", 0.0, 1.0, 1.0, 2.0);
        let merged =
            try_merge(&bottom, &top, MergeDirection::Vertical, Phase::Direct, TOL).unwrap();
        let b = merged.bounds();
        assert_relative_eq!(b.min_y, 0.0);
        assert_relative_eq!(b.max_y, 2.0);
        assert_relative_eq!(b.width(), 1.0);
    }

    #[test]
    fn test_try_merge_rejects_mismatched_extents() {
        let a = cell("Wake_1", 0.0, 0.0, 1.0, 1.0);
        let b = cell("Wake_1", 0.0, 1.0, 1.5, 2.0);
        assert!(try_merge(&a, &b, MergeDirection::Vertical, Phase::Direct, TOL).is_none());
    }

    #[test]
    fn test_try_merge_rejects_wrong_direction() {
        let left = cell("Wake_1", 0.0, 0.0, 1.0, 1.0);
        let right = cell("Wake_1", 1.0, 0.0, 2.0, 1.0);
        assert!(try_merge(&left, &right, MergeDirection::Vertical, Phase::Direct, TOL).is_none());
        assert!(try_merge(&left, &right, MergeDirection::Horizontal, Phase::Direct, TOL).is_some());
    }

    #[test]
    fn test_same_group_vertical_stack_merges() {
        let cells = vec![
            cell("Wake_1", 0.0, 0.0, 1.0, 1.0),
            cell("Wake_1", 0.0, 1.0, 1.0, 2.0),
        ];
        let merged = merge_cells(&cells, "Wake", "Wake", MergeDirection::Vertical, TOL);
        assert_eq!(merged.len(), 1);
        assert_relative_eq!(merged[0].bounds().height(), 2.0);
        assert_eq!(merged[0].id, "Wake_1");
    }

    #[test]
    fn test_same_group_column_collapses_over_passes() {
        let cells = vec![
            cell("Wake_1", 0.0, 0.0, 1.0, 1.0),
            cell("Wake_1", 0.0, 2.0, 1.0, 3.0),
            cell("Wake_1", 0.0, 1.0, 1.0, 2.0),
        ];
        let merged = merge_cells(&cells, "Wake", "Wake", MergeDirection::Vertical, TOL);
        assert_eq!(merged.len(), 1);
        assert_relative_eq!(merged[0].bounds().height(), 3.0);
    }

    #[test]
    fn test_non_selected_cells_pass_through() {
        let cells = vec![
            cell("Wake_1", 0.0, 0.0, 1.0, 1.0),
            cell("Wake_1", 0.0, 1.0, 1.0, 2.0),
            cell("Other", 10.0, 10.0, 11.0, 11.0),
        ];
        let merged = merge_cells(&cells, "Wake", "Wake", MergeDirection::Vertical, TOL);
        assert_eq!(merged.len(), 2);
        assert!(merged.iter().any(|c| c.id == "Other"));
    }

    #[test]
    fn test_cross_group_direct_merge_keeps_master_id() {
        let cells = vec![
            cell("Turbine_1", 0.0, 0.0, 1.0, 1.0),
            cell("Wake_1", 0.0, 1.0, 1.0, 2.0),
        ];
        let merged = merge_cells(&cells, "Turbine", "Wake", MergeDirection::Vertical, TOL);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "Turbine_1");
        assert_relative_eq!(merged[0].bounds().height(), 2.0);
    }

    #[test]
    fn test_cross_group_compound_adjacency_merge() {
        // No slave matches the master's x-extent, so the direct pass stalls;
        // the two slaves sit side by side below the master, pre-merge
        // horizontally, then absorb vertically.
        let cells = vec![
            cell("Turbine_1", 0.0, 1.0, 2.0, 2.0),
            cell("Wake_1", 0.0, 0.0, 1.0, 1.0),
            cell("Wake_1", 1.0, 0.0, 2.0, 1.0),
        ];
        let merged = merge_cells(&cells, "Turbine", "Wake", MergeDirection::Vertical, TOL);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "Turbine_1");
        let b = merged[0].bounds();
        assert_relative_eq!(b.min_y, 0.0);
        assert_relative_eq!(b.max_y, 2.0);
        assert_relative_eq!(b.width(), 2.0);
    }

    #[test]
    fn test_unmergeable_geometry_degrades_gracefully() {
        let cells = vec![
            cell("Turbine_1", 0.0, 0.0, 1.0, 1.0),
            cell("Wake_1", 5.0, 5.0, 6.0, 6.0),
        ];
        let merged = merge_cells(&cells, "Turbine", "Wake", MergeDirection::Vertical, TOL);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_cross_group_chain_absorbs_in_area_order() {
        let cells = vec![
            cell("Turbine_1", 1.0, 1.0, 2.0, 2.0),
            cell("Wake_1", 1.0, 0.0, 2.0, 1.0),
            cell("Wake_1", 1.0, 2.0, 2.0, 3.0),
        ];
        let merged = merge_cells(&cells, "Turbine", "Wake", MergeDirection::Vertical, TOL);
        assert_eq!(merged.len(), 1);
        let b = merged[0].bounds();
        assert_relative_eq!(b.min_y, 0.0);
        assert_relative_eq!(b.max_y, 3.0);
    }
}
