//! Turbine ownership tagging.

use wake_refine_core::point_in_ring;

use crate::region::{Cell, Turbine};

/// Relabels every cell whose interior contains a turbine position with that
/// turbine's identifier.
///
/// Turbines are expected in the same (de-rotated) working frame as the
/// cells. Iteration follows the input list; the first matching turbine wins
/// and later turbines cannot overwrite it. Cells matching no turbine keep
/// their wake identifier.
pub fn tag_cells(cells: &mut [Cell], turbines: &[Turbine], tol: f64) {
    for cell in cells.iter_mut() {
        for turbine in turbines {
            let (tx, ty) = turbine.position;
            if point_in_ring(tx, ty, &cell.ring, tol) {
                log::debug!("cell '{}' re-tagged as '{}'", cell.id, turbine.id);
                cell.id = turbine.id.clone();
                break;
            }
        }
    }
}
