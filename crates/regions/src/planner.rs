//! Region planning orchestrator.

use std::collections::HashMap;

use wake_refine_core::{Config, Result};

use crate::consolidate::try_consolidate;
use crate::merge::merge_cells;
use crate::overlap::OverlapGraph;
use crate::region::{Cell, Turbine, WakeRegion};
use crate::subdivide::subdivide;
use crate::tag::tag_cells;

/// Resolves user-authored wake regions into a consistent, uniquely-named set
/// of axis-aligned refinement regions.
///
/// The planner de-rotates all geometry into the axis-aligned working frame,
/// tries cluster consolidation first, and falls back to grid subdivision,
/// turbine tagging, and rectangle merging when any cluster is too loose to
/// consolidate. Results are rotated back to the original frame. Each run is
/// pure with respect to its inputs.
#[derive(Debug, Clone)]
pub struct RegionPlanner {
    config: Config,
}

impl RegionPlanner {
    /// Creates a planner with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The planner's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the pipeline over the given regions and turbines.
    ///
    /// Returns the resolved regions in the original coordinate frame, or an
    /// error if any input region violates the shape invariant.
    pub fn plan(&self, regions: &[WakeRegion], turbines: &[Turbine]) -> Result<Vec<WakeRegion>> {
        for region in regions {
            region.validate()?;
        }
        if regions.is_empty() {
            return Ok(Vec::new());
        }

        let theta = -self.config.rotation_angle_rad;
        let working: Vec<WakeRegion> = regions.iter().map(|r| r.rotated(theta)).collect();

        let graph = OverlapGraph::build(&working, self.config.coincidence_tol);
        let components = graph.components();
        log::debug!(
            "{} regions form {} overlap clusters",
            working.len(),
            components.len()
        );

        if let Some(consolidated) =
            try_consolidate(&working, &components, self.config.area_looseness)
        {
            log::debug!("all clusters consolidated into bounding boxes");
            return Ok(self.finish(consolidated));
        }

        log::debug!("consolidation rejected, running grid subdivision fallback");
        let mut cells = subdivide(
            &working,
            &graph,
            self.config.coincidence_tol,
            self.config.cell_overlap_tol,
        );

        let working_turbines: Vec<Turbine> = turbines.iter().map(|t| t.rotated(theta)).collect();
        tag_cells(&mut cells, &working_turbines, self.config.coincidence_tol);

        let merged = merge_cells(
            &cells,
            &self.config.turbine_prefix,
            &self.config.wake_prefix,
            self.config.merge_direction,
            self.config.coincidence_tol,
        );

        Ok(self.finish(merged.into_iter().map(Cell::into_region).collect()))
    }

    /// Rotates results back to the original frame and uniquifies identifiers.
    fn finish(&self, regions: Vec<WakeRegion>) -> Vec<WakeRegion> {
        let angle = self.config.rotation_angle_rad;
        let mut restored: Vec<WakeRegion> = regions.iter().map(|r| r.rotated(angle)).collect();
        uniquify_ids(&mut restored);
        restored
    }
}

/// The downstream solver requires disjoint, uniquely-named cell sets;
/// duplicate identifiers (several cells inheriting one wake id) get an
/// ordinal suffix, first occurrence keeping the plain name.
fn uniquify_ids(regions: &mut [WakeRegion]) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for region in regions.iter_mut() {
        let count = seen.entry(region.id.clone()).or_insert(0);
        *count += 1;
        if *count > 1 {
            region.id = format!("{}_{}", region.id, *count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_empty_output() {
        let planner = RegionPlanner::new(Config::default());
        let result = planner.plan(&[], &[]).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_degenerate_region_is_rejected() {
        let planner = RegionPlanner::new(Config::default());
        let bad = WakeRegion::new("bad", vec![(0.0, 0.0), (1.0, 1.0)]);
        assert!(planner.plan(&[bad], &[]).is_err());
    }

    #[test]
    fn test_uniquify_ids() {
        let mut regions = vec![
            WakeRegion::rectangle("Wake_A", 0.0, 0.0, 1.0, 1.0),
            WakeRegion::rectangle("Wake_A", 2.0, 0.0, 3.0, 1.0),
            WakeRegion::rectangle("Wake_B", 4.0, 0.0, 5.0, 1.0),
            WakeRegion::rectangle("Wake_A", 6.0, 0.0, 7.0, 1.0),
        ];
        uniquify_ids(&mut regions);
        let ids: Vec<&str> = regions.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["Wake_A", "Wake_A_2", "Wake_B", "Wake_A_3"]);
    }
}
