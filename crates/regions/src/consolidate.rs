//! Cluster consolidation.
//!
//! A cluster of overlapping regions may be replaced by its union bounding box
//! when the box is not too loose relative to the summed member areas.
//! Acceptance is all-or-nothing across clusters: one loose cluster rejects
//! the whole consolidation and routes the run to the fallback subdivision.

use wake_refine_core::Aabb2;

use crate::region::{Center, WakeRegion};

/// Attempts to replace every cluster with its bounding box.
///
/// Returns `None` as soon as any cluster fails the looseness test
/// `bbox_area <= (1 + looseness) * sum_of_member_areas`. Multi-member
/// clusters are renamed `WakeRegion_<n>` in discovery order starting at 1;
/// single-member clusters keep their own identifier, so re-running the
/// pipeline on non-overlapping output leaves it unchanged.
pub fn try_consolidate(
    regions: &[WakeRegion],
    components: &[Vec<usize>],
    looseness: f64,
) -> Option<Vec<WakeRegion>> {
    let mut consolidated = Vec::with_capacity(components.len());

    for (count, component) in components.iter().enumerate() {
        let mut bbox: Option<Aabb2> = None;
        let mut sum_area = 0.0;
        let mut z_values = Vec::new();

        for &index in component {
            let region = &regions[index];
            let region_bbox = region.bbox();
            bbox = Some(match bbox {
                Some(b) => b.union(&region_bbox),
                None => region_bbox,
            });
            sum_area += region.area();
            if let Some(z) = region.center.z {
                z_values.push(z);
            }
        }

        let bbox = bbox?;
        if bbox.area() > (1.0 + looseness) * sum_area {
            log::debug!(
                "cluster {} too loose: bbox area {:.3} exceeds {:.3}",
                count + 1,
                bbox.area(),
                (1.0 + looseness) * sum_area
            );
            return None;
        }

        let id = if component.len() == 1 {
            regions[component[0]].id.clone()
        } else {
            format!("WakeRegion_{}", count + 1)
        };

        // Consolidated centers are always 3D for downstream writers: mean
        // elevation of the members that carry one, 0 otherwise.
        let (cx, cy) = bbox.center();
        let center = Center {
            x: cx,
            y: cy,
            z: if z_values.is_empty() {
                Some(0.0)
            } else {
                Some(z_values.iter().sum::<f64>() / z_values.len() as f64)
            },
        };

        consolidated.push(WakeRegion {
            id,
            ring: bbox.to_ring(),
            center,
        });
    }

    Some(consolidated)
}
