//! Wake regions, turbines, and candidate cells.
//!
//! Rings are implicitly closed (the first point is not repeated at the end)
//! and are expected to be simple polygons; simplicity is assumed from
//! upstream authoring, not validated here.

use geo::{Centroid, Coord, LineString, Polygon as GeoPolygon};
use wake_refine_core::{ring_area, ring_bbox, rotate_point, rotate_ring, Aabb2, Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a region or turbine.
pub type RegionId = String;

/// Center point of a region.
///
/// The z coordinate is carried through the pipeline unchanged (averaged
/// during consolidation, never recomputed geometrically) and is absent for
/// purely planar inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Center {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Center {
    /// Creates a planar center.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Creates a center with an elevation.
    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Rotates the planar part about the origin; z is untouched.
    pub fn rotated(&self, angle: f64) -> Self {
        let (x, y) = rotate_point((self.x, self.y), angle);
        Self { x, y, z: self.z }
    }
}

/// A user-authored wake region: a named polygon marking an area downstream
/// of a turbine that needs finer mesh resolution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WakeRegion {
    /// Region identifier.
    pub id: RegionId,

    /// Polygon boundary, implicitly closed.
    pub ring: Vec<(f64, f64)>,

    /// Region center.
    pub center: Center,
}

impl WakeRegion {
    /// Creates a region from a ring. The center defaults to the polygon
    /// centroid (origin for degenerate rings).
    pub fn new(id: impl Into<RegionId>, ring: Vec<(f64, f64)>) -> Self {
        let center = GeoPolygon::new(
            LineString::from(ring.iter().map(|&(x, y)| Coord { x, y }).collect::<Vec<_>>()),
            vec![],
        )
        .centroid()
        .map(|c| Center::new(c.x(), c.y()))
        .unwrap_or(Center::new(0.0, 0.0));

        Self {
            id: id.into(),
            ring,
            center,
        }
    }

    /// Creates an axis-aligned rectangular region.
    pub fn rectangle(id: impl Into<RegionId>, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(id, Aabb2::new(min_x, min_y, max_x, max_y).to_ring())
    }

    /// Replaces the center.
    pub fn with_center(mut self, center: Center) -> Self {
        self.center = center;
        self
    }

    /// Polygon area (shoelace).
    pub fn area(&self) -> f64 {
        ring_area(&self.ring)
    }

    /// Axis-aligned bounding box.
    pub fn bbox(&self) -> Aabb2 {
        ring_bbox(&self.ring)
    }

    /// Checks the shape invariant.
    pub fn validate(&self) -> Result<()> {
        if self.ring.len() < 3 {
            return Err(Error::InvalidGeometry(format!(
                "wake region '{}' must have at least 3 vertices",
                self.id
            )));
        }
        Ok(())
    }

    /// Returns a copy rotated about the origin by `angle` radians, ring and
    /// center both.
    pub fn rotated(&self, angle: f64) -> Self {
        Self {
            id: self.id.clone(),
            ring: rotate_ring(&self.ring, angle),
            center: self.center.rotated(angle),
        }
    }

    /// Converts the boundary to a `geo` polygon (no holes).
    pub fn to_geo(&self) -> GeoPolygon<f64> {
        GeoPolygon::new(
            LineString::from(
                self.ring
                    .iter()
                    .map(|&(x, y)| Coord { x, y })
                    .collect::<Vec<_>>(),
            ),
            vec![],
        )
    }

    /// Builds a region from a `geo` polygon exterior.
    pub fn from_geo(id: impl Into<RegionId>, polygon: &GeoPolygon<f64>) -> Self {
        let mut ring: Vec<(f64, f64)> = polygon.exterior().coords().map(|c| (c.x, c.y)).collect();
        // geo rings repeat the first coordinate at the end; ours close implicitly.
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        Self::new(id, ring)
    }
}

/// A wind turbine. Only the base position participates in geometry; the
/// physical attributes are carried for downstream consumers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Turbine {
    /// Turbine identifier.
    pub id: RegionId,

    /// Base position (x, y).
    pub position: (f64, f64),

    /// Turbine model name.
    pub turbine_type: String,

    /// Hub height above ground.
    pub hub_height: f64,

    /// Rotor radius.
    pub rotor_radius: f64,

    /// Design tip-speed ratio.
    pub tip_speed_ratio: f64,

    /// Radius of the actuator search sphere.
    pub sphere_radius: f64,
}

impl Turbine {
    /// Creates a turbine at a position with zeroed physical attributes.
    pub fn new(id: impl Into<RegionId>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            position: (x, y),
            turbine_type: String::new(),
            hub_height: 0.0,
            rotor_radius: 0.0,
            tip_speed_ratio: 0.0,
            sphere_radius: 0.0,
        }
    }

    /// Sets the turbine model name.
    pub fn with_turbine_type(mut self, turbine_type: impl Into<String>) -> Self {
        self.turbine_type = turbine_type.into();
        self
    }

    /// Sets the hub height.
    pub fn with_hub_height(mut self, hub_height: f64) -> Self {
        self.hub_height = hub_height;
        self
    }

    /// Sets the rotor radius.
    pub fn with_rotor_radius(mut self, rotor_radius: f64) -> Self {
        self.rotor_radius = rotor_radius;
        self
    }

    /// Sets the tip-speed ratio.
    pub fn with_tip_speed_ratio(mut self, tip_speed_ratio: f64) -> Self {
        self.tip_speed_ratio = tip_speed_ratio;
        self
    }

    /// Sets the actuator sphere radius.
    pub fn with_sphere_radius(mut self, sphere_radius: f64) -> Self {
        self.sphere_radius = sphere_radius;
        self
    }

    /// Returns a copy with the position rotated about the origin.
    pub fn rotated(&self, angle: f64) -> Self {
        Self {
            position: rotate_point(self.position, angle),
            ..self.clone()
        }
    }
}

/// A candidate cell in the fallback subdivision: a named axis-aligned
/// rectangle, or an isolated region passed through unchanged.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    /// Inherited from the source region, possibly overwritten by a turbine id.
    pub id: RegionId,

    /// Cell boundary, implicitly closed.
    pub ring: Vec<(f64, f64)>,

    /// Cell center.
    pub center: Center,
}

impl Cell {
    /// Creates a rectangular cell from bounds, counter-clockwise from the
    /// minimum corner, centered at the box midpoint.
    pub fn from_bounds(id: impl Into<RegionId>, bounds: Aabb2) -> Self {
        let (cx, cy) = bounds.center();
        Self {
            id: id.into(),
            ring: bounds.to_ring(),
            center: Center::new(cx, cy),
        }
    }

    /// Wraps a region as a pass-through cell.
    pub fn from_region(region: &WakeRegion) -> Self {
        Self {
            id: region.id.clone(),
            ring: region.ring.clone(),
            center: region.center,
        }
    }

    /// Converts back into a named region.
    pub fn into_region(self) -> WakeRegion {
        WakeRegion {
            id: self.id,
            ring: self.ring,
            center: self.center,
        }
    }

    /// Bounding box over the cell's vertices.
    pub fn bounds(&self) -> Aabb2 {
        ring_bbox(&self.ring)
    }

    /// Cell area (shoelace).
    pub fn area(&self) -> f64 {
        ring_area(&self.ring)
    }
}
