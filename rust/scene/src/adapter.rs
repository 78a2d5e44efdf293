// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Feature-to-mesh adapter
//!
//! Extruded solids are built in plan space with the extrusion along +Z. The
//! adapter turns them upright (+Z to world +Y), reduces them to edges and
//! lifts the result to the elevation of its level.

use geofloor_core::{
    normalize_ring, AssetName, CoordinateOffset, Feature, FloorIndex, STEP_HEIGHT,
};
use geofloor_geometry::{
    apply_transform, extrude_shape, shape_from_ring, EdgesGeometry, ExtrudeOptions, Mesh,
    DEFAULT_THRESHOLD_ANGLE,
};
use nalgebra::{Matrix4, Rotation3, Vector3};

use crate::error::Result;
use crate::graph::LineSegments;

/// Rotation taking the extrusion axis (+Z) to world up (+Y)
pub fn upright_transform() -> Matrix4<f64> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), -std::f64::consts::FRAC_PI_2).to_homogeneous()
}

/// Wrap an extruded solid into a named wireframe object for `floor`
///
/// The object is not attached to any group.
pub fn build_floor_mesh(
    solid: &Mesh,
    name: &str,
    floor: FloorIndex,
    step_height: f64,
) -> LineSegments {
    let mut upright = solid.clone();
    apply_transform(&mut upright, &upright_transform());

    let edges = EdgesGeometry::from_mesh(&upright, DEFAULT_THRESHOLD_ANGLE);
    let mut object = LineSegments::new(name, edges);
    object.position = Vector3::new(0.0, floor.elevation(step_height), 0.0);
    object
}

/// Turns features of one asset file into wireframe objects
#[derive(Debug, Clone, Copy)]
pub struct FeatureAdapter {
    asset: AssetName,
    offset: CoordinateOffset,
    options: ExtrudeOptions,
    step_height: f64,
}

impl FeatureAdapter {
    pub fn new(asset: AssetName, offset: CoordinateOffset) -> Self {
        Self {
            asset,
            offset,
            options: ExtrudeOptions::new(asset.category.depth()),
            step_height: STEP_HEIGHT,
        }
    }

    pub fn with_step_height(mut self, step_height: f64) -> Self {
        self.step_height = step_height;
        self
    }

    #[inline]
    pub fn floor(&self) -> FloorIndex {
        self.asset.floor
    }

    pub fn options(&self) -> &ExtrudeOptions {
        &self.options
    }

    /// One object per polygon part; fails if any part cannot be extruded
    pub fn adapt(&self, feature: &Feature) -> Result<Vec<LineSegments>> {
        feature
            .outer_rings()
            .into_iter()
            .map(|ring| -> Result<LineSegments> {
                let local = normalize_ring(ring, self.offset);
                let shape = shape_from_ring(&local)?;
                let solid = extrude_shape(&shape, &self.options)?;
                Ok(build_floor_mesh(
                    &solid,
                    feature.display_name(),
                    self.asset.floor,
                    self.step_height,
                ))
            })
            .collect()
    }
}
