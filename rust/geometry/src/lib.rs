// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GeoFloor Geometry Processing
//!
//! Turns floor-plan outlines into renderable geometry: shape paths are
//! flattened into profiles, triangulated with earcutr, extruded into
//! flat-capped prisms and reduced to their feature edges for wireframe
//! display. Transformations use nalgebra.

pub mod edges;
pub mod error;
pub mod extrusion;
pub mod mesh;
pub mod profile;
pub mod shape;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point2, Point3, Vector2, Vector3};

pub use edges::{EdgesGeometry, DEFAULT_THRESHOLD_ANGLE};
pub use error::{Error, Result};
pub use extrusion::{apply_transform, extrude_profile, extrude_shape, ExtrudeOptions};
pub use mesh::Mesh;
pub use profile::Profile2D;
pub use shape::{shape_from_ring, ShapePath};
pub use triangulation::triangulate_polygon;
