// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion operations - converting 2D profiles to 3D meshes

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::profile::{Profile2D, Triangulation};
use crate::shape::ShapePath;
use nalgebra::{Matrix4, Point2, Point3, Vector3};

/// Extrusion settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudeOptions {
    /// Distance along +Z between bottom and top cap
    pub depth: f64,
    /// Number of bands the side walls are split into
    pub steps: u32,
    /// Bevelled caps are not supported and rejected
    pub bevel_enabled: bool,
}

impl ExtrudeOptions {
    /// Flat-capped prism with the given depth and two side bands
    pub fn new(depth: f64) -> Self {
        Self {
            depth,
            steps: 2,
            bevel_enabled: false,
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.depth.is_finite() || self.depth <= 0.0 {
            return Err(Error::InvalidExtrusion(format!(
                "Depth must be positive, got {}",
                self.depth
            )));
        }
        if self.steps == 0 {
            return Err(Error::InvalidExtrusion(
                "Steps must be at least 1".to_string(),
            ));
        }
        if self.bevel_enabled {
            return Err(Error::InvalidExtrusion(
                "Bevelled extrusion is not supported".to_string(),
            ));
        }
        Ok(())
    }
}

/// Extrude a shape path along the Z axis
pub fn extrude_shape(shape: &ShapePath, options: &ExtrudeOptions) -> Result<Mesh> {
    let profile = shape.to_profile()?;
    extrude_profile(&profile, options)
}

/// Extrude a 2D profile along the Z axis
#[inline]
pub fn extrude_profile(profile: &Profile2D, options: &ExtrudeOptions) -> Result<Mesh> {
    options.validate()?;

    let mut profile = profile.clone();
    profile.ensure_counter_clockwise();
    if profile.signed_area().abs() < 1e-12 {
        return Err(Error::InvalidProfile(
            "Profile has zero area".to_string(),
        ));
    }

    let triangulation = profile.triangulate()?;

    let n = profile.outer.len();
    let steps = options.steps as usize;
    let cap_vertex_count = triangulation.points.len() * 2;
    let side_vertex_count = n * steps * 4;
    let mut mesh = Mesh::with_capacity(
        cap_vertex_count + side_vertex_count,
        triangulation.indices.len() * 2 + n * steps * 6,
    );

    create_cap_mesh(&triangulation, 0.0, Vector3::new(0.0, 0.0, -1.0), &mut mesh);
    create_cap_mesh(
        &triangulation,
        options.depth,
        Vector3::new(0.0, 0.0, 1.0),
        &mut mesh,
    );

    create_side_walls(&profile.outer, options.depth, options.steps, &mut mesh);

    Ok(mesh)
}

/// Create a cap mesh (top or bottom) from triangulation
#[inline]
fn create_cap_mesh(triangulation: &Triangulation, z: f64, normal: Vector3<f64>, mesh: &mut Mesh) {
    let base_index = mesh.vertex_count() as u32;

    for point in &triangulation.points {
        mesh.add_vertex(Point3::new(point.x, point.y, z), normal);
    }

    for tri in triangulation.indices.chunks_exact(3) {
        let i0 = base_index + tri[0] as u32;
        let i1 = base_index + tri[1] as u32;
        let i2 = base_index + tri[2] as u32;

        // Reverse winding for bottom cap
        if normal.z < 0.0 {
            mesh.add_triangle(i0, i2, i1);
        } else {
            mesh.add_triangle(i0, i1, i2);
        }
    }
}

/// Create side walls for a counter-clockwise boundary, split into `steps` bands
#[inline]
fn create_side_walls(boundary: &[Point2<f64>], depth: f64, steps: u32, mesh: &mut Mesh) {
    let band = depth / steps as f64;

    for i in 0..boundary.len() {
        let j = (i + 1) % boundary.len();

        let p0 = &boundary[i];
        let p1 = &boundary[j];

        // Outward normal for a counter-clockwise outline
        let edge = Vector3::new(p1.x - p0.x, p1.y - p0.y, 0.0);
        let normal = match Vector3::new(edge.y, -edge.x, 0.0).try_normalize(1e-10) {
            Some(n) => n,
            None => continue, // Skip degenerate edge (duplicate points in profile)
        };

        for step in 0..steps {
            let z0 = band * step as f64;
            let z1 = if step + 1 == steps {
                depth
            } else {
                band * (step + 1) as f64
            };

            let idx = mesh.vertex_count() as u32;
            mesh.add_vertex(Point3::new(p0.x, p0.y, z0), normal);
            mesh.add_vertex(Point3::new(p1.x, p1.y, z0), normal);
            mesh.add_vertex(Point3::new(p1.x, p1.y, z1), normal);
            mesh.add_vertex(Point3::new(p0.x, p0.y, z1), normal);

            mesh.add_triangle(idx, idx + 1, idx + 2);
            mesh.add_triangle(idx, idx + 2, idx + 3);
        }
    }
}

/// Apply transformation matrix to mesh
#[inline]
pub fn apply_transform(mesh: &mut Mesh, transform: &Matrix4<f64>) {
    mesh.positions.chunks_exact_mut(3).for_each(|chunk| {
        let point = Point3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let transformed = transform.transform_point(&point);
        chunk[0] = transformed.x as f32;
        chunk[1] = transformed.y as f32;
        chunk[2] = transformed.z as f32;
    });

    // Transform normals (use inverse transpose for correct normal transformation)
    let normal_matrix = transform.try_inverse().unwrap_or(*transform).transpose();

    mesh.normals.chunks_exact_mut(3).for_each(|chunk| {
        let normal = Vector3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let transformed = (normal_matrix * normal.to_homogeneous()).xyz().normalize();
        chunk[0] = transformed.x as f32;
        chunk[1] = transformed.y as f32;
        chunk[2] = transformed.z as f32;
    });
}
