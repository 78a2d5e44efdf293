// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Feature-edge extraction for wireframe display
//!
//! An edge of a triangle mesh is kept when it borders a single triangle or
//! when the normals of its two triangles differ by more than a threshold
//! angle. Vertices are matched on positions rounded to 4 decimal places, so
//! meshes with per-face (unshared) vertices work the same as indexed ones.

use crate::mesh::Mesh;
use nalgebra::{Point3, Vector3};
use rustc_hash::FxHashMap;

/// Default crease angle in degrees
pub const DEFAULT_THRESHOLD_ANGLE: f64 = 1.0;

const PRECISION: f64 = 1e4;

type VertexKey = [i64; 3];

#[inline]
fn vertex_key(p: &Point3<f64>) -> VertexKey {
    [
        (p.x * PRECISION).round() as i64,
        (p.y * PRECISION).round() as i64,
        (p.z * PRECISION).round() as i64,
    ]
}

/// Half-edge waiting for its twin
#[derive(Debug, Clone, Copy)]
struct OpenEdge {
    start: usize,
    end: usize,
    normal: Vector3<f64>,
}

/// Line-segment geometry: every pair of consecutive vertices is one segment
#[derive(Debug, Clone, Default)]
pub struct EdgesGeometry {
    /// Segment endpoints (x, y, z), two vertices per segment
    pub positions: Vec<f32>,
}

impl EdgesGeometry {
    /// Extract feature edges of `mesh` using a crease angle in degrees
    pub fn from_mesh(mesh: &Mesh, threshold_deg: f64) -> Self {
        let threshold_dot = threshold_deg.to_radians().cos();

        let mut edges = EdgesGeometry::default();
        let mut index: FxHashMap<(VertexKey, VertexKey), usize> = FxHashMap::default();
        // Slots stay in first-seen order; a matched edge leaves `None` behind
        let mut open: Vec<Option<OpenEdge>> = Vec::new();

        for tri in mesh.triangles() {
            let points = tri.map(|i| mesh.position(i));
            let keys = points.map(|p| vertex_key(&p));

            // Collapsed after rounding
            if keys[0] == keys[1] || keys[1] == keys[2] || keys[2] == keys[0] {
                continue;
            }

            let normal = match (points[1] - points[0])
                .cross(&(points[2] - points[0]))
                .try_normalize(1e-12)
            {
                Some(n) => n,
                None => continue,
            };

            for j in 0..3 {
                let next = (j + 1) % 3;
                let key = (keys[j], keys[next]);
                let reverse = (keys[next], keys[j]);

                if let Some(twin) = index.get(&reverse).and_then(|&slot| open[slot].take()) {
                    if normal.dot(&twin.normal) <= threshold_dot {
                        edges.push_segment(&points[j], &points[next]);
                    }
                } else if !index.contains_key(&key) {
                    index.insert(key, open.len());
                    open.push(Some(OpenEdge {
                        start: tri[j],
                        end: tri[next],
                        normal,
                    }));
                }
            }
        }

        for edge in open.into_iter().flatten() {
            edges.push_segment(&mesh.position(edge.start), &mesh.position(edge.end));
        }

        edges
    }

    #[inline]
    fn push_segment(&mut self, a: &Point3<f64>, b: &Point3<f64>) {
        self.positions
            .extend_from_slice(&[a.x as f32, a.y as f32, a.z as f32]);
        self.positions
            .extend_from_slice(&[b.x as f32, b.y as f32, b.z as f32]);
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.positions.len() / 6
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate segments as endpoint pairs
    pub fn segments(&self) -> impl Iterator<Item = (Point3<f64>, Point3<f64>)> + '_ {
        self.positions.chunks_exact(6).map(|c| {
            (
                Point3::new(c[0] as f64, c[1] as f64, c[2] as f64),
                Point3::new(c[3] as f64, c[4] as f64, c[5] as f64),
            )
        })
    }

    /// Calculate bounds (min, max)
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);
        for c in self.positions.chunks_exact(3) {
            for axis in 0..3 {
                min[axis] = min[axis].min(c[axis]);
                max[axis] = max[axis].max(c[axis]);
            }
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extrusion::{extrude_profile, ExtrudeOptions};
    use crate::profile::{create_rectangle, Profile2D};
    use approx::assert_relative_eq;
    use nalgebra::Point2;

    fn triangle_prism(depth: f64) -> Mesh {
        let profile = Profile2D::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 3.0),
        ]);
        extrude_profile(&profile, &ExtrudeOptions::new(depth)).unwrap()
    }

    #[test]
    fn test_single_triangle_keeps_all_edges() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0), Vector3::z());
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::z());
        mesh.add_vertex(Point3::new(0.0, 1.0, 0.0), Vector3::z());
        mesh.add_triangle(0, 1, 2);

        let edges = EdgesGeometry::from_mesh(&mesh, DEFAULT_THRESHOLD_ANGLE);
        assert_eq!(edges.segment_count(), 3);
    }

    #[test]
    fn test_coplanar_diagonal_dropped() {
        let mut mesh = Mesh::new();
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            mesh.add_vertex(Point3::new(x, y, 0.0), Vector3::z());
        }
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);

        let edges = EdgesGeometry::from_mesh(&mesh, DEFAULT_THRESHOLD_ANGLE);
        assert_eq!(edges.segment_count(), 4);
    }

    #[test]
    fn test_triangle_prism_outline() {
        // 3 bottom + 3 top + 3 vertical edges, each vertical split by the
        // two side bands
        let edges = EdgesGeometry::from_mesh(&triangle_prism(1.0), DEFAULT_THRESHOLD_ANGLE);
        assert_eq!(edges.segment_count(), 12);

        let (min, max) = edges.bounds();
        assert_relative_eq!(min.z, 0.0);
        assert_relative_eq!(max.z, 1.0);
        assert_relative_eq!(max.x, 4.0);
        assert_relative_eq!(max.y, 3.0);
    }

    #[test]
    fn test_rectangle_prism_outline() {
        let mesh = extrude_profile(&create_rectangle(10.0, 4.0), &ExtrudeOptions::new(7.0))
            .unwrap();
        let edges = EdgesGeometry::from_mesh(&mesh, DEFAULT_THRESHOLD_ANGLE);
        assert_eq!(edges.segment_count(), 16);

        for (a, b) in edges.segments() {
            assert!((b - a).norm() > 0.0);
        }
    }

    #[test]
    fn test_threshold_hides_shallow_creases() {
        // Caps meet the walls at 90 degrees; wall normals meet at dot
        // -0.8, -0.6 and 0. A 120 degree threshold keeps only the two
        // vertical edges with dot <= -0.5, each split by the side bands
        let edges = EdgesGeometry::from_mesh(&triangle_prism(1.0), 120.0);
        assert_eq!(edges.segment_count(), 4);
    }

    #[test]
    fn test_empty_mesh() {
        let edges = EdgesGeometry::from_mesh(&Mesh::new(), DEFAULT_THRESHOLD_ANGLE);
        assert!(edges.is_empty());
        assert_eq!(edges.segment_count(), 0);
    }
}
