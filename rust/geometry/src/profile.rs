// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D profile definitions and triangulation

use crate::error::{Error, Result};
use crate::triangulation::triangulate_polygon;
use nalgebra::Point2;

/// Closed 2D outline ready for extrusion
///
/// The outline is stored without a closing duplicate vertex.
#[derive(Debug, Clone)]
pub struct Profile2D {
    /// Outer boundary
    pub outer: Vec<Point2<f64>>,
}

impl Profile2D {
    /// Create a new profile
    pub fn new(outer: Vec<Point2<f64>>) -> Self {
        Self { outer }
    }

    /// Signed area (shoelace); positive for counter-clockwise outlines
    pub fn signed_area(&self) -> f64 {
        let n = self.outer.len();
        if n < 3 {
            return 0.0;
        }

        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += self.outer[i].x * self.outer[j].y;
            area -= self.outer[j].x * self.outer[i].y;
        }
        area / 2.0
    }

    #[inline]
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// Reverse the outline if it winds clockwise
    pub fn ensure_counter_clockwise(&mut self) {
        if self.is_clockwise() {
            self.outer.reverse();
        }
    }

    /// Axis-aligned bounds (min, max)
    pub fn bounds(&self) -> (Point2<f64>, Point2<f64>) {
        self.outer.iter().fold(
            (
                Point2::new(f64::MAX, f64::MAX),
                Point2::new(f64::MIN, f64::MIN),
            ),
            |(min, max), p| {
                (
                    Point2::new(min.x.min(p.x), min.y.min(p.y)),
                    Point2::new(max.x.max(p.x), max.y.max(p.y)),
                )
            },
        )
    }

    /// Triangulate the profile
    /// Returns triangle indices into `outer`
    pub fn triangulate(&self) -> Result<Triangulation> {
        if self.outer.len() < 3 {
            return Err(Error::InvalidProfile(
                "Profile must have at least 3 vertices".to_string(),
            ));
        }

        let indices = triangulate_polygon(&self.outer)?;
        if indices.is_empty() {
            return Err(Error::TriangulationError(
                "Profile produced no triangles".to_string(),
            ));
        }

        Ok(Triangulation {
            points: self.outer.clone(),
            indices,
        })
    }
}

/// Triangulated profile result
#[derive(Debug, Clone)]
pub struct Triangulation {
    /// Outline vertices
    pub points: Vec<Point2<f64>>,
    /// Triangle indices
    pub indices: Vec<usize>,
}

/// Create a rectangular profile centered on the origin
#[cfg(test)]
pub(crate) fn create_rectangle(width: f64, height: f64) -> Profile2D {
    let half_w = width / 2.0;
    let half_h = height / 2.0;

    Profile2D::new(vec![
        Point2::new(-half_w, -half_h),
        Point2::new(half_w, -half_h),
        Point2::new(half_w, half_h),
        Point2::new(-half_w, half_h),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_profile() {
        let profile = create_rectangle(10.0, 5.0);
        assert_eq!(profile.outer.len(), 4);
        assert_eq!(profile.outer[0], Point2::new(-5.0, -2.5));
        assert_eq!(profile.outer[2], Point2::new(5.0, 2.5));
        assert!((profile.signed_area() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_winding() {
        let mut profile = Profile2D::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
        ]);
        assert!(profile.is_clockwise());
        profile.ensure_counter_clockwise();
        assert!(!profile.is_clockwise());
        assert!((profile.signed_area() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_triangulate_rectangle() {
        let profile = create_rectangle(10.0, 5.0);
        let tri = profile.triangulate().unwrap();

        assert_eq!(tri.points.len(), 4);
        assert_eq!(tri.indices.len(), 6); // 2 triangles = 6 indices
    }

    #[test]
    fn test_triangulate_l_shape() {
        let profile = Profile2D::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 4.0),
            Point2::new(0.0, 4.0),
        ]);
        let tri = profile.triangulate().unwrap();
        assert_eq!(tri.indices.len(), (6 - 2) * 3);
    }

    #[test]
    fn test_triangulate_too_few_points() {
        let profile = Profile2D::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]);
        assert!(profile.triangulate().is_err());
    }

    #[test]
    fn test_bounds() {
        let (min, max) = create_rectangle(2.0, 4.0).bounds();
        assert_eq!(min, Point2::new(-1.0, -2.0));
        assert_eq!(max, Point2::new(1.0, 2.0));
    }
}
