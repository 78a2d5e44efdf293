// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shape paths built with move-to / line-to / close commands
//!
//! A path is a list of straight segments plus a cursor. `move_to` only moves
//! the cursor; `line_to` appends a segment from the cursor; `close_path`
//! appends a segment back to the first point when the path is open.
//! [`ShapePath::extract_points`] flattens the segments into an outline,
//! dropping consecutive duplicates and the closing duplicate.

use crate::error::{Error, Result};
use crate::profile::Profile2D;
use geofloor_core::Position;
use nalgebra::Point2;

/// Straight path segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct ShapePath {
    segments: Vec<Segment>,
    cursor: Option<Point2<f64>>,
}

impl ShapePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.cursor = Some(Point2::new(x, y));
        self
    }

    /// Append a segment from the cursor; the first call without a prior
    /// `move_to` starts at the origin
    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        let start = self.cursor.unwrap_or_else(Point2::origin);
        let end = Point2::new(x, y);
        self.segments.push(Segment { start, end });
        self.cursor = Some(end);
        self
    }

    pub fn close_path(&mut self) -> &mut Self {
        if let (Some(start), Some(end)) = (self.start_point(), self.end_point()) {
            if start != end {
                self.segments.push(Segment { start: end, end: start });
                self.cursor = Some(start);
            }
        }
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn start_point(&self) -> Option<Point2<f64>> {
        self.segments.first().map(|s| s.start)
    }

    pub fn end_point(&self) -> Option<Point2<f64>> {
        self.segments.last().map(|s| s.end)
    }

    pub fn is_closed(&self) -> bool {
        matches!((self.start_point(), self.end_point()), (Some(s), Some(e)) if s == e)
    }

    /// Outline vertices without consecutive or closing duplicates
    pub fn extract_points(&self) -> Vec<Point2<f64>> {
        let mut points: Vec<Point2<f64>> = Vec::with_capacity(self.segments.len() + 1);
        for segment in &self.segments {
            for p in [segment.start, segment.end] {
                if points.last() != Some(&p) {
                    points.push(p);
                }
            }
        }

        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        points
    }

    /// Flatten into an extrudable profile
    pub fn to_profile(&self) -> Result<Profile2D> {
        let points = self.extract_points();
        if points.len() < 3 {
            return Err(Error::InvalidProfile(format!(
                "Shape needs at least 3 distinct vertices, got {}",
                points.len()
            )));
        }
        Ok(Profile2D::new(points))
    }
}

/// Build a closed shape from an already normalized ring
///
/// Moves to the first vertex, draws a line to every following vertex and
/// closes the path. Interior rings are not consumed.
pub fn shape_from_ring(ring: &[Position]) -> Result<ShapePath> {
    let Some((first, rest)) = ring.split_first() else {
        return Err(Error::InvalidProfile("Ring has no vertices".to_string()));
    };

    let mut shape = ShapePath::new();
    shape.move_to(first.x, first.y);
    for p in rest {
        shape.line_to(p.x, p.y);
    }
    shape.close_path();

    if shape.segments().is_empty() {
        return Err(Error::InvalidProfile(
            "Ring has a single vertex".to_string(),
        ));
    }
    Ok(shape)
}
