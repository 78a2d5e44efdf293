// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coordinate normalization
//!
//! Source coordinates are expressed in a projected CRS whose values sit tens
//! of kilometres away from the origin. Subtracting a fixed offset in f64
//! keeps the scene-local values small so later f32 conversion stays precise.

use crate::geojson::Position;

/// Fixed 2D translation between source coordinates and scene coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateOffset {
    pub x: f64,
    pub y: f64,
}

impl CoordinateOffset {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for CoordinateOffset {
    fn default() -> Self {
        WORLD_ORIGIN
    }
}

/// Local projection origin of the terminal dataset
pub const WORLD_ORIGIN: CoordinateOffset = CoordinateOffset::new(-12035.29, -34261.85);

/// Translate a source position into scene-local coordinates
#[inline]
pub fn normalize(position: Position, offset: CoordinateOffset) -> Position {
    Position::new(position.x - offset.x, position.y - offset.y)
}

/// Inverse of [`normalize`]
#[inline]
pub fn denormalize(position: Position, offset: CoordinateOffset) -> Position {
    Position::new(position.x + offset.x, position.y + offset.y)
}

/// Normalize every vertex of a ring, preserving order
pub fn normalize_ring(ring: &[Position], offset: CoordinateOffset) -> Vec<Position> {
    ring.iter().map(|p| normalize(*p, offset)).collect()
}
