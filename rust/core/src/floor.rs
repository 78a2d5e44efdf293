// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building levels, asset categories and vertical layout constants

use std::fmt;

/// Vertical distance between two consecutive levels in scene units
pub const STEP_HEIGHT: f64 = 30.0;

/// Constant offset added to every level's elevation
pub const VERTICAL_CORRECTION: f64 = -1.0;

/// Building level identifier
///
/// Negative values are basements, `0` is the ground/road level and positive
/// values are floors above ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FloorIndex(i32);

impl FloorIndex {
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Scene-group name for this level (`group-1`, `group0`, `group4`)
    pub fn group_name(self) -> String {
        format!("group{}", self.0)
    }

    /// Human-readable level name (`B1`, `Road`, `3F`)
    pub fn label(self) -> String {
        match self.0 {
            0 => "Road".to_string(),
            n if n < 0 => format!("B{}", -n),
            n => format!("{}F", n),
        }
    }

    /// World-space elevation of this level: `index * step_height - 1`
    #[inline]
    pub fn elevation(self, step_height: f64) -> f64 {
        self.0 as f64 * step_height + VERTICAL_CORRECTION
    }
}

impl From<i32> for FloorIndex {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for FloorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of floor-plan asset a file contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    /// Rooms, concourses and other walkable areas
    Space,
    /// Floor slab outlines
    Floor,
    /// Fixed installations (pillars, gates, stairs)
    Fixture,
}

impl AssetCategory {
    /// Extrusion depth for polygons of this category
    #[inline]
    pub const fn depth(self) -> f64 {
        match self {
            Self::Floor => 1.0,
            Self::Space | Self::Fixture => 7.0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Space => "Space",
            Self::Floor => "Floor",
            Self::Fixture => "Fixture",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
