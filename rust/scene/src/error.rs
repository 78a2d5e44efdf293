// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use geofloor_core::FloorIndex;
use thiserror::Error;

/// Result type for scene operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or editing the scene
#[derive(Error, Debug)]
pub enum Error {
    #[error("Group already exists: {0}")]
    DuplicateGroup(String),

    #[error("Unknown group id {0}")]
    UnknownGroup(usize),

    #[error("No floor group registered for level {0}")]
    UnknownFloor(FloorIndex),

    #[error("No checkbox labeled {0:?}")]
    UnknownLabel(String),

    #[error("Geometry error: {0}")]
    Geometry(#[from] geofloor_geometry::Error),
}
