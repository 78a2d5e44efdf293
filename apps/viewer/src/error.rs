// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the viewer.

use thiserror::Error;

/// Viewer error types.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed GeoJSON: {0}")]
    Parse(String),

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Scene error: {0}")]
    Scene(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, ViewerError>;

impl From<geofloor_core::Error> for ViewerError {
    fn from(err: geofloor_core::Error) -> Self {
        ViewerError::Parse(err.to_string())
    }
}

impl From<geofloor_geometry::Error> for ViewerError {
    fn from(err: geofloor_geometry::Error) -> Self {
        ViewerError::Geometry(err.to_string())
    }
}

impl From<geofloor_scene::Error> for ViewerError {
    fn from(err: geofloor_scene::Error) -> Self {
        ViewerError::Scene(err.to_string())
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(err: serde_json::Error) -> Self {
        ViewerError::Parse(err.to_string())
    }
}
