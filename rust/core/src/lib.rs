// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # GeoFloor Core
//!
//! Input-side model for the floor-plan viewer:
//!
//! - **GeoJSON model**: the subset of a `FeatureCollection` the viewer reads
//!   (polygon coordinates and `properties.name`)
//! - **Asset filenames**: a [nom](https://docs.rs/nom) grammar that extracts the
//!   building level and asset category from names such as
//!   `ShinjukuTerminal_B1out_Space.geojson`
//! - **Floors**: floor indices, asset categories and the vertical layout constants
//! - **Normalization**: translation of raw projected coordinates into a
//!   scene-local frame centered near the origin
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use geofloor_core::{parse_asset_filename, FeatureCollection, normalize, WORLD_ORIGIN};
//!
//! let asset = parse_asset_filename("ShinjukuTerminal_2_Floor.geojson").unwrap();
//! assert_eq!(asset.floor.value(), 2);
//!
//! let collection = FeatureCollection::from_json(&text)?;
//! for feature in collection.polygon_features() {
//!     let ring = feature.outer_rings()[0];
//!     let local = normalize(ring[0], WORLD_ORIGIN);
//! }
//! ```

pub mod error;
pub mod filename;
pub mod floor;
pub mod geojson;
pub mod normalize;

pub use error::{Error, Result};
pub use filename::{parse_asset_filename, AssetName, ASSET_PREFIX};
pub use floor::{AssetCategory, FloorIndex, STEP_HEIGHT, VERTICAL_CORRECTION};
pub use geojson::{Feature, FeatureCollection, Geometry, Position, Properties, Ring};
pub use normalize::{denormalize, normalize, normalize_ring, CoordinateOffset, WORLD_ORIGIN};
