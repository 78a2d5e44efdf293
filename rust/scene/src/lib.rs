// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # GeoFloor Scene
//!
//! Scene-side half of the viewer:
//!
//! - **Graph**: a root with one named group per level, each holding white
//!   wireframe objects
//! - **Adapter**: extruded solid to upright, elevated wireframe object
//! - **Registry**: the fixed set of floor groups (B3 to 4F)
//! - **Panel**: per-floor visibility checkboxes
//! - **Camera**: perspective camera with damped orbit controls
//!
//! ```rust,ignore
//! use geofloor_scene::{FeatureAdapter, FloorGroupRegistry, Scene, VisibilityPanel};
//!
//! let mut scene = Scene::new();
//! let registry = FloorGroupRegistry::install(&mut scene)?;
//! let adapter = FeatureAdapter::new(asset, WORLD_ORIGIN);
//! for object in adapter.adapt(&feature)? {
//!     registry.attach(&mut scene, asset.floor, object)?;
//! }
//! let mut panel = VisibilityPanel::new(&registry, &scene);
//! panel.toggle(&mut scene, "B1")?;
//! ```

pub mod adapter;
pub mod camera;
pub mod error;
pub mod graph;
pub mod panel;
pub mod registry;
pub mod summary;

pub use adapter::{build_floor_mesh, upright_transform, FeatureAdapter};
pub use camera::{OrbitControls, PerspectiveCamera, Spherical};
pub use error::{Error, Result};
pub use graph::{Group, GroupId, LineMaterial, LineSegments, Scene};
pub use panel::{Checkbox, VisibilityPanel};
pub use registry::{FloorGroup, FloorGroupRegistry, DECLARED_FLOORS};
pub use summary::{GroupSummary, SceneSummary};
