// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GeoFloor viewer.
//!
//! Loads per-level GeoJSON floor plans, turns every polygon into a wireframe
//! prism grouped by level, and renders the scene through an orbit camera
//! into a PNG frame.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod render;
pub mod render_loop;

pub use app::Viewer;
pub use config::Config;
pub use error::{Result, ViewerError};
pub use ingest::{
    ingest_all, scan_data_dir, AssetFetcher, AssetLoader, FileOutcome, FsFetcher, HttpFetcher,
    IngestReport, SkipReason,
};
