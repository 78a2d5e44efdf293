// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ingestion driver
//!
//! Each asset goes through filename parsing, an async fetch, GeoJSON parsing
//! and per-feature mesh building. Fetches run concurrently up to a cap; every
//! completed fetch is parsed and merged into the scene on the driving task,
//! so the scene is only ever touched from one place. All files are joined
//! into an [`IngestReport`] whatever their outcome.

use std::future::Future;
use std::path::Path;

use futures::stream::{self, StreamExt};
use geofloor_core::{AssetName, CoordinateOffset, FeatureCollection, FloorIndex};
use geofloor_scene::{FeatureAdapter, FloorGroupRegistry, Scene};

use crate::error::{Result, ViewerError};

/// Source of asset text.
pub trait AssetFetcher {
    fn fetch(&self, location: &str) -> impl Future<Output = Result<String>>;
}

/// Reads local files.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFetcher;

impl AssetFetcher for FsFetcher {
    async fn fetch(&self, location: &str) -> Result<String> {
        Ok(tokio::fs::read_to_string(location).await?)
    }
}

/// Fetches `http://` and `https://` URLs.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl AssetFetcher for HttpFetcher {
    async fn fetch(&self, location: &str) -> Result<String> {
        let response = self.client.get(location).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Dispatches on the location: URLs over HTTP, everything else from disk.
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    fs: FsFetcher,
    http: HttpFetcher,
}

impl AssetFetcher for AssetLoader {
    async fn fetch(&self, location: &str) -> Result<String> {
        if is_url(location) {
            self.http.fetch(location).await
        } else {
            self.fs.fetch(location).await
        }
    }
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Why a file was not loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Name does not follow the asset filename convention
    FilenameMismatch,
    /// Level has no registered floor group
    UnknownFloor(FloorIndex),
}

/// Result of ingesting one file.
#[derive(Debug)]
pub enum FileOutcome {
    Ingested {
        meshes: usize,
        /// Features without geometry or whose outline could not be extruded
        dropped_features: usize,
    },
    Skipped(SkipReason),
    Failed(ViewerError),
}

#[derive(Debug)]
pub struct FileReport {
    pub location: String,
    pub outcome: FileOutcome,
}

/// Joined outcomes of an ingestion run, in completion order.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub files: Vec<FileReport>,
}

impl IngestReport {
    fn push(&mut self, location: String, outcome: FileOutcome) {
        self.files.push(FileReport { location, outcome });
    }

    pub fn outcome(&self, location: &str) -> Option<&FileOutcome> {
        self.files
            .iter()
            .find(|f| f.location == location)
            .map(|f| &f.outcome)
    }

    pub fn ingested(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Ingested { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed(_)))
    }

    pub fn total_meshes(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f.outcome {
                FileOutcome::Ingested { meshes, .. } => meshes,
                _ => 0,
            })
            .sum()
    }

    pub fn dropped_features(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f.outcome {
                FileOutcome::Ingested {
                    dropped_features, ..
                } => dropped_features,
                _ => 0,
            })
            .sum()
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }
}

/// Load every location into `scene`, at most `max_concurrent` fetches at a time.
pub async fn ingest_all<F: AssetFetcher>(
    fetcher: &F,
    locations: &[String],
    scene: &mut Scene,
    registry: &FloorGroupRegistry,
    offset: CoordinateOffset,
    max_concurrent: usize,
) -> IngestReport {
    let mut report = IngestReport::default();
    let mut pending = Vec::with_capacity(locations.len());

    for location in locations {
        let Some(asset) = AssetName::from_location(location) else {
            tracing::debug!(file = %location, "Skipping file: name does not match asset convention");
            report.push(location.clone(), FileOutcome::Skipped(SkipReason::FilenameMismatch));
            continue;
        };
        if !registry.contains(asset.floor) {
            tracing::warn!(
                file = %location,
                floor = asset.floor.value(),
                "Skipping file: no floor group for level"
            );
            report.push(
                location.clone(),
                FileOutcome::Skipped(SkipReason::UnknownFloor(asset.floor)),
            );
            continue;
        }
        pending.push((location.clone(), asset));
    }

    tracing::info!(
        files = pending.len(),
        skipped = report.files.len(),
        max_concurrent,
        "Loading assets"
    );

    let mut loads = stream::iter(pending)
        .map(|(location, asset)| async move {
            let text = fetcher.fetch(&location).await;
            (location, asset, text)
        })
        .buffer_unordered(max_concurrent.max(1));

    while let Some((location, asset, text)) = loads.next().await {
        let outcome = match text {
            Ok(text) => build_file(&location, &text, asset, scene, registry, offset),
            Err(err) => {
                tracing::error!(file = %location, error = %err, "Failed to load asset");
                FileOutcome::Failed(err)
            }
        };
        report.push(location, outcome);
    }

    tracing::info!(
        ingested = report.ingested(),
        skipped = report.skipped(),
        failed = report.failed(),
        meshes = report.total_meshes(),
        dropped_features = report.dropped_features(),
        "Ingestion finished"
    );

    report
}

/// Parse one file and attach its meshes, in feature order.
fn build_file(
    location: &str,
    text: &str,
    asset: AssetName,
    scene: &mut Scene,
    registry: &FloorGroupRegistry,
    offset: CoordinateOffset,
) -> FileOutcome {
    let collection = match FeatureCollection::from_json(text) {
        Ok(collection) => collection,
        Err(err) => {
            tracing::error!(file = %location, error = %err, "Malformed GeoJSON");
            return FileOutcome::Failed(err.into());
        }
    };

    let adapter = FeatureAdapter::new(asset, offset);
    let mut meshes = 0;
    let mut dropped_features = collection.features_without_geometry();

    for (index, feature) in collection.polygon_features().enumerate() {
        let objects = match adapter.adapt(feature) {
            Ok(objects) => objects,
            Err(err) => {
                tracing::debug!(
                    file = %location,
                    feature = index,
                    name = feature.display_name(),
                    error = %err,
                    "Dropping feature"
                );
                dropped_features += 1;
                continue;
            }
        };
        for object in objects {
            if let Err(err) = registry.attach(scene, asset.floor, object) {
                tracing::error!(file = %location, error = %err, "Failed to attach mesh");
                return FileOutcome::Failed(err.into());
            }
            meshes += 1;
        }
    }

    tracing::debug!(
        file = %location,
        floor = asset.floor.value(),
        category = %asset.category,
        meshes,
        dropped_features,
        "Asset ingested"
    );

    FileOutcome::Ingested {
        meshes,
        dropped_features,
    }
}

/// `*.geojson` files directly inside `dir`, sorted by name.
pub async fn scan_data_dir(dir: &Path) -> Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_geojson = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("geojson"));
        if is_geojson && entry.file_type().await?.is_file() {
            files.push(path.to_string_lossy().into_owned());
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/ShinjukuTerminal_1_Space.geojson"));
        assert!(is_url("http://localhost:8000/a.geojson"));
        assert!(!is_url("data/ShinjukuTerminal_1_Space.geojson"));
    }

    #[test]
    fn test_report_counts() {
        let mut report = IngestReport::default();
        report.push(
            "a".into(),
            FileOutcome::Ingested {
                meshes: 3,
                dropped_features: 1,
            },
        );
        report.push("b".into(), FileOutcome::Skipped(SkipReason::FilenameMismatch));
        report.push(
            "c".into(),
            FileOutcome::Failed(ViewerError::Parse("bad".into())),
        );

        assert_eq!(report.ingested(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.total_meshes(), 3);
        assert_eq!(report.dropped_features(), 1);
        assert!(matches!(report.outcome("b"), Some(FileOutcome::Skipped(_))));
    }
}
