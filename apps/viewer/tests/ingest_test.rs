// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ingestion driver against in-memory and on-disk assets.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use geofloor_core::{FloorIndex, WORLD_ORIGIN};
use geofloor_viewer::{
    scan_data_dir, AssetFetcher, FileOutcome, FsFetcher, SkipReason, Viewer, ViewerError,
};

/// Serves canned documents; unknown locations fail like a missing file.
struct MemoryFetcher {
    files: HashMap<String, String>,
}

impl MemoryFetcher {
    fn new(files: &[(&str, String)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(name, text)| (name.to_string(), text.clone()))
                .collect(),
        }
    }
}

impl AssetFetcher for MemoryFetcher {
    async fn fetch(&self, location: &str) -> Result<String, ViewerError> {
        tokio::task::yield_now().await;
        self.files
            .get(location)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, location.to_string()).into())
    }
}

/// Tracks the peak number of fetches in flight at once
#[derive(Default)]
struct CountingFetcher {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl AssetFetcher for CountingFetcher {
    async fn fetch(&self, _location: &str) -> Result<String, ViewerError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(squares(&["Booth"]))
    }
}

/// Feature collection of axis-aligned squares in raw coordinates
fn squares(names: &[&str]) -> String {
    let features: Vec<String> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let x = WORLD_ORIGIN.x + i as f64 * 10.0;
            let y = WORLD_ORIGIN.y;
            format!(
                r#"{{"type": "Feature", "properties": {{"name": "{name}"}},
                    "geometry": {{"type": "Polygon", "coordinates": [[
                        [{x0}, {y0}], [{x1}, {y0}], [{x1}, {y1}], [{x0}, {y1}], [{x0}, {y0}]
                    ]]}}}}"#,
                name = name,
                x0 = x,
                x1 = x + 4.0,
                y0 = y,
                y1 = y + 4.0,
            )
        })
        .collect();
    format!(
        r#"{{"type": "FeatureCollection", "features": [{}]}}"#,
        features.join(",")
    )
}

fn children(viewer: &Viewer, floor: i32) -> Vec<String> {
    let id = viewer.registry.group(FloorIndex::new(floor)).unwrap();
    viewer
        .scene
        .group(id)
        .unwrap()
        .children()
        .iter()
        .map(|o| o.name.clone())
        .collect()
}

#[tokio::test]
async fn test_failed_fetch_is_isolated() {
    let fetcher = MemoryFetcher::new(&[
        ("ShinjukuTerminal_1_Space.geojson", squares(&["Gate 1", "Gate 2"])),
        ("ShinjukuTerminal_B1_Fixture.geojson", squares(&["Pillar"])),
    ]);
    let locations: Vec<String> = [
        "ShinjukuTerminal_1_Space.geojson",
        "ShinjukuTerminal_2_Floor.geojson", // not served
        "ShinjukuTerminal_B1_Fixture.geojson",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let mut viewer = Viewer::new(64, 48).unwrap();
    let report = viewer.ingest(&fetcher, &locations, 2).await;

    assert_eq!(report.files.len(), 3);
    assert_eq!(report.ingested(), 2);
    assert_eq!(report.failed(), 1);
    assert!(matches!(
        report.outcome("ShinjukuTerminal_2_Floor.geojson"),
        Some(FileOutcome::Failed(ViewerError::Io(_)))
    ));

    // Feature order within a file is preserved
    assert_eq!(children(&viewer, 1), vec!["Gate 1", "Gate 2"]);
    assert_eq!(children(&viewer, -1), vec!["Pillar"]);
    assert!(children(&viewer, 2).is_empty());
    assert_eq!(viewer.scene.object_count(), 3);
}

#[tokio::test]
async fn test_malformed_json_fails_only_that_file() {
    let fetcher = MemoryFetcher::new(&[
        ("ShinjukuTerminal_3_Space.geojson", "{\"features\": [".to_string()),
        ("ShinjukuTerminal_3out_Space.geojson", squares(&["Deck"])),
    ]);
    let locations = vec![
        "ShinjukuTerminal_3_Space.geojson".to_string(),
        "ShinjukuTerminal_3out_Space.geojson".to_string(),
    ];

    let mut viewer = Viewer::new(64, 48).unwrap();
    let report = viewer.ingest(&fetcher, &locations, 1).await;

    assert!(matches!(
        report.outcome("ShinjukuTerminal_3_Space.geojson"),
        Some(FileOutcome::Failed(ViewerError::Parse(_)))
    ));
    // The `out` variant lands in the same group
    assert_eq!(children(&viewer, 3), vec!["Deck"]);
}

#[tokio::test]
async fn test_skipped_files_are_not_fetched() {
    // Nothing is served, so any fetch would fail
    let fetcher = MemoryFetcher::new(&[]);
    let locations = vec![
        "notes.geojson".to_string(),
        "ShinjukuTerminal_1_Wall.geojson".to_string(),
        "ShinjukuTerminal_7_Space.geojson".to_string(),
        "ShinjukuTerminal_B5_Floor.geojson".to_string(),
    ];

    let mut viewer = Viewer::new(64, 48).unwrap();
    let report = viewer.ingest(&fetcher, &locations, 4).await;

    assert_eq!(report.skipped(), 4);
    assert_eq!(report.failed(), 0);
    assert!(matches!(
        report.outcome("notes.geojson"),
        Some(FileOutcome::Skipped(SkipReason::FilenameMismatch))
    ));
    assert!(matches!(
        report.outcome("ShinjukuTerminal_7_Space.geojson"),
        Some(FileOutcome::Skipped(SkipReason::UnknownFloor(f))) if f.value() == 7
    ));
    assert!(matches!(
        report.outcome("ShinjukuTerminal_B5_Floor.geojson"),
        Some(FileOutcome::Skipped(SkipReason::UnknownFloor(f))) if f.value() == -5
    ));
    // No group appears for an undeclared level
    assert!(viewer.scene.group_by_name("group7").is_none());
}

#[tokio::test]
async fn test_concurrent_loads_are_capped() {
    let fetcher = CountingFetcher::default();
    let locations: Vec<String> = (0..12)
        .map(|i| {
            let level = ["B3", "B2", "B1", "0", "1", "2"][i % 6];
            let category = if i < 6 { "Space" } else { "Fixture" };
            format!("ShinjukuTerminal_{}_{}.geojson", level, category)
        })
        .collect();

    let mut viewer = Viewer::new(64, 48).unwrap();
    let report = viewer.ingest(&fetcher, &locations, 3).await;

    assert_eq!(report.ingested(), 12);
    assert_eq!(fetcher.peak.load(Ordering::SeqCst), 3);
    assert_eq!(fetcher.in_flight.load(Ordering::SeqCst), 0);
    assert_eq!(viewer.scene.object_count(), 12);
}

#[tokio::test]
async fn test_dropped_features_are_counted() {
    let text = r#"{"features": [
        {"properties": {"name": "Nothing"}, "geometry": null},
        {"properties": {"name": "Sliver"}, "geometry": {"type": "Polygon",
            "coordinates": [[[0, 0], [1, 1], [0, 0]]]}},
        {"properties": {"name": "Hall"}, "geometry": {"type": "Polygon",
            "coordinates": [[[0, 0], [5, 0], [5, 5], [0, 5], [0, 0]]]}}
    ]}"#;
    let fetcher = MemoryFetcher::new(&[("ShinjukuTerminal_0_Space.geojson", text.to_string())]);
    let locations = vec!["ShinjukuTerminal_0_Space.geojson".to_string()];

    let mut viewer = Viewer::new(64, 48).unwrap();
    let report = viewer.ingest(&fetcher, &locations, 8).await;

    match report.outcome("ShinjukuTerminal_0_Space.geojson") {
        Some(FileOutcome::Ingested {
            meshes,
            dropped_features,
        }) => {
            assert_eq!(*meshes, 1);
            assert_eq!(*dropped_features, 2);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(children(&viewer, 0), vec!["Hall"]);
}

#[tokio::test]
async fn test_scan_and_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("ShinjukuTerminal_4_Floor.geojson"),
        squares(&["Roof"]),
    )
    .unwrap();
    std::fs::write(dir.path().join("ShinjukuTerminal_B2_Space.geojson"), squares(&["Platform"]))
        .unwrap();
    std::fs::write(dir.path().join("README.txt"), "not an asset").unwrap();

    let locations = scan_data_dir(dir.path()).await.unwrap();
    assert_eq!(locations.len(), 2);
    assert!(locations.iter().all(|l| l.ends_with(".geojson")));

    let mut viewer = Viewer::new(64, 48).unwrap();
    let report = viewer.ingest(&FsFetcher, &locations, 2).await;
    assert_eq!(report.ingested(), 2);
    assert_eq!(children(&viewer, 4), vec!["Roof"]);
    assert_eq!(children(&viewer, -2), vec!["Platform"]);

    // Floor slabs sit one unit below the level line: 4 * 30 - 1
    let id = viewer.registry.group(FloorIndex::new(4)).unwrap();
    let roof = &viewer.scene.group(id).unwrap().children()[0];
    assert_eq!(roof.position.y, 119.0);

    viewer.fit_camera();
    let stats = viewer.frame();
    assert_eq!(stats.objects, 2);
    assert!(stats.drawn > 0);
}

#[tokio::test]
async fn test_missing_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    assert!(scan_data_dir(&dir.path().join("absent")).await.is_err());
}
