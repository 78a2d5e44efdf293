// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GeoFloor Viewer - wireframe viewer for per-level GeoJSON floor plans.
//!
//! Asset files follow `ShinjukuTerminal_<level>[out]_<Category>.geojson`.
//! Every polygon is extruded (Floor: 1, Space/Fixture: 7), reduced to its
//! edges and placed in the scene group of its level. The final frame is
//! written as PNG; the visible wireframe can also be exported as OBJ.

use anyhow::Context;
use geofloor_viewer::cli::{usage, CliOptions};
use geofloor_viewer::render_loop::{self, LoopSettings};
use geofloor_viewer::{export, scan_data_dir, AssetLoader, Config, Viewer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = CliOptions::parse(std::env::args().skip(1))?;
    if options.help {
        println!("{}", usage());
        return Ok(());
    }

    let mut config = Config::from_env();
    config.apply_cli(options);

    // Initialize logging
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info,geofloor_viewer=debug".into());
    if config.log_json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        data_dir = %config.data_dir.display(),
        max_concurrent_loads = config.max_concurrent_loads,
        frames = config.frames,
        viewport = %format!("{}x{}", config.viewport_width, config.viewport_height),
        interactive = config.interactive,
        "Starting GeoFloor Viewer"
    );

    let locations = if config.locations.is_empty() {
        scan_data_dir(&config.data_dir)
            .await
            .with_context(|| format!("scanning {}", config.data_dir.display()))?
    } else {
        config.locations.clone()
    };
    if locations.is_empty() {
        tracing::warn!(data_dir = %config.data_dir.display(), "No GeoJSON assets found");
    }

    let mut viewer = Viewer::new(config.viewport_width, config.viewport_height)?;
    let report = viewer
        .ingest(&AssetLoader::default(), &locations, config.load_concurrency())
        .await;
    for file in &report.files {
        tracing::debug!(file = %file.location, outcome = ?file.outcome, "Asset outcome");
    }

    let unknown = viewer.hide_floors(&config.hidden_floors);
    if !unknown.is_empty() {
        tracing::warn!(labels = ?unknown, "Ignoring unknown floor labels");
    }
    viewer.fit_camera();

    if config.print_summary {
        println!("{}", export::summary_json(&viewer.scene, &viewer.registry)?);
    }

    if let Some(path) = &config.obj_output {
        let objects = export::write_obj_file(path, &viewer.scene)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(file = %path.display(), objects, "Wrote OBJ");
    }

    let frames = render_loop::run(
        &mut viewer,
        LoopSettings {
            interval: config.frame_interval(),
            max_frames: config.frames,
            interactive: config.interactive,
        },
    )
    .await;

    viewer
        .renderer
        .save_png(&config.output_png)
        .with_context(|| format!("writing {}", config.output_png.display()))?;
    tracing::info!(frames, file = %config.output_png.display(), "Wrote last frame");

    Ok(())
}
