// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewer configuration loaded from environment variables.
//!
//! Command-line flags are applied on top with [`Config::apply_cli`].

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::CliOptions;
use crate::error::ViewerError;

/// Viewer configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory scanned for `*.geojson` assets when no paths are given.
    pub data_dir: PathBuf,
    /// Maximum number of asset loads in flight.
    pub max_concurrent_loads: usize,
    /// Frames to render before exiting (0 = until quit or Ctrl-C).
    pub frames: u64,
    /// Delay between frames in milliseconds.
    pub frame_interval_ms: u64,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// PNG written with the last rendered frame.
    pub output_png: PathBuf,
    /// Optional Wavefront OBJ export of the visible wireframe.
    pub obj_output: Option<PathBuf>,
    /// Floor labels hidden at startup (`B1`, `Road`, `2F`).
    pub hidden_floors: Vec<String>,
    /// Read panel and camera commands from stdin.
    pub interactive: bool,
    /// Emit logs as JSON lines.
    pub log_json: bool,
    /// Print a JSON scene summary after ingestion.
    pub print_summary: bool,
    /// Explicit asset paths or URLs.
    pub locations: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let (viewport_width, viewport_height) = std::env::var("GEOFLOOR_VIEWPORT")
            .ok()
            .and_then(|v| parse_viewport(&v).ok())
            .unwrap_or((1280, 720));

        Self {
            data_dir: std::env::var("GEOFLOOR_DATA_DIR")
                .unwrap_or_else(|_| "./data".into())
                .into(),
            max_concurrent_loads: std::env::var("GEOFLOOR_MAX_CONCURRENT_LOADS")
                .unwrap_or_else(|_| "8".into())
                .parse()
                .unwrap_or(8),
            frames: std::env::var("GEOFLOOR_FRAMES")
                .unwrap_or_else(|_| "0".into())
                .parse()
                .unwrap_or(0),
            frame_interval_ms: std::env::var("GEOFLOOR_FRAME_INTERVAL_MS")
                .unwrap_or_else(|_| "16".into())
                .parse()
                .unwrap_or(16),
            viewport_width,
            viewport_height,
            output_png: std::env::var("GEOFLOOR_OUTPUT_PNG")
                .unwrap_or_else(|_| "frame.png".into())
                .into(),
            obj_output: std::env::var("GEOFLOOR_OBJ_OUTPUT").ok().map(PathBuf::from),
            hidden_floors: std::env::var("GEOFLOOR_HIDDEN_FLOORS")
                .map(|v| split_labels(&v))
                .unwrap_or_default(),
            interactive: env_flag("GEOFLOOR_INTERACTIVE"),
            log_json: env_flag("GEOFLOOR_LOG_JSON"),
            print_summary: false,
            locations: Vec::new(),
        }
    }

    /// Override environment values with command-line flags.
    pub fn apply_cli(&mut self, options: CliOptions) {
        if let Some(dir) = options.data_dir {
            self.data_dir = dir;
        }
        if let Some(n) = options.concurrency {
            self.max_concurrent_loads = n;
        }
        if let Some(frames) = options.frames {
            self.frames = frames;
        }
        if let Some(path) = options.output {
            self.output_png = path;
        }
        if let Some(path) = options.obj {
            self.obj_output = Some(path);
        }
        if let Some((w, h)) = options.viewport {
            self.viewport_width = w;
            self.viewport_height = h;
        }
        self.hidden_floors.extend(options.hide);
        self.interactive |= options.interactive;
        self.print_summary |= options.summary;
        self.locations = options.locations;
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    /// Load cap, never below one.
    pub fn load_concurrency(&self) -> usize {
        self.max_concurrent_loads.max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Comma-separated floor labels, blanks dropped.
pub fn split_labels(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse `WIDTHxHEIGHT`.
pub fn parse_viewport(value: &str) -> Result<(u32, u32), ViewerError> {
    let invalid = || ViewerError::InvalidArgument(format!("viewport must be WxH, got {:?}", value));
    let (w, h) = value.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
    let w: u32 = w.trim().parse().map_err(|_| invalid())?;
    let h: u32 = h.trim().parse().map_err(|_| invalid())?;
    if w == 0 || h == 0 {
        return Err(invalid());
    }
    Ok((w, h))
}
