// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command-line parsing.
//!
//! Usage:
//!   geofloor-viewer [options] [asset paths or URLs...]

use std::path::PathBuf;

use crate::config::{parse_viewport, split_labels};
use crate::error::{Result, ViewerError};

/// Flags given on the command line; `None` keeps the environment value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    pub data_dir: Option<PathBuf>,
    pub concurrency: Option<usize>,
    pub frames: Option<u64>,
    pub output: Option<PathBuf>,
    pub obj: Option<PathBuf>,
    pub hide: Vec<String>,
    pub viewport: Option<(u32, u32)>,
    pub interactive: bool,
    pub summary: bool,
    pub help: bool,
    pub locations: Vec<String>,
}

impl CliOptions {
    /// Parse arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = CliOptions::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data-dir" => options.data_dir = Some(value(&arg, args.next())?.into()),
                "--concurrency" => options.concurrency = Some(number(&arg, args.next())?),
                "--frames" => options.frames = Some(number(&arg, args.next())?),
                "--output" => options.output = Some(value(&arg, args.next())?.into()),
                "--obj" => options.obj = Some(value(&arg, args.next())?.into()),
                "--hide" => options.hide.extend(split_labels(&value(&arg, args.next())?)),
                "--viewport" => options.viewport = Some(parse_viewport(&value(&arg, args.next())?)?),
                "--interactive" | "-i" => options.interactive = true,
                "--summary" => options.summary = true,
                "--help" | "-h" => options.help = true,
                other if other.starts_with("--") => {
                    return Err(ViewerError::InvalidArgument(format!("unknown option {}", other)));
                }
                _ => options.locations.push(arg),
            }
        }

        Ok(options)
    }
}

fn value(flag: &str, next: Option<String>) -> Result<String> {
    next.ok_or_else(|| ViewerError::InvalidArgument(format!("{} needs a value", flag)))
}

fn number<T: std::str::FromStr>(flag: &str, next: Option<String>) -> Result<T> {
    let raw = value(flag, next)?;
    raw.parse()
        .map_err(|_| ViewerError::InvalidArgument(format!("{} expects a number, got {:?}", flag, raw)))
}

pub fn usage() -> &'static str {
    "Usage: geofloor-viewer [options] [asset paths or URLs...]

Loads ShinjukuTerminal_<level>[out]_<Space|Floor|Fixture>.geojson assets,
extrudes every polygon into a wireframe prism grouped by level and renders
the scene through an orbit camera.

Options:
  --data-dir <dir>     Directory scanned for *.geojson when no paths are given
  --concurrency <n>    Maximum asset loads in flight (default: 8)
  --frames <n>         Frames to render before exiting (0 = until quit/Ctrl-C)
  --output <file.png>  Where the last frame is written (default: frame.png)
  --obj <file.obj>     Also export the visible wireframe as OBJ
  --hide <labels>      Comma-separated floors hidden at startup (e.g. B3,B2)
  --viewport <WxH>     Frame size (default: 1280x720)
  --interactive, -i    Read commands from stdin:
                         show|hide|toggle <label>, list,
                         rotate <dtheta> <dphi>, zoom <factor>, quit
  --summary            Print a JSON summary of the scene after loading
  --help, -h           Show this help

Environment: GEOFLOOR_DATA_DIR, GEOFLOOR_MAX_CONCURRENT_LOADS, GEOFLOOR_FRAMES,
GEOFLOOR_FRAME_INTERVAL_MS, GEOFLOOR_VIEWPORT, GEOFLOOR_OUTPUT_PNG,
GEOFLOOR_OBJ_OUTPUT, GEOFLOOR_HIDDEN_FLOORS, GEOFLOOR_INTERACTIVE,
GEOFLOOR_LOG_JSON, RUST_LOG"
}
