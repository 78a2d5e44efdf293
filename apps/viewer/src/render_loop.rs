// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Render loop and operator commands
//!
//! A fixed-interval ticker drives `controls.update()` plus one render pass per
//! tick. The loop ends when the frame budget is reached, on `quit` or on
//! Ctrl-C. Commands typed on stdin are applied between frames.

use std::str::FromStr;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use crate::app::Viewer;
use crate::error::ViewerError;

/// Operator command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show(String),
    Hide(String),
    Toggle(String),
    List,
    /// Orbit by (azimuth, polar) radians
    Rotate(f64, f64),
    Zoom(f64),
    Quit,
}

impl FromStr for Command {
    type Err = ViewerError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let invalid = || ViewerError::InvalidArgument(format!("unrecognized command {:?}", line));
        let verb = words.next().ok_or_else(invalid)?;

        let command = match verb.to_ascii_lowercase().as_str() {
            "show" => Command::Show(words.next().ok_or_else(invalid)?.to_string()),
            "hide" => Command::Hide(words.next().ok_or_else(invalid)?.to_string()),
            "toggle" => Command::Toggle(words.next().ok_or_else(invalid)?.to_string()),
            "list" => Command::List,
            "rotate" => {
                let theta = words.next().and_then(|w| w.parse().ok()).ok_or_else(invalid)?;
                let phi = words.next().map_or(Some(0.0), |w| w.parse().ok()).ok_or_else(invalid)?;
                Command::Rotate(theta, phi)
            }
            "zoom" => Command::Zoom(words.next().and_then(|w| w.parse().ok()).ok_or_else(invalid)?),
            "quit" | "exit" => Command::Quit,
            _ => return Err(invalid()),
        };

        if words.next().is_some() {
            return Err(invalid());
        }
        Ok(command)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl Viewer {
    /// Apply a command between frames.
    pub fn apply(&mut self, command: &Command) -> Result<Flow, ViewerError> {
        match command {
            Command::Show(label) => self.panel.set(&mut self.scene, label, true)?,
            Command::Hide(label) => self.panel.set(&mut self.scene, label, false)?,
            Command::Toggle(label) => {
                let checked = self.panel.toggle(&mut self.scene, label)?;
                tracing::info!(floor = %label, visible = checked, "Toggled floor");
            }
            Command::List => {
                for checkbox in self.panel.checkboxes() {
                    let meshes = self
                        .scene
                        .group(checkbox.group)
                        .map_or(0, |g| g.children().len());
                    println!(
                        "[{}] {:<4} {} meshes",
                        if checkbox.checked { "x" } else { " " },
                        checkbox.label,
                        meshes
                    );
                }
            }
            Command::Rotate(theta, phi) => {
                self.controls.rotate_left(*theta);
                self.controls.rotate_up(*phi);
            }
            Command::Zoom(factor) => self.controls.zoom(*factor),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LoopSettings {
    pub interval: Duration,
    /// 0 runs until quit or Ctrl-C
    pub max_frames: u64,
    pub interactive: bool,
}

/// Run frames until the budget, `quit` or Ctrl-C; returns frames rendered.
pub async fn run(viewer: &mut Viewer, settings: LoopSettings) -> u64 {
    let mut ticker = tokio::time::interval(settings.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = settings.interactive;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut frames = 0u64;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let stats = viewer.frame();
                frames += 1;
                if frames == 1 || frames % 600 == 0 {
                    tracing::debug!(
                        frame = frames,
                        objects = stats.objects,
                        segments = stats.segments,
                        drawn = stats.drawn,
                        "Rendered frame"
                    );
                }
                if settings.max_frames > 0 && frames >= settings.max_frames {
                    break;
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) if line.trim().is_empty() => {}
                    Ok(Some(line)) => match line.parse::<Command>() {
                        Ok(command) => match viewer.apply(&command) {
                            Ok(Flow::Quit) => break,
                            Ok(Flow::Continue) => {}
                            Err(err) => tracing::warn!(error = %err, "Command failed"),
                        },
                        Err(err) => tracing::warn!(error = %err, "Ignoring input"),
                    },
                    Ok(None) => stdin_open = false,
                    Err(err) => {
                        tracing::warn!(error = %err, "Stdin closed");
                        stdin_open = false;
                    }
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    frames
}
