// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Software wireframe renderer
//!
//! Segments of visible groups are moved into camera space, clipped against
//! the near plane, projected and clipped to the frame, then drawn with
//! imageproc.

use std::path::Path;

use geofloor_scene::{PerspectiveCamera, Scene};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;
use nalgebra::{Point3, Vector4};

use crate::error::Result;

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Counters for one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub objects: usize,
    pub segments: usize,
    /// Segments that survived clipping
    pub drawn: usize,
}

pub struct WireframeRenderer {
    frame: RgbaImage,
}

impl WireframeRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: RgbaImage::from_pixel(width.max(1), height.max(1), BACKGROUND),
        }
    }

    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }

    pub fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> FrameStats {
        for pixel in self.frame.pixels_mut() {
            *pixel = BACKGROUND;
        }

        let (width, height) = (self.frame.width() as f64, self.frame.height() as f64);
        let view = camera.view_matrix();
        let projection = camera.projection_matrix();
        let mut stats = FrameStats::default();

        for object in scene.visible_objects() {
            stats.objects += 1;
            let [red, green, blue] = object.material.color;
            let color = Rgba([red, green, blue, 255]);

            for (a, b) in object.world_segments() {
                stats.segments += 1;

                let a = view * a.to_homogeneous();
                let b = view * b.to_homogeneous();
                let Some((a, b)) = clip_near(a, b, camera.near) else {
                    continue;
                };

                let to_screen = |p: Vector4<f64>| {
                    let clip = projection * p;
                    let ndc = Point3::from_homogeneous(clip)?;
                    Some(((ndc.x + 1.0) * 0.5 * width, (1.0 - ndc.y) * 0.5 * height))
                };
                let (Some(p0), Some(p1)) = (to_screen(a), to_screen(b)) else {
                    continue;
                };
                let Some((p0, p1)) = clip_to_rect(p0, p1, width, height) else {
                    continue;
                };

                draw_line_segment_mut(
                    &mut self.frame,
                    (p0.0 as f32, p0.1 as f32),
                    (p1.0 as f32, p1.1 as f32),
                    color,
                );
                stats.drawn += 1;
            }
        }

        stats
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.frame.save(path)?;
        Ok(())
    }
}

/// Clip a camera-space segment to `z <= -near`.
fn clip_near(
    a: Vector4<f64>,
    b: Vector4<f64>,
    near: f64,
) -> Option<(Vector4<f64>, Vector4<f64>)> {
    let plane = -near;
    let (a_in, b_in) = (a.z <= plane, b.z <= plane);
    match (a_in, b_in) {
        (true, true) => Some((a, b)),
        (false, false) => None,
        _ => {
            let t = (plane - a.z) / (b.z - a.z);
            let hit = a + (b - a) * t;
            if a_in {
                Some((a, hit))
            } else {
                Some((hit, b))
            }
        }
    }
}

/// Liang-Barsky clip of a screen segment to `[0, width] x [0, height]`.
fn clip_to_rect(
    p0: (f64, f64),
    p1: (f64, f64),
    width: f64,
    height: f64,
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    for (p, q) in [
        (-dx, p0.0),
        (dx, width - p0.0),
        (-dy, p0.1),
        (dy, height - p0.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((
        (p0.0 + t0 * dx, p0.1 + t0 * dy),
        (p0.0 + t1 * dx, p0.1 + t1 * dy),
    ))
}
