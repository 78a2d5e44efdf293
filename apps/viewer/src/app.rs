// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewer context: scene, floor groups, panel, camera and renderer, built
//! once at startup and passed by reference to ingestion and the render loop.

use geofloor_core::CoordinateOffset;
use geofloor_scene::{
    FloorGroupRegistry, OrbitControls, PerspectiveCamera, Scene, Spherical, VisibilityPanel,
};
use nalgebra::Point3;

use crate::error::Result;
use crate::ingest::{ingest_all, AssetFetcher, IngestReport};
use crate::render::{FrameStats, WireframeRenderer};

/// Camera distance used while the scene is empty
const DEFAULT_DISTANCE: f64 = 300.0;

pub struct Viewer {
    pub scene: Scene,
    pub registry: FloorGroupRegistry,
    pub panel: VisibilityPanel,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub renderer: WireframeRenderer,
    pub offset: CoordinateOffset,
}

impl Viewer {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut scene = Scene::new();
        let registry = FloorGroupRegistry::install(&mut scene)?;
        let panel = VisibilityPanel::new(&registry, &scene);

        let mut viewer = Self {
            scene,
            registry,
            panel,
            camera: PerspectiveCamera::for_viewport(width, height),
            controls: OrbitControls::default(),
            renderer: WireframeRenderer::new(width, height),
            offset: CoordinateOffset::default(),
        };
        viewer.place_camera(Point3::origin(), DEFAULT_DISTANCE);
        Ok(viewer)
    }

    /// Load assets into the scene.
    pub async fn ingest<F: AssetFetcher>(
        &mut self,
        fetcher: &F,
        locations: &[String],
        max_concurrent: usize,
    ) -> IngestReport {
        ingest_all(
            fetcher,
            locations,
            &mut self.scene,
            &self.registry,
            self.offset,
            max_concurrent,
        )
        .await
    }

    /// Uncheck the given floor labels; unknown labels are logged and returned.
    pub fn hide_floors(&mut self, labels: &[String]) -> Vec<String> {
        let mut unknown = Vec::new();
        for label in labels {
            if let Err(err) = self.panel.set(&mut self.scene, label, false) {
                tracing::warn!(floor = %label, error = %err, "Cannot hide floor");
                unknown.push(label.clone());
            }
        }
        unknown
    }

    /// Aim the orbit at the middle of every loaded object.
    pub fn fit_camera(&mut self) {
        let mut min = Point3::new(f64::MAX, f64::MAX, f64::MAX);
        let mut max = Point3::new(f64::MIN, f64::MIN, f64::MIN);
        let mut any = false;

        for (_, group) in self.scene.groups() {
            for object in group.children() {
                for (a, b) in object.world_segments() {
                    for p in [a, b] {
                        min = min.inf(&p);
                        max = max.sup(&p);
                        any = true;
                    }
                }
            }
        }

        if !any {
            return;
        }

        let center = nalgebra::center(&min, &max);
        let radius = ((max - min).norm() * 0.5).max(1.0);
        let half_fov = (self.camera.fov.to_radians() * 0.5).max(1e-3);
        self.place_camera(center, radius / half_fov.tan() * 1.2);
    }

    fn place_camera(&mut self, target: Point3<f64>, distance: f64) {
        let orbit = Spherical {
            radius: distance,
            phi: 60f64.to_radians(),
            theta: 45f64.to_radians(),
        };
        self.controls.target = target;
        self.camera.position = target + orbit.to_offset();
        self.camera.look_at(target);
        self.camera.far = self.camera.far.max(distance * 4.0);
    }

    /// Advance orbit damping, then render one pass.
    pub fn frame(&mut self) -> FrameStats {
        self.controls.update(&mut self.camera);
        self.renderer.render(&self.scene, &self.camera)
    }
}
