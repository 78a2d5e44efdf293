// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Perspective camera and orbit controls
//!
//! Y is up. Orbit angles use the usual spherical convention: `theta` is the
//! azimuth around +Y measured from +Z, `phi` the polar angle from +Y.

use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector3};

const EPS: f64 = 1e-6;

#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub position: Point3<f64>,
    pub target: Point3<f64>,
    pub up: Vector3<f64>,
}

impl PerspectiveCamera {
    pub fn new(fov: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self {
            fov,
            aspect,
            near,
            far,
            position: Point3::new(0.0, 0.0, 1.0),
            target: Point3::origin(),
            up: Vector3::y(),
        }
    }

    /// Viewer defaults: 75 degree field of view, clip planes 0.1 and 10000
    pub fn for_viewport(width: u32, height: u32) -> Self {
        Self::new(75.0, aspect_ratio(width, height), 0.1, 10_000.0)
    }

    pub fn look_at(&mut self, target: Point3<f64>) {
        self.target = target;
    }

    pub fn view_matrix(&self) -> Matrix4<f64> {
        Isometry3::look_at_rh(&self.position, &self.target, &self.up).to_homogeneous()
    }

    pub fn projection_matrix(&self) -> Matrix4<f64> {
        Perspective3::new(self.aspect, self.fov.to_radians(), self.near, self.far).to_homogeneous()
    }

    pub fn view_projection(&self) -> Matrix4<f64> {
        self.projection_matrix() * self.view_matrix()
    }
}

fn aspect_ratio(width: u32, height: u32) -> f64 {
    if height == 0 {
        1.0
    } else {
        width as f64 / height as f64
    }
}

/// Radius and angles around the orbit target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f64,
    pub phi: f64,
    pub theta: f64,
}

impl Spherical {
    pub fn from_offset(offset: &Vector3<f64>) -> Self {
        let radius = offset.norm();
        if radius == 0.0 {
            return Self {
                radius,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vector3<f64> {
        let sin_phi = self.phi.sin();
        Vector3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

/// Orbit a camera around a target with damped rotate and zoom input
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Point3<f64>,
    pub enable_damping: bool,
    pub damping_factor: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    delta_theta: f64,
    delta_phi: f64,
    scale: f64,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Point3::origin(),
            enable_damping: true,
            damping_factor: 0.05,
            min_distance: 0.0,
            max_distance: f64::INFINITY,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    /// Queue an azimuth change in radians
    pub fn rotate_left(&mut self, angle: f64) {
        self.delta_theta -= angle;
    }

    /// Queue a polar change in radians
    pub fn rotate_up(&mut self, angle: f64) {
        self.delta_phi -= angle;
    }

    /// Queue a zoom; factors above 1 move the camera closer
    pub fn zoom(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.scale /= factor;
        }
    }

    /// True while queued rotation has not yet decayed
    pub fn is_moving(&self) -> bool {
        self.delta_theta.abs() > EPS || self.delta_phi.abs() > EPS
    }

    /// Apply queued input to the camera; returns whether it moved
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - self.target;
        let mut spherical = Spherical::from_offset(&offset);

        let weight = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        spherical.theta += self.delta_theta * weight;
        spherical.phi =
            (spherical.phi + self.delta_phi * weight).clamp(EPS, std::f64::consts::PI - EPS);
        spherical.radius =
            (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        let position = self.target + spherical.to_offset();
        let moved = (position - camera.position).norm_squared() > EPS;

        camera.position = position;
        camera.look_at(self.target);

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;

        moved
    }
}
