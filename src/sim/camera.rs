//! Chase camera
//!
//! The simulation only reads the camera position (for star chunk streaming).
//! `CameraRig` moves it: a fast intro zoom onto the ship, then a lagged follow.

use glam::Vec3;

use crate::consts::*;

/// Camera pose. Rotation is (pitch, yaw, roll) in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Camera {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
        }
    }
}

/// Drives the camera behind the ship
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub camera: Camera,
    zoom_time: f32,
    zooming: bool,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraRig {
    pub fn new() -> Self {
        Self {
            camera: Camera::at(Vec3::new(0.0, 0.0, CAMERA_INITIAL_ZOOM)),
            zoom_time: 0.0,
            zooming: true,
        }
    }

    #[inline]
    pub fn is_zooming(&self) -> bool {
        self.zooming
    }

    /// Replay the intro zoom (after a restart)
    pub fn restart_zoom(&mut self) {
        self.zoom_time = 0.0;
        self.zooming = true;
    }

    /// Move the camera toward `target` (the ship position)
    pub fn update(&mut self, dt: f32, target: Vec3) {
        if self.zooming {
            self.zoom_time += dt;
            if self.zoom_time >= CAMERA_ZOOM_DURATION {
                self.zoom_time = CAMERA_ZOOM_DURATION;
                self.zooming = false;
            }

            // Ease-out quadratic
            let t = self.zoom_time / CAMERA_ZOOM_DURATION;
            let progress = 1.0 - (1.0 - t) * (1.0 - t);
            let distance = CAMERA_INITIAL_ZOOM + (CAMERA_DISTANCE - CAMERA_INITIAL_ZOOM) * progress;

            self.camera.position = target + Vec3::new(0.0, CAMERA_HEIGHT, distance);
        } else {
            let goal = target + Vec3::new(0.0, CAMERA_HEIGHT, CAMERA_DISTANCE);
            self.camera.position = self.camera.position.lerp(goal, CAMERA_LAG);
        }

        let delta = target - self.camera.position;
        if delta.length_squared() > 0.0 {
            let horizontal = (delta.x * delta.x + delta.z * delta.z).sqrt();
            let pitch = delta.y.atan2(horizontal);
            let yaw = -delta.x.atan2(horizontal);
            self.camera.rotation = Vec3::new(pitch, yaw, 0.0);
        }
    }
}
