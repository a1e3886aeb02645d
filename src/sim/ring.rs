//! Rings: destructible guards orbiting a planet

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{direction_from_angle, random_in, wrap_angle};

/// A ring orbiting its planet. Its world position is never stored; it is
/// derived from the planet center, `orbit_radius` and `angle` each frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ring {
    /// Orbit angle around the planet (radians, [0, 2π))
    pub angle: f32,
    /// Rotation around its own axis (radians, [0, 2π))
    pub self_angle: f32,
    /// Facing toward the ship while engaged (radians, 0 when patrolling)
    pub yaw_angle: f32,
    pub orbit_radius: f32,
    /// Orbit speed (radians/s)
    pub rotation_speed: f32,
    /// Self-rotation speed (radians/s)
    pub self_rotation_speed: f32,
    health: i32,
    active: bool,
}

impl Ring {
    pub fn new(orbit_radius: f32, angle: f32, self_rotation_speed: f32) -> Self {
        Self {
            angle: wrap_angle(angle),
            self_angle: 0.0,
            yaw_angle: 0.0,
            orbit_radius,
            rotation_speed: RING_ORBIT_SPEED_DEG.to_radians(),
            self_rotation_speed,
            health: RING_INITIAL_HEALTH,
            active: true,
        }
    }

    /// Roll a ring for slot `index` around a planet
    pub fn random<R: Rng + ?Sized>(index: u32, rng: &mut R) -> Self {
        let orbit_radius = random_in(rng, RING_MIN_ORBIT, RING_MAX_ORBIT);
        let angle_deg = random_in(rng, 0.0, 360.0) + index as f32 * RING_ANGLE_STEP_DEG;
        let spin_deg = random_in(rng, RING_MIN_SPIN_DEG, RING_MAX_SPIN_DEG);
        Self::new(orbit_radius, angle_deg.to_radians(), spin_deg.to_radians())
    }

    #[inline]
    pub fn health(&self) -> i32 {
        self.health
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Apply damage. Returns true if this hit destroyed the ring.
    ///
    /// Destroyed rings ignore further damage.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.active {
            return false;
        }

        self.health -= amount;
        if self.health <= 0 {
            self.health = 0;
            self.active = false;
            return true;
        }
        false
    }

    /// World position given the owning planet's center
    pub fn world_position(&self, planet_center: Vec2) -> Vec2 {
        planet_center + direction_from_angle(self.angle) * self.orbit_radius
    }

    /// Patrol: advance orbit and self rotation, look straight ahead
    pub fn advance_orbit(&mut self, dt: f32) {
        self.angle = wrap_angle(self.angle + self.rotation_speed * dt);
        self.self_angle = wrap_angle(self.self_angle + self.self_rotation_speed * dt);
        self.yaw_angle = 0.0;
    }

    /// Engage: hold position and face `yaw` (radians)
    pub fn face(&mut self, yaw: f32) {
        self.yaw_angle = yaw;
    }
}
