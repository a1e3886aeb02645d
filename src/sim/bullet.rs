//! Projectiles fired by the spaceship and by rings

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::circle_contains;
use crate::consts::*;
use crate::direction_from_angle;

/// Who fired a bullet. Decides speed, size and which targets it can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shooter {
    Ship,
    Ring,
}

impl Shooter {
    /// Travel speed in units per second
    pub fn speed(self) -> f32 {
        match self {
            Shooter::Ship => SHIP_BULLET_SPEED,
            Shooter::Ring => RING_BULLET_SPEED,
        }
    }
}

/// A bullet travelling on the play plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub shooter: Shooter,
    /// Seconds since the bullet was fired
    pub age: f32,
    active: bool,
}

impl Bullet {
    pub const DAMAGE: i32 = BULLET_DAMAGE;

    /// Fire a bullet from `origin` heading along `angle` (radians)
    pub fn new(origin: Vec2, angle: f32, shooter: Shooter) -> Self {
        Self {
            pos: origin,
            vel: direction_from_angle(angle) * shooter.speed(),
            shooter,
            age: 0.0,
            active: true,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Consume the bullet (hit something)
    #[inline]
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Advance position and expire once older than the lifetime
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }

        self.pos += self.vel * dt;
        self.age += dt;

        if self.age > BULLET_LIFETIME {
            self.active = false;
        }
    }

    /// Check if this bullet hits a ship centered at `ship_pos`
    pub fn check_ship_collision(&self, ship_pos: Vec2, radius: f32) -> bool {
        self.active && circle_contains(ship_pos, radius, self.pos)
    }

    /// Check if this bullet hits a ring centered at `ring_pos`
    pub fn check_ring_collision(&self, ring_pos: Vec2, radius: f32) -> bool {
        self.active && circle_contains(ring_pos, radius, self.pos)
    }

    /// Ship hit test with the default hit radius
    pub fn hits_ship(&self, ship_pos: Vec2) -> bool {
        self.check_ship_collision(ship_pos, SHIP_HIT_RADIUS)
    }

    /// Ring hit test with the default hit radius
    pub fn hits_ring(&self, ring_pos: Vec2) -> bool {
        self.check_ring_collision(ring_pos, RING_HIT_RADIUS)
    }
}
