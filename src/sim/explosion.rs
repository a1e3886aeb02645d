//! Stick-burst explosion effect
//!
//! Purely cosmetic. An effect is spawned when a ring or the ship dies and is
//! dropped by its owner once every stick has faded out.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::consts::*;
use crate::random_in;

/// One spinning debris stick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stick {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Orientation (degrees per axis)
    pub rotation: Vec3,
    /// Rotation velocity (degrees/s per axis)
    pub spin: Vec3,
    pub length: f32,
    /// Seconds left before the stick disappears
    pub lifetime: f32,
    /// 1.0 at spawn, fading linearly to 0.0
    pub alpha: f32,
}

/// A burst of sticks flying out from a point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionEffect {
    pub sticks: Vec<Stick>,
}

impl ExplosionEffect {
    /// Spawn a burst at `origin`
    pub fn new<R: Rng + ?Sized>(origin: Vec3, rng: &mut R) -> Self {
        let sticks = (0..EXPLOSION_STICKS)
            .map(|_| {
                let azimuth = random_in(rng, 0.0, TAU);
                let elevation = random_in(rng, -FRAC_PI_2, FRAC_PI_2);
                let speed = random_in(rng, EXPLOSION_MAX_VELOCITY * 0.5, EXPLOSION_MAX_VELOCITY);

                let vel = Vec3::new(
                    elevation.cos() * azimuth.cos(),
                    elevation.cos() * azimuth.sin(),
                    elevation.sin(),
                ) * speed;

                let max_spin = EXPLOSION_MAX_ROT_VELOCITY;
                let spin = Vec3::new(
                    random_in(rng, -max_spin, max_spin),
                    random_in(rng, -max_spin, max_spin),
                    random_in(rng, -max_spin, max_spin),
                );
                let rotation = Vec3::new(
                    random_in(rng, 0.0, 360.0),
                    random_in(rng, 0.0, 360.0),
                    random_in(rng, 0.0, 360.0),
                );

                Stick {
                    pos: origin,
                    vel,
                    rotation,
                    spin,
                    length: random_in(rng, STICK_LENGTH_MIN, STICK_LENGTH_MAX),
                    lifetime: STICK_LIFETIME,
                    alpha: 1.0,
                }
            })
            .collect();

        Self { sticks }
    }

    /// Integrate every stick and drop the ones whose lifetime ran out
    pub fn update(&mut self, dt: f32) {
        for stick in &mut self.sticks {
            stick.pos += stick.vel * dt;
            stick.rotation += stick.spin * dt;
            stick.lifetime -= dt;
            stick.alpha = stick.lifetime / STICK_LIFETIME;
        }
        self.sticks.retain(|s| s.lifetime > 0.0);
    }

    /// Active while any stick is still visible
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.sticks.is_empty()
    }
}

/// Advance a collection of effects and remove the finished ones
pub fn update_explosions(explosions: &mut Vec<ExplosionEffect>, dt: f32) {
    for explosion in explosions.iter_mut() {
        explosion.update(dt);
    }
    explosions.retain(ExplosionEffect::is_active);
}
