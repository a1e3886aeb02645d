//! The player's spaceship

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bullet::{Bullet, Shooter};
use super::explosion::{ExplosionEffect, update_explosions};
use crate::angle_between_points;
use crate::consts::*;

/// Player ship: kinematics, health, ammo, and its own bullets and wreck
#[derive(Debug, Clone)]
pub struct Spaceship {
    pub pos: Vec3,
    pub vel: Vec2,
    /// Aim direction (radians); bullets leave along it
    pub facing: f32,
    pub health: i32,
    pub ammo: u32,
    fire_timer: f32,
    alive: bool,
    bullets: Vec<Bullet>,
    explosions: Vec<ExplosionEffect>,
    rng: Pcg32,
}

impl Spaceship {
    /// Fresh ship at the origin. `seed` drives its explosion debris.
    pub fn new(seed: u64) -> Self {
        Self {
            pos: Vec3::ZERO,
            vel: Vec2::ZERO,
            facing: 0.0,
            health: SHIP_MAX_HEALTH,
            ammo: SHIP_MAX_AMMO,
            fire_timer: 0.0,
            alive: true,
            bullets: Vec::new(),
            explosions: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Position on the play plane
    #[inline]
    pub fn planar_pos(&self) -> Vec2 {
        self.pos.truncate()
    }

    pub fn set_position(&mut self, pos: Vec3) {
        self.pos = pos;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn bullets_mut(&mut self) -> &mut [Bullet] {
        &mut self.bullets
    }

    pub fn explosions(&self) -> &[ExplosionEffect] {
        &self.explosions
    }

    /// Accelerate along `dir`, never exceeding the top speed
    pub fn move_by(&mut self, dir: Vec2) {
        self.vel += dir * SHIP_ACCELERATION;

        let speed = self.vel.length();
        if speed > SHIP_MAX_SPEED {
            self.vel *= SHIP_MAX_SPEED / speed;
        }
    }

    /// Point the ship at a screen-space target relative to `screen_center`
    /// (y up). A target on the center keeps the current facing.
    pub fn look_at(&mut self, target: Vec2, screen_center: Vec2) {
        if let Some(angle) = angle_between_points(screen_center, target) {
            self.facing = angle;
        }
    }

    /// Subtract health. The first time health reaches zero the ship explodes
    /// and stays dead.
    pub fn take_damage(&mut self, amount: i32) {
        if !self.alive {
            return;
        }

        self.health -= amount;
        if self.health <= 0 {
            self.health = 0;
            self.alive = false;
            let origin = self.planar_pos().extend(0.0);
            self.explosions.push(ExplosionEffect::new(origin, &mut self.rng));
            log::info!("Spaceship destroyed at ({:.1}, {:.1})", origin.x, origin.y);
        }
    }

    /// Refill health and ammo to their maxima
    pub fn replenish(&mut self) {
        self.health = SHIP_MAX_HEALTH;
        self.ammo = SHIP_MAX_AMMO;
    }

    /// Advance one frame. `trigger` is the fire button state.
    /// Returns true if a bullet was fired.
    pub fn update(&mut self, dt: f32, trigger: bool) -> bool {
        update_explosions(&mut self.explosions, dt);

        for bullet in &mut self.bullets {
            bullet.update(dt);
        }
        self.bullets.retain(Bullet::is_active);

        if !self.alive {
            return false;
        }

        self.pos += (self.vel * dt).extend(0.0);

        // Frame-based drag, then kill residual drift
        self.vel *= SHIP_DECELERATION;
        if self.vel.x.abs() < SHIP_STOP_THRESHOLD {
            self.vel.x = 0.0;
        }
        if self.vel.y.abs() < SHIP_STOP_THRESHOLD {
            self.vel.y = 0.0;
        }

        self.fire_timer -= dt;
        if trigger && self.fire_timer <= 0.0 {
            self.fire_timer = SHIP_FIRE_RATE;
            return self.fire_bullet();
        }
        false
    }

    fn fire_bullet(&mut self) -> bool {
        if self.ammo == 0 {
            return false;
        }
        self.ammo -= 1;
        self.bullets.push(Bullet::new(self.planar_pos(), self.facing, Shooter::Ship));
        true
    }
}
