//! Ring Raider - A chunk-streamed starfield arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (star chunks, planets, rings, bullets, spaceship)
//! - `renderer`: CPU-side vertex data built from simulation state
//! - `settings`: World configuration loaded from JSON
//! - `ui`: HUD element model (text, buttons, hit testing)

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::{QualityPreset, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Edge length of a cubic star chunk (world units)
    pub const CHUNK_SIZE: f32 = 100.0;
    /// Chebyshev radius (in chunks) kept resident around the camera
    pub const RENDER_DISTANCE: i32 = 5;
    /// Stars generated per chunk at the default quality
    pub const STARS_PER_CHUNK: usize = 200;
    /// Per-frame probability that a star twinkles
    pub const TWINKLE_CHANCE: f32 = 0.01;
    /// Twinkled brightness is clamped to this range
    pub const MIN_BRIGHTNESS: f32 = 0.1;
    pub const MAX_BRIGHTNESS: f32 = 1.0;

    /// Planet placement
    pub const NUM_PLANETS: usize = 10;
    pub const MIN_PLANET_DISTANCE: f32 = 150.0;
    pub const PLANET_SPAWN_RANGE: f32 = 300.0;
    /// Give up on rejection sampling after this many attempts per planet
    pub const PLANET_PLACEMENT_ATTEMPTS: u32 = 10_000;
    /// Distance at which the ship picks up a collectable planet
    pub const COLLECTION_RADIUS: f32 = 5.0;

    /// Rings
    pub const RING_INITIAL_HEALTH: i32 = 10;
    pub const MIN_RINGS_PER_PLANET: u32 = 2;
    pub const MAX_RINGS_PER_PLANET: u32 = 6;
    pub const RING_MIN_ORBIT: f32 = 15.0;
    pub const RING_MAX_ORBIT: f32 = 25.0;
    /// Orbit speed (degrees/s)
    pub const RING_ORBIT_SPEED_DEG: f32 = 10.0;
    /// Self-rotation speed range (degrees/s)
    pub const RING_MIN_SPIN_DEG: f32 = 5.0;
    pub const RING_MAX_SPIN_DEG: f32 = 15.0;
    /// Extra starting-angle offset between successive rings (degrees)
    pub const RING_ANGLE_STEP_DEG: f32 = 45.0;
    /// Distance at which rings stop orbiting and engage the ship
    pub const INFLUENCE_RADIUS: f32 = 30.0;
    /// Shared cooldown between ring shots (seconds)
    pub const RING_FIRE_RATE: f32 = 0.1;

    /// Bullets
    pub const BULLET_DAMAGE: i32 = 1;
    pub const BULLET_LIFETIME: f32 = 1.0;
    pub const SHIP_BULLET_SPEED: f32 = 50.0;
    pub const RING_BULLET_SPEED: f32 = 100.0;
    /// Hit radius of a ring bullet against the ship
    pub const SHIP_HIT_RADIUS: f32 = 4.0;
    /// Hit radius of a ship bullet against a ring center
    pub const RING_HIT_RADIUS: f32 = 3.0;

    /// Spaceship
    pub const SHIP_MAX_HEALTH: i32 = 100;
    pub const SHIP_MAX_AMMO: u32 = 100;
    pub const SHIP_MAX_SPEED: f32 = 100.0;
    pub const SHIP_ACCELERATION: f32 = 4.0;
    /// Multiplicative velocity decay applied every frame
    pub const SHIP_DECELERATION: f32 = 0.98;
    /// Velocity components below this snap to zero
    pub const SHIP_STOP_THRESHOLD: f32 = 0.01;
    pub const SHIP_FIRE_RATE: f32 = 0.065;

    /// Explosions
    pub const EXPLOSION_STICKS: usize = 10;
    pub const EXPLOSION_MAX_VELOCITY: f32 = 20.0;
    /// Rotation velocity bound (degrees/s)
    pub const EXPLOSION_MAX_ROT_VELOCITY: f32 = 360.0;
    pub const STICK_LENGTH_MIN: f32 = 3.0;
    pub const STICK_LENGTH_MAX: f32 = 7.0;
    pub const STICK_LIFETIME: f32 = 2.0;

    /// Camera follow
    pub const CAMERA_DISTANCE: f32 = 150.0;
    pub const CAMERA_HEIGHT: f32 = 0.0;
    pub const CAMERA_INITIAL_ZOOM: f32 = 1500.0;
    pub const CAMERA_ZOOM_DURATION: f32 = 2.0;
    pub const CAMERA_LAG: f32 = 0.05;

    /// Virtual screen used for aiming
    pub const VIRTUAL_WIDTH: f32 = 1024.0;
    pub const VIRTUAL_HEIGHT: f32 = 768.0;
}

/// Normalized angle to [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU { 0.0 } else { wrapped }
}

/// Unit vector pointing along `angle` (radians)
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle (radians) of the vector from `from` to `to`, or `None` if they coincide
#[inline]
pub fn angle_between_points(from: Vec2, to: Vec2) -> Option<f32> {
    let delta = to - from;
    if delta.length_squared() <= f32::EPSILON {
        None
    } else {
        Some(delta.y.atan2(delta.x))
    }
}

/// Uniform sample in `[min, max)`; tolerates `min == max`
#[inline]
pub fn random_in<R: rand::Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}
