//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Elapsed time is always seconds
//! - Seeded RNG only (star chunks get their own per-chunk generator)
//! - Stable iteration order (chunks in key order, entities in spawn order)

pub mod bullet;
pub mod camera;
pub mod collision;
pub mod explosion;
pub mod galaxy;
pub mod planet;
pub mod ring;
pub mod spaceship;
pub mod starfield;
pub mod state;
pub mod tick;

pub use bullet::{Bullet, Shooter};
pub use camera::{Camera, CameraRig};
pub use collision::{circle_contains, planar_distance};
pub use explosion::{ExplosionEffect, Stick};
pub use galaxy::Galaxy;
pub use planet::{Planet, place_planets};
pub use ring::Ring;
pub use spaceship::Spaceship;
pub use starfield::{Chunk, ChunkKey, Star, StarField, chunk_seed, generate_chunk};
pub use state::{GameEvent, GamePhase, GameSession, SessionStats};
pub use tick::{TickInput, tick};
