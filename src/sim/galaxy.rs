//! The galaxy: star chunks, planets, rings and their bullets
//!
//! `Galaxy::update` is the per-frame world step. The spaceship is not owned
//! here; it is lent to `update` for the duration of the frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bullet::{Bullet, Shooter};
use super::camera::Camera;
use super::collision::planar_distance;
use super::explosion::{ExplosionEffect, update_explosions};
use super::planet::{Planet, place_planets};
use super::spaceship::Spaceship;
use super::starfield::StarField;
use super::state::GameEvent;
use crate::angle_between_points;
use crate::consts::*;
use crate::settings::Settings;

/// World state shared by every frame
#[derive(Debug, Clone)]
pub struct Galaxy {
    starfield: StarField,
    planets: Vec<Planet>,
    /// Ring-fired bullets (the ship keeps its own)
    bullets: Vec<Bullet>,
    explosions: Vec<ExplosionEffect>,
    /// Shared cooldown for every ring currently engaging the ship
    fire_timer: f32,
    /// Gameplay randomness (placement, debris, twinkle). Star chunks never
    /// draw from it.
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl Galaxy {
    /// Build a galaxy from settings: seeded planet placement, empty star field
    pub fn new(settings: &Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let planets = place_planets(settings.num_planets, &mut rng);
        let starfield = StarField::new(
            settings.chunk_size,
            settings.stars_per_chunk(),
            settings.render_distance,
        );

        log::info!(
            "Galaxy created: seed {}, {} planets, {} rings",
            settings.seed,
            planets.len(),
            planets.iter().map(|p| p.rings.len()).sum::<usize>()
        );

        Self::with_planets(starfield, planets, rng)
    }

    /// Build a galaxy around hand-placed planets
    pub fn with_planets(starfield: StarField, planets: Vec<Planet>, rng: Pcg32) -> Self {
        Self {
            starfield,
            planets,
            bullets: Vec::new(),
            explosions: Vec::new(),
            fire_timer: 0.0,
            rng,
            events: Vec::new(),
        }
    }

    pub fn starfield(&self) -> &StarField {
        &self.starfield
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn planets_mut(&mut self) -> &mut [Planet] {
        &mut self.planets
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn explosions(&self) -> &[ExplosionEffect] {
        &self.explosions
    }

    /// Events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Fire a ring bullet from `origin` toward `target`.
    /// Returns false if the two points coincide (no direction to fire in).
    pub fn fire_bullet(&mut self, origin: Vec2, target: Vec2) -> bool {
        match aimed_bullet(origin, target) {
            Some(bullet) => {
                self.bullets.push(bullet);
                true
            }
            None => false,
        }
    }

    /// Advance the world by `dt` seconds
    pub fn update(&mut self, dt: f32, camera: &Camera, ship: Option<&mut Spaceship>) {
        update_explosions(&mut self.explosions, dt);

        self.starfield.update_visible_chunks(camera.position);

        if let Some(ship) = ship {
            self.resolve_ship_hits(ship);
            self.update_planets(dt, ship);
        }

        for bullet in &mut self.bullets {
            bullet.update(dt);
        }
        self.bullets.retain(Bullet::is_active);

        self.starfield.twinkle(&mut self.rng);
    }

    /// Ring bullets against the ship: each hit damages it and is removed.
    /// A wreck still absorbs bullets but reports no further hits.
    fn resolve_ship_hits(&mut self, ship: &mut Spaceship) {
        let ship_pos = ship.planar_pos();
        let before = self.bullets.len();
        self.bullets.retain(|b| !b.hits_ship(ship_pos));
        let hits = before - self.bullets.len();

        for _ in 0..hits {
            if !ship.is_alive() {
                break;
            }
            ship.take_damage(Bullet::DAMAGE);
            self.events.push(GameEvent::ShipHit {
                health: ship.health,
            });
        }
    }

    /// Collection, ship bullets against rings, and ring behaviour
    fn update_planets(&mut self, dt: f32, ship: &mut Spaceship) {
        let ship_pos = ship.planar_pos();
        let mut timer_ticked = false;

        for (planet_index, planet) in self.planets.iter_mut().enumerate() {
            if planet.refresh_collectable() {
                log::info!("Planet {} is collectable", planet_index);
                self.events.push(GameEvent::PlanetCollectable {
                    planet: planet_index,
                });
            }

            if planet.try_collect(ship_pos) {
                ship.replenish();
                log::info!("Planet {} collected, ship replenished", planet_index);
                self.events.push(GameEvent::PlanetCollected {
                    planet: planet_index,
                });
            }

            let center = planet.center();
            for (ring_index, ring) in planet.rings.iter_mut().enumerate() {
                if !ring.is_active() {
                    continue;
                }

                let ring_pos = ring.world_position(center);

                for bullet in ship.bullets_mut() {
                    if !bullet.hits_ring(ring_pos) {
                        continue;
                    }
                    bullet.deactivate();
                    if ring.take_damage(Bullet::DAMAGE) {
                        self.explosions
                            .push(ExplosionEffect::new(ring_pos.extend(0.0), &mut self.rng));
                        log::info!("Ring {} of planet {} destroyed", ring_index, planet_index);
                        self.events.push(GameEvent::RingDestroyed {
                            planet: planet_index,
                            ring: ring_index,
                        });
                        break;
                    }
                }

                if !ring.is_active() {
                    continue;
                }

                let distance = planar_distance(ship_pos, ring_pos);
                if distance < INFLUENCE_RADIUS && ship.is_alive() {
                    if let Some(yaw) = angle_between_points(ring_pos, ship_pos) {
                        ring.face(yaw);
                    }

                    // One shared schedule: the timer ticks once per frame no
                    // matter how many rings are engaged
                    if !timer_ticked {
                        self.fire_timer -= dt;
                        timer_ticked = true;
                    }
                    if self.fire_timer <= 0.0 {
                        if let Some(bullet) = aimed_bullet(ring_pos, ship_pos) {
                            self.bullets.push(bullet);
                            self.events.push(GameEvent::RingFired {
                                planet: planet_index,
                                ring: ring_index,
                            });
                        }
                        self.fire_timer = RING_FIRE_RATE;
                    }
                } else {
                    ring.advance_orbit(dt);
                }
            }
        }
    }
}

fn aimed_bullet(origin: Vec2, target: Vec2) -> Option<Bullet> {
    angle_between_points(origin, target).map(|angle| Bullet::new(origin, angle, Shooter::Ring))
}
