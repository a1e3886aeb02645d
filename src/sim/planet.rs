//! Planets and their placement

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::planar_distance;
use super::ring::Ring;
use crate::consts::*;
use crate::random_in;

/// A planet guarded by rings. Once every ring is destroyed the planet becomes
/// collectable; flying into it collects it and refills the ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
    pub pos: Vec3,
    pub rings: Vec<Ring>,
    collectable: bool,
    collected: bool,
}

impl Planet {
    pub fn new(pos: Vec3, rings: Vec<Ring>) -> Self {
        Self {
            pos,
            rings,
            collectable: false,
            collected: false,
        }
    }

    /// Planet center on the play plane
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos.truncate()
    }

    pub fn has_active_rings(&self) -> bool {
        self.rings.iter().any(Ring::is_active)
    }

    #[inline]
    pub fn is_collectable(&self) -> bool {
        self.collectable
    }

    #[inline]
    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Latch the collectable flag once no ring is left.
    /// Returns true only on the update that flips it.
    pub fn refresh_collectable(&mut self) -> bool {
        if !self.collectable && !self.has_active_rings() {
            self.collectable = true;
            return true;
        }
        false
    }

    /// Collect the planet if the ship is close enough.
    /// Returns true only on the update that flips it.
    pub fn try_collect(&mut self, ship_pos: Vec2) -> bool {
        if !self.collectable || self.collected {
            return false;
        }
        if planar_distance(ship_pos, self.center()) < COLLECTION_RADIUS {
            self.collected = true;
            return true;
        }
        false
    }
}

/// Scatter `count` planets in the spawn cube, keeping them at least
/// `MIN_PLANET_DISTANCE` apart. Each planet gets 2-6 random rings.
pub fn place_planets<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Planet> {
    let mut planets: Vec<Planet> = Vec::with_capacity(count);

    for index in 0..count {
        let mut pos = random_spawn_point(rng);
        let mut attempts = 1;
        while !is_clear(pos, &planets) {
            if attempts >= PLANET_PLACEMENT_ATTEMPTS {
                log::warn!(
                    "Planet {} placed without clearance after {} attempts",
                    index,
                    attempts
                );
                break;
            }
            pos = random_spawn_point(rng);
            attempts += 1;
        }

        let ring_count = rng.random_range(MIN_RINGS_PER_PLANET..=MAX_RINGS_PER_PLANET);
        let rings = (0..ring_count).map(|i| Ring::random(i, rng)).collect();
        planets.push(Planet::new(pos, rings));
    }

    planets
}

fn random_spawn_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(
        random_in(rng, -PLANET_SPAWN_RANGE, PLANET_SPAWN_RANGE),
        random_in(rng, -PLANET_SPAWN_RANGE, PLANET_SPAWN_RANGE),
        random_in(rng, -PLANET_SPAWN_RANGE, PLANET_SPAWN_RANGE),
    )
}

fn is_clear(pos: Vec3, placed: &[Planet]) -> bool {
    placed
        .iter()
        .all(|other| other.pos.distance(pos) >= MIN_PLANET_DISTANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn bare_planet() -> Planet {
        Planet::new(Vec3::new(10.0, 20.0, 30.0), vec![Ring::new(20.0, 0.0, 0.1)])
    }

    #[test]
    fn test_placement_separation() {
        let mut rng = Pcg32::seed_from_u64(42);
        let planets = place_planets(NUM_PLANETS, &mut rng);
        assert_eq!(planets.len(), NUM_PLANETS);

        for (i, a) in planets.iter().enumerate() {
            assert!(a.pos.abs().max_element() <= PLANET_SPAWN_RANGE);
            let ring_count = a.rings.len() as u32;
            assert!((MIN_RINGS_PER_PLANET..=MAX_RINGS_PER_PLANET).contains(&ring_count));
            for b in &planets[i + 1..] {
                assert!(a.pos.distance(b.pos) >= MIN_PLANET_DISTANCE);
            }
        }
    }

    #[test]
    fn test_placement_is_seeded() {
        let a = place_planets(5, &mut Pcg32::seed_from_u64(9));
        let b = place_planets(5, &mut Pcg32::seed_from_u64(9));
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.rings.len(), pb.rings.len());
        }
    }

    #[test]
    fn test_collectable_latch() {
        let mut planet = bare_planet();
        assert!(!planet.refresh_collectable());

        planet.rings[0].take_damage(RING_INITIAL_HEALTH);
        assert!(planet.refresh_collectable());
        assert!(planet.is_collectable());
        assert!(!planet.refresh_collectable(), "latch only reports once");
    }

    #[test]
    fn test_collect_requires_collectable() {
        let mut planet = bare_planet();
        assert!(!planet.try_collect(planet.center()));

        planet.rings[0].take_damage(RING_INITIAL_HEALTH);
        planet.refresh_collectable();
        assert!(!planet.try_collect(planet.center() + Vec2::new(COLLECTION_RADIUS, 0.0)));
        assert!(planet.try_collect(planet.center() + Vec2::new(1.0, 1.0)));
        assert!(planet.is_collected());
        assert!(!planet.try_collect(planet.center()), "collected only once");
    }

    #[test]
    fn test_collect_ignores_depth() {
        let mut planet = bare_planet();
        planet.rings[0].take_damage(RING_INITIAL_HEALTH);
        planet.refresh_collectable();
        // Ship is on the z = 0 plane while the planet sits at z = 30
        assert!(planet.try_collect(Vec2::new(10.0, 20.0)));
    }
}
