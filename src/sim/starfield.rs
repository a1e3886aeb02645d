//! Chunk-streamed procedural star field
//!
//! World space is cut into cubes of `chunk_size`. Only chunks within a
//! Chebyshev radius of the camera chunk are resident; the rest are evicted and
//! regenerated on demand.
//!
//! Generation is a pure function of the chunk key: every chunk builds its own
//! generator seeded from a spatial hash of its coordinates, so revisiting a
//! chunk always produces the same stars no matter what was generated before.

use std::collections::BTreeMap;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::random_in;

/// Integer coordinates of a chunk. Ordered by x, then y, then z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChunkKey {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkKey {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Largest per-axis index difference (cube-shaped distance)
    pub fn chebyshev_distance(&self, other: &ChunkKey) -> i32 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }

    /// Minimum corner of the chunk's bounding box
    pub fn min_corner(&self, chunk_size: f32) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32) * chunk_size
    }
}

/// Spatial hash of a chunk key, used as the chunk's RNG seed
pub fn chunk_seed(key: ChunkKey) -> u64 {
    let hash = (key.x as u32)
        .wrapping_mul(73_856_093)
        .wrapping_add((key.y as u32).wrapping_mul(19_349_663))
        .wrapping_add((key.z as u32).wrapping_mul(83_492_791));
    hash as u64
}

/// A background star
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec3,
    pub brightness: f32,
    pub size: f32,
    pub color: [f32; 3],
}

impl Star {
    /// Roll a star somewhere inside the box starting at `min` with edge `size`
    fn random<R: Rng + ?Sized>(min: Vec3, size: f32, rng: &mut R) -> Self {
        let pos = Vec3::new(
            random_in(rng, min.x, min.x + size),
            random_in(rng, min.y, min.y + size),
            random_in(rng, min.z, min.z + size),
        );

        // Squaring biases toward dim stars
        let brightness = rng.random::<f32>().powi(2);

        let size_roll = rng.random::<f32>();
        let size = if size_roll > 0.99 {
            random_in(rng, 2.0, 3.0)
        } else if size_roll > 0.95 {
            random_in(rng, 1.0, 2.0)
        } else {
            random_in(rng, 0.1, 1.0)
        };

        let color_roll = rng.random::<f32>();
        let color = if color_roll > 0.95 {
            // Red giant
            [
                random_in(rng, 0.8, 1.0),
                random_in(rng, 0.0, 0.3),
                random_in(rng, 0.0, 0.2),
            ]
        } else if color_roll > 0.90 {
            // Blue
            [
                random_in(rng, 0.0, 0.4),
                random_in(rng, 0.0, 0.4),
                random_in(rng, 0.8, 1.0),
            ]
        } else {
            // White / yellow
            let base = random_in(rng, 0.7, 1.0);
            [base, base, random_in(rng, base, 1.0)]
        };

        Self {
            pos,
            brightness,
            size,
            color,
        }
    }

    /// Occasionally jitter brightness
    pub fn twinkle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if rng.random::<f32>() < TWINKLE_CHANCE {
            self.brightness = (self.brightness * random_in(rng, 0.5, 1.5))
                .clamp(MIN_BRIGHTNESS, MAX_BRIGHTNESS);
        }
    }
}

/// The stars of one chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub key: ChunkKey,
    pub stars: Vec<Star>,
}

/// Generate the stars of `key`. Pure: equal inputs give equal chunks.
pub fn generate_chunk(key: ChunkKey, chunk_size: f32, stars_per_chunk: usize) -> Chunk {
    let mut rng = Pcg32::seed_from_u64(chunk_seed(key));
    let min = key.min_corner(chunk_size);
    let stars = (0..stars_per_chunk)
        .map(|_| Star::random(min, chunk_size, &mut rng))
        .collect();
    Chunk { key, stars }
}

/// Resident star chunks around the camera
#[derive(Debug, Clone)]
pub struct StarField {
    pub chunk_size: f32,
    pub stars_per_chunk: usize,
    pub render_distance: i32,
    chunks: BTreeMap<ChunkKey, Chunk>,
}

impl Default for StarField {
    fn default() -> Self {
        Self::new(CHUNK_SIZE, STARS_PER_CHUNK, RENDER_DISTANCE)
    }
}

impl StarField {
    pub fn new(chunk_size: f32, stars_per_chunk: usize, render_distance: i32) -> Self {
        Self {
            chunk_size,
            stars_per_chunk,
            render_distance,
            chunks: BTreeMap::new(),
        }
    }

    /// Chunk containing a world position
    pub fn chunk_from_position(&self, pos: Vec3) -> ChunkKey {
        ChunkKey::new(
            (pos.x / self.chunk_size).floor() as i32,
            (pos.y / self.chunk_size).floor() as i32,
            (pos.z / self.chunk_size).floor() as i32,
        )
    }

    /// Evict chunks outside the render distance of the camera chunk and
    /// generate the missing ones inside it. Returns (evicted, created).
    pub fn update_visible_chunks(&mut self, camera_pos: Vec3) -> (usize, usize) {
        let center = self.chunk_from_position(camera_pos);
        let radius = self.render_distance;

        let before = self.chunks.len();
        self.chunks.retain(|key, _| key.chebyshev_distance(&center) <= radius);
        let evicted = before - self.chunks.len();

        let mut created = 0;
        for x in center.x - radius..=center.x + radius {
            for y in center.y - radius..=center.y + radius {
                for z in center.z - radius..=center.z + radius {
                    let key = ChunkKey::new(x, y, z);
                    if !self.chunks.contains_key(&key) {
                        let chunk = generate_chunk(key, self.chunk_size, self.stars_per_chunk);
                        self.chunks.insert(key, chunk);
                        created += 1;
                    }
                }
            }
        }

        if evicted > 0 || created > 0 {
            log::debug!(
                "Star chunks around {:?}: -{} +{} ({} resident)",
                center,
                evicted,
                created,
                self.chunks.len()
            );
        }

        (evicted, created)
    }

    /// Give every resident star its chance to twinkle
    pub fn twinkle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for chunk in self.chunks.values_mut() {
            for star in &mut chunk.stars {
                star.twinkle(rng);
            }
        }
    }

    pub fn get(&self, key: &ChunkKey) -> Option<&Chunk> {
        self.chunks.get(key)
    }

    pub fn contains(&self, key: &ChunkKey) -> bool {
        self.chunks.contains_key(key)
    }

    /// Resident chunks in key order
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Every resident star
    pub fn stars(&self) -> impl Iterator<Item = &Star> {
        self.chunks.values().flat_map(|c| c.stars.iter())
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn small_field() -> StarField {
        StarField::new(CHUNK_SIZE, 1, RENDER_DISTANCE)
    }

    #[test]
    fn test_chunk_from_position_floors() {
        let field = small_field();
        assert_eq!(
            field.chunk_from_position(Vec3::new(0.0, 99.9, 100.0)),
            ChunkKey::new(0, 0, 1)
        );
        assert_eq!(
            field.chunk_from_position(Vec3::new(-0.1, -100.0, -100.1)),
            ChunkKey::new(-1, -1, -2)
        );
    }

    #[test]
    fn test_key_ordering_is_lexicographic() {
        let mut keys = vec![
            ChunkKey::new(1, 0, 0),
            ChunkKey::new(0, 2, -1),
            ChunkKey::new(0, 2, -3),
            ChunkKey::new(-1, 5, 5),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                ChunkKey::new(-1, 5, 5),
                ChunkKey::new(0, 2, -3),
                ChunkKey::new(0, 2, -1),
                ChunkKey::new(1, 0, 0),
            ]
        );
    }

    #[test]
    fn test_window_is_exact_chebyshev_ball() {
        let mut field = small_field();
        let camera = Vec3::new(250.0, -30.0, 1020.0);
        field.update_visible_chunks(camera);

        let center = field.chunk_from_position(camera);
        let side = (2 * RENDER_DISTANCE + 1) as usize;
        assert_eq!(field.len(), side * side * side);
        for chunk in field.chunks() {
            assert!(chunk.key.chebyshev_distance(&center) <= RENDER_DISTANCE);
        }
        assert!(field.contains(&ChunkKey::new(center.x + 5, center.y - 5, center.z + 5)));
        assert!(!field.contains(&ChunkKey::new(center.x + 6, center.y, center.z)));
    }

    #[test]
    fn test_window_moves_with_camera() {
        let mut field = small_field();
        field.update_visible_chunks(Vec3::ZERO);
        let (evicted, created) = field.update_visible_chunks(Vec3::new(CHUNK_SIZE * 1.5, 0.0, 0.0));

        let face = ((2 * RENDER_DISTANCE + 1) * (2 * RENDER_DISTANCE + 1)) as usize;
        assert_eq!(evicted, face);
        assert_eq!(created, face);
        assert!(!field.contains(&ChunkKey::new(-RENDER_DISTANCE, 0, 0)));
        assert!(field.contains(&ChunkKey::new(RENDER_DISTANCE + 1, 0, 0)));
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut field = small_field();
        field.update_visible_chunks(Vec3::new(10.0, 10.0, 10.0));
        let snapshot: Vec<Chunk> = field.chunks().cloned().collect();

        assert_eq!(field.update_visible_chunks(Vec3::new(10.0, 10.0, 10.0)), (0, 0));
        let again: Vec<Chunk> = field.chunks().cloned().collect();
        assert_eq!(snapshot, again);
    }

    #[test]
    fn test_revisited_chunk_regenerates_identically() {
        let mut field = StarField::new(CHUNK_SIZE, 20, 1);
        field.update_visible_chunks(Vec3::ZERO);
        let original = field.get(&ChunkKey::new(0, 0, 0)).cloned().unwrap();

        // Fly far away so the origin chunk is evicted, then come back
        field.update_visible_chunks(Vec3::new(5000.0, 0.0, 0.0));
        assert!(!field.contains(&ChunkKey::new(0, 0, 0)));
        field.update_visible_chunks(Vec3::ZERO);

        assert_eq!(field.get(&ChunkKey::new(0, 0, 0)), Some(&original));
    }

    #[test]
    fn test_stars_have_varied_attributes() {
        let chunk = generate_chunk(ChunkKey::new(3, -2, 7), CHUNK_SIZE, 200);
        let first = &chunk.stars[0];
        assert!(
            chunk.stars.iter().any(|s| s.brightness != first.brightness),
            "each star rolls its own attributes"
        );
    }

    #[test]
    fn test_twinkle_stays_in_range() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = StarField::new(CHUNK_SIZE, 50, 1);
        field.update_visible_chunks(Vec3::ZERO);
        for _ in 0..200 {
            field.twinkle(&mut rng);
        }
        for star in field.stars() {
            assert!(star.brightness >= 0.0 && star.brightness <= MAX_BRIGHTNESS);
        }
    }

    #[test]
    fn test_twinkle_jitters_and_clamps() {
        let mut rng = Pcg32::seed_from_u64(9);

        // (start, lowest and highest value a twinkle may produce)
        let cases = [
            (0.01, MIN_BRIGHTNESS, MIN_BRIGHTNESS),
            (0.5, 0.25, 0.75),
            (0.99, 0.495, MAX_BRIGHTNESS),
        ];
        for (start, low, high) in cases {
            let mut changed = 0;
            let mut unchanged = 0;
            for _ in 0..5000 {
                let mut star = Star {
                    pos: Vec3::ZERO,
                    brightness: start,
                    size: 1.0,
                    color: [1.0; 3],
                };
                star.twinkle(&mut rng);
                if star.brightness == start {
                    unchanged += 1;
                    continue;
                }
                changed += 1;
                assert!(
                    star.brightness >= low - 1e-6 && star.brightness <= high + 1e-6,
                    "{start} twinkled to {}",
                    star.brightness
                );
            }
            assert!(changed > 0, "{start} never twinkled");
            assert!(unchanged > changed, "twinkling is occasional");
        }
    }

    proptest! {
        #[test]
        fn prop_generation_is_pure(x in -1000i32..1000, y in -1000i32..1000, z in -1000i32..1000) {
            let key = ChunkKey::new(x, y, z);
            // Unrelated generation in between must not matter
            let first = generate_chunk(key, CHUNK_SIZE, 8);
            let _ = generate_chunk(ChunkKey::new(y, z, x), CHUNK_SIZE, 8);
            let second = generate_chunk(key, CHUNK_SIZE, 8);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_stars_stay_in_their_chunk(x in -50i32..50, y in -50i32..50, z in -50i32..50) {
            let key = ChunkKey::new(x, y, z);
            let min = key.min_corner(CHUNK_SIZE);
            for star in generate_chunk(key, CHUNK_SIZE, 16).stars {
                let local = star.pos - min;
                prop_assert!(local.min_element() >= -1e-3);
                prop_assert!(local.max_element() <= CHUNK_SIZE + 1e-3);
                prop_assert!(star.brightness >= 0.0 && star.brightness < 1.0);
                prop_assert!(star.size >= 0.1 && star.size < 3.0);
            }
        }

        #[test]
        fn prop_position_maps_into_its_chunk(
            px in -1.0e5f32..1.0e5,
            py in -1.0e5f32..1.0e5,
            pz in -1.0e5f32..1.0e5,
        ) {
            let field = small_field();
            let key = field.chunk_from_position(Vec3::new(px, py, pz));
            let min = key.min_corner(CHUNK_SIZE);
            prop_assert!(px >= min.x - 1e-2 && px <= min.x + CHUNK_SIZE + 1e-2);
            prop_assert!(py >= min.y - 1e-2 && py <= min.y + CHUNK_SIZE + 1e-2);
            prop_assert!(pz >= min.z - 1e-2 && pz <= min.z + CHUNK_SIZE + 1e-2);
        }
    }
}
