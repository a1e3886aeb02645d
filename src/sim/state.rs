//! Session state and gameplay events
//!
//! A `GameSession` is everything one run needs: the galaxy, the ship, the
//! chase camera and the running stats.

use serde::{Deserialize, Serialize};

use super::camera::CameraRig;
use super::galaxy::Galaxy;
use super::spaceship::Spaceship;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ship alive with ammo left
    Playing,
    /// Ship destroyed or out of ammo; waiting for restart
    GameOver,
}

/// Something noteworthy that happened during a galaxy update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RingDestroyed { planet: usize, ring: usize },
    /// Last ring of a planet fell
    PlanetCollectable { planet: usize },
    PlanetCollected { planet: usize },
    /// Ship took a ring bullet; `health` is what is left
    ShipHit { health: i32 },
    RingFired { planet: usize, ring: usize },
}

/// Running totals for a session (kept across restarts)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub rings_destroyed: u32,
    pub planets_collected: u32,
    pub hits_taken: u32,
    /// Bullets fired by the player
    pub shots_fired: u32,
    /// Bullets fired by rings
    pub ring_shots: u32,
    pub restarts: u32,
}

impl SessionStats {
    pub fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::RingDestroyed { .. } => self.rings_destroyed += 1,
            GameEvent::PlanetCollectable { .. } => {}
            GameEvent::PlanetCollected { .. } => self.planets_collected += 1,
            GameEvent::ShipHit { .. } => self.hits_taken += 1,
            GameEvent::RingFired { .. } => self.ring_shots += 1,
        }
    }
}

/// One play session
#[derive(Debug, Clone)]
pub struct GameSession {
    pub settings: Settings,
    pub galaxy: Galaxy,
    pub ship: Spaceship,
    pub camera_rig: CameraRig,
    pub stats: SessionStats,
    pub phase: GamePhase,
    /// Frames simulated so far
    pub time_ticks: u64,
}

impl GameSession {
    /// Create a session; the galaxy layout comes from `settings.seed`
    pub fn new(settings: Settings) -> Self {
        let galaxy = Galaxy::new(&settings);
        let ship = Spaceship::new(ship_seed(settings.seed, 0));

        Self {
            settings,
            galaxy,
            ship,
            camera_rig: CameraRig::new(),
            stats: SessionStats::default(),
            phase: GamePhase::Playing,
            time_ticks: 0,
        }
    }

    /// Whether the ship can no longer play: destroyed or out of ammo
    pub fn is_game_over(&self) -> bool {
        !self.ship.is_alive() || self.ship.ammo == 0
    }

    /// Fresh ship at the origin and a replayed intro zoom. The galaxy keeps
    /// its destroyed rings and collected planets.
    pub fn restart(&mut self) {
        self.stats.restarts += 1;
        self.ship = Spaceship::new(ship_seed(self.settings.seed, self.stats.restarts));
        self.camera_rig.restart_zoom();
        self.phase = GamePhase::Playing;
        log::info!("Session restarted (restart #{})", self.stats.restarts);
    }
}

fn ship_seed(seed: u64, restarts: u32) -> u64 {
    seed.wrapping_add(1 + restarts as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn small_settings() -> Settings {
        Settings {
            seed: 11,
            stars_per_chunk: Some(2),
            render_distance: 1,
            ..Settings::default()
        }
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::new(small_settings());
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.galaxy.planets().len(), NUM_PLANETS);
        assert!(session.ship.is_alive());
        assert!(session.camera_rig.is_zooming());
        assert!(!session.is_game_over());
    }

    #[test]
    fn test_game_over_conditions() {
        let mut session = GameSession::new(small_settings());
        session.ship.ammo = 0;
        assert!(session.is_game_over());

        let mut session = GameSession::new(small_settings());
        session.ship.take_damage(SHIP_MAX_HEALTH);
        assert!(session.is_game_over());
    }

    #[test]
    fn test_restart_keeps_galaxy() {
        let mut session = GameSession::new(small_settings());
        session.galaxy.planets_mut()[0].rings[0].take_damage(RING_INITIAL_HEALTH);
        session.ship.take_damage(SHIP_MAX_HEALTH);
        session.phase = GamePhase::GameOver;

        session.restart();

        assert_eq!(session.phase, GamePhase::Playing);
        assert!(session.ship.is_alive());
        assert_eq!(session.ship.pos, glam::Vec3::ZERO);
        assert_eq!(session.ship.ammo, SHIP_MAX_AMMO);
        assert!(!session.galaxy.planets()[0].rings[0].is_active());
        assert_eq!(session.stats.restarts, 1);
    }

    #[test]
    fn test_stats_record() {
        let mut stats = SessionStats::default();
        stats.record(&GameEvent::RingDestroyed { planet: 0, ring: 1 });
        stats.record(&GameEvent::PlanetCollectable { planet: 0 });
        stats.record(&GameEvent::PlanetCollected { planet: 0 });
        stats.record(&GameEvent::ShipHit { health: 99 });
        stats.record(&GameEvent::RingFired { planet: 2, ring: 0 });

        assert_eq!(stats.rings_destroyed, 1);
        assert_eq!(stats.planets_collected, 1);
        assert_eq!(stats.hits_taken, 1);
        assert_eq!(stats.ring_shots, 1);
        assert_eq!(stats.shots_fired, 0);
    }
}
