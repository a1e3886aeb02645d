//! Per-frame session step
//!
//! Frame order: thrust, ship update, galaxy update, camera follow, ship aim.

use glam::Vec2;

use super::state::{GamePhase, GameSession};
use crate::consts::*;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Thrust direction (WASD); zero means coast
    pub thrust: Vec2,
    /// Crosshair in screen space (y up)
    pub aim: Option<Vec2>,
    /// Fire button held
    pub fire: bool,
    /// Restart request (only honoured on game over)
    pub restart: bool,
    /// Demo mode - the ship flies itself
    pub autopilot: bool,
}

/// Advance the session by `dt` seconds
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    let was_over = session.is_game_over();

    let mut input = input.clone();
    if input.autopilot {
        steer_autopilot(session, &mut input);
    }

    if input.thrust != Vec2::ZERO {
        session.ship.move_by(input.thrust);
    }

    if session.ship.update(dt, input.fire) {
        session.stats.shots_fired += 1;
    }

    let camera = session.camera_rig.camera;
    session.galaxy.update(dt, &camera, Some(&mut session.ship));
    session.camera_rig.update(dt, session.ship.pos);

    if let Some(aim) = input.aim {
        session.ship.look_at(aim, session.settings.screen_center());
    }

    for event in session.galaxy.drain_events() {
        session.stats.record(&event);
    }
    session.time_ticks += 1;

    if was_over && input.restart {
        session.restart();
        return;
    }

    if session.is_game_over() {
        if session.phase == GamePhase::Playing {
            log::info!(
                "Game over: health {}, ammo {}, {} rings destroyed",
                session.ship.health,
                session.ship.ammo,
                session.stats.rings_destroyed
            );
        }
        session.phase = GamePhase::GameOver;
    } else {
        session.phase = GamePhase::Playing;
    }
}

/// Demo mode: head for the nearest uncollected planet, shoot the nearest ring
fn steer_autopilot(session: &GameSession, input: &mut TickInput) {
    if session.is_game_over() {
        input.restart = true;
        return;
    }

    let ship_pos = session.ship.planar_pos();

    let nearest_ring = session
        .galaxy
        .planets()
        .iter()
        .flat_map(|planet| {
            let center = planet.center();
            planet
                .rings
                .iter()
                .filter(|ring| ring.is_active())
                .map(move |ring| ring.world_position(center))
        })
        .min_by(|a, b| {
            a.distance(ship_pos)
                .partial_cmp(&b.distance(ship_pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let target_planet = session
        .galaxy
        .planets()
        .iter()
        .filter(|planet| !planet.is_collected())
        .min_by(|a, b| {
            a.center()
                .distance(ship_pos)
                .partial_cmp(&b.center().distance(ship_pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let engage_range = INFLUENCE_RADIUS * 2.0;
    let center = session.settings.screen_center();

    if let Some(ring_pos) = nearest_ring {
        let offset = ring_pos - ship_pos;
        if offset.length() < engage_range {
            // Screen space and world space share orientation (y up)
            input.aim = Some(center + offset.normalize_or_zero() * 100.0);
            input.fire = true;
        }
    }

    input.thrust = match target_planet {
        Some(planet) => {
            let offset = planet.center() - ship_pos;
            let guarded = planet.has_active_rings();
            let holding = guarded
                && nearest_ring.is_some_and(|r| r.distance(ship_pos) < INFLUENCE_RADIUS * 1.5);
            if holding || offset.length() < COLLECTION_RADIUS * 0.5 {
                Vec2::ZERO
            } else {
                offset.normalize_or_zero()
            }
        }
        None => Vec2::ZERO,
    };
}
