//! Ring Raider - headless native driver
//!
//! Usage: `ring-raider [settings.json] [frames]`
//!
//! Flies the ship on autopilot for a number of 60 Hz frames and logs a run
//! summary. Set `RUST_LOG=info` (or `debug` for chunk streaming) to watch.

use ring_raider::renderer::build_scene;
use ring_raider::sim::{GamePhase, GameSession, TickInput, tick};
use ring_raider::ui::Hud;
use ring_raider::Settings;

/// One minute of play at 60 fps
const DEFAULT_FRAMES: u64 = 3600;
/// Frame duration fed to the simulation (milliseconds)
const FRAME_MS: f32 = 1000.0 / 60.0;
/// Longest step the simulation accepts after a stall (seconds)
const MAX_FRAME_DT: f32 = 0.1;
/// Frames between progress reports
const REPORT_INTERVAL: u64 = 600;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let frames = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_FRAMES);

    log::info!(
        "Ring Raider (headless) starting: seed {}, {} frames",
        settings.seed,
        frames
    );

    let screen = glam::Vec2::new(settings.screen_width, settings.screen_height);
    let crosshair = settings.screen_center();
    let mut session = GameSession::new(settings);
    let mut hud = Hud::new(screen);

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    // Milliseconds are converted once here; everything below runs in seconds
    let dt = (FRAME_MS * 0.001).min(MAX_FRAME_DT);

    for frame in 1..=frames {
        tick(&mut session, &input, dt);
        hud.sync(&session, dt, crosshair);

        if frame % REPORT_INTERVAL == 0 {
            let scene = build_scene(&session);
            log::info!(
                "frame {}: {} | {} | ship at ({:.1}, {:.1}) | {} stars, {} line vertices",
                frame,
                hud.health_label().unwrap_or_default(),
                hud.ammo_label().unwrap_or_default(),
                session.ship.pos.x,
                session.ship.pos.y,
                scene.points.len(),
                scene.lines.len()
            );
        }
    }

    let stats = session.stats;
    let collected = session
        .galaxy
        .planets()
        .iter()
        .filter(|p| p.is_collected())
        .count();

    println!(
        "{} frames: {} rings destroyed, {}/{} planets collected",
        frames,
        stats.rings_destroyed,
        collected,
        session.galaxy.planets().len(),
    );
    println!(
        "{} hits taken, {} shots fired, {} restarts{}",
        stats.hits_taken,
        stats.shots_fired,
        stats.restarts,
        if session.phase == GamePhase::GameOver {
            " (game over)"
        } else {
            ""
        }
    );
}
