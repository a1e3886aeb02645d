//! CPU-side render data
//!
//! Turns a session into vertex lists ready for upload: star points, world
//! wireframes (line list) and a screen-space overlay of direction arrows for
//! planets outside the view. Nothing here touches a GPU.

pub mod shapes;
pub mod vertex;

use glam::{EulerRot, Mat4, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

pub use vertex::{Vertex, colors};

use crate::sim::{Bullet, Camera, ExplosionEffect, GameSession, Planet, Spaceship, StarField};

/// Vertical field of view
pub const FOV_Y_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 10_000.0;

/// Planet core cube half-extent
const PLANET_SIZE: f32 = 2.0;
/// Guard sphere shown while rings remain
const GUARD_RADIUS: f32 = PLANET_SIZE * 4.0;

const RING_RADIUS: f32 = 3.0;
const RING_TUBE_RADIUS: f32 = 1.0;
const RING_SEGMENTS: u32 = 16;
const TUBE_SEGMENTS: u32 = 8;

const SHIP_BULLET_SIZE: f32 = 0.45;
const RING_BULLET_SIZE: f32 = 0.9;

const SHIP_CONE_RADIUS: f32 = 2.0;
const SHIP_CONE_HEIGHT: f32 = 4.0;
const SHIP_CONE_SEGMENTS: u32 = 12;

/// Screen margin for on-screen tests and arrow placement
const SCREEN_MARGIN: f32 = 10.0;
const ARROW_PADDING: f32 = 20.0;

/// Vertex lists for one frame
#[derive(Debug, Clone, Default)]
pub struct SceneVertices {
    /// Star points (alpha = brightness)
    pub points: Vec<Vertex>,
    /// World-space wireframe segments
    pub lines: Vec<Vertex>,
    /// Screen-space segments (virtual pixels, y down)
    pub overlay: Vec<Vertex>,
}

/// Build every vertex needed to draw `session`
pub fn build_scene(session: &GameSession) -> SceneVertices {
    let mut scene = SceneVertices::default();

    push_stars(session.galaxy.starfield(), &mut scene.points);

    for planet in session.galaxy.planets() {
        push_planet(planet, &mut scene.lines);
    }
    push_explosions(session.galaxy.explosions(), colors::ring_debris, &mut scene.lines);
    push_bullets(session.galaxy.bullets(), colors::RING_BULLET, RING_BULLET_SIZE, &mut scene.lines);

    push_ship(&session.ship, &mut scene.lines);

    let screen = Vec2::new(session.settings.screen_width, session.settings.screen_height);
    scene.overlay = offscreen_arrows(session.galaxy.planets(), &session.camera_rig.camera, screen);

    scene
}

fn push_stars(starfield: &StarField, out: &mut Vec<Vertex>) {
    out.extend(starfield.stars().map(|star| {
        let [r, g, b] = star.color;
        Vertex::at(star.pos, [r, g, b, star.brightness])
    }));
}

/// Planets are drawn on the play plane. Collected planets are not drawn.
fn push_planet(planet: &Planet, out: &mut Vec<Vertex>) {
    if planet.is_collected() {
        return;
    }

    let center = planet.center();
    let origin = center.extend(0.0);
    out.extend(shapes::wire_cube(origin, PLANET_SIZE, colors::PLANET));

    if planet.has_active_rings() {
        out.extend(shapes::wire_sphere(origin, GUARD_RADIUS, colors::PLANET_GUARD));
    }

    for ring in planet.rings.iter().filter(|r| r.is_active()) {
        let model = Mat4::from_translation(origin)
            * Mat4::from_rotation_z(ring.angle)
            * Mat4::from_translation(Vec3::new(ring.orbit_radius, 0.0, 0.0))
            * Mat4::from_axis_angle(Vec3::new(1.0, 1.0, 0.0).normalize(), ring.yaw_angle)
            * Mat4::from_rotation_y(ring.self_angle);
        out.extend(shapes::wire_torus(
            &model,
            RING_RADIUS,
            RING_TUBE_RADIUS,
            RING_SEGMENTS,
            TUBE_SEGMENTS,
            colors::RING,
        ));
    }
}

fn push_bullets(bullets: &[Bullet], color: [f32; 4], size: f32, out: &mut Vec<Vertex>) {
    for bullet in bullets.iter().filter(|b| b.is_active()) {
        out.extend(shapes::wire_cube(bullet.pos.extend(0.0), size, color));
    }
}

fn push_explosions(
    explosions: &[ExplosionEffect],
    color: fn(f32) -> [f32; 4],
    out: &mut Vec<Vertex>,
) {
    for stick in explosions.iter().flat_map(|e| e.sticks.iter()) {
        let rotation = stick.rotation;
        let model = Mat4::from_translation(stick.pos)
            * Mat4::from_euler(
                EulerRot::XYZ,
                rotation.x.to_radians(),
                rotation.y.to_radians(),
                rotation.z.to_radians(),
            );
        out.extend(shapes::stick(&model, stick.length, color(stick.alpha)));
    }
}

/// The ship's debris and bullets outlive it; the hull is drawn only while alive
fn push_ship(ship: &Spaceship, out: &mut Vec<Vertex>) {
    push_explosions(ship.explosions(), colors::ship_debris, out);
    push_bullets(ship.bullets(), colors::SHIP_BULLET, SHIP_BULLET_SIZE, out);

    if !ship.is_alive() {
        return;
    }

    // The cone model points down -Y; turn it onto the aim direction
    let model = Mat4::from_translation(ship.pos) * Mat4::from_rotation_z(ship.facing + FRAC_PI_2);
    out.extend(shapes::wire_cone(
        &model,
        SHIP_CONE_RADIUS,
        SHIP_CONE_HEIGHT,
        SHIP_CONE_SEGMENTS,
        colors::SHIP,
    ));
}

/// View matrix: inverse camera rotation (pitch, yaw, roll), then translation
pub fn view_matrix(camera: &Camera) -> Mat4 {
    Mat4::from_rotation_x(-camera.rotation.x)
        * Mat4::from_rotation_y(-camera.rotation.y)
        * Mat4::from_rotation_z(-camera.rotation.z)
        * Mat4::from_translation(-camera.position)
}

pub fn projection_matrix(aspect: f32) -> Mat4 {
    Mat4::perspective_rh_gl(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR)
}

/// A world point seen through the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPosition {
    /// Virtual pixels, origin top-left, y down
    pub pos: Vec2,
    pub on_screen: bool,
}

/// Project a world point into virtual screen coordinates
pub fn project_to_screen(camera: &Camera, world: Vec3, screen: Vec2) -> ScreenPosition {
    let clip = projection_matrix(screen.x / screen.y) * view_matrix(camera) * world.extend(1.0);
    if clip.w <= 0.0 {
        return ScreenPosition {
            pos: Vec2::ZERO,
            on_screen: false,
        };
    }

    let ndc = clip.truncate() / clip.w;
    let pos = Vec2::new((ndc.x + 1.0) * 0.5 * screen.x, (1.0 - ndc.y) * 0.5 * screen.y);
    let on_screen = (SCREEN_MARGIN..=screen.x - SCREEN_MARGIN).contains(&pos.x)
        && (SCREEN_MARGIN..=screen.y - SCREEN_MARGIN).contains(&pos.y);

    ScreenPosition { pos, on_screen }
}

/// Edge arrows pointing at planets outside the view
pub fn offscreen_arrows(planets: &[Planet], camera: &Camera, screen: Vec2) -> Vec<Vertex> {
    let mut out = Vec::new();

    for planet in planets.iter().filter(|p| !p.is_collected()) {
        let center = planet.center();
        if project_to_screen(camera, center.extend(0.0), screen).on_screen {
            continue;
        }

        let to_planet = center - camera.position.truncate();
        let screen_angle = to_planet.y.atan2(to_planet.x) - camera.rotation.y;
        let dx = screen_angle.cos();
        let dy = -screen_angle.sin();

        let (anchor, rotation) = if dx.abs() > dy.abs() {
            let x = if dx > 0.0 {
                screen.x - ARROW_PADDING
            } else {
                ARROW_PADDING
            };
            let y = (screen.y / 2.0 + dy * screen.x / 2.0 / dx.abs())
                .clamp(ARROW_PADDING, screen.y - ARROW_PADDING);
            (Vec2::new(x, y), if dx > 0.0 { 0.0 } else { 180.0 })
        } else {
            let x = (screen.x / 2.0 + dx * screen.y / 2.0 / dy.abs())
                .clamp(ARROW_PADDING, screen.x - ARROW_PADDING);
            let y = if dy > 0.0 {
                screen.y - ARROW_PADDING
            } else {
                ARROW_PADDING
            };
            (Vec2::new(x, y), if dy > 0.0 { 90.0 } else { 270.0 })
        };

        let model = Mat4::from_translation(anchor.extend(0.0))
            * Mat4::from_rotation_z(f32::to_radians(rotation));
        let tip = [
            Vec3::new(-10.0, -5.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(-10.0, 5.0, 0.0),
        ];
        for i in 0..tip.len() {
            let a = model.transform_point3(tip[i]);
            let b = model.transform_point3(tip[(i + 1) % tip.len()]);
            out.push(Vertex::at(a, colors::ARROW));
            out.push(Vertex::at(b, colors::ARROW));
        }
    }

    out
}
