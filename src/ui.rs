//! HUD element model
//!
//! Screen-space text and buttons in virtual pixels (origin top-left, y down).
//! Drawing is left to the platform layer; this module owns layout, labels,
//! visibility and mouse interaction.

use glam::Vec2;

use crate::consts::*;
use crate::sim::GameSession;

/// Approximate glyph box used to center button captions
const GLYPH_WIDTH: f32 = 8.0;
const GLYPH_HEIGHT: f32 = 12.0;

/// Handle to an element in a `UiLayer`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(u32);

/// What a button asks the game to do when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Restart,
}

/// A HUD element
#[derive(Debug, Clone, PartialEq)]
pub enum UiElement {
    Text {
        text: String,
        pos: Vec2,
        color: [f32; 3],
        /// Drawn twice with a 1px offset
        bold: bool,
        visible: bool,
    },
    Button {
        text: String,
        pos: Vec2,
        size: Vec2,
        color: [f32; 3],
        hovered: bool,
        visible: bool,
        action: UiAction,
    },
}

impl UiElement {
    pub fn text(&self) -> &str {
        match self {
            UiElement::Text { text, .. } | UiElement::Button { text, .. } => text,
        }
    }

    pub fn set_text(&mut self, value: impl Into<String>) {
        match self {
            UiElement::Text { text, .. } | UiElement::Button { text, .. } => *text = value.into(),
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            UiElement::Text { visible, .. } | UiElement::Button { visible, .. } => *visible,
        }
    }

    pub fn set_visible(&mut self, value: bool) {
        match self {
            UiElement::Text { visible, .. } | UiElement::Button { visible, .. } => *visible = value,
        }
    }

    /// Whether `point` lands on this element. Text is never a target;
    /// buttons include their edges.
    pub fn hit_test(&self, point: Vec2) -> bool {
        match self {
            UiElement::Text { .. } => false,
            UiElement::Button { pos, size, .. } => {
                point.x >= pos.x
                    && point.x <= pos.x + size.x
                    && point.y >= pos.y
                    && point.y <= pos.y + size.y
            }
        }
    }

    /// Where a button caption starts so it sits centered
    pub fn caption_origin(&self) -> Option<Vec2> {
        match self {
            UiElement::Text { .. } => None,
            UiElement::Button { text, pos, size, .. } => Some(Vec2::new(
                pos.x + (size.x - text.chars().count() as f32 * GLYPH_WIDTH) / 2.0,
                pos.y + (size.y - GLYPH_HEIGHT) / 2.0,
            )),
        }
    }
}

/// Ordered collection of HUD elements
#[derive(Debug, Clone, Default)]
pub struct UiLayer {
    elements: Vec<(ElementId, UiElement)>,
    next_id: u32,
}

impl UiLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, element: UiElement) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.push((id, element));
        id
    }

    pub fn add_text(&mut self, text: impl Into<String>, pos: Vec2, color: [f32; 3]) -> ElementId {
        self.add(UiElement::Text {
            text: text.into(),
            pos,
            color,
            bold: false,
            visible: true,
        })
    }

    pub fn add_bold_text(
        &mut self,
        text: impl Into<String>,
        pos: Vec2,
        color: [f32; 3],
    ) -> ElementId {
        self.add(UiElement::Text {
            text: text.into(),
            pos,
            color,
            bold: true,
            visible: true,
        })
    }

    pub fn add_button(
        &mut self,
        text: impl Into<String>,
        pos: Vec2,
        size: Vec2,
        action: UiAction,
    ) -> ElementId {
        self.add(UiElement::Button {
            text: text.into(),
            pos,
            size,
            color: [0.7, 0.7, 0.7],
            hovered: false,
            visible: true,
            action,
        })
    }

    /// Remove an element. Returns false if the id is unknown.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|(eid, _)| *eid != id);
        self.elements.len() != before
    }

    pub fn get(&self, id: ElementId) -> Option<&UiElement> {
        self.elements.iter().find(|(eid, _)| *eid == id).map(|(_, e)| e)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut UiElement> {
        self.elements
            .iter_mut()
            .find(|(eid, _)| *eid == id)
            .map(|(_, e)| e)
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(element) = self.get_mut(id) {
            element.set_text(text);
        }
    }

    pub fn set_visible(&mut self, id: ElementId, visible: bool) {
        if let Some(element) = self.get_mut(id) {
            element.set_visible(visible);
        }
    }

    /// Visible elements in draw order
    pub fn visible(&self) -> impl Iterator<Item = &UiElement> {
        self.elements
            .iter()
            .map(|(_, e)| e)
            .filter(|e| e.is_visible())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Update button hover state for the cursor at `point`
    pub fn handle_mouse_move(&mut self, point: Vec2) {
        for (_, element) in &mut self.elements {
            let over = element.is_visible() && element.hit_test(point);
            if let UiElement::Button { hovered, .. } = element {
                *hovered = over;
            }
        }
    }

    /// Actions of every visible button under `point`
    pub fn handle_click(&self, point: Vec2) -> Vec<UiAction> {
        self.visible()
            .filter(|e| e.hit_test(point))
            .filter_map(|e| match e {
                UiElement::Button { action, .. } => Some(*action),
                UiElement::Text { .. } => None,
            })
            .collect()
    }
}

/// Exponentially smoothed frame rate
#[derive(Debug, Clone, Copy, Default)]
pub struct FpsCounter {
    fps: f32,
}

impl FpsCounter {
    pub fn update(&mut self, dt: f32) {
        if dt > 0.0 {
            self.fps = 0.9 * self.fps + 0.1 * (1.0 / dt);
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
const RED: [f32; 3] = [1.0, 0.0, 0.0];

/// The in-game HUD
#[derive(Debug, Clone)]
pub struct Hud {
    pub layer: UiLayer,
    pub fps: FpsCounter,
    /// Show ship position and crosshair readouts
    pub show_debug: bool,
    fps_text: ElementId,
    health_text: ElementId,
    ammo_text: ElementId,
    position_text: ElementId,
    crosshair_text: ElementId,
    game_over_text: ElementId,
    restart_text: ElementId,
    restart_button: ElementId,
}

impl Hud {
    /// Lay out the HUD for a screen of `size` virtual pixels
    pub fn new(size: Vec2) -> Self {
        let mut layer = UiLayer::new();
        let left = 50.0;
        let mid = size.y / 2.0;

        let fps_text = layer.add_text("FPS: 0", Vec2::new(10.0, 20.0), WHITE);
        let game_over_text = layer.add_bold_text("GAME OVER", Vec2::new(left, mid - 50.0), RED);
        let restart_text = layer.add_text("Press R to Restart", Vec2::new(left, mid + 20.0), WHITE);
        let restart_button = layer.add_button(
            "Restart",
            Vec2::new(left, mid + 40.0),
            Vec2::new(120.0, 30.0),
            UiAction::Restart,
        );
        let crosshair_text = layer.add_text(
            "Crosshair Pos: 0, 0",
            Vec2::new(size.x / 2.0 - 100.0, size.y - 10.0),
            WHITE,
        );
        let health_text = layer.add_text(
            format!("Ship Health: {}", SHIP_MAX_HEALTH),
            Vec2::new(10.0, size.y - 30.0),
            WHITE,
        );
        let position_text = layer.add_text(
            "Ship Position: 0, 0, 0",
            Vec2::new(10.0, size.y - 50.0),
            WHITE,
        );
        let ammo_text = layer.add_text(
            format!("Ammo: {}/{}", SHIP_MAX_AMMO, SHIP_MAX_AMMO),
            Vec2::new(10.0, size.y - 10.0),
            WHITE,
        );

        for id in [game_over_text, restart_text, restart_button] {
            layer.set_visible(id, false);
        }

        Self {
            layer,
            fps: FpsCounter::default(),
            show_debug: false,
            fps_text,
            health_text,
            ammo_text,
            position_text,
            crosshair_text,
            game_over_text,
            restart_text,
            restart_button,
        }
    }

    /// Refresh labels and visibility from the session after a frame of `dt`
    pub fn sync(&mut self, session: &GameSession, dt: f32, crosshair: Vec2) {
        self.fps.update(dt);
        let ship = &session.ship;
        let layer = &mut self.layer;

        layer.set_text(self.fps_text, format!("FPS: {:.1}", self.fps.fps()));
        layer.set_text(self.health_text, format!("Ship Health: {}", ship.health));
        layer.set_text(self.ammo_text, format!("Ammo: {}/{}", ship.ammo, SHIP_MAX_AMMO));
        layer.set_text(
            self.position_text,
            format!(
                "Ship Position: {:.1}, {:.1}, {:.1}",
                ship.pos.x, ship.pos.y, ship.pos.z
            ),
        );
        layer.set_text(
            self.crosshair_text,
            format!("Crosshair Pos: {:.1}, {:.1}", crosshair.x, crosshair.y),
        );

        let game_over = session.is_game_over();
        layer.set_visible(self.fps_text, session.settings.show_fps);
        layer.set_visible(self.game_over_text, game_over);
        layer.set_visible(self.restart_text, game_over);
        layer.set_visible(self.restart_button, game_over);
        layer.set_visible(self.health_text, !game_over);
        layer.set_visible(self.ammo_text, !game_over);
        layer.set_visible(self.position_text, self.show_debug);
        layer.set_visible(self.crosshair_text, self.show_debug);
    }

    pub fn label(&self, id: ElementId) -> Option<&str> {
        self.layer.get(id).map(UiElement::text)
    }

    pub fn health_label(&self) -> Option<&str> {
        self.label(self.health_text)
    }

    pub fn ammo_label(&self) -> Option<&str> {
        self.label(self.ammo_text)
    }

    pub fn fps_label(&self) -> Option<&str> {
        self.label(self.fps_text)
    }

    pub fn is_game_over_shown(&self) -> bool {
        self.layer
            .get(self.game_over_text)
            .is_some_and(UiElement::is_visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn screen() -> Vec2 {
        Vec2::new(VIRTUAL_WIDTH, VIRTUAL_HEIGHT)
    }

    fn small_session() -> GameSession {
        GameSession::new(Settings {
            stars_per_chunk: Some(1),
            render_distance: 0,
            ..Settings::default()
        })
    }

    #[test]
    fn test_button_hit_test_inclusive() {
        let mut layer = UiLayer::new();
        let id = layer.add_button(
            "Go",
            Vec2::new(10.0, 10.0),
            Vec2::new(20.0, 10.0),
            UiAction::Restart,
        );
        let button = layer.get(id).unwrap();
        assert!(button.hit_test(Vec2::new(10.0, 10.0)));
        assert!(button.hit_test(Vec2::new(30.0, 20.0)));
        assert!(!button.hit_test(Vec2::new(30.1, 20.0)));

        let text = layer.add_text("label", Vec2::new(10.0, 10.0), WHITE);
        assert!(!layer.get(text).unwrap().hit_test(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn test_hover_and_click() {
        let mut layer = UiLayer::new();
        let id = layer.add_button("Go", Vec2::ZERO, Vec2::new(50.0, 20.0), UiAction::Restart);

        layer.handle_mouse_move(Vec2::new(5.0, 5.0));
        assert!(matches!(layer.get(id), Some(UiElement::Button { hovered: true, .. })));
        layer.handle_mouse_move(Vec2::new(500.0, 5.0));
        assert!(matches!(layer.get(id), Some(UiElement::Button { hovered: false, .. })));

        assert_eq!(layer.handle_click(Vec2::new(5.0, 5.0)), vec![UiAction::Restart]);
        layer.set_visible(id, false);
        assert!(layer.handle_click(Vec2::new(5.0, 5.0)).is_empty(), "hidden buttons ignore clicks");
    }

    #[test]
    fn test_remove_element() {
        let mut layer = UiLayer::new();
        let a = layer.add_text("a", Vec2::ZERO, WHITE);
        let b = layer.add_text("b", Vec2::ZERO, WHITE);
        assert!(layer.remove(a));
        assert!(!layer.remove(a));
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.get(b).map(UiElement::text), Some("b"));
    }

    #[test]
    fn test_caption_centered() {
        let mut layer = UiLayer::new();
        let id = layer.add_button(
            "ab",
            Vec2::new(0.0, 0.0),
            Vec2::new(40.0, 32.0),
            UiAction::Restart,
        );
        let origin = layer.get(id).unwrap().caption_origin().unwrap();
        assert_eq!(origin, Vec2::new(12.0, 10.0));
    }

    #[test]
    fn test_fps_smoothing() {
        let mut fps = FpsCounter::default();
        fps.update(0.0);
        assert_eq!(fps.fps(), 0.0);
        fps.update(0.1);
        assert!((fps.fps() - 1.0).abs() < 1e-5);
        fps.update(0.1);
        assert!((fps.fps() - 1.9).abs() < 1e-5);
    }

    #[test]
    fn test_hud_labels() {
        let mut session = small_session();
        session.ship.health = 42;
        session.ship.ammo = 7;

        let mut hud = Hud::new(screen());
        hud.sync(&session, 0.5, Vec2::ZERO);

        assert_eq!(hud.health_label(), Some("Ship Health: 42"));
        assert_eq!(hud.ammo_label(), Some("Ammo: 7/100"));
        assert_eq!(hud.fps_label(), Some("FPS: 0.2"));
        assert!(!hud.is_game_over_shown());
    }

    #[test]
    fn test_hud_game_over_layout() {
        let mut session = small_session();
        session.ship.ammo = 0;

        let mut hud = Hud::new(screen());
        hud.sync(&session, 1.0 / 60.0, Vec2::ZERO);
        assert!(hud.is_game_over_shown());

        let texts: Vec<&str> = hud.layer.visible().map(UiElement::text).collect();
        assert!(texts.contains(&"Press R to Restart"));
        assert!(!texts.iter().any(|t| t.starts_with("Ammo")));
        assert!(!texts.iter().any(|t| t.starts_with("Ship Position")));

        // The restart button is live only now
        let actions = hud.layer.handle_click(Vec2::new(60.0, VIRTUAL_HEIGHT / 2.0 + 50.0));
        assert_eq!(actions, vec![UiAction::Restart]);
    }
}
