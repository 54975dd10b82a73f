use liquid_sort::{Color as FluidColor, Difficulty};
use macroquad::prelude::*;

pub fn fluid_color(color: FluidColor) -> Color {
    match color {
        FluidColor::Red => Color::from_rgba(0xff, 0x55, 0x55, 0xff),
        FluidColor::Blue => Color::from_rgba(0x55, 0x99, 0xff, 0xff),
        FluidColor::Green => Color::from_rgba(0x55, 0xdd, 0x55, 0xff),
        FluidColor::Yellow => Color::from_rgba(0xff, 0xdd, 0x55, 0xff),
        FluidColor::Purple => Color::from_rgba(0xcc, 0x55, 0xff, 0xff),
        FluidColor::Pink => Color::from_rgba(0xff, 0x77, 0xcc, 0xff),
        FluidColor::Brown => Color::from_rgba(0xaa, 0x66, 0x33, 0xff),
        FluidColor::Orange => Color::from_rgba(0xff, 0x99, 0x44, 0xff),
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlAction {
    SelectContainer(usize),
    SetDifficulty(Difficulty),
    Restart,
    NextLevel,
    CopyState,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    label: String,
    action: ControlAction,
    color: Color,
}
impl Button {
    pub fn new(label: &str, action: ControlAction, color: Color) -> Self {
        Self {
            label: label.to_string(),
            action,
            color,
        }
    }
    pub fn get_action(&self) -> ControlAction {
        self.action
    }
    pub fn get_label(&self) -> &str {
        &self.label
    }
    pub fn get_color(&self) -> Color {
        self.color
    }
    /// Difficulty buttons light up for the active tier.
    pub fn is_active(&self, difficulty: Difficulty) -> bool {
        self.action == ControlAction::SetDifficulty(difficulty)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitRecord {
    pub rect: Rect,
    pub action: ControlAction,
}

#[derive(Default)]
pub struct HitTestRegistry {
    items: Vec<HitRecord>,
}

impl HitTestRegistry {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn push(&mut self, rect: Rect, action: ControlAction) {
        self.items.push(HitRecord { rect, action });
    }

    /// Returns the action of the topmost item under the point (last drawn wins).
    pub fn hit_test(&self, x: f32, y: f32) -> Option<ControlAction> {
        self.items
            .iter()
            .rev()
            .find(|r| r.rect.contains(vec2(x, y)))
            .map(|r| r.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_drawn_item_wins() {
        let mut registry = HitTestRegistry::new();
        registry.push(Rect::new(0.0, 0.0, 100.0, 100.0), ControlAction::SelectContainer(0));
        registry.push(Rect::new(10.0, 10.0, 20.0, 20.0), ControlAction::NextLevel);
        assert_eq!(registry.hit_test(15.0, 15.0), Some(ControlAction::NextLevel));
        assert_eq!(registry.hit_test(50.0, 50.0), Some(ControlAction::SelectContainer(0)));
        assert_eq!(registry.hit_test(500.0, 50.0), None);
        registry.clear();
        assert_eq!(registry.hit_test(15.0, 15.0), None);
    }

    #[test]
    fn difficulty_button_tracks_active_tier() {
        let button = Button::new("Hard", ControlAction::SetDifficulty(Difficulty::Hard), RED);
        assert!(button.is_active(Difficulty::Hard));
        assert!(!button.is_active(Difficulty::Easy));
    }
}
