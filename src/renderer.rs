use std::collections::HashMap;

use liquid_sort::{CONTAINER_CAPACITY, Container, Difficulty, GameState, Selection};
use macroquad::prelude::*;

use crate::controls::{Button, ControlAction, HitTestRegistry, fluid_color};

/// Font size, x offset, y offset that fit a string into a box.
type TextFit = (f32, f32, f32);

/// Remembers unscaled text extents so each label is only measured once.
#[derive(Default)]
pub struct CachedTextSizer {
    unscaled_size_cache: HashMap<String, (f32, f32)>,
}

impl CachedTextSizer {
    const REFERENCE_SIZE: u16 = 100;

    pub fn fit(&mut self, text: &str, rect: Rect) -> TextFit {
        let (size_x, size_y) = *self
            .unscaled_size_cache
            .entry(text.to_string())
            .or_insert_with(|| {
                let d = measure_text(text, None, Self::REFERENCE_SIZE, 1.0);
                (d.width.max(1.0), d.height.max(1.0))
            });
        let scale = (rect.w / size_x).min(rect.h / size_y);
        let font_size = Self::REFERENCE_SIZE as f32 * scale;
        let offset_x = (rect.w - size_x * scale) / 2.0;
        // draw_text positions by baseline
        let offset_y = (rect.h + size_y * scale) / 2.0;
        (font_size, offset_x, offset_y)
    }
}

pub struct Renderer {
    text_sizer: CachedTextSizer,
    hit_test: HitTestRegistry,
    viewport: Rect,
}
impl Renderer {
    pub fn new() -> Self {
        Self {
            text_sizer: CachedTextSizer::default(),
            hit_test: HitTestRegistry::new(),
            viewport: Rect::new(0.0, 0.0, 800.0, 600.0),
        }
    }

    pub fn get_hit_test_registry(&self) -> &HitTestRegistry {
        &self.hit_test
    }

    pub fn autoset_viewport(&mut self) {
        self.viewport = Rect::new(0.0, 0.0, screen_width(), screen_height());
    }

    pub fn render_game(
        &mut self,
        state: &GameState,
        difficulty: Difficulty,
        buttons: &[Button],
        next_level_button: &Button,
    ) {
        self.hit_test.clear();
        clear_background(Color::from_rgba(0x1f, 0x29, 0x37, 0xff));

        let v = self.viewport;
        let padding = 10.0;
        let button_area_height = v.h * 0.08;
        let status_area_height = v.h * 0.06;
        let container_area_height =
            v.h - button_area_height - status_area_height - 4.0 * padding;

        self.render_button_lineup(
            buttons,
            difficulty,
            Rect::new(v.x + padding, v.y + padding, v.w - 2.0 * padding, button_area_height),
        );
        let selected = match state.get_selection() {
            Selection::Container(index) => Some(index),
            Selection::None => None,
        };
        self.render_container_grid(
            state.get_board().get_containers(),
            selected,
            6,
            Rect::new(
                v.x + padding,
                v.y + button_area_height + 2.0 * padding,
                v.w - 2.0 * padding,
                container_area_height,
            ),
        );
        let status = format!(
            "Level {}   Moves {}   {}",
            state.get_level(),
            state.get_moves(),
            difficulty
        );
        self.render_text(
            &status,
            Rect::new(
                v.x + padding,
                v.y + v.h - status_area_height - padding,
                v.w - 2.0 * padding,
                status_area_height,
            ),
            WHITE,
        );

        if state.is_won() {
            self.render_win_banner(state, next_level_button);
        }
    }

    pub fn render_text(&mut self, text: &str, rect: Rect, color: Color) {
        let (font_size, x, y) = self.text_sizer.fit(text, rect);
        draw_text(text, rect.x + x, rect.y + y, font_size, color);
    }

    pub fn render_container(
        &mut self,
        container: &Container,
        container_index: usize,
        selected: bool,
        rect: Rect,
    ) {
        self.hit_test
            .push(rect, ControlAction::SelectContainer(container_index));

        // Lift the selected container so it reads as "picked up".
        let rect = if selected {
            Rect::new(rect.x, rect.y - rect.h * 0.05, rect.w, rect.h)
        } else {
            rect
        };
        let unit_height = rect.h / CONTAINER_CAPACITY as f32;
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, Color::new(0.53, 0.53, 0.53, 0.2));
        for (i, unit) in container.get_units().iter().enumerate() {
            let unit_y = rect.y + rect.h - (i as f32 + 1.0) * unit_height;
            draw_rectangle(rect.x, unit_y, rect.w, unit_height, fluid_color(*unit));
        }
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 3.0, GRAY);
        if selected {
            draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 4.0, WHITE);
        }
    }

    pub fn render_container_grid(
        &mut self,
        containers: &[Container],
        selected: Option<usize>,
        max_columns: usize,
        rect: Rect,
    ) {
        if containers.is_empty() {
            return;
        }
        let rows = containers.len().div_ceil(max_columns);
        let columns = containers.len().min(max_columns);
        let spacing = 20.0;
        let cell_w = (rect.w - spacing * (columns as f32 - 1.0)) / columns as f32;
        let cell_h = (rect.h - spacing * (rows as f32 - 1.0)) / rows as f32;
        let container_w = cell_w.min(cell_h * 0.35);
        let container_h = cell_h * 0.85;

        for (index, container) in containers.iter().enumerate() {
            let row = index / max_columns;
            let col = index % max_columns;
            let x = rect.x + col as f32 * (cell_w + spacing) + (cell_w - container_w) / 2.0;
            let y = rect.y + row as f32 * (cell_h + spacing) + (cell_h - container_h);
            self.render_container(
                container,
                index,
                Some(index) == selected,
                Rect::new(x, y, container_w, container_h),
            );
        }
    }

    pub fn render_button(&mut self, button: &Button, active: bool, rect: Rect) {
        self.hit_test.push(rect, button.get_action());

        let fill = if active { Color::from_rgba(0x10, 0xb9, 0x81, 0xff) } else { button.get_color() };
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, fill);
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, BLACK);
        let inner = Rect::new(rect.x + rect.w * 0.1, rect.y + rect.h * 0.2, rect.w * 0.8, rect.h * 0.6);
        self.render_text(button.get_label(), inner, WHITE);
    }

    pub fn render_button_lineup(&mut self, buttons: &[Button], difficulty: Difficulty, rect: Rect) {
        if buttons.is_empty() {
            return;
        }
        let button_count = buttons.len() as f32;
        let spacing = 10.0;
        let button_width = (rect.w - spacing * (button_count - 1.0)) / button_count;
        for (i, button) in buttons.iter().enumerate() {
            let button_x = rect.x + i as f32 * (button_width + spacing);
            self.render_button(
                button,
                button.is_active(difficulty),
                Rect::new(button_x, rect.y, button_width, rect.h),
            );
        }
    }

    fn render_win_banner(&mut self, state: &GameState, next_level_button: &Button) {
        let v = self.viewport;
        let panel = Rect::new(v.x + v.w * 0.2, v.y + v.h * 0.3, v.w * 0.6, v.h * 0.4);
        draw_rectangle(v.x, v.y, v.w, v.h, Color::new(0.0, 0.0, 0.0, 0.5));
        draw_rectangle(panel.x, panel.y, panel.w, panel.h, WHITE);

        let message = format!(
            "Level {} cleared in {} moves!",
            state.get_level().saturating_sub(1),
            state.get_moves()
        );
        self.render_text(
            &message,
            Rect::new(panel.x + panel.w * 0.1, panel.y + panel.h * 0.15, panel.w * 0.8, panel.h * 0.25),
            BLACK,
        );
        self.render_button(
            next_level_button,
            false,
            Rect::new(panel.x + panel.w * 0.3, panel.y + panel.h * 0.6, panel.w * 0.4, panel.h * 0.25),
        );
    }
}
