use clipboard_rs::{Clipboard, ClipboardContext};
use liquid_sort::{Difficulty, EngineError, GameEngine};
use macroquad::prelude::*;
use tracing::{debug, info, warn};

use crate::controls::{Button, ControlAction};
use crate::renderer::Renderer;

/// Presentation shell around [`GameEngine`]: draws its state and turns clicks
/// into engine calls.
pub struct App {
    engine: GameEngine,
    renderer: Renderer,
    buttons: Vec<Button>,
    next_level_button: Button,
}

impl App {
    pub fn new() -> Self {
        let blue = Color::from_rgba(0x25, 0x63, 0xeb, 0xff);
        let mut buttons: Vec<Button> = Difficulty::ALL
            .iter()
            .map(|&tier| {
                let label = match tier {
                    Difficulty::Easy => "Easy",
                    Difficulty::Normal => "Normal",
                    Difficulty::Hard => "Hard",
                };
                Button::new(label, ControlAction::SetDifficulty(tier), blue)
            })
            .collect();
        buttons.push(Button::new("Restart", ControlAction::Restart, Color::from_rgba(0xdc, 0x26, 0x26, 0xff)));
        buttons.push(Button::new("Copy", ControlAction::CopyState, Color::from_rgba(0x7c, 0x3a, 0xed, 0xff)));

        Self {
            engine: GameEngine::new(),
            renderer: Renderer::new(),
            buttons,
            next_level_button: Button::new(
                "Next Level",
                ControlAction::NextLevel,
                Color::from_rgba(0x10, 0xb9, 0x81, 0xff),
            ),
        }
    }

    pub fn render(&mut self) {
        self.renderer.autoset_viewport();
        self.renderer.render_game(
            self.engine.state(),
            self.engine.difficulty(),
            &self.buttons,
            &self.next_level_button,
        );
    }

    pub fn handle_click(&mut self, x: f32, y: f32) {
        let Some(action) = self.renderer.get_hit_test_registry().hit_test(x, y) else {
            return;
        };
        if let Err(e) = self.handle_action(action) {
            warn!(?action, error = %e, "action failed");
        }
    }

    fn handle_action(&mut self, action: ControlAction) -> Result<(), EngineError> {
        debug!(?action, "handling action");
        match action {
            ControlAction::SelectContainer(index) => {
                self.engine.select(index)?;
            }
            ControlAction::SetDifficulty(tier) => {
                self.engine.set_difficulty(tier)?;
            }
            ControlAction::Restart => {
                self.engine.reset_game()?;
            }
            ControlAction::NextLevel => {
                self.engine.start_next_level()?;
            }
            ControlAction::CopyState => {
                let repr = self.engine.board().get_text_representation();
                self.set_clipboard(&repr);
            }
        }
        Ok(())
    }

    fn set_clipboard(&self, content: &str) {
        let result = ClipboardContext::new().and_then(|ctx| ctx.set_text(content.to_string()));
        match result {
            Ok(()) => info!(board = content, "copied board to clipboard"),
            Err(e) => warn!(error = %e, "clipboard unavailable"),
        }
    }
}
