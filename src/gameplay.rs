use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::{debug, info, instrument};

use crate::difficulty::Difficulty;
use crate::error::EngineError;
use crate::generator::generate;
use crate::model::Board;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    None,
    Container(usize),
}

/// A complete snapshot of a game. Transitions return a new value and leave
/// the original untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    selection: Selection,
    moves: u32,
    won: bool,
    level: u32,
}

impl GameState {
    /// Fresh state for `board`. `level` carries over from the previous game.
    pub fn reset(board: Board, level: u32) -> Self {
        Self {
            board,
            selection: Selection::None,
            moves: 0,
            won: false,
            level,
        }
        .check_win()
    }

    pub fn starter() -> Self {
        Self::reset(Board::starter(), 1)
    }

    pub fn get_board(&self) -> &Board {
        &self.board
    }

    pub fn get_selection(&self) -> Selection {
        self.selection
    }

    pub fn get_moves(&self) -> u32 {
        self.moves
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn get_level(&self) -> u32 {
        self.level
    }

    /// Handles a click on container `index`: select it, deselect it, or pour
    /// the current selection into it.
    #[instrument(skip(self), fields(selection = ?self.selection))]
    pub fn select(&self, index: usize) -> Result<GameState, EngineError> {
        self.board.check_index(index)?;
        if self.won {
            debug!("board already won, ignoring input");
            return Ok(self.clone());
        }

        match self.selection {
            Selection::None => {
                if self.board.get(index)?.is_empty() {
                    debug!("cannot select an empty container");
                    return Ok(self.clone());
                }
                Ok(GameState {
                    selection: Selection::Container(index),
                    ..self.clone()
                })
            }
            Selection::Container(selected) if selected == index => Ok(GameState {
                selection: Selection::None,
                ..self.clone()
            }),
            Selection::Container(source) => {
                let (board, moved) = self.board.pour(source, index)?;
                debug!(source, target = index, moved, "pour");
                let moves = if moved { self.moves + 1 } else { self.moves };
                Ok(GameState {
                    board,
                    selection: Selection::None,
                    moves,
                    won: self.won,
                    level: self.level,
                }
                .check_win())
            }
        }
    }

    /// Marks the state won and bumps the level the first time the board is
    /// solved. Repeated calls on a won state change nothing.
    pub fn check_win(self) -> GameState {
        if self.won || !self.board.is_solved() {
            return self;
        }
        info!(level = self.level, moves = self.moves, "level complete");
        GameState {
            selection: Selection::None,
            won: true,
            level: self.level + 1,
            ..self
        }
    }
}

/// A play session: the current state, the active difficulty, and the random
/// source used for new deals.
pub struct GameEngine<R: Rng = ThreadRng> {
    state: GameState,
    difficulty: Difficulty,
    rng: R,
}

impl GameEngine<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl Default for GameEngine<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            state: GameState::starter(),
            difficulty: Difficulty::default(),
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        self.state.get_board()
    }

    pub fn selection(&self) -> Selection {
        self.state.get_selection()
    }

    pub fn moves(&self) -> u32 {
        self.state.get_moves()
    }

    pub fn is_won(&self) -> bool {
        self.state.is_won()
    }

    pub fn level(&self) -> u32 {
        self.state.get_level()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn load_state(&mut self, state: GameState) {
        self.state = state;
    }

    pub fn select(&mut self, index: usize) -> Result<&GameState, EngineError> {
        self.state = self.state.select(index)?;
        Ok(&self.state)
    }

    /// Deals a new board for the current difficulty. Moves go back to zero,
    /// the level is kept.
    pub fn reset_game(&mut self) -> Result<&GameState, EngineError> {
        let board = generate(&self.difficulty.get_config(), &mut self.rng)?;
        self.state = GameState::reset(board, self.state.get_level());
        info!(difficulty = %self.difficulty, level = self.level(), "new game");
        Ok(&self.state)
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<&GameState, EngineError> {
        self.difficulty = difficulty;
        self.reset_game()
    }

    pub fn start_next_level(&mut self) -> Result<&GameState, EngineError> {
        if !self.state.is_won() {
            return Err(EngineError::NotWon);
        }
        self.reset_game()
    }
}
