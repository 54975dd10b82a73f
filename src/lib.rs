//! Engine for a liquid-sorting puzzle: containers of four colored units,
//! pours of the top run from one container to another, and random deals
//! parameterized by difficulty. Rendering lives in the binary.

pub mod difficulty;
pub mod error;
pub mod gameplay;
pub mod generator;
pub mod model;

pub use difficulty::{Difficulty, DifficultyConfig};
pub use error::EngineError;
pub use gameplay::{GameEngine, GameState, Selection};
pub use generator::{generate, generate_random};
pub use model::{Board, CONTAINER_CAPACITY, Color, Container};
