use std::fmt;

use tracing::debug;

/// Parameters for dealing a new board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DifficultyConfig {
    pub color_count: usize,
    pub bottle_count: usize,
    pub empty_bottles: usize,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}
impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Looks a tier up by name, ignoring case. Anything unrecognized maps to
    /// [`Difficulty::Normal`]; this is a lookup policy, not an error.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "normal" => Difficulty::Normal,
            "hard" => Difficulty::Hard,
            other => {
                debug!(tier = other, "unknown difficulty, using normal");
                Difficulty::Normal
            }
        }
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn get_config(&self) -> DifficultyConfig {
        match self {
            Difficulty::Easy => DifficultyConfig {
                color_count: 4,
                bottle_count: 6,
                empty_bottles: 2,
            },
            Difficulty::Normal => DifficultyConfig {
                color_count: 6,
                bottle_count: 8,
                empty_bottles: 2,
            },
            Difficulty::Hard => DifficultyConfig {
                color_count: 8,
                bottle_count: 12,
                empty_bottles: 2,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.get_name())
    }
}
