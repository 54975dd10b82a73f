use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

pub const CONTAINER_CAPACITY: usize = 4;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Pink,
    Brown,
    Orange,
}
impl Color {
    /// Full palette in deal order. A puzzle with `n` colors uses `ALL[..n]`.
    pub const ALL: [Color; 8] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Purple,
        Color::Pink,
        Color::Brown,
        Color::Orange,
    ];

    pub fn get_index(&self) -> usize {
        *self as usize
    }

    /// Letter used by the board text representation: A for the first color, B for the second...
    pub fn get_letter(&self) -> char {
        (b'A' + self.get_index() as u8) as char
    }

    pub fn from_letter(ch: char) -> Result<Self, EngineError> {
        if !ch.is_ascii_alphabetic() {
            return Err(EngineError::UnknownColor { symbol: ch });
        }
        let index = (ch.to_ascii_uppercase() as u8 - b'A') as usize;
        Self::ALL
            .get(index)
            .copied()
            .ok_or(EngineError::UnknownColor { symbol: ch })
    }
}

/// A stack of at most [`CONTAINER_CAPACITY`] units, bottom first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Container {
    units: Vec<Color>,
}
impl Container {
    pub fn new() -> Self {
        Self {
            units: Vec::with_capacity(CONTAINER_CAPACITY),
        }
    }

    pub fn from_units(units: Vec<Color>) -> Result<Self, EngineError> {
        if units.len() > CONTAINER_CAPACITY {
            return Err(EngineError::ContainerOverflow { len: units.len() });
        }
        Ok(Self { units })
    }

    pub fn new_from_repr(repr: &str) -> Result<Self, EngineError> {
        let s = repr.trim();
        if s == "." {
            return Ok(Self::new());
        }
        let units = s
            .chars()
            .map(Color::from_letter)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_units(units)
    }

    pub fn is_full(&self) -> bool {
        self.units.len() == CONTAINER_CAPACITY
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn get_empty_space(&self) -> usize {
        CONTAINER_CAPACITY - self.units.len()
    }

    pub fn get_units(&self) -> &[Color] {
        &self.units
    }

    pub fn get_top_fluid(&self) -> Option<Color> {
        self.units.last().copied()
    }

    /// Length of the run of same-colored units at the top.
    pub fn get_top_fluid_depth(&self) -> usize {
        let Some(top) = self.get_top_fluid() else {
            return 0;
        };
        self.units.iter().rev().take_while(|&&c| c == top).count()
    }

    /// Full and single-colored, or empty.
    pub fn is_sorted(&self) -> bool {
        self.is_empty() || (self.is_full() && self.units.iter().all(|&c| c == self.units[0]))
    }

    /// Units that a pour from `self` into `other` would move. Zero when the
    /// pour is illegal.
    pub fn get_pourable_amount(&self, other: &Container) -> usize {
        let Some(color) = self.get_top_fluid() else {
            return 0;
        };
        if !other.is_empty() && other.get_top_fluid() != Some(color) {
            return 0;
        }
        self.get_top_fluid_depth().min(other.get_empty_space())
    }

    /// Moves the top run into `other`. Returns whether anything moved.
    pub fn pour_into(&mut self, other: &mut Container) -> bool {
        let transfer_amount = self.get_pourable_amount(other);
        if transfer_amount == 0 {
            return false;
        }
        for _ in 0..transfer_amount {
            if let Some(unit) = self.units.pop() {
                other.units.push(unit);
            }
        }
        true
    }

    pub fn get_text_representation(&self) -> String {
        if self.is_empty() {
            return ".".to_string();
        }
        self.units.iter().map(Color::get_letter).collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    containers: Vec<Container>,
}
impl Board {
    pub fn new(containers: Vec<Container>) -> Self {
        Self { containers }
    }

    /// Fixed deal shown before the first reset of a session.
    pub fn starter() -> Self {
        use Color::*;
        let rows = [
            [Red, Blue, Green, Yellow],
            [Purple, Pink, Brown, Orange],
            [Yellow, Red, Blue, Purple],
            [Green, Orange, Pink, Brown],
            [Blue, Green, Purple, Red],
            [Brown, Orange, Yellow, Pink],
            [Orange, Purple, Yellow, Green],
            [Pink, Red, Brown, Blue],
        ];
        let mut containers: Vec<Container> = rows
            .into_iter()
            .map(|row| Container { units: row.to_vec() })
            .collect();
        containers.push(Container::new());
        containers.push(Container::new());
        Self { containers }
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn get_containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn get(&self, index: usize) -> Result<&Container, EngineError> {
        self.containers.get(index).ok_or(EngineError::InvalidIndex {
            index,
            len: self.containers.len(),
        })
    }

    pub fn check_index(&self, index: usize) -> Result<(), EngineError> {
        self.get(index).map(|_| ())
    }

    pub fn get_unit_count(&self) -> usize {
        self.containers.iter().map(Container::len).sum()
    }

    /// Number of units of each color, indexed like [`Color::ALL`].
    pub fn get_color_counts(&self) -> [usize; 8] {
        let mut counts = [0; 8];
        for unit in self.containers.iter().flat_map(|c| c.get_units()) {
            counts[unit.get_index()] += 1;
        }
        counts
    }

    /// The win condition: every container is empty or a full single-color stack.
    pub fn is_solved(&self) -> bool {
        self.containers.iter().all(Container::is_sorted)
    }

    /// Pours the top run of `source` into `target` and returns the new board
    /// along with whether any unit moved.
    pub fn pour(&self, source: usize, target: usize) -> Result<(Board, bool), EngineError> {
        self.check_index(source)?;
        self.check_index(target)?;
        if source == target {
            return Err(EngineError::SameContainer { index: source });
        }

        let mut next = self.clone();
        let (from, to) = if source < target {
            let (left, right) = next.containers.split_at_mut(target);
            (&mut left[source], &mut right[0])
        } else {
            let (left, right) = next.containers.split_at_mut(source);
            (&mut right[0], &mut left[target])
        };
        if to.is_full() {
            return Ok((self.clone(), false));
        }
        let moved = from.pour_into(to);
        if !moved {
            return Ok((self.clone(), false));
        }
        Ok((next, true))
    }

    pub fn get_text_representation(&self) -> String {
        self.containers
            .iter()
            .map(Container::get_text_representation)
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get_text_representation())
    }
}

impl FromStr for Board {
    type Err = EngineError;

    fn from_str(repr: &str) -> Result<Self, Self::Err> {
        let containers = repr
            .split('|')
            .map(Container::new_from_repr)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { containers })
    }
}
