#![no_std]

extern crate alloc;

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub use cell::*;
pub use error::*;
pub use field::*;
pub use generator::*;
pub use types::*;

mod cell;
mod error;
mod field;
mod generator;
mod types;

/// Field dimensions and mine count, passed to [`MineField::regenerate`] as plain values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_count(self.rows, self.cols)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::EmptyField);
        }
        if self.mines == 0 {
            return Err(GameError::NoMines);
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Level::Easy.config()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Easy,
    Normal,
    Expert,
    Custom,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Easy, Level::Normal, Level::Expert, Level::Custom];

    /// Preset configuration, `Custom` only provides a starting point.
    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new(8, 8, 10),
            Self::Normal => GameConfig::new(16, 16, 40),
            Self::Expert => GameConfig::new(16, 30, 99),
            Self::Custom => GameConfig::new(10, 10, 20),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Expert => "expert",
            Self::Custom => "custom",
        }
    }

    /// Finds the preset matching `config`, anything else is `Custom`.
    pub fn of(config: &GameConfig) -> Self {
        [Self::Easy, Self::Normal, Self::Expert]
            .into_iter()
            .find(|level| level.config() == *config)
            .unwrap_or(Self::Custom)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s))
            .ok_or(UnknownLevel)
    }
}

#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("Unknown level, expected one of: easy, normal, expert, custom")]
pub struct UnknownLevel;

/// Logical input already resolved to grid coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    PrimaryPress(Coord2),
    PrimaryRelease(Coord2),
    Secondary(Coord2),
    ChordPress(Coord2),
    ChordMove(Coord2),
    ChordRelease(Coord2),
}

impl Action {
    pub const fn coords(self) -> Coord2 {
        match self {
            Self::PrimaryPress(coords)
            | Self::PrimaryRelease(coords)
            | Self::Secondary(coords)
            | Self::ChordPress(coords)
            | Self::ChordMove(coords)
            | Self::ChordRelease(coords) => coords,
        }
    }
}

/// Notification produced by a field operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldEvent {
    FlagCountChanged(CellCount),
    GameOver { won: bool },
}

/// Events of one operation, in the order they happened.
pub type FieldEvents = SmallVec<[FieldEvent; 2]>;
