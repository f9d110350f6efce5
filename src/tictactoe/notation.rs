use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use super::board::{Board, Cell, Move, Player, SIZE};
use super::EngineError;

lazy_static! {
    // nine cells, rows optionally separated by '/'
    static ref BOARD_REGEX: Regex =
        Regex::new(r"(?i)^\s*([xo._]{3})/?([xo._]{3})/?([xo._]{3})\s*$").unwrap();
    static ref MOVE_REGEX: Regex =
        Regex::new(r"^\s*\(?\s*(?P<row>\d+)\s*(?:,|\s)\s*(?P<col>\d+)\s*\)?\s*$").unwrap();
}

impl Board {
    /// Compact form accepted by `FromStr`, e.g. `X.O/.../..X`.
    pub fn to_notation(&self) -> String {
        self.cells()
            .chunks(SIZE)
            .map(|row| row.iter().map(Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Only the cell syntax is checked; the mark counts need not come from a legal game.
impl FromStr for Board {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidNotation { input: s.to_owned() };

        let caps = BOARD_REGEX.captures(s).ok_or_else(invalid)?;

        let mut cells = [Cell::Empty; SIZE * SIZE];
        let symbols = (1..=SIZE).filter_map(|i| caps.get(i)).flat_map(|m| m.as_str().chars());

        for (cell, symbol) in cells.iter_mut().zip(symbols) {
            *cell = match symbol.to_ascii_uppercase() {
                'X' => Cell::Occupied(Player::Machine),
                'O' => Cell::Occupied(Player::Human),
                _ => Cell::Empty,
            };
        }

        Ok(Board::from_cells(cells))
    }
}

impl FromStr for Move {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidNotation { input: s.to_owned() };

        let caps = MOVE_REGEX.captures(s).ok_or_else(invalid)?;

        let row = caps["row"].parse::<usize>().map_err(|_| invalid())?;
        let col = caps["col"].parse::<usize>().map_err(|_| invalid())?;

        Move::new(row, col)
    }
}

/*====================================================================================================================*/
