//! The game of Hex
//!
//! A reference [`Board`] implementation. Two players alternately place
//! stones on a rhombus of hexagonal cells: Blue tries to connect the left and
//! right edges, Red the top and bottom edges. A full board always contains
//! exactly one winning chain, so random playouts always terminate with a
//! winner.

use std::collections::VecDeque;
use std::fmt;

use log::warn;

use crate::board::{Board, Move, Player};

/// The two sides of Hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HexPlayer {
    /// Connects the left and right edges
    Blue,
    /// Connects the top and bottom edges
    Red,
}

impl Player for HexPlayer {
    fn opponent(&self) -> Self {
        match self {
            HexPlayer::Blue => HexPlayer::Red,
            HexPlayer::Red => HexPlayer::Blue,
        }
    }
}

impl HexPlayer {
    fn symbol(self) -> char {
        match self {
            HexPlayer::Blue => 'B',
            HexPlayer::Red => 'R',
        }
    }
}

impl fmt::Display for HexPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HexPlayer::Blue => write!(f, "Blue"),
            HexPlayer::Red => write!(f, "Red"),
        }
    }
}

/// Errors from parsing a textual board
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum HexParseError {
    /// The board has no rows
    #[error("board must have at least one row")]
    Empty,

    /// A row's length differs from the number of rows
    #[error("row {row} has {len} cells, expected {expected}")]
    NotSquare {
        /// Offending row
        row: usize,
        /// Cells found in that row
        len: usize,
        /// Cells expected
        expected: usize,
    },

    /// A cell is not one of `.`, `B` or `R`
    #[error("invalid cell {0:?}")]
    InvalidCell(char),
}

/// A square Hex board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexBoard {
    size: usize,
    cells: Vec<Option<HexPlayer>>,
}

impl HexBoard {
    /// Creates an empty board with `size` rows and columns
    pub fn new(size: usize) -> Self {
        HexBoard {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Parses a board from rows of `.`, `B` and `R`
    ///
    /// Whitespace inside a row is ignored, so rows may be indented to look
    /// like the rhombus.
    ///
    /// ```
    /// use uct_agent::hex::{HexBoard, HexPlayer};
    /// use uct_agent::{Board, Move};
    ///
    /// let board = HexBoard::from_rows(&[
    ///     "B B .",
    ///     " R R .",
    ///     "  . . .",
    /// ]).unwrap();
    /// assert_eq!(board.cell(Move::new(1, 0)), Some(HexPlayer::Red));
    /// assert_eq!(board.get_valid_moves().len(), 5);
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, HexParseError> {
        if rows.is_empty() {
            return Err(HexParseError::Empty);
        }

        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (row, line) in rows.iter().enumerate() {
            let before = cells.len();
            for c in line.chars().filter(|c| !c.is_whitespace()) {
                cells.push(match c {
                    '.' => None,
                    'B' | 'b' => Some(HexPlayer::Blue),
                    'R' | 'r' => Some(HexPlayer::Red),
                    other => return Err(HexParseError::InvalidCell(other)),
                });
            }
            let len = cells.len() - before;
            if len != size {
                return Err(HexParseError::NotSquare {
                    row,
                    len,
                    expected: size,
                });
            }
        }

        Ok(HexBoard { size, cells })
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the stone at `mv`, if any
    pub fn cell(&self, mv: Move) -> Option<HexPlayer> {
        self.index(mv).and_then(|i| self.cells[i])
    }

    /// Returns true if every cell holds a stone
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    fn index(&self, mv: Move) -> Option<usize> {
        (mv.row < self.size && mv.column < self.size).then(|| mv.row * self.size + mv.column)
    }

    fn neighbours(&self, row: usize, column: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        const OFFSETS: [(isize, isize); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0)];
        let size = self.size as isize;
        OFFSETS.into_iter().filter_map(move |(dr, dc)| {
            let r = row as isize + dr;
            let c = column as isize + dc;
            (r >= 0 && r < size && c >= 0 && c < size).then(|| (r as usize, c as usize))
        })
    }

    /// Flood fills from one edge and reports whether it reaches the other
    fn connects(&self, player: HexPlayer) -> bool {
        let n = self.size;
        let mut seen = vec![false; n * n];
        let mut queue = VecDeque::new();

        for i in 0..n {
            let (row, column) = match player {
                HexPlayer::Blue => (i, 0),
                HexPlayer::Red => (0, i),
            };
            if self.cells[row * n + column] == Some(player) {
                seen[row * n + column] = true;
                queue.push_back((row, column));
            }
        }

        while let Some((row, column)) = queue.pop_front() {
            let reached = match player {
                HexPlayer::Blue => column == n - 1,
                HexPlayer::Red => row == n - 1,
            };
            if reached {
                return true;
            }
            for (r, c) in self.neighbours(row, column) {
                let i = r * n + c;
                if !seen[i] && self.cells[i] == Some(player) {
                    seen[i] = true;
                    queue.push_back((r, c));
                }
            }
        }
        false
    }
}

impl Board for HexBoard {
    type Player = HexPlayer;

    fn get_valid_moves(&self) -> Vec<Move> {
        if self.check_winner().is_some() {
            return Vec::new();
        }
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| Move::new(i / self.size, i % self.size))
            .collect()
    }

    fn make_move(&mut self, mv: Move, player: HexPlayer) {
        match self.index(mv) {
            Some(i) if self.cells[i].is_none() => self.cells[i] = Some(player),
            _ => warn!("Ignoring illegal move {} by {}", mv, player),
        }
    }

    fn check_winner(&self) -> Option<HexPlayer> {
        if self.size == 0 {
            return None;
        }
        [HexPlayer::Blue, HexPlayer::Red]
            .into_iter()
            .find(|&player| self.connects(player))
    }
}

impl fmt::Display for HexBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for column in 0..self.size {
            write!(f, "{:<2}", column % 10)?;
        }
        writeln!(f)?;

        for row in 0..self.size {
            write!(f, "{:>2} {}", row, " ".repeat(row))?;
            for column in 0..self.size {
                let symbol = self.cells[row * self.size + column].map_or('.', HexPlayer::symbol);
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
