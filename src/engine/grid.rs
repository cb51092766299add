use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single board cell: `None` when empty, otherwise a power of two >= 2.
pub type Cell = Option<Tile>;

/// Tile value (2, 4, 8, ...), at most [`MAX_TILE`].
pub type Tile = u64;

/// Largest tile a board may hold. Two of these never merge.
pub const MAX_TILE: Tile = 1 << 62;

/// Points gained by merges.
pub type Score = u64;

/// Side length used when none is configured.
pub const DEFAULT_SIZE: usize = 4;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
}

impl Move {
    /// All directions in the order the lookahead tries them.
    pub const ALL: [Move; 4] = [Move::Left, Move::Right, Move::Up, Move::Down];

    /// Right and Down compact toward the far end of a line.
    #[inline]
    pub fn is_reverse(self) -> bool {
        matches!(self, Move::Right | Move::Down)
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Move::Left | Move::Right)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Move::Left => "left",
            Move::Right => "right",
            Move::Up => "up",
            Move::Down => "down",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown direction: {0:?}")]
pub struct ParseMoveError(pub String);

/// Accepts direction names, browser arrow key names, and the usual
/// `wasd` / `hjkl` letters. Anything else is rejected.
impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let dir = match trimmed.to_ascii_lowercase().as_str() {
            "left" | "arrowleft" | "a" | "h" => Move::Left,
            "right" | "arrowright" | "d" | "l" => Move::Right,
            "up" | "arrowup" | "w" | "k" => Move::Up,
            "down" | "arrowdown" | "s" | "j" => Move::Down,
            _ => return Err(ParseMoveError(trimmed.to_string())),
        };
        Ok(dir)
    }
}

/// Board coordinate, `row` first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Pos { row, col }
    }
}

/// One tile's relocation (or merge target) during a single advance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TileMove {
    pub from: Pos,
    pub to: Pos,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("board must be at least 2x2, got size {0}")]
    TooSmall(usize),
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },
    #[error("cell ({row}, {col}) holds {value}, which is not a power of two in 2..=2^62")]
    BadTile { row: usize, col: usize, value: Tile },
}

/// Square NxN board stored row-major.
///
/// Every non-empty cell holds a power of two >= 2; `from_rows` checks this
/// and the mutators used by the engine only ever write doubled or fresh `2`
/// values.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// An empty board of the given side length.
    ///
    /// ```
    /// use slide_2048::engine::Grid;
    /// let g = Grid::new(4).unwrap();
    /// assert_eq!(g.count_empty(), 16);
    /// ```
    pub fn new(size: usize) -> Result<Self, GridError> {
        if size < 2 {
            return Err(GridError::TooSmall(size));
        }
        Ok(Grid { size, cells: vec![None; size * size] })
    }

    /// Build a board from nested rows, validating shape and tile values.
    ///
    /// ```
    /// use slide_2048::engine::{Grid, Pos};
    /// let g = Grid::from_rows(vec![vec![Some(2), None], vec![None, Some(4)]]).unwrap();
    /// assert_eq!(g.get(Pos::new(1, 1)), Some(4));
    /// assert!(Grid::from_rows(vec![vec![Some(3), None], vec![None, None]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let size = rows.len();
        if size < 2 {
            return Err(GridError::TooSmall(size));
        }
        let mut cells = Vec::with_capacity(size * size);
        for (row, line) in rows.into_iter().enumerate() {
            if line.len() != size {
                return Err(GridError::RaggedRow { row, len: line.len(), expected: size });
            }
            for (col, cell) in line.into_iter().enumerate() {
                if let Some(value) = cell {
                    if value < 2 || value > MAX_TILE || !value.is_power_of_two() {
                        return Err(GridError::BadTile { row, col, value });
                    }
                }
                cells.push(cell);
            }
        }
        Ok(Grid { size, cells })
    }

    /// Empty every cell, keeping the size.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    /// Side length N.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, pos: Pos) -> Cell {
        self.cells[self.index(pos)]
    }

    #[inline]
    pub fn set(&mut self, pos: Pos, cell: Cell) {
        let idx = self.index(pos);
        self.cells[idx] = cell;
    }

    /// Mutable view of one row, left to right.
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [Cell] {
        let start = row * self.size;
        &mut self.cells[start..start + self.size]
    }

    /// Copy of one column, top to bottom.
    pub fn column(&self, col: usize) -> Vec<Cell> {
        (0..self.size).map(|row| self.get(Pos::new(row, col))).collect()
    }

    pub fn set_column(&mut self, col: usize, line: &[Cell]) {
        debug_assert_eq!(line.len(), self.size);
        for (row, &cell) in line.iter().enumerate() {
            self.set(Pos::new(row, col), cell);
        }
    }

    /// Rows as nested vectors, the shape used by the snapshot format.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.size).map(|r| r.to_vec()).collect()
    }

    /// Row-major iterator over all cells.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Positions of all empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Pos> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| Pos::new(i / self.size, i % self.size))
            .collect()
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Largest tile on the board, 0 when empty.
    pub fn highest_tile(&self) -> Tile {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        debug_assert!(pos.row < self.size && pos.col < self.size);
        pos.row * self.size + pos.col
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid").field("size", &self.size).field("rows", &self.to_rows()).finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let divider = "-".repeat(self.size * 8);
        writeln!(f)?;
        for (r, row) in self.cells.chunks(self.size).enumerate() {
            if r > 0 {
                writeln!(f, "{}", divider)?;
            }
            let line: Vec<String> = row.iter().map(format_val).collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(cell: &Cell) -> String {
    match cell {
        None => String::from("       "),
        Some(v) => {
            let mut x = v.to_string();
            while x.len() < 7 {
                match x.len() {
                    6 => x = format!(" {}", x),
                    _ => x = format!(" {} ", x),
                }
            }
            x
        }
    }
}
