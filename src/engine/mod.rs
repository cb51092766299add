//! Engine module: NxN board, single-line shift/merge, and whole-board
//! transition ops. Public API stays small and ergonomic.
//!
//! - `Grid` is the square board with cell accessors and text rendering.
//! - `shift_line` is the primitive every move decomposes into.
//! - `slide`/`spawn_tile`/`is_game_over` are shared by the live game and
//!   the lookahead so both apply identical rules.

mod grid;
mod line;
mod ops;

pub use grid::{
    Cell, Grid, GridError, Move, ParseMoveError, Pos, Score, Tile, TileMove, DEFAULT_SIZE,
    MAX_TILE,
};
pub use line::{shift_line, LineMove, LineShift};
pub use ops::{is_game_over, shifted, slide, spawn_tile, Slide, SPAWN_TILE};
