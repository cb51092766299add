use rand::seq::SliceRandom;
use rand::Rng;

use super::grid::{Grid, Move, Pos, Score, Tile, TileMove, MAX_TILE};
use super::line::shift_line;

/// Every spawned tile has this value.
pub const SPAWN_TILE: Tile = 2;

/// Result of sliding a whole grid, before any spawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slide {
    pub moves: Vec<TileMove>,
    pub points: Score,
}

impl Slide {
    /// True when at least one tile moved, i.e. the direction was legal.
    #[inline]
    pub fn changed(&self) -> bool {
        !self.moves.is_empty()
    }
}

/// Slide/merge tiles in the given direction, in place. No randomness.
///
/// Rows are shifted directly; columns are copied out top-to-bottom, shifted
/// and written back. Line moves are mapped back to board coordinates.
pub fn slide(grid: &mut Grid, direction: Move) -> Slide {
    let reverse = direction.is_reverse();
    let mut out = Slide::default();
    for i in 0..grid.size() {
        if direction.is_horizontal() {
            let shift = shift_line(grid.row_mut(i), reverse);
            out.points = out.points.saturating_add(shift.points);
            out.moves.extend(
                shift.moves.into_iter().map(|(s, d)| TileMove { from: Pos::new(i, s), to: Pos::new(i, d) }),
            );
        } else {
            let mut col = grid.column(i);
            let shift = shift_line(&mut col, reverse);
            grid.set_column(i, &col);
            out.points = out.points.saturating_add(shift.points);
            out.moves.extend(
                shift.moves.into_iter().map(|(s, d)| TileMove { from: Pos::new(s, i), to: Pos::new(d, i) }),
            );
        }
    }
    out
}

/// Return the grid resulting from sliding in `direction`, leaving `grid` untouched.
pub fn shifted(grid: &Grid, direction: Move) -> (Grid, Slide) {
    let mut next = grid.clone();
    let slide = slide(&mut next, direction);
    (next, slide)
}

/// Place a `2` on a uniformly random empty cell. Returns where it went, or
/// `None` if the board is full.
pub fn spawn_tile<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Option<Pos> {
    let empty = grid.empty_cells();
    let &pos = empty.choose(rng)?;
    grid.set(pos, Some(SPAWN_TILE));
    Some(pos)
}

/// True iff the board is full and no two orthogonal neighbours are equal.
pub fn is_game_over(grid: &Grid) -> bool {
    if grid.count_empty() > 0 {
        return false;
    }
    let n = grid.size();
    for row in 0..n {
        for col in 0..n {
            let here = grid.get(Pos::new(row, col));
            if here == Some(MAX_TILE) {
                continue;
            }
            if col + 1 < n && grid.get(Pos::new(row, col + 1)) == here {
                return false;
            }
            if row + 1 < n && grid.get(Pos::new(row + 1, col)) == here {
                return false;
            }
        }
    }
    true
}
