use std::fmt;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engine::{self, Grid, GridError, Move, Pos, Score, Tile, TileMove};
use crate::serialization::{Snapshot, SnapshotError};

/// What a single `advance` call did.
///
/// `moves` is empty exactly when the command was a no-op; in that case
/// nothing else about the game changed either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceResult {
    /// Tile relocations and merge targets, for animation.
    pub moves: Vec<TileMove>,
    /// Points gained by merges during this call.
    pub points: Score,
    /// Cumulative score after the call.
    pub score: Score,
    /// Step counter after the call.
    pub steps: u64,
    /// Where the new `2` was placed, if the move was accepted.
    pub spawned: Option<Pos>,
    pub game_over: bool,
}

impl AdvanceResult {
    #[inline]
    pub fn changed(&self) -> bool {
        !self.moves.is_empty()
    }
}

/// One play session: the board, running score, step counter, best score
/// seen so far and the RNG used for spawns.
///
/// Every accepted command replaces the whole state at once; a rejected one
/// leaves it untouched. Persistence is left to the caller.
///
/// ```
/// use slide_2048::game::Game;
/// use slide_2048::engine::Move;
///
/// let mut game = Game::seeded(4, 42).unwrap();
/// assert_eq!(game.grid().count_empty(), 14);
/// let result = game.advance(Move::Left);
/// assert_eq!(result.steps, game.steps());
/// ```
#[derive(Clone)]
pub struct Game {
    grid: Grid,
    score: Score,
    steps: u64,
    highest_score: Score,
    over: bool,
    rng: StdRng,
}

impl Game {
    /// A fresh game on an NxN board, seeded from OS entropy.
    pub fn new(size: usize) -> Result<Self, GridError> {
        Self::with_rng(size, StdRng::from_entropy())
    }

    /// A fresh game with a deterministic spawn sequence.
    pub fn seeded(size: usize, seed: u64) -> Result<Self, GridError> {
        Self::with_rng(size, StdRng::seed_from_u64(seed))
    }

    fn with_rng(size: usize, rng: StdRng) -> Result<Self, GridError> {
        let mut game = Game { grid: Grid::new(size)?, score: 0, steps: 0, highest_score: 0, over: false, rng };
        game.new_game();
        Ok(game)
    }

    /// Resume from a given board without spawning anything.
    pub fn from_grid(grid: Grid, score: Score, steps: u64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let over = engine::is_game_over(&grid);
        Game { grid, score, steps, highest_score: score, over, rng }
    }

    /// Resume a saved game. `highest_score` is the separately stored best;
    /// it is raised to the snapshot's score if that is larger.
    pub fn from_snapshot(snapshot: &Snapshot, highest_score: Score, seed: Option<u64>) -> Result<Self, SnapshotError> {
        let grid = snapshot.to_grid()?;
        let mut game = Self::from_grid(grid, snapshot.score, snapshot.steps, seed);
        game.highest_score = highest_score.max(snapshot.score);
        Ok(game)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(&self.grid, self.score, self.steps)
    }

    /// Carry over a best score recorded elsewhere.
    pub fn with_highest_score(mut self, best: Score) -> Self {
        self.highest_score = self.highest_score.max(best);
        self
    }

    /// Clear the board, score and steps and place two starting tiles.
    /// The best score survives.
    pub fn new_game(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.steps = 0;
        engine::spawn_tile(&mut self.grid, &mut self.rng);
        engine::spawn_tile(&mut self.grid, &mut self.rng);
        self.over = engine::is_game_over(&self.grid);
        debug!("new game on {0}x{0} board", self.grid.size());
    }

    /// Apply a direction command.
    ///
    /// If no tile can move the call is a no-op. Otherwise the score grows by
    /// the merged points, the step counter increments, one `2` is spawned on
    /// a random empty cell and the terminal flag is recomputed.
    pub fn advance(&mut self, direction: Move) -> AdvanceResult {
        let (mut next, slide) = engine::shifted(&self.grid, direction);
        if !slide.changed() {
            debug!("{} is a no-op", direction);
            return AdvanceResult {
                moves: Vec::new(),
                points: 0,
                score: self.score,
                steps: self.steps,
                spawned: None,
                game_over: self.over,
            };
        }
        let spawned = engine::spawn_tile(&mut next, &mut self.rng);

        self.grid = next;
        self.score = self.score.saturating_add(slide.points);
        self.steps += 1;
        self.highest_score = self.highest_score.max(self.score);
        self.over = engine::is_game_over(&self.grid);
        debug!(
            "{}: {} tiles moved, +{} points, score {}, step {}",
            direction,
            slide.moves.len(),
            slide.points,
            self.score,
            self.steps
        );

        AdvanceResult {
            moves: slide.moves,
            points: slide.points,
            score: self.score,
            steps: self.steps,
            spawned,
            game_over: self.over,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    #[inline]
    pub fn highest_score(&self) -> Score {
        self.highest_score
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Return the highest tile value (e.g., 2048) present on the board.
    #[inline]
    pub fn highest_tile(&self) -> Tile {
        self.grid.highest_tile()
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("grid", &self.grid)
            .field("score", &self.score)
            .field("steps", &self.steps)
            .field("highest_score", &self.highest_score)
            .field("over", &self.over)
            .finish()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)?;
        write!(f, "score: {}  best: {}  steps: {}", self.score, self.highest_score, self.steps)?;
        if self.over {
            write!(f, "  (game over)")?;
        }
        Ok(())
    }
}
