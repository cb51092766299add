//! Greedy lookahead move advisor.
//!
//! [`Lookahead`] tries each direction on a private copy of the board, spawns
//! one random `2` exactly like the live game, and recurses. A node's value is
//! the best score reachable among its legal children, or its own score when
//! it has none or the depth is used up. Spawns are sampled once per
//! simulated step rather than averaged, so the search is neither minimax nor
//! expectimax.
//!
//! Quick start
//! ```
//! use slide_2048::engine::{Grid, Move};
//! use slide_2048::lookahead::{Lookahead, LookaheadConfig};
//!
//! let grid = Grid::from_rows(vec![
//!     vec![Some(2), Some(2), None, None],
//!     vec![None; 4],
//!     vec![None; 4],
//!     vec![None; 4],
//! ]).unwrap();
//! let mut advisor = Lookahead::seeded(LookaheadConfig::default(), 7);
//! let decision = advisor.best_move(&grid, 0).unwrap();
//! assert!(decision.projected_score >= 4);
//! ```

use std::time::Duration;

use crate::engine::{Move, Score};

mod search;

pub use search::Lookahead;

/// Depth used when none is configured.
pub const DEFAULT_DEPTH: u32 = 5;

/// Hard ceiling applied by default; cost grows as 4^depth.
pub const DEFAULT_DEPTH_CAP: u32 = 8;

/// Configurable knobs for the lookahead.
///
/// - `depth`: number of simulated move levels.
/// - `depth_cap`: optional hard cap applied to any requested depth.
/// - `time_budget`: optional wall-clock budget per decision; once spent,
///   nodes stop extending and report their own score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookaheadConfig {
    pub depth: u32,
    pub depth_cap: Option<u32>,
    pub time_budget: Option<Duration>,
}

impl Default for LookaheadConfig {
    fn default() -> Self {
        Self { depth: DEFAULT_DEPTH, depth_cap: Some(DEFAULT_DEPTH_CAP), time_budget: None }
    }
}

impl LookaheadConfig {
    /// Apply the cap to a requested depth.
    #[inline]
    pub fn effective_depth(&self, depth: u32) -> u32 {
        match self.depth_cap {
            Some(cap) => depth.min(cap),
            None => depth,
        }
    }
}

/// The recommended direction and the score its subtree reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub direction: Move,
    pub projected_score: Score,
}

/// Per-direction value at the root.
///
/// - `value` is the projected score for taking `dir` from the current board.
/// - `legal` is false when the move is a no-op for the current board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchEval {
    pub dir: Move,
    pub value: Score,
    pub legal: bool,
}

/// Basic search stats for a single evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Simulated positions visited, root children included.
    pub nodes: u64,
    pub peak_nodes: u64,
    /// Nodes cut short because the time budget ran out.
    pub budget_hits: u64,
}

/// Pick the first maximum among legal branches, in `Move::ALL` order.
pub fn choose(branches: &[BranchEval; 4]) -> Option<Decision> {
    let mut best: Option<Decision> = None;
    for b in branches.iter().filter(|b| b.legal) {
        match best {
            Some(d) if b.value <= d.projected_score => {}
            _ => best = Some(Decision { direction: b.dir, projected_score: b.value }),
        }
    }
    best
}
