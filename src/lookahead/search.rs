use std::time::Instant;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engine::{self, Grid, Move, Score};
use crate::game::Game;

use super::{choose, BranchEval, Decision, LookaheadConfig, SearchStats};

/// A simulated position. Owned by the frame that created it.
struct Node {
    grid: Grid,
    score: Score,
}

/// Per-call bookkeeping threaded through the recursion.
struct Walk {
    deadline: Option<Instant>,
    nodes: u64,
    budget_hits: u64,
}

/// Single-threaded greedy lookahead.
///
/// Owns the RNG used for simulated spawns, so a seeded advisor gives the
/// same recommendations for the same inputs.
pub struct Lookahead {
    cfg: LookaheadConfig,
    rng: StdRng,
    stats: SearchStats,
}

impl Lookahead {
    pub fn new() -> Self {
        Self::with_config(LookaheadConfig::default())
    }

    pub fn with_config(cfg: LookaheadConfig) -> Self {
        Self { cfg, rng: StdRng::from_entropy(), stats: SearchStats::default() }
    }

    /// Deterministic variant for tests and reproducible autoplay.
    pub fn seeded(cfg: LookaheadConfig, seed: u64) -> Self {
        Self { cfg, rng: StdRng::seed_from_u64(seed), stats: SearchStats::default() }
    }

    #[inline]
    pub fn config(&self) -> &LookaheadConfig {
        &self.cfg
    }

    /// Recommend a direction at the configured depth.
    ///
    /// Returns `None` only when no direction changes the board.
    #[inline]
    pub fn best_move(&mut self, grid: &Grid, score: Score) -> Option<Decision> {
        let depth = self.cfg.depth;
        self.best_move_at_depth(grid, score, depth)
    }

    /// Recommend a direction for a live game without touching it.
    #[inline]
    pub fn advise(&mut self, game: &Game) -> Option<Decision> {
        self.best_move(game.grid(), game.score())
    }

    /// Recommend a direction looking `depth` levels ahead (clamped by the
    /// configured cap). Depths 0 and 1 both score each direction by its
    /// immediate result.
    pub fn best_move_at_depth(&mut self, grid: &Grid, score: Score, depth: u32) -> Option<Decision> {
        let branches = self.branch_evals_at_depth(grid, score, depth);
        let decision = choose(&branches);
        match decision {
            Some(d) => debug!(
                "lookahead depth {}: {} projects {} ({} nodes)",
                self.cfg.effective_depth(depth),
                d.direction,
                d.projected_score,
                self.stats.nodes
            ),
            None => debug!("lookahead: no legal move"),
        }
        decision
    }

    /// Projected value of each direction at the configured depth.
    ///
    /// Returns a fixed array in `Move::ALL` order and marks no-op moves as
    /// `legal=false`.
    pub fn branch_evals(&mut self, grid: &Grid, score: Score) -> [BranchEval; 4] {
        let depth = self.cfg.depth;
        self.branch_evals_at_depth(grid, score, depth)
    }

    pub fn branch_evals_at_depth(&mut self, grid: &Grid, score: Score, depth: u32) -> [BranchEval; 4] {
        let depth = self.cfg.effective_depth(depth);
        let mut walk = Walk {
            deadline: self.cfg.time_budget.map(|b| Instant::now() + b),
            nodes: 0,
            budget_hits: 0,
        };
        let root = Node { grid: grid.clone(), score };
        let mut out = Move::ALL.map(|dir| BranchEval { dir, value: 0, legal: false });
        for (slot, &dir) in out.iter_mut().zip(Move::ALL.iter()) {
            if let Some(child) = self.simulate(&root, dir) {
                let value = if depth > 1 {
                    self.evaluate(child, depth - 1, &mut walk)
                } else {
                    walk.nodes += 1;
                    child.score
                };
                *slot = BranchEval { dir, value, legal: true };
            }
        }
        self.stats.nodes = walk.nodes;
        self.stats.peak_nodes = self.stats.peak_nodes.max(walk.nodes);
        self.stats.budget_hits = walk.budget_hits;
        out
    }

    /// Statistics collected from the last call to [`Self::best_move`] or
    /// [`Self::branch_evals`].
    #[inline]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// Reset accumulated stats to zero.
    #[inline]
    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    /// Shift, merge and spawn on a copy. `None` when `dir` moves nothing.
    fn simulate(&mut self, node: &Node, dir: Move) -> Option<Node> {
        let (mut grid, slide) = engine::shifted(&node.grid, dir);
        if !slide.changed() {
            return None;
        }
        engine::spawn_tile(&mut grid, &mut self.rng);
        Some(Node { grid, score: node.score.saturating_add(slide.points) })
    }

    fn evaluate(&mut self, node: Node, depth: u32, walk: &mut Walk) -> Score {
        walk.nodes += 1;
        if depth == 0 {
            return node.score;
        }
        if walk.deadline.is_some_and(|d| Instant::now() >= d) {
            walk.budget_hits += 1;
            return node.score;
        }
        let mut best: Option<Score> = None;
        for dir in Move::ALL {
            if let Some(child) = self.simulate(&node, dir) {
                let value = self.evaluate(child, depth - 1, walk);
                best = Some(best.map_or(value, |b| b.max(value)));
            }
        }
        best.unwrap_or(node.score)
    }
}

impl Default for Lookahead {
    fn default() -> Self {
        Self::new()
    }
}
