//! Autoplay driver: ask the lookahead for a move, apply it, pause, repeat.

use std::thread;
use std::time::Duration;

use log::{debug, info};

use crate::game::{AdvanceResult, Game};
use crate::lookahead::{Decision, Lookahead};

/// Rounds played when none is configured.
pub const DEFAULT_ROUNDS: u32 = 10;
/// Pause between moves when none is configured.
pub const DEFAULT_PACE: Duration = Duration::from_millis(260);

/// Why an autoplay run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    RoundsExhausted,
    GameOver,
    NoDecision,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoplayReport {
    pub rounds_played: u32,
    pub stop: StopReason,
    pub final_score: u64,
    pub final_steps: u64,
    /// Every decision taken, in order.
    pub decisions: Vec<Decision>,
}

/// Drives a [`Game`] with a [`Lookahead`] for a bounded number of rounds.
///
/// `pace` only exists so a human can follow along; use `Duration::ZERO`
/// headless.
///
/// ```
/// use std::time::Duration;
/// use slide_2048::autoplay::Autoplay;
/// use slide_2048::game::Game;
/// use slide_2048::lookahead::{Lookahead, LookaheadConfig};
///
/// let mut game = Game::seeded(4, 1).unwrap();
/// let mut driver = Autoplay::new(Lookahead::seeded(LookaheadConfig::default(), 2), 5, Duration::ZERO);
/// let report = driver.run(&mut game, |_, _, _| {});
/// assert_eq!(report.rounds_played, 5);
/// ```
pub struct Autoplay {
    lookahead: Lookahead,
    rounds: u32,
    pace: Duration,
}

impl Autoplay {
    pub fn new(lookahead: Lookahead, rounds: u32, pace: Duration) -> Self {
        Self { lookahead, rounds, pace }
    }

    pub fn lookahead(&self) -> &Lookahead {
        &self.lookahead
    }

    /// Play until rounds run out, the game ends, or no move is legal.
    ///
    /// `observe` sees the game after each accepted move along with the
    /// decision and its result; callers persist or render from there.
    pub fn run<F>(&mut self, game: &mut Game, mut observe: F) -> AutoplayReport
    where
        F: FnMut(&Game, &Decision, &AdvanceResult),
    {
        let mut decisions = Vec::new();
        let mut stop = StopReason::RoundsExhausted;
        for round in 0..self.rounds {
            if game.is_over() {
                stop = StopReason::GameOver;
                break;
            }
            let Some(decision) = self.lookahead.advise(game) else {
                stop = StopReason::NoDecision;
                break;
            };
            let result = game.advance(decision.direction);
            debug!("round {}: {} -> score {}", round + 1, decision.direction, result.score);
            observe(game, &decision, &result);
            decisions.push(decision);
            if !self.pace.is_zero() && round + 1 < self.rounds {
                thread::sleep(self.pace);
            }
        }
        if stop == StopReason::RoundsExhausted && game.is_over() {
            stop = StopReason::GameOver;
        }
        let report = AutoplayReport {
            rounds_played: decisions.len() as u32,
            stop,
            final_score: game.score(),
            final_steps: game.steps(),
            decisions,
        };
        info!(
            "autoplay stopped ({:?}) after {} rounds, score {}",
            report.stop, report.rounds_played, report.final_score
        );
        report
    }
}
