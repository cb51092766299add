//! slide-2048: a 2048 rules engine + greedy lookahead advisor
//!
//! This crate provides:
//! - An NxN `Grid` and the line shifter every direction is built on (`engine`)
//! - A `Game` that applies moves, spawns tiles and tracks score (`game`)
//! - A greedy lookahead that recommends the next direction (`lookahead`)
//! - JSON snapshots and key-value persistence (`serialization`, `store`)
//! - Input mapping, an autoplay driver and TOML config for the binary
//!
//! Quick start:
//! ```
//! use slide_2048::game::Game;
//! use slide_2048::lookahead::{Lookahead, LookaheadConfig};
//!
//! // Deterministic game and advisor
//! let mut game = Game::seeded(4, 42).unwrap();
//! let mut advisor = Lookahead::seeded(LookaheadConfig::default(), 43);
//!
//! if let Some(decision) = advisor.advise(&game) {
//!     let result = game.advance(decision.direction);
//!     assert!(result.changed());
//! }
//! assert!(game.steps() <= 1);
//! ```
//!
pub mod autoplay;
pub mod config;
pub mod engine;
pub mod game;
pub mod input;
pub mod lookahead;
pub mod serialization;
pub mod store;
