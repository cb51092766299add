//! Mapping raw user input to direction commands.

use std::str::FromStr;

use crate::engine::{Move, ParseMoveError};

/// Classify a swipe vector by its dominant axis, then its sign.
///
/// Screen coordinates are assumed: `dy < 0` is up. Gestures shorter than
/// `min_distance` on both axes are ignored.
///
/// ```
/// use slide_2048::engine::Move;
/// use slide_2048::input::classify_swipe;
/// assert_eq!(classify_swipe(-40.0, 10.0, 5.0), Some(Move::Left));
/// assert_eq!(classify_swipe(3.0, -90.0, 5.0), Some(Move::Up));
/// assert_eq!(classify_swipe(1.0, 1.0, 5.0), None);
/// ```
pub fn classify_swipe(dx: f64, dy: f64, min_distance: f64) -> Option<Move> {
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }
    if dx.abs() < min_distance && dy.abs() < min_distance {
        return None;
    }
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    let dir = if dy.abs() > dx.abs() {
        if dy < 0.0 { Move::Up } else { Move::Down }
    } else if dx < 0.0 {
        Move::Left
    } else {
        Move::Right
    };
    Some(dir)
}

/// A line of input in the interactive loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Move),
    Hint,
    NewGame,
    Quit,
}

impl FromStr for Command {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "?" | "hint" => Ok(Command::Hint),
            "n" | "new" | "restart" => Ok(Command::NewGame),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            _ => s.parse().map(Command::Move),
        }
    }
}
