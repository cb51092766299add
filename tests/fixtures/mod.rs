//! Boards shared by the engine and lookahead integration tests.
#![allow(dead_code)]

use slide_2048::engine::{Cell, Grid, Move};

pub const N: Cell = None;

pub fn grid(rows: Vec<Vec<Cell>>) -> Grid {
    Grid::from_rows(rows).unwrap()
}

/// Parse a compact board: rows separated by `/`, cells by spaces, `.` for empty.
pub fn board(text: &str) -> Grid {
    let rows = text
        .split('/')
        .map(|row| {
            row.split_whitespace()
                .map(|c| if c == "." { None } else { Some(c.parse().unwrap()) })
                .collect()
        })
        .collect();
    grid(rows)
}

/// A single deterministic shift: board before, direction, board after, points.
pub struct ShiftCase {
    pub name: &'static str,
    pub before: &'static str,
    pub dir: Move,
    pub after: &'static str,
    pub points: u64,
}

pub fn shift_cases() -> Vec<ShiftCase> {
    vec![
        ShiftCase {
            name: "pair merges left",
            before: "2 2 . . / . . . . / . . . . / . . . .",
            dir: Move::Left,
            after: "4 . . . / . . . . / . . . . / . . . .",
            points: 4,
        },
        ShiftCase {
            name: "four of a kind merges twice",
            before: "2 2 2 2 / . . . . / . . . . / . . . .",
            dir: Move::Left,
            after: "4 4 . . / . . . . / . . . . / . . . .",
            points: 8,
        },
        ShiftCase {
            name: "right merges from the far side",
            before: "2 2 2 . / . . . . / . . . . / . . . .",
            dir: Move::Right,
            after: ". . 2 4 / . . . . / . . . . / . . . .",
            points: 4,
        },
        ShiftCase {
            name: "up merges each column pair",
            before: "2 . . . / 2 . . . / 4 . . . / 4 . . .",
            dir: Move::Up,
            after: "4 . . . / 8 . . . / . . . . / . . . .",
            points: 12,
        },
        ShiftCase {
            name: "down slides across a gap",
            before: ". . . 2 / . . . . / . . . 2 / . . . 8",
            dir: Move::Down,
            after: ". . . . / . . . . / . . . 4 / . . . 8",
            points: 4,
        },
        ShiftCase {
            name: "merged tile does not merge again",
            before: "2 2 4 . / . . . . / . . . . / . . . .",
            dir: Move::Left,
            after: "4 4 . . / . . . . / . . . . / . . . .",
            points: 4,
        },
    ]
}

/// Only `Left` changes this board.
pub fn only_left() -> Grid {
    board(". 2 4 8 / . 4 8 2 / . 2 4 8 / . 4 8 2")
}

/// No empty cell and no equal neighbours.
pub fn terminal() -> Grid {
    board("2 4 2 4 / 4 2 4 2 / 2 4 2 4 / 4 2 4 2")
}
