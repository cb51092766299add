use super::grid::{Cell, Score, MAX_TILE};

/// A tile relocation within one line, as `(source, destination)` indices.
pub type LineMove = (usize, usize);

/// Outcome of compacting a single line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineShift {
    pub moves: Vec<LineMove>,
    pub points: Score,
}

/// Compact and merge `line` in place toward index 0, or toward the last index
/// when `reverse` is set.
///
/// `head` is the next slot that may receive a tile and `tail` scans ahead of
/// it. After a merge `head` steps past the merged slot, so a tile merges at
/// most once per call: `[2, 2, 2, _]` becomes `[4, 2, _, _]`, not `[4, 4, _, _]`.
/// Tiles already at [`MAX_TILE`] never merge.
///
/// ```
/// use slide_2048::engine::shift_line;
/// let mut line = [Some(2), Some(2), Some(2), None];
/// let shift = shift_line(&mut line, false);
/// assert_eq!(line, [Some(4), Some(2), None, None]);
/// assert_eq!(shift.points, 4);
/// ```
pub fn shift_line(line: &mut [Cell], reverse: bool) -> LineShift {
    let len = line.len();
    let at = |k: usize| if reverse { len - 1 - k } else { k };
    let mut out = LineShift::default();
    let mut head = 0;
    let mut tail = 1;
    while tail < len {
        let (h, t) = (at(head), at(tail));
        match (line[h], line[t]) {
            (_, None) => tail += 1,
            (None, moving) => {
                line[h] = moving;
                line[t] = None;
                out.moves.push((t, h));
                tail += 1;
            }
            (Some(a), Some(b)) if a == b && a < MAX_TILE => {
                let merged = a * 2;
                line[h] = Some(merged);
                line[t] = None;
                out.points = out.points.saturating_add(merged);
                out.moves.push((t, h));
                head += 1;
                tail += 1;
            }
            (Some(_), Some(_)) => {
                head += 1;
                if head == tail {
                    tail += 1;
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shifted(mut line: Vec<Cell>, reverse: bool) -> (Vec<Cell>, LineShift) {
        let s = shift_line(&mut line, reverse);
        (line, s)
    }

    #[test]
    fn it_shift_line_left() {
        let cases: [([Cell; 4], [Cell; 4]); 8] = [
            ([Some(2), Some(2), None, None], [Some(4), None, None, None]),
            ([Some(4), Some(2), None, Some(2)], [Some(4), Some(4), None, None]),
            ([Some(2), None, None, None], [Some(2), None, None, None]),
            ([None, None, None, None], [None, None, None, None]),
            ([Some(4), Some(8), Some(8), None], [Some(4), Some(16), None, None]),
            ([Some(2), Some(4), Some(8), Some(4)], [Some(2), Some(4), Some(8), Some(4)]),
            ([Some(2), Some(2), Some(4), Some(4)], [Some(4), Some(8), None, None]),
            ([Some(4), Some(8), Some(8), Some(4)], [Some(4), Some(16), Some(4), None]),
        ];
        for (input, expected) in cases {
            let (out, _) = shifted(input.to_vec(), false);
            assert_eq!(out, expected.to_vec(), "input {:?}", input);
        }
    }

    #[test]
    fn reverse_mirrors_forward() {
        let lines: Vec<Vec<Cell>> = vec![
            vec![Some(2), Some(2), None, None],
            vec![Some(4), Some(2), None, Some(2)],
            vec![Some(2), Some(2), Some(2), Some(2)],
            vec![None, Some(8), Some(8), Some(8)],
            vec![Some(2), Some(4), Some(8), Some(16)],
            vec![None, None, Some(2), None, Some(2)],
        ];
        for line in lines {
            let len = line.len();
            let (fwd, fwd_shift) = shifted(line.iter().rev().copied().collect(), false);
            let (rev, rev_shift) = shifted(line.clone(), true);
            let fwd_back: Vec<Cell> = fwd.into_iter().rev().collect();
            assert_eq!(rev, fwd_back, "line {:?}", line);
            assert_eq!(rev_shift.points, fwd_shift.points);
            let remapped: Vec<LineMove> =
                fwd_shift.moves.iter().map(|&(s, d)| (len - 1 - s, len - 1 - d)).collect();
            assert_eq!(rev_shift.moves, remapped);
        }
    }

    #[test]
    fn merges_once_per_tile() {
        let (out, s) = shifted(vec![Some(2), Some(2), Some(2), None], false);
        assert_eq!(out, vec![Some(4), Some(2), None, None]);
        assert_eq!(s.points, 4);
        assert_eq!(s.moves, vec![(1, 0), (2, 1)]);

        let (out, s) = shifted(vec![Some(2), Some(2), Some(2), Some(2)], false);
        assert_eq!(out, vec![Some(4), Some(4), None, None]);
        assert_eq!(s.points, 8);
    }

    #[test]
    fn compacted_line_is_untouched() {
        let (out, s) = shifted(vec![Some(2), Some(4), Some(8), Some(16)], false);
        assert_eq!(out, vec![Some(2), Some(4), Some(8), Some(16)]);
        assert!(s.moves.is_empty());
        assert_eq!(s.points, 0);

        let (_, s) = shifted(vec![None; 4], true);
        assert_eq!(s, LineShift::default());
    }

    #[test]
    fn right_shift_collects_at_far_end() {
        let (out, s) = shifted(vec![Some(2), None, None, Some(2)], true);
        assert_eq!(out, vec![None, None, None, Some(4)]);
        assert_eq!(s.moves, vec![(0, 3)]);
        let (out, _) = shifted(vec![None, Some(2), Some(2), Some(2)], true);
        assert_eq!(out, vec![None, None, Some(2), Some(4)]);
    }

    // Relocation never changes the tile sum; merges only fold equal pairs.
    #[test]
    fn value_is_conserved() {
        let cases: Vec<(Vec<Cell>, Score, usize)> = vec![
            (vec![Some(2), Some(2), Some(4), Some(4)], 12, 2),
            (vec![Some(8), None, Some(8), Some(16)], 16, 1),
            (vec![Some(2), Some(4), Some(4), Some(2)], 8, 1),
            (vec![Some(32), Some(32), Some(32), None, Some(32), Some(2)], 128, 2),
        ];
        for (line, points, merges) in cases {
            let before: u64 = line.iter().flatten().sum();
            let (out, s) = shifted(line.clone(), false);
            let after: u64 = out.iter().flatten().sum();
            assert_eq!(before, after, "line {:?}", line);
            assert_eq!(s.points, points, "line {:?}", line);
            let tiles_before = line.iter().flatten().count();
            let tiles_after = out.iter().flatten().count();
            assert_eq!(tiles_before - tiles_after, merges);
            assert!(out.iter().flatten().all(|v| v.is_power_of_two() && *v >= 2));
        }
    }

    #[test]
    fn largest_tiles_do_not_merge() {
        let (out, s) = shifted(vec![Some(MAX_TILE), Some(MAX_TILE), None, None], false);
        assert_eq!(out, vec![Some(MAX_TILE), Some(MAX_TILE), None, None]);
        assert!(s.moves.is_empty());
        assert_eq!(s.points, 0);

        let half = MAX_TILE / 2;
        let (out, s) = shifted(vec![None, Some(half), Some(half), Some(MAX_TILE)], false);
        assert_eq!(out, vec![Some(MAX_TILE), Some(MAX_TILE), None, None]);
        assert_eq!(s.points, MAX_TILE);
    }
}
