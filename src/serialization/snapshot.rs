use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::{Cell, Grid, GridError, Score};

/// Persisted game state: the full board, the running score and the number
/// of successful moves.
///
/// Older saves wrote `grid`/`data`, `points` and `step`; those names are
/// still accepted on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    #[serde(alias = "grid", alias = "data")]
    pub board: Vec<Vec<Cell>>,
    #[serde(alias = "points")]
    pub score: Score,
    #[serde(alias = "step")]
    pub steps: u64,
}

#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid board: {0}")]
    Grid(#[from] GridError),
}

impl Snapshot {
    pub fn new(grid: &Grid, score: Score, steps: u64) -> Self {
        Snapshot { board: grid.to_rows(), score, steps }
    }

    /// Rebuild and validate the board.
    pub fn to_grid(&self) -> Result<Grid, GridError> {
        Grid::from_rows(self.board.clone())
    }
}

/// Encode a snapshot as a JSON string.
pub fn to_json(snapshot: &Snapshot) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Decode a snapshot from JSON and check that its board is well formed.
///
/// ```
/// use slide_2048::serialization::from_json;
/// let s = from_json(r#"{"board":[[2,null],[null,4]],"score":4,"steps":1}"#).unwrap();
/// assert_eq!(s.board[1][1], Some(4));
/// assert!(from_json(r#"{"board":[[3,null],[null,4]],"score":0,"steps":0}"#).is_err());
/// ```
pub fn from_json(text: &str) -> Result<Snapshot, SnapshotError> {
    let snapshot: Snapshot = serde_json::from_str(text)?;
    snapshot.to_grid()?;
    Ok(snapshot)
}

/// Write a JSON snapshot to a file.
pub fn write_json_to_path<P: AsRef<Path>>(path: P, snapshot: &Snapshot) -> Result<(), SnapshotError> {
    fs::write(path, to_json(snapshot)?)?;
    Ok(())
}

/// Read and validate a JSON snapshot from a file.
pub fn read_json_from_path<P: AsRef<Path>>(path: P) -> Result<Snapshot, SnapshotError> {
    let text = fs::read_to_string(path)?;
    from_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn sample() -> Snapshot {
        Snapshot {
            board: vec![
                vec![Some(2), None, None, Some(8)],
                vec![None; 4],
                vec![None, Some(4), None, None],
                vec![None, None, None, Some(2)],
            ],
            score: 12,
            steps: 3,
        }
    }

    #[test]
    fn json_uses_nullable_nested_rows() {
        let text = to_json(&sample()).unwrap();
        assert!(text.starts_with(r#"{"board":[[2,null,null,8],"#));
        assert!(text.contains(r#""score":12"#));
        assert!(text.contains(r#""steps":3"#));
    }

    #[test]
    fn reads_legacy_field_names() {
        let legacy = r#"{"data":[[2,2],[null,null]],"points":0,"step":0}"#;
        let s = from_json(legacy).unwrap();
        assert_eq!(s.board, vec![vec![Some(2), Some(2)], vec![None, None]]);
        let ts = r#"{"grid":[[null,4],[null,null]],"score":4,"steps":1,"gameOver":false}"#;
        assert_eq!(from_json(ts).unwrap().score, 4);
    }

    #[test]
    fn rejects_malformed_boards() {
        let ragged = r#"{"board":[[2,null],[null]],"score":0,"steps":0}"#;
        assert!(matches!(from_json(ragged), Err(SnapshotError::Grid(GridError::RaggedRow { .. }))));
        assert!(matches!(from_json("not json"), Err(SnapshotError::Json(_))));
        let negative = r#"{"board":[[2,null],[null,null]],"score":-1,"steps":0}"#;
        assert!(from_json(negative).is_err());
        // 2^63 cannot be doubled within a u64.
        let oversized = r#"{"board":[[9223372036854775808,9223372036854775808],[null,null]],"score":0,"steps":0}"#;
        assert!(matches!(from_json(oversized), Err(SnapshotError::Grid(GridError::BadTile { .. }))));
    }

    #[test]
    fn file_round_trip() {
        let tmp = NamedTempFile::new().unwrap();
        write_json_to_path(tmp.path(), &sample()).unwrap();
        let loaded = read_json_from_path(tmp.path()).unwrap();
        assert_eq!(loaded, sample());
        assert_eq!(loaded.to_grid().unwrap().highest_tile(), 8);
    }
}
