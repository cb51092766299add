//! Serialization surface for saved games.
//!
//! The only wire format is the snapshot: a JSON object with the board as
//! nested rows of nullable integers, the score and the step count.

mod snapshot;

pub use snapshot::{
    from_json, read_json_from_path, to_json, write_json_to_path, Snapshot, SnapshotError,
};
