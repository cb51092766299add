//! Key-value persistence for saved games.
//!
//! The game core never writes anything itself; callers hand the state to
//! [`Persistence`] after each accepted move. Two keys are used: one holds
//! the full snapshot, the other only the best score ever reached so it
//! survives a reset.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;

use crate::engine::Score;
use crate::game::Game;
use crate::serialization::{self, Snapshot};

/// Key holding the JSON snapshot of the current game.
pub const GAME_STATE_KEY: &str = "gameState";
/// Key holding the best score as a decimal integer.
pub const HIGHEST_SCORE_KEY: &str = "highestScore";

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid key {0:?}")]
    InvalidKey(String),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serialization::SnapshotError),
}

/// Minimal string key-value store.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store, handy for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One file per key under a directory.
///
/// Writes go to a temporary file that is renamed over the target, so a
/// crash mid-write leaves the previous value in place.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)?) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Saves and restores games through a [`KvStore`] under fixed keys.
#[derive(Debug)]
pub struct Persistence<S: KvStore> {
    store: S,
}

impl<S: KvStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Load the saved snapshot.
    ///
    /// A missing, unreadable or corrupt entry yields `None` so the caller can
    /// start a fresh game; problems are logged, not returned.
    pub fn load_game(&self) -> Option<Snapshot> {
        let text = match self.store.get(GAME_STATE_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                warn!("could not read saved game, starting fresh: {}", e);
                return None;
            }
        };
        match serialization::from_json(&text) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("saved game is corrupt, starting fresh: {}", e);
                None
            }
        }
    }

    pub fn save_game(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let text = serialization::to_json(snapshot)?;
        self.store.set(GAME_STATE_KEY, &text)
    }

    pub fn clear_game(&mut self) -> Result<(), StoreError> {
        self.store.remove(GAME_STATE_KEY)
    }

    /// Best score on record, 0 when absent or unreadable.
    pub fn load_highest_score(&self) -> Score {
        match self.store.get(HIGHEST_SCORE_KEY) {
            Ok(Some(text)) => text.trim().parse().unwrap_or_else(|e| {
                warn!("ignoring unreadable best score {:?}: {}", text, e);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                warn!("could not read best score: {}", e);
                0
            }
        }
    }

    pub fn save_highest_score(&mut self, score: Score) -> Result<(), StoreError> {
        self.store.set(HIGHEST_SCORE_KEY, &score.to_string())
    }

    /// Save the game and raise the stored best score if it was beaten.
    pub fn record(&mut self, game: &Game) -> Result<(), StoreError> {
        self.save_game(&game.snapshot())?;
        if game.score() > self.load_highest_score() {
            self.save_highest_score(game.score())?;
        }
        Ok(())
    }
}
