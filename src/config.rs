//! TOML configuration for the binary.
//!
//! Every field is optional; a missing file section falls back to the
//! defaults below. CLI flags override whatever is loaded here.
//!
//! ```toml
//! board_size = 4
//! seed = 42
//!
//! [lookahead]
//! depth = 5
//! depth_cap = 8
//! time_budget_ms = 500
//!
//! [autoplay]
//! rounds = 10
//! pace_ms = 260
//!
//! [storage]
//! dir = ".slide-2048"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::lookahead::LookaheadConfig;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("board size must be at least 2, got {0}")]
    BoardSize(usize),
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "defaults::board_size")]
    pub board_size: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub lookahead: LookaheadSettings,
    #[serde(default)]
    pub autoplay: AutoplaySettings,
    #[serde(default)]
    pub storage: Storage,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookaheadSettings {
    #[serde(default = "defaults::depth")]
    pub depth: u32,
    /// `0` disables the cap.
    #[serde(default = "defaults::depth_cap")]
    pub depth_cap: u32,
    #[serde(default)]
    pub time_budget_ms: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutoplaySettings {
    #[serde(default = "defaults::rounds")]
    pub rounds: u32,
    #[serde(default = "defaults::pace_ms")]
    pub pace_ms: u64,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Storage {
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_size: defaults::board_size(),
            seed: None,
            lookahead: LookaheadSettings::default(),
            autoplay: AutoplaySettings::default(),
            storage: Storage::default(),
        }
    }
}

impl Default for LookaheadSettings {
    fn default() -> Self {
        Self { depth: defaults::depth(), depth_cap: defaults::depth_cap(), time_budget_ms: None }
    }
}

impl Default for AutoplaySettings {
    fn default() -> Self {
        Self { rounds: defaults::rounds(), pace_ms: defaults::pace_ms() }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents)?;
        if cfg.board_size < 2 {
            return Err(ConfigError::BoardSize(cfg.board_size));
        }
        Ok(cfg)
    }

    pub fn lookahead_config(&self) -> LookaheadConfig {
        let la = &self.lookahead;
        LookaheadConfig {
            depth: la.depth,
            depth_cap: (la.depth_cap > 0).then_some(la.depth_cap),
            time_budget: la.time_budget_ms.map(Duration::from_millis),
        }
    }

    pub fn pace(&self) -> Duration {
        Duration::from_millis(self.autoplay.pace_ms)
    }
}

mod defaults {
    use crate::autoplay::{DEFAULT_PACE, DEFAULT_ROUNDS};
    use crate::engine::DEFAULT_SIZE;
    use crate::lookahead::{DEFAULT_DEPTH, DEFAULT_DEPTH_CAP};

    pub fn board_size() -> usize { DEFAULT_SIZE }
    pub fn depth() -> u32 { DEFAULT_DEPTH }
    pub fn depth_cap() -> u32 { DEFAULT_DEPTH_CAP }
    pub fn rounds() -> u32 { DEFAULT_ROUNDS }
    pub fn pace_ms() -> u64 { DEFAULT_PACE.as_millis() as u64 }
}
