use serde_json::{Map, Value};
use std::cell::Cell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;

/// Key the best streak is stored under.
pub const HIGH_SCORE_KEY: &str = "spellingBees_highScore";

/// Somewhere to keep the best streak between sessions.
pub trait HighScoreStore {
    /// Stored high score, or 0 when nothing usable is stored.
    fn load(&self) -> u32;
    fn save(&self, high_score: u32) -> io::Result<()>;
}

/// Reads a stored value the forgiving way: numbers and numeric strings count,
/// anything else is treated as no score at all.
fn parse_score(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// JSON key-value file shared with any other keys already in it.
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::scores_path().unwrap_or_else(|| PathBuf::from("spelling_bees_scores.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Map<String, Value> {
        fs::read(&self.path)
            .ok()
            .and_then(|bytes| serde_json::from_slice::<Value>(&bytes).ok())
            .and_then(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .unwrap_or_default()
    }
}

impl Default for FileHighScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> u32 {
        self.read_map()
            .get(HIGH_SCORE_KEY)
            .and_then(parse_score)
            .unwrap_or(0)
    }

    fn save(&self, high_score: u32) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut map = self.read_map();
        map.insert(HIGH_SCORE_KEY.to_string(), Value::from(high_score));
        let data = serde_json::to_vec_pretty(&Value::Object(map)).map_err(io::Error::other)?;
        fs::write(&self.path, data)
    }
}

/// Keeps the score in memory only. Writes can be made to fail on purpose.
#[derive(Debug, Default)]
pub struct MemoryHighScoreStore {
    value: Cell<Option<u32>>,
    fail_writes: bool,
}

impl MemoryHighScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(high_score: u32) -> Self {
        Self {
            value: Cell::new(Some(high_score)),
            fail_writes: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            value: Cell::new(None),
            fail_writes: true,
        }
    }

    /// What has actually been written, as opposed to what a session believes.
    pub fn stored(&self) -> Option<u32> {
        self.value.get()
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> u32 {
        self.value.get().unwrap_or(0)
    }

    fn save(&self, high_score: u32) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "high score store is read-only",
            ));
        }
        self.value.set(Some(high_score));
        Ok(())
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for &S {
    fn load(&self) -> u32 {
        (**self).load()
    }

    fn save(&self, high_score: u32) -> io::Result<()> {
        (**self).save(high_score)
    }
}
