use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/words");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("word catalog is empty")]
    Empty,

    #[error("word catalog entry {index} has an empty word")]
    EmptyWord { index: usize },

    #[error("word catalog entry {index} has whitespace around its word")]
    PaddedWord { index: usize },

    #[error("no built-in catalog named '{name}' and no such file")]
    NotFound { name: String },

    #[error("unable to parse word catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unable to read word catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// A pictogram cue and the word the player has to spell for it.
///
/// Serialized as a two element array, `["🐝", "bee"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct WordEntry {
    pub cue: String,
    pub word: String,
}

impl WordEntry {
    pub fn new(cue: impl Into<String>, word: impl Into<String>) -> Self {
        Self {
            cue: cue.into(),
            word: word.into(),
        }
    }

    pub fn letters(&self) -> Vec<char> {
        self.word.chars().collect()
    }

    /// Length in characters, which is also the number of letter slots.
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

impl From<(String, String)> for WordEntry {
    fn from((cue, word): (String, String)) -> Self {
        Self { cue, word }
    }
}

impl From<WordEntry> for (String, String) {
    fn from(entry: WordEntry) -> Self {
        (entry.cue, entry.word)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    name: String,
    entries: Vec<WordEntry>,
}

/// The fixed pool of (cue, word) pairs a session draws from.
///
/// Construction is the only place a catalog is validated, so a value of this
/// type is never empty and every word can be typed back exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct WordCatalog {
    name: String,
    entries: Vec<WordEntry>,
}

impl WordCatalog {
    pub fn new(name: impl Into<String>, entries: Vec<WordEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        if let Some(index) = entries.iter().position(|e| e.word.trim().is_empty()) {
            return Err(CatalogError::EmptyWord { index });
        }
        // Guesses are trimmed, so a padded word could never be completed.
        if let Some(index) = entries.iter().position(|e| e.word.trim() != e.word) {
            return Err(CatalogError::PaddedWord { index });
        }

        Ok(Self {
            name: name.into(),
            entries,
        })
    }

    /// Load one of the catalogs compiled into the binary.
    pub fn builtin(name: &str) -> Result<Self, CatalogError> {
        let file = WORDS_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| CatalogError::NotFound {
                name: name.to_string(),
            })?;

        Self::from_json(file.contents())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let bytes = fs::read(path)?;
        Self::from_json(&bytes)
    }

    /// Resolve `source` as a built-in name first, then as a file path.
    pub fn load(source: &str) -> Result<Self, CatalogError> {
        match Self::builtin(source) {
            Err(CatalogError::NotFound { .. }) if Path::new(source).is_file() => {
                Self::from_path(source)
            }
            other => other,
        }
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_slice(bytes)?;
        Self::new(file.name, file.entries)
    }

    pub fn builtin_names() -> Vec<String> {
        let mut names: Vec<String> = WORDS_DIR
            .files()
            .filter_map(|f| f.path().file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Returns a uniformly random permutation of `catalog`, leaving the input untouched.
pub fn shuffle<R: Rng + ?Sized>(catalog: &[WordEntry], rng: &mut R) -> Vec<WordEntry> {
    let mut order = catalog.to_vec();
    // Fisher-Yates
    order.shuffle(rng);
    order
}

/// Take the entry at `cursor` and the cursor for the following draw.
///
/// Returns `None` once the order is exhausted; renewing it is up to the caller.
pub fn draw(order: &[WordEntry], cursor: usize) -> Option<(&WordEntry, usize)> {
    order.get(cursor).map(|entry| (entry, cursor + 1))
}
