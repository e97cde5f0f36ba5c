//! Spelling game core: word catalogs, guess matching, rounds and the session
//! that strings them into a streak. Terminal drawing lives in the binary.
pub mod app;
pub mod app_dirs;
pub mod catalog;
pub mod celebration;
pub mod config;
pub mod high_score;
pub mod matcher;
pub mod round;
pub mod runtime;
pub mod session;

pub use catalog::{CatalogError, WordCatalog, WordEntry};
pub use high_score::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
pub use round::RoundState;
pub use session::{
    FeedbackKind, GameEvent, GuessResult, InvalidAction, Presenter, SessionController,
    SessionPhase,
};
