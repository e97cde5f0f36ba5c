use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{self, WordCatalog, WordEntry};
use crate::high_score::HighScoreStore;
use crate::matcher::MatchOutcome;
use crate::round::RoundState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SessionPhase {
    /// No round loaded.
    Idle,
    /// Accepting guesses.
    RoundActive,
    /// Word fully revealed, waiting for `advance`.
    RoundComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum FeedbackKind {
    /// The guess uncovered at least one letter.
    Partial,
    /// The guess uncovered nothing.
    None,
}

/// A control input that the current phase does not accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidAction {
    #[error("cannot start a round while {0}")]
    AlreadyStarted(SessionPhase),
    #[error("guesses are not accepted while {0}")]
    NoActiveRound(SessionPhase),
    #[error("cannot advance while {0}")]
    RoundNotComplete(SessionPhase),
}

/// Receives notifications from the session, synchronously, as things happen.
///
/// Everything visual (letter slots, animations, messages) lives behind this
/// trait; the session never reaches back into it for state.
pub trait Presenter {
    fn on_round_loaded(&mut self, _cue: &str, _letter_count: usize) {}
    fn on_letters_revealed(&mut self, _indices: &[usize]) {}
    fn on_feedback(&mut self, _kind: FeedbackKind, _remaining_hidden: usize) {}
    fn on_round_won(&mut self, _score: u32, _high_score: u32) {}
    fn on_invalid_action(&mut self, _reason: InvalidAction) {}
}

impl Presenter for () {}

/// Presenter notifications as values, for recording or replaying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    RoundLoaded { cue: String, letter_count: usize },
    LettersRevealed(Vec<usize>),
    Feedback { kind: FeedbackKind, remaining_hidden: usize },
    RoundWon { score: u32, high_score: u32 },
    InvalidAction(InvalidAction),
}

impl Presenter for Vec<GameEvent> {
    fn on_round_loaded(&mut self, cue: &str, letter_count: usize) {
        self.push(GameEvent::RoundLoaded {
            cue: cue.to_string(),
            letter_count,
        });
    }

    fn on_letters_revealed(&mut self, indices: &[usize]) {
        self.push(GameEvent::LettersRevealed(indices.to_vec()));
    }

    fn on_feedback(&mut self, kind: FeedbackKind, remaining_hidden: usize) {
        self.push(GameEvent::Feedback {
            kind,
            remaining_hidden,
        });
    }

    fn on_round_won(&mut self, score: u32, high_score: u32) {
        self.push(GameEvent::RoundWon { score, high_score });
    }

    fn on_invalid_action(&mut self, reason: InvalidAction) {
        self.push(GameEvent::InvalidAction(reason));
    }
}

/// What `submit_guess` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessResult {
    /// Blank input; nothing happened and no attempt was counted.
    Ignored,
    Rejected(InvalidAction),
    /// The round goes on.
    Revealed {
        outcome: MatchOutcome,
        feedback: FeedbackKind,
        remaining_hidden: usize,
    },
    /// This guess finished the word.
    Won {
        outcome: MatchOutcome,
        score: u32,
        high_score: u32,
    },
}

/// Drives rounds from one word to the next and keeps the streak.
///
/// Owns the shuffled traversal of the catalog, the live round and the
/// scores. The presenter is told about every change; the store is read once
/// here and written whenever the high score moves.
pub struct SessionController<P: Presenter, S: HighScoreStore, R: Rng = StdRng> {
    catalog: WordCatalog,
    order: Vec<WordEntry>,
    cursor: usize,
    score: u32,
    high_score: u32,
    phase: SessionPhase,
    round: Option<RoundState>,
    presenter: P,
    store: S,
    rng: R,
}

impl<P: Presenter, S: HighScoreStore> SessionController<P, S, StdRng> {
    pub fn new(catalog: WordCatalog, store: S, presenter: P) -> Self {
        Self::with_rng(catalog, store, presenter, StdRng::from_entropy())
    }
}

impl<P: Presenter, S: HighScoreStore, R: Rng> SessionController<P, S, R> {
    pub fn with_rng(catalog: WordCatalog, store: S, presenter: P, mut rng: R) -> Self {
        let high_score = store.load();
        let order = catalog::shuffle(catalog.entries(), &mut rng);
        debug!(catalog = catalog.name(), words = catalog.len(), high_score, "session created");

        Self {
            catalog,
            order,
            cursor: 0,
            score: 0,
            high_score,
            phase: SessionPhase::Idle,
            round: None,
            presenter,
            store,
            rng,
        }
    }

    /// Idle -> RoundActive with the next word of the traversal.
    pub fn start(&mut self) -> Result<(), InvalidAction> {
        if self.phase != SessionPhase::Idle {
            return Err(self.reject(InvalidAction::AlreadyStarted(self.phase)));
        }
        self.load_next_round();
        Ok(())
    }

    pub fn submit_guess(&mut self, text: &str) -> GuessResult {
        if self.phase != SessionPhase::RoundActive {
            return GuessResult::Rejected(self.reject(InvalidAction::NoActiveRound(self.phase)));
        }

        let guess = text.trim();
        if guess.is_empty() {
            return GuessResult::Ignored;
        }

        let Some(round) = self.round.as_mut() else {
            return GuessResult::Rejected(self.reject(InvalidAction::NoActiveRound(self.phase)));
        };

        let outcome = round.apply_guess(guess);
        let complete = round.is_complete();
        let remaining_hidden = round.remaining_hidden();
        debug!(
            attempt = round.attempts(),
            match_count = outcome.match_count,
            newly_revealed = outcome.newly_revealed_count(),
            "guess applied"
        );

        self.presenter.on_letters_revealed(&outcome.newly_revealed);

        if complete {
            self.finish_round();
            return GuessResult::Won {
                outcome,
                score: self.score,
                high_score: self.high_score,
            };
        }

        let feedback = if outcome.newly_revealed.is_empty() {
            FeedbackKind::None
        } else {
            FeedbackKind::Partial
        };
        self.presenter.on_feedback(feedback, remaining_hidden);

        GuessResult::Revealed {
            outcome,
            feedback,
            remaining_hidden,
        }
    }

    /// RoundComplete -> RoundActive with the next word.
    pub fn advance(&mut self) -> Result<(), InvalidAction> {
        if self.phase != SessionPhase::RoundComplete {
            return Err(self.reject(InvalidAction::RoundNotComplete(self.phase)));
        }
        self.load_next_round();
        Ok(())
    }

    /// Back to Idle with a zero streak and a fresh order. The high score stays.
    pub fn reset_session(&mut self) {
        info!(score = self.score, high_score = self.high_score, "session reset");
        self.score = 0;
        self.round = None;
        self.phase = SessionPhase::Idle;
        self.reshuffle();
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn catalog(&self) -> &WordCatalog {
        &self.catalog
    }

    /// Current traversal of the catalog.
    pub fn order(&self) -> &[WordEntry] {
        &self.order
    }

    /// Index into `order` of the next word to be drawn.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    fn reject(&mut self, reason: InvalidAction) -> InvalidAction {
        warn!(%reason, "invalid action");
        self.presenter.on_invalid_action(reason);
        reason
    }

    fn reshuffle(&mut self) {
        self.order = catalog::shuffle(self.catalog.entries(), &mut self.rng);
        self.cursor = 0;
        info!(words = self.order.len(), "word order reshuffled");
    }

    fn draw_next(&mut self) -> WordEntry {
        // The catalog is never empty, so this renews at most once.
        loop {
            if let Some((entry, next)) = catalog::draw(&self.order, self.cursor) {
                let entry = entry.clone();
                self.cursor = next;
                return entry;
            }
            self.reshuffle();
        }
    }

    fn load_next_round(&mut self) {
        let entry = self.draw_next();
        let round = RoundState::new(entry);
        debug!(
            cursor = self.cursor,
            letters = round.letters().len(),
            "round loaded"
        );

        self.presenter
            .on_round_loaded(&round.target().cue, round.letters().len());
        self.round = Some(round);
        self.phase = SessionPhase::RoundActive;
    }

    fn finish_round(&mut self) {
        self.phase = SessionPhase::RoundComplete;
        self.score += 1;

        if self.score > self.high_score {
            self.high_score = self.score;
            info!(high_score = self.high_score, "new high score");
            if let Err(err) = self.store.save(self.high_score) {
                warn!(error = %err, "failed to persist high score");
            }
        }

        info!(score = self.score, high_score = self.high_score, "round won");
        self.presenter.on_round_won(self.score, self.high_score);
    }
}
