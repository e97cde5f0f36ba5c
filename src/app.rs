use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::warn;

use crate::catalog::WordCatalog;
use crate::celebration::{pick_message, win_delay, Swarm};
use crate::high_score::HighScoreStore;
use crate::runtime::{Game, GameInput};
use crate::session::{
    FeedbackKind, GuessResult, InvalidAction, Presenter, SessionController, SessionPhase,
};

/// What the player sees, kept up to date by session notifications.
#[derive(Debug, Default)]
pub struct Board {
    pub cue: String,
    pub letter_count: usize,
    pub feedback: Option<(FeedbackKind, usize)>,
    pub won: Option<(u32, u32)>,
    pub notice: Option<String>,
    /// Slots revealed since the app last launched bees.
    pending_reveals: Vec<usize>,
}

impl Board {
    pub fn feedback_text(&self) -> Option<String> {
        self.feedback.map(|(kind, remaining)| match kind {
            FeedbackKind::Partial => format!(
                "Nice! {remaining} letter{} left. Try again!",
                if remaining == 1 { "" } else { "s" }
            ),
            FeedbackKind::None => "Not quite, try again!".to_string(),
        })
    }

    fn take_reveals(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.pending_reveals)
    }
}

impl Presenter for Board {
    fn on_round_loaded(&mut self, cue: &str, letter_count: usize) {
        self.cue = cue.to_string();
        self.letter_count = letter_count;
        self.feedback = None;
        self.won = None;
        self.notice = None;
        self.pending_reveals.clear();
    }

    fn on_letters_revealed(&mut self, indices: &[usize]) {
        self.pending_reveals.extend_from_slice(indices);
        self.notice = None;
    }

    fn on_feedback(&mut self, kind: FeedbackKind, remaining_hidden: usize) {
        self.feedback = Some((kind, remaining_hidden));
    }

    fn on_round_won(&mut self, score: u32, high_score: u32) {
        self.feedback = None;
        self.won = Some((score, high_score));
    }

    fn on_invalid_action(&mut self, reason: InvalidAction) {
        self.notice = Some(reason.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub celebrate: bool,
    pub show_attempts: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            celebrate: true,
            show_attempts: true,
        }
    }
}

/// Congratulations shown after a win, once the bees are gone.
#[derive(Debug, Clone, PartialEq)]
pub enum Banner {
    Hidden,
    Pending { remaining: Duration },
    Shown { message: &'static str },
}

/// The terminal front-end's state: a session plus everything visual around it.
pub struct App<S: HighScoreStore> {
    pub session: SessionController<Board, S>,
    pub input: String,
    pub swarm: Swarm,
    pub banner: Banner,
    pub settings: Settings,
    pub should_quit: bool,
    rng: StdRng,
}

impl<S: HighScoreStore> App<S> {
    pub fn new(catalog: WordCatalog, store: S, settings: Settings) -> Self {
        Self::with_rng(catalog, store, settings, StdRng::from_entropy())
    }

    /// One seeded source feeds both the word order and the visual jitter.
    pub fn with_rng(catalog: WordCatalog, store: S, settings: Settings, mut rng: StdRng) -> Self {
        let session_rng = StdRng::from_rng(&mut rng).unwrap_or_else(|_| StdRng::seed_from_u64(0));
        let session = SessionController::with_rng(catalog, store, Board::default(), session_rng);

        let mut app = Self {
            session,
            input: String::new(),
            swarm: Swarm::new(),
            banner: Banner::Hidden,
            settings,
            should_quit: false,
            rng,
        };
        app.begin_round();
        app
    }

    pub fn board(&self) -> &Board {
        self.session.presenter()
    }

    pub fn accepts_input(&self) -> bool {
        self.session.phase() == SessionPhase::RoundActive
    }

    pub fn on_input(&mut self, input: GameInput) {
        match input {
            GameInput::Quit => self.should_quit = true,
            GameInput::Reset => self.reset(),
            GameInput::Submit => self.on_enter(),
            GameInput::Backspace => {
                if self.accepts_input() {
                    self.input.pop();
                }
            }
            GameInput::Char(c) => {
                if self.accepts_input() {
                    self.input.push(c);
                }
            }
        }
    }

    pub fn on_tick(&mut self, dt: Duration) {
        self.swarm.update(dt);

        if let Banner::Pending { remaining } = self.banner {
            if remaining <= dt {
                self.show_banner();
            } else {
                self.banner = Banner::Pending {
                    remaining: remaining - dt,
                };
            }
        }
    }

    pub fn submit(&mut self) -> GuessResult {
        let guess = std::mem::take(&mut self.input);
        let result = self.session.submit_guess(&guess);

        let reveals = self.session.presenter_mut().take_reveals();
        if self.settings.celebrate {
            self.swarm.release(&reveals, &mut self.rng);
        }

        if let GuessResult::Won { .. } = result {
            let letters = self.session.round().map_or(0, |r| r.letters().len());
            if self.settings.celebrate {
                self.banner = Banner::Pending {
                    remaining: win_delay(letters),
                };
            } else {
                self.show_banner();
            }
        }

        result
    }

    pub fn advance(&mut self) {
        if self.session.advance().is_ok() {
            self.swarm.clear();
            self.banner = Banner::Hidden;
            self.input.clear();
        }
    }

    /// Drop the streak and begin again on a new word.
    pub fn reset(&mut self) {
        self.session.reset_session();
        self.swarm.clear();
        self.banner = Banner::Hidden;
        self.input.clear();
        self.begin_round();
    }

    /// Put a word on the board if the session has none.
    fn begin_round(&mut self) {
        if self.session.phase() != SessionPhase::Idle {
            return;
        }
        if let Err(reason) = self.session.start() {
            warn!(%reason, "could not begin a round");
        }
    }

    fn on_enter(&mut self) {
        match (self.session.phase(), &self.banner) {
            (SessionPhase::RoundActive, _) => {
                self.submit();
            }
            (SessionPhase::RoundComplete, Banner::Shown { .. }) => self.advance(),
            _ => {}
        }
    }

    fn show_banner(&mut self) {
        self.banner = Banner::Shown {
            message: pick_message(&mut self.rng),
        };
    }
}

impl<S: HighScoreStore> Game for App<S> {
    fn on_input(&mut self, input: GameInput) {
        App::on_input(self, input);
    }

    fn on_tick(&mut self, dt: Duration) {
        App::on_tick(self, dt);
    }

    fn is_finished(&self) -> bool {
        self.should_quit
    }
}
