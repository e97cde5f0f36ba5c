//! Turns terminal activity into game inputs and paces the frame clock.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the player asked for, independent of the key that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameInput {
    /// A character for the guess line.
    Char(char),
    Backspace,
    /// Enter: submit the guess, or move on once the round is won.
    Submit,
    /// Drop the streak and start over.
    Reset,
    Quit,
}

impl GameInput {
    /// Map a key press to a game input. Key releases and unbound keys map to nothing.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Some(Self::Quit),
            KeyCode::Char('c') if ctrl => Some(Self::Quit),
            KeyCode::Char('r') if ctrl => Some(Self::Reset),
            KeyCode::Char(_) if ctrl => None,
            KeyCode::Char(c) => Some(Self::Char(c)),
            KeyCode::Enter => Some(Self::Submit),
            KeyCode::Backspace => Some(Self::Backspace),
            _ => None,
        }
    }

    /// The inputs for typing `text` and pressing enter.
    pub fn guess(text: &str) -> Vec<Self> {
        text.chars()
            .map(Self::Char)
            .chain(std::iter::once(Self::Submit))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AppEvent {
    Input(GameInput),
    Resize,
    /// Nothing arrived within one frame; carries the frame length.
    Tick(Duration),
}

/// Somewhere game events come from.
pub trait EventSource: Send + 'static {
    /// Wait up to `timeout` for the next event.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Reads the terminal on a background thread and forwards only keys the game uses.
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => match GameInput::from_key(key) {
                    Some(input) => AppEvent::Input(input),
                    None => continue,
                },
                Ok(CtEvent::Resize(_, _)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Replays a fixed list of inputs, then goes quiet. Used to play games headlessly.
pub struct ScriptedSource {
    rx: Receiver<AppEvent>,
}

impl ScriptedSource {
    pub fn new<I: IntoIterator<Item = GameInput>>(inputs: I) -> Self {
        let (tx, rx) = mpsc::channel();
        for input in inputs {
            // the receiver is alive, send cannot fail
            let _ = tx.send(AppEvent::Input(input));
        }
        Self { rx }
    }

    /// Feed events from a channel the caller keeps writing to.
    pub fn from_channel(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for ScriptedSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        match self.rx.try_recv() {
            Ok(ev) => Ok(ev),
            Err(mpsc::TryRecvError::Empty) => self.rx.recv_timeout(timeout),
            Err(mpsc::TryRecvError::Disconnected) => Err(RecvTimeoutError::Disconnected),
        }
    }
}

/// Frame length the game animates at.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    frame: Duration,
}

impl FrameClock {
    pub fn new(frame: Duration) -> Self {
        Self { frame }
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }
}

/// Something the runner can play: takes inputs, advances with time, and says when it is done.
pub trait Game {
    fn on_input(&mut self, input: GameInput);
    fn on_tick(&mut self, dt: Duration);
    fn is_finished(&self) -> bool;
}

/// Advances a game one event or frame at a time.
pub struct Runner<E: EventSource> {
    events: E,
    clock: FrameClock,
}

impl<E: EventSource> Runner<E> {
    pub fn new(events: E, clock: FrameClock) -> Self {
        Self { events, clock }
    }

    /// Blocks for at most one frame and returns the next event, or a Tick on timeout.
    pub fn step(&self) -> AppEvent {
        match self.events.recv_timeout(self.clock.frame()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                AppEvent::Tick(self.clock.frame())
            }
        }
    }

    /// Step once and hand the event to `game`. Returns the event for the caller to redraw on.
    pub fn step_game<G: Game>(&self, game: &mut G) -> AppEvent {
        let event = self.step();
        match &event {
            AppEvent::Input(input) => game.on_input(*input),
            AppEvent::Tick(dt) => game.on_tick(*dt),
            AppEvent::Resize => {}
        }
        event
    }

    /// Play until the game finishes or `until` holds, for at most `max_steps` events.
    /// Returns whether the loop stopped because of the condition or the game finishing.
    pub fn run_until<G, F>(&self, game: &mut G, max_steps: usize, until: F) -> bool
    where
        G: Game,
        F: Fn(&G) -> bool,
    {
        for _ in 0..max_steps {
            self.step_game(game);
            if until(game) || game.is_finished() {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn keys_map_to_game_inputs() {
        assert_eq!(
            GameInput::from_key(press(KeyCode::Char('b'), KeyModifiers::NONE)),
            Some(GameInput::Char('b'))
        );
        assert_eq!(
            GameInput::from_key(press(KeyCode::Char('B'), KeyModifiers::SHIFT)),
            Some(GameInput::Char('B'))
        );
        assert_eq!(
            GameInput::from_key(press(KeyCode::Enter, KeyModifiers::NONE)),
            Some(GameInput::Submit)
        );
        assert_eq!(
            GameInput::from_key(press(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(GameInput::Backspace)
        );
        assert_eq!(
            GameInput::from_key(press(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Some(GameInput::Reset)
        );
        assert_eq!(
            GameInput::from_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );
        assert_eq!(
            GameInput::from_key(press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(GameInput::Quit)
        );
    }

    #[test]
    fn unbound_keys_and_releases_are_dropped() {
        assert_eq!(
            GameInput::from_key(press(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(GameInput::from_key(press(KeyCode::Left, KeyModifiers::NONE)), None);

        let mut release = press(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(GameInput::from_key(release), None);
    }

    #[test]
    fn guess_types_then_submits() {
        assert_eq!(
            GameInput::guess("be"),
            vec![GameInput::Char('b'), GameInput::Char('e'), GameInput::Submit]
        );
    }

    #[test]
    fn step_returns_tick_with_frame_length_when_quiet() {
        let runner = Runner::new(
            ScriptedSource::new([]),
            FrameClock::new(Duration::from_millis(1)),
        );

        assert_eq!(runner.step(), AppEvent::Tick(Duration::from_millis(1)));
    }

    #[test]
    fn step_replays_scripted_inputs_in_order() {
        let runner = Runner::new(
            ScriptedSource::new([GameInput::Char('a'), GameInput::Submit]),
            FrameClock::new(Duration::from_millis(10)),
        );

        assert_eq!(runner.step(), AppEvent::Input(GameInput::Char('a')));
        assert_eq!(runner.step(), AppEvent::Input(GameInput::Submit));
        assert_eq!(runner.step(), AppEvent::Tick(Duration::from_millis(10)));
    }

    #[test]
    fn step_passes_through_channel_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Resize).unwrap();
        let runner = Runner::new(
            ScriptedSource::from_channel(rx),
            FrameClock::new(Duration::from_millis(10)),
        );

        assert_eq!(runner.step(), AppEvent::Resize);
    }

    #[derive(Default)]
    struct Counter {
        typed: String,
        elapsed: Duration,
        quit: bool,
    }

    impl Game for Counter {
        fn on_input(&mut self, input: GameInput) {
            match input {
                GameInput::Char(c) => self.typed.push(c),
                GameInput::Quit => self.quit = true,
                _ => {}
            }
        }

        fn on_tick(&mut self, dt: Duration) {
            self.elapsed += dt;
        }

        fn is_finished(&self) -> bool {
            self.quit
        }
    }

    #[test]
    fn run_until_dispatches_inputs_and_ticks() {
        let runner = Runner::new(
            ScriptedSource::new([GameInput::Char('h'), GameInput::Char('i')]),
            FrameClock::new(Duration::from_millis(1)),
        );
        let mut game = Counter::default();

        let stopped = runner.run_until(&mut game, 100, |g| g.elapsed >= Duration::from_millis(3));

        assert!(stopped);
        assert_eq!(game.typed, "hi");
        assert_eq!(game.elapsed, Duration::from_millis(3));
    }

    #[test]
    fn run_until_stops_when_game_finishes() {
        let runner = Runner::new(
            ScriptedSource::new([GameInput::Quit, GameInput::Char('z')]),
            FrameClock::new(Duration::from_millis(1)),
        );
        let mut game = Counter::default();

        assert!(runner.run_until(&mut game, 100, |_| false));
        assert!(game.typed.is_empty());
    }
}
