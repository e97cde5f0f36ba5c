use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

/// Stagger between neighbouring bees taking off.
pub const STAGGER: Duration = Duration::from_millis(70);
/// Time a bee spends in the air.
pub const FLIGHT_TIME: Duration = Duration::from_millis(800);

pub const MESSAGES: [&str; 6] = [
    "Great spelling! 🌟",
    "You did it! 🎉",
    "Wonderful! ⭐",
    "Amazing work! 🏆",
    "Bee-utiful! 🐝",
    "Super speller! 💪",
];

/// How long the win banner waits so every bee has left the word.
pub fn win_delay(letter_count: usize) -> Duration {
    STAGGER * letter_count as u32 + FLIGHT_TIME
}

pub fn pick_message<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    MESSAGES.choose(rng).copied().unwrap_or(MESSAGES[0])
}

/// A bee leaving the letter slot it was covering.
#[derive(Debug, Clone, PartialEq)]
pub struct BeeFlight {
    pub slot: usize,
    pub delay: Duration,
    /// Horizontal drift over the whole flight, in cells.
    pub dx: f64,
    /// Vertical drift over the whole flight, in cells. Always upward (negative).
    pub dy: f64,
    /// Spin in degrees; only used to pick a wobble glyph.
    pub rotation: f64,
    pub age: Duration,
}

impl BeeFlight {
    /// Jitter is the same shape as the web game: x within ±100px, up by
    /// 100..300px, spin within ±60deg; pixels become cells at 1/20.
    pub fn launch<R: Rng + ?Sized>(slot: usize, order: usize, rng: &mut R) -> Self {
        let fly_x = (rng.gen::<f64>() - 0.5) * 200.0;
        let fly_y = -(100.0 + rng.gen::<f64>() * 200.0);
        let rotation = (rng.gen::<f64>() - 0.5) * 120.0;

        Self {
            slot,
            delay: STAGGER * order as u32,
            dx: fly_x / 20.0,
            dy: fly_y / 20.0,
            rotation,
            age: Duration::ZERO,
        }
    }

    /// Fraction of the flight done, 0.0 while still waiting on the slot.
    pub fn progress(&self) -> f64 {
        if self.age <= self.delay {
            return 0.0;
        }
        let flown = (self.age - self.delay).as_secs_f64();
        (flown / FLIGHT_TIME.as_secs_f64()).min(1.0)
    }

    /// Offset from the slot, in cells.
    pub fn offset(&self) -> (f64, f64) {
        let t = self.progress();
        // ease-out so the bee leaves quickly and drifts off
        let eased = 1.0 - (1.0 - t).powi(2);
        (self.dx * eased, self.dy * eased)
    }

    pub fn has_left(&self) -> bool {
        self.progress() > 0.0
    }

    pub fn is_done(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// All bees currently in the air for the visible word.
#[derive(Debug, Default)]
pub struct Swarm {
    pub flights: Vec<BeeFlight>,
}

impl Swarm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Launch one bee per slot in `slots`, staggered by their slot index.
    pub fn release<R: Rng + ?Sized>(&mut self, slots: &[usize], rng: &mut R) {
        for &slot in slots {
            self.flights.push(BeeFlight::launch(slot, slot, rng));
        }
    }

    pub fn update(&mut self, dt: Duration) {
        for flight in &mut self.flights {
            flight.age += dt;
        }
        self.flights.retain(|f| !f.is_done());
    }

    /// The bee for `slot` is still covering its letter.
    pub fn is_waiting(&self, slot: usize) -> bool {
        self.flights.iter().any(|f| f.slot == slot && !f.has_left())
    }

    pub fn is_active(&self) -> bool {
        !self.flights.is_empty()
    }

    pub fn clear(&mut self) {
        self.flights.clear();
    }
}
