use crate::catalog::WordEntry;
use crate::matcher::{match_guess, MatchOutcome};

/// One word being spelled: which slots are uncovered and how many guesses it took.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    target: WordEntry,
    letters: Vec<char>,
    revealed: Vec<bool>,
    attempts: u32,
}

impl RoundState {
    pub fn new(target: WordEntry) -> Self {
        let letters = target.letters();
        let revealed = vec![false; letters.len()];
        Self {
            target,
            letters,
            revealed,
            attempts: 0,
        }
    }

    /// Start over on `target` with every slot hidden.
    pub fn initialize(&mut self, target: WordEntry) {
        *self = Self::new(target);
    }

    /// Count an attempt and uncover whatever the guess earns.
    ///
    /// Callers filter out blank input and stop feeding guesses once the round
    /// is complete.
    pub fn apply_guess(&mut self, guess: &str) -> MatchOutcome {
        self.attempts += 1;
        let guess: Vec<char> = guess.chars().collect();
        match_guess(&self.letters, &mut self.revealed, &guess)
    }

    pub fn is_complete(&self) -> bool {
        self.revealed.iter().all(|r| *r)
    }

    pub fn remaining_hidden(&self) -> usize {
        self.revealed.iter().filter(|r| !**r).count()
    }

    pub fn target(&self) -> &WordEntry {
        &self.target
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn revealed(&self) -> &[bool] {
        &self.revealed
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}
