//! The reveal rule: a guess uncovers letters only as far as it agrees with
//! the target from the very first character.

/// What a single guess did to the letter slots of a round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Length of the case-insensitive common prefix of guess and target.
    pub match_count: usize,
    /// Slots that flipped from hidden to revealed, in ascending order.
    pub newly_revealed: Vec<usize>,
}

impl MatchOutcome {
    pub fn newly_revealed_count(&self) -> usize {
        self.newly_revealed.len()
    }
}

fn same_letter(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Length of the case-insensitive common prefix of `guess` and `target`.
pub fn prefix_match_len(target: &[char], guess: &[char]) -> usize {
    target
        .iter()
        .zip(guess)
        .take_while(|(t, g)| same_letter(**t, **g))
        .count()
}

/// Apply `guess` to `revealed`, flipping every hidden slot inside the matched
/// prefix. Revealed slots are never cleared, even when the guess falls short
/// of them.
///
/// `revealed` must have one flag per character of `target`.
pub fn match_guess(target: &[char], revealed: &mut [bool], guess: &[char]) -> MatchOutcome {
    debug_assert_eq!(target.len(), revealed.len());

    let match_count = prefix_match_len(target, guess);
    let mut newly_revealed = Vec::new();

    for (idx, slot) in revealed.iter_mut().enumerate().take(match_count) {
        if !*slot {
            *slot = true;
            newly_revealed.push(idx);
        }
    }

    MatchOutcome {
        match_count,
        newly_revealed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn apply(target: &str, revealed: &mut [bool], guess: &str) -> MatchOutcome {
        match_guess(&chars(target), revealed, &chars(guess))
    }

    #[test]
    fn test_partial_prefix_reveals_leading_letters() {
        let mut revealed = vec![false; 3];
        let outcome = apply("bee", &mut revealed, "be");

        assert_eq!(outcome.match_count, 2);
        assert_eq!(outcome.newly_revealed, vec![0, 1]);
        assert_eq!(revealed, vec![true, true, false]);
    }

    #[test]
    fn test_follow_up_guess_only_counts_new_slots() {
        let mut revealed = vec![true, true, false];
        let outcome = apply("bee", &mut revealed, "bee");

        assert_eq!(outcome.match_count, 3);
        assert_eq!(outcome.newly_revealed, vec![2]);
        assert!(revealed.iter().all(|r| *r));
    }

    #[test]
    fn test_first_letter_mismatch_reveals_nothing() {
        let mut revealed = vec![false; 3];
        let outcome = apply("sun", &mut revealed, "fun");

        assert_eq!(outcome.match_count, 0);
        assert!(outcome.newly_revealed.is_empty());
        assert_eq!(revealed, vec![false; 3]);
    }

    #[test]
    fn test_match_stops_at_first_mismatch() {
        let mut revealed = vec![false; 5];
        let outcome = apply("apple", &mut revealed, "apxle");

        assert_eq!(outcome.match_count, 2);
        assert_eq!(revealed, vec![true, true, false, false, false]);
    }

    #[test]
    fn test_comparison_ignores_case() {
        let mut revealed = vec![false; 3];
        let outcome = apply("Cat", &mut revealed, "cAT");

        assert_eq!(outcome.match_count, 3);
        assert_eq!(outcome.newly_revealed_count(), 3);
    }

    #[test]
    fn test_non_ascii_letters_compare_case_insensitively() {
        let mut revealed = vec![false; 4];
        let outcome = apply("café", &mut revealed, "CAFÉ");

        assert_eq!(outcome.match_count, 4);
    }

    #[test]
    fn test_guess_longer_than_target_is_clamped() {
        let mut revealed = vec![false; 3];
        let outcome = apply("dog", &mut revealed, "doghouse");

        assert_eq!(outcome.match_count, 3);
        assert_eq!(outcome.newly_revealed, vec![0, 1, 2]);
    }

    #[test]
    fn test_short_guess_never_hides_revealed_letters() {
        let mut revealed = vec![true, true, true, false];
        let outcome = apply("moon", &mut revealed, "m");

        assert_eq!(outcome.match_count, 1);
        assert!(outcome.newly_revealed.is_empty());
        assert_eq!(revealed, vec![true, true, true, false]);
    }

    #[test]
    fn test_repeating_a_guess_reveals_nothing_new() {
        let mut revealed = vec![false; 6];
        let first = apply("banana", &mut revealed, "ban");
        let second = apply("banana", &mut revealed, "ban");

        assert_eq!(first.newly_revealed_count(), 3);
        assert_eq!(second.newly_revealed_count(), 0);
        assert_eq!(second.match_count, 3);
    }

    #[test]
    fn test_match_count_bounded_and_reveals_monotonic() {
        let targets = ["bee", "strawberry", "a", "Elephant"];
        let guesses = ["", "b", "bee", "STRAW", "strawberries", "x", "a", "eleph"];

        for target in targets {
            let mut revealed = vec![false; target.chars().count()];
            for guess in guesses {
                let before = revealed.clone();
                let outcome = apply(target, &mut revealed, guess);

                assert!(outcome.match_count <= target.chars().count().min(guess.chars().count()));
                for (was, now) in before.iter().zip(&revealed) {
                    assert!(!was || *now, "{target}/{guess} cleared a revealed slot");
                }
            }
        }
    }
}
