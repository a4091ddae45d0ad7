//! Answer verification against a round's canonical sequence.

use crate::components::sequence::Sequence;
use crate::numeral::NumeralSystem;

/// The outcome of checking one submission.
///
/// Both strings are preserved so the result phase can show the player what
/// was expected next to what they typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub correct: bool,
    /// The canonical rendering of the round's sequence.
    pub expected: String,
    /// The player's submission, untrimmed, as typed.
    pub submitted: String,
}

/// Checks a submission against the canonical rendering of `sequence`.
///
/// Leading/trailing whitespace is trimmed and both sides are upper-cased
/// before comparison; internal whitespace is preserved. Any mismatch,
/// including a length mismatch, fails — there is no partial credit.
pub fn verify(user_input: &str, sequence: &Sequence, system: NumeralSystem) -> bool {
    let canonical = sequence.canonical_answer(system).to_uppercase();
    user_input.trim().to_uppercase() == canonical
}

/// Runs [`verify`] and captures both strings for display.
pub fn judge(user_input: &str, sequence: &Sequence, system: NumeralSystem) -> Verdict {
    Verdict {
        correct: verify(user_input, sequence, system),
        expected: sequence.canonical_answer(system),
        submitted: user_input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pi_digits() -> Sequence {
        Sequence::from_symbols(vec![3, 1, 4, 1, 5, 9])
    }

    #[test]
    fn canonical_answer_round_trips() {
        let sequence = pi_digits();
        let canonical = sequence.canonical_answer(NumeralSystem::Decimal);
        assert!(verify(&canonical, &sequence, NumeralSystem::Decimal));
    }

    #[test]
    fn comparison_is_case_insensitive() {
        let sequence = Sequence::from_symbols(vec![10, 2, 15]);
        assert!(verify("A2F", &sequence, NumeralSystem::Hexadecimal));
        assert!(verify("a2f", &sequence, NumeralSystem::Hexadecimal));
        assert!(!verify("a2e", &sequence, NumeralSystem::Hexadecimal));
    }

    #[test]
    fn leading_and_trailing_whitespace_is_forgiven() {
        let sequence = pi_digits();
        assert!(verify("  314159  ", &sequence, NumeralSystem::Decimal));
    }

    #[test]
    fn internal_whitespace_is_not() {
        let sequence = pi_digits();
        assert!(!verify("314 159", &sequence, NumeralSystem::Decimal));
    }

    #[test]
    fn any_single_character_mutation_fails() {
        let sequence = pi_digits();
        let canonical = sequence.canonical_answer(NumeralSystem::Decimal);
        for position in 0..canonical.len() {
            let mut chars: Vec<char> = canonical.chars().collect();
            chars[position] = if chars[position] == '0' { '1' } else { '0' };
            let mutated: String = chars.into_iter().collect();
            assert!(
                !verify(&mutated, &sequence, NumeralSystem::Decimal),
                "mutation at position {} should fail",
                position
            );
        }
    }

    #[test]
    fn length_mismatch_fails() {
        let sequence = pi_digits();
        assert!(!verify("31415", &sequence, NumeralSystem::Decimal));
        assert!(!verify("3141592", &sequence, NumeralSystem::Decimal));
        assert!(!verify("", &sequence, NumeralSystem::Decimal));
    }

    #[test]
    fn judge_preserves_both_strings() {
        let sequence = Sequence::from_symbols(vec![10, 2, 15]);
        let verdict = judge("a2e", &sequence, NumeralSystem::Hexadecimal);
        assert!(!verdict.correct);
        assert_eq!(verdict.expected, "A2F");
        assert_eq!(verdict.submitted, "a2e");
    }
}
