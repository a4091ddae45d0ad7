//! The round state machine: one display/input/result cycle.

use crate::common::Phase;
use crate::components::sequence::Sequence;
use crate::components::verify::{judge, Verdict};
use crate::config::TimingConfig;
use crate::numeral::NumeralSystem;
use rand::Rng;

/// What a single counted tick did to the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown decremented and the phase is unchanged.
    Counted { phase: Phase, remaining: u32 },
    /// The display window closed; the input window is now open with a full
    /// countdown.
    InputOpened,
    /// The input window closed; whatever was in the buffer (possibly
    /// nothing) was submitted and verified.
    Resolved(Verdict),
    /// The review delay is still running. The visible countdown is frozen.
    Reviewing { remaining: u32 },
    /// The review delay elapsed; the session must advance or end.
    ReviewElapsed(Verdict),
}

/// One active round: the sequence, the current phase record, its countdown,
/// and the player's input buffer.
///
/// Exactly one `Round` exists per session at any instant. A new round is a
/// new value; rounds are replaced on transition, never reused.
#[derive(Debug)]
pub struct Round {
    phase: Phase,
    sequence: Sequence,
    user_input: String,
    time_remaining: u32,
    round_number: u32,
    last_result: Option<Verdict>,
    review_remaining: u32,
    system: NumeralSystem,
    timing: TimingConfig,
}

impl Round {
    /// Starts a round: generates a fresh sequence and opens the display
    /// window with a full countdown.
    pub fn start<R: Rng>(
        round_number: u32,
        system: NumeralSystem,
        timing: TimingConfig,
        base_length: u32,
        rng: &mut R,
    ) -> Self {
        let sequence = Sequence::generate(round_number, system, base_length, rng);
        Self {
            phase: Phase::Display,
            sequence,
            user_input: String::new(),
            time_remaining: timing.display_secs,
            round_number,
            last_result: None,
            review_remaining: timing.review_secs,
            system,
            timing,
        }
    }

    /// The phase the round is currently in.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// This round's number, equal to the session's round counter while the
    /// round is active.
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Whole time units left in the current phase window.
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    /// The sequence the player must memorize.
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// The player's current input buffer.
    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    /// The verdict, once the round has been resolved.
    pub fn last_result(&self) -> Option<&Verdict> {
        self.last_result.as_ref()
    }

    /// The canonical rendering shown during the display window.
    pub fn display_text(&self) -> String {
        self.sequence.canonical_answer(self.system)
    }

    /// Replaces the input buffer. Only meaningful during the input window;
    /// calls in other phases are ignored.
    pub fn set_input(&mut self, text: &str) {
        if self.phase == Phase::Input {
            self.user_input = text.to_string();
        }
    }

    /// Explicit submission of the current input buffer.
    ///
    /// Accepted only during the input window and only for non-empty trimmed
    /// text; returns the verdict when accepted. The verifier runs at most
    /// once per round, so a second submission is ignored.
    pub fn submit(&mut self) -> Option<Verdict> {
        if self.phase != Phase::Input || self.user_input.trim().is_empty() {
            return None;
        }
        Some(self.resolve())
    }

    /// Advances the round by one time unit.
    pub fn tick(&mut self) -> TickOutcome {
        match self.phase {
            Phase::Display => {
                self.time_remaining = self.time_remaining.saturating_sub(1);
                if self.time_remaining == 0 {
                    self.phase = Phase::Input;
                    self.time_remaining = self.timing.input_secs;
                    TickOutcome::InputOpened
                } else {
                    TickOutcome::Counted {
                        phase: Phase::Display,
                        remaining: self.time_remaining,
                    }
                }
            }
            Phase::Input => {
                self.time_remaining = self.time_remaining.saturating_sub(1);
                if self.time_remaining == 0 {
                    // Forced submission of whatever partial text is present.
                    TickOutcome::Resolved(self.resolve())
                } else {
                    TickOutcome::Counted {
                        phase: Phase::Input,
                        remaining: self.time_remaining,
                    }
                }
            }
            Phase::Result => {
                self.review_remaining = self.review_remaining.saturating_sub(1);
                match self.last_result.clone() {
                    Some(verdict) if self.review_remaining == 0 => {
                        TickOutcome::ReviewElapsed(verdict)
                    }
                    _ => TickOutcome::Reviewing {
                        remaining: self.review_remaining,
                    },
                }
            }
        }
    }

    /// Runs the verifier and enters the result phase with a fresh review
    /// delay.
    fn resolve(&mut self) -> Verdict {
        let verdict = judge(&self.user_input, &self.sequence, self.system);
        self.phase = Phase::Result;
        self.review_remaining = self.timing.review_secs;
        self.last_result = Some(verdict.clone());
        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn timing(display: u32, input: u32, review: u32) -> TimingConfig {
        TimingConfig {
            display_secs: display,
            input_secs: input,
            review_secs: review,
        }
    }

    fn start_round(round_number: u32) -> Round {
        let mut rng = StdRng::seed_from_u64(7);
        Round::start(
            round_number,
            NumeralSystem::Decimal,
            timing(10, 10, 2),
            5,
            &mut rng,
        )
    }

    #[test]
    fn a_round_begins_in_display_with_a_full_countdown() {
        let round = start_round(1);
        assert_eq!(round.phase(), Phase::Display);
        assert_eq!(round.time_remaining(), 10);
        assert_eq!(round.sequence().len(), 6);
        assert!(round.last_result().is_none());
    }

    #[test]
    fn display_expiry_opens_the_input_window() {
        let mut round = start_round(1);
        for remaining in (1..=9).rev() {
            assert_eq!(
                round.tick(),
                TickOutcome::Counted {
                    phase: Phase::Display,
                    remaining,
                }
            );
        }
        assert_eq!(round.tick(), TickOutcome::InputOpened);
        assert_eq!(round.phase(), Phase::Input);
        assert_eq!(round.time_remaining(), 10);
    }

    #[test]
    fn submissions_are_ignored_outside_the_input_window() {
        let mut round = start_round(1);
        round.set_input("123456");
        assert_eq!(round.user_input(), "");
        assert!(round.submit().is_none());
        assert_eq!(round.phase(), Phase::Display);
    }

    #[test]
    fn empty_submissions_are_ignored() {
        let mut round = start_round(1);
        while round.phase() == Phase::Display {
            round.tick();
        }
        round.set_input("   ");
        assert!(round.submit().is_none());
        assert_eq!(round.phase(), Phase::Input);
    }

    #[test]
    fn a_correct_submit_resolves_and_reviews() {
        let mut round = start_round(1);
        while round.phase() == Phase::Display {
            round.tick();
        }
        let answer = round.display_text();
        round.set_input(&answer);
        let verdict = round.submit().expect("submission should be accepted");
        assert!(verdict.correct);
        assert_eq!(round.phase(), Phase::Result);

        // The verifier runs at most once per round.
        assert!(round.submit().is_none());

        assert_eq!(round.tick(), TickOutcome::Reviewing { remaining: 1 });
        assert_eq!(round.tick(), TickOutcome::ReviewElapsed(verdict));
    }

    #[test]
    fn input_expiry_forces_a_submission_of_the_partial_buffer() {
        let mut round = start_round(1);
        while round.phase() == Phase::Display {
            round.tick();
        }
        round.set_input("12");
        for _ in 0..9 {
            round.tick();
        }
        match round.tick() {
            TickOutcome::Resolved(verdict) => {
                assert!(!verdict.correct);
                assert_eq!(verdict.submitted, "12");
            }
            other => panic!("expected a forced resolution, got {:?}", other),
        }
        assert_eq!(round.phase(), Phase::Result);
    }

    #[test]
    fn input_expiry_with_no_text_submits_the_empty_string() {
        let mut round = start_round(1);
        while round.phase() == Phase::Display {
            round.tick();
        }
        let mut outcome = round.tick();
        while matches!(outcome, TickOutcome::Counted { .. }) {
            outcome = round.tick();
        }
        match outcome {
            TickOutcome::Resolved(verdict) => {
                assert!(!verdict.correct);
                assert_eq!(verdict.submitted, "");
            }
            other => panic!("expected a forced resolution, got {:?}", other),
        }
    }

    #[test]
    fn a_wrong_answer_still_gets_a_full_review_window() {
        let mut round = start_round(3);
        while round.phase() == Phase::Display {
            round.tick();
        }
        round.set_input("not even close");
        let verdict = round.submit().expect("submission should be accepted");
        assert!(!verdict.correct);
        assert_eq!(round.tick(), TickOutcome::Reviewing { remaining: 1 });
        assert_eq!(round.tick(), TickOutcome::ReviewElapsed(verdict));
    }

    #[test]
    fn later_rounds_grow_by_one_symbol() {
        assert_eq!(start_round(1).sequence().len(), 6);
        assert_eq!(start_round(2).sequence().len(), 7);
        assert_eq!(start_round(5).sequence().len(), 10);
    }
}
