//! Session-scoped state: the cumulative score and the round counter.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Score and round counter for one play session.
///
/// The score only ever grows while a session is alive; it is reset wholesale
/// when a new session starts, never decremented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    score: u32,
    round_number: u32,
}

impl SessionState {
    /// A fresh session: zero score, round one.
    pub fn new() -> Self {
        Self {
            score: 0,
            round_number: 1,
        }
    }

    /// The cumulative score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// The current round number, starting at 1.
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Rounds already cleared in this session.
    pub fn rounds_cleared(&self) -> u32 {
        self.round_number - 1
    }

    /// Points awarded for clearing the current round: `round * 10`, scored
    /// with the round number before it increments.
    pub fn round_score(&self) -> u32 {
        self.round_number * 10
    }

    /// Adds a round's score delta.
    pub fn add_round_score(&mut self, delta: u32) {
        self.score += delta;
    }

    /// Moves the session to the next round.
    pub fn advance_round(&mut self) {
        self.round_number += 1;
    }

    /// Resets the session to zero score, round one.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    /// A wrong (or missing) answer ended the session.
    GameOver,
    /// The engine was torn down before any answer failed.
    Abandoned,
}

/// The final record of a session, handed to game-over listeners and
/// returned by the engine's `run` loop.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub outcome: SessionOutcome,
    pub score: u32,
    pub rounds_cleared: u32,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl SessionSummary {
    /// The flavor line shown on the game-over screen for this score.
    pub fn score_message(&self) -> &'static str {
        score_message(self.score)
    }
}

/// Flavor text for a final score.
pub fn score_message(score: u32) -> &'static str {
    if score >= 100 {
        "Incredible! You're a memory master!"
    } else if score >= 50 {
        "Great job! Excellent memory skills!"
    } else if score >= 20 {
        "Good work! Keep practicing!"
    } else {
        "Nice try! Practice makes perfect!"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_fresh_session_is_round_one_with_no_score() {
        let session = SessionState::new();
        assert_eq!(session.score(), 0);
        assert_eq!(session.round_number(), 1);
        assert_eq!(session.rounds_cleared(), 0);
    }

    #[test]
    fn round_score_uses_the_pre_increment_round_number() {
        let mut session = SessionState::new();
        assert_eq!(session.round_score(), 10);
        session.add_round_score(session.round_score());
        session.advance_round();
        assert_eq!(session.score(), 10);
        assert_eq!(session.round_score(), 20);
    }

    #[test]
    fn the_score_grows_monotonically_until_reset() {
        let mut session = SessionState::new();
        let mut last = 0;
        for _ in 0..5 {
            session.add_round_score(session.round_score());
            session.advance_round();
            assert!(session.score() > last);
            last = session.score();
        }
        session.reset();
        assert_eq!(session.score(), 0);
        assert_eq!(session.round_number(), 1);
    }

    #[test]
    fn score_messages_follow_the_thresholds() {
        assert_eq!(score_message(150), "Incredible! You're a memory master!");
        assert_eq!(score_message(100), "Incredible! You're a memory master!");
        assert_eq!(score_message(99), "Great job! Excellent memory skills!");
        assert_eq!(score_message(50), "Great job! Excellent memory skills!");
        assert_eq!(score_message(20), "Good work! Keep practicing!");
        assert_eq!(score_message(19), "Nice try! Practice makes perfect!");
        assert_eq!(score_message(0), "Nice try! Practice makes perfect!");
    }
}
