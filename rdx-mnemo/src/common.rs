//! Contains common, primitive types shared across the Mnemo engine.
//!
//! This module defines the phase vocabulary of a round and the ID type used
//! to identify registered listeners. Using distinct types improves type
//! safety and code clarity.

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use std::fmt;

new_key_type! {
    /// Uniquely and safely identifies a registered listener within the engine.
    ///
    /// This key is returned when a game-over hook is added to the engine. It
    /// is guaranteed to be unique and will not be reused, preventing stale
    /// ID bugs.
    pub struct ListenerId;
}

/// One of the three phases a round moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// The sequence is visible and must be memorized.
    Display,
    /// The sequence is hidden; the player types their recall.
    Input,
    /// Feedback is shown before the next round starts or the session ends.
    Result,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Display => "display",
            Phase::Input => "input",
            Phase::Result => "result",
        };
        write!(f, "{}", label)
    }
}
