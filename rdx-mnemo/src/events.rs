//! Defines all public event types broadcast by the Mnemo engine.
//!
//! This module acts as the public API for the engine's event system. A
//! front-end subscribes to these specific, strongly-typed events to render
//! the game without ever touching round state directly.

use crate::common::{ListenerId, Phase};
use crate::components::session::SessionSummary;
use crate::components::verify::Verdict;
use crate::config::Theme;
use crate::numeral::NumeralSystem;
use crate::time::TickEvent;
use std::sync::Arc;
use tokio::time::Instant;

/// The countdown heartbeat, fired once per counted tick.
///
/// Emitted while a round is in its `display` or `input` window; the visible
/// countdown is frozen during `result`, so no `PhaseEvent` is fired then.
#[derive(Debug, Clone)]
pub struct PhaseEvent {
    /// The round this count belongs to.
    pub round: u32,
    /// The phase whose window is counting down.
    pub phase: Phase,
    /// Whole time units left in the current phase window.
    pub seconds_remaining: u32,
    /// A shared pointer to the master tick that produced this count.
    pub tick: Arc<TickEvent>,
}

/// Events marking the lifecycle of a single round.
#[derive(Debug, Clone)]
pub enum RoundEvent {
    /// A fresh sequence was generated and the display window opened.
    /// `display` is the canonical rendering the player must memorize.
    RoundStarted {
        round: u32,
        length: usize,
        display: String,
    },
    /// The display window closed and the input window opened.
    InputOpened { round: u32 },
    /// The verifier ran, either on an explicit submission or because the
    /// input window expired. Fired exactly once per round.
    AnswerChecked { round: u32, verdict: Verdict },
    /// The review delay after a correct answer elapsed; the next round is
    /// about to start.
    RoundAdvanced { next_round: u32 },
}

/// Events spanning the whole session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Fired once when a session begins.
    SessionStarted {
        system: NumeralSystem,
        theme: Theme,
    },
    /// The review delay after a wrong answer elapsed; the session is over.
    GameOver { summary: SessionSummary },
}

/// Events related to the lifecycle and state of the engine itself.
#[derive(Debug, Clone)]
pub enum SystemEvent {
    /// Fired once when the engine's `run` loop begins.
    EngineStarted { timestamp: Instant },
    /// Fired once when the engine's `run` loop is about to exit.
    EngineShutdown,
    /// Fired when a new listener is successfully added to the engine.
    ListenerAdded { id: ListenerId },
    /// Fired when a listener is removed from the engine.
    ListenerRemoved { id: ListenerId },
}
