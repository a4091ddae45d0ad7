//! # Mnemo
//!
//! An event-driven, phased memory-training game engine for Rust.
//!
//! Mnemo provides the core engine for a timed sequence-memorization game:
//! each round generates a pseudo-random symbol sequence in a chosen numeral
//! base, shows it for a countdown, hides it while the player types their
//! recall, then verifies the answer and either advances the round or ends
//! the session.
//!
//! ## Core Concepts
//!
//! - **SecondsClock**: a single tick source that acts as the one source of
//!   game time. One tick = one game time unit (a second at the default
//!   resolution).
//! - **Phased Rounds**: every round moves through a fixed phase cycle
//!   ("display", "input", "result"), driven entirely by the tick stream and
//!   player commands.
//! - **Event-Driven**: all state changes are announced as strongly-typed
//!   events. Your application subscribes to event streams (`RoundEvent`,
//!   `PhaseEvent`, etc.) to render the game.
//! - **Configuration-Driven**: the numeral system, phase durations, and tick
//!   resolution are defined at startup via a `GameConfig` object, often
//!   loaded from a file.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mnemo::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // 1. Create a default configuration (decimal digits, realtime ticks).
//!     let config = GameConfig::default();
//!
//!     // 2. Create the engine.
//!     let engine = MnemoEngine::new(config);
//!
//!     // 3. Subscribe to an event stream before starting the engine.
//!     let mut rounds = engine.subscribe_round_events();
//!     tokio::spawn(async move {
//!         while let Ok(event) = rounds.recv().await {
//!             println!("Received Round Event: {:?}", event);
//!         }
//!     });
//!
//!     // 4. Register a game-over hook for the external navigation layer.
//!     let _listener_id = engine
//!         .on_game_over(|summary| println!("Final score: {}", summary.score))
//!         .await;
//!
//!     // 5. Run one session to completion (or until `shutdown` is called).
//!     let summary = engine.run().await?;
//!     println!("{} rounds cleared.", summary.rounds_cleared);
//!     Ok(())
//! }
//! ```

pub const ENGINE_NAME: &str = "Mnemo Engine";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");


// Declare all the modules in the crate.
pub mod common;
pub mod components;
pub mod config;
pub mod engine;
pub mod events;
pub mod numeral;
pub mod time;

/// A prelude module for easy importing of the most common Mnemo types.
pub mod prelude {
    pub use crate::common::{ListenerId, Phase};
    pub use crate::components::round::{Round, TickOutcome};
    pub use crate::components::sequence::Sequence;
    pub use crate::components::session::{SessionOutcome, SessionState, SessionSummary};
    pub use crate::components::verify::Verdict;
    pub use crate::config::{GameConfig, SequenceConfig, Theme, TickResolution, TimingConfig};
    pub use crate::engine::{MnemoEngine, PlayerCommand};
    pub use crate::events::{PhaseEvent, RoundEvent, SessionEvent, SystemEvent};
    pub use crate::numeral::NumeralSystem;
}
