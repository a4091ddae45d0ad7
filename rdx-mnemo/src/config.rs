//! Defines all configuration structures for the Mnemo engine.
//!
//! These structs are designed to be deserialized from a configuration file
//! (e.g., a TOML file) using `serde`. This allows the engine's behavior,
//! including its tick speed, numeral system, and phase durations, to be
//! defined externally from the application code.

use crate::numeral::NumeralSystem;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The top-level configuration for a play session.
///
/// This struct is the entry point for all engine settings. It is typically
/// loaded from a TOML file or environment variables at application startup,
/// or built in code for tests and demos.
#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    /// The tick speed of the master `SecondsClock`.
    #[serde(default)]
    pub resolution: TickResolution,

    /// The numeral system sequences are generated and rendered in.
    #[serde(default = "default_system")]
    pub system: NumeralSystem,

    /// Cosmetic theme tag, passed through to session events unexamined.
    #[serde(default)]
    pub theme: Theme,

    /// Countdown lengths for each phase window.
    #[serde(default)]
    pub timing: TimingConfig,

    /// Sequence generation parameters.
    #[serde(default)]
    pub sequence: SequenceConfig,
}

impl GameConfig {
    /// Loads configuration from an optional `mnemo.toml` file and `MNEMO_*`
    /// environment variables, layered over the defaults.
    pub fn load() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("mnemo").required(false))
            .add_source(config::Environment::with_prefix("MNEMO").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            resolution: TickResolution::default(),
            system: default_system(),
            theme: Theme::default(),
            timing: TimingConfig::default(),
            sequence: SequenceConfig::default(),
        }
    }
}

/// Defines how much wall-clock time one game time unit occupies.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickResolution {
    /// One tick per second. The normal game speed.
    Realtime,
    /// A user-defined tick length. Mainly for demos and tests.
    Custom { millis_per_tick: u64 },
}

impl TickResolution {
    /// The wall-clock duration of one tick.
    pub fn period(&self) -> Duration {
        match self {
            TickResolution::Realtime => Duration::from_secs(1),
            TickResolution::Custom { millis_per_tick } => Duration::from_millis(*millis_per_tick),
        }
    }
}

impl Default for TickResolution {
    fn default() -> Self {
        TickResolution::Realtime
    }
}

/// Cosmetic theme tag selected at session start.
///
/// The engine reports it in `SessionStarted` and otherwise never inspects
/// it; front-ends map it to their own styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Space,
    Cyberpunk,
    Retro,
}

impl Theme {
    /// A human-readable label for menus and banners.
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Space => "Space Adventure",
            Theme::Cyberpunk => "Cyberpunk",
            Theme::Retro => "Retro",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Space
    }
}

/// Countdown lengths for each phase, in ticks (seconds at realtime speed).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TimingConfig {
    /// How long the sequence stays visible.
    #[serde(default = "default_display_secs")]
    pub display_secs: u32,

    /// How long the player has to type their recall.
    #[serde(default = "default_input_secs")]
    pub input_secs: u32,

    /// How long the result feedback is shown before the next round or the
    /// end of the session.
    #[serde(default = "default_review_secs")]
    pub review_secs: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            display_secs: default_display_secs(),
            input_secs: default_input_secs(),
            review_secs: default_review_secs(),
        }
    }
}

/// Sequence generation parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SequenceConfig {
    /// Added to the round number to produce the sequence length, so round 1
    /// shows `base_length + 1` symbols.
    #[serde(default = "default_base_length")]
    pub base_length: u32,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            base_length: default_base_length(),
        }
    }
}

// --- Default value functions for serde ---

fn default_system() -> NumeralSystem {
    NumeralSystem::Decimal
}

fn default_display_secs() -> u32 {
    10
}

fn default_input_secs() -> u32 {
    10
}

fn default_review_secs() -> u32 {
    2
}

fn default_base_length() -> u32 {
    5
}
