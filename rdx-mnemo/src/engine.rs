//! The core engine that drives a Mnemo play session.

use crate::common::{ListenerId, Phase};
use crate::components::round::{Round, TickOutcome};
use crate::components::session::{SessionOutcome, SessionState, SessionSummary};
use crate::components::verify::Verdict;
use crate::config::GameConfig;
use crate::events::{PhaseEvent, RoundEvent, SessionEvent, SystemEvent};
use crate::time::{SecondsClock, TickEvent};
use chrono::Utc;
use slotmap::SlotMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};

/// A fire-and-forget hook invoked when a session ends in game over.
///
/// This is the handoff point for external collaborators (navigation, high
/// score boards); the engine expects no return value.
pub type GameOverHook = Box<dyn FnMut(&SessionSummary) + Send + Sync>;

/// Player input delivered to the dispatcher loop.
#[derive(Debug, Clone)]
pub enum PlayerCommand {
    /// Replace the input buffer with the given text.
    Input(String),
    /// Submit the current input buffer.
    Submit,
}

/// The main Mnemo engine.
///
/// This struct is the central point of control. It holds the session
/// configuration, owns all event channels, and drives one play session per
/// `run` call. The `Engine` is designed to be cloned and shared across
/// tasks, providing a handle to the running instance.
#[derive(Clone)]
pub struct MnemoEngine {
    config: Arc<GameConfig>,
    tick_sender: broadcast::Sender<Arc<TickEvent>>,
    phase_sender: broadcast::Sender<PhaseEvent>,
    round_sender: broadcast::Sender<RoundEvent>,
    session_sender: broadcast::Sender<SessionEvent>,
    system_event_sender: broadcast::Sender<SystemEvent>,
    command_sender: broadcast::Sender<PlayerCommand>,
    shutdown_sender: broadcast::Sender<()>,
    session: Arc<RwLock<SessionState>>,
    game_over_hooks: Arc<RwLock<SlotMap<ListenerId, GameOverHook>>>,
}

// Core implementation block for internal logic.
impl MnemoEngine {
    /// Creates a new `MnemoEngine` with the given configuration.
    pub fn new(config: GameConfig) -> Self {
        const CHANNEL_CAPACITY: usize = 256;
        let (tick_sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        let (phase_sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        let (round_sender, _) = broadcast::channel(64);
        let (session_sender, _) = broadcast::channel(64);
        let (system_event_sender, _) = broadcast::channel(64);
        let (command_sender, _) = broadcast::channel(64);
        let (shutdown_sender, _) = broadcast::channel(1);

        Self {
            config: Arc::new(config),
            tick_sender,
            phase_sender,
            round_sender,
            session_sender,
            system_event_sender,
            command_sender,
            shutdown_sender,
            session: Arc::new(RwLock::new(SessionState::new())),
            game_over_hooks: Arc::new(RwLock::new(SlotMap::with_key())),
        }
    }

    /// Runs one play session until game over or shutdown.
    ///
    /// This method will:
    /// 1. Spawn the `SecondsClock` task.
    /// 2. Reset the session and start round 1.
    /// 3. Drive the dispatcher loop over ticks and player commands.
    /// 4. Cancel the clock and return the `SessionSummary`.
    ///
    /// All round and session state is owned by this loop; the clock is the
    /// only time source. A timer from a superseded phase therefore cannot
    /// exist, and teardown stops the clock before returning.
    pub async fn run(&self) -> anyhow::Result<SessionSummary> {
        info!(
            "MnemoEngine starting a {} session...",
            self.config.system
        );
        let started_at = Utc::now();

        let clock = SecondsClock::new(self.config.resolution.clone(), self.tick_sender.clone());
        tokio::spawn(clock.run(self.shutdown_sender.subscribe()));

        let mut tick_rx = self.tick_sender.subscribe();
        let mut command_rx = self.command_sender.subscribe();
        let mut shutdown_rx = self.shutdown_sender.subscribe();

        self.system_event_sender
            .send(SystemEvent::EngineStarted {
                timestamp: tokio::time::Instant::now(),
            })
            .ok();
        self.session.write().await.reset();
        self.session_sender
            .send(SessionEvent::SessionStarted {
                system: self.config.system,
                theme: self.config.theme,
            })
            .ok();

        let mut round = self.start_round(1);

        let outcome = loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => break SessionOutcome::Abandoned,
                Ok(command) = command_rx.recv() => {
                    self.handle_command(&mut round, command).await;
                }
                Ok(tick) = tick_rx.recv() => {
                    if let Some(outcome) = self.handle_tick(&mut round, &tick).await {
                        break outcome;
                    }
                }
            }
        };

        // Stop the clock before returning: no tick may fire after teardown.
        self.shutdown_sender.send(()).ok();

        let summary = {
            let session = self.session.read().await;
            SessionSummary {
                outcome,
                score: session.score(),
                rounds_cleared: session.rounds_cleared(),
                started_at,
                ended_at: Utc::now(),
            }
        };

        if outcome == SessionOutcome::GameOver {
            let mut hooks = self.game_over_hooks.write().await;
            for (_id, hook) in hooks.iter_mut() {
                hook(&summary);
            }
            self.session_sender
                .send(SessionEvent::GameOver {
                    summary: summary.clone(),
                })
                .ok();
        }
        self.system_event_sender.send(SystemEvent::EngineShutdown).ok();
        info!(
            "Session over: {:?} with score {}.",
            summary.outcome, summary.score
        );
        Ok(summary)
    }

    /// Generates the next round and announces it.
    #[doc(hidden)]
    fn start_round(&self, round_number: u32) -> Round {
        let round = {
            let mut rng = rand::thread_rng();
            Round::start(
                round_number,
                self.config.system,
                self.config.timing,
                self.config.sequence.base_length,
                &mut rng,
            )
        };
        debug!(
            "Round {} started with a {}-symbol sequence.",
            round_number,
            round.sequence().len()
        );
        self.round_sender
            .send(RoundEvent::RoundStarted {
                round: round_number,
                length: round.sequence().len(),
                display: round.display_text(),
            })
            .ok();
        round
    }

    #[doc(hidden)]
    async fn handle_command(&self, round: &mut Round, command: PlayerCommand) {
        match command {
            PlayerCommand::Input(text) => round.set_input(&text),
            PlayerCommand::Submit => {
                if let Some(verdict) = round.submit() {
                    self.on_resolved(round, &verdict).await;
                } else {
                    debug!("Ignored a submit outside the input window.");
                }
            }
        }
    }

    /// Processes one tick of game time. Returns the session outcome once the
    /// session is over.
    #[doc(hidden)]
    async fn handle_tick(&self, round: &mut Round, tick: &Arc<TickEvent>) -> Option<SessionOutcome> {
        match round.tick() {
            TickOutcome::Counted { phase, remaining } => {
                self.phase_sender
                    .send(PhaseEvent {
                        round: round.round_number(),
                        phase,
                        seconds_remaining: remaining,
                        tick: tick.clone(),
                    })
                    .ok();
                None
            }
            TickOutcome::InputOpened => {
                debug!(
                    "Display window closed for round {}; input open.",
                    round.round_number()
                );
                self.round_sender
                    .send(RoundEvent::InputOpened {
                        round: round.round_number(),
                    })
                    .ok();
                self.phase_sender
                    .send(PhaseEvent {
                        round: round.round_number(),
                        phase: Phase::Input,
                        seconds_remaining: round.time_remaining(),
                        tick: tick.clone(),
                    })
                    .ok();
                None
            }
            TickOutcome::Resolved(verdict) => {
                self.on_resolved(round, &verdict).await;
                None
            }
            // The visible countdown is frozen during review.
            TickOutcome::Reviewing { .. } => None,
            TickOutcome::ReviewElapsed(verdict) => {
                if verdict.correct {
                    let next_round = {
                        let mut session = self.session.write().await;
                        session.advance_round();
                        session.round_number()
                    };
                    self.round_sender
                        .send(RoundEvent::RoundAdvanced { next_round })
                        .ok();
                    *round = self.start_round(next_round);
                    None
                } else {
                    Some(SessionOutcome::GameOver)
                }
            }
        }
    }

    /// Applies scoring for a resolved round and announces the verdict.
    #[doc(hidden)]
    async fn on_resolved(&self, round: &Round, verdict: &Verdict) {
        if verdict.correct {
            let mut session = self.session.write().await;
            let delta = session.round_score();
            session.add_round_score(delta);
            debug!(
                "Round {} cleared; score is now {}.",
                round.round_number(),
                session.score()
            );
        }
        self.round_sender
            .send(RoundEvent::AnswerChecked {
                round: round.round_number(),
                verdict: verdict.clone(),
            })
            .ok();
    }
}

// Public API implementation block.
impl MnemoEngine {
    /// The configuration this engine was created with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The current cumulative score.
    pub async fn score(&self) -> u32 {
        self.session.read().await.score()
    }

    /// The current round number.
    pub async fn round_number(&self) -> u32 {
        self.session.read().await.round_number()
    }

    /// Replaces the input buffer for the current round.
    pub fn set_input(&self, text: impl Into<String>) {
        self.command_sender
            .send(PlayerCommand::Input(text.into()))
            .ok();
    }

    /// Submits the current input buffer.
    pub fn submit(&self) {
        self.command_sender.send(PlayerCommand::Submit).ok();
    }

    /// Convenience: replaces the input buffer and submits it in one step.
    pub fn submit_answer(&self, text: impl Into<String>) {
        self.set_input(text);
        self.submit();
    }

    /// Tears the engine down: cancels the clock and ends the running
    /// session. Safe to call from any task; no tick fires afterward.
    pub fn shutdown(&self) {
        self.shutdown_sender.send(()).ok();
    }

    /// Registers a fire-and-forget hook invoked when a session ends in game
    /// over.
    ///
    /// # Returns
    /// A `ListenerId` which can be used to later remove this hook.
    pub async fn on_game_over(
        &self,
        hook: impl FnMut(&SessionSummary) + Send + Sync + 'static,
    ) -> ListenerId {
        let mut hooks = self.game_over_hooks.write().await;
        let id = hooks.insert(Box::new(hook));
        self.system_event_sender
            .send(SystemEvent::ListenerAdded { id })
            .ok();
        id
    }

    /// Removes a game-over hook from the engine.
    ///
    /// Returns `true` if the hook was found and removed.
    pub async fn remove_game_over_listener(&self, id: ListenerId) -> bool {
        let was_removed = self.game_over_hooks.write().await.remove(id).is_some();
        if was_removed {
            self.system_event_sender
                .send(SystemEvent::ListenerRemoved { id })
                .ok();
        }
        was_removed
    }

    /// Subscribes to the raw tick stream.
    pub fn subscribe_tick_events(&self) -> broadcast::Receiver<Arc<TickEvent>> {
        self.tick_sender.subscribe()
    }

    /// Subscribes to the `PhaseEvent` stream.
    pub fn subscribe_phase_events(&self) -> broadcast::Receiver<PhaseEvent> {
        self.phase_sender.subscribe()
    }

    /// Subscribes to the `RoundEvent` stream.
    pub fn subscribe_round_events(&self) -> broadcast::Receiver<RoundEvent> {
        self.round_sender.subscribe()
    }

    /// Subscribes to the `SessionEvent` stream.
    pub fn subscribe_session_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.session_sender.subscribe()
    }

    /// Subscribes to the `SystemEvent` stream.
    pub fn subscribe_system_events(&self) -> broadcast::Receiver<SystemEvent> {
        self.system_event_sender.subscribe()
    }
}
