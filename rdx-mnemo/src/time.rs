//! The master clock: the single source of game time.

use crate::config::TickResolution;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::time::{interval_at, Instant};
use tracing::{debug, trace};

/// A single beat of game time. One tick = one game time unit.
#[derive(Debug)]
pub struct TickEvent {
    /// Monotonic counter, starting at 1 for the first tick of a session.
    pub tick_count: u64,
    /// When this tick fired.
    pub timestamp: Instant,
}

/// Emits `TickEvent`s at the configured resolution until shut down.
///
/// The clock is the only time source in the engine: every countdown, phase
/// transition, and review delay is driven by its stream. Shutting the clock
/// down therefore guarantees that no timer can mutate round state afterward.
pub(crate) struct SecondsClock {
    resolution: TickResolution,
    tick_sender: broadcast::Sender<Arc<TickEvent>>,
}

impl SecondsClock {
    /// Creates a new `SecondsClock` feeding the given tick channel.
    pub(crate) fn new(
        resolution: TickResolution,
        tick_sender: broadcast::Sender<Arc<TickEvent>>,
    ) -> Self {
        Self {
            resolution,
            tick_sender,
        }
    }

    /// Runs the tick loop until the shutdown channel fires.
    pub(crate) async fn run(self, mut shutdown_rx: broadcast::Receiver<()>) {
        let period = self.resolution.period();
        // The first tick lands one full period after start, not immediately.
        let mut ticker = interval_at(Instant::now() + period, period);
        let mut tick_count: u64 = 0;
        debug!("SecondsClock running with a {:?} period.", period);
        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => break,
                instant = ticker.tick() => {
                    tick_count += 1;
                    trace!("Tick #{}", tick_count);
                    self.tick_sender
                        .send(Arc::new(TickEvent {
                            tick_count,
                            timestamp: instant,
                        }))
                        .ok();
                }
            }
        }
        debug!("SecondsClock stopped after {} ticks.", tick_count);
    }
}
