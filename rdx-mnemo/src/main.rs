use anyhow::Result;
use mnemo::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    // 2. Load configuration: mnemo.toml / MNEMO_* env vars over defaults.
    let config = GameConfig::load()?;

    // 3. Create the MnemoEngine instance.
    let engine = MnemoEngine::new(config);

    // 4. Spawn concurrent tasks to listen to the event streams.
    spawn_event_listeners(&engine);

    // 5. Feed stdin lines to the engine as answers.
    let input_engine = engine.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            input_engine.submit_answer(line);
        }
    });

    // 6. Run one session. This is a blocking call that returns when the
    //    session ends in game over (or the engine is shut down).
    let summary = engine.run().await?;

    info!(
        "Final score: {} over {} rounds. {}",
        summary.score,
        summary.rounds_cleared,
        summary.score_message()
    );
    Ok(())
}

/// Spawns several tasks, each subscribing to a different event stream from the engine.
fn spawn_event_listeners(engine: &MnemoEngine) {
    // --- Round Event Listener ---
    let mut round_rx = engine.subscribe_round_events();
    tokio::spawn(async move {
        while let Ok(event) = round_rx.recv().await {
            match event {
                RoundEvent::RoundStarted { round, display: display_text, .. } => {
                    info!("[ROUND {}] Memorize: {}", round, display_text);
                }
                RoundEvent::InputOpened { round } => {
                    info!("[ROUND {}] Type the sequence and press Enter.", round);
                }
                RoundEvent::AnswerChecked { verdict, .. } => {
                    if verdict.correct {
                        info!("[RESULT] Correct!");
                    } else {
                        info!(
                            "[RESULT] Incorrect! Expected {} but got '{}'.",
                            verdict.expected, verdict.submitted
                        );
                    }
                }
                RoundEvent::RoundAdvanced { next_round } => {
                    info!("[ROUND] Preparing round {}...", next_round);
                }
            }
        }
    });

    // --- Phase Event Listener (logs the last few seconds to avoid spam) ---
    let mut phase_rx = engine.subscribe_phase_events();
    tokio::spawn(async move {
        while let Ok(event) = phase_rx.recv().await {
            if event.seconds_remaining <= 3 {
                info!("[{}] {}s left", event.phase, event.seconds_remaining);
            }
        }
    });

    // --- Session Event Listener ---
    let mut session_rx = engine.subscribe_session_events();
    tokio::spawn(async move {
        while let Ok(event) = session_rx.recv().await {
            match event {
                SessionEvent::SessionStarted { system, theme } => {
                    info!("[SESSION] {} | {}", theme.label(), system);
                }
                SessionEvent::GameOver { summary } => {
                    info!("[SESSION] Game over. {}", summary.score_message());
                }
            }
        }
    });
}
