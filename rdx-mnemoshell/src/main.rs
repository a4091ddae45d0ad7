use anyhow::Result;
use colored::Colorize;
use mnemo::prelude::*;
use mnemo::{ENGINE_NAME, VERSION as LIB_VERSION};
use rustyline::highlight::Highlighter;
use rustyline::Editor;
use rustyline_derive::{Completer, Helper, Hinter, Validator};
use std::borrow::Cow;
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const SHELL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A custom helper struct for rustyline that enables syntax highlighting.
#[derive(Completer, Helper, Hinter, Validator)]
struct MyHighlighter;

impl Highlighter for MyHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if let Some((command, rest)) = line.split_once(' ') {
            let colored_command = command.yellow().bold();
            let colored_rest = rest.yellow();
            Cow::Owned(format!("{} {}", colored_command, colored_rest))
        } else {
            Cow::Owned(line.yellow().bold().to_string())
        }
    }
    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

fn print_banner() {
    if env::var("QUIET_MODE").is_ok() {
        return;
    }
    // The `include_str!` macro reads the file at COMPILE time and embeds
    // the text directly into the binary.
    const LOGO_TEXT: &str = include_str!("../logo.log");
    println!("{}", LOGO_TEXT.cyan());

    let version_string = format!(
        "          Shell   v{:<8} Library   v{:<8}",
        SHELL_VERSION, LIB_VERSION
    );

    println!("{}", "-----------------------------------------------------------------------------------------------".dimmed());

    let license_blurb = "
    This software is provided 'as is', without warranty of any kind.
    Distributed under the MIT OR Apache-2.0 license. Use at your own risk.
    ";

    println!("{}", version_string);
    println!("{}", license_blurb.dimmed());

    println!("{}", "-----------------------------------------------------------------------------------------------".dimmed());
}

/// Spawns tasks that print each of the engine's event streams.
fn spawn_event_listeners(engine: &MnemoEngine, is_watching_countdown: Arc<AtomicBool>) {
    // Round Event Listener
    let mut round_rx = engine.subscribe_round_events();
    tokio::spawn(async move {
        while let Ok(event) = round_rx.recv().await {
            match event {
                RoundEvent::RoundStarted { round, display, .. } => {
                    println!("\n<-- [ROUND {}] Memorize: {}\n>> ", round, display.bold());
                }
                RoundEvent::InputOpened { round } => {
                    println!(
                        "\n<-- [ROUND {}] Sequence hidden. Use 'answer <TEXT>' to submit.\n>> ",
                        round
                    );
                }
                RoundEvent::AnswerChecked { verdict, .. } => {
                    if verdict.correct {
                        println!("\n<-- [RESULT] {}\n>> ", "Correct!".green().bold());
                    } else {
                        println!(
                            "\n<-- [RESULT] {} Expected {} but got '{}'.\n>> ",
                            "Incorrect!".red().bold(),
                            verdict.expected,
                            verdict.submitted
                        );
                    }
                }
                RoundEvent::RoundAdvanced { next_round } => {
                    println!("\n<-- [ROUND] Preparing round {}...\n>> ", next_round);
                }
            }
        }
    });

    // Countdown Listener (controlled by the shared flag)
    let mut phase_rx = engine.subscribe_phase_events();
    tokio::spawn(async move {
        while let Ok(event) = phase_rx.recv().await {
            if is_watching_countdown.load(Ordering::Relaxed) || event.seconds_remaining <= 3 {
                println!(
                    "<-- [{}] {}s left",
                    event.phase,
                    event.seconds_remaining
                );
            }
        }
    });

    // Session Event Listener
    let mut session_rx = engine.subscribe_session_events();
    tokio::spawn(async move {
        while let Ok(event) = session_rx.recv().await {
            if let SessionEvent::SessionStarted { system, theme } = event {
                println!("\n<-- [SESSION] {} | {}\n>> ", theme.label(), system);
            }
        }
    });
}

/// Builds a session config from the `start` command's arguments.
fn parse_start_args(args: &[&str]) -> Result<GameConfig, String> {
    let mut config = GameConfig::default();
    for arg in args {
        match *arg {
            "decimal" => config.system = NumeralSystem::Decimal,
            "hexadecimal" => config.system = NumeralSystem::Hexadecimal,
            "binary" => config.system = NumeralSystem::Binary,
            "space" => config.theme = Theme::Space,
            "cyberpunk" => config.theme = Theme::Cyberpunk,
            "retro" => config.theme = Theme::Retro,
            other => {
                return Err(format!(
                    "Unknown option '{}'. Systems: decimal, hexadecimal, binary. Themes: space, cyberpunk, retro.",
                    other
                ))
            }
        }
    }
    Ok(config)
}

/// Starts a fresh session on a new engine, replacing any running one.
fn start_session(
    current: &mut Option<MnemoEngine>,
    config: GameConfig,
    is_watching_countdown: &Arc<AtomicBool>,
) {
    if let Some(old) = current.take() {
        old.shutdown();
    }

    let engine = MnemoEngine::new(config);
    spawn_event_listeners(&engine, is_watching_countdown.clone());

    let runner = engine.clone();
    tokio::spawn(async move {
        match runner.run().await {
            Ok(summary) => {
                if summary.outcome == SessionOutcome::GameOver {
                    println!(
                        "\n<-- [GAME OVER] Score: {}. {}",
                        summary.score.to_string().bold(),
                        summary.score_message()
                    );
                    println!("<-- Type 'start' to play again.\n>> ");
                }
            }
            Err(e) => eprintln!("\nEngine stopped with an error: {}", e),
        }
    });

    *current = Some(engine);
}

#[tokio::main]
async fn main() -> Result<()> {
    print_banner();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_target(false)
        .init();

    // The shell's state management variables.
    let mut current: Option<MnemoEngine> = None;
    let is_watching_countdown = Arc::new(AtomicBool::new(false));

    let mut rl = Editor::new()?;
    let helper = MyHighlighter {};
    rl.set_helper(Some(helper));

    println!(
        "{} is ready. Type 'start' to play, 'help' for commands or 'exit' to quit.",
        ENGINE_NAME.cyan()
    );

    loop {
        let prompt = format!("{}", ">> ".cyan().bold());
        let readline = rl.readline(&prompt);
        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                let args = line.trim().split_whitespace().collect::<Vec<_>>();

                if let Some(command) = args.get(0) {
                    match *command {
                        "start" => match parse_start_args(&args[1..]) {
                            Ok(config) => {
                                println!(
                                    "--> Starting a {} session ({}).",
                                    config.system,
                                    config.theme.label()
                                );
                                start_session(&mut current, config, &is_watching_countdown);
                            }
                            Err(message) => println!("Error: {}", message),
                        },
                        "answer" => {
                            if args.len() < 2 {
                                println!("Usage: answer <TEXT>");
                            } else if let Some(engine) = &current {
                                engine.submit_answer(args[1..].join(" "));
                            } else {
                                println!("No session running. Type 'start' first.");
                            }
                        }
                        "score" => {
                            if let Some(engine) = &current {
                                println!(
                                    "--> Round {}, score {}.",
                                    engine.round_number().await,
                                    engine.score().await
                                );
                            } else {
                                println!("No session running. Type 'start' first.");
                            }
                        }
                        "watch" => {
                            if let Some(&"countdown") = args.get(1) {
                                is_watching_countdown.store(true, Ordering::Relaxed);
                                println!("--> Printing every countdown tick.");
                            } else {
                                println!("Unknown 'watch' command. Try 'watch countdown'.");
                            }
                        }
                        "unwatch" => {
                            if let Some(&"countdown") = args.get(1) {
                                is_watching_countdown.store(false, Ordering::Relaxed);
                                println!("--> Countdown ticks hidden (except the last 3).");
                            } else {
                                println!("Unknown 'unwatch' command. Try 'unwatch countdown'.");
                            }
                        }
                        "abort" => {
                            if let Some(engine) = current.take() {
                                engine.shutdown();
                                println!("--> Session abandoned.");
                            } else {
                                println!("No session running.");
                            }
                        }
                        "help" => {
                            println!("Available commands:");
                            println!("  start [SYSTEM] [THEME] - Starts a session (decimal/hexadecimal/binary).");
                            println!("  answer <TEXT>          - Submits an answer during the input window.");
                            println!("  score                  - Shows the current round and score.");
                            println!("  watch countdown        - Prints every countdown tick.");
                            println!("  unwatch countdown      - Hides countdown ticks again.");
                            println!("  abort                  - Abandons the running session.");
                            println!("  exit                   - Quits the shell.");
                        }
                        "exit" => {
                            if let Some(engine) = current.take() {
                                engine.shutdown();
                            }
                            break;
                        }
                        "" => {}
                        _ => println!("Unknown command: '{}'. Type 'help'.", line),
                    }
                }
            }
            Err(_) => {
                println!("Exiting mnemoshell...");
                if let Some(engine) = current.take() {
                    engine.shutdown();
                }
                break;
            }
        }
    }

    Ok(())
}
