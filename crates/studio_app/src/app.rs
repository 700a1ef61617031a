use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use studio_core::{update, AppState, Msg};
use studio_engine::{
    ensure_store_dir, ApiSettings, AssetBus, CommandPlayer, EngineConfig, EngineHandle,
    LocalStore, ProbeSettings, SimulationSettings,
};
use studio_logging::{studio_debug, studio_info, studio_warn};

use crate::commands::{parse_line, Command, HELP};
use crate::config::StudioConfig;
use crate::effects::{spawn_event_pump, spawn_library_writer, EffectRunner};
use crate::render::{history_lines, suggestion_lines, Renderer};

/// What the main loop receives: reducer messages, or a request to print
/// something that only lives in the current state.
#[derive(Debug)]
pub enum LoopEvent {
    Msg(Msg),
    ShowHistory,
    Quit,
}

pub fn engine_config(config: &StudioConfig, store: LocalStore, fast: bool) -> EngineConfig {
    EngineConfig {
        probe: ProbeSettings {
            asset_base: config.asset_base.clone(),
            ..ProbeSettings::default()
        },
        simulation: if fast {
            SimulationSettings::fast()
        } else {
            SimulationSettings::default()
        },
        api: ApiSettings {
            base_url: config.api_base.clone(),
            ..ApiSettings::default()
        },
        session_id: config.session_id.clone(),
        ..EngineConfig::default_with_store(store)
    }
}

pub fn run(config: StudioConfig, fast: bool) -> anyhow::Result<()> {
    ensure_store_dir(&config.storage_dir)
        .with_context(|| format!("cannot use storage dir {:?}", config.storage_dir))?;
    let store = LocalStore::new(config.storage_dir.clone());

    let (engine, events) = EngineHandle::new(engine_config(&config, store.clone(), fast))
        .context("failed to start the engine")?;
    let (msg_tx, msg_rx) = mpsc::channel::<LoopEvent>();
    let bus = AssetBus::new();

    spawn_event_pump(events, msg_tx.clone());
    spawn_library_writer(&bus, store.clone(), msg_tx.clone());
    spawn_stdin_reader(msg_tx.clone());

    let runner = EffectRunner::new(
        engine,
        store.clone(),
        bus,
        Box::new(CommandPlayer::new(config.player_command.as_deref())),
        config.asset_base.clone(),
        msg_tx.clone(),
    );

    for msg in [
        Msg::HistoryRestored(store.load_history()),
        Msg::LibraryLoaded(store.load_library()),
        Msg::UserRestored(store.current_user()),
    ] {
        let _ = msg_tx.send(LoopEvent::Msg(msg));
    }
    drop(msg_tx);

    let mut state = AppState::new();
    let mut renderer = Renderer::new();
    let stdout = io::stdout();

    print_lines(&stdout, &["Type /help for commands. Suggestions:".to_string()])?;
    print_lines(&stdout, &suggestion_lines(&state.view().generator.suggestions))?;
    print_lines(&stdout, &renderer.render(&state.view()))?;
    studio_info!("Studio started; storage at {:?}", store.dir());

    while let Ok(event) = msg_rx.recv() {
        match event {
            LoopEvent::Quit => break,
            LoopEvent::ShowHistory => {
                print_lines(&stdout, &history_lines(&state.view().history))?;
            }
            LoopEvent::Msg(msg) => {
                let (next, effects) = update(state, msg);
                state = next;
                runner.run(effects);
                if state.consume_dirty() {
                    print_lines(&stdout, &renderer.render(&state.view()))?;
                }
            }
        }
    }

    studio_info!("Studio shutting down");
    Ok(())
}

fn spawn_stdin_reader(msg_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    studio_warn!("Failed to read input: {}", err);
                    break;
                }
            };
            let event = match parse_line(&line, Local::now()) {
                Command::Dispatch(msgs) => {
                    for msg in msgs {
                        if msg_tx.send(LoopEvent::Msg(msg)).is_err() {
                            return;
                        }
                    }
                    continue;
                }
                Command::ShowHistory => LoopEvent::ShowHistory,
                Command::Quit => LoopEvent::Quit,
                Command::Help => {
                    println!("{HELP}");
                    continue;
                }
                Command::Invalid(message) => {
                    println!("{message}");
                    continue;
                }
            };
            if msg_tx.send(event).is_err() {
                return;
            }
        }
        studio_debug!("Input closed");
        // Leave time for in-flight replies when input is piped.
        thread::sleep(Duration::from_millis(200));
        let _ = msg_tx.send(LoopEvent::Quit);
    });
}

fn print_lines(stdout: &io::Stdout, lines: &[String]) -> io::Result<()> {
    if lines.is_empty() {
        return Ok(());
    }
    let mut out = stdout.lock();
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
