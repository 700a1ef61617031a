use std::sync::mpsc;
use std::thread;

use studio_core::{Effect, Msg};
use studio_engine::{asset_url, AssetBus, EngineEvent, EngineHandle, LocalStore, Player};
use studio_logging::{studio_debug, studio_info, studio_warn};

use crate::app::LoopEvent;

/// Carries out the reducer's effects against the engine, the store and the player.
pub struct EffectRunner {
    engine: EngineHandle,
    store: LocalStore,
    bus: AssetBus,
    player: Box<dyn Player>,
    asset_base: String,
    msg_tx: mpsc::Sender<LoopEvent>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        store: LocalStore,
        bus: AssetBus,
        player: Box<dyn Player>,
        asset_base: String,
        msg_tx: mpsc::Sender<LoopEvent>,
    ) -> Self {
        Self {
            engine,
            store,
            bus,
            player,
            asset_base,
            msg_tx,
        }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartGeneration {
                    attempt_id,
                    candidates,
                } => {
                    studio_debug!(
                        "StartGeneration attempt_id={} candidates={:?}",
                        attempt_id,
                        candidates
                    );
                    self.engine.generate(attempt_id, candidates);
                }
                Effect::CancelGeneration { attempt_id } => {
                    self.engine.cancel_generation(attempt_id);
                }
                Effect::StartPlayback { attempt_id, path } => {
                    let target = asset_url(&self.asset_base, &path)
                        .map(String::from)
                        .unwrap_or(path);
                    let msg = match self.player.play_muted(&target) {
                        Ok(()) => Msg::PlaybackStarted { attempt_id },
                        Err(err) => {
                            studio_info!("Playback of attempt {} not started: {}", attempt_id, err);
                            Msg::PlaybackBlocked { attempt_id }
                        }
                    };
                    self.send(msg);
                }
                Effect::PublishAsset(asset) => {
                    self.bus.publish(&asset);
                }
                Effect::PersistHistory(entries) => {
                    if let Err(err) = self.store.save_history(&entries) {
                        studio_warn!("Failed to persist chat history: {}", err);
                    }
                }
                Effect::SendChat { messages } => self.engine.send_chat(messages),
                Effect::Authenticate(credentials) => self.engine.authenticate(credentials),
                Effect::ClearAuth => {
                    if let Err(err) = self.store.clear_session() {
                        studio_warn!("Failed to clear auth session: {}", err);
                    }
                }
            }
        }
    }

    fn send(&self, msg: Msg) {
        let _ = self.msg_tx.send(LoopEvent::Msg(msg));
    }
}

/// Forwards engine events into the message loop until either side hangs up.
pub fn spawn_event_pump(events: mpsc::Receiver<EngineEvent>, msg_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        while let Ok(event) = events.recv() {
            if msg_tx.send(LoopEvent::Msg(map_event(event))).is_err() {
                break;
            }
        }
    });
}

/// Records published assets in the library and tells the loop about them.
pub fn spawn_library_writer(bus: &AssetBus, store: LocalStore, msg_tx: mpsc::Sender<LoopEvent>) {
    let published = bus.subscribe();
    thread::spawn(move || {
        while let Ok(asset) = published.recv() {
            if let Err(err) = store.append_library(&asset) {
                studio_warn!("Failed to record {:?} in the library: {}", asset.name, err);
            }
            if msg_tx.send(LoopEvent::Msg(Msg::AssetPublished(asset))).is_err() {
                break;
            }
        }
    });
}

pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress {
            attempt_id,
            progress,
        } => Msg::GenerationProgress {
            attempt_id,
            progress,
        },
        EngineEvent::GenerationFinished {
            attempt_id,
            resolved,
        } => Msg::GenerationFinished {
            attempt_id,
            resolved,
        },
        EngineEvent::ChatReplied(reply) => Msg::ChatReplied(reply),
        EngineEvent::AuthFinished(result) => Msg::AuthFinished(result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use studio_core::{ChatReply, StoredAsset};
    use tempfile::TempDir;

    #[test]
    fn engine_events_map_one_to_one() {
        assert_eq!(
            map_event(EngineEvent::Progress {
                attempt_id: 4,
                progress: 50
            }),
            Msg::GenerationProgress {
                attempt_id: 4,
                progress: 50
            }
        );
        assert_eq!(
            map_event(EngineEvent::ChatReplied(ChatReply::Unreachable)),
            Msg::ChatReplied(ChatReply::Unreachable)
        );
    }

    #[test]
    fn published_assets_reach_library_and_loop() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::new(temp.path());
        let bus = AssetBus::new();
        let (tx, rx) = mpsc::channel();
        spawn_library_writer(&bus, store.clone(), tx);

        let asset = StoredAsset::new("Skeleton.mp4", "/Videos/Skeleton.mp4");
        assert_eq!(bus.publish(&asset), 1);

        let event = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(matches!(event, LoopEvent::Msg(Msg::AssetPublished(ref a)) if *a == asset));
        assert_eq!(store.load_library(), vec![asset]);
    }
}
