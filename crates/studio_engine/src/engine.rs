use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use studio_core::{AttemptId, ChatMessage, Credentials};
use studio_logging::studio_debug;
use thiserror::Error;

use crate::auth::{authenticate_and_store, AuthClient, ReqwestAuthClient};
use crate::chat::{chat_reply, ApiSettings, ChatClient, ReqwestChatClient};
use crate::driver::{GenerationDriver, SimulationSettings};
use crate::probe::{AssetProber, ProbeSettings, ReqwestProber};
use crate::store::LocalStore;
use crate::{ApiError, ChannelProgressSink, EngineEvent, ProgressSink};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub probe: ProbeSettings,
    pub simulation: SimulationSettings,
    pub api: ApiSettings,
    /// Pause before each chat request is sent.
    pub chat_delay: Duration,
    /// Passed verbatim to the chat endpoint.
    pub session_id: String,
    pub store: LocalStore,
}

impl EngineConfig {
    pub fn default_with_store(store: LocalStore) -> Self {
        Self {
            probe: ProbeSettings::default(),
            simulation: SimulationSettings::default(),
            api: ApiSettings::default(),
            chat_delay: Duration::from_millis(600),
            session_id: "default".to_string(),
            store,
        }
    }
}

enum EngineCommand {
    Generate {
        attempt_id: AttemptId,
        candidates: Vec<String>,
    },
    CancelGeneration {
        attempt_id: AttemptId,
    },
    SendChat {
        messages: Vec<ChatMessage>,
    },
    Authenticate(Credentials),
}

struct Services {
    chat: Box<dyn ChatClient>,
    auth: Box<dyn AuthClient>,
    store: LocalStore,
    session_id: String,
    chat_delay: Duration,
}

#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    /// Starts the engine thread and returns the handle plus its event stream.
    pub fn new(config: EngineConfig) -> Result<(Self, mpsc::Receiver<EngineEvent>), EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let prober: Arc<dyn AssetProber> = Arc::new(ReqwestProber::new(config.probe.clone())?);
        let services = Arc::new(Services {
            chat: Box::new(ReqwestChatClient::new(config.api.clone())?),
            auth: Box::new(ReqwestAuthClient::new(config.api.clone())?),
            store: config.store.clone(),
            session_id: config.session_id.clone(),
            chat_delay: config.chat_delay,
        });

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let simulation = config.simulation;

        thread::spawn(move || {
            let sink: Arc<dyn ProgressSink> = Arc::new(ChannelProgressSink::new(event_tx.clone()));
            let mut driver = GenerationDriver::new(runtime.handle().clone(), prober, simulation);
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Generate {
                        attempt_id,
                        candidates,
                    } => driver.start(attempt_id, candidates, sink.clone()),
                    EngineCommand::CancelGeneration { attempt_id } => {
                        driver.cancel_attempt(attempt_id);
                    }
                    request => {
                        let services = services.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            handle_request(services.as_ref(), request, event_tx).await;
                        });
                    }
                }
            }
            studio_debug!("Engine command channel closed");
            drop(driver);
            runtime.shutdown_background();
        });

        Ok((Self { cmd_tx }, event_rx))
    }

    pub fn generate(&self, attempt_id: AttemptId, candidates: Vec<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Generate {
            attempt_id,
            candidates,
        });
    }

    pub fn cancel_generation(&self, attempt_id: AttemptId) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::CancelGeneration { attempt_id });
    }

    pub fn send_chat(&self, messages: Vec<ChatMessage>) {
        let _ = self.cmd_tx.send(EngineCommand::SendChat { messages });
    }

    pub fn authenticate(&self, credentials: Credentials) {
        let _ = self.cmd_tx.send(EngineCommand::Authenticate(credentials));
    }
}

async fn handle_request(
    services: &Services,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::SendChat { messages } => {
            tokio::time::sleep(services.chat_delay).await;
            let result = services.chat.send(&services.session_id, &messages).await;
            let _ = event_tx.send(EngineEvent::ChatReplied(chat_reply(result)));
        }
        EngineCommand::Authenticate(credentials) => {
            let result =
                authenticate_and_store(services.auth.as_ref(), &services.store, &credentials).await;
            let _ = event_tx.send(EngineEvent::AuthFinished(result));
        }
        EngineCommand::Generate { .. } | EngineCommand::CancelGeneration { .. } => {}
    }
}
