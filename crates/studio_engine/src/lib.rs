//! Studio engine: asset probing, generation timers, remote API and storage IO.
mod auth;
mod bus;
mod chat;
mod driver;
mod engine;
mod playback;
mod probe;
mod store;
mod types;

pub use auth::{
    authenticate_and_store, failure_message, AuthClient, AuthSession, ReqwestAuthClient,
    UNREACHABLE_MESSAGE,
};
pub use bus::AssetBus;
pub use chat::{chat_reply, reply_text, ApiSettings, ChatClient, ReqwestChatClient};
pub use driver::{GenerationDriver, SimulationSettings};
pub use engine::{EngineConfig, EngineError, EngineHandle};
pub use playback::{CommandPlayer, PlaybackError, Player};
pub use probe::{asset_url, resolve_first, AssetProber, ProbeSettings, ReqwestProber};
pub use store::{
    ensure_store_dir, LocalStore, StoreError, AUTH_TOKEN_KEY, AUTH_USER_KEY, HISTORY_KEY,
    LIBRARY_KEY,
};
pub use types::{ApiError, ChannelProgressSink, EngineEvent, ProgressSink};
