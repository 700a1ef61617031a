use studio_core::{AttemptId, AuthUser, ChatReply};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Eased progress sample for a running attempt, always below 100.
    Progress { attempt_id: AttemptId, progress: u8 },
    /// The synthetic duration elapsed and probing finished.
    GenerationFinished {
        attempt_id: AttemptId,
        resolved: Option<String>,
    },
    ChatReplied(ChatReply),
    /// `Err` carries the message shown on the auth form.
    AuthFinished(Result<Option<AuthUser>, String>),
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Failure talking to the chat or auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("http status {code}")]
    Status { code: u16, message: Option<String> },
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}
