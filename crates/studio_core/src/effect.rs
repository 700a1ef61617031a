use crate::{AttemptId, CandidateId, ChatMessage, Credentials, HistoryEntry, StoredAsset};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Arm the progress timer; probing follows when it elapses.
    StartGeneration {
        attempt_id: AttemptId,
        candidates: Vec<CandidateId>,
    },
    /// Disarm the timer of a superseded or abandoned attempt.
    CancelGeneration { attempt_id: AttemptId },
    /// Try muted autoplay of a resolved asset.
    StartPlayback { attempt_id: AttemptId, path: String },
    /// Announce a newly generated asset to subscribers.
    PublishAsset(StoredAsset),
    PersistHistory(Vec<HistoryEntry>),
    /// Send the whole conversation to the remote chat endpoint.
    SendChat { messages: Vec<ChatMessage> },
    Authenticate(Credentials),
    ClearAuth,
}
