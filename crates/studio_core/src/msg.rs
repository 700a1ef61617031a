use crate::{AttemptId, AuthUser, ChatReply, Credentials, HistoryEntry, StoredAsset};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the video prompt box.
    PromptChanged(String),
    /// User picked one of the fixed suggestions by index.
    SuggestionPicked(usize),
    /// User asked for a video for the current prompt.
    GenerateClicked,
    /// User abandoned the running generation.
    CancelGenerationClicked,
    /// Timer sample for a generation attempt.
    GenerationProgress { attempt_id: AttemptId, progress: u8 },
    /// Timer elapsed and the candidates were probed.
    GenerationFinished {
        attempt_id: AttemptId,
        resolved: Option<String>,
    },
    /// Muted autoplay started.
    PlaybackStarted { attempt_id: AttemptId },
    /// The player refused to start without a user gesture.
    PlaybackBlocked { attempt_id: AttemptId },
    /// User clicked the manual play affordance.
    ResumePlaybackClicked,
    /// User edited the chat input.
    ChatInputChanged(String),
    /// User sent the chat input. The caller supplies the clock.
    ChatSubmitted { entry_id: u64, time_label: String },
    /// Remote chat call finished.
    ChatReplied(ChatReply),
    /// Restore history persisted by a previous run.
    HistoryRestored(Vec<HistoryEntry>),
    /// Restore the stored asset library.
    LibraryLoaded(Vec<StoredAsset>),
    /// A newly generated asset was announced on the asset bus.
    AssetPublished(StoredAsset),
    /// Restore the signed-in user, if any.
    UserRestored(Option<AuthUser>),
    /// User submitted the signup or login form.
    AuthSubmitted(Credentials),
    /// Auth request finished; `Err` holds the message for the form.
    AuthFinished(Result<Option<AuthUser>, String>),
    /// User clicked Logout.
    LogoutClicked,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

