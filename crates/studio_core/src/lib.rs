//! Studio core: pure state machine, prompt classification and matching.
mod auth;
mod classify;
mod conversation;
mod effect;
mod generation;
mod history;
mod matcher;
mod msg;
mod state;
mod update;
mod view_model;

pub use auth::{AuthState, AuthUser, Credentials, GUEST_NAME};
pub use classify::{
    classify, normalize_prompt, CandidateId, Emit, KeywordRule, Trigger, FALLBACK_RULES, RULES,
    SUGGESTIONS, VIDEO_DIR, VIDEO_EXT,
};
pub use conversation::{
    text_blocks, ChatMessage, ChatReply, Conversation, Role, TextBlock, GREETING, NO_RESPONSE,
    SERVER_ERROR_REPLY, UNREACHABLE_REPLY,
};
pub use effect::Effect;
pub use generation::{
    asset_display_name, eased_progress, AttemptId, GenerationAttempt, GenerationError,
    GenerationPhase, Generator, Outcome, RejectedAttempt, ResolvedAsset, StartedAttempt,
    DIAGNOSTIC_CANDIDATE_LIMIT, NO_MATCH_CAPTION, PROGRESS_COMPLETE, PROGRESS_PENDING_MAX,
};
pub use history::{history_title, History, HistoryEntry, HISTORY_LIMIT};
pub use matcher::{find_local_match, strip_extension, StoredAsset};
pub use msg::Msg;
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, GeneratorView, MessageView};
