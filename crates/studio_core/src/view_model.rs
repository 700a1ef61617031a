use crate::{GenerationPhase, HistoryEntry, Role, TextBlock};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneratorView {
    pub phase: GenerationPhase,
    pub progress: u8,
    pub show_progress: bool,
    pub caption: Option<String>,
    pub error: Option<String>,
    pub video_path: Option<String>,
    pub autoplay_blocked: bool,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub role: Role,
    pub blocks: Vec<TextBlock>,
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub display_name: String,
    pub user_email: Option<String>,
    pub auth_pending: bool,
    pub auth_error: Option<String>,
    pub prompt: String,
    pub generator: GeneratorView,
    pub chat_input: String,
    pub messages: Vec<MessageView>,
    pub chat_loading: bool,
    pub history: Vec<HistoryEntry>,
    pub now_playing: Option<String>,
    pub status_line: Option<String>,
    pub dirty: bool,
}
