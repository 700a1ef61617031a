use crate::view_model::{AppViewModel, GeneratorView, MessageView};
use crate::{
    text_blocks, AuthState, Conversation, GenerationPhase, Generator, History, StoredAsset,
    NO_MATCH_CAPTION, SUGGESTIONS,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) prompt: String,
    pub(crate) generator: Generator,
    pub(crate) chat_input: String,
    pub(crate) conversation: Conversation,
    pub(crate) history: History,
    pub(crate) library: Vec<StoredAsset>,
    /// Asset shown in the dashboard preview, e.g. a library hit.
    pub(crate) now_playing: Option<String>,
    pub(crate) status_line: Option<String>,
    pub(crate) auth: AuthState,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn library(&self) -> &[StoredAsset] {
        &self.library
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            display_name: self.auth.display_name().to_string(),
            user_email: self.auth.user.as_ref().and_then(|u| u.email.clone()),
            auth_pending: self.auth.pending,
            auth_error: self.auth.error.clone(),
            prompt: self.prompt.clone(),
            generator: self.generator_view(),
            chat_input: self.chat_input.clone(),
            messages: self
                .conversation
                .messages()
                .iter()
                .map(|message| MessageView {
                    role: message.role,
                    blocks: text_blocks(&message.text),
                    video_url: message.video_url.clone(),
                })
                .collect(),
            chat_loading: self.conversation.is_loading(),
            history: self.history.to_vec(),
            now_playing: self.now_playing.clone(),
            status_line: self.status_line.clone(),
            dirty: self.dirty,
        }
    }

    fn generator_view(&self) -> GeneratorView {
        let phase = self.generator.phase();
        let attempt = self.generator.current();
        let resolved = attempt.and_then(|a| a.resolved());
        GeneratorView {
            phase,
            progress: attempt.map_or(0, |a| a.progress),
            show_progress: phase == GenerationPhase::Generating,
            caption: match phase {
                GenerationPhase::Resolved => resolved.map(|asset| asset.caption.clone()),
                GenerationPhase::Failed if attempt.is_some_and(|a| a.candidates.is_empty()) => {
                    Some(NO_MATCH_CAPTION.to_string())
                }
                _ => None,
            },
            error: attempt.and_then(|a| a.error()).map(ToString::to_string),
            video_path: resolved.map(|asset| asset.path.clone()),
            autoplay_blocked: attempt.is_some_and(|a| a.autoplay_blocked),
            suggestions: SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
