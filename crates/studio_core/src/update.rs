use studio_logging::{studio_debug, studio_info};

use crate::{
    find_local_match, strip_extension, AppState, AttemptId, ChatMessage, Effect, History,
    Msg, StoredAsset, SUGGESTIONS,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PromptChanged(text) => {
            if state.prompt != text {
                state.prompt = text;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SuggestionPicked(index) => {
            if let Some(suggestion) = SUGGESTIONS.get(index) {
                state.prompt = suggestion.to_string();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::GenerateClicked => start_generation(&mut state),
        Msg::CancelGenerationClicked => match state.generator.cancel() {
            Some(attempt_id) => {
                state.mark_dirty();
                vec![Effect::CancelGeneration { attempt_id }]
            }
            None => Vec::new(),
        },
        Msg::GenerationProgress {
            attempt_id,
            progress,
        } => {
            if state.generator.apply_progress(attempt_id, progress) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::GenerationFinished {
            attempt_id,
            resolved,
        } => finish_generation(&mut state, attempt_id, resolved),
        Msg::PlaybackStarted { attempt_id } => {
            if state.generator.set_autoplay_blocked(attempt_id, false) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PlaybackBlocked { attempt_id } => {
            if state.generator.set_autoplay_blocked(attempt_id, true) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ResumePlaybackClicked => match state.generator.current() {
            Some(attempt) if attempt.autoplay_blocked => match attempt.resolved() {
                Some(asset) => vec![Effect::StartPlayback {
                    attempt_id: attempt.id,
                    path: asset.path.clone(),
                }],
                None => Vec::new(),
            },
            _ => Vec::new(),
        },
        Msg::ChatInputChanged(text) => {
            if state.chat_input != text {
                state.chat_input = text;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ChatSubmitted {
            entry_id,
            time_label,
        } => submit_chat(&mut state, entry_id, time_label),
        Msg::ChatReplied(reply) => {
            state.conversation.push(ChatMessage::assistant(reply.into_text()));
            state.conversation.set_loading(false);
            state.mark_dirty();
            Vec::new()
        }
        Msg::HistoryRestored(entries) => {
            state.history = History::from_entries(entries);
            state.mark_dirty();
            Vec::new()
        }
        Msg::LibraryLoaded(assets) => {
            state.library = assets;
            Vec::new()
        }
        Msg::AssetPublished(asset) => {
            if !state.library.contains(&asset) {
                state.library.push(asset);
            }
            Vec::new()
        }
        Msg::UserRestored(user) => {
            state.auth.user = user;
            state.mark_dirty();
            Vec::new()
        }
        Msg::AuthSubmitted(credentials) => {
            if state.auth.pending || !credentials.is_complete() {
                return (state, Vec::new());
            }
            state.auth.pending = true;
            state.auth.error = None;
            state.mark_dirty();
            vec![Effect::Authenticate(credentials)]
        }
        Msg::AuthFinished(result) => {
            state.auth.pending = false;
            match result {
                Ok(user) => {
                    if user.is_some() {
                        state.auth.user = user;
                    }
                    state.auth.error = None;
                }
                Err(message) => state.auth.error = Some(message),
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::LogoutClicked => {
            state.auth.user = None;
            state.mark_dirty();
            vec![Effect::ClearAuth]
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn start_generation(state: &mut AppState) -> Vec<Effect> {
    if state.prompt.trim().is_empty() {
        return Vec::new();
    }
    let prompt = state.prompt.clone();
    let started = state.generator.start(&prompt);
    state.mark_dirty();

    match started {
        Ok(started) => {
            let mut effects = cancel_superseded(started.superseded);
            effects.push(Effect::StartGeneration {
                attempt_id: started.id,
                candidates: started.candidates,
            });
            effects
        }
        Err(rejected) => {
            studio_debug!("Generation not started: {}", rejected.error);
            cancel_superseded(rejected.superseded)
        }
    }
}

fn cancel_superseded(superseded: Option<AttemptId>) -> Vec<Effect> {
    superseded
        .map(|attempt_id| Effect::CancelGeneration { attempt_id })
        .into_iter()
        .collect()
}

fn finish_generation(
    state: &mut AppState,
    attempt_id: AttemptId,
    resolved: Option<String>,
) -> Vec<Effect> {
    let Some(attempt) = state.generator.complete(attempt_id, resolved) else {
        studio_debug!("Ignoring completion for stale attempt {}", attempt_id);
        return Vec::new();
    };
    let effects = match attempt.resolved() {
        Some(asset) => vec![
            Effect::StartPlayback {
                attempt_id,
                path: asset.path.clone(),
            },
            Effect::PublishAsset(StoredAsset::new(asset.published_name(), asset.path.clone())),
        ],
        None => Vec::new(),
    };
    state.mark_dirty();
    effects
}

fn submit_chat(state: &mut AppState, entry_id: u64, time_label: String) -> Vec<Effect> {
    if state.conversation.is_loading() {
        return Vec::new();
    }
    let text = state.chat_input.trim().to_string();
    if text.is_empty() {
        return Vec::new();
    }

    state.history.record(&text, entry_id, time_label);
    let mut effects = vec![Effect::PersistHistory(state.history.to_vec())];
    state.chat_input.clear();
    state.mark_dirty();

    if let Some(asset) = find_local_match(&text, &state.library) {
        let name = asset.name.clone().unwrap_or_default();
        studio_info!("Chat prompt matched library asset {:?}", name);
        state.conversation.push(ChatMessage::user(text));
        state.conversation.push(ChatMessage {
            video_url: Some(asset.data_url.clone()),
            ..ChatMessage::assistant(format!("Showing \"{}\" video.", strip_extension(&name)))
        });
        state.now_playing = Some(asset.data_url.clone());
        state.status_line = Some(format!("Loaded from local storage: {name}"));
        return effects;
    }

    state.conversation.push(ChatMessage::user(text));
    state.conversation.set_loading(true);
    effects.push(Effect::SendChat {
        messages: state.conversation.messages().to_vec(),
    });
    effects
}
