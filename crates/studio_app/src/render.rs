//! Turns successive view models into terminal lines, printing only what changed.

use studio_core::{AppViewModel, GenerationPhase, HistoryEntry, MessageView, Role, TextBlock};

/// Progress is printed in steps of this many percent.
const PROGRESS_STEP: u8 = 10;

#[derive(Debug, Default)]
pub struct Renderer {
    last: Option<AppViewModel>,
    last_progress_step: Option<u8>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, view: &AppViewModel) -> Vec<String> {
        let mut lines = Vec::new();
        let previous = self.last.take().unwrap_or_default();
        let first = previous.messages.is_empty() && previous.display_name.is_empty();

        if first || previous.display_name != view.display_name {
            match &view.user_email {
                Some(email) => lines.push(format!("Signed in as {} <{}>", view.display_name, email)),
                None => lines.push(format!("Signed in as {}", view.display_name)),
            }
        }
        if view.auth_pending && !previous.auth_pending {
            lines.push("Contacting the server...".to_string());
        }
        if view.auth_error != previous.auth_error {
            if let Some(error) = &view.auth_error {
                lines.push(format!("Auth error: {error}"));
            }
        }

        if view.prompt != previous.prompt && !view.prompt.is_empty() {
            lines.push(format!("Prompt: {}", view.prompt));
        }
        self.render_generator(&previous, view, &mut lines);

        for message in view.messages.iter().skip(previous.messages.len()) {
            lines.extend(message_lines(message));
        }
        if view.chat_loading && !previous.chat_loading {
            lines.push("assistant is typing...".to_string());
        }

        if view.now_playing != previous.now_playing {
            if let Some(url) = &view.now_playing {
                lines.push(format!("Now playing: {url}"));
            }
        }
        if view.status_line != previous.status_line {
            if let Some(status) = &view.status_line {
                lines.push(status.clone());
            }
        }

        self.last = Some(view.clone());
        lines
    }

    fn render_generator(
        &mut self,
        previous: &AppViewModel,
        view: &AppViewModel,
        lines: &mut Vec<String>,
    ) {
        let before = &previous.generator;
        let now = &view.generator;

        if now.phase == GenerationPhase::Generating && before.phase != GenerationPhase::Generating {
            self.last_progress_step = None;
            lines.push("Generating...".to_string());
        }
        if now.show_progress {
            let step = now.progress / PROGRESS_STEP;
            if self.last_progress_step != Some(step) {
                self.last_progress_step = Some(step);
                lines.push(format!("  {}", progress_bar(now.progress)));
            }
        }

        let finished_now = now.phase != before.phase
            || now.video_path != before.video_path
            || now.error != before.error;
        if finished_now {
            match now.phase {
                GenerationPhase::Resolved => {
                    lines.push(format!("  {}", progress_bar(now.progress)));
                    if let Some(path) = &now.video_path {
                        lines.push(format!("Video ready: {path}"));
                    }
                }
                GenerationPhase::Failed => {
                    if let Some(error) = &now.error {
                        lines.push(format!("Error: {error}"));
                    }
                }
                GenerationPhase::Idle if before.phase == GenerationPhase::Generating => {
                    lines.push("Generation cancelled.".to_string());
                }
                GenerationPhase::Idle | GenerationPhase::Generating => {}
            }
            if let Some(caption) = &now.caption {
                lines.push(caption.clone());
            }
        }

        if now.autoplay_blocked && !before.autoplay_blocked {
            lines.push("Autoplay was blocked. Type /resume to play.".to_string());
        }
    }
}

pub fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress.min(100)) / 5;
    format!("[{}{}] {:>3}%", "#".repeat(filled), ".".repeat(20 - filled), progress)
}

pub fn message_lines(message: &MessageView) -> Vec<String> {
    let speaker = match message.role {
        Role::User => "you",
        Role::Assistant => "assistant",
    };
    let mut body = Vec::new();
    for (index, block) in message.blocks.iter().enumerate() {
        if index > 0 {
            body.push(String::new());
        }
        match block {
            TextBlock::Lines(lines) => body.extend(lines.iter().cloned()),
            TextBlock::Bullets(items) => body.extend(items.iter().map(|item| format!("  • {item}"))),
            TextBlock::Numbered(items) => body.extend(
                items
                    .iter()
                    .map(|(label, item)| format!("  {label}. {item}")),
            ),
        }
    }
    if let Some(url) = &message.video_url {
        body.push(format!("  [video] {url}"));
    }

    let mut lines = Vec::with_capacity(body.len());
    let mut body = body.into_iter();
    lines.push(format!("{speaker}: {}", body.next().unwrap_or_default()));
    lines.extend(body.map(|line| format!("    {line}")));
    lines
}

pub fn history_lines(entries: &[HistoryEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["No chats yet.".to_string()];
    }
    entries
        .iter()
        .map(|entry| format!("{}  {}", entry.time, entry.title))
        .collect()
}

pub fn suggestion_lines(suggestions: &[String]) -> Vec<String> {
    suggestions
        .iter()
        .enumerate()
        .map(|(index, suggestion)| format!("  {:>2}. {suggestion}", index + 1))
        .collect()
}
