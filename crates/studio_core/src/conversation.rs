use serde::{Deserialize, Serialize};

pub const GREETING: &str = "Hi — I'm your assistant. Ask me anything!";
pub const NO_RESPONSE: &str = "No response";
pub const SERVER_ERROR_REPLY: &str = "⚠️ Server error contacting chat API.";
pub const UNREACHABLE_REPLY: &str = "⚠️ Error contacting server.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    #[serde(rename = "videoUrl", default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            video_url: None,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            video_url: None,
        }
    }
}

/// Result of one remote chat round trip, already reduced to what the user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    Text(String),
    ServerError,
    Unreachable,
}

impl ChatReply {
    pub fn into_text(self) -> String {
        match self {
            ChatReply::Text(text) => text,
            ChatReply::ServerError => SERVER_ERROR_REPLY.to_string(),
            ChatReply::Unreachable => UNREACHABLE_REPLY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    loading: bool,
}

impl Default for Conversation {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
            loading: false,
        }
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

/// Display structure of a message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextBlock {
    Lines(Vec<String>),
    Bullets(Vec<String>),
    Numbered(Vec<(String, String)>),
}

/// Splits message text into paragraphs (two or more newlines) and detects
/// paragraphs that are entirely bullet or numbered lists.
pub fn text_blocks(raw: &str) -> Vec<TextBlock> {
    let text = raw.replace('\r', "");
    split_paragraphs(&text)
        .into_iter()
        .map(|para| {
            let lines: Vec<&str> = para.split('\n').map(str::trim).collect();
            if lines.iter().all(|line| bullet_body(line).is_some()) {
                TextBlock::Bullets(
                    lines
                        .iter()
                        .filter_map(|line| bullet_body(line))
                        .map(|body| body.trim().to_string())
                        .collect(),
                )
            } else if lines.iter().all(|line| numbered_body(line).is_some()) {
                TextBlock::Numbered(
                    lines
                        .iter()
                        .filter_map(|line| numbered_body(line))
                        .map(|(label, body)| (label.to_string(), body.trim().to_string()))
                        .collect(),
                )
            } else {
                TextBlock::Lines(para.split('\n').map(ToOwned::to_owned).collect())
            }
        })
        .collect()
}

fn split_paragraphs(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut paragraphs = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\n' {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < bytes.len() && bytes[i] == b'\n' {
            i += 1;
        }
        if i - run_start >= 2 {
            paragraphs.push(&text[start..run_start]);
            start = i;
        }
    }
    paragraphs.push(&text[start..]);
    paragraphs
}

fn bullet_body(line: &str) -> Option<&str> {
    let rest = line
        .strip_prefix('*')
        .or_else(|| line.strip_prefix('-'))
        .or_else(|| line.strip_prefix('\u{2022}'))?;
    let body = rest.trim_start();
    (body.len() < rest.len()).then_some(body)
}

fn numbered_body(line: &str) -> Option<(&str, &str)> {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    let body = rest.trim_start();
    (body.len() < rest.len()).then_some((&line[..digits], body))
}
