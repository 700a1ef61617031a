use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Number of entries retained; older entries are evicted first.
pub const HISTORY_LIMIT: usize = 30;
const TITLE_MAX_CHARS: usize = 40;
const TITLE_KEEP_CHARS: usize = 37;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub title: String,
    pub time: String,
}

/// Recent prompts, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores persisted entries, dropping anything past the retention cap.
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        let mut entries = VecDeque::from(entries);
        entries.truncate(HISTORY_LIMIT);
        Self { entries }
    }

    pub fn record(&mut self, text: &str, id: u64, time: impl Into<String>) -> &HistoryEntry {
        self.entries.push_front(HistoryEntry {
            id,
            title: history_title(text),
            time: time.into(),
        });
        self.entries.truncate(HISTORY_LIMIT);
        &self.entries[0]
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn history_title(text: &str) -> String {
    if text.is_empty() {
        return "New chat".to_string();
    }
    if text.chars().count() > TITLE_MAX_CHARS {
        let kept: String = text.chars().take(TITLE_KEEP_CHARS).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_titles_are_cut_to_forty_chars() {
        let text = "a".repeat(41);
        let title = history_title(&text);
        assert_eq!(title.chars().count(), 40);
        assert!(title.ends_with("..."));
        assert_eq!(history_title(&"b".repeat(40)), "b".repeat(40));
        assert_eq!(history_title(""), "New chat");
    }
}
