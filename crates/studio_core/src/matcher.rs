use serde::{Deserialize, Serialize};

/// A previously generated asset kept in the local library.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoredAsset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "dataURL", default)]
    pub data_url: String,
}

impl StoredAsset {
    pub fn new(name: impl Into<String>, data_url: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            data_url: data_url.into(),
        }
    }

    /// Lower-cased name without its extension; `None` when there is nothing to match on.
    fn match_key(&self) -> Option<String> {
        let name = self.name.as_deref()?;
        let key = strip_extension(name).trim().to_lowercase();
        (!key.is_empty()).then_some(key)
    }
}

/// Removes a trailing `.ext` (no dots or slashes in `ext`).
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() && !name[idx + 1..].contains('/') => &name[..idx],
        _ => name,
    }
}

/// Finds a library asset named in the prompt.
///
/// Pass one looks for the whole base name inside the prompt; pass two accepts
/// an asset when each of its words appears somewhere in the prompt. List
/// order decides between several hits.
pub fn find_local_match<'a>(prompt: &str, assets: &'a [StoredAsset]) -> Option<&'a StoredAsset> {
    if prompt.is_empty() || assets.is_empty() {
        return None;
    }
    let normalized = prompt.to_lowercase();

    let whole_name = assets.iter().find(|asset| {
        asset
            .match_key()
            .is_some_and(|key| normalized.contains(key.as_str()))
    });
    if whole_name.is_some() {
        return whole_name;
    }

    assets.iter().find(|asset| {
        asset.match_key().is_some_and(|key| {
            let mut words = key.split_whitespace().peekable();
            words.peek().is_some() && words.all(|word| normalized.contains(word))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_extension_only_removes_last_segment() {
        assert_eq!(strip_extension("Neon Cityscape.png"), "Neon Cityscape");
        assert_eq!(strip_extension("clip.tar.gz"), "clip.tar");
        assert_eq!(strip_extension("no_extension"), "no_extension");
        assert_eq!(strip_extension("trailing."), "trailing.");
        assert_eq!(strip_extension("dir.v2/file"), "dir.v2/file");
    }
}
