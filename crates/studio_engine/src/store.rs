//! Directory-backed key/value store standing in for browser local storage.
//!
//! Each key lives in `{dir}/{key}.json`. Reads never fail: a missing or
//! malformed value is reported as absent.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use studio_core::{AuthUser, HistoryEntry, StoredAsset, HISTORY_LIMIT};
use studio_logging::studio_warn;
use tempfile::NamedTempFile;
use thiserror::Error;

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const AUTH_USER_KEY: &str = "authUser";
pub const HISTORY_KEY: &str = "chat_history";
pub const LIBRARY_KEY: &str = "vp_videos";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage directory missing or not writable: {0}")]
    Dir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Ensure the storage directory exists; create if missing.
pub fn ensure_store_dir(dir: &Path) -> Result<(), StoreError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| StoreError::Dir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(StoreError::Dir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| StoreError::Dir(e.to_string()))?;
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn get_raw(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                studio_warn!("Failed to read {:?}: {}", path, err);
                None
            }
        }
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                studio_warn!("Ignoring malformed value under {}: {}", key, err);
                None
            }
        }
    }

    /// Atomically replaces the value by writing a temp file then renaming.
    pub fn set_raw(&self, key: &str, content: &str) -> Result<(), StoreError> {
        ensure_store_dir(&self.dir)?;

        let target = self.path_for(key);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }

    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let content = serde_json::to_string(value)?;
        self.set_raw(key, &content)
    }

    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn load_history(&self) -> Vec<HistoryEntry> {
        let mut entries: Vec<HistoryEntry> = self.get_json(HISTORY_KEY).unwrap_or_default();
        entries.truncate(HISTORY_LIMIT);
        entries
    }

    pub fn save_history(&self, entries: &[HistoryEntry]) -> Result<(), StoreError> {
        let capped = &entries[..entries.len().min(HISTORY_LIMIT)];
        self.set_json(HISTORY_KEY, capped)
    }

    /// Stored assets; entries that are not objects are skipped.
    pub fn load_library(&self) -> Vec<StoredAsset> {
        let Some(Value::Array(items)) = self.get_json::<Value>(LIBRARY_KEY) else {
            return Vec::new();
        };
        items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()
    }

    pub fn append_library(&self, asset: &StoredAsset) -> Result<(), StoreError> {
        let mut assets = self.load_library();
        if assets.contains(asset) {
            return Ok(());
        }
        assets.push(asset.clone());
        self.set_json(LIBRARY_KEY, &assets)
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.get_json(AUTH_USER_KEY)
    }

    pub fn auth_token(&self) -> Option<String> {
        self.get_raw(AUTH_TOKEN_KEY)
    }

    pub fn save_session(&self, token: Option<&str>, user: Option<&AuthUser>) -> Result<(), StoreError> {
        if let Some(token) = token {
            self.set_raw(AUTH_TOKEN_KEY, token)?;
        }
        if let Some(user) = user {
            self.set_json(AUTH_USER_KEY, user)?;
        }
        Ok(())
    }

    pub fn clear_session(&self) -> Result<(), StoreError> {
        self.remove(AUTH_TOKEN_KEY)?;
        self.remove(AUTH_USER_KEY)
    }
}
