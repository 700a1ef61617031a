use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use studio_core::StoredAsset;
use studio_logging::studio_debug;

/// Publish/subscribe channel for newly generated assets.
///
/// Clones share the same subscriber list; subscribers that hung up are
/// dropped on the next publish.
#[derive(Debug, Clone, Default)]
pub struct AssetBus {
    subscribers: Arc<Mutex<Vec<Sender<StoredAsset>>>>,
}

impl AssetBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Receiver<StoredAsset> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }
        rx
    }

    /// Delivers to every live subscriber and returns how many received it.
    pub fn publish(&self, asset: &StoredAsset) -> usize {
        let Ok(mut subscribers) = self.subscribers.lock() else {
            return 0;
        };
        subscribers.retain(|tx| tx.send(asset.clone()).is_ok());
        studio_debug!(
            "Published {:?} to {} subscribers",
            asset.name,
            subscribers.len()
        );
        subscribers.len()
    }
}
