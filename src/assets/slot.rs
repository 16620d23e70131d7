use std::path::PathBuf;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::assets::SourceImage;
use crate::foundation::error::{PolishError, PolishResult};

type SlotState = Result<Arc<SourceImage>, String>;

#[derive(Default)]
struct Shared {
    state: Mutex<Option<SlotState>>,
    settled: Condvar,
}

/// One-shot, shareable holder for a decorative asset that loads in the background.
///
/// Readers never block: until the load settles, [`AssetSlot::get`] reports
/// [`PolishError::AssetUnavailable`], which frame renderers propagate and the compositor turns
/// into a skipped phase.
#[derive(Clone)]
pub struct AssetSlot {
    label: Arc<str>,
    shared: Arc<Shared>,
}

impl AssetSlot {
    /// Empty slot, to be filled later with [`AssetSlot::fill`].
    pub fn pending(label: impl Into<Arc<str>>) -> Self {
        Self {
            label: label.into(),
            shared: Arc::default(),
        }
    }

    /// Slot that is ready immediately.
    pub fn ready(label: impl Into<Arc<str>>, image: SourceImage) -> Self {
        let slot = Self::pending(label);
        slot.fill(Ok(image));
        slot
    }

    /// Start decoding `path` on the rayon pool and return the (still pending) slot.
    pub fn load_in_background(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let slot = Self::pending(path.display().to_string());
        slot.spawn_load(path);
        slot
    }

    /// Decode `path` on the rayon pool and settle this slot with the result.
    pub fn spawn_load(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let filler = self.clone();
        rayon::spawn(move || {
            let result = SourceImage::from_path(&path);
            match &result {
                Ok(img) => tracing::debug!(
                    asset = %filler.label,
                    width = img.width(),
                    height = img.height(),
                    "skin asset loaded"
                ),
                Err(e) => tracing::warn!(asset = %filler.label, error = %e, "skin asset failed to load"),
            }
            filler.fill(result);
        });
    }

    /// Settle the slot. Returns `false` if it was already settled.
    pub fn fill(&self, result: PolishResult<SourceImage>) -> bool {
        let mut state = self.lock();
        if state.is_some() {
            return false;
        }
        *state = Some(result.map(Arc::new).map_err(|e| e.to_string()));
        self.shared.settled.notify_all();
        true
    }

    /// `true` once the load finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        self.lock().is_some()
    }

    /// Block until the slot settles or `timeout` elapses. Returns [`AssetSlot::is_settled`].
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (state, _) = self
            .shared
            .settled
            .wait_timeout_while(self.lock(), timeout, |s| s.is_none())
            .unwrap_or_else(PoisonError::into_inner);
        state.is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<SlotState>> {
        // The state is written once under the lock, so a poisoned guard is still consistent.
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The loaded image, or `AssetUnavailable` while pending or after a failed load.
    pub fn get(&self) -> PolishResult<Arc<SourceImage>> {
        match &*self.lock() {
            None => Err(PolishError::asset_unavailable(format!(
                "'{}' is still loading",
                self.label
            ))),
            Some(Ok(img)) => Ok(Arc::clone(img)),
            Some(Err(e)) => Err(PolishError::asset_unavailable(format!(
                "'{}' failed to load: {e}",
                self.label
            ))),
        }
    }
}

impl std::fmt::Debug for AssetSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &*self.lock() {
            None => "pending",
            Some(Ok(_)) => "ready",
            Some(Err(_)) => "failed",
        };
        f.debug_struct("AssetSlot")
            .field("label", &self.label)
            .field("state", &state)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/slot.rs"]
mod tests;
