use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::assets::slot::AssetSlot;
use crate::foundation::error::{PolishError, PolishResult};
use crate::frames::bitmap::SkinSpec;
use crate::frames::browser::BrowserWindowFrame;
use crate::frames::laptop::LaptopFrame;
use crate::frames::phone::PhoneFrame;
use crate::frames::{FrameRenderer, NoFrame};

/// Frame key to renderer lookup table.
///
/// Immutable once handed to a compositor; renderers are shared through `Arc`.
#[derive(Clone)]
pub struct FrameRegistry {
    renderers: BTreeMap<String, Arc<dyn FrameRenderer>>,
    skins: BTreeMap<String, AssetSlot>,
}

impl FrameRegistry {
    /// A registry with no entries, not even `none`.
    pub fn empty() -> Self {
        Self {
            renderers: BTreeMap::new(),
            skins: BTreeMap::new(),
        }
    }

    /// `none`, `browser_window`, `laptop` and `phone`.
    pub fn with_builtins() -> Self {
        let mut reg = Self::empty();
        reg.register("none", Arc::new(NoFrame));
        reg.register("browser_window", Arc::new(BrowserWindowFrame));
        reg.register("laptop", Arc::new(LaptopFrame));
        reg.register("phone", Arc::new(PhoneFrame));
        reg
    }

    /// Insert or replace a renderer, returning the one it displaced.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        renderer: Arc<dyn FrameRenderer>,
    ) -> Option<Arc<dyn FrameRenderer>> {
        let key = key.into();
        self.skins.remove(&key);
        self.renderers.insert(key, renderer)
    }

    /// Register a bitmap skin under its declared name; its asset starts loading immediately.
    pub fn register_skin(&mut self, spec: &SkinSpec) -> PolishResult<()> {
        let frame = spec.load()?;
        let slot = frame.asset().clone();
        tracing::debug!(skin = %spec.name, path = %spec.path.display(), "registered skin");
        self.register(spec.name.clone(), Arc::new(frame));
        self.skins.insert(spec.name.clone(), slot);
        Ok(())
    }

    /// Asset slot of a skin added with [`FrameRegistry::register_skin`].
    pub fn skin_asset(&self, key: &str) -> Option<&AssetSlot> {
        self.skins.get(key)
    }

    pub fn get(&self, key: &str) -> PolishResult<&Arc<dyn FrameRenderer>> {
        self.renderers.get(key).ok_or_else(|| {
            PolishError::invalid_input(format!(
                "unknown frame \"{key}\" (known: {})",
                self.keys().collect::<Vec<_>>().join(", ")
            ))
        })
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.renderers.keys().map(String::as_str)
    }
}

impl Default for FrameRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for FrameRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/registry.rs"]
mod tests;
