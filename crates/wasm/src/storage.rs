use folio_core::ui::PreferenceStore;
use web_sys::{Storage, Window};

/// `window.localStorage`, when the page is allowed to use it.
///
/// Private browsing modes and sandboxed frames can deny access; reads then
/// miss and writes are dropped with a warning.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn from_window(window: &Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            tracing::warn!("localStorage unavailable, preferences will not persist");
        }
        Self { storage }
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(err) = storage.set_item(key, value) {
            tracing::warn!(key, ?err, "failed to persist preference");
        }
    }
}
