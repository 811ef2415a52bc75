use crate::models::UserSession;
use std::cell::RefCell;

/// Local storage key of the login record.
pub(crate) const SESSION_KEY: &str = "user";

/// Where the login record lives.
///
/// Pages use [`LocalSessionStore`]; tests inject [`MemorySessionStore`].
pub(crate) trait SessionStore {
    fn read_raw(&self) -> Option<String>;
    fn write_raw(&self, json: &str);
    fn clear(&self);

    /// A record that no longer parses is removed and reported as absent.
    fn load(&self) -> Option<UserSession> {
        let json = self.read_raw()?;
        match serde_json::from_str(&json) {
            Ok(session) => Some(session),
            Err(e) => {
                log::warn!("dropping unreadable session record: {e}");
                self.clear();
                None
            }
        }
    }

    fn save(&self, session: &UserSession) {
        match serde_json::to_string(session) {
            Ok(json) => self.write_raw(&json),
            Err(e) => log::error!("failed to serialize session: {e}"),
        }
    }
}

/// `window.localStorage`, silently a no-op when storage is unavailable.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalSessionStore;

impl LocalSessionStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl SessionStore for LocalSessionStore {
    fn read_raw(&self) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(SESSION_KEY).ok().flatten())
    }

    fn write_raw(&self, json: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(SESSION_KEY, json);
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(SESSION_KEY);
        }
    }
}

#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Default)]
pub(crate) struct MemorySessionStore {
    value: RefCell<Option<String>>,
}

impl MemorySessionStore {
    pub fn with_raw(json: &str) -> Self {
        Self {
            value: RefCell::new(Some(json.to_string())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn read_raw(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    fn write_raw(&self, json: &str) {
        *self.value.borrow_mut() = Some(json.to_string());
    }

    fn clear(&self) {
        *self.value.borrow_mut() = None;
    }
}


// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_session_store_roundtrip() {
        let store = LocalSessionStore;
        store.clear();
        assert!(store.load().is_none());

        store.write_raw(r#"{"username":"u","id":1}"#);
        let loaded = store.load().expect("should load session from localStorage");
        assert_eq!(loaded.username, "u");

        store.clear();
        assert!(store.read_raw().is_none());
    }
}
