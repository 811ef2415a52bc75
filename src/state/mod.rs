use crate::api::ApiClient;
use crate::flows::auth;
use crate::flows::{Flash, Generation};
use crate::models::UserSession;
use crate::storage::{LocalSessionStore, SessionStore};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::set_timeout;
use std::time::Duration;

pub(crate) const FLASH_DISMISS_MS: u64 = 3000;

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,
    pub current_user: RwSignal<Option<UserSession>>,

    /// The one visible banner message, if any.
    pub flash: RwSignal<Option<Flash>>,
    /// Bumped on every new message so a stale dismiss timer leaves a newer
    /// message alone.
    flash_seq: RwSignal<Generation>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            api_client: RwSignal::new(ApiClient::from_env()),
            current_user: RwSignal::new(LocalSessionStore.load()),
            flash: RwSignal::new(None),
            flash_seq: RwSignal::new(Generation::default()),
        }
    }

    /// Replaces the current banner and dismisses it after three seconds.
    pub fn show_flash(&self, flash: Flash) {
        let seq = self.flash_seq.get_untracked().next();
        self.flash_seq.set(seq);
        self.flash.set(Some(flash));

        let flash_sig = self.flash;
        let seq_sig = self.flash_seq;
        set_timeout(
            move || {
                if seq.is_current(seq_sig.get_untracked()) {
                    flash_sig.set(None);
                }
            },
            Duration::from_millis(FLASH_DISMISS_MS),
        );
    }

    pub fn dismiss_flash(&self) {
        self.flash.set(None);
    }

    pub fn logout(&self) {
        self.current_user.set(None);
        let api_client = self.api_client.get_untracked();
        spawn_local(async move {
            auth::logout(&api_client, &LocalSessionStore).await;
            let _ = window().location().set_href("/login");
        });
    }

    /// Sends a visitor without a session to `/login` after a blocking alert.
    /// Returns whether the page may render.
    pub fn require_session(&self, alert_text: &str) -> bool {
        if self.current_user.get_untracked().is_some() {
            return true;
        }
        let _ = window().alert_with_message(alert_text);
        let _ = window().location().set_href("/login");
        false
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);

/// Runs `f` after `delay_ms`.
pub(crate) fn after_ms(delay_ms: u32, f: impl FnOnce() + 'static) {
    set_timeout(f, Duration::from_millis(u64::from(delay_ms)));
}

/// Full page navigation, like following a link.
pub(crate) fn go_to(path: &str) {
    let _ = window().location().set_href(path);
}
