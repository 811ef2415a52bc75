mod auth;
mod home;
mod my_notes;
mod notes;
mod upload;

pub use auth::{LoginPage, RegistrationPage};
pub use home::HomePage;
pub use my_notes::MyNotesPage;
pub use notes::NotesPage;
pub use upload::UploadPage;

use crate::browser;
use crate::components::flash::FlashBanner;
use crate::components::nav::NavBar;
use crate::components::ui::{Alert, AlertDescription};
use crate::flows::actions::{self, ActionOutcome, DownloadTexts};
use crate::flows::{Flash, FlashKind, FormOutcome};
use crate::models::Note;
use crate::state::{after_ms, go_to, AppContext, AppState};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn AppShell(children: ChildrenFn) -> impl IntoView {
    // Store children so the view macro sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    view! {
        <div class="min-h-screen bg-background">
            <NavBar />
            <FlashBanner />
            <main class="mx-auto w-full max-w-[1080px] px-4 py-8">
                {move || children.with_value(|c| c())}
            </main>
        </div>
    }
}

/// Result line under a form.
#[component]
fn FormMessage(message: RwSignal<Option<Flash>>) -> impl IntoView {
    move || {
        message.get().map(|flash| {
            let class = match flash.kind {
                FlashKind::Error => "border-destructive/30 text-destructive",
                FlashKind::Success => "border-success/40 text-success",
                FlashKind::Info => "",
            };
            view! {
                <Alert class=class>
                    <AlertDescription>{flash.text}</AlertDescription>
                </Alert>
            }
        })
    }
}

/// Shows the outcome under the form and schedules its redirect.
fn finish_form<T>(message: RwSignal<Option<Flash>>, outcome: &FormOutcome<T>) {
    message.set(Some(outcome.flash.clone()));
    if let Some(redirect) = outcome.redirect {
        after_ms(redirect.delay_ms, move || go_to(redirect.path));
    }
}

fn apply_action(state: AppState, outcome: ActionOutcome, refresh: Callback<()>) {
    match outcome {
        ActionOutcome::Cancelled => {}
        ActionOutcome::Done {
            flash,
            refresh_after_ms,
        } => {
            state.show_flash(flash);
            after_ms(refresh_after_ms, move || refresh.run(()));
        }
        ActionOutcome::Failed(flash) => state.show_flash(flash),
    }
}

/// Download handler for note cards; `refresh` reloads whatever list the
/// card came from so the new download count shows up.
fn download_callback(state: AppState, texts: DownloadTexts, refresh: Callback<()>) -> Callback<Note> {
    Callback::new(move |note: Note| {
        state.show_flash(Flash::info(actions::DOWNLOAD_STARTING));
        let api_client = state.api_client.get_untracked();
        spawn_local(async move {
            let outcome = match actions::download_note(&api_client, note.id, texts).await {
                Ok(bytes) => match browser::save_bytes(&bytes, &note.file_name) {
                    Ok(()) => actions::download_started(&note.file_name, texts),
                    Err(e) => {
                        log::error!("saving {} failed: {e}", note.file_name);
                        ActionOutcome::Failed(Flash::error(texts.failed()))
                    }
                },
                Err(flash) => ActionOutcome::Failed(flash),
            };
            apply_action(state, outcome, refresh);
        });
    })
}

fn use_app_state() -> AppState {
    expect_context::<AppContext>().0
}
