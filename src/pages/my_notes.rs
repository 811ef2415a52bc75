use super::{apply_action, download_callback, use_app_state};
use crate::browser;
use crate::components::note_card::NoteCard;
use crate::components::ui::{CardGrid, Spinner, StatTile};
use crate::flows::actions::{self, share_flash, share_url, DownloadTexts};
use crate::flows::listing::{fetch_my_notes, Listing, NoteStats};
use crate::util::now_local;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
fn Stat(label: &'static str, #[prop(into)] value: Signal<String>) -> impl IntoView {
    view! {
        <StatTile>
            <span class="text-2xl font-semibold">{move || value.get()}</span>
            <span class="text-xs text-muted-foreground">{label}</span>
        </StatTile>
    }
}

#[component]
pub fn MyNotesPage() -> impl IntoView {
    let app_state = use_app_state();
    if !app_state.require_session("请先登录查看我的笔记") {
        return ().into_any();
    }

    let listing: RwSignal<Listing> = RwSignal::new(Listing::default());
    let loading: RwSignal<bool> = RwSignal::new(false);

    // Stats come from the same fetch as the cards.
    let stats = Memo::new(move |_| NoteStats::compute(&listing.get().notes, now_local()));

    let load = move || {
        let api_client = app_state.api_client.get_untracked();
        loading.set(true);
        spawn_local(async move {
            let result = fetch_my_notes(&api_client).await;
            if let Some(flash) = result.flash.clone() {
                app_state.show_flash(flash);
            }
            listing.set(result);
            loading.set(false);
        });
    };

    load();

    let refresh = Callback::new(move |_| load());
    let on_download = download_callback(app_state, DownloadTexts::Owner, refresh);

    let on_delete = Callback::new(move |note_id: i64| {
        let api_client = app_state.api_client.get_untracked();
        spawn_local(async move {
            let outcome = actions::delete_note(&api_client, note_id, browser::confirm, |flash| {
                app_state.show_flash(flash)
            })
            .await;
            apply_action(app_state, outcome, refresh);
        });
    });

    let on_share = Callback::new(move |note_id: i64| {
        let url = share_url(&browser::origin(), note_id);
        spawn_local(async move {
            let copied = match browser::copy_to_clipboard(&url).await {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("clipboard write failed: {e}");
                    false
                }
            };
            app_state.show_flash(share_flash(copied));
        });
    });

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div class="space-y-1">
                    <h1 class="text-xl font-semibold">"我的笔记"</h1>
                    <p class="text-xs text-muted-foreground">"管理你上传的笔记"</p>
                </div>
                <Show when=move || loading.get() fallback=|| ().into_view()>
                    <Spinner />
                </Show>
            </div>

            <div class="grid grid-cols-2 gap-3 md:grid-cols-4">
                <Stat label="总笔记数" value=Signal::derive(move || stats.get().total_notes.to_string()) />
                <Stat label="总下载次数" value=Signal::derive(move || stats.get().total_downloads.to_string()) />
                <Stat label="最近7天上传" value=Signal::derive(move || stats.get().recent_uploads.to_string()) />
                <Stat label="最热门课程" value=Signal::derive(move || stats.get().top_course) />
            </div>

            <Show
                when=move || !listing.get().notes.is_empty()
                fallback=move || view! {
                    <div class="rounded-md border border-dashed p-8 text-center text-sm text-muted-foreground">
                        {move || if loading.get() {
                            view! { "加载中..." }.into_any()
                        } else {
                            view! {
                                "你还没有上传任何笔记，"
                                <a class="text-primary underline underline-offset-4" href="/upload">"去上传"</a>
                            }
                            .into_any()
                        }}
                    </div>
                }
            >
                <CardGrid>
                    {move || {
                        listing
                            .get()
                            .notes
                            .into_iter()
                            .map(|note| view! {
                                <NoteCard note=note on_download=on_download on_delete=on_delete on_share=on_share />
                            })
                            .collect_view()
                    }}
                </CardGrid>
            </Show>
        </div>
    }
    .into_any()
}
