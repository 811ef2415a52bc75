use super::{download_callback, use_app_state};
use crate::api::NoteQuery;
use crate::components::note_card::NoteCard;
use crate::components::ui::{CardGrid, Spinner};
use crate::flows::actions::DownloadTexts;
use crate::flows::listing::{fetch_notes, Listing};
use leptos::prelude::*;
use leptos::task::spawn_local;

const LINK_PRIMARY: &str = "inline-flex h-9 items-center rounded-md bg-primary px-4 text-sm font-medium text-primary-foreground shadow-xs hover:bg-primary/90";
const LINK_OUTLINE: &str = "inline-flex h-9 items-center rounded-md border bg-border/30 px-4 text-sm font-medium shadow-xs hover:bg-border/50";

#[component]
pub fn HomePage() -> impl IntoView {
    let app_state = use_app_state();
    let listing: RwSignal<Listing> = RwSignal::new(Listing::default());
    let loading: RwSignal<bool> = RwSignal::new(false);

    let load_recent = move || {
        let api_client = app_state.api_client.get_untracked();
        loading.set(true);
        spawn_local(async move {
            let result = fetch_notes(&api_client, &NoteQuery::Recent(NoteQuery::RECENT_LIMIT)).await;
            if let Some(flash) = result.flash.clone() {
                app_state.show_flash(flash);
            }
            listing.set(result);
            loading.set(false);
        });
    };

    load_recent();

    let on_download = download_callback(app_state, DownloadTexts::Browse, Callback::new(move |_| load_recent()));

    view! {
        <section class="mb-8 space-y-3 rounded-xl border bg-card px-6 py-8">
            <h1 class="text-2xl font-semibold">"课程笔记分享平台"</h1>
            <p class="text-sm text-muted-foreground">"上传、搜索、下载同学们整理的课程笔记"</p>
            <div class="flex flex-wrap gap-2">
                <a href="/notes" class=LINK_PRIMARY>"浏览笔记"</a>
                <a href="/upload" class=LINK_OUTLINE>"上传笔记"</a>
            </div>
        </section>

        <section class="space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-lg font-semibold">"最新笔记"</h2>
                <span class="inline-flex items-center gap-2 text-xs text-muted-foreground">
                    <Show when=move || loading.get() fallback=|| ().into_view()>
                        <Spinner />
                    </Show>
                    {move || listing.get().summary}
                </span>
            </div>

            <Show
                when=move || !listing.get().notes.is_empty()
                fallback=move || view! {
                    <div class="rounded-md border border-dashed p-8 text-center text-sm text-muted-foreground">
                        {move || if loading.get() { "加载中..." } else { "暂无最新笔记" }}
                    </div>
                }
            >
                <CardGrid>
                    {move || {
                        listing
                            .get()
                            .notes
                            .into_iter()
                            .map(|note| view! { <NoteCard note=note on_download=on_download /> })
                            .collect_view()
                    }}
                </CardGrid>
            </Show>
        </section>
    }
}
