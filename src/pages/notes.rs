use super::{download_callback, use_app_state};
use crate::api::NoteQuery;
use crate::browser;
use crate::components::hooks::use_debounce;
use crate::components::note_card::{card_dom_id, NoteCard};
use crate::components::ui::{Button, ButtonVariant, CardGrid, Input, NativeSelect, Spinner};
use crate::flows::listing::{
    course_after_query, fetch_notes, live_search_query, Listing, SEARCH_DEBOUNCE_MS,
};
use crate::flows::actions::DownloadTexts;
use crate::flows::upload::load_course_options;
use crate::flows::Generation;
use crate::models::Course;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::request_animation_frame;
use leptos_router::hooks::use_query_map;

#[component]
pub fn NotesPage() -> impl IntoView {
    let app_state = use_app_state();
    let query = use_query_map();

    // Target of a share link.
    let highlight = move || query.get().get("note").and_then(|v| v.parse::<i64>().ok());

    let courses: RwSignal<Vec<Course>> = RwSignal::new(vec![]);
    let keyword: RwSignal<String> = RwSignal::new(String::new());
    let course_id: RwSignal<String> = RwSignal::new(String::new());
    let listing: RwSignal<Listing> = RwSignal::new(Listing::default());
    let loading: RwSignal<bool> = RwSignal::new(false);
    let current: RwSignal<NoteQuery> = RwSignal::new(NoteQuery::All);

    // Responses to superseded requests are dropped.
    let request_id: RwSignal<Generation> = RwSignal::new(Generation::default());

    let selected_course = move || course_id.get_untracked().parse::<i64>().ok();

    let load = move |q: NoteQuery| {
        let api_client = app_state.api_client.get_untracked();
        let id = request_id.get_untracked().next();
        request_id.set(id);
        current.set(q.clone());
        loading.set(true);

        spawn_local(async move {
            let result = fetch_notes(&api_client, &q).await;
            if !id.is_current(request_id.get_untracked()) {
                return;
            }
            if let Some(flash) = result.flash.clone() {
                app_state.show_flash(flash);
            }
            let scroll_to = highlight_untracked(query)
                .filter(|target| result.notes.iter().any(|n| n.id == *target));
            listing.set(result);
            loading.set(false);

            if let Some(target) = scroll_to {
                request_animation_frame(move || browser::scroll_into_view(&card_dom_id(target)));
            }
        });
    };

    spawn_local(async move {
        match load_course_options(&app_state.api_client.get_untracked()).await {
            Ok(list) => courses.set(list),
            Err(flash) => log::warn!("course filter unavailable: {}", flash.text),
        }
    });
    load(NoteQuery::All);

    // Keyword searches drop the course filter.
    let run_query = move |q: NoteQuery| {
        if course_after_query(&q, selected_course()).is_none() {
            course_id.set(String::new());
        }
        load(q);
    };

    let on_search = move || {
        run_query(NoteQuery::from_filters(&keyword.get_untracked(), selected_course()));
    };

    let live_search = use_debounce(SEARCH_DEBOUNCE_MS, move |value: String| {
        if let Some(q) = live_search_query(&value, selected_course()) {
            run_query(q);
        }
    });

    let on_course_change = Callback::new(move |_: String| {
        keyword.set(String::new());
        load(NoteQuery::from_filters("", selected_course()));
    });

    let on_recent = move |_: web_sys::MouseEvent| {
        keyword.set(String::new());
        course_id.set(String::new());
        load(NoteQuery::Recent(NoteQuery::RECENT_LIMIT));
    };

    let course_options = Signal::derive(move || {
        courses
            .get()
            .into_iter()
            .map(|c| (c.id.to_string(), c.name))
            .collect::<Vec<_>>()
    });

    let on_download = download_callback(
        app_state,
        DownloadTexts::Browse,
        Callback::new(move |_| load(current.get_untracked())),
    );

    view! {
        <div class="space-y-6">
            <div class="space-y-1">
                <h1 class="text-xl font-semibold">"浏览笔记"</h1>
                <p class="text-xs text-muted-foreground">"按课程筛选或输入关键词搜索"</p>
            </div>

            <div class="flex flex-col gap-2 sm:flex-row sm:items-center">
                <form
                    class="flex flex-1 flex-col gap-2 sm:flex-row sm:items-center"
                    on:submit=move |ev: web_sys::SubmitEvent| {
                        ev.prevent_default();
                        on_search();
                    }
                >
                    <Input
                        id="keyword"
                        r#type="search"
                        placeholder="搜索笔记标题、描述..."
                        bind_value=keyword
                        class="sm:flex-1"
                        on:input=move |ev: web_sys::Event| live_search(event_target_value(&ev))
                    />
                    <NativeSelect
                        id="course"
                        class="sm:w-48"
                        placeholder="所有课程"
                        options=course_options
                        bind_value=course_id
                        on_change=on_course_change
                    />
                    <Button>"搜索"</Button>
                </form>
                <Button variant=ButtonVariant::Outline on:click=on_recent>
                    "最新笔记"
                </Button>
            </div>

            <div class="inline-flex items-center gap-2 text-xs text-muted-foreground">
                <Show when=move || loading.get() fallback=|| ().into_view()>
                    <Spinner />
                </Show>
                {move || listing.get().summary}
            </div>

            <Show
                when=move || !listing.get().notes.is_empty()
                fallback=move || view! {
                    <div class="rounded-md border border-dashed p-8 text-center text-sm text-muted-foreground">
                        {move || if loading.get() { "加载中...".to_string() } else { empty_text(&listing.get()) }}
                    </div>
                }
            >
                <CardGrid>
                    {move || {
                        let target = highlight();
                        listing
                            .get()
                            .notes
                            .into_iter()
                            .map(|note| {
                                let highlighted = Some(note.id) == target;
                                view! { <NoteCard note=note highlighted=highlighted on_download=on_download /> }
                            })
                            .collect_view()
                    }}
                </CardGrid>
            </Show>
        </div>
    }
}

fn highlight_untracked(query: Memo<leptos_router::params::ParamsMap>) -> Option<i64> {
    query
        .get_untracked()
        .get("note")
        .and_then(|v| v.parse::<i64>().ok())
}

/// Empty-state text; falls back to the generic one when the summary is a
/// failure line.
fn empty_text(listing: &Listing) -> String {
    if listing.summary.is_empty() || listing.flash.is_some() {
        "暂无笔记".to_string()
    } else {
        listing.summary.clone()
    }
}
