use crate::components::ui::{Button, ButtonSize, ButtonVariant, Card, CardContent, CardFooter, CardHeader, CardTitle};
use crate::flows::listing::UNCATEGORIZED;
use crate::models::Note;
use crate::util::{description_html, file_type_badge, format_file_size, format_timestamp, DownloadHeat};
use leptos::prelude::*;
use tw_merge::tw_merge;

pub(crate) fn card_dom_id(note_id: i64) -> String {
    format!("note-{note_id}")
}

/// One note. `on_delete`/`on_share` are only given on the owner's page,
/// which also switches the download line to the owner's wording.
#[component]
pub(crate) fn NoteCard(
    note: Note,
    #[prop(optional)] highlighted: bool,
    on_download: Callback<Note>,
    #[prop(optional)] on_delete: Option<Callback<i64>>,
    #[prop(optional)] on_share: Option<Callback<i64>>,
) -> impl IntoView {
    let owned = on_delete.is_some();
    let heat = DownloadHeat::from_count(note.download_count);
    let class = tw_merge!(
        "h-full gap-3 py-4 transition-shadow hover:shadow-md",
        if highlighted { "ring-2 ring-primary" } else { "" }
    );

    let heat_class = tw_merge!("rounded-full px-2 py-0.5", heat.class());
    let id = note.id;
    let downloads = note.download_count;
    let course = note.course_name.clone().unwrap_or_else(|| UNCATEGORIZED.to_string());
    let uploader = note.uploader_name.clone().unwrap_or_else(|| "匿名".to_string());
    let created = format_timestamp(note.created_at());
    let size = format_file_size(note.file_size);
    let badge = file_type_badge(note.file_kind());
    let description = description_html(note.description.as_deref());
    let title = note.title.clone();

    view! {
        <Card class=class attr:id=card_dom_id(id)>
            <CardHeader class="w-full px-4">
                <div class="flex w-full items-center justify-between gap-2 text-xs">
                    <span class="rounded-full bg-secondary px-2 py-0.5 font-medium">{badge}</span>
                    <span class=heat_class title=heat.title()>
                        {heat.icon()}
                    </span>
                </div>
                <CardTitle class="text-base leading-snug">{title}</CardTitle>
            </CardHeader>

            <CardContent class="flex flex-1 flex-col gap-2 px-4">
                <p class="line-clamp-3 text-sm text-muted-foreground" inner_html=description></p>
                <ul class="grid grid-cols-2 gap-1 text-xs text-muted-foreground">
                    <li>"📚 " {course}</li>
                    <li>"👤 " {uploader}</li>
                    <li>"🕒 " {created}</li>
                    <li>"📦 " {size}</li>
                </ul>
                <div class="text-xs text-muted-foreground">
                    {if !owned {
                        format!("⬇️ {downloads} 次下载")
                    } else if downloads > 0 {
                        format!("已下载 {downloads} 次")
                    } else {
                        "等待下载".to_string()
                    }}
                </div>
            </CardContent>

            <CardFooter class="px-4">
                <Button size=ButtonSize::Sm on:click=move |_| on_download.run(note.clone())>
                    "下载"
                </Button>
                {on_share.map(|cb| view! {
                    <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=move |_| cb.run(id)>
                        "分享"
                    </Button>
                })}
                {on_delete.map(|cb| view! {
                    <Button variant=ButtonVariant::Destructive size=ButtonSize::Sm on:click=move |_| cb.run(id)>
                        "删除"
                    </Button>
                })}
            </CardFooter>
        </Card>
    }
}
