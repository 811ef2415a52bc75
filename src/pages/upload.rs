use super::{finish_form, use_app_state, FormMessage};
use crate::browser;
use crate::components::ui::{
    Button, Card, CardContent, CardDescription, CardHeader, CardTitle, FileInput, Input, Label,
    NativeSelect, Spinner, Textarea,
};
use crate::flows::upload::{load_course_options, submit_upload};
use crate::flows::{Flash, FlowState};
use crate::models::Course;
use crate::util::format_file_size;
use crate::validation::{PickedFile, UploadForm};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

const ACCEPTED_TYPES: &str = ".pdf,.jpg,.jpeg,.png,.gif";

#[component]
pub fn UploadPage() -> impl IntoView {
    let app_state = use_app_state();
    if !app_state.require_session("请先登录后再上传笔记") {
        return ().into_any();
    }

    let title: RwSignal<String> = RwSignal::new(String::new());
    let description: RwSignal<String> = RwSignal::new(String::new());
    let course_id: RwSignal<String> = RwSignal::new(String::new());
    let courses: RwSignal<Vec<Course>> = RwSignal::new(vec![]);
    let picked: RwSignal<Option<PickedFile>> = RwSignal::new(None);
    let message: RwSignal<Option<Flash>> = RwSignal::new(None);
    let phase: RwSignal<FlowState> = RwSignal::new(FlowState::Idle);
    let file_ref: NodeRef<html::Input> = NodeRef::new();

    spawn_local(async move {
        match load_course_options(&app_state.api_client.get_untracked()).await {
            Ok(list) => courses.set(list),
            Err(flash) => app_state.show_flash(flash),
        }
    });

    let on_file_change = Callback::new(move |_| {
        let file = file_ref
            .get_untracked()
            .and_then(|input| browser::picked_file(&input))
            .map(|(_, info)| info);
        picked.set(file);
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if phase.get_untracked().is_busy() {
            return;
        }

        let selected = file_ref
            .get_untracked()
            .and_then(|input| browser::picked_file(&input));
        let (file, info) = match selected {
            Some((file, info)) => (Some(file), Some(info)),
            None => (None, None),
        };
        let form = UploadForm {
            title: title.get_untracked(),
            description: description.get_untracked(),
            course_id: course_id.get_untracked(),
            file: info,
        };
        let api_client = app_state.api_client.get_untracked();
        message.set(None);

        spawn_local(async move {
            let outcome = submit_upload(&api_client, &form, move |p| phase.set(p), |_| async move {
                match file {
                    Some(file) => browser::read_file(&file).await,
                    None => Err("no file selected".to_string()),
                }
            })
            .await;
            if let Some(Some(id)) = outcome.payload {
                log::info!("uploaded note {id}");
            }
            finish_form(message, &outcome);
        });
    };

    let course_options = Signal::derive(move || {
        courses
            .get()
            .into_iter()
            .map(|c| (c.id.to_string(), c.name))
            .collect::<Vec<_>>()
    });

    view! {
        <div class="mx-auto w-full max-w-2xl">
            <Card>
                <CardHeader>
                    <CardTitle class="text-xl">"上传笔记"</CardTitle>
                    <CardDescription>"支持 PDF 和图片格式（JPG、PNG、GIF），文件不超过10MB"</CardDescription>
                </CardHeader>

                <CardContent>
                    <form class="flex flex-col gap-4" on:submit=on_submit>
                        <div class="flex flex-col gap-2">
                            <Label html_for="title" required=true>"笔记标题"</Label>
                            <Input id="title" placeholder="例如：高等数学第三章笔记" bind_value=title />
                        </div>

                        <div class="flex flex-col gap-2">
                            <Label html_for="course" required=true>"所属课程"</Label>
                            <NativeSelect
                                id="course"
                                placeholder="请选择课程..."
                                options=course_options
                                bind_value=course_id
                            />
                        </div>

                        <div class="flex flex-col gap-2">
                            <Label html_for="description">"笔记描述"</Label>
                            <Textarea id="description" placeholder="简要介绍笔记内容（可选）" bind_value=description />
                        </div>

                        <div class="flex flex-col gap-2">
                            <Label html_for="file" required=true>"选择文件"</Label>
                            <FileInput id="file" accept=ACCEPTED_TYPES node_ref=file_ref on_change=on_file_change />
                            {move || picked.get().map(|f| view! {
                                <p class="text-xs text-muted-foreground">
                                    {format!("已选择：{}（{}）", f.name, format_file_size(f.size))}
                                </p>
                            })}
                        </div>

                        <FormMessage message=message />

                        <Button class="w-full" attr:disabled=move || phase.get().is_busy()>
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || phase.get().is_busy() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || if phase.get().is_busy() { "上传中..." } else { "上传笔记" }}
                            </span>
                        </Button>
                    </form>
                </CardContent>
            </Card>
        </div>
    }
    .into_any()
}
