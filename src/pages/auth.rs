use super::{finish_form, use_app_state, FormMessage};
use crate::components::ui::{
    Button, Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle, Input, Label,
    Spinner,
};
use crate::flows::{auth, Flash, FlowState};
use crate::state::go_to;
use crate::storage::LocalSessionStore;
use crate::validation::{LoginForm, RegistrationForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
fn SubmitButton(phase: RwSignal<FlowState>, idle_label: &'static str) -> impl IntoView {
    view! {
        <Button class="w-full" attr:disabled=move || phase.get().is_busy()>
            <span class="inline-flex items-center gap-2">
                <Show when=move || phase.get().is_busy() fallback=|| ().into_view()>
                    <Spinner />
                </Show>
                {move || if phase.get().is_busy() { "处理中..." } else { idle_label }}
            </span>
        </Button>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let username: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let message: RwSignal<Option<Flash>> = RwSignal::new(None);
    let phase: RwSignal<FlowState> = RwSignal::new(FlowState::Idle);

    let app_state = use_app_state();
    if app_state.current_user.get_untracked().is_some() {
        go_to("/");
    }

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if phase.get_untracked().is_busy() {
            return;
        }

        let form = LoginForm {
            username: username.get_untracked(),
            password: password.get_untracked(),
        };
        let api_client = app_state.api_client.get_untracked();
        message.set(None);

        spawn_local(async move {
            let outcome = auth::login(&api_client, &LocalSessionStore, &form, move |p| phase.set(p)).await;
            if let Some(session) = outcome.payload.clone() {
                app_state.current_user.set(Some(session));
            }
            finish_form(message, &outcome);
        });
    };

    view! {
        <div class="mx-auto w-full max-w-md">
            <Card>
                <CardHeader>
                    <CardTitle class="text-xl">"用户登录"</CardTitle>
                    <CardDescription>"登录后可以上传和管理自己的笔记"</CardDescription>
                </CardHeader>

                <CardContent>
                    <form class="flex flex-col gap-4" on:submit=on_submit>
                        <div class="flex flex-col gap-2">
                            <Label html_for="username">"用户名"</Label>
                            <Input id="username" placeholder="请输入用户名" autocomplete="username" bind_value=username />
                        </div>

                        <div class="flex flex-col gap-2">
                            <Label html_for="password">"密码"</Label>
                            <Input
                                id="password"
                                r#type="password"
                                placeholder="请输入密码"
                                autocomplete="current-password"
                                bind_value=password
                            />
                        </div>

                        <FormMessage message=message />
                        <SubmitButton phase=phase idle_label="登录" />
                    </form>
                </CardContent>

                <CardFooter>
                    <div class="text-xs text-muted-foreground">
                        "还没有账号？"
                        <a class="text-primary underline underline-offset-4" href="/register">"立即注册"</a>
                    </div>
                </CardFooter>
            </Card>
        </div>
    }
}

#[component]
pub fn RegistrationPage() -> impl IntoView {
    let username: RwSignal<String> = RwSignal::new(String::new());
    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let confirm_password: RwSignal<String> = RwSignal::new(String::new());
    let message: RwSignal<Option<Flash>> = RwSignal::new(None);
    let phase: RwSignal<FlowState> = RwSignal::new(FlowState::Idle);

    let app_state = use_app_state();
    if app_state.current_user.get_untracked().is_some() {
        go_to("/");
    }

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if phase.get_untracked().is_busy() {
            return;
        }

        let form = RegistrationForm {
            username: username.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        let api_client = app_state.api_client.get_untracked();
        message.set(None);

        spawn_local(async move {
            let outcome = auth::register(&api_client, &form, move |p| phase.set(p)).await;
            finish_form(message, &outcome);
        });
    };

    view! {
        <div class="mx-auto w-full max-w-md">
            <Card>
                <CardHeader>
                    <CardTitle class="text-xl">"用户注册"</CardTitle>
                    <CardDescription>"注册账号，开始分享你的课程笔记"</CardDescription>
                </CardHeader>

                <CardContent>
                    <form class="flex flex-col gap-4" on:submit=on_submit>
                        <div class="flex flex-col gap-2">
                            <Label html_for="username" required=true>"用户名"</Label>
                            <Input id="username" placeholder="3-20个字符" autocomplete="username" bind_value=username />
                        </div>

                        <div class="flex flex-col gap-2">
                            <Label html_for="email" required=true>"邮箱"</Label>
                            <Input
                                id="email"
                                r#type="email"
                                placeholder="you@example.com"
                                autocomplete="email"
                                bind_value=email
                            />
                        </div>

                        <div class="flex flex-col gap-2">
                            <Label html_for="password" required=true>"密码"</Label>
                            <Input
                                id="password"
                                r#type="password"
                                placeholder="至少6位"
                                autocomplete="new-password"
                                bind_value=password
                            />
                        </div>

                        <div class="flex flex-col gap-2">
                            <Label html_for="confirm_password" required=true>"确认密码"</Label>
                            <Input
                                id="confirm_password"
                                r#type="password"
                                placeholder="再次输入密码"
                                autocomplete="new-password"
                                bind_value=confirm_password
                            />
                        </div>

                        <FormMessage message=message />
                        <SubmitButton phase=phase idle_label="注册" />
                    </form>
                </CardContent>

                <CardFooter>
                    <div class="text-xs text-muted-foreground">
                        "已有账号？"
                        <a class="text-primary underline underline-offset-4" href="/login">"去登录"</a>
                    </div>
                </CardFooter>
            </Card>
        </div>
    }
}
