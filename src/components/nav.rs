use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos_router::hooks::use_location;

#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    let location = use_location();
    let active = move || location.pathname.get() == href;

    view! {
        <a
            href=href
            class=move || {
                if active() {
                    "rounded-md px-3 py-1.5 text-sm font-medium bg-accent text-accent-foreground"
                } else {
                    "rounded-md px-3 py-1.5 text-sm text-muted-foreground hover:bg-accent hover:text-accent-foreground"
                }
            }
        >
            {label}
        </a>
    }
}

/// Top bar. Swaps the login/register links for the greeting, "我的笔记"
/// and logout once a session record exists.
#[component]
pub fn NavBar() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let current_user = app_state.0.current_user;

    view! {
        <header class="border-b bg-background">
            <nav class="mx-auto flex w-full max-w-[1080px] flex-wrap items-center justify-between gap-3 px-4 py-3">
                <div class="flex items-center gap-1">
                    <a href="/" class="mr-3 text-base font-semibold text-foreground">"📚 笔记分享"</a>
                    <NavLink href="/" label="首页" />
                    <NavLink href="/notes" label="浏览笔记" />
                    <NavLink href="/upload" label="上传笔记" />
                </div>

                <div class="flex items-center gap-2">
                    <Show
                        when=move || current_user.get().is_some()
                        fallback=|| view! {
                            <NavLink href="/login" label="登录" />
                            <NavLink href="/register" label="注册" />
                        }
                    >
                        <span class="text-sm text-muted-foreground" data-name="Greeting">
                            {move || current_user.get().map(|u| u.greeting()).unwrap_or_default()}
                        </span>
                        <NavLink href="/my-notes" label="我的笔记" />
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:click=move |_| app_state.0.logout()
                        >
                            "退出"
                        </Button>
                    </Show>
                </div>
            </nav>
        </header>
    }
}
