use crate::pages::{
    AppShell, HomePage, LoginPage, MyNotesPage, NotesPage, RegistrationPage, UploadPage,
};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    // Every page sits inside the shell (nav bar + message banner). Pages that
    // need a session check it themselves.
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"页面不存在"</div> }>
                <Route path=path!("login") view=move || view! { <AppShell><LoginPage /></AppShell> } />
                <Route path=path!("register") view=move || view! { <AppShell><RegistrationPage /></AppShell> } />
                <Route path=path!("notes") view=move || view! { <AppShell><NotesPage /></AppShell> } />
                <Route path=path!("upload") view=move || view! { <AppShell><UploadPage /></AppShell> } />
                <Route path=path!("my-notes") view=move || view! { <AppShell><MyNotesPage /></AppShell> } />
                <Route path=path!("") view=move || view! { <AppShell><HomePage /></AppShell> } />
            </Routes>
        </Router>
    }
}
