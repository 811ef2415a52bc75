use crate::components::ui::{Alert, AlertDescription, Button, ButtonSize, ButtonVariant};
use crate::flows::FlashKind;
use crate::state::AppContext;
use leptos::prelude::*;

fn kind_class(kind: FlashKind) -> &'static str {
    match kind {
        FlashKind::Success => "border-success/40 bg-success/10 text-success",
        FlashKind::Info => "border-primary/30 bg-primary/5 text-foreground",
        FlashKind::Error => "border-destructive/30 bg-destructive/5 text-destructive",
    }
}

/// The page-wide message banner.
#[component]
pub fn FlashBanner() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    move || {
        app_state.0.flash.get().map(|flash| {
            view! {
                <div class="fixed inset-x-0 top-4 z-50 mx-auto w-full max-w-lg px-4">
                    <Alert class=kind_class(flash.kind) attr:role="alert">
                        <AlertDescription>{flash.text}</AlertDescription>
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Icon
                            class="h-6 w-6 text-current"
                            attr:aria-label="关闭"
                            on:click=move |_| app_state.0.dismiss_flash()
                        >
                            "×"
                        </Button>
                    </Alert>
                </div>
            }
        })
    }
}
