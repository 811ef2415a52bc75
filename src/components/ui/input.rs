use leptos::html;
use leptos::prelude::*;
use tw_merge::tw_merge;

pub(crate) const FIELD_CLASS: &str = "placeholder:text-muted-foreground selection:bg-primary selection:text-primary-foreground border-input flex w-full min-w-0 rounded-md border bg-transparent px-3 py-1 text-base shadow-xs transition-[color,box-shadow] outline-none disabled:pointer-events-none disabled:cursor-not-allowed disabled:opacity-50 md:text-sm focus-visible:border-ring focus-visible:ring-ring/50 focus-visible:ring-2";

#[component]
pub fn Input(
    #[prop(into, optional)] class: String,
    #[prop(into, default = "text")] r#type: &'static str,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] id: String,
    #[prop(into, optional)] autocomplete: String,
    #[prop(optional)] required: bool,

    // Wired by hand with `prop:value` + `on:input` rather than `bind:value`.
    #[prop(into)] bind_value: RwSignal<String>,

    #[prop(optional)] node_ref: NodeRef<html::Input>,
) -> impl IntoView {
    let merged_class = tw_merge!(FIELD_CLASS, "h-9", class);

    view! {
        <input
            data-name="Input"
            type=r#type
            class=merged_class
            placeholder=placeholder
            id=id.clone()
            name=id
            autocomplete=autocomplete
            required=required
            prop:value=move || bind_value.get()
            on:input=move |ev| bind_value.set(event_target_value(&ev))
            node_ref=node_ref
        />
    }
}

/// File picker. The selected `File` is read through `node_ref`.
#[component]
pub fn FileInput(
    #[prop(into, optional)] id: String,
    #[prop(into, optional)] accept: String,
    node_ref: NodeRef<html::Input>,
    #[prop(optional)] on_change: Option<Callback<()>>,
) -> impl IntoView {
    let class = tw_merge!(
        FIELD_CLASS,
        "h-auto py-2 file:mr-3 file:rounded-md file:border-0 file:bg-secondary file:px-3 file:py-1 file:text-sm file:font-medium"
    );

    view! {
        <input
            data-name="FileInput"
            type="file"
            class=class
            id=id.clone()
            name=id
            accept=accept
            node_ref=node_ref
            on:change=move |_| {
                if let Some(cb) = on_change {
                    cb.run(());
                }
            }
        />
    }
}
