use super::input::FIELD_CLASS;
use leptos::prelude::*;
use tw_merge::tw_merge;

/// Plain `<select>` over `(value, label)` pairs. The empty value is the
/// `placeholder` entry.
#[component]
pub fn NativeSelect(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] id: String,
    #[prop(into)] placeholder: String,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(into)] bind_value: RwSignal<String>,
    #[prop(optional)] on_change: Option<Callback<String>>,
) -> impl IntoView {
    let merged_class = tw_merge!(FIELD_CLASS, "h-9 pr-8", class);

    view! {
        <select
            data-name="NativeSelect"
            class=merged_class
            id=id.clone()
            name=id
            prop:value=move || bind_value.get()
            on:change=move |ev| {
                let value = event_target_value(&ev);
                bind_value.set(value.clone());
                if let Some(cb) = on_change {
                    cb.run(value);
                }
            }
        >
            <option value="">{placeholder}</option>
            {move || {
                options
                    .get()
                    .into_iter()
                    .map(|(value, label)| {
                        let selected = bind_value.get_untracked() == value;
                        view! { <option value=value selected=selected>{label}</option> }
                    })
                    .collect_view()
            }}
        </select>
    }
}
