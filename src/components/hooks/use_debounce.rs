use leptos::prelude::*;
use leptos_dom::helpers::{set_timeout_with_handle, TimeoutHandle};
use std::time::Duration;

/// Returns a trigger that runs `f(value)` once no new value has arrived for
/// `delay_ms`. Each call replaces the pending timer.
pub fn use_debounce<T>(delay_ms: u64, f: impl Fn(T) + Clone + 'static) -> impl Fn(T) + Clone + 'static
where
    T: 'static,
{
    let pending: StoredValue<Option<TimeoutHandle>> = StoredValue::new(None);

    move |value: T| {
        if let Some(handle) = pending.get_value() {
            handle.clear();
        }
        let f = f.clone();
        match set_timeout_with_handle(move || f(value), Duration::from_millis(delay_ms)) {
            Ok(handle) => pending.set_value(Some(handle)),
            Err(e) => log::warn!("debounce timer not scheduled: {e:?}"),
        }
    }
}
