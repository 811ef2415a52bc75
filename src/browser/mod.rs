//! Thin wrappers over browser APIs the pages need.

use crate::flows::upload::FileContents;
use crate::validation::PickedFile;
use leptos::prelude::{document, window};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// Name and size of the file currently selected in `input`.
pub(crate) fn picked_file(input: &web_sys::HtmlInputElement) -> Option<(web_sys::File, PickedFile)> {
    let file = input.files()?.get(0)?;
    let picked = PickedFile {
        name: file.name(),
        size: file.size() as u64,
    };
    Some((file, picked))
}

pub(crate) async fn read_file(file: &web_sys::File) -> Result<FileContents, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{e:?}"))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let mime = Some(file.type_()).filter(|m| !m.is_empty());
    Ok((bytes, mime))
}

/// Saves `bytes` through a temporary object URL and a synthetic `<a download>`.
pub(crate) fn save_bytes(bytes: &[u8], file_name: &str) -> Result<(), String> {
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let blob = web_sys::Blob::new_with_u8_array_sequence(&parts).map_err(|e| format!("{e:?}"))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| format!("{e:?}"))?;

    let result = (|| -> Result<(), String> {
        let anchor: web_sys::HtmlAnchorElement = document()
            .create_element("a")
            .map_err(|e| format!("{e:?}"))?
            .dyn_into()
            .map_err(|_| "not an anchor element".to_string())?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        let _ = anchor.style().set_property("display", "none");

        let body = document().body().ok_or("document has no body")?;
        body.append_child(&anchor).map_err(|e| format!("{e:?}"))?;
        anchor.click();
        let _ = body.remove_child(&anchor);
        Ok(())
    })();

    let _ = web_sys::Url::revoke_object_url(&url);
    result
}

pub(crate) async fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let clipboard = window().navigator().clipboard();
    JsFuture::from(clipboard.write_text(text))
        .await
        .map_err(|e| format!("{e:?}"))?;
    Ok(())
}

/// Blocking `window.confirm`; a failing call counts as "no".
pub(crate) fn confirm(text: &str) -> bool {
    window().confirm_with_message(text).unwrap_or(false)
}

pub(crate) fn origin() -> String {
    window().location().origin().unwrap_or_default()
}

pub(crate) fn scroll_into_view(dom_id: &str) {
    if let Some(el) = document().get_element_by_id(dom_id) {
        el.scroll_into_view();
    }
}
