//! Toast notifications for editor commands.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document};
use wordtally_core::actions::NOTICE_DURATION;
use wordtally_core::Notice;

const TOAST_STYLE: &str = "position: fixed; top: 20px; right: 20px; padding: 1rem 1.5rem; \
    color: white; border-radius: 8px; box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15); \
    z-index: 10000; font-weight: 500; display: flex; align-items: center; gap: 0.5rem;";

/// Append a toast for `notice` to the page body and remove it after
/// [`NOTICE_DURATION`].
pub fn show(document: &Document, notice: &Notice) -> Result<(), JsValue> {
    let body = document.body().ok_or("No body")?;
    let toast = document.create_element("div")?;
    toast.set_class_name(notice.kind.css_class());
    toast.set_attribute(
        "style",
        &format!("{TOAST_STYLE} background-color: {};", notice.kind.color()),
    )?;

    let icon = document.create_element("i")?;
    icon.set_class_name(notice.kind.icon());
    toast.append_child(&icon)?;
    toast.append_with_str_1(&format!(" {}", notice.message))?;
    body.append_child(&toast)?;

    let dismiss = Closure::once_into_js(move || toast.remove());
    window()
        .ok_or("No window")?
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            dismiss.unchecked_ref(),
            NOTICE_DURATION.as_millis() as i32,
        )?;
    Ok(())
}

/// Show `notice`, falling back to the console if the page cannot.
pub fn show_or_log(document: &Document, notice: &Notice) {
    if let Err(err) = show(document, notice) {
        web_sys::console::warn_2(&JsValue::from_str(&notice.message), &err);
    }
}
