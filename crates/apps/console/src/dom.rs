//! Deferred DOM focus, scroll, and theme-class helpers.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

/// Runs `f` after the current render pass so freshly appended nodes exist.
#[cfg(target_arch = "wasm32")]
fn defer(f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(f);
    let _ =
        window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0);
}

#[cfg(target_arch = "wasm32")]
fn element_by_id(id: &str) -> Option<web_sys::Element> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(id))
}

pub(crate) fn focus_element_by_id(id: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(element) = element_by_id(id) else {
            return;
        };
        let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() else {
            return;
        };
        defer(move || {
            let _ = element.focus();
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = id;
}

pub(crate) fn scroll_to_end_by_id(id: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let id = id.to_string();
        defer(move || {
            if let Some(element) = element_by_id(&id) {
                element.set_scroll_top(element.scroll_height());
            }
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = id;
}

/// Toggles the `dark` class on the document root element.
pub(crate) fn apply_dark_class(dark: bool) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(root) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.document_element())
        else {
            return;
        };
        if let Err(err) = root.class_list().toggle_with_force("dark", dark) {
            leptos::logging::warn!("theme class toggle failed: {err:?}");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = dark;
}
