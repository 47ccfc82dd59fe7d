//! Browser bridge for the portfolio page.
//!
//! Mounts every page behavior once the document is parsed and applies the
//! [`folio_protocol::DomCommand`]s produced by `folio-core` to the live DOM.

use std::cell::RefCell;

use folio_core::EffectsConfig;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

mod backdrop;
mod dom;
mod hero;
mod logging;
mod nav;
mod observe;
mod page;
mod reveal;
mod runtime;
mod scroll;
mod storage;
mod styles;
mod widgets;

use page::PageSession;

/// Id of the optional `<script type="application/json">` holding config
/// overrides.
pub const CONFIG_SCRIPT_ID: &str = "folio-config";

thread_local! {
    static SESSION: RefCell<Option<PageSession>> = const { RefCell::new(None) };
}

/// Auto-run entry point. Mounts now, or on `DOMContentLoaded` while the
/// document is still loading.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    use wasm_bindgen::JsCast;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() != "loading" {
        return mount(window, markup_config(&document));
    }
    let ready_document = document.clone();
    let on_ready = Closure::once_into_js(move || {
        let config = markup_config(&ready_document);
        if let Err(err) = mount(window, config) {
            web_sys::console::error_2(&JsValue::from_str("folio: mount failed"), &err);
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
}

/// Remount the page with a JSON config override. Unspecified fields keep
/// their defaults.
#[wasm_bindgen]
pub fn start_with_config(json: &str) -> Result<(), JsError> {
    let config = EffectsConfig::from_json(json).map_err(|e| JsError::new(&e.to_string()))?;
    let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
    mount(window, config).map_err(|err| JsError::new(&format!("mount failed: {err:?}")))
}

/// Remove every listener, observer and loop, restore the hero text and
/// drop the injected nodes.
#[wasm_bindgen]
pub fn teardown() {
    // Take first so the session drops outside the borrow.
    let session = SESSION.with(|slot| slot.borrow_mut().take());
    drop(session);
}

/// The built-in configuration as pretty JSON, a template for overrides.
#[wasm_bindgen]
pub fn default_config() -> Result<String, JsError> {
    serde_json::to_string_pretty(&EffectsConfig::default()).map_err(|e| JsError::new(&e.to_string()))
}

fn mount(window: Window, config: EffectsConfig) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init();

    teardown();
    let session = PageSession::mount(window, config)?;
    SESSION.with(|slot| *slot.borrow_mut() = Some(session));
    Ok(())
}

/// Overrides embedded in the markup. A missing script means defaults; an
/// invalid one is reported and ignored.
pub fn markup_config(document: &Document) -> EffectsConfig {
    let Some(json) = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content())
    else {
        return EffectsConfig::default();
    };
    match EffectsConfig::from_json(&json) {
        Ok(config) => config,
        Err(err) => {
            logging::init();
            tracing::warn!(%err, "ignoring invalid page config");
            EffectsConfig::default()
        }
    }
}
