use std::cell::RefCell;
use std::rc::Rc;

use folio_core::ui::NavMenu;
use folio_core::ui::nav::anchor_target;
use wasm_bindgen::prelude::*;
use web_sys::{Document, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::dom;
use crate::page::Page;
use crate::runtime::EventListener;

/// Mobile drawer toggle, drawer close on link click, and smooth in-page
/// anchors.
pub fn install(page: &Page, listeners: &mut Vec<EventListener>) -> Result<(), JsValue> {
    let menu = Rc::new(RefCell::new(NavMenu::default()));

    if let Some(toggle) = dom::query(&page.document, "#nav-toggle") {
        let menu = Rc::clone(&menu);
        let elements = Rc::clone(&page.elements);
        listeners.push(EventListener::new(&toggle, "click", move |_| {
            let cmd = menu.borrow_mut().toggle();
            elements.apply(&cmd);
        })?);
    }

    for link in dom::query_all(&page.document, ".nav-link") {
        let menu = Rc::clone(&menu);
        let elements = Rc::clone(&page.elements);
        listeners.push(EventListener::new(&link, "click", move |_| {
            let cmd = menu.borrow_mut().close();
            elements.apply(&cmd);
        })?);
    }

    for anchor in dom::query_all(&page.document, "a[href^=\"#\"]") {
        let document = page.document.clone();
        let href = anchor.get_attribute("href").unwrap_or_default();
        listeners.push(EventListener::new(&anchor, "click", move |event| {
            event.prevent_default();
            if let Some(id) = anchor_target(&href) {
                scroll_to(&document, id);
            }
        })?);
    }
    Ok(())
}

fn scroll_to(document: &Document, id: &str) {
    let Some(target) = document.get_element_by_id(id) else {
        tracing::debug!(id, "anchor target not found");
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}
