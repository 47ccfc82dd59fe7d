use std::cell::RefCell;
use std::rc::Rc;

use folio_core::ui::nav::card_hover_styles;
use folio_core::ui::{ThemeController, Tooltip, contact};
use folio_protocol::Rect;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, HtmlFormElement};

use crate::dom;
use crate::page::Page;
use crate::runtime::EventListener;
use crate::storage::LocalStorage;

const PREFERS_DARK: &str = "(prefers-color-scheme: dark)";

/// Apply the stored (or system) theme and wire `#theme-toggle`.
pub fn install_theme(page: &Page, listeners: &mut Vec<EventListener>) -> Result<(), JsValue> {
    let prefers_dark = page
        .window
        .match_media(PREFERS_DARK)
        .ok()
        .flatten()
        .is_some_and(|query| query.matches());
    let (mut controller, initial) =
        ThemeController::init(LocalStorage::from_window(&page.window), prefers_dark);
    page.elements.apply(&initial);

    let Some(toggle) = dom::query(&page.document, "#theme-toggle") else {
        return Ok(());
    };
    let elements = Rc::clone(&page.elements);
    listeners.push(EventListener::new(&toggle, "click", move |_| {
        let cmd = controller.toggle();
        elements.apply(&cmd);
    })?);
    Ok(())
}

/// One shared tooltip for every `.stack-item`, labelled by its `data-name`.
pub fn install_tooltip(page: &Page, listeners: &mut Vec<EventListener>) -> Result<(), JsValue> {
    let items = dom::query_all(&page.document, ".stack-item");
    tracing::info!(count = items.len(), "found stack items");
    let tooltip = Rc::new(RefCell::new(Tooltip::default()));

    for item in items {
        let name = item.get_attribute("data-name").unwrap_or_default();
        {
            let tooltip = Rc::clone(&tooltip);
            let elements = Rc::clone(&page.elements);
            let anchor = item.clone();
            listeners.push(EventListener::new(&item, "mouseenter", move |_| {
                let bounds = anchor.get_bounding_client_rect();
                let rect = Rect::new(bounds.x(), bounds.y(), bounds.width(), bounds.height());
                elements.apply_all(tooltip.borrow_mut().show(&name, &rect));
                tracing::debug!(name = %name, "tooltip shown");
            })?);
        }
        let tooltip = Rc::clone(&tooltip);
        let elements = Rc::clone(&page.elements);
        listeners.push(EventListener::new(&item, "mouseleave", move |_| {
            elements.apply_all(tooltip.borrow_mut().hide());
        })?);
    }

    let elements = Rc::clone(&page.elements);
    let target: EventTarget = page.window.clone().into();
    listeners.push(EventListener::passive(&target, "scroll", move |_| {
        let mut tooltip = tooltip.borrow_mut();
        if tooltip.is_visible() {
            elements.apply_all(tooltip.hide());
        }
    })?);
    Ok(())
}

pub fn install_card_hover(page: &Page, listeners: &mut Vec<EventListener>) -> Result<(), JsValue> {
    for card in dom::query_all(&page.document, ".skill-card, .blog-card") {
        for (kind, entered) in [("mouseenter", true), ("mouseleave", false)] {
            let el = card.clone();
            listeners.push(EventListener::new(&card, kind, move |_| {
                dom::set_styles(&el, &card_hover_styles(entered));
            })?);
        }
    }
    Ok(())
}

/// Intercept `#contact-form`: acknowledge and reset, never navigate.
pub fn install_contact_form(page: &Page, listeners: &mut Vec<EventListener>) -> Result<(), JsValue> {
    let Some(form) = dom::query(&page.document, "#contact-form")
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        return Ok(());
    };
    let window = page.window.clone();
    let ack = page.config.contact_ack.clone();
    let target = form.clone();
    listeners.push(EventListener::new(&target, "submit", move |event| {
        event.prevent_default();
        let outcome = contact::submit(&ack);
        if let Err(err) = window.alert_with_message(&outcome.message) {
            tracing::debug!(?err, "alert suppressed");
        }
        if outcome.reset_form {
            form.reset();
        }
    })?);
    Ok(())
}
