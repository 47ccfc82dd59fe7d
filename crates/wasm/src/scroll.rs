use folio_core::effects::scroll::ACTIVE_LINK_CLASS;
use folio_core::effects::{ScrollFrame, ScrollSnapshot, SectionSpan};
use folio_core::timing::Throttle;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, HtmlElement, Window};

use crate::dom;
use crate::page::Page;
use crate::runtime::{EventListener, now_ms};

/// Header shadow, active nav link and progress bar, recomputed on a
/// throttled passive scroll listener.
pub fn install(page: &Page, listeners: &mut Vec<EventListener>) -> Result<(), JsValue> {
    let config = page.config.scroll.clone();
    let sections = dom::query_all(&page.document, "section[id]");
    let links = dom::query_all(&page.document, ".nav-link");
    let hrefs: Vec<String> = links
        .iter()
        .map(|link| link.get_attribute("href").unwrap_or_default())
        .collect();

    let mut throttle = Throttle::new(config.throttle_ms);
    let target: EventTarget = page.window.clone().into();
    let page = page.clone();
    let listener = EventListener::passive(&target, "scroll", move |_| {
        if !throttle.try_fire(now_ms(&page.window)) {
            return;
        }
        let spans: Vec<SectionSpan> = sections.iter().map(section_span).collect();
        let frame = ScrollFrame::compute(&snapshot(&page), &spans, &hrefs, &config);
        page.elements.apply_all(frame.commands());
        for (link, active) in links.iter().zip(&frame.link_states) {
            set_active(link, *active);
        }
    })?;
    listeners.push(listener);
    Ok(())
}

fn section_span(section: &HtmlElement) -> SectionSpan {
    SectionSpan::new(
        section.id(),
        f64::from(section.offset_top()),
        f64::from(section.offset_height()),
    )
}

fn snapshot(page: &Page) -> ScrollSnapshot {
    ScrollSnapshot {
        offset: page.window.scroll_y().unwrap_or(0.0),
        viewport_height: viewport_height(&page.window),
        document_height: page
            .document
            .document_element()
            .map_or(0.0, |root| f64::from(root.scroll_height())),
    }
}

fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

fn set_active(link: &HtmlElement, active: bool) {
    let classes = link.class_list();
    let result = if active {
        classes.add_1(ACTIVE_LINK_CLASS)
    } else {
        classes.remove_1(ACTIVE_LINK_CLASS)
    };
    if let Err(err) = result {
        tracing::debug!(?err, "failed to update nav link");
    }
}
