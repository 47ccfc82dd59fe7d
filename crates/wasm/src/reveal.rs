use folio_core::config::RevealConfig;
use folio_core::effects::{CounterAnimation, RevealKind, parse_counter_target};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, Window};

use crate::dom;
use crate::observe::OneShotObserver;
use crate::page::Page;
use crate::runtime::FrameLoop;

/// The fade-in, flip and counter observers. Counter loops started by the
/// counter observer live inside its callback and stop with it.
///
/// Dropping releases the initial inline styles applied before observing.
pub struct Reveals {
    _observers: Vec<OneShotObserver>,
    styled: Vec<(HtmlElement, RevealKind)>,
}

impl Reveals {
    pub fn install(page: &Page) -> Result<Self, JsValue> {
        let config = &page.config.reveal;
        let mut observers = Vec::new();
        let mut styled = Vec::new();
        for kind in RevealKind::ALL {
            let targets = dom::query_all(&page.document, kind.selector());
            if targets.is_empty() {
                continue;
            }
            if !kind.initial_styles().is_empty() {
                for target in &targets {
                    dom::set_styles(target, kind.initial_styles());
                    styled.push((target.clone(), kind));
                }
            }
            tracing::debug!(?kind, count = targets.len(), "observing reveal targets");

            let observer = match kind.class() {
                Some(class) => OneShotObserver::new(kind.options(config), targets, move |el| {
                    if let Err(err) = el.class_list().add_1(class) {
                        tracing::debug!(?err, class, "failed to reveal element");
                    }
                })?,
                None => {
                    let window = page.window.clone();
                    let counter_config = config.clone();
                    let mut running: Vec<FrameLoop> = Vec::new();
                    OneShotObserver::new(kind.options(config), targets, move |el| {
                        if let Some(frames) = run_counter(&window, el, &counter_config) {
                            running.retain(FrameLoop::is_running);
                            running.push(frames);
                        }
                    })?
                }
            };
            observers.push(observer);
        }
        Ok(Self {
            _observers: observers,
            styled,
        })
    }
}

impl Drop for Reveals {
    fn drop(&mut self) {
        for (el, kind) in self.styled.drain(..) {
            dom::set_styles(&el, &kind.cleared_styles());
        }
    }
}

/// Start counting `el` up to its `data-target`. The first frame is shown
/// immediately; `None` when no further frames are needed.
fn run_counter(window: &Window, el: &HtmlElement, config: &RevealConfig) -> Option<FrameLoop> {
    let raw = el.get_attribute("data-target").unwrap_or_default();
    let Some(target) = parse_counter_target(&raw) else {
        tracing::warn!(raw = %raw, "counter has no numeric data-target, leaving it as is");
        return None;
    };

    let mut animation = CounterAnimation::new(target, config.counter_duration_ms, config.counter_frame_ms);
    let first = animation.next()?;
    el.set_text_content(Some(first.text.as_str()));
    if first.done {
        return None;
    }

    let el = el.clone();
    let frames = FrameLoop::new(window, move |_| match animation.next() {
        Some(frame) => {
            el.set_text_content(Some(frame.text.as_str()));
            !frame.done
        }
        None => false,
    });
    if let Err(err) = frames.start() {
        tracing::warn!(?err, "failed to start counter animation");
        return None;
    }
    Some(frames)
}
