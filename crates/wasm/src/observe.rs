use folio_core::config::ObserverOptions;
use folio_core::effects::OneShotSet;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

type EntriesCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// An `IntersectionObserver` that reports each target once, the first time
/// it intersects, and then stops observing it.
///
/// Dropping the observer disconnects it.
pub struct OneShotObserver {
    observer: IntersectionObserver,
    _callback: EntriesCallback,
}

impl OneShotObserver {
    pub fn new(
        options: &ObserverOptions,
        targets: Vec<HtmlElement>,
        mut on_visible: impl FnMut(&HtmlElement) + 'static,
    ) -> Result<Self, JsValue> {
        let mut pending = OneShotSet::new();
        for index in 0..targets.len() {
            pending.observe(index);
        }
        let watched = targets.clone();

        let callback: EntriesCallback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let target_js: &JsValue = target.as_ref();
                    let Some(index) = targets.iter().position(|t| {
                        let js: &JsValue = t.as_ref();
                        js == target_js
                    }) else {
                        continue;
                    };
                    if pending.notify(&index, entry.is_intersecting()) {
                        observer.unobserve(&target);
                        on_visible(&targets[index]);
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        for target in &watched {
            observer.observe(target);
        }

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for OneShotObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
