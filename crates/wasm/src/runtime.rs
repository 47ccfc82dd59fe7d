//! Browser scheduling primitives: one-shot timeouts, animation-frame loops
//! and scoped event listeners.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Event, EventTarget, Window};

/// Milliseconds on the page's monotonic clock.
pub fn now_ms(window: &Window) -> f64 {
    window
        .performance()
        .map_or_else(js_sys::Date::now, |p| p.now())
}

/// Run `f` once after `delay_ms`. The closure frees itself after firing.
pub fn set_timeout(window: &Window, delay_ms: u32, f: impl FnOnce() + 'static) -> Result<i32, JsValue> {
    let callback = Closure::once_into_js(f);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        i32::try_from(delay_ms).unwrap_or(i32::MAX),
    )
}

/// A listener that is removed from its target when dropped.
pub struct EventListener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(
        target: &EventTarget,
        kind: &'static str,
        f: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }

    /// Same as [`EventListener::new`], registered as passive so the browser
    /// never waits on it before scrolling.
    pub fn passive(
        target: &EventTarget,
        kind: &'static str,
        f: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

struct FrameLoopInner {
    window: Window,
    handle: Cell<Option<i32>>,
    tick: RefCell<Box<dyn FnMut(f64) -> bool>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl FrameLoopInner {
    fn request(&self) -> Result<(), JsValue> {
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return Ok(());
        };
        let id = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())?;
        self.handle.set(Some(id));
        Ok(())
    }
}

/// A `requestAnimationFrame` loop. `tick` runs once per frame and returns
/// whether the loop should continue.
///
/// Dropping the loop cancels the pending frame.
pub struct FrameLoop {
    inner: Rc<FrameLoopInner>,
}

impl FrameLoop {
    pub fn new(window: &Window, tick: impl FnMut(f64) -> bool + 'static) -> Self {
        let inner = Rc::new(FrameLoopInner {
            window: window.clone(),
            handle: Cell::new(None),
            tick: RefCell::new(Box::new(tick)),
            callback: RefCell::new(None),
        });

        let weak: Weak<FrameLoopInner> = Rc::downgrade(&inner);
        let callback = Closure::wrap(Box::new(move |timestamp: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.handle.set(None);
            let keep_going = {
                let mut tick = inner.tick.borrow_mut();
                (*tick)(timestamp)
            };
            if keep_going && let Err(err) = inner.request() {
                tracing::warn!(?err, "requestAnimationFrame failed");
            }
        }) as Box<dyn FnMut(f64)>);
        *inner.callback.borrow_mut() = Some(callback);

        Self { inner }
    }

    /// Request the next frame unless one is already pending.
    pub fn start(&self) -> Result<(), JsValue> {
        if self.is_running() {
            return Ok(());
        }
        self.inner.request()
    }

    pub fn cancel(&self) {
        if let Some(id) = self.inner.handle.take() {
            let _ = self.inner.window.cancel_animation_frame(id);
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.handle.get().is_some()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
