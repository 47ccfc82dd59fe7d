//! Decorative background: particles, stars, pointer-following blobs and the
//! spotlight gradient.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use folio_core::config::BackgroundConfig;
use folio_core::effects::background::{
    ANIMATED_SELECTOR, HEAVY_SELECTOR, animation_play_state, heavy_effects_allowed, is_mobile,
    particle_styles, spotlight_commands, star_styles,
};
use folio_core::effects::{FollowLoop, LoopAction, PointerFollow};
use folio_core::timing::{Debounce, Throttle};
use folio_protocol::{ElementRef, Point, Size};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, EventTarget, HtmlElement, MouseEvent, Window};

use crate::dom;
use crate::page::Page;
use crate::runtime::{EventListener, FrameLoop, now_ms, set_timeout};

/// Timer callbacks can land a hair before the debounce deadline on the
/// performance clock.
const TIMER_SLACK_MS: f64 = 1.0;

/// Owns the blob frame loop and the generated particle and star nodes.
/// Listeners are held by the page session.
pub struct Backdrop {
    blobs: Option<Rc<BlobMotion>>,
    spawned: Vec<HtmlElement>,
}

struct BlobMotion {
    frames: FrameLoop,
    state: RefCell<FollowLoop>,
}

impl BlobMotion {
    fn apply(&self, action: LoopAction) {
        match action {
            LoopAction::Start => {
                if let Err(err) = self.frames.start() {
                    tracing::warn!(?err, "failed to start blob loop");
                }
            }
            LoopAction::Cancel => self.frames.cancel(),
            LoopAction::Nothing => {}
        }
    }
}

impl Backdrop {
    pub fn install(page: &Page, listeners: &mut Vec<EventListener>) -> Result<Self, JsValue> {
        let config = &page.config.background;

        let cores = page.window.navigator().hardware_concurrency();
        let heavy = heavy_effects_allowed((cores > 0.0).then_some(cores as u32), config);
        if !heavy {
            for el in dom::query_all(&page.document, HEAVY_SELECTOR) {
                dom::set_styles(&el, &[("display", "none")]);
            }
            tracing::info!(cores, "low core count, heavy background layers hidden");
        }

        let viewport = Rc::new(Cell::new(viewport_size(&page.window)));
        listeners.push(watch_resize(page, Rc::clone(&viewport), config)?);

        let desktop = !is_mobile(viewport.get().width, config);
        let mut spawned = Vec::new();
        let blobs = if desktop && heavy {
            let mut rng = fastrand::Rng::with_seed((js_sys::Math::random() * u64::MAX as f64) as u64);
            let layers = [
                ("#particles", "particle", particle_styles(&mut rng, config.particle_count)),
                ("#stars", "star", star_styles(&mut rng, config.star_count)),
            ];
            for (container, class, styles) in layers {
                if let Err(err) = spawn(&page.document, container, class, styles, &mut spawned) {
                    tracing::warn!(container, ?err, "background layer not generated");
                }
            }
            follow_pointer(page, Rc::clone(&viewport), config, listeners)
                .inspect_err(|err| tracing::warn!(?err, "blob motion disabled"))
                .ok()
                .flatten()
        } else {
            None
        };

        keep(listeners, "visibility", watch_visibility(&page.document, blobs.clone()));

        if desktop && page.elements.has(ElementRef::Spotlight) {
            keep(listeners, "spotlight", track_spotlight(page, viewport, config));
        }

        tracing::debug!(desktop, heavy, blobs = blobs.is_some(), "backdrop installed");
        Ok(Self { blobs, spawned })
    }
}

impl Drop for Backdrop {
    fn drop(&mut self) {
        if let Some(blobs) = &self.blobs {
            blobs.frames.cancel();
        }
        for node in self.spawned.drain(..) {
            node.remove();
        }
    }
}

fn keep(listeners: &mut Vec<EventListener>, part: &str, listener: Result<EventListener, JsValue>) {
    match listener {
        Ok(listener) => listeners.push(listener),
        Err(err) => tracing::warn!(part, ?err, "background listener not installed"),
    }
}

fn viewport_size(window: &Window) -> Size {
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Size::new(read(window.inner_width()), read(window.inner_height()))
}

fn client_point(event: &web_sys::Event) -> Option<Point> {
    let event = event.dyn_ref::<MouseEvent>()?;
    Some(Point::new(f64::from(event.client_x()), f64::from(event.client_y())))
}

/// Append one `<div class=class>` per style string to the container,
/// recording every appended node in `spawned`.
fn spawn(
    document: &Document,
    container: &str,
    class: &str,
    styles: Vec<String>,
    spawned: &mut Vec<HtmlElement>,
) -> Result<(), JsValue> {
    let Some(container) = dom::query(document, container) else {
        return Ok(());
    };
    for css in styles {
        let node = dom::create(document, "div")?;
        node.set_class_name(class);
        node.style().set_css_text(&css);
        container.append_child(&node)?;
        spawned.push(node);
    }
    Ok(())
}

fn follow_pointer(
    page: &Page,
    viewport: Rc<Cell<Size>>,
    config: &BackgroundConfig,
    listeners: &mut Vec<EventListener>,
) -> Result<Option<Rc<BlobMotion>>, JsValue> {
    let blobs: Vec<HtmlElement> = dom::query_all(&page.document, ".blob");
    if blobs.is_empty() {
        return Ok(None);
    }

    let follow = Rc::new(RefCell::new(PointerFollow::new(config.smoothing)));
    let frames = {
        let follow = Rc::clone(&follow);
        FrameLoop::new(&page.window, move |_| {
            let mut follow = follow.borrow_mut();
            follow.step();
            for (i, blob) in blobs.iter().enumerate() {
                let _ = blob.style().set_property("transform", &follow.blob_transform(i));
            }
            true
        })
    };

    let target: EventTarget = page.document.clone().into();
    listeners.push(EventListener::new(&target, "mousemove", move |event| {
        if let Some(client) = client_point(&event) {
            follow.borrow_mut().set_pointer(client, viewport.get());
        }
    })?);

    let motion = Rc::new(BlobMotion {
        frames,
        state: RefCell::new(FollowLoop::default()),
    });
    let action = motion.state.borrow_mut().start();
    motion.apply(action);
    Ok(Some(motion))
}

fn watch_visibility(document: &Document, blobs: Option<Rc<BlobMotion>>) -> Result<EventListener, JsValue> {
    let target: EventTarget = document.clone().into();
    let document = document.clone();
    EventListener::new(&target, "visibilitychange", move |_| {
        let hidden = document.hidden();
        let state = animation_play_state(hidden);
        for el in dom::query_all(&document, ANIMATED_SELECTOR) {
            dom::set_styles(&el, &[("animation-play-state", state)]);
        }
        if let Some(blobs) = &blobs {
            let action = blobs.state.borrow_mut().visibility_changed(hidden);
            blobs.apply(action);
        }
        tracing::debug!(hidden, "visibility changed");
    })
}

fn track_spotlight(
    page: &Page,
    viewport: Rc<Cell<Size>>,
    config: &BackgroundConfig,
) -> Result<EventListener, JsValue> {
    let mut throttle = Throttle::new(config.spotlight_throttle_ms);
    let window = page.window.clone();
    let elements = Rc::clone(&page.elements);
    let target: EventTarget = page.document.clone().into();
    EventListener::new(&target, "mousemove", move |event| {
        if !throttle.try_fire(now_ms(&window)) {
            return;
        }
        if let Some(client) = client_point(&event) {
            elements.apply_all(spotlight_commands(client, viewport.get()));
        }
    })
}

/// Refresh the cached viewport size once resizing settles.
fn watch_resize(
    page: &Page,
    viewport: Rc<Cell<Size>>,
    config: &BackgroundConfig,
) -> Result<EventListener, JsValue> {
    let debounce = Rc::new(RefCell::new(Debounce::new(config.resize_debounce_ms)));
    let window = page.window.clone();
    let target: EventTarget = window.clone().into();
    EventListener::passive(&target, "resize", move |_| {
        let ticket = debounce.borrow_mut().call(now_ms(&window));
        let wait = debounce.borrow().wait_ms();
        let debounce = Rc::clone(&debounce);
        let viewport = Rc::clone(&viewport);
        let timer_window = window.clone();
        let armed = set_timeout(&window, wait, move || {
            let now = now_ms(&timer_window) + TIMER_SLACK_MS;
            if debounce.borrow_mut().is_due(ticket, now) {
                let size = viewport_size(&timer_window);
                viewport.set(size);
                tracing::debug!(width = size.width, height = size.height, "viewport resized");
            }
        });
        if let Err(err) = armed {
            tracing::warn!(?err, "failed to arm resize debounce");
        }
    })
}
