use std::rc::Rc;

use folio_core::EffectsConfig;
use folio_core::ui::tooltip::{TOOLTIP_ID, TOOLTIP_STYLE};
use folio_protocol::ElementRef;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

use crate::backdrop::Backdrop;
use crate::dom::{self, Elements};
use crate::hero::HeroDriver;
use crate::reveal::Reveals;
use crate::runtime::EventListener;
use crate::styles::{BLINK, REVEAL_AND_PROGRESS};
use crate::{nav, scroll, widgets};

/// What every feature installer needs: the browser handles, the resolved
/// named elements and the active configuration.
#[derive(Clone)]
pub struct Page {
    pub window: Window,
    pub document: Document,
    pub elements: Rc<Elements>,
    pub config: Rc<EffectsConfig>,
}

/// Everything mounted on the page. Dropping the session removes the
/// listeners, disconnects the observers and stops the loops.
pub struct PageSession {
    hero: Option<Rc<HeroDriver>>,
    _backdrop: Option<Backdrop>,
    _reveals: Option<Reveals>,
    listeners: Vec<EventListener>,
    /// Nodes the session added to the document.
    injected: Vec<Element>,
}

impl PageSession {
    pub fn mount(window: Window, config: EffectsConfig) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;

        let mut injected = inject_styles(&document)?;
        let mut elements = Elements::resolve(&document);
        injected.extend(mount_overlays(&document, &mut elements)?);

        let page = Page {
            window,
            document,
            elements: Rc::new(elements),
            config: Rc::new(config),
        };

        let mut listeners = Vec::new();
        report("theme", widgets::install_theme(&page, &mut listeners));
        report("navigation", nav::install(&page, &mut listeners));
        report("scroll", scroll::install(&page, &mut listeners));
        report("tooltip", widgets::install_tooltip(&page, &mut listeners));
        report("card hover", widgets::install_card_hover(&page, &mut listeners));
        report("contact form", widgets::install_contact_form(&page, &mut listeners));

        let reveals = Reveals::install(&page)
            .inspect_err(|err| tracing::warn!(feature = "reveal", ?err, "feature disabled"))
            .ok();
        let backdrop = Backdrop::install(&page, &mut listeners)
            .inspect_err(|err| tracing::warn!(feature = "backdrop", ?err, "feature disabled"))
            .ok();

        let hero = HeroDriver::mount(&page.window, Rc::clone(&page.elements), page.config.typing.clone());
        match &hero {
            Some(driver) => driver.start(),
            None => tracing::debug!("hero text missing, typing loop not started"),
        }

        tracing::info!(
            listeners = listeners.len(),
            hero = hero.is_some(),
            backdrop = backdrop.is_some(),
            "page mounted"
        );

        Ok(Self {
            hero,
            _backdrop: backdrop,
            _reveals: reveals,
            listeners,
            injected,
        })
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        if let Some(hero) = &self.hero {
            hero.stop();
        }
        self.listeners.clear();
        for node in self.injected.drain(..) {
            node.remove();
        }
        tracing::debug!("page session torn down");
    }
}

fn report(feature: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        tracing::warn!(feature, ?err, "feature disabled");
    }
}

fn inject_styles(document: &Document) -> Result<Vec<Element>, JsValue> {
    let Some(head) = document.head() else {
        return Ok(Vec::new());
    };
    let mut added = Vec::new();
    for css in [REVEAL_AND_PROGRESS, BLINK] {
        let style = document.create_element("style")?;
        style.set_text_content(Some(css));
        head.append_child(&style)?;
        added.push(style);
    }
    Ok(added)
}

/// Progress bar and tooltip are created by the page itself.
fn mount_overlays(document: &Document, elements: &mut Elements) -> Result<Vec<Element>, JsValue> {
    let Some(body) = document.body() else {
        return Ok(Vec::new());
    };

    let progress = dom::create(document, "div")?;
    progress.set_class_name("scroll-progress");
    body.append_child(&progress)?;
    elements.register(ElementRef::ProgressBar, progress.clone());

    let tooltip = dom::create(document, "div")?;
    tooltip.set_id(TOOLTIP_ID);
    tooltip.style().set_css_text(TOOLTIP_STYLE);
    body.append_child(&tooltip)?;
    elements.register(ElementRef::Tooltip, tooltip.clone());
    Ok(vec![progress.into(), tooltip.into()])
}
