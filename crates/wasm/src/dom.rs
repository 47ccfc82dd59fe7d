use std::collections::HashMap;

use folio_core::text_cycle::CARET_CLASS;
use folio_protocol::{DomCommand, ElementRef};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::styles::CARET_STYLE;

/// Selector for every named element that already exists in the markup.
/// Injected elements (progress bar, tooltip) are registered by whoever
/// creates them.
fn selector(el: ElementRef) -> Option<&'static str> {
    Some(match el {
        ElementRef::HeroTitle => ".hero-title .title-text",
        ElementRef::HeroSubtitle => ".hero-subtitle",
        ElementRef::VerifiedBadge => ".verified-badge",
        ElementRef::Header => "#header",
        ElementRef::NavMenu => "#nav-menu",
        ElementRef::Spotlight => "#spotlight-bg",
        ElementRef::ProgressBar | ElementRef::Tooltip | ElementRef::Root => return None,
    })
}

pub fn query(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Every element matching `selector` that is an `HtmlElement`, in document
/// order. A bad selector yields nothing.
pub fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn create(document: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    document.create_element(tag)?.dyn_into::<HtmlElement>().map_err(JsValue::from)
}

pub fn set_styles(el: &HtmlElement, styles: &[(&str, &str)]) {
    let style = el.style();
    for (property, value) in styles {
        let _ = style.set_property(property, value);
    }
}

/// The page's named elements, resolved once.
pub struct Elements {
    map: HashMap<ElementRef, HtmlElement>,
    document: Document,
}

impl Elements {
    pub fn resolve(document: &Document) -> Self {
        let mut map = HashMap::new();
        for el in [
            ElementRef::HeroTitle,
            ElementRef::HeroSubtitle,
            ElementRef::VerifiedBadge,
            ElementRef::Header,
            ElementRef::NavMenu,
            ElementRef::Spotlight,
        ] {
            if let Some(found) = selector(el).and_then(|s| query(document, s)) {
                map.insert(el, found);
            }
        }
        if let Some(root) = document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            map.insert(ElementRef::Root, root);
        }
        Self {
            map,
            document: document.clone(),
        }
    }

    pub fn register(&mut self, el: ElementRef, node: HtmlElement) {
        self.map.insert(el, node);
    }

    pub fn get(&self, el: ElementRef) -> Option<&HtmlElement> {
        self.map.get(&el)
    }

    pub fn has(&self, el: ElementRef) -> bool {
        self.map.contains_key(&el)
    }

    pub fn apply_all(&self, commands: impl IntoIterator<Item = DomCommand>) {
        for cmd in commands {
            self.apply(&cmd);
        }
    }

    /// Apply one command. Commands for unresolved elements are dropped; DOM
    /// exceptions are swallowed the same way.
    pub fn apply(&self, cmd: &DomCommand) {
        let Some(el) = self.get(cmd.target()) else {
            return;
        };
        let result = match cmd {
            DomCommand::SetText { text, .. } => {
                el.set_text_content(Some(text.as_str()));
                Ok(())
            }
            DomCommand::AppendCaret { .. } => self.append_caret(el),
            DomCommand::RemoveCaret { .. } => {
                remove_caret(el);
                Ok(())
            }
            DomCommand::AddClass { class, .. } => el.class_list().add_1(class),
            DomCommand::RemoveClass { class, .. } => el.class_list().remove_1(class),
            DomCommand::SetStyle {
                property, value, ..
            } => el.style().set_property(property, value),
            DomCommand::SetAttribute { name, value, .. } => el.set_attribute(name, value),
        };
        if let Err(err) = result {
            tracing::debug!(?cmd, ?err, "dom command failed");
        }
    }

    fn append_caret(&self, el: &HtmlElement) -> Result<(), JsValue> {
        let caret = create(&self.document, "span")?;
        caret.set_class_name(CARET_CLASS);
        caret.style().set_css_text(CARET_STYLE);
        el.append_child(&caret)?;
        Ok(())
    }
}

fn remove_caret(el: &Element) {
    if let Ok(Some(caret)) = el.query_selector(&format!(".{CARET_CLASS}")) {
        caret.remove();
    }
}
