use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_core::config::TypingConfig;
use folio_core::text_cycle::{CycleOutput, TextCycle};
use folio_protocol::{DomCommand, ElementRef, Field};
use web_sys::Window;

use crate::dom::Elements;
use crate::runtime::set_timeout;

/// Runs the hero typing loop on real timers.
///
/// Timer callbacks hold a weak reference, so once the driver is dropped any
/// timeout still in flight fires into nothing.
pub struct HeroDriver {
    window: Window,
    elements: Rc<Elements>,
    cycle: RefCell<TextCycle>,
}

impl HeroDriver {
    /// `None` when either hero field is missing from the page.
    pub fn mount(window: &Window, elements: Rc<Elements>, config: TypingConfig) -> Option<Rc<Self>> {
        let title = elements.get(ElementRef::HeroTitle)?;
        let subtitle = elements.get(ElementRef::HeroSubtitle)?;
        let title_text = title.text_content().unwrap_or_default();
        let subtitle_text = subtitle.text_content().unwrap_or_default();

        // Keep the layout from collapsing while the text is deleted.
        let pins: Vec<DomCommand> = Field::ALL
            .into_iter()
            .filter_map(|field| {
                let el = elements.get(field.element())?;
                Some(DomCommand::set_style(
                    field.element(),
                    "min-width",
                    format!("{}px", el.offset_width()),
                ))
            })
            .collect();
        elements.apply_all(pins);

        let cycle = TextCycle::new(config, &title_text, &subtitle_text);
        Some(Rc::new(Self {
            window: window.clone(),
            elements,
            cycle: RefCell::new(cycle),
        }))
    }

    pub fn start(self: &Rc<Self>) {
        let out = self.cycle.borrow_mut().start();
        self.dispatch(out);
    }

    /// Stop the loop and leave the hero showing its full text.
    pub fn stop(&self) {
        let restore = self.cycle.borrow_mut().restore();
        self.elements.apply_all(restore);
    }

    fn dispatch(self: &Rc<Self>, outputs: Vec<CycleOutput>) {
        for output in outputs {
            match output {
                CycleOutput::Dom(cmd) => self.elements.apply(&cmd),
                CycleOutput::Schedule { delay_ms, timer } => {
                    let weak: Weak<Self> = Rc::downgrade(self);
                    let armed = set_timeout(&self.window, delay_ms, move || {
                        if let Some(driver) = weak.upgrade() {
                            let out = driver.cycle.borrow_mut().on_timer(timer);
                            driver.dispatch(out);
                        }
                    });
                    if let Err(err) = armed {
                        tracing::warn!(?err, ?timer, "failed to arm text cycle timer");
                    }
                }
            }
        }
    }
}
