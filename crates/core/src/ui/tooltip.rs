use folio_protocol::{DomCommand, ElementRef, Point, Rect};

pub const TOOLTIP_ID: &str = "tooltip-container";

/// Base style of the shared tooltip element.
pub const TOOLTIP_STYLE: &str = "position: fixed; background: rgba(212, 175, 55, 0.95); \
    color: #0a0a0a; padding: 10px 16px; border-radius: 8px; font-size: 0.85rem; \
    font-weight: 700; letter-spacing: 0.5px; white-space: nowrap; opacity: 0; \
    visibility: hidden; pointer-events: none; box-shadow: 0 8px 20px rgba(212, 175, 55, 0.3); \
    z-index: 10000; transition: opacity 0.2s ease;";

/// Horizontal nudge so the tooltip reads as roughly centered under short
/// items.
const CENTER_NUDGE: f64 = 30.0;
const GAP_BELOW: f64 = 10.0;

/// Where the tooltip goes for an item with bounding box `item`.
pub fn tooltip_position(item: &Rect) -> Point {
    Point::new(item.center_x() - CENTER_NUDGE, item.bottom() + GAP_BELOW)
}

/// The single tooltip shared by every `.stack-item`.
#[derive(Debug, Clone, Default)]
pub struct Tooltip {
    visible: bool,
}

impl Tooltip {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self, text: &str, item: &Rect) -> Vec<DomCommand> {
        self.visible = true;
        let at = tooltip_position(item);
        vec![
            DomCommand::SetText {
                target: ElementRef::Tooltip,
                text: text.to_owned(),
            },
            DomCommand::set_style(ElementRef::Tooltip, "left", format!("{}px", at.x)),
            DomCommand::set_style(ElementRef::Tooltip, "top", format!("{}px", at.y)),
            DomCommand::set_style(ElementRef::Tooltip, "opacity", "1"),
            DomCommand::set_style(ElementRef::Tooltip, "visibility", "visible"),
        ]
    }

    /// Pointer left the item, or the page scrolled.
    pub fn hide(&mut self) -> Vec<DomCommand> {
        self.visible = false;
        vec![
            DomCommand::set_style(ElementRef::Tooltip, "opacity", "0"),
            DomCommand::set_style(ElementRef::Tooltip, "visibility", "hidden"),
        ]
    }
}
