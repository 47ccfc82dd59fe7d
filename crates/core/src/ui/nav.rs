use folio_protocol::{DomCommand, ElementRef};

pub const MENU_OPEN_CLASS: &str = "active";

/// Mobile navigation drawer.
#[derive(Debug, Clone, Default)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// `#nav-toggle` click.
    pub fn toggle(&mut self) -> DomCommand {
        self.open = !self.open;
        self.command()
    }

    /// Any `.nav-link` click closes the drawer.
    pub fn close(&mut self) -> DomCommand {
        self.open = false;
        self.command()
    }

    fn command(&self) -> DomCommand {
        if self.open {
            DomCommand::add_class(ElementRef::NavMenu, MENU_OPEN_CLASS)
        } else {
            DomCommand::remove_class(ElementRef::NavMenu, MENU_OPEN_CLASS)
        }
    }
}

/// Element id an in-page anchor points at, or `None` for a bare `#` or a
/// link that leaves the page.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Inline styles for a card as the pointer enters or leaves it.
pub fn card_hover_styles(entered: bool) -> [(&'static str, &'static str); 2] {
    if entered {
        [
            ("transform", "translateY(-8px)"),
            ("box-shadow", "0 20px 40px rgba(0,0,0,0.15)"),
        ]
    } else {
        [("transform", "translateY(0)"), ("box-shadow", "")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_link_click_closes() {
        let mut menu = NavMenu::default();
        assert_eq!(
            menu.toggle(),
            DomCommand::add_class(ElementRef::NavMenu, "active")
        );
        assert!(menu.is_open());
        assert_eq!(
            menu.close(),
            DomCommand::remove_class(ElementRef::NavMenu, "active")
        );
        assert!(!menu.is_open());
    }

    #[test]
    fn anchors() {
        assert_eq!(anchor_target("#about"), Some("about"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("https://example.com/#x"), None);
    }

    #[test]
    fn hover_leave_clears_shadow() {
        assert_eq!(card_hover_styles(false)[1], ("box-shadow", ""));
    }
}
