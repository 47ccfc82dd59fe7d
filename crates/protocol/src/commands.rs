use serde::{Deserialize, Serialize};

/// A named element on the page that the core can address.
///
/// The bridge resolves each variant to a concrete node once at mount time.
/// Commands aimed at an element that was not found are dropped, which is how
/// a missing piece of markup silently disables the feature that needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementRef {
    /// `.hero-title .title-text`
    HeroTitle,
    /// `.hero-subtitle`
    HeroSubtitle,
    /// `.verified-badge`
    VerifiedBadge,
    /// `#header`
    Header,
    /// `.scroll-progress`, injected at mount.
    ProgressBar,
    /// `#nav-menu`
    NavMenu,
    /// `#tooltip-container`, injected at mount.
    Tooltip,
    /// `#spotlight-bg`
    Spotlight,
    /// `<html>`
    Root,
}

/// One of the two text fields driven by the typing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Title,
    Subtitle,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Title, Field::Subtitle];

    pub fn element(self) -> ElementRef {
        match self {
            Field::Title => ElementRef::HeroTitle,
            Field::Subtitle => ElementRef::HeroSubtitle,
        }
    }
}

/// A single, stateless DOM mutation.
///
/// The core emits these in order; the bridge applies them sequentially and
/// never reorders. Each command carries everything it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomCommand {
    /// Replace the element's text content (drops any child nodes, including
    /// the caret marker).
    SetText { target: ElementRef, text: String },

    /// Append the blinking caret marker after the text.
    AppendCaret { target: ElementRef },

    /// Remove the caret marker if the element has one.
    RemoveCaret { target: ElementRef },

    AddClass { target: ElementRef, class: String },

    RemoveClass { target: ElementRef, class: String },

    /// Set an inline style property. Custom properties (`--name`) are
    /// allowed.
    SetStyle {
        target: ElementRef,
        property: String,
        value: String,
    },

    SetAttribute {
        target: ElementRef,
        name: String,
        value: String,
    },
}

impl DomCommand {
    pub fn add_class(target: ElementRef, class: &str) -> Self {
        Self::AddClass {
            target,
            class: class.to_owned(),
        }
    }

    pub fn remove_class(target: ElementRef, class: &str) -> Self {
        Self::RemoveClass {
            target,
            class: class.to_owned(),
        }
    }

    pub fn set_style(target: ElementRef, property: &str, value: impl Into<String>) -> Self {
        Self::SetStyle {
            target,
            property: property.to_owned(),
            value: value.into(),
        }
    }

    /// The element this command mutates.
    pub fn target(&self) -> ElementRef {
        match self {
            Self::SetText { target, .. }
            | Self::AppendCaret { target }
            | Self::RemoveCaret { target }
            | Self::AddClass { target, .. }
            | Self::RemoveClass { target, .. }
            | Self::SetStyle { target, .. }
            | Self::SetAttribute { target, .. } => *target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn field_maps_to_hero_elements() {
        assert_eq!(Field::Title.element(), ElementRef::HeroTitle);
        assert_eq!(Field::Subtitle.element(), ElementRef::HeroSubtitle);
    }

    #[test]
    fn target_reports_mutated_element() {
        let cmd = DomCommand::set_style(ElementRef::ProgressBar, "width", "42%");
        assert_eq!(cmd.target(), ElementRef::ProgressBar);
        assert_eq!(
            DomCommand::AppendCaret {
                target: ElementRef::HeroSubtitle
            }
            .target(),
            ElementRef::HeroSubtitle
        );
    }

    #[test]
    fn commands_serialize_externally_tagged() {
        let cmd = DomCommand::add_class(ElementRef::VerifiedBadge, "show");
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(
            json,
            r#"{"AddClass":{"target":"VerifiedBadge","class":"show"}}"#
        );
    }
}
