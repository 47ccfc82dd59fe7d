use std::collections::HashMap;

use folio_protocol::{DomCommand, ElementRef, Theme};
use tracing::debug;

/// Storage key of the theme preference.
pub const THEME_KEY: &str = "theme";
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Durable per-origin string storage (`localStorage` in the browser).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store, for tests and hosts without durable storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.set(key, value);
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }
}

/// A stored preference wins; an unrecognized stored value is treated as
/// absent and the system color-scheme signal decides.
pub fn resolve_initial(stored: Option<&str>, prefers_dark: bool) -> Theme {
    stored.and_then(Theme::parse).unwrap_or(if prefers_dark {
        Theme::Dark
    } else {
        Theme::Light
    })
}

/// Owns the preference store and the current theme.
pub struct ThemeController<S> {
    store: S,
    current: Theme,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Resolve the initial theme and persist it. Returns the controller and
    /// the command that applies the theme to `<html>`.
    pub fn init(store: S, prefers_dark: bool) -> (Self, DomCommand) {
        let initial = resolve_initial(store.get(THEME_KEY).as_deref(), prefers_dark);
        let mut controller = Self {
            store,
            current: initial,
        };
        let cmd = controller.set(initial);
        (controller, cmd)
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn set(&mut self, theme: Theme) -> DomCommand {
        debug!(theme = theme.as_str(), "applying theme");
        self.current = theme;
        self.store.set(THEME_KEY, theme.as_str());
        DomCommand::SetAttribute {
            target: ElementRef::Root,
            name: THEME_ATTRIBUTE.to_owned(),
            value: theme.as_str().to_owned(),
        }
    }

    pub fn toggle(&mut self) -> DomCommand {
        self.set(self.current.toggled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn attribute(cmd: &DomCommand) -> &str {
        match cmd {
            DomCommand::SetAttribute { name, value, .. } if name == THEME_ATTRIBUTE => value,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn system_dark_without_stored_value() {
        let (controller, cmd) = ThemeController::init(MemoryStore::new(), true);
        assert_eq!(attribute(&cmd), "dark");
        assert_eq!(controller.store().get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn stored_value_beats_system_preference() {
        let (controller, _) = ThemeController::init(MemoryStore::with(THEME_KEY, "light"), true);
        assert_eq!(controller.current(), Theme::Light);
    }

    #[test]
    fn garbage_stored_value_falls_back() {
        assert_eq!(resolve_initial(Some("sepia"), false), Theme::Light);
        assert_eq!(resolve_initial(Some("sepia"), true), Theme::Dark);
    }

    #[test]
    fn toggle_twice_restores_and_persists_each_step() {
        let (mut controller, _) = ThemeController::init(MemoryStore::new(), false);
        let first = controller.toggle();
        assert_eq!(attribute(&first), "dark");
        assert_eq!(controller.store().get(THEME_KEY).as_deref(), Some("dark"));
        controller.toggle();
        assert_eq!(controller.current(), Theme::Light);
        assert_eq!(controller.store().get(THEME_KEY).as_deref(), Some("light"));
    }
}
