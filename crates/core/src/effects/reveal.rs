use std::collections::HashSet;
use std::hash::Hash;

use crate::config::{ObserverOptions, RevealConfig};

/// The three ways the page uses one-shot visibility triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealKind {
    /// Fade and slide cards into place.
    FadeIn,
    /// Flip-calendar reveal in the about section.
    Flip,
    /// Count a statistic up from zero.
    Counter,
}

impl RevealKind {
    pub const ALL: [RevealKind; 3] = [RevealKind::FadeIn, RevealKind::Flip, RevealKind::Counter];

    pub fn selector(self) -> &'static str {
        match self {
            RevealKind::FadeIn => ".skill-card, .blog-card, .stack-item",
            RevealKind::Flip => ".flip-item, .about-stats .stat",
            RevealKind::Counter => ".stat-number",
        }
    }

    /// Terminal class added when the element comes into view. Counters have
    /// none; they animate their text instead.
    pub fn class(self) -> Option<&'static str> {
        match self {
            RevealKind::FadeIn => Some("animate-in"),
            RevealKind::Flip => Some("flip-visible"),
            RevealKind::Counter => None,
        }
    }

    pub fn options(self, config: &RevealConfig) -> &ObserverOptions {
        match self {
            RevealKind::FadeIn => &config.fade_in,
            RevealKind::Flip => &config.flip,
            RevealKind::Counter => &config.counter,
        }
    }

    /// Inline styles applied before observing, so the reveal has somewhere
    /// to transition from.
    pub fn initial_styles(self) -> &'static [(&'static str, &'static str)] {
        match self {
            RevealKind::FadeIn => &[
                ("opacity", "0"),
                ("transform", "translateY(20px)"),
                ("transition", "opacity 0.5s ease, transform 0.5s ease"),
            ],
            RevealKind::Flip | RevealKind::Counter => &[],
        }
    }

    /// Empty values for every property [`RevealKind::initial_styles`] sets,
    /// releasing them when the page is torn down.
    pub fn cleared_styles(self) -> Vec<(&'static str, &'static str)> {
        self.initial_styles()
            .iter()
            .map(|&(property, _)| (property, ""))
            .collect()
    }
}

/// Tracks which elements are still waiting to be revealed.
///
/// Each observed key resolves at most once: the first intersecting
/// notification returns `true` and drops the key, after which it is no
/// longer observed.
#[derive(Debug, Clone)]
pub struct OneShotSet<K> {
    pending: HashSet<K>,
}

impl<K: Eq + Hash> OneShotSet<K> {
    pub fn new() -> Self {
        Self {
            pending: HashSet::new(),
        }
    }

    /// Start observing `key`. Returns `false` if it was already observed.
    pub fn observe(&mut self, key: K) -> bool {
        self.pending.insert(key)
    }

    /// Feed one intersection notification. Returns `true` when `key` has just
    /// resolved and must be unobserved.
    pub fn notify(&mut self, key: &K, is_intersecting: bool) -> bool {
        is_intersecting && self.pending.remove(key)
    }

    pub fn is_observing(&self, key: &K) -> bool {
        self.pending.contains(key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<K: Eq + Hash> Default for OneShotSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleared_styles_cover_every_initial_property() {
        let cleared = RevealKind::FadeIn.cleared_styles();
        let properties: Vec<&str> = RevealKind::FadeIn
            .initial_styles()
            .iter()
            .map(|&(p, _)| p)
            .collect();
        assert_eq!(cleared.iter().map(|&(p, _)| p).collect::<Vec<_>>(), properties);
        assert!(cleared.iter().all(|&(_, v)| v.is_empty()));
        assert!(RevealKind::Counter.cleared_styles().is_empty());
    }

    #[test]
    fn resolves_once_then_stops_observing() {
        let mut set = OneShotSet::new();
        assert!(set.observe(7u32));
        assert!(!set.notify(&7, false));
        assert!(set.is_observing(&7));
        assert!(set.notify(&7, true));
        assert!(!set.notify(&7, true));
        assert!(set.is_empty());
    }

    #[test]
    fn elements_resolve_independently() {
        let mut set = OneShotSet::new();
        set.observe("a");
        set.observe("b");
        assert!(set.notify(&"b", true));
        assert!(set.is_observing(&"a"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn unobserved_key_never_fires() {
        let mut set: OneShotSet<u32> = OneShotSet::new();
        assert!(!set.notify(&1, true));
    }

    #[test]
    fn presets_match_kinds() {
        let config = RevealConfig::default();
        assert_eq!(RevealKind::FadeIn.options(&config).threshold, 0.1);
        assert_eq!(RevealKind::Flip.options(&config).root_margin, "0px 0px -30px 0px");
        assert_eq!(RevealKind::Counter.options(&config).threshold, 0.5);
        assert_eq!(RevealKind::Counter.class(), None);
        assert_eq!(RevealKind::FadeIn.initial_styles().len(), 3);
    }
}
