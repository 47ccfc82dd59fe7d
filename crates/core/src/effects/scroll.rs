use folio_protocol::{DomCommand, ElementRef};

use crate::config::ScrollConfig;

pub const SHADOW_SCROLLED: &str = "0 4px 20px rgba(0, 0, 0, 0.1)";
pub const SHADOW_REST: &str = "0 4px 6px -1px rgb(0 0 0 / 0.1)";
pub const ACTIVE_LINK_CLASS: &str = "active";

/// Vertical extent of one `section[id]`, in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// Half-open containment, with `allowance` shifting the span up so a
    /// section counts as current once it reaches the bottom of the fixed
    /// header.
    pub fn contains(&self, offset: f64, allowance: f64) -> bool {
        let top = self.top - allowance;
        offset >= top && offset < top + self.height
    }
}

/// The scroll state every effect is computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSnapshot {
    pub offset: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

pub fn header_scrolled(offset: f64, config: &ScrollConfig) -> bool {
    offset > config.header_threshold_px
}

/// First section, in document order, containing `offset`.
pub fn active_section<'a>(
    offset: f64,
    sections: &'a [SectionSpan],
    config: &ScrollConfig,
) -> Option<&'a str> {
    sections
        .iter()
        .find(|s| s.contains(offset, config.section_offset_px))
        .map(|s| s.id.as_str())
}

/// Active flag for each nav link `href`. Every link that does not point at
/// the active section is inactive, including all of them when no section
/// matches.
pub fn nav_link_states(active: Option<&str>, hrefs: &[String]) -> Vec<bool> {
    hrefs
        .iter()
        .map(|href| {
            active.is_some_and(|id| href.strip_prefix('#').is_some_and(|frag| frag == id))
        })
        .collect()
}

/// Share of the scrollable distance already scrolled, in `[0, 100]`.
///
/// A page that cannot scroll (document no taller than the viewport) reports
/// zero rather than dividing by a non-positive distance.
pub fn progress_percent(snapshot: &ScrollSnapshot) -> f64 {
    let scrollable = snapshot.document_height - snapshot.viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (snapshot.offset / scrollable * 100.0).clamp(0.0, 100.0)
}

/// Everything one scroll handler run decides.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollFrame {
    pub scrolled: bool,
    pub progress: f64,
    pub link_states: Vec<bool>,
}

impl ScrollFrame {
    pub fn compute(
        snapshot: &ScrollSnapshot,
        sections: &[SectionSpan],
        hrefs: &[String],
        config: &ScrollConfig,
    ) -> Self {
        let active = active_section(snapshot.offset, sections, config);
        Self {
            scrolled: header_scrolled(snapshot.offset, config),
            progress: progress_percent(snapshot),
            link_states: nav_link_states(active, hrefs),
        }
    }

    /// Header shadow and progress bar updates. Nav links are not named page
    /// elements, so the caller applies `link_states` itself.
    pub fn commands(&self) -> Vec<DomCommand> {
        let shadow = if self.scrolled {
            SHADOW_SCROLLED
        } else {
            SHADOW_REST
        };
        vec![
            DomCommand::set_style(ElementRef::Header, "box-shadow", shadow),
            DomCommand::set_style(
                ElementRef::ProgressBar,
                "width",
                format!("{}%", self.progress),
            ),
        ]
    }

    pub fn active_count(&self) -> usize {
        self.link_states.iter().filter(|&&on| on).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sections() -> Vec<SectionSpan> {
        vec![
            SectionSpan::new("home", 0.0, 600.0),
            SectionSpan::new("about", 600.0, 800.0),
            SectionSpan::new("contact", 1400.0, 500.0),
        ]
    }

    fn hrefs() -> Vec<String> {
        ["#home", "#about", "#contact"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn header_switches_past_threshold_and_back() {
        let config = ScrollConfig::default();
        assert!(!header_scrolled(50.0, &config));
        assert!(header_scrolled(51.0, &config));

        let snap = |offset| ScrollSnapshot {
            offset,
            viewport_height: 800.0,
            document_height: 3000.0,
        };
        let down = ScrollFrame::compute(&snap(120.0), &sections(), &hrefs(), &config);
        assert_eq!(
            down.commands()[0],
            DomCommand::set_style(ElementRef::Header, "box-shadow", SHADOW_SCROLLED)
        );
        let up = ScrollFrame::compute(&snap(10.0), &sections(), &hrefs(), &config);
        assert_eq!(
            up.commands()[0],
            DomCommand::set_style(ElementRef::Header, "box-shadow", SHADOW_REST)
        );
    }

    #[test]
    fn header_allowance_activates_section_early() {
        let config = ScrollConfig::default();
        // 100px before "about" starts.
        assert_eq!(active_section(500.0, &sections(), &config), Some("about"));
        assert_eq!(active_section(499.0, &sections(), &config), Some("home"));
    }

    #[test]
    fn exactly_one_link_active_inside_a_section() {
        let config = ScrollConfig::default();
        let snap = ScrollSnapshot {
            offset: 900.0,
            viewport_height: 800.0,
            document_height: 1900.0,
        };
        let frame = ScrollFrame::compute(&snap, &sections(), &hrefs(), &config);
        assert_eq!(frame.link_states, vec![false, true, false]);
        assert_eq!(frame.active_count(), 1);
    }

    #[test]
    fn no_match_deactivates_every_link() {
        let config = ScrollConfig::default();
        assert_eq!(active_section(5000.0, &sections(), &config), None);
        assert_eq!(nav_link_states(None, &hrefs()), vec![false, false, false]);
    }

    #[test]
    fn first_match_wins_for_overlapping_sections() {
        let config = ScrollConfig::default();
        let overlapping = vec![
            SectionSpan::new("a", 100.0, 500.0),
            SectionSpan::new("b", 200.0, 500.0),
        ];
        assert_eq!(active_section(300.0, &overlapping, &config), Some("a"));
    }

    #[test]
    fn progress_is_a_percentage_of_scrollable_distance() {
        let snap = ScrollSnapshot {
            offset: 550.0,
            viewport_height: 900.0,
            document_height: 2000.0,
        };
        assert_eq!(progress_percent(&snap), 50.0);
    }

    #[test]
    fn short_page_reports_zero_progress() {
        let snap = ScrollSnapshot {
            offset: 0.0,
            viewport_height: 900.0,
            document_height: 900.0,
        };
        assert_eq!(progress_percent(&snap), 0.0);
    }

    #[test]
    fn overscroll_is_clamped() {
        let snap = ScrollSnapshot {
            offset: -40.0,
            viewport_height: 900.0,
            document_height: 2000.0,
        };
        assert_eq!(progress_percent(&snap), 0.0);
        let snap = ScrollSnapshot {
            offset: 1500.0,
            ..snap
        };
        assert_eq!(progress_percent(&snap), 100.0);
    }
}
