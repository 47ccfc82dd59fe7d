//! Integration test: drive the hero typing loop through the virtual
//! scheduler against a minimal in-memory page and check what a visitor
//! would see at each point of an iteration.

use std::collections::{HashMap, HashSet};

use folio_core::config::TypingConfig;
use folio_core::text_cycle::{CycleOutput, CycleTimer, Phase, TextCycle};
use folio_core::timing::Scheduler;
use folio_protocol::{DomCommand, ElementRef, Field};
use proptest::prelude::*;

#[derive(Default)]
struct FakePage {
    text: HashMap<ElementRef, String>,
    caret: HashSet<ElementRef>,
    classes: HashSet<(ElementRef, String)>,
    /// (time, element) of every caret removal, and of every one-character
    /// deletion.
    caret_removed_at: Vec<(u64, ElementRef)>,
    shortened_at: Vec<(u64, ElementRef)>,
    badge_shows: usize,
}

impl FakePage {
    fn apply(&mut self, now: u64, cmd: DomCommand) {
        match cmd {
            DomCommand::SetText { target, text } => {
                let before = self.text.get(&target).map_or(0, |t| t.chars().count());
                // A single dropped character is a deletion step; clearing a
                // longer text at the start of typing is not.
                if text.chars().count() + 1 == before {
                    self.shortened_at.push((now, target));
                }
                self.caret.remove(&target);
                self.text.insert(target, text);
            }
            DomCommand::AppendCaret { target } => {
                self.caret.insert(target);
            }
            DomCommand::RemoveCaret { target } => {
                self.caret.remove(&target);
                self.caret_removed_at.push((now, target));
            }
            DomCommand::AddClass { target, class } => {
                if target == ElementRef::VerifiedBadge && class == "show" {
                    self.badge_shows += 1;
                }
                self.classes.insert((target, class));
            }
            DomCommand::RemoveClass { target, class } => {
                self.classes.remove(&(target, class));
            }
            DomCommand::SetStyle { .. } | DomCommand::SetAttribute { .. } => {}
        }
    }

    fn text(&self, el: ElementRef) -> &str {
        self.text.get(&el).map_or("", String::as_str)
    }

    fn has_class(&self, el: ElementRef, class: &str) -> bool {
        self.classes.contains(&(el, class.to_owned()))
    }
}

struct Harness {
    cycle: TextCycle,
    scheduler: Scheduler<CycleTimer>,
    page: FakePage,
}

impl Harness {
    fn new(config: TypingConfig, title: &str, subtitle: &str) -> Self {
        let mut harness = Self {
            cycle: TextCycle::new(config, title, subtitle),
            scheduler: Scheduler::new(),
            page: FakePage::default(),
        };
        harness.page.text.insert(ElementRef::HeroTitle, title.to_owned());
        harness
            .page
            .text
            .insert(ElementRef::HeroSubtitle, subtitle.to_owned());
        let out = harness.cycle.start();
        harness.absorb(out);
        harness
    }

    fn absorb(&mut self, out: Vec<CycleOutput>) {
        let now = self.scheduler.now();
        for o in out {
            match o {
                CycleOutput::Dom(cmd) => self.page.apply(now, cmd),
                CycleOutput::Schedule { delay_ms, timer } => {
                    self.scheduler.schedule(delay_ms, timer);
                }
            }
        }
    }

    fn run_until(&mut self, t: u64) {
        while let Some(timer) = self.scheduler.next_due(t) {
            let out = self.cycle.on_timer(timer);
            self.absorb(out);
        }
        self.scheduler.advance_to(t);
    }

    /// Run until the cycle reaches `phase`, or give up after `limit` ms.
    fn run_to_phase(&mut self, phase: Phase, limit: u64) -> u64 {
        while self.cycle.phase() != phase {
            let Some(deadline) = self.scheduler.next_deadline() else {
                panic!("scheduler drained before reaching {phase:?}");
            };
            assert!(deadline <= limit, "did not reach {phase:?} by {limit}ms");
            self.run_until(deadline);
        }
        self.scheduler.now()
    }
}

#[test]
fn one_full_iteration_timeline() {
    let mut h = Harness::new(TypingConfig::default(), "Hello", "Rust dev");

    // Original text stays until the first iteration begins at 500ms.
    h.run_until(499);
    assert_eq!(h.page.text(ElementRef::HeroTitle), "Hello");

    h.run_until(500);
    assert_eq!(h.page.text(ElementRef::HeroTitle), "H");
    assert_eq!(h.cycle.phase(), Phase::TypingTitle);

    // Subtitle is cleared and starts typing at 700ms.
    h.run_until(699);
    assert_eq!(h.page.text(ElementRef::HeroSubtitle), "Rust dev");
    h.run_until(700);
    assert_eq!(h.page.text(ElementRef::HeroSubtitle), "R");
    assert_eq!(h.cycle.phase(), Phase::TypingSubtitle);

    // Title: 5 chars at 500..=900, caret at 1000. Subtitle: 8 chars at
    // 700..=1400, caret at 1500, which is also when both are done.
    h.run_until(1000);
    assert_eq!(h.page.text(ElementRef::HeroTitle), "Hello");
    assert!(h.page.caret.contains(&ElementRef::HeroTitle));
    assert_eq!(h.page.badge_shows, 0);

    h.run_until(1500);
    assert_eq!(h.cycle.phase(), Phase::Holding);
    assert_eq!(h.page.badge_shows, 1);
    assert!(h.page.has_class(ElementRef::VerifiedBadge, "show"));
    assert!(h.page.has_class(ElementRef::HeroTitle, "glitch-shake"));

    h.run_until(2100);
    assert!(!h.page.has_class(ElementRef::HeroTitle, "glitch-shake"));

    // Hold ends at 6500: badge hidden, deletion starts on both fields.
    h.run_until(6500);
    assert_eq!(h.cycle.phase(), Phase::Deleting);
    assert!(!h.page.has_class(ElementRef::VerifiedBadge, "show"));
    assert_eq!(h.page.text(ElementRef::HeroTitle), "Hell");
    assert_eq!(h.page.text(ElementRef::HeroSubtitle), "Rust de");
    assert!(h.page.caret.is_empty());

    // Subtitle empties at 6850 and reports done at 6900.
    h.run_until(6900);
    assert_eq!(h.page.text(ElementRef::HeroSubtitle), "");
    assert_eq!(h.cycle.phase(), Phase::Waiting);
    assert_eq!(h.cycle.iterations(), 1);

    // Next iteration 500ms later.
    h.run_until(7400);
    assert_eq!(h.page.text(ElementRef::HeroTitle), "H");
    assert_eq!(h.cycle.phase(), Phase::TypingTitle);
}

#[test]
fn caret_removed_before_any_character_is_deleted() {
    let mut h = Harness::new(TypingConfig::default(), "Hey", "You");
    let deleting_at = h.run_to_phase(Phase::Deleting, 20_000);
    for field in Field::ALL {
        let el = field.element();
        let caret_at = h
            .page
            .caret_removed_at
            .iter()
            .find(|(_, e)| *e == el)
            .map(|(t, _)| *t)
            .unwrap();
        let first_cut = h
            .page
            .shortened_at
            .iter()
            .find(|(_, e)| *e == el)
            .map(|(t, _)| *t)
            .unwrap();
        assert_eq!(caret_at, deleting_at);
        assert!(caret_at <= first_cut);
    }
}

#[test]
fn empty_texts_still_cycle() {
    let mut h = Harness::new(TypingConfig::default(), "", "");
    h.run_until(30_000);
    assert!(h.cycle.iterations() >= 4);
    assert_eq!(h.page.badge_shows as u64, h.cycle.iterations() + 1);
}

#[test]
fn restart_discards_the_old_run() {
    let mut h = Harness::new(TypingConfig::default(), "Title", "Sub");
    h.run_until(800);
    h.cycle.stop();
    let out = h.cycle.start();
    h.absorb(out);

    // Timers from the first run are still queued but must be inert.
    h.run_until(1299);
    assert_eq!(h.cycle.phase(), Phase::Waiting);
    h.run_until(1300);
    assert_eq!(h.page.text(ElementRef::HeroTitle), "T");
}

proptest! {
    #[test]
    fn both_done_fires_once_per_iteration(
        title in "[a-zA-Z ]{0,24}",
        subtitle in "[a-zA-Z ]{0,24}",
        stagger in 0u32..3000,
    ) {
        let config = TypingConfig { stagger_ms: stagger, ..TypingConfig::default() };
        let mut h = Harness::new(config, &title, &subtitle);
        h.run_to_phase(Phase::Holding, 60_000);
        prop_assert_eq!(h.page.badge_shows, 1);
        prop_assert_eq!(h.page.text(ElementRef::HeroTitle), title.as_str());
        prop_assert_eq!(h.page.text(ElementRef::HeroSubtitle), subtitle.as_str());

        h.run_to_phase(Phase::Waiting, 120_000);
        prop_assert_eq!(h.cycle.iterations(), 1);
        prop_assert_eq!(h.page.badge_shows, 1);
        prop_assert_eq!(h.page.text(ElementRef::HeroTitle), "");
        prop_assert_eq!(h.page.text(ElementRef::HeroSubtitle), "");
    }
}
