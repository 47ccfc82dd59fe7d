//! Hero typing loop: type both fields, hold with the verified badge, delete
//! both fields, wait, repeat.
//!
//! [`TextCycle`] never touches a clock. It answers every input with a list
//! of [`CycleOutput`]s: DOM commands to apply in order, and timers to arm.
//! When an armed timer fires, the host hands it back through
//! [`TextCycle::on_timer`]. Every timer carries the epoch of the run that
//! armed it, so timers left over from a stopped run are dropped instead of
//! interleaving with the new one.

mod phase;
mod typewriter;

pub use phase::{CompletionPair, CycleEvent, Phase};
pub use typewriter::{EraseStep, Eraser, TypeStep, TypeWriter};

use folio_protocol::{DomCommand, ElementRef, Field};
use tracing::debug;

use crate::config::TypingConfig;

pub const CARET_CLASS: &str = "typing-cursor";
pub const SHAKE_CLASS: &str = "glitch-shake";
pub const BADGE_SHOWN_CLASS: &str = "show";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// End of the wait before an iteration.
    Begin,
    StartSubtitle,
    TypeTick(Field),
    ShakeEnd,
    HoldElapsed,
    DeleteTick(Field),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CycleTimer {
    pub epoch: u64,
    pub kind: TimerKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutput {
    Dom(DomCommand),
    Schedule { delay_ms: u32, timer: CycleTimer },
}

#[derive(Debug, Clone)]
enum Animation {
    Still,
    Typing(TypeWriter),
    Erasing(Eraser),
}

#[derive(Debug, Clone)]
struct FieldState {
    source: String,
    content: String,
    caret: bool,
    animation: Animation,
}

impl FieldState {
    fn new(source: String) -> Self {
        Self {
            content: source.clone(),
            source,
            caret: false,
            animation: Animation::Still,
        }
    }
}

/// Field completions surfaced by a single step.
enum Settled {
    No,
    Typed,
    Deleted,
}

pub struct TextCycle {
    config: TypingConfig,
    title: FieldState,
    subtitle: FieldState,
    phase: Phase,
    epoch: u64,
    done: CompletionPair,
    iterations: u64,
}

impl TextCycle {
    /// `title` and `subtitle` are the texts the fields are rendered with;
    /// they stay on screen until the first iteration clears them.
    pub fn new(config: TypingConfig, title: &str, subtitle: &str) -> Self {
        Self {
            config,
            title: FieldState::new(title.to_owned()),
            subtitle: FieldState::new(subtitle.to_owned()),
            phase: Phase::Idle,
            epoch: 0,
            done: CompletionPair::default(),
            iterations: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Completed type/hold/delete iterations.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// What the field currently shows, caret excluded.
    pub fn content(&self, field: Field) -> &str {
        &self.field(field).content
    }

    pub fn has_caret(&self, field: Field) -> bool {
        self.field(field).caret
    }

    /// Arm the first iteration. A cycle that is already running is left
    /// alone and nothing is emitted.
    pub fn start(&mut self) -> Vec<CycleOutput> {
        let mut out = Vec::new();
        if !self.transition(CycleEvent::Start) {
            debug!(phase = ?self.phase, "text cycle already running");
            return out;
        }
        self.arm(&mut out, self.config.restart_ms, TimerKind::Begin);
        out
    }

    /// Abandon the current run. Timers already handed to the host become
    /// stale and are ignored when they fire.
    pub fn stop(&mut self) {
        if self.transition(CycleEvent::Stop) {
            self.epoch += 1;
            self.title.animation = Animation::Still;
            self.subtitle.animation = Animation::Still;
        }
    }

    /// Stop, and put both fields back to their full text with the badge and
    /// shake cleared and any `min-width` pin released.
    pub fn restore(&mut self) -> Vec<DomCommand> {
        self.stop();
        let mut out = vec![
            DomCommand::remove_class(ElementRef::HeroTitle, SHAKE_CLASS),
            DomCommand::remove_class(ElementRef::VerifiedBadge, BADGE_SHOWN_CLASS),
        ];
        for field in Field::ALL {
            let state = self.field_mut(field);
            state.content = state.source.clone();
            state.caret = false;
            out.push(DomCommand::SetText {
                target: field.element(),
                text: state.source.clone(),
            });
            out.push(DomCommand::set_style(field.element(), "min-width", ""));
        }
        out
    }

    pub fn on_timer(&mut self, timer: CycleTimer) -> Vec<CycleOutput> {
        let mut out = Vec::new();
        if timer.epoch != self.epoch {
            debug!(?timer, epoch = self.epoch, "dropping stale text cycle timer");
            return out;
        }
        match timer.kind {
            TimerKind::Begin => self.begin_iteration(&mut out),
            TimerKind::StartSubtitle => {
                if self.transition(CycleEvent::StaggerElapsed) {
                    self.start_typing(Field::Subtitle, &mut out);
                }
            }
            TimerKind::TypeTick(field) | TimerKind::DeleteTick(field) => {
                self.advance(field, &mut out);
            }
            TimerKind::ShakeEnd => {
                out.push(CycleOutput::Dom(DomCommand::remove_class(
                    ElementRef::HeroTitle,
                    SHAKE_CLASS,
                )));
            }
            TimerKind::HoldElapsed => {
                if self.transition(CycleEvent::HoldElapsed) {
                    self.start_deleting(&mut out);
                }
            }
        }
        out
    }

    fn begin_iteration(&mut self, out: &mut Vec<CycleOutput>) {
        if !self.transition(CycleEvent::WaitElapsed) {
            return;
        }
        out.push(CycleOutput::Dom(DomCommand::remove_class(
            ElementRef::VerifiedBadge,
            BADGE_SHOWN_CLASS,
        )));
        self.done = CompletionPair::default();
        self.start_typing(Field::Title, out);
        self.arm(out, self.config.stagger_ms, TimerKind::StartSubtitle);
    }

    fn start_typing(&mut self, field: Field, out: &mut Vec<CycleOutput>) {
        let state = self.field_mut(field);
        state.animation = Animation::Typing(TypeWriter::new(&state.source));
        state.content.clear();
        state.caret = false;
        out.push(CycleOutput::Dom(DomCommand::SetText {
            target: field.element(),
            text: String::new(),
        }));
        self.advance(field, out);
    }

    fn start_deleting(&mut self, out: &mut Vec<CycleOutput>) {
        out.push(CycleOutput::Dom(DomCommand::remove_class(
            ElementRef::VerifiedBadge,
            BADGE_SHOWN_CLASS,
        )));
        self.done = CompletionPair::default();
        for field in Field::ALL {
            let state = self.field_mut(field);
            state.animation = Animation::Erasing(Eraser::new(&state.content, state.caret));
        }
        for field in Field::ALL {
            self.advance(field, out);
        }
    }

    /// Run one step of `field`'s current animation.
    fn advance(&mut self, field: Field, out: &mut Vec<CycleOutput>) {
        let target = field.element();
        let type_speed = self.config.type_speed_ms;
        let delete_speed = self.config.delete_speed_ms;
        let epoch = self.epoch;
        let state = self.field_mut(field);

        let settled = match &mut state.animation {
            Animation::Still => Settled::No,
            Animation::Typing(tw) => match tw.step() {
                TypeStep::Revealed { text } => {
                    state.content.clone_from(&text);
                    out.push(CycleOutput::Dom(DomCommand::SetText { target, text }));
                    out.push(schedule(epoch, type_speed, TimerKind::TypeTick(field)));
                    Settled::No
                }
                TypeStep::Finished => {
                    state.caret = true;
                    state.animation = Animation::Still;
                    out.push(CycleOutput::Dom(DomCommand::AppendCaret { target }));
                    Settled::Typed
                }
                TypeStep::Idle => Settled::No,
            },
            Animation::Erasing(er) => {
                let step = er.step();
                let caret_removed = match &step {
                    EraseStep::Removed { caret_removed, .. }
                    | EraseStep::Finished { caret_removed } => *caret_removed,
                    EraseStep::Idle => false,
                };
                if caret_removed {
                    state.caret = false;
                    out.push(CycleOutput::Dom(DomCommand::RemoveCaret { target }));
                }
                match step {
                    EraseStep::Removed { text, .. } => {
                        state.content.clone_from(&text);
                        out.push(CycleOutput::Dom(DomCommand::SetText { target, text }));
                        out.push(schedule(epoch, delete_speed, TimerKind::DeleteTick(field)));
                        Settled::No
                    }
                    EraseStep::Finished { .. } => {
                        state.animation = Animation::Still;
                        Settled::Deleted
                    }
                    EraseStep::Idle => Settled::No,
                }
            }
        };

        match settled {
            Settled::No => {}
            Settled::Typed => {
                debug!(?field, "field typed");
                if self.done.mark(field) && self.transition(CycleEvent::AllTyped) {
                    self.on_all_typed(out);
                }
            }
            Settled::Deleted => {
                debug!(?field, "field deleted");
                if self.done.mark(field) && self.transition(CycleEvent::AllDeleted) {
                    self.iterations += 1;
                    self.transition(CycleEvent::Rearmed);
                    self.arm(out, self.config.restart_ms, TimerKind::Begin);
                }
            }
        }
    }

    fn on_all_typed(&mut self, out: &mut Vec<CycleOutput>) {
        out.push(CycleOutput::Dom(DomCommand::add_class(
            ElementRef::HeroTitle,
            SHAKE_CLASS,
        )));
        self.arm(out, self.config.shake_ms, TimerKind::ShakeEnd);
        out.push(CycleOutput::Dom(DomCommand::add_class(
            ElementRef::VerifiedBadge,
            BADGE_SHOWN_CLASS,
        )));
        self.transition(CycleEvent::BadgeShown);
        self.arm(out, self.config.hold_ms, TimerKind::HoldElapsed);
    }

    fn transition(&mut self, event: CycleEvent) -> bool {
        match self.phase.next(event) {
            Some(next) => {
                debug!(from = ?self.phase, to = ?next, ?event, "text cycle transition");
                self.phase = next;
                true
            }
            None => false,
        }
    }

    fn arm(&self, out: &mut Vec<CycleOutput>, delay_ms: u32, kind: TimerKind) {
        out.push(schedule(self.epoch, delay_ms, kind));
    }

    fn field(&self, field: Field) -> &FieldState {
        match field {
            Field::Title => &self.title,
            Field::Subtitle => &self.subtitle,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Title => &mut self.title,
            Field::Subtitle => &mut self.subtitle,
        }
    }
}

fn schedule(epoch: u64, delay_ms: u32, kind: TimerKind) -> CycleOutput {
    CycleOutput::Schedule {
        delay_ms,
        timer: CycleTimer { epoch, kind },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn timers(out: &[CycleOutput]) -> Vec<(u32, TimerKind)> {
        out.iter()
            .filter_map(|o| match o {
                CycleOutput::Schedule { delay_ms, timer } => Some((*delay_ms, timer.kind)),
                CycleOutput::Dom(_) => None,
            })
            .collect()
    }

    fn timer(cycle: &TextCycle, kind: TimerKind) -> CycleTimer {
        CycleTimer {
            epoch: cycle.epoch,
            kind,
        }
    }

    #[test]
    fn start_arms_the_initial_wait() {
        let mut cycle = TextCycle::new(TypingConfig::default(), "Hi", "there");
        let out = cycle.start();
        assert_eq!(timers(&out), vec![(500, TimerKind::Begin)]);
        assert_eq!(cycle.phase(), Phase::Waiting);
        assert_eq!(cycle.content(Field::Title), "Hi");
    }

    #[test]
    fn restore_mid_typing_shows_full_text_and_stales_timers() {
        let mut cycle = TextCycle::new(TypingConfig::default(), "Hi", "there");
        cycle.start();
        let begin = timer(&cycle, TimerKind::Begin);
        cycle.on_timer(begin);
        assert_eq!(cycle.content(Field::Title), "H");

        let out = cycle.restore();
        assert_eq!(cycle.phase(), Phase::Idle);
        assert_eq!(cycle.content(Field::Title), "Hi");
        assert!(out.contains(&DomCommand::SetText {
            target: ElementRef::HeroSubtitle,
            text: "there".to_owned(),
        }));
        for target in [ElementRef::HeroTitle, ElementRef::HeroSubtitle] {
            assert!(out.contains(&DomCommand::set_style(target, "min-width", "")));
        }
        assert!(cycle.on_timer(timer_at(begin.epoch, TimerKind::TypeTick(Field::Title))).is_empty());
    }

    fn timer_at(epoch: u64, kind: TimerKind) -> CycleTimer {
        CycleTimer { epoch, kind }
    }

    #[test]
    fn second_start_is_ignored() {
        let mut cycle = TextCycle::new(TypingConfig::default(), "Hi", "there");
        cycle.start();
        assert!(cycle.start().is_empty());
    }

    #[test]
    fn begin_hides_badge_and_types_first_char_now() {
        let mut cycle = TextCycle::new(TypingConfig::default(), "Hi", "there");
        cycle.start();
        let out = cycle.on_timer(timer(&cycle, TimerKind::Begin));
        assert_eq!(
            out[0],
            CycleOutput::Dom(DomCommand::remove_class(ElementRef::VerifiedBadge, "show"))
        );
        assert_eq!(
            out[2],
            CycleOutput::Dom(DomCommand::SetText {
                target: ElementRef::HeroTitle,
                text: "H".into()
            })
        );
        assert_eq!(
            timers(&out),
            vec![
                (100, TimerKind::TypeTick(Field::Title)),
                (200, TimerKind::StartSubtitle)
            ]
        );
        assert_eq!(cycle.phase(), Phase::TypingTitle);
    }

    #[test]
    fn stop_makes_pending_timers_stale() {
        let mut cycle = TextCycle::new(TypingConfig::default(), "Hi", "there");
        cycle.start();
        let old = timer(&cycle, TimerKind::Begin);
        cycle.stop();
        assert_eq!(cycle.phase(), Phase::Idle);
        assert!(cycle.on_timer(old).is_empty());

        let out = cycle.start();
        let CycleOutput::Schedule { timer: fresh, .. } = out[0] else {
            panic!("expected a timer");
        };
        assert_ne!(fresh.epoch, old.epoch);
    }

    #[test]
    fn tick_after_completion_is_a_no_op() {
        let mut cycle = TextCycle::new(TypingConfig::default(), "", "x");
        cycle.start();
        cycle.on_timer(timer(&cycle, TimerKind::Begin));
        assert!(cycle.has_caret(Field::Title));
        let out = cycle.on_timer(timer(&cycle, TimerKind::TypeTick(Field::Title)));
        assert!(out.is_empty());
    }
}
