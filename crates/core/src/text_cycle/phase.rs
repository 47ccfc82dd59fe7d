use folio_protocol::Field;

/// Where the hero typing loop is within one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not started, or stopped.
    Idle,
    /// Pause before the next iteration.
    Waiting,
    /// Title is typing; subtitle is waiting out the stagger.
    TypingTitle,
    /// Subtitle has started; both fields may still be typing.
    TypingSubtitle,
    /// Both fields finished typing. Transient: shake and badge go out here.
    BothTyped,
    /// Badge shown, text held on screen.
    Holding,
    Deleting,
    /// Both fields are empty. Transient: the next wait is armed here.
    BothDeleted,
}

/// Inputs to the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleEvent {
    Start,
    Stop,
    WaitElapsed,
    StaggerElapsed,
    AllTyped,
    BadgeShown,
    HoldElapsed,
    AllDeleted,
    Rearmed,
}

impl Phase {
    /// The transition table. `None` means the event is not accepted in this
    /// phase and must be ignored.
    pub fn next(self, event: CycleEvent) -> Option<Phase> {
        use CycleEvent as E;
        use Phase as P;
        match (self, event) {
            (P::Idle, E::Start) => Some(P::Waiting),
            (P::Idle, E::Stop) => None,
            (_, E::Stop) => Some(P::Idle),
            (P::Waiting, E::WaitElapsed) => Some(P::TypingTitle),
            (P::TypingTitle, E::StaggerElapsed) => Some(P::TypingSubtitle),
            (P::TypingSubtitle, E::AllTyped) => Some(P::BothTyped),
            (P::BothTyped, E::BadgeShown) => Some(P::Holding),
            (P::Holding, E::HoldElapsed) => Some(P::Deleting),
            (P::Deleting, E::AllDeleted) => Some(P::BothDeleted),
            (P::BothDeleted, E::Rearmed) => Some(P::Waiting),
            _ => None,
        }
    }
}

/// The two completion flags of one typing or deleting phase.
///
/// [`CompletionPair::mark`] reports the both-done transition exactly once,
/// to whichever field finishes second.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionPair {
    title: bool,
    subtitle: bool,
    consumed: bool,
}

impl CompletionPair {
    pub fn mark(&mut self, field: Field) -> bool {
        match field {
            Field::Title => self.title = true,
            Field::Subtitle => self.subtitle = true,
        }
        if self.title && self.subtitle && !self.consumed {
            self.consumed = true;
            true
        } else {
            false
        }
    }
}
