use std::collections::{BTreeMap, HashMap};

/// Handle returned by [`Scheduler::schedule`], usable for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Deterministic virtual-time timer queue.
///
/// Mirrors the ordering the browser gives `setTimeout`: earlier deadlines
/// run first and timers with the same deadline run in the order they were
/// scheduled. Time only moves when the caller advances it.
#[derive(Debug)]
pub struct Scheduler<E> {
    now: u64,
    next_seq: u64,
    queue: BTreeMap<(u64, u64), E>,
    deadlines: HashMap<u64, u64>,
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn schedule(&mut self, delay_ms: u32, event: E) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let deadline = self.now + u64::from(delay_ms);
        self.queue.insert((deadline, seq), event);
        self.deadlines.insert(seq, deadline);
        TimerId(seq)
    }

    /// Cancel a pending timer, returning its event if it had not fired.
    pub fn cancel(&mut self, id: TimerId) -> Option<E> {
        let deadline = self.deadlines.remove(&id.0)?;
        self.queue.remove(&(deadline, id.0))
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.keys().next().map(|&(deadline, _)| deadline)
    }

    /// Pop the next event due at or before `until`, moving the clock to its
    /// deadline. Returns `None` once nothing else is due; the clock is then
    /// left where the last event fired, so follow with [`Scheduler::advance_to`].
    pub fn next_due(&mut self, until: u64) -> Option<E> {
        let (&(deadline, seq), _) = self.queue.iter().next()?;
        if deadline > until {
            return None;
        }
        self.deadlines.remove(&seq);
        self.now = self.now.max(deadline);
        self.queue.remove(&(deadline, seq))
    }

    /// Move the clock forward without firing anything. Never moves it back.
    pub fn advance_to(&mut self, t: u64) {
        self.now = self.now.max(t);
    }
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}
