/// Identifies one call to [`Debounce::call`]. Only the most recent ticket
/// can ever come due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Trailing-edge debounce: a burst of calls collapses into one invocation
/// `wait_ms` after the last call in the burst.
///
/// The caller schedules a deferred check for every ticket it receives and
/// runs the wrapped work only when [`Debounce::is_due`] says so, which is the
/// equivalent of clearing the previous timeout on each call.
#[derive(Debug, Clone)]
pub struct Debounce {
    wait_ms: f64,
    generation: u64,
    deadline: Option<f64>,
}

impl Debounce {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms: f64::from(wait_ms),
            generation: 0,
            deadline: None,
        }
    }

    pub fn wait_ms(&self) -> u32 {
        self.wait_ms as u32
    }

    /// Register a call at `now_ms`, superseding any pending one.
    pub fn call(&mut self, now_ms: f64) -> DebounceTicket {
        self.generation += 1;
        self.deadline = Some(now_ms + self.wait_ms);
        DebounceTicket(self.generation)
    }

    /// Returns `true` once, for the latest ticket, when its wait elapsed.
    pub fn is_due(&mut self, ticket: DebounceTicket, now_ms: f64) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_last_call_of_burst_fires() {
        let mut d = Debounce::new(150);
        let first = d.call(0.0);
        let second = d.call(100.0);
        assert!(!d.is_due(first, 150.0));
        assert!(!d.is_due(second, 200.0));
        assert!(d.is_due(second, 250.0));
        assert!(!d.is_due(second, 300.0));
    }

    #[test]
    fn due_ticket_fires_once() {
        let mut d = Debounce::new(10);
        let t = d.call(0.0);
        assert!(d.is_due(t, 10.0));
        assert!(!d.is_due(t, 20.0));
    }

    #[test]
    fn new_call_after_firing_starts_fresh() {
        let mut d = Debounce::new(10);
        let t1 = d.call(0.0);
        assert!(d.is_due(t1, 10.0));
        let t2 = d.call(30.0);
        assert!(!d.is_due(t2, 35.0));
        assert!(d.is_due(t2, 40.0));
    }
}
