/// Leading-edge throttle.
///
/// The first call fires and opens a window of `limit_ms`; calls inside the
/// window are dropped, not deferred. Used for scroll (~60Hz) and the
/// spotlight pointer tracking.
#[derive(Debug, Clone)]
pub struct Throttle {
    limit_ms: f64,
    open_until: Option<f64>,
}

impl Throttle {
    pub fn new(limit_ms: u32) -> Self {
        Self {
            limit_ms: f64::from(limit_ms),
            open_until: None,
        }
    }

    /// Whether a call arriving at `now_ms` should run.
    pub fn try_fire(&mut self, now_ms: f64) -> bool {
        match self.open_until {
            Some(until) if now_ms < until => false,
            _ => {
                self.open_until = Some(now_ms + self.limit_ms);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_fires_immediately() {
        let mut t = Throttle::new(16);
        assert!(t.try_fire(1000.0));
        assert!(!t.try_fire(1000.0));
    }

    #[test]
    fn burst_collapses_to_window_rate() {
        let mut t = Throttle::new(16);
        let fired = (0..100)
            .map(|i| f64::from(i) * 2.0)
            .filter(|&now| t.try_fire(now))
            .count();
        // 200ms of events every 2ms under a 16ms window.
        assert_eq!(fired, 13);
    }

    #[test]
    fn window_reopens_exactly_at_limit() {
        let mut t = Throttle::new(50);
        assert!(t.try_fire(0.0));
        assert!(!t.try_fire(49.9));
        assert!(t.try_fire(50.0));
    }
}
