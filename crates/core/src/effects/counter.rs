/// Parse a `data-target` attribute the way `parseInt(value, 10)` does:
/// leading whitespace, an optional sign, then as many digits as there are.
/// Returns `None` when no digit follows. Digit runs beyond `i64` saturate.
pub fn parse_counter_target(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits].parse().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// One displayed value of a running counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterFrame {
    pub text: String,
    /// Final frame: the exact target is shown and no further frames follow.
    pub done: bool,
}

/// Counts from zero to `target` over a fixed duration, one step per
/// animation frame, then snaps to the exact target.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: i64,
    value: f64,
    increment: f64,
    done: bool,
}

impl CounterAnimation {
    pub fn new(target: i64, duration_ms: u32, frame_ms: u32) -> Self {
        let frames = f64::from(duration_ms) / f64::from(frame_ms.max(1));
        Self {
            target,
            value: 0.0,
            increment: target as f64 / frames,
            done: false,
        }
    }

    /// Advance one frame. `None` once the final frame has been produced.
    pub fn step(&mut self) -> Option<CounterFrame> {
        if self.done {
            return None;
        }
        self.value += self.increment;
        if self.value < self.target as f64 {
            Some(CounterFrame {
                text: format!("{}+", self.value.floor() as i64),
                done: false,
            })
        } else {
            self.done = true;
            Some(CounterFrame {
                text: format!("{}+", self.target),
                done: true,
            })
        }
    }
}

impl Iterator for CounterAnimation {
    type Item = CounterFrame;

    fn next(&mut self) -> Option<CounterFrame> {
        self.step()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn oversized_targets_saturate() {
        assert_eq!(parse_counter_target("99999999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_counter_target("-99999999999999999999999k"), Some(-i64::MAX));
    }

    #[test]
    fn parses_like_parse_int() {
        assert_eq!(parse_counter_target("50"), Some(50));
        assert_eq!(parse_counter_target("  12px"), Some(12));
        assert_eq!(parse_counter_target("-3"), Some(-3));
        assert_eq!(parse_counter_target("+8"), Some(8));
        assert_eq!(parse_counter_target("abc"), None);
        assert_eq!(parse_counter_target(""), None);
        assert_eq!(parse_counter_target("-"), None);
    }

    #[test]
    fn runs_for_duration_over_frame_steps() {
        let frames: Vec<_> = CounterAnimation::new(125, 2000, 16).collect();
        // 125 increments of 1.0; the 125th reaches the target.
        assert_eq!(frames.len(), 125);
        assert_eq!(frames[0].text, "1+");
        let last = frames.last().unwrap();
        assert_eq!(last.text, "125+");
        assert!(last.done);
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let mut counter = CounterAnimation::new(0, 2000, 16);
        assert_eq!(
            counter.step(),
            Some(CounterFrame {
                text: "0+".into(),
                done: true
            })
        );
        assert_eq!(counter.step(), None);
    }

    #[test]
    fn fractional_increments_floor_until_snap() {
        let frames: Vec<_> = CounterAnimation::new(3, 2000, 16).collect();
        assert!(frames.iter().rev().skip(1).all(|f| f.text != "3+"));
        assert_eq!(frames.last().unwrap().text, "3+");
    }
}
