//! Single-field reveal and erase steppers.
//!
//! Each stepper advances one character per call. The caller owns the clock:
//! it calls `step` once immediately and then once per character delay until
//! a terminal step comes back.

/// Result of one [`TypeWriter::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeStep {
    /// One more character is visible; `text` is everything revealed so far.
    Revealed { text: String },
    /// All characters are visible. The caret should be appended now.
    Finished,
    /// Already finished; nothing to do.
    Idle,
}

/// Reveals a string one character at a time, starting from empty.
#[derive(Debug, Clone)]
pub struct TypeWriter {
    chars: Vec<char>,
    revealed: usize,
    finished: bool,
}

impl TypeWriter {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            revealed: 0,
            finished: false,
        }
    }

    pub fn step(&mut self) -> TypeStep {
        if self.revealed < self.chars.len() {
            self.revealed += 1;
            TypeStep::Revealed {
                text: self.visible(),
            }
        } else if !self.finished {
            self.finished = true;
            TypeStep::Finished
        } else {
            TypeStep::Idle
        }
    }

    pub fn visible(&self) -> String {
        self.chars[..self.revealed].iter().collect()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Result of one [`Eraser::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EraseStep {
    /// The last character was dropped; `text` is what remains.
    Removed { text: String, caret_removed: bool },
    /// Content is empty.
    Finished { caret_removed: bool },
    Idle,
}

/// Removes characters from the end of a string until it is empty.
///
/// The caret marker, if present, goes first, in the same step as the first
/// character.
#[derive(Debug, Clone)]
pub struct Eraser {
    chars: Vec<char>,
    caret: bool,
    finished: bool,
}

impl Eraser {
    pub fn new(current: &str, has_caret: bool) -> Self {
        Self {
            chars: current.chars().collect(),
            caret: has_caret,
            finished: false,
        }
    }

    pub fn step(&mut self) -> EraseStep {
        if self.finished {
            return EraseStep::Idle;
        }
        let caret_removed = std::mem::take(&mut self.caret);
        if self.chars.pop().is_some() {
            EraseStep::Removed {
                text: self.chars.iter().collect(),
                caret_removed,
            }
        } else {
            self.finished = true;
            EraseStep::Finished { caret_removed }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reveals_then_finishes_once() {
        let mut tw = TypeWriter::new("hi");
        assert_eq!(tw.step(), TypeStep::Revealed { text: "h".into() });
        assert_eq!(tw.step(), TypeStep::Revealed { text: "hi".into() });
        assert_eq!(tw.step(), TypeStep::Finished);
        assert_eq!(tw.step(), TypeStep::Idle);
        assert!(tw.is_finished());
    }

    #[test]
    fn empty_text_finishes_on_first_step() {
        let mut tw = TypeWriter::new("");
        assert_eq!(tw.step(), TypeStep::Finished);
    }

    #[test]
    fn reveals_by_char_not_byte() {
        let mut tw = TypeWriter::new("Kỹ sư");
        let steps: Vec<_> = std::iter::from_fn(|| match tw.step() {
            TypeStep::Revealed { text } => Some(text),
            _ => None,
        })
        .collect();
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[1], "Kỹ");
    }

    #[test]
    fn eraser_drops_caret_with_first_char() {
        let mut er = Eraser::new("ab", true);
        assert_eq!(
            er.step(),
            EraseStep::Removed {
                text: "a".into(),
                caret_removed: true
            }
        );
        assert_eq!(
            er.step(),
            EraseStep::Removed {
                text: String::new(),
                caret_removed: false
            }
        );
        assert_eq!(er.step(), EraseStep::Finished { caret_removed: false });
        assert_eq!(er.step(), EraseStep::Idle);
    }

    #[test]
    fn erasing_empty_content_with_caret() {
        let mut er = Eraser::new("", true);
        assert_eq!(er.step(), EraseStep::Finished { caret_removed: true });
        assert!(er.is_finished());
    }
}
