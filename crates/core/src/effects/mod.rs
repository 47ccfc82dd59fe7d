pub mod background;
pub mod counter;
pub mod reveal;
pub mod scroll;

pub use background::{FollowLoop, LoopAction, PointerFollow};
pub use counter::{CounterAnimation, CounterFrame, parse_counter_target};
pub use reveal::{OneShotSet, RevealKind};
pub use scroll::{ScrollFrame, ScrollSnapshot, SectionSpan};
