//! Rate limiting and deferred execution.
//!
//! Everything here is expressed against a caller-supplied clock in
//! milliseconds so the same logic runs under `performance.now()` in the
//! browser and under a virtual clock in tests.

pub mod debounce;
pub mod scheduler;
pub mod throttle;

pub use debounce::{Debounce, DebounceTicket};
pub use scheduler::{Scheduler, TimerId};
pub use throttle::Throttle;
