//! Host-independent behavior of the portfolio page.
//!
//! Nothing in this crate touches the DOM or a real clock. Components take
//! plain inputs (offsets, sizes, timer events, milliseconds) and answer with
//! [`folio_protocol::DomCommand`]s for the browser bridge to apply.

pub mod config;
pub mod effects;
pub mod text_cycle;
pub mod timing;
pub mod ui;

pub use config::{ConfigError, EffectsConfig};
