pub mod commands;
pub mod theme;
pub mod types;

pub use commands::{DomCommand, ElementRef, Field};
pub use theme::Theme;
pub use types::{Point, Rect, Size};
