pub mod contact;
pub mod nav;
pub mod theme;
pub mod tooltip;

pub use nav::NavMenu;
pub use theme::{MemoryStore, PreferenceStore, ThemeController};
pub use tooltip::Tooltip;
