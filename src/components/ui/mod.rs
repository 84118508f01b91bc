pub mod alert;
pub mod control;
pub mod section;

// Re-export component symbols so callers can `use crate::components::ui::SectionCard` etc.
pub use alert::*;
pub use control::*;
pub use section::*;
