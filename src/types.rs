pub mod dvalue;
pub mod window;

// Re-export types for convenience.
pub use crate::types::dvalue::DValue;
pub use crate::types::window::{Range, Window};
