//! Bookshelf application library
//!
//! Application modules served by the Bookshelf HTTP host.

pub mod modules;

/// Re-export commonly used types
pub use modules::*;
