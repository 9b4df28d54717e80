//! Core types used throughout the library.

pub mod config;
pub mod event;
pub mod message;

// Re-export commonly used types
pub use config::*;
pub use event::*;
pub use message::*;
