//! Configuration types
//!
//! Board-agnostic appliance settings. The scheduler loop loads them once at
//! boot; nothing mutates them afterwards.

pub mod types;

pub use types::*;
