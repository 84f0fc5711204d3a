//! Paperdoro Hardware Abstraction Layer
//!
//! This crate defines the capabilities the timer core needs from the
//! appliance it runs on. Board support crates implement these traits; the
//! core, renderer and scheduler loop only ever see the traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  paperdoro-app (scheduler loop)         │
//! └─────────────────────────────────────────┘
//!          │                     │
//!          ▼                     ▼
//! ┌─────────────────┐   ┌─────────────────────┐
//! │ paperdoro-core  │   │ paperdoro-display   │
//! └─────────────────┘   └─────────────────────┘
//!          │                     │
//!          └──────────┬──────────┘
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  paperdoro-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`surface::DrawSurface`] - Buffered drawing surface with explicit commit
//! - [`touch::TouchSource`] - Touch press-edge sampling
//! - [`power::PowerSource`] - Battery sensing and suspend
//! - [`audio::Speaker`] - Blocking tone output
//! - [`storage::ImageStore`] - Image lookup for the lock screen
//! - [`clock::Monotonic`] - Millisecond monotonic time

#![no_std]
#![deny(unsafe_code)]

pub mod audio;
pub mod clock;
pub mod power;
pub mod storage;
pub mod surface;
pub mod touch;
pub mod types;

// Re-export key traits at crate root for convenience
pub use audio::Speaker;
pub use clock::{Clock, Monotonic};
pub use power::PowerSource;
pub use storage::{ImageStore, StorageError};
pub use surface::{DrawSurface, RefreshMode, SurfaceError};
pub use touch::TouchSource;
pub use types::{Point, Rect, Shape, TextAlign, TextSize, Tone};
