//! Rendering for the Paperdoro e-paper timer
//!
//! This crate provides:
//! - `RenderEngine`, which turns a `RenderRequest` into the smallest set of
//!   drawing calls and panel refreshes that brings the screen up to date
//! - `GraphicsSurface`, a `DrawSurface` over any `embedded-graphics`
//!   grayscale panel
//! - `FrameBuffer` (feature `alloc`), an in-memory panel that records
//!   refreshes and can be inspected pixel by pixel
//!
//! # Architecture
//!
//! The renderer only ever talks to the `DrawSurface` trait from
//! `paperdoro-hal`. Board crates either implement that trait directly for
//! their panel controller, or implement [`graphics::Panel`] for an
//! `embedded-graphics` draw target and wrap it in a [`GraphicsSurface`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

pub mod error;
#[cfg(any(test, feature = "alloc"))]
pub mod framebuffer;
pub mod graphics;
pub mod renderer;
pub mod widgets;

// Re-export key types
pub use error::DisplayError;
#[cfg(any(test, feature = "alloc"))]
pub use framebuffer::FrameBuffer;
pub use graphics::{GraphicsSurface, Panel};
pub use renderer::{LockScreen, RenderEngine, RenderView};
