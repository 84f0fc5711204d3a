//! Render requests
//!
//! The timer engine and the input dispatcher never draw. They describe what
//! the panel needs as a [`RenderRequest`]; the scheduler merges all requests
//! of one iteration and hands the result to the renderer once.

pub mod request;

pub use request::{RenderRequest, Repaint};
