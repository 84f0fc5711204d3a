//! Board-agnostic core logic for the e-paper pomodoro timer
//!
//! This crate contains all application logic that does not depend on
//! specific hardware or on how pixels are produced:
//!
//! - Ring geometry (progress index to screen coordinate)
//! - Countdown state machine and per-second tick evaluation
//! - Render requests exchanged between engine, dispatcher and renderer
//! - Button table, hit testing and press dispatch
//! - Idle tracking and battery polling
//! - Configuration type definitions and validation

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod activity;
pub mod config;
pub mod geometry;
pub mod input;
pub mod render;
pub mod timer;
