//! Paperdoro scheduler loop
//!
//! Ties the timer core, the renderer and the board collaborators together:
//!
//! - `config`: embedded `appliance.toml`, parsed with a minimal no_std
//!   parser and validated, with a fallback to defaults
//! - `appliance`: the single context object owning all mutable state and the
//!   cooperative loop that drives it
//!
//! Board support crates construct a [`appliance::Board`] from their drivers
//! and call [`appliance::Appliance::run`], which only returns if the
//! suspend primitive does.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Logging macros; must come first so later modules can use them
#[macro_use]
mod fmt;

pub mod appliance;
pub mod config;

#[cfg(test)]
mod testing;

pub use appliance::{Appliance, Board, Step};
pub use config::{load_config, parse_config, ParseError, EMBEDDED_CONFIG};
