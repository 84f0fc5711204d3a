//! Touch input
//!
//! A fixed table of seven buttons, hit testing, debouncing and the mapping
//! from a pressed button to timer operations.

pub mod buttons;
pub mod dispatcher;

pub use buttons::{ButtonKind, ButtonSpec, ButtonTable, Icon, BUTTON_COUNT};
pub use dispatcher::{Beep, Dispatch, Dispatcher, Press};
