//! Activity and power monitoring
//!
//! Decides when the appliance has been idle long enough to suspend and when
//! the battery is due for another sample.

pub mod battery;
pub mod monitor;

pub use battery::{BatteryMonitor, BatteryStatus};
pub use monitor::{ActivityMonitor, PowerStatus};
