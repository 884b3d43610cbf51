//! Backlight Brightness Control
//!
//! Adjusts a Linux sysfs backlight by a signed percentage of its maximum.

pub mod args;
pub mod brightness;
pub mod config;
pub mod device;
pub mod errors;
pub mod logging;

// Re-export commonly used types
pub use brightness::{
    compute_brightness, Adjustment, AdjustmentRequest, BrightnessAdjuster, BrightnessState,
};
pub use config::Config;
pub use device::{DeviceStore, DeviceValue, MemoryDevice, SysfsDevice};
pub use errors::{BacklightError, Result};
