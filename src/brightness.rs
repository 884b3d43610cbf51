use crate::device::{DeviceStore, DeviceValue};
use crate::errors::{BacklightError, Result};
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Brightness readings of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessState {
    pub current: u32,
    pub max: u32,
}

impl BrightnessState {
    pub fn new(current: u32, max: u32) -> Self {
        Self { current, max }
    }

    /// Current brightness as a percentage of max
    pub fn percent(&self) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        (self.current as f64 / self.max as f64) * 100.0
    }
}

impl fmt::Display for BrightnessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({:.1}%)", self.current, self.max, self.percent())
    }
}

/// Change of brightness in percentage points of max
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjustmentRequest {
    pub delta_percent: i32,
}

impl AdjustmentRequest {
    /// What the `max` keyword stands for. Since the current level is never
    /// negative, this always clamps to the device maximum.
    pub const MAX: AdjustmentRequest = AdjustmentRequest { delta_percent: 100 };

    pub fn new(delta_percent: i32) -> Self {
        Self { delta_percent }
    }
}

impl FromStr for AdjustmentRequest {
    type Err = BacklightError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("max") {
            return Ok(Self::MAX);
        }
        s.parse::<i32>().map(Self::new).map_err(|_| {
            BacklightError::Usage(format!(
                "invalid brightness value {:?}: expected a signed percentage or \"max\"",
                s
            ))
        })
    }
}

/// Outcome of a successful adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustment {
    pub previous: BrightnessState,
    pub written: u32,
}

/// Turn a relative change into an absolute device value in `0..=max`.
///
/// The target is computed in floating point and truncated toward zero
/// before clamping, so a non-exact ratio may land one unit low.
pub fn compute_brightness(state: BrightnessState, delta_percent: i32) -> u32 {
    if state.max == 0 {
        return 0;
    }
    let max = state.max as f64;
    let percent = state.percent() + delta_percent as f64;
    let result = (percent * (max / 100.0)).trunc();

    if result < 0.0 {
        0
    } else if result > max {
        state.max
    } else {
        result as u32
    }
}

/// Applies relative brightness changes to a [`DeviceStore`]
pub struct BrightnessAdjuster<S: DeviceStore> {
    store: S,
}

impl<S: DeviceStore> BrightnessAdjuster<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Read current and max, in that order. A zero max is rejected.
    pub fn read_state(&self) -> Result<BrightnessState> {
        let current = self.store.read(DeviceValue::Current)?;
        let max = self.store.read(DeviceValue::Max)?;
        if max == 0 {
            return Err(BacklightError::InvalidMax {
                path: self.store.attribute_path(DeviceValue::Max),
            });
        }
        Ok(BrightnessState::new(current, max))
    }

    /// Change brightness by `delta_percent` points of max.
    ///
    /// Nothing is written unless both reads succeed.
    pub fn apply(&self, delta_percent: i32) -> Result<Adjustment> {
        let previous = self.read_state()?;
        let written = compute_brightness(previous, delta_percent);
        debug!(
            "Brightness {} {:+}% -> {}",
            previous, delta_percent, written
        );
        self.store.write(written)?;
        Ok(Adjustment { previous, written })
    }

    pub fn apply_request(&self, request: AdjustmentRequest) -> Result<Adjustment> {
        self.apply(request.delta_percent)
    }
}
