//! Slider-like inputs: a value confined to `[min, max]` on a grid of `step`.
//!
//! Whatever the caller writes, the stored value is always finite, inside the declared range
//! and on the step grid anchored at `min`; the models downstream never see anything else.
use crate::simulator::config::RangeConfig;
use log::debug;
use std::fmt;
use strum_macros::{Display, EnumIter};

/// more decimals than any sensible step has
const MAX_STEP_DECIMALS: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ParameterId {
    #[strum(to_string = "k1")]
    K1,
    #[strum(to_string = "k2")]
    K2,
    #[strum(to_string = "user_x")]
    UserX,
    #[strum(to_string = "base_load")]
    BaseLoad,
    #[strum(to_string = "amplitude")]
    Amplitude,
}

impl ParameterId {
    pub fn label(&self) -> &'static str {
        match self {
            ParameterId::K1 => "Hardware cost coefficient (k1)",
            ParameterId::K2 => "Inefficiency penalty (k2)",
            ParameterId::UserX => "Your RAM allocation",
            ParameterId::BaseLoad => "Base load (A)",
            ParameterId::Amplitude => "Load amplitude (B)",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            ParameterId::K1 | ParameterId::K2 => "",
            ParameterId::UserX => "GB",
            ParameterId::BaseLoad | ParameterId::Amplitude => "kW",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    NotFinite { id: ParameterId, value: f64 },
    InvalidRange { id: ParameterId, msg: String },
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParameterError::NotFinite { id, value } => {
                write!(f, "{} cannot be set to {}", id, value)
            }
            ParameterError::InvalidRange { id, msg } => write!(f, "{}: {}", id, msg),
        }
    }
}

impl std::error::Error for ParameterError {}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub id: ParameterId,
    pub label: &'static str,
    pub unit: &'static str,
    value: f64,
    min: f64,
    max: f64,
    step: f64,
}

impl ParameterSpec {
    pub fn new(id: ParameterId, value: f64, min: f64, max: f64, step: f64) -> Result<Self, ParameterError> {
        let invalid = |msg: String| ParameterError::InvalidRange { id, msg };
        if ![value, min, max, step].iter().all(|v| v.is_finite()) {
            return Err(invalid("range values must be finite".to_string()));
        }
        if min > max {
            return Err(invalid(format!("empty range [{}, {}]", min, max)));
        }
        if step <= 0.0 {
            return Err(invalid(format!("step must be positive, got {}", step)));
        }
        if value < min || value > max {
            return Err(invalid(format!("{} outside [{}, {}]", value, min, max)));
        }
        Ok(Self {
            id,
            label: id.label(),
            unit: id.unit(),
            value,
            min,
            max,
            step,
        })
    }

    pub fn from_range(id: ParameterId, range: &RangeConfig) -> Result<Self, ParameterError> {
        Self::new(id, range.initial, range.min, range.max, range.step)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// What `set(raw)` would store, without storing it
    pub fn normalize(&self, raw: f64) -> Result<f64, ParameterError> {
        if !raw.is_finite() {
            return Err(ParameterError::NotFinite { id: self.id, value: raw });
        }
        let clamped = raw.clamp(self.min, self.max);
        let k = ((clamped - self.min) / self.step).round();
        let snapped = round_decimals(self.min + k * self.step, step_decimals(self.step));
        Ok(snapped.clamp(self.min, self.max))
    }

    /// Clamp, snap to the grid, clamp again; returns the stored value
    pub fn set(&mut self, raw: f64) -> Result<f64, ParameterError> {
        let value = self.normalize(raw)?;
        if value != raw {
            debug!("{}: requested {} stored as {}", self.id, raw, value);
        }
        self.value = value;
        Ok(value)
    }

    /// `"2.0 GB"`, `"128"`; the step fixes the number of decimals
    pub fn display_value(&self) -> String {
        let decimals = step_decimals(self.step) as usize;
        if self.unit.is_empty() {
            format!("{:.*}", decimals, self.value)
        } else {
            format!("{:.*} {}", decimals, self.value, self.unit)
        }
    }
}

/// number of decimals needed to write `step` exactly, capped
fn step_decimals(step: f64) -> i32 {
    let mut scaled = step;
    for d in 0..MAX_STEP_DECIMALS {
        if (scaled - scaled.round()).abs() < 1e-9 * scaled.abs().max(1.0) {
            return d;
        }
        scaled *= 10.0;
    }
    MAX_STEP_DECIMALS
}

/// removes the representation noise of `min + k*step` (e.g. 0.5 + 15*0.1)
fn round_decimals(x: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (x * scale).round() / scale
}
