//! Daily energy consumption as a definite integral of instantaneous power.
//!
//! Power follows `E(t) = A + B*sin(2*pi*t/24)`: a constant base load `A` and a sinusoidal
//! variation of amplitude `B` with a period of 24 hours.
//!
//! The antiderivative is `A*t - (12*B/pi)*cos(2*pi*t/24)`. Over exactly one period the cosine
//! term takes the same value at both ends, so the total is `24*A` regardless of `B`.
use crate::numerical::scalar_function::ScalarFunction;
use std::f64::consts::PI;
use std::fmt;

/// length of one cycle of the power model (hours)
pub const PERIOD_HOURS: f64 = 24.0;
/// default price of one kWh
pub const DEFAULT_PRICE_PER_KWH: f64 = 0.15;

const OMEGA: f64 = 2.0 * PI / PERIOD_HOURS;

#[derive(Debug, Clone, PartialEq)]
pub enum EnergyModelError {
    NonPositiveBaseLoad(f64),
    NegativeAmplitude(f64),
    NonPositiveRate(f64),
}

impl fmt::Display for EnergyModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EnergyModelError::NonPositiveBaseLoad(v) => {
                write!(f, "base load must be positive and finite, got {}", v)
            }
            EnergyModelError::NegativeAmplitude(v) => {
                write!(f, "amplitude must be non-negative and finite, got {}", v)
            }
            EnergyModelError::NonPositiveRate(v) => {
                write!(f, "price per energy unit must be positive and finite, got {}", v)
            }
        }
    }
}

impl std::error::Error for EnergyModelError {}

/// Parameters of the power model.
///
/// `amplitude <= base_load` is not enforced; with a larger amplitude the model produces
/// negative power around the daily trough. See [`EnergyModelParams::allows_negative_power`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyModelParams {
    base_load: f64,
    amplitude: f64,
    rate: f64,
}

impl EnergyModelParams {
    pub fn new(base_load: f64, amplitude: f64, rate: f64) -> Result<Self, EnergyModelError> {
        if !(base_load.is_finite() && base_load > 0.0) {
            return Err(EnergyModelError::NonPositiveBaseLoad(base_load));
        }
        if !(amplitude.is_finite() && amplitude >= 0.0) {
            return Err(EnergyModelError::NegativeAmplitude(amplitude));
        }
        if !(rate.is_finite() && rate > 0.0) {
            return Err(EnergyModelError::NonPositiveRate(rate));
        }
        Ok(Self {
            base_load,
            amplitude,
            rate,
        })
    }

    /// A, kW
    pub fn base_load(&self) -> f64 {
        self.base_load
    }

    /// B, kW
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// price per kWh
    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn allows_negative_power(&self) -> bool {
        self.amplitude > self.base_load
    }

    pub fn totals(&self) -> EnergyTotals {
        let total_energy = total_energy(self.base_load, self.amplitude);
        EnergyTotals {
            total_energy,
            total_cost: energy_cost(total_energy, self.rate),
        }
    }

    pub fn power_function(&self) -> PowerFunction {
        PowerFunction::new(self.base_load, self.amplitude)
    }
}

/// Energy and its price over one full period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyTotals {
    /// kWh
    pub total_energy: f64,
    pub total_cost: f64,
}

/// A point of the daily power curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerExtremum {
    pub t: f64,
    pub power: f64,
}

/// `E(t) = A + B*sin(2*pi*t/24)`
pub fn instantaneous_power(t: f64, base_load: f64, amplitude: f64) -> f64 {
    base_load + amplitude * (OMEGA * t).sin()
}

/// `∫_0^24 E(t) dt = 24*A`.
///
/// Only valid because the window is exactly one period; this is not a general integrator.
pub fn total_energy(base_load: f64, _amplitude: f64) -> f64 {
    PERIOD_HOURS * base_load
}

/// `∫_0^t E(s) ds = A*t + (12*B/pi)*(1 - cos(2*pi*t/24))`
pub fn cumulative_energy(t: f64, base_load: f64, amplitude: f64) -> f64 {
    base_load * t + amplitude / OMEGA * (1.0 - (OMEGA * t).cos())
}

pub fn energy_cost(total_energy: f64, price_per_unit: f64) -> f64 {
    total_energy * price_per_unit
}

/// maximum of the daily curve, reached a quarter period into the day
pub fn daily_peak(base_load: f64, amplitude: f64) -> PowerExtremum {
    PowerExtremum {
        t: PERIOD_HOURS / 4.0,
        power: base_load + amplitude,
    }
}

/// minimum of the daily curve, reached three quarters into the day
pub fn daily_trough(base_load: f64, amplitude: f64) -> PowerExtremum {
    PowerExtremum {
        t: 3.0 * PERIOD_HOURS / 4.0,
        power: base_load - amplitude,
    }
}

/// Power model as a [`ScalarFunction`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerFunction {
    base_load: f64,
    amplitude: f64,
}

impl PowerFunction {
    pub fn new(base_load: f64, amplitude: f64) -> Self {
        Self {
            base_load,
            amplitude,
        }
    }
}

impl ScalarFunction for PowerFunction {
    fn evaluate(&self, t: f64) -> f64 {
        instantaneous_power(t, self.base_load, self.amplitude)
    }

    fn derivative(&self, t: f64) -> Option<f64> {
        Some(self.amplitude * OMEGA * (OMEGA * t).cos())
    }

    fn second_derivative(&self, t: f64) -> Option<f64> {
        Some(-self.amplitude * OMEGA * OMEGA * (OMEGA * t).sin())
    }

    fn name(&self) -> &str {
        "power A + B*sin(2*pi*t/24)"
    }
}
