use crate::numerical::energy_accumulation::{
    EnergyModelParams, EnergyTotals, PowerExtremum, daily_peak, daily_trough,
};
use crate::plotting::chart_geometry::EnergyChart;
use crate::plotting::coordinate_mapper::CanvasConfig;
use crate::simulator::config::SimulatorConfig;
use crate::simulator::errors::SimulatorError;
use crate::simulator::parameters::{ParameterId, ParameterSpec};
use log::{debug, info, warn};

/// Everything derived from one `(A, B)` pair at a fixed price
#[derive(Debug, Clone, PartialEq)]
pub struct EnergySnapshot {
    pub params: EnergyModelParams,
    pub totals: EnergyTotals,
    pub peak: PowerExtremum,
    pub trough: PowerExtremum,
    pub chart: EnergyChart,
}

impl EnergySnapshot {
    pub fn compute(
        base_load: f64,
        amplitude: f64,
        rate: f64,
        canvas: CanvasConfig,
    ) -> Result<Self, SimulatorError> {
        debug_assert!(base_load > 0.0 && amplitude >= 0.0);
        let params = EnergyModelParams::new(base_load, amplitude, rate)?;
        if params.allows_negative_power() {
            warn!(
                "amplitude {} exceeds base load {}: power goes negative around the trough",
                amplitude, base_load
            );
        }
        let chart = EnergyChart::build(&params, canvas)?;
        Ok(Self {
            params,
            totals: params.totals(),
            peak: daily_peak(base_load, amplitude),
            trough: daily_trough(base_load, amplitude),
            chart,
        })
    }
}

/// Reactive state of the daily energy accumulation; the price comes from the configuration.
#[derive(Debug, Clone)]
pub struct EnergyState {
    base_load: ParameterSpec,
    amplitude: ParameterSpec,
    rate: f64,
    canvas: CanvasConfig,
    snapshot: EnergySnapshot,
}

impl EnergyState {
    pub fn new(config: &SimulatorConfig) -> Result<Self, SimulatorError> {
        config.validate()?;
        let energy = &config.energy;
        let base_load = ParameterSpec::from_range(ParameterId::BaseLoad, &energy.base_load)?;
        let amplitude = ParameterSpec::from_range(ParameterId::Amplitude, &energy.amplitude)?;
        let canvas = config.canvas_config()?;
        let snapshot =
            EnergySnapshot::compute(base_load.value(), amplitude.value(), energy.price_per_kwh, canvas)?;
        info!(
            "energy state ready: {:.1} kWh per day, ${:.2}",
            snapshot.totals.total_energy, snapshot.totals.total_cost
        );
        Ok(Self {
            base_load,
            amplitude,
            rate: energy.price_per_kwh,
            canvas,
            snapshot,
        })
    }

    pub fn snapshot(&self) -> &EnergySnapshot {
        &self.snapshot
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn parameters(&self) -> [&ParameterSpec; 2] {
        [&self.base_load, &self.amplitude]
    }

    pub fn parameter(&self, id: ParameterId) -> Option<&ParameterSpec> {
        match id {
            ParameterId::BaseLoad => Some(&self.base_load),
            ParameterId::Amplitude => Some(&self.amplitude),
            _ => None,
        }
    }

    pub fn set_base_load(&mut self, value: f64) -> Result<&EnergySnapshot, SimulatorError> {
        self.set(ParameterId::BaseLoad, value)
    }

    pub fn set_amplitude(&mut self, value: f64) -> Result<&EnergySnapshot, SimulatorError> {
        self.set(ParameterId::Amplitude, value)
    }

    pub fn set(&mut self, id: ParameterId, value: f64) -> Result<&EnergySnapshot, SimulatorError> {
        let mut base_load = self.base_load.clone();
        let mut amplitude = self.amplitude.clone();
        match id {
            ParameterId::BaseLoad => base_load.set(value)?,
            ParameterId::Amplitude => amplitude.set(value)?,
            other => return Err(SimulatorError::UnknownParameter(other)),
        };
        let snapshot =
            EnergySnapshot::compute(base_load.value(), amplitude.value(), self.rate, self.canvas)?;
        debug!(
            "{} = {}: {:.1} kWh, ${:.2}",
            id, value, snapshot.totals.total_energy, snapshot.totals.total_cost
        );
        self.base_load = base_load;
        self.amplitude = amplitude;
        self.snapshot = snapshot;
        Ok(&self.snapshot)
    }
}
