use crate::numerical::cost_optimization::{CostModelParams, OptimalPoint, SavingsReport};
use crate::plotting::chart_geometry::OptimizationChart;
use crate::plotting::coordinate_mapper::CanvasConfig;
use crate::simulator::config::SimulatorConfig;
use crate::simulator::errors::SimulatorError;
use crate::simulator::parameters::{ParameterId, ParameterSpec};
use log::{debug, info};

/// Everything derived from one `(k1, k2, user_x)` triple
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationSnapshot {
    pub params: CostModelParams,
    pub optimal: OptimalPoint,
    pub savings: SavingsReport,
    pub chart: OptimizationChart,
}

impl OptimizationSnapshot {
    pub fn compute(k1: f64, k2: f64, user_x: f64, canvas: CanvasConfig) -> Result<Self, SimulatorError> {
        debug_assert!(k1 > 0.0 && k2 > 0.0 && user_x > 0.0);
        let params = CostModelParams::new(k1, k2, user_x)?;
        let optimal = params.optimal_point();
        let savings = params.savings();
        let chart = OptimizationChart::build(&params, &optimal, canvas)?;
        Ok(Self {
            params,
            optimal,
            savings,
            chart,
        })
    }
}

/// Reactive state of the RAM cost minimization.
/// Every setter recomputes the whole snapshot; a failed update leaves the previous one in place.
#[derive(Debug, Clone)]
pub struct OptimizationState {
    k1: ParameterSpec,
    k2: ParameterSpec,
    user_x: ParameterSpec,
    canvas: CanvasConfig,
    snapshot: OptimizationSnapshot,
}

impl OptimizationState {
    /// Rejects a configuration that `SimulatorConfig::validate` rejects, including hand-built ones
    pub fn new(config: &SimulatorConfig) -> Result<Self, SimulatorError> {
        config.validate()?;
        let ranges = &config.optimization;
        let k1 = ParameterSpec::from_range(ParameterId::K1, &ranges.k1)?;
        let k2 = ParameterSpec::from_range(ParameterId::K2, &ranges.k2)?;
        let user_x = ParameterSpec::from_range(ParameterId::UserX, &ranges.user_x)?;
        let canvas = config.canvas_config()?;
        let snapshot = OptimizationSnapshot::compute(k1.value(), k2.value(), user_x.value(), canvas)?;
        info!(
            "optimization state ready: optimum {:.3} GB at {:.3} $/h",
            snapshot.optimal.x, snapshot.optimal.cost
        );
        Ok(Self {
            k1,
            k2,
            user_x,
            canvas,
            snapshot,
        })
    }

    pub fn snapshot(&self) -> &OptimizationSnapshot {
        &self.snapshot
    }

    pub fn parameters(&self) -> [&ParameterSpec; 3] {
        [&self.k1, &self.k2, &self.user_x]
    }

    pub fn parameter(&self, id: ParameterId) -> Option<&ParameterSpec> {
        match id {
            ParameterId::K1 => Some(&self.k1),
            ParameterId::K2 => Some(&self.k2),
            ParameterId::UserX => Some(&self.user_x),
            _ => None,
        }
    }

    pub fn set_k1(&mut self, value: f64) -> Result<&OptimizationSnapshot, SimulatorError> {
        self.set(ParameterId::K1, value)
    }

    pub fn set_k2(&mut self, value: f64) -> Result<&OptimizationSnapshot, SimulatorError> {
        self.set(ParameterId::K2, value)
    }

    pub fn set_user_x(&mut self, value: f64) -> Result<&OptimizationSnapshot, SimulatorError> {
        self.set(ParameterId::UserX, value)
    }

    pub fn set(&mut self, id: ParameterId, value: f64) -> Result<&OptimizationSnapshot, SimulatorError> {
        let mut k1 = self.k1.clone();
        let mut k2 = self.k2.clone();
        let mut user_x = self.user_x.clone();
        match id {
            ParameterId::K1 => k1.set(value)?,
            ParameterId::K2 => k2.set(value)?,
            ParameterId::UserX => user_x.set(value)?,
            other => return Err(SimulatorError::UnknownParameter(other)),
        };
        let snapshot = OptimizationSnapshot::compute(k1.value(), k2.value(), user_x.value(), self.canvas)?;
        debug!(
            "{} = {}: optimum {:.4} GB, savings {:.2}%",
            id,
            value,
            snapshot.optimal.x,
            snapshot.savings.savings_percent
        );
        self.k1 = k1;
        self.k2 = k2;
        self.user_x = user_x;
        self.snapshot = snapshot;
        Ok(&self.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::config::{ConfigError, RangeConfig};
    use approx::assert_relative_eq;

    fn state() -> OptimizationState {
        OptimizationState::new(&SimulatorConfig::default()).unwrap()
    }

    #[test]
    fn test_initial_snapshot() {
        let s = state();
        let snap = s.snapshot();
        assert_relative_eq!(snap.optimal.x, 32f64.cbrt(), epsilon = 1e-12);
        assert_relative_eq!(snap.savings.current_cost, 72.0, epsilon = 1e-12);
        assert_relative_eq!(snap.savings.savings_percent, 16.005, epsilon = 1e-3);
        assert!(snap.chart.current.is_some());
    }

    #[test]
    fn test_setters_recompute_everything() {
        let mut s = state();
        let snap = s.set_k2(250.0).unwrap().clone();
        assert_eq!(snap.params.k2(), 250.0);
        assert_relative_eq!(snap.optimal.x, (250.0f64 / 4.0).cbrt(), epsilon = 1e-12);
        assert_eq!(snap.chart, OptimizationChart::build(&snap.params, &snap.optimal, CanvasConfig::default()).unwrap());

        let snap = s.set_k1(4.0).unwrap();
        assert_eq!(snap.params.k1(), 4.0);
        assert_eq!(snap.params.k2(), 250.0);
        assert_relative_eq!(snap.optimal.x, (250.0f64 / 8.0).cbrt(), epsilon = 1e-12);

        let snap = s.set_user_x(5.0).unwrap();
        assert_eq!(snap.params.user_x(), 5.0);
        assert_relative_eq!(snap.savings.current_cost, 4.0 * 25.0 + 50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_written_values_are_normalized() {
        let mut s = state();
        let snap = s.set(ParameterId::UserX, 0.0).unwrap();
        assert_eq!(snap.params.user_x(), 1.0);
        let snap = s.set(ParameterId::K1, 1e9).unwrap();
        assert_eq!(snap.params.k1(), 10.0);
        assert_eq!(s.parameter(ParameterId::K1).unwrap().value(), 10.0);
    }

    #[test]
    fn test_failed_update_keeps_previous_snapshot() {
        let mut s = state();
        let before = s.snapshot().clone();
        assert!(matches!(
            s.set_k1(f64::NAN),
            Err(SimulatorError::Parameter(_))
        ));
        assert!(matches!(
            s.set(ParameterId::Amplitude, 3.0),
            Err(SimulatorError::UnknownParameter(ParameterId::Amplitude))
        ));
        assert_eq!(*s.snapshot(), before);
        assert!(s.parameter(ParameterId::BaseLoad).is_none());
    }

    #[test]
    fn test_zero_lower_bound_in_hand_built_config() {
        let mut config = SimulatorConfig::default();
        config.optimization.user_x = RangeConfig::new(2.0, 0.0, 10.0, 0.1);
        assert!(matches!(
            OptimizationState::new(&config),
            Err(SimulatorError::Config(ConfigError::Invalid(_)))
        ));
        let mut config = SimulatorConfig::default();
        config.optimization.k1 = RangeConfig::new(2.0, 0.0, 10.0, 0.1);
        assert!(OptimizationState::new(&config).is_err());
    }

    #[test]
    fn test_repeated_writes_are_idempotent() {
        let mut s = state();
        let first = s.set_k2(300.0).unwrap().clone();
        let second = s.set_k2(300.0).unwrap().clone();
        assert_eq!(first, second);
    }
}
