use crate::simulator::config::SimulatorConfig;
use crate::simulator::energy_state::EnergyState;
use crate::simulator::errors::SimulatorError;
use crate::simulator::optimization_state::OptimizationState;
use crate::simulator::parameters::{ParameterId, ParameterSpec};
use log::info;
use std::path::Path;

/// The two simulations side by side, as the dashboard shows them
#[derive(Debug, Clone)]
pub struct SimulatorSession {
    pub optimization: OptimizationState,
    pub energy: EnergyState,
}

impl SimulatorSession {
    pub fn new(config: &SimulatorConfig) -> Result<Self, SimulatorError> {
        Ok(Self {
            optimization: OptimizationState::new(config)?,
            energy: EnergyState::new(config)?,
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SimulatorError> {
        let path = path.as_ref();
        let config = SimulatorConfig::from_file(path)?;
        info!("configuration loaded from {}", path.display());
        Self::new(&config)
    }

    /// Routes the write to whichever simulation owns `id`; returns the stored value
    pub fn set(&mut self, id: ParameterId, value: f64) -> Result<f64, SimulatorError> {
        match id {
            ParameterId::K1 | ParameterId::K2 | ParameterId::UserX => {
                self.optimization.set(id, value)?;
                self.stored(id)
            }
            ParameterId::BaseLoad | ParameterId::Amplitude => {
                self.energy.set(id, value)?;
                self.stored(id)
            }
        }
    }

    pub fn parameter(&self, id: ParameterId) -> Option<&ParameterSpec> {
        self.optimization
            .parameter(id)
            .or_else(|| self.energy.parameter(id))
    }

    fn stored(&self, id: ParameterId) -> Result<f64, SimulatorError> {
        self.parameter(id)
            .map(|p| p.value())
            .ok_or(SimulatorError::UnknownParameter(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::config::{ConfigError, RangeConfig};
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_parameter_is_routed() {
        let mut session = SimulatorSession::new(&SimulatorConfig::default()).unwrap();
        for id in ParameterId::iter() {
            let spec = session.parameter(id).unwrap().clone();
            let stored = session.set(id, spec.max()).unwrap();
            assert_eq!(stored, spec.max());
        }
        assert_eq!(session.optimization.snapshot().params.k1(), 10.0);
        assert_eq!(session.optimization.snapshot().params.k2(), 500.0);
        assert_eq!(session.energy.snapshot().params.base_load(), 50.0);
        assert_eq!(session.energy.snapshot().params.amplitude(), 20.0);
    }

    #[test]
    fn test_writes_stay_in_their_simulation() {
        let mut session = SimulatorSession::new(&SimulatorConfig::default()).unwrap();
        let energy_before = session.energy.snapshot().clone();
        session.set(ParameterId::K2, 200.0).unwrap();
        assert_eq!(*session.energy.snapshot(), energy_before);
    }

    #[test]
    fn test_invalid_ranges_never_reach_the_models() {
        let mut config = SimulatorConfig::default();
        config.optimization.user_x = RangeConfig::new(2.0, 0.0, 10.0, 0.1);
        assert!(matches!(
            SimulatorSession::new(&config),
            Err(SimulatorError::Config(ConfigError::Invalid(_)))
        ));
        // with the declared ranges a zero write clamps to the lower bound
        let mut session = SimulatorSession::new(&SimulatorConfig::default()).unwrap();
        assert_eq!(session.set(ParameterId::UserX, 0.0).unwrap(), 1.0);
        assert_eq!(session.set(ParameterId::BaseLoad, 0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finops.toml");
        std::fs::write(&path, "[energy.base_load]\ninitial = 20.0\nmin = 1.0\nmax = 50.0\nstep = 1.0\n")
            .unwrap();
        let session = SimulatorSession::from_file(&path).unwrap();
        assert_eq!(session.energy.snapshot().totals.total_energy, 480.0);
        assert!(matches!(
            SimulatorSession::from_file(dir.path().join("nope.toml")),
            Err(SimulatorError::Config(_))
        ));
    }
}
