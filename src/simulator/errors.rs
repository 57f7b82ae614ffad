use crate::numerical::cost_optimization::CostModelError;
use crate::numerical::energy_accumulation::EnergyModelError;
use crate::plotting::coordinate_mapper::MappingError;
use crate::simulator::config::ConfigError;
use crate::simulator::parameters::{ParameterError, ParameterId};
use std::fmt;

/// Everything a state update can run into
#[derive(Debug)]
pub enum SimulatorError {
    Parameter(ParameterError),
    CostModel(CostModelError),
    EnergyModel(EnergyModelError),
    Mapping(MappingError),
    Config(ConfigError),
    /// the id belongs to the other simulation
    UnknownParameter(ParameterId),
}

impl fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimulatorError::Parameter(e) => write!(f, "{}", e),
            SimulatorError::CostModel(e) => write!(f, "{}", e),
            SimulatorError::EnergyModel(e) => write!(f, "{}", e),
            SimulatorError::Mapping(e) => write!(f, "{}", e),
            SimulatorError::Config(e) => write!(f, "{}", e),
            SimulatorError::UnknownParameter(id) => {
                write!(f, "parameter {} is not part of this simulation", id)
            }
        }
    }
}

impl std::error::Error for SimulatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulatorError::Parameter(e) => Some(e),
            SimulatorError::CostModel(e) => Some(e),
            SimulatorError::EnergyModel(e) => Some(e),
            SimulatorError::Mapping(e) => Some(e),
            SimulatorError::Config(e) => Some(e),
            SimulatorError::UnknownParameter(_) => None,
        }
    }
}

impl From<ParameterError> for SimulatorError {
    fn from(e: ParameterError) -> Self {
        SimulatorError::Parameter(e)
    }
}

impl From<CostModelError> for SimulatorError {
    fn from(e: CostModelError) -> Self {
        SimulatorError::CostModel(e)
    }
}

impl From<EnergyModelError> for SimulatorError {
    fn from(e: EnergyModelError) -> Self {
        SimulatorError::EnergyModel(e)
    }
}

impl From<MappingError> for SimulatorError {
    fn from(e: MappingError) -> Self {
        SimulatorError::Mapping(e)
    }
}

impl From<ConfigError> for SimulatorError {
    fn from(e: ConfigError) -> Self {
        SimulatorError::Config(e)
    }
}
