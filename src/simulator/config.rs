//! Simulator settings: slider ranges, energy price, canvas size and logging.
//!
//! Every field has a default, so an empty TOML document is a valid configuration. A partial
//! document overrides only what it names:
//! ```toml
//! [optimization.k1]
//! initial = 3.0
//! min = 1.0
//! max = 8.0
//! step = 0.5
//!
//! [energy]
//! price_per_kwh = 0.2
//! ```
use crate::numerical::energy_accumulation::DEFAULT_PRICE_PER_KWH;
use crate::plotting::coordinate_mapper::CanvasConfig;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum ConfigError {
    IOError(std::io::Error),
    ParseError(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::IOError(e) => write!(f, "cannot read configuration: {}", e),
            ConfigError::ParseError(e) => write!(f, "cannot parse configuration: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IOError(e) => Some(e),
            ConfigError::ParseError(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

/// Declared range of one slider
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeConfig {
    pub initial: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl RangeConfig {
    pub const fn new(initial: f64, min: f64, max: f64, step: f64) -> Self {
        Self {
            initial,
            min,
            max,
            step,
        }
    }

    fn validate(&self, name: &str, strictly_positive: bool) -> Result<(), ConfigError> {
        let values = [self.initial, self.min, self.max, self.step];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("{}: all values must be finite", name)));
        }
        if !(self.min <= self.initial && self.initial <= self.max) {
            return Err(ConfigError::Invalid(format!(
                "{}: initial value {} outside [{}, {}]",
                name, self.initial, self.min, self.max
            )));
        }
        if self.step <= 0.0 {
            return Err(ConfigError::Invalid(format!("{}: step must be positive", name)));
        }
        if strictly_positive && self.min <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "{}: lower bound must exclude zero, got {}",
                name, self.min
            )));
        }
        if !strictly_positive && self.min < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "{}: lower bound must be non-negative, got {}",
                name, self.min
            )));
        }
        Ok(())
    }
}

fn default_k1() -> RangeConfig {
    RangeConfig::new(2.0, 0.5, 10.0, 0.1)
}
fn default_k2() -> RangeConfig {
    RangeConfig::new(128.0, 10.0, 500.0, 10.0)
}
fn default_user_x() -> RangeConfig {
    RangeConfig::new(2.0, 1.0, 10.0, 0.1)
}
fn default_base_load() -> RangeConfig {
    RangeConfig::new(10.0, 1.0, 50.0, 1.0)
}
fn default_amplitude() -> RangeConfig {
    RangeConfig::new(5.0, 0.0, 20.0, 0.5)
}
fn default_price() -> f64 {
    DEFAULT_PRICE_PER_KWH
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizationConfig {
    #[serde(default = "default_k1")]
    pub k1: RangeConfig,
    #[serde(default = "default_k2")]
    pub k2: RangeConfig,
    #[serde(default = "default_user_x")]
    pub user_x: RangeConfig,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            k1: default_k1(),
            k2: default_k2(),
            user_x: default_user_x(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnergyConfig {
    #[serde(default = "default_base_load")]
    pub base_load: RangeConfig,
    #[serde(default = "default_amplitude")]
    pub amplitude: RangeConfig,
    #[serde(default = "default_price")]
    pub price_per_kwh: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            base_load: default_base_load(),
            amplitude: default_amplitude(),
            price_per_kwh: default_price(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasSettings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        let canvas = CanvasConfig::default();
        Self {
            width: canvas.width,
            height: canvas.height,
            padding: canvas.padding,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// debug, info, warn, error, off or none
    pub level: String,
    /// also write a timestamped log file into the working directory
    pub log_to_file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_to_file: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulatorConfig {
    pub optimization: OptimizationConfig,
    pub energy: EnergyConfig,
    pub canvas: CanvasSettings,
    pub logging: LoggingConfig,
}

impl SimulatorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SimulatorConfig = toml::from_str(text).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(ConfigError::IOError)?;
        Self::from_toml_str(&text)
    }

    /// Checks the exclusionary bounds: nothing the models divide by may reach zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.optimization.k1.validate("optimization.k1", true)?;
        self.optimization.k2.validate("optimization.k2", true)?;
        self.optimization.user_x.validate("optimization.user_x", true)?;
        self.energy.base_load.validate("energy.base_load", true)?;
        self.energy.amplitude.validate("energy.amplitude", false)?;
        let price = self.energy.price_per_kwh;
        if !(price.is_finite() && price > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "energy.price_per_kwh must be positive, got {}",
                price
            )));
        }
        self.canvas_config()?;
        match self.logging.level.as_str() {
            "debug" | "info" | "warn" | "error" | "off" | "none" => Ok(()),
            other => Err(ConfigError::Invalid(format!(
                "logging.level must be debug, info, warn, error, off or none, got '{}'",
                other
            ))),
        }
    }

    pub fn canvas_config(&self) -> Result<CanvasConfig, ConfigError> {
        CanvasConfig::new(self.canvas.width, self.canvas.height, self.canvas.padding)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
