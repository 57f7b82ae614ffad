//! reactive parameter state: sliders in, snapshots of every derived value out
/// TOML configuration with defaults for every slider
pub mod config;
/// error type shared by the state objects
pub mod errors;
/// bounded, stepped inputs
pub mod parameters;
/// RAM cost minimization state
pub mod optimization_state;
/// daily energy accumulation state
pub mod energy_state;
/// both simulations behind one `set(ParameterId, value)` entry point
pub mod session;
