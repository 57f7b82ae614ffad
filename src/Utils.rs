//! different utility modules used by the demo binary and the examples
/// logger initialisation and saving sampled curves into csv files
pub mod logger;
/// pretty tables of the simulation snapshots
pub mod report;
