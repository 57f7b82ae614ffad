#![allow(non_snake_case)]
use RustedFinOps::Examples::finops_examples::finops_examples;
use RustedFinOps::Utils::logger::init_logger;
use RustedFinOps::simulator::config::SimulatorConfig;
use std::env;
use std::error::Error;

/// `RustedFinOps [config.toml]`
fn main() -> Result<(), Box<dyn Error>> {
    let config = match env::args().nth(1) {
        Some(path) => SimulatorConfig::from_file(path)?,
        None => SimulatorConfig::default(),
    };
    init_logger(Some(&config.logging.level), config.logging.log_to_file)?;
    for example in 0..=3 {
        finops_examples(example, &config)?;
    }
    Ok(())
}
