use crate::Utils::logger::{save_energy_curves, save_optimization_curves};
use crate::Utils::report::{log_session_report, metrics_table, optimization_rows};
use crate::numerical::energy_accumulation::{PERIOD_HOURS, total_energy};
use crate::numerical::quadrature::{DEFAULT_STEPS, QuadMethod, integrate_function};
use crate::plotting::render::render_to_file;
use crate::simulator::config::SimulatorConfig;
use crate::simulator::parameters::ParameterId;
use crate::simulator::session::SimulatorSession;
use log::info;
use std::error::Error;
use std::fs;
use std::path::Path;
use strum::IntoEnumIterator;
use tabled::builder::Builder;
use tabled::settings::Style;

pub fn finops_examples(example: usize, config: &SimulatorConfig) -> Result<(), Box<dyn Error>> {
    let mut session = SimulatorSession::new(config)?;
    match example {
        0 => {
            // default dashboard: both simulations at their initial slider positions
            log_session_report(&session);
        }
        1 => {
            // moving the inefficiency slider drags the optimum to the right
            let mut builder = Builder::default();
            builder.push_record(["k2", "optimal RAM (GB)", "min cost ($/h)", "savings at 2 GB (%)"]);
            for k2 in [10.0, 50.0, 128.0, 250.0, 500.0] {
                let snapshot = session.optimization.set_k2(k2)?;
                builder.push_record([
                    snapshot.params.k2().to_string(),
                    format!("{:.3}", snapshot.optimal.x),
                    format!("{:.2}", snapshot.optimal.cost),
                    format!("{:.2}", snapshot.savings.savings_percent),
                ]);
            }
            let mut table = builder.build();
            table.with(Style::modern_rounded());
            info!("\n \n K2 SWEEP \n \n {}", table);
        }
        2 => {
            // the 24*A shortcut against every quadrature rule
            let snapshot = session.energy.snapshot();
            let power = snapshot.params.power_function();
            let exact = total_energy(snapshot.params.base_load(), snapshot.params.amplitude());
            let mut builder = Builder::default();
            builder.push_record(["method", "rule", "n", "energy (kWh)", "abs error"]);
            for method in QuadMethod::iter() {
                let n = match method {
                    QuadMethod::GaussLegendre => 20,
                    _ => DEFAULT_STEPS,
                };
                let value = integrate_function(method, &power, 0.0, PERIOD_HOURS, n)?;
                builder.push_record([
                    method.to_string(),
                    method.description().to_string(),
                    n.to_string(),
                    format!("{:.6}", value),
                    format!("{:.3e}", (value - exact).abs()),
                ]);
            }
            let mut table = builder.build();
            table.with(Style::modern_rounded());
            info!("\n \n DAILY ENERGY, exact {} kWh \n \n {}", exact, table);
        }
        3 => {
            // charts and curve tables for the current state
            let out = Path::new("finops_output");
            fs::create_dir_all(out)?;
            render_to_file(&session.optimization.snapshot().chart, &out.join("cost_minimization.svg"))?;
            render_to_file(&session.energy.snapshot().chart, &out.join("energy_accumulation.svg"))?;
            render_to_file(&session.energy.snapshot().chart, &out.join("energy_accumulation.png"))?;
            save_optimization_curves(session.optimization.snapshot(), &out.join("cost_curves.csv"))?;
            save_energy_curves(session.energy.snapshot(), &out.join("energy_curves.csv"))?;
        }
        4 => {
            // amplitude above base load: the sine dips below zero and is kept as is
            session.set(ParameterId::BaseLoad, 3.0)?;
            session.set(ParameterId::Amplitude, 8.0)?;
            let snapshot = session.energy.snapshot();
            info!(
                "A = {}, B = {}: trough {} kW, total still {} kWh",
                snapshot.params.base_load(),
                snapshot.params.amplitude(),
                snapshot.trough.power,
                snapshot.totals.total_energy
            );
        }
        5 => {
            // sitting on the optimum: nothing left to save, no separate "current" marker
            let x_opt = session.optimization.snapshot().optimal.x;
            let stored = session.set(ParameterId::UserX, x_opt)?;
            let snapshot = session.optimization.snapshot();
            info!(
                "requested {:.4} GB, slider stored {} GB, current marker shown: {}",
                x_opt,
                stored,
                snapshot.chart.current.is_some()
            );
            info!("\n{}", metrics_table(&optimization_rows(snapshot)));
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_examples_without_files() {
        let config = SimulatorConfig::default();
        for example in [0, 1, 2, 4, 5, 99] {
            finops_examples(example, &config).unwrap();
        }
    }
}
