//! Pretty printing of snapshots: what the dashboard's metric cards would show.
use crate::simulator::energy_state::EnergySnapshot;
use crate::simulator::optimization_state::OptimizationSnapshot;
use crate::simulator::parameters::ParameterSpec;
use crate::simulator::session::SimulatorSession;
use log::info;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, PartialEq, Tabled)]
pub struct MetricRow {
    #[tabled(rename = "Metric")]
    pub metric: &'static str,
    #[tabled(rename = "Value")]
    pub value: String,
}

fn row(metric: &'static str, value: String) -> MetricRow {
    MetricRow { metric, value }
}

pub fn optimization_rows(snapshot: &OptimizationSnapshot) -> Vec<MetricRow> {
    let s = &snapshot.savings;
    vec![
        row("Optimal RAM", format!("{:.2} GB", snapshot.optimal.x)),
        row("Minimum cost", format!("${:.2}/h", snapshot.optimal.cost)),
        row("Your RAM", format!("{:.1} GB", snapshot.params.user_x())),
        row("Your cost", format!("${:.2}/h", s.current_cost)),
        row(
            "Potential savings",
            format!("${:.2}/h ({:.1}%)", s.savings_absolute, s.savings_percent),
        ),
    ]
}

pub fn energy_rows(snapshot: &EnergySnapshot) -> Vec<MetricRow> {
    vec![
        row("Total energy", format!("{:.1} kWh", snapshot.totals.total_energy)),
        row("Daily cost", format!("${:.2}", snapshot.totals.total_cost)),
        row("Price", format!("${}/kWh", snapshot.params.rate())),
        row(
            "Peak",
            format!("{:.1} kW at {}h", snapshot.peak.power, snapshot.peak.t),
        ),
        row(
            "Trough",
            format!("{:.1} kW at {}h", snapshot.trough.power, snapshot.trough.t),
        ),
    ]
}

pub fn metrics_table(rows: &[MetricRow]) -> Table {
    let mut table = Table::new(rows);
    table.with(Style::modern_rounded());
    table
}

pub fn parameters_table(parameters: &[&ParameterSpec]) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Parameter", "Value", "Range", "Step"]);
    for p in parameters {
        builder.push_record([
            p.label.to_string(),
            p.display_value(),
            format!("[{}, {}]", p.min(), p.max()),
            p.step().to_string(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table
}

/// Logs inputs and metrics of both simulations
pub fn log_session_report(session: &SimulatorSession) {
    let opt = &session.optimization;
    info!(
        "\n \n RAM COST MINIMIZATION \n \n {}\n{}",
        parameters_table(&opt.parameters()),
        metrics_table(&optimization_rows(opt.snapshot()))
    );
    let energy = &session.energy;
    info!(
        "\n \n DAILY ENERGY ACCUMULATION \n \n {}\n{}",
        parameters_table(&energy.parameters()),
        metrics_table(&energy_rows(energy.snapshot()))
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::config::SimulatorConfig;

    #[test]
    fn test_optimization_rows_default() {
        let session = SimulatorSession::new(&SimulatorConfig::default()).unwrap();
        let rows = optimization_rows(session.optimization.snapshot());
        assert_eq!(rows[0], row("Optimal RAM", "3.17 GB".to_string()));
        assert_eq!(rows[1].value, "$60.48/h");
        assert_eq!(rows[3].value, "$72.00/h");
        assert_eq!(rows[4].value, "$11.52/h (16.0%)");
    }

    #[test]
    fn test_energy_rows_default() {
        let session = SimulatorSession::new(&SimulatorConfig::default()).unwrap();
        let rows = energy_rows(session.energy.snapshot());
        assert_eq!(rows[0].value, "240.0 kWh");
        assert_eq!(rows[1].value, "$36.00");
        assert_eq!(rows[3].value, "15.0 kW at 6h");
        assert_eq!(rows[4].value, "5.0 kW at 18h");
    }

    #[test]
    fn test_tables_render() {
        let session = SimulatorSession::new(&SimulatorConfig::default()).unwrap();
        let text = parameters_table(&session.optimization.parameters()).to_string();
        assert!(text.contains("Your RAM allocation"));
        assert!(text.contains("2.0 GB"));
        assert!(text.contains("[10, 500]"));
        let text = metrics_table(&energy_rows(session.energy.snapshot())).to_string();
        assert!(text.contains("Metric"));
        assert!(text.contains("Total energy"));
        log_session_report(&session);
    }
}
