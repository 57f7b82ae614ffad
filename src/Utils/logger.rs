use crate::numerical::cost_optimization::{hardware_cost, inefficiency_cost, total_cost};
use crate::numerical::energy_accumulation::{cumulative_energy, instantaneous_power};
use crate::plotting::curve_sampler::{COST_CURVE_STEPS, CurveSampler, ENERGY_CURVE_STEPS};
use crate::simulator::energy_state::EnergySnapshot;
use crate::simulator::optimization_state::OptimizationSnapshot;
use chrono::Local;
use csv::Writer;
use log::{LevelFilter, info, warn};
use nalgebra::{DMatrix, DVector};
use simplelog::*;
use std::fs::File;
use std::io;
use std::path::Path;

/// "debug", "info", "warn", "error", "off"/"none"
pub fn parse_level(loglevel: &str) -> Option<LevelFilter> {
    match loglevel {
        "debug" => Some(LevelFilter::Debug),
        "info" => Some(LevelFilter::Info),
        "warn" => Some(LevelFilter::Warn),
        "error" => Some(LevelFilter::Error),
        "off" | "none" => Some(LevelFilter::Off),
        _ => None,
    }
}

/// Terminal logger, plus a `log_<date>_<time>.txt` file when `log_to_file` is set.
/// `None` means info; an unknown level name is an `InvalidInput` error and installs nothing.
/// A logger installed earlier stays in place.
pub fn init_logger(loglevel: Option<&str>, log_to_file: bool) -> io::Result<()> {
    let level = match loglevel {
        Some(name) => parse_level(name).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "log level must be debug, info, warn, error, off or none, got '{}'",
                    name
                ),
            )
        })?,
        None => LevelFilter::Info,
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ));
    if log_to_file {
        let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let name = format!("log_{}.txt", date_and_time);
        loggers.push(WriteLogger::new(level, Config::default(), File::create(name)?));
    }
    if CombinedLogger::init(loggers).is_err() {
        warn!("logger already initialised, keeping the existing one");
    }
    Ok(())
}

/// Writes `arg` column from `x_mesh` followed by one column per matrix column
pub fn save_matrix_to_csv(
    matrix: &DMatrix<f64>,
    headers: &[&str],
    filename: &Path,
    x_mesh: &DVector<f64>,
    arg: &str,
) -> io::Result<()> {
    if matrix.nrows() != x_mesh.len() || matrix.ncols() != headers.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "matrix is {}x{} but there are {} mesh points and {} headers",
                matrix.nrows(),
                matrix.ncols(),
                x_mesh.len(),
                headers.len()
            ),
        ));
    }
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);

    let mut headers_with_x = Vec::with_capacity(headers.len() + 1);
    headers_with_x.push(arg);
    headers_with_x.extend(headers.iter().copied());
    writer.write_record(&headers_with_x)?;

    for (i, row) in matrix.row_iter().enumerate() {
        let mut row_data = Vec::with_capacity(row.len() + 1);
        row_data.push(x_mesh[i].to_string());
        row_data.extend(row.iter().map(|&val| val.to_string()));
        writer.write_record(&row_data)?;
    }

    writer.flush()?;
    Ok(())
}

/// Cost curves over the chart window: columns hardware, inefficiency, total
pub fn optimization_curves(snapshot: &OptimizationSnapshot) -> (DVector<f64>, DMatrix<f64>) {
    let (k1, k2) = (snapshot.params.k1(), snapshot.params.k2());
    let window = snapshot.chart.mapper.window();
    let sampler = CurveSampler::new(window.x_min(), window.x_max(), COST_CURVE_STEPS);
    let x_mesh = DVector::from_iterator(sampler.steps() + 1, sampler.samples());
    let matrix = DMatrix::from_fn(x_mesh.len(), 3, |i, j| {
        let x = x_mesh[i];
        match j {
            0 => hardware_cost(x, k1),
            1 => inefficiency_cost(x, k2),
            _ => total_cost(x, k1, k2),
        }
    });
    (x_mesh, matrix)
}

/// Power and accumulated energy over the day: columns power, cumulative energy
pub fn energy_curves(snapshot: &EnergySnapshot) -> (DVector<f64>, DMatrix<f64>) {
    let (a, b) = (snapshot.params.base_load(), snapshot.params.amplitude());
    let window = snapshot.chart.mapper.window();
    let sampler = CurveSampler::new(window.x_min(), window.x_max(), ENERGY_CURVE_STEPS);
    let t_mesh = DVector::from_iterator(sampler.steps() + 1, sampler.samples());
    let matrix = DMatrix::from_fn(t_mesh.len(), 2, |i, j| {
        let t = t_mesh[i];
        if j == 0 {
            instantaneous_power(t, a, b)
        } else {
            cumulative_energy(t, a, b)
        }
    });
    (t_mesh, matrix)
}

pub fn save_optimization_curves(snapshot: &OptimizationSnapshot, filename: &Path) -> io::Result<()> {
    let (x_mesh, matrix) = optimization_curves(snapshot);
    save_matrix_to_csv(
        &matrix,
        &["hardware ($/h)", "inefficiency ($/h)", "total ($/h)"],
        filename,
        &x_mesh,
        "ram (GB)",
    )?;
    info!("cost curves saved to {}", filename.display());
    Ok(())
}

pub fn save_energy_curves(snapshot: &EnergySnapshot, filename: &Path) -> io::Result<()> {
    let (t_mesh, matrix) = energy_curves(snapshot);
    save_matrix_to_csv(&matrix, &["power (kW)", "energy (kWh)"], filename, &t_mesh, "hour")?;
    info!("energy curves saved to {}", filename.display());
    Ok(())
}
