//! Geometry of the two charts: cost minimization and daily energy accumulation.
//!
//! Each chart picks a window that encloses what it wants to show, samples the model
//! functions through a [`CurveSampler`] and maps the key points. The result is plain data
//! (paths, markers, ticks) for whichever drawing layer sits on top.
use crate::numerical::cost_optimization::{
    CostComponent, CostFunction, CostModelParams, OptimalPoint, total_cost,
};
use crate::numerical::energy_accumulation::{
    EnergyModelParams, PERIOD_HOURS, cumulative_energy, daily_peak, daily_trough,
    instantaneous_power,
};
use crate::plotting::coordinate_mapper::{
    CanvasConfig, CoordinateMapper, MappingError, PixelPoint, PlotWindow,
};
use crate::plotting::curve_sampler::{COST_CURVE_STEPS, CurveSampler, ENERGY_CURVE_STEPS, PlotPath};

/// the cost chart always starts at this allocation
const COST_X_MIN: f64 = 1.0;
/// the cost chart spans at least this far
const COST_X_SPAN_FLOOR: f64 = 10.0;
/// how far right of the optimum the cost chart reaches
const COST_X_OPTIMUM_FACTOR: f64 = 2.5;
const COST_Y_HEADROOM: f64 = 1.1;
const ENERGY_Y_TOP_MARGIN: f64 = 2.0;
const ENERGY_Y_BOTTOM_MARGIN: f64 = 1.0;

/// A labelled point of interest
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub label: &'static str,
    pub x: f64,
    pub y: f64,
    pub pixel: PixelPoint,
}

impl Marker {
    fn new(label: &'static str, x: f64, y: f64, mapper: &CoordinateMapper) -> Self {
        Self {
            label,
            x,
            y,
            pixel: mapper.map_point(x, y),
        }
    }

    /// vertical guide from the marker down to the x axis
    pub fn drop_line(&self, canvas: &CanvasConfig) -> [PixelPoint; 2] {
        [
            self.pixel,
            PixelPoint {
                x: self.pixel.x,
                y: canvas.baseline_y(),
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTicks {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Total cost curve with its two components, the optimum and the user's choice
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationChart {
    pub mapper: CoordinateMapper,
    pub hardware: PlotPath,
    pub inefficiency: PlotPath,
    pub total: PlotPath,
    pub optimum: Marker,
    /// absent when the user already sits on the optimum
    pub current: Option<Marker>,
    pub ticks: AxisTicks,
}

impl OptimizationChart {
    /// Window: `x ∈ [1, max(2.5*x*, 10)]`, `y ∈ [0, 1.1*C(1)]`
    pub fn build(
        params: &CostModelParams,
        optimal: &OptimalPoint,
        canvas: CanvasConfig,
    ) -> Result<Self, MappingError> {
        let (k1, k2) = (params.k1(), params.k2());
        let x_min = COST_X_MIN;
        let x_max = (optimal.x * COST_X_OPTIMUM_FACTOR).max(COST_X_SPAN_FLOOR);
        let y_min = 0.0;
        let y_max = total_cost(x_min, k1, k2) * COST_Y_HEADROOM;
        let mapper = CoordinateMapper::new(canvas, PlotWindow::new(x_min, x_max, y_min, y_max)?);

        let sampler = CurveSampler::new(x_min, x_max, COST_CURVE_STEPS);
        let hardware =
            sampler.path_of(&mapper, &CostFunction::component(k1, k2, CostComponent::Hardware));
        let inefficiency =
            sampler.path_of(&mapper, &CostFunction::component(k1, k2, CostComponent::Inefficiency));
        let total = sampler.path_of(&mapper, &CostFunction::new(k1, k2));

        let optimum = Marker::new("Minimum", optimal.x, optimal.cost, &mapper);
        let user_x = params.user_x();
        let current = if user_x != optimal.x {
            Some(Marker::new("Current", user_x, total_cost(user_x, k1, k2), &mapper))
        } else {
            None
        };

        let ticks = AxisTicks {
            x: vec![x_min, (x_max / 2.0).round(), x_max.round()],
            y: vec![0.0, (y_max / 2.0).round(), y_max.round()],
        };

        Ok(Self {
            mapper,
            hardware,
            inefficiency,
            total,
            optimum,
            current,
            ticks,
        })
    }
}

/// Daily power curve, the shaded area under it and its extrema
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyChart {
    pub mapper: CoordinateMapper,
    pub power: PlotPath,
    /// closed region down to the bottom of the window; its area is the energy
    pub area: PlotPath,
    pub peak: Marker,
    pub trough: Marker,
    /// `(t, ∫_0^t E)` in model units, sampled on the same grid as `power`
    pub accumulation: Vec<(f64, f64)>,
    pub ticks: AxisTicks,
}

impl EnergyChart {
    /// Window: `t ∈ [0, 24]`, `y ∈ [max(0, A-B-1), A+B+2]`
    pub fn build(params: &EnergyModelParams, canvas: CanvasConfig) -> Result<Self, MappingError> {
        let (a, b) = (params.base_load(), params.amplitude());
        let y_max = a + b + ENERGY_Y_TOP_MARGIN;
        let y_min = (a - b - ENERGY_Y_BOTTOM_MARGIN).max(0.0);
        let mapper = CoordinateMapper::new(canvas, PlotWindow::new(0.0, PERIOD_HOURS, y_min, y_max)?);

        let sampler = CurveSampler::new(0.0, PERIOD_HOURS, ENERGY_CURVE_STEPS);
        let power_fn = |t| instantaneous_power(t, a, b);
        let power = sampler.path(&mapper, power_fn);
        let area = sampler.area_path(&mapper, power_fn, y_min);
        let accumulation = sampler.evaluate(|t| cumulative_energy(t, a, b)).collect();

        let peak_point = daily_peak(a, b);
        let trough_point = daily_trough(a, b);
        let peak = Marker::new("Peak", peak_point.t, peak_point.power, &mapper);
        let trough = Marker::new("Trough", trough_point.t, trough_point.power, &mapper);

        let quarter = PERIOD_HOURS / 4.0;
        let ticks = AxisTicks {
            x: (0..=4).map(|i| i as f64 * quarter).collect(),
            y: vec![y_min, ((y_min + y_max) / 2.0).round(), y_max.round()],
        };

        Ok(Self {
            mapper,
            power,
            area,
            peak,
            trough,
            accumulation,
            ticks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::cost_optimization::optimal_point;
    use approx::assert_relative_eq;

    fn cost_chart(k1: f64, k2: f64, user_x: f64) -> OptimizationChart {
        let params = CostModelParams::new(k1, k2, user_x).unwrap();
        let optimal = optimal_point(k1, k2);
        OptimizationChart::build(&params, &optimal, CanvasConfig::default()).unwrap()
    }

    #[test]
    fn test_cost_window_default_scenario() {
        let chart = cost_chart(2.0, 128.0, 2.0);
        let w = chart.mapper.window();
        // 2.5 * cbrt(32) ≈ 7.94 < 10
        assert_eq!(w.x_min(), 1.0);
        assert_eq!(w.x_max(), 10.0);
        assert_eq!(w.y_min(), 0.0);
        assert_relative_eq!(w.y_max(), 130.0 * 1.1, epsilon = 1e-9);
        assert_eq!(chart.ticks.x, vec![1.0, 5.0, 10.0]);
        assert_eq!(chart.ticks.y, vec![0.0, 72.0, 143.0]);
    }

    #[test]
    fn test_cost_window_widens_with_optimum() {
        // cbrt(500/1) ≈ 7.94 -> x_max ≈ 19.8
        let chart = cost_chart(0.5, 500.0, 2.0);
        assert_relative_eq!(chart.mapper.window().x_max(), 2.5 * 500f64.cbrt(), epsilon = 1e-12);
        let opt = &chart.optimum;
        assert!(chart.mapper.window().contains(opt.x, opt.y));
    }

    #[test]
    fn test_cost_paths_and_markers() {
        let chart = cost_chart(2.0, 128.0, 2.0);
        assert_eq!(chart.total.len(), COST_CURVE_STEPS + 1);
        assert_eq!(chart.hardware.len(), COST_CURVE_STEPS + 1);
        assert_eq!(chart.inefficiency.len(), COST_CURVE_STEPS + 1);
        // every total point lies above (smaller pixel y than) each component
        for ((t, h), i) in chart
            .total
            .points()
            .iter()
            .zip(chart.hardware.points())
            .zip(chart.inefficiency.points())
        {
            assert!(t.y <= h.y && t.y <= i.y);
        }
        // the optimum is the lowest point of the total curve
        let lowest = chart
            .total
            .points()
            .iter()
            .map(|p| p.y)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(chart.optimum.pixel.y >= lowest - 1e-9);
        let current = chart.current.as_ref().unwrap();
        assert_eq!(current.label, "Current");
        assert_relative_eq!(current.y, 72.0, epsilon = 1e-12);
        let drop = current.drop_line(&CanvasConfig::default());
        assert_eq!(drop[1].y, 250.0);
        assert_eq!(drop[0].x, drop[1].x);
    }

    #[test]
    fn test_no_current_marker_at_optimum() {
        let x = optimal_point(2.0, 128.0).x;
        let chart = cost_chart(2.0, 128.0, x);
        assert!(chart.current.is_none());
    }

    #[test]
    fn test_energy_chart_scenario() {
        let params = EnergyModelParams::new(10.0, 5.0, 0.15).unwrap();
        let chart = EnergyChart::build(&params, CanvasConfig::default()).unwrap();
        let w = chart.mapper.window();
        assert_eq!((w.x_min(), w.x_max()), (0.0, 24.0));
        assert_eq!((w.y_min(), w.y_max()), (4.0, 17.0));
        assert_eq!(chart.ticks.x, vec![0.0, 6.0, 12.0, 18.0, 24.0]);
        assert_eq!(chart.ticks.y, vec![4.0, 11.0, 17.0]);
        assert_eq!(chart.power.len(), ENERGY_CURVE_STEPS + 1);
        assert_eq!(chart.area.len(), ENERGY_CURVE_STEPS + 3);
        assert_eq!(chart.area.first().unwrap().y, 250.0);
        assert_eq!((chart.peak.x, chart.peak.y), (6.0, 15.0));
        assert_eq!((chart.trough.x, chart.trough.y), (18.0, 5.0));
        let (t_end, e_end) = *chart.accumulation.last().unwrap();
        assert_eq!(t_end, 24.0);
        assert_relative_eq!(e_end, 240.0, epsilon = 1e-9);
    }

    #[test]
    fn test_energy_window_floor_is_zero() {
        // amplitude larger than base load: y_min clamps at 0, trough marker falls below the window
        let params = EnergyModelParams::new(3.0, 5.0, 0.15).unwrap();
        let chart = EnergyChart::build(&params, CanvasConfig::default()).unwrap();
        assert_eq!(chart.mapper.window().y_min(), 0.0);
        assert!(chart.trough.pixel.y > chart.mapper.canvas().baseline_y());
    }
}
