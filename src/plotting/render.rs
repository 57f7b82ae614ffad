//! Drawing the chart geometry with plotters.
//!
//! The charts already carry pixel coordinates, so everything is drawn straight onto the
//! root drawing area; no plotters coordinate system is involved. The backend is chosen by
//! the file extension: `.svg` or `.png`.
use crate::plotting::chart_geometry::{AxisTicks, EnergyChart, Marker, OptimizationChart};
use crate::plotting::coordinate_mapper::{CanvasConfig, CoordinateMapper, PixelPoint};
use crate::plotting::curve_sampler::PlotPath;
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fmt;
use std::path::Path;

const PRIMARY: RGBColor = RGBColor(37, 99, 235);
const SUCCESS: RGBColor = RGBColor(34, 197, 94);
const DANGER: RGBColor = RGBColor(239, 68, 68);
const SECONDARY: RGBColor = RGBColor(148, 163, 184);
const PURPLE: RGBColor = RGBColor(139, 92, 246);
const GRID: RGBColor = RGBColor(226, 232, 240);
const AXIS: RGBColor = RGBColor(71, 85, 105);
const TEXT: RGBColor = RGBColor(100, 116, 139);
const AREA_FILL: RGBAColor = RGBAColor(59, 130, 246, 0.25);

#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    UnsupportedExtension(String),
    Drawing(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenderError::UnsupportedExtension(ext) => {
                write!(f, "cannot render to '{}', use .svg or .png", ext)
            }
            RenderError::Drawing(msg) => write!(f, "drawing failed: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

fn drawing_error<E: fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

fn px(p: &PixelPoint) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

fn path_coords(path: &PlotPath) -> Vec<(i32, i32)> {
    path.as_tuples()
        .into_iter()
        .map(|(x, y)| (x.round() as i32, y.round() as i32))
        .collect()
}

/// A chart that knows how to paint itself onto any plotters backend
pub trait ChartPainter {
    fn canvas(&self) -> &CanvasConfig;

    fn paint<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), RenderError>;
}

/// grid, axes and tick labels shared by both charts
fn draw_frame<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    mapper: &CoordinateMapper,
    ticks: &AxisTicks,
    x_tick_label: impl Fn(f64) -> String,
    y_tick_label: impl Fn(f64) -> String,
    axis_names: (&str, &str),
) -> Result<(), RenderError> {
    let canvas = mapper.canvas();
    let left = canvas.padding.round() as i32;
    let right = (canvas.width - canvas.padding).round() as i32;
    let top = canvas.padding.round() as i32;
    let bottom = canvas.baseline_y().round() as i32;
    let tick_font = ("sans-serif", 11).into_font().color(&TEXT);

    for &tick in &ticks.y {
        let y = mapper.map_y(tick).round() as i32;
        root.draw(&PathElement::new(vec![(left, y), (right, y)], GRID.stroke_width(1)))
            .map_err(drawing_error)?;
        root.draw(&Text::new(y_tick_label(tick), (left - 40, y - 6), tick_font.clone()))
            .map_err(drawing_error)?;
    }
    for &tick in &ticks.x {
        let x = mapper.map_x(tick).round() as i32;
        root.draw(&PathElement::new(vec![(x, bottom), (x, top)], GRID.stroke_width(1)))
            .map_err(drawing_error)?;
        root.draw(&Text::new(x_tick_label(tick), (x - 8, bottom + 10), tick_font.clone()))
            .map_err(drawing_error)?;
    }

    root.draw(&PathElement::new(vec![(left, bottom), (right, bottom)], AXIS.stroke_width(2)))
        .map_err(drawing_error)?;
    root.draw(&PathElement::new(vec![(left, bottom), (left, top)], AXIS.stroke_width(2)))
        .map_err(drawing_error)?;

    let name_font = ("sans-serif", 13).into_font().color(&BLACK);
    let (x_name, y_name) = axis_names;
    let mid_x = (canvas.width / 2.0).round() as i32;
    root.draw(&Text::new(x_name.to_string(), (mid_x - 60, bottom + 28), name_font.clone()))
        .map_err(drawing_error)?;
    root.draw(&Text::new(y_name.to_string(), (4, top - 30), name_font))
        .map_err(drawing_error)?;
    Ok(())
}

fn draw_marker<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    marker: &Marker,
    canvas: &CanvasConfig,
    color: RGBColor,
    radius: i32,
    with_guide: bool,
) -> Result<(), RenderError> {
    if with_guide {
        let guide: Vec<(i32, i32)> = marker.drop_line(canvas).iter().map(px).collect();
        root.draw(&PathElement::new(guide, color.stroke_width(1)))
            .map_err(drawing_error)?;
    }
    root.draw(&Circle::new(px(&marker.pixel), radius, color.filled()))
        .map_err(drawing_error)?;
    let (x, y) = px(&marker.pixel);
    let font = ("sans-serif", 12).into_font().color(&color);
    root.draw(&Text::new(marker.label.to_string(), (x - 20, y - 22), font))
        .map_err(drawing_error)?;
    Ok(())
}

impl ChartPainter for OptimizationChart {
    fn canvas(&self) -> &CanvasConfig {
        self.mapper.canvas()
    }

    fn paint<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), RenderError> {
        draw_frame(
            root,
            &self.mapper,
            &self.ticks,
            |t| format!("{:.1}", t),
            |t| format!("${}", t.round()),
            ("RAM allocation (GB)", "Cost ($/h)"),
        )?;
        for component in [&self.hardware, &self.inefficiency] {
            root.draw(&PathElement::new(path_coords(component), SECONDARY.stroke_width(2)))
                .map_err(drawing_error)?;
        }
        root.draw(&PathElement::new(path_coords(&self.total), PRIMARY.stroke_width(3)))
            .map_err(drawing_error)?;
        draw_marker(root, &self.optimum, self.canvas(), SUCCESS, 6, true)?;
        if let Some(current) = &self.current {
            draw_marker(root, current, self.canvas(), DANGER, 6, true)?;
        }
        Ok(())
    }
}

impl ChartPainter for EnergyChart {
    fn canvas(&self) -> &CanvasConfig {
        self.mapper.canvas()
    }

    fn paint<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), RenderError> {
        draw_frame(
            root,
            &self.mapper,
            &self.ticks,
            |t| format!("{}h", t.round()),
            |t| format!("{}", t.round()),
            ("Time (hour of day)", "Power (kW)"),
        )?;
        root.draw(&Polygon::new(path_coords(&self.area), AREA_FILL.filled()))
            .map_err(drawing_error)?;
        root.draw(&PathElement::new(path_coords(&self.power), PRIMARY.stroke_width(3)))
            .map_err(drawing_error)?;
        draw_marker(root, &self.peak, self.canvas(), PURPLE, 4, false)?;
        draw_marker(root, &self.trough, self.canvas(), PURPLE, 4, false)?;
        Ok(())
    }
}

fn paint_and_present<DB: DrawingBackend, C: ChartPainter>(
    root: DrawingArea<DB, Shift>,
    chart: &C,
) -> Result<(), RenderError> {
    root.fill(&WHITE).map_err(drawing_error)?;
    chart.paint(&root)?;
    root.present().map_err(drawing_error)
}

/// Render a chart into `path`; the extension picks the backend
pub fn render_to_file<C: ChartPainter>(chart: &C, path: &Path) -> Result<(), RenderError> {
    let canvas = chart.canvas();
    let size = (canvas.width.round() as u32, canvas.height.round() as u32);
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "svg" => paint_and_present(SVGBackend::new(path, size).into_drawing_area(), chart)?,
        "png" => paint_and_present(BitMapBackend::new(path, size).into_drawing_area(), chart)?,
        other => return Err(RenderError::UnsupportedExtension(other.to_string())),
    }
    info!("chart rendered to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::cost_optimization::{CostModelParams, optimal_point};
    use crate::numerical::energy_accumulation::EnergyModelParams;

    #[test]
    fn test_render_svg_files() {
        let dir = tempfile::tempdir().unwrap();

        let params = CostModelParams::new(2.0, 128.0, 2.0).unwrap();
        let chart =
            OptimizationChart::build(&params, &optimal_point(2.0, 128.0), CanvasConfig::default()).unwrap();
        let cost_path = dir.path().join("cost.svg");
        render_to_file(&chart, &cost_path).unwrap();
        let svg = std::fs::read_to_string(&cost_path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Minimum"));
        assert!(svg.contains("Current"));

        let energy = EnergyChart::build(
            &EnergyModelParams::new(10.0, 5.0, 0.15).unwrap(),
            CanvasConfig::default(),
        )
        .unwrap();
        let energy_path = dir.path().join("energy.svg");
        render_to_file(&energy, &energy_path).unwrap();
        assert!(std::fs::read_to_string(&energy_path).unwrap().contains("<polygon"));
    }

    #[test]
    fn test_path_coords_round_to_pixels() {
        let path = PlotPath::from_points(vec![
            PixelPoint { x: 50.0, y: 250.0 },
            PixelPoint { x: 60.4, y: 239.6 },
            PixelPoint { x: 70.5, y: 100.49 },
        ]);
        assert_eq!(path_coords(&path), vec![(50, 250), (60, 240), (71, 100)]);
        assert!(path_coords(&PlotPath::default()).is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let energy = EnergyChart::build(
            &EnergyModelParams::new(10.0, 5.0, 0.15).unwrap(),
            CanvasConfig::default(),
        )
        .unwrap();
        let result = render_to_file(&energy, Path::new("chart.txt"));
        assert_eq!(result, Err(RenderError::UnsupportedExtension("txt".to_string())));
    }
}
