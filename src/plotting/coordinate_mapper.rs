//! Affine map from a window of the (x, y) plane onto a padded pixel canvas.
//!
//! Both axes are scaled independently and the y axis is flipped: mathematical "up" is a
//! smaller pixel y. Values outside the window are not clamped, they simply land outside
//! the padded plot area.
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum MappingError {
    DegenerateWindow { axis: char, min: f64, max: f64 },
    InvalidCanvas(String),
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MappingError::DegenerateWindow { axis, min, max } => write!(
                f,
                "plot window on {} axis must satisfy finite min < max, got [{}, {}]",
                axis, min, max
            ),
            MappingError::InvalidCanvas(msg) => write!(f, "invalid canvas: {}", msg),
        }
    }
}

impl std::error::Error for MappingError {}

/// Pixel canvas with the same padding on every side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 300.0,
            padding: 50.0,
        }
    }
}

impl CanvasConfig {
    pub fn new(width: f64, height: f64, padding: f64) -> Result<Self, MappingError> {
        let canvas = Self {
            width,
            height,
            padding,
        };
        canvas.validate()?;
        Ok(canvas)
    }

    pub fn validate(&self) -> Result<(), MappingError> {
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(MappingError::InvalidCanvas(format!(
                "padding must be non-negative, got {}",
                self.padding
            )));
        }
        if !(self.width.is_finite() && self.width > 2.0 * self.padding) {
            return Err(MappingError::InvalidCanvas(format!(
                "width {} leaves no room inside padding {}",
                self.width, self.padding
            )));
        }
        if !(self.height.is_finite() && self.height > 2.0 * self.padding) {
            return Err(MappingError::InvalidCanvas(format!(
                "height {} leaves no room inside padding {}",
                self.height, self.padding
            )));
        }
        Ok(())
    }

    /// width of the area inside the padding
    pub fn plot_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    /// height of the area inside the padding
    pub fn plot_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }

    /// pixel y of the bottom edge of the plot area (the x axis line)
    pub fn baseline_y(&self) -> f64 {
        self.height - self.padding
    }
}

/// Window of the mathematical plane to show
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotWindow {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl PlotWindow {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, MappingError> {
        if !(x_min.is_finite() && x_max.is_finite() && x_max > x_min) {
            return Err(MappingError::DegenerateWindow {
                axis: 'x',
                min: x_min,
                max: x_max,
            });
        }
        if !(y_min.is_finite() && y_max.is_finite() && y_max > y_min) {
            return Err(MappingError::DegenerateWindow {
                axis: 'y',
                min: y_min,
                max: y_max,
            });
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }
    pub fn x_max(&self) -> f64 {
        self.x_max
    }
    pub fn y_min(&self) -> f64 {
        self.y_min
    }
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

/// A point on the canvas, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    canvas: CanvasConfig,
    window: PlotWindow,
}

impl CoordinateMapper {
    pub fn new(canvas: CanvasConfig, window: PlotWindow) -> Self {
        Self { canvas, window }
    }

    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    pub fn window(&self) -> &PlotWindow {
        &self.window
    }

    /// `padding + (x - x_min)/(x_max - x_min)*(width - 2*padding)`
    pub fn map_x(&self, x: f64) -> f64 {
        let w = &self.window;
        self.canvas.padding + (x - w.x_min) / (w.x_max - w.x_min) * self.canvas.plot_width()
    }

    /// `height - padding - (y - y_min)/(y_max - y_min)*(height - 2*padding)`
    pub fn map_y(&self, y: f64) -> f64 {
        let w = &self.window;
        self.canvas.baseline_y() - (y - w.y_min) / (w.y_max - w.y_min) * self.canvas.plot_height()
    }

    pub fn map_point(&self, x: f64, y: f64) -> PixelPoint {
        PixelPoint {
            x: self.map_x(x),
            y: self.map_y(y),
        }
    }

    /// inverse of [`CoordinateMapper::map_x`]
    pub fn unmap_x(&self, px: f64) -> f64 {
        let w = &self.window;
        w.x_min + (px - self.canvas.padding) / self.canvas.plot_width() * (w.x_max - w.x_min)
    }

    /// inverse of [`CoordinateMapper::map_y`]
    pub fn unmap_y(&self, py: f64) -> f64 {
        let w = &self.window;
        w.y_min + (self.canvas.baseline_y() - py) / self.canvas.plot_height() * (w.y_max - w.y_min)
    }
}
