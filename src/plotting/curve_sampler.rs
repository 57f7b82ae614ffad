//! Piecewise-linear approximation of a continuous function for drawing.
//!
//! The sampler is not adaptive and gives no error bound: it evaluates the function at
//! `steps + 1` equally spaced abscissas and maps every sample to pixels.
use crate::numerical::scalar_function::ScalarFunction;
use crate::plotting::coordinate_mapper::{CoordinateMapper, PixelPoint};
use std::fmt::Write;

/// resolution used for the cost curves
pub const COST_CURVE_STEPS: usize = 100;
/// resolution used for the daily power curve
pub const ENERGY_CURVE_STEPS: usize = 150;

/// Equally spaced samples over `[x_min, x_max]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSampler {
    x_min: f64,
    x_max: f64,
    steps: usize,
}

impl CurveSampler {
    /// `steps` is the number of segments; a sampler with zero steps still yields `x_min`.
    ///
    /// Precondition: `x_max >= x_min`. Only debug builds check it; with reversed bounds a
    /// release build samples from `x_min` down to `x_max` and yields a descending polyline.
    /// Both charts take their bounds from a validated [`PlotWindow`](crate::plotting::coordinate_mapper::PlotWindow).
    pub fn new(x_min: f64, x_max: f64, steps: usize) -> Self {
        debug_assert!(x_max >= x_min);
        Self { x_min, x_max, steps }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Lazy iterator over the abscissas; every call starts over from `x_min`
    pub fn samples(&self) -> Samples {
        Samples {
            sampler: *self,
            next: 0,
        }
    }

    /// `(x, f(x))` pairs in model space
    pub fn evaluate<F>(&self, f: F) -> impl Iterator<Item = (f64, f64)>
    where
        F: Fn(f64) -> f64,
    {
        self.samples().map(move |x| (x, f(x)))
    }

    /// mapped polyline of `f`
    pub fn path<F>(&self, mapper: &CoordinateMapper, f: F) -> PlotPath
    where
        F: Fn(f64) -> f64,
    {
        let points = self
            .samples()
            .map(|x| mapper.map_point(x, f(x)))
            .collect();
        PlotPath { points }
    }

    pub fn path_of<S: ScalarFunction + ?Sized>(&self, mapper: &CoordinateMapper, func: &S) -> PlotPath {
        self.path(mapper, |x| func.evaluate(x))
    }

    /// Closed region between the curve and the horizontal line `y = baseline`:
    /// starts on the baseline under `x_min`, follows the curve, returns to the baseline under `x_max`
    pub fn area_path<F>(&self, mapper: &CoordinateMapper, f: F, baseline: f64) -> PlotPath
    where
        F: Fn(f64) -> f64,
    {
        let mut points = Vec::with_capacity(self.steps + 3);
        points.push(mapper.map_point(self.x_min, baseline));
        points.extend(self.samples().map(|x| mapper.map_point(x, f(x))));
        points.push(mapper.map_point(self.x_max, baseline));
        PlotPath { points }
    }
}

/// Iterator returned by [`CurveSampler::samples`]
#[derive(Debug, Clone)]
pub struct Samples {
    sampler: CurveSampler,
    next: usize,
}

impl Iterator for Samples {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let s = &self.sampler;
        if self.next > s.steps {
            return None;
        }
        let i = self.next;
        self.next += 1;
        if s.steps == 0 {
            return Some(s.x_min);
        }
        // last sample lands exactly on x_max
        if i == s.steps {
            return Some(s.x_max);
        }
        Some(s.x_min + (i as f64 / s.steps as f64) * (s.x_max - s.x_min))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.sampler.steps + 1).saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Samples {}

/// Ordered pixel points of one curve, ready for any 2D drawing API
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotPath {
    points: Vec<PixelPoint>,
}

impl PlotPath {
    pub fn from_points(points: Vec<PixelPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PixelPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PixelPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PixelPoint> {
        self.points.last()
    }

    /// SVG path data: `M x y L x y ...`, with a trailing `Z` when `closed`
    pub fn to_svg_path(&self, closed: bool) -> String {
        let mut d = String::new();
        for (i, p) in self.points.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            if i > 0 {
                d.push(' ');
            }
            // writing into a String cannot fail
            let _ = write!(d, "{} {:.3} {:.3}", cmd, p.x, p.y);
        }
        if closed && !self.points.is_empty() {
            d.push_str(" Z");
        }
        d
    }

    /// pixel tuples in the shape plotting backends expect
    pub fn as_tuples(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x, p.y)).collect()
    }
}
