//! Numerical integration of functions of one variable.
//!
//! The energy model has an analytic integral, but the routines here work for any integrand
//! and any finite interval, so they double as a check of the analytic shortcut and as a way
//! to integrate partial windows.
//!
//! * composite trapezoidal rule, O(h^2)
//! * composite Simpson rule, O(h^4), even number of subintervals
//! * Gauss-Legendre quadrature (gauss-quad crate), exact for polynomials of degree < 2n
use crate::numerical::scalar_function::ScalarFunction;
use gauss_quad::GaussLegendre;
use itertools::Itertools;
use log::debug;
use std::fmt;
use strum_macros::{Display, EnumIter};

/// number of subintervals used when the caller has no preference
pub const DEFAULT_STEPS: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub enum QuadratureError {
    ZeroSteps,
    OddSteps(usize),
    NonFiniteBounds { a: f64, b: f64 },
    InvalidDegree(String),
}

impl fmt::Display for QuadratureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QuadratureError::ZeroSteps => write!(f, "number of subintervals must be at least 1"),
            QuadratureError::OddSteps(n) => {
                write!(f, "Simpson's rule needs an even number of subintervals, got {}", n)
            }
            QuadratureError::NonFiniteBounds { a, b } => {
                write!(f, "integration bounds must be finite, got [{}, {}]", a, b)
            }
            QuadratureError::InvalidDegree(msg) => {
                write!(f, "failed to create Gauss-Legendre quadrature: {}", msg)
            }
        }
    }
}

impl std::error::Error for QuadratureError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum QuadMethod {
    #[strum(to_string = "trapezoid")]
    Trapezoid,
    #[strum(to_string = "simpson")]
    Simpson,
    #[strum(to_string = "gauss-legendre")]
    GaussLegendre,
}

impl QuadMethod {
    pub fn description(&self) -> &'static str {
        match self {
            QuadMethod::Trapezoid => "composite trapezoidal rule, error O(h^2)",
            QuadMethod::Simpson => "composite Simpson rule, error O(h^4), even number of subintervals",
            QuadMethod::GaussLegendre => "Gauss-Legendre quadrature, exact for polynomials of degree < 2n",
        }
    }
}

fn check_bounds(a: f64, b: f64) -> Result<(), QuadratureError> {
    if a.is_finite() && b.is_finite() {
        Ok(())
    } else {
        Err(QuadratureError::NonFiniteBounds { a, b })
    }
}

/// Composite trapezoidal rule with `steps` equal subintervals:
/// `h*(f(a)/2 + f(b)/2 + sum f(a + i*h), i = 1..steps-1)`, `h = (b-a)/steps`
pub fn numeric_integrate<F>(f: F, a: f64, b: f64, steps: usize) -> Result<f64, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    check_bounds(a, b)?;
    if steps == 0 {
        return Err(QuadratureError::ZeroSteps);
    }
    let h = (b - a) / steps as f64;
    let mut sum = (f(a) + f(b)) / 2.0;
    for i in 1..steps {
        sum += f(a + i as f64 * h);
    }
    Ok(sum * h)
}

/// Composite Simpson rule; `steps` must be even
pub fn simpson_integrate<F>(f: F, a: f64, b: f64, steps: usize) -> Result<f64, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    check_bounds(a, b)?;
    if steps == 0 {
        return Err(QuadratureError::ZeroSteps);
    }
    if steps % 2 != 0 {
        return Err(QuadratureError::OddSteps(steps));
    }
    let h = (b - a) / steps as f64;
    let mut sum = f(a) + f(b);
    for i in 1..steps {
        let x = a + i as f64 * h;
        if i % 2 == 0 {
            sum += 2.0 * f(x);
        } else {
            sum += 4.0 * f(x);
        }
    }
    Ok(sum * h / 3.0)
}

/// Gauss-Legendre quadrature with `degree` nodes
pub fn gauss_legendre_integrate<F>(f: F, a: f64, b: f64, degree: usize) -> Result<f64, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    check_bounds(a, b)?;
    let quad = GaussLegendre::new(degree)
        .map_err(|e| QuadratureError::InvalidDegree(format!("{:?}", e)))?;
    Ok(quad.integrate(a, b, &f))
}

/// `n` is the number of subintervals for the composite rules and the number of nodes for
/// Gauss-Legendre
pub fn integrate<F>(method: QuadMethod, f: F, a: f64, b: f64, n: usize) -> Result<f64, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    let result = match method {
        QuadMethod::Trapezoid => numeric_integrate(f, a, b, n),
        QuadMethod::Simpson => simpson_integrate(f, a, b, n),
        QuadMethod::GaussLegendre => gauss_legendre_integrate(f, a, b, n),
    }?;
    debug!("{} on [{}, {}] with n = {}: {}", method, a, b, n, result);
    Ok(result)
}

/// same as [`integrate`] for anything implementing [`ScalarFunction`]
pub fn integrate_function<S>(
    method: QuadMethod,
    func: &S,
    a: f64,
    b: f64,
    n: usize,
) -> Result<f64, QuadratureError>
where
    S: ScalarFunction + ?Sized,
{
    debug!("integrating {}", func.name());
    integrate(method, |x| func.evaluate(x), a, b, n)
}

/// Running trapezoidal integral: `[(x_i, ∫_a^{x_i} f)]` for `i = 0..=steps`.
///
/// The last value equals `numeric_integrate(f, a, b, steps)` up to summation order.
pub fn cumulative_trapezoid<F>(
    f: F,
    a: f64,
    b: f64,
    steps: usize,
) -> Result<Vec<(f64, f64)>, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    check_bounds(a, b)?;
    if steps == 0 {
        return Err(QuadratureError::ZeroSteps);
    }
    let h = (b - a) / steps as f64;
    let samples: Vec<(f64, f64)> = (0..=steps)
        .map(|i| {
            let x = a + i as f64 * h;
            (x, f(x))
        })
        .collect();

    let mut running = Vec::with_capacity(steps + 1);
    running.push((a, 0.0));
    let mut acc = 0.0;
    for ((_, y0), (x1, y1)) in samples.into_iter().tuple_windows() {
        acc += h * (y0 + y1) / 2.0;
        running.push((x1, acc));
    }
    Ok(running)
}
