//! calculus behind the simulator: closed-form cost minimization, energy accumulation and quadrature
/// trait for real functions of one variable and closure wrappers
pub mod scalar_function;
/// RAM cost model `k1*x^2 + k2/x`, its derivatives and the closed-form minimum
///
/// # Example
/// ```
/// use RustedFinOps::numerical::cost_optimization::{optimal_x, savings};
/// let x_opt = optimal_x(2.0, 128.0);
/// assert!((x_opt - 32f64.cbrt()).abs() < 1e-12);
/// let report = savings(2.0, x_opt, 2.0, 128.0);
/// assert!(report.savings_absolute > 11.0);
/// ```
pub mod cost_optimization;
/// daily power model `A + B*sin(2*pi*t/24)` and its integral
pub mod energy_accumulation;
/// trapezoid, Simpson and Gauss-Legendre integration
///
/// # Example
/// ```
/// use RustedFinOps::numerical::quadrature::numeric_integrate;
/// let area = numeric_integrate(|x| x * x, 0.0, 1.0, 1000).unwrap();
/// assert!((area - 1.0 / 3.0).abs() < 1e-6);
/// ```
pub mod quadrature;
/// randomized checks of the calculus identities across the whole parameter space
mod calculus_properties_tests;
