//! Cost of a cloud instance as a function of allocated RAM and its minimum found with derivatives.
//!
//! The model combines two opposite effects:
//! * hardware cost grows quadratically with the allocation: `H(x) = k1*x^2`
//! * inefficiency cost falls hyperbolically with the allocation: `I(x) = k2/x`
//!
//! Total cost `C(x) = k1*x^2 + k2/x` has the first derivative `C'(x) = 2*k1*x - k2/x^2`.
//! Setting `C'(x) = 0` gives `2*k1*x^3 = k2`, i.e. the single critical point
//! `x* = cbrt(k2/(2*k1))`. The second derivative `C''(x) = 2*k1 + 2*k2/x^3` is positive for
//! every positive `k1`, `k2`, `x`, so `C` is strictly convex on `x > 0` and `x*` is the global minimum.
//! No iterative search is needed.
use crate::numerical::scalar_function::ScalarFunction;
use std::fmt;

/// Error types for cost model construction
#[derive(Debug, Clone, PartialEq)]
pub enum CostModelError {
    NonPositiveCoefficient { name: &'static str, value: f64 },
    NonPositiveAllocation(f64),
}

impl fmt::Display for CostModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CostModelError::NonPositiveCoefficient { name, value } => {
                write!(f, "coefficient {} must be positive and finite, got {}", name, value)
            }
            CostModelError::NonPositiveAllocation(value) => {
                write!(f, "resource allocation must be positive and finite, got {}", value)
            }
        }
    }
}

impl std::error::Error for CostModelError {}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Coefficients of the cost model and the allocation the user currently has
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModelParams {
    k1: f64,
    k2: f64,
    user_x: f64,
}

impl CostModelParams {
    pub fn new(k1: f64, k2: f64, user_x: f64) -> Result<Self, CostModelError> {
        if !is_positive(k1) {
            return Err(CostModelError::NonPositiveCoefficient { name: "k1", value: k1 });
        }
        if !is_positive(k2) {
            return Err(CostModelError::NonPositiveCoefficient { name: "k2", value: k2 });
        }
        if !is_positive(user_x) {
            return Err(CostModelError::NonPositiveAllocation(user_x));
        }
        Ok(Self { k1, k2, user_x })
    }

    /// hardware cost coefficient
    pub fn k1(&self) -> f64 {
        self.k1
    }

    /// inefficiency coefficient
    pub fn k2(&self) -> f64 {
        self.k2
    }

    /// allocation chosen by the user
    pub fn user_x(&self) -> f64 {
        self.user_x
    }

    pub fn optimal_point(&self) -> OptimalPoint {
        optimal_point(self.k1, self.k2)
    }

    pub fn savings(&self) -> SavingsReport {
        savings(self.user_x, self.optimal_point().x, self.k1, self.k2)
    }

    pub fn cost_function(&self) -> CostFunction {
        CostFunction::new(self.k1, self.k2)
    }
}

/// Location and value of the cost minimum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimalPoint {
    pub x: f64,
    pub cost: f64,
}

/// Comparison of the user's allocation with the optimal one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsReport {
    pub current_cost: f64,
    pub optimal_cost: f64,
    /// never negative
    pub savings_absolute: f64,
    /// share of the current cost, 0..=100
    pub savings_percent: f64,
}

/// `H(x) = k1*x^2`
pub fn hardware_cost(x: f64, k1: f64) -> f64 {
    k1 * x * x
}

/// `I(x) = k2/x`
///
/// Precondition: `x > 0`. At `x = 0` the result is infinite; callers keep `x` away from zero
/// through the declared parameter ranges.
pub fn inefficiency_cost(x: f64, k2: f64) -> f64 {
    debug_assert!(x > 0.0, "inefficiency cost is undefined for x = {}", x);
    k2 / x
}

/// `C(x) = k1*x^2 + k2/x`
pub fn total_cost(x: f64, k1: f64, k2: f64) -> f64 {
    hardware_cost(x, k1) + inefficiency_cost(x, k2)
}

/// `C'(x) = 2*k1*x - k2/x^2`
pub fn cost_derivative(x: f64, k1: f64, k2: f64) -> f64 {
    2.0 * k1 * x - k2 / (x * x)
}

/// `C''(x) = 2*k1 + 2*k2/x^3`
pub fn cost_second_derivative(x: f64, k1: f64, k2: f64) -> f64 {
    2.0 * k1 + 2.0 * k2 / (x * x * x)
}

/// closed-form root of `C'(x) = 0`: `x* = cbrt(k2/(2*k1))`
pub fn optimal_x(k1: f64, k2: f64) -> f64 {
    debug_assert!(k1 > 0.0 && k2 > 0.0);
    (k2 / (2.0 * k1)).cbrt()
}

pub fn optimal_point(k1: f64, k2: f64) -> OptimalPoint {
    let x = optimal_x(k1, k2);
    OptimalPoint {
        x,
        cost: total_cost(x, k1, k2),
    }
}

/// Costs at the current and at the optimal allocation.
///
/// The absolute saving is clamped at zero: evaluated at the optimum itself round-off can
/// otherwise produce a tiny negative number.
pub fn savings(current_x: f64, optimal_x: f64, k1: f64, k2: f64) -> SavingsReport {
    let current_cost = total_cost(current_x, k1, k2);
    let optimal_cost = total_cost(optimal_x, k1, k2);
    let savings_absolute = (current_cost - optimal_cost).max(0.0);
    let savings_percent = if current_cost > 0.0 {
        savings_absolute / current_cost * 100.0
    } else {
        0.0
    };
    SavingsReport {
        current_cost,
        optimal_cost,
        savings_absolute,
        savings_percent,
    }
}

/// Which part of the cost model to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostComponent {
    Hardware,
    Inefficiency,
    Total,
}

/// Cost model as a [`ScalarFunction`] with analytic derivatives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostFunction {
    k1: f64,
    k2: f64,
    component: CostComponent,
}

impl CostFunction {
    pub fn new(k1: f64, k2: f64) -> Self {
        Self {
            k1,
            k2,
            component: CostComponent::Total,
        }
    }

    pub fn component(k1: f64, k2: f64, component: CostComponent) -> Self {
        Self { k1, k2, component }
    }
}

impl ScalarFunction for CostFunction {
    fn evaluate(&self, x: f64) -> f64 {
        match self.component {
            CostComponent::Hardware => hardware_cost(x, self.k1),
            CostComponent::Inefficiency => inefficiency_cost(x, self.k2),
            CostComponent::Total => total_cost(x, self.k1, self.k2),
        }
    }

    fn derivative(&self, x: f64) -> Option<f64> {
        let value = match self.component {
            CostComponent::Hardware => 2.0 * self.k1 * x,
            CostComponent::Inefficiency => -self.k2 / (x * x),
            CostComponent::Total => cost_derivative(x, self.k1, self.k2),
        };
        Some(value)
    }

    fn second_derivative(&self, x: f64) -> Option<f64> {
        let value = match self.component {
            CostComponent::Hardware => 2.0 * self.k1,
            CostComponent::Inefficiency => 2.0 * self.k2 / (x * x * x),
            CostComponent::Total => cost_second_derivative(x, self.k1, self.k2),
        };
        Some(value)
    }

    fn name(&self) -> &str {
        match self.component {
            CostComponent::Hardware => "hardware cost k1*x^2",
            CostComponent::Inefficiency => "inefficiency cost k2/x",
            CostComponent::Total => "total cost k1*x^2 + k2/x",
        }
    }
}
