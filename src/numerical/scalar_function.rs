//! Functions of one real variable that the models, samplers and integrators work with.
//!
//! Anything that implements [`ScalarFunction`] can be sampled for plotting or handed to
//! the quadrature routines. Analytic derivatives are optional: the cost model supplies
//! both the first and the second derivative, the energy model only the first one.

pub trait ScalarFunction {
    fn evaluate(&self, x: f64) -> f64;

    /// `f'(x)` when known in closed form
    fn derivative(&self, _x: f64) -> Option<f64> {
        None
    }

    /// `f''(x)` when known in closed form
    fn second_derivative(&self, _x: f64) -> Option<f64> {
        None
    }

    /// shows up in logs and reports
    fn name(&self) -> &str {
        "f(x)"
    }
}

/// central finite difference, used to cross-check analytic derivatives
pub fn central_difference<S: ScalarFunction + ?Sized>(func: &S, x: f64, h: f64) -> f64 {
    (func.evaluate(x + h) - func.evaluate(x - h)) / (2.0 * h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct Sine;

    impl ScalarFunction for Sine {
        fn evaluate(&self, x: f64) -> f64 {
            x.sin()
        }

        fn derivative(&self, x: f64) -> Option<f64> {
            Some(x.cos())
        }

        fn name(&self) -> &str {
            "sin"
        }
    }

    struct Parabola;

    impl ScalarFunction for Parabola {
        fn evaluate(&self, x: f64) -> f64 {
            x * x - 4.0
        }
    }

    #[test]
    fn test_defaults() {
        let func = Parabola;
        assert_eq!(func.evaluate(2.0), 0.0);
        assert_eq!(func.evaluate(0.0), -4.0);
        assert_eq!(func.derivative(1.0), None);
        assert_eq!(func.second_derivative(1.0), None);
        assert_eq!(func.name(), "f(x)");
    }

    #[test]
    fn test_central_difference_matches_analytic() {
        for x in [0.0, 0.5, 1.0, 2.5] {
            let numeric = central_difference(&Sine, x, 1e-5);
            assert_relative_eq!(numeric, Sine.derivative(x).unwrap(), epsilon = 1e-8);
        }
        // exact for a parabola up to rounding
        assert_relative_eq!(central_difference(&Parabola, 3.0, 1e-3), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_trait_objects() {
        let funcs: Vec<Box<dyn ScalarFunction>> = vec![Box::new(Sine), Box::new(Parabola)];
        let names: Vec<&str> = funcs.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["sin", "f(x)"]);
    }
}
